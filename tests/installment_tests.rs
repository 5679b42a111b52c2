// Copyright (c) Billfold.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use billfold::installments;
use billfold::models::{Card, Purchase};
use billfold::utils::new_id;
use rust_decimal::Decimal;

fn purchase(card_id: &str, start: &str, total: u32, current: u32, amount: &str) -> Purchase {
    Purchase {
        id: new_id(),
        card_id: card_id.to_string(),
        title: "Purchase".to_string(),
        start_month_key: start.to_string(),
        total_installments: total,
        current_installment_at_start: current,
        installment_amount: amount.parse::<Decimal>().unwrap(),
    }
}

#[test]
fn index_walks_one_per_calendar_month() {
    let p = purchase("c1", "2024-01", 3, 1, "100");
    assert_eq!(installments::installment_index(&p, "2023-12").unwrap(), 0);
    assert_eq!(installments::installment_index(&p, "2024-01").unwrap(), 1);
    assert_eq!(installments::installment_index(&p, "2024-02").unwrap(), 2);
    assert_eq!(installments::installment_index(&p, "2024-03").unwrap(), 3);
    assert_eq!(installments::installment_index(&p, "2024-04").unwrap(), 4);
    assert_eq!(installments::installment_index(&p, "2025-01").unwrap(), 13);
}

#[test]
fn active_exactly_while_the_index_is_in_range() {
    let p = purchase("c1", "2024-01", 3, 1, "100");
    assert!(!installments::is_active(&p, "2023-12").unwrap());
    assert!(installments::is_active(&p, "2024-01").unwrap());
    assert!(installments::is_active(&p, "2024-02").unwrap());
    assert!(installments::is_active(&p, "2024-03").unwrap());
    assert!(!installments::is_active(&p, "2024-04").unwrap());
}

#[test]
fn mid_cycle_anchor_shortens_the_tail() {
    // bought elsewhere, registered already on installment 3 of 12
    let p = purchase("c1", "2025-06", 12, 3, "250");
    assert_eq!(installments::installment_index(&p, "2025-06").unwrap(), 3);
    assert!(installments::is_active(&p, "2026-03").unwrap());
    assert_eq!(installments::installment_index(&p, "2026-03").unwrap(), 12);
    assert!(!installments::is_active(&p, "2026-04").unwrap());
}

#[test]
fn remaining_never_goes_negative() {
    let p = purchase("c1", "2024-01", 3, 1, "100");
    assert_eq!(installments::remaining(&p, "2023-12").unwrap(), 3);
    assert_eq!(installments::remaining(&p, "2024-01").unwrap(), 2);
    assert_eq!(installments::remaining(&p, "2024-03").unwrap(), 0);
    assert_eq!(installments::remaining(&p, "2024-08").unwrap(), 0);
}

#[test]
fn total_value_multiplies_amount_by_installments() {
    let p = purchase("c1", "2024-01", 12, 1, "250.50");
    assert_eq!(
        installments::total_value(&p),
        "3006.00".parse::<Decimal>().unwrap()
    );
}

#[test]
fn totals_by_card_only_counts_active_purchases() {
    let purchases = vec![
        purchase("a", "2024-01", 3, 1, "100"),
        purchase("a", "2024-02", 2, 1, "50"),
        purchase("b", "2023-01", 2, 1, "999"), // long finished
        purchase("b", "2024-02", 1, 1, "75"),
    ];
    let totals = installments::totals_by_card(&purchases, "2024-02").unwrap();
    assert_eq!(totals.get("a").copied(), Some("150".parse().unwrap()));
    assert_eq!(totals.get("b").copied(), Some("75".parse().unwrap()));

    let march = installments::totals_by_card(&purchases, "2024-03").unwrap();
    assert_eq!(march.get("a").copied(), Some("150".parse().unwrap()));
    assert_eq!(march.get("b"), None);
}

#[test]
fn month_total_counts_purchases_whose_card_is_gone() {
    let purchases = vec![
        purchase("a", "2024-01", 3, 1, "100"),
        purchase("deleted-card", "2024-01", 3, 1, "40"),
    ];
    let total = installments::month_total(&purchases, "2024-02").unwrap();
    assert_eq!(total, "140".parse::<Decimal>().unwrap());
}

#[test]
fn trend_runs_oldest_first_in_card_order() {
    let cards = vec![
        Card {
            id: "a".to_string(),
            name: "A".to_string(),
            bank: "Nubank".to_string(),
            color: "#820AD1".to_string(),
        },
        Card {
            id: "b".to_string(),
            name: "B".to_string(),
            bank: "Itaú".to_string(),
            color: "#EC7000".to_string(),
        },
    ];
    let purchases = vec![
        purchase("a", "2024-03", 3, 1, "100"), // 2024-03..05
        purchase("b", "2024-01", 2, 1, "50"),  // 2024-01..02
    ];

    let rows = installments::trend(&cards, &purchases, "2024-06", 6).unwrap();
    assert_eq!(rows.len(), 6);
    assert_eq!(rows[0].month, "2024-01");
    assert_eq!(rows[5].month, "2024-06");

    let zero = Decimal::ZERO;
    let hundred: Decimal = "100".parse().unwrap();
    let fifty: Decimal = "50".parse().unwrap();

    assert_eq!(rows[0].by_card, vec![zero, fifty]);
    assert_eq!(rows[0].total, fifty);
    assert_eq!(rows[2].by_card, vec![hundred, zero]);
    assert_eq!(rows[4].by_card, vec![hundred, zero]);
    assert_eq!(rows[5].by_card, vec![zero, zero]);
    assert_eq!(rows[5].total, zero);
}
