// Copyright (c) 2026 Billfold.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use billfold::models::{Card, Purchase, Transaction, TxKind};
use billfold::store::Store;
use billfold::utils::new_id;
use rust_decimal::Decimal;
use tempfile::{tempdir, TempDir};

fn setup() -> (TempDir, Store) {
    let dir = tempdir().unwrap();
    let store = Store::open(dir.path().join("billfold.json"));
    (dir, store)
}

fn tx(title: &str, amount: &str, kind: TxKind) -> Transaction {
    Transaction {
        id: new_id(),
        kind,
        title: title.to_string(),
        amount: amount.parse::<Decimal>().unwrap(),
        paid: match kind {
            TxKind::Expense => Some(false),
            TxKind::Income => None,
        },
    }
}

fn purchase(card_id: &str, title: &str, total: u32, current: u32) -> Purchase {
    Purchase {
        id: new_id(),
        card_id: card_id.to_string(),
        title: title.to_string(),
        start_month_key: "2025-01".to_string(),
        total_installments: total,
        current_installment_at_start: current,
        installment_amount: "100".parse::<Decimal>().unwrap(),
    }
}

#[test]
fn missing_file_reads_as_empty_document() {
    let (_dir, store) = setup();
    let doc = store.read().unwrap();
    assert!(doc.monthly.is_empty());
    assert!(doc.cards.is_empty());
    assert!(doc.purchases.is_empty());
}

#[test]
fn corrupt_file_is_an_error_and_stays_untouched() {
    let (_dir, store) = setup();
    std::fs::write(store.path(), "not json {{").unwrap();

    assert!(store.read().is_err());
    assert!(store
        .upsert_transaction("2025-01", tx("Rent", "1500", TxKind::Expense))
        .is_err());

    let raw = std::fs::read_to_string(store.path()).unwrap();
    assert_eq!(raw, "not json {{");
}

#[test]
fn init_creates_the_file_but_never_resets_it() {
    let (_dir, store) = setup();
    store.init().unwrap();
    assert!(store.path().exists());

    store
        .upsert_transaction("2025-02", tx("Salary", "5000", TxKind::Income))
        .unwrap();
    store.init().unwrap();
    assert_eq!(store.get_monthly("2025-02").unwrap().len(), 1);
}

#[test]
fn upsert_replaces_in_place_by_id() {
    let (_dir, store) = setup();
    let a = tx("Rent", "1500", TxKind::Expense);
    let b = tx("Market", "300", TxKind::Expense);
    let a_id = a.id.clone();
    store.upsert_transaction("2025-01", a).unwrap();
    store.upsert_transaction("2025-01", b).unwrap();

    let mut edited = tx("Rent (new lease)", "1650", TxKind::Expense);
    edited.id = a_id.clone();
    let list = store.upsert_transaction("2025-01", edited).unwrap();

    assert_eq!(list.len(), 2);
    assert_eq!(list[0].id, a_id);
    assert_eq!(list[0].title, "Rent (new lease)");
    assert_eq!(list[0].amount, "1650".parse::<Decimal>().unwrap());
    assert_eq!(list[1].title, "Market");
}

#[test]
fn replicate_appends_clones_with_fresh_ids() {
    let (_dir, store) = setup();
    store
        .upsert_transaction("2025-01", tx("Salary", "5000", TxKind::Income))
        .unwrap();
    store
        .upsert_transaction("2025-01", tx("Rent", "1500", TxKind::Expense))
        .unwrap();
    store
        .upsert_transaction("2025-02", tx("Bonus", "800", TxKind::Income))
        .unwrap();

    let dst = store.replicate_month("2025-01", "2025-02").unwrap();
    assert_eq!(dst.len(), 3);
    assert_eq!(dst[0].title, "Bonus");
    assert_eq!(dst[1].title, "Salary");
    assert_eq!(dst[2].title, "Rent");

    let src = store.get_monthly("2025-01").unwrap();
    for copy in &dst[1..] {
        assert!(src.iter().all(|orig| orig.id != copy.id));
        let orig = src.iter().find(|o| o.title == copy.title).unwrap();
        assert_eq!(orig.amount, copy.amount);
        assert_eq!(orig.paid, copy.paid);
    }
    // source untouched
    assert_eq!(src.len(), 2);
}

#[test]
fn toggle_paid_twice_restores_the_flag() {
    let (_dir, store) = setup();
    let t = tx("Internet", "99.90", TxKind::Expense);
    let id = t.id.clone();
    store.upsert_transaction("2025-03", t).unwrap();

    let once = store.toggle_paid("2025-03", &id).unwrap();
    assert!(once[0].is_paid());
    let twice = store.toggle_paid("2025-03", &id).unwrap();
    assert!(!twice[0].is_paid());
}

#[test]
fn clear_month_empties_only_that_bucket() {
    let (_dir, store) = setup();
    store
        .upsert_transaction("2025-01", tx("Rent", "1500", TxKind::Expense))
        .unwrap();
    store
        .upsert_transaction("2025-02", tx("Rent", "1500", TxKind::Expense))
        .unwrap();

    store.clear_month("2025-01").unwrap();
    assert!(store.get_monthly("2025-01").unwrap().is_empty());
    assert_eq!(store.get_monthly("2025-02").unwrap().len(), 1);
}

#[test]
fn removing_a_card_removes_its_purchases() {
    let (_dir, store) = setup();
    let a = Card {
        id: new_id(),
        name: "Violet".to_string(),
        bank: "Nubank".to_string(),
        color: "#820AD1".to_string(),
    };
    let b = Card {
        id: new_id(),
        name: "Orange".to_string(),
        bank: "Itaú".to_string(),
        color: "#EC7000".to_string(),
    };
    let a_id = a.id.clone();
    let b_id = b.id.clone();
    store.upsert_card(a).unwrap();
    store.upsert_card(b).unwrap();
    store.upsert_purchase(purchase(&a_id, "TV", 10, 1)).unwrap();
    store.upsert_purchase(purchase(&a_id, "Sofa", 6, 1)).unwrap();
    store.upsert_purchase(purchase(&b_id, "Phone", 12, 1)).unwrap();

    let (cards, purchases) = store.remove_card(&a_id).unwrap();
    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0].id, b_id);
    assert_eq!(purchases.len(), 1);
    assert_eq!(purchases[0].title, "Phone");
}

#[test]
fn upsert_purchase_keeps_the_anchor_inside_bounds() {
    let (_dir, store) = setup();
    let zeroed = store.upsert_purchase(purchase("c1", "Desk", 0, 0)).unwrap();
    assert_eq!(zeroed[0].total_installments, 1);
    assert_eq!(zeroed[0].current_installment_at_start, 1);

    let high = store.upsert_purchase(purchase("c1", "Chair", 3, 9)).unwrap();
    assert_eq!(high[1].total_installments, 3);
    assert_eq!(high[1].current_installment_at_start, 3);
}
