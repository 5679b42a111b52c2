// Copyright (c) 2026 Billfold.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::installments;
use crate::models::{Transaction, TxKind};
use crate::store::Store;
use crate::utils::{fmt_brl, maybe_print_json, month_label, month_or_current, pretty_table};
use anyhow::Result;
use rust_decimal::Decimal;
use serde::Serialize;

pub fn handle(store: &Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("month", sub)) => month(store, sub)?,
        Some(("cards", sub)) => cards(store, sub)?,
        Some(("trend", sub)) => trend(store, sub)?,
        _ => {}
    }
    Ok(())
}

#[derive(Serialize)]
pub struct MonthSummary {
    pub month: String,
    pub income: Decimal,
    pub expenses: Decimal,
    pub expenses_paid: Decimal,
    pub balance: Decimal,
    pub projected: Decimal,
}

/// Balance counts only paid expenses; projected counts them all.
pub fn month_summary(month: &str, items: &[Transaction]) -> MonthSummary {
    let mut income = Decimal::ZERO;
    let mut expenses = Decimal::ZERO;
    let mut expenses_paid = Decimal::ZERO;
    for t in items {
        match t.kind {
            TxKind::Income => income += t.amount,
            TxKind::Expense => {
                expenses += t.amount;
                if t.is_paid() {
                    expenses_paid += t.amount;
                }
            }
        }
    }
    MonthSummary {
        month: month.to_string(),
        income,
        expenses,
        expenses_paid,
        balance: income - expenses_paid,
        projected: income - expenses,
    }
}

fn month(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let key = month_or_current(sub.get_one::<String>("month"))?;
    let summary = month_summary(&key, &store.get_monthly(&key)?);
    if !maybe_print_json(json_flag, jsonl_flag, &summary)? {
        let rows = vec![
            vec!["Income".to_string(), fmt_brl(&summary.income)],
            vec![
                "Expenses".to_string(),
                format!(
                    "{} ({} paid)",
                    fmt_brl(&summary.expenses),
                    fmt_brl(&summary.expenses_paid)
                ),
            ],
            vec!["Balance (paid)".to_string(), fmt_brl(&summary.balance)],
            vec!["Projected balance".to_string(), fmt_brl(&summary.projected)],
        ];
        println!("{}", pretty_table(&[key.as_str(), "Amount"], rows));
    }
    Ok(())
}

#[derive(Serialize)]
pub struct CardTotalRow {
    pub card: String,
    pub color: String,
    pub active: usize,
    pub total: Decimal,
}

#[derive(Serialize)]
pub struct CardsReport {
    pub month: String,
    pub cards: Vec<CardTotalRow>,
    pub total: Decimal,
}

fn cards(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let key = month_or_current(sub.get_one::<String>("month"))?;
    let cards = store.get_cards()?;
    let purchases = store.get_purchases()?;
    let by_card = installments::totals_by_card(&purchases, &key)?;
    let mut rows = Vec::with_capacity(cards.len());
    for c in &cards {
        let mut active = 0usize;
        for p in purchases.iter().filter(|p| p.card_id == c.id) {
            if installments::is_active(p, &key)? {
                active += 1;
            }
        }
        rows.push(CardTotalRow {
            card: c.name.clone(),
            color: c.color.clone(),
            active,
            total: by_card.get(&c.id).copied().unwrap_or(Decimal::ZERO),
        });
    }
    // the grand total also counts purchases whose card is gone
    let report = CardsReport {
        month: key.clone(),
        cards: rows,
        total: installments::month_total(&purchases, &key)?,
    };
    if !maybe_print_json(json_flag, jsonl_flag, &report)? {
        let mut data: Vec<Vec<String>> = report
            .cards
            .iter()
            .map(|r| {
                vec![
                    r.card.clone(),
                    r.color.clone(),
                    r.active.to_string(),
                    fmt_brl(&r.total),
                ]
            })
            .collect();
        data.push(vec![
            "Total".to_string(),
            String::new(),
            String::new(),
            fmt_brl(&report.total),
        ]);
        println!(
            "{}",
            pretty_table(&["Card", "Color", "Active", key.as_str()], data)
        );
    }
    Ok(())
}

#[derive(Serialize)]
struct TrendCardCell {
    card: String,
    total: Decimal,
}

#[derive(Serialize)]
struct TrendReportRow {
    month: String,
    cards: Vec<TrendCardCell>,
    total: Decimal,
}

fn trend(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let end = month_or_current(sub.get_one::<String>("month"))?;
    let window = *sub.get_one::<u32>("months").unwrap();
    let cards = store.get_cards()?;
    let purchases = store.get_purchases()?;
    let series = installments::trend(&cards, &purchases, &end, window)?;

    if json_flag || jsonl_flag {
        let out: Vec<TrendReportRow> = series
            .iter()
            .map(|r| TrendReportRow {
                month: r.month.clone(),
                cards: cards
                    .iter()
                    .zip(&r.by_card)
                    .map(|(c, v)| TrendCardCell {
                        card: c.name.clone(),
                        total: *v,
                    })
                    .collect(),
                total: r.total,
            })
            .collect();
        maybe_print_json(json_flag, jsonl_flag, &out)?;
        return Ok(());
    }

    let mut headers: Vec<&str> = Vec::with_capacity(cards.len() + 2);
    headers.push("Month");
    for c in &cards {
        headers.push(c.name.as_str());
    }
    headers.push("Total");
    let mut rows = Vec::with_capacity(series.len());
    for r in &series {
        let mut cells = vec![month_label(&r.month)?];
        for v in &r.by_card {
            cells.push(fmt_brl(v));
        }
        cells.push(fmt_brl(&r.total));
        rows.push(cells);
    }
    println!("{}", pretty_table(&headers, rows));
    Ok(())
}
