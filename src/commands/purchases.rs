// Copyright (c) 2026 Billfold.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::installments;
use crate::models::{Card, Purchase};
use crate::store::Store;
use crate::utils::{
    fmt_brl, maybe_print_json, month_or_current, new_id, parse_month, parse_positive_amount,
    pretty_table, required_text, resolve_id, short_id,
};
use anyhow::{bail, ensure, Result};
use rust_decimal::Decimal;
use serde::Serialize;

pub fn handle(store: &Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(store, sub)?,
        Some(("list", sub)) => list(store, sub)?,
        Some(("edit", sub)) => edit(store, sub)?,
        Some(("rm", sub)) => rm(store, sub)?,
        _ => {}
    }
    Ok(())
}

/// Accepts a card id, a unique id prefix, or a card name.
fn card_id_for(cards: &[Card], needle: &str) -> Result<String> {
    if let Some(c) = cards.iter().find(|c| c.id == needle) {
        return Ok(c.id.clone());
    }
    let by_name: Vec<&Card> = cards
        .iter()
        .filter(|c| c.name.eq_ignore_ascii_case(needle))
        .collect();
    match by_name.len() {
        1 => Ok(by_name[0].id.clone()),
        0 => resolve_id(cards.iter().map(|c| c.id.as_str()), needle)
            .map_err(|_| anyhow::anyhow!("Card '{}' not found", needle)),
        _ => bail!("Card name '{}' is ambiguous, use the id", needle),
    }
}

fn add(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let cards = store.get_cards()?;
    let card_id = card_id_for(&cards, sub.get_one::<String>("card").unwrap())?;
    let title = required_text("Title", sub.get_one::<String>("title").unwrap())?;
    let amount = parse_positive_amount(sub.get_one::<String>("amount").unwrap())?;
    let total = *sub.get_one::<u32>("installments").unwrap();
    let current = *sub.get_one::<u32>("current").unwrap();
    ensure!(
        current <= total,
        "Current installment {} exceeds the total {}",
        current,
        total
    );
    let start = month_or_current(sub.get_one::<String>("start"))?;
    let p = Purchase {
        id: new_id(),
        card_id,
        title: title.clone(),
        start_month_key: start.clone(),
        total_installments: total,
        current_installment_at_start: current,
        installment_amount: amount,
    };
    store.upsert_purchase(p)?;
    println!(
        "Added '{}' in {} installment(s) of {} starting {}",
        title,
        total,
        fmt_brl(&amount),
        start
    );
    Ok(())
}

fn list(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(store, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    short_id(&r.id),
                    r.card.clone(),
                    r.title.clone(),
                    format!("{}/{}", r.installment, r.total_installments),
                    r.remaining.to_string(),
                    fmt_brl(&r.amount),
                    fmt_brl(&r.total_value),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Id", "Card", "Title", "Installment", "Remaining", "Amount", "Total value"],
                rows,
            )
        );
    }
    Ok(())
}

#[derive(Serialize)]
pub struct PurchaseRow {
    pub id: String,
    pub card: String,
    pub title: String,
    pub installment: i64,
    pub total_installments: u32,
    pub remaining: i64,
    pub amount: Decimal,
    pub total_value: Decimal,
}

pub fn query_rows(store: &Store, sub: &clap::ArgMatches) -> Result<Vec<PurchaseRow>> {
    let month = month_or_current(sub.get_one::<String>("month"))?;
    let all = sub.get_flag("all");
    let cards = store.get_cards()?;
    let mut data = Vec::new();
    for p in store.get_purchases()? {
        if !all && !installments::is_active(&p, &month)? {
            continue;
        }
        let card = cards
            .iter()
            .find(|c| c.id == p.card_id)
            .map(|c| c.name.clone())
            .unwrap_or_else(|| "—".to_string());
        data.push(PurchaseRow {
            id: p.id.clone(),
            card,
            title: p.title.clone(),
            installment: installments::installment_index(&p, &month)?,
            total_installments: p.total_installments,
            remaining: installments::remaining(&p, &month)?,
            amount: p.installment_amount,
            total_value: installments::total_value(&p),
        });
    }
    Ok(data)
}

fn edit(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let purchases = store.get_purchases()?;
    let id = resolve_id(
        purchases.iter().map(|p| p.id.as_str()),
        sub.get_one::<String>("id").unwrap(),
    )?;
    let Some(mut p) = purchases.into_iter().find(|p| p.id == id) else {
        bail!("No purchase matches id '{}'", id);
    };
    if let Some(t) = sub.get_one::<String>("title") {
        p.title = required_text("Title", t)?;
    }
    if let Some(c) = sub.get_one::<String>("card") {
        let cards = store.get_cards()?;
        p.card_id = card_id_for(&cards, c)?;
    }
    if let Some(a) = sub.get_one::<String>("amount") {
        p.installment_amount = parse_positive_amount(a)?;
    }
    if let Some(n) = sub.get_one::<u32>("installments") {
        p.total_installments = *n;
    }
    if let Some(k) = sub.get_one::<u32>("current") {
        p.current_installment_at_start = *k;
    }
    if let Some(s) = sub.get_one::<String>("start") {
        p.start_month_key = parse_month(s)?;
    }
    ensure!(
        p.current_installment_at_start <= p.total_installments,
        "Current installment {} exceeds the total {}",
        p.current_installment_at_start,
        p.total_installments
    );
    let title = p.title.clone();
    store.upsert_purchase(p)?;
    println!("Updated purchase '{}'", title);
    Ok(())
}

fn rm(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let purchases = store.get_purchases()?;
    let id = resolve_id(
        purchases.iter().map(|p| p.id.as_str()),
        sub.get_one::<String>("id").unwrap(),
    )?;
    let title = purchases
        .iter()
        .find(|p| p.id == id)
        .map(|p| p.title.clone())
        .unwrap_or_default();
    store.remove_purchase(&id)?;
    println!("Removed purchase '{}'", title);
    Ok(())
}
