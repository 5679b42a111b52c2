// Copyright (c) 2026 Billfold.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::installments;
use crate::store::Store;
use crate::utils::{month_or_current, parse_month};
use anyhow::{bail, Result};
use serde_json::json;

pub fn handle(store: &Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => export_transactions(store, sub),
        Some(("purchases", sub)) => export_purchases(store, sub),
        _ => Ok(()),
    }
}

fn export_transactions(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap();
    let month = match sub.get_one::<String>("month") {
        Some(s) => Some(parse_month(s)?),
        None => None,
    };

    let doc = store.read()?;
    let mut items = Vec::new();
    for (key, list) in &doc.monthly {
        if let Some(want) = &month {
            if want != key {
                continue;
            }
        }
        for t in list {
            items.push((key.clone(), t));
        }
    }

    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record(["month", "id", "type", "title", "amount", "paid"])?;
            for (m, t) in &items {
                let amount = t.amount.to_string();
                let paid = match t.paid {
                    Some(true) => "true",
                    Some(false) => "false",
                    None => "",
                };
                wtr.write_record([
                    m.as_str(),
                    t.id.as_str(),
                    t.kind.as_str(),
                    t.title.as_str(),
                    amount.as_str(),
                    paid,
                ])?;
            }
            wtr.flush()?;
        }
        "json" => {
            let rows: Vec<serde_json::Value> = items
                .iter()
                .map(|(m, t)| {
                    json!({
                        "month": m.as_str(),
                        "id": t.id.as_str(),
                        "type": t.kind.as_str(),
                        "title": t.title.as_str(),
                        "amount": t.amount,
                        "paid": t.paid,
                    })
                })
                .collect();
            std::fs::write(out, serde_json::to_string_pretty(&rows)?)?;
        }
        _ => bail!("Unknown format: {} (use csv|json)", fmt),
    }
    println!("Exported {} transaction(s) to {}", items.len(), out);
    Ok(())
}

fn export_purchases(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap();
    let month = month_or_current(sub.get_one::<String>("month"))?;

    let cards = store.get_cards()?;
    let purchases = store.get_purchases()?;

    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record([
                "id",
                "card",
                "title",
                "startMonth",
                "installment",
                "totalInstallments",
                "remaining",
                "active",
                "amount",
                "totalValue",
            ])?;
            for p in &purchases {
                let card = cards
                    .iter()
                    .find(|c| c.id == p.card_id)
                    .map(|c| c.name.as_str())
                    .unwrap_or("");
                let installment = installments::installment_index(p, &month)?.to_string();
                let total = p.total_installments.to_string();
                let remaining = installments::remaining(p, &month)?.to_string();
                let active = installments::is_active(p, &month)?.to_string();
                let amount = p.installment_amount.to_string();
                let total_value = installments::total_value(p).to_string();
                wtr.write_record([
                    p.id.as_str(),
                    card,
                    p.title.as_str(),
                    p.start_month_key.as_str(),
                    installment.as_str(),
                    total.as_str(),
                    remaining.as_str(),
                    active.as_str(),
                    amount.as_str(),
                    total_value.as_str(),
                ])?;
            }
            wtr.flush()?;
        }
        "json" => {
            let mut rows = Vec::new();
            for p in &purchases {
                let card = cards
                    .iter()
                    .find(|c| c.id == p.card_id)
                    .map(|c| c.name.clone());
                let installment = installments::installment_index(p, &month)?;
                let remaining = installments::remaining(p, &month)?;
                let active = installments::is_active(p, &month)?;
                rows.push(json!({
                    "id": p.id,
                    "card": card,
                    "title": p.title,
                    "startMonth": p.start_month_key,
                    "installment": installment,
                    "totalInstallments": p.total_installments,
                    "remaining": remaining,
                    "active": active,
                    "amount": p.installment_amount,
                    "totalValue": installments::total_value(p),
                }));
            }
            std::fs::write(out, serde_json::to_string_pretty(&rows)?)?;
        }
        _ => bail!("Unknown format: {} (use csv|json)", fmt),
    }
    println!(
        "Exported {} purchase(s) to {} (as of {})",
        purchases.len(),
        out,
        month
    );
    Ok(())
}
