// Copyright (c) 2026 Billfold.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Transaction, TxKind};
use crate::store::Store;
use crate::utils::{
    fmt_brl, maybe_print_json, month_add, month_or_current, new_id, parse_month,
    parse_positive_amount, pretty_table, required_text, resolve_id, short_id,
};
use anyhow::{bail, ensure, Result};

pub fn handle(store: &Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(store, sub)?,
        Some(("list", sub)) => list(store, sub)?,
        Some(("edit", sub)) => edit(store, sub)?,
        Some(("rm", sub)) => rm(store, sub)?,
        Some(("paid", sub)) => paid(store, sub)?,
        Some(("replicate", sub)) => replicate(store, sub)?,
        Some(("clear", sub)) => clear(store, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let month = month_or_current(sub.get_one::<String>("month"))?;
    let title = required_text("Title", sub.get_one::<String>("title").unwrap())?;
    let amount = parse_positive_amount(sub.get_one::<String>("amount").unwrap())?;
    let kind = match sub.get_one::<String>("kind").unwrap().as_str() {
        "income" => TxKind::Income,
        _ => TxKind::Expense,
    };
    let tx = Transaction {
        id: new_id(),
        kind,
        title: title.clone(),
        amount,
        paid: match kind {
            TxKind::Expense => Some(false),
            TxKind::Income => None,
        },
    };
    store.upsert_transaction(&month, tx)?;
    println!(
        "Recorded {} '{}' of {} in {}",
        kind.as_str(),
        title,
        fmt_brl(&amount),
        month
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
            .map(|t| {
                let status = match (t.kind, t.is_paid()) {
                    (TxKind::Income, _) => String::new(),
                    (TxKind::Expense, true) => "paid".to_string(),
                    (TxKind::Expense, false) => "pending".to_string(),
                };
                vec![
                    short_id(&t.id),
                    t.kind.as_str().to_string(),
                    t.title.clone(),
                    fmt_brl(&t.amount),
                    status,
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Id", "Kind", "Title", "Amount", "Status"], rows)
        );
    }
    Ok(())
}

pub fn query_rows(store: &Store, sub: &clap::ArgMatches) -> Result<Vec<Transaction>> {
    let month = month_or_current(sub.get_one::<String>("month"))?;
    let mut data = store.get_monthly(&month)?;
    if let Some(kind) = sub.get_one::<String>("kind") {
        let want_income = kind == "income";
        data.retain(|t| (t.kind == TxKind::Income) == want_income);
    }
    Ok(data)
}

fn edit(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let month = month_or_current(sub.get_one::<String>("month"))?;
    let list = store.get_monthly(&month)?;
    let id = resolve_id(
        list.iter().map(|t| t.id.as_str()),
        sub.get_one::<String>("id").unwrap(),
    )?;
    let Some(mut tx) = list.into_iter().find(|t| t.id == id) else {
        bail!("No transaction '{}' in {}", id, month);
    };
    if let Some(t) = sub.get_one::<String>("title") {
        tx.title = required_text("Title", t)?;
    }
    if let Some(a) = sub.get_one::<String>("amount") {
        tx.amount = parse_positive_amount(a)?;
    }
    let title = tx.title.clone();
    store.upsert_transaction(&month, tx)?;
    println!("Updated '{}' in {}", title, month);
    Ok(())
}

fn rm(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let month = month_or_current(sub.get_one::<String>("month"))?;
    let list = store.get_monthly(&month)?;
    let id = resolve_id(
        list.iter().map(|t| t.id.as_str()),
        sub.get_one::<String>("id").unwrap(),
    )?;
    store.remove_transaction(&month, &id)?;
    println!("Removed transaction {} from {}", short_id(&id), month);
    Ok(())
}

fn paid(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let month = month_or_current(sub.get_one::<String>("month"))?;
    let list = store.get_monthly(&month)?;
    let id = resolve_id(
        list.iter().map(|t| t.id.as_str()),
        sub.get_one::<String>("id").unwrap(),
    )?;
    let Some(tx) = list.iter().find(|t| t.id == id) else {
        bail!("No transaction '{}' in {}", id, month);
    };
    ensure!(
        tx.kind == TxKind::Expense,
        "'{}' is income, only expenses carry a paid flag",
        tx.title
    );
    let after = store.toggle_paid(&month, &id)?;
    let Some(tx) = after.iter().find(|t| t.id == id) else {
        bail!("No transaction '{}' in {}", id, month);
    };
    println!(
        "'{}' is now {}",
        tx.title,
        if tx.is_paid() { "paid" } else { "pending" }
    );
    Ok(())
}

fn replicate(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let from = month_or_current(sub.get_one::<String>("from"))?;
    let to = match sub.get_one::<String>("to") {
        Some(s) => parse_month(s)?,
        None => month_add(&from, 1)?,
    };
    ensure!(from != to, "Source and destination are both {}", from);
    let copied = store.get_monthly(&from)?.len();
    store.replicate_month(&from, &to)?;
    println!("Replicated {} transaction(s) from {} to {}", copied, from, to);
    Ok(())
}

fn clear(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let month = month_or_current(sub.get_one::<String>("month"))?;
    store.clear_month(&month)?;
    println!("Cleared {}", month);
    Ok(())
}
