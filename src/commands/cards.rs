// Copyright (c) 2026 Billfold.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::banks;
use crate::models::Card;
use crate::store::Store;
use crate::utils::{maybe_print_json, new_id, pretty_table, required_text, resolve_id, short_id};
use anyhow::{bail, ensure, Result};

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

fn add(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let name = required_text("Name", sub.get_one::<String>("name").unwrap())?;
    let bank = required_text("Bank", sub.get_one::<String>("bank").unwrap())?;
    let color = match sub.get_one::<String>("color") {
        Some(c) => {
            ensure!(
                banks::valid_hex_color(c),
                "Invalid color '{}', expected #RGB or #RRGGBB",
                c
            );
            c.clone()
        }
        None => banks::color_for(&bank).to_string(),
    };
    let card = Card {
        id: new_id(),
        name: name.clone(),
        bank: bank.clone(),
        color: color.clone(),
    };
    store.upsert_card(card)?;
    println!("Added card '{}' ({}, {})", name, bank, color);
    Ok(())
}

fn list(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = store.get_cards()?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|c| {
                vec![
                    short_id(&c.id),
                    c.name.clone(),
                    c.bank.clone(),
                    c.color.clone(),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["Id", "Name", "Bank", "Color"], rows));
    }
    Ok(())
}

fn edit(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let cards = store.get_cards()?;
    let id = resolve_id(
        cards.iter().map(|c| c.id.as_str()),
        sub.get_one::<String>("id").unwrap(),
    )?;
    let Some(mut card) = cards.into_iter().find(|c| c.id == id) else {
        bail!("No card matches id '{}'", id);
    };
    if let Some(n) = sub.get_one::<String>("name") {
        card.name = required_text("Name", n)?;
    }
    if let Some(b) = sub.get_one::<String>("bank") {
        // the stored color stays; pass --color to change it
        card.bank = required_text("Bank", b)?;
    }
    if let Some(c) = sub.get_one::<String>("color") {
        ensure!(
            banks::valid_hex_color(c),
            "Invalid color '{}', expected #RGB or #RRGGBB",
            c
        );
        card.color = c.clone();
    }
    let name = card.name.clone();
    store.upsert_card(card)?;
    println!("Updated card '{}'", name);
    Ok(())
}

fn rm(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let cards = store.get_cards()?;
    let id = resolve_id(
        cards.iter().map(|c| c.id.as_str()),
        sub.get_one::<String>("id").unwrap(),
    )?;
    let Some(card) = cards.iter().find(|c| c.id == id) else {
        bail!("No card matches id '{}'", id);
    };
    let name = card.name.clone();
    let on_card = store
        .get_purchases()?
        .iter()
        .filter(|p| p.card_id == id)
        .count();
    store.remove_card(&id)?;
    println!("Removed card '{}' and {} purchase(s) on it", name, on_card);
    Ok(())
}
