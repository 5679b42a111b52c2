// Copyright (c) Billfold.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use billfold::banks::{color_for, valid_hex_color, DEFAULT_CARD_COLOR};
use billfold::store::Store;
use billfold::{cli, commands};
use tempfile::{tempdir, TempDir};

fn setup() -> (TempDir, Store) {
    let dir = tempdir().unwrap();
    let store = Store::open(dir.path().join("billfold.json"));
    (dir, store)
}

fn run(store: &Store, argv: &[&str]) -> anyhow::Result<()> {
    let matches = cli::build_cli().get_matches_from(argv);
    match matches.subcommand() {
        Some(("card", sub)) => commands::cards::handle(store, sub),
        Some(("purchase", sub)) => commands::purchases::handle(store, sub),
        _ => panic!("unexpected subcommand"),
    }
}

#[test]
fn known_banks_map_to_their_brand_color() {
    assert_eq!(color_for("Itaú"), "#EC7000");
    assert_eq!(color_for("itau"), "#EC7000");
    assert_eq!(color_for("Banco Itaú S.A."), "#EC7000");
    assert_eq!(color_for("NUBANK"), "#820AD1");
    assert_eq!(color_for("Caixa Econômica"), "#005CA9");
    assert_eq!(color_for("bb"), "#FFCC00");
    assert_eq!(color_for("Banco do Brasil"), "#FFCC00");
    assert_eq!(color_for("Some Credit Union"), DEFAULT_CARD_COLOR);
}

#[test]
fn hex_colors_are_validated() {
    assert!(valid_hex_color("#EC7000"));
    assert!(valid_hex_color("#abc"));
    assert!(!valid_hex_color("EC7000"));
    assert!(!valid_hex_color("#EC70"));
    assert!(!valid_hex_color("#GGGGGG"));
}

#[test]
fn add_uses_the_bank_color_unless_one_is_given() {
    let (_dir, store) = setup();
    run(&store, &["billfold", "card", "add", "Roxinho", "--bank", "Nubank"]).unwrap();
    run(
        &store,
        &["billfold", "card", "add", "Work", "--bank", "Itaú", "--color", "#123456"],
    )
    .unwrap();

    let cards = store.get_cards().unwrap();
    assert_eq!(cards[0].color, "#820AD1");
    assert_eq!(cards[1].color, "#123456");
}

#[test]
fn add_rejects_a_malformed_color() {
    let (_dir, store) = setup();
    assert!(run(
        &store,
        &["billfold", "card", "add", "Bad", "--bank", "Inter", "--color", "red"],
    )
    .is_err());
    assert!(store.get_cards().unwrap().is_empty());
}

#[test]
fn edit_keeps_the_stored_color_when_only_the_bank_changes() {
    let (_dir, store) = setup();
    run(&store, &["billfold", "card", "add", "Main", "--bank", "Nubank"]).unwrap();
    let id = store.get_cards().unwrap()[0].id.clone();

    run(&store, &["billfold", "card", "edit", &id, "--bank", "Itaú"]).unwrap();
    let card = store.get_cards().unwrap()[0].clone();
    assert_eq!(card.bank, "Itaú");
    assert_eq!(card.color, "#820AD1");

    run(&store, &["billfold", "card", "edit", &id, "--color", "#EC7000"]).unwrap();
    assert_eq!(store.get_cards().unwrap()[0].color, "#EC7000");
}

#[test]
fn removing_a_card_drops_its_purchases_too() {
    let (_dir, store) = setup();
    run(&store, &["billfold", "card", "add", "Main", "--bank", "Nubank"]).unwrap();
    run(&store, &["billfold", "card", "add", "Spare", "--bank", "Inter"]).unwrap();
    run(
        &store,
        &[
            "billfold", "purchase", "add", "TV", "--card", "Main", "-a", "200", "-n", "10",
            "--start", "2025-01",
        ],
    )
    .unwrap();
    run(
        &store,
        &[
            "billfold", "purchase", "add", "Fridge", "--card", "Spare", "-a", "150", "-n", "12",
            "--start", "2025-01",
        ],
    )
    .unwrap();

    let main_id = store.get_cards().unwrap()[0].id.clone();
    run(&store, &["billfold", "card", "rm", &main_id]).unwrap();

    let purchases = store.get_purchases().unwrap();
    assert_eq!(purchases.len(), 1);
    assert_eq!(purchases[0].title, "Fridge");
    assert_eq!(store.get_cards().unwrap().len(), 1);
}
