// Copyright (c) 2026 Billfold.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::Document;
use crate::store::Store;
use crate::utils::{parse_month, pretty_table, short_id};
use anyhow::Result;
use rust_decimal::Decimal;
use std::collections::HashSet;

pub fn handle(store: &Store) -> Result<()> {
    let doc = store.read()?;
    let rows = collect_issues(&doc);
    if rows.is_empty() {
        println!("✅ doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}

/// The store never writes these shapes itself; they come from hand-edited
/// or imported files. Doctor reports, it does not repair.
pub fn collect_issues(doc: &Document) -> Vec<Vec<String>> {
    let mut rows = Vec::new();

    // 1) Month keys that are not canonical YYYY-MM
    for key in doc.monthly.keys() {
        if !canonical_month(key) {
            rows.push(vec![
                "bad_month_key".into(),
                format!("monthly bucket '{}'", key),
            ]);
        }
    }

    // 2) Duplicate ids within a bucket, non-positive amounts
    for (key, list) in &doc.monthly {
        let mut seen = HashSet::new();
        for t in list {
            if !seen.insert(t.id.as_str()) {
                rows.push(vec![
                    "duplicate_tx_id".into(),
                    format!("{} appears twice in {}", short_id(&t.id), key),
                ]);
            }
            if t.amount <= Decimal::ZERO {
                rows.push(vec![
                    "non_positive_amount".into(),
                    format!("'{}' in {} is {}", t.title, key, t.amount),
                ]);
            }
        }
    }

    // 3) Cards
    let mut card_ids = HashSet::new();
    for c in &doc.cards {
        if !card_ids.insert(c.id.as_str()) {
            rows.push(vec![
                "duplicate_card_id".into(),
                format!("card '{}' ({})", c.name, short_id(&c.id)),
            ]);
        }
    }

    // 4) Purchases
    let mut purchase_ids = HashSet::new();
    for p in &doc.purchases {
        if !purchase_ids.insert(p.id.as_str()) {
            rows.push(vec![
                "duplicate_purchase_id".into(),
                format!("'{}' ({})", p.title, short_id(&p.id)),
            ]);
        }
        if !card_ids.contains(p.card_id.as_str()) {
            rows.push(vec![
                "orphan_purchase".into(),
                format!("'{}' references missing card {}", p.title, short_id(&p.card_id)),
            ]);
        }
        if !canonical_month(&p.start_month_key) {
            rows.push(vec![
                "bad_month_key".into(),
                format!("purchase '{}' starts '{}'", p.title, p.start_month_key),
            ]);
        }
        if p.total_installments == 0 {
            rows.push(vec!["zero_installments".into(), format!("'{}'", p.title)]);
        }
        if p.current_installment_at_start == 0
            || p.current_installment_at_start > p.total_installments
        {
            rows.push(vec![
                "anchor_out_of_range".into(),
                format!(
                    "'{}' starts at {}/{}",
                    p.title, p.current_installment_at_start, p.total_installments
                ),
            ]);
        }
        if p.installment_amount <= Decimal::ZERO {
            rows.push(vec![
                "non_positive_amount".into(),
                format!("purchase '{}' is {}", p.title, p.installment_amount),
            ]);
        }
    }

    rows
}

fn canonical_month(key: &str) -> bool {
    parse_month(key).map(|canon| canon == key).unwrap_or(false)
}
