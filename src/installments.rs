// Copyright (c) 2026 Billfold.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rust_decimal::Decimal;
use std::collections::HashMap;

use crate::models::{Card, Purchase};
use crate::utils::{month_add, months_between};

/// 1-based installment that `p` is on in `month_key`: the installment the
/// purchase started on plus the calendar-month distance from its anchor.
/// Falls outside [1, total] when the purchase has not started yet or has
/// already finished; day-of-month never enters into it.
pub fn installment_index(p: &Purchase, month_key: &str) -> Result<i64> {
    let diff = months_between(&p.start_month_key, month_key)?;
    Ok(p.current_installment_at_start as i64 + diff as i64)
}

/// A purchase bills in `month_key` iff its installment index is in
/// [1, total]. Finished purchases simply stop matching; nothing deletes
/// them.
pub fn is_active(p: &Purchase, month_key: &str) -> Result<bool> {
    let idx = installment_index(p, month_key)?;
    Ok(idx >= 1 && idx <= p.total_installments as i64)
}

/// Installments still due after the one billed in `month_key`.
pub fn remaining(p: &Purchase, month_key: &str) -> Result<i64> {
    let idx = installment_index(p, month_key)?;
    Ok((p.total_installments as i64 - idx).max(0))
}

pub fn total_value(p: &Purchase) -> Decimal {
    p.installment_amount * Decimal::from(p.total_installments)
}

/// Per-card sum of installment amounts over the purchases active in the
/// month, keyed by card id.
pub fn totals_by_card(purchases: &[Purchase], month_key: &str) -> Result<HashMap<String, Decimal>> {
    let mut map: HashMap<String, Decimal> = HashMap::new();
    for p in purchases {
        if is_active(p, month_key)? {
            *map.entry(p.card_id.clone()).or_insert(Decimal::ZERO) += p.installment_amount;
        }
    }
    Ok(map)
}

/// Total billed across all cards in the month (orphaned purchases whose
/// card is gone still count; `doctor` reports those).
pub fn month_total(purchases: &[Purchase], month_key: &str) -> Result<Decimal> {
    Ok(totals_by_card(purchases, month_key)?.values().copied().sum())
}

/// One row of the trailing-months series: totals in the caller's card
/// order plus the month total.
#[derive(Debug, Clone, serde::Serialize)]
pub struct TrendRow {
    pub month: String,
    pub by_card: Vec<Decimal>,
    pub total: Decimal,
}

/// Totals for the `window` months ending at `end_key`, oldest first.
/// Recomputed in full on every call; the data is tens of records, not
/// millions.
pub fn trend(
    cards: &[Card],
    purchases: &[Purchase],
    end_key: &str,
    window: u32,
) -> Result<Vec<TrendRow>> {
    let mut rows = Vec::with_capacity(window as usize);
    for i in (0..window).rev() {
        let key = month_add(end_key, -(i as i32))?;
        let totals = totals_by_card(purchases, &key)?;
        let by_card: Vec<Decimal> = cards
            .iter()
            .map(|c| totals.get(&c.id).copied().unwrap_or(Decimal::ZERO))
            .collect();
        let total = totals.values().copied().sum();
        rows.push(TrendRow {
            month: key,
            by_card,
            total,
        });
    }
    Ok(rows)
}
