// Copyright (c) 2026 Billfold.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use chrono::{Datelike, Months, NaiveDate};
use comfy_table::{presets::UTF8_FULL, Cell, Table};
use rust_decimal::Decimal;

pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Canonicalize a YYYY-MM month key ("2025-8" becomes "2025-08").
pub fn parse_month(s: &str) -> Result<String> {
    let d = NaiveDate::parse_from_str(&format!("{}-01", s.trim()), "%Y-%m-%d")
        .with_context(|| format!("Invalid month '{}', expected YYYY-MM", s))?;
    Ok(d.format("%Y-%m").to_string())
}

pub fn month_to_date(key: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(&format!("{}-01", key), "%Y-%m-%d")
        .with_context(|| format!("Invalid month key '{}'", key))
}

pub fn current_month() -> String {
    chrono::Local::now().date_naive().format("%Y-%m").to_string()
}

/// Month from a CLI arg, falling back to the current month.
pub fn month_or_current(arg: Option<&String>) -> Result<String> {
    match arg {
        Some(s) => parse_month(s),
        None => Ok(current_month()),
    }
}

pub fn month_add(key: &str, delta: i32) -> Result<String> {
    let d = month_to_date(key)?;
    let shifted = if delta >= 0 {
        d.checked_add_months(Months::new(delta as u32))
    } else {
        d.checked_sub_months(Months::new(delta.unsigned_abs()))
    }
    .with_context(|| format!("Month arithmetic out of range for '{}' {:+}", key, delta))?;
    Ok(shifted.format("%Y-%m").to_string())
}

/// Calendar-month distance, positive when `to` is after `from`.
pub fn months_between(from: &str, to: &str) -> Result<i32> {
    let a = month_to_date(from)?;
    let b = month_to_date(to)?;
    Ok((b.year() - a.year()) * 12 + (b.month() as i32 - a.month() as i32))
}

/// Parse a money amount. A comma marks the decimal separator pt-BR style
/// ("1.234,56"); otherwise plain decimal notation is expected.
pub fn parse_amount(s: &str) -> Result<Decimal> {
    let raw = s.trim();
    let normalized = if raw.contains(',') {
        raw.replace('.', "").replace(',', ".")
    } else {
        raw.to_string()
    };
    normalized
        .parse::<Decimal>()
        .with_context(|| format!("Invalid amount '{}', expected 1234.56 or 1.234,56", raw))
}

pub fn parse_positive_amount(s: &str) -> Result<Decimal> {
    let d = parse_amount(s)?;
    anyhow::ensure!(d > Decimal::ZERO, "Amount must be positive, got '{}'", s);
    Ok(d)
}

/// Trimmed user text that must not be blank ("Title", "Name", ...).
pub fn required_text(field: &str, s: &str) -> Result<String> {
    let t = s.trim();
    anyhow::ensure!(!t.is_empty(), "{} must not be empty", field);
    Ok(t.to_string())
}

/// Format as Brazilian currency: "R$ 1.234,56".
pub fn fmt_brl(d: &Decimal) -> String {
    let rounded = d.round_dp(2);
    let sign = if rounded.is_sign_negative() { "-" } else { "" };
    let plain = format!("{:.2}", rounded.abs());
    let (int, frac) = plain.split_once('.').unwrap_or((plain.as_str(), "00"));
    let mut grouped = String::with_capacity(int.len() + int.len() / 3);
    for (i, ch) in int.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    let int: String = grouped.chars().rev().collect();
    format!("{}R$ {},{}", sign, int, frac)
}

const MONTH_ABBR_PT: [&str; 12] = [
    "jan", "fev", "mar", "abr", "mai", "jun", "jul", "ago", "set", "out", "nov", "dez",
];

/// Short pt-BR month label for trend rows, e.g. "ago/25".
pub fn month_label(key: &str) -> Result<String> {
    let d = month_to_date(key)?;
    Ok(format!(
        "{}/{:02}",
        MONTH_ABBR_PT[d.month0() as usize],
        d.year() % 100
    ))
}

/// First eight characters of an id, enough to paste back into commands.
pub fn short_id(id: &str) -> String {
    id.chars().take(8).collect()
}

/// Resolve a possibly-abbreviated id against the ids of a list.
pub fn resolve_id<'a, I>(ids: I, needle: &str) -> Result<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let hits: Vec<&str> = ids
        .into_iter()
        .filter(|id| id.starts_with(needle))
        .collect();
    match hits.len() {
        1 => Ok(hits[0].to_string()),
        0 => Err(anyhow::anyhow!("No record matches id '{}'", needle)),
        n => Err(anyhow::anyhow!(
            "Id '{}' is ambiguous ({} matches), spell out more of it",
            needle,
            n
        )),
    }
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // If v is an array, stream each element; else stream single line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}
