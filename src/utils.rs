// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use chrono::{Datelike, Locale, NaiveDate};
use comfy_table::{presets::UTF8_FULL, Cell, Table};
use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;

pub const LOCALE: Locale = Locale::pt_BR;
pub const CURRENCY_SYMBOL: &str = "R$";

// "1.234,56", "1234,56", "1234.56" with an optional sign
static AMOUNT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^-?(\d{1,3}(\.\d{3})+(,\d+)?|\d+(,\d+)?|\d+\.\d+)$").expect("static regex")
});

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

pub fn parse_month(s: &str) -> Result<(i32, u32)> {
    let d = NaiveDate::parse_from_str(&format!("{}-01", s), "%Y-%m-%d")
        .with_context(|| format!("Invalid month '{}', expected YYYY-MM", s))?;
    Ok((d.year(), d.month()))
}

/// Parses user-typed amounts in either decimal notation.
pub fn parse_amount(s: &str) -> Result<Decimal> {
    let s = s.trim();
    if !AMOUNT_RE.is_match(s) {
        anyhow::bail!("Invalid amount '{}'", s);
    }
    let normalized = if s.contains(',') {
        s.replace('.', "").replace(',', ".")
    } else {
        s.to_string()
    };
    normalized
        .parse::<Decimal>()
        .with_context(|| format!("Invalid amount '{}'", s))
}

/// `1234.5` -> `"R$ 1.234,50"`, `-60` -> `"-R$ 60,00"`.
pub fn fmt_money(d: &Decimal) -> String {
    let rounded = d.round_dp(2);
    let formatted = format!("{:.2}", rounded.abs());
    let (int_part, dec_part) = formatted.split_once('.').unwrap_or((&formatted, "00"));

    let grouped: String = int_part
        .as_bytes()
        .rchunks(3)
        .rev()
        .map(|chunk| std::str::from_utf8(chunk).unwrap_or(""))
        .collect::<Vec<_>>()
        .join(".");

    if rounded < Decimal::ZERO {
        format!("-{} {},{}", CURRENCY_SYMBOL, grouped, dec_part)
    } else {
        format!("{} {},{}", CURRENCY_SYMBOL, grouped, dec_part)
    }
}

/// `2021-04-10` -> `"10 de abril"`.
pub fn fmt_day_of_month(d: NaiveDate) -> String {
    format!("{} de {}", d.day(), d.format_localized("%B", LOCALE))
}

/// `2021-04-10` -> `"10/04/21"`.
pub fn fmt_short_date(d: NaiveDate) -> String {
    d.format("%d/%m/%y").to_string()
}

pub fn pretty_table<C: Into<Cell>>(headers: &[&str], rows: Vec<Vec<C>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r);
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
