// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{DateTime, NaiveDate};
use comfy_table::Color;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Positive,
    Negative,
}

impl TransactionType {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "positive" | "income" | "up" => Some(Self::Positive),
            "negative" | "outcome" | "expense" | "down" => Some(Self::Negative),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Negative => "negative",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub name: String,
    pub amount: Decimal,
    pub r#type: TransactionType,
    pub category: String,
    #[serde(deserialize_with = "date_or_timestamp")]
    pub date: NaiveDate,
}

/// Older clients stored the full creation timestamp; only the day matters here.
fn date_or_timestamp<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    if let Ok(d) = NaiveDate::parse_from_str(&raw, "%Y-%m-%d") {
        return Ok(d);
    }
    DateTime::parse_from_rfc3339(&raw)
        .map(|dt| dt.date_naive())
        .map_err(|_| serde::de::Error::custom(format!("invalid transaction date '{}'", raw)))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Category {
    pub key: &'static str,
    pub name: &'static str,
    pub icon: &'static str,
}

pub const CATEGORIES: [Category; 6] = [
    Category { key: "purchases", name: "Compras", icon: "shopping-bag" },
    Category { key: "food", name: "Alimentação", icon: "coffee" },
    Category { key: "salary", name: "Salário", icon: "dollar-sign" },
    Category { key: "car", name: "Carro", icon: "crosshair" },
    Category { key: "leisure", name: "Lazer", icon: "heart" },
    Category { key: "studies", name: "Estudos", icon: "book" },
];

pub fn find_category(key: &str) -> Option<&'static Category> {
    CATEGORIES.iter().find(|c| c.key == key)
}

/// Display name for a stored category key; unknown keys are shown as-is.
pub fn category_name(key: &str) -> String {
    find_category(key)
        .map(|c| c.name.to_string())
        .unwrap_or_else(|| key.to_string())
}

/// The signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    pub name: String,
    pub photo: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const fn hex(v: u32) -> Self {
        Rgb((v >> 16) as u8, (v >> 8) as u8, v as u8)
    }

    pub fn color(&self) -> Color {
        Color::Rgb { r: self.0, g: self.1, b: self.2 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub primary: Rgb,
    pub secondary: Rgb,
    pub success: Rgb,
    pub attention: Rgb,
    pub shape: Rgb,
    pub title: Rgb,
    pub text: Rgb,
    pub text_dark: Rgb,
    pub background: Rgb,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            primary: Rgb::hex(0x5636D3),
            secondary: Rgb::hex(0xFF872C),
            success: Rgb::hex(0x12A454),
            attention: Rgb::hex(0xE83F5B),
            shape: Rgb::hex(0xFFFFFF),
            title: Rgb::hex(0x363F5F),
            text: Rgb::hex(0x969CB2),
            text_dark: Rgb::hex(0x000000),
            background: Rgb::hex(0xF0F2F5),
        }
    }
}

impl Theme {
    pub fn polarity(&self, t: TransactionType) -> Rgb {
        match t {
            TransactionType::Positive => self.success,
            TransactionType::Negative => self.attention,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_legacy_timestamp_dates() {
        let raw = r#"{"id":"a","name":"Site","amount":"12000","type":"positive","category":"salary","date":"2021-04-13T10:22:31.000Z"}"#;
        let t: Transaction = serde_json::from_str(raw).unwrap();
        assert_eq!(t.date, NaiveDate::from_ymd_opt(2021, 4, 13).unwrap());
        assert_eq!(t.r#type, TransactionType::Positive);
        assert_eq!(t.amount, Decimal::new(12000, 0));
    }

    #[test]
    fn theme_hex_splits_channels() {
        assert_eq!(Theme::default().primary, Rgb(0x56, 0x36, 0xD3));
    }

    #[test]
    fn unknown_category_keeps_key() {
        assert_eq!(category_name("food"), "Alimentação");
        assert_eq!(category_name("pets"), "pets");
    }
}
