// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::CATEGORIES;
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::Result;

pub fn handle(m: &clap::ArgMatches) -> Result<()> {
    if let Some(("list", sub)) = m.subcommand() {
        let json_flag = sub.get_flag("json");
        let jsonl_flag = sub.get_flag("jsonl");
        if !maybe_print_json(json_flag, jsonl_flag, &CATEGORIES)? {
            let rows: Vec<Vec<String>> = CATEGORIES
                .iter()
                .map(|c| vec![c.key.to_string(), c.name.to_string(), c.icon.to_string()])
                .collect();
            println!("{}", pretty_table(&["Key", "Category", "Icon"], rows));
        }
    }
    Ok(())
}
