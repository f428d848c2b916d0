// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::process::ExitCode;

use anyhow::Result;
use tracing::{debug, error};

use gofinance::models::Theme;
use gofinance::{cli, commands, db, logging};

fn main() -> ExitCode {
    let matches = cli::build_cli().get_matches();
    logging::init_logger(logging::level_for(matches.get_count("verbose")));

    match run(&matches) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(matches: &clap::ArgMatches) -> Result<()> {
    let conn = db::open_or_init()?;
    let theme = Theme::default();
    debug!("dispatching {:?}", matches.subcommand_name());

    match matches.subcommand() {
        Some(("init", _)) => {
            println!("Database initialized at {}", db::db_path()?.display());
        }
        Some(("auth", sub)) => commands::auth::handle(&conn, sub)?,
        Some(("category", sub)) => commands::categories::handle(sub)?,
        Some(("tx", sub)) => commands::transactions::handle(&conn, &theme, sub)?,
        Some(("dashboard", sub)) => commands::dashboard::handle(&conn, &theme, sub)?,
        Some(("report", sub)) => commands::reports::handle(&conn, &theme, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&conn, sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
