// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{value_parser, Arg, ArgAction, Command};

fn json_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print one JSON object per line"),
    )
}

pub fn build_cli() -> Command {
    Command::new("gofinance")
        .version(clap::crate_version!())
        .about("Track income and expenses and see where the money went")
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::Count)
                .global(true)
                .help("Increase log verbosity (-v info, -vv debug, -vvv trace)"),
        )
        .subcommand(Command::new("init").about("Create the local database"))
        .subcommand(
            Command::new("auth")
                .about("Manage the signed-in user")
                .subcommand(
                    Command::new("login")
                        .arg(Arg::new("id").long("id").required(true))
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("photo").long("photo").help("Avatar URL")),
                )
                .subcommand(Command::new("logout"))
                .subcommand(Command::new("whoami")),
        )
        .subcommand(
            Command::new("category")
                .about("Transaction categories")
                .subcommand(json_args(Command::new("list"))),
        )
        .subcommand(
            Command::new("tx")
                .about("Register and list transactions")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("name").long("name").default_value(""))
                        .arg(
                            Arg::new("amount")
                                .long("amount")
                                .default_value("")
                                .allow_hyphen_values(true),
                        )
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .help("positive (income) or negative (expense)"),
                        )
                        .arg(Arg::new("category").long("category").help("Category key")),
                )
                .subcommand(json_args(
                    Command::new("list").arg(
                        Arg::new("limit")
                            .long("limit")
                            .value_parser(value_parser!(usize)),
                    ),
                )),
        )
        .subcommand(json_args(
            Command::new("dashboard").about("Show income, expense and total highlights"),
        ))
        .subcommand(
            Command::new("report").about("Reports").subcommand(json_args(
                Command::new("categories")
                    .about("Expenses per category for one month")
                    .arg(Arg::new("month").long("month").required(true)),
            )),
        )
        .subcommand(
            Command::new("export")
                .about("Write the signed-in user's transactions to a file")
                .subcommand(
                    Command::new("transactions")
                        .arg(
                            Arg::new("format")
                                .long("format")
                                .default_value("csv")
                                .help("csv or json"),
                        )
                        .arg(Arg::new("out").long("out").required(true)),
                ),
        )
}
