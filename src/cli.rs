// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{value_parser, Arg, ArgAction, Command};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print one JSON object per line"),
    )
}

fn csv_arg() -> Arg {
    Arg::new("csv")
        .long("csv")
        .value_name("PATH")
        .help("Also write the report rows to a CSV file")
}

fn months_arg() -> Arg {
    Arg::new("months")
        .long("months")
        .value_parser(value_parser!(usize))
        .default_value("3")
        .help("Number of months, ending with the current one")
}

pub fn build_cli() -> Command {
    Command::new("moneylens")
        .about("Analytics over a personal finance ledger")
        .version(clap::crate_version!())
        .arg(
            Arg::new("db")
                .long("db")
                .global(true)
                .value_name("PATH")
                .help("SQLite ledger to read (defaults to $MONEYLENS_DB or the data dir)"),
        )
        .arg(
            Arg::new("snapshot")
                .long("snapshot")
                .global(true)
                .value_name("FILE")
                .conflicts_with("db")
                .help("Read the ledger from a JSON snapshot instead of SQLite"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Debug logging on stderr"),
        )
        .subcommand(Command::new("init").about("Create the ledger database schema"))
        .subcommand(
            Command::new("account")
                .about("Accounts")
                .subcommand(json_flags(Command::new("list"))),
        )
        .subcommand(
            Command::new("category")
                .about("Category groups and categories")
                .subcommand(json_flags(Command::new("list"))),
        )
        .subcommand(
            Command::new("payee")
                .about("Payees")
                .subcommand(json_flags(Command::new("list"))),
        )
        .subcommand(
            Command::new("rule")
                .about("Categorisation rules")
                .subcommand(json_flags(Command::new("list"))),
        )
        .subcommand(
            Command::new("tx").about("Transactions").subcommand(json_flags(
                Command::new("list")
                    .arg(Arg::new("account").long("account").required(true))
                    .arg(Arg::new("start").long("start").help("YYYY-MM-DD"))
                    .arg(Arg::new("end").long("end").help("YYYY-MM-DD"))
                    .arg(Arg::new("category").long("category"))
                    .arg(Arg::new("payee").long("payee"))
                    .arg(
                        Arg::new("min")
                            .long("min")
                            .value_parser(value_parser!(i64))
                            .allow_negative_numbers(true)
                            .help("Minimum absolute amount in minor units"),
                    )
                    .arg(
                        Arg::new("max")
                            .long("max")
                            .value_parser(value_parser!(i64))
                            .allow_negative_numbers(true)
                            .help("Maximum absolute amount in minor units"),
                    )
                    .arg(
                        Arg::new("limit")
                            .long("limit")
                            .value_parser(value_parser!(usize)),
                    ),
            )),
        )
        .subcommand(
            Command::new("report")
                .about("Spending, monthly summary and balance history")
                .subcommand(json_flags(
                    Command::new("spending")
                        .about("Spending by category group and category")
                        .arg(Arg::new("start").long("start").help("YYYY-MM-DD"))
                        .arg(Arg::new("end").long("end").help("YYYY-MM-DD"))
                        .arg(Arg::new("account").long("account"))
                        .arg(
                            Arg::new("income")
                                .long("income")
                                .action(ArgAction::SetTrue)
                                .help("Include income categories"),
                        )
                        .arg(csv_arg()),
                ))
                .subcommand(json_flags(
                    Command::new("monthly")
                        .about("Income, expenses and investments per month")
                        .arg(months_arg())
                        .arg(Arg::new("account").long("account"))
                        .arg(csv_arg()),
                ))
                .subcommand(json_flags(
                    Command::new("balance-history")
                        .about("Month-end balances for one account")
                        .arg(Arg::new("account").long("account").required(true))
                        .arg(months_arg())
                        .arg(
                            Arg::new("include-off-budget")
                                .long("include-off-budget")
                                .action(ArgAction::SetTrue),
                        )
                        .arg(csv_arg()),
                )),
        )
        .subcommand(
            Command::new("tool")
                .about("Agent tool surface")
                .subcommand(Command::new("list").about("List available tools"))
                .subcommand(
                    Command::new("call")
                        .about("Invoke a tool with JSON arguments")
                        .arg(Arg::new("name").required(true))
                        .arg(
                            Arg::new("args")
                                .long("args")
                                .value_name("JSON")
                                .default_value("{}"),
                        ),
                ),
        )
        .subcommand(Command::new("doctor").about("Check the ledger can be read and report bad records"))
}
