// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, crate_version};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print output as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print output as JSON lines"),
    )
}

pub fn build_cli() -> Command {
    Command::new("pocketledger")
        .about("Personal expense tracking, budgets, and savings goals")
        .version(crate_version!())
        .subcommand_required(false)
        .subcommand(
            Command::new("account")
                .about("Manage accounts")
                .subcommand(
                    Command::new("add")
                        .about("Add an account")
                        .arg(Arg::new("name").required(true))
                        .arg(Arg::new("type").long("type").default_value("checking"))
                        .arg(Arg::new("currency").long("currency").default_value("USD"))
                        .arg(Arg::new("opening").long("opening").default_value("0"))
                        .arg(Arg::new("color").long("color").default_value("#3B82F6"))
                        .arg(Arg::new("icon").long("icon").default_value("🏦")),
                )
                .subcommand(json_flags(Command::new("list").about("List accounts")))
                .subcommand(
                    Command::new("edit")
                        .about("Edit account fields (never the balance)")
                        .arg(Arg::new("name").required(true))
                        .arg(Arg::new("new-name").long("name"))
                        .arg(Arg::new("type").long("type"))
                        .arg(Arg::new("currency").long("currency"))
                        .arg(Arg::new("color").long("color"))
                        .arg(Arg::new("icon").long("icon")),
                )
                .subcommand(
                    Command::new("set-opening")
                        .about("Set an account's opening balance")
                        .arg(Arg::new("name").required(true))
                        .arg(Arg::new("amount").required(true)),
                )
                .subcommand(
                    Command::new("rm")
                        .about("Remove an account (blocked while transactions reference it)")
                        .arg(Arg::new("name").required(true)),
                ),
        )
        .subcommand(
            Command::new("category")
                .about("Manage categories")
                .subcommand(
                    Command::new("add")
                        .about("Add a category")
                        .arg(Arg::new("name").required(true))
                        .arg(Arg::new("type").long("type").default_value("expense"))
                        .arg(Arg::new("icon").long("icon").default_value("📦"))
                        .arg(Arg::new("color").long("color").default_value("#888888")),
                )
                .subcommand(json_flags(Command::new("list").about("List categories")))
                .subcommand(
                    Command::new("rm")
                        .about("Remove a category (blocked while referenced)")
                        .arg(Arg::new("name").required(true)),
                ),
        )
        .subcommand(
            Command::new("tx")
                .about("Record and inspect transactions")
                .subcommand(
                    Command::new("add")
                        .about("Record an expense or income")
                        .arg(Arg::new("date").long("date").required(true))
                        .arg(Arg::new("account").long("account").required(true))
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(Arg::new("type").long("type").default_value("expense"))
                        .arg(Arg::new("category").long("category").required(true))
                        .arg(Arg::new("description").long("description").required(true))
                        .arg(
                            Arg::new("tag")
                                .long("tag")
                                .action(ArgAction::Append)
                                .help("Free-form tag; repeatable"),
                        )
                        .arg(Arg::new("notes").long("notes")),
                )
                .subcommand(
                    Command::new("transfer")
                        .about("Move money between two accounts")
                        .arg(Arg::new("date").long("date").required(true))
                        .arg(Arg::new("from").long("from").required(true))
                        .arg(Arg::new("to").long("to").required(true))
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(
                            Arg::new("description")
                                .long("description")
                                .default_value("Transfer"),
                        ),
                )
                .subcommand(json_flags(
                    Command::new("list")
                        .about("List transactions")
                        .arg(Arg::new("month").long("month").help("Filter by YYYY-MM"))
                        .arg(Arg::new("account").long("account"))
                        .arg(Arg::new("category").long("category"))
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(clap::value_parser!(usize)),
                        ),
                ))
                .subcommand(
                    Command::new("edit")
                        .about("Edit a transaction; balances are re-derived atomically")
                        .arg(Arg::new("id").required(true))
                        .arg(Arg::new("date").long("date"))
                        .arg(Arg::new("account").long("account"))
                        .arg(Arg::new("amount").long("amount"))
                        .arg(Arg::new("type").long("type"))
                        .arg(
                            Arg::new("to")
                                .long("to")
                                .help("Destination account when the type is transfer"),
                        )
                        .arg(Arg::new("category").long("category"))
                        .arg(Arg::new("description").long("description"))
                        .arg(Arg::new("notes").long("notes")),
                )
                .subcommand(
                    Command::new("rm")
                        .about("Delete a transaction, reversing its balance effect")
                        .arg(Arg::new("id").required(true)),
                ),
        )
        .subcommand(
            Command::new("budget")
                .about("Manage budgets")
                .subcommand(
                    Command::new("add")
                        .about("Create a budget for an expense category")
                        .arg(Arg::new("name").required(true))
                        .arg(Arg::new("category").long("category").required(true))
                        .arg(Arg::new("limit").long("limit").required(true))
                        .arg(Arg::new("period").long("period").default_value("monthly"))
                        .arg(Arg::new("start").long("start").help("YYYY-MM-DD; defaults to today"))
                        .arg(Arg::new("threshold").long("threshold").default_value("0.8"))
                        .arg(Arg::new("currency").long("currency").default_value("USD")),
                )
                .subcommand(json_flags(Command::new("list").about("List budgets")))
                .subcommand(json_flags(
                    Command::new("report").about("Spent vs limit for each budget's current period"),
                ))
                .subcommand(
                    Command::new("rm")
                        .about("Remove a budget")
                        .arg(Arg::new("name").required(true)),
                ),
        )
        .subcommand(
            Command::new("goal")
                .about("Manage savings goals")
                .subcommand(
                    Command::new("add")
                        .about("Create a goal")
                        .arg(Arg::new("name").required(true))
                        .arg(Arg::new("target").long("target").required(true))
                        .arg(Arg::new("deadline").long("deadline").required(true))
                        .arg(Arg::new("category").long("category").default_value(""))
                        .arg(Arg::new("priority").long("priority").default_value("medium"))
                        .arg(Arg::new("currency").long("currency").default_value("USD")),
                )
                .subcommand(json_flags(Command::new("list").about("List goals with progress")))
                .subcommand(
                    Command::new("contribute")
                        .about("Add to a goal's current amount")
                        .arg(Arg::new("name").required(true))
                        .arg(Arg::new("amount").required(true)),
                )
                .subcommand(
                    Command::new("rm")
                        .about("Remove a goal")
                        .arg(Arg::new("name").required(true)),
                ),
        )
        .subcommand(
            Command::new("report")
                .about("Read-only projections")
                .subcommand(json_flags(Command::new("balances").about("Account balances")))
                .subcommand(json_flags(
                    Command::new("spend-by-category")
                        .about("Expense totals per category in a window")
                        .arg(Arg::new("from").long("from").required(true))
                        .arg(Arg::new("to").long("to").required(true))
                        .arg(
                            Arg::new("all")
                                .long("all")
                                .action(ArgAction::SetTrue)
                                .help("Include categories with zero spend"),
                        ),
                ))
                .subcommand(json_flags(
                    Command::new("daily")
                        .about("Daily spend, zero-filled over a trailing window")
                        .arg(
                            Arg::new("days")
                                .long("days")
                                .default_value("7")
                                .value_parser(clap::value_parser!(u64)),
                        )
                        .arg(Arg::new("end").long("end").help("YYYY-MM-DD; defaults to today")),
                ))
                .subcommand(json_flags(
                    Command::new("cashflow")
                        .about("Income vs expense totals in a window")
                        .arg(Arg::new("from").long("from").required(true))
                        .arg(Arg::new("to").long("to").required(true)),
                )),
        )
        .subcommand(
            Command::new("export")
                .about("Export data")
                .subcommand(
                    Command::new("transactions")
                        .about("Export transactions to a flat file")
                        .arg(Arg::new("format").long("format").default_value("csv"))
                        .arg(Arg::new("out").long("out").required(true)),
                ),
        )
        .subcommand(
            Command::new("profile")
                .about("Current user profile")
                .subcommand(Command::new("show").about("Show the profile"))
                .subcommand(
                    Command::new("set")
                        .about("Update profile fields")
                        .arg(Arg::new("name").long("name"))
                        .arg(Arg::new("email").long("email"))
                        .arg(Arg::new("currency").long("currency")),
                ),
        )
        .subcommand(Command::new("doctor").about("Check cached balances against the transaction log"))
}
