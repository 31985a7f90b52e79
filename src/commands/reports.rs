// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregate;
use crate::engine::Ledger;
use crate::store::KeyValue;
use crate::utils::{maybe_print_json, parse_date, pretty_table};
use anyhow::Result;

pub fn handle<S: KeyValue>(ledger: &Ledger<S>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("balances", sub)) => balances(ledger, sub)?,
        Some(("spend-by-category", sub)) => spend_by_category(ledger, sub)?,
        Some(("daily", sub)) => daily(ledger, sub)?,
        Some(("cashflow", sub)) => cashflow(ledger, sub)?,
        _ => {}
    }
    Ok(())
}

fn balances<S: KeyValue>(ledger: &Ledger<S>, sub: &clap::ArgMatches) -> Result<()> {
    let data: Vec<Vec<String>> = aggregate::account_totals(ledger.accounts())
        .into_iter()
        .map(|t| vec![t.name, t.currency, format!("{:.2}", t.balance)])
        .collect();
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        println!("{}", pretty_table(&["Account", "CCY", "Balance"], data));
    }
    Ok(())
}

fn spend_by_category<S: KeyValue>(ledger: &Ledger<S>, sub: &clap::ArgMatches) -> Result<()> {
    let from = parse_date(sub.get_one::<String>("from").unwrap())?;
    let to = parse_date(sub.get_one::<String>("to").unwrap())?;
    let spends = if sub.get_flag("all") {
        aggregate::category_totals(ledger.categories(), ledger.transactions(), from, to)
    } else {
        aggregate::category_breakdown(ledger.transactions(), from, to)
    };
    let data: Vec<Vec<String>> = spends
        .iter()
        .map(|s| {
            let category = ledger
                .category(&s.category_id)
                .map(|c| c.name.clone())
                .unwrap_or_else(|_| s.category_id.clone());
            vec![category, format!("{:.2}", s.total)]
        })
        .collect();
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        println!("{}", pretty_table(&["Category", "Spent"], data));
    }
    Ok(())
}

fn daily<S: KeyValue>(ledger: &Ledger<S>, sub: &clap::ArgMatches) -> Result<()> {
    let days = *sub.get_one::<u64>("days").unwrap();
    let end = match sub.get_one::<String>("end") {
        Some(s) => parse_date(s)?,
        None => chrono::Utc::now().date_naive(),
    };
    let series = aggregate::daily_spend_window(ledger.transactions(), end, days);
    let data: Vec<Vec<String>> = series
        .iter()
        .map(|d| vec![d.date.to_string(), format!("{:.2}", d.total)])
        .collect();
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        println!("{}", pretty_table(&["Date", "Spent"], data));
    }
    Ok(())
}

fn cashflow<S: KeyValue>(ledger: &Ledger<S>, sub: &clap::ArgMatches) -> Result<()> {
    let from = parse_date(sub.get_one::<String>("from").unwrap())?;
    let to = parse_date(sub.get_one::<String>("to").unwrap())?;
    let flow = aggregate::cashflow(ledger.transactions(), from, to);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &flow)? {
        let net = flow.income - flow.expense;
        let rows = vec![vec![
            format!("{:.2}", flow.income),
            format!("{:.2}", flow.expense),
            format!("{:.2}", net),
        ]];
        println!("{}", pretty_table(&["Income", "Expense", "Net"], rows));
    }
    Ok(())
}
