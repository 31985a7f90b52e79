// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregate;
use crate::engine::Ledger;
use crate::models::{BudgetPeriod, NewBudget};
use crate::store::KeyValue;
use crate::utils::{maybe_print_json, parse_date, parse_decimal, pretty_table};
use anyhow::Result;
use serde::Serialize;

pub fn handle<S: KeyValue>(ledger: &mut Ledger<S>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(ledger, sub)?,
        Some(("list", sub)) => list(ledger, sub)?,
        Some(("report", sub)) => report(ledger, sub)?,
        Some(("rm", sub)) => rm(ledger, sub)?,
        _ => {}
    }
    Ok(())
}

fn add<S: KeyValue>(ledger: &mut Ledger<S>, sub: &clap::ArgMatches) -> Result<()> {
    let period: BudgetPeriod = sub
        .get_one::<String>("period")
        .unwrap()
        .parse()
        .map_err(anyhow::Error::msg)?;
    let category_id = ledger
        .category_by_name(sub.get_one::<String>("category").unwrap())?
        .id
        .clone();
    let start_date = match sub.get_one::<String>("start") {
        Some(s) => parse_date(s)?,
        None => chrono::Utc::now().date_naive(),
    };
    let budget = ledger.create_budget(NewBudget {
        name: sub.get_one::<String>("name").unwrap().clone(),
        category_id,
        limit: parse_decimal(sub.get_one::<String>("limit").unwrap())?,
        currency: sub.get_one::<String>("currency").unwrap().clone(),
        period,
        start_date,
        alert_threshold: parse_decimal(sub.get_one::<String>("threshold").unwrap())?,
    })?;
    println!(
        "Budget '{}' set: {} {} per {} from {}",
        budget.name, budget.limit, budget.currency, budget.period, budget.start_date
    );
    Ok(())
}

fn list<S: KeyValue>(ledger: &Ledger<S>, sub: &clap::ArgMatches) -> Result<()> {
    let data: Vec<Vec<String>> = ledger
        .budgets()
        .iter()
        .map(|b| {
            let category = ledger
                .category(&b.category_id)
                .map(|c| c.name.clone())
                .unwrap_or_default();
            vec![
                b.name.clone(),
                category,
                format!("{:.2}", b.limit),
                b.period.to_string(),
                b.start_date.to_string(),
            ]
        })
        .collect();
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        println!(
            "{}",
            pretty_table(&["Name", "Category", "Limit", "Period", "Start"], data)
        );
    }
    Ok(())
}

#[derive(Serialize)]
struct BudgetReportRow {
    name: String,
    category: String,
    period: String,
    spent: String,
    limit: String,
    percentage: String,
    alert: bool,
}

fn report<S: KeyValue>(ledger: &Ledger<S>, sub: &clap::ArgMatches) -> Result<()> {
    let today = chrono::Utc::now().date_naive();
    let data: Vec<BudgetReportRow> = ledger
        .budgets()
        .iter()
        .map(|b| {
            let progress = aggregate::budget_progress(b, ledger.transactions(), today);
            BudgetReportRow {
                name: b.name.clone(),
                category: ledger
                    .category(&b.category_id)
                    .map(|c| c.name.clone())
                    .unwrap_or_default(),
                period: format!("{} .. {}", progress.period_start, progress.period_end),
                spent: format!("{:.2}", progress.spent),
                limit: format!("{:.2}", b.limit),
                percentage: format!("{:.1}", progress.percentage),
                alert: progress.alert,
            }
        })
        .collect();
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let rows = data
            .into_iter()
            .map(|r| {
                vec![
                    r.name,
                    r.category,
                    r.period,
                    r.spent,
                    r.limit,
                    format!("{}%", r.percentage),
                    (if r.alert { "!" } else { "" }).to_string(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Budget", "Category", "Period", "Spent", "Limit", "Used", "Alert"],
                rows,
            )
        );
    }
    Ok(())
}

fn rm<S: KeyValue>(ledger: &mut Ledger<S>, sub: &clap::ArgMatches) -> Result<()> {
    let id = ledger
        .budget_by_name(sub.get_one::<String>("name").unwrap())?
        .id
        .clone();
    let removed = ledger.delete_budget(&id)?;
    println!("Removed budget '{}'", removed.name);
    Ok(())
}
