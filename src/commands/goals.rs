// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregate;
use crate::engine::Ledger;
use crate::models::{GoalPriority, NewGoal};
use crate::store::KeyValue;
use crate::utils::{maybe_print_json, parse_date, parse_decimal, pretty_table};
use anyhow::Result;
use rust_decimal::Decimal;
use serde::Serialize;

pub fn handle<S: KeyValue>(ledger: &mut Ledger<S>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(ledger, sub)?,
        Some(("list", sub)) => list(ledger, sub)?,
        Some(("contribute", sub)) => contribute(ledger, sub)?,
        Some(("rm", sub)) => rm(ledger, sub)?,
        _ => {}
    }
    Ok(())
}

fn add<S: KeyValue>(ledger: &mut Ledger<S>, sub: &clap::ArgMatches) -> Result<()> {
    let priority: GoalPriority = sub
        .get_one::<String>("priority")
        .unwrap()
        .parse()
        .map_err(anyhow::Error::msg)?;
    let goal = ledger.create_goal(NewGoal {
        name: sub.get_one::<String>("name").unwrap().clone(),
        target_amount: parse_decimal(sub.get_one::<String>("target").unwrap())?,
        current_amount: Decimal::ZERO,
        currency: sub.get_one::<String>("currency").unwrap().clone(),
        deadline: parse_date(sub.get_one::<String>("deadline").unwrap())?,
        category: sub.get_one::<String>("category").unwrap().clone(),
        priority,
    })?;
    println!(
        "Goal '{}': {} {} by {}",
        goal.name, goal.target_amount, goal.currency, goal.deadline
    );
    Ok(())
}

#[derive(Serialize)]
struct GoalRow {
    name: String,
    current: String,
    target: String,
    percentage: String,
    deadline: String,
    days_remaining: i64,
    priority: String,
}

fn list<S: KeyValue>(ledger: &Ledger<S>, sub: &clap::ArgMatches) -> Result<()> {
    let today = chrono::Utc::now().date_naive();
    let data: Vec<GoalRow> = ledger
        .goals()
        .iter()
        .map(|g| {
            let progress = aggregate::goal_progress(g, today);
            GoalRow {
                name: g.name.clone(),
                current: format!("{:.2}", g.current_amount),
                target: format!("{:.2}", g.target_amount),
                percentage: format!("{:.1}", progress.percentage),
                deadline: g.deadline.to_string(),
                days_remaining: progress.days_remaining,
                priority: g.priority.to_string(),
            }
        })
        .collect();
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let rows = data
            .into_iter()
            .map(|r| {
                vec![
                    r.name,
                    r.current,
                    r.target,
                    format!("{}%", r.percentage),
                    r.deadline,
                    r.days_remaining.to_string(),
                    r.priority,
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Goal", "Current", "Target", "Progress", "Deadline", "Days left", "Priority"],
                rows,
            )
        );
    }
    Ok(())
}

fn contribute<S: KeyValue>(ledger: &mut Ledger<S>, sub: &clap::ArgMatches) -> Result<()> {
    let id = ledger
        .goal_by_name(sub.get_one::<String>("name").unwrap())?
        .id
        .clone();
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    let goal = ledger.add_to_goal(&id, amount)?;
    println!(
        "Contributed {} to '{}' ({} of {})",
        amount, goal.name, goal.current_amount, goal.target_amount
    );
    Ok(())
}

fn rm<S: KeyValue>(ledger: &mut Ledger<S>, sub: &clap::ArgMatches) -> Result<()> {
    let id = ledger
        .goal_by_name(sub.get_one::<String>("name").unwrap())?
        .id
        .clone();
    let removed = ledger.delete_goal(&id)?;
    println!("Removed goal '{}'", removed.name);
    Ok(())
}
