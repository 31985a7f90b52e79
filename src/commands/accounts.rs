// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::engine::Ledger;
use crate::models::{AccountChanges, AccountKind, NewAccount};
use crate::store::KeyValue;
use crate::utils::{maybe_print_json, parse_decimal, pretty_table};
use anyhow::Result;
use serde::Serialize;

pub fn handle<S: KeyValue>(ledger: &mut Ledger<S>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(ledger, sub)?,
        Some(("list", sub)) => list(ledger, sub)?,
        Some(("edit", sub)) => edit(ledger, sub)?,
        Some(("set-opening", sub)) => set_opening(ledger, sub)?,
        Some(("rm", sub)) => rm(ledger, sub)?,
        _ => {}
    }
    Ok(())
}

fn add<S: KeyValue>(ledger: &mut Ledger<S>, sub: &clap::ArgMatches) -> Result<()> {
    let kind: AccountKind = sub
        .get_one::<String>("type")
        .unwrap()
        .parse()
        .map_err(anyhow::Error::msg)?;
    let account = ledger.create_account(NewAccount {
        name: sub.get_one::<String>("name").unwrap().clone(),
        kind,
        currency: sub.get_one::<String>("currency").unwrap().clone(),
        opening_balance: parse_decimal(sub.get_one::<String>("opening").unwrap())?,
        color: sub.get_one::<String>("color").unwrap().clone(),
        icon: sub.get_one::<String>("icon").unwrap().clone(),
    })?;
    println!(
        "Added account '{}' ({}, {})",
        account.name, account.kind, account.currency
    );
    Ok(())
}

#[derive(Serialize)]
struct AccountRow {
    name: String,
    r#type: String,
    currency: String,
    balance: String,
    created: String,
}

fn list<S: KeyValue>(ledger: &Ledger<S>, sub: &clap::ArgMatches) -> Result<()> {
    let data: Vec<AccountRow> = ledger
        .accounts()
        .iter()
        .map(|a| AccountRow {
            name: a.name.clone(),
            r#type: a.kind.to_string(),
            currency: a.currency.clone(),
            balance: format!("{:.2}", a.balance),
            created: a.created_at.date_naive().to_string(),
        })
        .collect();
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let rows = data
            .into_iter()
            .map(|r| vec![r.name, r.r#type, r.currency, r.balance, r.created])
            .collect();
        println!(
            "{}",
            pretty_table(&["Name", "Type", "Currency", "Balance", "Created"], rows)
        );
    }
    Ok(())
}

fn edit<S: KeyValue>(ledger: &mut Ledger<S>, sub: &clap::ArgMatches) -> Result<()> {
    let id = ledger
        .account_by_name(sub.get_one::<String>("name").unwrap())?
        .id
        .clone();
    let kind = match sub.get_one::<String>("type") {
        Some(s) => Some(s.parse::<AccountKind>().map_err(anyhow::Error::msg)?),
        None => None,
    };
    let account = ledger.update_account(
        &id,
        AccountChanges {
            name: sub.get_one::<String>("new-name").cloned(),
            kind,
            currency: sub.get_one::<String>("currency").cloned(),
            color: sub.get_one::<String>("color").cloned(),
            icon: sub.get_one::<String>("icon").cloned(),
        },
    )?;
    println!("Updated account '{}'", account.name);
    Ok(())
}

fn set_opening<S: KeyValue>(ledger: &mut Ledger<S>, sub: &clap::ArgMatches) -> Result<()> {
    let id = ledger
        .account_by_name(sub.get_one::<String>("name").unwrap())?
        .id
        .clone();
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    let account = ledger.set_opening_balance(&id, amount)?;
    println!(
        "Opening balance for '{}' is now {} (balance {})",
        account.name, account.opening_balance, account.balance
    );
    Ok(())
}

fn rm<S: KeyValue>(ledger: &mut Ledger<S>, sub: &clap::ArgMatches) -> Result<()> {
    let id = ledger
        .account_by_name(sub.get_one::<String>("name").unwrap())?
        .id
        .clone();
    let removed = ledger.delete_account(&id)?;
    println!("Removed account '{}'", removed.name);
    Ok(())
}
