// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::engine::Ledger;
use crate::models::{NewTransaction, TransactionChanges, TransactionKind};
use crate::store::KeyValue;
use crate::utils::{maybe_print_json, parse_date, parse_decimal, pretty_table};
use anyhow::Result;
use serde::Serialize;

pub fn handle<S: KeyValue>(ledger: &mut Ledger<S>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(ledger, sub)?,
        Some(("transfer", sub)) => transfer(ledger, sub)?,
        Some(("list", sub)) => list(ledger, sub)?,
        Some(("edit", sub)) => edit(ledger, sub)?,
        Some(("rm", sub)) => rm(ledger, sub)?,
        _ => {}
    }
    Ok(())
}

fn add<S: KeyValue>(ledger: &mut Ledger<S>, sub: &clap::ArgMatches) -> Result<()> {
    let kind: TransactionKind = sub
        .get_one::<String>("type")
        .unwrap()
        .parse()
        .map_err(anyhow::Error::msg)?;
    let account_id = ledger
        .account_by_name(sub.get_one::<String>("account").unwrap())?
        .id
        .clone();
    let category_id = ledger
        .category_by_name(sub.get_one::<String>("category").unwrap())?
        .id
        .clone();
    let tags = sub
        .get_many::<String>("tag")
        .map(|vals| vals.cloned().collect())
        .unwrap_or_default();
    let tx = ledger.create_transaction(NewTransaction {
        kind,
        amount: parse_decimal(sub.get_one::<String>("amount").unwrap())?,
        description: sub.get_one::<String>("description").unwrap().clone(),
        category_id: Some(category_id),
        tags,
        account_id,
        to_account_id: None,
        date: parse_date(sub.get_one::<String>("date").unwrap())?,
        notes: sub.get_one::<String>("notes").cloned(),
        receipt: None,
    })?;
    println!(
        "Recorded {} {} on {} '{}' (id: {})",
        tx.kind, tx.amount, tx.date, tx.description, tx.id
    );
    Ok(())
}

fn transfer<S: KeyValue>(ledger: &mut Ledger<S>, sub: &clap::ArgMatches) -> Result<()> {
    let from = ledger
        .account_by_name(sub.get_one::<String>("from").unwrap())?
        .id
        .clone();
    let to = ledger
        .account_by_name(sub.get_one::<String>("to").unwrap())?
        .id
        .clone();
    let tx = ledger.create_transaction(NewTransaction {
        kind: TransactionKind::Transfer,
        amount: parse_decimal(sub.get_one::<String>("amount").unwrap())?,
        description: sub.get_one::<String>("description").unwrap().clone(),
        category_id: None,
        tags: Vec::new(),
        account_id: from,
        to_account_id: Some(to),
        date: parse_date(sub.get_one::<String>("date").unwrap())?,
        notes: None,
        receipt: None,
    })?;
    println!("Transferred {} on {} (id: {})", tx.amount, tx.date, tx.id);
    Ok(())
}

#[derive(Serialize)]
pub struct TransactionRow {
    pub id: String,
    pub date: String,
    pub r#type: String,
    pub account: String,
    pub description: String,
    pub amount: String,
    pub currency: String,
    pub category: String,
}

pub fn query_rows<S: KeyValue>(ledger: &Ledger<S>, sub: &clap::ArgMatches) -> Result<Vec<TransactionRow>> {
    let month = sub.get_one::<String>("month");
    let account = sub.get_one::<String>("account");
    let category = sub.get_one::<String>("category");
    let limit = sub.get_one::<usize>("limit").copied();

    let mut txs: Vec<_> = ledger
        .transactions()
        .iter()
        .filter(|t| match month {
            Some(m) => t.date.format("%Y-%m").to_string() == *m,
            None => true,
        })
        .filter(|t| match account {
            Some(name) => ledger
                .account(&t.account_id)
                .map(|a| a.name == *name)
                .unwrap_or(false),
            None => true,
        })
        .filter(|t| match category {
            Some(name) => match &t.category_id {
                Some(id) => ledger.category(id).map(|c| c.name == *name).unwrap_or(false),
                None => false,
            },
            None => true,
        })
        .collect();
    txs.sort_by(|a, b| b.date.cmp(&a.date).then(b.created_at.cmp(&a.created_at)));
    if let Some(n) = limit {
        txs.truncate(n);
    }

    Ok(txs
        .into_iter()
        .map(|t| TransactionRow {
            id: t.id.clone(),
            date: t.date.to_string(),
            r#type: t.kind.to_string(),
            account: ledger
                .account(&t.account_id)
                .map(|a| a.name.clone())
                .unwrap_or_default(),
            description: t.description.clone(),
            amount: format!("{:.2}", t.amount),
            currency: t.currency.clone(),
            category: t
                .category_id
                .as_deref()
                .and_then(|id| ledger.category(id).ok())
                .map(|c| c.name.clone())
                .unwrap_or_default(),
        })
        .collect())
}

fn list<S: KeyValue>(ledger: &Ledger<S>, sub: &clap::ArgMatches) -> Result<()> {
    let data = query_rows(ledger, sub)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let rows = data
            .into_iter()
            .map(|r| {
                vec![
                    r.id, r.date, r.r#type, r.account, r.description, r.amount, r.currency,
                    r.category,
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Id", "Date", "Type", "Account", "Description", "Amount", "CCY", "Category"],
                rows,
            )
        );
    }
    Ok(())
}

fn edit<S: KeyValue>(ledger: &mut Ledger<S>, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("id").unwrap().clone();
    let kind = match sub.get_one::<String>("type") {
        Some(s) => Some(s.parse::<TransactionKind>().map_err(anyhow::Error::msg)?),
        None => None,
    };
    let amount = match sub.get_one::<String>("amount") {
        Some(s) => Some(parse_decimal(s)?),
        None => None,
    };
    let date = match sub.get_one::<String>("date") {
        Some(s) => Some(parse_date(s)?),
        None => None,
    };
    let account_id = match sub.get_one::<String>("account") {
        Some(name) => Some(ledger.account_by_name(name)?.id.clone()),
        None => None,
    };
    let mut category_id = match sub.get_one::<String>("category") {
        Some(name) => Some(Some(ledger.category_by_name(name)?.id.clone())),
        None => None,
    };
    let mut to_account_id = match sub.get_one::<String>("to") {
        Some(name) => Some(Some(ledger.account_by_name(name)?.id.clone())),
        None => None,
    };
    // Switching kind swaps which of category/destination the transaction
    // carries; clear the one the new kind forbids unless a value was given.
    match kind {
        Some(TransactionKind::Transfer) => {
            if category_id.is_none() {
                category_id = Some(None);
            }
        }
        Some(_) => {
            if to_account_id.is_none() {
                to_account_id = Some(None);
            }
        }
        None => {}
    }
    let tx = ledger.update_transaction(
        &id,
        TransactionChanges {
            kind,
            amount,
            description: sub.get_one::<String>("description").cloned(),
            category_id,
            account_id,
            to_account_id,
            date,
            notes: sub.get_one::<String>("notes").cloned().map(Some),
            ..Default::default()
        },
    )?;
    println!("Updated transaction {} ({} {})", tx.id, tx.kind, tx.amount);
    Ok(())
}

fn rm<S: KeyValue>(ledger: &mut Ledger<S>, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("id").unwrap();
    let removed = ledger.delete_transaction(id)?;
    println!(
        "Deleted transaction {} ({} {} on {})",
        removed.id, removed.kind, removed.amount, removed.date
    );
    Ok(())
}
