// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::engine::Ledger;
use crate::store::KeyValue;
use anyhow::Result;
use serde_json::json;

pub fn handle<S: KeyValue>(ledger: &Ledger<S>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => export_transactions(ledger, sub),
        _ => Ok(()),
    }
}

fn export_transactions<S: KeyValue>(ledger: &Ledger<S>, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap();

    let mut txs: Vec<_> = ledger.transactions().iter().collect();
    txs.sort_by(|a, b| a.date.cmp(&b.date).then(a.created_at.cmp(&b.created_at)));

    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record([
                "date", "type", "account", "to_account", "description", "amount", "currency",
                "category", "tags", "notes",
            ])?;
            for t in txs {
                let account = ledger
                    .account(&t.account_id)
                    .map(|a| a.name.clone())
                    .unwrap_or_default();
                let to_account = t
                    .to_account_id
                    .as_deref()
                    .and_then(|id| ledger.account(id).ok())
                    .map(|a| a.name.clone())
                    .unwrap_or_default();
                let category = t
                    .category_id
                    .as_deref()
                    .and_then(|id| ledger.category(id).ok())
                    .map(|c| c.name.clone())
                    .unwrap_or_default();
                wtr.write_record([
                    t.date.to_string(),
                    t.kind.to_string(),
                    account,
                    to_account,
                    t.description.clone(),
                    t.amount.to_string(),
                    t.currency.clone(),
                    category,
                    t.tags.join(";"),
                    t.notes.clone().unwrap_or_default(),
                ])?;
            }
            wtr.flush()?;
        }
        "json" => {
            let items: Vec<_> = txs
                .iter()
                .map(|t| {
                    json!({
                        "date": t.date, "type": t.kind, "account_id": t.account_id,
                        "to_account_id": t.to_account_id, "description": t.description,
                        "amount": t.amount, "currency": t.currency,
                        "category_id": t.category_id, "tags": t.tags, "notes": t.notes
                    })
                })
                .collect();
            std::fs::write(out, serde_json::to_string_pretty(&items)?)?;
        }
        _ => {
            eprintln!("Unknown format: {} (use csv|json)", fmt);
        }
    }
    println!("Exported transactions to {}", out);
    Ok(())
}
