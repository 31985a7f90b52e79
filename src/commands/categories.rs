// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::engine::Ledger;
use crate::models::{CategoryKind, NewCategory};
use crate::store::KeyValue;
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::Result;

pub fn handle<S: KeyValue>(ledger: &mut Ledger<S>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let kind: CategoryKind = sub
                .get_one::<String>("type")
                .unwrap()
                .parse()
                .map_err(anyhow::Error::msg)?;
            let category = ledger.create_category(NewCategory {
                name: sub.get_one::<String>("name").unwrap().clone(),
                kind,
                icon: sub.get_one::<String>("icon").unwrap().clone(),
                color: sub.get_one::<String>("color").unwrap().clone(),
            })?;
            println!("Added category '{}' ({})", category.name, category.kind);
        }
        Some(("list", sub)) => {
            let data: Vec<Vec<String>> = ledger
                .categories()
                .iter()
                .map(|c| vec![c.name.clone(), c.kind.to_string(), c.icon.clone()])
                .collect();
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
                println!("{}", pretty_table(&["Name", "Type", "Icon"], data));
            }
        }
        Some(("rm", sub)) => {
            let id = ledger
                .category_by_name(sub.get_one::<String>("name").unwrap())?
                .id
                .clone();
            let removed = ledger.delete_category(&id)?;
            println!("Removed category '{}'", removed.name);
        }
        _ => {}
    }
    Ok(())
}
