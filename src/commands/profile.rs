// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::engine::Ledger;
use crate::models::ProfileChanges;
use crate::store::KeyValue;
use crate::utils::pretty_table;
use anyhow::Result;

pub fn handle<S: KeyValue>(ledger: &mut Ledger<S>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("show", _)) => {
            let p = ledger.profile();
            let rows = vec![vec![
                p.name.clone(),
                p.email.clone(),
                p.currency.clone(),
                p.created_at.date_naive().to_string(),
            ]];
            println!(
                "{}",
                pretty_table(&["Name", "Email", "Currency", "Since"], rows)
            );
        }
        Some(("set", sub)) => {
            let p = ledger.update_profile(ProfileChanges {
                email: sub.get_one::<String>("email").cloned(),
                name: sub.get_one::<String>("name").cloned(),
                currency: sub.get_one::<String>("currency").cloned(),
            })?;
            println!("Profile updated: {} <{}> ({})", p.name, p.email, p.currency);
        }
        _ => {}
    }
    Ok(())
}
