// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::engine::{recomputed_balance, Ledger};
use crate::store::KeyValue;
use crate::utils::pretty_table;
use anyhow::Result;

/// Recompute every account balance from the transaction log and compare it
/// against the cached value. Any drift means the cached balance was written
/// outside the engine's delta path.
pub fn handle<S: KeyValue>(ledger: &Ledger<S>) -> Result<()> {
    let mut rows = Vec::new();
    let mut drifted = 0usize;
    for account in ledger.accounts() {
        let expected = recomputed_balance(account, ledger.transactions());
        let ok = expected == account.balance;
        if !ok {
            drifted += 1;
        }
        rows.push(vec![
            account.name.clone(),
            format!("{:.2}", account.balance),
            format!("{:.2}", expected),
            (if ok { "ok" } else { "DRIFT" }).to_string(),
        ]);
    }
    println!(
        "{}",
        pretty_table(&["Account", "Cached", "Recomputed", "Status"], rows)
    );
    if drifted > 0 {
        anyhow::bail!("{} account(s) have drifted balances", drifted);
    }
    println!("All balances consistent.");
    Ok(())
}
