// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use pocketledger::engine::Ledger;
use pocketledger::store::JsonDirStore;
use pocketledger::{cli, commands};

fn main() -> Result<()> {
    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let store = JsonDirStore::open_default()?;
    let data_dir = store.root().clone();
    let mut ledger = Ledger::open(store)?;

    match matches.subcommand() {
        Some(("account", sub)) => commands::accounts::handle(&mut ledger, sub)?,
        Some(("category", sub)) => commands::categories::handle(&mut ledger, sub)?,
        Some(("tx", sub)) => commands::transactions::handle(&mut ledger, sub)?,
        Some(("budget", sub)) => commands::budgets::handle(&mut ledger, sub)?,
        Some(("goal", sub)) => commands::goals::handle(&mut ledger, sub)?,
        Some(("report", sub)) => commands::reports::handle(&ledger, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&ledger, sub)?,
        Some(("profile", sub)) => commands::profile::handle(&mut ledger, sub)?,
        Some(("doctor", _)) => commands::doctor::handle(&ledger)?,
        _ => {
            println!("Data dir: {}", data_dir.display());
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
