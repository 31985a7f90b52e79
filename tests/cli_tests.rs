// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use pocketledger::cli::build_cli;
use pocketledger::commands::transactions;
use pocketledger::engine::Ledger;
use pocketledger::models::*;
use pocketledger::store::MemStore;
use rust_decimal_macros::dec;

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

/// Ledger with accounts "A" and "B" and one expense on A.
fn setup() -> (Ledger<MemStore>, String, String, String) {
    let mut ledger = Ledger::open(MemStore::new()).unwrap();
    let a = ledger
        .create_account(NewAccount {
            name: "A".into(),
            kind: AccountKind::Checking,
            currency: "USD".into(),
            opening_balance: dec!(100),
            color: "#000000".into(),
            icon: "🏦".into(),
        })
        .unwrap();
    let b = ledger
        .create_account(NewAccount {
            name: "B".into(),
            kind: AccountKind::Savings,
            currency: "USD".into(),
            opening_balance: dec!(0),
            color: "#000000".into(),
            icon: "🏦".into(),
        })
        .unwrap();
    let food = ledger.category_by_name("Food & Dining").unwrap().id.clone();
    let tx = ledger
        .create_transaction(NewTransaction {
            kind: TransactionKind::Expense,
            amount: dec!(25),
            description: "groceries".into(),
            category_id: Some(food),
            tags: vec![],
            account_id: a.id.clone(),
            to_account_id: None,
            date: date("2025-05-01"),
            notes: None,
            receipt: None,
        })
        .unwrap();
    (ledger, a.id, b.id, tx.id)
}

fn run_tx(ledger: &mut Ledger<MemStore>, argv: &[&str]) -> anyhow::Result<()> {
    let matches = build_cli().try_get_matches_from(argv).unwrap();
    let (_, sub) = matches.subcommand().unwrap();
    transactions::handle(ledger, sub)
}

#[test]
fn edit_turns_expense_into_transfer() {
    let (mut ledger, a, b, tx_id) = setup();
    run_tx(
        &mut ledger,
        &[
            "pocketledger",
            "tx",
            "edit",
            &tx_id,
            "--type",
            "transfer",
            "--to",
            "B",
        ],
    )
    .unwrap();

    let tx = ledger.transaction(&tx_id).unwrap();
    assert_eq!(tx.kind, TransactionKind::Transfer);
    assert_eq!(tx.to_account_id.as_deref(), Some(b.as_str()));
    assert!(tx.category_id.is_none());
    assert_eq!(ledger.account(&a).unwrap().balance, dec!(75));
    assert_eq!(ledger.account(&b).unwrap().balance, dec!(25));
}

#[test]
fn edit_turns_transfer_back_into_expense() {
    let (mut ledger, a, b, tx_id) = setup();
    run_tx(
        &mut ledger,
        &[
            "pocketledger",
            "tx",
            "edit",
            &tx_id,
            "--type",
            "transfer",
            "--to",
            "B",
        ],
    )
    .unwrap();
    run_tx(
        &mut ledger,
        &[
            "pocketledger",
            "tx",
            "edit",
            &tx_id,
            "--type",
            "expense",
            "--category",
            "Food & Dining",
        ],
    )
    .unwrap();

    let tx = ledger.transaction(&tx_id).unwrap();
    assert_eq!(tx.kind, TransactionKind::Expense);
    assert!(tx.to_account_id.is_none());
    assert!(tx.category_id.is_some());
    assert_eq!(ledger.account(&a).unwrap().balance, dec!(75));
    assert_eq!(ledger.account(&b).unwrap().balance, dec!(0));
}

#[test]
fn edit_rejects_transfer_without_destination() {
    let (mut ledger, a, _, tx_id) = setup();
    let result = run_tx(
        &mut ledger,
        &["pocketledger", "tx", "edit", &tx_id, "--type", "transfer"],
    );
    assert!(result.is_err());
    assert_eq!(
        ledger.transaction(&tx_id).unwrap().kind,
        TransactionKind::Expense
    );
    assert_eq!(ledger.account(&a).unwrap().balance, dec!(75));
}
