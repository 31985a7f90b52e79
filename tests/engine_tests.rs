// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use pocketledger::engine::{recomputed_balance, Ledger};
use pocketledger::error::{LedgerError, Result};
use pocketledger::models::*;
use pocketledger::store::{self, keys, KeyValue, LedgerDoc, MemStore};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::cell::RefCell;
use std::rc::Rc;

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

/// Ledger with two fresh accounts (A: 100, B: 0) alongside the seeded
/// defaults. Returns (ledger, a_id, b_id).
fn setup() -> (Ledger<MemStore>, String, String) {
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
    (ledger, a.id, b.id)
}

fn category_id(ledger: &Ledger<MemStore>, name: &str) -> String {
    ledger.category_by_name(name).unwrap().id.clone()
}

fn expense(ledger: &Ledger<MemStore>, account_id: &str, amount: Decimal, day: &str) -> NewTransaction {
    NewTransaction {
        kind: TransactionKind::Expense,
        amount,
        description: "coffee".into(),
        category_id: Some(category_id(ledger, "Food & Dining")),
        tags: vec![],
        account_id: account_id.to_string(),
        to_account_id: None,
        date: date(day),
        notes: None,
        receipt: None,
    }
}

fn income(ledger: &Ledger<MemStore>, account_id: &str, amount: Decimal, day: &str) -> NewTransaction {
    NewTransaction {
        kind: TransactionKind::Income,
        amount,
        description: "pay".into(),
        category_id: Some(category_id(ledger, "Salary")),
        tags: vec![],
        account_id: account_id.to_string(),
        to_account_id: None,
        date: date(day),
        notes: None,
        receipt: None,
    }
}

fn balance(ledger: &Ledger<MemStore>, id: &str) -> Decimal {
    ledger.account(id).unwrap().balance
}

#[test]
fn income_applies_and_delete_reverses() {
    let (mut ledger, a, _) = setup();
    let input = income(&ledger, &a, dec!(50), "2025-05-01");
    let tx = ledger.create_transaction(input).unwrap();
    assert_eq!(balance(&ledger, &a), dec!(150));

    ledger.delete_transaction(&tx.id).unwrap();
    assert_eq!(balance(&ledger, &a), dec!(100));
    assert!(ledger.transactions().is_empty());
}

#[test]
fn transfer_moves_both_legs() {
    let (mut ledger, a, b) = setup();
    ledger.set_opening_balance(&a, dec!(200)).unwrap();
    ledger
        .create_transaction(NewTransaction {
            kind: TransactionKind::Transfer,
            amount: dec!(75),
            description: "move".into(),
            category_id: None,
            tags: vec![],
            account_id: a.clone(),
            to_account_id: Some(b.clone()),
            date: date("2025-05-02"),
            notes: None,
            receipt: None,
        })
        .unwrap();
    assert_eq!(balance(&ledger, &a), dec!(125));
    assert_eq!(balance(&ledger, &b), dec!(75));
}

#[test]
fn edit_amount_applies_net_delta_only() {
    let (mut ledger, a, _) = setup();
    let input = expense(&ledger, &a, dec!(30), "2025-05-03");
    let tx = ledger.create_transaction(input).unwrap();
    assert_eq!(balance(&ledger, &a), dec!(70));

    ledger
        .update_transaction(
            &tx.id,
            TransactionChanges {
                amount: Some(dec!(50)),
                ..Default::default()
            },
        )
        .unwrap();
    // 20 more than before the edit, not double-applied
    assert_eq!(balance(&ledger, &a), dec!(50));
}

#[test]
fn edit_with_same_values_is_a_balance_noop() {
    let (mut ledger, a, _) = setup();
    let input = expense(&ledger, &a, dec!(30), "2025-05-03");
    let tx = ledger.create_transaction(input).unwrap();
    let before = balance(&ledger, &a);

    ledger
        .update_transaction(
            &tx.id,
            TransactionChanges {
                amount: Some(tx.amount),
                description: Some(tx.description.clone()),
                ..Default::default()
            },
        )
        .unwrap();
    assert_eq!(balance(&ledger, &a), before);
}

#[test]
fn edit_moving_transaction_between_accounts() {
    let (mut ledger, a, b) = setup();
    let input = expense(&ledger, &a, dec!(40), "2025-05-04");
    let tx = ledger.create_transaction(input).unwrap();
    assert_eq!(balance(&ledger, &a), dec!(60));

    ledger
        .update_transaction(
            &tx.id,
            TransactionChanges {
                account_id: Some(b.clone()),
                ..Default::default()
            },
        )
        .unwrap();
    assert_eq!(balance(&ledger, &a), dec!(100));
    assert_eq!(balance(&ledger, &b), dec!(-40));
}

#[test]
fn edit_moving_between_accounts_refreshes_currency() {
    let (mut ledger, a, _) = setup();
    let euro = ledger
        .create_account(NewAccount {
            name: "Euro Wallet".into(),
            kind: AccountKind::Cash,
            currency: "EUR".into(),
            opening_balance: dec!(50),
            color: "#000000".into(),
            icon: "👛".into(),
        })
        .unwrap();
    let input = expense(&ledger, &a, dec!(20), "2025-05-04");
    let tx = ledger.create_transaction(input).unwrap();
    assert_eq!(tx.currency, "USD");

    let moved = ledger
        .update_transaction(
            &tx.id,
            TransactionChanges {
                account_id: Some(euro.id.clone()),
                ..Default::default()
            },
        )
        .unwrap();
    assert_eq!(moved.currency, "EUR");
    assert_eq!(balance(&ledger, &euro.id), dec!(30));
}

#[test]
fn balance_invariant_holds_over_mixed_sequence() {
    let (mut ledger, a, b) = setup();
    let t1 = ledger
        .create_transaction(expense(&ledger, &a, dec!(10), "2025-05-01"))
        .unwrap();
    let _t2 = ledger
        .create_transaction(income(&ledger, &a, dec!(500), "2025-05-02"))
        .unwrap();
    let t3 = ledger
        .create_transaction(NewTransaction {
            kind: TransactionKind::Transfer,
            amount: dec!(120),
            description: "stash".into(),
            category_id: None,
            tags: vec![],
            account_id: a.clone(),
            to_account_id: Some(b.clone()),
            date: date("2025-05-03"),
            notes: None,
            receipt: None,
        })
        .unwrap();
    ledger
        .update_transaction(
            &t1.id,
            TransactionChanges {
                amount: Some(dec!(25)),
                ..Default::default()
            },
        )
        .unwrap();
    ledger.delete_transaction(&t3.id).unwrap();

    for account in ledger.accounts() {
        assert_eq!(
            account.balance,
            recomputed_balance(account, ledger.transactions()),
            "drift on account {}",
            account.name
        );
    }
}

#[test]
fn rejects_invalid_transactions() {
    let (mut ledger, a, b) = setup();

    let mut zero = expense(&ledger, &a, dec!(0), "2025-05-01");
    zero.amount = Decimal::ZERO;
    assert!(matches!(
        ledger.create_transaction(zero),
        Err(LedgerError::Validation(_))
    ));

    // transfer must reference two distinct accounts
    let same = NewTransaction {
        kind: TransactionKind::Transfer,
        amount: dec!(10),
        description: "loop".into(),
        category_id: None,
        tags: vec![],
        account_id: a.clone(),
        to_account_id: Some(a.clone()),
        date: date("2025-05-01"),
        notes: None,
        receipt: None,
    };
    assert!(matches!(
        ledger.create_transaction(same),
        Err(LedgerError::Validation(_))
    ));

    // transfer never carries a category
    let categorized = NewTransaction {
        kind: TransactionKind::Transfer,
        amount: dec!(10),
        description: "move".into(),
        category_id: Some(category_id(&ledger, "Food & Dining")),
        tags: vec![],
        account_id: a.clone(),
        to_account_id: Some(b.clone()),
        date: date("2025-05-01"),
        notes: None,
        receipt: None,
    };
    assert!(matches!(
        ledger.create_transaction(categorized),
        Err(LedgerError::Validation(_))
    ));

    // expense against an income category
    let mut mismatched = expense(&ledger, &a, dec!(10), "2025-05-01");
    mismatched.category_id = Some(category_id(&ledger, "Salary"));
    assert!(matches!(
        ledger.create_transaction(mismatched),
        Err(LedgerError::Validation(_))
    ));

    // unknown category id
    let mut unknown = expense(&ledger, &a, dec!(10), "2025-05-01");
    unknown.category_id = Some("nope".into());
    assert!(matches!(
        ledger.create_transaction(unknown),
        Err(LedgerError::NotFound(_))
    ));

    // nothing above changed any balance
    assert_eq!(balance(&ledger, &a), dec!(100));
    assert_eq!(balance(&ledger, &b), dec!(0));
    assert!(ledger.transactions().is_empty());
}

#[test]
fn update_and_delete_unknown_transaction_not_found() {
    let (mut ledger, _, _) = setup();
    assert!(matches!(
        ledger.update_transaction("missing", TransactionChanges::default()),
        Err(LedgerError::NotFound(_))
    ));
    assert!(matches!(
        ledger.delete_transaction("missing"),
        Err(LedgerError::NotFound(_))
    ));
}

#[test]
fn account_deletion_blocked_while_referenced() {
    let (mut ledger, a, b) = setup();
    let tx = ledger
        .create_transaction(NewTransaction {
            kind: TransactionKind::Transfer,
            amount: dec!(5),
            description: "move".into(),
            category_id: None,
            tags: vec![],
            account_id: a.clone(),
            to_account_id: Some(b.clone()),
            date: date("2025-05-01"),
            notes: None,
            receipt: None,
        })
        .unwrap();

    // blocked for both the source and the destination leg
    assert!(matches!(ledger.delete_account(&a), Err(LedgerError::Validation(_))));
    assert!(matches!(ledger.delete_account(&b), Err(LedgerError::Validation(_))));

    ledger.delete_transaction(&tx.id).unwrap();
    ledger.delete_account(&b).unwrap();
    assert!(matches!(ledger.account(&b), Err(LedgerError::NotFound(_))));
}

#[test]
fn update_account_cannot_touch_balance() {
    let (mut ledger, a, _) = setup();
    let renamed = ledger
        .update_account(
            &a,
            AccountChanges {
                name: Some("A2".into()),
                ..Default::default()
            },
        )
        .unwrap();
    assert_eq!(renamed.balance, dec!(100));
    assert_eq!(renamed.opening_balance, dec!(100));
}

#[test]
fn opening_balance_edit_shifts_balance_by_diff() {
    let (mut ledger, a, _) = setup();
    ledger
        .create_transaction(expense(&ledger, &a, dec!(30), "2025-05-01"))
        .unwrap();
    assert_eq!(balance(&ledger, &a), dec!(70));

    let account = ledger.set_opening_balance(&a, dec!(250)).unwrap();
    assert_eq!(account.opening_balance, dec!(250));
    assert_eq!(account.balance, dec!(220));
    assert_eq!(
        account.balance,
        recomputed_balance(&account, ledger.transactions())
    );
}

#[test]
fn budget_requires_expense_category() {
    let (mut ledger, _, _) = setup();
    let salary = category_id(&ledger, "Salary");
    let result = ledger.create_budget(NewBudget {
        name: "Pay".into(),
        category_id: salary,
        limit: dec!(100),
        currency: "USD".into(),
        period: BudgetPeriod::Monthly,
        start_date: date("2025-01-01"),
        alert_threshold: dec!(0.8),
    });
    assert!(matches!(result, Err(LedgerError::Validation(_))));
}

#[test]
fn goal_amounts_validated() {
    let (mut ledger, _, _) = setup();
    let bad = ledger.create_goal(NewGoal {
        name: "Trip".into(),
        target_amount: dec!(0),
        current_amount: dec!(0),
        currency: "USD".into(),
        deadline: date("2026-01-01"),
        category: "Travel".into(),
        priority: GoalPriority::Medium,
    });
    assert!(matches!(bad, Err(LedgerError::Validation(_))));

    let goal = ledger
        .create_goal(NewGoal {
            name: "Trip".into(),
            target_amount: dec!(1000),
            current_amount: dec!(0),
            currency: "USD".into(),
            deadline: date("2026-01-01"),
            category: "Travel".into(),
            priority: GoalPriority::High,
        })
        .unwrap();
    let goal = ledger.add_to_goal(&goal.id, dec!(150)).unwrap();
    assert_eq!(goal.current_amount, dec!(150));
    assert!(matches!(
        ledger.add_to_goal(&goal.id, dec!(-5)),
        Err(LedgerError::Validation(_))
    ));
}

/// Store double that accepts a fixed number of writes, then fails. The
/// backing map is shared so tests can inspect durable state after the
/// ledger has consumed the store.
struct FlakyStore {
    inner: Rc<RefCell<MemStore>>,
    writes_left: usize,
}

impl FlakyStore {
    fn new(writes_left: usize) -> (Self, Rc<RefCell<MemStore>>) {
        let inner = Rc::new(RefCell::new(MemStore::new()));
        (
            Self {
                inner: Rc::clone(&inner),
                writes_left,
            },
            inner,
        )
    }
}

impl KeyValue for FlakyStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.inner.borrow().get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        if self.writes_left == 0 {
            return Err(LedgerError::Storage("backend unavailable".into()));
        }
        self.writes_left -= 1;
        self.inner.borrow_mut().set(key, value)
    }
}

#[test]
fn failed_store_write_leaves_no_partial_transfer() {
    // 3 seed writes at open (categories, ledger, profile) plus 2 for the
    // account creations; the transfer's single ledger write then fails.
    let (store, durable) = FlakyStore::new(3 + 2);
    let mut ledger = Ledger::open(store).unwrap();
    let a = ledger
        .create_account(NewAccount {
            name: "A".into(),
            kind: AccountKind::Checking,
            currency: "USD".into(),
            opening_balance: dec!(200),
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

    let result = ledger.create_transaction(NewTransaction {
        kind: TransactionKind::Transfer,
        amount: dec!(75),
        description: "move".into(),
        category_id: None,
        tags: vec![],
        account_id: a.id.clone(),
        to_account_id: Some(b.id.clone()),
        date: date("2025-05-01"),
        notes: None,
        receipt: None,
    });
    assert!(matches!(result, Err(LedgerError::Storage(_))));

    // neither leg is visible in memory and no transaction was recorded
    assert_eq!(ledger.account(&a.id).unwrap().balance, dec!(200));
    assert_eq!(ledger.account(&b.id).unwrap().balance, dec!(0));
    assert!(ledger.transactions().is_empty());

    // durable state matches: a reopen would see the pre-transfer balances,
    // never one leg applied with the transaction itself missing
    let stored = durable.borrow();
    let doc: LedgerDoc = store::read_key(&*stored, keys::LEDGER).unwrap();
    let find = |id: &str| doc.accounts.iter().find(|acc| acc.id == id).unwrap();
    assert_eq!(find(&a.id).balance, dec!(200));
    assert_eq!(find(&b.id).balance, dec!(0));
    assert!(doc.transactions.is_empty());
}
