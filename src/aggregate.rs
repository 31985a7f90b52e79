// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Pure read projections over the engine's collections.
//!
//! Nothing here mutates state; every function is deterministic given the same
//! slices. Presentation layers (tables, JSON output) consume these directly.

use crate::models::{
    Account, Budget, BudgetPeriod, Category, CategoryKind, Goal, Transaction, TransactionKind,
};
use chrono::{Days, Months, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorySpend {
    pub category_id: String,
    pub total: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailySpend {
    pub date: NaiveDate,
    pub total: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetProgress {
    pub budget_id: String,
    pub period_start: NaiveDate,
    /// Exclusive end of the period instance.
    pub period_end: NaiveDate,
    pub spent: Decimal,
    /// Unclamped: 110 means 10% over budget. Display clamping is a
    /// presentation concern.
    pub percentage: Decimal,
    pub alert: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GoalProgress {
    pub goal_id: String,
    pub percentage: Decimal,
    /// Negative once the deadline has passed.
    pub days_remaining: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cashflow {
    pub income: Decimal,
    pub expense: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccountTotal {
    pub account_id: String,
    pub name: String,
    pub currency: String,
    pub balance: Decimal,
}

fn in_window(date: NaiveDate, from: NaiveDate, to: NaiveDate) -> bool {
    date >= from && date <= to
}

fn expenses_in<'a>(
    transactions: &'a [Transaction],
    from: NaiveDate,
    to: NaiveDate,
) -> impl Iterator<Item = &'a Transaction> {
    transactions
        .iter()
        .filter(move |t| t.kind == TransactionKind::Expense && in_window(t.date, from, to))
}

/// Expense totals per category within the window, zero categories omitted,
/// sorted by total descending. Chart-oriented.
pub fn category_breakdown(
    transactions: &[Transaction],
    from: NaiveDate,
    to: NaiveDate,
) -> Vec<CategorySpend> {
    let mut totals: BTreeMap<String, Decimal> = BTreeMap::new();
    for tx in expenses_in(transactions, from, to) {
        if let Some(category_id) = &tx.category_id {
            *totals.entry(category_id.clone()).or_insert(Decimal::ZERO) += tx.amount;
        }
    }
    let mut out: Vec<CategorySpend> = totals
        .into_iter()
        .map(|(category_id, total)| CategorySpend { category_id, total })
        .collect();
    out.sort_by(|a, b| b.total.cmp(&a.total));
    out
}

/// Expense totals for every expense category, zero totals retained,
/// in category order. List-oriented.
pub fn category_totals(
    categories: &[Category],
    transactions: &[Transaction],
    from: NaiveDate,
    to: NaiveDate,
) -> Vec<CategorySpend> {
    categories
        .iter()
        .filter(|c| c.kind == CategoryKind::Expense)
        .map(|c| {
            let total = expenses_in(transactions, from, to)
                .filter(|t| t.category_id.as_deref() == Some(c.id.as_str()))
                .map(|t| t.amount)
                .sum();
            CategorySpend {
                category_id: c.id.clone(),
                total,
            }
        })
        .collect()
}

/// Expense totals bucketed by calendar date, ordered by date. Days with no
/// expense are absent.
pub fn daily_spend(transactions: &[Transaction], from: NaiveDate, to: NaiveDate) -> Vec<DailySpend> {
    let mut buckets: BTreeMap<NaiveDate, Decimal> = BTreeMap::new();
    for tx in expenses_in(transactions, from, to) {
        *buckets.entry(tx.date).or_insert(Decimal::ZERO) += tx.amount;
    }
    buckets
        .into_iter()
        .map(|(date, total)| DailySpend { date, total })
        .collect()
}

/// Fixed trailing window ending at `end` (inclusive), one bucket per day,
/// absent days filled with zero.
pub fn daily_spend_window(transactions: &[Transaction], end: NaiveDate, days: u64) -> Vec<DailySpend> {
    if days == 0 {
        return Vec::new();
    }
    let start = end - Days::new(days - 1);
    let sparse: BTreeMap<NaiveDate, Decimal> = daily_spend(transactions, start, end)
        .into_iter()
        .map(|d| (d.date, d.total))
        .collect();
    (0..days)
        .map(|i| {
            let date = start + Days::new(i);
            DailySpend {
                date,
                total: sparse.get(&date).copied().unwrap_or(Decimal::ZERO),
            }
        })
        .collect()
}

/// The concrete calendar window a budget's period resolves to at `today`:
/// whole months (or years) are added to the budget's start date until the
/// window contains `today`. Returns `None` while the start date is still in
/// the future.
///
/// Every boundary is computed from the original start date. Chaining
/// month additions would let a month-end anchor erode (Jan 31 + 1 month is
/// Feb 28, and Feb 28 + 1 month is Mar 28, not Mar 31).
pub fn period_instance(budget: &Budget, today: NaiveDate) -> Option<(NaiveDate, NaiveDate)> {
    if today < budget.start_date {
        return None;
    }
    let months_per = match budget.period {
        BudgetPeriod::Monthly => 1u32,
        BudgetPeriod::Yearly => 12u32,
    };
    let mut k = 0u32;
    loop {
        let start = budget
            .start_date
            .checked_add_months(Months::new(k * months_per))?;
        let end = budget
            .start_date
            .checked_add_months(Months::new((k + 1) * months_per))?;
        if today < end {
            return Some((start, end));
        }
        k += 1;
    }
}

/// Spent is derived on read: the sum of expense amounts in the budget's
/// category whose date falls inside the current period instance.
pub fn budget_progress(budget: &Budget, transactions: &[Transaction], today: NaiveDate) -> BudgetProgress {
    let (spent, period_start, period_end) = match period_instance(budget, today) {
        Some((start, end)) => {
            let spent = transactions
                .iter()
                .filter(|t| {
                    t.kind == TransactionKind::Expense
                        && t.category_id.as_deref() == Some(budget.category_id.as_str())
                        && t.date >= start
                        && t.date < end
                })
                .map(|t| t.amount)
                .sum();
            (spent, start, end)
        }
        None => (Decimal::ZERO, budget.start_date, budget.start_date),
    };
    let percentage = if budget.limit.is_zero() {
        Decimal::ZERO
    } else {
        spent / budget.limit * dec!(100)
    };
    BudgetProgress {
        budget_id: budget.id.clone(),
        period_start,
        period_end,
        spent,
        percentage,
        alert: spent >= budget.limit * budget.alert_threshold,
    }
}

pub fn goal_progress(goal: &Goal, today: NaiveDate) -> GoalProgress {
    let percentage = if goal.target_amount.is_zero() {
        Decimal::ZERO
    } else {
        goal.current_amount / goal.target_amount * dec!(100)
    };
    GoalProgress {
        goal_id: goal.id.clone(),
        percentage,
        days_remaining: (goal.deadline - today).num_days(),
    }
}

/// One row per account with its cached balance, sorted by name. The balance
/// view shown by reports and JSON output.
pub fn account_totals(accounts: &[Account]) -> Vec<AccountTotal> {
    let mut out: Vec<AccountTotal> = accounts
        .iter()
        .map(|a| AccountTotal {
            account_id: a.id.clone(),
            name: a.name.clone(),
            currency: a.currency.clone(),
            balance: a.balance,
        })
        .collect();
    out.sort_by(|a, b| a.name.cmp(&b.name));
    out
}

/// Income and expense totals over the window. Transfers move money between
/// accounts and count as neither.
pub fn cashflow(transactions: &[Transaction], from: NaiveDate, to: NaiveDate) -> Cashflow {
    let mut income = Decimal::ZERO;
    let mut expense = Decimal::ZERO;
    for tx in transactions.iter().filter(|t| in_window(t.date, from, to)) {
        match tx.kind {
            TransactionKind::Income => income += tx.amount,
            TransactionKind::Expense => expense += tx.amount,
            TransactionKind::Transfer => {}
        }
    }
    Cashflow { income, expense }
}
