// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountKind {
    Checking,
    Savings,
    Credit,
    Cash,
    Investment,
}

impl FromStr for AccountKind {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "checking" => Ok(Self::Checking),
            "savings" => Ok(Self::Savings),
            "credit" => Ok(Self::Credit),
            "cash" => Ok(Self::Cash),
            "investment" => Ok(Self::Investment),
            other => Err(format!(
                "Unknown account type '{}' (use checking|savings|credit|cash|investment)",
                other
            )),
        }
    }
}

impl fmt::Display for AccountKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Checking => "checking",
            Self::Savings => "savings",
            Self::Credit => "credit",
            Self::Cash => "cash",
            Self::Investment => "investment",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryKind {
    Expense,
    Income,
}

impl FromStr for CategoryKind {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "expense" => Ok(Self::Expense),
            "income" => Ok(Self::Income),
            other => Err(format!("Unknown category type '{}' (use expense|income)", other)),
        }
    }
}

impl fmt::Display for CategoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Expense => "expense",
            Self::Income => "income",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Expense,
    Income,
    Transfer,
}

impl TransactionKind {
    /// Category kind a non-transfer transaction must reference.
    pub fn category_kind(self) -> Option<CategoryKind> {
        match self {
            Self::Expense => Some(CategoryKind::Expense),
            Self::Income => Some(CategoryKind::Income),
            Self::Transfer => None,
        }
    }
}

impl FromStr for TransactionKind {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "expense" => Ok(Self::Expense),
            "income" => Ok(Self::Income),
            "transfer" => Ok(Self::Transfer),
            other => Err(format!(
                "Unknown transaction type '{}' (use expense|income|transfer)",
                other
            )),
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Expense => "expense",
            Self::Income => "income",
            Self::Transfer => "transfer",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetPeriod {
    Monthly,
    Yearly,
}

impl FromStr for BudgetPeriod {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "monthly" => Ok(Self::Monthly),
            "yearly" => Ok(Self::Yearly),
            other => Err(format!("Unknown period '{}' (use monthly|yearly)", other)),
        }
    }
}

impl fmt::Display for BudgetPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalPriority {
    Low,
    Medium,
    High,
}

impl FromStr for GoalPriority {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            other => Err(format!("Unknown priority '{}' (use low|medium|high)", other)),
        }
    }
}

impl fmt::Display for GoalPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        })
    }
}

/// A money account. `balance` is a cached quantity: it always equals
/// `opening_balance` plus the signed sum of every live transaction that
/// references the account. Only the engine's delta logic may touch it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: AccountKind,
    pub currency: String,
    pub opening_balance: Decimal,
    pub balance: Decimal,
    pub color: String,
    pub icon: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: CategoryKind,
    pub icon: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub amount: Decimal,
    pub currency: String,
    pub description: String,
    /// `None` exactly when `kind == Transfer`.
    pub category_id: Option<String>,
    pub tags: Vec<String>,
    pub account_id: String,
    /// Destination leg, present exactly when `kind == Transfer`.
    pub to_account_id: Option<String>,
    pub date: NaiveDate,
    pub notes: Option<String>,
    pub receipt: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    pub id: String,
    pub name: String,
    pub category_id: String,
    pub limit: Decimal,
    pub currency: String,
    pub period: BudgetPeriod,
    pub start_date: NaiveDate,
    /// Fraction of `limit` in (0, 1] at which the budget starts warning.
    pub alert_threshold: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub id: String,
    pub name: String,
    pub target_amount: Decimal,
    pub current_amount: Decimal,
    pub currency: String,
    pub deadline: NaiveDate,
    pub category: String,
    pub priority: GoalPriority,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    pub email: String,
    pub name: String,
    pub currency: String,
    pub created_at: DateTime<Utc>,
}

// --- Creation inputs ---

#[derive(Debug, Clone)]
pub struct NewAccount {
    pub name: String,
    pub kind: AccountKind,
    pub currency: String,
    pub opening_balance: Decimal,
    pub color: String,
    pub icon: String,
}

#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub kind: TransactionKind,
    pub amount: Decimal,
    pub description: String,
    pub category_id: Option<String>,
    pub tags: Vec<String>,
    pub account_id: String,
    pub to_account_id: Option<String>,
    pub date: NaiveDate,
    pub notes: Option<String>,
    pub receipt: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewCategory {
    pub name: String,
    pub kind: CategoryKind,
    pub icon: String,
    pub color: String,
}

#[derive(Debug, Clone)]
pub struct NewBudget {
    pub name: String,
    pub category_id: String,
    pub limit: Decimal,
    pub currency: String,
    pub period: BudgetPeriod,
    pub start_date: NaiveDate,
    pub alert_threshold: Decimal,
}

#[derive(Debug, Clone)]
pub struct NewGoal {
    pub name: String,
    pub target_amount: Decimal,
    pub current_amount: Decimal,
    pub currency: String,
    pub deadline: NaiveDate,
    pub category: String,
    pub priority: GoalPriority,
}

// --- Change sets ---
//
// Every update path goes through one of these: fields are merged one by one
// and the merged entity is re-validated as a whole before it replaces the
// stored one. There is deliberately no `balance` field on `AccountChanges`;
// balance moves only through transaction deltas or the explicit
// opening-balance operation on the engine.

#[derive(Debug, Clone, Default)]
pub struct AccountChanges {
    pub name: Option<String>,
    pub kind: Option<AccountKind>,
    pub currency: Option<String>,
    pub color: Option<String>,
    pub icon: Option<String>,
}

/// Double-`Option` fields distinguish "leave as is" (`None`) from
/// "set to this, possibly clearing" (`Some(inner)`).
#[derive(Debug, Clone, Default)]
pub struct TransactionChanges {
    pub kind: Option<TransactionKind>,
    pub amount: Option<Decimal>,
    pub description: Option<String>,
    pub category_id: Option<Option<String>>,
    pub tags: Option<Vec<String>>,
    pub account_id: Option<String>,
    pub to_account_id: Option<Option<String>>,
    pub date: Option<NaiveDate>,
    pub notes: Option<Option<String>>,
    pub receipt: Option<Option<String>>,
}

#[derive(Debug, Clone, Default)]
pub struct CategoryChanges {
    pub name: Option<String>,
    pub icon: Option<String>,
    pub color: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct BudgetChanges {
    pub name: Option<String>,
    pub category_id: Option<String>,
    pub limit: Option<Decimal>,
    pub currency: Option<String>,
    pub period: Option<BudgetPeriod>,
    pub start_date: Option<NaiveDate>,
    pub alert_threshold: Option<Decimal>,
}

#[derive(Debug, Clone, Default)]
pub struct GoalChanges {
    pub name: Option<String>,
    pub target_amount: Option<Decimal>,
    pub current_amount: Option<Decimal>,
    pub currency: Option<String>,
    pub deadline: Option<NaiveDate>,
    pub category: Option<String>,
    pub priority: Option<GoalPriority>,
}

#[derive(Debug, Clone, Default)]
pub struct ProfileChanges {
    pub email: Option<String>,
    pub name: Option<String>,
    pub currency: Option<String>,
}
