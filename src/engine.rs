// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! The ledger state engine.
//!
//! `Ledger` owns the in-memory entity collections and guarantees the balance
//! invariant: for every account, `balance == opening_balance + Σ signed
//! contribution of every live transaction referencing it`. A transaction's
//! contribution is expressed as `(account_id, delta)` pairs (one pair for
//! expense/income, two opposite-signed pairs for a transfer) and every
//! mutation applies either the full set of pairs or none of them.
//!
//! Mutations work on a clone of the affected collections, persist through the
//! store, and only then swap the clone in. Accounts and transactions share a
//! single stored document, so their coupled write is atomic at the store
//! level. A failed durable write leaves both memory and disk as they were,
//! and readers never observe one transfer leg without the other.

use crate::error::{LedgerError, Result};
use crate::models::*;
use crate::store::{self, keys, KeyValue, LedgerDoc};
use chrono::Utc;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use uuid::Uuid;

pub struct Ledger<S: KeyValue> {
    store: S,
    accounts: Vec<Account>,
    transactions: Vec<Transaction>,
    budgets: Vec<Budget>,
    goals: Vec<Goal>,
    categories: Vec<Category>,
    profile: Profile,
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// The `(account_id, signed delta)` pairs a transaction contributes to the
/// ledger. `create` applies these, `delete` applies them negated, and
/// `update` applies `negated(old) ++ new` in one pass.
fn balance_deltas(tx: &Transaction) -> Vec<(String, Decimal)> {
    match tx.kind {
        TransactionKind::Expense => vec![(tx.account_id.clone(), -tx.amount)],
        TransactionKind::Income => vec![(tx.account_id.clone(), tx.amount)],
        TransactionKind::Transfer => {
            let mut pairs = vec![(tx.account_id.clone(), -tx.amount)];
            if let Some(to) = &tx.to_account_id {
                pairs.push((to.clone(), tx.amount));
            }
            pairs
        }
    }
}

fn apply_deltas(accounts: &mut [Account], deltas: &[(String, Decimal)]) -> Result<()> {
    for (account_id, delta) in deltas {
        let account = accounts
            .iter_mut()
            .find(|a| &a.id == account_id)
            .ok_or_else(|| LedgerError::NotFound(format!("Account '{}'", account_id)))?;
        account.balance += *delta;
    }
    Ok(())
}

impl<S: KeyValue> Ledger<S> {
    /// Load every collection from the store, seeding the default categories,
    /// accounts, and profile on first use.
    pub fn open(mut store: S) -> Result<Self> {
        let categories = match store::read_key_opt::<Vec<Category>>(&store, keys::CATEGORIES)? {
            Some(c) => c,
            None => {
                let seed = default_categories();
                store::write_key(&mut store, keys::CATEGORIES, &seed)?;
                seed
            }
        };
        let doc = match store::read_key_opt::<LedgerDoc>(&store, keys::LEDGER)? {
            Some(d) => d,
            None => {
                let seed = LedgerDoc {
                    accounts: default_accounts(),
                    transactions: Vec::new(),
                };
                store::write_key(&mut store, keys::LEDGER, &seed)?;
                seed
            }
        };
        let profile = match store::read_key_opt::<Profile>(&store, keys::PROFILE)? {
            Some(p) => p,
            None => {
                let seed = default_profile();
                store::write_key(&mut store, keys::PROFILE, &seed)?;
                seed
            }
        };
        Ok(Self {
            budgets: store::read_key(&store, keys::BUDGETS)?,
            goals: store::read_key(&store, keys::GOALS)?,
            store,
            accounts: doc.accounts,
            transactions: doc.transactions,
            categories,
            profile,
        })
    }

    // --- Read accessors ---

    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn budgets(&self) -> &[Budget] {
        &self.budgets
    }

    pub fn goals(&self) -> &[Goal] {
        &self.goals
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn account(&self, id: &str) -> Result<&Account> {
        self.accounts
            .iter()
            .find(|a| a.id == id)
            .ok_or_else(|| LedgerError::NotFound(format!("Account '{}'", id)))
    }

    pub fn account_by_name(&self, name: &str) -> Result<&Account> {
        self.accounts
            .iter()
            .find(|a| a.name == name)
            .ok_or_else(|| LedgerError::NotFound(format!("Account '{}'", name)))
    }

    pub fn category(&self, id: &str) -> Result<&Category> {
        self.categories
            .iter()
            .find(|c| c.id == id)
            .ok_or_else(|| LedgerError::NotFound(format!("Category '{}'", id)))
    }

    pub fn category_by_name(&self, name: &str) -> Result<&Category> {
        self.categories
            .iter()
            .find(|c| c.name == name)
            .ok_or_else(|| LedgerError::NotFound(format!("Category '{}'", name)))
    }

    pub fn transaction(&self, id: &str) -> Result<&Transaction> {
        self.transactions
            .iter()
            .find(|t| t.id == id)
            .ok_or_else(|| LedgerError::NotFound(format!("Transaction '{}'", id)))
    }

    pub fn budget(&self, id: &str) -> Result<&Budget> {
        self.budgets
            .iter()
            .find(|b| b.id == id)
            .ok_or_else(|| LedgerError::NotFound(format!("Budget '{}'", id)))
    }

    pub fn budget_by_name(&self, name: &str) -> Result<&Budget> {
        self.budgets
            .iter()
            .find(|b| b.name == name)
            .ok_or_else(|| LedgerError::NotFound(format!("Budget '{}'", name)))
    }

    pub fn goal(&self, id: &str) -> Result<&Goal> {
        self.goals
            .iter()
            .find(|g| g.id == id)
            .ok_or_else(|| LedgerError::NotFound(format!("Goal '{}'", id)))
    }

    pub fn goal_by_name(&self, name: &str) -> Result<&Goal> {
        self.goals
            .iter()
            .find(|g| g.name == name)
            .ok_or_else(|| LedgerError::NotFound(format!("Goal '{}'", name)))
    }

    // --- Transactions ---

    pub fn create_transaction(&mut self, input: NewTransaction) -> Result<Transaction> {
        let tx = Transaction {
            id: new_id(),
            kind: input.kind,
            amount: input.amount,
            currency: self.account(&input.account_id).map(|a| a.currency.clone())?,
            description: input.description,
            category_id: input.category_id,
            tags: input.tags,
            account_id: input.account_id,
            to_account_id: input.to_account_id,
            date: input.date,
            notes: input.notes,
            receipt: input.receipt,
            created_at: Utc::now(),
        };
        self.validate_transaction(&tx)?;

        let mut accounts = self.accounts.clone();
        apply_deltas(&mut accounts, &balance_deltas(&tx))?;
        let mut transactions = self.transactions.clone();
        transactions.push(tx.clone());

        self.commit_ledger(accounts, transactions)?;
        Ok(tx)
    }

    /// Reverse the stored transaction's balance effect, then apply the merged
    /// values' effect, as a single atomic step. Editing amount, kind, or
    /// account references never double-counts or loses the delta.
    pub fn update_transaction(&mut self, id: &str, changes: TransactionChanges) -> Result<Transaction> {
        let old = self.transaction(id)?.clone();
        let mut new = merge_transaction(&old, changes);
        // Currency follows the source account, so moving the transaction to
        // another account must refresh it.
        new.currency = self.account(&new.account_id)?.currency.clone();
        self.validate_transaction(&new)?;

        let mut deltas: Vec<(String, Decimal)> = balance_deltas(&old)
            .into_iter()
            .map(|(id, d)| (id, -d))
            .collect();
        deltas.extend(balance_deltas(&new));

        let mut accounts = self.accounts.clone();
        apply_deltas(&mut accounts, &deltas)?;
        let mut transactions = self.transactions.clone();
        let slot = transactions
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| LedgerError::NotFound(format!("Transaction '{}'", id)))?;
        *slot = new.clone();

        self.commit_ledger(accounts, transactions)?;
        Ok(new)
    }

    pub fn delete_transaction(&mut self, id: &str) -> Result<Transaction> {
        let old = self.transaction(id)?.clone();

        let deltas: Vec<(String, Decimal)> = balance_deltas(&old)
            .into_iter()
            .map(|(id, d)| (id, -d))
            .collect();
        let mut accounts = self.accounts.clone();
        apply_deltas(&mut accounts, &deltas)?;
        let mut transactions = self.transactions.clone();
        transactions.retain(|t| t.id != id);

        self.commit_ledger(accounts, transactions)?;
        Ok(old)
    }

    fn validate_transaction(&self, tx: &Transaction) -> Result<()> {
        if tx.amount <= Decimal::ZERO {
            return Err(LedgerError::Validation("Amount must be positive".into()));
        }
        if tx.description.trim().is_empty() {
            return Err(LedgerError::Validation("Description is required".into()));
        }
        self.account(&tx.account_id)?;
        match tx.kind {
            TransactionKind::Transfer => {
                let to = tx.to_account_id.as_deref().ok_or_else(|| {
                    LedgerError::Validation("Transfer requires a destination account".into())
                })?;
                if to == tx.account_id {
                    return Err(LedgerError::Validation(
                        "Transfer must reference two distinct accounts".into(),
                    ));
                }
                self.account(to)?;
                if tx.category_id.is_some() {
                    return Err(LedgerError::Validation(
                        "Transfer does not carry a category".into(),
                    ));
                }
            }
            kind => {
                if tx.to_account_id.is_some() {
                    return Err(LedgerError::Validation(
                        "Only transfers have a destination account".into(),
                    ));
                }
                let category_id = tx.category_id.as_deref().ok_or_else(|| {
                    LedgerError::Validation("Category is required".into())
                })?;
                let category = self.category(category_id)?;
                if Some(category.kind) != kind.category_kind() {
                    return Err(LedgerError::Validation(format!(
                        "Category '{}' is {} but the transaction is {}",
                        category.name, category.kind, kind
                    )));
                }
            }
        }
        Ok(())
    }

    /// Persist the candidate accounts + transactions as one document, then
    /// swap them in. One write means durable state either reflects the whole
    /// mutation or none of it; a failed write changes nothing.
    fn commit_ledger(&mut self, accounts: Vec<Account>, transactions: Vec<Transaction>) -> Result<()> {
        let doc = LedgerDoc {
            accounts,
            transactions,
        };
        store::write_key(&mut self.store, keys::LEDGER, &doc)?;
        self.accounts = doc.accounts;
        self.transactions = doc.transactions;
        Ok(())
    }

    // --- Accounts ---

    pub fn create_account(&mut self, input: NewAccount) -> Result<Account> {
        if input.name.trim().is_empty() {
            return Err(LedgerError::Validation("Account name is required".into()));
        }
        if self.accounts.iter().any(|a| a.name == input.name) {
            return Err(LedgerError::Validation(format!(
                "Account '{}' already exists",
                input.name
            )));
        }
        if input.currency.trim().is_empty() {
            return Err(LedgerError::Validation("Currency is required".into()));
        }
        let account = Account {
            id: new_id(),
            name: input.name,
            kind: input.kind,
            currency: input.currency.to_uppercase(),
            opening_balance: input.opening_balance,
            balance: input.opening_balance,
            color: input.color,
            icon: input.icon,
            created_at: Utc::now(),
        };
        let mut accounts = self.accounts.clone();
        accounts.push(account.clone());
        self.persist_accounts(accounts)?;
        Ok(account)
    }

    /// Merge non-balance fields. Balance is not reachable from here; it moves
    /// only through transaction deltas or `set_opening_balance`.
    pub fn update_account(&mut self, id: &str, changes: AccountChanges) -> Result<Account> {
        let idx = self.account_index(id)?;
        let mut account = self.accounts[idx].clone();
        if let Some(name) = changes.name {
            if name.trim().is_empty() {
                return Err(LedgerError::Validation("Account name is required".into()));
            }
            if self.accounts.iter().any(|a| a.name == name && a.id != id) {
                return Err(LedgerError::Validation(format!(
                    "Account '{}' already exists",
                    name
                )));
            }
            account.name = name;
        }
        if let Some(kind) = changes.kind {
            account.kind = kind;
        }
        if let Some(currency) = changes.currency {
            account.currency = currency.to_uppercase();
        }
        if let Some(color) = changes.color {
            account.color = color;
        }
        if let Some(icon) = changes.icon {
            account.icon = icon;
        }
        let mut accounts = self.accounts.clone();
        accounts[idx] = account.clone();
        self.persist_accounts(accounts)?;
        Ok(account)
    }

    /// Explicit opening-balance edit: shifts `opening_balance` and the cached
    /// `balance` by the same difference, preserving the invariant.
    pub fn set_opening_balance(&mut self, id: &str, opening: Decimal) -> Result<Account> {
        let idx = self.account_index(id)?;
        let mut account = self.accounts[idx].clone();
        let diff = opening - account.opening_balance;
        account.opening_balance = opening;
        account.balance += diff;
        let mut accounts = self.accounts.clone();
        accounts[idx] = account.clone();
        self.persist_accounts(accounts)?;
        Ok(account)
    }

    /// Deletion is blocked while any transaction references the account,
    /// either as source or as a transfer destination.
    pub fn delete_account(&mut self, id: &str) -> Result<Account> {
        let idx = self.account_index(id)?;
        let referenced = self
            .transactions
            .iter()
            .any(|t| t.account_id == id || t.to_account_id.as_deref() == Some(id));
        if referenced {
            return Err(LedgerError::Validation(format!(
                "Account '{}' still has transactions; delete or reassign them first",
                self.accounts[idx].name
            )));
        }
        let mut accounts = self.accounts.clone();
        let removed = accounts.remove(idx);
        self.persist_accounts(accounts)?;
        Ok(removed)
    }

    fn account_index(&self, id: &str) -> Result<usize> {
        self.accounts
            .iter()
            .position(|a| a.id == id)
            .ok_or_else(|| LedgerError::NotFound(format!("Account '{}'", id)))
    }

    fn persist_accounts(&mut self, accounts: Vec<Account>) -> Result<()> {
        let transactions = self.transactions.clone();
        self.commit_ledger(accounts, transactions)
    }

    // --- Categories ---

    pub fn create_category(&mut self, input: NewCategory) -> Result<Category> {
        if input.name.trim().is_empty() {
            return Err(LedgerError::Validation("Category name is required".into()));
        }
        if self.categories.iter().any(|c| c.name == input.name) {
            return Err(LedgerError::Validation(format!(
                "Category '{}' already exists",
                input.name
            )));
        }
        let category = Category {
            id: new_id(),
            name: input.name,
            kind: input.kind,
            icon: input.icon,
            color: input.color,
        };
        let mut categories = self.categories.clone();
        categories.push(category.clone());
        self.persist_categories(categories)?;
        Ok(category)
    }

    /// A category's kind is fixed at creation; changing it would silently
    /// invalidate every transaction already referencing it.
    pub fn update_category(&mut self, id: &str, changes: CategoryChanges) -> Result<Category> {
        let idx = self
            .categories
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| LedgerError::NotFound(format!("Category '{}'", id)))?;
        let mut category = self.categories[idx].clone();
        if let Some(name) = changes.name {
            if name.trim().is_empty() {
                return Err(LedgerError::Validation("Category name is required".into()));
            }
            if self.categories.iter().any(|c| c.name == name && c.id != id) {
                return Err(LedgerError::Validation(format!(
                    "Category '{}' already exists",
                    name
                )));
            }
            category.name = name;
        }
        if let Some(icon) = changes.icon {
            category.icon = icon;
        }
        if let Some(color) = changes.color {
            category.color = color;
        }
        let mut categories = self.categories.clone();
        categories[idx] = category.clone();
        self.persist_categories(categories)?;
        Ok(category)
    }

    pub fn delete_category(&mut self, id: &str) -> Result<Category> {
        let idx = self
            .categories
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| LedgerError::NotFound(format!("Category '{}'", id)))?;
        if self.transactions.iter().any(|t| t.category_id.as_deref() == Some(id)) {
            return Err(LedgerError::Validation(format!(
                "Category '{}' still has transactions",
                self.categories[idx].name
            )));
        }
        if self.budgets.iter().any(|b| b.category_id == id) {
            return Err(LedgerError::Validation(format!(
                "Category '{}' still has budgets",
                self.categories[idx].name
            )));
        }
        let mut categories = self.categories.clone();
        let removed = categories.remove(idx);
        self.persist_categories(categories)?;
        Ok(removed)
    }

    fn persist_categories(&mut self, categories: Vec<Category>) -> Result<()> {
        store::write_key(&mut self.store, keys::CATEGORIES, &categories)?;
        self.categories = categories;
        Ok(())
    }

    // --- Budgets ---

    pub fn create_budget(&mut self, input: NewBudget) -> Result<Budget> {
        self.validate_budget_fields(&input.category_id, input.limit, input.alert_threshold)?;
        if input.name.trim().is_empty() {
            return Err(LedgerError::Validation("Budget name is required".into()));
        }
        let budget = Budget {
            id: new_id(),
            name: input.name,
            category_id: input.category_id,
            limit: input.limit,
            currency: input.currency.to_uppercase(),
            period: input.period,
            start_date: input.start_date,
            alert_threshold: input.alert_threshold,
        };
        let mut budgets = self.budgets.clone();
        budgets.push(budget.clone());
        self.persist_budgets(budgets)?;
        Ok(budget)
    }

    pub fn update_budget(&mut self, id: &str, changes: BudgetChanges) -> Result<Budget> {
        let idx = self
            .budgets
            .iter()
            .position(|b| b.id == id)
            .ok_or_else(|| LedgerError::NotFound(format!("Budget '{}'", id)))?;
        let mut budget = self.budgets[idx].clone();
        if let Some(name) = changes.name {
            budget.name = name;
        }
        if let Some(category_id) = changes.category_id {
            budget.category_id = category_id;
        }
        if let Some(limit) = changes.limit {
            budget.limit = limit;
        }
        if let Some(currency) = changes.currency {
            budget.currency = currency.to_uppercase();
        }
        if let Some(period) = changes.period {
            budget.period = period;
        }
        if let Some(start_date) = changes.start_date {
            budget.start_date = start_date;
        }
        if let Some(alert_threshold) = changes.alert_threshold {
            budget.alert_threshold = alert_threshold;
        }
        self.validate_budget_fields(&budget.category_id, budget.limit, budget.alert_threshold)?;
        if budget.name.trim().is_empty() {
            return Err(LedgerError::Validation("Budget name is required".into()));
        }
        let mut budgets = self.budgets.clone();
        budgets[idx] = budget.clone();
        self.persist_budgets(budgets)?;
        Ok(budget)
    }

    pub fn delete_budget(&mut self, id: &str) -> Result<Budget> {
        let idx = self
            .budgets
            .iter()
            .position(|b| b.id == id)
            .ok_or_else(|| LedgerError::NotFound(format!("Budget '{}'", id)))?;
        let mut budgets = self.budgets.clone();
        let removed = budgets.remove(idx);
        self.persist_budgets(budgets)?;
        Ok(removed)
    }

    fn validate_budget_fields(
        &self,
        category_id: &str,
        limit: Decimal,
        alert_threshold: Decimal,
    ) -> Result<()> {
        let category = self.category(category_id)?;
        if category.kind != CategoryKind::Expense {
            return Err(LedgerError::Validation(format!(
                "Budget category '{}' must be an expense category",
                category.name
            )));
        }
        if limit <= Decimal::ZERO {
            return Err(LedgerError::Validation("Budget limit must be positive".into()));
        }
        if alert_threshold <= Decimal::ZERO || alert_threshold > Decimal::ONE {
            return Err(LedgerError::Validation(
                "Alert threshold must be a fraction in (0, 1]".into(),
            ));
        }
        Ok(())
    }

    fn persist_budgets(&mut self, budgets: Vec<Budget>) -> Result<()> {
        store::write_key(&mut self.store, keys::BUDGETS, &budgets)?;
        self.budgets = budgets;
        Ok(())
    }

    // --- Goals ---

    pub fn create_goal(&mut self, input: NewGoal) -> Result<Goal> {
        if input.name.trim().is_empty() {
            return Err(LedgerError::Validation("Goal name is required".into()));
        }
        validate_goal_amounts(input.target_amount, input.current_amount)?;
        let goal = Goal {
            id: new_id(),
            name: input.name,
            target_amount: input.target_amount,
            current_amount: input.current_amount,
            currency: input.currency.to_uppercase(),
            deadline: input.deadline,
            category: input.category,
            priority: input.priority,
        };
        let mut goals = self.goals.clone();
        goals.push(goal.clone());
        self.persist_goals(goals)?;
        Ok(goal)
    }

    pub fn update_goal(&mut self, id: &str, changes: GoalChanges) -> Result<Goal> {
        let idx = self
            .goals
            .iter()
            .position(|g| g.id == id)
            .ok_or_else(|| LedgerError::NotFound(format!("Goal '{}'", id)))?;
        let mut goal = self.goals[idx].clone();
        if let Some(name) = changes.name {
            goal.name = name;
        }
        if let Some(target) = changes.target_amount {
            goal.target_amount = target;
        }
        if let Some(current) = changes.current_amount {
            goal.current_amount = current;
        }
        if let Some(currency) = changes.currency {
            goal.currency = currency.to_uppercase();
        }
        if let Some(deadline) = changes.deadline {
            goal.deadline = deadline;
        }
        if let Some(category) = changes.category {
            goal.category = category;
        }
        if let Some(priority) = changes.priority {
            goal.priority = priority;
        }
        if goal.name.trim().is_empty() {
            return Err(LedgerError::Validation("Goal name is required".into()));
        }
        validate_goal_amounts(goal.target_amount, goal.current_amount)?;
        let mut goals = self.goals.clone();
        goals[idx] = goal.clone();
        self.persist_goals(goals)?;
        Ok(goal)
    }

    /// Record a manual contribution toward a goal.
    pub fn add_to_goal(&mut self, id: &str, amount: Decimal) -> Result<Goal> {
        if amount <= Decimal::ZERO {
            return Err(LedgerError::Validation("Contribution must be positive".into()));
        }
        let current = self.goal(id)?.current_amount + amount;
        self.update_goal(
            id,
            GoalChanges {
                current_amount: Some(current),
                ..Default::default()
            },
        )
    }

    pub fn delete_goal(&mut self, id: &str) -> Result<Goal> {
        let idx = self
            .goals
            .iter()
            .position(|g| g.id == id)
            .ok_or_else(|| LedgerError::NotFound(format!("Goal '{}'", id)))?;
        let mut goals = self.goals.clone();
        let removed = goals.remove(idx);
        self.persist_goals(goals)?;
        Ok(removed)
    }

    fn persist_goals(&mut self, goals: Vec<Goal>) -> Result<()> {
        store::write_key(&mut self.store, keys::GOALS, &goals)?;
        self.goals = goals;
        Ok(())
    }

    // --- Profile ---

    pub fn update_profile(&mut self, changes: ProfileChanges) -> Result<Profile> {
        let mut profile = self.profile.clone();
        if let Some(email) = changes.email {
            profile.email = email;
        }
        if let Some(name) = changes.name {
            profile.name = name;
        }
        if let Some(currency) = changes.currency {
            profile.currency = currency.to_uppercase();
        }
        store::write_key(&mut self.store, keys::PROFILE, &profile)?;
        self.profile = profile.clone();
        Ok(profile)
    }
}

fn validate_goal_amounts(target: Decimal, current: Decimal) -> Result<()> {
    if target <= Decimal::ZERO {
        return Err(LedgerError::Validation("Goal target must be positive".into()));
    }
    if current < Decimal::ZERO {
        return Err(LedgerError::Validation(
            "Goal current amount must be non-negative".into(),
        ));
    }
    Ok(())
}

fn merge_transaction(old: &Transaction, changes: TransactionChanges) -> Transaction {
    let mut tx = old.clone();
    if let Some(kind) = changes.kind {
        tx.kind = kind;
    }
    if let Some(amount) = changes.amount {
        tx.amount = amount;
    }
    if let Some(description) = changes.description {
        tx.description = description;
    }
    if let Some(category_id) = changes.category_id {
        tx.category_id = category_id;
    }
    if let Some(tags) = changes.tags {
        tx.tags = tags;
    }
    if let Some(account_id) = changes.account_id {
        tx.account_id = account_id;
    }
    if let Some(to_account_id) = changes.to_account_id {
        tx.to_account_id = to_account_id;
    }
    if let Some(date) = changes.date {
        tx.date = date;
    }
    if let Some(notes) = changes.notes {
        tx.notes = notes;
    }
    if let Some(receipt) = changes.receipt {
        tx.receipt = receipt;
    }
    tx
}

fn default_categories() -> Vec<Category> {
    let seed = [
        ("Food & Dining", CategoryKind::Expense, "🍔", "#FF6B6B"),
        ("Transportation", CategoryKind::Expense, "🚗", "#4ECDC4"),
        ("Shopping", CategoryKind::Expense, "🛍️", "#FFE66D"),
        ("Entertainment", CategoryKind::Expense, "🎬", "#95E1D3"),
        ("Utilities", CategoryKind::Expense, "💡", "#F38181"),
        ("Healthcare", CategoryKind::Expense, "⚕️", "#AA96DA"),
        ("Salary", CategoryKind::Income, "💰", "#52B788"),
        ("Freelance", CategoryKind::Income, "💻", "#2D6A4F"),
        ("Investment", CategoryKind::Income, "📈", "#1B4965"),
    ];
    seed.into_iter()
        .map(|(name, kind, icon, color)| Category {
            id: new_id(),
            name: name.to_string(),
            kind,
            icon: icon.to_string(),
            color: color.to_string(),
        })
        .collect()
}

fn default_accounts() -> Vec<Account> {
    let seed = [
        ("Checking Account", AccountKind::Checking, dec!(5000), "#3B82F6"),
        ("Savings Account", AccountKind::Savings, dec!(15000), "#10B981"),
    ];
    seed.into_iter()
        .map(|(name, kind, opening, color)| Account {
            id: new_id(),
            name: name.to_string(),
            kind,
            currency: "USD".to_string(),
            opening_balance: opening,
            balance: opening,
            color: color.to_string(),
            icon: "🏦".to_string(),
            created_at: Utc::now(),
        })
        .collect()
}

fn default_profile() -> Profile {
    Profile {
        id: new_id(),
        email: "user@example.com".to_string(),
        name: "User".to_string(),
        currency: "USD".to_string(),
        created_at: Utc::now(),
    }
}

/// Recompute an account's balance from first principles. Used by the doctor
/// command to detect drift between the cached balance and the transaction log.
pub fn recomputed_balance(account: &Account, transactions: &[Transaction]) -> Decimal {
    let mut balance = account.opening_balance;
    for tx in transactions {
        for (account_id, delta) in balance_deltas(tx) {
            if account_id == account.id {
                balance += delta;
            }
        }
    }
    balance
}
