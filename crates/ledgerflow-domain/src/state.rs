//! The aggregate application state.
//!
//! `State` is never mutated in place. Every transition produces a new
//! value; the sequences are behind `Arc` so an unchanged sequence is
//! shared between the old and new snapshots rather than copied.

use std::sync::Arc;

use crate::{
    account::Account, budget::Budget, category::Category, common::find_by_id,
    transaction::Transaction,
};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct State {
    accounts: Arc<Vec<Account>>,
    categories: Arc<Vec<Category>>,
    transactions: Arc<Vec<Transaction>>,
    budgets: Arc<Vec<Budget>>,
    alerts: Arc<Vec<String>>,
}

impl State {
    pub fn new(
        accounts: Vec<Account>,
        categories: Vec<Category>,
        transactions: Vec<Transaction>,
        budgets: Vec<Budget>,
    ) -> Self {
        Self {
            accounts: Arc::new(accounts),
            categories: Arc::new(categories),
            transactions: Arc::new(transactions),
            budgets: Arc::new(budgets),
            alerts: Arc::new(Vec::new()),
        }
    }

    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn budgets(&self) -> &[Budget] {
        &self.budgets
    }

    pub fn alerts(&self) -> &[String] {
        &self.alerts
    }

    /// Cheap handle to the transaction sequence, for derivations that run
    /// off-thread over a stable snapshot.
    pub fn shared_transactions(&self) -> Arc<Vec<Transaction>> {
        Arc::clone(&self.transactions)
    }

    pub fn account(&self, id: &str) -> Option<&Account> {
        find_by_id(&self.accounts, id)
    }

    pub fn category(&self, id: &str) -> Option<&Category> {
        find_by_id(&self.categories, id)
    }

    pub fn transaction(&self, id: &str) -> Option<&Transaction> {
        find_by_id(&self.transactions, id)
    }

    pub fn budget(&self, id: &str) -> Option<&Budget> {
        find_by_id(&self.budgets, id)
    }

    /// Replaces the account sequence, sharing every other sequence.
    pub fn with_accounts(&self, accounts: Vec<Account>) -> State {
        State {
            accounts: Arc::new(accounts),
            ..self.clone()
        }
    }

    pub fn with_transactions(&self, transactions: Vec<Transaction>) -> State {
        State {
            transactions: Arc::new(transactions),
            ..self.clone()
        }
    }

    pub fn with_budgets(&self, budgets: Vec<Budget>) -> State {
        State {
            budgets: Arc::new(budgets),
            ..self.clone()
        }
    }

    /// Appends alert lines, sharing every other sequence.
    pub fn push_alerts(&self, new_alerts: Vec<String>) -> State {
        if new_alerts.is_empty() {
            return self.clone();
        }
        let mut alerts = (*self.alerts).clone();
        alerts.extend(new_alerts);
        State {
            alerts: Arc::new(alerts),
            ..self.clone()
        }
    }
}
