//! Domain types representing money accounts.

use serde::{Deserialize, Serialize};

use crate::common::*;

/// A money account. Balances are integer minor currency units.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Account {
    pub id: String,
    pub name: String,
    pub balance: i64,
    pub currency: String,
}

impl Account {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        balance: i64,
        currency: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            balance,
            currency: currency.into(),
        }
    }

    /// Returns a copy of the account carrying `balance`. The only balance
    /// update path; account values are never changed in place.
    pub fn with_balance(&self, balance: i64) -> Account {
        Account {
            balance,
            ..self.clone()
        }
    }
}

impl Identifiable for Account {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Displayable for Account {
    fn display_label(&self) -> String {
        format!("{} ({} {})", self.name, self.balance, self.currency)
    }
}
