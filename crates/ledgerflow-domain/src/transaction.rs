//! Domain types representing ledger transactions.

use serde::{Deserialize, Serialize};

use crate::common::*;

/// A single ledger movement. Negative amounts are expenses, positive
/// amounts are income. Transactions are immutable once created; edits go
/// through [`Transaction::apply`], which returns a new value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Transaction {
    pub id: String,
    pub account_id: String,
    pub cat_id: String,
    pub amount: i64,
    /// ISO-8601 timestamp, lexicographically sortable.
    pub ts: String,
    #[serde(default)]
    pub note: String,
}

impl Transaction {
    pub fn new(
        id: impl Into<String>,
        account_id: impl Into<String>,
        cat_id: impl Into<String>,
        amount: i64,
        ts: impl Into<String>,
        note: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            account_id: account_id.into(),
            cat_id: cat_id.into(),
            amount,
            ts: ts.into(),
            note: note.into(),
        }
    }

    pub fn is_expense(&self) -> bool {
        self.amount < 0
    }

    /// `YYYY-MM` prefix of the timestamp. Timestamps shorter than the
    /// prefix, or with a multi-byte char inside it, are returned whole.
    pub fn month_key(&self) -> &str {
        self.ts.get(..7).unwrap_or(&self.ts)
    }

    /// Returns a copy with the patched fields replaced and everything else
    /// carried over unchanged.
    pub fn apply(&self, patch: &TransactionPatch) -> Transaction {
        Transaction {
            id: self.id.clone(),
            account_id: patch
                .account_id
                .clone()
                .unwrap_or_else(|| self.account_id.clone()),
            cat_id: patch.cat_id.clone().unwrap_or_else(|| self.cat_id.clone()),
            amount: patch.amount.unwrap_or(self.amount),
            ts: patch.ts.clone().unwrap_or_else(|| self.ts.clone()),
            note: patch.note.clone().unwrap_or_else(|| self.note.clone()),
        }
    }
}

impl Identifiable for Transaction {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Displayable for Transaction {
    fn display_label(&self) -> String {
        format!("txn:{} {} @ {}", self.id, self.amount, self.ts)
    }
}

/// Field-level edit set for [`Transaction::apply`]. `None` leaves the
/// corresponding field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionPatch {
    pub account_id: Option<String>,
    pub cat_id: Option<String>,
    pub amount: Option<i64>,
    pub ts: Option<String>,
    pub note: Option<String>,
}

impl TransactionPatch {
    pub fn amount(amount: i64) -> Self {
        Self {
            amount: Some(amount),
            ..Self::default()
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}
