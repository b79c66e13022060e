//! Domain events driving state transitions.
//!
//! Events are tagged variants rather than name strings plus payload maps:
//! the payload travels inside [`EventKind`], and [`EventName`] is the
//! hashable discriminant the bus keys its handler lists on.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::transaction::Transaction;

/// A discrete state-transition intent published on the event bus.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Event {
    pub id: String,
    /// ISO-8601 timestamp of emission.
    pub ts: String,
    pub kind: EventKind,
}

impl Event {
    /// Builds an event with a fresh id and the current wall-clock timestamp.
    pub fn new(kind: EventKind) -> Self {
        Self {
            id: format!("evt_{}", Uuid::new_v4().simple()),
            ts: chrono::Utc::now().to_rfc3339(),
            kind,
        }
    }

    /// Builds an event with caller-chosen identity, for replays and tests.
    pub fn with_id(id: impl Into<String>, ts: impl Into<String>, kind: EventKind) -> Self {
        Self {
            id: id.into(),
            ts: ts.into(),
            kind,
        }
    }

    pub fn name(&self) -> EventName {
        self.kind.name()
    }
}

/// Event payloads, one variant per event name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum EventKind {
    TransactionAdded { transaction: Transaction },
    TransactionRemoved { transaction_id: String },
    BalanceAdjusted { account_id: String, balance: i64 },
}

impl EventKind {
    pub fn name(&self) -> EventName {
        match self {
            EventKind::TransactionAdded { .. } => EventName::TransactionAdded,
            EventKind::TransactionRemoved { .. } => EventName::TransactionRemoved,
            EventKind::BalanceAdjusted { .. } => EventName::BalanceAdjusted,
        }
    }
}

/// Discriminant used as the bus subscription key.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum EventName {
    TransactionAdded,
    TransactionRemoved,
    BalanceAdjusted,
}

impl EventName {
    pub fn as_str(self) -> &'static str {
        match self {
            EventName::TransactionAdded => "TRANSACTION_ADDED",
            EventName::TransactionRemoved => "TRANSACTION_REMOVED",
            EventName::BalanceAdjusted => "BALANCE_ADJUSTED",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_events_carry_fresh_identity() {
        let a = Event::new(EventKind::TransactionRemoved {
            transaction_id: "t1".into(),
        });
        let b = Event::new(EventKind::TransactionRemoved {
            transaction_id: "t1".into(),
        });

        assert!(a.id.starts_with("evt_"));
        assert_ne!(a.id, b.id);
        assert_eq!(a.name(), EventName::TransactionRemoved);
        assert_eq!(a.name().as_str(), "TRANSACTION_REMOVED");
    }
}
