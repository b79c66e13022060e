//! Ordered publish/dispatch of state-transition events.
//!
//! A handler is a pure function `(Event, State) -> State`. Publishing
//! folds the handlers registered for the event's name in subscription
//! order, each handler's output feeding the next handler's input. The
//! ordering is a contract: mutating handlers run before `budget_alerts`
//! so the alert pass reads post-update balances and transactions.
//!
//! Delivery is at-least-once apply: re-publishing the same event applies
//! its delta again. Handlers never fail for structurally valid events;
//! logical problems (a budget over its limit) surface in `state.alerts`,
//! not as errors.

use std::collections::HashMap;

use ledgerflow_domain::{Event, EventKind, EventName, State};

use crate::validation::check_budget;

pub type Handler = Box<dyn Fn(&Event, State) -> State + Send + Sync>;

#[derive(Default)]
pub struct EventBus {
    handlers: HashMap<EventName, Vec<Handler>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// The standard wiring: every mutating event runs its state handler
    /// first and the budget alert pass second.
    pub fn with_defaults() -> Self {
        let mut bus = Self::new();
        bus.subscribe(EventName::TransactionAdded, apply_transaction);
        bus.subscribe(EventName::TransactionAdded, budget_alerts);
        bus.subscribe(EventName::TransactionRemoved, remove_transaction);
        bus.subscribe(EventName::TransactionRemoved, budget_alerts);
        bus.subscribe(EventName::BalanceAdjusted, adjust_balance);
        bus.subscribe(EventName::BalanceAdjusted, budget_alerts);
        bus
    }

    /// Registers `handler` under `name`, after any handler already
    /// registered for it.
    pub fn subscribe<H>(&mut self, name: EventName, handler: H)
    where
        H: Fn(&Event, State) -> State + Send + Sync + 'static,
    {
        self.handlers.entry(name).or_default().push(Box::new(handler));
    }

    /// Folds the handlers registered for the event's name over `state`.
    /// Unregistered names are a no-op and return the state unchanged.
    pub fn publish(&self, event: &Event, state: State) -> State {
        let Some(chain) = self.handlers.get(&event.name()) else {
            tracing::debug!(event = event.name().as_str(), "no handlers registered");
            return state;
        };
        tracing::debug!(
            event = event.name().as_str(),
            id = %event.id,
            handlers = chain.len(),
            "publishing"
        );
        chain
            .iter()
            .fold(state, |current, handler| handler(event, current))
    }
}

/// On `TransactionAdded`: appends the transaction and applies its signed
/// amount to the referenced account's balance. A transaction against an
/// unknown account still lands in the ledger; validation happens before
/// events are published.
pub fn apply_transaction(event: &Event, state: State) -> State {
    let EventKind::TransactionAdded { transaction } = &event.kind else {
        return state;
    };
    let accounts = state
        .accounts()
        .iter()
        .map(|a| {
            if a.id == transaction.account_id {
                a.with_balance(a.balance + transaction.amount)
            } else {
                a.clone()
            }
        })
        .collect();
    let mut transactions = state.transactions().to_vec();
    transactions.push(transaction.clone());
    state.with_accounts(accounts).with_transactions(transactions)
}

/// On `TransactionRemoved`: drops the transaction and reverses its signed
/// amount on the referenced account's balance.
pub fn remove_transaction(event: &Event, state: State) -> State {
    let EventKind::TransactionRemoved { transaction_id } = &event.kind else {
        return state;
    };
    let Some(removed) = state.transaction(transaction_id).cloned() else {
        return state;
    };
    let accounts = state
        .accounts()
        .iter()
        .map(|a| {
            if a.id == removed.account_id {
                a.with_balance(a.balance - removed.amount)
            } else {
                a.clone()
            }
        })
        .collect();
    let transactions = state
        .transactions()
        .iter()
        .filter(|t| t.id != *transaction_id)
        .cloned()
        .collect();
    state.with_accounts(accounts).with_transactions(transactions)
}

/// On `BalanceAdjusted`: sets the account's balance to the given value.
pub fn adjust_balance(event: &Event, state: State) -> State {
    let EventKind::BalanceAdjusted {
        account_id,
        balance,
    } = &event.kind
    else {
        return state;
    };
    let accounts = state
        .accounts()
        .iter()
        .map(|a| {
            if a.id == *account_id {
                a.with_balance(*balance)
            } else {
                a.clone()
            }
        })
        .collect();
    state.with_accounts(accounts)
}

/// Re-evaluates every budget from scratch against the current
/// transactions and appends one alert line per budget over its limit.
/// Runs after the mutating handler on every event name, so it always
/// reads post-update state.
pub fn budget_alerts(_event: &Event, state: State) -> State {
    let alerts: Vec<String> = state
        .budgets()
        .iter()
        .filter_map(|budget| check_budget(budget, state.transactions()).err())
        .map(|breach| {
            tracing::warn!(
                budget = %breach.budget_id,
                spent = breach.spent,
                limit = breach.limit,
                "budget over limit"
            );
            breach.to_string()
        })
        .collect();
    state.push_alerts(alerts)
}
