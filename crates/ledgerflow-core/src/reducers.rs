//! Pure state reducers for direct (non-bus) transitions.
//!
//! These cover the hosting layer's administrative edits: each takes the
//! current state plus an input and returns a new state, sharing every
//! untouched sequence. Unknown ids are programmer-facing failures and
//! terminate the call.

use ledgerflow_domain::{State, Transaction, TransactionPatch};

use crate::error::CoreError;

/// Sets an account's balance to `new_balance`.
pub fn update_account_balance(
    state: &State,
    account_id: &str,
    new_balance: i64,
) -> Result<State, CoreError> {
    if state.account(account_id).is_none() {
        return Err(CoreError::AccountNotFound(account_id.to_string()));
    }
    let accounts = state
        .accounts()
        .iter()
        .map(|a| {
            if a.id == account_id {
                a.with_balance(new_balance)
            } else {
                a.clone()
            }
        })
        .collect();
    Ok(state.with_accounts(accounts))
}

/// Appends a transaction to the ledger. Balances are not touched; that is
/// the bus handler's job.
pub fn create_transaction(state: &State, transaction: Transaction) -> State {
    let mut transactions = state.transactions().to_vec();
    transactions.push(transaction);
    state.with_transactions(transactions)
}

/// Replaces the identified transaction with a patched copy.
pub fn update_transaction(
    state: &State,
    transaction_id: &str,
    patch: &TransactionPatch,
) -> Result<State, CoreError> {
    if state.transaction(transaction_id).is_none() {
        return Err(CoreError::TransactionNotFound(transaction_id.to_string()));
    }
    let transactions = state
        .transactions()
        .iter()
        .map(|t| {
            if t.id == transaction_id {
                t.apply(patch)
            } else {
                t.clone()
            }
        })
        .collect();
    Ok(state.with_transactions(transactions))
}

/// Drops the identified transaction from the ledger.
pub fn delete_transaction(state: &State, transaction_id: &str) -> Result<State, CoreError> {
    if state.transaction(transaction_id).is_none() {
        return Err(CoreError::TransactionNotFound(transaction_id.to_string()));
    }
    let transactions = state
        .transactions()
        .iter()
        .filter(|t| t.id != transaction_id)
        .cloned()
        .collect();
    Ok(state.with_transactions(transactions))
}
