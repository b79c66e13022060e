//! Caller-identity scoping of state.
//!
//! The credential and role side lives outside this crate; it hands the
//! engine an optional set of allowed account ids. `None` means the caller
//! is unrestricted.

use std::collections::HashSet;

use ledgerflow_domain::State;

/// Narrows accounts and transactions to the allowed account set before
/// they reach the derivation layer. Categories, budgets, and alerts are
/// shared unchanged.
pub fn restrict_to_accounts(state: &State, allowed: Option<&HashSet<String>>) -> State {
    let Some(allowed) = allowed else {
        return state.clone();
    };
    let accounts = state
        .accounts()
        .iter()
        .filter(|a| allowed.contains(&a.id))
        .cloned()
        .collect();
    let transactions = state
        .transactions()
        .iter()
        .filter(|t| allowed.contains(&t.account_id))
        .cloned()
        .collect();
    state.with_accounts(accounts).with_transactions(transactions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ledgerflow_domain::{Account, Budget, Category, Transaction};

    fn two_user_state() -> State {
        State::new(
            vec![
                Account::new("a1", "Alice", 1000, "EUR"),
                Account::new("a2", "Bob", 500, "EUR"),
            ],
            vec![Category::new("food", "Food")],
            vec![
                Transaction::new("t1", "a1", "food", -200, "2023-01-03", ""),
                Transaction::new("t2", "a2", "food", -50, "2023-01-04", ""),
            ],
            vec![Budget::new("b1", "food", 300)],
        )
    }

    #[test]
    fn none_means_unrestricted() {
        let state = two_user_state();
        let scoped = restrict_to_accounts(&state, None);
        assert_eq!(scoped, state);
    }

    #[test]
    fn some_narrows_accounts_and_transactions() {
        let state = two_user_state();
        let allowed: HashSet<String> = ["a1".to_string()].into();
        let scoped = restrict_to_accounts(&state, Some(&allowed));

        assert_eq!(scoped.accounts().len(), 1);
        assert_eq!(scoped.accounts()[0].id, "a1");
        assert_eq!(scoped.transactions().len(), 1);
        assert_eq!(scoped.transactions()[0].id, "t1");
        // Shared collections stay visible.
        assert_eq!(scoped.categories().len(), 1);
        assert_eq!(scoped.budgets().len(), 1);
    }

    #[test]
    fn empty_set_hides_everything_account_bound() {
        let state = two_user_state();
        let allowed = HashSet::new();
        let scoped = restrict_to_accounts(&state, Some(&allowed));
        assert!(scoped.accounts().is_empty());
        assert!(scoped.transactions().is_empty());
    }
}
