//! Initial-state loading from JSON seed files.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use ledgerflow_domain::{Account, Budget, Category, State, Transaction};

/// Error type that captures seed-loading failures.
#[derive(Debug, Error)]
pub enum SeedError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Invalid reference: {0}")]
    InvalidRef(String),
}

#[derive(Debug, Deserialize)]
struct SeedFile {
    accounts: Vec<Account>,
    categories: Vec<Category>,
    #[serde(default)]
    transactions: Vec<Transaction>,
    #[serde(default)]
    budgets: Vec<Budget>,
}

/// Reads and validates a JSON seed file into the initial [`State`].
pub fn load_seed(path: impl AsRef<Path>) -> Result<State, SeedError> {
    let raw = fs::read_to_string(path.as_ref())?;
    let state = parse_seed(&raw)?;
    tracing::info!(
        accounts = state.accounts().len(),
        transactions = state.transactions().len(),
        "seed loaded"
    );
    Ok(state)
}

/// Parses and validates seed JSON.
pub fn parse_seed(raw: &str) -> Result<State, SeedError> {
    let seed: SeedFile = serde_json::from_str(raw)?;
    validate_references(&seed)?;
    Ok(State::new(
        seed.accounts,
        seed.categories,
        seed.transactions,
        seed.budgets,
    ))
}

fn validate_references(seed: &SeedFile) -> Result<(), SeedError> {
    let mut account_ids: HashSet<&str> = HashSet::new();
    for account in &seed.accounts {
        if !account_ids.insert(account.id.as_str()) {
            return Err(SeedError::InvalidRef(format!(
                "duplicate account id {}",
                account.id
            )));
        }
    }
    let mut category_ids: HashSet<&str> = HashSet::new();
    for category in &seed.categories {
        if !category_ids.insert(category.id.as_str()) {
            return Err(SeedError::InvalidRef(format!(
                "duplicate category id {}",
                category.id
            )));
        }
    }

    for category in &seed.categories {
        if let Some(parent) = &category.parent_id {
            if !category_ids.contains(parent.as_str()) {
                return Err(SeedError::InvalidRef(format!(
                    "category {} has unknown parent {parent}",
                    category.id
                )));
            }
        }
    }
    for transaction in &seed.transactions {
        if !account_ids.contains(transaction.account_id.as_str()) {
            return Err(SeedError::InvalidRef(format!(
                "transaction {} references unknown account {}",
                transaction.id, transaction.account_id
            )));
        }
        if !category_ids.contains(transaction.cat_id.as_str()) {
            return Err(SeedError::InvalidRef(format!(
                "transaction {} references unknown category {}",
                transaction.id, transaction.cat_id
            )));
        }
    }
    for budget in &seed.budgets {
        if !category_ids.contains(budget.cat_id.as_str()) {
            return Err(SeedError::InvalidRef(format!(
                "budget {} references unknown category {}",
                budget.id, budget.cat_id
            )));
        }
        if budget.limit < 0 {
            return Err(SeedError::InvalidRef(format!(
                "budget {} has negative limit {}",
                budget.id, budget.limit
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    const SEED: &str = r#"{
        "accounts": [
            {"id": "a1", "name": "Main", "balance": 1000, "currency": "EUR"}
        ],
        "categories": [
            {"id": "food", "name": "Food"},
            {"id": "snacks", "name": "Snacks", "parent_id": "food"}
        ],
        "transactions": [
            {"id": "t1", "account_id": "a1", "cat_id": "food",
             "amount": -200, "ts": "2023-01-05", "note": "groceries"}
        ],
        "budgets": [
            {"id": "b1", "cat_id": "food", "limit": 300}
        ]
    }"#;

    #[test]
    fn parses_a_complete_seed() {
        let state = parse_seed(SEED).expect("parse");
        assert_eq!(state.accounts().len(), 1);
        assert_eq!(state.categories().len(), 2);
        assert_eq!(state.transactions().len(), 1);
        assert_eq!(state.budgets().len(), 1);
        assert!(state.alerts().is_empty());
    }

    #[test]
    fn loads_from_a_file() {
        let mut file = tempfile::NamedTempFile::new().expect("tempfile");
        file.write_all(SEED.as_bytes()).expect("write");
        let state = load_seed(file.path()).expect("load");
        assert_eq!(state.account("a1").map(|a| a.balance), Some(1000));
    }

    #[test]
    fn rejects_dangling_references() {
        let bad = SEED.replace("\"cat_id\": \"food\"", "\"cat_id\": \"toys\"");
        assert!(matches!(parse_seed(&bad), Err(SeedError::InvalidRef(_))));
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(matches!(parse_seed("not json"), Err(SeedError::Serde(_))));
    }

    #[test]
    fn rejects_duplicate_ids() {
        let bad = SEED.replace(
            "{\"id\": \"snacks\", \"name\": \"Snacks\", \"parent_id\": \"food\"}",
            "{\"id\": \"food\", \"name\": \"Food Again\"}",
        );
        assert!(matches!(parse_seed(&bad), Err(SeedError::InvalidRef(_))));
    }

    #[test]
    fn rejects_negative_budget_limits() {
        let bad = SEED.replace("\"limit\": 300", "\"limit\": -1");
        assert!(matches!(parse_seed(&bad), Err(SeedError::InvalidRef(_))));
    }
}
