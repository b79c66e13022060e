//! Candidate validation and budget checks.
//!
//! Both operations return their findings as values. A failed validation or
//! an exceeded budget never aborts a pipeline; callers render the payload
//! inline or append it as an alert.

use thiserror::Error;

use ledgerflow_domain::{find_by_id, Account, Budget, Category, Transaction};

/// Why a candidate transaction was rejected.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("unknown account: {0}")]
    UnknownAccount(String),
    #[error("unknown category: {0}")]
    UnknownCategory(String),
    #[error("invalid amount: {0}")]
    InvalidAmount(i64),
}

/// A budget whose category spend exceeds its limit.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("budget {budget_id} over limit for {cat_id}: spent {spent} of {limit}")]
pub struct BudgetBreach {
    pub budget_id: String,
    pub cat_id: String,
    pub limit: i64,
    pub spent: i64,
}

/// Checks a candidate transaction against the known accounts and
/// categories. The amount must be nonzero. On success the candidate is
/// passed through unchanged.
pub fn validate_transaction(
    candidate: Transaction,
    accounts: &[Account],
    categories: &[Category],
) -> Result<Transaction, ValidationError> {
    if find_by_id(accounts, &candidate.account_id).is_none() {
        return Err(ValidationError::UnknownAccount(candidate.account_id));
    }
    if find_by_id(categories, &candidate.cat_id).is_none() {
        return Err(ValidationError::UnknownCategory(candidate.cat_id));
    }
    if candidate.amount == 0 {
        return Err(ValidationError::InvalidAmount(candidate.amount));
    }
    Ok(candidate)
}

/// Sums the budget's category spend over the supplied transactions and
/// reports a breach when it exceeds the limit. Callers pre-filter the
/// slice to the period they care about.
pub fn check_budget(budget: &Budget, transactions: &[Transaction]) -> Result<(), BudgetBreach> {
    let spent = category_spend(&budget.cat_id, transactions);
    if spent > budget.limit {
        return Err(BudgetBreach {
            budget_id: budget.id.clone(),
            cat_id: budget.cat_id.clone(),
            limit: budget.limit,
            spent,
        });
    }
    Ok(())
}

/// Sum of `abs(amount)` over the category's expense transactions.
pub fn category_spend(cat_id: &str, transactions: &[Transaction]) -> i64 {
    transactions
        .iter()
        .filter(|t| t.cat_id == cat_id && t.is_expense())
        .map(|t| t.amount.abs())
        .sum()
}
