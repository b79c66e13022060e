use thiserror::Error;

/// Programmer-facing engine failures. Validation and budget breaches are
/// data, not errors; they live in [`crate::validation`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("Account not found: {0}")]
    AccountNotFound(String),
    #[error("Category not found: {0}")]
    CategoryNotFound(String),
    #[error("Transaction not found: {0}")]
    TransactionNotFound(String),
    #[error("Category parent chain contains a cycle at: {0}")]
    CategoryCycle(String),
    #[error("Monthly aggregation timed out after {0}ms")]
    Timeout(u64),
    #[error("Aggregation worker failed: {0}")]
    Worker(String),
}
