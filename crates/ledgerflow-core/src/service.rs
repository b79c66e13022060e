//! Stateless report and budget services.
//!
//! Services compose the validation and aggregation primitives into
//! reports. They hold no state of their own beyond optional pluggable
//! functions supplied at construction, which exist for extension; the
//! defaults are complete on their own.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::task::JoinSet;

use ledgerflow_domain::{Budget, Transaction};

use crate::error::CoreError;
use crate::validation::{category_spend, check_budget};

/// Extension predicate: transactions must pass every registered validator
/// to count toward budget spend.
pub type TransactionValidator = Box<dyn Fn(&Transaction) -> bool + Send + Sync>;

/// Extension hook for the per-month aggregation. The default sums
/// `abs(amount)` over the month's expenses.
pub type MonthAggregator = Arc<dyn Fn(&[Transaction], &str) -> i64 + Send + Sync>;

/// One line of the monthly budget report.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct BudgetReportLine {
    pub limit: i64,
    pub spent: i64,
    pub status: BudgetStanding,
}

/// Whether a budget is within its limit.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum BudgetStanding {
    Ok,
    Over,
}

impl fmt::Display for BudgetStanding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BudgetStanding::Ok => f.write_str("OK"),
            BudgetStanding::Over => f.write_str("OVER"),
        }
    }
}

/// Aggregated expense activity for a single category.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CategoryReport {
    pub cat_id: String,
    pub total_expense: i64,
    pub transaction_count: usize,
}

#[derive(Default)]
pub struct BudgetService {
    validators: Vec<TransactionValidator>,
}

impl BudgetService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a validator predicate applied before spend accumulation.
    pub fn with_validator<V>(mut self, validator: V) -> Self
    where
        V: Fn(&Transaction) -> bool + Send + Sync + 'static,
    {
        self.validators.push(Box::new(validator));
        self
    }

    /// Status per budget: spend over the supplied transactions against the
    /// limit, `Over` iff `spent > limit`.
    pub fn monthly_report(
        &self,
        budgets: &[Budget],
        transactions: &[Transaction],
    ) -> BTreeMap<String, BudgetReportLine> {
        let admitted: Vec<Transaction> = transactions
            .iter()
            .filter(|t| self.validators.iter().all(|v| v(t)))
            .cloned()
            .collect();
        budgets
            .iter()
            .map(|budget| {
                let line = match check_budget(budget, &admitted) {
                    Ok(()) => BudgetReportLine {
                        limit: budget.limit,
                        spent: category_spend(&budget.cat_id, &admitted),
                        status: BudgetStanding::Ok,
                    },
                    Err(breach) => BudgetReportLine {
                        limit: breach.limit,
                        spent: breach.spent,
                        status: BudgetStanding::Over,
                    },
                };
                (budget.id.clone(), line)
            })
            .collect()
    }
}

pub struct ReportService {
    month_aggregator: MonthAggregator,
}

impl Default for ReportService {
    fn default() -> Self {
        Self {
            month_aggregator: Arc::new(|transactions, month| month_expense(transactions, month)),
        }
    }
}

impl ReportService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the per-month aggregation function.
    pub fn with_month_aggregator<A>(aggregator: A) -> Self
    where
        A: Fn(&[Transaction], &str) -> i64 + Send + Sync + 'static,
    {
        Self {
            month_aggregator: Arc::new(aggregator),
        }
    }

    /// Expense totals and transaction count for one category.
    pub fn category_report(&self, cat_id: &str, transactions: &[Transaction]) -> CategoryReport {
        let expenses: Vec<&Transaction> = transactions
            .iter()
            .filter(|t| t.cat_id == cat_id && t.is_expense())
            .collect();
        CategoryReport {
            cat_id: cat_id.to_string(),
            total_expense: expenses.iter().map(|t| t.amount.abs()).sum(),
            transaction_count: expenses.len(),
        }
    }

    /// Computes each requested month's expense total on its own task and
    /// joins the results. Every requested month is present in the output,
    /// absent months with 0; the mapping is identical regardless of task
    /// completion order. A failed task fails the whole operation.
    pub async fn expenses_by_month(
        &self,
        transactions: Arc<Vec<Transaction>>,
        months: &[String],
    ) -> Result<BTreeMap<String, i64>, CoreError> {
        let mut tasks = JoinSet::new();
        for month in months {
            let transactions = Arc::clone(&transactions);
            let aggregate = Arc::clone(&self.month_aggregator);
            let month = month.clone();
            tasks.spawn(async move {
                let total = aggregate(&transactions, &month);
                (month, total)
            });
        }

        let mut totals = BTreeMap::new();
        while let Some(joined) = tasks.join_next().await {
            let (month, total) = joined.map_err(|err| CoreError::Worker(err.to_string()))?;
            totals.insert(month, total);
        }
        Ok(totals)
    }

    /// [`Self::expenses_by_month`] with a caller-driven deadline. On
    /// timeout the in-flight tasks are aborted (best effort) and the
    /// caller gets [`CoreError::Timeout`] rather than a partial mapping.
    pub async fn expenses_by_month_within(
        &self,
        transactions: Arc<Vec<Transaction>>,
        months: &[String],
        deadline: Duration,
    ) -> Result<BTreeMap<String, i64>, CoreError> {
        match tokio::time::timeout(deadline, self.expenses_by_month(transactions, months)).await {
            Ok(result) => result,
            Err(_elapsed) => {
                tracing::warn!(months = months.len(), ?deadline, "month aggregation timed out");
                Err(CoreError::Timeout(deadline.as_millis() as u64))
            }
        }
    }
}

/// Sum of `abs(amount)` over the month's expense transactions, matching on
/// the `YYYY-MM` timestamp prefix.
pub fn month_expense(transactions: &[Transaction], month: &str) -> i64 {
    transactions
        .iter()
        .filter(|t| t.is_expense() && t.ts.starts_with(month))
        .map(|t| t.amount.abs())
        .sum()
}
