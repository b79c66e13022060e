//! Domain types representing spending budgets.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::common::*;

/// A spending ceiling for one category. `limit` is non-negative, in the
/// same minor currency units as transaction amounts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Budget {
    pub id: String,
    pub cat_id: String,
    pub limit: i64,
    #[serde(default)]
    pub period: BudgetPeriod,
}

impl Budget {
    pub fn new(id: impl Into<String>, cat_id: impl Into<String>, limit: i64) -> Self {
        Self {
            id: id.into(),
            cat_id: cat_id.into(),
            limit,
            period: BudgetPeriod::default(),
        }
    }
}

impl Identifiable for Budget {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Budget cadence. Monthly is currently the only granularity.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum BudgetPeriod {
    #[default]
    Monthly,
}

impl fmt::Display for BudgetPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BudgetPeriod::Monthly => f.write_str("Monthly"),
        }
    }
}
