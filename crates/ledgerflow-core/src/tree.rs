//! Recursive operations over the category forest.

use std::collections::HashSet;

use ledgerflow_domain::{find_by_id, Category, Transaction};

use crate::error::CoreError;
use crate::validation::category_spend;

/// Pre-order traversal of the subtree rooted at `root_id`: the root first,
/// then each child subtree, siblings kept in the input collection's order.
pub fn flatten(categories: &[Category], root_id: &str) -> Result<Vec<Category>, CoreError> {
    if find_by_id(categories, root_id).is_none() {
        return Err(CoreError::CategoryNotFound(root_id.to_string()));
    }
    let mut visited = HashSet::new();
    let mut out = Vec::new();
    collect(categories, root_id, &mut visited, &mut out)?;
    Ok(out)
}

fn collect(
    categories: &[Category],
    node_id: &str,
    visited: &mut HashSet<String>,
    out: &mut Vec<Category>,
) -> Result<(), CoreError> {
    if !visited.insert(node_id.to_string()) {
        return Err(CoreError::CategoryCycle(node_id.to_string()));
    }
    if let Some(node) = find_by_id(categories, node_id) {
        out.push(node.clone());
    }
    for child in children(categories, node_id) {
        collect(categories, &child.id, visited, out)?;
    }
    Ok(())
}

/// Total expense under the subtree rooted at `root_id`, defined recursively
/// to mirror the hierarchy: direct expenses at the node plus the sum over
/// each child subtree. Never negative; 0 for an expense-free subtree.
pub fn sum_expenses(
    categories: &[Category],
    transactions: &[Transaction],
    root_id: &str,
) -> Result<i64, CoreError> {
    if find_by_id(categories, root_id).is_none() {
        return Err(CoreError::CategoryNotFound(root_id.to_string()));
    }
    let mut visited = HashSet::new();
    sum_node(categories, transactions, root_id, &mut visited)
}

fn sum_node(
    categories: &[Category],
    transactions: &[Transaction],
    node_id: &str,
    visited: &mut HashSet<String>,
) -> Result<i64, CoreError> {
    if !visited.insert(node_id.to_string()) {
        return Err(CoreError::CategoryCycle(node_id.to_string()));
    }
    let mut total = category_spend(node_id, transactions);
    for child in children(categories, node_id) {
        total += sum_node(categories, transactions, &child.id, visited)?;
    }
    Ok(total)
}

fn children<'a>(categories: &'a [Category], parent_id: &'a str) -> impl Iterator<Item = &'a Category> {
    categories
        .iter()
        .filter(move |c| c.parent_id.as_deref() == Some(parent_id))
}
