//! Lazy aggregation pipeline over transactions.
//!
//! The contract callers depend on: single pass over the input, memory
//! proportional to the number of categories, deterministic output order.

use ledgerflow_domain::{Category, Transaction};

/// A fresh, independently-consumable pass over the transactions in input
/// order. Each call yields a new iterator; once advanced, prior positions
/// are not revisitable.
pub fn iter_transactions(transactions: &[Transaction]) -> impl Iterator<Item = &Transaction> {
    transactions.iter()
}

/// Predicate matching transactions in one category.
pub fn by_category(cat_id: impl Into<String>) -> impl Fn(&Transaction) -> bool {
    let cat_id = cat_id.into();
    move |t| t.cat_id == cat_id
}

/// Predicate matching transactions whose absolute amount lies in
/// `[min, max]`.
pub fn by_amount_range(min: i64, max: i64) -> impl Fn(&Transaction) -> bool {
    move |t| {
        let magnitude = t.amount.abs();
        magnitude >= min && magnitude <= max
    }
}

/// Lazily computes the `k` categories with the largest total expense.
///
/// No work happens until the first poll; the input is then consumed in a
/// single pass, accumulating `abs(amount)` per expense-bearing category.
/// Yields `(category_name, total)` pairs in strictly descending total
/// order, ties broken by the category's position in `categories`.
/// Categories without expenses are never yielded, so fewer than `k` items
/// may come out.
pub fn top_categories<'a, I>(
    transactions: I,
    categories: &'a [Category],
    k: usize,
) -> TopCategories<'a, I>
where
    I: Iterator<Item = &'a Transaction>,
{
    TopCategories {
        source: Some(transactions),
        categories,
        k,
        ranked: Vec::new(),
        next_index: 0,
    }
}

pub struct TopCategories<'a, I> {
    source: Option<I>,
    categories: &'a [Category],
    k: usize,
    ranked: Vec<(String, i64)>,
    next_index: usize,
}

impl<'a, I> TopCategories<'a, I>
where
    I: Iterator<Item = &'a Transaction>,
{
    /// Drains the input and ranks the totals. Runs once, on first poll.
    fn accumulate(&mut self, source: I) {
        // One slot per category, keyed by position for the tie-break.
        let index: std::collections::HashMap<&str, usize> = self
            .categories
            .iter()
            .enumerate()
            .map(|(pos, c)| (c.id.as_str(), pos))
            .collect();
        let mut totals = vec![0i64; self.categories.len()];
        for transaction in source {
            if !transaction.is_expense() {
                continue;
            }
            if let Some(&pos) = index.get(transaction.cat_id.as_str()) {
                totals[pos] += transaction.amount.abs();
            }
        }

        let mut ranked: Vec<(usize, i64)> = totals
            .into_iter()
            .enumerate()
            .filter(|(_, total)| *total > 0)
            .collect();
        // Descending by total; positions are unique, so the comparison is
        // total-then-position and the sort is effectively stable.
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        ranked.truncate(self.k);

        self.ranked = ranked
            .into_iter()
            .map(|(pos, total)| (self.categories[pos].name.clone(), total))
            .collect();
    }
}

impl<'a, I> Iterator for TopCategories<'a, I>
where
    I: Iterator<Item = &'a Transaction>,
{
    type Item = (String, i64);

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(source) = self.source.take() {
            self.accumulate(source);
        }
        let item = self.ranked.get(self.next_index).cloned();
        self.next_index += 1;
        item
    }
}
