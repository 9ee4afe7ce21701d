use std::collections::HashMap;

use serde::Serialize;

use crate::parser::OrderLineItem;

pub const DEFAULT_CATEGORY_LIMIT: usize = 10;

/// Line items sold for one product category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryCount {
    pub category: String,
    pub total_sold: usize,
}

/// The `n` best-selling categories, most items first.
pub fn top_categories(rows: &[OrderLineItem], n: usize) -> Vec<CategoryCount> {
    let mut counts = count_by_category(rows);
    counts.sort_by(|a, b| {
        b.total_sold
            .cmp(&a.total_sold)
            .then_with(|| a.category.cmp(&b.category))
    });
    counts.truncate(n);
    counts
}

/// The `n` worst-selling categories, fewest items first.
///
/// Ties are broken in the exact reverse of `top_categories`, so with `n` covering
/// every category the two lists mirror each other.
pub fn bottom_categories(rows: &[OrderLineItem], n: usize) -> Vec<CategoryCount> {
    let mut counts = count_by_category(rows);
    counts.sort_by(|a, b| {
        a.total_sold
            .cmp(&b.total_sold)
            .then_with(|| b.category.cmp(&a.category))
    });
    counts.truncate(n);
    counts
}

/// Line items per category; rows without a category are left out.
fn count_by_category(rows: &[OrderLineItem]) -> Vec<CategoryCount> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for item in rows {
        if let Some(category) = item.product_category_name.as_deref() {
            *counts.entry(category).or_insert(0) += 1;
        }
    }
    counts
        .into_iter()
        .map(|(category, total_sold)| CategoryCount {
            category: category.to_string(),
            total_sold,
        })
        .collect()
}
