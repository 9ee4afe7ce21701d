use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::parser::OrderLineItem;

/// Distinct customers for one location (state or city).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationCount {
    pub label: String,
    pub customers: usize,
}

/// Distinct customers per customer state, most customers first.
pub fn summarize_by_state(rows: &[OrderLineItem]) -> Vec<LocationCount> {
    distinct_customers_by(rows, |item| item.customer_state.as_deref())
}

/// Distinct customers per customer city, most customers first.
pub fn summarize_by_city(rows: &[OrderLineItem]) -> Vec<LocationCount> {
    distinct_customers_by(rows, |item| item.customer_city.as_deref())
}

/// Rows without a key are left out. Ties are ordered by label.
fn distinct_customers_by<'a>(
    rows: &'a [OrderLineItem],
    key: impl Fn(&'a OrderLineItem) -> Option<&'a str>,
) -> Vec<LocationCount> {
    let mut groups: HashMap<&str, HashSet<&str>> = HashMap::new();
    for item in rows {
        if let Some(k) = key(item) {
            groups.entry(k).or_default().insert(item.customer_id.as_str());
        }
    }

    let mut summary: Vec<LocationCount> = groups
        .into_iter()
        .map(|(label, customers)| LocationCount {
            label: label.to_string(),
            customers: customers.len(),
        })
        .collect();
    summary.sort_by(|a, b| b.customers.cmp(&a.customers).then_with(|| a.label.cmp(&b.label)));
    summary
}
