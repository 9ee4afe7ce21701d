use std::collections::HashSet;
use std::fmt::Write as _;

use chrono::NaiveDateTime;
use crate::dataset::Dataset;
use crate::format::format_integer;
use crate::parser::OrderLineItem;

/// What the loaded dataset covers, before any date filter.
#[derive(Debug, Clone)]
pub struct DatasetInfo {
    pub rows_read: usize,
    pub line_items: usize,
    pub orders: usize,
    pub customers: usize,
    pub categories: usize,
    pub states: usize,
    pub cities: usize,
    pub first_purchase: Option<NaiveDateTime>,
    pub last_purchase: Option<NaiveDateTime>,
    pub skipped_rows: usize,
    pub columns: Vec<String>,
}

pub fn dataset_info(dataset: &Dataset) -> DatasetInfo {
    let items = dataset.items();
    let range = dataset.available_range();

    DatasetInfo {
        rows_read: dataset.rows_read(),
        line_items: items.len(),
        orders: distinct(items, |i| Some(i.order_id.as_str())),
        customers: distinct(items, |i| Some(i.customer_id.as_str())),
        categories: distinct(items, |i| i.product_category_name.as_deref()),
        states: distinct(items, |i| i.customer_state.as_deref()),
        cities: distinct(items, |i| i.customer_city.as_deref()),
        first_purchase: range.map(|r| r.start),
        last_purchase: range.map(|r| r.end),
        skipped_rows: dataset.warnings().len(),
        columns: dataset.columns().to_vec(),
    }
}

fn distinct<'a>(
    items: &'a [OrderLineItem],
    key: impl Fn(&'a OrderLineItem) -> Option<&'a str>,
) -> usize {
    items.iter().filter_map(key).collect::<HashSet<_>>().len()
}

pub fn render_dataset_info(info: &DatasetInfo) -> String {
    let mut out = String::new();
    let fmt_ts = |ts: Option<NaiveDateTime>| {
        ts.map(|t| t.format("%d/%m/%Y %H:%M:%S").to_string())
            .unwrap_or_else(|| "-".to_string())
    };
    let _ = writeln!(out, "Rows read       {}", format_integer(info.rows_read));
    let _ = writeln!(out, "Line items      {}", format_integer(info.line_items));
    let _ = writeln!(out, "Orders          {}", format_integer(info.orders));
    let _ = writeln!(out, "Customers       {}", format_integer(info.customers));
    let _ = writeln!(out, "Categories      {}", format_integer(info.categories));
    let _ = writeln!(out, "States          {}", format_integer(info.states));
    let _ = writeln!(out, "Cities          {}", format_integer(info.cities));
    let _ = writeln!(out, "First purchase  {}", fmt_ts(info.first_purchase));
    let _ = writeln!(out, "Last purchase   {}", fmt_ts(info.last_purchase));
    if info.skipped_rows > 0 {
        let _ = writeln!(out, "Skipped rows    {}", format_integer(info.skipped_rows));
    }
    if !info.columns.is_empty() {
        let _ = writeln!(out, "Columns         {}", info.columns.join(", "));
    }
    out
}
