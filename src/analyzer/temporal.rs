use std::collections::{BTreeMap, HashSet};

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::parser::OrderLineItem;

/// Orders, revenue and customers for one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyOrderSummary {
    /// Last day of the month, the bucket label.
    pub month_end: NaiveDate,
    pub order_count: usize,
    pub revenue: f64,
    pub customer_count: usize,
}

impl MonthlyOrderSummary {
    fn empty(month_end: NaiveDate) -> Self {
        MonthlyOrderSummary {
            month_end,
            order_count: 0,
            revenue: 0.0,
            customer_count: 0,
        }
    }
}

/// Last calendar day of the month containing `date`.
pub fn month_end(date: NaiveDate) -> NaiveDate {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|first_of_next| first_of_next.pred_opt())
        .unwrap_or(date)
}

#[derive(Default)]
struct MonthBucket<'a> {
    orders: HashSet<&'a str>,
    customers: HashSet<&'a str>,
    revenue: f64,
}

/// Monthly resampling of line items, chronological.
///
/// Per month: distinct orders, summed price, distinct customers.
/// Months without any line item are not emitted.
pub fn monthly_order_summary(rows: &[OrderLineItem]) -> Vec<MonthlyOrderSummary> {
    let mut buckets: BTreeMap<NaiveDate, MonthBucket> = BTreeMap::new();
    for item in rows {
        let bucket = buckets
            .entry(month_end(item.order_purchase_timestamp.date()))
            .or_default();
        bucket.orders.insert(item.order_id.as_str());
        bucket.customers.insert(item.customer_id.as_str());
        if let Some(price) = item.price {
            bucket.revenue += price;
        }
    }

    buckets
        .into_iter()
        .map(|(month_end, bucket)| MonthlyOrderSummary {
            month_end,
            order_count: bucket.orders.len(),
            revenue: bucket.revenue,
            customer_count: bucket.customers.len(),
        })
        .collect()
}

/// Insert zero rows for months missing between the first and last entry,
/// giving a gap-free series.
pub fn fill_month_gaps(summary: &[MonthlyOrderSummary]) -> Vec<MonthlyOrderSummary> {
    let (Some(first), Some(last)) = (summary.first(), summary.last()) else {
        return Vec::new();
    };

    let mut by_month: BTreeMap<NaiveDate, &MonthlyOrderSummary> =
        summary.iter().map(|s| (s.month_end, s)).collect();

    let mut result = Vec::with_capacity(summary.len());
    let mut current = first.month_end;
    while current <= last.month_end {
        match by_month.remove(&current) {
            Some(existing) => result.push(existing.clone()),
            None => result.push(MonthlyOrderSummary::empty(current)),
        }
        match current.succ_opt() {
            Some(next) => current = month_end(next),
            None => break,
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::test_support::{line, sale};

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_month_end() {
        assert_eq!(month_end(d("2018-01-15")), d("2018-01-31"));
        assert_eq!(month_end(d("2018-02-01")), d("2018-02-28"));
        assert_eq!(month_end(d("2016-02-10")), d("2016-02-29"));
        assert_eq!(month_end(d("2018-12-31")), d("2018-12-31"));
        assert_eq!(month_end(d("2018-04-30")), d("2018-04-30"));
    }

    #[test]
    fn test_example_two_months() {
        let rows = vec![
            line("A", "1", "SP", "2018-01-10 10:00:00"),
            line("A", "1", "SP", "2018-01-10 10:00:00"),
            line("B", "2", "RJ", "2018-02-03 09:00:00"),
        ];
        let summary = monthly_order_summary(&rows);
        assert_eq!(summary.len(), 2);
        assert_eq!(summary[0].month_end, d("2018-01-31"));
        assert_eq!(summary[0].order_count, 1);
        assert_eq!(summary[0].customer_count, 1);
        assert_eq!(summary[1].month_end, d("2018-02-28"));
        assert_eq!(summary[1].order_count, 1);
        assert_eq!(summary[1].customer_count, 1);
    }

    #[test]
    fn test_revenue_sums_every_line_item() {
        let mut unpriced = sale("C", "3", Some("x"), "2018-03-15 12:00:00", 0.0);
        unpriced.price = None;
        let rows = vec![
            sale("A", "1", Some("x"), "2018-03-01 00:00:00", 10.5),
            sale("A", "1", Some("x"), "2018-03-01 00:00:00", 4.5),
            sale("B", "2", Some("x"), "2018-03-31 23:59:59", 5.0),
            unpriced,
        ];
        let summary = monthly_order_summary(&rows);
        assert_eq!(summary.len(), 1);
        assert!((summary[0].revenue - 20.0).abs() < 1e-9);
        assert_eq!(summary[0].order_count, 3);
        assert_eq!(summary[0].customer_count, 3);
    }

    #[test]
    fn test_empty_months_omitted_and_chronological() {
        let rows = vec![
            line("C", "3", "SP", "2018-05-02 10:00:00"),
            line("A", "1", "SP", "2018-01-10 10:00:00"),
            line("B", "2", "SP", "2017-12-24 10:00:00"),
        ];
        let months: Vec<NaiveDate> = monthly_order_summary(&rows)
            .iter()
            .map(|s| s.month_end)
            .collect();
        assert_eq!(months, vec![d("2017-12-31"), d("2018-01-31"), d("2018-05-31")]);
    }

    #[test]
    fn test_order_count_matches_distinct_orders_per_month() {
        let rows = vec![
            line("A", "1", "SP", "2018-06-01 10:00:00"),
            line("A", "1", "SP", "2018-06-01 10:00:00"),
            line("B", "1", "SP", "2018-06-20 10:00:00"),
            line("C", "2", "SP", "2018-07-01 00:00:00"),
        ];
        let summary = monthly_order_summary(&rows);
        let mut seen = HashSet::new();
        for month in &summary {
            assert!(seen.insert(month.month_end), "month emitted twice");
            let expected: HashSet<&str> = rows
                .iter()
                .filter(|r| month_end(r.order_purchase_timestamp.date()) == month.month_end)
                .map(|r| r.order_id.as_str())
                .collect();
            assert_eq!(month.order_count, expected.len());
        }
        assert_eq!(summary[0].order_count, 2);
        assert_eq!(summary[0].customer_count, 1);
    }

    #[test]
    fn test_empty_input() {
        assert!(monthly_order_summary(&[]).is_empty());
        assert!(fill_month_gaps(&[]).is_empty());
    }

    #[test]
    fn test_idempotent() {
        let rows = vec![
            sale("A", "1", Some("x"), "2018-03-01 00:00:00", 10.0),
            sale("B", "2", Some("y"), "2018-04-01 00:00:00", 20.0),
        ];
        assert_eq!(monthly_order_summary(&rows), monthly_order_summary(&rows));
    }

    #[test]
    fn test_fill_month_gaps_across_year() {
        let rows = vec![
            sale("A", "1", Some("x"), "2017-11-05 10:00:00", 10.0),
            sale("B", "2", Some("x"), "2018-02-10 10:00:00", 20.0),
        ];
        let filled = fill_month_gaps(&monthly_order_summary(&rows));
        let months: Vec<NaiveDate> = filled.iter().map(|s| s.month_end).collect();
        assert_eq!(
            months,
            vec![d("2017-11-30"), d("2017-12-31"), d("2018-01-31"), d("2018-02-28")]
        );
        assert_eq!(filled[1].order_count, 0);
        assert_eq!(filled[2].revenue, 0.0);
        assert_eq!(filled[3].order_count, 1);
    }
}
