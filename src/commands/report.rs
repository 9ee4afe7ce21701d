use std::fmt::Write as _;

use crate::analyzer::{CategoryCount, Dashboard, LocationCount, MonthlyOrderSummary};
use crate::format::{format_brl, format_integer};

const BAR_WIDTH: usize = 30;

/// Plain-text rendering of the dashboard: metric callouts, monthly series and
/// horizontal bar charts for categories, states and cities.
pub fn render_text_report(dashboard: &Dashboard) -> String {
    let mut out = String::new();
    let meta = &dashboard.meta;
    let metrics = &dashboard.metrics;

    let _ = writeln!(out, "Brazilian E-Commerce Dashboard");
    let _ = writeln!(
        out,
        "Period: {} to {} ({} of {} line items)",
        meta.date_from.format("%d/%m/%Y"),
        meta.date_to.format("%d/%m/%Y"),
        format_integer(meta.filtered_rows),
        format_integer(meta.total_rows)
    );
    let _ = writeln!(out);
    let _ = writeln!(out, "  Total Orders     {}", format_integer(metrics.total_orders));
    let _ = writeln!(out, "  Total Revenue    {}", metrics.total_revenue_display);
    let _ = writeln!(out, "  Total Customers  {}", format_integer(metrics.total_customers));

    write_monthly(&mut out, &dashboard.monthly_orders);
    write_categories(&mut out, "Top Best-Selling Product Categories", &dashboard.top_categories);
    write_categories(&mut out, "Top Worst-Selling Product Categories", &dashboard.bottom_categories);
    write_locations(&mut out, "Customer Distribution by State", &dashboard.customers_by_state);
    write_locations(&mut out, "Customer Distribution by City", &dashboard.customers_by_city);
    out
}

fn section(out: &mut String, title: &str) {
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", title);
    let _ = writeln!(out, "{}", "─".repeat(title.chars().count()));
}

/// Bar proportional to `value / max`, at least one cell for a non-zero value.
fn bar(value: usize, max: usize) -> String {
    if max == 0 || value == 0 {
        return String::new();
    }
    let cells = (value * BAR_WIDTH).div_ceil(max);
    "█".repeat(cells.min(BAR_WIDTH))
}

fn write_monthly(out: &mut String, monthly: &[MonthlyOrderSummary]) {
    section(out, "Orders and Revenue per Month");
    if monthly.is_empty() {
        let _ = writeln!(out, "  (no orders in this period)");
        return;
    }
    let max_orders = monthly.iter().map(|m| m.order_count).max().unwrap_or(0);
    let _ = writeln!(
        out,
        "  {:<10}  {:>8}  {:>18}  {:>9}",
        "Month", "Orders", "Revenue", "Customers"
    );
    for m in monthly {
        let _ = writeln!(
            out,
            "  {:<10}  {:>8}  {:>18}  {:>9}  {}",
            m.month_end.format("%Y-%m"),
            format_integer(m.order_count),
            format_brl(m.revenue),
            format_integer(m.customer_count),
            bar(m.order_count, max_orders)
        );
    }
}

fn write_categories(out: &mut String, title: &str, rows: &[CategoryCount]) {
    section(out, title);
    let bars: Vec<(&str, usize)> = rows
        .iter()
        .map(|c| (c.category.as_str(), c.total_sold))
        .collect();
    write_bars(out, &bars, "items sold");
}

fn write_locations(out: &mut String, title: &str, rows: &[LocationCount]) {
    section(out, title);
    let bars: Vec<(&str, usize)> = rows
        .iter()
        .map(|l| (l.label.as_str(), l.customers))
        .collect();
    write_bars(out, &bars, "customers");
}

fn write_bars(out: &mut String, rows: &[(&str, usize)], unit: &str) {
    if rows.is_empty() {
        let _ = writeln!(out, "  (no data in this period)");
        return;
    }
    let label_width = rows
        .iter()
        .map(|(label, _)| label.chars().count())
        .max()
        .unwrap_or(0);
    let max = rows.iter().map(|(_, v)| *v).max().unwrap_or(0);
    for (label, value) in rows {
        let _ = writeln!(
            out,
            "  {:<width$}  {:>8} {}  {}",
            label,
            format_integer(*value),
            unit,
            bar(*value, max),
            width = label_width
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::build_dashboard;
    use crate::analyzer::test_support::sale;
    use crate::config::AppConfig;
    use crate::dataset::{DateRange, Dataset};
    use chrono::NaiveDate;

    fn dashboard(range: Option<(&str, &str)>) -> Dashboard {
        let ds = Dataset::from_items(vec![
            sale("o1", "c1", Some("beleza_saude"), "2018-01-05 10:00:00", 1500.0),
            sale("o1", "c1", Some("beleza_saude"), "2018-01-05 10:00:00", 250.25),
            sale("o2", "c2", Some("pet_shop"), "2018-02-20 08:00:00", 30.0),
        ]);
        let range = match range {
            Some((from, to)) => DateRange::from_dates(
                NaiveDate::parse_from_str(from, "%Y-%m-%d").unwrap(),
                NaiveDate::parse_from_str(to, "%Y-%m-%d").unwrap(),
            )
            .unwrap(),
            None => ds.resolve_range(None, None).unwrap(),
        };
        build_dashboard(&ds, &range, &AppConfig::default())
    }

    #[test]
    fn test_bar_proportions() {
        assert_eq!(bar(0, 10), "");
        assert_eq!(bar(5, 0), "");
        assert_eq!(bar(10, 10).chars().count(), BAR_WIDTH);
        assert_eq!(bar(5, 10).chars().count(), BAR_WIDTH / 2);
        assert_eq!(bar(1, 1000).chars().count(), 1);
    }

    #[test]
    fn test_report_contains_metrics_and_sections() {
        let text = render_text_report(&dashboard(None));
        assert!(text.contains("Total Orders     2"));
        assert!(text.contains("R$\u{a0}1.780,25"));
        assert!(text.contains("Total Customers  2"));
        assert!(text.contains("2018-01"));
        assert!(text.contains("2018-02"));
        assert!(text.contains("beleza_saude"));
        assert!(text.contains("Customer Distribution by State"));
        assert!(text.contains("SP"));
    }

    #[test]
    fn test_report_for_empty_period() {
        let text = render_text_report(&dashboard(Some(("2019-01-01", "2019-01-31"))));
        assert!(text.contains("Total Orders     0"));
        assert!(text.contains("R$\u{a0}0,00"));
        assert!(text.contains("(no orders in this period)"));
        assert!(text.contains("(no data in this period)"));
    }
}
