use chrono::{Datelike, NaiveDate};
use rust_xlsxwriter::{ExcelDateTime, Format, Workbook, Worksheet, XlsxError};

use crate::analyzer::{CategoryCount, Dashboard, LocationCount, MonthlyOrderSummary};
use crate::error::AppError;
use crate::export::{
    create_currency_format, create_date_format, create_header_format, create_integer_format,
};

/// Build the dashboard workbook (Overview, Monthly, Categories, Customers)
/// and return the XLSX bytes.
pub fn generate_dashboard_report(dashboard: &Dashboard) -> Result<Vec<u8>, AppError> {
    let mut wb = Workbook::new();
    write_overview(&mut wb, dashboard)?;
    write_monthly(&mut wb, &dashboard.monthly_orders)?;
    write_categories(&mut wb, &dashboard.top_categories, &dashboard.bottom_categories)?;
    write_customers(
        &mut wb,
        &dashboard.customers_by_state,
        &dashboard.customers_by_city,
    )?;
    Ok(wb.save_to_buffer()?)
}

fn excel_date(date: NaiveDate) -> Option<ExcelDateTime> {
    let year = u16::try_from(date.year()).ok()?;
    ExcelDateTime::from_ymd(year, date.month() as u8, date.day() as u8).ok()
}

/// Excel dates only cover 1900-9999; anything else is written as ISO text.
fn write_date(
    ws: &mut Worksheet,
    row: u32,
    col: u16,
    date: NaiveDate,
    format: &Format,
) -> Result<(), XlsxError> {
    match excel_date(date) {
        Some(dt) => ws.write_with_format(row, col, &dt, format)?,
        None => ws.write(row, col, date.format("%Y-%m-%d").to_string())?,
    };
    Ok(())
}

fn write_headers(
    ws: &mut Worksheet,
    row: u32,
    first_col: u16,
    headers: &[&str],
) -> Result<(), XlsxError> {
    let hdr = create_header_format();
    for (i, h) in headers.iter().enumerate() {
        ws.write_with_format(row, first_col + i as u16, *h, &hdr)?;
    }
    Ok(())
}

// ── Sheet 1: Overview ────────────────────────────────────────────────────────

fn write_overview(wb: &mut Workbook, dashboard: &Dashboard) -> Result<(), XlsxError> {
    let ws = wb.add_worksheet();
    ws.set_name("Overview")?;

    let int = create_integer_format();
    let money = create_currency_format();
    let date = create_date_format();
    let metrics = &dashboard.metrics;
    let meta = &dashboard.meta;

    write_headers(ws, 0, 0, &["Metric", "Value"])?;

    ws.write(1, 0, "Total orders")?;
    ws.write_with_format(1, 1, metrics.total_orders as f64, &int)?;
    ws.write(2, 0, "Total revenue")?;
    ws.write_with_format(2, 1, metrics.total_revenue, &money)?;
    ws.write(3, 0, "Total customers")?;
    ws.write_with_format(3, 1, metrics.total_customers as f64, &int)?;

    ws.write(5, 0, "From")?;
    write_date(ws, 5, 1, meta.date_from.date(), &date)?;
    ws.write(6, 0, "To")?;
    write_date(ws, 6, 1, meta.date_to.date(), &date)?;
    ws.write(7, 0, "Line items in range")?;
    ws.write_with_format(7, 1, meta.filtered_rows as f64, &int)?;

    ws.set_column_width(0, 22)?;
    ws.set_column_width(1, 18)?;
    Ok(())
}

// ── Sheet 2: Monthly ─────────────────────────────────────────────────────────

fn write_monthly(wb: &mut Workbook, monthly: &[MonthlyOrderSummary]) -> Result<(), XlsxError> {
    let ws = wb.add_worksheet();
    ws.set_name("Monthly")?;

    let int = create_integer_format();
    let money = create_currency_format();
    let date = create_date_format();

    write_headers(ws, 0, 0, &["Month end", "Orders", "Revenue", "Customers"])?;
    for (i, m) in monthly.iter().enumerate() {
        let row = (i + 1) as u32;
        write_date(ws, row, 0, m.month_end, &date)?;
        ws.write_with_format(row, 1, m.order_count as f64, &int)?;
        ws.write_with_format(row, 2, m.revenue, &money)?;
        ws.write_with_format(row, 3, m.customer_count as f64, &int)?;
    }

    ws.set_column_width(0, 14)?;
    ws.set_column_width(1, 12)?;
    ws.set_column_width(2, 18)?;
    ws.set_column_width(3, 12)?;
    Ok(())
}

// ── Sheet 3: Categories ──────────────────────────────────────────────────────

fn write_categories(
    wb: &mut Workbook,
    top: &[CategoryCount],
    bottom: &[CategoryCount],
) -> Result<(), XlsxError> {
    let ws = wb.add_worksheet();
    ws.set_name("Categories")?;

    // top on columns A-B, bottom on D-E
    let blocks = [
        (0u16, "Best-selling category", top),
        (3u16, "Worst-selling category", bottom),
    ];
    for (first_col, title, rows) in blocks {
        write_category_block(ws, first_col, title, rows)?;
        ws.set_column_width(first_col, 32)?;
        ws.set_column_width(first_col + 1, 14)?;
    }
    Ok(())
}

fn write_category_block(
    ws: &mut Worksheet,
    first_col: u16,
    title: &str,
    rows: &[CategoryCount],
) -> Result<(), XlsxError> {
    let int = create_integer_format();
    write_headers(ws, 0, first_col, &[title, "Items sold"])?;
    for (i, c) in rows.iter().enumerate() {
        let row = (i + 1) as u32;
        ws.write(row, first_col, c.category.as_str())?;
        ws.write_with_format(row, first_col + 1, c.total_sold as f64, &int)?;
    }
    Ok(())
}

// ── Sheet 4: Customers ───────────────────────────────────────────────────────

fn write_customers(
    wb: &mut Workbook,
    by_state: &[LocationCount],
    by_city: &[LocationCount],
) -> Result<(), XlsxError> {
    let ws = wb.add_worksheet();
    ws.set_name("Customers")?;

    for (first_col, title, rows) in [(0u16, "State", by_state), (3u16, "City", by_city)] {
        write_location_block(ws, first_col, title, rows)?;
        ws.set_column_width(first_col, 26)?;
        ws.set_column_width(first_col + 1, 14)?;
    }
    Ok(())
}

fn write_location_block(
    ws: &mut Worksheet,
    first_col: u16,
    title: &str,
    rows: &[LocationCount],
) -> Result<(), XlsxError> {
    let int = create_integer_format();
    write_headers(ws, 0, first_col, &[title, "Customers"])?;
    for (i, l) in rows.iter().enumerate() {
        let row = (i + 1) as u32;
        ws.write(row, first_col, l.label.as_str())?;
        ws.write_with_format(row, first_col + 1, l.customers as f64, &int)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::build_dashboard;
    use crate::analyzer::test_support::sale;
    use crate::config::AppConfig;
    use crate::dataset::Dataset;

    fn dashboard(rows: Vec<crate::parser::OrderLineItem>) -> Dashboard {
        let ds = Dataset::from_items(rows);
        let range = ds.resolve_range(None, None).unwrap();
        build_dashboard(&ds, &range, &AppConfig::default())
    }

    #[test]
    fn test_report_is_xlsx_zip() {
        let dash = dashboard(vec![
            sale("o1", "c1", Some("beleza_saude"), "2018-01-05 10:00:00", 100.0),
            sale("o2", "c2", Some("pet_shop"), "2018-02-20 08:00:00", 30.0),
        ]);
        let bytes = generate_dashboard_report(&dash).unwrap();
        assert!(bytes.len() > 4, "XLSX bytes should be non-trivial");
        assert_eq!(bytes[0], 0x50, "First byte should be 0x50 (P)");
        assert_eq!(bytes[1], 0x4B, "Second byte should be 0x4B (K)");
    }

    #[test]
    fn test_report_with_empty_dashboard() {
        let bytes = generate_dashboard_report(&dashboard(Vec::new())).unwrap();
        assert_eq!(&bytes[..2], b"PK");
    }

    #[test]
    fn test_excel_date_range() {
        assert!(excel_date(NaiveDate::from_ymd_opt(2018, 2, 28).unwrap()).is_some());
        assert!(excel_date(NaiveDate::MIN).is_none());
        assert!(excel_date(NaiveDate::from_ymd_opt(1850, 1, 1).unwrap()).is_none());
    }
}
