//! Dashboard payload: every aggregation over one date-filtered slice of the dataset.
use std::time::Instant;

use chrono::NaiveDateTime;
use serde::Serialize;

use super::customers::{summarize_by_city, summarize_by_state, LocationCount};
use super::products::{bottom_categories, top_categories, CategoryCount};
use super::temporal::{fill_month_gaps, monthly_order_summary, MonthlyOrderSummary};
use crate::config::AppConfig;
use crate::dataset::{DateRange, Dataset};
use crate::format::format_brl;
use crate::parser::OrderLineItem;

// ─── Data Structures ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub meta: DashboardMeta,
    pub metrics: DashboardMetrics,
    pub monthly_orders: Vec<MonthlyOrderSummary>,
    pub top_categories: Vec<CategoryCount>,
    pub bottom_categories: Vec<CategoryCount>,
    pub customers_by_state: Vec<LocationCount>,
    pub customers_by_city: Vec<LocationCount>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardMeta {
    pub total_rows: usize,
    pub filtered_rows: usize,
    pub date_from: NaiveDateTime,
    pub date_to: NaiveDateTime,
    pub available_from: Option<NaiveDateTime>,
    pub available_to: Option<NaiveDateTime>,
    pub calcul_duration_ms: u64,
}

/// The three headline callouts.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardMetrics {
    pub total_orders: usize,
    pub total_revenue: f64,
    pub total_revenue_display: String,
    pub total_customers: usize,
}

// ─── Builders ────────────────────────────────────────────────────────────────

/// Totals over the monthly series. A customer buying in two months counts
/// once per month in `total_customers`.
pub fn dashboard_metrics(monthly: &[MonthlyOrderSummary]) -> DashboardMetrics {
    let total_orders = monthly.iter().map(|m| m.order_count).sum();
    let total_revenue: f64 = monthly.iter().map(|m| m.revenue).sum();
    let total_customers = monthly.iter().map(|m| m.customer_count).sum();
    DashboardMetrics {
        total_orders,
        total_revenue,
        total_revenue_display: format_brl(total_revenue),
        total_customers,
    }
}

/// Run every aggregation on `rows`. Location tables are cut to
/// `config.location_limit` entries (0 keeps them all).
pub fn build_dashboard_from_rows(rows: &[OrderLineItem], config: &AppConfig) -> DashboardParts {
    let monthly = monthly_order_summary(rows);
    let metrics = dashboard_metrics(&monthly);
    let monthly_orders = if config.fill_empty_months {
        fill_month_gaps(&monthly)
    } else {
        monthly
    };

    let mut customers_by_state = summarize_by_state(rows);
    let mut customers_by_city = summarize_by_city(rows);
    if config.location_limit > 0 {
        customers_by_state.truncate(config.location_limit);
        customers_by_city.truncate(config.location_limit);
    }

    DashboardParts {
        metrics,
        monthly_orders,
        top_categories: top_categories(rows, config.category_limit),
        bottom_categories: bottom_categories(rows, config.category_limit),
        customers_by_state,
        customers_by_city,
    }
}

/// Aggregations without the dataset metadata.
#[derive(Debug, Clone)]
pub struct DashboardParts {
    pub metrics: DashboardMetrics,
    pub monthly_orders: Vec<MonthlyOrderSummary>,
    pub top_categories: Vec<CategoryCount>,
    pub bottom_categories: Vec<CategoryCount>,
    pub customers_by_state: Vec<LocationCount>,
    pub customers_by_city: Vec<LocationCount>,
}

/// Filter `dataset` to `range` and build the complete dashboard.
pub fn build_dashboard(dataset: &Dataset, range: &DateRange, config: &AppConfig) -> Dashboard {
    let start = Instant::now();
    let rows = dataset.filter(range);
    log::debug!(
        "Building dashboard for {} .. {} ({} of {} rows)",
        range.start,
        range.end,
        rows.len(),
        dataset.len()
    );

    let parts = build_dashboard_from_rows(rows, config);
    let available = dataset.available_range();

    Dashboard {
        meta: DashboardMeta {
            total_rows: dataset.len(),
            filtered_rows: rows.len(),
            date_from: range.start,
            date_to: range.end,
            available_from: available.map(|r| r.start),
            available_to: available.map(|r| r.end),
            calcul_duration_ms: start.elapsed().as_millis() as u64,
        },
        metrics: parts.metrics,
        monthly_orders: parts.monthly_orders,
        top_categories: parts.top_categories,
        bottom_categories: parts.bottom_categories,
        customers_by_state: parts.customers_by_state,
        customers_by_city: parts.customers_by_city,
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
