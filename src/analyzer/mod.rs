pub mod customers;
pub mod dashboard;
pub mod products;
pub mod temporal;

pub use customers::{summarize_by_city, summarize_by_state, LocationCount};
pub use dashboard::{build_dashboard, dashboard_metrics, Dashboard, DashboardMetrics};
pub use products::{bottom_categories, top_categories, CategoryCount, DEFAULT_CATEGORY_LIMIT};
pub use temporal::{fill_month_gaps, monthly_order_summary, MonthlyOrderSummary};
