pub mod dashboard;
pub mod export;
pub mod info;
pub mod report;

pub use dashboard::{dashboard_json, run_dashboard_logic, DashboardRequest};
pub use export::{export_excel_dashboard, ExportResult};
pub use info::{dataset_info, render_dataset_info, DatasetInfo};
pub use report::render_text_report;
