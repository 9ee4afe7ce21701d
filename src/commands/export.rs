use std::path::Path;
use std::time::Instant;

use crate::config::AppConfig;
use crate::dataset::Dataset;
use crate::error::AppError;
use crate::export::dashboard_report;

use super::dashboard::{run_dashboard_logic, DashboardRequest};

#[derive(Debug)]
pub struct ExportResult {
    pub path: String,
    pub size_bytes: u64,
    pub duration_ms: u64,
}

/// Write the dashboard workbook for `request` to `path`.
pub fn export_excel_dashboard(
    dataset: &Dataset,
    request: &DashboardRequest,
    config: &AppConfig,
    path: &Path,
) -> Result<ExportResult, AppError> {
    let start = Instant::now();

    let dashboard = run_dashboard_logic(dataset, request, config)?;
    let bytes = dashboard_report::generate_dashboard_report(&dashboard)?;
    std::fs::write(path, &bytes)?;

    log::info!("Dashboard exported to {} ({} bytes)", path.display(), bytes.len());

    Ok(ExportResult {
        path: path.display().to_string(),
        size_bytes: bytes.len() as u64,
        duration_ms: start.elapsed().as_millis() as u64,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::test_support::sale;

    #[test]
    fn test_export_writes_xlsx_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dashboard.xlsx");
        let ds = Dataset::from_items(vec![sale(
            "o1",
            "c1",
            Some("pet_shop"),
            "2018-01-05 10:00:00",
            10.0,
        )]);

        let result =
            export_excel_dashboard(&ds, &DashboardRequest::default(), &AppConfig::default(), &path)
                .unwrap();

        let written = std::fs::read(&path).unwrap();
        assert_eq!(result.size_bytes, written.len() as u64);
        assert_eq!(&written[..2], b"PK");
    }

    #[test]
    fn test_export_to_missing_directory_fails() {
        let ds = Dataset::default();
        let err = export_excel_dashboard(
            &ds,
            &DashboardRequest::default(),
            &AppConfig::default(),
            Path::new("/nonexistent/dir/dashboard.xlsx"),
        )
        .unwrap_err();
        assert!(matches!(err, AppError::Io(_)));
    }
}
