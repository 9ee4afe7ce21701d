use crate::analyzer::dashboard::{build_dashboard, Dashboard};
use crate::config::AppConfig;
use crate::dataset::{parse_date_arg, DateRange, Dataset};
use crate::error::AppError;

/// Date filter as entered by the user; missing bounds mean "from the first"
/// or "up to the last" purchase in the dataset.
#[derive(Debug, Clone, Default)]
pub struct DashboardRequest {
    pub date_from: Option<String>,
    pub date_to: Option<String>,
}

impl DashboardRequest {
    pub fn resolve(&self, dataset: &Dataset) -> Result<DateRange, AppError> {
        let from = self.date_from.as_deref().map(parse_date_arg).transpose()?;
        let to = self.date_to.as_deref().map(parse_date_arg).transpose()?;
        dataset.resolve_range(from, to)
    }
}

/// Shared dashboard logic, used by the text report, JSON output and export.
pub fn run_dashboard_logic(
    dataset: &Dataset,
    request: &DashboardRequest,
    config: &AppConfig,
) -> Result<Dashboard, AppError> {
    let range = request.resolve(dataset)?;
    Ok(build_dashboard(dataset, &range, config))
}

/// The dashboard as JSON.
pub fn dashboard_json(
    dataset: &Dataset,
    request: &DashboardRequest,
    config: &AppConfig,
    pretty: bool,
) -> Result<String, AppError> {
    let dashboard = run_dashboard_logic(dataset, request, config)?;
    let json = if pretty {
        serde_json::to_string_pretty(&dashboard)?
    } else {
        serde_json::to_string(&dashboard)?
    };
    Ok(json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::test_support::sale;

    fn dataset() -> Dataset {
        Dataset::from_items(vec![
            sale("o1", "c1", Some("pet_shop"), "2018-01-05 10:00:00", 10.0),
            sale("o2", "c2", Some("pet_shop"), "2018-02-05 10:00:00", 20.0),
            sale("o3", "c3", Some("relogios"), "2018-03-05 10:00:00", 30.0),
        ])
    }

    fn request(from: Option<&str>, to: Option<&str>) -> DashboardRequest {
        DashboardRequest {
            date_from: from.map(str::to_string),
            date_to: to.map(str::to_string),
        }
    }

    #[test]
    fn test_open_request_covers_whole_dataset() {
        let dash = run_dashboard_logic(&dataset(), &request(None, None), &AppConfig::default())
            .unwrap();
        assert_eq!(dash.metrics.total_orders, 3);
    }

    #[test]
    fn test_bounded_request() {
        let dash = run_dashboard_logic(
            &dataset(),
            &request(Some("2018-02-01"), Some("2018-03-05")),
            &AppConfig::default(),
        )
        .unwrap();
        assert_eq!(dash.metrics.total_orders, 2);
        assert!((dash.metrics.total_revenue - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_invalid_date_rejected() {
        let err = run_dashboard_logic(
            &dataset(),
            &request(Some("05/02/2018"), None),
            &AppConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, AppError::InvalidDate(_)));
    }

    #[test]
    fn test_inverted_request_rejected() {
        let err = run_dashboard_logic(
            &dataset(),
            &request(Some("2018-03-01"), Some("2018-01-01")),
            &AppConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, AppError::InvalidDateRange { .. }));
    }

    #[test]
    fn test_from_after_last_purchase_is_empty() {
        let dash = run_dashboard_logic(
            &dataset(),
            &request(Some("2019-01-01"), None),
            &AppConfig::default(),
        )
        .unwrap();
        assert_eq!(dash.meta.filtered_rows, 0);
        assert_eq!(dash.metrics.total_orders, 0);
        assert!(dash.monthly_orders.is_empty());
    }

    #[test]
    fn test_to_before_first_purchase_is_empty() {
        let dash = run_dashboard_logic(
            &dataset(),
            &request(None, Some("2017-06-01")),
            &AppConfig::default(),
        )
        .unwrap();
        assert_eq!(dash.meta.filtered_rows, 0);
        assert_eq!(dash.metrics.total_revenue_display, "R$\u{a0}0,00");
        assert!(dash.top_categories.is_empty());
    }

    #[test]
    fn test_dashboard_json_pretty_and_compact() {
        let ds = dataset();
        let config = AppConfig::default();
        let compact = dashboard_json(&ds, &request(None, None), &config, false).unwrap();
        let pretty = dashboard_json(&ds, &request(None, None), &config, true).unwrap();
        assert!(!compact.contains('\n'));
        assert!(pretty.contains('\n'));
        let value: serde_json::Value = serde_json::from_str(&compact).unwrap();
        assert_eq!(value["metrics"]["totalOrders"], 3);
    }
}
