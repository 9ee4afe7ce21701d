use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::analyzer::DEFAULT_CATEGORY_LIMIT;
use crate::error::AppError;

pub const DEFAULT_DATA_PATH: &str = "dashboard/master_orders_2018.csv";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppConfig {
    pub data_path: PathBuf,
    pub category_limit: usize,
    pub location_limit: usize,
    pub fill_empty_months: bool,
    pub skip_malformed_rows: bool,
    pub delimiter: char,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            category_limit: DEFAULT_CATEGORY_LIMIT,
            location_limit: 10,
            fill_empty_months: false,
            skip_malformed_rows: false,
            delimiter: ',',
        }
    }
}

impl AppConfig {
    /// Delimiter as the single byte the CSV reader expects.
    pub fn delimiter_byte(&self) -> Result<u8, AppError> {
        if self.delimiter.is_ascii() {
            Ok(self.delimiter as u8)
        } else {
            Err(AppError::Config(format!(
                "delimiter must be an ASCII character, got {:?}",
                self.delimiter
            )))
        }
    }
}

/// Load the configuration from a JSON file. Absent keys keep their defaults;
/// `None` yields the default configuration.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig, AppError> {
    let Some(path) = path else {
        return Ok(AppConfig::default());
    };

    let raw = std::fs::read_to_string(path)
        .map_err(|e| AppError::Config(format!("{}: {}", path.display(), e)))?;
    let config: AppConfig = serde_json::from_str(&raw)
        .map_err(|e| AppError::Config(format!("{}: {}", path.display(), e)))?;

    if config.category_limit == 0 {
        return Err(AppError::Config("categoryLimit must be at least 1".into()));
    }
    config.delimiter_byte()?;

    log::debug!("Configuration loaded from {}", path.display());
    Ok(config)
}
