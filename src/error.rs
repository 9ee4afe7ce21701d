use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Excel export error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("Missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("Empty file: no header row")]
    EmptyFile,

    #[error("Invalid row at line {line}: {message}")]
    InvalidRow { line: usize, message: String },

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid date range: {start} is after {end}")]
    InvalidDateRange { start: String, end: String },

    #[error("Configuration error: {0}")]
    Config(String),
}
