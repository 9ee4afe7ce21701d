use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use crate::config::AppConfig;
use crate::error::AppError;
use crate::parser::{parse_csv, OrderLineItem, ParseOptions, ParseWarning};

/// Inclusive timestamp range used to filter the dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl DateRange {
    /// Whole calendar days: `start` at midnight through the last instant of `end`.
    pub fn from_dates(start: NaiveDate, end: NaiveDate) -> Result<Self, AppError> {
        if start > end {
            return Err(AppError::InvalidDateRange {
                start: start.to_string(),
                end: end.to_string(),
            });
        }
        Ok(DateRange {
            start: start.and_time(NaiveTime::MIN),
            end: end.and_time(end_of_day()),
        })
    }

}

fn end_of_day() -> NaiveTime {
    NaiveTime::from_hms_nano_opt(23, 59, 59, 999_999_999).unwrap_or(NaiveTime::MIN)
}

/// Parse a date argument, "YYYY-MM-DD" or a full timestamp (the date part is kept).
pub fn parse_date_arg(s: &str) -> Result<NaiveDate, AppError> {
    crate::parser::deserializers::parse_timestamp(s)
        .map(|dt| dt.date())
        .ok_or_else(|| AppError::InvalidDate(s.to_string()))
}

/// The loaded order line items, sorted by purchase timestamp.
/// Built once at startup and never mutated.
#[derive(Debug, Default)]
pub struct Dataset {
    items: Vec<OrderLineItem>,
    warnings: Vec<ParseWarning>,
    rows_read: usize,
    columns: Vec<String>,
}

impl Dataset {
    /// Read the CSV at `path` with the loader settings from `config`.
    pub fn load(path: &Path, config: &AppConfig) -> Result<Self, AppError> {
        let options = ParseOptions::from_config(config)?;
        let output = parse_csv(path, options)?;
        log::info!(
            "Loaded {} line items from {} in {} ms ({} rows read, {} skipped)",
            output.items.len(),
            path.display(),
            output.parse_duration_ms,
            output.total_rows_processed,
            output.skipped_rows
        );
        log::debug!("Columns: {}", output.detected_columns.join(", "));
        let mut dataset = Dataset::from_items(output.items);
        dataset.warnings = output.warnings;
        dataset.rows_read = output.total_rows_processed;
        dataset.columns = output.detected_columns;
        Ok(dataset)
    }

    pub fn from_items(mut items: Vec<OrderLineItem>) -> Self {
        // stable: rows sharing a timestamp keep file order
        items.sort_by_key(|item| item.order_purchase_timestamp);
        let rows_read = items.len();
        Dataset {
            items,
            warnings: Vec::new(),
            rows_read,
            columns: Vec::new(),
        }
    }

    pub fn items(&self) -> &[OrderLineItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn warnings(&self) -> &[ParseWarning] {
        &self.warnings
    }

    /// Data rows in the source file, skipped ones included.
    pub fn rows_read(&self) -> usize {
        self.rows_read
    }

    /// Header names of the source file, in file order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Earliest and latest purchase timestamps, `None` for an empty dataset.
    pub fn available_range(&self) -> Option<DateRange> {
        let first = self.items.first()?;
        let last = self.items.last()?;
        Some(DateRange {
            start: first.order_purchase_timestamp,
            end: last.order_purchase_timestamp,
        })
    }

    /// Build the filter range from optional bounds; missing bounds default to the
    /// first and last purchase dates of the dataset.
    ///
    /// A single bound past either end of the data gives an empty range, not an
    /// error: the defaulted bound never crosses the given one. Only two explicit
    /// bounds in the wrong order are rejected.
    pub fn resolve_range(
        &self,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<DateRange, AppError> {
        let available = self.available_range();
        let first = available.map_or(NaiveDate::MIN, |r| r.start.date());
        let last = available.map_or(NaiveDate::MAX, |r| r.end.date());
        let (start, end) = match (from, to) {
            (Some(from), Some(to)) => (from, to),
            (Some(from), None) => (from, last.max(from)),
            (None, Some(to)) => (first.min(to), to),
            (None, None) => (first, last),
        };
        DateRange::from_dates(start, end)
    }

    /// Rows whose purchase timestamp falls inside `range`. Outside the data → empty.
    pub fn filter(&self, range: &DateRange) -> &[OrderLineItem] {
        let lo = self
            .items
            .partition_point(|item| item.order_purchase_timestamp < range.start);
        let hi = self
            .items
            .partition_point(|item| item.order_purchase_timestamp <= range.end);
        if lo >= hi {
            return &[];
        }
        &self.items[lo..hi]
    }
}
