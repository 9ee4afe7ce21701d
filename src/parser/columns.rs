use std::collections::HashMap;

use crate::error::AppError;

pub const ORDER_ID: &str = "order_id";
pub const ORDER_ITEM_ID: &str = "order_item_id";
pub const CUSTOMER_ID: &str = "customer_id";
pub const CUSTOMER_CITY: &str = "customer_city";
pub const CUSTOMER_STATE: &str = "customer_state";
pub const PRODUCT_CATEGORY: &str = "product_category_name";
pub const PURCHASE_TIMESTAMP: &str = "order_purchase_timestamp";
pub const PRICE: &str = "price";

/// Required columns: loading fails if any of them is absent.
const REQUIRED: &[&str] = &[
    ORDER_ID,
    ORDER_ITEM_ID,
    CUSTOMER_ID,
    CUSTOMER_CITY,
    CUSTOMER_STATE,
    PRODUCT_CATEGORY,
    PURCHASE_TIMESTAMP,
    PRICE,
];

/// Maps column names to their index in a CSV record.
pub struct ColumnMap {
    indices: HashMap<String, usize>,
    headers: Vec<String>,
}

impl ColumnMap {
    /// Build a ColumnMap from the CSV header record.
    /// Header fields are trimmed of surrounding whitespace and a leading BOM.
    pub fn from_headers(headers: &csv::StringRecord) -> Self {
        let mut indices = HashMap::new();
        let mut header_list = Vec::new();
        for (i, field) in headers.iter().enumerate() {
            let name = field.trim_start_matches('\u{FEFF}').trim().to_string();
            // first occurrence wins on duplicated headers
            indices.entry(name.clone()).or_insert(i);
            header_list.push(name);
        }
        ColumnMap {
            indices,
            headers: header_list,
        }
    }

    pub fn get<'a>(&self, record: &'a csv::StringRecord, col: &str) -> Option<&'a str> {
        self.indices.get(col).and_then(|&i| record.get(i))
    }

    pub fn has(&self, col: &str) -> bool {
        self.indices.contains_key(col)
    }

    pub fn all_headers(&self) -> &[String] {
        &self.headers
    }
}

/// Check that every required column is present.
/// Returns `AppError::MissingColumns` listing all absent ones.
pub fn validate_columns(col_map: &ColumnMap) -> Result<(), AppError> {
    let missing: Vec<String> = REQUIRED
        .iter()
        .filter(|&&c| !col_map.has(c))
        .map(|c| c.to_string())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(AppError::MissingColumns(missing))
    }
}
