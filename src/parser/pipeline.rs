use std::io::Read;
use std::path::Path;
use std::time::Instant;

use crate::config::AppConfig;
use crate::error::AppError;
use crate::parser::columns::{self, validate_columns, ColumnMap};
use crate::parser::deserializers::{parse_item_id, parse_opt_price, parse_opt_text, parse_timestamp};
use crate::parser::types::{OrderLineItem, OrderLineRaw, ParseWarning};

/// How the loader treats the CSV.
#[derive(Debug, Clone, Copy)]
pub struct ParseOptions {
    pub delimiter: u8,
    /// Skip unparseable rows with a warning instead of failing the whole load.
    pub skip_malformed_rows: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            delimiter: b',',
            skip_malformed_rows: false,
        }
    }
}

impl ParseOptions {
    pub fn from_config(config: &AppConfig) -> Result<Self, AppError> {
        Ok(ParseOptions {
            delimiter: config.delimiter_byte()?,
            skip_malformed_rows: config.skip_malformed_rows,
        })
    }
}

/// Output of `parse_csv`: line items in file order plus load metadata.
#[derive(Debug)]
pub struct ParseOutput {
    pub items: Vec<OrderLineItem>,
    pub warnings: Vec<ParseWarning>,
    pub total_rows_processed: usize,
    pub skipped_rows: usize,
    pub detected_columns: Vec<String>,
    pub parse_duration_ms: u64,
}

/// Parse the orders CSV at `path`.
pub fn parse_csv(path: &Path, options: ParseOptions) -> Result<ParseOutput, AppError> {
    let file = std::fs::File::open(path)?;
    parse_csv_reader(std::io::BufReader::new(file), options)
}

/// Core parsing logic, accepts any `Read` source.
pub fn parse_csv_reader<R: Read>(reader: R, options: ParseOptions) -> Result<ParseOutput, AppError> {
    let start = Instant::now();

    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(options.delimiter)
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::Headers)
        .double_quote(true)
        .quoting(true)
        .from_reader(reader);

    // Phase 1: validate columns
    let headers = rdr.headers()?.clone();
    if headers.is_empty() || (headers.len() == 1 && headers[0].trim().is_empty()) {
        return Err(AppError::EmptyFile);
    }
    let col_map = ColumnMap::from_headers(&headers);
    validate_columns(&col_map)?;

    // Phase 2: parse records
    let mut items: Vec<OrderLineItem> = Vec::new();
    let mut warnings: Vec<ParseWarning> = Vec::new();
    let mut skipped = 0usize;
    let mut row_idx = 0usize;

    for result in rdr.records() {
        row_idx += 1;

        let parsed = match result {
            Ok(record) => {
                let line = record
                    .position()
                    .map(|p| p.line() as usize)
                    .unwrap_or(row_idx + 1);
                let raw = record_to_raw(&col_map, &record);
                normalize_item(&raw).map_err(|message| (line, message))
            }
            // +1 for the header row
            Err(err) => Err((row_idx + 1, err.to_string())),
        };

        match parsed {
            Ok(item) => items.push(item),
            Err((line, message)) => {
                if !options.skip_malformed_rows {
                    return Err(AppError::InvalidRow { line, message });
                }
                log::warn!("Skipping line {}: {}", line, message);
                warnings.push(ParseWarning { line, message });
                skipped += 1;
            }
        }
    }

    if row_idx == 0 {
        log::warn!("No data rows after the header");
    }

    Ok(ParseOutput {
        items,
        warnings,
        total_rows_processed: row_idx,
        skipped_rows: skipped,
        detected_columns: col_map.all_headers().to_vec(),
        parse_duration_ms: start.elapsed().as_millis() as u64,
    })
}

fn record_to_raw(col_map: &ColumnMap, record: &csv::StringRecord) -> OrderLineRaw {
    let field = |col: &str| col_map.get(record, col).map(str::to_string);
    OrderLineRaw {
        order_id: field(columns::ORDER_ID),
        order_item_id: field(columns::ORDER_ITEM_ID),
        customer_id: field(columns::CUSTOMER_ID),
        customer_city: field(columns::CUSTOMER_CITY),
        customer_state: field(columns::CUSTOMER_STATE),
        product_category_name: field(columns::PRODUCT_CATEGORY),
        order_purchase_timestamp: field(columns::PURCHASE_TIMESTAMP),
        price: field(columns::PRICE),
    }
}

fn normalize_item(raw: &OrderLineRaw) -> Result<OrderLineItem, String> {
    let order_id = raw
        .order_id
        .as_deref()
        .and_then(parse_opt_text)
        .ok_or("missing order_id")?;

    let item_str = raw.order_item_id.as_deref().unwrap_or("");
    let order_item_id =
        parse_item_id(item_str).ok_or_else(|| format!("invalid order_item_id: {:?}", item_str))?;

    let customer_id = raw
        .customer_id
        .as_deref()
        .and_then(parse_opt_text)
        .ok_or("missing customer_id")?;

    let ts_str = raw.order_purchase_timestamp.as_deref().unwrap_or("");
    let order_purchase_timestamp = parse_timestamp(ts_str)
        .ok_or_else(|| format!("invalid order_purchase_timestamp: {:?}", ts_str))?;

    let price = parse_opt_price(raw.price.as_deref().unwrap_or(""))?;

    Ok(OrderLineItem {
        order_id,
        order_item_id,
        customer_id,
        customer_city: raw.customer_city.as_deref().and_then(parse_opt_text),
        customer_state: raw.customer_state.as_deref().and_then(parse_opt_text),
        product_category_name: raw.product_category_name.as_deref().and_then(parse_opt_text),
        order_purchase_timestamp,
        price,
    })
}

// ─── Tests ────────────────────────────────────────────────────────────────────
