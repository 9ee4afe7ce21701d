use chrono::{NaiveDate, NaiveDateTime};

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Parse a purchase timestamp ("2018-01-05 16:24:09", ISO `T` variant, or a bare date).
/// Returns None for empty or unparseable strings.
pub fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return Some(dt);
        }
    }
    parse_date(trimmed).and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Parse a calendar date "YYYY-MM-DD".
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

/// "" → None, otherwise the trimmed text.
pub fn parse_opt_text(s: &str) -> Option<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// "" → Ok(None), "12.5" → Ok(Some(12.5)), "abc" → Err.
/// Non-finite values are rejected.
pub fn parse_opt_price(s: &str) -> Result<Option<f64>, String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    match trimmed.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(Some(v)),
        _ => Err(format!("invalid price: {:?}", trimmed)),
    }
}

/// Parse an integer that may be written as a float ("1" or "1.0").
pub fn parse_item_id(s: &str) -> Option<u32> {
    let trimmed = s.trim();
    if let Ok(v) = trimmed.parse::<u32>() {
        return Some(v);
    }
    trimmed
        .parse::<f64>()
        .ok()
        .filter(|v| v.fract() == 0.0 && *v >= 0.0 && *v <= u32::MAX as f64)
        .map(|v| v as u32)
}
