use chrono::{NaiveDate, NaiveDateTime};

use crate::utils::constants::{MISSING_TOKENS, TIMESTAMP_FORMATS};

/// Parse a timestamp in any of the accepted layouts. A bare date is midnight.
pub fn parse_timestamp(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

/// Parse a numeric field. `Ok(None)` for missing-value tokens.
pub fn parse_value(text: &str) -> std::result::Result<Option<f64>, String> {
    let text = text.trim();
    if MISSING_TOKENS.iter().any(|t| t.eq_ignore_ascii_case(text)) {
        return Ok(None);
    }

    let value = text
        .parse::<f64>()
        .map_err(|_| format!("invalid numeric value '{}'", text))?;

    Ok(if value.is_nan() { None } else { Some(value) })
}
