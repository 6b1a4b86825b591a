use crate::error::{ProcessingError, Result};
use crate::models::{DailySeries, RangeTable};
use crate::utils::constants::OUTPUT_DATE_FORMAT;
use crate::utils::parsing::parse_value;
use chrono::NaiveDate;
use csv::{ReaderBuilder, Trim};
use std::path::Path;

/// Reader for a written daily range file (`date,range`).
pub struct RangeTableReader;

impl RangeTableReader {
    pub fn new() -> Self {
        Self
    }

    /// Read the file as a daily series, keeping any gaps as they are
    pub fn read_daily(&self, path: &Path) -> Result<DailySeries> {
        let mut reader = ReaderBuilder::new()
            .comment(Some(b'#'))
            .has_headers(true)
            .trim(Trim::All)
            .from_path(path)?;

        let mut series = DailySeries::new();
        for result in reader.records() {
            let record = result?;
            let line = record.position().map_or(0, |p| p.line());
            let invalid = |message: String| ProcessingError::InvalidRecord {
                path: path.to_path_buf(),
                line,
                message,
            };

            let date_field = record.get(0).unwrap_or("");
            let date = NaiveDate::parse_from_str(date_field, OUTPUT_DATE_FORMAT)
                .map_err(|_| invalid(format!("invalid date '{}'", date_field)))?;
            let value = parse_value(record.get(1).unwrap_or("")).map_err(invalid)?;

            series.insert(date, value);
        }

        Ok(series)
    }

    /// Read the file as a dense table; gaps and missing values are errors
    pub fn read_table(&self, path: &Path) -> Result<RangeTable> {
        let series = self.read_daily(path)?;
        RangeTable::from_daily(&series)
    }
}

impl Default for RangeTableReader {
    fn default() -> Self {
        Self::new()
    }
}
