use chrono::{Duration, NaiveDate};

use crate::error::{ProcessingError, Result};
use crate::models::DailySeries;

/// Dense day-indexed table of daily tidal ranges, as consumed by models
/// that request a block of consecutive days.
#[derive(Debug, Clone, PartialEq)]
pub struct RangeTable {
    start_date: NaiveDate,
    values: Vec<f64>,
}

impl RangeTable {
    pub fn new(start_date: NaiveDate, values: Vec<f64>) -> Self {
        Self { start_date, values }
    }

    /// Build a table from a gap-free, contiguous daily series.
    pub fn from_daily(series: &DailySeries) -> Result<Self> {
        let start_date = series
            .first_date()
            .ok_or_else(|| ProcessingError::MissingData("empty daily series".to_string()))?;

        if !series.is_contiguous() {
            return Err(ProcessingError::InvalidFormat(
                "daily series has missing days".to_string(),
            ));
        }

        let values = series
            .iter()
            .map(|(date, value)| {
                value.ok_or_else(|| {
                    ProcessingError::MissingData(format!("no tidal range for {}", date))
                })
            })
            .collect::<Result<Vec<f64>>>()?;

        Ok(Self { start_date, values })
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn end_date(&self) -> NaiveDate {
        self.start_date + Duration::days(self.values.len().saturating_sub(1) as i64)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, date: NaiveDate) -> Option<f64> {
        let offset = (date - self.start_date).num_days();
        if offset < 0 {
            return None;
        }
        self.values.get(offset as usize).copied()
    }

    /// `days` consecutive values starting at `start`.
    pub fn slice(&self, start: NaiveDate, days: usize) -> Result<&[f64]> {
        let offset = (start - self.start_date).num_days();
        let out_of_range = || ProcessingError::OutOfRange {
            start,
            days,
            first: self.start_date,
            last: self.end_date(),
        };

        if offset < 0 {
            return Err(out_of_range());
        }
        let begin = offset as usize;
        let end = begin.checked_add(days).ok_or_else(out_of_range)?;
        self.values.get(begin..end).ok_or_else(out_of_range)
    }
}
