use crate::error::{ProcessingError, Result};
use crate::models::{Sample, TimeSeries};
use crate::utils::constants::DEFAULT_BUFFER_SIZE;
use crate::utils::parsing::{parse_timestamp, parse_value};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::debug;

/// Reader for the locally prepared reference stage file.
///
/// Whitespace-delimited, no header:
///
/// ```text
/// 2016-12-31 00:00:00 5.8
/// 2016-12-31 01:00:00 5.1
/// ```
///
/// The first two fields form the timestamp, exactly one value column follows.
pub struct ReferenceReader;

impl ReferenceReader {
    pub fn new() -> Self {
        Self
    }

    /// Read the whole reference file into a time series
    pub fn read_series(&self, path: &Path) -> Result<TimeSeries> {
        let file = File::open(path)?;
        let reader = BufReader::with_capacity(DEFAULT_BUFFER_SIZE, file);
        let mut samples = Vec::new();

        for (index, line_result) in reader.lines().enumerate() {
            let line = line_result?;

            // Skip empty lines
            if line.trim().is_empty() {
                continue;
            }

            let sample = self.parse_line(&line).map_err(|message| {
                ProcessingError::InvalidRecord {
                    path: path.to_path_buf(),
                    line: index as u64 + 1,
                    message,
                }
            })?;
            samples.push(sample);
        }

        debug!(
            path = %path.display(),
            samples = samples.len(),
            "read reference series"
        );

        Ok(TimeSeries::new(samples))
    }

    /// Parse a single line: DATE TIME VALUE
    fn parse_line(&self, line: &str) -> std::result::Result<Sample, String> {
        let parts: Vec<&str> = line.split_whitespace().collect();

        if parts.len() != 3 {
            return Err(format!("expected 3 fields, found {}", parts.len()));
        }

        let stamp = format!("{} {}", parts[0], parts[1]);
        let time = parse_timestamp(&stamp)
            .ok_or_else(|| format!("invalid timestamp '{}'", stamp))?;
        let value = parse_value(parts[2])?;

        Ok(Sample::new(time, value))
    }
}

impl Default for ReferenceReader {
    fn default() -> Self {
        Self::new()
    }
}
