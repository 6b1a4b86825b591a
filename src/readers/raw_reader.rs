use crate::error::{ProcessingError, Result};
use crate::models::{Sample, TimeSeries};
use crate::utils::constants::{DATETIME_COLUMN, FLAG_COLUMN, VALUE_COLUMN};
use crate::utils::parsing::{parse_timestamp, parse_value};
use csv::{ReaderBuilder, StringRecord, Trim};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Column positions resolved from a repository file header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ColumnLayout {
    datetime: usize,
    value: usize,
    flag: Option<usize>,
}

impl ColumnLayout {
    fn from_headers(headers: &StringRecord) -> std::result::Result<Self, String> {
        if headers.len() < 2 {
            return Err(format!(
                "expected at least 2 columns, found {}",
                headers.len()
            ));
        }

        let find = |name: &str| headers.iter().position(|h| h.eq_ignore_ascii_case(name));

        let datetime = find(DATETIME_COLUMN).unwrap_or(0);
        let value = find(VALUE_COLUMN)
            .unwrap_or(if datetime == 0 { 1 } else { 0 });
        if value == datetime {
            return Err("value column is the timestamp column".to_string());
        }

        Ok(Self {
            datetime,
            value,
            flag: find(FLAG_COLUMN),
        })
    }
}

/// Reader for raw station files from the time series repository.
///
/// ```text
/// # format: dwr-dms-1.0
/// # station_id: 9414290
/// # unit: meters
/// datetime,value,user_flag
/// 2017-01-01 00:00:00,1.234,
/// 2017-01-01 00:06:00,1.250,
/// ```
///
/// Comment lines are skipped, rows carrying a non-zero `user_flag` are
/// screened out as missing.
pub struct RawReader;

impl RawReader {
    pub fn new() -> Self {
        Self
    }

    /// Resolve `pattern` inside `dir`, sorted by path
    pub fn find_files(&self, dir: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
        let full_pattern = format!(
            "{}/{}",
            glob::Pattern::escape(&dir.to_string_lossy()),
            pattern
        );

        let mut files = Vec::new();
        for entry in glob::glob(&full_pattern)? {
            let path = entry.map_err(|e| ProcessingError::Io(e.into()))?;
            if path.is_file() {
                files.push(path);
            }
        }

        if files.is_empty() {
            return Err(ProcessingError::NoMatchingFiles {
                pattern: full_pattern,
            });
        }

        files.sort();
        Ok(files)
    }

    /// Read one repository file into a time series
    pub fn read_series(&self, path: &Path) -> Result<TimeSeries> {
        let mut reader = ReaderBuilder::new()
            .comment(Some(b'#'))
            .has_headers(true)
            .trim(Trim::All)
            .from_path(path)?;

        let headers = reader.headers()?.clone();
        let layout = ColumnLayout::from_headers(&headers).map_err(|message| {
            ProcessingError::InvalidRecord {
                path: path.to_path_buf(),
                line: headers.position().map_or(0, |p| p.line()),
                message,
            }
        })?;

        let mut samples = Vec::new();
        for result in reader.records() {
            let record = result?;
            let sample = self.parse_record(&record, layout).map_err(|message| {
                ProcessingError::InvalidRecord {
                    path: path.to_path_buf(),
                    line: record.position().map_or(0, |p| p.line()),
                    message,
                }
            })?;
            samples.push(sample);
        }

        debug!(
            path = %path.display(),
            samples = samples.len(),
            "read raw series"
        );

        Ok(TimeSeries::new(samples))
    }

    fn parse_record(
        &self,
        record: &StringRecord,
        layout: ColumnLayout,
    ) -> std::result::Result<Sample, String> {
        let stamp = record.get(layout.datetime).unwrap_or("");
        let time =
            parse_timestamp(stamp).ok_or_else(|| format!("invalid timestamp '{}'", stamp))?;

        let screened = layout
            .flag
            .and_then(|idx| record.get(idx))
            .map_or(false, |flag| !flag.is_empty() && flag != "0");

        let value = if screened {
            None
        } else {
            parse_value(record.get(layout.value).unwrap_or(""))?
        };

        Ok(Sample::new(time, value))
    }
}

impl Default for RawReader {
    fn default() -> Self {
        Self::new()
    }
}
