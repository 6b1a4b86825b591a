use crate::error::Result;
use crate::models::DailySeries;
use crate::utils::constants::{
    OUTPUT_DATE_FORMAT, OUTPUT_DATE_HEADER, OUTPUT_VALUE_HEADER, OUTPUT_VALUE_PRECISION,
};
use csv::Writer;
use std::fs;
use std::path::Path;
use tracing::info;

/// Writes a daily series as `date,range` rows
pub struct CsvWriter {
    date_format: String,
    precision: usize,
}

impl CsvWriter {
    pub fn new() -> Self {
        Self {
            date_format: OUTPUT_DATE_FORMAT.to_string(),
            precision: OUTPUT_VALUE_PRECISION,
        }
    }

    /// Write the series to `path`, creating the parent directory if needed
    pub fn write_series(&self, series: &DailySeries, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let mut writer = Writer::from_path(path)?;

        writer.write_record([OUTPUT_DATE_HEADER, OUTPUT_VALUE_HEADER])?;
        for (date, value) in series.iter() {
            // Missing values are written as empty fields
            let value = value.map_or_else(String::new, |v| format!("{:.*}", self.precision, v));
            writer.write_record([date.format(&self.date_format).to_string(), value])?;
        }
        writer.flush()?;

        info!(path = %path.display(), rows = series.len(), "wrote daily ranges");
        Ok(())
    }
}

impl Default for CsvWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::readers::RangeTableReader;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2017, 1, d).unwrap()
    }

    #[test]
    fn test_write_format() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("out").join("sftide.csv");
        let series: DailySeries = vec![
            (day(1), Some(5.8)),
            (day(2), Some(7.2)),
            (day(3), Some(6.004999)),
            (day(4), None),
        ]
        .into_iter()
        .collect();

        CsvWriter::new().write_series(&series, &path)?;

        let contents = fs::read_to_string(&path)?;
        assert_eq!(
            contents,
            "date,range\n2017-01-01,5.80\n2017-01-02,7.20\n2017-01-03,6.00\n2017-01-04,\n"
        );
        Ok(())
    }

    #[test]
    fn test_round_trip_to_two_decimals() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("sftide.csv");
        let series: DailySeries = (1..=20)
            .map(|d| (day(d), Some(3.0 + d as f64 * 0.3137)))
            .collect();

        CsvWriter::new().write_series(&series, &path)?;
        let read_back = RangeTableReader::new().read_daily(&path)?;

        assert_eq!(read_back.len(), series.len());
        for ((d1, v1), (d2, v2)) in series.iter().zip(read_back.iter()) {
            assert_eq!(d1, d2);
            assert!((v1.unwrap() - v2.unwrap()).abs() <= 0.005 + 1e-12);
        }
        Ok(())
    }

    #[test]
    fn test_unwritable_destination() -> Result<()> {
        let dir = TempDir::new()?;
        let blocker = dir.path().join("file");
        fs::write(&blocker, "not a directory")?;

        let result = CsvWriter::new().write_series(&DailySeries::new(), &blocker.join("sftide.csv"));
        assert!(result.is_err());
        Ok(())
    }
}
