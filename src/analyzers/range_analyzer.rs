use crate::models::DailySeries;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Summary statistics of a daily tidal range series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeStatistics {
    pub days: usize,
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
    pub missing_days: usize,
    pub fill_value_days: usize,
    pub min_range: Option<f64>,
    pub max_range: Option<f64>,
    pub mean_range: Option<f64>,
    pub contiguous: bool,
}

impl RangeStatistics {
    pub fn summary(&self) -> String {
        let fmt_date = |d: Option<NaiveDate>| d.map_or("-".to_string(), |d| d.to_string());
        let fmt_ft = |v: Option<f64>| v.map_or("-".to_string(), |v| format!("{:.2} ft", v));

        let mut summary = format!(
            "Daily Tidal Range Summary:\n  Days: {}\n  Period: {} to {}\n",
            self.days,
            fmt_date(self.first_date),
            fmt_date(self.last_date)
        );
        summary.push_str(&format!(
            "  Range: min {}, mean {}, max {}\n",
            fmt_ft(self.min_range),
            fmt_ft(self.mean_range),
            fmt_ft(self.max_range)
        ));
        summary.push_str(&format!(
            "  Missing days: {}\n  Days at fill value: {}\n  Contiguous: {}",
            self.missing_days,
            self.fill_value_days,
            if self.contiguous { "yes" } else { "no" }
        ));

        summary
    }
}

/// Provenance of a merged pipeline result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub reference_days: usize,
    pub raw_days: usize,
    pub raw_files: usize,
    pub days_from_raw: usize,
    pub days_from_reference: usize,
    pub merged: RangeStatistics,
}

impl RunSummary {
    pub fn summary(&self) -> String {
        format!(
            "{}\n  Raw files: {}\n  Days from raw series: {} of {}\n  Days from reference series: {} of {}",
            self.merged.summary(),
            self.raw_files,
            self.days_from_raw,
            self.raw_days,
            self.days_from_reference,
            self.reference_days
        )
    }
}

pub struct RangeAnalyzer {
    fill_value: f64,
}

impl RangeAnalyzer {
    pub fn new(fill_value: f64) -> Self {
        Self { fill_value }
    }

    pub fn analyze(&self, series: &DailySeries) -> RangeStatistics {
        let mut min_range: Option<f64> = None;
        let mut max_range: Option<f64> = None;
        let mut total = 0.0;
        let mut count = 0usize;
        let mut fill_value_days = 0usize;

        for (_, value) in series.present() {
            min_range = Some(min_range.map_or(value, |m| m.min(value)));
            max_range = Some(max_range.map_or(value, |m| m.max(value)));
            total += value;
            count += 1;
            if (value - self.fill_value).abs() < 1e-9 {
                fill_value_days += 1;
            }
        }

        RangeStatistics {
            days: series.len(),
            first_date: series.first_date(),
            last_date: series.last_date(),
            missing_days: series.missing_count(),
            fill_value_days,
            min_range,
            max_range,
            mean_range: if count > 0 {
                Some(total / count as f64)
            } else {
                None
            },
            contiguous: series.is_contiguous(),
        }
    }

    /// Attribute each merged day to the series that supplied it
    pub fn summarize_run(
        &self,
        reference: &DailySeries,
        raw: &DailySeries,
        merged: &DailySeries,
        raw_files: usize,
    ) -> RunSummary {
        let days_from_raw = merged
            .present()
            .filter(|(date, value)| raw.get(*date) == Some(Some(*value)))
            .count();
        let days_from_reference = merged
            .present()
            .filter(|(date, value)| {
                raw.get(*date) != Some(Some(*value))
                    && reference.get(*date) == Some(Some(*value))
            })
            .count();

        RunSummary {
            reference_days: reference.len(),
            raw_days: raw.len(),
            raw_files,
            days_from_raw,
            days_from_reference,
            merged: self.analyze(merged),
        }
    }
}
