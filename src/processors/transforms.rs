use crate::models::{DailySeries, TimeSeries};
use chrono::NaiveDate;

/// Replace every missing daily value with `default`
pub fn fill_missing(series: &DailySeries, default: f64) -> DailySeries {
    let mut filled = series.clone();
    for value in filled.values_mut() {
        if value.is_none() {
            *value = Some(default);
        }
    }
    filled
}

/// Multiply every present value by `factor` (e.g. `M2FT`)
pub fn convert_units(series: &TimeSeries, factor: f64) -> TimeSeries {
    series.map_values(|v| v * factor)
}

/// Keep the days on or after `cutoff`
pub fn filter_from(series: &DailySeries, cutoff: NaiveDate) -> DailySeries {
    let mut kept = series.clone();
    kept.retain(|date| date >= cutoff);
    kept
}
