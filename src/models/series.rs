use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single observation. `None` marks a missing value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub time: NaiveDateTime,
    pub value: Option<f64>,
}

impl Sample {
    pub fn new(time: NaiveDateTime, value: Option<f64>) -> Self {
        Self { time, value }
    }

    pub fn is_missing(&self) -> bool {
        self.value.is_none()
    }
}

/// Sub-daily samples sorted by time with unique timestamps.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimeSeries {
    samples: Vec<Sample>,
}

impl TimeSeries {
    /// Build a series from samples in any order.
    ///
    /// On duplicate timestamps the sample supplied later wins, unless it is
    /// missing and an earlier one is not.
    pub fn new(mut samples: Vec<Sample>) -> Self {
        samples.sort_by_key(|s| s.time);

        let mut unique: Vec<Sample> = Vec::with_capacity(samples.len());
        for sample in samples {
            match unique.last_mut() {
                Some(last) if last.time == sample.time => {
                    if sample.value.is_some() {
                        last.value = sample.value;
                    }
                }
                _ => unique.push(sample),
            }
        }

        Self { samples: unique }
    }

    /// Combine several series, later ones taking precedence on shared timestamps.
    pub fn concat(parts: Vec<TimeSeries>) -> Self {
        let total = parts.iter().map(|p| p.len()).sum();
        let mut samples = Vec::with_capacity(total);
        for part in parts {
            samples.extend(part.samples);
        }
        Self::new(samples)
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn first_time(&self) -> Option<NaiveDateTime> {
        self.samples.first().map(|s| s.time)
    }

    pub fn last_time(&self) -> Option<NaiveDateTime> {
        self.samples.last().map(|s| s.time)
    }

    /// Value recorded exactly at `time`; outer `None` when there is no sample.
    pub fn value_at(&self, time: NaiveDateTime) -> Option<Option<f64>> {
        self.samples
            .binary_search_by_key(&time, |s| s.time)
            .ok()
            .map(|idx| self.samples[idx].value)
    }

    pub fn missing_count(&self) -> usize {
        self.samples.iter().filter(|s| s.is_missing()).count()
    }

    /// Apply `f` to every present value.
    pub fn map_values<F>(&self, f: F) -> Self
    where
        F: Fn(f64) -> f64,
    {
        Self {
            samples: self
                .samples
                .iter()
                .map(|s| Sample::new(s.time, s.value.map(&f)))
                .collect(),
        }
    }
}

/// Daily range series keyed by calendar date, values in feet.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DailySeries {
    values: BTreeMap<NaiveDate, Option<f64>>,
}

impl DailySeries {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, date: NaiveDate, value: Option<f64>) {
        self.values.insert(date, value);
    }

    /// Value for `date`; outer `None` when the date is not in the index.
    pub fn get(&self, date: NaiveDate) -> Option<Option<f64>> {
        self.values.get(&date).copied()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.values.contains_key(&date)
    }

    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, Option<f64>)> + '_ {
        self.values.iter().map(|(d, v)| (*d, *v))
    }

    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.values.keys().copied()
    }

    /// Present values only, in date order.
    pub fn present(&self) -> impl Iterator<Item = (NaiveDate, f64)> + '_ {
        self.values
            .iter()
            .filter_map(|(d, v)| v.map(|value| (*d, value)))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.values.keys().next().copied()
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.values.keys().next_back().copied()
    }

    pub fn missing_count(&self) -> usize {
        self.values.values().filter(|v| v.is_none()).count()
    }

    /// True when every day between the first and last date is indexed.
    pub fn is_contiguous(&self) -> bool {
        match (self.first_date(), self.last_date()) {
            (Some(first), Some(last)) => {
                (last - first).num_days() + 1 == self.values.len() as i64
            }
            _ => true,
        }
    }

    pub(crate) fn values_mut(&mut self) -> impl Iterator<Item = &mut Option<f64>> {
        self.values.values_mut()
    }

    pub(crate) fn retain<F>(&mut self, mut keep: F)
    where
        F: FnMut(NaiveDate) -> bool,
    {
        self.values.retain(|date, _| keep(*date));
    }
}

impl FromIterator<(NaiveDate, Option<f64>)> for DailySeries {
    fn from_iter<I: IntoIterator<Item = (NaiveDate, Option<f64>)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2017, 1, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_time_series_sorts_and_deduplicates() {
        let series = TimeSeries::new(vec![
            Sample::new(at(2, 0), Some(2.0)),
            Sample::new(at(1, 0), Some(1.0)),
            Sample::new(at(2, 0), Some(3.0)),
            Sample::new(at(1, 0), None),
        ]);

        assert_eq!(series.len(), 2);
        assert_eq!(series.value_at(at(1, 0)), Some(Some(1.0)));
        assert_eq!(series.value_at(at(2, 0)), Some(Some(3.0)));
        assert_eq!(series.value_at(at(3, 0)), None);
    }

    #[test]
    fn test_concat_prefers_later_parts() {
        let early = TimeSeries::new(vec![
            Sample::new(at(1, 0), Some(1.0)),
            Sample::new(at(1, 1), Some(1.5)),
        ]);
        let late = TimeSeries::new(vec![
            Sample::new(at(1, 1), Some(9.0)),
            Sample::new(at(1, 2), None),
        ]);

        let combined = TimeSeries::concat(vec![early, late]);
        assert_eq!(combined.len(), 3);
        assert_eq!(combined.value_at(at(1, 1)), Some(Some(9.0)));
        assert_eq!(combined.missing_count(), 1);
    }

    #[test]
    fn test_daily_series_contiguity() {
        let d = |day| NaiveDate::from_ymd_opt(2017, 1, day).unwrap();
        let mut series: DailySeries = vec![(d(1), Some(1.0)), (d(2), None)].into_iter().collect();
        assert!(series.is_contiguous());
        assert_eq!(series.missing_count(), 1);

        series.insert(d(5), Some(2.0));
        assert!(!series.is_contiguous());
        assert_eq!(series.first_date(), Some(d(1)));
        assert_eq!(series.last_date(), Some(d(5)));
        assert_eq!(series.present().count(), 2);
    }
}
