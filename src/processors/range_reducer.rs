use crate::models::{DailySeries, Sample, TimeSeries};
use crate::utils::constants::RANGE_WINDOW_HOURS;
use chrono::{Duration, NaiveDateTime};
use std::collections::VecDeque;

/// Rolling max minus rolling min over a centered time window.
///
/// The window around a sample at `t` holds the samples `s` with
/// `t - window/2 < s <= t + window/2`. Missing values are ignored; a window
/// with no present value yields a missing range.
pub fn rolling_range(series: &TimeSeries, window: Duration) -> TimeSeries {
    let samples = series.samples();
    let half = window / 2;

    // Monotonic deques of (time, value): maxima decreasing, minima increasing
    let mut maxima: VecDeque<(NaiveDateTime, f64)> = VecDeque::new();
    let mut minima: VecDeque<(NaiveDateTime, f64)> = VecDeque::new();
    let mut next = 0;
    let mut ranges = Vec::with_capacity(samples.len());

    for sample in samples {
        let upper = sample.time + half;
        let lower = sample.time - half;

        while next < samples.len() && samples[next].time <= upper {
            if let Some(value) = samples[next].value {
                let time = samples[next].time;
                while maxima.back().map_or(false, |&(_, v)| v <= value) {
                    maxima.pop_back();
                }
                maxima.push_back((time, value));
                while minima.back().map_or(false, |&(_, v)| v >= value) {
                    minima.pop_back();
                }
                minima.push_back((time, value));
            }
            next += 1;
        }

        while maxima.front().map_or(false, |&(t, _)| t <= lower) {
            maxima.pop_front();
        }
        while minima.front().map_or(false, |&(t, _)| t <= lower) {
            minima.pop_front();
        }

        let range = match (maxima.front(), minima.front()) {
            (Some(&(_, max)), Some(&(_, min))) => Some(max - min),
            _ => None,
        };
        ranges.push(Sample::new(sample.time, range));
    }

    TimeSeries::new(ranges)
}

/// One entry per calendar day from the first to the last sample's date.
///
/// A day takes the value of the sample at its midnight; days without a
/// midnight sample are missing.
pub fn resample_daily(series: &TimeSeries) -> DailySeries {
    let (first, last) = match (series.first_time(), series.last_time()) {
        (Some(first), Some(last)) => (first.date(), last.date()),
        _ => return DailySeries::new(),
    };

    first
        .iter_days()
        .take_while(|day| *day <= last)
        .map(|day| {
            let value = day
                .and_hms_opt(0, 0, 0)
                .and_then(|midnight| series.value_at(midnight))
                .flatten();
            (day, value)
        })
        .collect()
}

/// Daily tidal range reduction with a configurable window
#[derive(Debug, Clone, Copy)]
pub struct RangeReducer {
    window: Duration,
}

impl RangeReducer {
    pub fn new() -> Self {
        Self::with_window_hours(RANGE_WINDOW_HOURS)
    }

    pub fn with_window_hours(hours: f64) -> Self {
        Self {
            window: Duration::seconds((hours * 3600.0).round() as i64),
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Rolling range followed by the daily resample
    pub fn reduce(&self, series: &TimeSeries) -> DailySeries {
        resample_daily(&rolling_range(series, self.window))
    }
}

impl Default for RangeReducer {
    fn default() -> Self {
        Self::new()
    }
}
