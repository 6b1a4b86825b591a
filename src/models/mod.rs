pub mod range_table;
pub mod series;

pub use range_table::RangeTable;
pub use series::{DailySeries, Sample, TimeSeries};
