pub mod range_analyzer;

pub use range_analyzer::{RangeAnalyzer, RangeStatistics, RunSummary};
