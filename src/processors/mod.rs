pub mod data_merger;
pub mod pipeline;
pub mod range_reducer;
pub mod transforms;

pub use data_merger::DataMerger;
pub use pipeline::{PipelineOutput, TidePipeline};
pub use range_reducer::{resample_daily, rolling_range, RangeReducer};
pub use transforms::{convert_units, fill_missing, filter_from};
