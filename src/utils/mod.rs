pub mod constants;
pub mod parsing;
pub mod progress;

pub use constants::*;
pub use parsing::{parse_timestamp, parse_value};
pub use progress::ProgressReporter;
