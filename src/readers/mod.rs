pub mod concurrent_reader;
pub mod range_table_reader;
pub mod raw_reader;
pub mod reference_reader;

pub use concurrent_reader::{ConcurrentReader, SourceData};
pub use range_table_reader::RangeTableReader;
pub use raw_reader::RawReader;
pub use reference_reader::ReferenceReader;
