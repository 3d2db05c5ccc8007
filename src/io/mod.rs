//! I/O layer: the CSV `reader` that builds a `RecordTable`, and `writers`
//! for the cleaned CSV and the JSON run report.
pub mod reader;
pub use reader::{read_table, read_table_from};

pub mod writers;
