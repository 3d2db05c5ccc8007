pub mod csv;
pub mod report;

pub use self::csv::{write_cleaned_csv, write_cleaned_to};
pub use self::report::write_report;
