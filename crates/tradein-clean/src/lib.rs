//! Turns captured quote rows into one row per device path with a price
//! column per condition.

pub mod condition;
pub mod error;
pub mod pivot;
pub mod price;
pub mod table;

pub use condition::classify_condition;
pub use error::CleanError;
pub use pivot::clean;
pub use price::extract_numerical_price;
pub use table::{
    clean_file_name, raw_file_name, read_raw, read_raw_file, write_raw, write_raw_file,
    write_wide, write_wide_file, RAW_HEADERS, WIDE_HEADERS,
};
