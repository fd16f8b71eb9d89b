//! Saves the merged table to disk.

pub mod csv;
pub mod parquet;

pub use self::csv::save_csv;
pub use self::parquet::save_parquet;
