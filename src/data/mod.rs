//! Data module - CSV loading and normalization

mod loader;
mod processor;
mod schema;

pub use loader::{load_file, CustomerTable, LoadOptions, LoaderError, DEFAULT_DATE_FORMAT};
pub use processor::{DataProcessor, ProcessorError};
pub use schema::{TransactionRecord, CATEGORICAL_COLUMNS, NORMALIZED_COLUMNS, RAW_COLUMNS};
