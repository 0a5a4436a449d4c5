//! CSV Data Loader Module
//! Reads the transactions CSV, coerces every field and builds the normalized table.

use chrono::NaiveDate;
use csv::StringRecord;
use polars::prelude::DataFrame;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;
use tracing::debug;

use super::processor::{DataProcessor, ProcessorError};
use super::schema::{raw, TransactionRecord, RAW_COLUMNS};

/// Date format of the source dataset.
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to open {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to read CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("Line {line}: expected {expected} fields, found {found}")]
    Structure {
        line: u64,
        expected: usize,
        found: usize,
    },
    #[error("Line {line}: cannot read {value:?} in column '{column}' as {expected}")]
    Coercion {
        line: u64,
        column: &'static str,
        value: String,
        expected: &'static str,
    },
    #[error("Failed to build table: {0}")]
    Processor(#[from] ProcessorError),
}

/// Options controlling how raw text is interpreted.
#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// chrono format string for the `date` field.
    pub date_format: String,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            date_format: DEFAULT_DATE_FORMAT.to_string(),
        }
    }
}

/// The normalized customer transactions table.
#[derive(Debug, Clone)]
pub struct CustomerTable {
    df: DataFrame,
}

impl CustomerTable {
    /// Get list of column names.
    pub fn column_names(&self) -> Vec<String> {
        self.df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    /// Get the number of rows.
    pub fn height(&self) -> usize {
        self.df.height()
    }

    /// Get the number of columns.
    pub fn width(&self) -> usize {
        self.df.width()
    }

    /// Get a reference to the underlying DataFrame.
    pub fn dataframe(&self) -> &DataFrame {
        &self.df
    }
}

/// Load and normalize the transactions CSV at `path`.
///
/// The header row is discarded and `RAW_COLUMNS` applied by position.
/// Any structural or coercion failure aborts the whole load.
pub fn load_file(path: &Path, options: &LoadOptions) -> Result<CustomerTable, LoaderError> {
    let file = File::open(path).map_err(|source| LoaderError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(file);

    let mut records = Vec::new();
    for result in reader.records() {
        let row = result?;
        records.push(parse_record(&row, options)?);
    }
    debug!(rows = records.len(), path = %path.display(), "parsed csv");

    let df = DataProcessor::build_table(&records)?;
    debug!(rows = df.height(), columns = df.width(), "normalized table");
    Ok(CustomerTable { df })
}

/// Coerce one raw CSV row. The source's own day/month/year are skipped.
fn parse_record(row: &StringRecord, options: &LoadOptions) -> Result<TransactionRecord, LoaderError> {
    let line = row.position().map(|p| p.line()).unwrap_or(0);
    if row.len() != RAW_COLUMNS.len() {
        return Err(LoaderError::Structure {
            line,
            expected: RAW_COLUMNS.len(),
            found: row.len(),
        });
    }

    let field = RawField { row, line };
    Ok(TransactionRecord {
        date: field.date(raw::DATE, &options.date_format)?,
        customer_age: field.parse(raw::CUSTOMER_AGE, "integer")?,
        age_group: field.text(raw::AGE_GROUP),
        age_group_id: field.parse(raw::AGE_GROUP_ID, "integer")?,
        customer_gender: field.text(raw::CUSTOMER_GENDER),
        country: field.text(raw::COUNTRY),
        product_category: field.text(raw::PRODUCT_CATEGORY),
        order_quantity: field.parse(raw::ORDER_QUANTITY, "integer")?,
        unit_cost: field.decimal(raw::UNIT_COST)?,
        unit_price: field.decimal(raw::UNIT_PRICE)?,
        profit: field.decimal(raw::PROFIT)?,
        cost: field.decimal(raw::COST)?,
        revenue: field.decimal(raw::REVENUE)?,
    })
}

/// Positional access into a row whose length is already checked.
struct RawField<'a> {
    row: &'a StringRecord,
    line: u64,
}

impl RawField<'_> {
    fn value(&self, index: usize) -> &str {
        self.row.get(index).unwrap_or_default()
    }

    fn text(&self, index: usize) -> String {
        self.value(index).to_string()
    }

    fn parse<T: FromStr>(&self, index: usize, expected: &'static str) -> Result<T, LoaderError> {
        let value = self.value(index);
        value.trim().parse().map_err(|_| self.coercion(index, value, expected))
    }

    /// Finite decimal only; `NaN` and `inf` spellings are rejected.
    fn decimal(&self, index: usize) -> Result<f64, LoaderError> {
        let parsed: f64 = self.parse(index, "decimal")?;
        if !parsed.is_finite() {
            return Err(self.coercion(index, self.value(index), "decimal"));
        }
        Ok(parsed)
    }

    fn date(&self, index: usize, format: &str) -> Result<NaiveDate, LoaderError> {
        let value = self.value(index);
        NaiveDate::parse_from_str(value.trim(), format)
            .map_err(|_| self.coercion(index, value, "date"))
    }

    fn coercion(&self, index: usize, value: &str, expected: &'static str) -> LoaderError {
        LoaderError::Coercion {
            line: self.line,
            column: RAW_COLUMNS[index],
            value: value.to_string(),
            expected,
        }
    }
}
