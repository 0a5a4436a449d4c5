//! Statistics Calculator Module
//! Pairwise correlation over the numeric columns of the customer table.

use polars::prelude::*;
use statrs::statistics::Statistics;
use std::fmt;
use thiserror::Error;
use tracing::debug;

use crate::data::CustomerTable;

/// Columns compared by the customer age analysis, in matrix order.
pub const ANALYSIS_COLUMNS: [&str; 8] = [
    "month",
    "customer_age",
    "order_quantity",
    "unit_cost",
    "unit_price",
    "profit",
    "cost",
    "revenue",
];

#[derive(Error, Debug)]
pub enum StatsError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
    #[error("No columns selected")]
    NoColumns,
}

/// Symmetric Pearson correlation matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationMatrix {
    pub columns: Vec<String>,
    /// Row-major, `columns.len()` squared.
    pub values: Vec<f64>,
}

impl CorrelationMatrix {
    pub fn size(&self) -> usize {
        self.columns.len()
    }

    /// Coefficient between two named columns.
    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.columns.iter().position(|c| c == a)?;
        let j = self.columns.iter().position(|c| c == b)?;
        Some(self.values[i * self.size() + j])
    }
}

impl fmt::Display for CorrelationMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.columns.iter().map(String::len).max().unwrap_or(0);
        write!(f, "{:width$}", "")?;
        for name in &self.columns {
            write!(f, " {name:>width$}")?;
        }
        for (i, name) in self.columns.iter().enumerate() {
            write!(f, "\n{name:width$}")?;
            for value in &self.values[i * self.size()..(i + 1) * self.size()] {
                write!(f, " {value:>width$.4}")?;
            }
        }
        Ok(())
    }
}

/// Handles statistical calculations.
pub struct StatsCalculator;

impl StatsCalculator {
    /// Sample Pearson correlation coefficient.
    ///
    /// NaN when either side has fewer than two values or no variance.
    pub fn pearson(x: &[f64], y: &[f64]) -> f64 {
        if x.len() != y.len() || x.len() < 2 {
            return f64::NAN;
        }

        let sx = x.std_dev();
        let sy = y.std_dev();
        if sx == 0.0 || sy == 0.0 {
            return f64::NAN;
        }

        let r = x.covariance(y) / (sx * sy);
        r.clamp(-1.0, 1.0)
    }

    /// Get a column as `f64` values, nulls as NaN.
    pub fn column_values(df: &DataFrame, name: &str) -> Result<Vec<f64>, StatsError> {
        let casted = df.column(name)?.cast(&DataType::Float64)?;
        let values = casted
            .f64()?
            .into_iter()
            .map(|v| v.unwrap_or(f64::NAN))
            .collect();
        Ok(values)
    }

    /// Correlate every pair of `columns`.
    pub fn correlation_matrix(
        df: &DataFrame,
        columns: &[&str],
    ) -> Result<CorrelationMatrix, StatsError> {
        if columns.is_empty() {
            return Err(StatsError::NoColumns);
        }

        let data = columns
            .iter()
            .map(|name| Self::column_values(df, name))
            .collect::<Result<Vec<_>, _>>()?;

        let n = columns.len();
        let mut values = vec![f64::NAN; n * n];
        for i in 0..n {
            values[i * n + i] = 1.0;
            for j in (i + 1)..n {
                let r = Self::pearson(&data[i], &data[j]);
                values[i * n + j] = r;
                values[j * n + i] = r;
            }
        }

        Ok(CorrelationMatrix {
            columns: columns.iter().map(|c| c.to_string()).collect(),
            values,
        })
    }
}

/// Correlate month, age, quantity and the money columns.
pub fn customer_age_analysis(table: &CustomerTable) -> Result<CorrelationMatrix, StatsError> {
    let matrix = StatsCalculator::correlation_matrix(table.dataframe(), &ANALYSIS_COLUMNS)?;
    debug!(rows = table.height(), size = matrix.size(), "computed correlation matrix");
    Ok(matrix)
}
