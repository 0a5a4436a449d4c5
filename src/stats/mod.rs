//! Stats module - Correlation analysis

mod calculator;

pub use calculator::{
    customer_age_analysis, CorrelationMatrix, StatsCalculator, StatsError, ANALYSIS_COLUMNS,
};
