//! Data Processor Module
//! Lays coerced transaction records out as a typed polars table.

use chrono::{Datelike, NaiveDate};
use polars::prelude::*;
use thiserror::Error;

use super::schema::{TransactionRecord, CATEGORICAL_COLUMNS};

#[derive(Error, Debug)]
pub enum ProcessorError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
}

/// Builds the normalized table from parsed records.
pub struct DataProcessor;

impl DataProcessor {
    /// Lay out records column by column.
    ///
    /// Output columns follow `NORMALIZED_COLUMNS`: the 13 retained source
    /// fields, then `month`, `day` and `year` recomputed from `date`.
    pub fn build_table(records: &[TransactionRecord]) -> Result<DataFrame, ProcessorError> {
        let n = records.len();
        let mut dates: Vec<NaiveDate> = Vec::with_capacity(n);
        let mut customer_age: Vec<i64> = Vec::with_capacity(n);
        let mut age_group: Vec<&str> = Vec::with_capacity(n);
        let mut age_group_id: Vec<i64> = Vec::with_capacity(n);
        let mut customer_gender: Vec<&str> = Vec::with_capacity(n);
        let mut country: Vec<&str> = Vec::with_capacity(n);
        let mut product_category: Vec<&str> = Vec::with_capacity(n);
        let mut order_quantity: Vec<i64> = Vec::with_capacity(n);
        let mut unit_cost: Vec<f64> = Vec::with_capacity(n);
        let mut unit_price: Vec<f64> = Vec::with_capacity(n);
        let mut profit: Vec<f64> = Vec::with_capacity(n);
        let mut cost: Vec<f64> = Vec::with_capacity(n);
        let mut revenue: Vec<f64> = Vec::with_capacity(n);

        for record in records {
            dates.push(record.date);
            customer_age.push(record.customer_age);
            age_group.push(&record.age_group);
            age_group_id.push(record.age_group_id);
            customer_gender.push(&record.customer_gender);
            country.push(&record.country);
            product_category.push(&record.product_category);
            order_quantity.push(record.order_quantity);
            unit_cost.push(record.unit_cost);
            unit_price.push(record.unit_price);
            profit.push(record.profit);
            cost.push(record.cost);
            revenue.push(record.revenue);
        }

        let calendar = Self::calendar_columns(&dates);
        let mut columns = vec![
            Column::new("date".into(), dates),
            Column::new("customer_age".into(), customer_age),
            Column::new("age_group".into(), age_group),
            Column::new("age_group_id".into(), age_group_id),
            Column::new("customer_gender".into(), customer_gender),
            Column::new("country".into(), country),
            Column::new("product_category".into(), product_category),
            Column::new("order_quantity".into(), order_quantity),
            Column::new("unit_cost".into(), unit_cost),
            Column::new("unit_price".into(), unit_price),
            Column::new("profit".into(), profit),
            Column::new("cost".into(), cost),
            Column::new("revenue".into(), revenue),
        ];
        columns.extend(calendar);

        let df = DataFrame::new(columns)?;
        Self::mark_categorical(df, &CATEGORICAL_COLUMNS)
    }

    /// Recompute `month`, `day`, `year` from parsed dates.
    pub fn calendar_columns(dates: &[NaiveDate]) -> [Column; 3] {
        let month: Vec<i32> = dates.iter().map(|d| d.month() as i32).collect();
        let day: Vec<i32> = dates.iter().map(|d| d.day() as i32).collect();
        let year: Vec<i32> = dates.iter().map(|d| d.year()).collect();

        [
            Column::new("month".into(), month),
            Column::new("day".into(), day),
            Column::new("year".into(), year),
        ]
    }

    /// Store label columns as `Categorical`. Values are kept as-is; no
    /// closed set of labels is enforced.
    pub fn mark_categorical(df: DataFrame, names: &[&str]) -> Result<DataFrame, ProcessorError> {
        let categorical = DataType::Categorical(None, CategoricalOrdering::Physical);
        let columns = df
            .get_columns()
            .iter()
            .map(|column| {
                if names.contains(&column.name().as_str()) {
                    column.cast(&categorical)
                } else {
                    Ok(column.clone())
                }
            })
            .collect::<PolarsResult<Vec<Column>>>()?;

        Ok(DataFrame::new(columns)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::schema::NORMALIZED_COLUMNS;

    fn record(date: (i32, u32, u32), country: &str) -> TransactionRecord {
        TransactionRecord {
            date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            customer_age: 30,
            age_group: "Adults (35-64)".to_string(),
            age_group_id: 3,
            customer_gender: "F".to_string(),
            country: country.to_string(),
            product_category: "Bikes".to_string(),
            order_quantity: 2,
            unit_cost: 10.5,
            unit_price: 20.0,
            profit: 19.0,
            cost: 21.0,
            revenue: 40.0,
        }
    }

    #[test]
    fn builds_normalized_layout() {
        let records = vec![record((2016, 2, 29), "France"), record((2013, 11, 26), "Canada")];
        let df = DataProcessor::build_table(&records).unwrap();

        let names: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(names, NORMALIZED_COLUMNS);
        assert_eq!(df.height(), 2);
    }

    #[test]
    fn date_column_is_polars_date() {
        let records = vec![record((1970, 1, 2), "France")];
        let df = DataProcessor::build_table(&records).unwrap();

        let date = df.column("date").unwrap();
        assert_eq!(date.dtype(), &DataType::Date);
        let physical = date.cast(&DataType::Int32).unwrap();
        assert_eq!(physical.i32().unwrap().get(0), Some(1));
    }

    #[test]
    fn calendar_columns_follow_dates() {
        let dates = [
            NaiveDate::from_ymd_opt(2016, 2, 29).unwrap(),
            NaiveDate::from_ymd_opt(2013, 11, 26).unwrap(),
        ];
        let [month, day, year] = DataProcessor::calendar_columns(&dates);

        assert_eq!(month.i32().unwrap().get(0), Some(2));
        assert_eq!(day.i32().unwrap().get(0), Some(29));
        assert_eq!(year.i32().unwrap().get(1), Some(2013));
        assert_eq!(month.i32().unwrap().get(1), Some(11));
    }

    #[test]
    fn categorical_columns_keep_unseen_labels() {
        let records = vec![record((2015, 1, 1), "Atlantis")];
        let df = DataProcessor::build_table(&records).unwrap();

        let country = df.column("country").unwrap();
        assert!(matches!(country.dtype(), DataType::Categorical(_, _)));

        let as_text = country.cast(&DataType::String).unwrap();
        assert_eq!(as_text.str().unwrap().get(0), Some("Atlantis"));
    }
}
