//! Column layout of the customer transactions dataset.

use chrono::NaiveDate;

/// Names applied positionally to the raw CSV fields, replacing whatever
/// header the file declares.
///
/// Mapping is by position only. If the upstream file ever reorders its
/// columns the values land under the wrong names without any error.
pub const RAW_COLUMNS: [&str; 16] = [
    "date",
    "day",
    "month",
    "year",
    "customer_age",
    "age_group",
    "age_group_id",
    "customer_gender",
    "country",
    "product_category",
    "order_quantity",
    "unit_cost",
    "unit_price",
    "profit",
    "cost",
    "revenue",
];

/// Columns of the normalized table, in output order.
pub const NORMALIZED_COLUMNS: [&str; 16] = [
    "date",
    "customer_age",
    "age_group",
    "age_group_id",
    "customer_gender",
    "country",
    "product_category",
    "order_quantity",
    "unit_cost",
    "unit_price",
    "profit",
    "cost",
    "revenue",
    "month",
    "day",
    "year",
];

/// Low-cardinality label columns stored as `Categorical`.
pub const CATEGORICAL_COLUMNS: [&str; 4] =
    ["age_group", "customer_gender", "country", "product_category"];

/// Raw field positions.
pub(crate) mod raw {
    pub const DATE: usize = 0;
    // 1..=3 are the source's own day/month/year, never read.
    pub const CUSTOMER_AGE: usize = 4;
    pub const AGE_GROUP: usize = 5;
    pub const AGE_GROUP_ID: usize = 6;
    pub const CUSTOMER_GENDER: usize = 7;
    pub const COUNTRY: usize = 8;
    pub const PRODUCT_CATEGORY: usize = 9;
    pub const ORDER_QUANTITY: usize = 10;
    pub const UNIT_COST: usize = 11;
    pub const UNIT_PRICE: usize = 12;
    pub const PROFIT: usize = 13;
    pub const COST: usize = 14;
    pub const REVENUE: usize = 15;
}

/// One type-coerced transaction row, before it is laid out as columns.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionRecord {
    pub date: NaiveDate,
    pub customer_age: i64,
    pub age_group: String,
    pub age_group_id: i64,
    pub customer_gender: String,
    pub country: String,
    pub product_category: String,
    pub order_quantity: i64,
    pub unit_cost: f64,
    pub unit_price: f64,
    pub profit: f64,
    pub cost: f64,
    pub revenue: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_positions_match_names() {
        assert_eq!(RAW_COLUMNS[raw::DATE], "date");
        assert_eq!(RAW_COLUMNS[raw::CUSTOMER_AGE], "customer_age");
        assert_eq!(RAW_COLUMNS[raw::AGE_GROUP_ID], "age_group_id");
        assert_eq!(RAW_COLUMNS[raw::PRODUCT_CATEGORY], "product_category");
        assert_eq!(RAW_COLUMNS[raw::UNIT_PRICE], "unit_price");
        assert_eq!(RAW_COLUMNS[raw::REVENUE], "revenue");
    }

    #[test]
    fn normalized_layout_drops_raw_calendar_fields_then_appends_derived() {
        let retained: Vec<&str> = RAW_COLUMNS
            .iter()
            .copied()
            .filter(|name| !matches!(*name, "day" | "month" | "year"))
            .collect();
        assert_eq!(retained.len(), 13);
        assert_eq!(&NORMALIZED_COLUMNS[..13], retained.as_slice());
        assert_eq!(&NORMALIZED_COLUMNS[13..], &["month", "day", "year"]);
    }
}
