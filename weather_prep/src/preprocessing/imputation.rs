//! Missing-value imputation over a fixed column partition.
//!
//! The partition into categorical and numerical columns is snapshotted once,
//! after calendar decomposition and before any filling, and the encoder
//! reuses the same snapshot later even though imputation rewrites column
//! contents.

use anyhow::{Context, Result};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Snapshot of the table's columns split by kind.
///
/// Categorical columns are those with `String` dtype; numerical columns are
/// those with a primitive numeric dtype. Columns of any other dtype (e.g.
/// Boolean or Date) belong to neither set and pass through the pipeline
/// untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnPartition {
    pub categorical: Vec<String>,
    pub numerical: Vec<String>,
}

impl ColumnPartition {
    /// Compute the partition for `df`, preserving column order.
    pub fn of(df: &DataFrame) -> Self {
        let mut categorical = Vec::new();
        let mut numerical = Vec::new();

        for column in df.get_columns() {
            let name = column.name().to_string();
            match column.dtype() {
                DataType::String => categorical.push(name),
                dtype if is_numeric(dtype) => numerical.push(name),
                _ => {}
            }
        }

        Self {
            categorical,
            numerical,
        }
    }
}

fn is_numeric(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::Float32
            | DataType::Float64
    )
}

/// Fill missing values in place of nulls, column by column.
///
/// Numerical columns are filled with the column mean over non-missing
/// values; categorical columns with the column mode, ties resolved to the
/// lexicographically smallest value. Columns without missing values are not
/// touched at all, so their dtypes are preserved. A categorical column with
/// no non-missing values has no mode and fails the operation; a numerical
/// column with no non-missing values stays all-missing.
pub fn impute_missing(df: DataFrame, partition: &ColumnPartition) -> Result<DataFrame> {
    let mut fills: Vec<Expr> = Vec::new();

    for name in &partition.numerical {
        let column = df
            .column(name)
            .with_context(|| format!("Missing numerical column '{}'", name))?;
        if column.null_count() == 0 {
            continue;
        }
        fills.push(col(name.as_str()).fill_null(col(name.as_str()).mean()));
    }

    for name in &partition.categorical {
        let column = df
            .column(name)
            .with_context(|| format!("Missing categorical column '{}'", name))?;
        if column.null_count() == 0 {
            continue;
        }
        let values = column
            .str()
            .with_context(|| format!("Column '{}' is not a string column", name))?;
        let mode = column_mode(values)
            .with_context(|| format!("Column '{}' has no values to impute from", name))?;
        fills.push(col(name.as_str()).fill_null(lit(mode)));
    }

    if fills.is_empty() {
        return Ok(df);
    }

    df.lazy()
        .with_columns(fills)
        .collect()
        .context("Failed to fill missing values")
}

/// Most frequent non-missing value; ties resolve to the lexicographically
/// smallest candidate. `None` for an all-missing column.
fn column_mode(values: &StringChunked) -> Option<String> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for value in values.into_iter().flatten() {
        *counts.entry(value).or_insert(0) += 1;
    }

    counts
        .into_iter()
        .max_by(|(a_value, a_count), (b_value, b_count)| {
            a_count.cmp(b_count).then_with(|| b_value.cmp(a_value))
        })
        .map(|(value, _)| value.to_string())
}
