//! Integer coding of categorical columns.

use anyhow::{Context, Result};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Integer coding of one categorical column.
///
/// `classes` holds the distinct observed values in sorted order; the code of
/// `classes[i]` is `i`. Codes are column-local: the same value may receive
/// different codes in different columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelEncoding {
    pub column: String,
    pub classes: Vec<String>,
}

impl LabelEncoding {
    /// Fit an encoding over the distinct values of `values`.
    fn fit(column: &str, values: &StringChunked) -> Self {
        let distinct: BTreeSet<&str> = values.into_iter().flatten().collect();
        Self {
            column: column.to_string(),
            classes: distinct.into_iter().map(str::to_string).collect(),
        }
    }

    /// Code assigned to `value`, if it was observed at fit time.
    pub fn encode(&self, value: &str) -> Option<u32> {
        self.classes
            .binary_search_by(|class| class.as_str().cmp(value))
            .ok()
            .map(|index| index as u32)
    }

    /// Original value for `code`.
    pub fn decode(&self, code: u32) -> Option<&str> {
        self.classes.get(code as usize).map(String::as_str)
    }

    /// Number of distinct classes.
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// True when no values were observed at fit time.
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

/// Replace every listed categorical column with its integer codes, in place.
///
/// Each column is fitted independently over its own distinct values, sorted
/// before code assignment so the mapping is stable across runs. Returns the
/// transformed frame together with the per-column encodings, in column order.
pub fn encode_categoricals(
    mut df: DataFrame,
    categorical: &[String],
) -> Result<(DataFrame, Vec<LabelEncoding>)> {
    let mut encodings = Vec::with_capacity(categorical.len());

    for name in categorical {
        let column = df
            .column(name)
            .with_context(|| format!("Missing categorical column '{}'", name))?
            .clone();
        let values = column
            .str()
            .with_context(|| format!("Column '{}' is not a string column", name))?;

        let encoding = LabelEncoding::fit(name, values);
        let codes: Vec<Option<u32>> = values
            .into_iter()
            .map(|value| value.and_then(|v| encoding.encode(v)))
            .collect();

        df.with_column(Series::new(name.as_str().into(), codes))
            .with_context(|| format!("Failed to replace column '{}' with codes", name))?;
        encodings.push(encoding);
    }

    Ok((df, encodings))
}
