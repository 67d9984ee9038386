use anyhow::{bail, Context, Result};
use polars::prelude::*;

/// Calendar columns derived from the raw date column.
pub const YEAR_COLUMN: &str = "Year";
pub const MONTH_COLUMN: &str = "Month";
pub const DAY_COLUMN: &str = "Day";

/// Date format expected in the raw column.
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Derive `Year`, `Month`, `Day` integer columns from `date_column` and drop
/// the original column.
///
/// The column must hold `%Y-%m-%d` strings (strict parsing, any unparsable
/// value is an error) or already be a `Date` column.
pub fn decompose_date(df: DataFrame, date_column: &str) -> Result<DataFrame> {
    let dtype = df
        .column(date_column)
        .with_context(|| format!("Missing date column '{}'", date_column))?
        .dtype()
        .clone();

    let lazy = match dtype {
        DataType::String => df.lazy().with_column(
            col(date_column)
                .str()
                .to_date(StrptimeOptions {
                    format: Some(DATE_FORMAT.into()),
                    ..Default::default()
                })
                .alias(date_column),
        ),
        DataType::Date => df.lazy(),
        other => bail!(
            "Date column '{}' has unsupported type {:?}",
            date_column,
            other
        ),
    };

    let df = lazy
        .with_columns([
            col(date_column)
                .dt()
                .year()
                .cast(DataType::Int32)
                .alias(YEAR_COLUMN),
            col(date_column)
                .dt()
                .month()
                .cast(DataType::Int32)
                .alias(MONTH_COLUMN),
            col(date_column)
                .dt()
                .day()
                .cast(DataType::Int32)
                .alias(DAY_COLUMN),
        ])
        .collect()
        .with_context(|| format!("Failed to parse date column '{}'", date_column))?;

    df.drop(date_column)
        .with_context(|| format!("Failed to drop date column '{}'", date_column))
}
