use anyhow::{Context, Result};
use polars::prelude::*;
use std::path::Path;

/// Read a delimited weather file into a Polars DataFrame.
///
/// The file must carry a header row; columns are named by it and dtypes are
/// inferred per column. Missing cells become nulls.
pub fn load_weather_csv(csv_path: &Path) -> Result<DataFrame> {
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .try_into_reader_with_file_path(Some(csv_path.into()))
        .with_context(|| format!("Failed to open {}", csv_path.display()))?
        .finish()
        .with_context(|| format!("Failed to parse {} into a DataFrame", csv_path.display()))?;

    Ok(df)
}
