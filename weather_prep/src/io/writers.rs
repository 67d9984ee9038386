use anyhow::{Context, Result};
use polars::prelude::*;
use std::fs::File;
use std::path::Path;

use crate::splitting::SplitSets;

/// Fixed artifact filenames inside the output directory.
pub const TRAIN_FEATURES_FILE: &str = "X_train.parquet";
pub const TEST_FEATURES_FILE: &str = "X_test.parquet";
pub const TRAIN_LABELS_FILE: &str = "y_train.parquet";
pub const TEST_LABELS_FILE: &str = "y_test.parquet";

/// Write a single DataFrame to a parquet file.
pub fn write_parquet(df: &mut DataFrame, path: &Path) -> Result<()> {
    let file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;

    ParquetWriter::new(file)
        .finish(df)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    Ok(())
}

/// Persist the four split artifacts into `output_dir` under their fixed names.
pub fn persist_split(sets: &mut SplitSets, output_dir: &Path) -> Result<()> {
    write_parquet(&mut sets.x_train, &output_dir.join(TRAIN_FEATURES_FILE))?;
    write_parquet(&mut sets.x_test, &output_dir.join(TEST_FEATURES_FILE))?;
    write_parquet(&mut sets.y_train, &output_dir.join(TRAIN_LABELS_FILE))?;
    write_parquet(&mut sets.y_test, &output_dir.join(TEST_LABELS_FILE))?;

    Ok(())
}
