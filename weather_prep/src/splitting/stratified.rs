//! Seeded, stratified train/test partitioning.

use anyhow::{bail, Context, Result};
use polars::prelude::*;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::collections::BTreeMap;

/// The four artifacts of a train/test split: feature and label frames for
/// each side, forming an exclusive, disjoint row partition of the source
/// table.
#[derive(Debug)]
pub struct SplitSets {
    pub x_train: DataFrame,
    pub x_test: DataFrame,
    pub y_train: DataFrame,
    pub y_test: DataFrame,
}

/// Row index assignment produced by [`split_indices`], ascending within each
/// side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitIndices {
    pub train: Vec<IdxSize>,
    pub test: Vec<IdxSize>,
}

/// Assign each row to train or test, stratified by the label column.
///
/// Rows are grouped by label class; within each class a seeded shuffle
/// decides which `round(class_len * test_fraction)` rows land in test and
/// the rest in train, so each side preserves the label's class proportions
/// up to rounding. Classes are visited in sorted order and a single RNG is
/// used throughout: the assignment is fully determined by the data, the
/// label column, the fraction, and the seed. Missing labels are an error.
pub fn split_indices(
    df: &DataFrame,
    label: &str,
    test_fraction: f64,
    seed: u64,
) -> Result<SplitIndices> {
    if !(0.0..1.0).contains(&test_fraction) {
        bail!("Test fraction must be in [0, 1), got {}", test_fraction);
    }

    let labels = df
        .column(label)
        .with_context(|| format!("Missing label column '{}'", label))?
        .cast(&DataType::String)
        .with_context(|| format!("Failed to read classes of label column '{}'", label))?;
    let labels = labels
        .str()
        .with_context(|| format!("Failed to read classes of label column '{}'", label))?;

    let mut classes: BTreeMap<String, Vec<IdxSize>> = BTreeMap::new();
    for (row, value) in labels.into_iter().enumerate() {
        match value {
            Some(class) => classes
                .entry(class.to_string())
                .or_default()
                .push(row as IdxSize),
            None => bail!("Label column '{}' has a missing value at row {}", label, row),
        }
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let mut train = Vec::new();
    let mut test = Vec::new();

    for (_, mut rows) in classes {
        let n_test = (rows.len() as f64 * test_fraction).round() as usize;
        rows.shuffle(&mut rng);
        test.extend_from_slice(&rows[..n_test]);
        train.extend_from_slice(&rows[n_test..]);
    }

    train.sort_unstable();
    test.sort_unstable();

    Ok(SplitIndices { train, test })
}

/// Split `df` into stratified train/test feature and label frames.
///
/// Features are every column except `label`; labels are the single `label`
/// column. See [`split_indices`] for the assignment rules.
pub fn stratified_split(
    df: &DataFrame,
    label: &str,
    test_fraction: f64,
    seed: u64,
) -> Result<SplitSets> {
    let indices = split_indices(df, label, test_fraction, seed)?;

    let features = df
        .drop(label)
        .with_context(|| format!("Missing label column '{}'", label))?;
    let labels = df
        .select([label])
        .with_context(|| format!("Missing label column '{}'", label))?;

    let train_idx = IdxCa::from_vec("train".into(), indices.train);
    let test_idx = IdxCa::from_vec("test".into(), indices.test);

    Ok(SplitSets {
        x_train: features.take(&train_idx)?,
        x_test: features.take(&test_idx)?,
        y_train: labels.take(&train_idx)?,
        y_test: labels.take(&test_idx)?,
    })
}
