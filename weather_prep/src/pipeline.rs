//! Four-stage dataset preparation pipeline.
//!
//! Stages run in strict sequence: load, preprocess, encode, split. Each
//! stage logs an info message on success; on failure it logs at error level
//! and returns its own [`PipelineError`] variant wrapping the cause. The
//! first failing stage aborts the run.

use anyhow::{Context, Result};
use log::{error, info};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs;

use crate::config::PipelineConfig;
use crate::encoding::{self, LabelEncoding};
use crate::error::{PipelineError, PipelineResult};
use crate::io::{loaders, writers};
use crate::preprocessing::{calendar, imputation, ColumnPartition};
use crate::splitting::{self, SplitSets};

/// Summary of a completed preparation run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrepareReport {
    /// Rows in the loaded table.
    pub rows: usize,
    /// Feature columns after preprocessing and encoding.
    pub feature_columns: usize,
    /// Categorical columns per the fixed partition.
    pub categorical_columns: Vec<String>,
    /// Numerical columns per the fixed partition.
    pub numerical_columns: Vec<String>,
    /// Per-column integer codings, in column order.
    pub encodings: Vec<LabelEncoding>,
    /// Rows assigned to the train side.
    pub train_rows: usize,
    /// Rows assigned to the test side.
    pub test_rows: usize,
}

/// Dataset preparation pipeline
pub struct DatasetPipeline {
    config: PipelineConfig,
}

impl DatasetPipeline {
    /// Create a pipeline and provision its output directory, parents
    /// included. Safe to call repeatedly over the same directory.
    pub fn new(config: PipelineConfig) -> Result<Self> {
        fs::create_dir_all(&config.output_dir).with_context(|| {
            format!(
                "Failed to create output directory {}",
                config.output_dir.display()
            )
        })?;

        Ok(Self { config })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run all four stages and persist the split artifacts.
    ///
    /// No retry and no partial resume: the table moves through the stages by
    /// value and the first failure propagates to the caller.
    pub fn run(&self) -> PipelineResult<PrepareReport> {
        let df = self.load()?;
        let rows = df.height();

        let (df, partition) = self.preprocess(df)?;
        let (df, encodings) = self.encode(df, &partition)?;
        let sets = self.split(df)?;

        let report = PrepareReport {
            rows,
            feature_columns: sets.x_train.width(),
            categorical_columns: partition.categorical,
            numerical_columns: partition.numerical,
            encodings,
            train_rows: sets.x_train.height(),
            test_rows: sets.x_test.height(),
        };

        info!("Dataset preparation completed");
        Ok(report)
    }

    fn load(&self) -> PipelineResult<DataFrame> {
        match loaders::load_weather_csv(&self.config.input_path) {
            Ok(df) => {
                info!(
                    "Loaded {} rows x {} columns from {}",
                    df.height(),
                    df.width(),
                    self.config.input_path.display()
                );
                Ok(df)
            }
            Err(e) => {
                error!("Error while loading data: {:#}", e);
                Err(PipelineError::Load(e))
            }
        }
    }

    fn preprocess(&self, df: DataFrame) -> PipelineResult<(DataFrame, ColumnPartition)> {
        match self.preprocess_inner(df) {
            Ok(out) => {
                info!(
                    "Preprocessing done: {} categorical, {} numerical columns",
                    out.1.categorical.len(),
                    out.1.numerical.len()
                );
                Ok(out)
            }
            Err(e) => {
                error!("Error while preprocessing data: {:#}", e);
                Err(PipelineError::Process(e))
            }
        }
    }

    fn preprocess_inner(&self, df: DataFrame) -> Result<(DataFrame, ColumnPartition)> {
        let df = calendar::decompose_date(df, &self.config.date_column)?;
        // The partition is fixed here; the encoder reuses it unchanged.
        let partition = ColumnPartition::of(&df);
        let df = imputation::impute_missing(df, &partition)?;
        Ok((df, partition))
    }

    fn encode(
        &self,
        df: DataFrame,
        partition: &ColumnPartition,
    ) -> PipelineResult<(DataFrame, Vec<LabelEncoding>)> {
        match encoding::encode_categoricals(df, &partition.categorical) {
            Ok(out) => {
                info!("Label encoding done for {} columns", out.1.len());
                Ok(out)
            }
            Err(e) => {
                error!("Error while encoding data: {:#}", e);
                Err(PipelineError::Encode(e))
            }
        }
    }

    fn split(&self, df: DataFrame) -> PipelineResult<SplitSets> {
        match self.split_inner(df) {
            Ok(sets) => {
                info!(
                    "Split and saved: {} train rows, {} test rows in {}",
                    sets.x_train.height(),
                    sets.x_test.height(),
                    self.config.output_dir.display()
                );
                Ok(sets)
            }
            Err(e) => {
                error!("Error while splitting data: {:#}", e);
                Err(PipelineError::Split(e))
            }
        }
    }

    fn split_inner(&self, df: DataFrame) -> Result<SplitSets> {
        let mut sets = splitting::stratified_split(
            &df,
            &self.config.label_column,
            self.config.test_fraction,
            self.config.seed,
        )?;
        writers::persist_split(&mut sets, &self.config.output_dir)?;
        Ok(sets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::writers::{
        TEST_FEATURES_FILE, TEST_LABELS_FILE, TRAIN_FEATURES_FILE, TRAIN_LABELS_FILE,
    };
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    /// Ten rows: one missing MinTemp, one missing WindGustDir, 8/2 label mix
    fn write_sample_csv(path: &std::path::Path) {
        let csv_content = "\
Date,MinTemp,WindGustDir,RainTomorrow
2020-01-15,10.0,W,No
2020-01-16,20.0,W,No
2020-01-17,30.0,W,No
2020-01-18,40.0,E,No
2020-01-19,,W,No
2020-01-20,60.0,W,No
2020-01-21,70.0,E,No
2020-01-22,80.0,W,No
2020-01-23,90.0,,Yes
2020-01-24,50.0,W,Yes
";
        let mut file = File::create(path).unwrap();
        write!(file, "{}", csv_content).unwrap();
    }

    fn read_parquet(path: &std::path::Path) -> DataFrame {
        ParquetReader::new(File::open(path).unwrap())
            .finish()
            .unwrap()
    }

    #[test]
    fn test_run_end_to_end() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("weather.csv");
        let output = dir.path().join("processed");
        write_sample_csv(&input);

        let pipeline = DatasetPipeline::new(PipelineConfig::new(&input, &output)).unwrap();
        let report = pipeline.run().unwrap();

        assert_eq!(report.rows, 10);
        assert_eq!(report.train_rows, 8);
        assert_eq!(report.test_rows, 2);
        assert_eq!(
            report.categorical_columns,
            vec!["WindGustDir".to_string(), "RainTomorrow".to_string()]
        );
        assert!(report
            .numerical_columns
            .iter()
            .any(|name| name == "MinTemp"));

        for name in [
            TRAIN_FEATURES_FILE,
            TEST_FEATURES_FILE,
            TRAIN_LABELS_FILE,
            TEST_LABELS_FILE,
        ] {
            assert!(output.join(name).exists(), "Missing artifact {}", name);
        }
    }

    #[test]
    fn test_run_transforms_columns() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("weather.csv");
        let output = dir.path().join("processed");
        write_sample_csv(&input);

        let pipeline = DatasetPipeline::new(PipelineConfig::new(&input, &output)).unwrap();
        pipeline.run().unwrap();

        let x_train = read_parquet(&output.join(TRAIN_FEATURES_FILE));
        let col_names = x_train.get_column_names();

        // Calendar fields replace the date column, label excluded from features
        assert!(col_names.iter().any(|s| s.as_str() == "Year"));
        assert!(col_names.iter().any(|s| s.as_str() == "Month"));
        assert!(col_names.iter().any(|s| s.as_str() == "Day"));
        assert!(!col_names.iter().any(|s| s.as_str() == "Date"));
        assert!(!col_names.iter().any(|s| s.as_str() == "RainTomorrow"));

        // Imputation left no gaps, encoding produced integer codes
        assert_eq!(x_train.column("MinTemp").unwrap().null_count(), 0);
        assert_eq!(
            x_train.column("WindGustDir").unwrap().dtype(),
            &DataType::UInt32
        );

        let y_train = read_parquet(&output.join(TRAIN_LABELS_FILE));
        assert_eq!(y_train.width(), 1);
        assert_eq!(
            y_train.column("RainTomorrow").unwrap().dtype(),
            &DataType::UInt32
        );
    }

    #[test]
    fn test_run_twice_is_reproducible() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("weather.csv");
        write_sample_csv(&input);

        let first_out = dir.path().join("first");
        let second_out = dir.path().join("second");

        DatasetPipeline::new(PipelineConfig::new(&input, &first_out))
            .unwrap()
            .run()
            .unwrap();
        DatasetPipeline::new(PipelineConfig::new(&input, &second_out))
            .unwrap()
            .run()
            .unwrap();

        for name in [
            TRAIN_FEATURES_FILE,
            TEST_FEATURES_FILE,
            TRAIN_LABELS_FILE,
            TEST_LABELS_FILE,
        ] {
            let first = read_parquet(&first_out.join(name));
            let second = read_parquet(&second_out.join(name));
            assert!(first.equals(&second), "Artifact {} should be identical", name);
        }
    }

    #[test]
    fn test_missing_input_is_a_load_error() {
        let dir = tempdir().unwrap();
        let config = PipelineConfig::new(dir.path().join("absent.csv"), dir.path().join("out"));

        let pipeline = DatasetPipeline::new(config).unwrap();
        let err = pipeline.run().unwrap_err();

        assert_eq!(err.stage(), "load");
        assert!(matches!(err, PipelineError::Load(_)));
    }

    #[test]
    fn test_missing_date_column_is_a_process_error() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("weather.csv");
        let mut file = File::create(&input).unwrap();
        write!(file, "MinTemp,RainTomorrow\n10.0,No\n20.0,Yes\n").unwrap();

        let config = PipelineConfig::new(&input, dir.path().join("out"));
        let pipeline = DatasetPipeline::new(config).unwrap();
        let err = pipeline.run().unwrap_err();

        assert_eq!(err.stage(), "preprocess");
    }

    #[test]
    fn test_missing_label_column_is_a_split_error() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("weather.csv");
        let mut file = File::create(&input).unwrap();
        write!(
            file,
            "Date,MinTemp\n2020-01-15,10.0\n2020-01-16,20.0\n"
        )
        .unwrap();

        let config = PipelineConfig::new(&input, dir.path().join("out"));
        let pipeline = DatasetPipeline::new(config).unwrap();
        let err = pipeline.run().unwrap_err();

        assert_eq!(err.stage(), "split");
    }

    #[test]
    fn test_output_directory_is_provisioned() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("a").join("b").join("processed");

        let config = PipelineConfig::new(dir.path().join("absent.csv"), &nested);
        DatasetPipeline::new(config).unwrap();

        assert!(nested.is_dir(), "Nested output directory should exist");
    }

    #[test]
    fn test_imputed_cells_match_mean_and_mode() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("weather.csv");
        let output = dir.path().join("processed");
        write_sample_csv(&input);

        // Split off nothing so every row lands in the train artifacts
        let config = PipelineConfig::new(&input, &output).with_test_fraction(0.0);
        DatasetPipeline::new(config).unwrap().run().unwrap();

        let x_train = read_parquet(&output.join(TRAIN_FEATURES_FILE));

        // Mean of the nine present MinTemp values is 50.0
        let temps = x_train.column("MinTemp").unwrap().f64().unwrap();
        assert_eq!(temps.get(4), Some(50.0));

        // Mode of WindGustDir is "W" (7 of 9), encoded after "E" -> code 1
        let dirs = x_train.column("WindGustDir").unwrap().u32().unwrap();
        assert_eq!(dirs.get(8), Some(1));

        // Calendar scenario: first row is 2020-01-15
        assert_eq!(x_train.column("Year").unwrap().i32().unwrap().get(0), Some(2020));
        assert_eq!(x_train.column("Month").unwrap().i32().unwrap().get(0), Some(1));
        assert_eq!(x_train.column("Day").unwrap().i32().unwrap().get(0), Some(15));
    }
}
