//! Weather dataset preparation pipeline.
//!
//! Loads a raw weather CSV, derives calendar features from the date column,
//! imputes missing values (column mean for numerical columns, column mode
//! for categorical ones), integer-encodes categorical columns, and persists
//! a seeded, stratified train/test split as parquet artifacts.
//!
//! # Example
//!
//! ```no_run
//! use weather_prep::{DatasetPipeline, PipelineConfig};
//!
//! let config = PipelineConfig::new("artifacts/raw/data.csv", "artifacts/processed");
//! let pipeline = DatasetPipeline::new(config).expect("output directory");
//! let report = pipeline.run().expect("pipeline run");
//! println!("{} train rows, {} test rows", report.train_rows, report.test_rows);
//! ```

pub mod config;
pub mod encoding;
pub mod error;
pub mod io;
pub mod pipeline;
pub mod preprocessing;
pub mod splitting;

pub use config::PipelineConfig;
pub use error::{PipelineError, PipelineResult};
pub use pipeline::{DatasetPipeline, PrepareReport};
