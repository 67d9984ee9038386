use std::path::PathBuf;

/// Name of the raw date column expected in the input file.
pub const DEFAULT_DATE_COLUMN: &str = "Date";

/// Label column used for stratification; everything else is a feature.
pub const DEFAULT_LABEL_COLUMN: &str = "RainTomorrow";

/// Fraction of rows assigned to the test set.
pub const DEFAULT_TEST_FRACTION: f64 = 0.2;

/// Seed for the split shuffle, fixed for reproducibility.
pub const DEFAULT_SEED: u64 = 42;

/// Configuration for the dataset preparation pipeline
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Path to the input CSV (header row required).
    pub input_path: PathBuf,
    /// Directory receiving the four split artifacts; created if absent.
    pub output_dir: PathBuf,
    /// Column parsed into Year/Month/Day and then dropped.
    pub date_column: String,
    /// Column used as the split label.
    pub label_column: String,
    /// Fraction of rows assigned to the test set, in `[0, 1)`.
    pub test_fraction: f64,
    /// Seed for the split shuffle.
    pub seed: u64,
}

impl PipelineConfig {
    /// Create a configuration with the documented defaults.
    pub fn new(input_path: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_path: input_path.into(),
            output_dir: output_dir.into(),
            date_column: DEFAULT_DATE_COLUMN.to_string(),
            label_column: DEFAULT_LABEL_COLUMN.to_string(),
            test_fraction: DEFAULT_TEST_FRACTION,
            seed: DEFAULT_SEED,
        }
    }

    /// Override the date column name.
    pub fn with_date_column(mut self, name: impl Into<String>) -> Self {
        self.date_column = name.into();
        self
    }

    /// Override the label column name.
    pub fn with_label_column(mut self, name: impl Into<String>) -> Self {
        self.label_column = name.into();
        self
    }

    /// Override the test fraction.
    pub fn with_test_fraction(mut self, fraction: f64) -> Self {
        self.test_fraction = fraction;
        self
    }

    /// Override the shuffle seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}
