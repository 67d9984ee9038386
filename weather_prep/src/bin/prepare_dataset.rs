//! Dataset preparation binary.
//!
//! Reads the raw weather CSV, runs the full preparation pipeline, and
//! persists the four split artifacts.
//!
//! # Usage
//!
//! ```bash
//! prepare-dataset [input.csv] [output_dir]
//! ```
//!
//! Defaults: `artifacts/raw/data.csv` and `artifacts/processed`.
//! `RUST_LOG` controls log verbosity.

use std::process::ExitCode;

use weather_prep::{DatasetPipeline, PipelineConfig};

fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    let input = args
        .get(1)
        .map(|s| s.as_str())
        .unwrap_or("artifacts/raw/data.csv");
    let output = args
        .get(2)
        .map(|s| s.as_str())
        .unwrap_or("artifacts/processed");

    let config = PipelineConfig::new(input, output);

    let pipeline = match DatasetPipeline::new(config) {
        Ok(pipeline) => pipeline,
        Err(e) => {
            eprintln!("✗ Failed to set up the pipeline: {:#}", e);
            return ExitCode::FAILURE;
        }
    };

    match pipeline.run() {
        Ok(report) => {
            println!("✓ Dataset preparation completed");
            println!("  Rows: {}", report.rows);
            println!(
                "  Split: {} train / {} test",
                report.train_rows, report.test_rows
            );
            println!("  Artifacts: {}", pipeline.config().output_dir.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!(
                "✗ Dataset preparation failed: {:#}",
                anyhow::Error::new(e)
            );
            ExitCode::FAILURE
        }
    }
}
