//! File input and artifact output.
//!
//! The loader reads the raw delimited weather file into a DataFrame; the
//! writers persist the four split artifacts as parquet tables with full
//! value and column-order round-trip fidelity.

pub mod loaders;
pub mod writers;
