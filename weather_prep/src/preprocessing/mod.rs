pub mod calendar;
pub mod imputation;

pub use calendar::decompose_date;
pub use imputation::{impute_missing, ColumnPartition};
