pub mod label;

pub use label::{encode_categoricals, LabelEncoding};
