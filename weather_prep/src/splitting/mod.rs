pub mod stratified;

pub use stratified::{split_indices, stratified_split, SplitIndices, SplitSets};
