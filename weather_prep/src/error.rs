//! Error types for pipeline stages.

/// Result type for pipeline stage operations
pub type PipelineResult<T> = Result<T, PipelineError>;

/// Error raised by a pipeline stage, wrapping the underlying cause.
///
/// Each variant belongs to exactly one stage; a stage only ever returns its
/// own variant, so the failing stage can be read off the error itself.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Failed to load data: {0}")]
    Load(#[source] anyhow::Error),

    #[error("Failed to preprocess data: {0}")]
    Process(#[source] anyhow::Error),

    #[error("Failed to encode data: {0}")]
    Encode(#[source] anyhow::Error),

    #[error("Failed to split data: {0}")]
    Split(#[source] anyhow::Error),
}

impl PipelineError {
    /// Name of the stage that produced this error.
    pub fn stage(&self) -> &'static str {
        match self {
            PipelineError::Load(_) => "load",
            PipelineError::Process(_) => "preprocess",
            PipelineError::Encode(_) => "encode",
            PipelineError::Split(_) => "split",
        }
    }
}
