use std::path::PathBuf;

/// Error taxonomy for the analysis pipeline.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("reference series has zero mean absolute value")]
    ZeroReference,

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed record in {path} at line {line}: {reason}")]
    Malformed {
        path: PathBuf,
        line: u64,
        reason: String,
    },
}

impl AnalysisError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }
}
