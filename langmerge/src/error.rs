//! All error types for the langmerge crate.
//!
//! These are returned from all fallible operations (config loading, pattern
//! compilation, file parsing, merging). Merge diagnostics — unresolved keys,
//! duplicate references, unmatched lines — are *data* carried on
//! [`MergeErrors`](crate::merge::MergeErrors), not errors; only I/O and
//! configuration problems surface here.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("config parse error: {0}")]
    Config(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("unknown job `{0}`")]
    UnknownJob(String),
}

impl Error {
    /// Creates a new invalid-config error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Error::InvalidConfig(message.into())
    }
}
