//! Scan-level error type
//!
//! Only load-bearing retrieval failures surface as errors: an empty
//! file set, an unreadable path. Input insufficiency (short files, few
//! commits, singleton repositories) and per-pattern failures are
//! resolved locally as neutral results and never reach this type.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScanError {
    /// Nothing to analyze - no files survived discovery and filtering.
    #[error("no analyzable files found under {path}")]
    NoFiles { path: String },

    #[error("cannot read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
