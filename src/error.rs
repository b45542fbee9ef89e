//! Error types for Repolens
//!
//! Uses `thiserror` for library errors. The binary wraps these in `anyhow`.

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::pipeline::PipelineError;
use crate::domain::tree::TreeError;

/// Result type alias for Repolens operations
pub type RepolensResult<T> = Result<T, RepolensError>;

/// Main error type for Repolens operations
#[derive(Error, Debug)]
pub enum RepolensError {
    /// The node listing could not be turned into a tree
    #[error(transparent)]
    InvalidTree(#[from] TreeError),

    /// The pipeline rejected a command
    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    /// Listing file could not be parsed
    #[error("invalid listing in {file}: {message}")]
    InvalidListing { file: PathBuf, message: String },

    /// Listing file has an extension we do not know how to read
    #[error("unsupported listing format '{extension}' for {file} (expected .json, .yaml or .yml)")]
    UnsupportedListing { file: PathBuf, extension: String },

    /// Config file could not be parsed
    #[error("invalid config in {file}: {message}")]
    InvalidConfig { file: PathBuf, message: String },

    /// Config parsed but holds values the pipeline cannot run with
    #[error("invalid pipeline config: {0}")]
    InvalidPipelineConfig(String),

    /// Archive rejected before upload
    #[error("cannot upload {file}: {reason}")]
    ArchiveRejected { file: PathBuf, reason: String },

    /// Directory not found
    #[error("directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// Directory walk failed
    #[error("failed to scan {path}: {message}")]
    Scan { path: PathBuf, message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
