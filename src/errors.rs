use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReelError {
    #[error("Reel error: {0}")]
    Generic(String),
    #[error(transparent)]
    Expected(#[from] ReelExpectedError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Errors we anticipate and surface to the user with a friendly message,
/// as opposed to internal invariant violations.
#[derive(Error, Debug)]
pub enum ReelExpectedError {
    #[error("{0}")]
    Generic(String),
    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: PathBuf },
    #[error("Failed to decode configuration file {path}: {message}")]
    ConfigDecode { path: PathBuf, message: String },
    #[error("Invalid value for {key} in configuration file {path}: {message}")]
    InvalidConfigValue { key: String, path: PathBuf, message: String },
    #[error("Directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },
}

pub type Result<T> = std::result::Result<T, ReelError>;
