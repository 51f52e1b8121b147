/*!
Core types and error handling for probe interface operations.

Copyright 2025 Neuraville Inc.
Licensed under the Apache License, Version 2.0
*/

use thiserror::Error;

/// Result type for probe interface operations
pub type ProbeInterfaceResult<T> = Result<T, ProbeInterfaceError>;

/// Error types for probe interface operations
#[derive(Error, Debug, Clone)]
pub enum ProbeInterfaceError {
    /// A required field is missing or empty, or the probe list is empty
    #[error("Invalid structure: {0}")]
    InvalidStructure(String),

    /// A per-contact array disagrees with the probe's contact count
    #[error("Length mismatch: {0}")]
    LengthMismatch(String),

    /// Two connected contacts claim the same device channel
    #[error("Duplicate device channel index: {0}")]
    DuplicateChannelIndex(String),

    /// A contact id could not be parsed as an integer
    #[error("Malformed contact id: {0}")]
    MalformedContactId(String),

    /// Invalid parameters provided to a function
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    JsonError(String),

    /// I/O error
    #[error("I/O error: {0}")]
    IoError(String),
}

// Convert from serde_json::Error
impl From<serde_json::Error> for ProbeInterfaceError {
    fn from(err: serde_json::Error) -> Self {
        ProbeInterfaceError::JsonError(err.to_string())
    }
}

// Convert from std::io::Error
impl From<std::io::Error> for ProbeInterfaceError {
    fn from(err: std::io::Error) -> Self {
        ProbeInterfaceError::IoError(err.to_string())
    }
}
