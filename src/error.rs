//! Error types for outline-to-G-code conversion.

use std::path::PathBuf;
use thiserror::Error;

/// Error codes for planning and generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// File not found (-1)
    FileNotFound = -1,
    /// Empty file (-2)
    EmptyFile = -2,
    /// Malformed geometry or settings document (-3)
    InvalidDocument = -3,
    /// Sampling produced no points (E100)
    EmptyGeometryResult = 100,
    /// Smoothing produced fewer than two points (E101)
    InsufficientPoints = 101,
    /// Generation requested without a roughing path (E200)
    MissingRoughingPath = 200,
    /// Parameter out of range (E201)
    InvalidParameter = 201,
    /// Settings or drawing failed validation (E202)
    ValidationFailed = 202,
}

/// Main error type for the converter.
#[derive(Debug, Error)]
pub enum CamError {
    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Empty file: {path}")]
    EmptyFile { path: PathBuf },

    #[error("Invalid document {path}: {message}")]
    InvalidDocument { path: PathBuf, message: String },

    #[error("No points found for {stage} path")]
    EmptyGeometryResult { stage: String },

    #[error("Not enough points for {stage}: need at least {required}, got {found}")]
    InsufficientPoints {
        stage: String,
        required: usize,
        found: usize,
    },

    #[error("Need at least one roughing path")]
    MissingRoughingPath,

    #[error("Invalid value for '{name}': {value}")]
    InvalidParameter { name: String, value: f64 },

    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CamError {
    /// Get the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            CamError::FileNotFound { .. } => ErrorCode::FileNotFound,
            CamError::EmptyFile { .. } => ErrorCode::EmptyFile,
            CamError::InvalidDocument { .. } => ErrorCode::InvalidDocument,
            CamError::EmptyGeometryResult { .. } => ErrorCode::EmptyGeometryResult,
            CamError::InsufficientPoints { .. } => ErrorCode::InsufficientPoints,
            CamError::MissingRoughingPath => ErrorCode::MissingRoughingPath,
            CamError::InvalidParameter { .. } => ErrorCode::InvalidParameter,
            CamError::ValidationFailed(_) => ErrorCode::ValidationFailed,
            CamError::Io(_) => ErrorCode::FileNotFound,
        }
    }

    /// Get the numeric error code value.
    pub fn code_value(&self) -> i32 {
        self.code() as i32
    }
}

/// Result type alias for converter operations.
pub type Result<T> = std::result::Result<T, CamError>;
