//! Error types for cutting plan computation and history handling.

use std::path::PathBuf;
use thiserror::Error;

/// Error codes for plan computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Material width out of range (E100)
    MaterialWidthRange = 100,
    /// Useful width wider than material (E101)
    UsefulWidthExceedsMaterial = 101,
    /// Roll width out of range (E102)
    RollWidthRange = 102,
    /// Roll length out of range (E103)
    RollLengthRange = 103,
    /// Jumbo length out of range (E104)
    JumboLengthRange = 104,
    /// Jumbo shorter than one roll (E105)
    JumboShorterThanRoll = 105,
    /// Order quantity missing or not positive (E106)
    OrderQuantity = 106,
    /// Additional width not a number (E200)
    AdditionalWidthFormat = 200,
    /// Additional width out of range (E201)
    AdditionalWidthRange = 201,
    /// Additional width wider than the leftover (E202)
    AdditionalWidthOverflow = 202,
    /// Jumbo too short after setup (E300)
    InsufficientJumboLength = 300,
    /// No roll fits across the useful width (E301)
    InsufficientWidth = 301,
}

/// Failure of a plan computation. None of these are retryable; the caller
/// surfaces the message.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlanError {
    #[error("Material width must be between {min} and {max} mm, got {value}")]
    MaterialWidthRange { value: f64, min: f64, max: f64 },

    #[error("Useful width {useful} mm cannot exceed material width {material} mm")]
    UsefulWidthExceedsMaterial { useful: f64, material: f64 },

    #[error("Roll width must be between {min} and {max} mm, got {value}")]
    RollWidthRange { value: f64, min: f64, max: f64 },

    #[error("Roll length must be between {min} and {max} m, got {value}")]
    RollLengthRange { value: f64, min: f64, max: f64 },

    #[error("Jumbo length must be greater than 0 and at most {max} m, got {value}")]
    JumboLengthRange { value: f64, max: f64 },

    #[error("Jumbo length {jumbo} m cannot be shorter than roll length {roll} m")]
    JumboShorterThanRoll { jumbo: f64, roll: f64 },

    #[error("Order quantity must be a positive whole number, got '{value}'")]
    OrderQuantity { value: String },

    #[error("Additional width must be a number, got '{value}'")]
    AdditionalWidthFormat { value: String },

    #[error("Additional width must be between {min} and {max} mm, got {value}")]
    AdditionalWidthRange { value: f64, min: f64, max: f64 },

    #[error("Additional width {requested:.1} mm exceeds the available {available:.1} mm")]
    AdditionalWidthOverflow { requested: f64, available: f64 },

    #[error("Jumbo length is insufficient: {available} m left after {setup} m setup, roll needs {roll} m")]
    InsufficientJumboLength { available: f64, setup: f64, roll: f64 },

    #[error("Useful width {useful} mm is too narrow for a {roll} mm roll")]
    InsufficientWidth { useful: f64, roll: f64 },
}

impl PlanError {
    /// Get the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            PlanError::MaterialWidthRange { .. } => ErrorCode::MaterialWidthRange,
            PlanError::UsefulWidthExceedsMaterial { .. } => ErrorCode::UsefulWidthExceedsMaterial,
            PlanError::RollWidthRange { .. } => ErrorCode::RollWidthRange,
            PlanError::RollLengthRange { .. } => ErrorCode::RollLengthRange,
            PlanError::JumboLengthRange { .. } => ErrorCode::JumboLengthRange,
            PlanError::JumboShorterThanRoll { .. } => ErrorCode::JumboShorterThanRoll,
            PlanError::OrderQuantity { .. } => ErrorCode::OrderQuantity,
            PlanError::AdditionalWidthFormat { .. } => ErrorCode::AdditionalWidthFormat,
            PlanError::AdditionalWidthRange { .. } => ErrorCode::AdditionalWidthRange,
            PlanError::AdditionalWidthOverflow { .. } => ErrorCode::AdditionalWidthOverflow,
            PlanError::InsufficientJumboLength { .. } => ErrorCode::InsufficientJumboLength,
            PlanError::InsufficientWidth { .. } => ErrorCode::InsufficientWidth,
        }
    }

    /// Get the numeric error code value.
    pub fn code_value(&self) -> i32 {
        self.code() as i32
    }
}

/// Result type alias for plan computation.
pub type Result<T> = std::result::Result<T, PlanError>;

/// Errors raised by the history store, the report exporter and record metadata.
#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("Invalid stock ticket '{value}': expected NNN/YYYY")]
    InvalidStockTicket { value: String },

    #[error("Invalid material code '{value}': only latin letters and digits are allowed")]
    InvalidMaterialCode { value: String },

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Database lock poisoned: {0}")]
    Lock(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Cannot create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for history operations.
pub type HistoryResult<T> = std::result::Result<T, HistoryError>;

/// Failure of a remote version check. Callers treat every variant as
/// "no update".
#[derive(Debug, Error)]
pub enum UpdateError {
    #[error("Unsupported update URL '{url}': expected http://host[:port]/path")]
    InvalidUrl { url: String },

    #[error("Could not resolve host '{host}'")]
    UnresolvedHost { host: String },

    #[error("Unexpected response: {status_line}")]
    HttpStatus { status_line: String },

    #[error("Remote version is empty")]
    EmptyVersion,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
