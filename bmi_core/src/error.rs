//! Error types for the bmi_core library.

use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// A rejected form field.
///
/// Messages are shown to the user as-is by the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// A field was empty after trimming
    #[error("Please fill in all fields ({field} is missing).")]
    MissingField { field: &'static str },

    /// Email does not look like `local@domain.tld`
    #[error("Please enter a valid email address.")]
    InvalidEmail,

    /// Weight or height is not a finite number
    #[error("Please enter a number for {field}.")]
    NotANumber { field: &'static str },

    /// Weight or height is zero or negative
    #[error("Weight and height must be positive values.")]
    NonPositiveValue { field: &'static str },
}

/// Core error type for bmi_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Form input was rejected
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// Engine precondition failed (zero or negative measurement)
    #[error("{0}")]
    InvalidInput(String),

    /// Store runs with unique emails and this one is taken
    #[error("The email {0} already exists. Please use a different email.")]
    DuplicateEmail(String),

    /// The record file could not be opened, locked, read or written
    #[error("An error occurred while accessing the record store: {0}")]
    StoreUnavailable(String),

    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// CSV error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Wrap any displayable failure from the storage layer.
    pub(crate) fn store(err: impl std::fmt::Display) -> Self {
        Error::StoreUnavailable(err.to_string())
    }
}
