//! Error types for the wage engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while normalising input, running
//! the deduction pipeline, loading configuration or resolving exchange rates.

use rust_decimal::Decimal;
use thiserror::Error;

/// The main error type for the wage engine.
///
/// All fallible operations in the engine return this error type, making it
/// easy to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use dk_wage_engine::error::EngineError;
///
/// let error = EngineError::InvalidInput {
///     field: "minutes_worked".to_string(),
///     message: "must be between 0 and 59".to_string(),
/// };
/// assert_eq!(
///     error.to_string(),
///     "Invalid input 'minutes_worked': must be between 0 and 59"
/// );
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// An input field was non-numeric, negative or out of range.
    #[error("Invalid input '{field}': {message}")]
    InvalidInput {
        /// The name of the offending field.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// The exchange-rate provider failed or returned incomplete data.
    #[error("Exchange rate unavailable for DKK->{currency}: {message}")]
    RateUnavailable {
        /// The target currency code.
        currency: String,
        /// A description of the failure.
        message: String,
    },

    /// A manually supplied exchange rate was not positive or too large.
    #[error("Manual exchange rate must be greater than zero and at most 1000000, got {rate}")]
    InvalidManualRate {
        /// The rejected rate.
        rate: Decimal,
    },

    /// A currency code outside the supported set was requested.
    #[error("Unsupported currency: {code}")]
    UnsupportedCurrency {
        /// The requested currency code.
        code: String,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Configuration parsed but holds inconsistent values.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// A description of the inconsistency.
        message: String,
    },
}

impl EngineError {
    /// Shorthand for building an [`EngineError::InvalidInput`].
    pub fn invalid_input(field: impl Into<String>, message: impl Into<String>) -> Self {
        EngineError::InvalidInput {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
