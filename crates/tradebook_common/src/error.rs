// --- File: crates/tradebook_common/src/error.rs ---
use std::fmt;
use thiserror::Error;

/// The error type shared by all Tradebook crates.
///
/// Integration crates define their own error enums and convert into this one at the
/// boundary, so handlers only ever render a `TradebookError`.
#[derive(Error, Debug)]
pub enum TradebookError {
    /// Error occurred due to missing or invalid configuration
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// The caller sent something we cannot work with
    #[error("Invalid input: {0}")]
    ValidationError(String),

    /// Error occurred during external service call
    #[error("External service error: {service_name} - {message}")]
    ExternalServiceError {
        service_name: String,
        message: String,
    },

    /// Error occurred due to an internal error
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// A trait for converting errors to HTTP status codes.
pub trait HttpStatusCode {
    /// Returns the HTTP status code for this error.
    fn status_code(&self) -> u16;
}

impl HttpStatusCode for TradebookError {
    fn status_code(&self) -> u16 {
        match self {
            TradebookError::ConfigError(_) => 500,
            TradebookError::ValidationError(_) => 400,
            TradebookError::ExternalServiceError { .. } => 502,
            TradebookError::InternalError(_) => 500,
        }
    }
}

// Utility functions for error handling
pub fn validation_error<T: fmt::Display>(message: T) -> TradebookError {
    TradebookError::ValidationError(message.to_string())
}

pub fn external_service_error<T: fmt::Display>(service_name: &str, message: T) -> TradebookError {
    TradebookError::ExternalServiceError {
        service_name: service_name.to_string(),
        message: message.to_string(),
    }
}

pub fn internal_error<T: fmt::Display>(message: T) -> TradebookError {
    TradebookError::InternalError(message.to_string())
}
