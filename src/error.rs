//! Error types and handling.

use thiserror::Error;

use crate::models::EmployeeField;

/// Application-wide error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Field rule violation, raised client-side (`field` set) or by the server (`field` unset)
    #[error("{message}")]
    Validation {
        field: Option<EmployeeField>,
        message: String,
    },

    /// Transport failure: connect, timeout, body decode
    #[error("Network error: {message}")]
    Network { message: String },

    /// Backend answered with a failing or unexpected status
    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// No employee with this id
    #[error("Employee not found: {id}")]
    NotFound { id: String },

    /// Configuration error
    #[error("Config error: {0}")]
    Config(String),

    /// Excel export error
    #[error("Export error: {0}")]
    Export(String),
}

/// Result type alias for AppError
pub type Result<T> = std::result::Result<T, AppError>;

impl AppError {
    /// Create a server-side validation error with message
    pub fn rejected(msg: impl Into<String>) -> Self {
        Self::Validation {
            field: None,
            message: msg.into(),
        }
    }

    /// Create a network error with message
    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network { message: msg.into() }
    }

    /// Create a server error with status and message
    pub fn server(status: u16, msg: impl Into<String>) -> Self {
        Self::Server {
            status,
            message: msg.into(),
        }
    }

    /// Create a not found error for an id
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound { id: id.into() }
    }

    /// Create a config error with message
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

impl From<reqwest::Error> for AppError {
    fn from(e: reqwest::Error) -> Self {
        match e.status() {
            Some(status) => Self::server(status.as_u16(), e.to_string()),
            None => Self::network(e.to_string()),
        }
    }
}

impl From<rust_xlsxwriter::XlsxError> for AppError {
    fn from(e: rust_xlsxwriter::XlsxError) -> Self {
        Self::Export(e.to_string())
    }
}
