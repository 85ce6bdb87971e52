//! Error types for z/OSMF client operations.

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// z/OSMF error response body, as returned by the REST services on failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZosmfErrorBody {
    /// Return code.
    pub rc: i32,
    /// Reason code.
    pub reason: i32,
    /// Error category.
    pub category: i32,
    /// Human-readable error message.
    pub message: String,
    /// Additional error details.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<String>,
    /// Stack trace information.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
}

impl ZosmfErrorBody {
    /// Try to decode a z/OSMF error body from a raw response text.
    pub fn parse(text: &str) -> Option<Self> {
        serde_json::from_str(text).ok()
    }
}

/// Errors produced by the Zowe client crates.
#[derive(Debug, Error, Diagnostic)]
pub enum ZoweError {
    /// Local input file does not exist (raised before any request is sent).
    #[error("file not found: {path}")]
    #[diagnostic(
        code(zowe::file_not_found),
        help("check that the local path exists and is a regular file")
    )]
    FileNotFound {
        /// The missing local path.
        path: String,
    },

    /// The server answered with a status outside the accepted set.
    #[error("the status code from z/OSMF was {received}, expected one of {expected:?}: {message}")]
    #[diagnostic(code(zowe::unexpected_status))]
    UnexpectedStatus {
        /// Accepted status codes.
        expected: Vec<u16>,
        /// Status code actually received.
        received: u16,
        /// z/OSMF error message, or the raw response text.
        message: String,
    },

    /// Transport-level failure (connect, TLS, body read).
    #[error("request to z/OSMF failed: {0}")]
    #[diagnostic(code(zowe::request_failed))]
    RequestFailed(#[from] reqwest::Error),

    /// Unsupported HTTP verb.
    #[error("invalid HTTP method '{method}'")]
    #[diagnostic(code(zowe::invalid_method), help("use one of GET, POST, PUT, DELETE"))]
    InvalidRequestMethod {
        /// The rejected method name.
        method: String,
    },

    /// A field the operation relies on is absent from the response payload.
    #[error("response payload has no '{field}' field")]
    #[diagnostic(code(zowe::missing_field))]
    MissingField {
        /// The missing field name.
        field: String,
    },

    /// Local file I/O failure.
    #[error("I/O error: {0}")]
    #[diagnostic(code(zowe::io))]
    Io(#[from] std::io::Error),

    /// JSON encode/decode failure.
    #[error("JSON error: {0}")]
    #[diagnostic(code(zowe::json))]
    Json(#[from] serde_json::Error),

    /// Invalid or incomplete connection profile.
    #[error("invalid profile: {message}")]
    #[diagnostic(code(zowe::config))]
    Config {
        /// What is wrong with the profile.
        message: String,
    },
}

impl ZoweError {
    /// Create a [`ZoweError::Config`].
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a [`ZoweError::MissingField`].
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }

    /// Status code carried by a remote failure, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::UnexpectedStatus { received, .. } => Some(*received),
            Self::RequestFailed(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Convenience result type for Zowe client operations.
pub type Result<T> = std::result::Result<T, ZoweError>;
