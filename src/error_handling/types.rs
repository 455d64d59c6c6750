//! Error type definitions.
//!
//! This module defines the public [`ApiError`] returned by every client call,
//! the internal error enums that feed it, and the bootstrap
//! [`InitializationError`].

use std::fmt;

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

use crate::response::ResponseHeaderMetadata;

/// Boxed underlying cause carried by an [`ApiError`].
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),

    /// Error building the TLS client configuration.
    #[error("TLS configuration error: {0}")]
    TlsConfigError(String),
}

/// Invalid or incomplete client configuration.
///
/// Raised before anything is sent; never retried.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing serviceUrl configuration value. You may obtain a list of valid MWS URLs by consulting the MWS Developer's Guide, or reviewing the sample code published along side this library.")]
    MissingServiceUrl,

    #[error("Invalid service URL '{url}': {reason}")]
    InvalidServiceUrl { url: String, reason: String },

    #[error("Invalid Signature Version specified: {0}")]
    UnsupportedSignatureVersion(String),

    #[error("Invalid Signing Algorithm specified: {0}")]
    UnsupportedSignatureMethod(String),

    /// A parameter required for signing has not been set.
    #[error("Required parameter '{0}' is missing")]
    MissingParameter(&'static str),

    #[error("Secret key cannot be used as an HMAC key")]
    InvalidSigningKey,

    #[error("Invalid proxy configuration: {0}")]
    InvalidProxy(String),

    #[error("Request timeout must be greater than zero")]
    InvalidTimeout,

    #[error("Invalid request header '{0}'")]
    InvalidHeader(String),

    #[error("{0}")]
    InvalidUserAgent(String),
}

impl ConfigError {
    /// Error code surfaced on the resulting [`ApiError`].
    pub fn code(&self) -> &'static str {
        match self {
            ConfigError::MissingServiceUrl | ConfigError::InvalidServiceUrl { .. } => {
                "InvalidServiceURL"
            }
            ConfigError::UnsupportedSignatureVersion(_) => "InvalidSignatureVersion",
            ConfigError::UnsupportedSignatureMethod(_) => "InvalidSignatureMethod",
            ConfigError::MissingParameter(_) => "MissingParameter",
            ConfigError::InvalidSigningKey => "InvalidSigningKey",
            ConfigError::InvalidProxy(_) => "InvalidProxy",
            ConfigError::InvalidTimeout => "InvalidTimeout",
            ConfigError::InvalidHeader(_) => "InvalidHeader",
            ConfigError::InvalidUserAgent(_) => "InvalidUserAgent",
        }
    }
}

/// Failure of a single transport attempt (no usable bytes were received).
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("Failed to connect to {addr}: {source}")]
    Connect {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid DNS name for TLS: {0}")]
    InvalidDnsName(String),

    #[error("TLS handshake with {host} failed: {source}")]
    Tls {
        host: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Proxy error: {0}")]
    Proxy(String),

    #[error("Timed out during {0}")]
    Timeout(&'static str),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Response exceeded {0} bytes")]
    ResponseTooLarge(usize),

    #[error("HTTP client error: {0}")]
    Http(#[from] ReqwestError),
}

/// The raw bytes did not contain an acceptable HTTP response.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Failed to parse valid HTTP response ({raw})")]
pub struct MalformedResponse {
    /// Lossy, truncated rendering of the bytes that failed to parse
    pub raw: String,
}

/// Broad category of an [`ApiError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum ErrorKind {
    /// Invalid configuration; nothing was sent
    Configuration,
    /// Connection, TLS, proxy, timeout or I/O failure
    Transport,
    /// The response could not be split into status, headers and body
    MalformedResponse,
    /// HTTP 500 after the retry budget was spent
    Server,
    /// Any other non-200 response
    Api,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Configuration => "Configuration",
            ErrorKind::Transport => "Transport",
            ErrorKind::MalformedResponse => "Malformed response",
            ErrorKind::Server => "Server",
            ErrorKind::Api => "API",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which side the service blames for an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum ErrorFault {
    /// `Sender`: the request was at fault
    Client,
    /// `Receiver`: the service was at fault
    Server,
    Unknown,
}

impl ErrorFault {
    pub fn from_error_type(error_type: &str) -> Self {
        match error_type {
            "Sender" => ErrorFault::Client,
            "Receiver" => ErrorFault::Server,
            _ => ErrorFault::Unknown,
        }
    }
}

/// Error returned by every client call.
///
/// Service errors carry whatever the response provided: code, message, error
/// type, status, request id, the raw XML body and the response metadata.
/// Local failures carry the underlying cause as their `source()`.
#[derive(Error, Debug)]
#[error("{kind} error: {message}")]
pub struct ApiError {
    pub kind: ErrorKind,
    pub code: Option<String>,
    pub message: String,
    /// Raw `Error/Type` value, `"Unknown"` when absent
    pub error_type: String,
    pub status_code: Option<u16>,
    pub request_id: Option<String>,
    pub xml: Option<String>,
    pub metadata: ResponseHeaderMetadata,
    #[source]
    pub cause: Option<BoxError>,
}

/// Value of `error_type` when the response does not name one.
pub const UNKNOWN_ERROR_TYPE: &str = "Unknown";

/// `error_type` used for transport failures.
pub const TRANSPORT_ERROR_TYPE: &str = "HTTP";

impl ApiError {
    /// Creates an error with only a kind and message set.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            code: None,
            message: message.into(),
            error_type: UNKNOWN_ERROR_TYPE.to_string(),
            status_code: None,
            request_id: None,
            xml: None,
            metadata: ResponseHeaderMetadata::default(),
            cause: None,
        }
    }

    /// Client/server classification of `error_type`.
    pub fn fault(&self) -> ErrorFault {
        ErrorFault::from_error_type(&self.error_type)
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn with_status(mut self, status_code: u16) -> Self {
        self.status_code = Some(status_code);
        self
    }

    pub fn with_metadata(mut self, metadata: ResponseHeaderMetadata) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn with_cause(mut self, cause: impl Into<BoxError>) -> Self {
        self.cause = Some(cause.into());
        self
    }
}

impl From<ConfigError> for ApiError {
    fn from(error: ConfigError) -> Self {
        ApiError::new(ErrorKind::Configuration, error.to_string())
            .with_code(error.code())
            .with_cause(error)
    }
}

impl From<TransportError> for ApiError {
    fn from(error: TransportError) -> Self {
        let mut api_error = ApiError::new(ErrorKind::Transport, error.to_string());
        api_error.error_type = TRANSPORT_ERROR_TYPE.to_string();
        api_error.with_cause(error)
    }
}

impl From<MalformedResponse> for ApiError {
    fn from(error: MalformedResponse) -> Self {
        ApiError::new(ErrorKind::MalformedResponse, error.to_string()).with_cause(error)
    }
}
