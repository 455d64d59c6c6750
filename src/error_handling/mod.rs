//! Error handling.
//!
//! This module provides:
//! - Error type definitions (`ApiError` and the internal errors feeding it)
//! - Status categorization and the retry backoff strategy
//! - Interpretation of structured XML error bodies
//!
//! Every failure reaches the caller as an [`ApiError`] whose `kind` is one of:
//! - **Configuration**: rejected before anything was sent
//! - **Transport**: no response bytes were obtained
//! - **MalformedResponse**: bytes arrived but held no valid HTTP response
//! - **Server**: HTTP 500 after the retry budget was spent
//! - **Api**: any other non-200 response

mod categorization;
mod report;
mod types;

// Re-export public API
pub use categorization::{get_retry_strategy, is_retryable_status};
pub use report::report_error;
pub use types::{
    ApiError, BoxError, ConfigError, ErrorFault, ErrorKind, InitializationError,
    MalformedResponse, TransportError,
};
