//! Status categorization and retry strategy.
//!
//! This module decides which responses are retried and how long to wait
//! between attempts.

use std::time::Duration;
use tokio_retry::strategy::ExponentialBackoff;

use super::types::ErrorKind;
use crate::config::{HTTP_STATUS_INTERNAL_SERVER_ERROR, RETRY_BACKOFF_BASE, RETRY_BACKOFF_UNIT_MS};

/// Creates the backoff schedule for one call.
///
/// The n-th retry (1-based) waits `RETRY_BACKOFF_BASE^n * RETRY_BACKOFF_UNIT_MS`
/// milliseconds: 400ms, 1.6s, 6.4s, ... The iterator yields exactly
/// `max_error_retry` delays; once it is exhausted the call fails.
pub fn get_retry_strategy(max_error_retry: u32) -> impl Iterator<Item = Duration> {
    ExponentialBackoff::from_millis(RETRY_BACKOFF_BASE)
        .factor(RETRY_BACKOFF_UNIT_MS)
        .take(max_error_retry as usize)
}

/// Returns true for the only status worth retrying (500).
pub fn is_retryable_status(status: u16) -> bool {
    status == HTTP_STATUS_INTERNAL_SERVER_ERROR
}

/// Kind of a terminal non-200 response.
pub fn categorize_status(status: u16) -> ErrorKind {
    if is_retryable_status(status) {
        ErrorKind::Server
    } else {
        ErrorKind::Api
    }
}
