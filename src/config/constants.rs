//! Configuration constants.
//!
//! This module defines the protocol constants and operational defaults used
//! throughout the client: service versions, signing defaults, timeouts, size
//! limits and the retry backoff schedule.

use std::time::Duration;

// Protocol versions
/// Products API version sent as the `Version` parameter on every request.
pub const SERVICE_VERSION: &str = "2011-10-01";
/// Client library version advertised in the User-Agent header.
pub const MWS_CLIENT_VERSION: &str = "2014-10-20";

// Signing defaults
/// The only signature version the signer understands.
pub const DEFAULT_SIGNATURE_VERSION: u32 = 2;
/// Signature method used when the configuration does not name one.
pub const DEFAULT_SIGNATURE_METHOD: &str = "HmacSHA256";

/// Application name in the default User-Agent.
pub const DEFAULT_APPLICATION_NAME: &str = "MarketplaceWebServiceProducts";

/// Application version in the default User-Agent.
pub const DEFAULT_APPLICATION_VERSION: &str = env!("CARGO_PKG_VERSION");

// Network operation timeouts
/// TCP connection timeout in seconds (also bounds the proxy CONNECT exchange)
pub const TCP_CONNECT_TIMEOUT_SECS: u64 = 10;
/// TLS handshake timeout in seconds
pub const TLS_HANDSHAKE_TIMEOUT_SECS: u64 = 10;
/// Default whole-request timeout in seconds (write request + read response)
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

// Response size limits
/// Maximum raw response size in bytes (16MB)
/// Responses larger than this are abandoned to prevent memory exhaustion
pub const MAX_RESPONSE_SIZE: usize = 16 * 1024 * 1024;
/// Maximum size of a proxy CONNECT reply header block
pub const MAX_PROXY_REPLY_SIZE: usize = 16 * 1024;
/// Maximum number of raw response characters echoed in a malformed-response error
pub const MAX_RAW_RESPONSE_PREVIEW_CHARS: usize = 2000;

// Retry strategy
/// Default number of retries after an HTTP 500 (so up to 4 attempts in total)
pub const DEFAULT_MAX_ERROR_RETRY: u32 = 3;
/// Base of the exponential backoff: the n-th retry waits `BASE^n` units
pub const RETRY_BACKOFF_BASE: u64 = 4;
/// Backoff unit in milliseconds (100ms): retries wait 400ms, 1.6s, 6.4s, ...
pub const RETRY_BACKOFF_UNIT_MS: u64 = 100;

// HTTP status codes (for clarity and consistency)
pub const HTTP_STATUS_OK: u16 = 200;
/// The only status that is retried. 503 is deliberately not retried.
pub const HTTP_STATUS_INTERNAL_SERVER_ERROR: u16 = 500;

/// Connect timeout as a `Duration`.
pub const fn connect_timeout() -> Duration {
    Duration::from_secs(TCP_CONNECT_TIMEOUT_SECS)
}

/// TLS handshake timeout as a `Duration`.
pub const fn tls_handshake_timeout() -> Duration {
    Duration::from_secs(TLS_HANDSHAKE_TIMEOUT_SECS)
}
