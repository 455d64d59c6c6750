//! HTTP header name constants.
//!
//! This module defines the request headers the client always sends and the
//! `x-mws-*` response headers that are surfaced as response metadata.

// Request headers
/// Content-Type header name
pub const HEADER_CONTENT_TYPE: &str = "Content-Type";
/// Form encoding used for every request body
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded; charset=utf-8";
/// User-Agent header name
pub const HEADER_USER_AGENT: &str = "User-Agent";

/// Request headers the transport owns. Configured extra headers with one of
/// these names are dropped; `Expect` is in the list so that no
/// `100 Continue` handshake is ever requested.
pub const RESERVED_REQUEST_HEADERS: &[&str] = &[
    "Content-Type",
    "Content-Length",
    "Host",
    "Connection",
    "Expect",
    "User-Agent",
    "Proxy-Authorization",
];

// Response headers carried into ResponseHeaderMetadata
/// Request identifier assigned by the service
pub const HEADER_MWS_REQUEST_ID: &str = "x-mws-request-id";
/// Opaque response context
pub const HEADER_MWS_RESPONSE_CONTEXT: &str = "x-mws-response-context";
/// Server-side timestamp of the response
pub const HEADER_MWS_TIMESTAMP: &str = "x-mws-timestamp";
/// Quota: maximum requests in the current window
pub const HEADER_MWS_QUOTA_MAX: &str = "x-mws-quota-max";
/// Quota: requests remaining in the current window
pub const HEADER_MWS_QUOTA_REMAINING: &str = "x-mws-quota-remaining";
/// Quota: when the current window resets
pub const HEADER_MWS_QUOTA_RESETS_ON: &str = "x-mws-quota-resetsOn";

/// List of response headers captured as metadata.
pub const METADATA_HEADERS: &[&str] = &[
    HEADER_MWS_REQUEST_ID,
    HEADER_MWS_RESPONSE_CONTEXT,
    HEADER_MWS_TIMESTAMP,
    HEADER_MWS_QUOTA_MAX,
    HEADER_MWS_QUOTA_REMAINING,
    HEADER_MWS_QUOTA_RESETS_ON,
];

/// Returns true if a configured extra header must not be forwarded.
pub fn is_reserved_request_header(name: &str) -> bool {
    RESERVED_REQUEST_HEADERS
        .iter()
        .any(|reserved| reserved.eq_ignore_ascii_case(name.trim()))
}
