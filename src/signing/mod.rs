//! Request signing.
//!
//! This module provides:
//! - `ParameterSet`, the sorted name/value mapping every request is built from
//! - RFC 3986 canonicalization of parameters and URL paths
//! - Signature version 2 (HMAC-SHA1 / HMAC-SHA256) signing
//! - `Credentials`, the access key pair

mod canonical;
mod credentials;
mod signature;

pub use canonical::{encode_path, url_encode, ParameterSet};
pub use credentials::Credentials;
pub use signature::{
    add_required_parameters, calculate_signature, format_timestamp, sign, sign_request,
    string_to_sign, SignedRequest, PARAM_ACCESS_KEY_ID, PARAM_SIGNATURE, PARAM_SIGNATURE_METHOD,
    PARAM_SIGNATURE_VERSION, PARAM_TIMESTAMP, PARAM_VERSION,
};
