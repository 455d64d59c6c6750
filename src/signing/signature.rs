//! Signature version 2 request signing.
//!
//! The string to sign is:
//!
//! ```text
//! POST\n
//! <lowercase host>\n
//! <encoded absolute path, or "/">\n
//! <canonical query string of every parameter except Signature>
//! ```
//!
//! and the signature is `base64(HMAC(secret, string_to_sign))`.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha1::Sha1;
use sha2::Sha256;
use url::Url;

use super::canonical::{encode_path, ParameterSet};
use super::credentials::Credentials;
use crate::config::{ClientConfig, SignatureMethod, DEFAULT_SIGNATURE_VERSION};
use crate::error_handling::ConfigError;

pub const PARAM_ACCESS_KEY_ID: &str = "AWSAccessKeyId";
pub const PARAM_TIMESTAMP: &str = "Timestamp";
pub const PARAM_VERSION: &str = "Version";
pub const PARAM_SIGNATURE_VERSION: &str = "SignatureVersion";
pub const PARAM_SIGNATURE_METHOD: &str = "SignatureMethod";
pub const PARAM_SIGNATURE: &str = "Signature";

/// Timestamp layout; milliseconds are always the literal `.000`.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S.000Z";

/// Formats `now` the way the service expects the `Timestamp` parameter.
pub fn format_timestamp(now: DateTime<Utc>) -> String {
    now.format(TIMESTAMP_FORMAT).to_string()
}

/// A parameter set carrying its `Signature`, plus the encoded POST body.
///
/// Nothing can be added or changed once a request is signed; retries resend
/// exactly these bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedRequest {
    parameters: ParameterSet,
    body: String,
}

impl SignedRequest {
    pub fn parameters(&self) -> &ParameterSet {
        &self.parameters
    }

    /// Canonical query string of every parameter including `Signature`.
    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn signature(&self) -> Option<&str> {
        self.parameters.get(PARAM_SIGNATURE)
    }
}

/// Injects the parameters every request must carry.
///
/// Caller-supplied values for these names are overwritten.
pub fn add_required_parameters(
    parameters: &mut ParameterSet,
    credentials: &Credentials,
    config: &ClientConfig,
    now: DateTime<Utc>,
) {
    parameters.insert(PARAM_ACCESS_KEY_ID, credentials.access_key_id());
    parameters.insert(PARAM_TIMESTAMP, format_timestamp(now));
    parameters.insert(PARAM_VERSION, config.service_version.as_str());
    parameters.insert(
        PARAM_SIGNATURE_VERSION,
        config.signature_version.to_string(),
    );
    if config.signature_version > 1 {
        parameters.insert(PARAM_SIGNATURE_METHOD, config.signature_method.as_str());
    }
}

/// Builds the version 2 string to sign for `endpoint`.
///
/// The host excludes any port.
pub fn string_to_sign(endpoint: &Url, parameters: &ParameterSet) -> String {
    let host = endpoint.host_str().unwrap_or_default().to_ascii_lowercase();
    format!(
        "POST\n{}\n{}\n{}",
        host,
        encode_path(endpoint.path()),
        parameters.canonical_query_string_excluding(Some(PARAM_SIGNATURE))
    )
}

/// `base64(HMAC(key, data))` with the hash named by `method`.
pub fn calculate_signature(
    data: &str,
    key: &str,
    method: SignatureMethod,
) -> Result<String, ConfigError> {
    let digest = match method {
        SignatureMethod::HmacSha1 => {
            let mut mac = Hmac::<Sha1>::new_from_slice(key.as_bytes())
                .map_err(|_| ConfigError::InvalidSigningKey)?;
            mac.update(data.as_bytes());
            mac.finalize().into_bytes().to_vec()
        }
        SignatureMethod::HmacSha256 => {
            let mut mac = Hmac::<Sha256>::new_from_slice(key.as_bytes())
                .map_err(|_| ConfigError::InvalidSigningKey)?;
            mac.update(data.as_bytes());
            mac.finalize().into_bytes().to_vec()
        }
    };
    Ok(BASE64.encode(digest))
}

/// Signs a parameter set that already carries its required parameters.
///
/// # Errors
///
/// - `UnsupportedSignatureVersion` unless `SignatureVersion` is `2`
/// - `UnsupportedSignatureMethod` for anything but `HmacSHA1`/`HmacSHA256`
/// - `MissingParameter` when `AWSAccessKeyId`, `Timestamp` or `Version` is absent
pub fn sign(
    mut parameters: ParameterSet,
    endpoint: &Url,
    secret_key: &str,
) -> Result<SignedRequest, ConfigError> {
    let version = parameters.get(PARAM_SIGNATURE_VERSION).unwrap_or_default();
    if version != DEFAULT_SIGNATURE_VERSION.to_string() {
        return Err(ConfigError::UnsupportedSignatureVersion(version.to_string()));
    }

    let method_name = parameters
        .get(PARAM_SIGNATURE_METHOD)
        .ok_or(ConfigError::MissingParameter(PARAM_SIGNATURE_METHOD))?;
    let method = SignatureMethod::parse(method_name)?;

    for required in [PARAM_ACCESS_KEY_ID, PARAM_TIMESTAMP, PARAM_VERSION] {
        if !parameters.contains(required) {
            return Err(ConfigError::MissingParameter(required));
        }
    }

    let signature = calculate_signature(&string_to_sign(endpoint, &parameters), secret_key, method)?;
    parameters.insert(PARAM_SIGNATURE, signature);
    let body = parameters.canonical_query_string();

    Ok(SignedRequest { parameters, body })
}

/// Adds the required parameters and signs, failing fast on bad settings.
pub fn sign_request(
    mut parameters: ParameterSet,
    credentials: &Credentials,
    config: &ClientConfig,
    endpoint: &Url,
    now: DateTime<Utc>,
) -> Result<SignedRequest, ConfigError> {
    if config.signature_version != DEFAULT_SIGNATURE_VERSION {
        return Err(ConfigError::UnsupportedSignatureVersion(
            config.signature_version.to_string(),
        ));
    }
    config.signature_method()?;

    add_required_parameters(&mut parameters, credentials, config, now);
    sign(parameters, endpoint, credentials.secret_key())
}
