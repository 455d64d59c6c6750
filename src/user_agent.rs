//! User-Agent header construction.
//!
//! The service asks clients to identify themselves as:
//!
//! ```text
//! AppName/AppVersion (Language=Rust; Platform=<os>/<arch>; MWSClientVersion=2014-10-20; key=value...)
//! ```
//!
//! Each part is quoted so the structure stays parseable: whitespace runs
//! collapse to a single space and the characters that delimit that part are
//! backslash-escaped.

use std::sync::LazyLock;

use regex::Regex;

use crate::config::MWS_CLIENT_VERSION;
use crate::error_handling::ConfigError;

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is a valid regex"));

/// Collapses whitespace, escapes `\` and then each of `special`.
fn quote(value: &str, special: &[char]) -> String {
    let collapsed = WHITESPACE_RUN.replace_all(value, " ");
    let mut quoted = String::with_capacity(collapsed.len());
    for c in collapsed.chars() {
        if c == '\\' || special.contains(&c) {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted
}

pub fn quote_application_name(name: &str) -> String {
    quote(name, &['/'])
}

pub fn quote_application_version(version: &str) -> String {
    quote(version, &['('])
}

pub fn quote_attribute_name(name: &str) -> String {
    quote(name, &['='])
}

pub fn quote_attribute_value(value: &str) -> String {
    quote(value, &[';', ')'])
}

/// Builds the User-Agent header value.
///
/// # Errors
///
/// Returns `ConfigError::InvalidUserAgent` when the application name or
/// version is empty, or when an attribute has an empty value.
pub fn build_user_agent(
    application_name: &str,
    application_version: &str,
    attributes: &[(String, String)],
) -> Result<String, ConfigError> {
    if application_name.is_empty() {
        return Err(ConfigError::InvalidUserAgent(
            "application name cannot be empty".to_string(),
        ));
    }
    if application_version.is_empty() {
        return Err(ConfigError::InvalidUserAgent(
            "application version cannot be empty".to_string(),
        ));
    }

    let mut user_agent = format!(
        "{}/{} (Language=Rust; Platform={}/{}; MWSClientVersion={}",
        quote_application_name(application_name),
        quote_application_version(application_version),
        std::env::consts::OS,
        std::env::consts::ARCH,
        MWS_CLIENT_VERSION
    );

    for (key, value) in attributes {
        if value.is_empty() {
            return Err(ConfigError::InvalidUserAgent(format!(
                "value for {} cannot be empty",
                key
            )));
        }
        user_agent.push_str(&format!(
            "; {}={}",
            quote_attribute_name(key),
            quote_attribute_value(value)
        ));
    }
    user_agent.push(')');

    Ok(user_agent)
}
