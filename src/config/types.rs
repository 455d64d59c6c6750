//! Configuration types.
//!
//! This module defines the client configuration, proxy settings, the signing
//! method enum and the enums used for command-line argument parsing.

use std::str::FromStr;

use clap::ValueEnum;
use strum_macros::{AsRefStr, Display as DisplayMacro, EnumIter as EnumIterMacro, EnumString};
use url::Url;

use crate::config::constants::{
    DEFAULT_APPLICATION_NAME, DEFAULT_APPLICATION_VERSION, DEFAULT_MAX_ERROR_RETRY,
    DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_SIGNATURE_METHOD, DEFAULT_SIGNATURE_VERSION,
    SERVICE_VERSION,
};
use crate::error_handling::ConfigError;
use crate::user_agent::build_user_agent;

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// Controls how log messages are formatted:
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Which transport carries the signed request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum TransportKind {
    /// HTTP/1.1 written directly over TCP/TLS; returns the raw byte stream.
    Socket,
    /// `reqwest` client with its own connection pool.
    Pooled,
}

/// HMAC hash used for signature version 2.
///
/// The string forms are the exact names the service expects in the
/// `SignatureMethod` parameter; parsing is case-sensitive.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, AsRefStr, DisplayMacro, EnumIterMacro,
)]
pub enum SignatureMethod {
    #[strum(serialize = "HmacSHA1")]
    HmacSha1,
    #[strum(serialize = "HmacSHA256")]
    HmacSha256,
}

impl SignatureMethod {
    /// Parses a method name, mapping failure to a configuration error.
    pub fn parse(name: &str) -> Result<Self, ConfigError> {
        SignatureMethod::from_str(name)
            .map_err(|_| ConfigError::UnsupportedSignatureMethod(name.to_string()))
    }
}

/// Outbound proxy settings.
///
/// Credentials are only sent when both `username` and `password` are set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyConfig {
    /// Proxy host name or address
    pub host: String,
    /// Proxy port
    pub port: u16,
    /// Proxy user name
    pub username: Option<String>,
    /// Proxy password
    pub password: Option<String>,
}

impl ProxyConfig {
    /// Creates an unauthenticated proxy configuration.
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            username: None,
            password: None,
        }
    }

    /// Returns `(username, password)` when both are present.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        match (&self.username, &self.password) {
            (Some(user), Some(pass)) => Some((user.as_str(), pass.as_str())),
            _ => None,
        }
    }

    /// `host:port` authority used for CONNECT and for reqwest.
    pub fn authority(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Client configuration.
///
/// Immutable once handed to a client. Construct it programmatically with
/// struct-update syntax:
///
/// ```no_run
/// use mws_products::ClientConfig;
///
/// let config = ClientConfig {
///     service_url: Some("https://mws.amazonservices.com/Products/2011-10-01".into()),
///     max_error_retry: 5,
///     ..Default::default()
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Service endpoint URL (required)
    pub service_url: Option<String>,

    /// HTTP User-Agent header value
    pub user_agent: String,

    /// Signature version (only 2 is supported)
    pub signature_version: u32,

    /// Signature method name (`HmacSHA1` or `HmacSHA256`)
    pub signature_method: String,

    /// Optional outbound proxy
    pub proxy: Option<ProxyConfig>,

    /// Maximum number of retries after an HTTP 500
    pub max_error_retry: u32,

    /// Extra static headers appended to every request
    pub headers: Vec<(String, String)>,

    /// API version sent as the `Version` parameter
    pub service_version: String,

    /// Whole-request timeout in seconds
    pub timeout_seconds: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            service_url: None,
            user_agent: build_user_agent(DEFAULT_APPLICATION_NAME, DEFAULT_APPLICATION_VERSION, &[])
                .unwrap_or_else(|_| DEFAULT_APPLICATION_NAME.to_string()),
            signature_version: DEFAULT_SIGNATURE_VERSION,
            signature_method: DEFAULT_SIGNATURE_METHOD.to_string(),
            proxy: None,
            max_error_retry: DEFAULT_MAX_ERROR_RETRY,
            headers: Vec::new(),
            service_version: SERVICE_VERSION.to_string(),
            timeout_seconds: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl ClientConfig {
    /// Default configuration identifying the caller's application in the
    /// User-Agent header.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidUserAgent` when the name or version is
    /// empty, or an attribute has an empty value.
    pub fn with_application(
        name: &str,
        version: &str,
        attributes: &[(String, String)],
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            user_agent: build_user_agent(name, version, attributes)?,
            ..Default::default()
        })
    }

    /// Parses and checks the service URL.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingServiceUrl` when the URL is absent or
    /// blank, and `ConfigError::InvalidServiceUrl` when it does not parse as
    /// an absolute `http`/`https` URL with a host.
    pub fn endpoint(&self) -> Result<Url, ConfigError> {
        let raw = match self.service_url.as_deref().map(str::trim) {
            Some(raw) if !raw.is_empty() => raw,
            _ => return Err(ConfigError::MissingServiceUrl),
        };

        let url = Url::parse(raw).map_err(|e| ConfigError::InvalidServiceUrl {
            url: raw.to_string(),
            reason: e.to_string(),
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidServiceUrl {
                url: raw.to_string(),
                reason: format!("unsupported scheme '{}'", url.scheme()),
            });
        }
        if url.host_str().map_or(true, str::is_empty) {
            return Err(ConfigError::InvalidServiceUrl {
                url: raw.to_string(),
                reason: "missing host".to_string(),
            });
        }

        Ok(url)
    }

    /// Resolves the configured signature method.
    pub fn signature_method(&self) -> Result<SignatureMethod, ConfigError> {
        SignatureMethod::parse(&self.signature_method)
    }

    /// Validates every field the request path depends on.
    ///
    /// The client performs the same checks lazily on each call; this lets a
    /// bootstrap layer fail before issuing anything.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.endpoint()?;
        if self.signature_version != DEFAULT_SIGNATURE_VERSION {
            return Err(ConfigError::UnsupportedSignatureVersion(
                self.signature_version.to_string(),
            ));
        }
        self.signature_method()?;
        if let Some(proxy) = &self.proxy {
            if proxy.host.trim().is_empty() {
                return Err(ConfigError::InvalidProxy("proxy host is empty".to_string()));
            }
        }
        if self.timeout_seconds == 0 {
            return Err(ConfigError::InvalidTimeout);
        }
        if has_line_break(&self.user_agent) {
            return Err(ConfigError::InvalidUserAgent(
                "user agent cannot contain line breaks".to_string(),
            ));
        }
        for (name, value) in &self.headers {
            let bad_name = name.is_empty() || name.contains(|c: char| c == ':' || c.is_whitespace());
            if bad_name || has_line_break(value) {
                return Err(ConfigError::InvalidHeader(name.clone()));
            }
        }
        Ok(())
    }
}

fn has_line_break(value: &str) -> bool {
    value.contains(['\r', '\n'])
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    fn valid_config() -> ClientConfig {
        ClientConfig {
            service_url: Some("https://mws.amazonservices.com/Products/2011-10-01".into()),
            ..Default::default()
        }
    }

    #[test]
    fn test_log_level_conversion() {
        assert_eq!(
            log::LevelFilter::from(LogLevel::Error),
            log::LevelFilter::Error
        );
        assert_eq!(log::LevelFilter::from(LogLevel::Warn), log::LevelFilter::Warn);
        assert_eq!(log::LevelFilter::from(LogLevel::Info), log::LevelFilter::Info);
        assert_eq!(
            log::LevelFilter::from(LogLevel::Debug),
            log::LevelFilter::Debug
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Trace),
            log::LevelFilter::Trace
        );
    }

    #[test]
    fn test_defaults_match_service_contract() {
        let config = ClientConfig::default();
        assert_eq!(config.signature_version, 2);
        assert_eq!(config.signature_method, "HmacSHA256");
        assert_eq!(config.max_error_retry, 3);
        assert_eq!(config.service_version, "2011-10-01");
        assert!(config.service_url.is_none());
        assert!(config.proxy.is_none());
        assert!(config
            .user_agent
            .starts_with("MarketplaceWebServiceProducts/"));
        assert!(config.user_agent.contains("(Language=Rust; Platform="));
        assert!(config.user_agent.ends_with("; MWSClientVersion=2014-10-20)"));
    }

    #[test]
    fn test_with_application_builds_user_agent() {
        let attributes = vec![("Team".to_string(), "pricing".to_string())];
        let config = ClientConfig::with_application("Repricer", "3.1", &attributes).unwrap();
        assert!(config.user_agent.starts_with("Repricer/3.1 (Language=Rust; Platform="));
        assert!(config.user_agent.ends_with("; Team=pricing)"));
        assert_eq!(config.signature_method, "HmacSHA256");
        assert_eq!(config.max_error_retry, 3);

        assert!(matches!(
            ClientConfig::with_application("", "1", &[]),
            Err(ConfigError::InvalidUserAgent(_))
        ));
    }

    #[test]
    fn test_signature_method_round_trip_names() {
        for method in SignatureMethod::iter() {
            let name = method.as_ref();
            assert_eq!(SignatureMethod::parse(name).unwrap(), method);
        }
        assert_eq!(SignatureMethod::HmacSha1.to_string(), "HmacSHA1");
    }

    #[test]
    fn test_signature_method_is_case_sensitive() {
        assert!(matches!(
            SignatureMethod::parse("hmacsha256"),
            Err(ConfigError::UnsupportedSignatureMethod(_))
        ));
        assert!(SignatureMethod::parse("HmacMD5").is_err());
    }

    #[test]
    fn test_missing_service_url() {
        let config = ClientConfig::default();
        assert!(matches!(config.endpoint(), Err(ConfigError::MissingServiceUrl)));

        let blank = ClientConfig {
            service_url: Some("   ".into()),
            ..Default::default()
        };
        assert!(matches!(blank.validate(), Err(ConfigError::MissingServiceUrl)));
    }

    #[test]
    fn test_invalid_service_url() {
        for bad in ["not a url", "ftp://mws.amazonservices.com/", "/Products"] {
            let config = ClientConfig {
                service_url: Some(bad.into()),
                ..Default::default()
            };
            assert!(
                matches!(config.endpoint(), Err(ConfigError::InvalidServiceUrl { .. })),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn test_validate_signature_settings() {
        let mut config = valid_config();
        assert!(config.validate().is_ok());

        config.signature_version = 1;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::UnsupportedSignatureVersion(v)) if v == "1"
        ));

        config = valid_config();
        config.signature_method = "HmacSHA512".into();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::UnsupportedSignatureMethod(_))
        ));
    }

    #[test]
    fn test_validate_timeout_and_proxy() {
        let mut config = valid_config();
        config.timeout_seconds = 0;
        assert!(matches!(config.validate(), Err(ConfigError::InvalidTimeout)));

        config = valid_config();
        config.proxy = Some(ProxyConfig::new("", 3128));
        assert!(matches!(config.validate(), Err(ConfigError::InvalidProxy(_))));
    }

    #[test]
    fn test_proxy_credentials_require_both_parts() {
        let mut proxy = ProxyConfig::new("proxy.local", 3128);
        assert_eq!(proxy.credentials(), None);
        proxy.username = Some("user".into());
        assert_eq!(proxy.credentials(), None);
        proxy.password = Some("secret".into());
        assert_eq!(proxy.credentials(), Some(("user", "secret")));
        assert_eq!(proxy.authority(), "proxy.local:3128");
    }

    #[test]
    fn test_validate_headers_and_user_agent() {
        let mut config = valid_config();
        config.headers = vec![("x-amz-source".into(), "rust".into())];
        assert!(config.validate().is_ok());

        config.headers = vec![("X-Bad".into(), "a\r\nInjected: 1".into())];
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidHeader(name)) if name == "X-Bad"
        ));

        config.headers = vec![("Bad Name".into(), "1".into())];
        assert!(matches!(config.validate(), Err(ConfigError::InvalidHeader(_))));

        config = valid_config();
        config.user_agent = "App/1.0\n".into();
        assert!(matches!(config.validate(), Err(ConfigError::InvalidUserAgent(_))));
    }
}
