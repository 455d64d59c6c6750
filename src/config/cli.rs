//! Command-line options for the `mws_products` binary.

use clap::Parser;

use crate::config::constants::{
    DEFAULT_MAX_ERROR_RETRY, DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_SIGNATURE_METHOD,
};
use crate::config::types::{ClientConfig, LogFormat, LogLevel, ProxyConfig, TransportKind};
use crate::error_handling::ConfigError;
use crate::operations::Action;
use crate::signing::{Credentials, ParameterSet};

/// Splits `Name=Value`.
fn parse_param(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((name, value)) if !name.is_empty() => Ok((name.to_string(), value.to_string())),
        _ => Err(format!("expected Name=Value, got '{}'", raw)),
    }
}

/// Splits `Name:Value`, trimming the value.
fn parse_header(raw: &str) -> Result<(String, String), String> {
    match raw.split_once(':') {
        Some((name, value)) if !name.trim().is_empty() => {
            Ok((name.trim().to_string(), value.trim().to_string()))
        }
        _ => Err(format!("expected Name:Value, got '{}'", raw)),
    }
}

/// Command-line options and configuration.
///
/// Credentials and account identifiers can also come from the environment
/// (or a `.env` file).
///
/// # Examples
///
/// ```bash
/// # Service status
/// mws_products GetServiceStatus --seller-id A1SELLER
///
/// # Pricing for two ASINs through a proxy
/// mws_products GetMyPriceForASIN \
///     --param ASINList.ASIN.1=B00EXAMPLE1 --param ASINList.ASIN.2=B00EXAMPLE2 \
///     --proxy-host proxy.local --proxy-port 3128
/// ```
#[derive(Debug, Parser)]
#[command(
    name = "mws_products",
    version,
    about = "Sends signed requests to the MWS Products API."
)]
pub struct Opt {
    /// Operation to invoke, e.g. GetServiceStatus
    #[arg(value_parser)]
    pub action: Action,

    /// Service endpoint URL
    #[arg(long, env = "MWS_SERVICE_URL")]
    pub service_url: Option<String>,

    /// AWS access key id
    #[arg(long, env = "MWS_ACCESS_KEY_ID")]
    pub access_key_id: String,

    /// AWS secret access key
    #[arg(long, env = "MWS_SECRET_ACCESS_KEY", hide_env_values = true)]
    pub secret_key: String,

    /// Seller id, sent as SellerId
    #[arg(long, env = "MWS_SELLER_ID")]
    pub seller_id: Option<String>,

    /// Delegated authorization token, sent as MWSAuthToken
    #[arg(long, env = "MWS_AUTH_TOKEN", hide_env_values = true)]
    pub mws_auth_token: Option<String>,

    /// Marketplace id, sent as MarketplaceId (ignored for GetServiceStatus)
    #[arg(long, env = "MWS_MARKETPLACE_ID")]
    pub marketplace_id: Option<String>,

    /// Extra request parameter (repeatable), e.g. --param ASINList.ASIN.1=B00EXAMPLE
    #[arg(long = "param", value_parser = parse_param)]
    pub params: Vec<(String, String)>,

    /// Extra request header (repeatable), e.g. --header "x-amz-source: cli"
    #[arg(long = "header", value_parser = parse_header)]
    pub headers: Vec<(String, String)>,

    /// Proxy host
    #[arg(long, env = "MWS_PROXY_HOST")]
    pub proxy_host: Option<String>,

    /// Proxy port
    #[arg(long, env = "MWS_PROXY_PORT")]
    pub proxy_port: Option<u16>,

    /// Proxy user name
    #[arg(long, env = "MWS_PROXY_USERNAME")]
    pub proxy_username: Option<String>,

    /// Proxy password
    #[arg(long, env = "MWS_PROXY_PASSWORD", hide_env_values = true)]
    pub proxy_password: Option<String>,

    /// Retries after an HTTP 500
    #[arg(long, default_value_t = DEFAULT_MAX_ERROR_RETRY)]
    pub max_error_retry: u32,

    /// Signature method: HmacSHA1|HmacSHA256
    #[arg(long, default_value = DEFAULT_SIGNATURE_METHOD)]
    pub signature_method: String,

    /// Whole-request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_REQUEST_TIMEOUT_SECS)]
    pub timeout_seconds: u64,

    /// Transport: socket|pooled
    #[arg(long, value_enum, default_value_t = TransportKind::Socket)]
    pub transport: TransportKind,

    /// Application name reported in the User-Agent
    #[arg(long, default_value = env!("CARGO_PKG_NAME"))]
    pub app_name: String,

    /// Application version reported in the User-Agent
    #[arg(long, default_value = env!("CARGO_PKG_VERSION"))]
    pub app_version: String,

    /// Extra User-Agent attribute (repeatable), e.g. --user-agent-attribute Team=pricing
    #[arg(long = "user-agent-attribute", value_parser = parse_param)]
    pub user_agent_attributes: Vec<(String, String)>,

    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,
}

impl Opt {
    pub fn credentials(&self) -> Credentials {
        Credentials::new(self.access_key_id.clone(), self.secret_key.clone())
    }

    /// Builds the client configuration, including the User-Agent.
    pub fn client_config(&self) -> Result<ClientConfig, ConfigError> {
        let proxy = match (&self.proxy_host, self.proxy_port) {
            (Some(host), Some(port)) => Some(ProxyConfig {
                username: self.proxy_username.clone(),
                password: self.proxy_password.clone(),
                ..ProxyConfig::new(host.clone(), port)
            }),
            (Some(_), None) => {
                return Err(ConfigError::InvalidProxy(
                    "--proxy-port is required with --proxy-host".to_string(),
                ))
            }
            _ => None,
        };

        Ok(ClientConfig {
            service_url: self.service_url.clone(),
            signature_method: self.signature_method.clone(),
            proxy,
            max_error_retry: self.max_error_retry,
            headers: self.headers.clone(),
            timeout_seconds: self.timeout_seconds,
            ..ClientConfig::with_application(
                &self.app_name,
                &self.app_version,
                &self.user_agent_attributes,
            )?
        })
    }

    /// Request parameters: `Action`, the account fields, then `--param`s.
    ///
    /// Explicit `--param` values win over the account flags.
    pub fn parameters(&self) -> ParameterSet {
        let mut parameters = ParameterSet::new();
        parameters.insert("Action", self.action.as_ref());
        if let Some(seller_id) = &self.seller_id {
            parameters.insert("SellerId", seller_id.as_str());
        }
        if let Some(token) = &self.mws_auth_token {
            parameters.insert("MWSAuthToken", token.as_str());
        }
        if self.action != Action::GetServiceStatus {
            if let Some(marketplace_id) = &self.marketplace_id {
                parameters.insert("MarketplaceId", marketplace_id.as_str());
            }
        }
        parameters.extend(self.params.iter().cloned());
        parameters
    }
}
