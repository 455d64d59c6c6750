//! HTTP and TLS client initialization.
//!
//! This module builds the clients the transports share: a `reqwest::Client`
//! for the pooled transport and a `tokio-rustls` connector for the socket
//! transport.

use std::sync::Arc;
use std::time::Duration;

use reqwest::ClientBuilder;
use rustls::crypto::ring::default_provider;
use tokio_rustls::rustls::{ClientConfig as TlsClientConfig, RootCertStore};
use tokio_rustls::TlsConnector;

use crate::config::{connect_timeout, ClientConfig};
use crate::error_handling::InitializationError;

/// Initializes the pooled HTTP client.
///
/// Creates a `reqwest::Client` configured with:
/// - Whole-request timeout from the configuration, plus the connect timeout
/// - Redirects disabled (a redirected POST would lose its signature)
/// - Rustls TLS backend (no native TLS)
/// - The configured proxy for all schemes, with Basic credentials when both
///   username and password are set
///
/// # Errors
///
/// Returns `InitializationError::HttpClientError` if the proxy URL is invalid
/// or client creation fails.
pub fn init_client(config: &ClientConfig) -> Result<Arc<reqwest::Client>, InitializationError> {
    let mut builder = ClientBuilder::new()
        .redirect(reqwest::redirect::Policy::none())
        .timeout(Duration::from_secs(config.timeout_seconds))
        .connect_timeout(connect_timeout())
        .use_rustls_tls();

    if let Some(proxy_config) = &config.proxy {
        let mut proxy = reqwest::Proxy::all(format!("http://{}", proxy_config.authority()))?;
        if let Some((user, pass)) = proxy_config.credentials() {
            proxy = proxy.basic_auth(user, pass);
        }
        builder = builder.proxy(proxy);
    } else {
        builder = builder.no_proxy();
    }

    Ok(Arc::new(builder.build()?))
}

/// Initializes the TLS connector used by the socket transport.
///
/// Peers are verified against the bundled webpki roots, and the certificate
/// must match the host name. The `ring` provider is selected explicitly so
/// that no process-wide default is required.
///
/// # Errors
///
/// Returns `InitializationError::TlsConfigError` if no protocol version is
/// supported by the provider.
pub fn init_tls_connector() -> Result<TlsConnector, InitializationError> {
    let mut root_store = RootCertStore::empty();
    root_store.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());

    let config = TlsClientConfig::builder_with_provider(Arc::new(default_provider()))
        .with_safe_default_protocol_versions()
        .map_err(|e| InitializationError::TlsConfigError(e.to_string()))?
        .with_root_certificates(root_store)
        .with_no_client_auth();

    Ok(TlsConnector::from(Arc::new(config)))
}
