//! HTTP transports.
//!
//! A transport performs exactly one POST attempt and hands back the raw
//! response bytes (status line, headers, body) for the response parser. It
//! never interprets status codes and never retries.
//!
//! Two implementations are provided:
//! - [`SocketTransport`]: HTTP/1.1 written directly over TCP or TLS. The
//!   response is returned byte for byte, provisional responses included.
//! - [`PooledTransport`]: a `reqwest` client with its own connection pool; the
//!   response is re-serialized into HTTP/1.1 form.

mod pooled;
mod proxy;
mod socket;

use std::future::Future;

use url::Url;

use crate::config::{is_reserved_request_header, ClientConfig, FORM_CONTENT_TYPE};
use crate::error_handling::TransportError;

pub use pooled::PooledTransport;
pub use proxy::{basic_proxy_authorization, establish_tunnel};
pub use socket::SocketTransport;

/// Everything a transport needs for one POST.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportRequest {
    pub url: Url,
    /// Canonical, signed query string sent as the form body
    pub body: String,
    /// Headers in send order: configured extras, then Content-Type
    pub headers: Vec<(String, String)>,
    pub user_agent: String,
}

impl TransportRequest {
    /// Builds the request for `body`, applying the configured headers.
    ///
    /// Configured headers whose names the transport owns (`Content-Type`,
    /// `Expect`, `Host`, ...) are dropped.
    pub fn new(url: Url, body: String, config: &ClientConfig) -> Self {
        let mut headers: Vec<(String, String)> = config
            .headers
            .iter()
            .filter(|(name, _)| {
                let reserved = is_reserved_request_header(name);
                if reserved {
                    log::debug!("Dropping reserved header from configuration: {}", name);
                }
                !reserved
            })
            .cloned()
            .collect();
        headers.push((
            crate::config::HEADER_CONTENT_TYPE.to_string(),
            FORM_CONTENT_TYPE.to_string(),
        ));

        Self {
            url,
            body,
            headers,
            user_agent: config.user_agent.clone(),
        }
    }
}

/// One HTTP POST attempt.
pub trait Transport: Send + Sync {
    /// Sends `request` and returns the raw response bytes.
    fn send(
        &self,
        request: &TransportRequest,
    ) -> impl Future<Output = Result<Vec<u8>, TransportError>> + Send;
}

impl<T: Transport> Transport for std::sync::Arc<T> {
    fn send(
        &self,
        request: &TransportRequest,
    ) -> impl Future<Output = Result<Vec<u8>, TransportError>> + Send {
        (**self).send(request)
    }
}
