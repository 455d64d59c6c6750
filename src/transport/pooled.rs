//! `reqwest`-backed transport.

use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_LENGTH, TRANSFER_ENCODING};

use super::{Transport, TransportRequest};
use crate::config::{ClientConfig, HEADER_USER_AGENT, MAX_RESPONSE_SIZE};
use crate::error_handling::{InitializationError, TransportError};
use crate::initialization::init_client;

/// Transport backed by a shared, pooled `reqwest::Client`.
///
/// `reqwest` consumes provisional responses and chunk framing itself, so the
/// final response is re-serialized as a single HTTP/1.1 message with an
/// explicit `Content-Length`.
#[derive(Debug, Clone)]
pub struct PooledTransport {
    client: Arc<reqwest::Client>,
    max_response_size: usize,
}

impl PooledTransport {
    /// Creates a transport with proxy and timeouts taken from `config`.
    pub fn new(config: &ClientConfig) -> Result<Self, InitializationError> {
        Ok(Self::from_client(init_client(config)?))
    }

    /// Wraps an existing client.
    pub fn from_client(client: Arc<reqwest::Client>) -> Self {
        Self {
            client,
            max_response_size: MAX_RESPONSE_SIZE,
        }
    }
}

fn build_headers(request: &TransportRequest) -> HeaderMap {
    let mut headers = HeaderMap::new();
    let all = request
        .headers
        .iter()
        .map(|(name, value)| (name.as_str(), value.as_str()))
        .chain(std::iter::once((HEADER_USER_AGENT, request.user_agent.as_str())));
    for (name, value) in all {
        match (
            HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_str(value),
        ) {
            (Ok(name), Ok(value)) => {
                headers.append(name, value);
            }
            _ => log::warn!("Skipping header that is not valid HTTP: {}", name),
        }
    }
    headers
}

/// Renders a response as raw HTTP/1.1 bytes.
fn serialize_response(
    status: reqwest::StatusCode,
    headers: &HeaderMap,
    body: &[u8],
) -> Vec<u8> {
    let mut raw = format!(
        "HTTP/1.1 {} {}\r\n",
        status.as_u16(),
        status.canonical_reason().unwrap_or("Unknown")
    );
    for (name, value) in headers {
        if name == CONTENT_LENGTH || name == TRANSFER_ENCODING {
            continue;
        }
        raw.push_str(&format!(
            "{}: {}\r\n",
            name.as_str(),
            String::from_utf8_lossy(value.as_bytes())
        ));
    }
    raw.push_str(&format!("Content-Length: {}\r\n\r\n", body.len()));

    let mut bytes = raw.into_bytes();
    bytes.extend_from_slice(body);
    bytes
}

impl Transport for PooledTransport {
    async fn send(&self, request: &TransportRequest) -> Result<Vec<u8>, TransportError> {
        let mut response = self
            .client
            .post(request.url.clone())
            .headers(build_headers(request))
            .body(request.body.clone())
            .send()
            .await?;

        let status = response.status();
        let headers = response.headers().clone();

        let mut body = Vec::new();
        while let Some(chunk) = response.chunk().await? {
            if body.len() + chunk.len() > self.max_response_size {
                return Err(TransportError::ResponseTooLarge(self.max_response_size));
            }
            body.extend_from_slice(&chunk);
        }

        log::debug!("Received {} {} ({} body bytes)", status.as_u16(), request.url, body.len());
        Ok(serialize_response(status, &headers, &body))
    }
}
