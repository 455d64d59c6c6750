//! The MWS Products client.
//!
//! [`MwsClient`] owns immutable configuration, credentials and a transport.
//! Each call signs its parameters once and then drives transport attempts
//! until a 200, a terminal error, or an exhausted retry budget.

mod executor;

use std::borrow::Cow;

use chrono::Utc;

use crate::config::ClientConfig;
use crate::error_handling::{ApiError, InitializationError};
use crate::operations::Operation;
use crate::response::ResponseHeaderMetadata;
use crate::signing::{sign_request, Credentials, ParameterSet};
use crate::transport::{PooledTransport, SocketTransport, Transport, TransportRequest};

/// Successful (HTTP 200) response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MwsResponse {
    /// Response body exactly as received (de-chunked)
    pub body: Vec<u8>,
    pub metadata: ResponseHeaderMetadata,
    pub status: u16,
}

impl MwsResponse {
    /// Body as text, with invalid UTF-8 replaced.
    pub fn body_text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }
}

/// Signed-request client for the Products API.
///
/// # Examples
///
/// ```no_run
/// use mws_products::operations::GetServiceStatusRequest;
/// use mws_products::{ClientConfig, Credentials, MwsClient};
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = ClientConfig {
///     service_url: Some("https://mws.amazonservices.com/Products/2011-10-01".into()),
///     ..Default::default()
/// };
/// let client = MwsClient::new(Credentials::new("AKID", "secret"), config)?;
/// let response = client
///     .invoke(&GetServiceStatusRequest {
///         seller_id: Some("A1SELLER".into()),
///         ..Default::default()
///     })
///     .await?;
/// println!("{}", response.body_text());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct MwsClient<T = SocketTransport> {
    credentials: Credentials,
    config: ClientConfig,
    transport: T,
}

impl MwsClient<SocketTransport> {
    /// Creates a client using the socket transport.
    pub fn new(credentials: Credentials, config: ClientConfig) -> Result<Self, InitializationError> {
        let transport = SocketTransport::new(&config)?;
        Ok(Self::with_transport(credentials, config, transport))
    }
}

impl MwsClient<PooledTransport> {
    /// Creates a client using the pooled `reqwest` transport.
    pub fn pooled(
        credentials: Credentials,
        config: ClientConfig,
    ) -> Result<Self, InitializationError> {
        let transport = PooledTransport::new(&config)?;
        Ok(Self::with_transport(credentials, config, transport))
    }
}

impl<T: Transport> MwsClient<T> {
    pub fn with_transport(credentials: Credentials, config: ClientConfig, transport: T) -> Self {
        Self {
            credentials,
            config,
            transport,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Signs `parameters` and sends them, retrying on HTTP 500.
    ///
    /// # Errors
    ///
    /// - `Configuration` when the configuration cannot produce a signed
    ///   request; nothing is sent
    /// - `Transport` / `MalformedResponse` from the failing attempt
    /// - `Server` for a 500 after `max_error_retry` retries
    /// - `Api` for any other non-200 status
    pub async fn execute(&self, parameters: ParameterSet) -> Result<MwsResponse, ApiError> {
        self.config.validate()?;
        let endpoint = self.config.endpoint()?;

        let signed = sign_request(
            parameters,
            &self.credentials,
            &self.config,
            &endpoint,
            Utc::now(),
        )?;
        let request = TransportRequest::new(endpoint, signed.body().to_string(), &self.config);

        executor::send_with_retry(&self.transport, &request, self.config.max_error_retry).await
    }

    /// Executes a typed operation request.
    pub async fn invoke<O: Operation + ?Sized>(&self, request: &O) -> Result<MwsResponse, ApiError> {
        log::debug!("Invoking {}", request.action());
        self.execute(request.to_parameter_set()).await
    }
}
