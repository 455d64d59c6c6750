//! mws_products library: signed-request client for the MWS Products API
//!
//! This library builds Signature Version 2 requests, sends them over HTTP/1.1
//! (directly over TCP/TLS or through a pooled `reqwest` client), retries
//! HTTP 500 responses with exponential backoff, and turns raw responses into
//! a body plus quota metadata or a structured [`ApiError`].
//!
//! # Example
//!
//! ```no_run
//! use mws_products::operations::GetMyPriceForAsinRequest;
//! use mws_products::{ClientConfig, Credentials, MwsClient};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ClientConfig {
//!     service_url: Some("https://mws.amazonservices.com/Products/2011-10-01".into()),
//!     ..Default::default()
//! };
//! let client = MwsClient::new(Credentials::new("AKID", "secret"), config)?;
//!
//! let request = GetMyPriceForAsinRequest {
//!     seller_id: Some("A1SELLER".into()),
//!     marketplace_id: Some("ATVPDKIKX0DER".into()),
//!     asin_list: vec!["B00EXAMPLE".into()],
//!     ..Default::default()
//! };
//! match client.invoke(&request).await {
//!     Ok(response) => println!("{}", response.body_text()),
//!     Err(e) => eprintln!("{} (code {:?}, request {:?})", e, e.code, e.request_id),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your application
//! or ensure you're calling library functions within an async context.

mod client;
pub mod config;
mod error_handling;
pub mod initialization;
pub mod operations;
pub mod response;
pub mod signing;
pub mod transport;
pub mod user_agent;

// Re-export public API
pub use client::{MwsClient, MwsResponse};
pub use config::{ClientConfig, LogFormat, LogLevel, Opt, ProxyConfig, SignatureMethod, TransportKind};
pub use error_handling::{
    ApiError, BoxError, ConfigError, ErrorFault, ErrorKind, InitializationError,
    MalformedResponse, TransportError,
};
pub use operations::{Action, Operation};
pub use response::{parse_raw_response, RawHttpResponse, ResponseHeaderMetadata};
pub use signing::{Credentials, ParameterSet, SignedRequest};
pub use transport::{PooledTransport, SocketTransport, Transport, TransportRequest};
