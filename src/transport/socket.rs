//! HTTP/1.1 over a plain socket or TLS stream.
//!
//! Each attempt opens a fresh connection, sends the request with
//! `Connection: close` and reads until the server closes. Nothing in the
//! response is interpreted here, so provisional responses reach the parser
//! untouched.

use std::time::Duration;

use rustls::pki_types::ServerName;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio_rustls::TlsConnector;

use super::proxy::{basic_proxy_authorization, establish_tunnel};
use super::{Transport, TransportRequest};
use crate::config::{
    connect_timeout, tls_handshake_timeout, ClientConfig, ProxyConfig, HEADER_USER_AGENT,
    MAX_RESPONSE_SIZE,
};
use crate::error_handling::{InitializationError, TransportError};
use crate::initialization::init_tls_connector;

/// Default transport: hand-written HTTP/1.1 over `tokio` + `tokio-rustls`.
#[derive(Clone)]
pub struct SocketTransport {
    tls: TlsConnector,
    proxy: Option<ProxyConfig>,
    timeout: Duration,
    max_response_size: usize,
}

impl std::fmt::Debug for SocketTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SocketTransport")
            .field("proxy", &self.proxy.as_ref().map(ProxyConfig::authority))
            .field("timeout", &self.timeout)
            .field("max_response_size", &self.max_response_size)
            .finish()
    }
}

impl SocketTransport {
    /// Creates a transport using the proxy and timeout from `config`.
    ///
    /// # Errors
    ///
    /// Returns `InitializationError::TlsConfigError` if the TLS client
    /// configuration cannot be built.
    pub fn new(config: &ClientConfig) -> Result<Self, InitializationError> {
        Ok(Self {
            tls: init_tls_connector()?,
            proxy: config.proxy.clone(),
            timeout: Duration::from_secs(config.timeout_seconds),
            max_response_size: MAX_RESPONSE_SIZE,
        })
    }

    /// Caps how many response bytes are accepted before giving up.
    pub fn with_max_response_size(mut self, max_response_size: usize) -> Self {
        self.max_response_size = max_response_size;
        self
    }

    async fn connect(&self, authority: &str) -> Result<TcpStream, TransportError> {
        log::debug!("Connecting to {}", authority);
        match tokio::time::timeout(connect_timeout(), TcpStream::connect(authority)).await {
            Ok(Ok(stream)) => Ok(stream),
            Ok(Err(e)) => Err(TransportError::Connect {
                addr: authority.to_string(),
                source: e,
            }),
            Err(_) => Err(TransportError::Timeout("connect")),
        }
    }

    async fn send_once(&self, request: &TransportRequest) -> Result<Vec<u8>, TransportError> {
        let url = &request.url;
        let host = url
            .host_str()
            .ok_or_else(|| TransportError::InvalidDnsName(url.to_string()))?;
        let port = url
            .port_or_known_default()
            .unwrap_or(if url.scheme() == "https" { 443 } else { 80 });
        let target_authority = format!("{}:{}", host, port);
        let is_https = url.scheme() == "https";

        match (&self.proxy, is_https) {
            (None, false) => {
                let mut stream = self.connect(&target_authority).await?;
                let head = request_head(request, RequestTarget::Origin, None);
                exchange(&mut stream, &head, request.body.as_bytes(), self.max_response_size).await
            }
            (Some(proxy), false) => {
                let mut stream = self.connect(&proxy.authority()).await?;
                let auth = basic_proxy_authorization(proxy);
                let head = request_head(request, RequestTarget::Absolute, auth.as_deref());
                exchange(&mut stream, &head, request.body.as_bytes(), self.max_response_size).await
            }
            (proxy, true) => {
                let mut stream = match proxy {
                    Some(proxy) => {
                        let mut stream = self.connect(&proxy.authority()).await?;
                        tokio::time::timeout(
                            connect_timeout(),
                            establish_tunnel(&mut stream, &target_authority, proxy),
                        )
                        .await
                        .map_err(|_| TransportError::Timeout("proxy CONNECT"))??;
                        stream
                    }
                    None => self.connect(&target_authority).await?,
                };

                let server_name = ServerName::try_from(host.to_string())
                    .map_err(|_| TransportError::InvalidDnsName(host.to_string()))?;
                let mut tls_stream = match tokio::time::timeout(
                    tls_handshake_timeout(),
                    self.tls.connect(server_name, &mut stream),
                )
                .await
                {
                    Ok(Ok(tls_stream)) => tls_stream,
                    Ok(Err(e)) => {
                        return Err(TransportError::Tls {
                            host: host.to_string(),
                            source: e,
                        })
                    }
                    Err(_) => return Err(TransportError::Timeout("TLS handshake")),
                };

                let head = request_head(request, RequestTarget::Origin, None);
                exchange(&mut tls_stream, &head, request.body.as_bytes(), self.max_response_size)
                    .await
            }
        }
    }
}

impl Transport for SocketTransport {
    async fn send(&self, request: &TransportRequest) -> Result<Vec<u8>, TransportError> {
        tokio::time::timeout(self.timeout, self.send_once(request))
            .await
            .map_err(|_| TransportError::Timeout("request"))?
    }
}

/// Form of the request-target on the request line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RequestTarget {
    /// `/path?query`, used for direct and tunnelled requests
    Origin,
    /// `http://host:port/path?query`, used through a forward proxy
    Absolute,
}

/// Serializes the request line and headers, ending with the blank line.
fn request_head(
    request: &TransportRequest,
    target: RequestTarget,
    proxy_authorization: Option<&str>,
) -> String {
    let url = &request.url;
    let target = match target {
        RequestTarget::Origin => match url.query() {
            Some(query) => format!("{}?{}", url.path(), query),
            None => url.path().to_string(),
        },
        RequestTarget::Absolute => {
            let mut absolute = url.clone();
            absolute.set_fragment(None);
            absolute.to_string()
        }
    };
    let host_header = match url.port() {
        Some(port) => format!("{}:{}", url.host_str().unwrap_or_default(), port),
        None => url.host_str().unwrap_or_default().to_string(),
    };

    let mut head = format!("POST {} HTTP/1.1\r\nHost: {}\r\n", target, host_header);
    for (name, value) in &request.headers {
        head.push_str(&format!("{}: {}\r\n", name, value));
    }
    head.push_str(&format!("{}: {}\r\n", HEADER_USER_AGENT, request.user_agent));
    head.push_str(&format!("Content-Length: {}\r\n", request.body.len()));
    head.push_str("Connection: close\r\n");
    if let Some(auth) = proxy_authorization {
        head.push_str(&format!("Proxy-Authorization: {}\r\n", auth));
    }
    head.push_str("\r\n");
    head
}

/// Writes the request and reads the response until the peer closes.
async fn exchange<S>(
    stream: &mut S,
    head: &str,
    body: &[u8],
    max_response_size: usize,
) -> Result<Vec<u8>, TransportError>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    stream.write_all(head.as_bytes()).await?;
    stream.write_all(body).await?;
    stream.flush().await?;

    let mut response = Vec::new();
    let mut chunk = [0u8; 8 * 1024];
    loop {
        let read = match stream.read(&mut chunk).await {
            Ok(read) => read,
            // Peers that close TLS without close_notify still delivered the response.
            Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof && !response.is_empty() => 0,
            Err(e) => return Err(e.into()),
        };
        if read == 0 {
            break;
        }
        if response.len() + read > max_response_size {
            return Err(TransportError::ResponseTooLarge(max_response_size));
        }
        response.extend_from_slice(&chunk[..read]);
    }

    log::debug!("Received {} response bytes", response.len());
    Ok(response)
}
