//! Proxy support: Basic credentials and `CONNECT` tunnelling.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::config::{ProxyConfig, MAX_PROXY_REPLY_SIZE};
use crate::error_handling::TransportError;

/// `Proxy-Authorization` value, when the proxy has both credentials set.
pub fn basic_proxy_authorization(proxy: &ProxyConfig) -> Option<String> {
    proxy
        .credentials()
        .map(|(user, pass)| format!("Basic {}", BASE64.encode(format!("{}:{}", user, pass))))
}

/// Asks the proxy on `stream` to open a tunnel to `authority` (`host:port`).
///
/// Succeeds on any 2xx reply. The reply header block is consumed; nothing
/// after it is read.
pub async fn establish_tunnel<S>(
    stream: &mut S,
    authority: &str,
    proxy: &ProxyConfig,
) -> Result<(), TransportError>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let mut request = format!("CONNECT {authority} HTTP/1.1\r\nHost: {authority}\r\n");
    if let Some(auth) = basic_proxy_authorization(proxy) {
        request.push_str(&format!("Proxy-Authorization: {auth}\r\n"));
    }
    request.push_str("\r\n");

    stream.write_all(request.as_bytes()).await?;
    stream.flush().await?;

    let mut reply = Vec::with_capacity(256);
    let mut byte = [0u8; 1];
    // Byte-at-a-time so nothing past the reply header is consumed.
    while !reply.ends_with(b"\r\n\r\n") && !reply.ends_with(b"\n\n") {
        if reply.len() >= MAX_PROXY_REPLY_SIZE {
            return Err(TransportError::Proxy(format!(
                "CONNECT reply exceeded {} bytes",
                MAX_PROXY_REPLY_SIZE
            )));
        }
        let read = stream.read(&mut byte).await?;
        if read == 0 {
            return Err(TransportError::Proxy(
                "proxy closed the connection during CONNECT".to_string(),
            ));
        }
        reply.push(byte[0]);
    }

    let text = String::from_utf8_lossy(&reply);
    let status_line = text.lines().next().unwrap_or_default();
    let status = status_line
        .split_whitespace()
        .nth(1)
        .and_then(|code| code.parse::<u16>().ok());

    match status {
        Some(code) if (200..300).contains(&code) => {
            log::debug!("Proxy tunnel to {} established", authority);
            Ok(())
        }
        _ => Err(TransportError::Proxy(format!(
            "CONNECT to {} refused: {}",
            authority,
            status_line.trim()
        ))),
    }
}
