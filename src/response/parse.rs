//! Raw HTTP response splitting.
//!
//! The bytes handed back by a transport can carry more than one header block:
//! proxies and some servers emit provisional responses such as
//!
//! ```text
//! HTTP/1.1 100 Continue
//!
//! HTTP/1.1 200 OK
//! Content-Type: text/xml
//! Content-Length: 12605
//!
//! ...body...
//! ```
//!
//! Header blocks are split off one at a time. The first block with a valid
//! status line and a header announcing content is accepted; everything after
//! it is the body.

use super::chunked::decode_chunked;
use super::metadata::ResponseHeaderMetadata;
use crate::config::MAX_RAW_RESPONSE_PREVIEW_CHARS;
use crate::error_handling::MalformedResponse;

/// Blank-line delimiters between a header block and what follows.
const BLOCK_DELIMITERS: [&[u8]; 4] = [b"\r\n\r\n", b"\r\n\n", b"\n\r\n", b"\n\n"];

/// One HTTP response split into its parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawHttpResponse {
    pub status: u16,
    /// Header lines of the accepted block, in order, excluding the status line
    pub headers: Vec<String>,
    pub body: Vec<u8>,
}

impl RawHttpResponse {
    /// First value of header `name` (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.iter().find_map(|line| {
            let (key, value) = line.split_once(':')?;
            key.trim()
                .eq_ignore_ascii_case(name)
                .then_some(value.trim())
        })
    }

    pub fn metadata(&self) -> ResponseHeaderMetadata {
        ResponseHeaderMetadata::from_header_lines(&self.headers)
    }
}

/// Finds the earliest blank-line delimiter in `input`.
///
/// Returns the block before it and the bytes after it.
fn split_header_block(input: &[u8]) -> Option<(&[u8], &[u8])> {
    (0..input.len()).find_map(|at| {
        BLOCK_DELIMITERS
            .iter()
            .find(|delimiter| input[at..].starts_with(delimiter))
            .map(|delimiter| (&input[..at], &input[at + delimiter.len()..]))
    })
}

/// Parses `<protocol> <3-digit code>[ <reason>]`.
fn parse_status_line(line: &str) -> Option<u16> {
    let line = line.trim_end();
    let (protocol, rest) = line.split_once(' ')?;
    if protocol.is_empty() || protocol.chars().any(char::is_whitespace) {
        return None;
    }
    let rest = rest.trim_start_matches(' ');
    let code = rest.split(' ').next()?;
    if code.len() != 3 || !code.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    code.parse().ok()
}

/// Body framing announced by a header block.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct Framing {
    content_length: Option<usize>,
    chunked: bool,
    has_transfer_encoding: bool,
}

impl Framing {
    fn from_headers(headers: &[String]) -> Self {
        let mut framing = Framing::default();
        for line in headers {
            let Some((name, value)) = line.split_once(':') else {
                continue;
            };
            let (name, value) = (name.trim(), value.trim());
            if name.eq_ignore_ascii_case("content-length") {
                if !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit()) {
                    framing.content_length = framing.content_length.or(value.parse().ok());
                }
            } else if name.eq_ignore_ascii_case("transfer-encoding")
                && !value.is_empty()
                && !value.eq_ignore_ascii_case("identity")
            {
                framing.has_transfer_encoding = true;
                framing.chunked = value
                    .rsplit(',')
                    .next()
                    .is_some_and(|coding| coding.trim().eq_ignore_ascii_case("chunked"));
            }
        }
        framing
    }

    fn has_content(&self) -> bool {
        self.content_length.is_some() || self.has_transfer_encoding
    }
}

fn split_lines(block: &str) -> Vec<&str> {
    block
        .split("\r\n")
        .flat_map(|line| line.split(['\n', '\r']))
        .collect()
}

fn malformed(raw: &[u8]) -> MalformedResponse {
    let text = String::from_utf8_lossy(raw);
    let raw = match text.char_indices().nth(MAX_RAW_RESPONSE_PREVIEW_CHARS) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.into_owned(),
    };
    MalformedResponse { raw }
}

/// Splits raw response bytes into status, headers and body.
///
/// # Errors
///
/// Returns [`MalformedResponse`] when no header block has both a valid status
/// line and a content header, or when a chunked body is not valid chunked
/// framing. Never panics on arbitrary input.
pub fn parse_raw_response(raw: &[u8]) -> Result<RawHttpResponse, MalformedResponse> {
    let mut rest = raw;

    while let Some((block, after)) = split_header_block(rest) {
        let text = String::from_utf8_lossy(block);
        let mut lines = split_lines(&text)
            .into_iter()
            .skip_while(|line| line.is_empty());

        let status = lines.next().and_then(parse_status_line);
        let headers: Vec<String> = lines
            .filter(|line| !line.is_empty())
            .map(|line| line.to_string())
            .collect();
        let framing = Framing::from_headers(&headers);

        if let (Some(status), true) = (status, framing.has_content()) {
            let body = if framing.chunked {
                decode_chunked(after).map_err(|e| {
                    log::debug!("Invalid chunked body: {}", e);
                    malformed(raw)
                })?
            } else {
                match framing.content_length {
                    Some(length) if after.len() > length => after[..length].to_vec(),
                    _ => after.to_vec(),
                }
            };
            return Ok(RawHttpResponse {
                status,
                headers,
                body,
            });
        }

        if let Some(status) = status {
            log::debug!("Skipping header block with status {} and no content", status);
        }
        rest = after;
    }

    Err(malformed(raw))
}
