//! `Transfer-Encoding: chunked` body decoding.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChunkedError {
    #[error("invalid chunk size line")]
    InvalidSize,
    #[error("chunk data truncated")]
    Truncated,
    #[error("missing CRLF after chunk data")]
    MissingTerminator,
}

/// Splits off one line, accepting `\r\n` or a bare `\n` as its end.
fn take_line(input: &[u8]) -> Option<(&[u8], &[u8])> {
    let newline = input.iter().position(|&b| b == b'\n')?;
    let line = &input[..newline];
    let line = line.strip_suffix(b"\r").unwrap_or(line);
    Some((line, &input[newline + 1..]))
}

/// Decodes a chunked body. Chunk extensions and trailers are ignored.
pub fn decode_chunked(mut input: &[u8]) -> Result<Vec<u8>, ChunkedError> {
    let mut body = Vec::with_capacity(input.len());

    loop {
        let (size_line, rest) = take_line(input).ok_or(ChunkedError::InvalidSize)?;
        let size_text = std::str::from_utf8(size_line).map_err(|_| ChunkedError::InvalidSize)?;
        let size_text = size_text.split(';').next().unwrap_or_default().trim();
        let size = usize::from_str_radix(size_text, 16).map_err(|_| ChunkedError::InvalidSize)?;

        if size == 0 {
            return Ok(body);
        }

        if rest.len() < size {
            return Err(ChunkedError::Truncated);
        }
        body.extend_from_slice(&rest[..size]);
        input = &rest[size..];

        input = if let Some(stripped) = input.strip_prefix(b"\r\n") {
            stripped
        } else if let Some(stripped) = input.strip_prefix(b"\n") {
            stripped
        } else {
            return Err(ChunkedError::MissingTerminator);
        };
    }
}
