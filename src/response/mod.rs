//! Response parsing.
//!
//! This module provides:
//! - Splitting of raw response bytes into status, header lines and body,
//!   skipping provisional responses such as `100 Continue`
//! - Chunked transfer decoding
//! - Extraction of the `x-mws-*` quota and request metadata

mod chunked;
mod metadata;
mod parse;

pub use chunked::{decode_chunked, ChunkedError};
pub use metadata::ResponseHeaderMetadata;
pub use parse::{parse_raw_response, RawHttpResponse};
