//! Client configuration and constants.
//!
//! This module provides:
//! - Protocol constants and operational defaults (timeouts, limits, backoff)
//! - HTTP header name constants
//! - Client configuration types and CLI value enums
//! - Command-line options for the binary

mod cli;
mod constants;
mod headers;
mod types;

// Re-export all constants
pub use cli::Opt;
pub use constants::*;
pub use headers::*;
pub use types::{ClientConfig, LogFormat, LogLevel, ProxyConfig, SignatureMethod, TransportKind};
