//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `mws_products` library that handles:
//! - Command-line argument parsing
//! - Environment variable loading (.env file)
//! - Logger initialization
//! - User-facing output formatting
//!
//! All request signing, transport and parsing is implemented in the library crate.

use std::io::Write;
use std::process;

use anyhow::{Context, Result};
use clap::Parser;

use mws_products::initialization::{init_crypto_provider, init_logger_with};
use mws_products::{ApiError, MwsClient, MwsResponse, Opt, ParameterSet, Transport, TransportKind};

async fn run<T: Transport>(
    client: MwsClient<T>,
    parameters: ParameterSet,
) -> Result<MwsResponse, ApiError> {
    client.execute(parameters).await
}

fn report_failure(error: &ApiError) {
    eprintln!("mws_products error: {}", error);
    if let Some(code) = &error.code {
        eprintln!("  code: {}", code);
    }
    if let Some(status) = error.status_code {
        eprintln!("  status: {}", status);
    }
    eprintln!("  type: {}", error.error_type);
    if let Some(request_id) = &error.request_id {
        eprintln!("  request id: {}", request_id);
    }
    if let Some(xml) = &error.xml {
        eprintln!("{}", xml);
    }
    let mut source = std::error::Error::source(error);
    while let Some(cause) = source {
        eprintln!("  caused by: {}", cause);
        source = cause.source();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file (if it exists)
    // Try loading from current directory first, then from the executable's directory
    if dotenvy::dotenv().is_err() {
        if let Ok(exe_path) = std::env::current_exe() {
            if let Some(exe_dir) = exe_path.parent() {
                let env_path = exe_dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                }
            }
        }
    }

    let opt = Opt::parse();

    init_logger_with(opt.log_level.clone().into(), opt.log_format.clone())
        .context("Failed to initialize logger")?;

    // Initialize crypto provider for TLS operations
    init_crypto_provider();

    let config = opt.client_config().context("Invalid configuration")?;
    let credentials = opt.credentials();
    let parameters = opt.parameters();

    let result = match opt.transport {
        TransportKind::Socket => {
            let client = MwsClient::new(credentials, config)
                .context("Failed to initialize socket transport")?;
            run(client, parameters).await
        }
        TransportKind::Pooled => {
            let client = MwsClient::pooled(credentials, config)
                .context("Failed to initialize pooled transport")?;
            run(client, parameters).await
        }
    };

    match result {
        Ok(response) => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(&response.body)
                .context("Failed to write response body")?;
            stdout.flush().context("Failed to flush stdout")?;
            eprintln!(
                "{}",
                serde_json::to_string_pretty(&response.metadata)
                    .context("Failed to serialize response metadata")?
            );
            Ok(())
        }
        Err(e) => {
            report_failure(&e);
            process::exit(1);
        }
    }
}
