//! # Device Runtime
//!
//! Entry point: configure logging, build the Binary Value store from the
//! environment and serve JSON-line requests until stdin closes or Ctrl+C.
//!
//! ## Startup Sequence
//!
//! 1. Install the tracing subscriber (`BO_LOG_LEVEL`, then `RUST_LOG`)
//! 2. Load and validate configuration from the environment
//! 3. Serve requests from stdin, responses to stdout
//! 4. Release every object on shutdown

use std::sync::Arc;

use anyhow::{Context, Result};
use bo_05_binary_value::{BinaryValueConfig, TracingNotifier};
use device_runtime::DeviceRuntime;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn init_tracing() -> Result<()> {
    let filter = EnvFilter::try_from_env("BO_LOG_LEVEL")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("info"));

    // stdout carries responses
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install tracing subscriber: {}", e))
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing()?;

    let config = BinaryValueConfig::from_env();
    let notifier = Arc::new(TracingNotifier::new());
    let mut runtime = DeviceRuntime::new(config, notifier.clone())
        .context("invalid binary value configuration")?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    info!("Device runtime ready. Reading requests from stdin.");
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("failed to read request line")? else {
                    break;
                };
                if let Some(response) = runtime
                    .process_line(&line)
                    .context("failed to encode response")?
                {
                    stdout.write_all(response.as_bytes()).await?;
                    stdout.write_all(b"\n").await?;
                    stdout.flush().await?;
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupt received");
                break;
            }
        }
    }

    runtime.shutdown();
    info!(
        notifications = notifier.delivered(),
        "Device runtime stopped"
    );
    Ok(())
}
