//! Runestream server binary: runs the broker head TCP server.
//!
//! Optional: set RUNESTREAM_ADDR (e.g. 0.0.0.0:9092) to override the
//! default listen address.

use runestream::{server, EmptyDirectory};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

const DEFAULT_ADDR: &str = "0.0.0.0:9092";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("runestream=info".parse()?))
        .init();

    let addr = std::env::var("RUNESTREAM_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string());
    server::run_server(Arc::new(EmptyDirectory), &addr).await?;
    Ok(())
}
