//! Entry point for the Shipping Engine binary.
//!
//! Running this binary will start an HTTP server that exposes a
//! minimal API for quoting shipping rates.  The JSON file holding the
//! configuration snapshot may be specified via the
//! `SHIPPING_SNAPSHOT_FILE` environment variable; if unset the server
//! looks for a `snapshot.json` file relative to the current working
//! directory.

use std::path::PathBuf;
use tracing::error;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Determine where the configuration snapshot is located
    let snapshot_file =
        std::env::var("SHIPPING_SNAPSHOT_FILE").unwrap_or_else(|_| "snapshot.json".to_string());
    let snapshot_path = PathBuf::from(snapshot_file);
    // Determine bind address
    let addr = std::env::var("SHIPPING_BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:3000".to_string());
    if let Err(err) = shipping_engine::api::serve(&addr, snapshot_path).await {
        error!(error = %err, "error running server");
        std::process::exit(1);
    }
}
