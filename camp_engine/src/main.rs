//! Entry point for the Camp Engine binary.
//!
//! Running this binary will start an HTTP server that exposes the
//! accounting and calendar API.  Engine settings are read from the JSON
//! file named by the `CAMP_CONFIG` environment variable; the bind
//! address is taken from `CAMP_BIND_ADDR` (default `127.0.0.1:3000`).
//! Log verbosity follows `RUST_LOG` (default `info`).

use tracing::{error, info};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let settings = match camp_engine::config::settings_from_env() {
        Ok(settings) => settings,
        Err(err) => {
            error!("Error loading settings: {:#}", err);
            std::process::exit(1);
        }
    };
    let addr = camp_engine::config::bind_addr_from_env();
    info!(today = %camp_engine::jalali::now(), "Starting camp engine");
    if let Err(err) = camp_engine::api::serve(&addr, settings).await {
        error!("Error running server: {:#}", err);
        std::process::exit(1);
    }
}
