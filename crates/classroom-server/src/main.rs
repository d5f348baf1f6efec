mod config;
mod wiring;

use std::error::Error;
use std::fs::{self, File};
use std::path::Path;

use session::EventHistoryCsvWriter;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = config::Config::from_env()?;
    init_tracing(&config.log_filter)?;
    initialize_history_output(&config.history_output_path)?;

    let listener = TcpListener::bind(config.listen_addr).await?;
    tracing::info!(
        addr = %config.listen_addr,
        history = %config.history_output_path,
        seeded = config.rng_seed.is_some(),
        "classroom server listening"
    );

    axum::serve(listener, wiring::build_app(config.app_settings())).await?;
    Ok(())
}

fn init_tracing(filter: &str) -> Result<(), tracing_subscriber::filter::ParseError> {
    let env_filter = tracing_subscriber::EnvFilter::try_new(filter)?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();
    Ok(())
}

/// Starts each server run with a fresh history file holding only the header.
fn initialize_history_output(path: &str) -> Result<(), std::io::Error> {
    let history_path = Path::new(path);

    if let Some(parent) = history_path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
    {
        fs::create_dir_all(parent)?;
    }

    let history_file = File::create(history_path)?;
    EventHistoryCsvWriter::new(history_file).write_header()
}
