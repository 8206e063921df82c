//! Reqlog demo server binary.

use reqlog_server::{Settings, logger, run_server};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load()?;
    let log = logger::init(&settings.log())?;

    tracing::info!(
        tag = "server",
        "Starting reqlog server v{}",
        env!("CARGO_PKG_VERSION")
    );
    if !settings.skip_paths.is_empty() {
        tracing::info!(tag = "server", "Skipping paths: {:?}", settings.skip_paths);
    }

    if let Err(e) = run_server(&settings, log).await {
        tracing::error!(tag = "server", error = %e, "Server failed");
        std::process::exit(1);
    }

    Ok(())
}
