use anyhow::Result;
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::{fmt, EnvFilter};

mod cli;
mod config;
mod hosts;
mod models;
mod netbox;
mod render;
mod services;

use cli::Args;
use config::Settings;
use netbox::NetboxClient;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Cron captures stdout, so log there without colors.
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_ansi(false)
        .with_writer(std::io::stdout)
        .init();
    info!("nbssh starting, pid {}", std::process::id());

    let settings = Settings::load()?;
    debug!(
        "Using NetBox at {} with tag '{}' and statuses {:?}",
        settings.url, settings.tag, settings.statuses
    );

    run(&args, &settings).await
}

/// The pipeline: collect hosts, resolve ports, write the config.
/// Any stage error aborts before the output file is touched.
async fn run(args: &Args, settings: &Settings) -> Result<()> {
    let client = NetboxClient::new(&settings.url, &settings.token)?;

    let collected = hosts::collect_hosts(&client, &settings.tag, &settings.statuses).await?;
    let resolved = services::resolve_ports(&client, collected).await?;
    render::render(&resolved, &args.path, &args.username)?;

    info!("SSH config successfully created");
    Ok(())
}
