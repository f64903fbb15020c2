//! Port call reporter - vessel arrivals and departures from Fintraffic
//!
//! Prints the upcoming and recent port call events for one Finnish port,
//! enriched with vessel details, using a local time-bounded cache to avoid
//! redundant network calls.

use chrono::Utc;
use clap::Parser;

use portcall::app::build_report;
use portcall::cache::FileCache;
use portcall::cli::{Cli, RunConfig};
use portcall::data::DigitrafficClient;
use portcall::output::render_report;

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(err) = run().await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = RunConfig::from_cli(&cli)?;

    let cache = FileCache::new(config.cache_dir);
    let client = DigitrafficClient::new(cache);

    let report = build_report(&client, &config.port_code, Utc::now()).await?;
    print!("{}", render_report(&report));

    Ok(())
}
