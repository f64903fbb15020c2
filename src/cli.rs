//! Command-line interface parsing for the port call reporter
//!
//! Parses arguments with clap and validates them into a `RunConfig` before
//! any network or cache I/O happens.

use std::path::PathBuf;

use clap::Parser;
use directories::ProjectDirs;
use thiserror::Error;

/// Error types for CLI argument validation
#[derive(Debug, Error)]
pub enum CliError {
    /// An empty port code was supplied
    #[error("Please specify a port code, e.g. FIKOK")]
    EmptyPortCode,

    /// No cache directory was given and the platform default could not be
    /// determined
    #[error("Could not determine a cache directory; pass --cache-dir")]
    NoCacheDir,
}

/// Port call reporter - vessel arrivals and departures from Fintraffic
#[derive(Parser, Debug)]
#[command(name = "portcall")]
#[command(about = "Prints upcoming and recent port call events for a Finnish port")]
#[command(version)]
pub struct Cli {
    /// Port code to report, e.g. FIKOK
    #[arg(short = 'p', long = "port", value_name = "PORT")]
    pub port: String,

    /// Cache directory (defaults to the platform cache dir)
    #[arg(long, value_name = "DIR")]
    pub cache_dir: Option<PathBuf>,
}

/// Validated configuration for one run
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Port code to report on
    pub port_code: String,
    /// Directory holding cache entries
    pub cache_dir: PathBuf,
}

impl RunConfig {
    /// Validates parsed CLI arguments into a run configuration.
    ///
    /// # Returns
    /// * `Ok(RunConfig)` with a non-empty port code and a resolved cache dir
    /// * `Err(CliError)` if the port code is empty or no cache dir exists
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        let port_code = cli.port.trim().to_string();
        if port_code.is_empty() {
            return Err(CliError::EmptyPortCode);
        }

        let cache_dir = match &cli.cache_dir {
            Some(dir) => dir.clone(),
            None => default_cache_dir().ok_or(CliError::NoCacheDir)?,
        };

        Ok(RunConfig {
            port_code,
            cache_dir,
        })
    }
}

/// Returns the XDG-compliant cache directory for this tool
/// (`~/.cache/portcall` on Linux), or `None` when no home directory can be
/// determined.
pub fn default_cache_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "portcall").map(|dirs| dirs.cache_dir().to_path_buf())
}
