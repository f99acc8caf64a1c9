//! Command-line surface. A single `serve` subcommand (the default when no
//! subcommand is given) plus global flags bound to the `ENV_*` constants in
//! `constants.rs`, following the teacher's `Cli`/`CliConfig`/`parse()` split:
//! `clap` owns argument parsing, `CliConfig` is the plain-data value the rest
//! of the app consumes.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use super::constants::{ENV_CONFIG, ENV_HOST, ENV_LOG, ENV_PORT};

#[derive(Parser)]
#[command(name = "filtersvc")]
#[command(version, about = "Collections filter-expression compiler service", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Server bind address
    #[arg(long, short = 'H', global = true, env = ENV_HOST)]
    pub host: Option<String>,

    /// Server bind port
    #[arg(long, short = 'p', global = true, env = ENV_PORT)]
    pub port: Option<u16>,

    /// Path to a JSON config file
    #[arg(long, short = 'c', global = true, env = ENV_CONFIG)]
    pub config: Option<PathBuf>,

    /// Log filter directive (tracing-subscriber `EnvFilter` syntax)
    #[arg(long, global = true, env = ENV_LOG)]
    pub log: Option<String>,
}

#[derive(Subcommand, Clone, Debug)]
pub enum Commands {
    /// Start the HTTP server (default command)
    Serve,
}

/// Configuration derived from CLI arguments, independent of `clap` itself.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub config: Option<PathBuf>,
    pub log: Option<String>,
}

/// Parse `std::env::args()` into a `(CliConfig, Option<Commands>)` pair.
pub fn parse() -> (CliConfig, Option<Commands>) {
    let cli = Cli::parse();
    let config = CliConfig {
        host: cli.host,
        port: cli.port,
        config: cli.config,
        log: cli.log,
    };
    (config, cli.command)
}
