// SPDX-FileCopyrightText: 2026 Toolport Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Toolport - MCP adapter servers for image generation and US weather.
//!
//! This is the binary entry point. Each subcommand runs one server over
//! stdio; stdout carries MCP traffic, so everything else goes to stderr.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod serve;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use toolport_config::{ConfigError, ToolportConfig};

/// Toolport - MCP adapter servers for image generation and US weather.
#[derive(Parser, Debug)]
#[command(name = "toolport", version, about, long_about = None)]
struct Cli {
    /// Configuration file. Replaces the standard search path when given.
    #[arg(short, long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Commands {
    /// Serve the image generation tool over stdio.
    Image,
    /// Serve the weather tools over stdio.
    Weather,
    /// Validate configuration and exit.
    CheckConfig,
}

fn load(path: Option<&Path>) -> Result<ToolportConfig, Vec<ConfigError>> {
    match path {
        Some(path) => toolport_config::load_and_validate_path(path),
        None => toolport_config::load_and_validate(),
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(errors) => {
            toolport_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Commands::Image => serve::run_image(&config).await,
        Commands::Weather => serve::run_weather(&config).await,
        Commands::CheckConfig => {
            serve::print_summary(&config);
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("toolport: {e}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    #[cfg(not(target_env = "msvc"))]
    fn jemalloc_is_active() {
        use tikv_jemalloc_ctl::{epoch, stats};
        epoch::advance().unwrap();
        let allocated = stats::allocated::read().unwrap();
        assert!(allocated > 0, "jemalloc should report non-zero allocation");
    }

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn config_flag_works_after_subcommand() {
        let cli = Cli::parse_from(["toolport", "weather", "--config", "/tmp/t.toml"]);
        assert_eq!(cli.command, Commands::Weather);
        assert_eq!(cli.config.as_deref(), Some(Path::new("/tmp/t.toml")));
    }

    #[test]
    fn subcommand_is_required() {
        assert!(Cli::try_parse_from(["toolport"]).is_err());
        let cli = Cli::parse_from(["toolport", "check-config"]);
        assert_eq!(cli.command, Commands::CheckConfig);
    }
}
