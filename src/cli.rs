//! Command-line interface for thalis-scaffold.
//!
//! This module handles CLI argument parsing and the replay / print-config
//! subcommands.

use crate::content_source::{ContentSource, FsContentSource, StaticContentSource};
use crate::replay;
use crate::workspace::Workspace;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use thalis_scaffold_config::{LogLevel, ScaffoldConfig};

/// thalis-scaffold - headless tab workspace engine of the openThalis shell
#[derive(Parser)]
#[command(name = "thalis-scaffold")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: ~/.config/thalis-scaffold/config.yaml)
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Log level: off, error, warn, info, debug, trace
    #[arg(long, value_name = "LEVEL", global = true)]
    pub log_level: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Drive a workspace with a JSON script and print its final state
    Replay {
        /// Script file (JSON array of steps)
        script: PathBuf,

        /// Serve landing-page markup from files under this directory
        #[arg(long, value_name = "DIR")]
        content_root: Option<PathBuf>,
    },
    /// Print the effective configuration as YAML
    PrintConfig,
}

impl Cli {
    /// Log level from `--log-level`, falling back to the config's
    pub fn effective_log_level(&self, config: &ScaffoldConfig) -> LogLevel {
        match self.log_level.as_deref() {
            Some(raw) => LogLevel::parse(raw).unwrap_or_else(|| {
                eprintln!("thalis-scaffold: unknown log level '{raw}', using config value");
                config.log_level
            }),
            None => config.log_level,
        }
    }

    pub fn load_config(&self) -> Result<ScaffoldConfig> {
        match &self.config {
            Some(path) => ScaffoldConfig::load_from(path),
            None => ScaffoldConfig::load(),
        }
    }
}

/// Run a parsed command to completion
pub async fn run(cli: Cli, config: ScaffoldConfig) -> Result<()> {
    match cli.command {
        Commands::Replay {
            script,
            content_root,
        } => {
            let steps = replay::load_script(&script)?;
            let source: Arc<dyn ContentSource> = match content_root {
                Some(root) => Arc::new(FsContentSource::new(root)),
                None => Arc::new(StaticContentSource::new()),
            };

            let mut workspace = Workspace::new(config, source);
            workspace.initialize().await;
            replay::run(&mut workspace, &steps).await;

            let snapshot = serde_json::to_string_pretty(&workspace.snapshot())
                .context("Failed to serialize workspace state")?;
            println!("{snapshot}");
        }
        Commands::PrintConfig => {
            let yaml = serde_yaml_ng::to_string(&config).context("Failed to serialize config")?;
            print!("{yaml}");
        }
    }
    Ok(())
}
