//! CLI command definitions and dispatch.

pub mod config;
pub mod demo;

use clap::{Parser, Subcommand};

use oshapp_core::config::AppConfig;
use oshapp_core::error::AppError;

use crate::output::OutputFormat;

/// OSH App: occupational-health appointments and notifications
#[derive(Debug, Parser)]
#[command(name = "oshapp", version, about, long_about = None)]
pub struct Cli {
    /// Configuration environment; loads `config/default` then `config/{env}`
    #[arg(short, long, default_value = "development")]
    pub env: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the end-to-end workflow against in-memory stores
    Demo(demo::DemoArgs),
    /// Configuration management
    Config(config::ConfigArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self, config: AppConfig) -> Result<(), AppError> {
        match &self.command {
            Commands::Demo(args) => demo::execute(args, config, self.format).await,
            Commands::Config(args) => config::execute(args, &config, &self.env, self.format),
        }
    }
}
