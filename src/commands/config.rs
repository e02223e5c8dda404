//! Configuration management CLI commands.

use clap::{Args, Subcommand};

use oshapp_core::config::AppConfig;
use oshapp_core::error::AppError;

use crate::output::{self, OutputFormat};

/// Arguments for config commands
#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Config subcommand
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration
    Show,
    /// Validate the effective configuration
    Validate,
}

/// Execute config commands
pub fn execute(
    args: &ConfigArgs,
    config: &AppConfig,
    env: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    match &args.command {
        ConfigCommand::Show => {
            output::print_item(config, format);
        }
        ConfigCommand::Validate => match config.validate() {
            Ok(()) => {
                output::print_success(&format!("Configuration for '{}' is valid", env));
                output::print_kv("Frontend", &config.notifications.frontend_base_url);
                output::print_kv(
                    "Email",
                    if config.email.enabled { "enabled" } else { "disabled" },
                );
                output::print_kv("Email timeout", &format!("{} ms", config.email.send_timeout_ms));
                output::print_kv("Dispatch mode", &format!("{:?}", config.dispatch.mode));
                output::print_kv(
                    "Dispatch concurrency",
                    &config.dispatch.concurrency.to_string(),
                );
            }
            Err(e) => {
                output::print_error(&format!("Configuration invalid: {}", e));
                return Err(e);
            }
        },
    }

    Ok(())
}
