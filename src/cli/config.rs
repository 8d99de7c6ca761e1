//! Configuration management CLI commands.

use crate::cli::common::{print_json, CliError, CliResult};
use crate::config::Config;
use crate::models::AccentColor;
use clap::{Args, Subcommand};
use serde::Serialize;
use std::path::PathBuf;

/// Configuration management commands
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Display current configuration
    Show(ConfigShowArgs),
    /// Set configuration values
    Set(ConfigSetArgs),
}

/// Display current configuration
#[derive(Args, Debug)]
pub struct ConfigShowArgs {
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// Set configuration values
#[derive(Args, Debug)]
pub struct ConfigSetArgs {
    /// Accent used when no preference is stored
    #[arg(long, value_name = "ACCENT")]
    default_accent: Option<String>,

    /// Preferences file location
    #[arg(long, value_name = "FILE")]
    preferences: Option<PathBuf>,
}

/// JSON-serializable configuration for output
#[derive(Serialize, Debug)]
struct ConfigOutput {
    config_file: String,
    paths: PathsOutput,
    ui: UiOutput,
}

#[derive(Serialize, Debug)]
struct PathsOutput {
    preferences: String,
}

#[derive(Serialize, Debug)]
struct UiOutput {
    default_accent: AccentColor,
}

impl ConfigArgs {
    /// Execute config subcommand
    pub fn execute(&self) -> CliResult<()> {
        match &self.command {
            ConfigCommand::Show(args) => args.execute(),
            ConfigCommand::Set(args) => args.execute(),
        }
    }
}

impl ConfigShowArgs {
    /// Execute show command
    pub fn execute(&self) -> CliResult<()> {
        let config = Config::load()
            .map_err(|e| CliError::validation(format!("Failed to load configuration: {e}")))?;

        let output = ConfigOutput {
            config_file: Config::config_file_path()
                .map_err(|e| CliError::io(format!("Failed to locate config file: {e}")))?
                .to_string_lossy()
                .to_string(),
            paths: PathsOutput {
                preferences: config
                    .preferences_path()
                    .map_err(|e| CliError::io(format!("Failed to locate preferences: {e}")))?
                    .to_string_lossy()
                    .to_string(),
            },
            ui: UiOutput {
                default_accent: config.ui.default_accent,
            },
        };

        if self.json {
            print_json(&output)
        } else {
            println!("Config file:     {}", output.config_file);
            println!("Preferences:     {}", output.paths.preferences);
            println!("Default accent:  {}", output.ui.default_accent);
            Ok(())
        }
    }
}

impl ConfigSetArgs {
    /// Execute set command
    pub fn execute(&self) -> CliResult<()> {
        if self.default_accent.is_none() && self.preferences.is_none() {
            return Err(CliError::validation(
                "At least one configuration option must be specified: --default-accent or --preferences",
            ));
        }

        let mut config = Config::load()
            .map_err(|e| CliError::validation(format!("Failed to load configuration: {e}")))?;

        if let Some(name) = &self.default_accent {
            config.ui.default_accent = name
                .parse()
                .map_err(|e: anyhow::Error| CliError::validation(e.to_string()))?;
        }

        if let Some(path) = &self.preferences {
            config.paths.preferences = Some(path.clone());
        }

        config.validate().map_err(|e| CliError::validation(e.to_string()))?;
        config
            .save()
            .map_err(|e| CliError::io(format!("Failed to save configuration: {e}")))?;

        println!("Configuration updated successfully.");
        Ok(())
    }
}
