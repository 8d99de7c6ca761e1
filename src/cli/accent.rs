//! Accent preference CLI commands.

use crate::cli::common::{print_json, CliError, CliResult};
use crate::config::Config;
use crate::constants::ACCENT_STORAGE_KEY;
use crate::models::{AccentColor, AccentPalette};
use crate::storage::{FileStorage, PreferenceStorage};
use crate::theme::AccentStore;
use clap::{Args, Subcommand};
use crossterm::style::Stylize;
use serde::Serialize;

/// Accent preference commands
#[derive(Args, Debug)]
pub struct AccentArgs {
    #[command(subcommand)]
    command: AccentCommand,
}

#[derive(Subcommand, Debug)]
enum AccentCommand {
    /// Display the active accent
    Show(AccentShowArgs),
    /// Change the active accent
    Set(AccentSetArgs),
    /// Switch back to the configured default accent
    Reset,
    /// List all accents
    List(AccentListArgs),
}

/// Display the active accent
#[derive(Args, Debug)]
pub struct AccentShowArgs {
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// Change the active accent
#[derive(Args, Debug)]
pub struct AccentSetArgs {
    /// Accent name (indigo, emerald, rose, cyan, orange)
    #[arg(value_name = "ACCENT")]
    accent: String,
}

/// List all accents
#[derive(Args, Debug)]
pub struct AccentListArgs {
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Serialize, Debug)]
struct AccentShowOutput {
    accent: AccentColor,
    default: AccentColor,
    /// Whether a valid accent is stored (false means the default is in use)
    stored: bool,
    palette: AccentPalette,
}

#[derive(Serialize, Debug)]
struct AccentListEntry {
    name: AccentColor,
    label: &'static str,
    swatch: String,
    active: bool,
}

impl AccentArgs {
    /// Execute accent subcommand
    pub fn execute(&self) -> CliResult<()> {
        match &self.command {
            AccentCommand::Show(args) => args.execute(),
            AccentCommand::Set(args) => args.execute(),
            AccentCommand::Reset => execute_reset(),
            AccentCommand::List(args) => args.execute(),
        }
    }
}

/// Loads configuration and hydrates the store from the preferences file.
fn open_store() -> CliResult<AccentStore<FileStorage>> {
    let config = Config::load()
        .map_err(|e| CliError::validation(format!("Failed to load configuration: {e}")))?;
    let storage = config
        .preference_storage()
        .map_err(|e| CliError::io(format!("Failed to locate preferences: {e}")))?;

    Ok(AccentStore::initialize_with_default(
        storage,
        config.ui.default_accent,
    ))
}

/// Applies `accent` and confirms the write actually landed.
///
/// The store itself tolerates a failed write; the CLI reports it.
fn persist(store: &mut AccentStore<FileStorage>, accent: AccentColor) -> CliResult<()> {
    store.set_accent(accent);

    let stored = store.storage().read(ACCENT_STORAGE_KEY).map_err(|e| {
        CliError::io(format!(
            "Failed to read back preferences file {}: {e}",
            store.storage().path().display()
        ))
    })?;

    if stored.as_deref() != Some(accent.name()) {
        return Err(CliError::io(format!(
            "Failed to save accent to {}",
            store.storage().path().display()
        )));
    }

    println!("Accent set to {accent}.");
    Ok(())
}

impl AccentShowArgs {
    /// Execute show command
    pub fn execute(&self) -> CliResult<()> {
        let store = open_store()?;
        let stored = store
            .storage()
            .read(ACCENT_STORAGE_KEY)
            .ok()
            .flatten()
            .and_then(|raw| AccentColor::from_stored(&raw))
            .is_some();

        if self.json {
            print_json(&AccentShowOutput {
                accent: store.current(),
                default: store.default_accent(),
                stored,
                palette: store.palette(),
            })
        } else {
            let accent = store.current();
            let swatch = AccentPalette::for_accent(accent).swatch_color;
            println!(
                "Accent: {} {}",
                "●".with(swatch.to_crossterm_color()),
                accent
            );
            if !stored {
                println!("(default, nothing stored)");
            }
            Ok(())
        }
    }
}

impl AccentSetArgs {
    /// Execute set command
    pub fn execute(&self) -> CliResult<()> {
        let accent: AccentColor = self
            .accent
            .parse()
            .map_err(|e: anyhow::Error| CliError::validation(e.to_string()))?;

        let mut store = open_store()?;
        persist(&mut store, accent)
    }
}

fn execute_reset() -> CliResult<()> {
    let mut store = open_store()?;
    let default = store.default_accent();
    persist(&mut store, default)
}

impl AccentListArgs {
    /// Execute list command
    pub fn execute(&self) -> CliResult<()> {
        let store = open_store()?;
        let active = store.current();

        let entries: Vec<AccentListEntry> = AccentColor::all()
            .iter()
            .map(|&accent| AccentListEntry {
                name: accent,
                label: accent.display_name(),
                swatch: AccentPalette::for_accent(accent).swatch_color.to_hex(),
                active: accent == active,
            })
            .collect();

        if self.json {
            return print_json(&entries);
        }

        for entry in &entries {
            let color = AccentPalette::for_accent(entry.name).swatch_color;
            let marker = if entry.active { "*" } else { " " };
            println!(
                "{marker} {} {:<8} {}",
                "●".with(color.to_crossterm_color()),
                entry.name,
                entry.swatch
            );
        }
        Ok(())
    }
}
