//! Folio - accent preference and reveal timing tool
//!
//! Inspects and changes the persisted accent preference of the portfolio and
//! simulates when sections reveal while scrolling.

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use folio::cli::{AccentArgs, CliResult, ConfigArgs, ExitCode, RevealArgs};
use folio::constants::{APP_BINARY_NAME, APP_NAME};

/// Folio - accent preference and reveal timing tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show or change the accent preference
    Accent(AccentArgs),
    /// Show or change configuration
    Config(ConfigArgs),
    /// Simulate section reveals for a sequence of scroll offsets
    Reveal(RevealArgs),
}

fn init_tracing(verbose: bool) {
    let filter = if verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run(command: Command) -> CliResult<()> {
    match command {
        Command::Accent(args) => args.execute(),
        Command::Config(args) => args.execute(),
        Command::Reveal(args) => args.execute(),
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let Some(command) = cli.command else {
        println!("{} v{}", APP_NAME, env!("CARGO_PKG_VERSION"));
        println!();
        println!("Examples:");
        println!("  {} accent show", APP_BINARY_NAME);
        println!("  {} accent set cyan", APP_BINARY_NAME);
        println!(
            "  {} reveal --section skills:1200:600 --scroll 700",
            APP_BINARY_NAME
        );
        println!();
        println!("For more options, run:");
        println!("  {} --help", APP_BINARY_NAME);
        std::process::exit(ExitCode::Success.code());
    };

    if let Err(e) = run(command) {
        eprintln!("Error: {e}");
        std::process::exit(e.exit_code().code());
    }
}
