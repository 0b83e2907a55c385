use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use webloom::config::ConfigLoader;

#[derive(Parser)]
#[command(name = "webloom")]
#[command(
    version,
    about = "AI-driven research reports from curated web sources"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[arg(long, short, help = "Path to a configuration file")]
    config: Option<PathBuf>,

    #[arg(long)]
    verbose: bool,

    #[arg(long, short)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a full research pipeline for a topic
    Search {
        #[arg(help = "Research topic")]
        topic: String,
    },

    /// Rerun the agent pipeline over previously collected data
    Resummarize {
        #[arg(help = "Topic of the existing raw-data file")]
        topic: String,
    },

    /// Verify credential and provider connectivity
    Check,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show current configuration (merged from all sources)
    Show {
        #[arg(
            short = 'f',
            long,
            default_value = "text",
            help = "Output format: text, json"
        )]
        format: String,
    },
    /// Show configuration file paths
    Path,
}

/// Set up panic handler for graceful error reporting
fn setup_panic_handler() {
    let default_hook = std::panic::take_hook();

    std::panic::set_hook(Box::new(move |panic_info| {
        let message = if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic".to_string()
        };

        eprintln!("\n\x1b[1;31m━━━ PANIC ━━━\x1b[0m");
        eprintln!("\x1b[31mWebloom encountered an unexpected error:\x1b[0m");
        eprintln!("  {}", message);

        if let Some(location) = panic_info.location() {
            eprintln!(
                "\x1b[90mLocation: {}:{}:{}\x1b[0m",
                location.file(),
                location.line(),
                location.column()
            );
        }

        // Call default hook for backtrace (if RUST_BACKTRACE=1)
        default_hook(panic_info);
    }));
}

fn main() -> ExitCode {
    setup_panic_handler();

    match run_cli() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("\x1b[31mError:\x1b[0m {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match &cli.config {
        Some(path) => ConfigLoader::load_from_file(path)?,
        None => ConfigLoader::load()?,
    };

    match cli.command {
        Some(Commands::Search { topic }) => {
            webloom::cli::commands::search::run(&topic, config)?;
        }
        Some(Commands::Resummarize { topic }) => {
            webloom::cli::commands::resummarize::run(&topic, config)?;
        }
        Some(Commands::Check) => {
            webloom::cli::commands::check::run(config)?;
        }
        Some(Commands::Config { action }) => match action {
            ConfigAction::Show { format } => {
                webloom::cli::commands::config::show(&format)?;
            }
            ConfigAction::Path => {
                webloom::cli::commands::config::path()?;
            }
        },
        None => {
            webloom::cli::commands::menu::run(config)?;
        }
    }

    Ok(())
}
