//! biquiz CLI: the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "biquiz", version, about = "Self-check quizzes in the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Take a quiz interactively
    Take {
        /// Path to a .toml question bank (default: built-in Business Intelligence quiz)
        #[arg(long)]
        bank: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Play a scripted answer sequence and print the outcome
    Replay {
        /// Comma-separated answers: 1-based option numbers or literal option text
        #[arg(long)]
        answers: String,

        /// Path to a .toml question bank (default: built-in Business Intelligence quiz)
        #[arg(long)]
        bank: Option<PathBuf>,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Validate question bank TOML files
    Validate {
        /// Path to question bank file or directory
        #[arg(long)]
        bank: PathBuf,
    },

    /// Create starter config and the Business Intelligence question bank
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("biquiz_core=warn")),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Take { bank, config } => commands::take::execute(bank, config),
        Commands::Replay {
            answers,
            bank,
            format,
            config,
        } => commands::replay::execute(answers, bank, format, config),
        Commands::Validate { bank } => commands::validate::execute(bank),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
