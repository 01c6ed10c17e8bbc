//! lmt CLI - Literate Markdown Tangle

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use lmt::commands;
use lmt::interface::Context;

#[derive(Parser)]
#[command(name = "lmt")]
#[command(author, version, about = "Literate Markdown tangle", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Working directory
    #[arg(short = 'C', long, global = true)]
    directory: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Omit location markers from the output
    #[arg(short, long, global = true)]
    publishable: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write every output file declared in the documents
    Tangle {
        /// Write only this output file
        #[arg(short, long, value_name = "FILE")]
        output: Option<String>,

        /// Dry run - show what would be done without doing it
        #[arg(short = 'n', long)]
        dry_run: bool,

        /// Documents to read, in order
        #[arg(value_name = "DOC")]
        files: Vec<PathBuf>,
    },

    /// Print a block or file with all references expanded
    Extract {
        /// Block name or output file path
        name: String,

        /// Documents to read, in order
        #[arg(value_name = "DOC")]
        files: Vec<PathBuf>,
    },

    /// Print a block or file as written, references left in place
    Concat {
        /// Block name or output file path
        name: String,

        /// Documents to read, in order
        #[arg(value_name = "DOC")]
        files: Vec<PathBuf>,
    },

    /// List named blocks, or output files with --files
    List {
        /// List output files instead of named blocks
        #[arg(long)]
        files: bool,

        /// Print a JSON array
        #[arg(long)]
        json: bool,

        /// Documents to read, in order
        #[arg(value_name = "DOC")]
        documents: Vec<PathBuf>,
    },

    /// Tangle, then tangle again whenever a document changes
    Watch {
        /// Debounce delay in milliseconds
        #[arg(short, long)]
        debounce: Option<u64>,

        /// Documents to watch, in order
        #[arg(value_name = "DOC")]
        files: Vec<PathBuf>,
    },

    /// Print the effective configuration
    Config,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Set up logging
    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    // Determine working directory
    let base_dir = cli
        .directory
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."));

    let config = match cli.config {
        Some(ref path) => lmt::config::read_config_file(path),
        None => lmt::config::read_config(&base_dir),
    };
    let config = match config {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error reading configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let ctx = Context::new(config, base_dir).with_publishable(cli.publishable);
    let mut stdout = io::stdout();

    // Execute command
    let result = match cli.command {
        Commands::Tangle {
            output,
            dry_run,
            files,
        } => {
            let options = commands::TangleOptions {
                files,
                output,
                dry_run,
            };
            commands::tangle(&ctx, &options)
        }

        Commands::Extract { name, files } => {
            let options = commands::ExtractOptions { name, files };
            commands::extract(&ctx, &options, &mut stdout)
        }

        Commands::Concat { name, files } => {
            let options = commands::ExtractOptions { name, files };
            commands::concat(&ctx, &options, &mut stdout)
        }

        Commands::List {
            files,
            json,
            documents,
        } => {
            let options = commands::ListOptions {
                files: documents,
                output_files: files,
                json,
            };
            commands::list(&ctx, &options, &mut stdout)
        }

        Commands::Watch { debounce, files } => {
            let options = commands::WatchOptions {
                files,
                debounce_ms: debounce,
            };
            commands::watch(&ctx, &options)
        }

        Commands::Config => commands::show_config(&ctx, &mut stdout),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
