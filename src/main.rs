//! `loglabels` command line tool.
//!
//! Builds a logger registry (from a TOML file or defaults) and emits or
//! inspects labelled output.
//!
//! ```text
//! loglabels --config labels.toml emit db.pool warn "pool exhausted"
//! loglabels show db
//! loglabels list
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use loglabels::observability::logging;
use loglabels::{ConsoleFunctions, LabelsConfig, Registry, Severity};

#[derive(Parser)]
#[command(name = "loglabels")]
#[command(about = "Emit and inspect labelled log output", long_about = None)]
struct Cli {
    /// TOML file declaring the root and named loggers
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Where labelled output is written
    #[arg(short, long, value_enum, default_value_t = Sink::Console)]
    sink: Sink,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum Sink {
    /// stdout / stderr
    Console,
    /// tracing events
    Tracing,
}

#[derive(Subcommand)]
enum Commands {
    /// Emit a message through a logger
    Emit {
        /// `root` or a dot-separated chain of names (`db.pool`); a leading
        /// `root.` is skipped, so `root.db.pool` is the same logger
        logger: String,
        severity: Severity,
        #[arg(required = true)]
        message: Vec<String>,
    },
    /// Print the dispatch table of a logger
    Show {
        /// Logger path, as for `emit`
        #[arg(default_value = "root")]
        logger: String,
        /// Print the effective configuration as JSON instead
        #[arg(long)]
        json: bool,
    },
    /// List named loggers
    List,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init(logging::DEFAULT_DIRECTIVE)?;

    let cli = Cli::parse();

    let outputs = match cli.sink {
        Sink::Console => ConsoleFunctions::console(),
        Sink::Tracing => ConsoleFunctions::tracing(),
    };
    let config = match &cli.config {
        Some(path) => loglabels::config::load_config(path)?,
        None => LabelsConfig::default(),
    };
    let registry = Registry::from_config(&config, outputs)?;

    tracing::debug!(loggers = registry.len(), "Registry ready");

    match cli.command {
        Commands::Emit {
            logger,
            severity,
            message,
        } => {
            let logger = registry.resolve_path(&logger)?;
            let args: Vec<&dyn std::fmt::Display> =
                message.iter().map(|part| part as &dyn std::fmt::Display).collect();
            logger.emit(severity, &args);
        }
        Commands::Show { logger, json } => {
            let logger = registry.resolve_path(&logger)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&logger.config())?);
            } else {
                print!("{}", logger.dispatch_table());
            }
        }
        Commands::List => {
            for name in registry.names() {
                println!("{name}");
            }
        }
    }

    Ok(())
}
