//! Stampfs CLI Binary
//!
//! Hashes every file in a directory, clones the tree with hashed file names,
//! and emits a generated source file mapping original names to hashed names.

use clap::Parser;
use stampfs::cli::{self, Cli};
use stampfs::config::{ConfigLoader, StampConfig};
use stampfs::logging::{init_logging, LoggingConfig};
use std::process;
use tracing::error;

fn main() {
    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("stampfs: {e}");
            process::exit(1);
        }
    };

    let logging_config = build_logging_config(&cli, &config);
    if let Err(e) = init_logging(&logging_config) {
        eprintln!("stampfs: failed to initialize logging: {e}");
        process::exit(1);
    }

    match cli::run(&cli, &config) {
        Ok(output) => println!("{output}"),
        Err(e) => {
            error!("run failed: {e}");
            eprintln!("stampfs: {e}");
            process::exit(1);
        }
    }
}

fn load_config(cli: &Cli) -> Result<StampConfig, stampfs::error::StampError> {
    match &cli.config {
        Some(path) => ConfigLoader::load_from_file(path),
        None => ConfigLoader::load(&cli.dir),
    }
}

/// Precedence: CLI flags override config file values override defaults.
fn build_logging_config(cli: &Cli, config: &StampConfig) -> LoggingConfig {
    let mut logging = config.logging.clone();
    if cli.verbose {
        logging.level = "debug".to_string();
    }
    if let Some(level) = &cli.log_level {
        logging.level = level.clone();
    }
    if let Some(format) = &cli.log_format {
        logging.format = format.clone();
    }
    logging
}
