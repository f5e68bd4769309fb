//! CLI front-end: flag parsing and command execution. No traversal logic
//! lives here; everything dispatches into the library.

use crate::codegen;
use crate::config::StampConfig;
use crate::error::StampError;
use crate::hash;
use crate::hasher::Algorithm;
use crate::options::{IgnoreFn, Options};
use crate::store::DirStore;
use clap::Parser;
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Name of the generated map source file, always excluded from hashing.
pub const MAP_FILE_NAME: &str = "asset_map.rs";

/// Stampfs CLI - content-hash cache busting for static asset trees
#[derive(Parser)]
#[command(name = "stampfs")]
#[command(about = "Hash asset files, embed the digest in their names, and generate a lookup map")]
pub struct Cli {
    /// Directory whose files are hashed
    pub dir: PathBuf,

    /// Hashing algorithm (md5, sha256, sha512)
    #[arg(long = "hash")]
    pub hash: Option<String>,

    /// Exclude paths matching the glob (repeatable)
    #[arg(long)]
    pub ignore: Vec<String>,

    /// Hash only files matching one of these globs (repeatable);
    /// combined with --ignore, a file must be included and not ignored
    #[arg(long)]
    pub include: Vec<String>,

    /// Output directory (default: DIR, hashing in place)
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Delete the original files after hashing
    #[arg(long)]
    pub replace: bool,

    /// Name of the constant in the generated map source
    #[arg(long)]
    pub var: Option<String>,

    /// Configuration file path (default: DIR/stampfs.toml)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long)]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,
}

/// Execute one hashing run: materialize hashed copies, optionally delete the
/// originals, and emit the generated map source into the output directory.
pub fn run(cli: &Cli, config: &StampConfig) -> Result<String, StampError> {
    // Configuration misuse is rejected before any traversal starts.
    let algorithm: Algorithm = match cli.hash.as_deref().or(config.algorithm.as_deref()) {
        Some(name) => name.parse()?,
        None => Algorithm::default(),
    };

    let opts = Options {
        algorithm,
        ignore: build_ignore(&cli.dir, &cli.ignore, &config.ignore, &cli.include)?,
        ..Options::default()
    };

    let out_root = cli.out.clone().unwrap_or_else(|| cli.dir.clone());
    info!(dir = %cli.dir.display(), out = %out_root.display(), %algorithm, "hashing assets");

    let store = DirStore::new(&cli.dir);
    let map = hash::hash_to_dir(&store, &out_root, &opts)?;

    if cli.replace {
        for original in map.keys() {
            fs::remove_file(out_root.join(original))?;
        }
        info!(count = map.len(), "removed original files");
    }

    let var_name = cli.var.as_deref().unwrap_or(&config.var_name);
    codegen::write_map_source(&map, &out_root.join(MAP_FILE_NAME), var_name)?;

    Ok(format!(
        "hashed {} files into {}",
        map.len(),
        out_root.display()
    ))
}

/// Build the exclusion predicate from CLI and config globs.
///
/// The generated map file is always excluded. Include filtering applies to
/// files only: a directory never matches `--include` patterns, so subtrees
/// stay traversable and nested matches remain reachable.
fn build_ignore(
    input_root: &Path,
    ignore: &[String],
    config_ignore: &[String],
    include: &[String],
) -> Result<IgnoreFn, StampError> {
    let ignore_set = build_globset(ignore.iter().chain(config_ignore.iter()))?;
    let include_set = if include.is_empty() {
        None
    } else {
        Some(build_globset(include.iter())?)
    };
    let input_root = input_root.to_path_buf();

    Ok(Box::new(move |path: &str| {
        if path == MAP_FILE_NAME {
            return true;
        }
        if ignore_set.is_match(path) {
            return true;
        }
        let Some(include_set) = &include_set else {
            return false;
        };
        if input_root.join(path).is_dir() {
            return false;
        }
        !include_set.is_match(path)
    }))
}

fn build_globset<'a>(
    patterns: impl Iterator<Item = &'a String>,
) -> Result<GlobSet, StampError> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(
            Glob::new(pattern)
                .map_err(|e| StampError::Config(format!("invalid glob {pattern:?}: {e}")))?,
        );
    }
    builder
        .build()
        .map_err(|e| StampError::Config(e.to_string()))
}
