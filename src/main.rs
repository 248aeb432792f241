// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 snapname contributors

//! snapname CLI: rename or symlink batches of image files using optional
//! AI descriptions, resolution tags, timestamps and prefix/suffix text.

use clap::Parser;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use snapname::config::{RenameConfig, TimestampPosition};
use snapname::describe::{DescriptionProvider, OpenAiClient};
use snapname::filter;
use snapname::fsops::{self, FailReason, RenameOutcome};
use snapname::media;
use snapname::naming::FileTask;
use snapname::{Result, SnapnameError};

/// Rename files or create symbolic links with optional timestamp insertion,
/// resolution tags and AI-generated descriptions.
#[derive(Parser, Debug)]
#[command(name = "snapname")]
#[command(version)]
#[command(about = "Batch image renamer with AI descriptions, resolution tags and timestamps", long_about = None)]
struct Cli {
    /// Output directory for processed files (created if missing)
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// OpenAI API key; falls back to the OPENAI_API_KEY environment variable
    #[arg(short = 'k', long)]
    api_key: Option<String>,

    /// Include the image resolution in the filename (width-height)
    #[arg(short, long)]
    resolution: bool,

    /// Create symbolic links to the originals instead of renaming them
    #[arg(short, long)]
    link: bool,

    /// Where to place the creation-date timestamp (YYYY-MM-DD)
    #[arg(short, long, value_enum)]
    timestamp: Option<TimestampPosition>,

    /// Generate a descriptive base name with a vision model
    #[arg(short, long)]
    description: bool,

    /// Use a content hash as the base name
    #[arg(long, conflicts_with = "description")]
    hash: bool,

    /// Process all files, not just allowed image extensions
    #[arg(short, long)]
    all: bool,

    /// Custom prefix, joined to the name with an underscore
    #[arg(short, long)]
    prefix: Option<String>,

    /// Custom suffix, joined with an underscore before the extension
    #[arg(short, long)]
    suffix: Option<String>,

    /// Timeout for description requests, in seconds
    #[arg(long, default_value = "120")]
    timeout_secs: u64,

    /// Enable verbose logging (debug level)
    #[arg(short, long)]
    verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long)]
    quiet: bool,

    /// Files to process; wildcards are expanded by the shell
    #[arg(required = true)]
    files: Vec<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "warn"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter_level)
        .with_target(false)
        .init();

    let api_key = cli
        .api_key
        .clone()
        .or_else(|| std::env::var("OPENAI_API_KEY").ok());

    if cli.description && api_key.is_none() {
        return Err(SnapnameError::Config(
            "no API key found; pass --api-key or set OPENAI_API_KEY".to_string(),
        ));
    }

    // Resolved once per run, identical for link and rename modes
    let output_dir = match &cli.out {
        Some(dir) => {
            std::fs::create_dir_all(dir)?;
            Some(std::fs::canonicalize(dir)?)
        }
        None => None,
    };

    let cfg = RenameConfig {
        output_dir,
        include_resolution: cli.resolution,
        link: cli.link,
        timestamp: cli.timestamp,
        describe: cli.description,
        hash: cli.hash,
        process_all: cli.all,
        prefix: cli.prefix.clone(),
        suffix: cli.suffix.clone(),
        timeout_secs: cli.timeout_secs,
    };

    let (files, skipped) = filter::pre_process(&cli.files, cfg.process_all);
    for outcome in &skipped {
        println!("{}", outcome);
    }

    if files.is_empty() {
        return Err(SnapnameError::Config("no files to process".to_string()));
    }

    println!("*** pre ***: processing {} files...", files.len());

    let provider: Option<OpenAiClient> = match (cfg.describe, api_key) {
        (true, Some(key)) => Some(OpenAiClient::new(&key, cfg.timeout_secs)),
        _ => None,
    };

    let mut succeeded = 0usize;
    for file in &files {
        let outcome = process_file(
            file,
            &cfg,
            provider.as_ref().map(|p| p as &dyn DescriptionProvider),
        )
        .await;
        println!("{}", outcome);
        if outcome.is_success() {
            succeeded += 1;
        }
    }

    info!("{}/{} files processed", succeeded, files.len());
    Ok(())
}

/// Process a single accepted file: build the name, then rename or link.
///
/// All failures are contained here and come back as an outcome; enhancement
/// failures only downgrade the name for this one file.
async fn process_file(
    path: &Path,
    cfg: &RenameConfig,
    provider: Option<&dyn DescriptionProvider>,
) -> RenameOutcome {
    let mut task = match FileTask::new(path) {
        Ok(t) => t,
        Err(e) => {
            return RenameOutcome::Failed {
                path: path.to_path_buf(),
                reason: FailReason::Io(e.to_string()),
            }
        }
    };

    if task.created.from_mtime {
        warn!(
            "{:?}: no creation time available, timestamp reflects last modification",
            path
        );
    }

    let is_image = filter::allowed_file(path);

    if cfg.describe && is_image {
        if let Some(provider) = provider {
            match media::image_base64(&task.source) {
                Ok(b64) => task.suggestion = provider.describe(&b64).await,
                Err(e) => warn!("could not encode {:?}: {}", path, e),
            }
        }
    } else if cfg.hash && is_image {
        match media::content_hash(&task.source) {
            Ok(digest) => task.suggestion = Some(digest),
            Err(e) => warn!("could not hash {:?}: {}", path, e),
        }
    }

    if cfg.include_resolution && is_image {
        match media::image_resolution(&task.source) {
            Ok(dimensions) => task.resolution = Some(dimensions),
            Err(e) => warn!("could not read resolution of {:?}: {}", path, e),
        }
    }

    let new_name = task.new_name(cfg);
    let dest = fsops::destination(&task.source, &new_name, cfg.output_dir.as_deref());
    fsops::apply(&task.source, &dest, cfg.link)
}
