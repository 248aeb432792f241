// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 snapname contributors

//! Run configuration for snapname
//!
//! The CLI is the only configuration source; `main` builds one
//! [`RenameConfig`] per run and passes it down explicitly, so the pipeline
//! never reads flags or environment variables on its own.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where the creation-date timestamp goes in the new filename.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TimestampPosition {
    /// `YYYY-MM-DD_name.ext`
    Before,
    /// `name_YYYY-MM-DD.ext`
    After,
}

/// Options governing one run, assembled from the CLI in `main`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RenameConfig {
    /// Destination directory; `None` keeps each file next to its source.
    pub output_dir: Option<PathBuf>,

    /// Append `_{width}-{height}` for image files.
    pub include_resolution: bool,

    /// Create symbolic links instead of renaming.
    pub link: bool,

    /// Timestamp placement, or `None` to omit it.
    pub timestamp: Option<TimestampPosition>,

    /// Ask the vision model for a descriptive base name.
    pub describe: bool,

    /// Use the content hash as the base name.
    pub hash: bool,

    /// Process every extension, not just the image allow-list.
    pub process_all: bool,

    /// Custom segment joined with `_` at the start of the base name.
    pub prefix: Option<String>,

    /// Custom segment joined with `_` at the end of the base name.
    pub suffix: Option<String>,

    /// Timeout for the description request, in seconds.
    pub timeout_secs: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamp_position_serializes_lowercase() {
        let json = serde_json::to_string(&TimestampPosition::Before).unwrap();
        assert_eq!(json, "\"before\"");
    }

    #[test]
    fn default_config_is_all_off() {
        let cfg = RenameConfig::default();
        assert!(!cfg.include_resolution);
        assert!(!cfg.link);
        assert!(cfg.timestamp.is_none());
        assert!(!cfg.describe);
        assert!(!cfg.process_all);
    }
}
