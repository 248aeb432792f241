// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 snapname contributors

//! Filename construction
//!
//! A [`FileTask`] carries everything known about one input file; `new_name`
//! turns it into the final filename. The enhancement collaborators
//! (description, resolution, hash) are consulted by the per-file driver and
//! land here as plain optional fields, so construction is a pure function:
//! same task + same config = same name, no I/O.

use chrono::{DateTime, Local, NaiveDate};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::config::{RenameConfig, TimestampPosition};
use crate::Result;

/// A file's creation date, with the mtime fallback made observable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Creation {
    pub date: NaiveDate,
    /// True when the platform exposed no birth time and the last-modification
    /// time was used instead. The timestamp means something different then.
    pub from_mtime: bool,
}

/// Look up a file's creation date, falling back to mtime where the platform
/// or filesystem keeps no birth time.
pub fn creation_date(path: &Path) -> Result<Creation> {
    let meta = std::fs::metadata(path)?;
    let (time, from_mtime) = match meta.created() {
        Ok(t) => (t, false),
        Err(_) => (meta.modified()?, true),
    };
    if from_mtime {
        debug!("no creation time for {:?}, using modification time", path);
    }
    Ok(Creation {
        date: DateTime::<Local>::from(time).date_naive(),
        from_mtime,
    })
}

/// One file to be processed.
#[derive(Debug, Clone)]
pub struct FileTask {
    /// Absolute source path.
    pub source: PathBuf,
    /// Base name without extension, original case.
    pub stem: String,
    /// Extension including the leading dot, original case; empty if none.
    /// Comparisons lower-case it, the output keeps it as-is.
    pub ext: String,
    pub created: Creation,
    /// Decoded dimensions, set only when the resolution tag is enabled.
    pub resolution: Option<(u32, u32)>,
    /// Replacement base name (AI description or content hash).
    pub suggestion: Option<String>,
}

impl FileTask {
    /// Build a task for one accepted path. The path is made absolute so that
    /// symlink targets created later point at the real location.
    pub fn new(path: &Path) -> Result<Self> {
        let source = std::fs::canonicalize(path)?;
        let stem = source
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let ext = source
            .extension()
            .map(|e| format!(".{}", e.to_string_lossy()))
            .unwrap_or_default();
        let created = creation_date(&source)?;

        Ok(Self {
            source,
            stem,
            ext,
            created,
            resolution: None,
            suggestion: None,
        })
    }

    /// Compute the final filename. Component order is fixed:
    /// suggestion → resolution tag → timestamp → prefix/suffix → extension.
    pub fn new_name(&self, cfg: &RenameConfig) -> String {
        let mut name = self.stem.clone();

        if let Some(s) = &self.suggestion {
            // the suggested extension, if any, is discarded; ours wins
            let stem = s.rsplit_once('.').map(|(base, _)| base).unwrap_or(s);
            if !stem.is_empty() {
                name = stem.to_string();
            }
        }

        if let Some((w, h)) = self.resolution {
            name = format!("{}_{}-{}", name, w, h);
        }

        let date = self.created.date.format("%Y-%m-%d");
        name = match cfg.timestamp {
            Some(TimestampPosition::Before) => format!("{}_{}", date, name),
            Some(TimestampPosition::After) => format!("{}_{}", name, date),
            None => name,
        };

        if let Some(prefix) = cfg.prefix.as_deref().filter(|p| !p.is_empty()) {
            name = format!("{}_{}", prefix, name);
        }
        if let Some(suffix) = cfg.suffix.as_deref().filter(|s| !s.is_empty()) {
            name = format!("{}_{}", name, suffix);
        }

        format!("{}{}", name, self.ext)
    }
}

/// Sanitize a model response into a usable base name.
///
/// Keeps dots so a suggested extension can still be split off later. An empty
/// result means "no suggestion".
pub fn clean_suggestion(raw: &str) -> String {
    let mut clean = raw.trim().replace(['\n', '\r'], "");

    // Strip a leading chat-style "Filename:" prefix
    if let Some(idx) = clean.find(':') {
        if idx < 30 {
            clean = clean[idx + 1..].trim().to_string();
        }
    }

    clean = clean.trim_matches('"').trim_matches('\'').to_string();

    clean = clean
        .chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | ' ' | '.'))
        .collect::<String>();

    clean = clean.replace(' ', "_").to_lowercase();

    while clean.contains("__") {
        clean = clean.replace("__", "_");
    }

    clean.trim_matches(|c| c == '_' || c == '.').to_string()
}
