// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 snapname contributors

//! Input filtering
//!
//! Reduces the raw CLI path list to the ordered sequence of files eligible
//! for processing. Symbolic links are rejected as *input* (the tool only
//! produces them as output); duplicates are kept as given.

use std::path::{Path, PathBuf};
use tracing::debug;

use crate::fsops::{RenameOutcome, SkipReason};

/// Extensions processed by default (compared case-insensitively).
pub const ALLOWED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif"];

/// Check whether a path carries an allowed image extension.
pub fn allowed_file(path: &Path) -> bool {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => ALLOWED_EXTENSIONS.iter().any(|a| a.eq_ignore_ascii_case(ext)),
        None => false,
    }
}

/// Filter the input list, preserving order and duplicates.
///
/// Returns the clean list plus one [`RenameOutcome::Skipped`] per rejected
/// path. Checks short-circuit: the first failing check decides the reason.
pub fn pre_process(files: &[PathBuf], process_all: bool) -> (Vec<PathBuf>, Vec<RenameOutcome>) {
    let mut clean = Vec::new();
    let mut skipped = Vec::new();

    for path in files {
        // symlink_metadata so a link to a valid image is still rejected
        let meta = match std::fs::symlink_metadata(path) {
            Ok(m) => m,
            Err(_) => {
                debug!("not found: {:?}", path);
                skipped.push(RenameOutcome::Skipped {
                    path: path.clone(),
                    reason: SkipReason::NotFound,
                });
                continue;
            }
        };

        if meta.file_type().is_symlink() {
            debug!("skipping symlink: {:?}", path);
            skipped.push(RenameOutcome::Skipped {
                path: path.clone(),
                reason: SkipReason::IsSymlink,
            });
            continue;
        }

        if meta.is_dir() {
            debug!("skipping directory: {:?}", path);
            skipped.push(RenameOutcome::Skipped {
                path: path.clone(),
                reason: SkipReason::IsDirectory,
            });
            continue;
        }

        if !process_all && !allowed_file(path) {
            debug!("skipping unsupported extension: {:?}", path);
            skipped.push(RenameOutcome::Skipped {
                path: path.clone(),
                reason: SkipReason::UnsupportedType,
            });
            continue;
        }

        clean.push(path.clone());
    }

    (clean, skipped)
}
