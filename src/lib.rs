// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 snapname contributors

//! snapname: batch image renamer
//!
//! Derives new filenames from optional components: an AI-generated
//! description, an image-resolution tag, a creation-date timestamp and custom
//! prefix/suffix text, then renames the files or symlinks to them.

pub mod config;
pub mod describe;
pub mod error;
pub mod filter;
pub mod fsops;
pub mod media;
pub mod naming;

pub use config::{RenameConfig, TimestampPosition};
pub use error::{Result, SnapnameError};
