// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 snapname contributors

//! Error types for snapname

use thiserror::Error;

/// Result type alias for snapname operations
pub type Result<T> = std::result::Result<T, SnapnameError>;

/// snapname error types
#[derive(Error, Debug)]
pub enum SnapnameError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("File system error: {0}")]
    FileSystem(#[from] std::io::Error),

    #[error("API error: {0}")]
    Api(#[from] reqwest::Error),

    #[error("Description service error: {0}")]
    Service(String),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
