// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 snapname contributors

//! Image probing and encoding helpers

use base64::{engine::general_purpose, Engine as _};
use image::GenericImageView;
use std::path::Path;

use crate::Result;

/// Decode an image and return its pixel dimensions as (width, height).
pub fn image_resolution(path: &Path) -> Result<(u32, u32)> {
    let img = image::open(path)?;
    Ok(img.dimensions())
}

/// Base64-encode an image for upload, downscaled for faster transfer.
///
/// Images over 1024 px on the longest side are resized and re-encoded as
/// JPEG; if that fails for any reason the raw file bytes are sent instead.
pub fn image_base64(path: &Path) -> Result<String> {
    match prepare_image(path) {
        Ok(data) => Ok(general_purpose::STANDARD.encode(&data)),
        Err(_) => {
            let data = std::fs::read(path)?;
            Ok(general_purpose::STANDARD.encode(&data))
        }
    }
}

fn prepare_image(path: &Path) -> Result<Vec<u8>> {
    let img = image::open(path)?;

    let img = if img.width() > 1024 || img.height() > 1024 {
        img.resize(1024, 1024, image::imageops::FilterType::Triangle)
    } else {
        img
    };

    let mut buffer = Vec::new();
    let mut cursor = std::io::Cursor::new(&mut buffer);
    img.write_to(&mut cursor, image::ImageFormat::Jpeg)?;

    Ok(buffer)
}

/// BLAKE3 hex digest of the file content, used as a stable base name.
pub fn content_hash(path: &Path) -> Result<String> {
    let data = std::fs::read(path)?;
    Ok(blake3::hash(&data).to_hex().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbImage;
    use tempfile::tempdir;

    #[test]
    fn resolution_matches_decoded_dimensions() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tiny.png");
        RgbImage::new(6, 4).save(&path).unwrap();

        assert_eq!(image_resolution(&path).unwrap(), (6, 4));
    }

    #[test]
    fn resolution_fails_on_non_image() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("notes.png");
        std::fs::write(&path, b"not an image").unwrap();

        assert!(image_resolution(&path).is_err());
    }

    #[test]
    fn base64_falls_back_to_raw_bytes() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("blob.png");
        std::fs::write(&path, b"undecodable").unwrap();

        let b64 = image_base64(&path).unwrap();
        assert_eq!(
            b64,
            base64::engine::general_purpose::STANDARD.encode(b"undecodable")
        );
    }

    #[test]
    fn content_hash_is_stable_and_hex() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("a.png");
        std::fs::write(&path, b"pixels").unwrap();

        let h1 = content_hash(&path).unwrap();
        let h2 = content_hash(&path).unwrap();
        assert_eq!(h1, h2);
        assert_eq!(h1.len(), 64);
        assert!(h1.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
