//! Content-addressed image storage on the filesystem.
//!
//! Uploaded bytes are named by the hex SHA-256 of their *content* plus a
//! fixed `.jpg` extension, so identical uploads land on the same file and
//! overwrites are harmless. The read path never fails on a missing blob; it
//! degrades to a generated default placeholder instead.

use std::io::Cursor;
use std::path::{Path, PathBuf};

use image::codecs::jpeg::JpegEncoder;
use image::{Rgb, RgbImage};
use sha2::{Digest, Sha256};

use catalogd_core::{Error, Result};

/// Fixed extension every stored blob (and every servable name) carries.
pub const IMAGE_EXT: &str = ".jpg";

/// Name of the placeholder served for well-formed but missing blobs.
pub const DEFAULT_IMAGE: &str = "default.jpg";

/// Quality used when re-encoding decodable uploads.
const JPEG_QUALITY: u8 = 85;

/// Filesystem store for content-addressed image blobs.
pub struct ImageStore {
    dir: PathBuf,
}

impl ImageStore {
    /// Create a store rooted at `dir`. Call [`ImageStore::init`] before use.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Create the image directory and the default placeholder if absent.
    pub fn init(&self) -> Result<()> {
        std::fs::create_dir_all(&self.dir)?;
        let default_path = self.dir.join(DEFAULT_IMAGE);
        if !default_path.exists() {
            std::fs::write(&default_path, generate_placeholder()?)?;
            tracing::info!("Generated default image at {}", default_path.display());
        }
        Ok(())
    }

    /// Store image bytes and return the derived filename.
    ///
    /// The name is the hex SHA-256 of the uploaded bytes plus [`IMAGE_EXT`].
    /// Decodable uploads are re-encoded through a fixed-quality JPEG encoder
    /// before writing; anything else is written verbatim.
    pub fn put(&self, data: &[u8]) -> Result<String> {
        let filename = format!("{}{IMAGE_EXT}", hex::encode(Sha256::digest(data)));

        let bytes = match reencode_jpeg(data) {
            Some(encoded) => encoded,
            None => data.to_vec(),
        };

        let path = self.dir.join(&filename);
        std::fs::write(&path, bytes)
            .map_err(|e| Error::Internal(format!("Could not save image {filename}: {e}")))?;

        Ok(filename)
    }

    /// Read back the bytes for `filename`.
    ///
    /// Names that do not end in [`IMAGE_EXT`], or that try to escape the
    /// store directory, are rejected with a validation error. A well-formed
    /// name whose file is absent falls back to the default placeholder.
    pub fn get(&self, filename: &str) -> Result<Vec<u8>> {
        validate_name(filename)?;

        let path = self.dir.join(filename);
        match std::fs::read(&path) {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("Image not found, serving default: {}", path.display());
                let default = std::fs::read(self.dir.join(DEFAULT_IMAGE))?;
                Ok(default)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Root directory of the store.
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

/// Reject names without the fixed extension or with path components.
fn validate_name(name: &str) -> Result<()> {
    if !name.ends_with(IMAGE_EXT) {
        return Err(Error::Validation(format!(
            "image name must end with {IMAGE_EXT}"
        )));
    }
    if name.contains('/') || name.contains('\\') || name.contains("..") {
        return Err(Error::Validation("image name must be a bare filename".into()));
    }
    Ok(())
}

/// Re-encode decodable image bytes as fixed-quality JPEG.
///
/// Returns `None` when the input is not a decodable image; the caller then
/// stores the raw bytes unchanged.
fn reencode_jpeg(data: &[u8]) -> Option<Vec<u8>> {
    let img = image::load_from_memory(data).ok()?;
    let mut buf = Cursor::new(Vec::new());
    let encoder = JpegEncoder::new_with_quality(&mut buf, JPEG_QUALITY);
    img.write_with_encoder(encoder).ok()?;
    Some(buf.into_inner())
}

/// Generate the solid-grey placeholder JPEG.
fn generate_placeholder() -> Result<Vec<u8>> {
    let img = RgbImage::from_pixel(64, 64, Rgb([210, 210, 210]));
    let mut buf = Cursor::new(Vec::new());
    let encoder = JpegEncoder::new_with_quality(&mut buf, JPEG_QUALITY);
    image::DynamicImage::ImageRgb8(img)
        .write_with_encoder(encoder)
        .map_err(|e| Error::Internal(format!("Failed to encode default image: {e}")))?;
    Ok(buf.into_inner())
}
