//! Thumbnail acquisition from image sources.
//!
//! The rendering pipeline only ever sees a decoded [`Raster`]; everything
//! about locating and decoding pixels lives behind [`ThumbnailProvider`].
//! Acquisition failures stay on this side of the seam so a batch of
//! renders can skip a bad source and keep going.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::raster::Raster;

/// Errors raised while acquiring a thumbnail.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("cannot read image '{path}': {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("unsupported source '{0}' (only local image files are supported)")]
    Unsupported(String),
}

/// Supplies decoded RGB thumbnails of an image source.
///
/// Implementations must return a raster no larger than requested in
/// either dimension; the renderer adapts to whatever size comes back.
pub trait ThumbnailProvider {
    fn thumbnail(&self, max_width: u32, max_height: u32) -> Result<Raster, ProviderError>;
}

/// Thumbnail provider backed by a local image file decoded with the
/// `image` crate.
#[derive(Debug, Clone)]
pub struct ImageFileProvider {
    path: PathBuf,
}

impl ImageFileProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ThumbnailProvider for ImageFileProvider {
    fn thumbnail(&self, max_width: u32, max_height: u32) -> Result<Raster, ProviderError> {
        let img = image::open(&self.path).map_err(|source| ProviderError::Image {
            path: self.path.clone(),
            source,
        })?;
        // Preserves aspect ratio and never exceeds either bound
        let thumb = img.thumbnail(max_width, max_height).to_rgb8();
        let (width, height) = thumb.dimensions();
        log::debug!(
            "decoded {} -> {}x{} thumbnail",
            self.path.display(),
            width,
            height
        );
        Ok(Raster::new(thumb.into_raw(), width, height))
    }
}

/// Build a provider for a source string.
///
/// Only local files are supported; URL sources are reported as
/// unsupported rather than silently ignored.
pub fn for_source(source: &str) -> Result<ImageFileProvider, ProviderError> {
    if source.starts_with("http://") || source.starts_with("https://") {
        return Err(ProviderError::Unsupported(source.to_string()));
    }
    Ok(ImageFileProvider::new(source))
}
