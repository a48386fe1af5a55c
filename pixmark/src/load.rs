// Copyright 2025 the Pixmark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Asynchronous image loading with cancellation.
//!
//! Only the natural size of an image matters here; pixel data is left to the
//! host's renderer.

use std::future;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use image::ImageReader;
use pixmark_view::{ImageSize, ImageSource};

use crate::error::ImageLoadError;

/// A loaded image: its URL and natural size.
pub type LoadedImage = ImageSource;

/// Source of image metrics.
pub trait ImageLoader {
    /// Resolves `url` to the image's natural size.
    fn load(&self, url: &str) -> impl Future<Output = Result<LoadedImage, ImageLoadError>>;
}

/// Shared flag for abandoning a pending load.
///
/// Clones observe the same flag, so a host can cancel from another thread.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// Creates a token that is not cancelled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks the token cancelled.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    /// Returns `true` once [`cancel`](Self::cancel) was called on any clone.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Loads `url` through `loader`, honoring `cancel` before and after the wait.
pub async fn load_image<L: ImageLoader>(
    loader: &L,
    url: &str,
    cancel: &CancelToken,
) -> Result<LoadedImage, ImageLoadError> {
    if cancel.is_cancelled() {
        tracing::warn!(url, "image load cancelled before start");
        return Err(ImageLoadError::Cancelled);
    }
    let result = loader.load(url).await;
    if cancel.is_cancelled() {
        tracing::warn!(url, "image load cancelled");
        return Err(ImageLoadError::Cancelled);
    }
    match result {
        Ok(image) => {
            tracing::info!(
                url,
                width = image.size.width,
                height = image.size.height,
                "image loaded"
            );
            Ok(image)
        }
        Err(err) => {
            tracing::warn!(url, error = %err, "image load failed");
            Err(err)
        }
    }
}

/// Loads images from the local filesystem.
///
/// URLs are plain paths, resolved against an optional root directory. Only
/// the file header is read.
#[derive(Clone, Debug, Default)]
pub struct FsImageLoader {
    root: Option<PathBuf>,
}

impl FsImageLoader {
    /// Creates a loader resolving paths as given.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a loader resolving relative paths against `root`.
    #[must_use]
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
        }
    }

    /// Returns the path `url` resolves to.
    #[must_use]
    pub fn resolve(&self, url: &str) -> PathBuf {
        match &self.root {
            Some(root) => root.join(url),
            None => PathBuf::from(url),
        }
    }

    /// Reads the natural size of the image at `url`.
    pub fn read_size(&self, url: &str) -> Result<ImageSize, ImageLoadError> {
        let path = self.resolve(url);
        let (width, height) = read_dimensions(&path).map_err(|reason| ImageLoadError::Failed {
            url: url.to_owned(),
            reason,
        })?;
        if width == 0 || height == 0 {
            return Err(ImageLoadError::failed(url, "image has no pixels"));
        }
        Ok(ImageSize::new(width, height))
    }
}

fn read_dimensions(path: &Path) -> Result<(u32, u32), String> {
    let reader = ImageReader::open(path)
        .map_err(|e| e.to_string())?
        .with_guessed_format()
        .map_err(|e| e.to_string())?;
    reader.into_dimensions().map_err(|e| e.to_string())
}

impl ImageLoader for FsImageLoader {
    fn load(&self, url: &str) -> impl Future<Output = Result<LoadedImage, ImageLoadError>> {
        future::ready(self.read_size(url).map(|size| ImageSource::new(url, size)))
    }
}
