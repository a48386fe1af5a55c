// Copyright 2025 the Pixmark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::error::Error;
use std::fmt;

use pixmark_view::InvalidViewportError;

/// Failure to obtain an image's natural size.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ImageLoadError {
    /// The image could not be fetched or decoded.
    Failed {
        /// URL that was requested.
        url: String,
        /// Human-readable cause.
        reason: String,
    },
    /// The load was abandoned through its [`CancelToken`](crate::CancelToken).
    Cancelled,
}

impl ImageLoadError {
    /// Builds a [`ImageLoadError::Failed`] for `url`.
    pub fn failed(url: impl Into<String>, reason: impl fmt::Display) -> Self {
        Self::Failed {
            url: url.into(),
            reason: reason.to_string(),
        }
    }
}

impl fmt::Display for ImageLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Failed { url, reason } => write!(f, "failed to load image `{url}`: {reason}"),
            Self::Cancelled => f.write_str("image load cancelled"),
        }
    }
}

impl Error for ImageLoadError {}

/// Failure to open a [`Viewer`](crate::Viewer).
#[derive(Clone, Debug, PartialEq)]
pub enum ViewerError {
    /// The image did not load.
    Load(ImageLoadError),
    /// The viewport cannot display anything.
    Viewport(InvalidViewportError),
}

impl fmt::Display for ViewerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Load(_) => f.write_str("could not load the image"),
            Self::Viewport(_) => f.write_str("could not fit the image to the viewport"),
        }
    }
}

impl Error for ViewerError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Load(err) => Some(err),
            Self::Viewport(err) => Some(err),
        }
    }
}

impl From<ImageLoadError> for ViewerError {
    fn from(err: ImageLoadError) -> Self {
        Self::Load(err)
    }
}

impl From<InvalidViewportError> for ViewerError {
    fn from(err: InvalidViewportError) -> Self {
        Self::Viewport(err)
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use pixmark_view::ViewportSize;

    use super::{ImageLoadError, ViewerError};

    #[test]
    fn viewer_error_chains_to_cause() {
        let err = ViewerError::from(ImageLoadError::failed("a.png", "no such file"));
        assert_eq!(
            err.source().map(ToString::to_string).as_deref(),
            Some("failed to load image `a.png`: no such file")
        );

        let invalid = ViewportSize::new(0.0, 10.0).validate().unwrap_err();
        let err = ViewerError::from(invalid);
        assert!(matches!(err, ViewerError::Viewport(_)));
        assert!(err.source().is_some());
    }
}
