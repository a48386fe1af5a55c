// Copyright 2025 the Pixmark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pixmark: annotate an image with labeled points.
//!
//! A [`Viewer`] is the session object. Opening one loads the image through an
//! [`ImageLoader`], fits it to the viewport, builds a pixel-space view and sets
//! up the annotation layers. Pointer events routed through the viewer either
//! pan the view or, once drawing is enabled, add points.
//!
//! ```rust,no_run
//! use kurbo::Point;
//! use pixmark::{CancelToken, FsImageLoader, Viewer, ViewerOptions, ViewportSize};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let loader = FsImageLoader::with_root("assets");
//! let cancel = CancelToken::new();
//! let mut viewer = Viewer::open(
//!     &loader,
//!     "scan.png",
//!     ViewportSize::new(800.0, 600.0),
//!     &cancel,
//!     ViewerOptions::default(),
//! )
//! .await?;
//!
//! viewer.enable_drawing();
//! viewer.pointer_down(Point::new(400.0, 300.0));
//! viewer.pointer_up(Point::new(400.0, 300.0))?;
//!
//! for layer in viewer.render().draw_order() {
//!     // hand each layer to the renderer, bottom first
//!     let _ = layer.z_index();
//! }
//! # Ok(())
//! # }
//! ```
//!
//! The building blocks live in their own crates and are re-exported here:
//! [`pixmark_view`] for fitting and pan/zoom, [`pixmark_annotate`] for points,
//! clustering and drawing, and [`pixmark_style`] for style descriptors.

mod error;
mod load;
mod viewer;

pub use error::{ImageLoadError, ViewerError};
pub use load::{CancelToken, FsImageLoader, ImageLoader, LoadedImage, load_image};
pub use viewer::{Viewer, ViewerOptions};

pub use pixmark_annotate::{
    AnnotationPipeline, DrawError, DrawOptions, DrawPoint, Frame, LayerRef, OutOfExtent,
    PipelineOptions, PointAnnotation, PointId,
};
pub use pixmark_view::{ClampMode, ImageSize, ImageSource, PixelView, ViewportSize};
pub use {pixmark_annotate, pixmark_style, pixmark_view};
