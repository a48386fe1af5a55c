// Copyright 2025 the Pixmark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Point;
use pixmark_annotate::{AnnotationPipeline, DrawError, DrawPoint, Frame, PipelineOptions, PointId};
use pixmark_view::{ClampMode, Fit, MapView, PixelView, ViewportSize, build_view, compute_fit};

use crate::error::ViewerError;
use crate::load::{CancelToken, ImageLoader, LoadedImage, load_image};

/// Configuration of a [`Viewer`].
#[derive(Clone, Debug, Default)]
pub struct ViewerOptions {
    /// Annotation layers, styles and drawing.
    pub pipeline: PipelineOptions,
    /// How the pan/zoom view keeps the image on screen.
    pub clamp_mode: ClampMode,
}

#[derive(Copy, Clone, Debug)]
struct Press {
    origin: Point,
    last: Point,
    panning: bool,
}

/// An image shown in a fitted view with its annotation layers.
///
/// A viewer only exists once its image has loaded and been fitted, so
/// everything reachable from it can rely on a valid view.
#[derive(Debug)]
pub struct Viewer {
    image: LoadedImage,
    fit: Fit,
    map: MapView,
    view: PixelView,
    pipeline: AnnotationPipeline,
    draw: Option<DrawPoint>,
    press: Option<Press>,
    click_tolerance: f64,
}

impl Viewer {
    /// Loads `url`, fits it to `viewport` and builds the view and layers.
    pub async fn open<L: ImageLoader>(
        loader: &L,
        url: &str,
        viewport: ViewportSize,
        cancel: &CancelToken,
        options: ViewerOptions,
    ) -> Result<Self, ViewerError> {
        let image = load_image(loader, url, cancel).await?;
        Self::from_image(image, viewport, options)
    }

    /// Builds a viewer for an image whose size is already known.
    pub fn from_image(
        image: LoadedImage,
        viewport: ViewportSize,
        options: ViewerOptions,
    ) -> Result<Self, ViewerError> {
        let fit = compute_fit(image.size, viewport)?;
        let map = build_view(&image, &fit);
        let mut view = map.attach(viewport)?;
        view.set_clamp_mode(options.clamp_mode);
        let click_tolerance = options.pipeline.draw.click_tolerance;
        tracing::info!(
            url = image.url.as_str(),
            resolution = fit.resolutions.initial,
            "viewer opened"
        );
        Ok(Self {
            image,
            fit,
            map,
            view,
            pipeline: AnnotationPipeline::new(options.pipeline),
            draw: None,
            press: None,
            click_tolerance,
        })
    }

    /// The displayed image.
    #[must_use]
    pub fn image(&self) -> &LoadedImage {
        &self.image
    }

    /// The fit computed when the viewer opened.
    #[must_use]
    pub fn fit(&self) -> &Fit {
        &self.fit
    }

    /// View configuration and base image layer.
    #[must_use]
    pub fn map(&self) -> &MapView {
        &self.map
    }

    /// Current pan/zoom state.
    #[must_use]
    pub fn view(&self) -> &PixelView {
        &self.view
    }

    /// Pan/zoom state for programmatic navigation.
    pub fn view_mut(&mut self) -> &mut PixelView {
        &mut self.view
    }

    /// Annotation layers and their shared source.
    #[must_use]
    pub fn pipeline(&self) -> &AnnotationPipeline {
        &self.pipeline
    }

    /// Annotation layers for direct edits.
    pub fn pipeline_mut(&mut self) -> &mut AnnotationPipeline {
        &mut self.pipeline
    }

    /// Turns clicks into new points. Calling it again keeps the existing handle.
    ///
    /// A press already in progress that has not turned into a pan can still
    /// complete as a click.
    pub fn enable_drawing(&mut self) -> &DrawPoint {
        let Self {
            pipeline,
            draw,
            press,
            ..
        } = self;
        draw.get_or_insert_with(|| {
            let mut handle = pipeline.enable_drawing();
            if let Some(p) = *press
                && !p.panning
            {
                handle.pointer_down(p.origin);
            }
            handle
        })
    }

    /// Returns `true` once [`enable_drawing`](Self::enable_drawing) was called.
    #[must_use]
    pub fn is_drawing_enabled(&self) -> bool {
        self.draw.is_some()
    }

    /// Starts a gesture at `view_pt`.
    pub fn pointer_down(&mut self, view_pt: Point) {
        self.press = Some(Press {
            origin: view_pt,
            last: view_pt,
            panning: false,
        });
        if let Some(draw) = &mut self.draw {
            draw.pointer_down(view_pt);
        }
    }

    /// Follows the pointer; returns `true` if the view panned.
    ///
    /// Travel within the click tolerance is ignored. Beyond it the gesture
    /// becomes a pan and no point is drawn on release.
    pub fn pointer_move(&mut self, view_pt: Point) -> bool {
        let Some(press) = &mut self.press else {
            return false;
        };
        if !press.panning {
            let tol = self.click_tolerance.max(0.0);
            if (view_pt - press.origin).hypot2() <= tol * tol {
                return false;
            }
            press.panning = true;
            if let Some(draw) = &mut self.draw {
                draw.cancel();
            }
        }
        let delta = view_pt - press.last;
        press.last = view_pt;
        self.view.pan_by_view(delta);
        true
    }

    /// Ends the gesture; a click adds a point when drawing is enabled.
    pub fn pointer_up(&mut self, view_pt: Point) -> Result<Option<PointId>, DrawError> {
        let press = self.press.take();
        let Some(draw) = &mut self.draw else {
            return Ok(None);
        };
        if press.is_some_and(|p| p.panning) {
            draw.cancel();
            return Ok(None);
        }
        draw.pointer_up(view_pt, &self.view, self.pipeline.source_mut())
    }

    /// Renders the annotation layers at the current resolution.
    pub fn render(&mut self) -> Frame<'_> {
        self.pipeline.render(self.view.resolution())
    }
}
