// Copyright 2025 the Pixmark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tests for opening a `Viewer` from images on disk.

use std::future;

use kurbo::Point;
use pixmark::{
    CancelToken, FsImageLoader, ImageLoadError, ImageLoader, ImageSize, ImageSource, LoadedImage,
    Viewer, ViewerError, ViewerOptions, ViewportSize, load_image,
};
use pollster::block_on;
use tempfile::TempDir;

fn write_png(dir: &TempDir, name: &str, width: u32, height: u32) {
    let img = image::RgbImage::new(width, height);
    img.save(dir.path().join(name)).unwrap();
}

/// Loader that cancels the token while the load is in flight.
struct CancellingLoader(CancelToken);

impl ImageLoader for CancellingLoader {
    fn load(&self, url: &str) -> impl Future<Output = Result<LoadedImage, ImageLoadError>> {
        self.0.cancel();
        future::ready(Ok(ImageSource::new(url, ImageSize::new(10, 10))))
    }
}

#[test]
fn png_on_disk_yields_its_dimensions() {
    let dir = tempfile::tempdir().unwrap();
    write_png(&dir, "scan.png", 64, 32);
    let loader = FsImageLoader::with_root(dir.path());

    let image = block_on(load_image(&loader, "scan.png", &CancelToken::new())).unwrap();
    assert_eq!(image.size, ImageSize::new(64, 32));
    assert_eq!(image.url, "scan.png");
}

#[test]
fn missing_file_fails_with_url() {
    let dir = tempfile::tempdir().unwrap();
    let loader = FsImageLoader::with_root(dir.path());

    let err = block_on(load_image(&loader, "nope.png", &CancelToken::new())).unwrap_err();
    match err {
        ImageLoadError::Failed { url, reason } => {
            assert_eq!(url, "nope.png");
            assert!(!reason.is_empty(), "failure carries a reason");
        }
        other => panic!("expected a failed load, got {other:?}"),
    }
}

#[test]
fn non_image_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("notes.png"), b"definitely not a png").unwrap();
    let loader = FsImageLoader::with_root(dir.path());

    let err = block_on(load_image(&loader, "notes.png", &CancelToken::new())).unwrap_err();
    assert!(matches!(err, ImageLoadError::Failed { .. }));
}

#[test]
fn cancelled_token_stops_the_load() {
    let dir = tempfile::tempdir().unwrap();
    write_png(&dir, "scan.png", 8, 8);
    let loader = FsImageLoader::with_root(dir.path());
    let cancel = CancelToken::new();
    cancel.cancel();

    let err = block_on(load_image(&loader, "scan.png", &cancel)).unwrap_err();
    assert_eq!(err, ImageLoadError::Cancelled);
}

#[test]
fn cancel_during_load_is_honored() {
    let cancel = CancelToken::new();
    let loader = CancellingLoader(cancel.clone());

    let err = block_on(load_image(&loader, "any.png", &cancel)).unwrap_err();
    assert_eq!(err, ImageLoadError::Cancelled);
}

#[test]
fn open_fits_the_image_and_draws() {
    let dir = tempfile::tempdir().unwrap();
    write_png(&dir, "wide.png", 2000, 1000);
    let loader = FsImageLoader::with_root(dir.path());

    let mut viewer = block_on(Viewer::open(
        &loader,
        "wide.png",
        ViewportSize::new(800.0, 600.0),
        &CancelToken::new(),
        ViewerOptions::default(),
    ))
    .unwrap();

    let fit = viewer.fit();
    assert_eq!(fit.ratio, 1.5);
    assert_eq!(fit.resolutions.initial, 2.5);
    assert_eq!(fit.resolutions.max, 2.5);
    assert_eq!(fit.resolutions.min, 1.0);
    assert_eq!(viewer.view().resolution(), 2.5);
    assert_eq!(viewer.map().base_layer().extent, fit.extent);

    viewer.enable_drawing();
    viewer.pointer_down(Point::new(400.0, 300.0));
    let id = viewer.pointer_up(Point::new(400.0, 300.0)).unwrap().unwrap();
    assert_eq!(
        viewer.pipeline().source().get(id).unwrap().position(),
        Point::new(1000.0, 500.0)
    );

    let frame = viewer.render();
    assert_eq!(frame.labels.items[0].text, format!("?{}", id.get()));
    assert_eq!(frame.clusters.items.len(), 1);
}

#[test]
fn open_reports_load_and_viewport_errors() {
    let dir = tempfile::tempdir().unwrap();
    write_png(&dir, "scan.png", 16, 16);
    let loader = FsImageLoader::with_root(dir.path());

    let missing = block_on(Viewer::open(
        &loader,
        "missing.png",
        ViewportSize::new(800.0, 600.0),
        &CancelToken::new(),
        ViewerOptions::default(),
    ));
    assert!(matches!(missing, Err(ViewerError::Load(ImageLoadError::Failed { .. }))));

    let degenerate = block_on(Viewer::open(
        &loader,
        "scan.png",
        ViewportSize::new(800.0, 0.0),
        &CancelToken::new(),
        ViewerOptions::default(),
    ));
    assert!(matches!(degenerate, Err(ViewerError::Viewport(_))));
}
