// Copyright 2025 the Pixmark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Clamp behavior for panning and zooming relative to the image extent.
///
/// Consulted by [`crate::PixelView`] after every pan, zoom, or reset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ClampMode {
    /// Do not apply any clamping; the view center may leave the extent.
    None,
    /// Keep the view center inside the image extent.
    ///
    /// Some part of the image therefore always stays visible, and at the fitted
    /// resolution the image cannot be scrolled out of the viewport.
    #[default]
    CenterInExtent,
}
