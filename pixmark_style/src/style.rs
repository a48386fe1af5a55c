// Copyright 2025 the Pixmark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Style descriptors: markers, strokes, and text.

use alloc::borrow::Cow;
use alloc::string::String;
use core::fmt;

use peniko::Color;

/// A solid stroke.
#[derive(Clone, Copy, Debug)]
pub struct StrokeStyle {
    /// Stroke color.
    pub color: Color,
    /// Stroke width in screen pixels.
    pub width: f64,
}

impl StrokeStyle {
    /// Creates a stroke.
    #[must_use]
    pub const fn new(color: Color, width: f64) -> Self {
        Self { color, width }
    }
}

/// A filled, stroked circle centered on the feature position.
#[derive(Clone, Copy, Debug)]
pub struct CircleMarker {
    /// Radius in screen pixels.
    pub radius: f64,
    /// Interior fill.
    pub fill: Color,
    /// Outline.
    pub stroke: StrokeStyle,
}

/// Font weight.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FontWeight {
    /// Regular weight.
    #[default]
    Normal,
    /// Bold weight.
    Bold,
}

/// A CSS-like font shorthand: weight, size, optional line height, and family.
#[derive(Clone, Debug, PartialEq)]
pub struct Font {
    /// Weight.
    pub weight: FontWeight,
    /// Size in screen pixels.
    pub size: f64,
    /// Line height in screen pixels; `None` uses the backend default.
    pub line_height: Option<f64>,
    /// Family name, passed through to the text backend.
    pub family: Cow<'static, str>,
}

impl Default for Font {
    /// `10px sans-serif`.
    fn default() -> Self {
        Self {
            weight: FontWeight::Normal,
            size: 10.0,
            line_height: None,
            family: Cow::Borrowed("sans-serif"),
        }
    }
}

impl fmt::Display for Font {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.weight == FontWeight::Bold {
            f.write_str("bold ")?;
        }
        write!(f, "{}px", self.size)?;
        if let Some(lh) = self.line_height {
            write!(f, "/{lh}px")?;
        }
        write!(f, " {}", self.family)
    }
}

/// Padding around text, in screen pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Padding {
    /// Space above the text.
    pub top: f64,
    /// Space right of the text.
    pub right: f64,
    /// Space below the text.
    pub bottom: f64,
    /// Space left of the text.
    pub left: f64,
}

impl Padding {
    /// Same padding above and below, and same padding left and right.
    #[must_use]
    pub const fn symmetric(vertical: f64, horizontal: f64) -> Self {
        Self {
            top: vertical,
            right: horizontal,
            bottom: vertical,
            left: horizontal,
        }
    }
}

/// Filled and outlined box drawn behind text.
#[derive(Clone, Copy, Debug)]
pub struct TextBackground {
    /// Box fill.
    pub fill: Color,
    /// Box outline.
    pub stroke: StrokeStyle,
}

/// Text centered on the feature position.
#[derive(Clone, Debug)]
pub struct TextStyle {
    /// Text content.
    pub text: String,
    /// Glyph fill.
    pub fill: Color,
    /// Font.
    pub font: Font,
    /// Optional box behind the text.
    pub background: Option<TextBackground>,
    /// Space between the text and the box edges.
    pub padding: Padding,
}

/// Immutable bundle of visual parameters used to render one feature.
#[derive(Clone, Debug, Default)]
pub struct Style {
    /// Point marker, if any.
    pub marker: Option<CircleMarker>,
    /// Text, if any.
    pub text: Option<TextStyle>,
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    #[test]
    fn font_shorthand() {
        let bold = Font {
            weight: FontWeight::Bold,
            size: 14.0,
            line_height: Some(17.0),
            family: Cow::Borrowed("inherit"),
        };
        assert_eq!(bold.to_string(), "bold 14px/17px inherit");
        assert_eq!(Font::default().to_string(), "10px sans-serif");
    }

    #[test]
    fn symmetric_padding() {
        let p = Padding::symmetric(2.0, 5.0);
        assert_eq!((p.top, p.right, p.bottom, p.left), (2.0, 5.0, 2.0, 5.0));
    }
}
