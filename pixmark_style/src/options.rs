// Copyright 2025 the Pixmark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Style options for cluster badges and label boxes, with their defaults.

use alloc::borrow::Cow;
use alloc::string::{String, ToString};

use peniko::Color;

use crate::style::{
    CircleMarker, Font, FontWeight, Padding, StrokeStyle, Style, TextBackground, TextStyle,
};

/// Parameters of the count badge drawn for each cluster.
#[derive(Clone, Debug)]
pub struct ClusterStyleOptions {
    /// Badge radius in screen pixels.
    pub radius: f64,
    /// Badge fill.
    pub fill: Color,
    /// Badge outline.
    pub stroke: StrokeStyle,
    /// Color of the count text.
    pub text_fill: Color,
    /// Font of the count text.
    pub font: Font,
}

impl Default for ClusterStyleOptions {
    /// Radius 10, `#3399CC` fill, 1px white outline, white count text.
    fn default() -> Self {
        Self {
            radius: 10.0,
            fill: Color::from_rgb8(0x33, 0x99, 0xCC),
            stroke: StrokeStyle::new(Color::from_rgb8(0xFF, 0xFF, 0xFF), 1.0),
            text_fill: Color::from_rgb8(0xFF, 0xFF, 0xFF),
            font: Font::default(),
        }
    }
}

impl ClusterStyleOptions {
    /// Builds the badge style for a cluster of `count` features.
    #[must_use]
    pub fn build(&self, count: usize) -> Style {
        Style {
            marker: Some(CircleMarker {
                radius: self.radius,
                fill: self.fill,
                stroke: self.stroke,
            }),
            text: Some(TextStyle {
                text: count.to_string(),
                fill: self.text_fill,
                font: self.font.clone(),
                background: None,
                padding: Padding::default(),
            }),
        }
    }
}

/// Shared part of a label style: everything except the text itself.
#[derive(Clone, Debug)]
pub struct TextBoxStyle {
    /// Padding between the text and the box edges.
    pub padding: Padding,
    /// Box fill and outline.
    pub background: TextBackground,
    /// Glyph fill.
    pub text_fill: Color,
    /// Font.
    pub font: Font,
}

impl TextBoxStyle {
    /// Produces a full text style carrying `text`.
    #[must_use]
    pub fn with_text(&self, text: impl Into<String>) -> TextStyle {
        TextStyle {
            text: text.into(),
            fill: self.text_fill,
            font: self.font.clone(),
            background: Some(self.background),
            padding: self.padding,
        }
    }

    /// Produces a complete, marker-less [`Style`] carrying `text`.
    #[must_use]
    pub fn to_style(&self, text: impl Into<String>) -> Style {
        Style {
            marker: None,
            text: Some(self.with_text(text)),
        }
    }
}

/// Parameters of the text box drawn for each labeled point.
#[derive(Clone, Debug)]
pub struct TextBoxOptions {
    /// Vertical padding in screen pixels.
    pub pad_y: f64,
    /// Horizontal padding in screen pixels.
    pub pad_x: f64,
    /// Box outline color.
    pub border_color: Color,
    /// Box outline width in screen pixels.
    pub border_width: f64,
    /// Box fill.
    pub background: Color,
    /// Glyph fill.
    pub text_color: Color,
    /// Font.
    pub font: Font,
}

impl Default for TextBoxOptions {
    /// 2px/5px padding, `#666666` 1px border, `#8FC658` fill, white `bold 14px/17px inherit` text.
    fn default() -> Self {
        Self {
            pad_y: 2.0,
            pad_x: 5.0,
            border_color: Color::from_rgb8(0x66, 0x66, 0x66),
            border_width: 1.0,
            background: Color::from_rgb8(0x8F, 0xC6, 0x58),
            text_color: Color::from_rgb8(0xFF, 0xFF, 0xFF),
            font: Font {
                weight: FontWeight::Bold,
                size: 14.0,
                line_height: Some(17.0),
                family: Cow::Borrowed("inherit"),
            },
        }
    }
}

impl TextBoxOptions {
    /// Builds the shared text box style.
    #[must_use]
    pub fn build(&self) -> TextBoxStyle {
        TextBoxStyle {
            padding: Padding::symmetric(self.pad_y, self.pad_x),
            background: TextBackground {
                fill: self.background,
                stroke: StrokeStyle::new(self.border_color, self.border_width),
            },
            text_fill: self.text_color,
            font: self.font.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use peniko::Color;

    use super::{ClusterStyleOptions, TextBoxOptions};

    fn rgb(c: Color) -> (u8, u8, u8) {
        let c = c.to_rgba8();
        (c.r, c.g, c.b)
    }

    #[test]
    fn cluster_badge_defaults() {
        let style = ClusterStyleOptions::default().build(7);
        let marker = style.marker.expect("badge marker");
        assert_eq!(marker.radius, 10.0);
        assert_eq!(rgb(marker.fill), (0x33, 0x99, 0xCC));
        assert_eq!(rgb(marker.stroke.color), (0xFF, 0xFF, 0xFF));
        assert_eq!(marker.stroke.width, 1.0);

        let text = style.text.expect("badge text");
        assert_eq!(text.text, "7");
        assert_eq!(rgb(text.fill), (0xFF, 0xFF, 0xFF));
        assert!(text.background.is_none());
    }

    #[test]
    fn text_box_defaults() {
        let base = TextBoxOptions::default().build();
        let text = base.with_text("hello");
        assert_eq!(text.text, "hello");
        assert_eq!((text.padding.top, text.padding.left), (2.0, 5.0));
        let bg = text.background.expect("label background");
        assert_eq!(rgb(bg.fill), (0x8F, 0xC6, 0x58));
        assert_eq!(rgb(bg.stroke.color), (0x66, 0x66, 0x66));
        assert_eq!(bg.stroke.width, 1.0);
        assert_eq!(rgb(text.fill), (0xFF, 0xFF, 0xFF));
        assert_eq!(text.font.to_string(), "bold 14px/17px inherit");

        let style = base.to_style("x");
        assert!(style.marker.is_none());
    }
}
