// Copyright 2025 the Pixmark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::borrow::Cow;
use alloc::format;
use alloc::string::String;
use core::fmt;

use kurbo::Point;

/// Stable identifier of a point annotation within its source.
///
/// Ids are allocated sequentially starting at `1` and are never reused.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PointId(pub(crate) u64);

impl PointId {
    /// Returns the raw id value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for PointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A point annotation in pixel-space world coordinates with an optional label.
///
/// Annotations are immutable once added to a source.
#[derive(Clone, Debug, PartialEq)]
pub struct PointAnnotation {
    id: PointId,
    position: Point,
    label: Option<String>,
}

impl PointAnnotation {
    pub(crate) fn new(id: PointId, position: Point, label: Option<String>) -> Self {
        Self {
            id,
            position,
            label,
        }
    }

    /// Returns the annotation's id.
    #[must_use]
    pub fn id(&self) -> PointId {
        self.id
    }

    /// Returns the annotation's world-space position.
    #[must_use]
    pub fn position(&self) -> Point {
        self.position
    }

    /// Returns the label text as stored, if any.
    #[must_use]
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Returns the text to display for this annotation.
    ///
    /// A non-empty label is shown verbatim. Otherwise the annotation is shown
    /// as `?` followed by its id, so every point stays visibly labeled.
    #[must_use]
    pub fn display_label(&self) -> Cow<'_, str> {
        match self.label.as_deref() {
            Some(text) if !text.is_empty() => Cow::Borrowed(text),
            _ => Cow::Owned(format!("?{}", self.id)),
        }
    }
}
