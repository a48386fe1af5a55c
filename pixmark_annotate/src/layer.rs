// Copyright 2025 the Pixmark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Label and cluster layers over a shared [`PointSource`].
//!
//! Both layers keep the items they produced last and only re-evaluate when
//! their inputs change: the source revision for labels, and the source
//! revision plus world-space cluster distance for clusters.

use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::num::NonZeroUsize;

use kurbo::Point;
use pixmark_index::Backend;
use pixmark_style::{Style, StyleCache, TextBoxStyle, TextStyle};

use crate::cluster::{ClusterGroup, ClusterOptions, ClusterSource};
use crate::feature::PointId;
use crate::source::{PointSource, SourceId};

/// One point as drawn by the label layer.
#[derive(Clone, Debug)]
pub struct RenderedLabel {
    /// Annotation id.
    pub id: PointId,
    /// World-space anchor.
    pub position: Point,
    /// Text shown in the box.
    pub text: String,
    /// Box style shared by every label of the layer.
    pub style: Arc<TextBoxStyle>,
}

impl RenderedLabel {
    /// Returns the complete text style for this label.
    #[must_use]
    pub fn text_style(&self) -> TextStyle {
        self.style.with_text(self.text.as_str())
    }
}

/// One cluster badge as drawn by the cluster layer.
#[derive(Clone, Debug)]
pub struct RenderedCluster {
    /// The aggregated group.
    pub group: ClusterGroup,
    /// Badge style, shared with every other group of the same size.
    pub style: Arc<Style>,
}

impl RenderedCluster {
    /// World-space anchor of the badge.
    #[must_use]
    pub fn position(&self) -> Point {
        self.group.centroid()
    }

    /// Number of aggregated annotations.
    #[must_use]
    pub fn count(&self) -> usize {
        self.group.len()
    }
}

/// Renders every point individually as a text box.
#[derive(Debug)]
pub struct LabelLayer {
    style: Arc<TextBoxStyle>,
    z_index: i32,
    key: Option<(SourceId, u64)>,
    items: Vec<RenderedLabel>,
    evaluations: u64,
}

impl LabelLayer {
    /// Creates a label layer drawing boxes with `style` at `z_index`.
    #[must_use]
    pub fn new(style: TextBoxStyle, z_index: i32) -> Self {
        Self {
            style: Arc::new(style),
            z_index,
            key: None,
            items: Vec::new(),
            evaluations: 0,
        }
    }

    /// Returns the shared box style.
    #[must_use]
    pub fn style(&self) -> &Arc<TextBoxStyle> {
        &self.style
    }

    /// Stacking order; higher draws on top.
    #[must_use]
    pub fn z_index(&self) -> i32 {
        self.z_index
    }

    /// Sets the stacking order.
    pub fn set_z_index(&mut self, z_index: i32) {
        self.z_index = z_index;
    }

    /// Returns `true` if the cached items do not reflect `source`.
    #[must_use]
    pub fn is_stale<B: Backend>(&self, source: &PointSource<B>) -> bool {
        self.key != Some((source.id(), source.revision()))
    }

    /// Returns one item per point in insertion order, re-evaluating if stale.
    pub fn render<B: Backend>(&mut self, source: &PointSource<B>) -> &[RenderedLabel] {
        if self.is_stale(source) {
            self.items.clear();
            self.items.extend(source.iter().map(|feature| RenderedLabel {
                id: feature.id(),
                position: feature.position(),
                text: feature.display_label().into_owned(),
                style: Arc::clone(&self.style),
            }));
            self.key = Some((source.id(), source.revision()));
            self.evaluations += 1;
            tracing::trace!(labels = self.items.len(), "labels recomputed");
        }
        &self.items
    }

    /// Items from the last evaluation.
    #[must_use]
    pub fn items(&self) -> &[RenderedLabel] {
        &self.items
    }

    /// Number of times the layer re-evaluated.
    #[must_use]
    pub fn evaluations(&self) -> u64 {
        self.evaluations
    }
}

/// Renders the source through the cluster transform as count badges.
#[derive(Debug)]
pub struct ClusterLayer {
    clusters: ClusterSource,
    z_index: i32,
    items: Vec<RenderedCluster>,
    evaluations: u64,
}

impl ClusterLayer {
    /// Creates a cluster layer at `z_index`.
    #[must_use]
    pub fn new(options: ClusterOptions, z_index: i32) -> Self {
        Self {
            clusters: ClusterSource::new(options),
            z_index,
            items: Vec::new(),
            evaluations: 0,
        }
    }

    /// Returns the underlying cluster transform.
    #[must_use]
    pub fn clusters(&self) -> &ClusterSource {
        &self.clusters
    }

    /// Replaces the clustering options; the next render re-evaluates.
    pub fn set_options(&mut self, options: ClusterOptions) {
        self.clusters.set_options(options);
    }

    /// Stacking order; higher draws on top.
    #[must_use]
    pub fn z_index(&self) -> i32 {
        self.z_index
    }

    /// Sets the stacking order.
    pub fn set_z_index(&mut self, z_index: i32) {
        self.z_index = z_index;
    }

    /// Returns one badge per group at `resolution`.
    ///
    /// Styles are looked up in `styles` only when the groups were recomputed,
    /// so re-rendering an unchanged frame touches neither the transform nor
    /// the cache.
    pub fn render<B: Backend>(
        &mut self,
        source: &PointSource<B>,
        resolution: f64,
        styles: &mut StyleCache,
    ) -> &[RenderedCluster] {
        if self.clusters.refresh(source, resolution) {
            self.items.clear();
            self.items
                .extend(self.clusters.cached().iter().filter_map(|group| {
                    let count = NonZeroUsize::new(group.len())?;
                    Some(RenderedCluster {
                        style: styles.style_for(count),
                        group: group.clone(),
                    })
                }));
            self.evaluations += 1;
        }
        &self.items
    }

    /// Items from the last evaluation.
    #[must_use]
    pub fn items(&self) -> &[RenderedCluster] {
        &self.items
    }

    /// Number of times the layer re-evaluated.
    #[must_use]
    pub fn evaluations(&self) -> u64 {
        self.evaluations
    }
}
