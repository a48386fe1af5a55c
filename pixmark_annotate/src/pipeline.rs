// Copyright 2025 the Pixmark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use pixmark_index::Backend;
use pixmark_index::backends::{DEFAULT_CELL_SIZE, Grid};
use pixmark_style::{ClusterStyleOptions, StyleCache, TextBoxOptions};

use crate::cluster::ClusterOptions;
use crate::draw::{DrawOptions, DrawPoint};
use crate::layer::{ClusterLayer, LabelLayer, RenderedCluster, RenderedLabel};
use crate::source::PointSource;

/// Spatial index parameters.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct IndexOptions {
    /// Side length of a grid cell in world units.
    pub cell_size: f64,
}

impl Default for IndexOptions {
    fn default() -> Self {
        Self {
            cell_size: DEFAULT_CELL_SIZE,
        }
    }
}

/// Configuration of an [`AnnotationPipeline`].
#[derive(Clone, Debug)]
pub struct PipelineOptions {
    /// Grid index used by [`AnnotationPipeline::new`].
    pub index: IndexOptions,
    /// Cluster transform parameters.
    pub cluster: ClusterOptions,
    /// Cluster badge style.
    pub cluster_style: ClusterStyleOptions,
    /// Label box style.
    pub label_style: TextBoxOptions,
    /// Draw interaction parameters.
    pub draw: DrawOptions,
    /// Stacking order of the label layer.
    pub label_z_index: i32,
    /// Stacking order of the cluster layer.
    pub cluster_z_index: i32,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            index: IndexOptions::default(),
            cluster: ClusterOptions::default(),
            cluster_style: ClusterStyleOptions::default(),
            label_style: TextBoxOptions::default(),
            draw: DrawOptions::default(),
            label_z_index: 1,
            cluster_z_index: 2,
        }
    }
}

/// The shared point source together with the two layers drawn from it.
///
/// The pipeline owns the source and the style cache; all mutation goes
/// through `&mut self`.
#[derive(Debug)]
pub struct AnnotationPipeline<B: Backend = Grid> {
    source: PointSource<B>,
    styles: StyleCache,
    labels: LabelLayer,
    clusters: ClusterLayer,
    draw: DrawOptions,
}

impl AnnotationPipeline<Grid> {
    /// Creates a pipeline over an empty grid-indexed source.
    #[must_use]
    pub fn new(options: PipelineOptions) -> Self {
        let source = PointSource::with_cell_size(options.index.cell_size);
        Self::with_source(source, options)
    }
}

impl Default for AnnotationPipeline<Grid> {
    fn default() -> Self {
        Self::new(PipelineOptions::default())
    }
}

impl<B: Backend> AnnotationPipeline<B> {
    /// Creates a pipeline over an existing source; `options.index` is ignored.
    #[must_use]
    pub fn with_source(source: PointSource<B>, options: PipelineOptions) -> Self {
        Self {
            source,
            styles: StyleCache::with_options(options.cluster_style),
            labels: LabelLayer::new(options.label_style.build(), options.label_z_index),
            clusters: ClusterLayer::new(options.cluster, options.cluster_z_index),
            draw: options.draw,
        }
    }

    /// Returns the shared point source.
    #[must_use]
    pub fn source(&self) -> &PointSource<B> {
        &self.source
    }

    /// Returns the shared point source for adding points directly.
    pub fn source_mut(&mut self) -> &mut PointSource<B> {
        &mut self.source
    }

    /// Returns the cluster style cache.
    #[must_use]
    pub fn styles(&self) -> &StyleCache {
        &self.styles
    }

    /// Returns the label layer.
    #[must_use]
    pub fn label_layer(&self) -> &LabelLayer {
        &self.labels
    }

    /// Returns the cluster layer.
    #[must_use]
    pub fn cluster_layer(&self) -> &ClusterLayer {
        &self.clusters
    }

    /// Returns the cluster layer for reconfiguration.
    pub fn cluster_layer_mut(&mut self) -> &mut ClusterLayer {
        &mut self.clusters
    }

    /// Returns a draw handle bound to this pipeline's source.
    #[must_use]
    pub fn enable_drawing(&self) -> DrawPoint {
        DrawPoint::new(self.source.id(), self.draw)
    }

    /// Renders both layers at `resolution`, re-evaluating only what changed.
    pub fn render(&mut self, resolution: f64) -> Frame<'_> {
        let Self {
            source,
            styles,
            labels,
            clusters,
            ..
        } = self;
        let label_z = labels.z_index();
        let cluster_z = clusters.z_index();
        Frame {
            resolution,
            labels: LayerFrame {
                z_index: label_z,
                items: labels.render(source),
            },
            clusters: LayerFrame {
                z_index: cluster_z,
                items: clusters.render(source, resolution, styles),
            },
        }
    }
}

/// The items of one layer in a [`Frame`].
#[derive(Debug)]
pub struct LayerFrame<'a, T> {
    /// Stacking order; higher draws on top.
    pub z_index: i32,
    /// Rendered items in draw order.
    pub items: &'a [T],
}

impl<T> Clone for LayerFrame<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for LayerFrame<'_, T> {}

/// One layer of a [`Frame`], tagged by kind.
#[derive(Copy, Clone, Debug)]
pub enum LayerRef<'a> {
    /// Per-point label boxes.
    Labels(LayerFrame<'a, RenderedLabel>),
    /// Cluster count badges.
    Clusters(LayerFrame<'a, RenderedCluster>),
}

impl LayerRef<'_> {
    /// Stacking order of the layer.
    #[must_use]
    pub fn z_index(&self) -> i32 {
        match self {
            Self::Labels(layer) => layer.z_index,
            Self::Clusters(layer) => layer.z_index,
        }
    }
}

/// Everything the annotation layers draw at one resolution.
#[derive(Copy, Clone, Debug)]
pub struct Frame<'a> {
    /// Resolution the frame was rendered at.
    pub resolution: f64,
    /// Label layer items.
    pub labels: LayerFrame<'a, RenderedLabel>,
    /// Cluster layer items.
    pub clusters: LayerFrame<'a, RenderedCluster>,
}

impl<'a> Frame<'a> {
    /// Layers from bottom to top; ties keep labels below clusters.
    #[must_use]
    pub fn draw_order(&self) -> [LayerRef<'a>; 2] {
        let labels = LayerRef::Labels(self.labels);
        let clusters = LayerRef::Clusters(self.clusters);
        if clusters.z_index() < labels.z_index() {
            [clusters, labels]
        } else {
            [labels, clusters]
        }
    }
}

#[cfg(test)]
mod tests {
    use kurbo::Point;

    use super::{AnnotationPipeline, LayerRef, PipelineOptions};

    #[test]
    fn default_stacking_puts_clusters_on_top() {
        let mut pipeline = AnnotationPipeline::default();
        let frame = pipeline.render(1.0);
        let order = frame.draw_order();
        assert!(matches!(order[0], LayerRef::Labels(_)));
        assert!(matches!(order[1], LayerRef::Clusters(_)));
        assert_eq!((order[0].z_index(), order[1].z_index()), (1, 2));
    }

    #[test]
    fn custom_stacking_is_respected() {
        let mut pipeline = AnnotationPipeline::new(PipelineOptions {
            label_z_index: 5,
            ..PipelineOptions::default()
        });
        let order = pipeline.render(1.0).draw_order();
        assert!(matches!(order[0], LayerRef::Clusters(_)));
    }

    #[test]
    fn drawing_handle_targets_own_source() {
        let mut pipeline = AnnotationPipeline::default();
        let draw = pipeline.enable_drawing();
        assert_eq!(draw.source(), pipeline.source().id());
        pipeline.source_mut().add_point(Point::new(1.0, 1.0));
        let frame = pipeline.render(1.0);
        assert_eq!(frame.labels.items.len(), 1);
        assert_eq!(frame.clusters.items.len(), 1);
    }
}
