// Copyright 2025 the Pixmark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pixmark Annotate: point annotations over a pixel-space image.
//!
//! One [`PointSource`] holds every annotation of a session. Two layers read it:
//! - [`LabelLayer`] draws each point as a text box showing its label, or `?`
//!   and its id when it has none.
//! - [`ClusterLayer`] groups nearby points with [`cluster_points`] and draws
//!   each group as a count badge whose style comes from a shared
//!   [`StyleCache`](pixmark_style::StyleCache).
//!
//! [`AnnotationPipeline`] owns the source, the style cache and both layers,
//! and hands out [`DrawPoint`] handles that turn pointer clicks into new
//! points.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Point;
//! use pixmark_annotate::{AnnotationPipeline, LayerRef};
//!
//! let mut pipeline = AnnotationPipeline::default();
//! pipeline.source_mut().add_point(Point::new(10.0, 10.0));
//! pipeline.source_mut().add_point(Point::new(14.0, 12.0));
//! pipeline.source_mut().add_labeled(Point::new(400.0, 80.0), "hello");
//!
//! let frame = pipeline.render(1.0);
//! let texts: Vec<_> = frame.labels.items.iter().map(|l| l.text.as_str()).collect();
//! assert_eq!(texts, ["?1", "?2", "hello"]);
//! assert_eq!(frame.clusters.items[0].count(), 2);
//!
//! // Clusters draw above labels.
//! assert!(matches!(frame.draw_order()[1], LayerRef::Clusters(_)));
//! ```
//!
//! Layers cache what they produced and only re-evaluate after the source
//! gains a point or, for clusters, when the resolution changes.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod cluster;
mod draw;
mod feature;
mod layer;
mod pipeline;
mod source;

pub use cluster::{
    ClusterGroup, ClusterOptions, ClusterSource, DEFAULT_CLUSTER_DISTANCE, cluster_points,
};
pub use draw::{DEFAULT_CLICK_TOLERANCE, DrawError, DrawOptions, DrawPoint, OutOfExtent};
pub use feature::{PointAnnotation, PointId};
pub use layer::{ClusterLayer, LabelLayer, RenderedCluster, RenderedLabel};
pub use pipeline::{AnnotationPipeline, Frame, IndexOptions, LayerFrame, LayerRef, PipelineOptions};
pub use source::{PointSource, SourceId};
