// Copyright 2025 the Pixmark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Distance-based clustering of point annotations.
//!
//! ## Algorithm
//!
//! The threshold is given in screen pixels and converted to world units with
//! the current resolution, so clusters break apart as the user zooms in.
//!
//! 1) Visit points in insertion order.
//! 2) For each point not yet claimed, query the square of half-width
//!    `distance * resolution` around it.
//! 3) Every still-unclaimed point in that square (the seed included) forms one
//!    group and is claimed.
//! 4) The group centroid is the mean of its members.
//!
//! Each point therefore lands in exactly one group.

use alloc::vec::Vec;

use kurbo::{Point, Rect, Vec2};
use pixmark_index::Backend;
use smallvec::SmallVec;

use crate::feature::PointId;
use crate::source::{PointSource, SourceId};

/// Default clustering distance in screen pixels.
pub const DEFAULT_CLUSTER_DISTANCE: f64 = 20.0;

/// Clustering parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClusterOptions {
    /// Proximity threshold in screen pixels.
    pub distance: f64,
}

impl Default for ClusterOptions {
    fn default() -> Self {
        Self {
            distance: DEFAULT_CLUSTER_DISTANCE,
        }
    }
}

impl ClusterOptions {
    /// World-space threshold at `resolution`; zero when either input is unusable.
    #[must_use]
    pub fn world_distance(&self, resolution: f64) -> f64 {
        let d = self.distance * resolution;
        if d.is_finite() && d > 0.0 { d } else { 0.0 }
    }
}

/// An ephemeral group of nearby point annotations.
#[derive(Clone, Debug, PartialEq)]
pub struct ClusterGroup {
    centroid: Point,
    members: SmallVec<[PointId; 4]>,
}

impl ClusterGroup {
    /// Mean position of the members.
    #[must_use]
    pub fn centroid(&self) -> Point {
        self.centroid
    }

    /// Ids of the aggregated annotations, in insertion order.
    #[must_use]
    pub fn members(&self) -> &[PointId] {
        &self.members
    }

    /// Number of aggregated annotations; always at least one.
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Always `false`: a group holds at least its seed point.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Returns `true` if `id` is a member.
    #[must_use]
    pub fn contains(&self, id: PointId) -> bool {
        self.members.contains(&id)
    }
}

/// Groups the points of `source` at `resolution`.
#[must_use]
pub fn cluster_points<B: Backend>(
    source: &PointSource<B>,
    resolution: f64,
    options: &ClusterOptions,
) -> Vec<ClusterGroup> {
    let d = options.world_distance(resolution);
    let features = source.features();
    let mut claimed = alloc::vec![false; features.len()];
    let mut groups = Vec::new();
    let mut found: SmallVec<[usize; 8]> = SmallVec::new();

    for (seed, feature) in features.iter().enumerate() {
        if claimed[seed] {
            continue;
        }
        let p = feature.position();
        found.clear();
        source.visit_rect(Rect::new(p.x - d, p.y - d, p.x + d, p.y + d), |slot, _| {
            if !claimed[slot] {
                found.push(slot);
            }
        });
        if !found.contains(&seed) {
            found.push(seed);
        }
        found.sort_unstable();

        let mut sum = Vec2::ZERO;
        let mut members = SmallVec::with_capacity(found.len());
        for &slot in &found {
            claimed[slot] = true;
            let member = &features[slot];
            sum += member.position().to_vec2();
            members.push(member.id());
        }
        let n = members.len() as f64;
        groups.push(ClusterGroup {
            centroid: (sum / n).to_point(),
            members,
        });
    }
    groups
}

/// Inputs the cached groups were computed from.
///
/// Resolution enters only through the world distance, which is always finite,
/// so equal inputs always compare equal.
#[derive(Clone, Copy, Debug, PartialEq)]
struct ClusterKey {
    source: SourceId,
    revision: u64,
    world_distance: f64,
}

/// Cluster transform over a point source, cached per source revision and resolution.
#[derive(Clone, Debug, Default)]
pub struct ClusterSource {
    options: ClusterOptions,
    key: Option<ClusterKey>,
    groups: Vec<ClusterGroup>,
}

impl ClusterSource {
    /// Creates a cluster transform with the given options.
    #[must_use]
    pub fn new(options: ClusterOptions) -> Self {
        Self {
            options,
            key: None,
            groups: Vec::new(),
        }
    }

    /// Returns the clustering options.
    #[must_use]
    pub fn options(&self) -> &ClusterOptions {
        &self.options
    }

    /// Replaces the options and drops cached groups.
    pub fn set_options(&mut self, options: ClusterOptions) {
        self.options = options;
        self.key = None;
    }

    /// Returns `true` if cached groups do not reflect `source` at `resolution`.
    #[must_use]
    pub fn is_stale<B: Backend>(&self, source: &PointSource<B>, resolution: f64) -> bool {
        self.key != Some(self.key_for(source, resolution))
    }

    /// Recomputes groups if needed; returns `true` when it did.
    pub fn refresh<B: Backend>(&mut self, source: &PointSource<B>, resolution: f64) -> bool {
        if !self.is_stale(source, resolution) {
            return false;
        }
        self.groups = cluster_points(source, resolution, &self.options);
        self.key = Some(self.key_for(source, resolution));
        tracing::trace!(
            points = source.len(),
            groups = self.groups.len(),
            resolution,
            "clusters recomputed"
        );
        true
    }

    /// Returns groups for `source` at `resolution`, recomputing only when stale.
    pub fn groups<B: Backend>(&mut self, source: &PointSource<B>, resolution: f64) -> &[ClusterGroup] {
        self.refresh(source, resolution);
        &self.groups
    }

    /// Returns the most recently computed groups without refreshing.
    #[must_use]
    pub fn cached(&self) -> &[ClusterGroup] {
        &self.groups
    }

    fn key_for<B: Backend>(&self, source: &PointSource<B>, resolution: f64) -> ClusterKey {
        ClusterKey {
            source: source.id(),
            revision: source.revision(),
            world_distance: self.options.world_distance(resolution),
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use kurbo::Point;

    use super::{ClusterOptions, ClusterSource, cluster_points};
    use crate::source::PointSource;

    #[test]
    fn nearby_points_share_a_group() {
        let mut source = PointSource::new();
        source.add_point(Point::new(100.0, 100.0));
        source.add_point(Point::new(110.0, 105.0));
        source.add_point(Point::new(95.0, 92.0));
        source.add_point(Point::new(500.0, 500.0));

        let groups = cluster_points(&source, 1.0, &ClusterOptions::default());
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].len(), 3);
        assert_eq!(groups[1].len(), 1);
        let c = groups[0].centroid();
        assert!((c.x - 305.0 / 3.0).abs() < 1e-9);
        assert!((c.y - 99.0).abs() < 1e-9);
        assert_eq!(groups[1].centroid(), Point::new(500.0, 500.0));
    }

    #[test]
    fn zooming_in_splits_clusters() {
        let mut source = PointSource::new();
        source.add_point(Point::new(0.0, 0.0));
        source.add_point(Point::new(15.0, 0.0));

        let opts = ClusterOptions::default();
        assert_eq!(cluster_points(&source, 1.0, &opts).len(), 1);
        assert_eq!(cluster_points(&source, 0.5, &opts).len(), 2);
        assert_eq!(cluster_points(&source, 2.5, &opts).len(), 1);
    }

    #[test]
    fn zero_distance_keeps_points_apart_but_merges_duplicates() {
        let mut source = PointSource::new();
        source.add_point(Point::new(1.0, 1.0));
        source.add_point(Point::new(1.0, 1.0));
        source.add_point(Point::new(2.0, 1.0));
        let groups = cluster_points(&source, 1.0, &ClusterOptions { distance: 0.0 });
        let sizes: Vec<usize> = groups.iter().map(|g| g.len()).collect();
        assert_eq!(sizes, [2, 1]);
    }

    #[test]
    fn groups_partition_the_source() {
        let mut source = PointSource::with_cell_size(16.0);
        let mut seed = 0x2545_F491_u32;
        for _ in 0..500 {
            // xorshift for a deterministic scatter.
            seed ^= seed << 13;
            seed ^= seed >> 17;
            seed ^= seed << 5;
            let x = f64::from(seed % 1000);
            let y = f64::from((seed / 1000) % 700);
            source.add_point(Point::new(x, y));
        }
        for resolution in [0.5, 1.0, 3.0, 40.0] {
            let groups = cluster_points(&source, resolution, &ClusterOptions::default());
            let mut seen: Vec<u64> = groups
                .iter()
                .flat_map(|g| g.members().iter().map(|id| id.get()))
                .collect();
            assert!(groups.iter().all(|g| !g.is_empty()));
            seen.sort_unstable();
            let expected: Vec<u64> = (1..=500).collect();
            assert_eq!(seen, expected, "every point exactly once at resolution {resolution}");
        }
    }

    #[test]
    fn cluster_source_recomputes_only_when_stale() {
        let mut source = PointSource::new();
        source.add_point(Point::new(0.0, 0.0));
        let mut clusters = ClusterSource::new(ClusterOptions::default());

        assert!(clusters.refresh(&source, 1.0));
        assert!(!clusters.refresh(&source, 1.0));
        assert!(clusters.refresh(&source, 2.0), "resolution change re-clusters");

        source.add_point(Point::new(1.0, 1.0));
        assert!(clusters.is_stale(&source, 2.0));
        assert_eq!(clusters.groups(&source, 2.0).len(), 1);
        assert_eq!(clusters.cached()[0].len(), 2);
    }

    #[test]
    fn unusable_resolution_is_not_always_stale() {
        let mut source = PointSource::new();
        source.add_point(Point::new(0.0, 0.0));
        let mut clusters = ClusterSource::new(ClusterOptions::default());

        assert!(clusters.refresh(&source, f64::NAN));
        assert!(!clusters.refresh(&source, f64::NAN), "NaN resolution reuses groups");
        assert!(!clusters.refresh(&source, f64::INFINITY));
        assert!(clusters.refresh(&source, 1.0));
    }
}
