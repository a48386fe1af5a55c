// Copyright 2025 the Pixmark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::sync::Arc;
use core::num::NonZeroUsize;

use hashbrown::HashMap;

use crate::options::ClusterStyleOptions;
use crate::style::Style;

/// Memoized cluster badge styles keyed by aggregation size.
///
/// Each distinct size gets exactly one [`Style`], built on first request and
/// returned as the same [`Arc`] on every later request, so renderers can
/// detect unchanged styles with [`Arc::ptr_eq`]. Entries are never evicted;
/// the key space is bounded by the number of points.
#[derive(Debug, Default)]
pub struct StyleCache {
    options: ClusterStyleOptions,
    entries: HashMap<NonZeroUsize, Arc<Style>>,
    lookups: u64,
    constructed: u64,
}

impl StyleCache {
    /// Creates an empty cache using the default badge options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty cache building badges from `options`.
    #[must_use]
    pub fn with_options(options: ClusterStyleOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// Returns the badge options used for new entries.
    #[must_use]
    pub fn options(&self) -> &ClusterStyleOptions {
        &self.options
    }

    /// Returns the style for a cluster of `count` features, building it on first use.
    ///
    /// A count of `1` styles an unclustered point.
    pub fn style_for(&mut self, count: NonZeroUsize) -> Arc<Style> {
        self.lookups += 1;
        let Self {
            options,
            entries,
            constructed,
            ..
        } = self;
        entries
            .entry(count)
            .or_insert_with(|| {
                *constructed += 1;
                Arc::new(options.build(count.get()))
            })
            .clone()
    }

    /// Returns the cached style for `count` without building one.
    #[must_use]
    pub fn get(&self, count: usize) -> Option<&Arc<Style>> {
        self.entries.get(&NonZeroUsize::new(count)?)
    }

    /// Number of distinct sizes cached.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing has been cached yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of [`StyleCache::style_for`] calls.
    #[must_use]
    pub fn lookups(&self) -> u64 {
        self.lookups
    }

    /// Number of styles actually built; equals [`StyleCache::len`].
    #[must_use]
    pub fn constructed(&self) -> u64 {
        self.constructed
    }
}
