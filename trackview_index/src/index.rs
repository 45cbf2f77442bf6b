// Copyright 2025 the Trackview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public `PointIndex` API and its versioned build state.

use alloc::vec::Vec;

use hashbrown::HashMap;
use kurbo::{Point, Rect};
use trackview_coords::{PointId, PointSet};
use trackview_view::Transform;

use crate::backend::Backend;
use crate::backends::Grid;
use crate::config::IndexConfig;

/// What an index was built against: a point-set revision and a transform.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IndexTag {
    /// [`PointSet::revision`] at build time.
    pub revision: u64,
    /// The transform used to place points on screen.
    pub transform: Transform,
}

/// Coarse build progress, for diagnostics.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IndexStatus {
    /// Nothing has been indexed yet.
    Empty,
    /// A rebuild is in progress.
    Building {
        /// Points indexed so far.
        indexed: usize,
        /// Points in the set being indexed.
        total: usize,
    },
    /// The index matches its tag.
    Ready,
}

#[derive(Clone, Copy, Debug)]
enum BuildState {
    Empty,
    Building {
        tag: IndexTag,
        cursor: usize,
        total: usize,
    },
    Ready { tag: IndexTag },
}

/// Screen-space index over a [`PointSet`] for hit testing and range queries.
///
/// The index is tagged with the [`IndexTag`] it was built against. Every
/// query takes the current point set and transform; if either differs from
/// the tag, the index is rebuilt from scratch before answering. Rebuilding
/// is cooperative: at most [`IndexConfig::rebuild_budget`] points are placed
/// per query, and a query arriving before the rebuild finishes is answered
/// by a linear scan instead.
///
/// Single-point drags can be applied incrementally with
/// [`PointIndex::apply_move`] as long as the transform is unchanged.
///
/// An index follows one point set: revisions of unrelated sets are not
/// comparable, so call [`PointIndex::clear`] before switching sets.
#[derive(Debug)]
pub struct PointIndex<B: Backend = Grid> {
    config: IndexConfig,
    backend: B,
    ids: Vec<PointId>,
    slots: HashMap<PointId, usize>,
    state: BuildState,
    rebuilds: u64,
}

impl PointIndex<Grid> {
    /// Creates an empty grid-backed index sized for `config.hit_radius`.
    #[must_use]
    pub fn new(config: IndexConfig) -> Self {
        Self::with_backend(config, Grid::new(config.cell_size()))
    }
}

impl Default for PointIndex<Grid> {
    fn default() -> Self {
        Self::new(IndexConfig::default())
    }
}

impl<B: Backend> PointIndex<B> {
    /// Creates an empty index using an explicit backend instance.
    pub fn with_backend(config: IndexConfig, mut backend: B) -> Self {
        backend.clear();
        Self {
            config,
            backend,
            ids: Vec::new(),
            slots: HashMap::new(),
            state: BuildState::Empty,
            rebuilds: 0,
        }
    }

    /// The configuration this index was created with.
    #[must_use]
    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    /// The backend, for inspection.
    #[must_use]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Build progress.
    #[must_use]
    pub fn status(&self) -> IndexStatus {
        match self.state {
            BuildState::Empty => IndexStatus::Empty,
            BuildState::Building { cursor, total, .. } => IndexStatus::Building {
                indexed: cursor,
                total,
            },
            BuildState::Ready { .. } => IndexStatus::Ready,
        }
    }

    /// The tag of the completed build, if any.
    #[must_use]
    pub fn tag(&self) -> Option<IndexTag> {
        match self.state {
            BuildState::Ready { tag } => Some(tag),
            _ => None,
        }
    }

    /// Number of completed rebuilds since creation.
    #[must_use]
    pub fn rebuild_count(&self) -> u64 {
        self.rebuilds
    }

    /// Returns `true` if the index is complete and built against exactly
    /// this point-set revision and transform.
    #[must_use]
    pub fn is_current(&self, points: &PointSet, transform: &Transform) -> bool {
        self.tag() == Some(tag_of(points, transform))
    }

    /// Brings the index up to date, within the rebuild budget.
    ///
    /// Returns `true` if the index is ready to answer queries for this point
    /// set and transform.
    pub fn sync(&mut self, points: &PointSet, transform: &Transform) -> bool {
        let tag = tag_of(points, transform);
        match self.state {
            BuildState::Ready { tag: t } if t == tag => return true,
            BuildState::Building { tag: t, .. } if t == tag => {}
            _ => self.start(tag, points.len()),
        }
        self.advance(points, transform, self.config.rebuild_budget)
    }

    /// Rebuilds the whole index now, ignoring the budget and the current tag.
    pub fn rebuild(&mut self, points: &PointSet, transform: &Transform) {
        self.start(tag_of(points, transform), points.len());
        self.advance(points, transform, usize::MAX);
    }

    /// Drops all indexed points.
    pub fn clear(&mut self) {
        self.backend.clear();
        self.ids.clear();
        self.slots.clear();
        self.state = BuildState::Empty;
    }

    /// Closest point within `max_radius` screen pixels of `at`.
    ///
    /// Ties are broken by the lowest [`PointId`]. Returns `None` for an empty
    /// set, a negative radius, or when nothing is close enough.
    pub fn query_nearest(
        &mut self,
        points: &PointSet,
        transform: &Transform,
        at: Point,
        max_radius: f64,
    ) -> Option<PointId> {
        if max_radius.is_nan() || max_radius < 0.0 || !at.is_finite() {
            return None;
        }
        let r2 = max_radius * max_radius;
        let mut best: Option<(f64, PointId)> = None;
        let mut consider = |id: PointId, pos: Point| {
            let d2 = (pos - at).hypot2();
            if d2 > r2 {
                return;
            }
            let closer = match best {
                None => true,
                Some((bd, bid)) => d2 < bd || (d2 <= bd && id < bid),
            };
            if closer {
                best = Some((d2, id));
            }
        };

        if self.sync(points, transform) {
            let ids = &self.ids;
            self.backend.visit_near(at, max_radius, |slot, pos| {
                if let Some(&id) = ids.get(slot) {
                    consider(id, pos);
                }
            });
        } else {
            tracing::trace!(len = points.len(), "nearest query falling back to linear scan");
            for p in points.iter() {
                consider(p.id, transform.data_to_screen(p.pos));
            }
        }
        best.map(|(_, id)| id)
    }

    /// Nearest point within the configured hit radius.
    pub fn hit_test(
        &mut self,
        points: &PointSet,
        transform: &Transform,
        at: Point,
    ) -> Option<PointId> {
        let radius = self.config.hit_radius;
        self.query_nearest(points, transform, at, radius)
    }

    /// Points whose screen position lies inside `rect`, edges included.
    ///
    /// The rectangle may be given with its corners in any order (as a
    /// rubber band drag produces it). Ids are returned sorted and unique.
    pub fn query_range(
        &mut self,
        points: &PointSet,
        transform: &Transform,
        rect: Rect,
    ) -> Vec<PointId> {
        let rect = rect.abs();
        let mut out = Vec::new();
        if self.sync(points, transform) {
            let ids = &self.ids;
            self.backend.visit_rect(rect, |slot, _| {
                if let Some(&id) = ids.get(slot) {
                    out.push(id);
                }
            });
        } else {
            tracing::trace!(len = points.len(), "range query falling back to linear scan");
            for p in points.iter() {
                let s = transform.data_to_screen(p.pos);
                if rect.x0 <= s.x && s.x <= rect.x1 && rect.y0 <= s.y && s.y <= rect.y1 {
                    out.push(p.id);
                }
            }
        }
        out.sort_unstable();
        out.dedup();
        out
    }

    /// Applies a single-point move without a full rebuild.
    ///
    /// `previous_revision` is the revision of `points` immediately before the
    /// move, and `points` must already contain the new position. The move is
    /// applied only when it is the sole mutation since the index was last
    /// current: the index is complete for `previous_revision` and this exact
    /// transform, and `points` is exactly one revision further. Otherwise
    /// nothing happens, `false` is returned, and the next query rebuilds.
    pub fn apply_move(
        &mut self,
        id: PointId,
        points: &PointSet,
        transform: &Transform,
        previous_revision: u64,
    ) -> bool {
        let BuildState::Ready { tag } = &mut self.state else {
            return false;
        };
        if tag.revision != previous_revision
            || points.revision() != previous_revision.wrapping_add(1)
            || tag.transform != *transform
            || self.ids.len() != points.len()
        {
            return false;
        }
        let (Some(&slot), Some(pos)) = (self.slots.get(&id), points.position(id)) else {
            return false;
        };
        if self.ids.get(slot) != Some(&id) {
            return false;
        }
        self.backend.update(slot, transform.data_to_screen(pos));
        tag.revision = points.revision();
        true
    }

    /// Verifies that every point of `points` is indexed exactly once, at its
    /// screen position under `transform`, and that the backend's own
    /// bookkeeping is consistent.
    #[must_use]
    pub fn check_invariants(&self, points: &PointSet, transform: &Transform) -> bool {
        if !self.is_current(points, transform) || self.ids.len() != points.len() {
            return false;
        }
        let placed = points.iter().all(|p| {
            self.slots.get(&p.id).is_some_and(|&slot| {
                self.ids.get(slot) == Some(&p.id)
                    && self.backend.position(slot) == Some(transform.data_to_screen(p.pos))
            })
        });
        placed && self.backend.is_consistent()
    }

    fn start(&mut self, tag: IndexTag, total: usize) {
        tracing::debug!(revision = tag.revision, total, "point index rebuild started");
        self.backend.clear();
        self.ids.clear();
        self.ids.reserve(total);
        self.slots.clear();
        self.state = BuildState::Building {
            tag,
            cursor: 0,
            total,
        };
    }

    fn advance(&mut self, points: &PointSet, transform: &Transform, budget: usize) -> bool {
        let BuildState::Building { tag, cursor, .. } = self.state else {
            return matches!(self.state, BuildState::Ready { .. });
        };
        let slice = points.as_slice();
        let end = cursor.saturating_add(budget).min(slice.len());
        for (slot, p) in slice.iter().enumerate().take(end).skip(cursor) {
            self.backend.insert(slot, transform.data_to_screen(p.pos));
            self.ids.push(p.id);
            self.slots.insert(p.id, slot);
        }
        if end == slice.len() {
            self.state = BuildState::Ready { tag };
            self.rebuilds += 1;
            tracing::debug!(revision = tag.revision, total = end, "point index rebuild finished");
            true
        } else {
            self.state = BuildState::Building {
                tag,
                cursor: end,
                total: slice.len(),
            };
            false
        }
    }
}

fn tag_of(points: &PointSet, transform: &Transform) -> IndexTag {
    IndexTag {
        revision: points.revision(),
        transform: *transform,
    }
}
