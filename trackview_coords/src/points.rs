// Copyright 2025 the Trackview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Point-set snapshots with a mutation revision counter.

use alloc::vec::Vec;
use core::fmt;

use hashbrown::HashMap;
use kurbo::{Point, Rect};

/// Identifier of a tracked point, assigned by the collaborator that owns the data.
///
/// Identifiers are ordered; spatial queries break distance ties by the lowest id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PointId(pub u32);

impl fmt::Display for PointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A single tracked point: an identifier and its position in data space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrackedPoint {
    /// Stable identifier.
    pub id: PointId,
    /// Position in data space.
    pub pos: Point,
}

impl TrackedPoint {
    /// Creates a tracked point.
    #[must_use]
    pub const fn new(id: PointId, x: f64, y: f64) -> Self {
        Self {
            id,
            pos: Point::new(x, y),
        }
    }
}

/// Ordered collection of tracked points with a revision counter.
///
/// Every mutation increments [`PointSet::revision`], which downstream caches
/// (most notably the spatial index) use to detect staleness. Identifiers are
/// unique within a set; inserting an existing id replaces that point in place.
#[derive(Clone, Debug, Default)]
pub struct PointSet {
    points: Vec<TrackedPoint>,
    slots: HashMap<PointId, usize>,
    revision: u64,
}

impl PointSet {
    /// Creates an empty point set at revision zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a point set from the given points.
    ///
    /// Later duplicates of an id replace earlier ones while keeping the
    /// position of the first occurrence.
    #[must_use]
    pub fn from_points(points: impl IntoIterator<Item = TrackedPoint>) -> Self {
        let mut set = Self::new();
        set.fill(points);
        set
    }

    /// Current revision. Incremented by every mutation.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Number of points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns `true` if the set holds no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Points in insertion order.
    #[must_use]
    pub fn as_slice(&self) -> &[TrackedPoint] {
        &self.points
    }

    /// Iterates over points in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &TrackedPoint> + '_ {
        self.points.iter()
    }

    /// Looks up a point by id.
    #[must_use]
    pub fn get(&self, id: PointId) -> Option<&TrackedPoint> {
        self.slots.get(&id).map(|&i| &self.points[i])
    }

    /// Returns the data-space position of a point, if present.
    #[must_use]
    pub fn position(&self, id: PointId) -> Option<Point> {
        self.get(id).map(|p| p.pos)
    }

    /// Returns `true` if a point with this id exists.
    #[must_use]
    pub fn contains(&self, id: PointId) -> bool {
        self.slots.contains_key(&id)
    }

    /// Replaces the whole contents (bulk load). Bumps the revision once.
    pub fn replace(&mut self, points: impl IntoIterator<Item = TrackedPoint>) {
        self.points.clear();
        self.slots.clear();
        self.fill(points);
        self.revision += 1;
    }

    /// Inserts a point, returning the previous point with the same id.
    pub fn insert(&mut self, point: TrackedPoint) -> Option<TrackedPoint> {
        self.revision += 1;
        if let Some(&i) = self.slots.get(&point.id) {
            Some(core::mem::replace(&mut self.points[i], point))
        } else {
            self.slots.insert(point.id, self.points.len());
            self.points.push(point);
            None
        }
    }

    /// Removes a point, preserving the order of the remaining points.
    pub fn remove(&mut self, id: PointId) -> Option<TrackedPoint> {
        let i = self.slots.remove(&id)?;
        let removed = self.points.remove(i);
        for p in &self.points[i..] {
            if let Some(slot) = self.slots.get_mut(&p.id) {
                *slot -= 1;
            }
        }
        self.revision += 1;
        Some(removed)
    }

    /// Moves a point to a new data-space position.
    ///
    /// Returns the previous position, or `None` (without bumping the revision)
    /// if the id is unknown.
    pub fn set_position(&mut self, id: PointId, pos: Point) -> Option<Point> {
        let &i = self.slots.get(&id)?;
        let old = core::mem::replace(&mut self.points[i].pos, pos);
        self.revision += 1;
        Some(old)
    }

    /// Bounding box of all points in data space, or `None` when empty.
    #[must_use]
    pub fn bounds(&self) -> Option<Rect> {
        let mut iter = self.points.iter();
        let first = iter.next()?;
        let seed = Rect::from_points(first.pos, first.pos);
        Some(iter.fold(seed, |r, p| r.union_pt(p.pos)))
    }

    fn fill(&mut self, points: impl IntoIterator<Item = TrackedPoint>) {
        for point in points {
            if let Some(&i) = self.slots.get(&point.id) {
                self.points[i] = point;
            } else {
                self.slots.insert(point.id, self.points.len());
                self.points.push(point);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn pt(id: u32, x: f64, y: f64) -> TrackedPoint {
        TrackedPoint::new(PointId(id), x, y)
    }

    #[test]
    fn mutations_bump_revision() {
        let mut set = PointSet::new();
        assert_eq!(set.revision(), 0);
        set.insert(pt(1, 0.0, 0.0));
        assert_eq!(set.revision(), 1);
        set.set_position(PointId(1), Point::new(3.0, 4.0));
        assert_eq!(set.revision(), 2);
        set.remove(PointId(1));
        assert_eq!(set.revision(), 3);
        set.replace(vec![pt(2, 1.0, 1.0), pt(3, 2.0, 2.0)]);
        assert_eq!(set.revision(), 4);
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn unknown_id_is_not_a_mutation() {
        let mut set = PointSet::from_points([pt(1, 0.0, 0.0)]);
        let rev = set.revision();
        assert!(set.set_position(PointId(9), Point::ORIGIN).is_none());
        assert!(set.remove(PointId(9)).is_none());
        assert_eq!(set.revision(), rev);
    }

    #[test]
    fn remove_keeps_order_and_lookup() {
        let mut set = PointSet::from_points([pt(1, 1.0, 0.0), pt(2, 2.0, 0.0), pt(3, 3.0, 0.0)]);
        set.remove(PointId(1));
        let ids: Vec<_> = set.iter().map(|p| p.id.0).collect();
        assert_eq!(ids, vec![2, 3]);
        assert_eq!(set.position(PointId(3)), Some(Point::new(3.0, 0.0)));
    }

    #[test]
    fn duplicate_ids_replace_in_place() {
        let set = PointSet::from_points([pt(1, 1.0, 0.0), pt(2, 2.0, 0.0), pt(1, 5.0, 5.0)]);
        assert_eq!(set.len(), 2);
        assert_eq!(set.as_slice()[0], pt(1, 5.0, 5.0));
    }

    #[test]
    fn bounds_cover_all_points() {
        assert!(PointSet::new().bounds().is_none());
        let set = PointSet::from_points([pt(1, -1.0, 2.0), pt(2, 4.0, -3.0)]);
        assert_eq!(set.bounds(), Some(Rect::new(-1.0, -3.0, 4.0, 2.0)));
    }
}
