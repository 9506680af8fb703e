// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Tolerance-based point deduplication
//!
//! The registry hashes each point on its coordinates rounded to six decimal
//! places. Two points within tolerance can round into adjacent cells, so a
//! lookup probes the cell and its direct neighbours (9 cells in plan, 27 in
//! space) and compares candidates with [`RegistryPoint::approx_eq`]. Lookups
//! stay O(1) amortized regardless of registry size.

use crate::{Point2D, Point3D};
use rustc_hash::FxHashMap;
use std::fmt;
use std::hash::Hash;

/// Rounding scale applied to coordinates before hashing
const KEY_SCALE: f64 = 1e6;

/// Registry-issued point identifier, numbered from 1 in insertion order
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PointId(pub u32);

impl fmt::Display for PointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Coordinate type that can be stored in a [`PointRegistry`]
pub trait RegistryPoint: Copy {
    /// Rounded hash cell
    type Key: Copy + Eq + Hash;

    fn key(&self) -> Self::Key;

    /// The cell itself and every directly adjacent cell
    fn neighbourhood(key: Self::Key) -> Vec<Self::Key>;

    fn approx_eq(&self, other: &Self) -> bool;
}

#[inline]
fn cell(v: f64) -> i64 {
    (v * KEY_SCALE).round() as i64
}

impl RegistryPoint for Point2D {
    type Key = (i64, i64);

    fn key(&self) -> Self::Key {
        (cell(self.x), cell(self.y))
    }

    fn neighbourhood((x, y): Self::Key) -> Vec<Self::Key> {
        let mut keys = Vec::with_capacity(9);
        for dx in -1..=1 {
            for dy in -1..=1 {
                keys.push((x + dx, y + dy));
            }
        }
        keys
    }

    fn approx_eq(&self, other: &Self) -> bool {
        Point2D::approx_eq(self, other)
    }
}

impl RegistryPoint for Point3D {
    type Key = (i64, i64, i64);

    fn key(&self) -> Self::Key {
        (cell(self.x), cell(self.y), cell(self.z))
    }

    fn neighbourhood((x, y, z): Self::Key) -> Vec<Self::Key> {
        let mut keys = Vec::with_capacity(27);
        for dx in -1..=1 {
            for dy in -1..=1 {
                for dz in -1..=1 {
                    keys.push((x + dx, y + dy, z + dz));
                }
            }
        }
        keys
    }

    fn approx_eq(&self, other: &Self) -> bool {
        Point3D::approx_eq(self, other)
    }
}

/// Pass-scoped map from coordinates to deduplicated point ids
///
/// The first point inserted within tolerance of a location defines that
/// location; later equal points return the existing id.
#[derive(Debug)]
pub struct PointRegistry<P: RegistryPoint> {
    points: Vec<P>,
    cells: FxHashMap<P::Key, Vec<u32>>,
}

impl<P: RegistryPoint> Default for PointRegistry<P> {
    fn default() -> Self {
        Self {
            points: Vec::new(),
            cells: FxHashMap::default(),
        }
    }
}

impl<P: RegistryPoint> PointRegistry<P> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Id of an already registered point within tolerance
    pub fn find(&self, point: &P) -> Option<PointId> {
        P::neighbourhood(point.key())
            .into_iter()
            .filter_map(|key| self.cells.get(&key))
            .flatten()
            .copied()
            .filter(|&idx| self.points[idx as usize].approx_eq(point))
            .min()
            .map(|idx| PointId(idx + 1))
    }

    /// Return the id of an equal point, registering `point` if there is none
    pub fn get_or_create_id(&mut self, point: P) -> PointId {
        if let Some(id) = self.find(&point) {
            return id;
        }
        let idx = self.points.len() as u32;
        self.points.push(point);
        self.cells.entry(point.key()).or_default().push(idx);
        PointId(idx + 1)
    }

    pub fn get(&self, id: PointId) -> Option<&P> {
        (id.0 as usize)
            .checked_sub(1)
            .and_then(|idx| self.points.get(idx))
    }

    /// All registered points in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (PointId, &P)> + '_ {
        self.points
            .iter()
            .enumerate()
            .map(|(idx, p)| (PointId(idx as u32 + 1), p))
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Forget every point; ids restart at 1
    pub fn clear(&mut self) {
        self.points.clear();
        self.cells.clear();
    }
}
