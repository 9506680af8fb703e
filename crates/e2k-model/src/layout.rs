// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Building layout: levels, floor types and grids

use crate::{Id, Point2D, POINT_TOLERANCE};
use serde::{Deserialize, Serialize};

/// A horizontal building elevation reference ("Story" in E2K)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Level {
    pub id: Id,
    /// Canonical name (a `StoryN` name is stored as `N`)
    pub name: String,
    /// Absolute elevation
    pub elevation: f64,
    /// Floor type shared with similar levels
    pub floor_type_id: Option<Id>,
}

impl Level {
    pub fn new(id: Id, name: impl Into<String>, elevation: f64) -> Self {
        Self {
            id,
            name: name.into(),
            elevation,
            floor_type_id: None,
        }
    }

    /// Set floor type
    pub fn with_floor_type(mut self, floor_type_id: Id) -> Self {
        self.floor_type_id = Some(floor_type_id);
        self
    }
}

/// Reusable per-elevation layout template
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FloorType {
    pub id: Id,
    pub name: String,
}

impl FloorType {
    pub fn new(id: Id, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Cartesian grid system grids belong to
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridSystem {
    pub id: Id,
    pub name: String,
    pub bubble_size: f64,
}

/// Axis an orthogonal grid line measures along
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GridAxis {
    /// Line of constant X
    X,
    /// Line of constant Y
    Y,
}

impl GridAxis {
    pub fn as_e2k(&self) -> &'static str {
        match self {
            GridAxis::X => "X",
            GridAxis::Y => "Y",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "X" => Some(GridAxis::X),
            "Y" => Some(GridAxis::Y),
            _ => None,
        }
    }
}

/// How a grid line sits in plan
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GridOrientation {
    Orthogonal { axis: GridAxis, coordinate: f64 },
    General,
}

/// Planar grid line
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    pub id: Id,
    /// Grid label
    pub name: String,
    /// Owning grid system name
    pub system: String,
    pub start: Point2D,
    pub end: Point2D,
    pub bubble_at_start: bool,
    pub bubble_at_end: bool,
}

impl Grid {
    /// Orthogonal when the endpoints share X or Y within tolerance
    pub fn orientation(&self) -> GridOrientation {
        if (self.start.x - self.end.x).abs() < POINT_TOLERANCE {
            GridOrientation::Orthogonal {
                axis: GridAxis::X,
                coordinate: self.start.x,
            }
        } else if (self.start.y - self.end.y).abs() < POINT_TOLERANCE {
            GridOrientation::Orthogonal {
                axis: GridAxis::Y,
                coordinate: self.start.y,
            }
        } else {
            GridOrientation::General
        }
    }

    /// Re-span an orthogonal grid between `from` and `to` along its length
    pub fn respan(&mut self, from: f64, to: f64) {
        match self.orientation() {
            GridOrientation::Orthogonal {
                axis: GridAxis::X,
                coordinate,
            } => {
                self.start = Point2D::new(coordinate, from);
                self.end = Point2D::new(coordinate, to);
            }
            GridOrientation::Orthogonal {
                axis: GridAxis::Y,
                coordinate,
            } => {
                self.start = Point2D::new(from, coordinate);
                self.end = Point2D::new(to, coordinate);
            }
            GridOrientation::General => {}
        }
    }
}

/// Levels, grids and floor types of a model
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelLayoutContainer {
    pub levels: Vec<Level>,
    pub floor_types: Vec<FloorType>,
    pub grid_systems: Vec<GridSystem>,
    pub grids: Vec<Grid>,
}

impl ModelLayoutContainer {
    /// Find a level by id
    pub fn level(&self, id: &Id) -> Option<&Level> {
        self.levels.iter().find(|l| &l.id == id)
    }

    /// Levels sorted bottom-up
    pub fn levels_ascending(&self) -> Vec<&Level> {
        let mut levels: Vec<&Level> = self.levels.iter().collect();
        levels.sort_by(|a, b| a.elevation.total_cmp(&b.elevation));
        levels
    }

    /// Lowest level, if any
    pub fn lowest_level(&self) -> Option<&Level> {
        self.levels
            .iter()
            .min_by(|a, b| a.elevation.total_cmp(&b.elevation))
    }

    /// Levels strictly above `base` up to and including `top`, bottom-up
    ///
    /// These are the stories a vertical element between the two levels
    /// is assigned on.
    pub fn levels_spanned(&self, base: &Level, top: &Level) -> Vec<&Level> {
        self.levels_ascending()
            .into_iter()
            .filter(|l| l.elevation > base.elevation && l.elevation <= top.elevation)
            .collect()
    }

    /// Find a floor type by id
    pub fn floor_type(&self, id: &Id) -> Option<&FloorType> {
        self.floor_types.iter().find(|f| &f.id == id)
    }
}
