// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Core types for structural model representation
//!
//! This module defines the identifiers, coordinates and typed enumerations
//! shared by every entity of the canonical model.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Coordinate tolerance used for point identity
pub const POINT_TOLERANCE: f64 = 1e-6;

/// Sentinel name used when a reference cannot be resolved and no substitute exists
pub const UNKNOWN: &str = "Unknown";

/// Type-safe entity identifier
///
/// Ids are scoped per category (e.g. `BEAM-3`, `LEVEL-1`) when generated by
/// [`IdAllocator`](crate::IdAllocator); host adapters may supply any unique string.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize, Default, PartialOrd, Ord)]
pub struct Id(pub String);

impl Id {
    /// Create an id from any string
    pub fn new(id: impl Into<String>) -> Self {
        Id(id.into())
    }

    /// The placeholder id handed out when a reference cannot be resolved
    pub fn unknown() -> Self {
        Id(UNKNOWN.to_string())
    }

    /// Check if this is the unresolved placeholder
    pub fn is_unknown(&self) -> bool {
        self.0 == UNKNOWN
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Id {
    fn from(id: &str) -> Self {
        Id(id.to_string())
    }
}

impl From<String> for Id {
    fn from(id: String) -> Self {
        Id(id)
    }
}

/// Plan coordinate in model length units
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Tolerance-based equality (`|dx| < 1e-6 && |dy| < 1e-6`)
    pub fn approx_eq(&self, other: &Point2D) -> bool {
        (self.x - other.x).abs() < POINT_TOLERANCE && (self.y - other.y).abs() < POINT_TOLERANCE
    }

    /// Lift to 3D at the given elevation
    pub fn at_elevation(&self, z: f64) -> Point3D {
        Point3D::new(self.x, self.y, z)
    }
}

/// Spatial coordinate in model length units
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Point3D {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3D {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Tolerance-based equality on all three axes
    pub fn approx_eq(&self, other: &Point3D) -> bool {
        (self.x - other.x).abs() < POINT_TOLERANCE
            && (self.y - other.y).abs() < POINT_TOLERANCE
            && (self.z - other.z).abs() < POINT_TOLERANCE
    }

    /// Drop the elevation
    pub fn plan(&self) -> Point2D {
        Point2D::new(self.x, self.y)
    }
}

/// Axis-aligned plan bounding box
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox2D {
    pub min: Point2D,
    pub max: Point2D,
}

impl BoundingBox2D {
    /// Bounding box of a set of points, `None` when empty
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Point2D>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = *iter.next()?;
        let mut bbox = Self {
            min: first,
            max: first,
        };
        for p in iter {
            bbox.include(p);
        }
        Some(bbox)
    }

    /// Grow to include a point
    pub fn include(&mut self, p: &Point2D) {
        self.min.x = self.min.x.min(p.x);
        self.min.y = self.min.y.min(p.y);
        self.max.x = self.max.x.max(p.x);
        self.max.y = self.max.y.max(p.y);
    }
}

/// Material family
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MaterialType {
    Steel,
    Concrete,
    Wood,
    Masonry,
    /// Any other family, keeps the original name
    Other(String),
}

impl MaterialType {
    /// Parse an E2K material type name (case-insensitive)
    pub fn parse(s: &str) -> Self {
        match s.trim().to_uppercase().as_str() {
            "STEEL" => MaterialType::Steel,
            "CONCRETE" => MaterialType::Concrete,
            "WOOD" | "TIMBER" => MaterialType::Wood,
            "MASONRY" => MaterialType::Masonry,
            _ => MaterialType::Other(s.trim().to_string()),
        }
    }

    /// E2K spelling
    pub fn as_e2k(&self) -> &str {
        match self {
            MaterialType::Steel => "Steel",
            MaterialType::Concrete => "Concrete",
            MaterialType::Wood => "Wood",
            MaterialType::Masonry => "Masonry",
            MaterialType::Other(s) => s,
        }
    }
}

impl Default for MaterialType {
    fn default() -> Self {
        MaterialType::Other("Other".to_string())
    }
}

impl FromStr for MaterialType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl fmt::Display for MaterialType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_e2k())
    }
}

/// Diaphragm behaviour
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DiaphragmType {
    #[default]
    Rigid,
    SemiRigid,
    Flexible,
}

impl DiaphragmType {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().replace(['-', ' '], "").as_str() {
            "RIGID" => Some(DiaphragmType::Rigid),
            "SEMIRIGID" => Some(DiaphragmType::SemiRigid),
            "FLEXIBLE" => Some(DiaphragmType::Flexible),
            _ => None,
        }
    }

    pub fn as_e2k(&self) -> &'static str {
        match self {
            DiaphragmType::Rigid => "RIGID",
            DiaphragmType::SemiRigid => "SEMIRIGID",
            DiaphragmType::Flexible => "FLEXIBLE",
        }
    }
}

/// Load pattern type
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LoadType {
    #[default]
    Dead,
    SuperDead,
    Live,
    ReducibleLive,
    RoofLive,
    Snow,
    Wind,
    Seismic,
    Other,
}

impl LoadType {
    /// Parse both the current spelling ("Super Dead") and the legacy
    /// upper-case one ("SUPERDEAD", "QUAKE")
    pub fn parse(s: &str) -> Self {
        match s.trim().to_uppercase().replace(' ', "").as_str() {
            "DEAD" => LoadType::Dead,
            "SUPERDEAD" => LoadType::SuperDead,
            "LIVE" => LoadType::Live,
            "REDUCIBLELIVE" | "REDUCELIVE" => LoadType::ReducibleLive,
            "ROOFLIVE" => LoadType::RoofLive,
            "SNOW" => LoadType::Snow,
            "WIND" => LoadType::Wind,
            "SEISMIC" | "QUAKE" => LoadType::Seismic,
            _ => LoadType::Other,
        }
    }

    pub fn as_e2k(&self) -> &'static str {
        match self {
            LoadType::Dead => "Dead",
            LoadType::SuperDead => "Super Dead",
            LoadType::Live => "Live",
            LoadType::ReducibleLive => "Reducible Live",
            LoadType::RoofLive => "Roof Live",
            LoadType::Snow => "Snow",
            LoadType::Wind => "Wind",
            LoadType::Seismic => "Seismic",
            LoadType::Other => "Other",
        }
    }

    /// Live-type patterns fill the live slot of a surface load
    pub fn is_live(&self) -> bool {
        matches!(
            self,
            LoadType::Live | LoadType::ReducibleLive | LoadType::RoofLive
        )
    }
}

/// Load combination rule
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CombinationType {
    #[default]
    LinearAdd,
    Envelope,
    AbsoluteAdd,
    Srss,
    RangeAdd,
}

impl CombinationType {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().replace(' ', "").as_str() {
            "LINEARADD" | "ADD" => Some(CombinationType::LinearAdd),
            "ENVELOPE" | "ENVE" => Some(CombinationType::Envelope),
            "ABSOLUTEADD" | "ABS" => Some(CombinationType::AbsoluteAdd),
            "SRSS" => Some(CombinationType::Srss),
            "RANGEADD" | "RANGE" => Some(CombinationType::RangeAdd),
            _ => None,
        }
    }

    pub fn as_e2k(&self) -> &'static str {
        match self {
            CombinationType::LinearAdd => "Linear Add",
            CombinationType::Envelope => "Envelope",
            CombinationType::AbsoluteAdd => "Absolute Add",
            CombinationType::Srss => "SRSS",
            CombinationType::RangeAdd => "Range Add",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_approx_eq() {
        let a = Point2D::new(1.0, 2.0);
        assert!(a.approx_eq(&Point2D::new(1.0 + 5e-7, 2.0 - 5e-7)));
        assert!(!a.approx_eq(&Point2D::new(1.0 + 2e-6, 2.0)));

        let b = a.at_elevation(120.0);
        assert!(b.approx_eq(&Point3D::new(1.0, 2.0, 120.0 + 1e-7)));
        assert!(!b.approx_eq(&Point3D::new(1.0, 2.0, 121.0)));
    }

    #[test]
    fn test_bounding_box() {
        let pts = [
            Point2D::new(0.0, 5.0),
            Point2D::new(-3.0, 1.0),
            Point2D::new(10.0, -2.0),
        ];
        let bbox = BoundingBox2D::from_points(pts.iter()).unwrap();
        assert_eq!(bbox.min, Point2D::new(-3.0, -2.0));
        assert_eq!(bbox.max, Point2D::new(10.0, 5.0));
        assert!(BoundingBox2D::from_points(std::iter::empty()).is_none());
    }

    #[test]
    fn test_enum_spellings() {
        assert_eq!(MaterialType::parse("concrete"), MaterialType::Concrete);
        assert_eq!(
            MaterialType::parse("Rebar"),
            MaterialType::Other("Rebar".to_string())
        );
        assert_eq!(DiaphragmType::parse("SEMIRIGID"), Some(DiaphragmType::SemiRigid));
        assert_eq!(DiaphragmType::parse("Semi-Rigid"), Some(DiaphragmType::SemiRigid));
        assert_eq!(LoadType::parse("Super Dead"), LoadType::SuperDead);
        assert_eq!(LoadType::parse("QUAKE"), LoadType::Seismic);
        assert!(LoadType::parse("Reducible Live").is_live());
        assert_eq!(CombinationType::parse("ADD"), Some(CombinationType::LinearAdd));
        assert_eq!(CombinationType::Srss.as_e2k(), "SRSS");
    }

    #[test]
    fn test_unknown_id() {
        assert!(Id::unknown().is_unknown());
        assert_eq!(Id::from("BEAM-1").to_string(), "BEAM-1");
    }
}
