// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Structural elements
//!
//! Elements reference levels and property entities by id and carry plan
//! geometry only; elevations come from the referenced levels.

use crate::{FrameModifiers, Id, Point2D};
use serde::{Deserialize, Serialize};

/// Element kind, shared by the exporter descriptors and the connectivity graph
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementKind {
    Column,
    Beam,
    Brace,
    Wall,
    Floor,
    IsolatedFooting,
}

impl ElementKind {
    /// Record type keyword on `LINE`/`AREA` statements
    pub fn record_keyword(&self) -> &'static str {
        match self {
            ElementKind::Column => "COLUMN",
            ElementKind::Beam => "BEAM",
            ElementKind::Brace => "BRACE",
            ElementKind::Wall => "WALL",
            ElementKind::Floor => "FLOOR",
            ElementKind::IsolatedFooting => "POINT",
        }
    }
}

/// Degree of freedom that can be released at a frame end
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ReleaseDof {
    P,
    V2,
    V3,
    T,
    M2,
    M3,
}

impl ReleaseDof {
    pub const ALL: [ReleaseDof; 6] = [
        ReleaseDof::P,
        ReleaseDof::V2,
        ReleaseDof::V3,
        ReleaseDof::T,
        ReleaseDof::M2,
        ReleaseDof::M3,
    ];

    pub fn as_e2k(&self) -> &'static str {
        match self {
            ReleaseDof::P => "P",
            ReleaseDof::V2 => "V2",
            ReleaseDof::V3 => "V3",
            ReleaseDof::T => "T",
            ReleaseDof::M2 => "M2",
            ReleaseDof::M3 => "M3",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        ReleaseDof::ALL.into_iter().find(|d| d.as_e2k() == s)
    }
}

/// Released degrees of freedom at the I and J ends of a frame member
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndReleases {
    pub i: Vec<ReleaseDof>,
    pub j: Vec<ReleaseDof>,
}

impl EndReleases {
    /// Moment releases at both ends (`M2I M3I M2J M3J`)
    pub fn pinned() -> Self {
        Self {
            i: vec![ReleaseDof::M2, ReleaseDof::M3],
            j: vec![ReleaseDof::M2, ReleaseDof::M3],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.i.is_empty() && self.j.is_empty()
    }

    pub fn is_pinned(&self) -> bool {
        let mut i = self.i.clone();
        let mut j = self.j.clone();
        i.sort();
        i.dedup();
        j.sort();
        j.dedup();
        i == [ReleaseDof::M2, ReleaseDof::M3] && j == [ReleaseDof::M2, ReleaseDof::M3]
    }

    /// Release string such as `"TI M2I M3J"`, I end first
    pub fn to_e2k(&self) -> String {
        let mut tokens = Vec::new();
        for (end, suffix) in [(&self.i, 'I'), (&self.j, 'J')] {
            let mut dofs = end.clone();
            dofs.sort();
            dofs.dedup();
            tokens.extend(dofs.iter().map(|d| format!("{}{}", d.as_e2k(), suffix)));
        }
        tokens.join(" ")
    }

    /// Parse a release string; `None` if any token is not a DOF/end pair
    pub fn parse(s: &str) -> Option<Self> {
        let mut releases = EndReleases::default();
        for token in s.split_whitespace() {
            let token = token.to_uppercase();
            if let Some(dof) = token.strip_suffix('I') {
                releases.i.push(ReleaseDof::parse(dof)?);
            } else if let Some(dof) = token.strip_suffix('J') {
                releases.j.push(ReleaseDof::parse(dof)?);
            } else {
                return None;
            }
        }
        Some(releases)
    }
}

/// Vertical column between two levels at a single plan location
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub id: Id,
    pub base_level_id: Id,
    pub top_level_id: Id,
    pub properties_id: Id,
    pub location: Point2D,
    /// Local axis rotation in degrees
    pub rotation: f64,
    pub modifiers: FrameModifiers,
    pub releases: EndReleases,
}

impl Column {
    pub fn new(
        id: Id,
        base_level_id: Id,
        top_level_id: Id,
        properties_id: Id,
        location: Point2D,
    ) -> Self {
        Self {
            id,
            base_level_id,
            top_level_id,
            properties_id,
            location,
            rotation: 0.0,
            modifiers: FrameModifiers::default(),
            releases: EndReleases::default(),
        }
    }
}

/// Horizontal frame member on one level
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Beam {
    pub id: Id,
    pub level_id: Id,
    pub properties_id: Id,
    pub start: Point2D,
    pub end: Point2D,
    pub rotation: f64,
    pub is_joist: bool,
    /// Part of the lateral system; gravity beams are pinned on export
    pub is_lateral: bool,
    pub modifiers: FrameModifiers,
    pub releases: EndReleases,
}

impl Beam {
    pub fn new(id: Id, level_id: Id, properties_id: Id, start: Point2D, end: Point2D) -> Self {
        Self {
            id,
            level_id,
            properties_id,
            start,
            end,
            rotation: 0.0,
            is_joist: false,
            is_lateral: true,
            modifiers: FrameModifiers::default(),
            releases: EndReleases::default(),
        }
    }
}

/// Inclined frame member from `start` on the base level to `end` on the top level
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Brace {
    pub id: Id,
    pub base_level_id: Id,
    pub top_level_id: Id,
    pub properties_id: Id,
    pub start: Point2D,
    pub end: Point2D,
    pub rotation: f64,
    pub modifiers: FrameModifiers,
    pub releases: EndReleases,
}

impl Brace {
    pub fn new(
        id: Id,
        base_level_id: Id,
        top_level_id: Id,
        properties_id: Id,
        start: Point2D,
        end: Point2D,
    ) -> Self {
        Self {
            id,
            base_level_id,
            top_level_id,
            properties_id,
            start,
            end,
            rotation: 0.0,
            modifiers: FrameModifiers::default(),
            releases: EndReleases::default(),
        }
    }
}

/// Wall panel following a plan polyline between two levels
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Wall {
    pub id: Id,
    pub base_level_id: Id,
    pub top_level_id: Id,
    pub properties_id: Id,
    pub points: Vec<Point2D>,
}

/// Floor area on one level
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Floor {
    pub id: Id,
    pub level_id: Id,
    pub properties_id: Id,
    /// Outline, without a closing duplicate vertex
    pub points: Vec<Point2D>,
    pub diaphragm_id: Option<Id>,
}

/// Support condition of a footing
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Restraint {
    #[default]
    Fixed,
    Pinned,
}

impl Restraint {
    pub fn as_e2k(&self) -> &'static str {
        match self {
            Restraint::Fixed => "UX UY UZ RX RY RZ",
            Restraint::Pinned => "UX UY UZ",
        }
    }

    /// Recognizes the two support patterns, token order is irrelevant
    pub fn parse(s: &str) -> Option<Self> {
        let mut tokens: Vec<String> = s.split_whitespace().map(|t| t.to_uppercase()).collect();
        tokens.sort();
        tokens.dedup();
        let tokens: Vec<&str> = tokens.iter().map(String::as_str).collect();
        match tokens.as_slice() {
            ["RX", "RY", "RZ", "UX", "UY", "UZ"] => Some(Restraint::Fixed),
            ["UX", "UY", "UZ"] => Some(Restraint::Pinned),
            _ => None,
        }
    }
}

/// Point support on a level
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IsolatedFooting {
    pub id: Id,
    pub level_id: Id,
    pub location: Point2D,
    pub restraint: Restraint,
}

/// All elements of a model
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ElementContainer {
    pub columns: Vec<Column>,
    pub beams: Vec<Beam>,
    pub braces: Vec<Brace>,
    pub walls: Vec<Wall>,
    pub floors: Vec<Floor>,
    pub isolated_footings: Vec<IsolatedFooting>,
}

impl ElementContainer {
    pub fn len(&self) -> usize {
        self.columns.len()
            + self.beams.len()
            + self.braces.len()
            + self.walls.len()
            + self.floors.len()
            + self.isolated_footings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every plan point carried by any element
    pub fn plan_points(&self) -> impl Iterator<Item = &Point2D> + '_ {
        self.columns
            .iter()
            .map(|c| &c.location)
            .chain(self.beams.iter().flat_map(|b| [&b.start, &b.end]))
            .chain(self.braces.iter().flat_map(|b| [&b.start, &b.end]))
            .chain(self.walls.iter().flat_map(|w| w.points.iter()))
            .chain(self.floors.iter().flat_map(|f| f.points.iter()))
            .chain(self.isolated_footings.iter().map(|f| &f.location))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_release_string() {
        let releases = EndReleases {
            i: vec![ReleaseDof::M3, ReleaseDof::T],
            j: vec![ReleaseDof::M3],
        };
        assert_eq!(releases.to_e2k(), "TI M3I M3J");
        assert_eq!(EndReleases::parse("TI M3I M3J"), Some(releases));
        assert_eq!(EndReleases::pinned().to_e2k(), "M2I M3I M2J M3J");
    }

    #[test]
    fn test_release_parse_rejects_garbage() {
        assert_eq!(EndReleases::parse("M3K"), None);
        assert_eq!(EndReleases::parse("XI"), None);
        assert!(EndReleases::parse("").unwrap().is_empty());
    }

    #[test]
    fn test_pinned_detection() {
        assert!(EndReleases::parse("M3J M2J M3I M2I").unwrap().is_pinned());
        assert!(!EndReleases::parse("M2I M3I M2J").unwrap().is_pinned());
    }

    #[test]
    fn test_restraint_patterns() {
        assert_eq!(Restraint::parse("UX UY UZ RX RY RZ"), Some(Restraint::Fixed));
        assert_eq!(Restraint::parse("uz ux uy"), Some(Restraint::Pinned));
        assert_eq!(Restraint::parse("UX"), None);
    }

    #[test]
    fn test_plan_points() {
        let mut elements = ElementContainer::default();
        elements.beams.push(Beam::new(
            Id::from("B"),
            Id::from("L"),
            Id::from("P"),
            Point2D::new(0.0, 0.0),
            Point2D::new(10.0, 0.0),
        ));
        elements.isolated_footings.push(IsolatedFooting {
            id: Id::from("F"),
            level_id: Id::from("L"),
            location: Point2D::new(5.0, 5.0),
            restraint: Restraint::Pinned,
        });
        assert_eq!(elements.plan_points().count(), 3);
        assert_eq!(elements.len(), 2);
    }
}
