// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! State threaded through the import stages

use crate::grammar::{AreaRecord, LineRecord, Record};
use crate::ImportConfig;
use e2k_model::elevation::normalize_story_name;
use e2k_model::{
    Diagnostics, Error, Id, IdAllocator, NameIndex, Point2D, ReferenceKind, Result, SectionKind,
    StructuralModel, UNKNOWN,
};
use rustc_hash::FxHashMap;

/// A statement that matched its grammar rule
#[derive(Clone, Debug)]
pub struct ParsedLine<'a> {
    pub section: SectionKind,
    /// 1-based line number
    pub number: usize,
    pub text: &'a str,
    pub record: Record,
}

/// `POINT` table keyed by E2K point id, in file order
#[derive(Debug, Default)]
pub struct PointTable {
    by_id: FxHashMap<String, Point2D>,
    first: Option<(String, Point2D)>,
}

impl PointTable {
    /// Add a point; returns false if the id is already taken
    pub fn insert(&mut self, id: &str, location: Point2D) -> bool {
        if self.by_id.contains_key(id) {
            return false;
        }
        if self.first.is_none() {
            self.first = Some((id.to_string(), location));
        }
        self.by_id.insert(id.to_string(), location);
        true
    }

    pub fn get(&self, id: &str) -> Option<Point2D> {
        self.by_id.get(id).copied()
    }

    /// Look up a point, substituting the first point (or the origin)
    pub fn resolve(&self, id: &str, context: &str, diagnostics: &mut Diagnostics) -> Point2D {
        if let Some(p) = self.get(id) {
            return p;
        }
        match &self.first {
            Some((first_id, p)) => {
                diagnostics.substitution(ReferenceKind::Point, id, first_id.as_str(), context);
                *p
            }
            None => {
                diagnostics.substitution(ReferenceKind::Point, id, UNKNOWN, context);
                Point2D::default()
            }
        }
    }
}

/// Everything an import stage reads from or writes to
pub struct ImportContext<'c> {
    pub config: &'c ImportConfig,
    pub ids: IdAllocator,
    pub diagnostics: Diagnostics,
    pub model: StructuralModel,

    /// Canonical level name to level id
    pub levels: NameIndex,
    /// Level ids bottom-up
    pub level_order: Vec<Id>,
    /// Grid system name to id
    pub grid_systems: FxHashMap<String, Id>,
    pub materials: NameIndex,
    pub frame_sections: NameIndex,
    pub wall_properties: NameIndex,
    pub floor_properties: NameIndex,
    pub diaphragms: NameIndex,
    pub load_patterns: NameIndex,
    pub surface_loads: NameIndex,

    pub points: PointTable,
    pub lines: FxHashMap<String, LineRecord>,
    pub areas: FxHashMap<String, AreaRecord>,
}

impl<'c> ImportContext<'c> {
    pub fn new(config: &'c ImportConfig) -> Self {
        Self {
            config,
            ids: IdAllocator::new(),
            diagnostics: Diagnostics::new(),
            model: StructuralModel::new(),
            levels: NameIndex::new(ReferenceKind::Level),
            level_order: Vec::new(),
            grid_systems: FxHashMap::default(),
            materials: NameIndex::new(ReferenceKind::Material),
            frame_sections: NameIndex::new(ReferenceKind::FrameProperties),
            wall_properties: NameIndex::new(ReferenceKind::WallProperties),
            floor_properties: NameIndex::new(ReferenceKind::FloorProperties),
            diaphragms: NameIndex::new(ReferenceKind::Diaphragm),
            load_patterns: NameIndex::new(ReferenceKind::LoadDefinition),
            surface_loads: NameIndex::new(ReferenceKind::SurfaceLoad),
            points: PointTable::default(),
            lines: FxHashMap::default(),
            areas: FxHashMap::default(),
        }
    }

    /// Record a statement that parsed but cannot be used
    pub fn malformed(&mut self, line: &ParsedLine<'_>, reason: impl Into<String>) {
        self.diagnostics
            .malformed_line(line.section.title(), line.number, line.text, reason);
    }

    /// Assignment rows need levels to hang on
    pub fn require_levels(&self) -> Result<()> {
        if self.level_order.is_empty() {
            return Err(Error::missing("story definitions"));
        }
        Ok(())
    }

    /// Level id of a story name as written in the file
    pub fn level_for_story(&mut self, story: &str, context: &str) -> Id {
        self.levels
            .resolve(&normalize_story_name(story), context, &mut self.diagnostics)
    }

    /// Level `span` stories below `top`, clamped to the lowest level
    pub fn level_below(&mut self, top: &Id, span: u32, context: &str) -> Id {
        let Some(pos) = self.level_order.iter().position(|id| id == top) else {
            return top.clone();
        };
        let span = span as usize;
        if pos >= span {
            return self.level_order[pos - span].clone();
        }
        let lowest = self.level_order[0].clone();
        let lowest_name = self
            .model
            .layout
            .level(&lowest)
            .map(|l| l.name.clone())
            .unwrap_or_else(|| UNKNOWN.to_string());
        self.diagnostics.substitution(
            ReferenceKind::Level,
            format!("{} stories below {}", span, top),
            lowest_name,
            context,
        );
        lowest
    }

    /// Floor type of a level, if it has one
    pub fn floor_type_of(&self, level: &Id) -> Option<Id> {
        self.model
            .layout
            .level(level)
            .and_then(|l| l.floor_type_id.clone())
    }

    pub fn point(&mut self, id: &str, context: &str) -> Point2D {
        self.points.resolve(id, context, &mut self.diagnostics)
    }
}
