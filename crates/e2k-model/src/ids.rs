// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Per-category id generation

use crate::Id;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Entity category an id is scoped to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IdCategory {
    Level,
    FloorType,
    Grid,
    GridSystem,
    Material,
    FrameProperties,
    WallProperties,
    FloorProperties,
    Diaphragm,
    Beam,
    Column,
    Brace,
    Wall,
    Floor,
    IsolatedFooting,
    LoadDefinition,
    LoadCombination,
    SurfaceLoad,
}

impl IdCategory {
    /// Prefix used in generated ids
    pub fn prefix(&self) -> &'static str {
        match self {
            IdCategory::Level => "LEVEL",
            IdCategory::FloorType => "FLOORTYPE",
            IdCategory::Grid => "GRID",
            IdCategory::GridSystem => "GRIDSYSTEM",
            IdCategory::Material => "MATERIAL",
            IdCategory::FrameProperties => "FRAMEPROP",
            IdCategory::WallProperties => "WALLPROP",
            IdCategory::FloorProperties => "FLOORPROP",
            IdCategory::Diaphragm => "DIAPHRAGM",
            IdCategory::Beam => "BEAM",
            IdCategory::Column => "COLUMN",
            IdCategory::Brace => "BRACE",
            IdCategory::Wall => "WALL",
            IdCategory::Floor => "FLOOR",
            IdCategory::IsolatedFooting => "FOOTING",
            IdCategory::LoadDefinition => "LOAD",
            IdCategory::LoadCombination => "COMBO",
            IdCategory::SurfaceLoad => "SURFACELOAD",
        }
    }
}

/// Generates `<PREFIX>-<n>` ids with one monotonically increasing counter per category
///
/// An allocator belongs to a single pipeline run; create a fresh one per run so
/// counters never leak between runs.
#[derive(Debug, Default)]
pub struct IdAllocator {
    counters: FxHashMap<IdCategory, u32>,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next unique id in the category
    pub fn generate(&mut self, category: IdCategory) -> Id {
        let counter = self.counters.entry(category).or_insert(0);
        *counter += 1;
        Id(format!("{}-{}", category.prefix(), counter))
    }

    /// Number of ids handed out so far in a category
    pub fn issued(&self, category: IdCategory) -> u32 {
        self.counters.get(&category).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxHashSet;

    #[test]
    fn test_ids_are_scoped_per_category() {
        let mut ids = IdAllocator::new();
        assert_eq!(ids.generate(IdCategory::Beam).as_str(), "BEAM-1");
        assert_eq!(ids.generate(IdCategory::Beam).as_str(), "BEAM-2");
        assert_eq!(ids.generate(IdCategory::Level).as_str(), "LEVEL-1");
        assert_eq!(ids.issued(IdCategory::Beam), 2);
        assert_eq!(ids.issued(IdCategory::Wall), 0);
    }

    #[test]
    fn test_ids_never_collide() {
        let mut ids = IdAllocator::new();
        let mut seen = FxHashSet::default();
        for _ in 0..500 {
            assert!(seen.insert(ids.generate(IdCategory::Column)));
            assert!(seen.insert(ids.generate(IdCategory::Floor)));
        }
    }

    #[test]
    fn test_fresh_allocator_restarts() {
        let mut first = IdAllocator::new();
        first.generate(IdCategory::Grid);
        let mut second = IdAllocator::new();
        assert_eq!(second.generate(IdCategory::Grid).as_str(), "GRID-1");
    }
}
