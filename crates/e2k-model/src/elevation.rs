// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Story elevations and floor-type inheritance
//!
//! E2K declares stories either with an absolute `ELEV` or with a `HEIGHT`
//! relative to the story below. "Below" is defined by a name-based processing
//! order: `Base` first, then stories with a numeric index ascending, then any
//! other name lexicographically.

use crate::{FloorType, Id, IdAllocator, IdCategory, ModelLayoutContainer};
use rustc_hash::FxHashMap;
use std::cmp::Ordering;

const STORY_PREFIX: &str = "Story";

/// One `STORY` statement
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StoryDeclaration {
    pub name: String,
    /// Height above the previous story in processing order
    pub height: Option<f64>,
    /// Absolute elevation, wins over `height`
    pub elevation: Option<f64>,
    pub master: bool,
    pub similar_to: Option<String>,
}

impl StoryDeclaration {
    pub fn with_height(name: impl Into<String>, height: f64) -> Self {
        Self {
            name: name.into(),
            height: Some(height),
            ..Default::default()
        }
    }

    pub fn with_elevation(name: impl Into<String>, elevation: f64) -> Self {
        Self {
            name: name.into(),
            elevation: Some(elevation),
            ..Default::default()
        }
    }
}

/// A story with its resolved absolute elevation
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedStory {
    pub name: String,
    pub elevation: f64,
}

/// Canonical level name: `StoryN` becomes `N`
pub fn normalize_story_name(name: &str) -> String {
    let name = name.trim();
    match name.get(..STORY_PREFIX.len()) {
        Some(prefix) if prefix.eq_ignore_ascii_case(STORY_PREFIX) => {
            let rest = &name[STORY_PREFIX.len()..];
            if is_story_index(rest) {
                rest.to_string()
            } else {
                name.to_string()
            }
        }
        _ => name.to_string(),
    }
}

/// External story name: a purely numeric canonical name gets the `Story` prefix
pub fn external_story_name(name: &str) -> String {
    if is_story_index(name) {
        format!("{}{}", STORY_PREFIX, name)
    } else {
        name.to_string()
    }
}

fn is_story_index(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

fn is_base(name: &str) -> bool {
    name.trim().eq_ignore_ascii_case("base")
}

/// Sort key for bottom-up processing
fn order_key(name: &str) -> (u8, u64, String) {
    let canonical = normalize_story_name(name);
    if is_base(&canonical) {
        (0, 0, String::new())
    } else if is_story_index(&canonical) {
        (1, canonical.parse().unwrap_or(u64::MAX), canonical)
    } else {
        (2, 0, canonical)
    }
}

/// Compare two story names in processing order
pub fn compare_story_names(a: &str, b: &str) -> Ordering {
    order_key(a).cmp(&order_key(b))
}

/// Names sorted bottom-up in processing order
pub fn processing_order<'a>(names: impl IntoIterator<Item = &'a str>) -> Vec<&'a str> {
    let mut names: Vec<&str> = names.into_iter().collect();
    names.sort_by(|a, b| compare_story_names(a, b));
    names
}

/// Resolve every declaration to an absolute elevation, ascending
///
/// The accumulator is seeded from `Base` (0 when it has no `ELEV`). An absolute
/// elevation is taken as is and resets the accumulator; a height adds to it.
pub fn resolve_elevations(declarations: &[StoryDeclaration]) -> Vec<ResolvedStory> {
    let mut ordered: Vec<&StoryDeclaration> = declarations.iter().collect();
    ordered.sort_by(|a, b| compare_story_names(&a.name, &b.name));

    let mut current = 0.0;
    let mut resolved = Vec::with_capacity(ordered.len());
    for decl in ordered {
        let elevation = match (decl.elevation, decl.height) {
            (Some(elev), _) => elev,
            (None, _) if is_base(&decl.name) => 0.0,
            (None, Some(height)) => current + height,
            (None, None) => current,
        };
        current = elevation;
        resolved.push(ResolvedStory {
            name: decl.name.clone(),
            elevation,
        });
    }

    resolved.sort_by(|a, b| {
        a.elevation
            .total_cmp(&b.elevation)
            .then_with(|| compare_story_names(&a.name, &b.name))
    });
    resolved
}

/// Floor types created for a set of stories
#[derive(Debug, Default)]
pub struct FloorTypeAssignment {
    pub floor_types: Vec<FloorType>,
    /// Story name (as declared) to floor type id
    pub by_story: FxHashMap<String, Id>,
    /// `SIMILARTO` targets that did not lead to a master story
    pub unresolved: Vec<(String, String)>,
}

/// Build floor types from master/similar-to declarations
///
/// Each master creates one floor type. A similar-to story follows its chain
/// to a master and shares that floor type. Every other story gets a
/// dedicated floor type named after it.
pub fn resolve_floor_types(
    declarations: &[StoryDeclaration],
    ids: &mut IdAllocator,
) -> FloorTypeAssignment {
    let mut ordered: Vec<&StoryDeclaration> = declarations.iter().collect();
    ordered.sort_by(|a, b| compare_story_names(&a.name, &b.name));

    let by_name: FxHashMap<String, &StoryDeclaration> = ordered
        .iter()
        .map(|d| (normalize_story_name(&d.name), *d))
        .collect();

    let mut assignment = FloorTypeAssignment::default();

    for decl in ordered.iter().filter(|d| d.master) {
        let floor_type = FloorType::new(
            ids.generate(IdCategory::FloorType),
            normalize_story_name(&decl.name),
        );
        assignment
            .by_story
            .insert(decl.name.clone(), floor_type.id.clone());
        assignment.floor_types.push(floor_type);
    }

    for decl in ordered.iter().filter(|d| !d.master) {
        let Some(target) = &decl.similar_to else {
            continue;
        };
        match find_master(target, &by_name) {
            Some(master) => {
                if let Some(id) = assignment.by_story.get(&master.name).cloned() {
                    assignment.by_story.insert(decl.name.clone(), id);
                }
            }
            None => assignment
                .unresolved
                .push((decl.name.clone(), target.clone())),
        }
    }

    for decl in &ordered {
        if assignment.by_story.contains_key(&decl.name) {
            continue;
        }
        let floor_type = FloorType::new(
            ids.generate(IdCategory::FloorType),
            normalize_story_name(&decl.name),
        );
        assignment
            .by_story
            .insert(decl.name.clone(), floor_type.id.clone());
        assignment.floor_types.push(floor_type);
    }

    assignment
}

/// Follow a similar-to chain to a master story, guarding against cycles
fn find_master<'a>(
    start: &str,
    by_name: &FxHashMap<String, &'a StoryDeclaration>,
) -> Option<&'a StoryDeclaration> {
    let mut current = by_name.get(&normalize_story_name(start)).copied()?;
    for _ in 0..by_name.len() {
        if current.master {
            return Some(current);
        }
        let next = current.similar_to.as_ref()?;
        current = by_name.get(&normalize_story_name(next)).copied()?;
    }
    None
}

/// Story statements for export, top of building down
///
/// A level is written with `HEIGHT` when its predecessor in processing order
/// is also the level directly below it; otherwise (and for the first level in
/// processing order) it is written with `ELEV`, so re-import reproduces every
/// elevation. A floor type shared by several levels makes the level named
/// after the floor type the master, or its highest level when none is, and
/// the others similar to it.
pub fn story_declarations(layout: &ModelLayoutContainer) -> Vec<StoryDeclaration> {
    let ascending = layout.levels_ascending();

    let mut processing: Vec<usize> = (0..ascending.len()).collect();
    processing.sort_by(|&a, &b| compare_story_names(&ascending[a].name, &ascending[b].name));
    let mut processing_prev: Vec<Option<usize>> = vec![None; ascending.len()];
    for pair in processing.windows(2) {
        processing_prev[pair[1]] = Some(pair[0]);
    }

    // Master level of each floor type shared by more than one level
    let mut groups: FxHashMap<&Id, Vec<usize>> = FxHashMap::default();
    for (idx, level) in ascending.iter().enumerate() {
        if let Some(ft) = &level.floor_type_id {
            groups.entry(ft).or_default().push(idx);
        }
    }
    let master_of: FxHashMap<&Id, usize> = groups
        .iter()
        .filter(|(_, members)| members.len() > 1)
        .filter_map(|(ft, members)| {
            let named = layout.floor_type(ft).and_then(|floor_type| {
                members
                    .iter()
                    .copied()
                    .find(|&idx| ascending[idx].name == floor_type.name)
            });
            named.or_else(|| members.last().copied()).map(|m| (*ft, m))
        })
        .collect();

    let mut declarations = Vec::with_capacity(ascending.len());
    for (idx, level) in ascending.iter().enumerate().rev() {
        let mut decl = StoryDeclaration {
            name: external_story_name(&level.name),
            ..Default::default()
        };
        match processing_prev[idx] {
            Some(prev) if idx > 0 && prev == idx - 1 => {
                decl.height = Some(level.elevation - ascending[prev].elevation);
            }
            _ => decl.elevation = Some(level.elevation),
        }
        if let Some(&master) = level.floor_type_id.as_ref().and_then(|ft| master_of.get(ft)) {
            if master == idx {
                decl.master = true;
            } else {
                decl.similar_to = Some(external_story_name(&ascending[master].name));
            }
        }
        declarations.push(decl);
    }
    declarations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Level;

    #[test]
    fn test_story_names() {
        assert_eq!(normalize_story_name("Story12"), "12");
        assert_eq!(normalize_story_name("STORY3"), "3");
        assert_eq!(normalize_story_name("Storyteller"), "Storyteller");
        assert_eq!(normalize_story_name("Roof"), "Roof");
        assert_eq!(external_story_name("12"), "Story12");
        assert_eq!(external_story_name("Base"), "Base");
        assert_eq!(external_story_name(&normalize_story_name("Story7")), "Story7");
    }

    #[test]
    fn test_processing_order() {
        let order = processing_order(["Roof", "Story10", "Story2", "BASE", "Mezz"]);
        assert_eq!(order, vec!["BASE", "Story2", "Story10", "Mezz", "Roof"]);
    }

    #[test]
    fn test_resolve_heights() {
        let declarations = vec![
            StoryDeclaration::with_height("Story2", 144.0),
            StoryDeclaration::with_height("Story1", 120.0),
            StoryDeclaration::with_elevation("Base", 0.0),
        ];
        let resolved = resolve_elevations(&declarations);
        let pairs: Vec<(&str, f64)> = resolved
            .iter()
            .map(|s| (s.name.as_str(), s.elevation))
            .collect();
        assert_eq!(pairs, vec![("Base", 0.0), ("Story1", 120.0), ("Story2", 264.0)]);
    }

    #[test]
    fn test_absolute_resets_accumulator() {
        let declarations = vec![
            StoryDeclaration::with_elevation("Base", -24.0),
            StoryDeclaration::with_height("Story1", 120.0),
            StoryDeclaration {
                name: "Story2".to_string(),
                height: Some(999.0),
                elevation: Some(300.0),
                ..Default::default()
            },
            StoryDeclaration::with_height("Story3", 100.0),
        ];
        let resolved = resolve_elevations(&declarations);
        let elevations: Vec<f64> = resolved.iter().map(|s| s.elevation).collect();
        assert_eq!(elevations, vec![-24.0, 96.0, 300.0, 400.0]);
    }

    #[test]
    fn test_missing_base_seeds_zero() {
        let resolved = resolve_elevations(&[StoryDeclaration::with_height("Story1", 150.0)]);
        assert_eq!(resolved[0].elevation, 150.0);
    }

    #[test]
    fn test_floor_type_inheritance() {
        let mut ids = IdAllocator::new();
        let declarations = vec![
            StoryDeclaration {
                name: "Story5".to_string(),
                height: Some(120.0),
                similar_to: Some("Story3".to_string()),
                ..Default::default()
            },
            StoryDeclaration::with_height("Story4", 120.0),
            StoryDeclaration {
                name: "Story3".to_string(),
                height: Some(120.0),
                master: true,
                ..Default::default()
            },
        ];
        let assignment = resolve_floor_types(&declarations, &mut ids);
        assert_eq!(assignment.by_story["Story3"], assignment.by_story["Story5"]);
        assert_ne!(assignment.by_story["Story3"], assignment.by_story["Story4"]);
        assert_eq!(assignment.floor_types.len(), 2);
        assert!(assignment.unresolved.is_empty());
    }

    #[test]
    fn test_similar_chain_and_dangling() {
        let mut ids = IdAllocator::new();
        let declarations = vec![
            StoryDeclaration {
                name: "Story1".to_string(),
                master: true,
                ..Default::default()
            },
            StoryDeclaration {
                name: "Story2".to_string(),
                similar_to: Some("Story1".to_string()),
                ..Default::default()
            },
            StoryDeclaration {
                name: "Story3".to_string(),
                similar_to: Some("Story2".to_string()),
                ..Default::default()
            },
            StoryDeclaration {
                name: "Story4".to_string(),
                similar_to: Some("Story9".to_string()),
                ..Default::default()
            },
        ];
        let assignment = resolve_floor_types(&declarations, &mut ids);
        assert_eq!(assignment.by_story["Story1"], assignment.by_story["Story3"]);
        assert_ne!(assignment.by_story["Story1"], assignment.by_story["Story4"]);
        assert_eq!(
            assignment.unresolved,
            vec![("Story4".to_string(), "Story9".to_string())]
        );
    }

    fn layout(levels: &[(&str, f64, Option<&str>)]) -> ModelLayoutContainer {
        ModelLayoutContainer {
            levels: levels
                .iter()
                .enumerate()
                .map(|(i, (name, elev, ft))| {
                    let level = Level::new(Id::new(format!("LEVEL-{}", i + 1)), *name, *elev);
                    match ft {
                        Some(ft) => level.with_floor_type(Id::from(*ft)),
                        None => level,
                    }
                })
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_story_declarations_top_down() {
        let layout = layout(&[("Base", 0.0, None), ("1", 120.0, None), ("2", 264.0, None)]);
        let decls = story_declarations(&layout);
        let names: Vec<&str> = decls.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["Story2", "Story1", "Base"]);
        assert_eq!(decls[0].height, Some(144.0));
        assert_eq!(decls[1].height, Some(120.0));
        assert_eq!(decls[2].elevation, Some(0.0));
    }

    #[test]
    fn test_story_declarations_out_of_order_names() {
        // "Mezz" sorts after "2" by name but sits between 1 and 2
        let layout = layout(&[
            ("Base", 0.0, None),
            ("1", 120.0, None),
            ("Mezz", 180.0, None),
            ("2", 264.0, None),
        ]);
        let decls = story_declarations(&layout);
        let resolved = resolve_elevations(&decls);
        let elevations: Vec<f64> = resolved.iter().map(|s| s.elevation).collect();
        assert_eq!(elevations, vec![0.0, 120.0, 180.0, 264.0]);
    }

    #[test]
    fn test_story_declarations_master_similar() {
        let layout = layout(&[
            ("Base", 0.0, Some("FT-B")),
            ("1", 120.0, Some("FT-A")),
            ("2", 240.0, Some("FT-A")),
            ("3", 360.0, Some("FT-A")),
        ]);
        let decls = story_declarations(&layout);
        let story3 = decls.iter().find(|d| d.name == "Story3").unwrap();
        let story1 = decls.iter().find(|d| d.name == "Story1").unwrap();
        let base = decls.iter().find(|d| d.name == "Base").unwrap();
        assert!(story3.master);
        assert_eq!(story1.similar_to.as_deref(), Some("Story3"));
        assert!(!base.master && base.similar_to.is_none());
    }

    #[test]
    fn test_story_declarations_keep_named_master() {
        let mut layout = layout(&[
            ("Base", 0.0, None),
            ("3", 120.0, Some("FT-A")),
            ("4", 240.0, None),
            ("5", 360.0, Some("FT-A")),
        ]);
        layout.floor_types.push(FloorType::new(Id::from("FT-A"), "3"));
        let decls = story_declarations(&layout);
        let story3 = decls.iter().find(|d| d.name == "Story3").unwrap();
        let story5 = decls.iter().find(|d| d.name == "Story5").unwrap();
        assert!(story3.master);
        assert!(!story5.master);
        assert_eq!(story5.similar_to.as_deref(), Some("Story3"));
    }
}
