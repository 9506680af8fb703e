// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Connectivity and assignment engine
//!
//! Every element kind is turned into [`Member`]s first. One generic pass then
//! registers their points, collapses members that share a record according to
//! the kind's [`DedupPolicy`], and collects one assignment row per member.
//!
//! | kind   | keyword  | label | dedup                                |
//! |--------|----------|-------|--------------------------------------|
//! | column | `COLUMN` | `C`   | plan location                        |
//! | beam   | `BEAM`   | `B`   | endpoints in either order            |
//! | brace  | `BRACE`  | `D`   | endpoints in order and story span    |
//! | wall   | `WALL`   | `W`   | never                                |
//! | floor  | `FLOOR`  | `F`   | never                                |
//!
//! Column records always span one story. A column over several stories is
//! written as one row per story it spans.

use crate::context::ExportContext;
use e2k_model::elevation::external_story_name;
use e2k_model::{
    ElementKind, EndReleases, Error, FrameModifiers, Id, Level, ModifierField, Point2D, PointId,
    PointRegistry, ReferenceKind, Restraint, Result,
};
use log::debug;
use rustc_hash::FxHashMap;

const STEEL_JOIST: &str = "Steel Joist";

// ============================================================================
// Descriptors
// ============================================================================

/// How members of one kind share connectivity records
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DedupPolicy {
    /// Same plan location
    Location,
    /// Same endpoints in the same order and story span
    OrderedEnds,
    /// Same endpoints in either order
    UnorderedEnds,
    /// Every member gets its own record
    Never,
}

/// Per-kind parameters of the engine
#[derive(Clone, Copy, Debug)]
pub struct KindDescriptor {
    pub kind: ElementKind,
    pub label_prefix: &'static str,
    pub dedup: DedupPolicy,
}

impl KindDescriptor {
    pub const COLUMN: KindDescriptor = KindDescriptor {
        kind: ElementKind::Column,
        label_prefix: "C",
        dedup: DedupPolicy::Location,
    };
    pub const BEAM: KindDescriptor = KindDescriptor {
        kind: ElementKind::Beam,
        label_prefix: "B",
        dedup: DedupPolicy::UnorderedEnds,
    };
    pub const BRACE: KindDescriptor = KindDescriptor {
        kind: ElementKind::Brace,
        label_prefix: "D",
        dedup: DedupPolicy::OrderedEnds,
    };
    pub const WALL: KindDescriptor = KindDescriptor {
        kind: ElementKind::Wall,
        label_prefix: "W",
        dedup: DedupPolicy::Never,
    };
    pub const FLOOR: KindDescriptor = KindDescriptor {
        kind: ElementKind::Floor,
        label_prefix: "F",
        dedup: DedupPolicy::Never,
    };

    /// `LINE`/`AREA` type keyword
    pub fn keyword(&self) -> &'static str {
        self.kind.record_keyword()
    }
}

// ============================================================================
// Members, Records and Rows
// ============================================================================

/// Plan geometry of a member
#[derive(Clone, Debug, PartialEq)]
pub enum MemberGeometry {
    /// I and J end; equal for columns
    Line { i: Point2D, j: Point2D },
    /// Floor outline, or the bottom edge of a wall
    Area(Vec<Point2D>),
}

/// Fields of a `LINEASSIGN` row
#[derive(Clone, Debug, PartialEq)]
pub struct FrameAssignment {
    pub section: String,
    pub angle: f64,
    pub releases: EndReleases,
    pub design_procedure: Option<&'static str>,
    pub modifiers: Vec<(ModifierField, f64)>,
}

/// What an assignment row binds to its record
#[derive(Clone, Debug, PartialEq)]
pub enum Assignment {
    Frame(FrameAssignment),
    Wall {
        section: String,
    },
    Floor {
        section: String,
        diaphragm: Option<String>,
        load_set: Option<String>,
    },
}

/// An element prepared for the engine
#[derive(Clone, Debug, PartialEq)]
pub struct Member {
    pub geometry: MemberGeometry,
    /// Stories between the bottom and the top of the member
    pub span: u32,
    /// The member's top level
    pub level: Level,
    pub assignment: Assignment,
}

/// Point ids of a record
#[derive(Clone, Debug, PartialEq)]
pub enum RecordShape {
    Line {
        i: PointId,
        j: PointId,
        span: u32,
    },
    Area {
        points: Vec<PointId>,
        offsets: Vec<u32>,
    },
}

/// One story binding of a record
#[derive(Clone, Debug, PartialEq)]
pub struct AssignmentRow {
    pub story: String,
    pub elevation: f64,
    pub assignment: Assignment,
}

/// A `LINE` or `AREA` record and its rows, bottom story first
#[derive(Clone, Debug, PartialEq)]
pub struct ConnectivityRecord {
    pub label: String,
    pub kind: ElementKind,
    pub keyword: &'static str,
    pub shape: RecordShape,
    pub rows: Vec<AssignmentRow>,
}

/// A `POINTASSIGN` support row
#[derive(Clone, Debug, PartialEq)]
pub struct SupportRow {
    pub point: PointId,
    pub story: String,
    pub restraint: Restraint,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
enum RecordKey {
    Location(PointId),
    Ends(PointId, PointId, u32),
}

fn record_key(dedup: DedupPolicy, shape: &RecordShape) -> Option<RecordKey> {
    let RecordShape::Line { i, j, span } = *shape else {
        return None;
    };
    match dedup {
        DedupPolicy::Location => Some(RecordKey::Location(i)),
        DedupPolicy::OrderedEnds => Some(RecordKey::Ends(i, j, span)),
        DedupPolicy::UnorderedEnds => Some(RecordKey::Ends(i.min(j), i.max(j), span)),
        DedupPolicy::Never => None,
    }
}

/// Area record points and story offsets
///
/// A wall is a vertical panel: its bottom edge in order at offset `span`,
/// then the same plan points reversed at offset 0 (the top story).
fn area_shape(kind: ElementKind, points: Vec<PointId>, span: u32) -> RecordShape {
    let n = points.len();
    if kind == ElementKind::Wall {
        let mut ring = points.clone();
        ring.extend(points.iter().rev());
        let mut offsets = vec![span; n];
        offsets.resize(2 * n, 0);
        RecordShape::Area {
            points: ring,
            offsets,
        }
    } else {
        RecordShape::Area {
            points,
            offsets: vec![0; n],
        }
    }
}

/// Register member points and collapse members into records
///
/// Records keep the order in which their first member was seen; rows within
/// a record are sorted bottom story first.
pub fn build_records(
    points: &mut PointRegistry<Point2D>,
    descriptor: &KindDescriptor,
    members: Vec<Member>,
) -> Vec<ConnectivityRecord> {
    let mut records: Vec<ConnectivityRecord> = Vec::new();
    let mut by_key: FxHashMap<RecordKey, usize> = FxHashMap::default();

    for member in members {
        let shape = match &member.geometry {
            MemberGeometry::Line { i, j } => {
                let i = points.get_or_create_id(*i);
                let j = points.get_or_create_id(*j);
                RecordShape::Line {
                    i,
                    j,
                    span: member.span,
                }
            }
            MemberGeometry::Area(outline) => {
                let ids = outline
                    .iter()
                    .map(|p| points.get_or_create_id(*p))
                    .collect();
                area_shape(descriptor.kind, ids, member.span)
            }
        };
        let row = AssignmentRow {
            story: external_story_name(&member.level.name),
            elevation: member.level.elevation,
            assignment: member.assignment,
        };

        let key = record_key(descriptor.dedup, &shape);
        if let Some(&index) = key.as_ref().and_then(|k| by_key.get(k)) {
            records[index].rows.push(row);
            continue;
        }
        if let Some(key) = key {
            by_key.insert(key, records.len());
        }
        records.push(ConnectivityRecord {
            label: format!("{}{}", descriptor.label_prefix, records.len() + 1),
            kind: descriptor.kind,
            keyword: descriptor.keyword(),
            shape,
            rows: vec![row],
        });
    }

    for record in &mut records {
        record
            .rows
            .sort_by(|a, b| a.elevation.total_cmp(&b.elevation));
    }
    records
}

// ============================================================================
// Member Builders
// ============================================================================

/// Base and top level of a vertical member, lower one first
fn vertical_bounds<'m>(
    ctx: &mut ExportContext<'m>,
    base: &Id,
    top: &Id,
    context: &str,
) -> Result<(&'m Level, &'m Level)> {
    let base = ctx.level(base, context)?;
    let top = ctx.level(top, context)?;
    if base.elevation <= top.elevation {
        Ok((base, top))
    } else {
        Ok((top, base))
    }
}

/// Top level of a vertical member with the stories between it and the base
fn vertical_levels(
    ctx: &mut ExportContext<'_>,
    base: &Id,
    top: &Id,
    context: &str,
) -> Result<(Level, u32)> {
    let (base, top) = vertical_bounds(ctx, base, top, context)?;
    let span = ctx.model.layout.levels_spanned(base, top).len() as u32;
    Ok((top.clone(), span))
}

fn frame_assignment(
    ctx: &mut ExportContext<'_>,
    properties_id: &Id,
    rotation: f64,
    modifiers: &FrameModifiers,
    releases: EndReleases,
    context: &str,
) -> FrameAssignment {
    let model = ctx.model;
    FrameAssignment {
        section: ctx.name_of(
            &model.properties.frame_properties,
            properties_id,
            ReferenceKind::FrameProperties,
            context,
        ),
        angle: rotation,
        releases,
        design_procedure: None,
        modifiers: modifiers.changed(),
    }
}

fn column_members(ctx: &mut ExportContext<'_>) -> Result<Vec<Member>> {
    let model = ctx.model;
    let mut members = Vec::with_capacity(model.elements.columns.len());
    for column in &model.elements.columns {
        let context = format!("column {}", column.id);
        let (base, top) =
            vertical_bounds(ctx, &column.base_level_id, &column.top_level_id, &context)?;
        let mut stories = model.layout.levels_spanned(base, top);
        if stories.is_empty() {
            stories.push(top);
        }
        let frame = frame_assignment(
            ctx,
            &column.properties_id,
            column.rotation,
            &column.modifiers,
            column.releases.clone(),
            &context,
        );
        for story in stories {
            members.push(Member {
                geometry: MemberGeometry::Line {
                    i: column.location,
                    j: column.location,
                },
                span: 1,
                level: story.clone(),
                assignment: Assignment::Frame(frame.clone()),
            });
        }
    }
    Ok(members)
}

fn beam_members(ctx: &mut ExportContext<'_>) -> Result<Vec<Member>> {
    let model = ctx.model;
    let pin_gravity = ctx.config.pin_gravity_beams;
    let mut members = Vec::with_capacity(model.elements.beams.len());
    for beam in &model.elements.beams {
        let context = format!("beam {}", beam.id);
        let level = ctx.level(&beam.level_id, &context)?.clone();
        let releases = if beam.releases.is_empty() && !beam.is_lateral && pin_gravity {
            EndReleases::pinned()
        } else {
            beam.releases.clone()
        };
        let mut frame = frame_assignment(
            ctx,
            &beam.properties_id,
            beam.rotation,
            &beam.modifiers,
            releases,
            &context,
        );
        if beam.is_joist {
            frame.design_procedure = Some(STEEL_JOIST);
        }
        members.push(Member {
            geometry: MemberGeometry::Line {
                i: beam.start,
                j: beam.end,
            },
            span: 0,
            level,
            assignment: Assignment::Frame(frame),
        });
    }
    Ok(members)
}

fn brace_members(ctx: &mut ExportContext<'_>) -> Result<Vec<Member>> {
    let model = ctx.model;
    let mut members = Vec::with_capacity(model.elements.braces.len());
    for brace in &model.elements.braces {
        let context = format!("brace {}", brace.id);
        let (level, span) =
            vertical_levels(ctx, &brace.base_level_id, &brace.top_level_id, &context)?;
        let frame = frame_assignment(
            ctx,
            &brace.properties_id,
            brace.rotation,
            &brace.modifiers,
            brace.releases.clone(),
            &context,
        );
        members.push(Member {
            geometry: MemberGeometry::Line {
                i: brace.start,
                j: brace.end,
            },
            span,
            level,
            assignment: Assignment::Frame(frame),
        });
    }
    Ok(members)
}

fn wall_members(ctx: &mut ExportContext<'_>) -> Result<Vec<Member>> {
    let model = ctx.model;
    let mut members = Vec::with_capacity(model.elements.walls.len());
    for wall in &model.elements.walls {
        if wall.points.len() < 2 {
            return Err(Error::structural(format!(
                "wall {} needs at least two plan points, found {}",
                wall.id,
                wall.points.len()
            )));
        }
        let context = format!("wall {}", wall.id);
        let (level, span) =
            vertical_levels(ctx, &wall.base_level_id, &wall.top_level_id, &context)?;
        let section = ctx.name_of(
            &model.properties.wall_properties,
            &wall.properties_id,
            ReferenceKind::WallProperties,
            &context,
        );
        members.push(Member {
            geometry: MemberGeometry::Area(wall.points.clone()),
            // A panel always reaches at least one story down
            span: span.max(1),
            level,
            assignment: Assignment::Wall { section },
        });
    }
    Ok(members)
}

fn floor_members(ctx: &mut ExportContext<'_>) -> Result<Vec<Member>> {
    let model = ctx.model;
    let mut members = Vec::with_capacity(model.elements.floors.len());
    for floor in &model.elements.floors {
        if floor.points.len() < 3 {
            return Err(Error::structural(format!(
                "floor {} needs at least three outline points, found {}",
                floor.id,
                floor.points.len()
            )));
        }
        let context = format!("floor {}", floor.id);
        let level = ctx.level(&floor.level_id, &context)?.clone();
        let section = ctx.name_of(
            &model.properties.floor_properties,
            &floor.properties_id,
            ReferenceKind::FloorProperties,
            &context,
        );
        let diaphragm = floor.diaphragm_id.as_ref().map(|id| {
            ctx.name_of(
                &model.properties.diaphragms,
                id,
                ReferenceKind::Diaphragm,
                &context,
            )
        });
        let load_set = level
            .floor_type_id
            .as_ref()
            .and_then(|ft| model.loads.surface_loads_for(ft).next())
            .map(|load| load.name.clone());
        members.push(Member {
            geometry: MemberGeometry::Area(floor.points.clone()),
            span: 0,
            level,
            assignment: Assignment::Floor {
                section,
                diaphragm,
                load_set,
            },
        });
    }
    Ok(members)
}

/// Register every element point and build all records and rows
///
/// Points are registered columns first, then beams, braces, walls, floors
/// and footings, so point numbering only depends on element order.
pub fn build_connectivity(ctx: &mut ExportContext<'_>) -> Result<()> {
    if ctx.model.layout.levels.is_empty() {
        return Err(Error::missing("levels for element assignments"));
    }

    let columns = column_members(ctx)?;
    let mut lines = build_records(&mut ctx.points, &KindDescriptor::COLUMN, columns);
    let beams = beam_members(ctx)?;
    lines.extend(build_records(&mut ctx.points, &KindDescriptor::BEAM, beams));
    let braces = brace_members(ctx)?;
    lines.extend(build_records(&mut ctx.points, &KindDescriptor::BRACE, braces));

    let walls = wall_members(ctx)?;
    let mut areas = build_records(&mut ctx.points, &KindDescriptor::WALL, walls);
    let floors = floor_members(ctx)?;
    areas.extend(build_records(&mut ctx.points, &KindDescriptor::FLOOR, floors));

    let model = ctx.model;
    for footing in &model.elements.isolated_footings {
        let context = format!("footing {}", footing.id);
        let story = ctx.story_name(&footing.level_id, &context)?;
        let point = ctx.points.get_or_create_id(footing.location);
        ctx.supports.push(SupportRow {
            point,
            story,
            restraint: footing.restraint,
        });
    }

    debug!(
        "Built {} line records, {} area records over {} points",
        lines.len(),
        areas.len(),
        ctx.points.len()
    );
    ctx.lines = lines;
    ctx.areas = areas;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn level(name: &str, elevation: f64) -> Level {
        Level::new(Id::new(format!("L-{}", name)), name, elevation)
    }

    fn wall_assignment() -> Assignment {
        Assignment::Wall {
            section: "W12".to_string(),
        }
    }

    fn line(i: (f64, f64), j: (f64, f64), span: u32, level: &Level) -> Member {
        Member {
            geometry: MemberGeometry::Line {
                i: Point2D::new(i.0, i.1),
                j: Point2D::new(j.0, j.1),
            },
            span,
            level: level.clone(),
            assignment: wall_assignment(),
        }
    }

    #[test]
    fn test_stacked_columns_share_a_record() {
        let mut points = PointRegistry::new();
        let members = vec![
            line((0.0, 0.0), (0.0, 0.0), 1, &level("2", 264.0)),
            line((0.0, 0.0), (0.0, 0.0), 1, &level("1", 120.0)),
            line((0.0, 1e-7), (0.0, 1e-7), 1, &level("3", 400.0)),
        ];
        let records = build_records(&mut points, &KindDescriptor::COLUMN, members);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].label, "C1");
        assert_eq!(records[0].keyword, "COLUMN");
        let stories: Vec<&str> = records[0].rows.iter().map(|r| r.story.as_str()).collect();
        assert_eq!(stories, vec!["Story1", "Story2", "Story3"]);
        assert_eq!(points.len(), 1);
    }

    #[test]
    fn test_multi_story_column_gets_a_row_per_story() {
        let mut model = e2k_model::StructuralModel::new();
        model.layout.levels = vec![
            Level::new(Id::from("L0"), "Base", 0.0),
            Level::new(Id::from("L1"), "1", 120.0),
            Level::new(Id::from("L2"), "2", 264.0),
            Level::new(Id::from("L3"), "3", 408.0),
        ];
        for (id, base, top) in [("C1", "L0", "L1"), ("C2", "L1", "L3")] {
            model.elements.columns.push(e2k_model::Column::new(
                Id::from(id),
                Id::from(base),
                Id::from(top),
                Id::from("P1"),
                Point2D::new(0.0, 0.0),
            ));
        }
        let config = crate::ExportConfig::default();
        let mut ctx = ExportContext::new(&model, &config);
        build_connectivity(&mut ctx).unwrap();

        assert_eq!(ctx.lines.len(), 1);
        let record = &ctx.lines[0];
        assert_eq!(
            record.shape,
            RecordShape::Line {
                i: PointId(1),
                j: PointId(1),
                span: 1,
            }
        );
        let stories: Vec<&str> = record.rows.iter().map(|r| r.story.as_str()).collect();
        assert_eq!(stories, vec!["Story1", "Story2", "Story3"]);
    }

    #[test]
    fn test_beam_and_brace_end_order() {
        let story = level("1", 120.0);
        let mut points = PointRegistry::new();
        let beams = vec![
            line((0.0, 0.0), (10.0, 0.0), 0, &story),
            line((10.0, 0.0), (0.0, 0.0), 0, &story),
        ];
        assert_eq!(
            build_records(&mut points, &KindDescriptor::BEAM, beams).len(),
            1
        );

        let braces = vec![
            line((0.0, 0.0), (10.0, 0.0), 1, &story),
            line((10.0, 0.0), (0.0, 0.0), 1, &story),
        ];
        let records = build_records(&mut points, &KindDescriptor::BRACE, braces);
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].label, "D2");
        assert_eq!(points.len(), 2);
    }

    #[test]
    fn test_walls_never_dedup() {
        let story = level("1", 120.0);
        let outline = vec![Point2D::new(0.0, 0.0), Point2D::new(10.0, 0.0)];
        let wall = Member {
            geometry: MemberGeometry::Area(outline),
            span: 1,
            level: story,
            assignment: wall_assignment(),
        };
        let mut points = PointRegistry::new();
        let records = build_records(
            &mut points,
            &KindDescriptor::WALL,
            vec![wall.clone(), wall],
        );
        assert_eq!(records.len(), 2);
        assert_eq!(
            records[0].shape,
            RecordShape::Area {
                points: vec![PointId(1), PointId(2), PointId(2), PointId(1)],
                offsets: vec![1, 1, 0, 0],
            }
        );
    }

    #[test]
    fn test_floor_offsets() {
        assert_eq!(
            area_shape(
                ElementKind::Floor,
                vec![PointId(1), PointId(2), PointId(3)],
                0
            ),
            RecordShape::Area {
                points: vec![PointId(1), PointId(2), PointId(3)],
                offsets: vec![0, 0, 0],
            }
        );
    }
}
