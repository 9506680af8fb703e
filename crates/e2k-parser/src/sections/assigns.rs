// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Point, line and area assignment rows
//!
//! Each row binds a connectivity record to a story and creates one element.
//! The row's story is the element's top level; vertical elements reach down
//! as many stories as their record spans. Column records span one story, so
//! every column row comes back as a one-story column.

use crate::context::{ImportContext, ParsedLine};
use crate::grammar::{AreaRecord, LineAssignRecord, Record};
use e2k_model::{
    Beam, Brace, Column, ElementKind, Floor, FrameModifiers, Id, IdCategory, IsolatedFooting,
    ReferenceKind, Result, Wall, UNKNOWN,
};

const STEEL_JOIST: &str = "Steel Joist";

pub fn import_point_assigns(ctx: &mut ImportContext<'_>, lines: &[ParsedLine<'_>]) -> Result<()> {
    ctx.require_levels()?;
    for line in lines {
        let Record::PointAssign(row) = &line.record else {
            continue;
        };
        // Only supports become elements
        let Some(restraint) = row.restraint else {
            continue;
        };
        let context = format!("POINTASSIGN {}", row.point);
        let level_id = ctx.level_for_story(&row.story, &context);
        let location = ctx.point(&row.point, &context);
        let footing = IsolatedFooting {
            id: ctx.ids.generate(IdCategory::IsolatedFooting),
            level_id,
            location,
            restraint,
        };
        ctx.model.elements.isolated_footings.push(footing);
    }
    Ok(())
}

fn modifiers(row: &LineAssignRecord) -> FrameModifiers {
    let mut modifiers = FrameModifiers::default();
    for (field, value) in &row.modifiers {
        modifiers.set(*field, *value);
    }
    modifiers
}

pub fn import_line_assigns(ctx: &mut ImportContext<'_>, lines: &[ParsedLine<'_>]) -> Result<()> {
    ctx.require_levels()?;
    for line in lines {
        let Record::LineAssign(row) = &line.record else {
            continue;
        };
        let context = format!("LINEASSIGN {}", row.line);
        let Some(record) = ctx.lines.get(&row.line).cloned() else {
            ctx.diagnostics
                .substitution(ReferenceKind::Line, row.line.as_str(), UNKNOWN, context);
            continue;
        };

        let top = ctx.level_for_story(&row.story, &context);
        let section = row.section.as_deref().unwrap_or(UNKNOWN);
        let properties_id = ctx
            .frame_sections
            .resolve(section, &context, &mut ctx.diagnostics);
        let start = ctx.point(&record.i, &context);

        match record.kind {
            ElementKind::Column => {
                let base = ctx.level_below(&top, record.span, &context);
                let id = ctx.ids.generate(IdCategory::Column);
                let mut column = Column::new(id, base, top, properties_id, start);
                column.rotation = row.angle;
                column.modifiers = modifiers(row);
                if let Some(releases) = &row.releases {
                    column.releases = releases.clone();
                }
                ctx.model.elements.columns.push(column);
            }
            ElementKind::Beam => {
                let end = ctx.point(&record.j, &context);
                let id = ctx.ids.generate(IdCategory::Beam);
                let mut beam = Beam::new(id, top, properties_id, start, end);
                beam.rotation = row.angle;
                beam.modifiers = modifiers(row);
                beam.is_joist = row
                    .design_procedure
                    .as_deref()
                    .is_some_and(|p| p.eq_ignore_ascii_case(STEEL_JOIST));
                match &row.releases {
                    Some(releases) if releases.is_pinned() => beam.is_lateral = false,
                    Some(releases) => beam.releases = releases.clone(),
                    None => {}
                }
                ctx.model.elements.beams.push(beam);
            }
            ElementKind::Brace => {
                let end = ctx.point(&record.j, &context);
                let base = ctx.level_below(&top, record.span, &context);
                let id = ctx.ids.generate(IdCategory::Brace);
                let mut brace = Brace::new(id, base, top, properties_id, start, end);
                brace.rotation = row.angle;
                brace.modifiers = modifiers(row);
                if let Some(releases) = &row.releases {
                    brace.releases = releases.clone();
                }
                ctx.model.elements.braces.push(brace);
            }
            _ => ctx.malformed(line, "line record is not a frame member"),
        }
    }
    Ok(())
}

/// Bottom vertex ids of a wall panel and the number of stories it spans
///
/// With story offsets the bottom edge is the set of vertices with the
/// largest offset. Without them the first half of the vertices is taken
/// as the bottom of a single-story panel.
fn wall_outline(record: &AreaRecord) -> std::result::Result<(Vec<&str>, u32), String> {
    let (bottom, span): (Vec<&str>, u32) = match record.offsets.iter().max() {
        Some(&span) => {
            if span == 0 {
                return Err(format!("wall '{}' has no vertical extent", record.id));
            }
            let bottom = record
                .points
                .iter()
                .zip(&record.offsets)
                .filter(|(_, offset)| **offset == span)
                .map(|(p, _)| p.as_str())
                .collect();
            (bottom, span)
        }
        None => {
            if record.points.len() % 2 != 0 {
                return Err(format!(
                    "wall '{}' has an odd vertex count and no story offsets",
                    record.id
                ));
            }
            let half = record.points.len() / 2;
            (record.points[..half].iter().map(String::as_str).collect(), 1)
        }
    };
    if bottom.len() < 2 {
        return Err(format!("wall '{}' needs at least two bottom vertices", record.id));
    }
    Ok((bottom, span))
}

pub fn import_area_assigns(ctx: &mut ImportContext<'_>, lines: &[ParsedLine<'_>]) -> Result<()> {
    ctx.require_levels()?;
    for line in lines {
        let Record::AreaAssign(row) = &line.record else {
            continue;
        };
        let context = format!("AREAASSIGN {}", row.area);
        let Some(record) = ctx.areas.get(&row.area).cloned() else {
            ctx.diagnostics
                .substitution(ReferenceKind::Area, row.area.as_str(), UNKNOWN, context);
            continue;
        };
        let level = ctx.level_for_story(&row.story, &context);
        let section = row.section.as_deref().unwrap_or(UNKNOWN);

        match record.kind {
            ElementKind::Wall => {
                let (bottom, span) = match wall_outline(&record) {
                    Ok(outline) => outline,
                    Err(reason) => {
                        ctx.malformed(line, reason);
                        continue;
                    }
                };
                let points = bottom.iter().map(|p| ctx.point(p, &context)).collect();
                let base = ctx.level_below(&level, span, &context);
                let properties_id =
                    ctx.wall_properties
                        .resolve(section, &context, &mut ctx.diagnostics);
                let wall = Wall {
                    id: ctx.ids.generate(IdCategory::Wall),
                    base_level_id: base,
                    top_level_id: level,
                    properties_id,
                    points,
                };
                ctx.model.elements.walls.push(wall);
            }
            ElementKind::Floor => {
                let points = record.points.iter().map(|p| ctx.point(p, &context)).collect();
                let properties_id =
                    ctx.floor_properties
                        .resolve(section, &context, &mut ctx.diagnostics);
                let diaphragm_id = row
                    .diaphragm
                    .as_deref()
                    .map(|d| ctx.diaphragms.resolve(d, &context, &mut ctx.diagnostics));
                if let Some(set) = &row.load_set {
                    bind_load_set(ctx, set, &level, &context);
                }
                let floor = Floor {
                    id: ctx.ids.generate(IdCategory::Floor),
                    level_id: level,
                    properties_id,
                    points,
                    diaphragm_id,
                };
                ctx.model.elements.floors.push(floor);
            }
            _ => ctx.malformed(line, "area record is not a wall or floor"),
        }
    }
    Ok(())
}

/// The first floor that references a load set decides its floor type
fn bind_load_set(ctx: &mut ImportContext<'_>, set: &str, level: &Id, context: &str) {
    let load_id = ctx
        .surface_loads
        .resolve(set, context, &mut ctx.diagnostics);
    let floor_type = ctx.floor_type_of(level);
    if let Some(load) = ctx
        .model
        .loads
        .surface_loads
        .iter_mut()
        .find(|s| s.id == load_id)
    {
        if load.floor_type_id.is_none() {
            load.floor_type_id = floor_type;
        }
    }
}
