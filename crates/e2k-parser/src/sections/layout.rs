// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Stories, grids and grid fitting

use crate::context::{ImportContext, ParsedLine};
use crate::grammar::Record;
use e2k_model::elevation::{
    normalize_story_name, resolve_elevations, resolve_floor_types, StoryDeclaration,
};
use e2k_model::{
    Grid, GridAxis, GridOrientation, GridSystem, Id, IdCategory, Level, Point2D, ReferenceKind,
    Result,
};
use log::debug;
use rustc_hash::FxHashSet;

const DEFAULT_BUBBLE_SIZE: f64 = 60.0;

/// Resolve story declarations into levels and floor types
pub fn import_stories(ctx: &mut ImportContext<'_>, lines: &[ParsedLine<'_>]) -> Result<()> {
    let mut declarations: Vec<StoryDeclaration> = Vec::new();
    let mut seen = FxHashSet::default();
    for line in lines {
        let Record::Story(decl) = &line.record else {
            continue;
        };
        if !seen.insert(normalize_story_name(&decl.name)) {
            ctx.malformed(line, format!("story '{}' declared twice", decl.name));
            continue;
        }
        declarations.push(decl.clone());
    }

    let floor_types = resolve_floor_types(&declarations, &mut ctx.ids);
    for (story, target) in &floor_types.unresolved {
        ctx.diagnostics.substitution(
            ReferenceKind::FloorType,
            target.as_str(),
            normalize_story_name(story),
            format!("story {}", story),
        );
    }

    for story in resolve_elevations(&declarations) {
        let name = normalize_story_name(&story.name);
        let mut level = Level::new(ctx.ids.generate(IdCategory::Level), name, story.elevation);
        if let Some(ft) = floor_types.by_story.get(&story.name) {
            level = level.with_floor_type(ft.clone());
        }
        ctx.levels.insert(level.name.clone(), level.id.clone());
        ctx.level_order.push(level.id.clone());
        ctx.model.layout.levels.push(level);
    }
    ctx.model.layout.floor_types = floor_types.floor_types;
    Ok(())
}

/// Grid systems and grid lines
///
/// Orthogonal grids are synthesized as lines through their coordinate
/// spanning `±grid_extent`; grid fitting trims them later.
pub fn import_grids(ctx: &mut ImportContext<'_>, lines: &[ParsedLine<'_>]) -> Result<()> {
    for line in lines {
        match &line.record {
            Record::GridSystem(system) => {
                if ctx.grid_systems.contains_key(&system.name) {
                    ctx.malformed(line, format!("grid system '{}' declared twice", system.name));
                    continue;
                }
                let bubble_size = system.bubble_size.unwrap_or(DEFAULT_BUBBLE_SIZE);
                add_grid_system(ctx, &system.name, bubble_size);
            }
            Record::Grid(grid) => {
                ensure_grid_system(ctx, &grid.system);
                let extent = ctx.config.grid_extent;
                let (start, end) = match grid.axis {
                    GridAxis::X => (
                        Point2D::new(grid.coordinate, -extent),
                        Point2D::new(grid.coordinate, extent),
                    ),
                    GridAxis::Y => (
                        Point2D::new(-extent, grid.coordinate),
                        Point2D::new(extent, grid.coordinate),
                    ),
                };
                push_grid(ctx, &grid.system, &grid.label, start, end, grid.bubbles);
            }
            Record::GenGrid(grid) => {
                ensure_grid_system(ctx, &grid.system);
                push_grid(ctx, &grid.system, &grid.label, grid.start, grid.end, grid.bubbles);
            }
            _ => {}
        }
    }
    Ok(())
}

fn add_grid_system(ctx: &mut ImportContext<'_>, name: &str, bubble_size: f64) -> Id {
    let id = ctx.ids.generate(IdCategory::GridSystem);
    ctx.grid_systems.insert(name.to_string(), id.clone());
    ctx.model.layout.grid_systems.push(GridSystem {
        id: id.clone(),
        name: name.to_string(),
        bubble_size,
    });
    id
}

fn ensure_grid_system(ctx: &mut ImportContext<'_>, name: &str) {
    if !ctx.grid_systems.contains_key(name) {
        debug!("Creating grid system '{}' for an undeclared reference", name);
        add_grid_system(ctx, name, DEFAULT_BUBBLE_SIZE);
    }
}

fn push_grid(
    ctx: &mut ImportContext<'_>,
    system: &str,
    label: &str,
    start: Point2D,
    end: Point2D,
    (bubble_at_start, bubble_at_end): (bool, bool),
) {
    let grid = Grid {
        id: ctx.ids.generate(IdCategory::Grid),
        name: label.to_string(),
        system: system.to_string(),
        start,
        end,
        bubble_at_start,
        bubble_at_end,
    };
    ctx.model.layout.grids.push(grid);
}

/// Trim orthogonal grids to the model's plan extents plus padding
pub fn fit_grids(ctx: &mut ImportContext<'_>) -> Result<()> {
    if !ctx.config.fit_grids_to_model {
        return Ok(());
    }
    let Some(bounds) = ctx.model.plan_bounds() else {
        return Ok(());
    };
    let pad = ctx.config.grid_padding;
    for grid in &mut ctx.model.layout.grids {
        match grid.orientation() {
            GridOrientation::Orthogonal {
                axis: GridAxis::X, ..
            } => grid.respan(bounds.min.y - pad, bounds.max.y + pad),
            GridOrientation::Orthogonal {
                axis: GridAxis::Y, ..
            } => grid.respan(bounds.min.x - pad, bounds.max.x + pad),
            GridOrientation::General => {}
        }
    }
    Ok(())
}
