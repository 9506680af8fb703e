// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Stories and grids

use crate::context::ExportContext;
use crate::format::Statement;
use e2k_model::elevation::story_declarations;
use e2k_model::{Grid, GridOrientation, Result, SectionKind};
use log::debug;

const DEFAULT_BUBBLE_SIZE: f64 = 60.0;

/// Stories top of building down
pub fn write_stories(ctx: &mut ExportContext<'_>) -> Result<()> {
    let declarations = story_declarations(&ctx.model.layout);
    ctx.begin_section(SectionKind::Stories)?;
    for decl in &declarations {
        let mut st = Statement::new("STORY").quoted(&decl.name);
        st = match (decl.height, decl.elevation) {
            (Some(height), _) => st.key_number("HEIGHT", height),
            (None, Some(elevation)) => st.key_number("ELEV", elevation),
            (None, None) => st.key_number("ELEV", 0.0),
        };
        if decl.master {
            st = st.key_quoted("MASTERSTORY", "Yes");
        }
        if let Some(master) = &decl.similar_to {
            st = st.key_quoted("SIMILARTO", master);
        }
        ctx.statement(&st)?;
    }
    Ok(())
}

fn bubble_location(grid: &Grid) -> &'static str {
    match (grid.bubble_at_start, grid.bubble_at_end) {
        (true, true) => "Both",
        (true, false) => "Start",
        (false, true) => "End",
        (false, false) => "None",
    }
}

/// Grid systems, then their orthogonal and general grid lines
///
/// A grid naming a system that was never declared gets the system declared
/// with the default bubble size.
pub fn write_grids(ctx: &mut ExportContext<'_>) -> Result<()> {
    let model = ctx.model;
    let layout = &model.layout;
    let mut systems: Vec<(&str, f64)> = layout
        .grid_systems
        .iter()
        .map(|s| (s.name.as_str(), s.bubble_size))
        .collect();
    for grid in &layout.grids {
        if !systems.iter().any(|(name, _)| *name == grid.system) {
            debug!("Declaring grid system '{}' used by grid {}", grid.system, grid.name);
            systems.push((grid.system.as_str(), DEFAULT_BUBBLE_SIZE));
        }
    }

    let mut statements = Vec::with_capacity(systems.len() + layout.grids.len());
    for (name, bubble_size) in &systems {
        statements.push(
            Statement::new("GRIDSYSTEM")
                .quoted(name)
                .key_quoted("TYPE", "CARTESIAN")
                .key_number("BUBBLESIZE", *bubble_size),
        );
    }
    for grid in &layout.grids {
        let st = match grid.orientation() {
            GridOrientation::Orthogonal { axis, coordinate } => Statement::new("GRID")
                .quoted(&grid.system)
                .key_quoted("LABEL", &grid.name)
                .key_quoted("DIR", axis.as_e2k())
                .key_number("COORD", coordinate),
            GridOrientation::General => Statement::new("GENGRID")
                .quoted(&grid.system)
                .key_quoted("LABEL", &grid.name)
                .key_number("X1", grid.start.x)
                .key_number("Y1", grid.start.y)
                .key_number("X2", grid.end.x)
                .key_number("Y2", grid.end.y),
        };
        statements.push(
            st.key_quoted("VISIBLE", "Yes")
                .key_quoted("BUBBLELOC", bubble_location(grid)),
        );
    }

    ctx.begin_section(SectionKind::Grids)?;
    for st in &statements {
        ctx.statement(st)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ExportConfig;
    use e2k_model::{GridSystem, Id, Level, Point2D, StructuralModel};

    fn grid(name: &str, system: &str, start: (f64, f64), end: (f64, f64)) -> Grid {
        Grid {
            id: Id::new(format!("GRID-{}", name)),
            name: name.to_string(),
            system: system.to_string(),
            start: Point2D::new(start.0, start.1),
            end: Point2D::new(end.0, end.1),
            bubble_at_start: false,
            bubble_at_end: true,
        }
    }

    #[test]
    fn test_stories_top_down() {
        let mut model = StructuralModel::new();
        model.layout.levels = vec![
            Level::new(Id::from("L1"), "1", 120.0),
            Level::new(Id::from("L0"), "Base", 0.0),
            Level::new(Id::from("L2"), "2", 264.0),
        ];
        let config = ExportConfig::default();
        let mut ctx = ExportContext::new(&model, &config);
        write_stories(&mut ctx).unwrap();
        assert_eq!(
            ctx.out,
            "$ STORIES - IN SEQUENCE FROM TOP\n\
             \x20 STORY  \"Story2\"  HEIGHT  144\n\
             \x20 STORY  \"Story1\"  HEIGHT  120\n\
             \x20 STORY  \"Base\"  ELEV  0\n"
        );
    }

    #[test]
    fn test_grids() {
        let mut model = StructuralModel::new();
        model.layout.grid_systems.push(GridSystem {
            id: Id::from("GS1"),
            name: "G1".to_string(),
            bubble_size: 48.0,
        });
        let mut a = grid("A", "G1", (0.0, -100.0), (0.0, 500.0));
        a.bubble_at_start = true;
        a.bubble_at_end = false;
        let mut angled = grid("X", "G2", (0.0, 0.0), (300.0, 400.0));
        angled.bubble_at_end = false;
        model.layout.grids = vec![a, grid("1", "G1", (-50.0, 240.0), (50.0, 240.0)), angled];

        let config = ExportConfig::default();
        let mut ctx = ExportContext::new(&model, &config);
        write_grids(&mut ctx).unwrap();
        let lines: Vec<&str> = ctx.out.lines().collect();
        assert_eq!(
            lines[1],
            "  GRIDSYSTEM  \"G1\"  TYPE  \"CARTESIAN\"  BUBBLESIZE  48"
        );
        assert_eq!(
            lines[2],
            "  GRIDSYSTEM  \"G2\"  TYPE  \"CARTESIAN\"  BUBBLESIZE  60"
        );
        assert_eq!(
            lines[3],
            "  GRID  \"G1\"  LABEL  \"A\"  DIR  \"X\"  COORD  0  VISIBLE  \"Yes\"  BUBBLELOC  \"Start\""
        );
        assert!(lines[4].contains("DIR  \"Y\"  COORD  240"));
        assert_eq!(
            lines[5],
            "  GENGRID  \"G2\"  LABEL  \"X\"  X1  0  Y1  0  X2  300  Y2  400  VISIBLE  \"Yes\"  BUBBLELOC  \"None\""
        );
    }
}
