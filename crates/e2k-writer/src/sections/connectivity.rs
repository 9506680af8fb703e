// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Point coordinates and line/area connectivity

use crate::connectivity::RecordShape;
use crate::context::ExportContext;
use crate::format::Statement;
use e2k_model::{Result, SectionKind};

pub fn write_points(ctx: &mut ExportContext<'_>) -> Result<()> {
    let statements: Vec<Statement> = ctx
        .points
        .iter()
        .map(|(id, p)| {
            Statement::new("POINT")
                .quoted(&id.to_string())
                .number(p.x)
                .number(p.y)
        })
        .collect();
    ctx.begin_section(SectionKind::PointCoordinates)?;
    for st in &statements {
        ctx.statement(st)?;
    }
    Ok(())
}

pub fn write_lines(ctx: &mut ExportContext<'_>) -> Result<()> {
    let mut statements = Vec::with_capacity(ctx.lines.len());
    for record in &ctx.lines {
        if let RecordShape::Line { i, j, span } = record.shape {
            statements.push(
                Statement::new("LINE")
                    .quoted(&record.label)
                    .word(record.keyword)
                    .quoted(&i.to_string())
                    .quoted(&j.to_string())
                    .count(span as usize),
            );
        }
    }
    ctx.begin_section(SectionKind::LineConnectivities)?;
    for st in &statements {
        ctx.statement(st)?;
    }
    Ok(())
}

pub fn write_areas(ctx: &mut ExportContext<'_>) -> Result<()> {
    let mut statements = Vec::with_capacity(ctx.areas.len());
    for record in &ctx.areas {
        if let RecordShape::Area { points, offsets } = &record.shape {
            let mut st = Statement::new("AREA")
                .quoted(&record.label)
                .word(record.keyword)
                .count(points.len());
            for point in points {
                st = st.quoted(&point.to_string());
            }
            for offset in offsets {
                st = st.count(*offset as usize);
            }
            statements.push(st);
        }
    }
    ctx.begin_section(SectionKind::AreaConnectivities)?;
    for st in &statements {
        ctx.statement(st)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connectivity::build_connectivity;
    use crate::ExportConfig;
    use e2k_model::{
        Beam, Column, Id, Level, Point2D, StructuralModel, Wall,
    };

    fn model() -> StructuralModel {
        let mut model = StructuralModel::new();
        model.layout.levels = vec![
            Level::new(Id::from("L0"), "Base", 0.0),
            Level::new(Id::from("L1"), "1", 120.0),
        ];
        model.elements.columns.push(Column::new(
            Id::from("C"),
            Id::from("L0"),
            Id::from("L1"),
            Id::from("P"),
            Point2D::new(0.0, 0.0),
        ));
        model.elements.beams.push(Beam::new(
            Id::from("B"),
            Id::from("L1"),
            Id::from("P"),
            Point2D::new(0.0, 0.0),
            Point2D::new(300.0, 0.0),
        ));
        model.elements.walls.push(Wall {
            id: Id::from("W"),
            base_level_id: Id::from("L0"),
            top_level_id: Id::from("L1"),
            properties_id: Id::from("WP"),
            points: vec![Point2D::new(300.0, 0.0), Point2D::new(300.0, 240.5)],
        });
        model
    }

    #[test]
    fn test_connectivity_statements() {
        let model = model();
        let config = ExportConfig::default();
        let mut ctx = ExportContext::new(&model, &config);
        build_connectivity(&mut ctx).unwrap();
        write_points(&mut ctx).unwrap();
        write_lines(&mut ctx).unwrap();
        write_areas(&mut ctx).unwrap();
        assert_eq!(
            ctx.out,
            "$ POINT COORDINATES\n\
             \x20 POINT  \"1\"  0  0\n\
             \x20 POINT  \"2\"  300  0\n\
             \x20 POINT  \"3\"  300  240.5\n\
             \n\
             $ LINE CONNECTIVITIES\n\
             \x20 LINE  \"C1\"  COLUMN  \"1\"  \"1\"  1\n\
             \x20 LINE  \"B1\"  BEAM  \"1\"  \"2\"  0\n\
             \n\
             $ AREA CONNECTIVITIES\n\
             \x20 AREA  \"W1\"  WALL  4  \"2\"  \"3\"  \"3\"  \"2\"  1  1  0  0\n"
        );
    }
}
