// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Point, line and area assignment rows

use crate::connectivity::{Assignment, AssignmentRow, ConnectivityRecord, FrameAssignment};
use crate::context::ExportContext;
use crate::format::Statement;
use e2k_model::{Result, SectionKind};

pub fn write_point_assigns(ctx: &mut ExportContext<'_>) -> Result<()> {
    let statements: Vec<Statement> = ctx
        .supports
        .iter()
        .map(|support| {
            Statement::new("POINTASSIGN")
                .quoted(&support.point.to_string())
                .quoted(&support.story)
                .key_quoted("RESTRAINT", support.restraint.as_e2k())
        })
        .collect();
    ctx.begin_section(SectionKind::PointAssigns)?;
    for st in &statements {
        ctx.statement(st)?;
    }
    Ok(())
}

fn frame_row(st: Statement, frame: &FrameAssignment) -> Statement {
    let mut st = st.key_quoted("SECTION", &frame.section);
    if frame.angle != 0.0 {
        st = st.key_number("ANG", frame.angle);
    }
    if !frame.releases.is_empty() {
        st = st.key_quoted("RELEASE", &frame.releases.to_e2k());
    }
    if let Some(procedure) = frame.design_procedure {
        st = st.key_quoted("DESIGNPROCTYPE", procedure);
    }
    for (field, value) in &frame.modifiers {
        st = st.key_number(field.assign_keyword(), *value);
    }
    st
}

fn row_statement(keyword: &str, record: &ConnectivityRecord, row: &AssignmentRow) -> Statement {
    let st = Statement::new(keyword)
        .quoted(&record.label)
        .quoted(&row.story);
    match &row.assignment {
        Assignment::Frame(frame) => frame_row(st, frame),
        Assignment::Wall { section } => st.key_quoted("SECTION", section),
        Assignment::Floor {
            section,
            diaphragm,
            load_set,
        } => {
            let mut st = st.key_quoted("SECTION", section);
            if let Some(diaphragm) = diaphragm {
                st = st.key_quoted("DIAPHRAGM", diaphragm);
            }
            if let Some(set) = load_set {
                st = st.key_quoted("SHELLUNIFORMLOADSET", set);
            }
            st
        }
    }
}

fn row_statements(keyword: &str, records: &[ConnectivityRecord]) -> Vec<Statement> {
    records
        .iter()
        .flat_map(|record| {
            record
                .rows
                .iter()
                .map(move |row| row_statement(keyword, record, row))
        })
        .collect()
}

pub fn write_line_assigns(ctx: &mut ExportContext<'_>) -> Result<()> {
    let statements = row_statements("LINEASSIGN", &ctx.lines);
    ctx.begin_section(SectionKind::LineAssigns)?;
    for st in &statements {
        ctx.statement(st)?;
    }
    Ok(())
}

pub fn write_area_assigns(ctx: &mut ExportContext<'_>) -> Result<()> {
    let statements = row_statements("AREAASSIGN", &ctx.areas);
    ctx.begin_section(SectionKind::AreaAssigns)?;
    for st in &statements {
        ctx.statement(st)?;
    }
    Ok(())
}
