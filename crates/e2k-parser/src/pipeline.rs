// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Import pipeline
//!
//! Scans the text into sections, parses every statement, then runs the
//! section importers in dependency order. A stage with no statements is
//! skipped; a failing stage aborts the import and the partial model is
//! dropped.

use crate::context::{ImportContext, ParsedLine};
use crate::grammar::parse_record;
use crate::scanner::scan_sections;
use crate::sections::*;
use crate::ImportConfig;
use e2k_model::{Diagnostics, Error, ImportOutcome, Result, SectionKind};
use log::{debug, info};
use rustc_hash::FxHashMap;

/// Import stages in execution order
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImportStage {
    Header,
    Stories,
    Grids,
    Diaphragms,
    Materials,
    FrameSections,
    ShellProperties,
    Points,
    Lines,
    Areas,
    LoadPatterns,
    LoadCases,
    ShellLoadSets,
    PointAssigns,
    LineAssigns,
    AreaAssigns,
    Combinations,
    GridFitting,
}

impl ImportStage {
    pub const ALL: [ImportStage; 18] = [
        ImportStage::Header,
        ImportStage::Stories,
        ImportStage::Grids,
        ImportStage::Diaphragms,
        ImportStage::Materials,
        ImportStage::FrameSections,
        ImportStage::ShellProperties,
        ImportStage::Points,
        ImportStage::Lines,
        ImportStage::Areas,
        ImportStage::LoadPatterns,
        ImportStage::LoadCases,
        ImportStage::ShellLoadSets,
        ImportStage::PointAssigns,
        ImportStage::LineAssigns,
        ImportStage::AreaAssigns,
        ImportStage::Combinations,
        ImportStage::GridFitting,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ImportStage::Header => "header",
            ImportStage::Stories => "stories",
            ImportStage::Grids => "grids",
            ImportStage::Diaphragms => "diaphragms",
            ImportStage::Materials => "materials",
            ImportStage::FrameSections => "frame sections",
            ImportStage::ShellProperties => "shell properties",
            ImportStage::Points => "point coordinates",
            ImportStage::Lines => "line connectivities",
            ImportStage::Areas => "area connectivities",
            ImportStage::LoadPatterns => "load patterns",
            ImportStage::LoadCases => "load cases",
            ImportStage::ShellLoadSets => "shell load sets",
            ImportStage::PointAssigns => "point assigns",
            ImportStage::LineAssigns => "line assigns",
            ImportStage::AreaAssigns => "area assigns",
            ImportStage::Combinations => "load combinations",
            ImportStage::GridFitting => "grid fitting",
        }
    }

    /// Sections whose statements feed the stage
    pub fn sections(&self) -> &'static [SectionKind] {
        match self {
            ImportStage::Header => &[SectionKind::ProgramInformation, SectionKind::Controls],
            ImportStage::Stories => &[SectionKind::Stories],
            ImportStage::Grids => &[SectionKind::Grids],
            ImportStage::Diaphragms => &[SectionKind::Diaphragms],
            ImportStage::Materials => &[SectionKind::Materials],
            ImportStage::FrameSections => &[SectionKind::FrameSections],
            ImportStage::ShellProperties => &[SectionKind::ShellProperties],
            ImportStage::Points => &[SectionKind::PointCoordinates],
            ImportStage::Lines => &[SectionKind::LineConnectivities],
            ImportStage::Areas => &[SectionKind::AreaConnectivities],
            ImportStage::LoadPatterns => &[SectionKind::LoadPatterns],
            ImportStage::LoadCases => &[SectionKind::LoadCases],
            ImportStage::ShellLoadSets => &[SectionKind::ShellUniformLoadSets],
            ImportStage::PointAssigns => &[SectionKind::PointAssigns],
            ImportStage::LineAssigns => &[SectionKind::LineAssigns],
            ImportStage::AreaAssigns => &[SectionKind::AreaAssigns],
            ImportStage::Combinations => &[SectionKind::LoadCombinations],
            ImportStage::GridFitting => &[SectionKind::Grids],
        }
    }

    fn run(&self, ctx: &mut ImportContext<'_>, lines: &[ParsedLine<'_>]) -> Result<()> {
        match self {
            ImportStage::Header => import_header(ctx, lines),
            ImportStage::Stories => import_stories(ctx, lines),
            ImportStage::Grids => import_grids(ctx, lines),
            ImportStage::Diaphragms => import_diaphragms(ctx, lines),
            ImportStage::Materials => import_materials(ctx, lines),
            ImportStage::FrameSections => import_frame_sections(ctx, lines),
            ImportStage::ShellProperties => import_shell_properties(ctx, lines),
            ImportStage::Points => import_points(ctx, lines),
            ImportStage::Lines => import_lines(ctx, lines),
            ImportStage::Areas => import_areas(ctx, lines),
            ImportStage::LoadPatterns => import_load_patterns(ctx, lines),
            ImportStage::LoadCases => import_load_cases(ctx, lines),
            ImportStage::ShellLoadSets => import_load_sets(ctx, lines),
            ImportStage::PointAssigns => import_point_assigns(ctx, lines),
            ImportStage::LineAssigns => import_line_assigns(ctx, lines),
            ImportStage::AreaAssigns => import_area_assigns(ctx, lines),
            ImportStage::Combinations => import_combinations(ctx, lines),
            ImportStage::GridFitting => fit_grids(ctx),
        }
    }
}

/// Statements of every recognized section, grouped by section kind
fn parse_sections<'a>(
    content: &'a str,
    diagnostics: &mut Diagnostics,
) -> Result<FxHashMap<SectionKind, Vec<ParsedLine<'a>>>> {
    let sections = scan_sections(content);
    if !sections.iter().any(|s| s.kind.is_some()) {
        return Err(Error::format("no recognized E2K section headers"));
    }

    let mut parsed: FxHashMap<SectionKind, Vec<ParsedLine<'a>>> = FxHashMap::default();
    for section in sections {
        let Some(kind) = section.kind else {
            debug!(
                "Skipping section '{}' ({} lines)",
                section.title,
                section.lines.len()
            );
            continue;
        };
        let statements = parsed.entry(kind).or_default();
        for line in section.lines {
            match parse_record(kind, line.text) {
                Ok(record) => statements.push(ParsedLine {
                    section: kind,
                    number: line.number,
                    text: line.text,
                    record,
                }),
                Err(reason) => {
                    diagnostics.malformed_line(kind.title(), line.number, line.text, reason)
                }
            }
        }
    }
    Ok(parsed)
}

/// Run the full import
pub fn run_import(content: &str, config: &ImportConfig) -> Result<ImportOutcome> {
    let mut ctx = ImportContext::new(config);
    let parsed = parse_sections(content, &mut ctx.diagnostics)?;

    for stage in ImportStage::ALL {
        let lines: Vec<ParsedLine<'_>> = stage
            .sections()
            .iter()
            .filter_map(|kind| parsed.get(kind))
            .flatten()
            .cloned()
            .collect();
        if lines.is_empty() {
            continue;
        }
        debug!("Import stage '{}': {} statements", stage.name(), lines.len());
        stage
            .run(&mut ctx, &lines)
            .map_err(|e| Error::stage(stage.name(), e))?;
    }

    let ImportContext {
        model, diagnostics, ..
    } = ctx;
    info!(
        "Imported {} levels, {} elements with {} diagnostics",
        model.layout.levels.len(),
        model.elements.len(),
        diagnostics.len()
    );
    Ok(ImportOutcome { model, diagnostics })
}
