// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Export pipeline
//!
//! Runs the section writers in file order over one [`ExportContext`]. A stage
//! whose input collection is empty is skipped; a failing stage aborts the
//! export and the partial text is dropped.

use crate::connectivity::build_connectivity;
use crate::context::ExportContext;
use crate::sections::*;
use crate::ExportConfig;
use e2k_model::{Error, ExportOutcome, Result, StructuralModel};
use log::{debug, info};

/// Export stages in execution order
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportStage {
    Header,
    Controls,
    Stories,
    Grids,
    Diaphragms,
    Materials,
    FrameSections,
    ShellProperties,
    Connectivity,
    Points,
    Lines,
    Areas,
    PointAssigns,
    LineAssigns,
    AreaAssigns,
    LoadPatterns,
    ShellLoadSets,
    LoadCases,
    Combinations,
    End,
}

impl ExportStage {
    pub const ALL: [ExportStage; 20] = [
        ExportStage::Header,
        ExportStage::Controls,
        ExportStage::Stories,
        ExportStage::Grids,
        ExportStage::Diaphragms,
        ExportStage::Materials,
        ExportStage::FrameSections,
        ExportStage::ShellProperties,
        ExportStage::Connectivity,
        ExportStage::Points,
        ExportStage::Lines,
        ExportStage::Areas,
        ExportStage::PointAssigns,
        ExportStage::LineAssigns,
        ExportStage::AreaAssigns,
        ExportStage::LoadPatterns,
        ExportStage::ShellLoadSets,
        ExportStage::LoadCases,
        ExportStage::Combinations,
        ExportStage::End,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ExportStage::Header => "header",
            ExportStage::Controls => "controls",
            ExportStage::Stories => "stories",
            ExportStage::Grids => "grids",
            ExportStage::Diaphragms => "diaphragms",
            ExportStage::Materials => "materials",
            ExportStage::FrameSections => "frame sections",
            ExportStage::ShellProperties => "shell properties",
            ExportStage::Connectivity => "connectivity",
            ExportStage::Points => "point coordinates",
            ExportStage::Lines => "line connectivities",
            ExportStage::Areas => "area connectivities",
            ExportStage::PointAssigns => "point assigns",
            ExportStage::LineAssigns => "line assigns",
            ExportStage::AreaAssigns => "area assigns",
            ExportStage::LoadPatterns => "load patterns",
            ExportStage::ShellLoadSets => "shell load sets",
            ExportStage::LoadCases => "load cases",
            ExportStage::Combinations => "load combinations",
            ExportStage::End => "end of model",
        }
    }

    /// Whether the stage has anything to write
    ///
    /// Checked right before the stage runs, so writers after
    /// [`ExportStage::Connectivity`] see the records it built.
    fn has_input(&self, ctx: &ExportContext<'_>) -> bool {
        let model = ctx.model;
        let properties = &model.properties;
        let loads = &model.loads;
        match self {
            ExportStage::Header | ExportStage::Controls | ExportStage::End => true,
            ExportStage::Stories => !model.layout.levels.is_empty(),
            ExportStage::Grids => !model.layout.grids.is_empty(),
            ExportStage::Diaphragms => !properties.diaphragms.is_empty(),
            ExportStage::Materials => !properties.materials.is_empty(),
            ExportStage::FrameSections => !properties.frame_properties.is_empty(),
            ExportStage::ShellProperties => {
                !properties.wall_properties.is_empty() || !properties.floor_properties.is_empty()
            }
            ExportStage::Connectivity => !model.elements.is_empty(),
            ExportStage::Points => !ctx.points.is_empty(),
            ExportStage::Lines | ExportStage::LineAssigns => !ctx.lines.is_empty(),
            ExportStage::Areas | ExportStage::AreaAssigns => !ctx.areas.is_empty(),
            ExportStage::PointAssigns => !ctx.supports.is_empty(),
            ExportStage::LoadPatterns => !loads.load_definitions.is_empty(),
            ExportStage::ShellLoadSets => !loads.surface_loads.is_empty(),
            ExportStage::LoadCases => {
                ctx.config.emit_load_cases && !loads.load_definitions.is_empty()
            }
            ExportStage::Combinations => !loads.load_combinations.is_empty(),
        }
    }

    fn run(&self, ctx: &mut ExportContext<'_>) -> Result<()> {
        match self {
            ExportStage::Header => write_program(ctx),
            ExportStage::Controls => write_controls(ctx),
            ExportStage::Stories => write_stories(ctx),
            ExportStage::Grids => write_grids(ctx),
            ExportStage::Diaphragms => write_diaphragms(ctx),
            ExportStage::Materials => write_materials(ctx),
            ExportStage::FrameSections => write_frame_sections(ctx),
            ExportStage::ShellProperties => write_shell_properties(ctx),
            ExportStage::Connectivity => build_connectivity(ctx),
            ExportStage::Points => write_points(ctx),
            ExportStage::Lines => write_lines(ctx),
            ExportStage::Areas => write_areas(ctx),
            ExportStage::PointAssigns => write_point_assigns(ctx),
            ExportStage::LineAssigns => write_line_assigns(ctx),
            ExportStage::AreaAssigns => write_area_assigns(ctx),
            ExportStage::LoadPatterns => write_load_patterns(ctx),
            ExportStage::ShellLoadSets => write_load_sets(ctx),
            ExportStage::LoadCases => write_load_cases(ctx),
            ExportStage::Combinations => write_combinations(ctx),
            ExportStage::End => write_end(ctx),
        }
    }
}

/// Run the full export
pub fn run_export(model: &StructuralModel, config: &ExportConfig) -> Result<ExportOutcome> {
    let mut ctx = ExportContext::new(model, config);

    for stage in ExportStage::ALL {
        if !stage.has_input(&ctx) {
            continue;
        }
        let before = ctx.out.len();
        stage
            .run(&mut ctx)
            .map_err(|e| Error::stage(stage.name(), e))?;
        debug!(
            "Export stage '{}': {} bytes",
            stage.name(),
            ctx.out.len() - before
        );
    }

    let ExportContext {
        out,
        diagnostics,
        points,
        lines,
        areas,
        ..
    } = ctx;
    info!(
        "Exported {} points, {} line and {} area records with {} diagnostics",
        points.len(),
        lines.len(),
        areas.len(),
        diagnostics.len()
    );
    Ok(ExportOutcome {
        text: out,
        diagnostics,
    })
}
