// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Load patterns, surface load sets, load cases and combinations

use crate::context::ExportContext;
use crate::format::Statement;
use e2k_model::{LoadType, ReferenceKind, Result, SectionKind};

const LINEAR_STATIC: &str = "Linear Static";

/// Patterns with their self-weight multiplier
///
/// Only the first dead pattern carries self weight.
pub fn write_load_patterns(ctx: &mut ExportContext<'_>) -> Result<()> {
    let model = ctx.model;
    ctx.begin_section(SectionKind::LoadPatterns)?;
    let mut self_weight_taken = false;
    for load in &model.loads.load_definitions {
        let self_weight = if load.load_type == LoadType::Dead && !self_weight_taken {
            self_weight_taken = true;
            1.0
        } else {
            0.0
        };
        ctx.statement(
            &Statement::new("LOADPATTERN")
                .quoted(&load.name)
                .key_quoted("TYPE", load.load_type.as_e2k())
                .key_number("SELFWEIGHT", self_weight),
        )?;
    }
    Ok(())
}

/// One line per filled slot of each surface load, dead before live
pub fn write_load_sets(ctx: &mut ExportContext<'_>) -> Result<()> {
    let model = ctx.model;
    let definitions = &model.loads.load_definitions;
    ctx.begin_section(SectionKind::ShellUniformLoadSets)?;
    for surface in &model.loads.surface_loads {
        let context = format!("surface load {}", surface.name);
        let slots = [
            (&surface.dead_load_id, surface.dead_value),
            (&surface.live_load_id, surface.live_value),
        ];
        for (load_id, value) in slots {
            let Some(load_id) = load_id else {
                continue;
            };
            let pattern = ctx.name_of(definitions, load_id, ReferenceKind::LoadDefinition, &context);
            ctx.statement(
                &Statement::new("SHELLUNIFORMLOADSET")
                    .quoted(&surface.name)
                    .key_quoted("LOADPAT", &pattern)
                    .key_number("VALUE", value),
            )?;
        }
    }
    Ok(())
}

/// A linear static case per load pattern, named after it
pub fn write_load_cases(ctx: &mut ExportContext<'_>) -> Result<()> {
    let model = ctx.model;
    ctx.begin_section(SectionKind::LoadCases)?;
    for load in &model.loads.load_definitions {
        ctx.statement(
            &Statement::new("LOADCASE")
                .quoted(&load.name)
                .key_quoted("TYPE", LINEAR_STATIC),
        )?;
        ctx.statement(
            &Statement::new("LOADCASE")
                .quoted(&load.name)
                .key_quoted("LOADPAT", &load.name)
                .key_number("SF", 1.0),
        )?;
    }
    Ok(())
}

pub fn write_combinations(ctx: &mut ExportContext<'_>) -> Result<()> {
    let model = ctx.model;
    let definitions = &model.loads.load_definitions;
    ctx.begin_section(SectionKind::LoadCombinations)?;
    for combination in &model.loads.load_combinations {
        let context = format!("combination {}", combination.name);
        ctx.statement(
            &Statement::new("COMBO")
                .quoted(&combination.name)
                .key_quoted("TYPE", combination.combination_type.as_e2k()),
        )?;
        for factor in &combination.factors {
            let case = ctx.name_of(
                definitions,
                &factor.load_id,
                ReferenceKind::LoadDefinition,
                &context,
            );
            ctx.statement(
                &Statement::new("COMBO")
                    .quoted(&combination.name)
                    .key_quoted("LOADCASE", &case)
                    .key_number("SF", factor.scale),
            )?;
        }
    }
    Ok(())
}
