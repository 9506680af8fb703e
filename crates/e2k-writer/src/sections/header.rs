// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::context::ExportContext;
use crate::format::Statement;
use e2k_model::{Result, SectionKind};
use std::fmt::Write;

/// Optional save stamp and the producing program
pub fn write_program(ctx: &mut ExportContext<'_>) -> Result<()> {
    if let Some(timestamp) = &ctx.config.timestamp {
        writeln!(ctx.out, "$ File saved {}", timestamp)?;
    }
    ctx.begin_section(SectionKind::ProgramInformation)?;
    let config = ctx.config;
    ctx.statement(
        &Statement::new("PROGRAM")
            .quoted(&config.program_name)
            .key_quoted("VERSION", &config.program_version),
    )
}

/// Units and title
pub fn write_controls(ctx: &mut ExportContext<'_>) -> Result<()> {
    let model = ctx.model;
    let metadata = &model.metadata;
    ctx.begin_section(SectionKind::Controls)?;
    ctx.statement(
        &Statement::new("UNITS")
            .quoted(&metadata.units.force)
            .quoted(&metadata.units.length)
            .quoted(&metadata.units.temperature),
    )?;
    if let Some(title) = &metadata.title {
        ctx.statement(&Statement::new("TITLE1").quoted(title))?;
    }
    Ok(())
}

pub fn write_end(ctx: &mut ExportContext<'_>) -> Result<()> {
    ctx.begin_section(SectionKind::EndOfModel)
}
