// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! State threaded through the export stages

use crate::connectivity::{ConnectivityRecord, SupportRow};
use crate::format::Statement;
use crate::ExportConfig;
use e2k_model::elevation::external_story_name;
use e2k_model::{
    resolve_level, resolve_name, Diagnostics, Error, Id, Level, NamedEntity, Point2D,
    PointRegistry, ReferenceKind, Result, SectionKind, StructuralModel,
};
use std::fmt::Write;

/// Leading indent of every statement
const INDENT: &str = "  ";

/// Everything an export stage reads from or writes to
///
/// The text buffer only becomes the export result once every stage has
/// succeeded.
pub struct ExportContext<'m> {
    pub config: &'m ExportConfig,
    pub model: &'m StructuralModel,
    pub diagnostics: Diagnostics,

    /// Plan points of this pass, numbered in registration order
    pub points: PointRegistry<Point2D>,
    /// `LINE` records with their assignment rows
    pub lines: Vec<ConnectivityRecord>,
    /// `AREA` records with their assignment rows
    pub areas: Vec<ConnectivityRecord>,
    pub supports: Vec<SupportRow>,

    pub out: String,
}

impl<'m> ExportContext<'m> {
    pub fn new(model: &'m StructuralModel, config: &'m ExportConfig) -> Self {
        Self {
            config,
            model,
            diagnostics: Diagnostics::new(),
            points: PointRegistry::new(),
            lines: Vec::new(),
            areas: Vec::new(),
            supports: Vec::new(),
            out: String::new(),
        }
    }

    /// Write a `$ TITLE` header, separated from the previous section
    pub fn begin_section(&mut self, kind: SectionKind) -> Result<()> {
        if !self.out.is_empty() {
            writeln!(self.out)?;
        }
        writeln!(self.out, "$ {}", kind.title())?;
        Ok(())
    }

    pub fn statement(&mut self, statement: &Statement) -> Result<()> {
        writeln!(self.out, "{}{}", INDENT, statement)?;
        Ok(())
    }

    /// Level by id with the lowest-level fallback
    pub fn level(&mut self, id: &Id, context: &str) -> Result<&'m Level> {
        let model = self.model;
        resolve_level(&model.layout, id, context, &mut self.diagnostics)
            .ok_or_else(|| Error::missing("levels"))
    }

    /// External story name of a level
    pub fn story_name(&mut self, id: &Id, context: &str) -> Result<String> {
        Ok(external_story_name(&self.level(id, context)?.name))
    }

    /// Name of a referenced entity, substituted when the id is unknown
    pub fn name_of<T: NamedEntity>(
        &mut self,
        items: &'m [T],
        id: &Id,
        kind: ReferenceKind,
        context: &str,
    ) -> String {
        resolve_name(items, id, kind, context, &mut self.diagnostics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use e2k_model::Level;

    #[test]
    fn test_sections_are_separated() {
        let model = StructuralModel::new();
        let config = ExportConfig::default();
        let mut ctx = ExportContext::new(&model, &config);
        ctx.begin_section(SectionKind::Diaphragms).unwrap();
        ctx.statement(&Statement::new("DIAPHRAGM").quoted("D1").key_word("TYPE", "RIGID"))
            .unwrap();
        ctx.begin_section(SectionKind::EndOfModel).unwrap();
        assert_eq!(
            ctx.out,
            "$ DIAPHRAGM NAMES\n  DIAPHRAGM  \"D1\"  TYPE  RIGID\n\n$ END OF MODEL FILE\n"
        );
    }

    #[test]
    fn test_story_name_fallback() {
        let mut model = StructuralModel::new();
        model.layout.levels.push(Level::new(Id::from("L1"), "1", 120.0));
        model.layout.levels.push(Level::new(Id::from("L0"), "Base", 0.0));
        let config = ExportConfig::default();
        let mut ctx = ExportContext::new(&model, &config);

        assert_eq!(ctx.story_name(&Id::from("L1"), "ctx").unwrap(), "Story1");
        assert_eq!(ctx.story_name(&Id::from("L9"), "ctx").unwrap(), "Base");
        assert_eq!(ctx.diagnostics.substitutions_of(ReferenceKind::Level), 1);
    }

    #[test]
    fn test_level_without_levels_is_an_error() {
        let model = StructuralModel::new();
        let config = ExportConfig::default();
        let mut ctx = ExportContext::new(&model, &config);
        assert!(matches!(
            ctx.level(&Id::from("L1"), "ctx"),
            Err(Error::MissingContainer(_))
        ));
    }
}
