// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Diagnostics sink for recoverable problems
//!
//! Malformed lines and unresolved references never abort a pipeline run.
//! They are recorded here, logged at `warn` level, and handed back to the
//! caller next to the result.

use log::warn;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of entity a reference points to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReferenceKind {
    Level,
    FloorType,
    Material,
    FrameProperties,
    WallProperties,
    FloorProperties,
    Diaphragm,
    LoadDefinition,
    SurfaceLoad,
    Point,
    Line,
    Area,
}

impl fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ReferenceKind::Level => "level",
            ReferenceKind::FloorType => "floor type",
            ReferenceKind::Material => "material",
            ReferenceKind::FrameProperties => "frame section",
            ReferenceKind::WallProperties => "wall property",
            ReferenceKind::FloorProperties => "floor property",
            ReferenceKind::Diaphragm => "diaphragm",
            ReferenceKind::LoadDefinition => "load pattern",
            ReferenceKind::SurfaceLoad => "surface load",
            ReferenceKind::Point => "point",
            ReferenceKind::Line => "line",
            ReferenceKind::Area => "area",
        };
        f.write_str(name)
    }
}

/// A single recorded problem
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Diagnostic {
    /// A line in a recognized section did not match its grammar and was skipped
    MalformedLine {
        section: String,
        line: usize,
        text: String,
        reason: String,
    },
    /// A reference could not be resolved and a default was used instead
    Substitution {
        kind: ReferenceKind,
        requested: String,
        substituted: String,
        context: String,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::MalformedLine {
                section,
                line,
                text,
                reason,
            } => write!(f, "line {} in {}: {} ({})", line, section, reason, text),
            Diagnostic::Substitution {
                kind,
                requested,
                substituted,
                context,
            } => write!(
                f,
                "{}: {} '{}' not found, using '{}'",
                context, kind, requested, substituted
            ),
        }
    }
}

/// Collected diagnostics of one pipeline run
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a skipped line
    pub fn malformed_line(
        &mut self,
        section: impl Into<String>,
        line: usize,
        text: impl Into<String>,
        reason: impl Into<String>,
    ) {
        self.push(Diagnostic::MalformedLine {
            section: section.into(),
            line,
            text: text.into(),
            reason: reason.into(),
        });
    }

    /// Record a default substitution for an unresolved reference
    pub fn substitution(
        &mut self,
        kind: ReferenceKind,
        requested: impl Into<String>,
        substituted: impl Into<String>,
        context: impl Into<String>,
    ) {
        self.push(Diagnostic::Substitution {
            kind,
            requested: requested.into(),
            substituted: substituted.into(),
            context: context.into(),
        });
    }

    fn push(&mut self, diagnostic: Diagnostic) {
        warn!("{}", diagnostic);
        self.entries.push(diagnostic);
    }

    pub fn entries(&self) -> &[Diagnostic] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn malformed_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|d| matches!(d, Diagnostic::MalformedLine { .. }))
            .count()
    }

    pub fn substitution_count(&self) -> usize {
        self.entries.len() - self.malformed_count()
    }

    /// Number of substitutions for one reference kind
    pub fn substitutions_of(&self, kind: ReferenceKind) -> usize {
        self.entries
            .iter()
            .filter(|d| matches!(d, Diagnostic::Substitution { kind: k, .. } if *k == kind))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.malformed_line("STORIES", 12, "STORY", "missing name");
        diagnostics.substitution(ReferenceKind::Material, "A36", "A992", "frame section W10");
        diagnostics.substitution(ReferenceKind::Level, "Story9", "Base", "column C1");

        assert_eq!(diagnostics.len(), 3);
        assert_eq!(diagnostics.malformed_count(), 1);
        assert_eq!(diagnostics.substitution_count(), 2);
        assert_eq!(diagnostics.substitutions_of(ReferenceKind::Material), 1);
        assert_eq!(diagnostics.substitutions_of(ReferenceKind::Diaphragm), 0);
    }

    #[test]
    fn test_display() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.substitution(ReferenceKind::Level, "Story9", "Base", "column C1");
        assert_eq!(
            diagnostics.entries()[0].to_string(),
            "column C1: level 'Story9' not found, using 'Base'"
        );
    }
}
