// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! E2K Writer - canonical structural model to E2K text
//!
//! This crate serializes an [`e2k_model::StructuralModel`] into E2K text. It
//! implements the [`ModelExporter`] trait defined in `e2k-model`.
//!
//! # Features
//!
//! - **One connectivity engine** - columns, beams, braces, walls and floors
//!   share the same point registration and record deduplication
//! - **Stable output** - exporting a reimported export gives the same text
//! - **All-or-nothing** - a failing stage returns an error and no text
//!
//! # Example
//!
//! ```
//! use e2k_model::{Id, Level, StructuralModel};
//! use e2k_writer::E2kExporter;
//!
//! let mut model = StructuralModel::new();
//! model.layout.levels.push(Level::new(Id::from("L0"), "Base", 0.0));
//! model.layout.levels.push(Level::new(Id::from("L1"), "1", 120.0));
//!
//! let outcome = E2kExporter::new().export(&model).unwrap();
//! assert!(outcome.text.contains("STORY  \"Story1\"  HEIGHT  120"));
//! assert!(outcome.diagnostics.is_empty());
//! ```

mod connectivity;
mod context;
mod format;
mod pipeline;
mod sections;

pub use connectivity::{
    build_records, Assignment, AssignmentRow, ConnectivityRecord, DedupPolicy, FrameAssignment,
    KindDescriptor, Member, MemberGeometry, RecordShape,
};
pub use format::{format_number, sanitize_name, Statement};
pub use pipeline::ExportStage;

use e2k_model::{ExportOutcome, ModelExporter, Result, StructuralModel};
use serde::{Deserialize, Serialize};

/// Export settings
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// `PROGRAM` name written in the header
    pub program_name: String,
    pub program_version: String,
    /// Save stamp written as a leading comment when set
    pub timestamp: Option<String>,
    /// Write a linear static case per load pattern
    pub emit_load_cases: bool,
    /// Write non-lateral beams without releases as pinned
    pub pin_gravity_beams: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            program_name: "ETABS".to_string(),
            program_version: "9.7.4".to_string(),
            timestamp: None,
            emit_load_cases: true,
            pin_gravity_beams: true,
        }
    }
}

impl ExportConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the program name and version of the header
    pub fn with_program(mut self, name: impl Into<String>, version: impl Into<String>) -> Self {
        self.program_name = name.into();
        self.program_version = version.into();
        self
    }

    /// Set the save stamp comment
    pub fn with_timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = Some(timestamp.into());
        self
    }

    /// Set whether load cases are written
    pub fn with_load_cases(mut self, enabled: bool) -> Self {
        self.emit_load_cases = enabled;
        self
    }

    /// Set whether gravity beams are pinned
    pub fn with_gravity_beam_pins(mut self, enabled: bool) -> Self {
        self.pin_gravity_beams = enabled;
        self
    }
}

/// E2K writer implementing `ModelExporter`
///
/// Every export runs with a fresh point registry, so point numbering only
/// depends on the model.
#[derive(Clone, Debug, Default)]
pub struct E2kExporter {
    config: ExportConfig,
}

impl E2kExporter {
    /// Create an exporter with default settings
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ExportConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    /// Serialize a model into E2K text and its diagnostics
    pub fn export(&self, model: &StructuralModel) -> Result<ExportOutcome> {
        pipeline::run_export(model, &self.config)
    }
}

impl ModelExporter for E2kExporter {
    fn export(&self, model: &StructuralModel) -> Result<ExportOutcome> {
        E2kExporter::export(self, model)
    }
}

/// Quick export function for simple use cases
pub fn write(model: &StructuralModel) -> Result<ExportOutcome> {
    E2kExporter::new().export(model)
}
