// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! E2K Parser - E2K text to canonical structural model
//!
//! This crate reads E2K structural model files into an
//! [`e2k_model::StructuralModel`]. It implements the [`ModelImporter`] trait
//! defined in `e2k-model`.
//!
//! # Features
//!
//! - **Fast line scanning** using `memchr`
//! - **Statement tokenization** using `nom` combinators
//! - **One grammar rule per keyword** - malformed lines are skipped and reported
//! - **Consistent reference fallback** - unresolved names go through one diagnostics sink
//!
//! # Example
//!
//! ```
//! use e2k_parser::E2kImporter;
//!
//! let text = "$ STORIES - IN SEQUENCE FROM TOP\n\
//!             STORY \"Story1\"  HEIGHT 120\n\
//!             STORY \"Base\"  ELEV 0\n";
//! let outcome = E2kImporter::new().import(text).unwrap();
//! assert_eq!(outcome.model.layout.levels.len(), 2);
//! assert!(outcome.diagnostics.is_empty());
//! ```

mod context;
mod grammar;
mod pipeline;
mod scanner;
mod sections;
mod tokenizer;

pub use grammar::{
    parse_record, AreaAssignRecord, AreaRecord, ComboRecord, DeckFields, FrameSectionRecord,
    GenGridRecord, GridRecord, GridSystemRecord, LineAssignRecord, LineRecord, LoadCaseRecord,
    LoadPatternRecord, MaterialRecord, PointAssignRecord, PointRecord, Record, ShellLoadSetRecord,
    ShellPropRecord, ShellPropType,
};
pub use pipeline::ImportStage;
pub use scanner::{scan_sections, Section, SourceLine};
pub use tokenizer::{tokenize, Token};

use e2k_model::{ImportOutcome, ModelImporter, Result};
use serde::{Deserialize, Serialize};

/// Import settings
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportConfig {
    /// Half-length of synthesized orthogonal grid lines
    pub grid_extent: f64,
    /// Margin around the model when fitting grids
    pub grid_padding: f64,
    /// Trim orthogonal grids to the model's plan extents
    pub fit_grids_to_model: bool,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            grid_extent: 12_000.0,
            grid_padding: 120.0,
            fit_grids_to_model: true,
        }
    }
}

impl ImportConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the half-length of synthesized grid lines
    pub fn with_grid_extent(mut self, extent: f64) -> Self {
        self.grid_extent = extent;
        self
    }

    /// Set the grid fitting margin
    pub fn with_grid_padding(mut self, padding: f64) -> Self {
        self.grid_padding = padding;
        self
    }

    /// Set whether grids are fitted to the model
    pub fn with_grid_fitting(mut self, enabled: bool) -> Self {
        self.fit_grids_to_model = enabled;
        self
    }
}

/// E2K reader implementing `ModelImporter`
///
/// Every import runs with fresh id counters and lookup tables, so one
/// importer can be shared freely.
#[derive(Clone, Debug, Default)]
pub struct E2kImporter {
    config: ImportConfig,
}

impl E2kImporter {
    /// Create an importer with default settings
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ImportConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ImportConfig {
        &self.config
    }

    /// Parse E2K text into a model and its diagnostics
    pub fn import(&self, content: &str) -> Result<ImportOutcome> {
        pipeline::run_import(content, &self.config)
    }
}

impl ModelImporter for E2kImporter {
    fn import(&self, content: &str) -> Result<ImportOutcome> {
        E2kImporter::import(self, content)
    }
}

/// Quick parse function for simple use cases
pub fn parse(content: &str) -> Result<ImportOutcome> {
    E2kImporter::new().import(content)
}
