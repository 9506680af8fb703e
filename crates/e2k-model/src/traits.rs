// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Reader and writer interfaces
//!
//! Host adapters depend on these traits rather than on a concrete format
//! backend.

use crate::{Diagnostics, Result, StructuralModel};

/// Result of a successful import
#[derive(Debug)]
pub struct ImportOutcome {
    pub model: StructuralModel,
    pub diagnostics: Diagnostics,
}

/// Result of a successful export
#[derive(Debug)]
pub struct ExportOutcome {
    pub text: String,
    pub diagnostics: Diagnostics,
}

/// Text to model
///
/// # Example
///
/// ```ignore
/// use e2k_model::ModelImporter;
///
/// let importer: Box<dyn ModelImporter> = get_importer();
/// let outcome = importer.import(content)?;
/// println!("{} levels", outcome.model.layout.levels.len());
/// ```
pub trait ModelImporter: Send + Sync {
    /// Parse the whole text into a fresh model
    ///
    /// Each call owns its own id counters and lookup tables.
    fn import(&self, content: &str) -> Result<ImportOutcome>;
}

/// Model to text
pub trait ModelExporter: Send + Sync {
    /// Serialize the whole model; no partial text is returned on failure
    fn export(&self, model: &StructuralModel) -> Result<ExportOutcome>;
}
