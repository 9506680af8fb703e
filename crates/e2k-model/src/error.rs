// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for E2K import and export

use thiserror::Error;

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that abort an import or export
///
/// Malformed lines and unresolved references are not errors; they are
/// recorded in [`Diagnostics`](crate::Diagnostics).
#[derive(Error, Debug)]
pub enum Error {
    /// Input is not an E2K file
    #[error("Invalid E2K format: {0}")]
    InvalidFormat(String),

    /// A container the stage depends on is missing or empty
    #[error("Missing {0}")]
    MissingContainer(String),

    /// The model cannot be expressed in E2K
    #[error("Structural failure: {0}")]
    Structural(String),

    /// A pipeline stage failed
    #[error("Stage '{stage}' failed: {source}")]
    Stage {
        stage: String,
        #[source]
        source: Box<Error>,
    },

    /// Text formatting error
    #[error("Formatting error: {0}")]
    Fmt(#[from] std::fmt::Error),

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a new format error
    pub fn format(msg: impl Into<String>) -> Self {
        Error::InvalidFormat(msg.into())
    }

    /// Create a new missing-container error
    pub fn missing(what: impl Into<String>) -> Self {
        Error::MissingContainer(what.into())
    }

    /// Create a new structural error
    pub fn structural(msg: impl Into<String>) -> Self {
        Error::Structural(msg.into())
    }

    /// Wrap an error with the name of the stage it came from
    pub fn stage(stage: impl Into<String>, source: Error) -> Self {
        Error::Stage {
            stage: stage.into(),
            source: Box::new(source),
        }
    }

    /// Create a generic error
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Name of the failing stage, if the error was raised inside a pipeline
    pub fn stage_name(&self) -> Option<&str> {
        match self {
            Error::Stage { stage, .. } => Some(stage),
            _ => None,
        }
    }
}
