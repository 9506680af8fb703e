// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! E2K Model - Canonical structural model and shared machinery for E2K interchange
//!
//! This crate holds the in-memory building model (levels, grids, materials,
//! sections, elements, loads) together with the pieces both directions of the
//! E2K translation rely on.
//!
//! # Architecture
//!
//! - [`StructuralModel`] - The canonical model and its containers
//! - [`IdAllocator`] - Per-category id generation (`BEAM-1`, `LEVEL-3`, ...)
//! - [`PointRegistry`] - Tolerance-based point deduplication
//! - [`elevation`] - Story elevation and floor-type resolution
//! - [`Diagnostics`] - Sink for malformed lines and reference substitutions
//! - [`ModelImporter`] / [`ModelExporter`] - Format backend interfaces
//! - [`ConnectivityGraph`] - Deduplicated node/edge/face view of a model
//!
//! # Example
//!
//! ```
//! use e2k_model::{Point2D, PointRegistry};
//!
//! let mut registry = PointRegistry::new();
//! let a = registry.get_or_create_id(Point2D::new(0.0, 0.0));
//! let b = registry.get_or_create_id(Point2D::new(0.0, 4e-7));
//! assert_eq!(a, b);
//! ```

pub mod diagnostics;
pub mod elements;
pub mod elevation;
pub mod error;
pub mod format;
pub mod graph;
pub mod ids;
pub mod layout;
pub mod loads;
pub mod model;
pub mod properties;
pub mod registry;
pub mod resolver;
pub mod traits;
pub mod types;

// Re-export all public types
pub use diagnostics::*;
pub use elements::*;
pub use error::*;
pub use format::*;
pub use graph::*;
pub use ids::*;
pub use layout::*;
pub use loads::*;
pub use model::*;
pub use properties::*;
pub use registry::*;
pub use resolver::*;
pub use traits::*;
pub use types::*;
