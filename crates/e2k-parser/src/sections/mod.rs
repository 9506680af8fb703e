// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Section importers
//!
//! Each importer consumes the parsed statements of its section and writes
//! entities and name lookups into the [`ImportContext`](crate::context::ImportContext).

mod assigns;
mod connectivity;
mod header;
mod layout;
mod loads;
mod properties;

pub use assigns::{import_area_assigns, import_line_assigns, import_point_assigns};
pub use connectivity::{import_areas, import_lines, import_points};
pub use header::import_header;
pub use layout::{fit_grids, import_grids, import_stories};
pub use loads::{import_combinations, import_load_cases, import_load_patterns, import_load_sets};
pub use properties::{
    import_diaphragms, import_frame_sections, import_materials, import_shell_properties,
};
