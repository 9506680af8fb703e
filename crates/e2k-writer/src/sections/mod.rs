// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Section writers, one per E2K section

mod assigns;
mod connectivity;
mod header;
mod layout;
mod loads;
mod properties;

pub use assigns::{write_area_assigns, write_line_assigns, write_point_assigns};
pub use connectivity::{write_areas, write_lines, write_points};
pub use header::{write_controls, write_end, write_program};
pub use layout::{write_grids, write_stories};
pub use loads::{write_combinations, write_load_cases, write_load_patterns, write_load_sets};
pub use properties::{
    write_diaphragms, write_frame_sections, write_materials, write_shell_properties,
};
