// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Load patterns, combinations and surface loads

use crate::{CombinationType, Id, LoadType};
use serde::{Deserialize, Serialize};

/// Named load pattern
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LoadDefinition {
    pub id: Id,
    pub name: String,
    pub load_type: LoadType,
}

/// One scaled term of a combination
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LoadFactor {
    pub load_id: Id,
    pub scale: f64,
}

/// Combination of load definitions
///
/// Factor order is significant and the same load may appear more than once.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LoadCombination {
    pub id: Id,
    pub name: String,
    pub combination_type: CombinationType,
    pub factors: Vec<LoadFactor>,
}

/// Uniform dead + live area load applied to the floors of a floor type
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SurfaceLoad {
    pub id: Id,
    pub name: String,
    pub dead_load_id: Option<Id>,
    pub dead_value: f64,
    pub live_load_id: Option<Id>,
    pub live_value: f64,
    pub floor_type_id: Option<Id>,
}

/// All load entities of a model
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LoadContainer {
    pub load_definitions: Vec<LoadDefinition>,
    pub load_combinations: Vec<LoadCombination>,
    pub surface_loads: Vec<SurfaceLoad>,
}

impl LoadContainer {
    pub fn load_definition(&self, id: &Id) -> Option<&LoadDefinition> {
        self.load_definitions.iter().find(|l| &l.id == id)
    }

    /// Surface loads targeting a floor type
    pub fn surface_loads_for<'a>(
        &'a self,
        floor_type_id: &'a Id,
    ) -> impl Iterator<Item = &'a SurfaceLoad> + 'a {
        self.surface_loads
            .iter()
            .filter(move |s| s.floor_type_id.as_ref() == Some(floor_type_id))
    }

    pub fn is_empty(&self) -> bool {
        self.load_definitions.is_empty()
            && self.load_combinations.is_empty()
            && self.surface_loads.is_empty()
    }
}
