// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The canonical structural model

use crate::{
    BoundingBox2D, ElementContainer, LoadContainer, ModelLayoutContainer, PropertiesContainer,
};
use serde::{Deserialize, Serialize};

/// Unit system of the model
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Units {
    pub force: String,
    pub length: String,
    pub temperature: String,
}

impl Default for Units {
    fn default() -> Self {
        Self {
            force: "KIP".to_string(),
            length: "IN".to_string(),
            temperature: "F".to_string(),
        }
    }
}

/// File-level information
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ModelMetadata {
    /// Producing program name
    pub program: String,
    /// Producing program version
    pub version: String,
    pub title: Option<String>,
    pub units: Units,
}

impl Default for ModelMetadata {
    fn default() -> Self {
        Self {
            program: "ETABS".to_string(),
            version: "9.7.4".to_string(),
            title: None,
            units: Units::default(),
        }
    }
}

/// Complete building model exchanged with host adapters
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StructuralModel {
    pub metadata: ModelMetadata,
    pub layout: ModelLayoutContainer,
    pub properties: PropertiesContainer,
    pub elements: ElementContainer,
    pub loads: LoadContainer,
}

impl StructuralModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Plan extents of all element geometry
    pub fn plan_bounds(&self) -> Option<BoundingBox2D> {
        BoundingBox2D::from_points(self.elements.plan_points())
    }
}
