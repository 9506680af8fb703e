// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Materials, section properties and diaphragms

use crate::{DiaphragmType, Id, MaterialType};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Design data concept stored in a material's property bag
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MaterialProperty {
    WeightPerVolume,
    MassPerVolume,
    ElasticModulus,
    PoissonRatio,
    ThermalCoefficient,
    /// Steel yield strength
    Fy,
    /// Steel ultimate strength
    Fu,
    /// Concrete compressive strength
    Fc,
    /// Masonry compressive strength
    Fm,
}

impl MaterialProperty {
    /// E2K keyword
    pub fn keyword(&self) -> &'static str {
        match self {
            MaterialProperty::WeightPerVolume => "WEIGHTPERVOLUME",
            MaterialProperty::MassPerVolume => "MASSPERVOLUME",
            MaterialProperty::ElasticModulus => "E",
            MaterialProperty::PoissonRatio => "U",
            MaterialProperty::ThermalCoefficient => "A",
            MaterialProperty::Fy => "FY",
            MaterialProperty::Fu => "FU",
            MaterialProperty::Fc => "FC",
            MaterialProperty::Fm => "FM",
        }
    }

    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword.to_uppercase().as_str() {
            "WEIGHTPERVOLUME" => Some(MaterialProperty::WeightPerVolume),
            "MASSPERVOLUME" => Some(MaterialProperty::MassPerVolume),
            "E" => Some(MaterialProperty::ElasticModulus),
            "U" => Some(MaterialProperty::PoissonRatio),
            "A" => Some(MaterialProperty::ThermalCoefficient),
            "FY" => Some(MaterialProperty::Fy),
            "FU" => Some(MaterialProperty::Fu),
            "FC" => Some(MaterialProperty::Fc),
            "FM" => Some(MaterialProperty::Fm),
            _ => None,
        }
    }
}

/// Structural material with a sparse design-data bag
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub id: Id,
    pub name: String,
    pub material_type: MaterialType,
    pub grade: Option<String>,
    pub properties: BTreeMap<MaterialProperty, f64>,
}

impl Material {
    pub fn new(id: Id, name: impl Into<String>, material_type: MaterialType) -> Self {
        Self {
            id,
            name: name.into(),
            material_type,
            grade: None,
            properties: BTreeMap::new(),
        }
    }

    /// Builder-style property setter
    pub fn with(mut self, property: MaterialProperty, value: f64) -> Self {
        self.properties.insert(property, value);
        self
    }

    pub fn get(&self, property: MaterialProperty) -> Option<f64> {
        self.properties.get(&property).copied()
    }

    /// Set a property only if it is not known yet; returns whether it was stored
    pub fn augment(&mut self, property: MaterialProperty, value: f64) -> bool {
        if self.properties.contains_key(&property) {
            return false;
        }
        self.properties.insert(property, value);
        true
    }

    /// Weight per volume, falling back to the family default (kip/in³)
    pub fn weight_per_volume(&self) -> f64 {
        self.get(MaterialProperty::WeightPerVolume)
            .unwrap_or_else(|| default_weight_per_volume(&self.material_type))
    }
}

/// Self-weight density used when a material does not state one (kip/in³)
pub fn default_weight_per_volume(material_type: &MaterialType) -> f64 {
    match material_type {
        MaterialType::Steel => 2.836e-4,
        MaterialType::Concrete => 8.68e-5,
        MaterialType::Wood => 2.17e-5,
        MaterialType::Masonry => 6.94e-5,
        MaterialType::Other(_) => 0.0,
    }
}

/// Stiffness and mass multiplier of a frame section
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ModifierField {
    Area,
    ShearArea2,
    ShearArea3,
    Torsion,
    Inertia22,
    Inertia33,
    Mass,
    Weight,
}

impl ModifierField {
    pub const ALL: [ModifierField; 8] = [
        ModifierField::Area,
        ModifierField::ShearArea2,
        ModifierField::ShearArea3,
        ModifierField::Torsion,
        ModifierField::Inertia22,
        ModifierField::Inertia33,
        ModifierField::Mass,
        ModifierField::Weight,
    ];

    /// Keyword on a `FRAMESECTION` modifier line
    pub fn section_keyword(&self) -> &'static str {
        match self {
            ModifierField::Area => "AMOD",
            ModifierField::ShearArea2 => "A2MOD",
            ModifierField::ShearArea3 => "A3MOD",
            ModifierField::Torsion => "JMOD",
            ModifierField::Inertia22 => "I2MOD",
            ModifierField::Inertia33 => "I3MOD",
            ModifierField::Mass => "MMOD",
            ModifierField::Weight => "WMOD",
        }
    }

    /// Keyword on a `LINEASSIGN` row
    pub fn assign_keyword(&self) -> &'static str {
        match self {
            ModifierField::Area => "PROPMODA",
            ModifierField::ShearArea2 => "PROPMODA2",
            ModifierField::ShearArea3 => "PROPMODA3",
            ModifierField::Torsion => "PROPMODT",
            ModifierField::Inertia22 => "PROPMODI22",
            ModifierField::Inertia33 => "PROPMODI33",
            ModifierField::Mass => "PROPMODM",
            ModifierField::Weight => "PROPMODW",
        }
    }

    pub fn from_keyword(keyword: &str) -> Option<Self> {
        let upper = keyword.to_uppercase();
        ModifierField::ALL
            .into_iter()
            .find(|f| f.section_keyword() == upper || f.assign_keyword() == upper)
    }

    /// Smallest deviation from 1.0 that is written out
    pub fn epsilon(&self) -> f64 {
        match self {
            ModifierField::Mass | ModifierField::Weight => 1e-4,
            _ => 1e-6,
        }
    }
}

/// The eight section multipliers, 1.0 when unmodified
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FrameModifiers {
    pub area: f64,
    pub shear_area_2: f64,
    pub shear_area_3: f64,
    pub torsion: f64,
    pub inertia_22: f64,
    pub inertia_33: f64,
    pub mass: f64,
    pub weight: f64,
}

impl Default for FrameModifiers {
    fn default() -> Self {
        Self {
            area: 1.0,
            shear_area_2: 1.0,
            shear_area_3: 1.0,
            torsion: 1.0,
            inertia_22: 1.0,
            inertia_33: 1.0,
            mass: 1.0,
            weight: 1.0,
        }
    }
}

impl FrameModifiers {
    pub fn get(&self, field: ModifierField) -> f64 {
        match field {
            ModifierField::Area => self.area,
            ModifierField::ShearArea2 => self.shear_area_2,
            ModifierField::ShearArea3 => self.shear_area_3,
            ModifierField::Torsion => self.torsion,
            ModifierField::Inertia22 => self.inertia_22,
            ModifierField::Inertia33 => self.inertia_33,
            ModifierField::Mass => self.mass,
            ModifierField::Weight => self.weight,
        }
    }

    pub fn set(&mut self, field: ModifierField, value: f64) {
        match field {
            ModifierField::Area => self.area = value,
            ModifierField::ShearArea2 => self.shear_area_2 = value,
            ModifierField::ShearArea3 => self.shear_area_3 = value,
            ModifierField::Torsion => self.torsion = value,
            ModifierField::Inertia22 => self.inertia_22 = value,
            ModifierField::Inertia33 => self.inertia_33 = value,
            ModifierField::Mass => self.mass = value,
            ModifierField::Weight => self.weight = value,
        }
    }

    /// Fields that differ from 1.0 by more than their epsilon, in keyword order
    pub fn changed(&self) -> Vec<(ModifierField, f64)> {
        ModifierField::ALL
            .into_iter()
            .map(|f| (f, self.get(f)))
            .filter(|(f, v)| (v - 1.0).abs() > f.epsilon())
            .collect()
    }

    pub fn is_default(&self) -> bool {
        self.changed().is_empty()
    }
}

/// I-section dimensions
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ISectionDimensions {
    pub depth: f64,
    pub flange_width: f64,
    pub flange_thickness: f64,
    pub web_thickness: f64,
}

/// Material-specific cross-section
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum FrameShape {
    /// Catalog steel shape, optionally with explicit dimensions
    Steel {
        shape: String,
        dimensions: Option<ISectionDimensions>,
    },
    ConcreteRectangular {
        depth: f64,
        width: f64,
    },
    ConcreteCircular {
        diameter: f64,
    },
    ConcreteTee(ISectionDimensions),
    ConcreteL(ISectionDimensions),
}

impl FrameShape {
    pub const CONCRETE_RECTANGULAR: &'static str = "Concrete Rectangular";
    pub const CONCRETE_CIRCLE: &'static str = "Concrete Circle";
    pub const CONCRETE_TEE: &'static str = "Concrete Tee";
    pub const CONCRETE_L: &'static str = "Concrete L";

    /// Value of the `SHAPE` field
    pub fn shape_name(&self) -> &str {
        match self {
            FrameShape::Steel { shape, .. } => shape,
            FrameShape::ConcreteRectangular { .. } => Self::CONCRETE_RECTANGULAR,
            FrameShape::ConcreteCircular { .. } => Self::CONCRETE_CIRCLE,
            FrameShape::ConcreteTee(_) => Self::CONCRETE_TEE,
            FrameShape::ConcreteL(_) => Self::CONCRETE_L,
        }
    }
}

/// Frame (line element) section property
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FrameProperties {
    pub id: Id,
    pub name: String,
    pub material_id: Id,
    pub shape: FrameShape,
    pub modifiers: FrameModifiers,
}

impl FrameProperties {
    pub fn new(id: Id, name: impl Into<String>, material_id: Id, shape: FrameShape) -> Self {
        Self {
            id,
            name: name.into(),
            material_id,
            shape,
            modifiers: FrameModifiers::default(),
        }
    }
}

/// Wall shell property
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WallProperties {
    pub id: Id,
    pub name: String,
    pub material_id: Id,
    pub thickness: f64,
}

/// Metal deck variant
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DeckType {
    #[default]
    Filled,
    Unfilled,
    SolidSlab,
}

impl DeckType {
    pub fn as_e2k(&self) -> &'static str {
        match self {
            DeckType::Filled => "Filled",
            DeckType::Unfilled => "Unfilled",
            DeckType::SolidSlab => "Solid Slab",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().replace(' ', "").as_str() {
            "FILLED" => Some(DeckType::Filled),
            "UNFILLED" => Some(DeckType::Unfilled),
            "SOLIDSLAB" => Some(DeckType::SolidSlab),
            _ => None,
        }
    }
}

/// Deck rib geometry
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DeckRib {
    pub depth: f64,
    pub width_top: f64,
    pub width_bottom: f64,
    pub spacing: f64,
}

/// Shear stud geometry
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ShearStud {
    pub diameter: f64,
    pub height: f64,
    pub tensile_strength: f64,
}

/// Composite or bare metal deck data
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DeckProperties {
    pub deck_type: DeckType,
    /// Steel deck material (the floor's `material_id` is the fill concrete)
    pub deck_material_id: Option<Id>,
    pub rib: DeckRib,
    pub shear_thickness: f64,
    pub unit_weight: f64,
    pub studs: Option<ShearStud>,
}

/// Floor sub-type
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum FloorKind {
    Slab,
    Deck(DeckProperties),
}

/// Floor shell property
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FloorProperties {
    pub id: Id,
    pub name: String,
    pub material_id: Id,
    /// Slab thickness, or slab depth above the ribs for decks
    pub thickness: f64,
    pub kind: FloorKind,
}

/// Floor diaphragm constraint
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Diaphragm {
    pub id: Id,
    pub name: String,
    pub diaphragm_type: DiaphragmType,
}

/// All property entities of a model
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PropertiesContainer {
    pub materials: Vec<Material>,
    pub frame_properties: Vec<FrameProperties>,
    pub wall_properties: Vec<WallProperties>,
    pub floor_properties: Vec<FloorProperties>,
    pub diaphragms: Vec<Diaphragm>,
}
