// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Diaphragms, materials and section properties

use crate::context::ExportContext;
use crate::format::Statement;
use e2k_model::{
    DeckProperties, DeckType, FloorKind, FloorProperties, FrameShape, ISectionDimensions,
    Material, MaterialProperty, ReferenceKind, Result, SectionKind,
};

const ELASTIC: [MaterialProperty; 3] = [
    MaterialProperty::ElasticModulus,
    MaterialProperty::PoissonRatio,
    MaterialProperty::ThermalCoefficient,
];

const STRENGTHS: [MaterialProperty; 4] = [
    MaterialProperty::Fy,
    MaterialProperty::Fu,
    MaterialProperty::Fc,
    MaterialProperty::Fm,
];

pub fn write_diaphragms(ctx: &mut ExportContext<'_>) -> Result<()> {
    let model = ctx.model;
    ctx.begin_section(SectionKind::Diaphragms)?;
    for diaphragm in &model.properties.diaphragms {
        ctx.statement(
            &Statement::new("DIAPHRAGM")
                .quoted(&diaphragm.name)
                .key_word("TYPE", diaphragm.diaphragm_type.as_e2k()),
        )?;
    }
    Ok(())
}

/// Up to three lines per material: definition, elastic data, strengths
fn material_statements(material: &Material) -> Vec<Statement> {
    let mut statements = Vec::with_capacity(3);

    let mut definition = Statement::new("MATERIAL")
        .quoted(&material.name)
        .key_quoted("TYPE", material.material_type.as_e2k());
    if let Some(grade) = &material.grade {
        definition = definition.key_quoted("GRADE", grade);
    }
    definition = definition
        .key_number("WEIGHTPERVOLUME", material.weight_per_volume())
        .maybe_number(
            MaterialProperty::MassPerVolume.keyword(),
            material.get(MaterialProperty::MassPerVolume),
        );
    statements.push(definition);

    if ELASTIC.iter().any(|p| material.get(*p).is_some()) {
        let mut elastic = Statement::new("MATERIAL")
            .quoted(&material.name)
            .key_quoted("SYMTYPE", "Isotropic");
        for property in ELASTIC {
            elastic = elastic.maybe_number(property.keyword(), material.get(property));
        }
        statements.push(elastic);
    }

    if STRENGTHS.iter().any(|p| material.get(*p).is_some()) {
        let mut strengths = Statement::new("MATERIAL").quoted(&material.name);
        for property in STRENGTHS {
            strengths = strengths.maybe_number(property.keyword(), material.get(property));
        }
        statements.push(strengths);
    }
    statements
}

pub fn write_materials(ctx: &mut ExportContext<'_>) -> Result<()> {
    let model = ctx.model;
    ctx.begin_section(SectionKind::Materials)?;
    for material in &model.properties.materials {
        for st in material_statements(material) {
            ctx.statement(&st)?;
        }
    }
    Ok(())
}

fn i_section(st: Statement, dims: &ISectionDimensions) -> Statement {
    st.key_number("D", dims.depth)
        .key_number("B", dims.flange_width)
        .key_number("TF", dims.flange_thickness)
        .key_number("TW", dims.web_thickness)
}

/// Frame section definitions, each followed by a modifier line when any
/// modifier differs from 1
pub fn write_frame_sections(ctx: &mut ExportContext<'_>) -> Result<()> {
    let model = ctx.model;
    ctx.begin_section(SectionKind::FrameSections)?;
    for section in &model.properties.frame_properties {
        let context = format!("frame section {}", section.name);
        let material = ctx.name_of(
            &model.properties.materials,
            &section.material_id,
            ReferenceKind::Material,
            &context,
        );
        let st = Statement::new("FRAMESECTION")
            .quoted(&section.name)
            .key_quoted("MATERIAL", &material)
            .key_quoted("SHAPE", section.shape.shape_name());
        let st = match &section.shape {
            FrameShape::Steel {
                dimensions: Some(dims),
                ..
            } => i_section(st, dims),
            FrameShape::Steel { .. } => st,
            FrameShape::ConcreteRectangular { depth, width } => {
                st.key_number("D", *depth).key_number("B", *width)
            }
            FrameShape::ConcreteCircular { diameter } => st.key_number("D", *diameter),
            FrameShape::ConcreteTee(dims) | FrameShape::ConcreteL(dims) => i_section(st, dims),
        };
        ctx.statement(&st)?;

        let changed = section.modifiers.changed();
        if !changed.is_empty() {
            let mut st = Statement::new("FRAMESECTION").quoted(&section.name);
            for (field, value) in changed {
                st = st.key_number(field.section_keyword(), value);
            }
            ctx.statement(&st)?;
        }
    }
    Ok(())
}

fn deck_statement(
    ctx: &mut ExportContext<'_>,
    floor: &FloorProperties,
    deck: &DeckProperties,
    context: &str,
) -> Statement {
    let model = ctx.model;
    let materials = &model.properties.materials;
    let fill = ctx.name_of(materials, &floor.material_id, ReferenceKind::Material, context);
    let deck_material = deck
        .deck_material_id
        .as_ref()
        .map(|id| ctx.name_of(materials, id, ReferenceKind::Material, context));

    let mut st = Statement::new("SHELLPROP")
        .quoted(&floor.name)
        .key_quoted("PROPTYPE", "Deck")
        .key_quoted("DECKTYPE", deck.deck_type.as_e2k());
    st = if deck.deck_type == DeckType::Unfilled {
        // Bare deck: the deck steel is the only material
        st.key_quoted("DECKMATERIAL", deck_material.as_deref().unwrap_or(&fill))
    } else {
        let st = st.key_quoted("CONCMATERIAL", &fill);
        match &deck_material {
            Some(name) => st.key_quoted("DECKMATERIAL", name),
            None => st,
        }
    };
    st = st
        .key_number("DECKSLABDEPTH", floor.thickness)
        .key_number("DECKRIBDEPTH", deck.rib.depth)
        .key_number("DECKRIBWIDTHTOP", deck.rib.width_top)
        .key_number("DECKRIBWIDTHBOTTOM", deck.rib.width_bottom)
        .key_number("DECKRIBSPACING", deck.rib.spacing)
        .key_number("DECKSHEARTHICKNESS", deck.shear_thickness)
        .key_number("DECKUNITWEIGHT", deck.unit_weight);
    if let Some(studs) = &deck.studs {
        st = st
            .key_number("SHEARSTUDDIAM", studs.diameter)
            .key_number("SHEARSTUDHEIGHT", studs.height)
            .key_number("SHEARSTUDFU", studs.tensile_strength);
    }
    st
}

/// Wall, slab and deck properties
pub fn write_shell_properties(ctx: &mut ExportContext<'_>) -> Result<()> {
    let model = ctx.model;
    let materials = &model.properties.materials;
    ctx.begin_section(SectionKind::ShellProperties)?;

    for wall in &model.properties.wall_properties {
        let context = format!("shell property {}", wall.name);
        let material = ctx.name_of(materials, &wall.material_id, ReferenceKind::Material, &context);
        ctx.statement(
            &Statement::new("SHELLPROP")
                .quoted(&wall.name)
                .key_quoted("PROPTYPE", "Wall")
                .key_quoted("MATERIAL", &material)
                .key_quoted("MODELINGTYPE", "ShellThin")
                .key_number("WALLTHICKNESS", wall.thickness),
        )?;
    }

    for floor in &model.properties.floor_properties {
        let context = format!("shell property {}", floor.name);
        let st = match &floor.kind {
            FloorKind::Slab => {
                let material =
                    ctx.name_of(materials, &floor.material_id, ReferenceKind::Material, &context);
                Statement::new("SHELLPROP")
                    .quoted(&floor.name)
                    .key_quoted("PROPTYPE", "Slab")
                    .key_quoted("MATERIAL", &material)
                    .key_quoted("MODELINGTYPE", "ShellThin")
                    .key_number("SLABTHICKNESS", floor.thickness)
            }
            FloorKind::Deck(deck) => deck_statement(ctx, floor, deck, &context),
        };
        ctx.statement(&st)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ExportConfig;
    use e2k_model::{
        DeckRib, FrameProperties, Id, MaterialType, ModifierField, ShearStud, StructuralModel,
    };

    fn steel() -> Material {
        Material::new(Id::from("M1"), "A992Fy50", MaterialType::Steel)
            .with(MaterialProperty::ElasticModulus, 29000.0)
            .with(MaterialProperty::PoissonRatio, 0.3)
            .with(MaterialProperty::Fy, 50.0)
            .with(MaterialProperty::Fu, 65.0)
    }

    #[test]
    fn test_material_lines() {
        let mut material = steel();
        material.grade = Some("Grade 50".to_string());
        let lines: Vec<String> = material_statements(&material)
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(
            lines,
            vec![
                "MATERIAL  \"A992Fy50\"  TYPE  \"Steel\"  GRADE  \"Grade 50\"  WEIGHTPERVOLUME  0.0002836",
                "MATERIAL  \"A992Fy50\"  SYMTYPE  \"Isotropic\"  E  29000  U  0.3",
                "MATERIAL  \"A992Fy50\"  FY  50  FU  65",
            ]
        );

        let bare = Material::new(Id::from("M2"), "Other", MaterialType::default());
        assert_eq!(material_statements(&bare).len(), 1);
    }

    #[test]
    fn test_modifier_line_only_when_changed() {
        let mut model = StructuralModel::new();
        model.properties.materials.push(steel());
        let shape = FrameShape::Steel {
            shape: "W18X35".to_string(),
            dimensions: None,
        };
        let plain = FrameProperties::new(Id::from("P1"), "W18X35", Id::from("M1"), shape.clone());
        let mut cracked = FrameProperties::new(Id::from("P2"), "W18X35C", Id::from("M1"), shape);
        cracked.modifiers.set(ModifierField::Inertia33, 0.5);
        model.properties.frame_properties = vec![plain, cracked];

        let config = ExportConfig::default();
        let mut ctx = ExportContext::new(&model, &config);
        write_frame_sections(&mut ctx).unwrap();
        let lines: Vec<&str> = ctx.out.lines().skip(1).collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[0],
            "  FRAMESECTION  \"W18X35\"  MATERIAL  \"A992Fy50\"  SHAPE  \"W18X35\""
        );
        assert_eq!(lines[2], "  FRAMESECTION  \"W18X35C\"  I3MOD  0.5");
    }

    #[test]
    fn test_missing_material_is_substituted() {
        let mut model = StructuralModel::new();
        model.properties.materials.push(steel());
        model.properties.frame_properties.push(FrameProperties::new(
            Id::from("P1"),
            "C24X24",
            Id::from("nope"),
            FrameShape::ConcreteRectangular {
                depth: 24.0,
                width: 24.0,
            },
        ));
        let config = ExportConfig::default();
        let mut ctx = ExportContext::new(&model, &config);
        write_frame_sections(&mut ctx).unwrap();
        assert!(ctx.out.contains(
            "MATERIAL  \"A992Fy50\"  SHAPE  \"Concrete Rectangular\"  D  24  B  24"
        ));
        assert_eq!(ctx.diagnostics.substitutions_of(ReferenceKind::Material), 1);
    }

    #[test]
    fn test_deck_property() {
        let mut model = StructuralModel::new();
        model.properties.materials.push(steel());
        model
            .properties
            .materials
            .push(Material::new(Id::from("M2"), "4000Psi", MaterialType::Concrete));
        model.properties.floor_properties.push(FloorProperties {
            id: Id::from("FP1"),
            name: "Deck3".to_string(),
            material_id: Id::from("M2"),
            thickness: 3.5,
            kind: FloorKind::Deck(DeckProperties {
                deck_type: DeckType::Filled,
                deck_material_id: Some(Id::from("M1")),
                rib: DeckRib {
                    depth: 3.0,
                    width_top: 7.0,
                    width_bottom: 5.0,
                    spacing: 12.0,
                },
                shear_thickness: 0.0474,
                unit_weight: 0.0156,
                studs: Some(ShearStud {
                    diameter: 0.75,
                    height: 6.0,
                    tensile_strength: 65.0,
                }),
            }),
        });
        let config = ExportConfig::default();
        let mut ctx = ExportContext::new(&model, &config);
        write_shell_properties(&mut ctx).unwrap();
        let line = ctx.out.lines().nth(1).unwrap();
        assert!(line.starts_with(
            "  SHELLPROP  \"Deck3\"  PROPTYPE  \"Deck\"  DECKTYPE  \"Filled\"  \
             CONCMATERIAL  \"4000Psi\"  DECKMATERIAL  \"A992Fy50\"  DECKSLABDEPTH  3.5"
        ));
        assert!(line.ends_with("SHEARSTUDDIAM  0.75  SHEARSTUDHEIGHT  6  SHEARSTUDFU  65"));
    }
}
