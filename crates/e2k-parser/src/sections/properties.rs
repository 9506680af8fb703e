// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Diaphragms, materials and section properties

use crate::context::{ImportContext, ParsedLine};
use crate::grammar::{FrameSectionRecord, Record, ShellPropRecord, ShellPropType};
use e2k_model::{
    DeckProperties, DeckRib, DeckType, Diaphragm, FloorKind, FloorProperties, FrameProperties,
    FrameShape, ISectionDimensions, Id, IdCategory, Material, MaterialType, Result, ShearStud,
    WallProperties, UNKNOWN,
};
use rustc_hash::FxHashMap;

pub fn import_diaphragms(ctx: &mut ImportContext<'_>, lines: &[ParsedLine<'_>]) -> Result<()> {
    for line in lines {
        let Record::Diaphragm {
            name,
            diaphragm_type,
        } = &line.record
        else {
            continue;
        };
        if ctx.diaphragms.contains(name) {
            ctx.malformed(line, format!("diaphragm '{}' declared twice", name));
            continue;
        }
        let id = ctx.ids.generate(IdCategory::Diaphragm);
        ctx.diaphragms.insert(name.clone(), id.clone());
        ctx.model.properties.diaphragms.push(Diaphragm {
            id,
            name: name.clone(),
            diaphragm_type: *diaphragm_type,
        });
    }
    Ok(())
}

/// Materials, merging every line that shares a name
///
/// The first line to give a field wins; later lines only fill gaps.
pub fn import_materials(ctx: &mut ImportContext<'_>, lines: &[ParsedLine<'_>]) -> Result<()> {
    let mut by_name: FxHashMap<String, usize> = FxHashMap::default();
    let mut typed: Vec<bool> = Vec::new();

    for line in lines {
        let Record::Material(record) = &line.record else {
            continue;
        };
        let materials = &mut ctx.model.properties.materials;
        let index = match by_name.get(&record.name) {
            Some(&index) => index,
            None => {
                let id = ctx.ids.generate(IdCategory::Material);
                ctx.materials.insert(record.name.clone(), id.clone());
                materials.push(Material::new(id, record.name.clone(), MaterialType::default()));
                typed.push(false);
                by_name.insert(record.name.clone(), materials.len() - 1);
                materials.len() - 1
            }
        };

        let material = &mut materials[index];
        if let Some(material_type) = &record.material_type {
            if !typed[index] {
                material.material_type = material_type.clone();
                typed[index] = true;
            }
        }
        if material.grade.is_none() {
            material.grade = record.grade.clone();
        }
        for (property, value) in &record.properties {
            material.augment(*property, *value);
        }
    }
    Ok(())
}

/// Frame sections; definition and modifier lines are merged by name
pub fn import_frame_sections(
    ctx: &mut ImportContext<'_>,
    lines: &[ParsedLine<'_>],
) -> Result<()> {
    let mut groups: Vec<(&ParsedLine<'_>, FrameSectionRecord)> = Vec::new();
    let mut by_name: FxHashMap<&str, usize> = FxHashMap::default();

    for line in lines {
        let Record::FrameSection(record) = &line.record else {
            continue;
        };
        match by_name.get(record.name.as_str()) {
            Some(&index) => merge_frame_record(&mut groups[index].1, record),
            None => {
                by_name.insert(record.name.as_str(), groups.len());
                groups.push((line, record.clone()));
            }
        }
    }

    for (line, record) in groups {
        let shape = match frame_shape(&record) {
            Ok(shape) => shape,
            Err(reason) => {
                ctx.malformed(line, reason);
                continue;
            }
        };
        let context = format!("frame section {}", record.name);
        let material = record.material.as_deref().unwrap_or(UNKNOWN);
        let material_id = ctx
            .materials
            .resolve(material, &context, &mut ctx.diagnostics);

        let id = ctx.ids.generate(IdCategory::FrameProperties);
        let mut section = FrameProperties::new(id.clone(), record.name.clone(), material_id, shape);
        for (field, value) in &record.modifiers {
            section.modifiers.set(*field, *value);
        }
        ctx.frame_sections.insert(record.name.clone(), id);
        ctx.model.properties.frame_properties.push(section);
    }
    Ok(())
}

fn merge_frame_record(into: &mut FrameSectionRecord, from: &FrameSectionRecord) {
    fn fill<T: Clone>(slot: &mut Option<T>, value: &Option<T>) {
        if slot.is_none() {
            *slot = value.clone();
        }
    }
    fill(&mut into.material, &from.material);
    fill(&mut into.shape, &from.shape);
    fill(&mut into.depth, &from.depth);
    fill(&mut into.width, &from.width);
    fill(&mut into.flange_thickness, &from.flange_thickness);
    fill(&mut into.web_thickness, &from.web_thickness);
    into.modifiers.extend(from.modifiers.iter().copied());
}

fn frame_shape(record: &FrameSectionRecord) -> std::result::Result<FrameShape, String> {
    let Some(shape) = &record.shape else {
        return Err(format!("frame section '{}' has no SHAPE", record.name));
    };
    let dim = |value: Option<f64>, key: &str| {
        value.ok_or_else(|| format!("{} '{}' is missing {}", shape, record.name, key))
    };
    let i_section = || -> std::result::Result<ISectionDimensions, String> {
        Ok(ISectionDimensions {
            depth: dim(record.depth, "D")?,
            flange_width: dim(record.width, "B")?,
            flange_thickness: dim(record.flange_thickness, "TF")?,
            web_thickness: dim(record.web_thickness, "TW")?,
        })
    };

    let shape = if shape.eq_ignore_ascii_case(FrameShape::CONCRETE_RECTANGULAR) {
        FrameShape::ConcreteRectangular {
            depth: dim(record.depth, "D")?,
            width: dim(record.width, "B")?,
        }
    } else if shape.eq_ignore_ascii_case(FrameShape::CONCRETE_CIRCLE) {
        FrameShape::ConcreteCircular {
            diameter: dim(record.depth, "D")?,
        }
    } else if shape.eq_ignore_ascii_case(FrameShape::CONCRETE_TEE) {
        FrameShape::ConcreteTee(i_section()?)
    } else if shape.eq_ignore_ascii_case(FrameShape::CONCRETE_L) {
        FrameShape::ConcreteL(i_section()?)
    } else {
        FrameShape::Steel {
            shape: shape.clone(),
            dimensions: i_section().ok(),
        }
    };
    Ok(shape)
}

/// Wall, slab and deck properties
pub fn import_shell_properties(
    ctx: &mut ImportContext<'_>,
    lines: &[ParsedLine<'_>],
) -> Result<()> {
    for line in lines {
        let Record::ShellProp(record) = &line.record else {
            continue;
        };
        let taken = match record.prop_type {
            ShellPropType::Wall => ctx.wall_properties.contains(&record.name),
            ShellPropType::Slab | ShellPropType::Deck => {
                ctx.floor_properties.contains(&record.name)
            }
        };
        if taken {
            ctx.malformed(line, format!("shell property '{}' declared twice", record.name));
            continue;
        }
        let context = format!("shell property {}", record.name);

        match record.prop_type {
            ShellPropType::Wall => {
                let Some(thickness) = record.thickness else {
                    ctx.malformed(line, "wall property has no WALLTHICKNESS");
                    continue;
                };
                let material_id = resolve_material(ctx, record.material.as_deref(), &context);
                let id = ctx.ids.generate(IdCategory::WallProperties);
                ctx.wall_properties.insert(record.name.clone(), id.clone());
                ctx.model.properties.wall_properties.push(WallProperties {
                    id,
                    name: record.name.clone(),
                    material_id,
                    thickness,
                });
            }
            ShellPropType::Slab => {
                let Some(thickness) = record.thickness else {
                    ctx.malformed(line, "slab property has no SLABTHICKNESS");
                    continue;
                };
                let material_id = resolve_material(ctx, record.material.as_deref(), &context);
                push_floor_property(ctx, record, material_id, thickness, FloorKind::Slab);
            }
            ShellPropType::Deck => {
                let deck = &record.deck;
                let deck_material = deck.deck_material.as_deref().or(record.material.as_deref());
                let (material_id, deck_material_id) = if deck.deck_type == DeckType::Unfilled {
                    let id = resolve_material(ctx, deck_material, &context);
                    (id.clone(), Some(id))
                } else {
                    let fill = deck.concrete_material.as_deref().or(record.material.as_deref());
                    let fill_id = resolve_material(ctx, fill, &context);
                    let deck_id = deck
                        .deck_material
                        .as_deref()
                        .map(|name| resolve_material(ctx, Some(name), &context));
                    (fill_id, deck_id)
                };
                let studs = deck.stud_diameter.map(|diameter| ShearStud {
                    diameter,
                    height: deck.stud_height.unwrap_or(0.0),
                    tensile_strength: deck.stud_fu.unwrap_or(0.0),
                });
                let kind = FloorKind::Deck(DeckProperties {
                    deck_type: deck.deck_type,
                    deck_material_id,
                    rib: DeckRib {
                        depth: deck.rib_depth.unwrap_or(0.0),
                        width_top: deck.rib_width_top.unwrap_or(0.0),
                        width_bottom: deck.rib_width_bottom.unwrap_or(0.0),
                        spacing: deck.rib_spacing.unwrap_or(0.0),
                    },
                    shear_thickness: deck.shear_thickness.unwrap_or(0.0),
                    unit_weight: deck.unit_weight.unwrap_or(0.0),
                    studs,
                });
                let thickness = deck.slab_depth.or(record.thickness).unwrap_or(0.0);
                push_floor_property(ctx, record, material_id, thickness, kind);
            }
        }
    }
    Ok(())
}

fn resolve_material(ctx: &mut ImportContext<'_>, name: Option<&str>, context: &str) -> Id {
    ctx.materials
        .resolve(name.unwrap_or(UNKNOWN), context, &mut ctx.diagnostics)
}

fn push_floor_property(
    ctx: &mut ImportContext<'_>,
    record: &ShellPropRecord,
    material_id: Id,
    thickness: f64,
    kind: FloorKind,
) {
    let id = ctx.ids.generate(IdCategory::FloorProperties);
    ctx.floor_properties.insert(record.name.clone(), id.clone());
    ctx.model.properties.floor_properties.push(FloorProperties {
        id,
        name: record.name.clone(),
        material_id,
        thickness,
        kind,
    });
}
