// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Load patterns, load cases, shell load sets and combinations

use crate::context::{ImportContext, ParsedLine};
use crate::grammar::Record;
use e2k_model::{
    CombinationType, IdCategory, LoadCombination, LoadDefinition, LoadFactor, LoadType, Result,
    SurfaceLoad,
};
use rustc_hash::FxHashMap;

pub fn import_load_patterns(ctx: &mut ImportContext<'_>, lines: &[ParsedLine<'_>]) -> Result<()> {
    for line in lines {
        let Record::LoadPattern(pattern) = &line.record else {
            continue;
        };
        if ctx.load_patterns.contains(&pattern.name) {
            ctx.malformed(line, format!("load pattern '{}' declared twice", pattern.name));
            continue;
        }
        // SELFWEIGHT is derived again on export
        push_definition(ctx, &pattern.name, pattern.load_type);
    }
    Ok(())
}

fn push_definition(ctx: &mut ImportContext<'_>, name: &str, load_type: LoadType) {
    let id = ctx.ids.generate(IdCategory::LoadDefinition);
    ctx.load_patterns.insert(name, id.clone());
    ctx.model.loads.load_definitions.push(LoadDefinition {
        id,
        name: name.to_string(),
        load_type,
    });
}

/// Load cases that are not also load patterns become load definitions
///
/// Their type is that of the first pattern they apply.
pub fn import_load_cases(ctx: &mut ImportContext<'_>, lines: &[ParsedLine<'_>]) -> Result<()> {
    let mut cases: Vec<(&str, Option<&str>)> = Vec::new();
    let mut by_name: FxHashMap<&str, usize> = FxHashMap::default();
    for line in lines {
        let Record::LoadCase(case) = &line.record else {
            continue;
        };
        let pattern = case.pattern.as_ref().map(|(p, _)| p.as_str());
        match by_name.get(case.name.as_str()) {
            Some(&index) => {
                if cases[index].1.is_none() {
                    cases[index].1 = pattern;
                }
            }
            None => {
                by_name.insert(case.name.as_str(), cases.len());
                cases.push((case.name.as_str(), pattern));
            }
        }
    }

    for (name, pattern) in cases {
        if ctx.load_patterns.contains(name) {
            continue;
        }
        let load_type = pattern
            .and_then(|p| ctx.load_patterns.get(p))
            .and_then(|id| ctx.model.loads.load_definition(id))
            .map(|d| d.load_type)
            .unwrap_or(LoadType::Other);
        push_definition(ctx, name, load_type);
    }
    Ok(())
}

/// Shell uniform load sets; live-type patterns fill the live slot
pub fn import_load_sets(ctx: &mut ImportContext<'_>, lines: &[ParsedLine<'_>]) -> Result<()> {
    let mut by_name: FxHashMap<String, usize> = FxHashMap::default();
    for line in lines {
        let Record::ShellLoadSet(set) = &line.record else {
            continue;
        };
        let index = match by_name.get(&set.name) {
            Some(&index) => index,
            None => {
                let id = ctx.ids.generate(IdCategory::SurfaceLoad);
                ctx.surface_loads.insert(set.name.clone(), id.clone());
                let loads = &mut ctx.model.loads.surface_loads;
                loads.push(SurfaceLoad {
                    id,
                    name: set.name.clone(),
                    dead_load_id: None,
                    dead_value: 0.0,
                    live_load_id: None,
                    live_value: 0.0,
                    floor_type_id: None,
                });
                by_name.insert(set.name.clone(), loads.len() - 1);
                loads.len() - 1
            }
        };

        let context = format!("SHELLUNIFORMLOADSET {}", set.name);
        let pattern_id = ctx
            .load_patterns
            .resolve(&set.pattern, &context, &mut ctx.diagnostics);
        let is_live = ctx
            .model
            .loads
            .load_definition(&pattern_id)
            .is_some_and(|d| d.load_type.is_live());

        let load = &mut ctx.model.loads.surface_loads[index];
        let (slot, value) = if is_live {
            (&mut load.live_load_id, &mut load.live_value)
        } else {
            (&mut load.dead_load_id, &mut load.dead_value)
        };
        if slot.is_some() {
            let which = if is_live { "live" } else { "dead" };
            ctx.malformed(line, format!("load set '{}' already has a {} pattern", set.name, which));
            continue;
        }
        *slot = Some(pattern_id);
        *value = set.value;
    }
    Ok(())
}

/// Combinations, built up from a type line and one line per term
pub fn import_combinations(ctx: &mut ImportContext<'_>, lines: &[ParsedLine<'_>]) -> Result<()> {
    let mut by_name: FxHashMap<String, usize> = FxHashMap::default();
    for line in lines {
        let Record::Combo(combo) = &line.record else {
            continue;
        };
        let index = match by_name.get(&combo.name) {
            Some(&index) => index,
            None => {
                let combinations = &mut ctx.model.loads.load_combinations;
                combinations.push(LoadCombination {
                    id: ctx.ids.generate(IdCategory::LoadCombination),
                    name: combo.name.clone(),
                    combination_type: combo.combination_type.unwrap_or(CombinationType::LinearAdd),
                    factors: Vec::new(),
                });
                by_name.insert(combo.name.clone(), combinations.len() - 1);
                combinations.len() - 1
            }
        };
        if let Some(combination_type) = combo.combination_type {
            ctx.model.loads.load_combinations[index].combination_type = combination_type;
        }
        if let Some((case, scale)) = &combo.term {
            let context = format!("COMBO {}", combo.name);
            let load_id = ctx
                .load_patterns
                .resolve(case, &context, &mut ctx.diagnostics);
            ctx.model.loads.load_combinations[index]
                .factors
                .push(LoadFactor {
                    load_id,
                    scale: *scale,
                });
        }
    }
    Ok(())
}
