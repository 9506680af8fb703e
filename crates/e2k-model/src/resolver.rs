// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Reference resolution with a single substitution policy
//!
//! A reference that cannot be resolved falls back to the first available
//! entity of the expected kind (the lowest level for levels). With no entity
//! available the [`UNKNOWN`](crate::UNKNOWN) sentinel is used. Every fallback
//! is recorded in [`Diagnostics`].

use crate::{
    Diagnostics, Diaphragm, FloorProperties, FloorType, FrameProperties, Id, Level,
    LoadDefinition, Material, ModelLayoutContainer, ReferenceKind, SurfaceLoad, WallProperties,
    UNKNOWN,
};
use rustc_hash::FxHashMap;

/// Entity addressable by id and by name
pub trait NamedEntity {
    fn id(&self) -> &Id;
    fn name(&self) -> &str;
}

macro_rules! impl_named_entity {
    ($($ty:ty),* $(,)?) => {
        $(
            impl NamedEntity for $ty {
                fn id(&self) -> &Id {
                    &self.id
                }

                fn name(&self) -> &str {
                    &self.name
                }
            }
        )*
    };
}

impl_named_entity!(
    Level,
    FloorType,
    Material,
    FrameProperties,
    WallProperties,
    FloorProperties,
    Diaphragm,
    LoadDefinition,
    SurfaceLoad,
);

/// Name to id lookup used while importing
///
/// The first inserted entry is the fallback for unresolved names.
#[derive(Debug)]
pub struct NameIndex {
    kind: ReferenceKind,
    by_name: FxHashMap<String, Id>,
    first: Option<(String, Id)>,
}

impl NameIndex {
    pub fn new(kind: ReferenceKind) -> Self {
        Self {
            kind,
            by_name: FxHashMap::default(),
            first: None,
        }
    }

    /// Register a name; an existing name keeps its id
    pub fn insert(&mut self, name: impl Into<String>, id: Id) {
        let name = name.into();
        if self.first.is_none() {
            self.first = Some((name.clone(), id.clone()));
        }
        self.by_name.entry(name).or_insert(id);
    }

    pub fn get(&self, name: &str) -> Option<&Id> {
        self.by_name.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    /// Resolve a name, substituting the fallback when it is unknown
    pub fn resolve(&self, name: &str, context: &str, diagnostics: &mut Diagnostics) -> Id {
        if let Some(id) = self.by_name.get(name) {
            return id.clone();
        }
        match &self.first {
            Some((first_name, id)) => {
                diagnostics.substitution(self.kind, name, first_name.as_str(), context);
                id.clone()
            }
            None => {
                diagnostics.substitution(self.kind, name, UNKNOWN, context);
                Id::unknown()
            }
        }
    }
}

/// Find an entity by id, falling back to the first entity of the slice
pub fn resolve_entity<'a, T: NamedEntity>(
    items: &'a [T],
    id: &Id,
    kind: ReferenceKind,
    context: &str,
    diagnostics: &mut Diagnostics,
) -> Option<&'a T> {
    if let Some(item) = items.iter().find(|i| i.id() == id) {
        return Some(item);
    }
    let fallback = items.first();
    diagnostics.substitution(
        kind,
        id.as_str(),
        fallback.map(|f| f.name()).unwrap_or(UNKNOWN),
        context,
    );
    fallback
}

/// Name of the entity with `id`, or the substituted name
pub fn resolve_name<T: NamedEntity>(
    items: &[T],
    id: &Id,
    kind: ReferenceKind,
    context: &str,
    diagnostics: &mut Diagnostics,
) -> String {
    resolve_entity(items, id, kind, context, diagnostics)
        .map(|e| e.name().to_string())
        .unwrap_or_else(|| UNKNOWN.to_string())
}

/// Find a level by id, falling back to the lowest level
pub fn resolve_level<'a>(
    layout: &'a ModelLayoutContainer,
    id: &Id,
    context: &str,
    diagnostics: &mut Diagnostics,
) -> Option<&'a Level> {
    if let Some(level) = layout.level(id) {
        return Some(level);
    }
    let fallback = layout.lowest_level();
    diagnostics.substitution(
        ReferenceKind::Level,
        id.as_str(),
        fallback.map(|l| l.name.as_str()).unwrap_or(UNKNOWN),
        context,
    );
    fallback
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MaterialType;

    #[test]
    fn test_name_index_fallback() {
        let mut diagnostics = Diagnostics::new();
        let mut index = NameIndex::new(ReferenceKind::Material);
        assert_eq!(
            index.resolve("A36", "frame section W8", &mut diagnostics),
            Id::unknown()
        );

        index.insert("A992", Id::from("MATERIAL-1"));
        index.insert("4000Psi", Id::from("MATERIAL-2"));
        assert_eq!(
            index.resolve("4000Psi", "ctx", &mut diagnostics),
            Id::from("MATERIAL-2")
        );
        assert_eq!(
            index.resolve("A36", "ctx", &mut diagnostics),
            Id::from("MATERIAL-1")
        );
        assert_eq!(diagnostics.substitutions_of(ReferenceKind::Material), 2);
    }

    #[test]
    fn test_name_index_keeps_first_id() {
        let mut index = NameIndex::new(ReferenceKind::Diaphragm);
        index.insert("D1", Id::from("DIAPHRAGM-1"));
        index.insert("D1", Id::from("DIAPHRAGM-2"));
        assert_eq!(index.get("D1"), Some(&Id::from("DIAPHRAGM-1")));
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn test_resolve_entity_fallback() {
        let mut diagnostics = Diagnostics::new();
        let materials = vec![
            Material::new(Id::from("M1"), "Steel", MaterialType::Steel),
            Material::new(Id::from("M2"), "Conc", MaterialType::Concrete),
        ];
        let name = resolve_name(
            &materials,
            &Id::from("M9"),
            ReferenceKind::Material,
            "ctx",
            &mut diagnostics,
        );
        assert_eq!(name, "Steel");

        let none: Vec<Material> = Vec::new();
        let name = resolve_name(
            &none,
            &Id::from("M9"),
            ReferenceKind::Material,
            "ctx",
            &mut diagnostics,
        );
        assert_eq!(name, UNKNOWN);
        assert_eq!(diagnostics.substitution_count(), 2);
    }

    #[test]
    fn test_resolve_level_uses_lowest() {
        let mut diagnostics = Diagnostics::new();
        let layout = ModelLayoutContainer {
            levels: vec![
                Level::new(Id::from("L2"), "2", 240.0),
                Level::new(Id::from("L0"), "Base", 0.0),
            ],
            ..Default::default()
        };
        let level = resolve_level(&layout, &Id::from("nope"), "ctx", &mut diagnostics).unwrap();
        assert_eq!(level.name, "Base");
        assert_eq!(diagnostics.substitutions_of(ReferenceKind::Level), 1);
    }
}
