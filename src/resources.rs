// -----------------------------------------------------------------------------
// File: resources.rs
// Description: Static catalog mapping resource type ids to their properties.
// Author(s): DIARRA Amara & SERRANO Jean-Léo
// License: CC BY-NC 4.0
// Created: April 2, 2025
// Last modified: April 18, 2025
// Version: 1.0
// -----------------------------------------------------------------------------

use std::collections::HashMap;

use crate::errors::GridError;

/// Type id of the terminal "destroyed" state every cell can transition to.
pub const EMPTY_TYPE: &str = "empty";

/// An engine-agnostic RGB color triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb { r, g, b }
    }
}

/// The intrinsic properties of one resource type.
///
/// # Fields
/// - `type_id`: Identifier the catalog is keyed by.
/// - `color`: Display color of a cell of this type.
/// - `durability`: Base durability a cell of this type starts with.
/// - `has_collision`: Whether a cell of this type blocks movement.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceDefinition {
    pub type_id: String,
    pub color: Rgb,
    pub durability: u32,
    pub has_collision: bool,
}

impl ResourceDefinition {
    pub fn new(type_id: &str, color: Rgb, durability: u32, has_collision: bool) -> Self {
        ResourceDefinition {
            type_id: type_id.to_string(),
            color,
            durability,
            has_collision,
        }
    }

    /// A definition is malformed when its type id is blank.
    pub fn validate(&self) -> Result<(), GridError> {
        if self.type_id.is_empty() {
            return Err(GridError::InvalidResourceDefinition(
                "type id must not be blank".to_string(),
            ));
        }
        Ok(())
    }
}

/// Immutable registry of resource definitions, built once at startup and
/// injected into the grid manager. Never mutated afterwards.
#[derive(Debug, Clone)]
pub struct ResourceCatalog {
    definitions: HashMap<String, ResourceDefinition>,
}

impl ResourceCatalog {
    /// Builds a catalog from a list of definitions.
    ///
    /// Every definition must be well formed, and the catalog must contain an
    /// `"empty"` entry with zero durability and no collision; that entry is
    /// the state destroyed cells end up in.
    pub fn new(definitions: Vec<ResourceDefinition>) -> Result<Self, GridError> {
        let mut map = HashMap::with_capacity(definitions.len());
        for def in definitions {
            def.validate()?;
            map.insert(def.type_id.clone(), def);
        }
        match map.get(EMPTY_TYPE) {
            Some(empty) if empty.durability == 0 && !empty.has_collision => {}
            Some(_) => {
                return Err(GridError::InvalidResourceDefinition(
                    "the 'empty' entry must have zero durability and no collision".to_string(),
                ));
            }
            None => return Err(GridError::UnknownResourceType(EMPTY_TYPE.to_string())),
        }
        Ok(ResourceCatalog { definitions: map })
    }

    /// Looks a type id up, failing with `UnknownResourceType` on a miss.
    pub fn lookup(&self, type_id: &str) -> Result<&ResourceDefinition, GridError> {
        self.definitions
            .get(type_id)
            .ok_or_else(|| GridError::UnknownResourceType(type_id.to_string()))
    }

    /// The stock resource index of the game.
    pub fn standard() -> Self {
        ResourceCatalog::new(vec![
            ResourceDefinition::new(EMPTY_TYPE, Rgb::new(0xAD, 0xD8, 0xE6), 0, false),
            ResourceDefinition::new("grass", Rgb::new(0x00, 0xFF, 0x00), 2, true),
            ResourceDefinition::new("stone", Rgb::new(0x80, 0x80, 0x80), 5, true),
            ResourceDefinition::new("dirt", Rgb::new(0x8B, 0x45, 0x13), 3, true),
            ResourceDefinition::new("wood", Rgb::new(0xA5, 0x2A, 0x2A), 4, true),
        ])
        .expect("stock resource index is well formed")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_catalog_resolves_all_stock_types() {
        let catalog = ResourceCatalog::standard();
        for type_id in ["empty", "grass", "stone", "dirt", "wood"] {
            let def = catalog.lookup(type_id).unwrap();
            assert_eq!(def.type_id, type_id);
        }
    }

    #[test]
    fn lookup_miss_reports_the_type_id() {
        let catalog = ResourceCatalog::standard();
        let err = catalog.lookup("lava").unwrap_err();
        assert_eq!(err, GridError::UnknownResourceType("lava".to_string()));
    }

    #[test]
    fn empty_entry_is_the_terminal_state() {
        let catalog = ResourceCatalog::standard();
        let empty = catalog.lookup(EMPTY_TYPE).unwrap();
        assert_eq!(empty.durability, 0);
        assert!(!empty.has_collision);
    }

    #[test]
    fn catalog_without_empty_entry_is_rejected() {
        let defs = vec![ResourceDefinition::new("stone", Rgb::new(0x80, 0x80, 0x80), 5, true)];
        let err = ResourceCatalog::new(defs).unwrap_err();
        assert_eq!(err, GridError::UnknownResourceType("empty".to_string()));
    }

    #[test]
    fn solid_empty_entry_is_rejected() {
        let defs = vec![ResourceDefinition::new(EMPTY_TYPE, Rgb::new(0, 0, 0), 0, true)];
        assert!(matches!(
            ResourceCatalog::new(defs),
            Err(GridError::InvalidResourceDefinition(_))
        ));
    }

    #[test]
    fn blank_type_id_is_rejected() {
        let defs = vec![ResourceDefinition::new("", Rgb::new(0, 0, 0), 1, false)];
        assert!(matches!(
            ResourceCatalog::new(defs),
            Err(GridError::InvalidResourceDefinition(_))
        ));
    }
}
