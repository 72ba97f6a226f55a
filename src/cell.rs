// -----------------------------------------------------------------------------
// File: cell.rs
// Description: A single addressable tile of the resource grid.
// Author(s): DIARRA Amara & SERRANO Jean-Léo
// License: CC BY-NC 4.0
// Created: April 2, 2025
// Last modified: April 18, 2025
// Version: 1.0
// -----------------------------------------------------------------------------

use crate::capabilities::{ColliderRef, ColliderRegistry, Renderer};
use crate::errors::GridError;
use crate::resources::ResourceDefinition;

/// One tile of the grid. Its material state is always an exact snapshot of a
/// [`ResourceDefinition`]; the collider handle is derived from that snapshot
/// and reconciled on every transition.
///
/// # Fields
/// - `type_id`: Current material type; always resolves in the catalog.
/// - `durability`: Durability copied from the most recent definition.
/// - `has_collision`: Whether this cell currently blocks movement.
#[derive(Debug, Clone)]
pub struct Cell {
    pub type_id: String,
    pub durability: u32,
    pub has_collision: bool,
    collider: Option<ColliderRef>,
}

impl Cell {
    /// Snapshots a definition into a fresh cell with no collider. Used only
    /// during grid construction; the manager reconciles the collider right
    /// after via [`Cell::sync_collider`].
    pub fn from_definition(definition: &ResourceDefinition) -> Self {
        Cell {
            type_id: definition.type_id.clone(),
            durability: definition.durability,
            has_collision: definition.has_collision,
            collider: None,
        }
    }

    /// The collider handle currently held, if any. Present iff
    /// `has_collision` is true.
    pub fn collider(&self) -> Option<ColliderRef> {
        self.collider
    }

    /// Replaces this cell's material state with a snapshot of `definition`,
    /// reconciles the collider, and requests a repaint of the cell rect.
    ///
    /// Fails with `InvalidResourceDefinition` if the definition is malformed;
    /// the cell is left untouched in that case. Definitions sourced from the
    /// catalog are always valid.
    pub fn apply_transition(
        &mut self,
        definition: &ResourceDefinition,
        world_x: f32,
        world_y: f32,
        size: f32,
        colliders: &mut dyn ColliderRegistry,
        renderer: &mut dyn Renderer,
    ) -> Result<(), GridError> {
        definition.validate()?;

        self.type_id = definition.type_id.clone();
        self.durability = definition.durability;
        self.has_collision = definition.has_collision;

        self.sync_collider(world_x, world_y, size, colliders);
        renderer.draw_rect(world_x, world_y, size, definition.color);
        Ok(())
    }

    /// Brings the collider handle in line with the `has_collision` flag:
    /// creates one when the cell became solid, destroys the held one when it
    /// no longer is, and leaves an existing handle untouched otherwise (the
    /// collider geometry of a cell never changes).
    pub fn sync_collider(
        &mut self,
        world_x: f32,
        world_y: f32,
        size: f32,
        colliders: &mut dyn ColliderRegistry,
    ) {
        match (self.has_collision, self.collider) {
            (true, None) => {
                self.collider = Some(colliders.create_collider(world_x, world_y, size));
            }
            (false, Some(handle)) => {
                colliders.destroy_collider(handle);
                self.collider = None;
            }
            _ => {}
        }
        debug_assert_eq!(self.has_collision, self.collider.is_some());
    }

    /// Destroys the held collider, if any. Called when the cell is about to
    /// be discarded (grid teardown or re-initialization).
    pub fn release_collider(&mut self, colliders: &mut dyn ColliderRegistry) {
        if let Some(handle) = self.collider.take() {
            colliders.destroy_collider(handle);
            self.has_collision = false;
        }
    }
}
