// -----------------------------------------------------------------------------
// File: capabilities.rs
// Description: Narrow interfaces to the rendering and collision collaborators.
// Author(s): DIARRA Amara & SERRANO Jean-Léo
// License: CC BY-NC 4.0
// Created: April 2, 2025
// Last modified: April 18, 2025
// Version: 1.0
// -----------------------------------------------------------------------------

use crate::resources::Rgb;

/// Opaque handle to a collider owned by the collision subsystem. Minted by a
/// [`ColliderRegistry`]; the grid core never inspects what it refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColliderRef(pub u64);

/// What the grid core needs from the rendering collaborator.
pub trait Renderer {
    /// Requests that the cell rect at the given world position be repainted
    /// in the given color.
    fn draw_rect(&mut self, world_x: f32, world_y: f32, size: f32, color: Rgb);

    /// Signals which cell rect is currently under the pointer.
    fn highlight_rect(&mut self, world_x: f32, world_y: f32, size: f32);
}

/// What the grid core needs from the collision subsystem. Strict
/// request/response: the core asks for creation and destruction and holds
/// nothing but the returned handle.
pub trait ColliderRegistry {
    fn create_collider(&mut self, world_x: f32, world_y: f32, size: f32) -> ColliderRef;
    fn destroy_collider(&mut self, handle: ColliderRef);
}

#[cfg(test)]
pub mod doubles {
    //! Recording stand-ins for the external collaborators, shared by the
    //! cell and grid test modules.

    use std::collections::HashSet;

    use super::{ColliderRef, ColliderRegistry, Renderer};
    use crate::resources::Rgb;

    #[derive(Debug, Default)]
    pub struct RecordingRenderer {
        pub rects: Vec<(f32, f32, f32, Rgb)>,
        pub highlights: Vec<(f32, f32, f32)>,
    }

    impl Renderer for RecordingRenderer {
        fn draw_rect(&mut self, world_x: f32, world_y: f32, size: f32, color: Rgb) {
            self.rects.push((world_x, world_y, size, color));
        }

        fn highlight_rect(&mut self, world_x: f32, world_y: f32, size: f32) {
            self.highlights.push((world_x, world_y, size));
        }
    }

    #[derive(Debug, Default)]
    pub struct CountingColliders {
        next: u64,
        pub live: HashSet<ColliderRef>,
        pub created: usize,
        pub destroyed: usize,
    }

    impl ColliderRegistry for CountingColliders {
        fn create_collider(&mut self, _world_x: f32, _world_y: f32, _size: f32) -> ColliderRef {
            self.next += 1;
            let handle = ColliderRef(self.next);
            self.live.insert(handle);
            self.created += 1;
            handle
        }

        fn destroy_collider(&mut self, handle: ColliderRef) {
            assert!(self.live.remove(&handle), "destroyed a handle that was not live");
            self.destroyed += 1;
        }
    }
}
