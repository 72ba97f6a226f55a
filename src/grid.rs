// -----------------------------------------------------------------------------
// File: grid.rs
// Description: Grid manager owning the 2D cell array and the interaction rules.
// Author(s): DIARRA Amara & SERRANO Jean-Léo
// License: CC BY-NC 4.0
// Created: April 2, 2025
// Last modified: April 18, 2025
// Version: 1.0
// -----------------------------------------------------------------------------

use crate::capabilities::{ColliderRegistry, Renderer};
use crate::cell::Cell;
use crate::errors::GridError;
use crate::resources::{ResourceCatalog, EMPTY_TYPE};

/// What a call to [`GridManager::select`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionOutcome {
    /// The target cell was broken; `previous` is the type it held before.
    Transitioned { previous: String },
    /// The requester was outside the interaction range. Nothing changed.
    OutOfRange,
    /// The target cell was already empty. Nothing changed.
    AlreadyEmpty,
}

/// Owns the `width × height` cell array and gates every mutation.
///
/// Grid coordinates are `i32` in the public interface: the input layer
/// derives them by flooring pointer positions, which can land on negative
/// values, and those must be reported as out of bounds rather than wrap.
/// Storage is indexed `[x][y]`.
pub struct GridManager {
    width: usize,
    height: usize,
    cell_size: f32,
    catalog: ResourceCatalog,
    cells: Vec<Vec<Cell>>,
}

impl GridManager {
    /// Creates a manager with no cells. [`GridManager::initialize_grid`] must
    /// run before any query or mutation; until then every coordinate is out
    /// of bounds.
    pub fn new(width: usize, height: usize, catalog: ResourceCatalog, cell_size: f32) -> Self {
        GridManager {
            width,
            height,
            cell_size,
            catalog,
            cells: Vec::new(),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    pub fn catalog(&self) -> &ResourceCatalog {
        &self.catalog
    }

    /// Populates every coordinate from `seed_fn(x, y)` resolved through the
    /// catalog, creates colliders for solid cells, and draws each cell once.
    ///
    /// Re-invoking replaces the whole grid; colliders held by the old cells
    /// are destroyed first so none leak. All seed type ids are resolved
    /// before any cell or collider is built, so a lookup miss (a
    /// configuration defect) propagates without side effects.
    pub fn initialize_grid<F>(
        &mut self,
        mut seed_fn: F,
        colliders: &mut dyn ColliderRegistry,
        renderer: &mut dyn Renderer,
    ) -> Result<(), GridError>
    where
        F: FnMut(usize, usize) -> String,
    {
        // Resolve the full seeding first; a miss must not leave a half-built
        // grid behind.
        let mut seeded = Vec::with_capacity(self.width);
        for x in 0..self.width {
            let mut column = Vec::with_capacity(self.height);
            for y in 0..self.height {
                let type_id = seed_fn(x, y);
                column.push(self.catalog.lookup(&type_id)?.clone());
            }
            seeded.push(column);
        }

        self.release_colliders(colliders);

        let mut cells = Vec::with_capacity(self.width);
        for (x, column) in seeded.into_iter().enumerate() {
            let mut cell_column = Vec::with_capacity(self.height);
            for (y, definition) in column.into_iter().enumerate() {
                let (wx, wy) = self.world_pos(x, y);
                let mut cell = Cell::from_definition(&definition);
                cell.sync_collider(wx, wy, self.cell_size, colliders);
                renderer.draw_rect(wx, wy, self.cell_size, definition.color);
                cell_column.push(cell);
            }
            cells.push(cell_column);
        }
        self.cells = cells;
        Ok(())
    }

    /// The cell at `(x, y)`, or `OutOfBounds`.
    pub fn cell_at(&self, x: i32, y: i32) -> Result<&Cell, GridError> {
        let (xi, yi) = self.index(x, y)?;
        Ok(&self.cells[xi][yi])
    }

    /// Signals the renderer which cell is under the pointer. Out-of-bounds
    /// requests are silently ignored: they originate from unconstrained
    /// pointer movement, not from a caller bug.
    pub fn highlight(&self, x: i32, y: i32, renderer: &mut dyn Renderer) {
        if let Ok((xi, yi)) = self.index(x, y) {
            let (wx, wy) = self.world_pos(xi, yi);
            renderer.highlight_rect(wx, wy, self.cell_size);
        }
    }

    /// Attempts to break the cell at `(x, y)` on behalf of a requester
    /// standing at `requester_pos` (world coordinates).
    ///
    /// The requester's own grid coordinate is `floor(pos / cell_size)`
    /// componentwise, and the interaction is authorized iff both axis
    /// distances are within `interaction_range` (a box check, not radial).
    /// An unauthorized call is not an error; it simply does nothing and
    /// reports [`SelectionOutcome::OutOfRange`]. An authorized call on an
    /// already-empty cell does nothing as well. Otherwise the cell
    /// transitions to the catalog's `"empty"` definition.
    pub fn select(
        &mut self,
        x: i32,
        y: i32,
        requester_pos: (f32, f32),
        interaction_range: u32,
        colliders: &mut dyn ColliderRegistry,
        renderer: &mut dyn Renderer,
    ) -> Result<SelectionOutcome, GridError> {
        let (xi, yi) = self.index(x, y)?;

        let requester_x = (requester_pos.0 / self.cell_size).floor() as i64;
        let requester_y = (requester_pos.1 / self.cell_size).floor() as i64;
        let distance_x = (i64::from(x) - requester_x).abs();
        let distance_y = (i64::from(y) - requester_y).abs();
        if distance_x > i64::from(interaction_range) || distance_y > i64::from(interaction_range) {
            return Ok(SelectionOutcome::OutOfRange);
        }

        if self.cells[xi][yi].type_id == EMPTY_TYPE {
            return Ok(SelectionOutcome::AlreadyEmpty);
        }

        let empty = self.catalog.lookup(EMPTY_TYPE)?.clone();
        let (wx, wy) = self.world_pos(xi, yi);
        let previous = self.cells[xi][yi].type_id.clone();
        self.cells[xi][yi].apply_transition(
            &empty,
            wx,
            wy,
            self.cell_size,
            colliders,
            renderer,
        )?;
        Ok(SelectionOutcome::Transitioned { previous })
    }

    /// Destroys every collider the grid holds. Called on teardown, and
    /// internally before the grid is replaced.
    pub fn release_colliders(&mut self, colliders: &mut dyn ColliderRegistry) {
        for column in &mut self.cells {
            for cell in column {
                cell.release_collider(colliders);
            }
        }
    }

    // Bounds check against actual storage, so queries before initialization
    // are rejected rather than panicking.
    fn index(&self, x: i32, y: i32) -> Result<(usize, usize), GridError> {
        if x >= 0 && y >= 0 {
            let (xi, yi) = (x as usize, y as usize);
            if xi < self.cells.len() && yi < self.cells[xi].len() {
                return Ok((xi, yi));
            }
        }
        Err(GridError::OutOfBounds { x, y })
    }

    fn world_pos(&self, x: usize, y: usize) -> (f32, f32) {
        (x as f32 * self.cell_size, y as f32 * self.cell_size)
    }
}
