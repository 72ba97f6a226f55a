// -----------------------------------------------------------------------------
// File: mainstate.rs
// Description: Main game state and event handler for the Resource Grid game.
// Author(s): DIARRA Amara & SERRANO Jean-Léo
// License: CC BY-NC 4.0
// Created: April 2, 2025
// Last modified: April 18, 2025
// Version: 1.0
// -----------------------------------------------------------------------------

use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::sync::Arc;

use ggez::event::{EventHandler, MouseButton};
use ggez::graphics::{Canvas, Color, DrawMode, DrawParam, Mesh, MeshBuilder, Rect};
use ggez::input::keyboard::KeyCode;
use ggez::{Context, GameError, GameResult};
use rand::Rng;
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};

use crate::capabilities::{ColliderRef, ColliderRegistry, Renderer};
use crate::grid::{GridManager, SelectionOutcome};
use crate::resources::ResourceCatalog;
use crate::{read_cell_size, read_grid_height, read_grid_width, read_interaction_range};

// Highlight overlay color from the original prototype, at half alpha.
const HIGHLIGHT_COLOR: Color = Color::new(0x76 as f32 / 255.0, 0xba as f32 / 255.0, 1.0, 0.5);

const PLAYER_SPEED: f32 = 160.0;

// Sound variants played when a cell breaks; one is picked at random.
const BREAK_SOUNDS: [&str; 2] = [
    "resources/sounds/break.ogg",
    "resources/sounds/break_alt.ogg",
];

/// Renderer capability backed by the frame loop: the whole grid is repainted
/// from cell state, so a draw request only has to mark the cached terrain
/// mesh stale and a highlight request only has to remember the latest rect.
#[derive(Debug, Default)]
pub struct RedrawTracker {
    dirty: bool,
    highlight: Option<(f32, f32, f32)>,
}

impl RedrawTracker {
    fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }
}

impl Renderer for RedrawTracker {
    fn draw_rect(&mut self, _world_x: f32, _world_y: f32, _size: f32, _color: crate::resources::Rgb) {
        self.dirty = true;
    }

    fn highlight_rect(&mut self, world_x: f32, world_y: f32, size: f32) {
        self.highlight = Some((world_x, world_y, size));
    }
}

/// Collider registry capability: handles are backed by axis-aligned squares
/// that the player movement code tests against. Stands in for a physics
/// engine's static bodies.
#[derive(Debug, Default)]
pub struct WorldColliders {
    next: u64,
    bodies: HashMap<ColliderRef, (f32, f32, f32)>,
}

impl WorldColliders {
    /// Whether a square of `half` half-extent centered on `(x, y)` overlaps
    /// any live collider.
    fn blocks(&self, x: f32, y: f32, half: f32) -> bool {
        self.bodies.values().any(|&(bx, by, size)| {
            x + half > bx && x - half < bx + size && y + half > by && y - half < by + size
        })
    }
}

impl ColliderRegistry for WorldColliders {
    fn create_collider(&mut self, world_x: f32, world_y: f32, size: f32) -> ColliderRef {
        self.next += 1;
        let handle = ColliderRef(self.next);
        self.bodies.insert(handle, (world_x, world_y, size));
        handle
    }

    fn destroy_collider(&mut self, handle: ColliderRef) {
        self.bodies.remove(&handle);
    }
}

/// Placeholder row-banded seeding from the original prototype: sky on top,
/// one row of grass, one of dirt, stone below. Proportions follow the
/// original's 16/30 split so other grid heights band sensibly.
pub fn banded_seed(y: usize, height: usize) -> String {
    let surface = height * 16 / 30;
    let type_id = if y < surface {
        "empty"
    } else if y == surface {
        "grass"
    } else if y == surface + 1 {
        "dirt"
    } else {
        "stone"
    };
    type_id.to_string()
}

/// The running game: the grid manager plus the concrete capability
/// implementations and the ggez/rodio plumbing around them.
///
/// # Fields
/// - `grid`: The grid manager, sole owner of all cells.
/// - `renderer`: Redraw/highlight tracker the grid core reports into.
/// - `colliders`: Live collider bodies, queried by player movement.
/// - `player`: Player position in world coordinates (top-down movement).
/// - `interaction_range`: Per-axis cell distance within which the player may
///   break cells.
/// - `terrain_mesh`: Cached mesh of all cell rects, rebuilt when stale.
/// - `_stream` / `stream_handle` / `sinks`: Audio output; absent when no
///   device is available, in which case the game is silent.
pub struct MainState {
    grid: GridManager,
    renderer: RedrawTracker,
    colliders: WorldColliders,
    player: (f32, f32),
    interaction_range: u32,
    terrain_mesh: Option<Mesh>,
    _stream: Option<OutputStream>,
    stream_handle: Option<Arc<OutputStreamHandle>>,
    sinks: Vec<Arc<Sink>>,
}

impl MainState {
    pub fn new() -> GameResult<MainState> {
        // A missing audio device disables sound rather than aborting.
        let (stream, stream_handle) = match OutputStream::try_default() {
            Ok((stream, handle)) => (Some(stream), Some(Arc::new(handle))),
            Err(_) => (None, None),
        };

        let width = read_grid_width();
        let height = read_grid_height();
        let cell_size = read_cell_size();

        let mut grid = GridManager::new(width, height, ResourceCatalog::standard(), cell_size);
        let mut renderer = RedrawTracker::default();
        let mut colliders = WorldColliders::default();

        // A seed that misses the catalog is a configuration defect; the
        // conversion to GameError aborts startup.
        grid.initialize_grid(
            move |_x, y| banded_seed(y, height),
            &mut colliders,
            &mut renderer,
        )?;

        // Spawn in the sky band, horizontally centered.
        let player = (width as f32 * cell_size / 2.0, cell_size * 2.0);

        Ok(MainState {
            grid,
            renderer,
            colliders,
            player,
            interaction_range: read_interaction_range(),
            terrain_mesh: None,
            _stream: stream,
            stream_handle,
            sinks: Vec::new(),
        })
    }

    // Move the player with per-axis collision sliding against the live
    // collider bodies. The per-frame update never touches grid state.
    fn move_player(&mut self, ctx: &Context, dt: f32) {
        let mut dx = 0.0;
        let mut dy = 0.0;
        if ctx.keyboard.is_key_pressed(KeyCode::A) || ctx.keyboard.is_key_pressed(KeyCode::Left) {
            dx -= PLAYER_SPEED * dt;
        }
        if ctx.keyboard.is_key_pressed(KeyCode::D) || ctx.keyboard.is_key_pressed(KeyCode::Right) {
            dx += PLAYER_SPEED * dt;
        }
        if ctx.keyboard.is_key_pressed(KeyCode::W) || ctx.keyboard.is_key_pressed(KeyCode::Up) {
            dy -= PLAYER_SPEED * dt;
        }
        if ctx.keyboard.is_key_pressed(KeyCode::S) || ctx.keyboard.is_key_pressed(KeyCode::Down) {
            dy += PLAYER_SPEED * dt;
        }

        let half = self.grid.cell_size() * 0.35;
        let world_w = self.grid.width() as f32 * self.grid.cell_size();
        let world_h = self.grid.height() as f32 * self.grid.cell_size();

        let candidate_x = (self.player.0 + dx).clamp(half, world_w - half);
        if !self.colliders.blocks(candidate_x, self.player.1, half) {
            self.player.0 = candidate_x;
        }
        let candidate_y = (self.player.1 + dy).clamp(half, world_h - half);
        if !self.colliders.blocks(self.player.0, candidate_y, half) {
            self.player.1 = candidate_y;
        }
    }

    fn play_break_sound(&mut self) {
        // Silence is fine: no device, no asset, or no decoder all just skip.
        let Some(handle) = &self.stream_handle else {
            return;
        };
        let index = rand::rng().random_range(0..BREAK_SOUNDS.len());
        let Ok(file) = File::open(BREAK_SOUNDS[index]) else {
            return;
        };
        let Ok(source) = Decoder::new(BufReader::new(file)) else {
            return;
        };
        let Ok(sink) = Sink::try_new(handle) else {
            return;
        };
        sink.set_volume(0.2);
        sink.append(source);
        self.sinks.push(Arc::new(sink));
    }

    // Rebuild the cached terrain mesh from cell state when the grid reported
    // a change (or on the first frame).
    fn rebuild_terrain_mesh_if_stale(&mut self, ctx: &mut Context) -> GameResult {
        if !self.renderer.take_dirty() && self.terrain_mesh.is_some() {
            return Ok(());
        }

        let cell_size = self.grid.cell_size();
        let mut builder = MeshBuilder::new();
        for x in 0..self.grid.width() as i32 {
            for y in 0..self.grid.height() as i32 {
                let Ok(cell) = self.grid.cell_at(x, y) else {
                    continue;
                };
                let Ok(def) = self.grid.catalog().lookup(&cell.type_id) else {
                    continue;
                };
                builder.rectangle(
                    DrawMode::fill(),
                    Rect::new(
                        x as f32 * cell_size,
                        y as f32 * cell_size,
                        cell_size,
                        cell_size,
                    ),
                    Color::from_rgb(def.color.r, def.color.g, def.color.b),
                )?;
            }
        }
        self.terrain_mesh = Some(Mesh::from_data(ctx, builder.build()));
        Ok(())
    }

    fn grid_coords_of(&self, x: f32, y: f32) -> (i32, i32) {
        let cell_size = self.grid.cell_size();
        ((x / cell_size).floor() as i32, (y / cell_size).floor() as i32)
    }
}

impl EventHandler<GameError> for MainState {
    fn update(&mut self, ctx: &mut Context) -> GameResult {
        // Drop sinks that finished playing.
        self.sinks.retain(|sink| !sink.empty());

        let dt = ctx.time.delta().as_secs_f32();
        self.move_player(ctx, dt);
        Ok(())
    }

    fn draw(&mut self, ctx: &mut Context) -> GameResult {
        self.rebuild_terrain_mesh_if_stale(ctx)?;

        let mut canvas = Canvas::from_frame(ctx, Color::WHITE);

        if let Some(mesh) = &self.terrain_mesh {
            canvas.draw(mesh, DrawParam::default());
        }

        if let Some((hx, hy, size)) = self.renderer.highlight {
            let highlight_mesh = Mesh::new_rectangle(
                ctx,
                DrawMode::fill(),
                Rect::new(hx, hy, size, size),
                HIGHLIGHT_COLOR,
            )?;
            canvas.draw(&highlight_mesh, DrawParam::default());
        }

        let half = self.grid.cell_size() * 0.35;
        let player_mesh = Mesh::new_rectangle(
            ctx,
            DrawMode::fill(),
            Rect::new(self.player.0 - half, self.player.1 - half, half * 2.0, half * 2.0),
            Color::from_rgb(40, 40, 40),
        )?;
        canvas.draw(&player_mesh, DrawParam::default());

        canvas.finish(ctx)
    }

    fn mouse_motion_event(
        &mut self,
        _ctx: &mut Context,
        x: f32,
        y: f32,
        _dx: f32,
        _dy: f32,
    ) -> GameResult {
        let (gx, gy) = self.grid_coords_of(x, y);
        self.grid.highlight(gx, gy, &mut self.renderer);
        Ok(())
    }

    fn mouse_button_down_event(
        &mut self,
        _ctx: &mut Context,
        button: MouseButton,
        x: f32,
        y: f32,
    ) -> GameResult {
        if button != MouseButton::Left {
            return Ok(());
        }
        let (gx, gy) = self.grid_coords_of(x, y);
        match self.grid.select(
            gx,
            gy,
            self.player,
            self.interaction_range,
            &mut self.colliders,
            &mut self.renderer,
        ) {
            Ok(SelectionOutcome::Transitioned { .. }) => self.play_break_sound(),
            Ok(SelectionOutcome::OutOfRange) | Ok(SelectionOutcome::AlreadyEmpty) => {}
            // Clicks land outside the grid when the window is larger than
            // the world; ignore them like out-of-range ones.
            Err(crate::errors::GridError::OutOfBounds { .. }) => {}
            Err(err) => return Err(err.into()),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn banded_seed_matches_the_original_layout() {
        // Original prototype: 30 rows, sky above row 16, grass at 16, dirt
        // at 17, stone below.
        assert_eq!(banded_seed(0, 30), "empty");
        assert_eq!(banded_seed(15, 30), "empty");
        assert_eq!(banded_seed(16, 30), "grass");
        assert_eq!(banded_seed(17, 30), "dirt");
        assert_eq!(banded_seed(18, 30), "stone");
        assert_eq!(banded_seed(29, 30), "stone");
    }

    #[test]
    fn banded_seed_only_emits_catalog_types() {
        let catalog = ResourceCatalog::standard();
        for height in [1, 2, 10, 30, 100] {
            for y in 0..height {
                assert!(catalog.lookup(&banded_seed(y, height)).is_ok());
            }
        }
    }

    #[test]
    fn world_colliders_block_overlapping_squares_only() {
        let mut colliders = WorldColliders::default();
        let handle = colliders.create_collider(20.0, 20.0, 20.0);

        assert!(colliders.blocks(30.0, 30.0, 7.0)); // inside the body
        assert!(!colliders.blocks(60.0, 30.0, 7.0)); // clear of it

        colliders.destroy_collider(handle);
        assert!(!colliders.blocks(30.0, 30.0, 7.0));
    }

    #[test]
    fn redraw_tracker_reports_staleness_once() {
        let mut tracker = RedrawTracker::default();
        assert!(!tracker.take_dirty());

        tracker.draw_rect(0.0, 0.0, 20.0, crate::resources::Rgb::new(1, 2, 3));
        assert!(tracker.take_dirty());
        assert!(!tracker.take_dirty());
    }
}
