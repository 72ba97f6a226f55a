// -----------------------------------------------------------------------------
// File: main.rs
// Description: Entry point for the Resource Grid game.
//              Handles initialization, command-line arguments, and game loop.
// Author(s): DIARRA Amara & SERRANO Jean-Léo
// License: CC BY-NC 4.0
// Created: April 2, 2025
// Last modified: April 18, 2025
// Version: 1.0
// -----------------------------------------------------------------------------

use std::sync::RwLock;

use clap::Parser;
use ggez::{event, ContextBuilder, GameResult};

mod capabilities;
mod cell;
mod errors;
mod grid;
mod mainstate;
mod resources;

use crate::mainstate::MainState;

// Constants
const MIN_GRID_WIDTH: usize = 10;
const MIN_GRID_HEIGHT: usize = 10;
const MIN_CELL_SIZE: f32 = 5.0;

/// A struct representing the command-line arguments for configuring the game.
///
/// # Fields
///
/// * `width` - Grid width in cells. Must be at least 10. Defaults to 40.
/// * `height` - Grid height in cells. Must be at least 10. Defaults to 30.
/// * `cellsize` - Size of one cell in pixels. Must be at least 5.0. Defaults to 20.0.
/// * `range` - Interaction range in cells per axis. Defaults to 2.
#[derive(Parser)]
#[command(name = "Resource Grid")]
#[command(about = "A destructible resource grid sandbox", long_about = None)]
struct Args {
    /// Grid width in cells (minimum 10)
    #[arg(long, default_value_t = 40)]
    width: usize,

    /// Grid height in cells (minimum 10)
    #[arg(long, default_value_t = 30)]
    height: usize,

    /// Cell size in pixels (minimum 5.0)
    #[arg(long, default_value_t = 20.0)]
    cellsize: f32,

    /// Interaction range in cells per axis
    #[arg(long, default_value_t = 2)]
    range: u32,
}

// Constants
lazy_static::lazy_static! {
    static ref GRID_WIDTH: RwLock<usize> = RwLock::new(40);
    static ref GRID_HEIGHT: RwLock<usize> = RwLock::new(30);
    static ref CELL_SIZE: RwLock<f32> = RwLock::new(20.0);
    static ref INTERACTION_RANGE: RwLock<u32> = RwLock::new(2);
    static ref SCREEN_WIDTH: RwLock<f32> = RwLock::new(800.0);
    static ref SCREEN_HEIGHT: RwLock<f32> = RwLock::new(600.0);
}

// Read constants
pub fn read_grid_width() -> usize {
    *GRID_WIDTH.read().unwrap()
}
pub fn read_grid_height() -> usize {
    *GRID_HEIGHT.read().unwrap()
}
pub fn read_cell_size() -> f32 {
    *CELL_SIZE.read().unwrap()
}
pub fn read_interaction_range() -> u32 {
    *INTERACTION_RANGE.read().unwrap()
}
pub fn read_screen_width() -> f32 {
    *SCREEN_WIDTH.read().unwrap()
}
pub fn read_screen_height() -> f32 {
    *SCREEN_HEIGHT.read().unwrap()
}

// Update constants
fn update_constants(width: usize, height: usize, cell_size: f32, range: u32) {
    *GRID_WIDTH.write().unwrap() = width;
    *GRID_HEIGHT.write().unwrap() = height;
    *CELL_SIZE.write().unwrap() = cell_size;
    *INTERACTION_RANGE.write().unwrap() = range;

    // The window is sized to the grid exactly.
    *SCREEN_WIDTH.write().unwrap() = width as f32 * cell_size;
    *SCREEN_HEIGHT.write().unwrap() = height as f32 * cell_size;
}

pub fn main() -> GameResult {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize variables
    let width;
    let height;
    let cell_size;

    // Check if any arguments are below the minimum values and display a message
    if args.width < MIN_GRID_WIDTH {
        println!(
            "Warning: Grid width is below the minimum value of {}. Using {} instead.",
            MIN_GRID_WIDTH, MIN_GRID_WIDTH
        );
        width = MIN_GRID_WIDTH;
    } else {
        width = args.width;
    }
    if args.height < MIN_GRID_HEIGHT {
        println!(
            "Warning: Grid height is below the minimum value of {}. Using {} instead.",
            MIN_GRID_HEIGHT, MIN_GRID_HEIGHT
        );
        height = MIN_GRID_HEIGHT;
    } else {
        height = args.height;
    }
    if args.cellsize < MIN_CELL_SIZE {
        println!(
            "Warning: Cell size is below the minimum value of {}. Using {} instead.",
            MIN_CELL_SIZE, MIN_CELL_SIZE
        );
        cell_size = MIN_CELL_SIZE;
    } else {
        cell_size = args.cellsize;
    }

    // Update constants
    update_constants(width, height, cell_size, args.range);

    // Create a new context and event loop
    let cb = ContextBuilder::new("Resource Grid", "DIARRA&SERRANO")
        .window_setup(ggez::conf::WindowSetup::default().title("Resource Grid"))
        .window_mode(
            ggez::conf::WindowMode::default()
                .dimensions(read_screen_width(), read_screen_height())
                .resizable(false),
        );

    // Build the context and event loop
    let (ctx, event_loop) = cb.build()?;
    let state = MainState::new()?;

    // Run the event loop
    event::run(ctx, event_loop, state)
}
