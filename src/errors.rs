// -----------------------------------------------------------------------------
// File: errors.rs
// Description: Error taxonomy for the resource grid core.
// Author(s): DIARRA Amara & SERRANO Jean-Léo
// License: CC BY-NC 4.0
// Created: April 2, 2025
// Last modified: April 18, 2025
// Version: 1.0
// -----------------------------------------------------------------------------

use std::error::Error;
use std::fmt;

use ggez::GameError;

/// Errors raised by the grid core.
///
/// # Variants
///
/// - `OutOfBounds`: A grid coordinate outside `[0, width) × [0, height)` was
///   passed to a query or mutation. Recoverable; callers may ignore or clamp.
/// - `UnknownResourceType`: A type id did not resolve in the resource catalog.
///   Fatal when it happens while seeding, since it indicates a configuration
///   defect.
/// - `InvalidResourceDefinition`: A malformed definition reached a transition.
///   Cannot happen while definitions are only ever sourced from the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    OutOfBounds { x: i32, y: i32 },
    UnknownResourceType(String),
    InvalidResourceDefinition(String),
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridError::OutOfBounds { x, y } => {
                write!(f, "grid coordinate ({}, {}) is out of bounds", x, y)
            }
            GridError::UnknownResourceType(type_id) => {
                write!(f, "unknown resource type '{}'", type_id)
            }
            GridError::InvalidResourceDefinition(reason) => {
                write!(f, "invalid resource definition: {}", reason)
            }
        }
    }
}

impl Error for GridError {}

// Lets grid failures abort the ggez event loop with `?` at the binary
// boundary (a seeding failure at startup must not be swallowed).
impl From<GridError> for GameError {
    fn from(err: GridError) -> Self {
        GameError::CustomError(err.to_string())
    }
}
