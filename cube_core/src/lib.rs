//! State model for a 3x3x3 twisty puzzle.
//!
//! The crate keeps the discrete sticker state (27 cubies, one sticker per
//! visible face direction) consistent under face movements expressed as
//! exact quarter-turn rotations of the integer grid. Printing, scramble
//! generation and interactive driving belong to consumers; this crate owns
//! the cell and direction semantics and nothing else.

pub mod cube;
pub mod grid;
pub mod movement;

pub use cube::{Color, Cube, CubeError, Cubie};
pub use grid::{Cell, GridError, Rotation, all_cells, face_cells, relocate};
pub use movement::{Axis, BaseMove, Direction, InvalidMovement, Movement, all_movements};
