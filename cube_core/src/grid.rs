//! The integer grid and the exact rotation engine.
//!
//! Every rotation in the system is a multiple of a quarter turn, so the
//! matrices are built from the quadrant sine/cosine tables and stay in
//! integers end to end. A rotated cell either lands back on the grid or the
//! movement tables are broken; there is no rounding to paper over.

use std::fmt;

use itertools::iproduct;
use thiserror::Error;

use crate::movement::Direction;

/// Side length of the cubie grid.
const SIDE: u8 = 3;

/// One of the 27 grid cells, each coordinate in 0..3.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Cell {
    pub x: u8,
    pub y: u8,
    pub z: u8,
}

impl Cell {
    /// The immobile core cell.
    pub const CENTER: Cell = Cell { x: 1, y: 1, z: 1 };

    /// Flat index into a 27-element array.
    pub(crate) fn linear_index(self) -> usize {
        usize::from(self.x) * 9 + usize::from(self.y) * 3 + usize::from(self.z)
    }

    fn centered(self) -> [i32; 3] {
        [
            i32::from(self.x) - 1,
            i32::from(self.y) - 1,
            i32::from(self.z) - 1,
        ]
    }

    // Casts happen after the -1..=1 range check.
    #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
    fn from_centered(v: [i32; 3]) -> Result<Cell, GridError> {
        if v.iter().any(|coordinate| !(-1..=1).contains(coordinate)) {
            return Err(GridError::OutOfRange(v[0] + 1, v[1] + 1, v[2] + 1));
        }
        Ok(Cell {
            x: (v[0] + 1) as u8,
            y: (v[1] + 1) as u8,
            z: (v[2] + 1) as u8,
        })
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// Internal-consistency failures of the rotation engine. Any of these means
/// the movement tables are defective; they are never a caller mistake.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("rotation sent a cell to ({0}, {1}, {2}), outside the 3x3x3 grid")]
    OutOfRange(i32, i32, i32),
    #[error("rotation did not permute the rotated cells")]
    NotAPermutation,
    #[error("rotation sent a face normal to ({0}, {1}, {2}), which is not a face normal")]
    SkewedNormal(i32, i32, i32),
}

/// The 9 cells of the named face: the bound axis pinned, the free axes swept
/// in the fixed x-outer, z-inner nested order. Display and serialization
/// rely on this order; do not change it.
#[must_use]
pub fn face_cells(direction: Direction) -> [Cell; 9] {
    let (axis, value) = direction.axis_binding();
    let mut ranges = [0..SIDE, 0..SIDE, 0..SIDE];
    ranges[axis.index()] = value..value + 1;
    let [xs, ys, zs] = ranges;

    let mut cells = [Cell::CENTER; 9];
    for (slot, (x, y, z)) in cells.iter_mut().zip(iproduct!(xs, ys, zs)) {
        *slot = Cell { x, y, z };
    }
    cells
}

/// All 27 cells in the same nested order as [`face_cells`].
#[must_use]
pub fn all_cells() -> [Cell; 27] {
    let mut cells = [Cell::CENTER; 27];
    for (slot, (x, y, z)) in cells
        .iter_mut()
        .zip(iproduct!(0..SIDE, 0..SIDE, 0..SIDE))
    {
        *slot = Cell { x, y, z };
    }
    cells
}

// Cosine and sine of n quarter turns.
const COS: [i32; 4] = [1, 0, -1, 0];
const SIN: [i32; 4] = [0, 1, 0, -1];

/// An exact 3D rotation: quarter turns about the x, then y, then z axis,
/// composed into a single integer matrix.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rotation([[i32; 3]; 3]);

impl Rotation {
    #[must_use]
    pub fn from_quarter_turns(x_turns: u8, y_turns: u8, z_turns: u8) -> Rotation {
        let (cx, sx) = quadrant(x_turns);
        let (cy, sy) = quadrant(y_turns);
        let (cz, sz) = quadrant(z_turns);
        let rx = [[1, 0, 0], [0, cx, -sx], [0, sx, cx]];
        let ry = [[cy, 0, sy], [0, 1, 0], [-sy, 0, cy]];
        let rz = [[cz, -sz, 0], [sz, cz, 0], [0, 0, 1]];
        Rotation(matmul(matmul(rx, ry), rz))
    }

    fn transform(self, v: [i32; 3]) -> [i32; 3] {
        let mut image = [0; 3];
        for (slot, row) in image.iter_mut().zip(self.0) {
            *slot = row[0] * v[0] + row[1] * v[1] + row[2] * v[2];
        }
        image
    }

    /// Move a cell around the grid center.
    ///
    /// # Errors
    ///
    /// [`GridError::OutOfRange`] when the image leaves the grid.
    pub fn apply(self, cell: Cell) -> Result<Cell, GridError> {
        Cell::from_centered(self.transform(cell.centered()))
    }

    /// Re-point a face direction by rotating its outward normal.
    ///
    /// # Errors
    ///
    /// [`GridError::SkewedNormal`] when the image is not a face normal.
    pub fn rotate_direction(self, direction: Direction) -> Result<Direction, GridError> {
        let image = self.transform(direction.normal());
        Direction::from_normal(image)
            .ok_or(GridError::SkewedNormal(image[0], image[1], image[2]))
    }
}

fn quadrant(turns: u8) -> (i32, i32) {
    let turns = usize::from(turns % 4);
    (COS[turns], SIN[turns])
}

fn matmul(a: [[i32; 3]; 3], b: [[i32; 3]; 3]) -> [[i32; 3]; 3] {
    let mut out = [[0; 3]; 3];
    for (row, a_row) in out.iter_mut().zip(a) {
        for (slot, column) in row.iter_mut().zip(0..3) {
            *slot = (0..3).map(|k| a_row[k] * b[k][column]).sum();
        }
    }
    out
}

/// Rotate every given cell, returning the (source, destination) pairs.
///
/// The destinations must be exactly the source set; a rotation that leaks
/// outside the given cells is rejected rather than applied.
///
/// # Errors
///
/// Any [`GridError`]; see the variants.
pub fn relocate(cells: &[Cell], rotation: Rotation) -> Result<Vec<(Cell, Cell)>, GridError> {
    let mut member = [false; 27];
    for cell in cells {
        member[cell.linear_index()] = true;
    }

    let mut taken = [false; 27];
    let mut moved = Vec::with_capacity(cells.len());
    for &cell in cells {
        let destination = rotation.apply(cell)?;
        let index = destination.linear_index();
        if !member[index] || taken[index] {
            return Err(GridError::NotAPermutation);
        }
        taken[index] = true;
        moved.push((cell, destination));
    }
    Ok(moved)
}
