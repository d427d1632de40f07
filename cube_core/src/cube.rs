//! The cube state: 27 cubies in a flat grid, each cubie a plain oriented
//! sticker set, plus the per-instance table of which directions are visible
//! at each cell.

use std::fmt;

use log::debug;
use thiserror::Error;

use crate::grid::{self, Cell, GridError, Rotation};
use crate::movement::{Direction, InvalidMovement, Movement};

/// A sticker color. `Blank` is the distinguished unset marker, used for
/// hidden interior faces and erased pieces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Color {
    White,
    Orange,
    Green,
    Red,
    Blue,
    Yellow,
    Blank,
}

impl Color {
    #[must_use]
    pub fn letter(self) -> char {
        match self {
            Color::White => 'W',
            Color::Orange => 'O',
            Color::Green => 'G',
            Color::Red => 'R',
            Color::Blue => 'B',
            Color::Yellow => 'Y',
            Color::Blank => 'X',
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// Solved-state color per face, indexed like `Direction::ALL`.
const SOLVED_COLORS: [Color; 6] = [
    Color::White,
    Color::Orange,
    Color::Green,
    Color::Red,
    Color::Blue,
    Color::Yellow,
];

/// One cubie: one sticker per face direction, `Blank` where nothing shows.
///
/// A plain value type. Which directions are actually visible at the cubie's
/// current cell is the cube's business, not the cubie's; a movement carries
/// the whole sticker set along unchanged and only re-points it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cubie {
    stickers: [Color; 6],
}

impl Cubie {
    const BLANK: Cubie = Cubie {
        stickers: [Color::Blank; 6],
    };

    /// The color this cubie shows toward `direction`.
    #[must_use]
    pub fn sticker(&self, direction: Direction) -> Color {
        self.stickers[direction.index()]
    }

    fn set_sticker(&mut self, direction: Direction, color: Color) {
        self.stickers[direction.index()] = color;
    }

    /// Re-point every sticker through the rotation. The sticker multiset is
    /// untouched; only the direction each color faces changes.
    fn rotate(&mut self, rotation: Rotation) -> Result<(), GridError> {
        let mut rotated = [Color::Blank; 6];
        for direction in Direction::ALL {
            let image = rotation.rotate_direction(direction)?;
            rotated[image.index()] = self.sticker(direction);
        }
        self.stickers = rotated;
        Ok(())
    }
}

/// The face directions exposed at one grid cell, iterated in canonical
/// direction order. A corner cell holds 3, an edge 2, a face center 1, the
/// core cell 0.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct DirectionSet(u8);

impl DirectionSet {
    fn insert(&mut self, direction: Direction) {
        self.0 |= 1 << direction.index();
    }

    fn contains(self, direction: Direction) -> bool {
        self.0 & (1 << direction.index()) != 0
    }

    fn iter(self) -> impl Iterator<Item = Direction> {
        Direction::ALL
            .into_iter()
            .filter(move |direction| self.contains(*direction))
    }
}

/// What an operation on the cube can report.
#[derive(Error, Debug)]
pub enum CubeError {
    /// The token was rejected before any mutation; the cube is unchanged.
    #[error(transparent)]
    InvalidMovement(#[from] InvalidMovement),
    /// The rotation engine contradicted its own tables. Nothing was
    /// committed; the cube is unchanged.
    #[error("internal consistency failure: {0}")]
    Inconsistent(#[from] GridError),
}

/// A 3x3x3 cube of cubies, mutated in place by movements. Cubies are never
/// created or destroyed after construction, only relocated and re-pointed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cube {
    cubies: [Cubie; 27],
    directions: [DirectionSet; 27],
}

impl Cube {
    /// A solved cube: one color per face, hidden faces blank. Also derives
    /// the direction-set table, owned by this instance alone.
    #[must_use]
    pub fn new() -> Cube {
        let mut cubies = [Cubie::BLANK; 27];
        let mut directions = [DirectionSet::default(); 27];
        for (direction, color) in Direction::ALL.into_iter().zip(SOLVED_COLORS) {
            for cell in grid::face_cells(direction) {
                cubies[cell.linear_index()].set_sticker(direction, color);
                directions[cell.linear_index()].insert(direction);
            }
        }
        Cube { cubies, directions }
    }

    /// The face as seen from outside the cube, pre-oriented for display.
    ///
    /// Up, South and West read in natural cell order; North and East have
    /// each row mirrored and Down its row order flipped, so that adjacent
    /// faces drawn edge to edge line up. The asymmetry is a fixed convention
    /// reproduced from the reference layout; do not "simplify" it.
    #[must_use]
    pub fn get_face(&self, direction: Direction) -> [[Color; 3]; 3] {
        let mut face = [[Color::Blank; 3]; 3];
        for (index, cell) in grid::face_cells(direction).into_iter().enumerate() {
            face[index / 3][index % 3] = self.cubies[cell.linear_index()].sticker(direction);
        }
        match direction {
            Direction::Up | Direction::South | Direction::West => {}
            Direction::North | Direction::East => {
                for row in &mut face {
                    row.reverse();
                }
            }
            Direction::Down => face.reverse(),
        }
        face
    }

    /// Parse and apply one movement token.
    ///
    /// # Errors
    ///
    /// [`CubeError::InvalidMovement`] when the token does not match the
    /// grammar; [`CubeError::Inconsistent`] when the movement tables are
    /// defective. Either way the cube is left exactly as it was.
    pub fn apply_movement(&mut self, token: &str) -> Result<(), CubeError> {
        self.apply(token.parse::<Movement>()?)
    }

    /// Apply an already-parsed movement.
    ///
    /// Relocation of the 9 face cubies and re-orientation of their stickers
    /// use the one rotation built here, so body motion and face orientation
    /// can never skew. The result is staged and committed at the end; the
    /// state never holds a half-applied movement.
    ///
    /// # Errors
    ///
    /// [`CubeError::Inconsistent`]; see [`Cube::apply_movement`].
    pub fn apply(&mut self, movement: Movement) -> Result<(), CubeError> {
        let [x_turns, y_turns, z_turns] = movement.quarter_turns();
        let rotation = Rotation::from_quarter_turns(x_turns, y_turns, z_turns);
        let face = movement.base.face();
        let moved = grid::relocate(&grid::face_cells(face), rotation)?;

        debug!("applying {movement} to the {face} face");

        let mut staged = self.cubies;
        for &(source, destination) in &moved {
            let mut cubie = self.cubies[source.linear_index()];
            cubie.rotate(rotation)?;
            staged[destination.linear_index()] = cubie;
        }
        self.cubies = staged;
        Ok(())
    }

    /// Apply a whole token sequence, stopping at the first bad token.
    ///
    /// # Errors
    ///
    /// See [`Cube::apply_movement`]. Movements before the failing token stay
    /// applied.
    pub fn apply_scramble<'a, I>(&mut self, tokens: I) -> Result<(), CubeError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        for token in tokens {
            self.apply_movement(token)?;
        }
        Ok(())
    }

    /// The directions visible at `cell`, in canonical order. Inspection
    /// tools go through this instead of reasoning about grid geometry.
    pub fn directions_at(&self, cell: Cell) -> impl Iterator<Item = Direction> {
        self.directions[cell.linear_index()].iter()
    }

    /// The colors on the cubie at `cell`, ordered by the cell's direction
    /// set.
    #[must_use]
    pub fn get_piece_colors(&self, cell: Cell) -> Vec<Color> {
        self.directions_at(cell)
            .map(|direction| self.cubies[cell.linear_index()].sticker(direction))
            .collect()
    }

    /// The cell of the cubie carrying exactly this color multiset; query
    /// order does not matter. First match in fixed cell order; `None` when
    /// no cubie matches, which is an expected outcome rather than an error.
    #[must_use]
    pub fn find_piece(&self, colors: &[Color]) -> Option<Cell> {
        let mut wanted = colors.to_vec();
        wanted.sort_unstable();
        grid::all_cells().into_iter().find(|&cell| {
            let mut piece = self.get_piece_colors(cell);
            piece.sort_unstable();
            piece == wanted
        })
    }

    /// Blank out every sticker of the matching cubie, returning its cell.
    /// A query that matches nothing is a no-op.
    pub fn erase_piece(&mut self, colors: &[Color]) -> Option<Cell> {
        let cell = self.find_piece(colors)?;
        for direction in self.directions[cell.linear_index()].iter() {
            self.cubies[cell.linear_index()].set_sticker(direction, Color::Blank);
        }
        Some(cell)
    }
}

impl Default for Cube {
    fn default() -> Cube {
        Cube::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(x: u8, y: u8, z: u8) -> Cell {
        Cell { x, y, z }
    }

    /// The order-independent fingerprint color conservation is stated over:
    /// every cubie's sorted colors, sorted across cubies.
    fn piece_multisets(cube: &Cube) -> Vec<Vec<Color>> {
        let mut pieces: Vec<Vec<Color>> = grid::all_cells()
            .into_iter()
            .map(|c| {
                let mut piece = cube.get_piece_colors(c);
                piece.sort_unstable();
                piece
            })
            .collect();
        pieces.sort_unstable();
        pieces
    }

    #[test]
    fn a_new_cube_is_solid_on_every_face() {
        let cube = Cube::new();
        for (direction, color) in Direction::ALL.into_iter().zip(SOLVED_COLORS) {
            assert_eq!(cube.get_face(direction), [[color; 3]; 3]);
        }
    }

    #[test]
    fn direction_sets_match_cell_geometry() {
        let cube = Cube::new();
        assert_eq!(cube.directions_at(Cell::CENTER).count(), 0);
        assert_eq!(cube.directions_at(cell(0, 1, 1)).count(), 1);
        assert_eq!(cube.directions_at(cell(0, 2, 1)).count(), 2);
        assert_eq!(cube.directions_at(cell(0, 2, 2)).count(), 3);
        let total: usize = grid::all_cells()
            .into_iter()
            .map(|c| cube.directions_at(c).count())
            .sum();
        assert_eq!(total, 54);
    }

    #[test]
    fn every_color_covers_nine_stickers() {
        let mut cube = Cube::new();
        cube.apply_scramble(["U'", "F", "B", "R'", "U", "R'", "F'", "D2", "L", "F"])
            .unwrap();
        for color in SOLVED_COLORS {
            let count: usize = grid::all_cells()
                .into_iter()
                .map(|c| {
                    cube.get_piece_colors(c)
                        .into_iter()
                        .filter(|&sticker| sticker == color)
                        .count()
                })
                .sum();
            assert_eq!(count, 9, "{color}");
        }
    }

    #[test]
    fn movements_conserve_piece_color_multisets() {
        let mut cube = Cube::new();
        let solved_pieces = piece_multisets(&cube);
        cube.apply_scramble(["D'", "R'", "D", "R", "D", "F", "D'", "F'", "U2", "L2"])
            .unwrap();
        assert_ne!(cube, Cube::new());
        assert_eq!(piece_multisets(&cube), solved_pieces);
    }

    #[test]
    fn four_quarter_turns_are_the_identity() {
        for token in ["U", "L", "F", "R", "B", "D"] {
            let mut cube = Cube::new();
            for _ in 0..4 {
                cube.apply_movement(token).unwrap();
            }
            assert_eq!(cube, Cube::new(), "{token}");
        }
    }

    #[test]
    fn primed_movements_invert_their_base() {
        for base in ["U", "L", "F", "R", "B", "D"] {
            let mut cube = Cube::new();
            cube.apply_scramble(["F2", "R"]).unwrap();
            let before = cube.clone();

            cube.apply_movement(base).unwrap();
            assert_ne!(cube, before);
            cube.apply_movement(&format!("{base}'")).unwrap();
            assert_eq!(cube, before, "{base}");
        }
    }

    #[test]
    fn doubled_movements_square_to_the_identity() {
        for token in ["U2", "L2", "F2", "R2", "B2", "D2"] {
            let mut cube = Cube::new();
            cube.apply_movement(token).unwrap();
            cube.apply_movement(token).unwrap();
            assert_eq!(cube, Cube::new(), "{token}");
        }
    }

    #[test]
    fn u_turn_cycles_the_top_rows() {
        let mut cube = Cube::new();
        cube.apply_movement("U").unwrap();

        // The turned face itself stays macroscopically solid.
        assert_eq!(cube.get_face(Direction::Up), [[Color::White; 3]; 3]);
        assert_eq!(cube.get_face(Direction::Down), [[Color::Yellow; 3]; 3]);

        // Each side's top row comes from the neighbor: South shows East's
        // old row, East shows North's, North shows West's, West shows
        // South's.
        for (direction, top, rest) in [
            (Direction::South, Color::Red, Color::Green),
            (Direction::East, Color::Blue, Color::Red),
            (Direction::North, Color::Orange, Color::Blue),
            (Direction::West, Color::Green, Color::Orange),
        ] {
            let face = cube.get_face(direction);
            assert_eq!(face[0], [top; 3], "{direction} top row");
            assert_eq!(face[1], [rest; 3], "{direction} middle row");
            assert_eq!(face[2], [rest; 3], "{direction} bottom row");
        }
    }

    #[test]
    fn r_turn_pins_the_display_mirroring() {
        let mut cube = Cube::new();
        cube.apply_movement("R").unwrap();

        assert_eq!(cube.get_face(Direction::East), [[Color::Red; 3]; 3]);
        assert_eq!(cube.get_face(Direction::West), [[Color::Orange; 3]; 3]);

        for row in cube.get_face(Direction::Up) {
            assert_eq!(row, [Color::White, Color::White, Color::Green]);
        }
        for row in cube.get_face(Direction::South) {
            assert_eq!(row, [Color::Green, Color::Green, Color::Yellow]);
        }
        for row in cube.get_face(Direction::Down) {
            assert_eq!(row, [Color::Yellow, Color::Yellow, Color::Blue]);
        }
        // North's rows are mirrored for display, so the moved column shows
        // leftmost there.
        for row in cube.get_face(Direction::North) {
            assert_eq!(row, [Color::White, Color::Blue, Color::Blue]);
        }
    }

    #[test]
    fn invalid_tokens_leave_the_state_alone() {
        let mut cube = Cube::new();
        cube.apply_scramble(["R", "U2"]).unwrap();
        let before = cube.clone();

        for token in ["Q", "U3", "UU", "R''", ""] {
            let outcome = cube.apply_movement(token);
            assert!(
                matches!(outcome, Err(CubeError::InvalidMovement(_))),
                "{token:?}"
            );
            assert_eq!(cube, before, "{token:?}");
        }
    }

    #[test]
    fn find_piece_ignores_query_order() {
        let cube = Cube::new();
        let edge = cube.find_piece(&[Color::Green, Color::Red]);
        assert_eq!(edge, Some(cell(1, 2, 2)));
        assert_eq!(cube.find_piece(&[Color::Red, Color::Green]), edge);

        let corner = cube.find_piece(&[Color::Red, Color::White, Color::Green]);
        assert_eq!(corner, Some(cell(0, 2, 2)));
        assert_eq!(
            cube.find_piece(&[Color::Green, Color::Red, Color::White]),
            corner
        );
    }

    #[test]
    fn find_piece_reports_absence_as_none() {
        let cube = Cube::new();
        assert_eq!(cube.find_piece(&[Color::White, Color::White]), None);
        assert_eq!(cube.find_piece(&[Color::White, Color::Yellow]), None);
    }

    #[test]
    fn erased_pieces_go_blank_and_unfindable() {
        let mut cube = Cube::new();
        let erased = cube.erase_piece(&[Color::Green, Color::Red]);
        assert_eq!(erased, Some(cell(1, 2, 2)));

        assert_eq!(cube.find_piece(&[Color::Green, Color::Red]), None);
        assert_eq!(
            cube.find_piece(&[Color::Blank, Color::Blank]),
            Some(cell(1, 2, 2))
        );
        assert_eq!(cube.get_face(Direction::South)[1][2], Color::Blank);

        // Nothing matches, nothing changes.
        let before = cube.clone();
        assert_eq!(cube.erase_piece(&[Color::Green, Color::Red]), None);
        assert_eq!(cube, before);
    }

    #[test]
    fn solved_piece_lookup_matches_the_reference_layout() {
        let cube = Cube::new();
        assert_eq!(cube.get_piece_colors(Cell::CENTER), vec![]);
        assert_eq!(cube.get_piece_colors(cell(0, 1, 1)), vec![Color::White]);
        assert_eq!(
            cube.get_piece_colors(cell(1, 2, 2)),
            vec![Color::Green, Color::Red]
        );
        assert_eq!(
            cube.get_piece_colors(cell(0, 2, 0)),
            vec![Color::White, Color::Orange, Color::Green]
        );
    }
}
