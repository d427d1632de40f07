//! The fixed orientation and movement tables: which axis each face direction
//! binds, which rotation each basic movement performs, and the movement-token
//! grammar.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// One of the three orthogonal grid axes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

/// The six face directions of the cube.
///
/// The variant order is canonical: it fixes the solved-state color assigned
/// to each face and the order in which a cell's exposed directions are
/// enumerated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    West,
    South,
    East,
    North,
    Down,
}

impl Direction {
    pub const ALL: [Direction; 6] = [
        Direction::Up,
        Direction::West,
        Direction::South,
        Direction::East,
        Direction::North,
        Direction::Down,
    ];

    /// The axis this direction pins and the pinned coordinate. The middle
    /// layer is never a face, so the coordinate is always 0 or 2.
    #[must_use]
    pub fn axis_binding(self) -> (Axis, u8) {
        match self {
            Direction::Up => (Axis::X, 0),
            Direction::West => (Axis::Z, 0),
            Direction::South => (Axis::Y, 2),
            Direction::East => (Axis::Z, 2),
            Direction::North => (Axis::Y, 0),
            Direction::Down => (Axis::X, 2),
        }
    }

    /// Outward unit normal in coordinates centered on the core cell.
    #[must_use]
    pub fn normal(self) -> [i32; 3] {
        let (axis, value) = self.axis_binding();
        let mut normal = [0; 3];
        normal[axis.index()] = i32::from(value) - 1;
        normal
    }

    /// Inverse of [`Direction::normal`].
    #[must_use]
    pub fn from_normal(normal: [i32; 3]) -> Option<Direction> {
        Direction::ALL
            .into_iter()
            .find(|direction| direction.normal() == normal)
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }

    #[must_use]
    pub fn letter(self) -> char {
        match self {
            Direction::Up => 'U',
            Direction::West => 'W',
            Direction::South => 'S',
            Direction::East => 'E',
            Direction::North => 'N',
            Direction::Down => 'D',
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// The six basic movements, one quarter turn of one face each.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BaseMove {
    U,
    L,
    F,
    R,
    B,
    D,
}

impl BaseMove {
    pub const ALL: [BaseMove; 6] = [
        BaseMove::U,
        BaseMove::L,
        BaseMove::F,
        BaseMove::R,
        BaseMove::B,
        BaseMove::D,
    ];

    /// The face this movement rotates.
    #[must_use]
    pub fn face(self) -> Direction {
        match self {
            BaseMove::U => Direction::Up,
            BaseMove::L => Direction::West,
            BaseMove::F => Direction::South,
            BaseMove::R => Direction::East,
            BaseMove::B => Direction::North,
            BaseMove::D => Direction::Down,
        }
    }

    /// Quarter-turn counts about the x, y and z axes, each in 0..4. Three
    /// quarters stands in for a negative quarter turn; the signs make every
    /// movement a clockwise quarter turn seen from outside its face.
    #[must_use]
    pub fn quarter_turns(self) -> [u8; 3] {
        match self {
            BaseMove::U => [3, 0, 0],
            BaseMove::L => [0, 0, 3],
            BaseMove::F => [0, 1, 0],
            BaseMove::R => [0, 0, 1],
            BaseMove::B => [0, 3, 0],
            BaseMove::D => [1, 0, 0],
        }
    }

    fn letter(self) -> char {
        match self {
            BaseMove::U => 'U',
            BaseMove::L => 'L',
            BaseMove::F => 'F',
            BaseMove::R => 'R',
            BaseMove::B => 'B',
            BaseMove::D => 'D',
        }
    }

    fn from_letter(letter: char) -> Option<BaseMove> {
        BaseMove::ALL
            .into_iter()
            .find(|base| base.letter() == letter)
    }
}

/// A movement token: a basic movement repeated `times` quarter turns.
/// `times` is 1 (plain), 2 (doubled) or 3 (primed).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Movement {
    pub base: BaseMove,
    pub times: u8,
}

impl Movement {
    /// The movement undoing this one.
    #[must_use]
    pub fn inverse(self) -> Movement {
        Movement {
            base: self.base,
            times: 4 - self.times,
        }
    }

    /// Effective quarter-turn counts: the base movement's counts scaled by
    /// `times`.
    #[must_use]
    pub fn quarter_turns(self) -> [u8; 3] {
        self.base.quarter_turns().map(|turns| (turns * self.times) % 4)
    }
}

/// A token that does not match the movement grammar.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unsupported movement: {0:?}")]
pub struct InvalidMovement(pub String);

impl FromStr for Movement {
    type Err = InvalidMovement;

    fn from_str(s: &str) -> Result<Movement, InvalidMovement> {
        let invalid = || InvalidMovement(s.to_owned());
        let mut chars = s.chars();
        let base = chars
            .next()
            .and_then(BaseMove::from_letter)
            .ok_or_else(invalid)?;
        let times = match chars.next() {
            None => 1,
            Some('2') => 2,
            Some('\'') => 3,
            Some(_) => return Err(invalid()),
        };
        if chars.next().is_some() {
            return Err(invalid());
        }
        Ok(Movement { base, times })
    }
}

impl fmt::Display for Movement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.base.letter())?;
        match self.times {
            2 => write!(f, "2"),
            3 => write!(f, "'"),
            _ => Ok(()),
        }
    }
}

/// Every legal movement token: the six basic movements, each plain, doubled
/// and primed.
#[must_use]
pub fn all_movements() -> Vec<Movement> {
    BaseMove::ALL
        .into_iter()
        .flat_map(|base| (1..=3).map(move |times| Movement { base, times }))
        .collect()
}
