//! Cross-layout rendering. Each face comes out of `get_face` already
//! oriented for display; this module only places the six 3x3 grids.

use std::fmt::Write;

use cube_core::{Color, Cube, Direction};
use owo_colors::OwoColorize;

/// Face placement: Up above, West through North across the middle band,
/// Down below.
const LAYOUT: [[Option<Direction>; 4]; 3] = [
    [None, Some(Direction::Up), None, None],
    [
        Some(Direction::West),
        Some(Direction::South),
        Some(Direction::East),
        Some(Direction::North),
    ],
    [None, Some(Direction::Down), None, None],
];

/// Render the cube as an unfolded cross, one letter per sticker.
#[must_use]
pub fn render(cube: &Cube, colored: bool) -> String {
    let mut out = String::new();
    for band in LAYOUT {
        let faces: Vec<Option<[[Color; 3]; 3]>> = band
            .iter()
            .map(|slot| slot.map(|direction| cube.get_face(direction)))
            .collect();
        let Some(last) = faces.iter().rposition(Option::is_some) else {
            continue;
        };

        for row in 0..3 {
            let mut line = String::new();
            for (slot, face) in faces[..=last].iter().enumerate() {
                if slot > 0 {
                    line.push(' ');
                }
                match face {
                    Some(face) => {
                        for color in face[row] {
                            let _ = write!(line, "{}", sticker(color, colored));
                        }
                    }
                    None => line.push_str("   "),
                }
            }
            out.push_str(&line);
            out.push('\n');
        }
    }
    out
}

fn sticker(color: Color, colored: bool) -> String {
    let letter = color.letter();
    if !colored {
        return letter.to_string();
    }
    match color {
        Color::White => letter.white().to_string(),
        Color::Orange => letter.truecolor(0xff, 0xa5, 0x00).to_string(),
        Color::Green => letter.green().to_string(),
        Color::Red => letter.red().to_string(),
        Color::Blue => letter.blue().to_string(),
        Color::Yellow => letter.yellow().to_string(),
        Color::Blank => letter.to_string(),
    }
}
