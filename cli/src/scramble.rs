//! Random scramble generation. Randomness lives out here; the core never
//! draws a number.

use cube_core::{Movement, all_movements};

pub const DEFAULT_MIN: usize = 20;
pub const DEFAULT_MAX: usize = 35;

/// A random movement sequence whose length lies in `min..=max`.
pub fn scramble(min: usize, max: usize) -> Vec<Movement> {
    let alphabet = all_movements();
    let count = fastrand::usize(min..=max);
    (0..count)
        .map(|_| *fastrand::choice(&alphabet).expect("movement alphabet is not empty"))
        .collect()
}
