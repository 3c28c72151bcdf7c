//! Elliptical arc grid mapping.
//!
//! ```text
//! u = x · √(1 − y²/2)
//! v = y · √(1 − x²/2)
//! ```
//!
//! The inverse is closed-form. It is only exact inside the disc; for points
//! outside it can land outside the square.

use super::checked_sqrt;
use crate::NormalizedCoordinate;

const TWO_SQRT_2: f64 = 2.0 * std::f64::consts::SQRT_2;

/// Square → disc. `None` only if a radicand goes negative (|x| or |y| > √2).
pub fn square_to_disc(x: f64, y: f64) -> Option<NormalizedCoordinate> {
    let u = x * checked_sqrt(1.0 - y * y / 2.0)?;
    let v = y * checked_sqrt(1.0 - x * x / 2.0)?;
    Some((u, v))
}

/// Disc → square. `None` if any of the four radicands is negative.
pub fn disc_to_square(u: f64, v: f64) -> Option<NormalizedCoordinate> {
    let u2 = u * u;
    let v2 = v * v;
    let subterm_x = 2.0 + u2 - v2;
    let subterm_y = 2.0 - u2 + v2;
    let term_x1 = subterm_x + u * TWO_SQRT_2;
    let term_x2 = subterm_x - u * TWO_SQRT_2;
    let term_y1 = subterm_y + v * TWO_SQRT_2;
    let term_y2 = subterm_y - v * TWO_SQRT_2;

    let x = 0.5 * checked_sqrt(term_x1)? - 0.5 * checked_sqrt(term_x2)?;
    let y = 0.5 * checked_sqrt(term_y1)? - 0.5 * checked_sqrt(term_y2)?;
    Some((x, y))
}
