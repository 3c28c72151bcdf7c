//! Simple stretch (concentric squares to concentric circles).
//!
//! Every point is scaled radially so that the square of half-width
//! `max(|x|, |y|)` lands on the circle of the same radius. Uses Dave Cline's
//! dominant-axis trick so no trigonometry is needed.
//!
//! Points on either axis are their own image.

use super::{sgn, EPSILON};
use crate::NormalizedCoordinate;

/// Square → disc. Total; never returns `None`.
pub fn square_to_disc(x: f64, y: f64) -> Option<NormalizedCoordinate> {
    if x.abs() < EPSILON || y.abs() < EPSILON {
        return Some((x, y));
    }

    let x2 = x * x;
    let y2 = y * y;
    let reciprocal_hypotenuse = 1.0 / (x2 + y2).sqrt();

    let multiplier = if x2 > y2 {
        sgn(x) * x * reciprocal_hypotenuse
    } else {
        sgn(y) * y * reciprocal_hypotenuse
    };

    Some((x * multiplier, y * multiplier))
}

/// Disc → square. Total; points outside the disc map outside the square.
pub fn disc_to_square(u: f64, v: f64) -> Option<NormalizedCoordinate> {
    if u.abs() < EPSILON || v.abs() < EPSILON {
        return Some((u, v));
    }

    let u2 = u * u;
    let v2 = v * v;
    let r = (u2 + v2).sqrt();

    // the dominant axis is never near zero here
    if u2 >= v2 {
        let sgnu = sgn(u);
        Some((sgnu * r, sgnu * r * v / u))
    } else {
        let sgnv = sgn(v);
        Some((sgnv * r * u / v, sgnv * r))
    }
}
