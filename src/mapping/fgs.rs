//! FG-squircle mapping.
//!
//! Maps each concentric circle of the disc onto a Fernández-Guasti squircle
//! of the square:
//!
//! ```text
//! u = x · √(x² + y² − x²y²) / √(x² + y²)
//! v = y · √(x² + y² − x²y²) / √(x² + y²)
//! ```
//!
//! The forward map is singular at the origin, so points within `EPSILON` of
//! it (in r²) have no defined image.

use super::{checked_sqrt, sgn, EPSILON};
use crate::NormalizedCoordinate;

/// Square → disc. Returns `None` near the origin.
pub fn square_to_disc(x: f64, y: f64) -> Option<NormalizedCoordinate> {
    let x2 = x * x;
    let y2 = y * y;
    let r2 = x2 + y2;

    // avoid division by zero when (x, y) is close to the origin
    if r2 < EPSILON {
        return None;
    }

    let rad = checked_sqrt(r2 - x2 * y2)?;
    let reciprocal_sqrt = 1.0 / r2.sqrt();

    Some((x * rad * reciprocal_sqrt, y * rad * reciprocal_sqrt))
}

/// Disc → square. Returns `None` strictly outside the unit disc.
///
/// On the axes (`|u|` or `|v|` within `EPSILON`) the matching coordinate is
/// passed through unchanged.
pub fn disc_to_square(u: f64, v: f64) -> Option<NormalizedCoordinate> {
    let u2 = u * u;
    let v2 = v * v;
    let r2 = u2 + v2;

    if r2 > 1.0 {
        return None;
    }

    let uv = u * v;
    let four_u2v2 = 4.0 * uv * uv;
    // (u² − v²)² ≥ 0 inside the disc, so only rounding can push these negative
    let rad = checked_sqrt(r2 * (r2 - four_u2v2))?;
    let sqrto = checked_sqrt(0.5 * (r2 - rad))?;
    let sgnuv = sgn(uv);

    let y = if u.abs() > EPSILON { sgnuv / u * sqrto } else { v };
    let x = if v.abs() > EPSILON { sgnuv / v * sqrto } else { u };

    Some((x, y))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_origin_is_singular() {
        assert!(square_to_disc(0.0, 0.0).is_none());
        assert!(square_to_disc(1e-6, 0.0).is_none());
        assert!(square_to_disc(1e-3, 0.0).is_some());
    }

    #[test]
    fn test_outside_disc_is_undefined() {
        assert!(disc_to_square(1.0, 0.5).is_none());
        assert!(disc_to_square(-0.8, -0.8).is_none());
        assert!(disc_to_square(1.0, 0.0).is_some());
    }

    #[test]
    fn test_disc_origin_maps_to_square_origin() {
        let (x, y) = disc_to_square(0.0, 0.0).unwrap();
        assert_eq!((x, y), (0.0, 0.0));
    }

    #[test]
    fn test_square_edge_lands_on_circle() {
        // Points on the square's boundary land on the unit circle
        for &(x, y) in &[(1.0, 0.3), (-0.6, 1.0), (1.0, -1.0), (0.2, -1.0)] {
            let (u, v) = square_to_disc(x, y).unwrap();
            let r = (u * u + v * v).sqrt();
            assert!((r - 1.0).abs() < 1e-12, "({}, {}) -> r = {}", x, y, r);
        }
    }

    #[test]
    fn test_axis_passthrough() {
        let (x, y) = disc_to_square(0.0, -0.7).unwrap();
        assert!(x.abs() < 1e-15);
        assert!((y + 0.7).abs() < 1e-15);
    }
}
