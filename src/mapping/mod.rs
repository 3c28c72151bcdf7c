//! Closed-form mappings between the unit square and the unit disc.
//!
//! Every mapping works on normalized coordinates: the square is
//! `[-1, 1] × [-1, 1]` and the disc is `x² + y² ≤ 1`. Each one is a pair of
//! pure functions:
//!
//! - `square_to_disc(x, y)` takes a point of the square and returns where it
//!   lands in the disc.
//! - `disc_to_square(u, v)` takes a point of the disc and returns where it
//!   lands in the square.
//!
//! Both return `None` when the input lies outside the mapping's valid domain
//! (outside the disc, too close to a singular origin, or a negative radicand).
//!
//! # Supported methods
//!
//! - [`Method::Fgs`]: the FG-squircle mapping (default)
//! - [`Method::Stretch`]: simple / concentric stretching
//! - [`Method::Elliptical`]: elliptical arc grid mapping
//!
//! The math for all three follows Chamberlain Fong, "Analytical Methods for
//! Squaring the Disc" (2014), <https://arxiv.org/abs/1509.06344>.

pub mod elliptical;
pub mod fgs;
pub mod stretch;

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::NormalizedCoordinate;

/// Guard width used for near-origin and near-axis checks.
pub const EPSILON: f64 = 1e-10;

/// A registered square ↔ disc mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Method {
    /// FG-squircle mapping. Smooth everywhere except a singular origin.
    #[default]
    Fgs,
    /// Simple stretch: each concentric square is pushed out onto a circle.
    Stretch,
    /// Elliptical arc grid mapping. Total on the square, no origin singularity.
    Elliptical,
}

/// Name → method table. Built once at compile time and never mutated.
///
/// `simple_stretch` is accepted as an alias of `stretch`.
const REGISTRY: &[(&str, Method)] = &[
    ("fgs", Method::Fgs),
    ("stretch", Method::Stretch),
    ("simple_stretch", Method::Stretch),
    ("elliptical", Method::Elliptical),
];

impl Method {
    /// Every registered method, in registry order.
    pub const ALL: [Method; 3] = [Method::Fgs, Method::Stretch, Method::Elliptical];

    /// Canonical registry name.
    pub fn name(self) -> &'static str {
        match self {
            Method::Fgs => "fgs",
            Method::Stretch => "stretch",
            Method::Elliptical => "elliptical",
        }
    }

    /// Look up a method by name (canonical name or alias).
    pub fn from_name(name: &str) -> Result<Self> {
        REGISTRY
            .iter()
            .find(|(key, _)| *key == name)
            .map(|&(_, method)| method)
            .ok_or_else(|| Error::Method {
                name: name.to_string(),
                choices: list_methods(),
            })
    }

    /// Map a point of the square onto the disc.
    pub fn square_to_disc(self, x: f64, y: f64) -> Option<NormalizedCoordinate> {
        match self {
            Method::Fgs => fgs::square_to_disc(x, y),
            Method::Stretch => stretch::square_to_disc(x, y),
            Method::Elliptical => elliptical::square_to_disc(x, y),
        }
    }

    /// Map a point of the disc onto the square.
    pub fn disc_to_square(self, u: f64, v: f64) -> Option<NormalizedCoordinate> {
        match self {
            Method::Fgs => fgs::disc_to_square(u, v),
            Method::Stretch => stretch::disc_to_square(u, v),
            Method::Elliptical => elliptical::disc_to_square(u, v),
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Method {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Method::from_name(s)
    }
}

/// Canonical names of every registered method.
///
/// Aliases such as `simple_stretch` are accepted by [`Method::from_name`]
/// but not listed here or in the [`Error::Method`] message.
pub fn list_methods() -> Vec<&'static str> {
    Method::ALL.iter().map(|m| m.name()).collect()
}

/// Sign with `sgn(0) == 0`, unlike [`f64::signum`] which returns ±1 for ±0.
#[inline]
pub(crate) fn sgn(x: f64) -> f64 {
    if x == 0.0 {
        0.0
    } else if x < 0.0 {
        -1.0
    } else {
        1.0
    }
}

/// Square root that reports a negative radicand as `None` instead of NaN.
#[inline]
pub(crate) fn checked_sqrt(x: f64) -> Option<f64> {
    if x >= 0.0 {
        Some(x.sqrt())
    } else {
        None
    }
}
