//! # squircle
//!
//! Stretch square raster images into discs and squish discs back into squares.
//!
//! The crate provides closed-form mappings between the unit square
//! `[-1, 1]²` and the unit disc, and a nearest-pixel resampling engine that
//! applies one of them to every pixel of a square image. Typical use is
//! pre-distorting or un-distorting images for optics and rendering pipelines
//! (fisheye lenses, circular displays, retinal images).
//!
//! ## Example
//!
//! ```
//! use squircle::{to_disc, to_square, PixelGrid};
//!
//! // 64×64 grayscale gradient
//! let square = PixelGrid::from_fn(64, |row, col| (row * 2 + col * 2) as u8);
//!
//! let disc = to_disc(&square, "fgs").unwrap();
//! let back = to_square(&disc, "fgs").unwrap();
//!
//! assert_eq!(back.height(), 64);
//! assert!(square.mean_abs_difference(&back) < 12.0);
//! ```
//!
//! ## Methods
//!
//! | name          | mapping                                   |
//! |---------------|-------------------------------------------|
//! | `fgs`         | FG-squircle (default)                     |
//! | `stretch`     | simple stretch, alias `simple_stretch`    |
//! | `elliptical`  | elliptical arc grid                       |
//!
//! Individual point mappings are available through [`Method::square_to_disc`]
//! and [`Method::disc_to_square`].
//!
//! ## Behavior at the edges
//!
//! Resampling is nearest-pixel only. Destination pixels whose source point is
//! undefined (near a singular origin, outside the disc, negative radicand) or
//! lands outside the input are left at zero. Only a non-square grid
//! ([`Error::Shape`]) or an unknown method name ([`Error::Method`]) fails.
//!
//! ## Features
//!
//! - `image` (default): conversions between [`PixelGrid`] and the
//!   [`image`](https://docs.rs/image) crate's buffers, plus a file-to-file helper.

mod error;
pub mod grid;
#[cfg(feature = "image")]
pub mod imaging;
pub mod mapping;
pub mod resample;

pub use error::{Error, Result};
pub use grid::{Channel, Pixel, PixelGrid};
pub use mapping::{list_methods, Method};
#[allow(deprecated)]
pub use resample::{
    resample, to_disc, to_disk, to_square, Direction, ResampleConfig, ResampleResult,
};

/// A point `(x, y)` in normalized coordinates. Inside the square when both
/// components are in `[-1, 1]`, inside the disc when `x² + y² ≤ 1`.
pub type NormalizedCoordinate = (f64, f64);
