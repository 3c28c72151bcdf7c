//! Whole-grid conversion between square and disc images.
//!
//! For every destination pixel the engine:
//!
//! 1. normalizes its `(row, column)` index into `[-1, 1]`,
//! 2. asks the selected mapping where that point comes from in the source,
//! 3. converts the answer back to pixel space and floors it,
//! 4. copies that single source pixel (nearest-pixel, no interpolation).
//!
//! If the mapping has no answer, or the answer falls outside the source grid,
//! the destination pixel keeps the background value. That is expected near
//! the corners and the origin and is never reported as an error. Only a
//! non-square input or an unknown method name aborts the call, and both are
//! checked before any pixel is touched.
//!
//! # Direction
//!
//! Building a square image means looking up, for each square pixel, where it
//! sits in the disc, so [`Direction::ToSquare`] samples through
//! `square_to_disc`. [`Direction::ToDisc`] samples through `disc_to_square`.

use std::time::Instant;

use rayon::prelude::*;
use tracing::debug;

use crate::error::Result;
use crate::grid::{Pixel, PixelGrid};
use crate::mapping::Method;
use crate::NormalizedCoordinate;

/// Target topology of a conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Disc image in, square image out.
    ToSquare,
    /// Square image in, disc image out.
    ToDisc,
}

/// Configuration for [`resample`].
#[derive(Debug, Clone)]
pub struct ResampleConfig {
    /// Mapping used for the per-pixel lookup.
    /// Default: [`Method::Fgs`]
    pub method: Method,

    /// Split destination rows across the rayon thread pool.
    /// Output is identical to the sequential path.
    /// Default: false
    pub parallel: bool,
}

impl Default for ResampleConfig {
    fn default() -> Self {
        Self {
            method: Method::Fgs,
            parallel: false,
        }
    }
}

impl ResampleConfig {
    /// Default configuration with the method looked up by name.
    pub fn with_method_name(name: &str) -> Result<Self> {
        Ok(Self {
            method: Method::from_name(name)?,
            ..Default::default()
        })
    }
}

/// Output of [`resample`] plus diagnostics about skipped pixels.
#[derive(Debug, Clone)]
pub struct ResampleResult<P> {
    /// The converted grid, same size and pixel type as the input.
    pub grid: PixelGrid<P>,

    /// Destination pixels whose mapping had no valid source point.
    pub num_undefined: usize,

    /// Destination pixels whose source point fell outside the input grid.
    pub num_out_of_bounds: usize,
}

/// Convert a disc image into a square image.
///
/// `method` is a registered method name, see [`list_methods`](crate::list_methods).
pub fn to_square<P: Pixel>(disc: &PixelGrid<P>, method: &str) -> Result<PixelGrid<P>> {
    let config = ResampleConfig::with_method_name(method)?;
    Ok(resample(disc, Direction::ToSquare, &config)?.grid)
}

/// Convert a square image into a disc image.
///
/// `method` is a registered method name, see [`list_methods`](crate::list_methods).
pub fn to_disc<P: Pixel>(square: &PixelGrid<P>, method: &str) -> Result<PixelGrid<P>> {
    let config = ResampleConfig::with_method_name(method)?;
    Ok(resample(square, Direction::ToDisc, &config)?.grid)
}

/// Alias of [`to_disc`].
#[deprecated(
    since = "0.1.0",
    note = "`disk` and `disc` are easy to mix up; use `to_disc` instead"
)]
pub fn to_disk<P: Pixel>(square: &PixelGrid<P>, method: &str) -> Result<PixelGrid<P>> {
    to_disc(square, method)
}

/// Convert `grid` in the given direction.
///
/// Fails with [`Error::Shape`](crate::Error::Shape) if `grid` is not square.
/// The input is never modified; a new grid of the same size is returned.
pub fn resample<P: Pixel>(
    grid: &PixelGrid<P>,
    direction: Direction,
    config: &ResampleConfig,
) -> Result<ResampleResult<P>> {
    let size = grid.check_square()?;
    let method = config.method;
    let t0 = Instant::now();

    debug!(
        "Resampling {0}x{0} grid {1:?} with {2} (parallel = {3})",
        size, direction, method, config.parallel
    );

    let lookup = move |x: f64, y: f64| match direction {
        Direction::ToSquare => method.square_to_disc(x, y),
        Direction::ToDisc => method.disc_to_square(x, y),
    };

    let src = grid.rows();
    let mut out = PixelGrid::background(size);

    let skipped = if config.parallel {
        out.rows_mut()
            .par_iter_mut()
            .enumerate()
            .map(|(row, dst)| resample_row(src, row, dst, &lookup))
            .reduce(Skipped::default, Skipped::merge)
    } else {
        out.rows_mut()
            .iter_mut()
            .enumerate()
            .map(|(row, dst)| resample_row(src, row, dst, &lookup))
            .fold(Skipped::default(), Skipped::merge)
    };

    debug!(
        "Resampled {} pixels in {:.2} ms: {} undefined, {} out of bounds",
        size * size,
        t0.elapsed().as_secs_f64() * 1000.0,
        skipped.undefined,
        skipped.out_of_bounds
    );

    Ok(ResampleResult {
        grid: out,
        num_undefined: skipped.undefined,
        num_out_of_bounds: skipped.out_of_bounds,
    })
}

// ─── Internal helpers ──────────────────────────────────────────────────────

#[derive(Debug, Default, Clone, Copy)]
struct Skipped {
    undefined: usize,
    out_of_bounds: usize,
}

impl Skipped {
    fn merge(self, other: Self) -> Self {
        Self {
            undefined: self.undefined + other.undefined,
            out_of_bounds: self.out_of_bounds + other.out_of_bounds,
        }
    }
}

/// Where a destination pixel reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Source {
    Pixel(usize, usize),
    Undefined,
    OutOfBounds,
}

/// Fill one destination row. `dst` already holds background pixels.
fn resample_row<P, F>(src: &[Vec<P>], row: usize, dst: &mut [P], lookup: &F) -> Skipped
where
    P: Pixel,
    F: Fn(f64, f64) -> Option<NormalizedCoordinate>,
{
    let size = src.len();
    let mut skipped = Skipped::default();
    let unit_x = pixel_to_unit(row, size);

    for (col, pixel) in dst.iter_mut().enumerate() {
        let unit_y = pixel_to_unit(col, size);
        match source_pixel(lookup(unit_x, unit_y), size) {
            Source::Pixel(r, c) => *pixel = src[r][c],
            Source::Undefined => skipped.undefined += 1,
            Source::OutOfBounds => skipped.out_of_bounds += 1,
        }
    }
    skipped
}

/// Floor a mapped normalized coordinate to a source pixel index.
fn source_pixel(mapped: Option<NormalizedCoordinate>, size: usize) -> Source {
    let Some((u, v)) = mapped else {
        return Source::Undefined;
    };
    if !u.is_finite() || !v.is_finite() {
        return Source::Undefined;
    }

    let px = unit_to_pixel(u, size).floor();
    let py = unit_to_pixel(v, size).floor();
    let limit = size as f64;
    if px < 0.0 || py < 0.0 || px >= limit || py >= limit {
        return Source::OutOfBounds;
    }
    Source::Pixel(px as usize, py as usize)
}

/// Pixel index in `0..size` to normalized `[-1, 1)`.
#[inline]
fn pixel_to_unit(coordinate: usize, size: usize) -> f64 {
    coordinate as f64 / size as f64 * 2.0 - 1.0
}

/// Normalized coordinate back to (fractional) pixel space.
#[inline]
fn unit_to_pixel(coordinate: f64, size: usize) -> f64 {
    (coordinate + 1.0) / 2.0 * size as f64
}
