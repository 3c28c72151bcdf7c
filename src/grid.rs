//! In-memory pixel grids.
//!
//! A [`PixelGrid`] is a list of rows. Rows are stored separately so that a
//! ragged or rectangular grid can be represented and rejected by
//! [`PixelGrid::check_square`] instead of being silently reshaped.
//!
//! Pixel shape is carried by the type: every pixel of a `PixelGrid<P>` is a
//! `P`, either a scalar channel (grayscale) or a fixed-length array of
//! channels such as `[u8; 3]` (RGB).

use std::ops::Index;

use crate::error::{Error, Result};

/// A single numeric channel value.
pub trait Channel: Copy + PartialEq + std::fmt::Debug + Send + Sync + 'static {
    /// Background value used for pixels with no source.
    const ZERO: Self;

    /// Channel value widened to `f64` for difference and finiteness checks.
    fn to_f64(self) -> f64;
}

/// A pixel value: a scalar channel or a fixed-arity tuple of channels.
pub trait Pixel: Copy + PartialEq + std::fmt::Debug + Send + Sync + 'static {
    /// Number of channels per pixel.
    const CHANNELS: usize;

    /// The all-zero pixel written where a mapping has no source.
    fn background() -> Self;

    /// Channel `index` as `f64`. `index` must be below [`Pixel::CHANNELS`].
    fn channel(&self, index: usize) -> f64;

    /// Sum of absolute per-channel differences.
    fn abs_difference(&self, other: &Self) -> f64 {
        (0..Self::CHANNELS)
            .map(|c| (self.channel(c) - other.channel(c)).abs())
            .sum()
    }

    /// `true` if no channel is NaN or infinite.
    fn is_finite(&self) -> bool {
        (0..Self::CHANNELS).all(|c| self.channel(c).is_finite())
    }
}

macro_rules! scalar_pixel {
    ($($t:ty),*) => {
        $(
            impl Channel for $t {
                const ZERO: Self = 0 as $t;

                #[inline]
                fn to_f64(self) -> f64 {
                    self as f64
                }
            }

            impl Pixel for $t {
                const CHANNELS: usize = 1;

                #[inline]
                fn background() -> Self {
                    <$t as Channel>::ZERO
                }

                #[inline]
                fn channel(&self, _index: usize) -> f64 {
                    (*self).to_f64()
                }
            }
        )*
    };
}

scalar_pixel!(u8, u16, u32, i32, i64, f32, f64);

impl<C: Channel, const N: usize> Pixel for [C; N] {
    const CHANNELS: usize = N;

    #[inline]
    fn background() -> Self {
        [C::ZERO; N]
    }

    #[inline]
    fn channel(&self, index: usize) -> f64 {
        self[index].to_f64()
    }
}

/// A two-dimensional grid of pixels, indexed `[row][column]`.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelGrid<P> {
    rows: Vec<Vec<P>>,
}

impl<P: Pixel> PixelGrid<P> {
    /// Wrap a list of rows. No shape validation happens here.
    pub fn from_rows(rows: Vec<Vec<P>>) -> Self {
        Self { rows }
    }

    /// Build a `size × size` grid from `f(row, column)`.
    pub fn from_fn(size: usize, mut f: impl FnMut(usize, usize) -> P) -> Self {
        let rows = (0..size)
            .map(|row| (0..size).map(|col| f(row, col)).collect())
            .collect();
        Self { rows }
    }

    /// Split row-major pixel data into `height` rows of `width` pixels.
    ///
    /// Always yields `height` rows, even when `width` is 0. If `pixels` runs
    /// short, the rows past its end are truncated, which makes the grid
    /// ragged. Pixels beyond `width * height` are ignored.
    pub fn from_row_major(width: usize, height: usize, pixels: &[P]) -> Self {
        let rows = (0..height)
            .map(|row| {
                let start = (row * width).min(pixels.len());
                let end = (start + width).min(pixels.len());
                pixels[start..end].to_vec()
            })
            .collect();
        Self { rows }
    }

    /// A `size × size` grid filled with [`Pixel::background`].
    pub fn background(size: usize) -> Self {
        Self {
            rows: vec![vec![P::background(); size]; size],
        }
    }

    pub fn rows(&self) -> &[Vec<P>] {
        &self.rows
    }

    pub(crate) fn rows_mut(&mut self) -> &mut [Vec<P>] {
        &mut self.rows
    }

    pub fn into_rows(self) -> Vec<Vec<P>> {
        self.rows
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Length of the first row (0 for an empty grid).
    pub fn width(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&P> {
        self.rows.get(row).and_then(|r| r.get(col))
    }

    /// Row-major copy of every pixel.
    pub fn to_row_major(&self) -> Vec<P> {
        self.rows.iter().flatten().copied().collect()
    }

    /// Verify that every row is as long as the grid is tall.
    ///
    /// Returns the side length on success.
    pub fn check_square(&self) -> Result<usize> {
        let rows = self.rows.len();
        for (row, pixels) in self.rows.iter().enumerate() {
            if pixels.len() != rows {
                return Err(Error::Shape {
                    row,
                    row_len: pixels.len(),
                    rows,
                });
            }
        }
        Ok(rows)
    }

    /// Mean over pixels of [`Pixel::abs_difference`].
    ///
    /// Only the overlapping region is compared; the divisor is the number of
    /// pixels in `self`. Returns 0 for an empty grid.
    pub fn mean_abs_difference(&self, other: &Self) -> f64 {
        let count: usize = self.rows.iter().map(Vec::len).sum();
        if count == 0 {
            return 0.0;
        }
        let total: f64 = self
            .rows
            .iter()
            .zip(other.rows.iter())
            .flat_map(|(a, b)| a.iter().zip(b.iter()))
            .map(|(a, b)| a.abs_difference(b))
            .sum();
        total / count as f64
    }

    /// `true` if no channel of any pixel is NaN or infinite.
    pub fn all_finite(&self) -> bool {
        self.rows.iter().flatten().all(Pixel::is_finite)
    }
}

impl<P> Index<(usize, usize)> for PixelGrid<P> {
    type Output = P;

    fn index(&self, (row, col): (usize, usize)) -> &P {
        &self.rows[row][col]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_fn_is_square() {
        let g = PixelGrid::from_fn(5, |r, c| (r * 5 + c) as u8);
        assert_eq!(g.check_square().unwrap(), 5);
        assert_eq!(g[(2, 3)], 13);
        assert_eq!(g.get(5, 0), None);
    }

    #[test]
    fn test_stacked_grid_is_not_square() {
        let g = PixelGrid::from_fn(4, |r, c| (r + c) as u16);
        let mut rows = g.rows().to_vec();
        rows.extend_from_slice(g.rows());
        let stacked = PixelGrid::from_rows(rows);

        assert_eq!(
            stacked.check_square(),
            Err(Error::Shape {
                row: 0,
                row_len: 4,
                rows: 8
            })
        );
    }

    #[test]
    fn test_every_row_is_checked() {
        // Only the last row is short
        let mut rows = vec![vec![0u8; 3]; 3];
        rows[2].pop();
        let err = PixelGrid::from_rows(rows).check_square().unwrap_err();
        assert_eq!(
            err,
            Error::Shape {
                row: 2,
                row_len: 2,
                rows: 3
            }
        );
    }

    #[test]
    fn test_empty_grid_is_square() {
        let g: PixelGrid<u8> = PixelGrid::from_rows(Vec::new());
        assert_eq!(g.check_square().unwrap(), 0);
        assert_eq!(g.width(), 0);
        assert_eq!(g.mean_abs_difference(&g), 0.0);
    }

    #[test]
    fn test_row_major_roundtrip() {
        let data: Vec<[u8; 3]> = (0..9u8).map(|i| [i, i, 255 - i]).collect();
        let g = PixelGrid::from_row_major(3, 3, &data);
        assert_eq!(g.height(), 3);
        assert_eq!(g.width(), 3);
        assert_eq!(g[(1, 0)], [3, 3, 252]);
        assert_eq!(g.to_row_major(), data);

        let ragged = PixelGrid::from_row_major(3, 3, &data[..8]);
        assert_eq!(ragged.rows()[2].len(), 2);
        assert!(ragged.check_square().is_err());
    }

    #[test]
    fn test_zero_width_keeps_rows() {
        let g = PixelGrid::<u8>::from_row_major(0, 5, &[]);
        assert_eq!(g.height(), 5);
        assert_eq!(g.width(), 0);
        assert_eq!(
            g.check_square(),
            Err(Error::Shape {
                row: 0,
                row_len: 0,
                rows: 5
            })
        );
    }

    #[test]
    fn test_background_pixels() {
        assert_eq!(<[u8; 4] as Pixel>::background(), [0, 0, 0, 0]);
        assert_eq!(<f32 as Pixel>::background(), 0.0);
        let g = PixelGrid::<[f64; 3]>::background(2);
        assert!(g.rows().iter().flatten().all(|p| *p == [0.0; 3]));
    }

    #[test]
    fn test_mean_abs_difference() {
        let a = PixelGrid::from_fn(2, |_, _| [10u8, 20, 30]);
        let b = PixelGrid::from_fn(2, |r, _| if r == 0 { [10u8, 20, 30] } else { [0, 0, 0] });
        // two pixels differ by 60, two by 0
        assert!((a.mean_abs_difference(&b) - 30.0).abs() < 1e-12);
    }

    #[test]
    fn test_finite_check() {
        let mut g = PixelGrid::from_fn(3, |r, c| (r + c) as f32);
        assert!(g.all_finite());
        g.rows_mut()[1][1] = f32::NAN;
        assert!(!g.all_finite());
    }
}
