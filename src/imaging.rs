//! Bridges between [`PixelGrid`] and the `image` crate.
//!
//! Image pixel `(x, y)` becomes grid element `[y][x]`: image rows are grid
//! rows. Requires the `image` feature.
//!
//! # Example
//!
//! ```no_run
//! use squircle::imaging::convert_file;
//! use squircle::{Direction, ResampleConfig};
//!
//! let config = ResampleConfig::with_method_name("elliptical").unwrap();
//! convert_file("retina.png", "retina_square.png", Direction::ToSquare, &config).unwrap();
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use image::{DynamicImage, GrayImage, ImageBuffer, Luma, Rgb, RgbImage, Rgba, RgbaImage};
use tracing::debug;

use crate::grid::{Pixel, PixelGrid};
use crate::resample::{resample, Direction, ResampleConfig};

/// Grayscale image → `PixelGrid<u8>`.
pub fn grid_from_luma(img: &GrayImage) -> PixelGrid<u8> {
    grid_from_buffer(img, |p: &Luma<u8>| p.0[0])
}

/// RGB image → `PixelGrid<[u8; 3]>`.
pub fn grid_from_rgb(img: &RgbImage) -> PixelGrid<[u8; 3]> {
    grid_from_buffer(img, |p: &Rgb<u8>| p.0)
}

/// RGBA image → `PixelGrid<[u8; 4]>`.
pub fn grid_from_rgba(img: &RgbaImage) -> PixelGrid<[u8; 4]> {
    grid_from_buffer(img, |p: &Rgba<u8>| p.0)
}

/// `PixelGrid<u8>` → grayscale image. The grid must be rectangular.
pub fn luma_from_grid(grid: &PixelGrid<u8>) -> Result<GrayImage> {
    buffer_from_grid(grid, |v| Luma([v]))
}

/// `PixelGrid<[u8; 3]>` → RGB image. The grid must be rectangular.
pub fn rgb_from_grid(grid: &PixelGrid<[u8; 3]>) -> Result<RgbImage> {
    buffer_from_grid(grid, Rgb)
}

/// `PixelGrid<[u8; 4]>` → RGBA image. The grid must be rectangular.
pub fn rgba_from_grid(grid: &PixelGrid<[u8; 4]>) -> Result<RgbaImage> {
    buffer_from_grid(grid, Rgba)
}

/// Convert an in-memory image.
///
/// Grayscale images stay 8-bit grayscale, images with alpha become RGBA8 and
/// everything else becomes RGB8.
pub fn convert_image(
    img: &DynamicImage,
    direction: Direction,
    config: &ResampleConfig,
) -> Result<DynamicImage> {
    let color = img.color();
    let out = if color.has_alpha() {
        let grid = grid_from_rgba(&img.to_rgba8());
        DynamicImage::ImageRgba8(rgba_from_grid(&resample(&grid, direction, config)?.grid)?)
    } else if !color.has_color() {
        let grid = grid_from_luma(&img.to_luma8());
        DynamicImage::ImageLuma8(luma_from_grid(&resample(&grid, direction, config)?.grid)?)
    } else {
        let grid = grid_from_rgb(&img.to_rgb8());
        DynamicImage::ImageRgb8(rgb_from_grid(&resample(&grid, direction, config)?.grid)?)
    };
    Ok(out)
}

/// Load `input`, convert it and write the result to `output`.
///
/// The output format is chosen from the `output` extension.
pub fn convert_file(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    direction: Direction,
    config: &ResampleConfig,
) -> Result<()> {
    let input = input.as_ref();
    let output = output.as_ref();

    let img = image::open(input)
        .with_context(|| format!("Failed to open image: {}", input.display()))?;
    debug!(
        "Loaded {} ({}x{}, {:?})",
        input.display(),
        img.width(),
        img.height(),
        img.color()
    );

    let converted = convert_image(&img, direction, config)
        .with_context(|| format!("Failed to convert image: {}", input.display()))?;

    converted
        .save(output)
        .with_context(|| format!("Failed to save image: {}", output.display()))?;
    debug!("Wrote {}", output.display());
    Ok(())
}

// ─── Internal helpers ──────────────────────────────────────────────────────

fn grid_from_buffer<Px, P>(
    img: &ImageBuffer<Px, Vec<Px::Subpixel>>,
    to_grid: impl Fn(&Px) -> P,
) -> PixelGrid<P>
where
    Px: image::Pixel,
    P: Pixel,
{
    let pixels: Vec<P> = img.pixels().map(to_grid).collect();
    PixelGrid::from_row_major(img.width() as usize, img.height() as usize, &pixels)
}

fn buffer_from_grid<Px, P>(
    grid: &PixelGrid<P>,
    to_image: impl Fn(P) -> Px,
) -> Result<ImageBuffer<Px, Vec<Px::Subpixel>>>
where
    Px: image::Pixel,
    P: Pixel,
{
    let width = grid.width();
    let height = grid.height();
    anyhow::ensure!(
        grid.rows().iter().all(|row| row.len() == width),
        "Grid rows must all be {} pixels wide to form an image",
        width
    );
    let width = u32::try_from(width).context("Grid is too wide for an image")?;
    let height = u32::try_from(height).context("Grid is too tall for an image")?;

    Ok(ImageBuffer::from_fn(width, height, |x, y| {
        to_image(grid[(y as usize, x as usize)])
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::Method;

    fn checkerboard_rgb(size: u32) -> RgbImage {
        RgbImage::from_fn(size, size, |x, y| {
            if ((x / 4) + (y / 4)) % 2 == 0 {
                Rgb([255, 0, 0])
            } else {
                Rgb([0, 0, 255])
            }
        })
    }

    #[test]
    fn test_grid_orientation() {
        // 3 wide, 2 tall: grid rows are image rows
        let img = GrayImage::from_fn(3, 2, |x, y| Luma([(y * 10 + x) as u8]));
        let grid = grid_from_luma(&img);
        assert_eq!(grid.height(), 2);
        assert_eq!(grid.width(), 3);
        assert_eq!(grid[(1, 2)], 12);
        assert!(grid.check_square().is_err());

        let back = luma_from_grid(&grid).unwrap();
        assert_eq!(back, img);
    }

    #[test]
    fn test_rgba_roundtrip() {
        let img = RgbaImage::from_fn(4, 4, |x, y| Rgba([x as u8, y as u8, 7, 200]));
        let back = rgba_from_grid(&grid_from_rgba(&img)).unwrap();
        assert_eq!(back, img);
    }

    #[test]
    fn test_ragged_grid_rejected() {
        let grid = PixelGrid::from_rows(vec![vec![1u8, 2], vec![3]]);
        assert!(luma_from_grid(&grid).is_err());
    }

    #[test]
    fn test_convert_image_keeps_layout() {
        let img = DynamicImage::ImageRgb8(checkerboard_rgb(32));
        let config = ResampleConfig {
            method: Method::Elliptical,
            parallel: false,
        };
        let disc = convert_image(&img, Direction::ToDisc, &config).unwrap();
        assert_eq!(disc.width(), 32);
        assert_eq!(disc.height(), 32);
        assert_eq!(disc.color(), img.color());

        let gray = DynamicImage::ImageLuma8(img.to_luma8());
        let out = convert_image(&gray, Direction::ToSquare, &config).unwrap();
        assert_eq!(out.color(), image::ColorType::L8);
    }

    #[test]
    fn test_convert_image_rejects_rectangles() {
        let img = DynamicImage::ImageRgb8(RgbImage::new(8, 16));
        let err = convert_image(&img, Direction::ToDisc, &ResampleConfig::default()).unwrap_err();
        assert!(err.to_string().contains("must be square"), "{}", err);
    }

    #[test]
    fn test_zero_width_image_rejected() {
        let img = DynamicImage::ImageLuma8(GrayImage::new(0, 5));
        assert_eq!(grid_from_luma(&img.to_luma8()).height(), 5);

        let err = convert_image(&img, Direction::ToDisc, &ResampleConfig::default()).unwrap_err();
        assert!(err.to_string().contains("must be square"), "{}", err);
    }

    #[test]
    fn test_convert_file() {
        let dir = std::env::temp_dir().join(format!("squircle-test-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let input = dir.join("square.png");
        let output = dir.join("disc.png");
        checkerboard_rgb(16).save(&input).unwrap();

        convert_file(&input, &output, Direction::ToDisc, &ResampleConfig::default()).unwrap();
        let written = image::open(&output).unwrap();
        assert_eq!((written.width(), written.height()), (16, 16));

        let missing = dir.join("missing.png");
        let err = convert_file(&missing, &output, Direction::ToDisc, &ResampleConfig::default())
            .unwrap_err();
        assert!(err.to_string().contains("Failed to open image"), "{}", err);

        std::fs::remove_dir_all(&dir).ok();
    }
}
