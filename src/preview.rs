//! Renders palette entries as images.
//!
//! Both functions size each color proportionally to its count,
//! in the order the entries are given (usually from [`rank_entries`](crate::rank_entries)).

use crate::PaletteEntry;
use image::{imageops, ImageBuffer, Pixel, Rgb, RgbImage, Rgba, RgbaImage};

/// The width of the standalone palette preview written by the command line tool.
pub const PREVIEW_WIDTH: u32 = 600;

/// The height of the standalone palette preview written by the command line tool.
pub const PREVIEW_HEIGHT: u32 = 60;

/// Converts an entry's color into an image pixel.
fn pixel(entry: &PaletteEntry) -> Rgb<u8> {
    let (r, g, b) = entry.color.into_components();
    Rgb([r, g, b])
}

/// Converts an entry's color into an opaque image pixel.
fn opaque_pixel(entry: &PaletteEntry) -> Rgba<u8> {
    pixel(entry).to_rgba()
}

/// Fills the given rectangle of `image`, clipped to the image bounds.
fn fill<P: Pixel>(
    image: &mut ImageBuffer<P, Vec<P::Subpixel>>,
    x: u32,
    y: u32,
    width: u32,
    height: u32,
    color: P,
) {
    let x_end = x.saturating_add(width).min(image.width());
    let y_end = y.saturating_add(height).min(image.height());
    for yy in y..y_end {
        for xx in x..x_end {
            image.put_pixel(xx, yy, color);
        }
    }
}

/// Rounds `total * share` to the nearest integer.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn proportion(total: u32, share: f64) -> u32 {
    (f64::from(total) * share).round() as u32
}

/// Renders the entries as a horizontal strip of `width` by `height` pixels.
///
/// Each entry gets `round(width * count / total)` columns from left to right.
/// Entries that round to zero columns are skipped,
/// and columns left over by rounding stay black.
#[must_use]
pub fn palette_strip(entries: &[PaletteEntry], width: u32, height: u32) -> RgbImage {
    let mut image = RgbImage::new(width, height);
    let total = entries.iter().map(|e| u64::from(e.count)).sum::<u64>();
    let total = total.max(1);

    let mut x = 0;
    for entry in entries {
        #[allow(clippy::cast_precision_loss)]
        let w = proportion(width, f64::from(entry.count) / total as f64);
        if w == 0 {
            continue;
        }

        fill(&mut image, x, 0, w, height, pixel(entry));
        x = x.saturating_add(w);
    }

    image
}

/// Returns a copy of `image` with a vertical palette strip of `strip_width` columns
/// appended on the right.
///
/// Source pixels keep their alpha, while the strip is fully opaque.
/// Each entry gets `round(height * share)` rows from top to bottom,
/// but at least one row if its count is non-zero.
/// The last entry is stretched to reach the bottom of the image,
/// and any rows still uncovered are filled with the last entry's color.
/// A `strip_width` of `0` is treated as `1`.
#[must_use]
pub fn compose_with_strip(
    image: &RgbaImage,
    entries: &[PaletteEntry],
    strip_width: u32,
) -> RgbaImage {
    let strip_width = strip_width.max(1);
    let (width, height) = image.dimensions();

    let mut out = RgbaImage::new(width.saturating_add(strip_width), height);
    imageops::replace(&mut out, image, 0, 0);

    let mut y = 0;
    for (i, entry) in entries.iter().enumerate() {
        let mut rows = proportion(height, entry.share);
        if entry.count > 0 && rows == 0 {
            rows = 1;
        }
        if i + 1 == entries.len() && y + rows < height {
            rows = height - y;
        }

        fill(&mut out, width, y, strip_width, rows, opaque_pixel(entry));
        y = y.saturating_add(rows);
        if y >= height {
            break;
        }
    }

    if let Some(last) = entries.last() {
        if y < height {
            let rows = height - y;
            fill(&mut out, width, y, strip_width, rows, opaque_pixel(last));
        }
    }

    out
}
