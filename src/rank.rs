//! Pairs palette colors with their counts for display.

use palette::Srgb;
#[cfg(feature = "serde")]
use serde::{ser::SerializeStruct, Serialize, Serializer};
use std::cmp::Reverse;

/// A palette color together with how many samples were nearest to it.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct PaletteEntry {
    /// The palette color.
    #[cfg_attr(feature = "serde", serde(serialize_with = "serialize_rgb"))]
    pub color: Srgb<u8>,
    /// The number of samples assigned to `color`.
    pub count: u32,
    /// `count` divided by the total number of samples, or `0.0` if there are no samples.
    pub share: f64,
    /// `color` as an uppercase `#RRGGBB` string.
    pub hex: String,
}

/// Serializes a color as `{"r": _, "g": _, "b": _}`.
#[cfg(feature = "serde")]
fn serialize_rgb<S: Serializer>(color: &Srgb<u8>, serializer: S) -> Result<S::Ok, S::Error> {
    let mut rgb = serializer.serialize_struct("Rgb", 3)?;
    rgb.serialize_field("r", &color.red)?;
    rgb.serialize_field("g", &color.green)?;
    rgb.serialize_field("b", &color.blue)?;
    rgb.end()
}

/// Formats a color as an uppercase `#RRGGBB` string.
#[must_use]
pub fn hex(color: Srgb<u8>) -> String {
    let (r, g, b) = color.into_components();
    format!("#{r:02X}{g:02X}{b:02X}")
}

/// Pairs each palette color with its count and share of the total,
/// sorted by descending count.
///
/// Entries with equal counts keep their palette order.
/// `palette` and `counts` should have the same length; extra elements of either are ignored.
#[must_use]
pub fn rank_entries(palette: &[Srgb<u8>], counts: &[u32]) -> Vec<PaletteEntry> {
    let total = counts.iter().map(|&n| u64::from(n)).sum::<u64>();

    let mut entries = palette
        .iter()
        .zip(counts)
        .map(|(&color, &count)| {
            #[allow(clippy::cast_precision_loss)]
            let share = if total == 0 {
                0.0
            } else {
                f64::from(count) / total as f64
            };

            PaletteEntry {
                color,
                count,
                share,
                hex: hex(color),
            }
        })
        .collect::<Vec<_>>();

    entries.sort_by_key(|e| Reverse(e.count));
    entries
}
