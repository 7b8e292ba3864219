//! Median cut palette construction.
//!
//! Starting from a single box holding every sample,
//! the box with the widest channel range is repeatedly split in two
//! at the median of that channel until there are `k` boxes
//! or no box has more than one sample left.
//! Each box is then reduced to the per-channel median of its samples.
//!
//! Split points are found with quickselect (see [`select`](crate::select)),
//! so each split is linear in the size of the box rather than `n log n`.

use crate::{
    select::{channel_median, select_nth_by_key},
    ChannelRanges, PaletteSize, SampleSet,
};
use palette::Srgb;
use tracing::debug;

/// A box of samples that may be split further.
///
/// A box owns its samples exclusively.
/// Splitting consumes the box and hands its samples to the two halves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorBox {
    /// The samples inside this box, in no particular order.
    samples: Vec<Srgb<u8>>,
}

impl ColorBox {
    /// Creates a new box owning the given samples.
    #[must_use]
    pub fn new(samples: Vec<Srgb<u8>>) -> Self {
        Self { samples }
    }

    /// The samples inside this box.
    #[must_use]
    pub fn samples(&self) -> &[Srgb<u8>] {
        &self.samples
    }

    /// The number of samples inside this box.
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether or not this box has no samples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Returns the range of each channel over this box's samples.
    #[must_use]
    pub fn ranges(&self) -> ChannelRanges {
        ChannelRanges::new(&self.samples)
    }

    /// Returns the greatest channel range of this box,
    /// or `None` if the box has fewer than two samples and so cannot be split.
    #[must_use]
    pub fn split_priority(&self) -> Option<u8> {
        (self.len() >= 2).then(|| self.ranges().max())
    }

    /// Splits this box at the median of its dominant channel.
    ///
    /// With `n` samples, the left box receives the `n / 2` samples with the smallest values
    /// along the dominant channel and the right box receives the other `n - n / 2`.
    /// Together they hold exactly the samples of the original box.
    ///
    /// # Panics
    /// Panics if the box has fewer than two samples.
    #[must_use]
    pub fn split(self) -> (Self, Self) {
        let Self { mut samples } = self;
        assert!(samples.len() >= 2, "box has fewer than two samples");

        let channel = ChannelRanges::new(&samples).dominant();
        let mid = samples.len() / 2;
        select_nth_by_key(&mut samples, mid, |&color| channel.value(color));

        let right = samples.split_off(mid);
        (Self { samples }, Self { samples: right })
    }

    /// Returns the per-channel median color of this box.
    ///
    /// Each channel is selected independently, so the result need not be one of the samples.
    /// An empty box gives black.
    #[must_use]
    pub fn median_color(&self) -> Srgb<u8> {
        debug_assert!(!self.is_empty(), "empty box reached reduction");

        let mut red = self.samples.iter().map(|c| c.red).collect::<Vec<_>>();
        let mut green = self.samples.iter().map(|c| c.green).collect::<Vec<_>>();
        let mut blue = self.samples.iter().map(|c| c.blue).collect::<Vec<_>>();

        Srgb::new(
            channel_median(&mut red),
            channel_median(&mut green),
            channel_median(&mut blue),
        )
    }
}

/// Returns the mean of `samples` with each channel rounded to the nearest integer (half away from zero).
///
/// An empty slice gives black.
#[must_use]
pub fn mean_color(samples: &[Srgb<u8>]) -> Srgb<u8> {
    if samples.is_empty() {
        return Srgb::new(0, 0, 0);
    }

    let mut sums = [0u64; 3];
    for &color in samples {
        let (r, g, b) = color.into_components();
        sums[0] += u64::from(r);
        sums[1] += u64::from(g);
        sums[2] += u64::from(b);
    }

    let n = samples.len() as u64;
    // round(sum / n) == floor((2 * sum + n) / (2 * n)) for non-negative values
    #[allow(clippy::cast_possible_truncation)]
    let [r, g, b] = sums.map(|sum| ((2 * sum + n) / (2 * n)) as u8);
    Srgb::new(r, g, b)
}

/// Returns the boxes produced by splitting `samples` until there are `k` boxes
/// or none of them can be split further.
///
/// The left half of a split box takes its place in the list and the right half is appended,
/// so the box order is deterministic for a given input.
#[must_use]
pub fn boxes(samples: Vec<Srgb<u8>>, k: usize) -> Vec<ColorBox> {
    let mut boxes = Vec::with_capacity(k.max(1));
    boxes.push(ColorBox::new(samples));

    while boxes.len() < k {
        let widest = boxes
            .iter()
            .enumerate()
            .filter_map(|(i, b)| b.split_priority().map(|range| (i, range)))
            .fold(None, |best: Option<(usize, u8)>, (i, range)| match best {
                Some((_, best_range)) if range <= best_range => best,
                _ => Some((i, range)),
            });

        let Some((i, _)) = widest else {
            debug!(boxes = boxes.len(), k, "no box can be split further");
            break;
        };

        let samples = std::mem::take(&mut boxes[i].samples);
        let (left, right) = ColorBox::new(samples).split();
        boxes[i] = left;
        boxes.push(right);
    }

    boxes
}

/// Pads `palette` with copies of its last color (or black if it is empty)
/// until it has `k` entries.
fn pad(palette: &mut Vec<Srgb<u8>>, k: usize) {
    let last = palette.last().copied().unwrap_or(Srgb::new(0, 0, 0));
    palette.resize(k, last);
}

/// Computes a color palette with exactly `palette_size` entries from the given samples.
///
/// - A `palette_size` of `0` gives an empty palette.
/// - A `palette_size` of `1` gives the rounded mean of all samples.
/// - If there are no more samples than `palette_size`,
///   the palette is the samples themselves in input order.
/// - Otherwise, the palette is the per-channel medians of the median cut boxes.
///
/// If fewer colors than `palette_size` were produced
/// (e.g., the image has fewer distinct colors than requested),
/// the last color is repeated to fill the palette.
///
/// The samples are consumed, since median cut partitions them in place.
#[must_use]
pub fn palette(samples: SampleSet, palette_size: PaletteSize) -> Vec<Srgb<u8>> {
    let k = palette_size.as_usize();
    let samples = samples.into_inner();

    let mut palette = match k {
        0 => return Vec::new(),
        1 => vec![mean_color(&samples)],
        _ if samples.len() <= k => samples,
        _ => boxes(samples, k)
            .iter()
            .map(ColorBox::median_color)
            .collect(),
    };

    pad(&mut palette, k);
    palette
}
