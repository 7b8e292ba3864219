//! Nearest palette color assignment and occurrence counting.
//!
//! Every sample is assigned to the palette color with the smallest squared Euclidean distance
//! in sRGB space. Ties go to the lowest palette index.
//!
//! The parallel versions split the samples into one contiguous chunk per worker,
//! count each chunk independently, and then sum the partial histograms in chunk order.
//! The result is identical to the sequential version for any number of workers.

use crate::MAX_COLORS;
use palette::Srgb;
#[cfg(feature = "threads")]
use {rayon::prelude::*, std::ops::Range, tracing::debug};

/// Options controlling how classification is spread across threads.
///
/// # Examples
/// ```
/// # use swatchcut::ClassifyOptions;
/// let options = ClassifyOptions::new()
///     .workers(4)
///     .sequential_threshold(10_000);
/// assert_eq!(options.num_workers(), 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassifyOptions {
    /// The number of chunks (and parallel tasks) to split the samples into.
    workers: usize,
    /// Inputs with fewer samples than this are classified on the calling thread.
    sequential_threshold: usize,
}

impl Default for ClassifyOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl ClassifyOptions {
    /// The default number of samples below which classification stays single threaded.
    pub const DEFAULT_SEQUENTIAL_THRESHOLD: usize = 5000;

    /// Creates a new [`ClassifyOptions`] with the host's available parallelism
    /// (the size of the current rayon thread pool) as the worker count.
    #[must_use]
    pub fn new() -> Self {
        Self {
            workers: default_workers(),
            sequential_threshold: Self::DEFAULT_SEQUENTIAL_THRESHOLD,
        }
    }

    /// Sets the number of workers. A value of `0` is treated as `1`.
    #[must_use]
    pub fn workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    /// Sets the number of samples below which classification is not parallelized.
    ///
    /// The default is [`ClassifyOptions::DEFAULT_SEQUENTIAL_THRESHOLD`].
    #[must_use]
    pub fn sequential_threshold(mut self, sequential_threshold: usize) -> Self {
        self.sequential_threshold = sequential_threshold;
        self
    }

    /// Returns the number of workers.
    #[must_use]
    pub const fn num_workers(&self) -> usize {
        self.workers
    }

    /// Returns the sequential threshold.
    #[must_use]
    pub const fn num_sequential_threshold(&self) -> usize {
        self.sequential_threshold
    }

    /// Whether or not `len` samples should be classified on the calling thread.
    #[cfg(feature = "threads")]
    fn is_sequential(&self, len: usize) -> bool {
        self.workers <= 1 || len < self.sequential_threshold
    }
}

/// The default worker count.
#[cfg(feature = "threads")]
fn default_workers() -> usize {
    rayon::current_num_threads()
}

/// The default worker count.
#[cfg(not(feature = "threads"))]
fn default_workers() -> usize {
    1
}

/// Returns the squared Euclidean distance between two colors.
#[inline]
#[must_use]
pub fn distance_squared(a: Srgb<u8>, b: Srgb<u8>) -> u32 {
    let dr = i32::from(a.red) - i32::from(b.red);
    let dg = i32::from(a.green) - i32::from(b.green);
    let db = i32::from(a.blue) - i32::from(b.blue);
    dr.unsigned_abs().pow(2) + dg.unsigned_abs().pow(2) + db.unsigned_abs().pow(2)
}

/// Returns the index of the palette color nearest to `color`.
///
/// Only a strictly smaller distance replaces the current best,
/// so the lowest index wins among equally near colors.
///
/// # Panics
/// Panics if `palette` is empty.
#[inline]
#[must_use]
pub fn nearest(palette: &[Srgb<u8>], color: Srgb<u8>) -> usize {
    let mut best = 0;
    let mut best_distance = distance_squared(color, palette[0]);
    for (i, &p) in palette.iter().enumerate().skip(1) {
        let distance = distance_squared(color, p);
        if distance < best_distance {
            best = i;
            best_distance = distance;
        }
    }
    best
}

/// Counts, for each palette color, the number of samples nearest to it.
///
/// The returned `Vec` has the same length and order as `palette`,
/// and its sum is the number of samples (unless `palette` is empty).
/// No samples give all zeros, and an empty palette gives an empty `Vec`.
#[must_use]
pub fn histogram(samples: &[Srgb<u8>], palette: &[Srgb<u8>]) -> Vec<u32> {
    let mut counts = vec![0; palette.len()];
    if !palette.is_empty() {
        for &color in samples {
            counts[nearest(palette, color)] += 1;
        }
    }
    counts
}

/// Returns the index of the nearest palette color for each sample, in sample order.
///
/// An empty palette gives an empty `Vec`.
///
/// # Panics
/// Panics if `palette` has more than [`MAX_COLORS`] entries.
#[must_use]
pub fn indices(samples: &[Srgb<u8>], palette: &[Srgb<u8>]) -> Vec<u8> {
    assert!(palette.len() <= usize::from(MAX_COLORS));
    if palette.is_empty() {
        return Vec::new();
    }

    samples
        .iter()
        .map(|&color| nearest_index(palette, color))
        .collect()
}

/// [`nearest`] as a `u8` index. The palette must have at most [`MAX_COLORS`] entries.
#[inline]
#[allow(clippy::cast_possible_truncation)]
fn nearest_index(palette: &[Srgb<u8>], color: Srgb<u8>) -> u8 {
    nearest(palette, color) as u8
}

/// Splits `0..len` into `chunks` contiguous ranges of `len / chunks` elements,
/// with the last range also taking the remainder.
#[cfg(feature = "threads")]
fn chunk_ranges(len: usize, chunks: usize) -> Vec<Range<usize>> {
    debug_assert!(chunks > 0);
    let size = len / chunks;
    (0..chunks)
        .map(|i| {
            let start = i * size;
            let end = if i + 1 == chunks { len } else { start + size };
            start..end
        })
        .collect()
}

/// Sums partial histograms element-wise.
#[cfg(feature = "threads")]
fn merge_histograms(len: usize, partials: Vec<Vec<u32>>) -> Vec<u32> {
    partials.into_iter().fold(vec![0; len], |mut counts, partial| {
        debug_assert_eq!(counts.len(), partial.len());
        for (count, n) in counts.iter_mut().zip(partial) {
            *count += n;
        }
        counts
    })
}

/// Counts, in parallel, the number of samples nearest to each palette color.
///
/// Small inputs (see [`ClassifyOptions::sequential_threshold`]) and single worker options
/// fall back to [`histogram`]. Otherwise, the samples are split into one chunk per worker
/// and every chunk is counted as its own rayon task.
/// All tasks are joined before the partial counts are merged,
/// so a panic in any task propagates and no partial result is returned.
///
/// The result is always equal to [`histogram`] for the same input.
#[cfg(feature = "threads")]
#[must_use]
pub fn histogram_par(
    samples: &[Srgb<u8>],
    palette: &[Srgb<u8>],
    options: &ClassifyOptions,
) -> Vec<u32> {
    if palette.is_empty() || options.is_sequential(samples.len()) {
        return histogram(samples, palette);
    }

    let ranges = chunk_ranges(samples.len(), options.num_workers());
    debug!(
        samples = samples.len(),
        chunks = ranges.len(),
        "classifying samples in parallel"
    );

    let partials = ranges
        .into_par_iter()
        .map(|range| histogram(&samples[range], palette))
        .collect::<Vec<_>>();

    merge_histograms(palette.len(), partials)
}

/// Returns, computed in parallel, the index of the nearest palette color for each sample.
///
/// Follows the same sequential fallback and chunking as [`histogram_par`].
///
/// # Panics
/// Panics if `palette` has more than [`MAX_COLORS`] entries.
#[cfg(feature = "threads")]
#[must_use]
pub fn indices_par(
    samples: &[Srgb<u8>],
    palette: &[Srgb<u8>],
    options: &ClassifyOptions,
) -> Vec<u8> {
    assert!(palette.len() <= usize::from(MAX_COLORS));
    if palette.is_empty() || options.is_sequential(samples.len()) {
        return indices(samples, palette);
    }

    chunk_ranges(samples.len(), options.num_workers())
        .into_par_iter()
        .flat_map_iter(|range| indices(&samples[range], palette))
        .collect()
}
