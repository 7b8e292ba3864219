//! Contains the [`PalettePipeline`] builder struct for the high level API.

#[cfg(feature = "threads")]
use crate::classify::{histogram_par, indices_par};
use crate::{
    classify::{histogram, indices},
    median_cut, rank_entries, ClassifyOptions, PaletteEntry, PaletteSize, QuantizeOutput,
    SampleSet,
};
use palette::Srgb;
#[cfg(feature = "image")]
use {crate::AboveMaxLen, image::RgbImage};

/// A builder struct to specify options for extracting a palette from a set of samples.
///
/// # Examples
/// To start, create a [`PalettePipeline`] from a [`RgbImage`] (note that the `image` feature is needed):
/// ```no_run
/// # use swatchcut::PalettePipeline;
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let img = image::open("some image")?.into_rgb8();
/// let pipeline = PalettePipeline::try_from(&img)?;
/// # Ok(())
/// # }
/// ```
///
/// Then, set the number of colors and, optionally, how classification is parallelized:
/// ```
/// # use swatchcut::{PalettePipeline, SampleSet, AboveMaxLen};
/// # use palette::Srgb;
/// # fn main() -> Result<(), AboveMaxLen<u32>> {
/// # let samples = SampleSet::try_from(vec![Srgb::new(0, 0, 0), Srgb::new(255, 255, 255)])?;
/// let output = PalettePipeline::new(samples)
///     .palette_size(2.into())
///     .workers(4)
///     .quantize();
///
/// assert_eq!(output.palette.len(), 2);
/// assert_eq!(output.counts, vec![1, 1]);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct PalettePipeline {
    /// The samples to quantize.
    samples: SampleSet,
    /// The number of colors in the palette.
    k: PaletteSize,
    /// The parallel classification options.
    options: ClassifyOptions,
}

impl PalettePipeline {
    /// Creates a new [`PalettePipeline`] with default options.
    #[must_use]
    pub fn new(samples: SampleSet) -> Self {
        Self {
            samples,
            k: PaletteSize::default(),
            options: ClassifyOptions::new(),
        }
    }

    /// Sets the palette size which determines the number of colors in the palette.
    ///
    /// The default palette size is [`PaletteSize::DEFAULT`].
    #[must_use]
    pub fn palette_size(mut self, size: PaletteSize) -> Self {
        self.k = size;
        self
    }

    /// Sets the number of workers used by the parallel functions.
    ///
    /// See [`ClassifyOptions::workers`] for more details.
    #[must_use]
    pub fn workers(mut self, workers: usize) -> Self {
        self.options = self.options.workers(workers);
        self
    }

    /// Sets the number of samples below which the parallel functions run single threaded.
    ///
    /// See [`ClassifyOptions::sequential_threshold`] for more details.
    #[must_use]
    pub fn sequential_threshold(mut self, sequential_threshold: usize) -> Self {
        self.options = self.options.sequential_threshold(sequential_threshold);
        self
    }

    /// Replaces all classification options at once.
    #[must_use]
    pub fn classify_options(mut self, options: ClassifyOptions) -> Self {
        self.options = options;
        self
    }

    /// Computes the color palette.
    #[must_use]
    pub fn palette(self) -> Vec<Srgb<u8>> {
        median_cut::palette(self.samples, self.k)
    }

    /// Computes the color palette and the number of samples nearest to each palette color.
    #[must_use]
    pub fn quantize(self) -> QuantizeOutput {
        let palette = median_cut::palette(self.samples.clone(), self.k);
        let counts = histogram(&self.samples, &palette);
        QuantizeOutput {
            palette,
            counts,
            indices: Vec::new(),
        }
    }

    /// Computes the color palette, the count for each palette color,
    /// and the palette index for each sample.
    #[must_use]
    pub fn indexed_quantize(self) -> QuantizeOutput {
        let palette = median_cut::palette(self.samples.clone(), self.k);
        let indices = indices(&self.samples, &palette);
        let counts = counts_from_indices(palette.len(), &indices);
        QuantizeOutput {
            palette,
            counts,
            indices,
        }
    }

    /// Computes the palette entries sorted by descending count.
    #[must_use]
    pub fn ranked(self) -> Vec<PaletteEntry> {
        let QuantizeOutput { palette, counts, .. } = self.quantize();
        rank_entries(&palette, &counts)
    }
}

#[cfg(feature = "threads")]
impl PalettePipeline {
    /// Computes the color palette and, in parallel,
    /// the number of samples nearest to each palette color.
    #[must_use]
    pub fn quantize_par(self) -> QuantizeOutput {
        let palette = median_cut::palette(self.samples.clone(), self.k);
        let counts = histogram_par(&self.samples, &palette, &self.options);
        QuantizeOutput {
            palette,
            counts,
            indices: Vec::new(),
        }
    }

    /// Computes the color palette and, in parallel,
    /// the count for each palette color and the palette index for each sample.
    #[must_use]
    pub fn indexed_quantize_par(self) -> QuantizeOutput {
        let palette = median_cut::palette(self.samples.clone(), self.k);
        let indices = indices_par(&self.samples, &palette, &self.options);
        let counts = counts_from_indices(palette.len(), &indices);
        QuantizeOutput {
            palette,
            counts,
            indices,
        }
    }

    /// Computes the palette entries sorted by descending count, classifying in parallel.
    #[must_use]
    pub fn ranked_par(self) -> Vec<PaletteEntry> {
        let QuantizeOutput { palette, counts, .. } = self.quantize_par();
        rank_entries(&palette, &counts)
    }
}

#[cfg(feature = "image")]
impl TryFrom<&RgbImage> for PalettePipeline {
    type Error = AboveMaxLen<u32>;

    fn try_from(image: &RgbImage) -> Result<Self, Self::Error> {
        Ok(Self::new(image.try_into()?))
    }
}

/// Counts the occurrences of each palette index.
fn counts_from_indices(len: usize, indices: &[u8]) -> Vec<u32> {
    let mut counts = vec![0; len];
    for &i in indices {
        counts[usize::from(i)] += 1;
    }
    counts
}
