//! Contains the value types shared across the crate.

use crate::{MAX_COLORS, MAX_PIXELS};
use palette::Srgb;
use std::{
    error::Error,
    fmt::{Debug, Display},
    ops::Deref,
};
#[cfg(feature = "image")]
use {image::RgbImage, palette::cast::ComponentsAs};

/// An error type for when the length of an input (e.g., `Vec` or slice)
/// is above the maximum supported value.
///
/// The inner value is the maximum supported value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct AboveMaxLen<T>(pub T);

impl<T: Display> Display for AboveMaxLen<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "above the maximum length of {}", self.0)
    }
}

impl<T: Debug + Display> Error for AboveMaxLen<T> {}

/// An owned sequence of color samples (usually the pixels of a decoded image)
/// with the invariant that its length is not greater than [`MAX_PIXELS`].
///
/// The order of the samples carries no meaning to the quantizer.
/// Building a palette takes the [`SampleSet`] by value,
/// because median cut reorders the samples in place while partitioning them.
///
/// # Examples
/// ```
/// # use swatchcut::{SampleSet, AboveMaxLen};
/// # use palette::Srgb;
/// # fn main() -> Result<(), AboveMaxLen<u32>> {
/// let samples = SampleSet::try_from(vec![Srgb::new(0, 0, 0), Srgb::new(255, 0, 0)])?;
/// assert_eq!(samples.num_samples(), 2);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SampleSet(Vec<Srgb<u8>>);

impl SampleSet {
    /// Creates a new [`SampleSet`] by truncating the input to a max length of [`MAX_PIXELS`].
    #[must_use]
    pub fn from_truncated(mut samples: Vec<Srgb<u8>>) -> Self {
        samples.truncate(MAX_PIXELS as usize);
        Self(samples)
    }

    /// Returns the number of samples as a `u32`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn num_samples(&self) -> u32 {
        self.0.len() as u32
    }

    /// Returns the inner `Vec` of samples.
    #[must_use]
    pub fn into_inner(self) -> Vec<Srgb<u8>> {
        self.0
    }
}

impl AsRef<[Srgb<u8>]> for SampleSet {
    fn as_ref(&self) -> &[Srgb<u8>] {
        self
    }
}

impl Deref for SampleSet {
    type Target = [Srgb<u8>];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<SampleSet> for Vec<Srgb<u8>> {
    fn from(samples: SampleSet) -> Self {
        samples.into_inner()
    }
}

impl TryFrom<Vec<Srgb<u8>>> for SampleSet {
    type Error = AboveMaxLen<u32>;

    fn try_from(samples: Vec<Srgb<u8>>) -> Result<Self, Self::Error> {
        if samples.len() <= MAX_PIXELS as usize {
            Ok(Self(samples))
        } else {
            Err(AboveMaxLen(MAX_PIXELS))
        }
    }
}

impl TryFrom<&[Srgb<u8>]> for SampleSet {
    type Error = AboveMaxLen<u32>;

    fn try_from(samples: &[Srgb<u8>]) -> Result<Self, Self::Error> {
        if samples.len() <= MAX_PIXELS as usize {
            Ok(Self(samples.to_vec()))
        } else {
            Err(AboveMaxLen(MAX_PIXELS))
        }
    }
}

#[cfg(feature = "image")]
impl TryFrom<&RgbImage> for SampleSet {
    type Error = AboveMaxLen<u32>;

    fn try_from(image: &RgbImage) -> Result<Self, Self::Error> {
        let pixels = image.pixels().len();
        if pixels <= MAX_PIXELS as usize {
            let buf: &[Srgb<u8>] = image.as_raw()[..(pixels * 3)].components_as();
            Ok(Self(buf.to_vec()))
        } else {
            Err(AboveMaxLen(MAX_PIXELS))
        }
    }
}

/// The number of colors to put in a palette.
///
/// This is a new type wrapper around `u16` with the invariant that it must be
/// less than or equal to [`MAX_COLORS`], so that every palette index fits in a `u8`.
///
/// A [`PaletteSize`] of `0` yields an empty palette.
/// Any other size yields a palette with exactly that many entries.
///
/// # Examples
/// ```
/// # use swatchcut::{PaletteSize, AboveMaxLen};
/// # fn main() -> Result<(), AboveMaxLen<u16>> {
/// let size = PaletteSize::from(16);
/// let size = PaletteSize::try_from(256u16)?;
/// let size = PaletteSize::from_clamped(1024);
/// assert_eq!(size, PaletteSize::MAX);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct PaletteSize(u16);

impl PaletteSize {
    /// The maximum supported palette size (given by [`MAX_COLORS`]).
    pub const MAX: Self = Self(MAX_COLORS);

    /// The palette size used when none is given.
    pub const DEFAULT: Self = Self(8);

    /// Gets the inner `u16` value.
    #[must_use]
    pub const fn into_inner(self) -> u16 {
        self.0
    }

    /// Gets the inner value as a `usize` for lengths and indexing.
    #[must_use]
    pub const fn as_usize(self) -> usize {
        self.0 as usize
    }

    /// Creates a [`PaletteSize`] by clamping the given `u16` to be less than or equal to [`MAX_COLORS`].
    #[must_use]
    pub const fn from_clamped(value: u16) -> Self {
        if value <= MAX_COLORS {
            Self(value)
        } else {
            Self(MAX_COLORS)
        }
    }
}

impl Default for PaletteSize {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl From<PaletteSize> for u16 {
    fn from(val: PaletteSize) -> Self {
        val.into_inner()
    }
}

impl From<u8> for PaletteSize {
    fn from(value: u8) -> Self {
        Self(value.into())
    }
}

impl TryFrom<u16> for PaletteSize {
    type Error = AboveMaxLen<u16>;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        if value <= MAX_COLORS {
            Ok(PaletteSize(value))
        } else {
            Err(AboveMaxLen(MAX_COLORS))
        }
    }
}

impl Display for PaletteSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.into_inner())
    }
}

/// The output struct returned by the quantization pipeline.
///
/// `palette` has exactly as many entries as the requested [`PaletteSize`],
/// and `counts[i]` is the number of samples whose nearest palette color is `palette[i]`.
/// `indices` holds the nearest palette index of each sample in input order,
/// but only when an indexed quantization was requested. Otherwise it is empty.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QuantizeOutput {
    /// The representative colors. They are not guaranteed to be unique.
    pub palette: Vec<Srgb<u8>>,
    /// The number of samples assigned to each color in `palette`.
    ///
    /// Counts may be zero, for example for padded duplicate entries.
    pub counts: Vec<u32>,
    /// The index into `palette` for each sample, if computed.
    pub indices: Vec<u8>,
}


#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn palette_size_bounds() {
        assert_eq!(PaletteSize::try_from(MAX_COLORS), Ok(PaletteSize::MAX));
        assert_eq!(
            PaletteSize::try_from(MAX_COLORS + 1),
            Err(AboveMaxLen(MAX_COLORS))
        );
        assert_eq!(PaletteSize::from_clamped(u16::MAX), PaletteSize::MAX);
        assert_eq!(PaletteSize::from(0).as_usize(), 0);
        assert_eq!(PaletteSize::default().into_inner(), 8);
    }

    #[test]
    fn sample_set_keeps_order() {
        let colors = vec![Srgb::new(1, 2, 3), Srgb::new(4, 5, 6)];
        let samples = SampleSet::from_truncated(colors.clone());
        assert_eq!(samples.num_samples(), 2);
        assert_eq!(samples.as_ref(), colors.as_slice());
        assert_eq!(samples.into_inner(), colors);
    }

    #[test]
    #[cfg(feature = "image")]
    fn sample_set_from_rgbimage() {
        #[allow(clippy::cast_possible_truncation)]
        let image = RgbImage::from_fn(3, 2, |x, y| image::Rgb([x as u8, y as u8, 7]));

        let samples = SampleSet::try_from(&image).unwrap();
        assert_eq!(samples.num_samples(), 6);
        assert_eq!(samples[0], Srgb::new(0, 0, 7));
        assert_eq!(samples[4], Srgb::new(1, 1, 7));
    }
}
