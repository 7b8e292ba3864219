//! Per-channel statistics used to choose where to split a box of colors.

use palette::Srgb;

/// One of the three channels of an [`Srgb<u8>`] color.
///
/// The declaration order is also the tie-break priority when choosing a split channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Channel {
    /// The red channel.
    Red,
    /// The green channel.
    Green,
    /// The blue channel.
    Blue,
}

impl Channel {
    /// All channels in priority order.
    pub const ALL: [Self; 3] = [Self::Red, Self::Green, Self::Blue];

    /// Returns the value of this channel for the given color.
    #[inline]
    #[must_use]
    pub const fn value(self, color: Srgb<u8>) -> u8 {
        match self {
            Self::Red => color.red,
            Self::Green => color.green,
            Self::Blue => color.blue,
        }
    }
}

/// Returns `max - min` of the given channel over `samples`, or `0` if `samples` is empty.
#[must_use]
pub fn channel_range(samples: &[Srgb<u8>], channel: Channel) -> u8 {
    samples
        .iter()
        .map(|&color| channel.value(color))
        .fold(None, |bounds, v| match bounds {
            None => Some((v, v)),
            Some((min, max)) => Some((u8::min(min, v), u8::max(max, v))),
        })
        .map_or(0, |(min, max)| max - min)
}

/// The ranges of all three channels over a set of samples, indexed in [`Channel`] order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ChannelRanges(pub [u8; 3]);

impl ChannelRanges {
    /// Computes the range of every channel in a single pass over `samples`.
    ///
    /// All ranges are `0` if `samples` is empty.
    #[must_use]
    pub fn new(samples: &[Srgb<u8>]) -> Self {
        let Some((&first, rest)) = samples.split_first() else {
            return Self::default();
        };

        let first = first.into_components();
        let mut min = [first.0, first.1, first.2];
        let mut max = min;

        for &color in rest {
            let (r, g, b) = color.into_components();
            for (c, v) in [r, g, b].into_iter().enumerate() {
                min[c] = min[c].min(v);
                max[c] = max[c].max(v);
            }
        }

        Self([max[0] - min[0], max[1] - min[1], max[2] - min[2]])
    }

    /// Returns the range of the given channel.
    #[must_use]
    pub const fn get(self, channel: Channel) -> u8 {
        self.0[channel as usize]
    }

    /// Returns the greatest of the three ranges.
    #[must_use]
    pub fn max(self) -> u8 {
        self.get(self.dominant())
    }

    /// Returns the channel with the greatest range.
    ///
    /// Ties go to the earlier channel, so equal red and green ranges pick red.
    #[must_use]
    pub fn dominant(self) -> Channel {
        let mut best = Channel::Red;
        for c in Channel::ALL {
            if self.get(c) > self.get(best) {
                best = c;
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::*;

    #[test]
    fn empty_range_is_zero() {
        for channel in Channel::ALL {
            assert_eq!(channel_range(&[], channel), 0);
        }
        assert_eq!(ChannelRanges::new(&[]), ChannelRanges([0; 3]));
    }

    #[test]
    fn single_pass_matches_per_channel() {
        let colors = test_data_1024();
        let ranges = ChannelRanges::new(&colors[..37]);
        for channel in Channel::ALL {
            assert_eq!(ranges.get(channel), channel_range(&colors[..37], channel));
        }
    }

    #[test]
    fn dominant_channel() {
        let colors = [Srgb::new(10, 0, 50), Srgb::new(20, 90, 60)];
        let ranges = ChannelRanges::new(&colors);
        assert_eq!(ranges, ChannelRanges([10, 90, 10]));
        assert_eq!(ranges.dominant(), Channel::Green);
        assert_eq!(ranges.max(), 90);
    }

    #[test]
    fn ties_prefer_earlier_channel() {
        assert_eq!(ChannelRanges([5, 5, 5]).dominant(), Channel::Red);
        assert_eq!(ChannelRanges([1, 5, 5]).dominant(), Channel::Green);
        assert_eq!(ChannelRanges([0, 0, 0]).dominant(), Channel::Red);
        assert_eq!(ChannelRanges([0, 0, 0]).max(), 0);
    }
}
