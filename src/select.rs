//! In-place k-th order statistic selection (quickselect).
//!
//! Median cut only needs the median of a box along one channel,
//! so a partial partition around the median is enough and avoids a full sort.
//! Both functions here reorder their input buffer.

use std::cmp::Ordering;

/// Reorders `buf` in place so that `buf[rank]` holds the element with the `rank`-th smallest key
/// (0-indexed), every element before `rank` has a key less than or equal to it,
/// and every element after `rank` has a key greater than or equal to it.
///
/// Elements with equal keys may end up in any relative order.
/// The pivot is the middle element of the active range,
/// so sorted and reverse sorted inputs take linear time,
/// and runs of equal keys are split evenly by the partition.
///
/// # Panics
/// Panics if `rank >= buf.len()`.
pub fn select_nth_by_key<T, K: Ord>(buf: &mut [T], rank: usize, key: impl Fn(&T) -> K) {
    assert!(
        rank < buf.len(),
        "rank {rank} out of bounds for length {}",
        buf.len()
    );

    let mut lo = 0;
    let mut hi = buf.len() - 1;

    while lo < hi {
        let (left_end, right_start) = partition(buf, lo, hi, &key);

        if rank < left_end {
            hi = left_end - 1;
        } else if rank >= right_start {
            lo = right_start;
        } else {
            // rank is inside the run of elements equal to the pivot
            return;
        }
    }
}

/// Hoare partition of `buf[lo..=hi]` around the key of its middle element.
///
/// Returns `(left_end, right_start)` such that `buf[lo..left_end]` has keys `<=` the pivot,
/// `buf[right_start..=hi]` has keys `>=` the pivot,
/// and `buf[left_end..right_start]` is a (possibly empty) run with keys equal to the pivot.
/// Both outer ranges are strictly smaller than `lo..=hi`.
fn partition<T, K: Ord>(
    buf: &mut [T],
    lo: usize,
    hi: usize,
    key: &impl Fn(&T) -> K,
) -> (usize, usize) {
    let pivot = key(&buf[lo + (hi - lo) / 2]);
    let mut i = lo;
    let mut j = hi;

    loop {
        // both scans are bounded by the pivot element or by the last swapped pair
        while key(&buf[i]) < pivot {
            i += 1;
        }
        while key(&buf[j]) > pivot {
            j -= 1;
        }

        match i.cmp(&j) {
            Ordering::Less => {
                buf.swap(i, j);
                i += 1;
                j -= 1;
            }
            // both scans stopped on the same element, which must equal the pivot
            Ordering::Equal => return (i, i + 1),
            Ordering::Greater => return (j + 1, i),
        }
    }
}

/// Reorders `values` in place and returns the `rank`-th smallest value (0-indexed).
///
/// # Panics
/// Panics if `rank >= values.len()`.
#[must_use]
pub fn select_nth(values: &mut [u8], rank: usize) -> u8 {
    select_nth_by_key(values, rank, |&v| v);
    values[rank]
}

/// Returns the median of `values`, reordering them in the process.
///
/// For an odd number of values this is the middle value.
/// For an even number of values this is the average of the two middle values,
/// rounded half away from zero (e.g., `3` and `4` give `4`).
/// An empty slice returns `0`.
#[must_use]
pub fn channel_median(values: &mut [u8]) -> u8 {
    let n = values.len();
    if n == 0 {
        return 0;
    }

    let mid = n / 2;
    let upper = select_nth(values, mid);
    if n % 2 == 1 {
        upper
    } else {
        // everything before `mid` is <= upper, so the lower middle value is the max of that half
        let lower = values[..mid].iter().copied().max().unwrap_or(upper);
        average_rounded(lower, upper)
    }
}

/// Averages two values, rounding half up.
#[allow(clippy::cast_possible_truncation)]
fn average_rounded(a: u8, b: u8) -> u8 {
    ((u16::from(a) + u16::from(b) + 1) / 2) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{tests::*, Channel};

    fn assert_selected<T, K: Ord + std::fmt::Debug>(
        buf: &[T],
        rank: usize,
        sorted_keys: &[K],
        key: impl Fn(&T) -> K,
    ) {
        let kth = key(&buf[rank]);
        assert_eq!(kth, sorted_keys[rank]);
        assert!(buf[..rank].iter().all(|x| key(x) <= kth));
        assert!(buf[rank + 1..].iter().all(|x| key(x) >= kth));
    }

    fn check_all_ranks(values: &[u8]) {
        let mut sorted = values.to_vec();
        sorted.sort_unstable();

        for rank in 0..values.len() {
            let mut buf = values.to_vec();
            let v = select_nth(&mut buf, rank);
            assert_eq!(v, sorted[rank]);
            assert_selected(&buf, rank, &sorted, |&v| v);

            let mut reordered = buf.clone();
            reordered.sort_unstable();
            assert_eq!(reordered, sorted, "selection must only permute the buffer");
        }
    }

    #[test]
    fn single_element() {
        check_all_ranks(&[42]);
    }

    #[test]
    fn small_buffers() {
        check_all_ranks(&[2, 1]);
        check_all_ranks(&[1, 2]);
        check_all_ranks(&[3, 1, 2]);
        check_all_ranks(&[5, 5, 1, 5, 5]);
        check_all_ranks(&[0, 255, 0, 255, 0, 255]);
    }

    #[test]
    fn sorted_and_reversed() {
        let sorted = (0..=255).collect::<Vec<u8>>();
        check_all_ranks(&sorted);

        let reversed = sorted.iter().rev().copied().collect::<Vec<_>>();
        check_all_ranks(&reversed);
    }

    #[test]
    fn all_equal() {
        check_all_ranks(&[7; 100]);
    }

    #[test]
    fn random_values() {
        let values = test_data_256().into_iter().map(|c| c.red).collect::<Vec<_>>();
        check_all_ranks(&values);
    }

    #[test]
    fn select_colors_by_channel() {
        let colors = test_data_1024();
        for channel in Channel::ALL {
            let key = |c: &palette::Srgb<u8>| channel.value(*c);
            let mut sorted = colors.iter().map(key).collect::<Vec<_>>();
            sorted.sort_unstable();

            for rank in [0, 1, 511, 512, 1023] {
                let mut buf = colors.clone();
                select_nth_by_key(&mut buf, rank, key);
                assert_selected(&buf, rank, &sorted, key);
            }
        }
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn rank_out_of_bounds() {
        let _ = select_nth(&mut [1, 2, 3], 3);
    }

    #[test]
    fn medians() {
        assert_eq!(channel_median(&mut []), 0);
        assert_eq!(channel_median(&mut [9]), 9);
        assert_eq!(channel_median(&mut [9, 1, 5]), 5);
        assert_eq!(channel_median(&mut [0, 10]), 5);
        assert_eq!(channel_median(&mut [4, 3]), 4);
        assert_eq!(channel_median(&mut [255, 254]), 255);
        assert_eq!(channel_median(&mut [1, 100, 2, 200]), 51);
        assert_eq!(channel_median(&mut [0, 0, 0, 255]), 0);
    }

    #[test]
    fn median_matches_sort() {
        let colors = test_data_1024();
        for len in [2, 3, 64, 65, 1023, 1024] {
            let mut values = colors[..len].iter().map(|c| c.green).collect::<Vec<_>>();
            let mut sorted = values.clone();
            sorted.sort_unstable();
            let expected = if len % 2 == 1 {
                sorted[len / 2]
            } else {
                let sum = u16::from(sorted[len / 2 - 1]) + u16::from(sorted[len / 2]);
                u8::try_from((sum + 1) / 2).unwrap_or(u8::MAX)
            };
            assert_eq!(channel_median(&mut values), expected);
        }
    }
}
