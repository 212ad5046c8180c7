//! Recursive, roughness-controlled distribution of items into
//! capacity-bounded segments, with O(log n_segments) portion / prefix-sum
//! / inverse (item -> segment) queries, plus a sumtable binary search
//! helper.

use crate::prng::prng;

/// Computes the split point of `total` items between the first
/// `n_segments / 2` segments and the rest, along with that segment count
/// (`first_half`). Shared by [`distribution_portion`],
/// [`distribution_prior_sum`], and [`distribution_segment`].
///
/// The `total`/`split_min`/`split_max` arithmetic is intentionally done in
/// `f64`, matching the unbounded-integer semantics of the reference
/// implementation's `total * roughness`-style products; `segment_capacity
/// * n_segments >= total` keeps every intermediate value far below `f64`'s
/// 53-bit exact-integer range for any `total` that fits a `u64` segment
/// count in practice.
fn distribution_split_point(
    total: u64,
    n_segments: u64,
    segment_capacity: u64,
    roughness: f64,
    seed: u64,
) -> (u64, u64) {
    let first_half = n_segments / 2;

    // proportional even split; mandatory, not `total / 2`
    let nat = (total as f64 * (first_half as f64 / n_segments as f64)).floor();
    let mut split_min = (nat - nat * roughness).floor();
    let mut split_max = (nat + (total as f64 - nat) * roughness).floor();

    let right_segments = (n_segments - first_half) as f64;
    if (total as f64 - split_min) > segment_capacity as f64 * right_segments {
        split_min = total as f64 - segment_capacity as f64 * right_segments;
    }
    if split_max > segment_capacity as f64 * first_half as f64 {
        split_max = segment_capacity as f64 * first_half as f64;
    }

    let split_min = split_min as u64;
    let split_max = split_max as u64;

    let split = if split_min >= split_max {
        split_min
    } else {
        split_min + (prng(total ^ prng(seed, seed), seed) % (split_max - split_min))
    };

    (split, first_half)
}

/// How many of `total` items land in `segment`, when distributing among
/// `n_segments` segments of at most `segment_capacity` items each, with
/// the given `roughness` (0 = perfectly even, 1 = perfectly random) and
/// `seed`. Requires `segment_capacity * n_segments >= total`.
pub fn distribution_portion(
    segment: u64,
    total: u64,
    n_segments: u64,
    segment_capacity: u64,
    roughness: f64,
    seed: u64,
) -> u64 {
    let (mut segment, mut total, mut n_segments) = (segment, total, n_segments);
    loop {
        if n_segments == 1 {
            return total;
        }
        let (split, first_half) =
            distribution_split_point(total, n_segments, segment_capacity, roughness, seed);
        if segment < first_half {
            total = split;
            n_segments = first_half;
        } else {
            segment -= first_half;
            total -= split;
            n_segments -= first_half;
        }
    }
}

/// The cumulative number of items in segments before `segment` (so
/// `distribution_prior_sum(0, ...) == 0`), for the same distribution as
/// [`distribution_portion`].
pub fn distribution_prior_sum(
    segment: u64,
    total: u64,
    n_segments: u64,
    segment_capacity: u64,
    roughness: f64,
    seed: u64,
) -> u64 {
    let (mut segment, mut total, mut n_segments) = (segment, total, n_segments);
    let mut prior: u64 = 0;
    loop {
        if n_segments == 1 {
            return prior;
        }
        let (split, first_half) =
            distribution_split_point(total, n_segments, segment_capacity, roughness, seed);
        if segment < first_half {
            total = split;
            n_segments = first_half;
        } else {
            prior += split;
            segment -= first_half;
            total -= split;
            n_segments -= first_half;
        }
    }
}

/// The segment index that the `index`-th distributed item (0 <= index <
/// total) falls into, for the same distribution as
/// [`distribution_portion`].
pub fn distribution_segment(
    index: u64,
    total: u64,
    n_segments: u64,
    segment_capacity: u64,
    roughness: f64,
    seed: u64,
) -> u64 {
    let (mut index, mut total, mut n_segments) = (index, total, n_segments);
    let mut base: u64 = 0;
    loop {
        if n_segments == 1 {
            return base;
        }
        let (split, first_half) =
            distribution_split_point(total, n_segments, segment_capacity, roughness, seed);
        if index < split {
            total = split;
            n_segments = first_half;
        } else {
            base += first_half;
            index -= split;
            total -= split;
            n_segments -= first_half;
        }
    }
}

/// Binary search for the largest index `i` in a sorted prefix-sum table
/// with `table[i] < value`, or `None` if no entry is smaller than
/// `value`. Runs in time proportional to the logarithm of the table size.
pub fn max_smaller(value: u64, table: &[u64]) -> Option<usize> {
    let mut fr = 0usize;
    let mut to = table.len();

    while to - fr > 2 {
        let mid = fr + (to - fr) / 2;
        if table[mid] >= value {
            to = mid;
        } else {
            fr = mid;
        }
    }

    (fr..to).rev().find(|&i| table[i] < value)
}
