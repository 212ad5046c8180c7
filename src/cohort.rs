//! Cohort addressing and reversible intra-cohort permutations.
//!
//! A *cohort* is a contiguous block of `cohort_size` consecutive integers.
//! Every `cohort_*` permutation below maps an inner index in
//! `[0, cohort_size)` to another inner index in the same range, and is
//! paired with an inverse (or is its own inverse), so that composing them
//! in [`cohort_shuffle`] yields a reversible, incremental shuffle: the
//! shuffled position of any single element can be computed without
//! materializing the rest of the cohort.

use wrapping_arithmetic::wrappit;

/// Which cohort an outer index falls into, given a cohort size.
#[inline]
pub fn cohort(outer: u64, cohort_size: u64) -> u64 {
    outer / cohort_size
}

/// Where within its cohort an outer index falls.
#[inline]
pub fn cohort_inner(outer: u64, cohort_size: u64) -> u64 {
    outer % cohort_size
}

/// A cohort number and within-cohort index, as a pair.
#[inline]
pub fn cohort_and_inner(outer: u64, cohort_size: u64) -> (u64, u64) {
    (cohort(outer, cohort_size), cohort_inner(outer, cohort_size))
}

/// Inverse of [`cohort_and_inner`]: the outer index for a given cohort
/// number and within-cohort index. `cohort` may be negative, in which
/// case it is treated as its 64-bit two's-complement representation (so
/// `cohort_outer(-1, 3, 112) == 18446744073709551507`).
#[wrappit]
#[inline]
pub fn cohort_outer(cohort: i64, inner: u64, cohort_size: u64) -> u64 {
    (cohort_size * (cohort as u64)) + inner
}

/// Interleaves cohort members by folding the top half into the bottom
/// half. No seed. Inverse is [`rev_cohort_interleave`].
#[inline]
pub fn cohort_interleave(inner: u64, cohort_size: u64) -> u64 {
    let half = (cohort_size + 1) / 2;
    if inner < half {
        inner * 2
    } else {
        (cohort_size - 1 - inner) * 2 + 1
    }
}

/// Inverse of [`cohort_interleave`].
#[inline]
pub fn rev_cohort_interleave(inner: u64, cohort_size: u64) -> u64 {
    if inner % 2 == 1 {
        cohort_size - 1 - inner / 2
    } else {
        inner / 2
    }
}

/// Folds items past an arbitrary split point (in the second half of the
/// cohort) into the middle of the cohort; the split always leaves an odd
/// number of items at the end. Inverse is [`rev_cohort_fold`].
#[inline]
pub fn cohort_fold(inner: u64, cohort_size: u64, seed: u64) -> u64 {
    let (fold_to, split, after) = cohort_fold_regions(cohort_size, seed);
    if inner < fold_to {
        inner
    } else if inner < split {
        inner + after
    } else {
        inner - split + fold_to
    }
}

/// Inverse of [`cohort_fold`].
#[inline]
pub fn rev_cohort_fold(inner: u64, cohort_size: u64, seed: u64) -> u64 {
    let (fold_to, split, after) = cohort_fold_regions(cohort_size, seed);
    if inner < fold_to {
        inner
    } else if inner < fold_to + after {
        inner - fold_to + split
    } else {
        inner - after
    }
}

/// Shared split-region computation for [`cohort_fold`]/[`rev_cohort_fold`]:
/// returns `(fold_to, split, after)`.
fn cohort_fold_regions(cohort_size: u64, seed: u64) -> (u64, u64, u64) {
    let half = cohort_size / 2;
    let quarter = cohort_size / 4;
    let mut split = half;
    if quarter > 0 {
        split += seed % quarter;
    }
    let mut after = cohort_size - split;
    split += (after + 1) % 2; // force an odd split point
    after = cohort_size - split;
    let fold_to = half - after / 2;
    (fold_to, split, after)
}

/// Applies a circular offset within the cohort. Inverse is
/// [`rev_cohort_spin`].
#[inline]
pub fn cohort_spin(inner: u64, cohort_size: u64, seed: u64) -> u64 {
    (inner + seed) % cohort_size
}

/// Inverse of [`cohort_spin`].
#[inline]
pub fn rev_cohort_spin(inner: u64, cohort_size: u64, seed: u64) -> u64 {
    (inner + (cohort_size - seed % cohort_size)) % cohort_size
}

/// Flops fixed-size (seed-chosen) sections with their neighbors, leaving
/// anything that would flop out of the cohort untouched. Its own inverse.
#[inline]
pub fn cohort_flop(inner: u64, cohort_size: u64, seed: u64) -> u64 {
    let mut limit = cohort_size / 8;
    if limit < 4 {
        limit += 4;
    }
    let size = (seed % limit) + 2;
    let which = inner / size;
    let local = inner % size;

    let result = if which % 2 == 1 {
        (which - 1) * size + local
    } else {
        (which + 1) * size + local
    };

    if result >= cohort_size {
        inner
    } else {
        result
    }
}

/// Applies a spin to even and odd inner indices independently, using two
/// different seeds, so that parity-adjacent items scatter differently.
/// Inverse is [`rev_cohort_mix`].
#[inline]
pub fn cohort_mix(inner: u64, cohort_size: u64, seed: u64) -> u64 {
    let even = inner - (inner % 2);
    if inner % 2 == 1 {
        let target = cohort_spin(even / 2, cohort_size / 2, seed + 464185);
        2 * target + 1
    } else {
        let target = cohort_spin(even / 2, (cohort_size + 1) / 2, seed + 1048239);
        2 * target
    }
}

/// Inverse of [`cohort_mix`].
#[inline]
pub fn rev_cohort_mix(inner: u64, cohort_size: u64, seed: u64) -> u64 {
    let even = inner - (inner % 2);
    if inner % 2 == 1 {
        let target = rev_cohort_spin(even / 2, cohort_size / 2, seed + 464185);
        2 * target + 1
    } else {
        let target = rev_cohort_spin(even / 2, (cohort_size + 1) / 2, seed + 1048239);
        2 * target
    }
}

/// Minimum region size used by [`cohort_spread`]/[`cohort_upend`].
pub const MIN_REGION_SIZE: u64 = 2;
/// Maximum number of regions used by [`cohort_spread`]/[`cohort_upend`].
pub const MAX_REGION_COUNT: u64 = 16;

/// Shared region-count/size computation for [`cohort_spread`],
/// [`rev_cohort_spread`], and [`cohort_upend`].
fn region_layout(cohort_size: u64, seed: u64) -> (u64, u64) {
    let min_regions = if cohort_size < 2 * MIN_REGION_SIZE { 1 } else { 2 };
    let max_regions = 1 + cohort_size / MIN_REGION_SIZE;
    let regions =
        min_regions + ((seed % (1 + (max_regions - min_regions))) % MAX_REGION_COUNT);
    let region_size = cohort_size / regions;
    (regions, region_size)
}

/// Spreads items out between a seed-chosen number of regions within the
/// cohort. Inverse is [`rev_cohort_spread`].
#[inline]
pub fn cohort_spread(inner: u64, cohort_size: u64, seed: u64) -> u64 {
    let (regions, region_size) = region_layout(cohort_size, seed);
    let leftovers = cohort_size - regions * region_size;

    let region = inner % regions;
    let index = inner / regions;
    if index < region_size {
        region * region_size + index + leftovers
    } else {
        // leftovers go at the front
        inner - regions * region_size
    }
}

/// Inverse of [`cohort_spread`].
#[inline]
pub fn rev_cohort_spread(inner: u64, cohort_size: u64, seed: u64) -> u64 {
    let (regions, region_size) = region_layout(cohort_size, seed);
    let leftovers = cohort_size - regions * region_size;

    if inner < leftovers {
        // leftovers back to the end
        regions * region_size + inner
    } else {
        let index = (inner - leftovers) / region_size;
        let region = (inner - leftovers) % region_size;
        region * regions + index
    }
}

/// Reverses ordering within each of several seed-chosen fragments, leaving
/// anything that would land outside the cohort untouched. Its own
/// inverse.
#[inline]
pub fn cohort_upend(inner: u64, cohort_size: u64, seed: u64) -> u64 {
    let (_regions, region_size) = region_layout(cohort_size, seed);
    let region = inner / region_size;
    let index = inner % region_size;
    let result = region * region_size + (region_size - 1 - index);
    if result < cohort_size {
        result
    } else {
        inner
    }
}

/// Composes [`cohort_spread`], [`cohort_mix`], [`cohort_interleave`],
/// [`cohort_spin`], [`cohort_upend`], [`cohort_fold`], and [`cohort_flop`]
/// in a fixed order with fixed prime seed offsets to produce an
/// incremental, reversible shuffle: calling this on every index in
/// `0..cohort_size` yields a permutation of that range. [`rev_cohort_shuffle`]
/// is the exact inverse.
///
/// Note this is not suitable for cryptography or uniform-permutation
/// sampling: once `cohort_size` grows past 64-bit seed entropy, not every
/// possible ordering of the cohort is reachable.
#[inline]
pub fn cohort_shuffle(inner: u64, cohort_size: u64, seed: u64) -> u64 {
    let seed = seed ^ cohort_size;
    let r = inner;
    let r = cohort_spread(r, cohort_size, seed + 457);
    let r = cohort_mix(r, cohort_size, seed + 2897);
    let r = cohort_interleave(r, cohort_size);
    let r = cohort_spin(r, cohort_size, seed + 1987);
    let r = cohort_upend(r, cohort_size, seed + 47);
    let r = cohort_fold(r, cohort_size, seed + 839);
    let r = cohort_interleave(r, cohort_size);
    let r = cohort_flop(r, cohort_size, seed + 53);
    let r = cohort_fold(r, cohort_size, seed + 211);
    let r = cohort_mix(r, cohort_size, seed + 733);
    let r = cohort_spread(r, cohort_size, seed + 881);
    let r = cohort_interleave(r, cohort_size);
    let r = cohort_flop(r, cohort_size, seed + 193);
    let r = cohort_upend(r, cohort_size, seed + 794641);
    cohort_spin(r, cohort_size, seed + 19)
}

/// Inverse of [`cohort_shuffle`]: applies the same operations in the
/// opposite order, each replaced with its own inverse.
#[inline]
pub fn rev_cohort_shuffle(inner: u64, cohort_size: u64, seed: u64) -> u64 {
    let seed = seed ^ cohort_size;
    let r = inner;
    let r = rev_cohort_spin(r, cohort_size, seed + 19);
    let r = cohort_upend(r, cohort_size, seed + 794641);
    let r = cohort_flop(r, cohort_size, seed + 193);
    let r = rev_cohort_interleave(r, cohort_size);
    let r = rev_cohort_spread(r, cohort_size, seed + 881);
    let r = rev_cohort_mix(r, cohort_size, seed + 733);
    let r = rev_cohort_fold(r, cohort_size, seed + 211);
    let r = cohort_flop(r, cohort_size, seed + 53);
    let r = rev_cohort_interleave(r, cohort_size);
    let r = rev_cohort_fold(r, cohort_size, seed + 839);
    let r = cohort_upend(r, cohort_size, seed + 47);
    let r = rev_cohort_spin(r, cohort_size, seed + 1987);
    let r = rev_cohort_interleave(r, cohort_size);
    let r = rev_cohort_mix(r, cohort_size, seed + 2897);
    rev_cohort_spread(r, cohort_size, seed + 457)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn is_permutation(outputs: &[u64], cohort_size: u64) -> bool {
        let set: HashSet<u64> = outputs.iter().copied().collect();
        set.len() as u64 == cohort_size && outputs.iter().all(|&x| x < cohort_size)
    }

    #[test]
    fn conformance_table() {
        assert_eq!(cohort_outer(-1, 3, 112), 18446744073709551507);
        assert_eq!(cohort_shuffle(1, 3, 17), 2);
    }

    #[test]
    fn scenario_s2() {
        let shuffled: Vec<u64> = (0..3).map(|i| cohort_shuffle(i, 3, 17)).collect();
        assert_eq!(shuffled, vec![0, 2, 1]);
        let restored: Vec<u64> = shuffled
            .iter()
            .map(|&i| rev_cohort_shuffle(i, 3, 17))
            .collect();
        assert_eq!(restored, vec![0, 1, 2]);
    }

    #[test]
    fn scenario_s3() {
        let cohort_size = 100u64;
        let seed = 478273827u64;
        let mut outputs = Vec::with_capacity(cohort_size as usize);
        for i in 0..cohort_size {
            let shuffled = cohort_shuffle(i, cohort_size, seed);
            assert_eq!(rev_cohort_shuffle(shuffled, cohort_size, seed), i);
            outputs.push(shuffled);
        }
        assert!(is_permutation(&outputs, cohort_size));
    }

    #[test]
    fn cohort_addressing_round_trips() {
        for outer in [0u64, 1, 9, 10, 11, 999, u64::MAX] {
            for size in [1u64, 3, 10, 1024] {
                let (c, i) = cohort_and_inner(outer, size);
                assert_eq!(cohort_outer(c as i64, i, size), outer);
            }
        }
    }

    #[test]
    fn cohort_shuffle_is_bijective_across_sizes_and_seeds() {
        for &cohort_size in &[3u64, 12, 17, 32, 1024] {
            for &seed in &[0u64, 1, 17, 478273827, u64::MAX] {
                let outputs: Vec<u64> = (0..cohort_size)
                    .map(|i| cohort_shuffle(i, cohort_size, seed))
                    .collect();
                assert!(
                    is_permutation(&outputs, cohort_size),
                    "not a permutation: cohort_size={cohort_size} seed={seed}"
                );
                for i in 0..cohort_size {
                    let shuffled = cohort_shuffle(i, cohort_size, seed);
                    assert_eq!(rev_cohort_shuffle(shuffled, cohort_size, seed), i);
                }
            }
        }
    }

    fn check_primitive_bijective(
        f: impl Fn(u64, u64, u64) -> u64,
        cohort_size: u64,
        seed: u64,
    ) {
        let outputs: Vec<u64> = (0..cohort_size).map(|i| f(i, cohort_size, seed)).collect();
        assert!(is_permutation(&outputs, cohort_size));
    }

    #[test]
    fn individual_primitives_are_bijective() {
        for &cohort_size in &[3u64, 12, 17, 32, 1024] {
            for &seed in &[0u64, 1, 17, 478273827] {
                check_primitive_bijective(cohort_fold, cohort_size, seed);
                check_primitive_bijective(cohort_spin, cohort_size, seed);
                check_primitive_bijective(cohort_flop, cohort_size, seed);
                check_primitive_bijective(cohort_mix, cohort_size, seed);
                check_primitive_bijective(cohort_spread, cohort_size, seed);
                check_primitive_bijective(cohort_upend, cohort_size, seed);

                let outputs: Vec<u64> = (0..cohort_size)
                    .map(|i| cohort_interleave(i, cohort_size))
                    .collect();
                assert!(is_permutation(&outputs, cohort_size));
            }
        }
    }
}
