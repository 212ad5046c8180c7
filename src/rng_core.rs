//! A minimal [`rand_core`] adapter over [`crate::prng`], for callers that
//! want a conventional streaming RNG backed by this crate's reversible
//! primitives rather than calling `prng`/`rev_prng` directly with their
//! own counters.
//!
//! This type is additive: it does not change the semantics of any pure
//! function this crate defines, and its own output stream is not part of
//! the bit-identical conformance surface — only the underlying `prng`
//! call is.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::prng::prng;
use rand_core::{Error, RngCore, SeedableRng};

/// A counter-based RNG wrapping [`crate::prng::prng`]. Each `seed` gives a
/// distinct, reversible sequence; the current position can be read back
/// and restored via [`AnarchyRng::position`]/[`AnarchyRng::set_position`].
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct AnarchyRng {
    seed: u64,
    counter: u64,
}

impl AnarchyRng {
    /// Creates a new generator for the given seed, starting at position 0.
    pub fn new(seed: u64) -> Self {
        AnarchyRng { seed, counter: 0 }
    }

    /// Returns the seed this generator was constructed with.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Returns the current position in the sequence.
    pub fn position(&self) -> u64 {
        self.counter
    }

    /// Sets the current position in the sequence.
    pub fn set_position(&mut self, position: u64) {
        self.counter = position;
    }

    /// Generates the next 64-bit value and advances the position.
    #[inline]
    pub fn next(&mut self) -> u64 {
        let x = prng(self.counter, self.seed);
        self.counter = self.counter.wrapping_add(1);
        x
    }
}

impl RngCore for AnarchyRng {
    fn next_u32(&mut self) -> u32 {
        self.next() as u32
    }

    fn next_u64(&mut self) -> u64 {
        self.next()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        let bytes = dest.len();
        let mut i = 0;
        while i < bytes {
            let x = self.next();
            let j = bytes.min(i + 8);
            // Always use Little-Endian.
            dest[i..j].copy_from_slice(&x.to_le_bytes()[0..(j - i)]);
            i = j;
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl SeedableRng for AnarchyRng {
    type Seed = [u8; 8];

    fn from_seed(seed: Self::Seed) -> Self {
        AnarchyRng::new(u64::from_le_bytes(seed))
    }
}
