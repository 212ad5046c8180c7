//! Reversible, incremental, seeded pseudo-random operations for
//! open-world procedural generators.
//!
//! Every public function here is a pure computation over its arguments:
//! given an index and a seed, it deterministically computes a result in
//! `O(1)` or `O(log n)` time and (where documented) admits an exact
//! inverse that recovers the input. There is no mutable state, no
//! allocation, and no I/O anywhere in this crate — callers thread their
//! own counters and seeds.
//!
//! - [`bits`]: reversible unit bit-mixing primitives on 64-bit words.
//! - [`prng`]: seed whitening and the reversible PRNG built from them.
//! - [`sample`]: uniform, quasi-normal, biased-coin, bounded-integer, and
//!   (truncated) exponential samplers.
//! - [`cohort`]: cohort addressing and reversible intra-cohort shuffles.
//! - [`distribution`]: recursive, roughness-controlled distribution of
//!   items into capacity-bounded segments.
//! - [`rng_core`]: an optional [`rand_core`] adapter over [`prng`].
//!
//! All cross-language implementations of this library are expected to
//! produce bit-identical output for the same inputs at 64-bit width; see
//! `tests/conformance.rs` for the reference vectors this crate is checked
//! against.
#![cfg_attr(not(feature = "std"), no_std)]

pub mod bits;
pub mod cohort;
pub mod prng;
pub mod rng_core;

// The distribution engine's split-point arithmetic and the samplers both
// need floating-point transcendentals (`floor`, `ln`, `sqrt`) that `core`
// does not provide on its own; they are only compiled when the `std`
// feature (on by default) is enabled.
#[cfg(feature = "std")]
pub mod distribution;
#[cfg(feature = "std")]
pub mod sample;

pub use bits::*;
pub use cohort::*;
pub use prng::*;
pub use rng_core::*;

#[cfg(feature = "std")]
pub use distribution::*;
#[cfg(feature = "std")]
pub use sample::*;
