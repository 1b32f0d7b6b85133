//! `fukubiki`: bias-free random sampling primitives.
//!
//! This crate is meant to be a low-level sampling toolbox for code that must
//! draw statistically unbiased samples from very large or streaming
//! populations (telemetry down-sampling, load shedding, randomized assignment)
//! without buffering the population.
//!
//! Exposed modules:
//! - `range`: uniform integers in `[0, n)` without modulo bias.
//! - `shuffle`: Fisher–Yates permutations on top of `range`.
//! - `reservoir`: Algorithm L index sampling from a virtual population.
//! - `varopt`: weighted reservoir sampling over an unbounded stream.
//! - `sums`: compensated (Kahan / Neumaier) summation.
//! - `source`: the word-source capability and uniform floats.
//!
//! Every sampler consumes 64-bit words from any [`rand::RngCore`] the caller
//! lends it. Results are reproducible for a fixed generator and seed.
//!
//! None of the samplers are safe to share between threads mid-call; shard
//! instead, one sampler per producer.

#![forbid(unsafe_code)]

pub mod range;
pub mod reservoir;
pub mod shuffle;
pub mod source;
pub mod sums;
pub mod varopt;

pub use range::{index, uint32n, uint64n};
pub use reservoir::{sample, sample_into, sample_u32_into, sample_u64_into, sample_with_rng};
pub use shuffle::{shuffle, shuffle_with};
pub use source::{float64, open01, Constant, WordSource};
pub use sums::{Kahan, Neumaier};
pub use varopt::{Varopt, VaroptError};
