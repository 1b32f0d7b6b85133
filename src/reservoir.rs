//! Uniform reservoir sampling of indices.
//!
//! Draws a simple random sample of `k` distinct integers from `[0, n)` in one
//! pass over a *virtual* population: nothing of size `n` is ever materialized.
//!
//! Uses **Algorithm L** (Li, 1994). The reservoir starts as `0..k`; each round
//! draws a geometric jump straight to the next index that replaces a slot, so
//! the indices in between cost nothing. Expected work is O(k * (1 + log(n/k)))
//! draws, independent of `n` beyond the logarithm.
//!
//! ## References
//!
//! - Vitter (1985): reservoir sampling "Algorithm R".
//! - Li (1994): *Reservoir-Sampling Algorithms of Time Complexity
//!   O(n(1+log(N/n)))*, ACM TOMS. <https://doi.org/10.1145/198429.198435>
//!
//! Notes:
//! - Samples are appended to a caller buffer and are **not** sorted.
//! - `k > n` yields all `n` indices; `k == 0` appends nothing.
//! - [`sample`] uses the thread RNG; the other entry points borrow a caller's
//!   generator, so a seeded one replays the same indices.

use rand::RngCore;

use crate::range::{uint32n, uint64n};
use crate::source::open01;

/// Sample `min(k, n)` distinct indices from `[0, n)` using the thread RNG.
pub fn sample(k: usize, n: usize) -> Vec<usize> {
    let mut rng = rand::rng();
    sample_with_rng(k, n, &mut rng)
}

/// Sample `min(k, n)` distinct indices from `[0, n)`, using a caller-supplied RNG.
pub fn sample_with_rng<R: RngCore + ?Sized>(k: usize, n: usize, rng: &mut R) -> Vec<usize> {
    let mut buf = Vec::with_capacity(k.min(n));
    sample_into(k, n, rng, &mut buf);
    buf
}

/// Append a sample of `min(k, n)` distinct indices from `[0, n)` to `buf`.
///
/// Existing contents of `buf` are left untouched.
pub fn sample_into<R: RngCore + ?Sized>(k: usize, n: usize, rng: &mut R, buf: &mut Vec<usize>) {
    algorithm_l(k, n as u64, rng, buf, |i| i as usize);
}

/// Append a sample of `min(k, n)` distinct `u32`s from `[0, n)` to `buf`.
pub fn sample_u32_into<R: RngCore + ?Sized>(k: usize, n: u32, rng: &mut R, buf: &mut Vec<u32>) {
    algorithm_l(k, n as u64, rng, buf, |i| i as u32);
}

/// Append a sample of `min(k, n)` distinct `u64`s from `[0, n)` to `buf`.
///
/// Works for populations far beyond what could be stored, e.g. `n = 10^18`.
pub fn sample_u64_into<R: RngCore + ?Sized>(k: usize, n: u64, rng: &mut R, buf: &mut Vec<u64>) {
    algorithm_l(k, n, rng, buf, |i| i);
}

fn algorithm_l<T, R, F>(k: usize, n: u64, rng: &mut R, buf: &mut Vec<T>, from_index: F)
where
    R: RngCore + ?Sized,
    F: Fn(u64) -> T,
{
    let k = (k as u64).min(n);
    if k == 0 {
        return;
    }

    let start = buf.len();
    buf.extend((0..k).map(&from_index));
    let slots = &mut buf[start..];

    // The cursor is kept in floating point: skips can overshoot u64 near the end.
    let kf = k as f64;
    let nf = n as f64;
    let mut w = 1.0f64;
    let mut i = kf;

    loop {
        w *= (open01(rng).ln() / kf).exp();
        i += 1.0 + (open01(rng).ln() / (-w).ln_1p()).floor();
        if i >= nf {
            break;
        }

        let j = if n <= u32::MAX as u64 {
            uint32n(rng, k as u32) as usize
        } else {
            uint64n(rng, k) as usize
        };
        slots[j] = from_index(i as u64);
    }
}
