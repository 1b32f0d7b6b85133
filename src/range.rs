//! Uniform integers in `[0, n)` without modulo bias.
//!
//! Uses Lemire's debiased multiply-shift: the widening product of a random
//! word and `n` has a high half in `[0, n)` and a low half that tells whether
//! the word fell in the small, over-represented zone at the bottom of each
//! bucket. Only then is the (rarely nonzero) rejection zone computed, and the
//! word redrawn until it lands outside it.
//!
//! ## References
//!
//! - Lemire (2019): *Fast Random Integer Generation in an Interval*, ACM TOMACS,
//!   algorithm 5. <https://arxiv.org/abs/1805.10941>
//!
//! Notes:
//! - Expected words per call is `1 + o(1)`; no division happens on the fast path.
//! - The 32-bit path is cheaper, the 64-bit one covers ranges above `u32::MAX`.

use rand::RngCore;

/// A uniform integer in `[0, n)`, using the low 32 bits of each word.
///
/// # Panics
///
/// Panics if `n == 0`.
#[inline]
pub fn uint32n<R: RngCore + ?Sized>(rng: &mut R, n: u32) -> u32 {
    assert!(n > 0, "uint32n: n must be > 0");

    let mut m = (rng.next_u64() as u32 as u64) * n as u64;
    if (m as u32) < n {
        let zone = n.wrapping_neg() % n;
        while (m as u32) < zone {
            m = (rng.next_u64() as u32 as u64) * n as u64;
        }
    }
    (m >> 32) as u32
}

/// A uniform integer in `[0, n)`, using the full 64-bit word.
///
/// # Panics
///
/// Panics if `n == 0`.
#[inline]
pub fn uint64n<R: RngCore + ?Sized>(rng: &mut R, n: u64) -> u64 {
    assert!(n > 0, "uint64n: n must be > 0");

    let mut m = (rng.next_u64() as u128) * n as u128;
    if (m as u64) < n {
        let zone = n.wrapping_neg() % n;
        while (m as u64) < zone {
            m = (rng.next_u64() as u128) * n as u128;
        }
    }
    (m >> 64) as u64
}

/// A uniform index in `[0, n)`.
///
/// Always takes the 64-bit path: on 64-bit targets one wide multiply is
/// cheaper than narrowing the word first.
///
/// # Panics
///
/// Panics if `n == 0`.
#[inline]
pub fn index<R: RngCore + ?Sized>(rng: &mut R, n: usize) -> usize {
    assert!(n > 0, "index: n must be > 0");
    uint64n(rng, n as u64) as usize
}
