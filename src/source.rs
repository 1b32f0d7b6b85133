//! Random word sources and the uniform float derived from them.
//!
//! Every sampler in this crate consumes nothing but uniform 64-bit words, taken
//! through [`rand::RngCore::next_u64`]. Any `rand` generator works; the
//! generator is owned by the caller and borrowed for the duration of a call.
//!
//! [`WordSource`] adds the one extra capability the samplers assume of a
//! source outside a call: reseeding from a 64-bit value, so a run can be
//! reproduced.

use rand::{RngCore, SeedableRng};

/// 2^-53, the spacing of the floats produced by [`float64`].
const EPSILON53: f64 = 1.0 / (1u64 << 53) as f64;

/// A reseedable source of uniform 64-bit words.
///
/// Implemented for every seedable `rand` generator: reseeding replaces the
/// generator with `R::seed_from_u64(seed)`.
pub trait WordSource: RngCore {
    /// Reset the source to the deterministic state derived from `seed`.
    fn reseed(&mut self, seed: u64);
}

impl<R: RngCore + SeedableRng> WordSource for R {
    fn reseed(&mut self, seed: u64) {
        *self = R::seed_from_u64(seed);
    }
}

/// A degenerate source that returns the same word forever.
///
/// Makes every draw deterministic, which is useful for pinning down edge
/// cases of the range reduction. Reseeding sets the word.
///
/// A constant word can make rejection loops spin forever (e.g. word `0` with a
/// range that is not a power of two); only use it where the outcome is known.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Constant(pub u64);

impl Constant {
    /// A source that always yields `word`.
    pub fn new(word: u64) -> Self {
        Self(word)
    }
}

impl RngCore for Constant {
    fn next_u32(&mut self) -> u32 {
        self.0 as u32
    }

    fn next_u64(&mut self) -> u64 {
        self.0
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        let bytes = self.0.to_le_bytes();
        for chunk in dst.chunks_mut(8) {
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }
}

impl SeedableRng for Constant {
    type Seed = [u8; 8];

    fn from_seed(seed: Self::Seed) -> Self {
        Self(u64::from_le_bytes(seed))
    }

    // The word is the seed itself, not a scrambled derivative of it.
    fn seed_from_u64(state: u64) -> Self {
        Self(state)
    }
}

/// A uniform float in `[0, 1)` from exactly one word.
///
/// Takes the high 53 bits of the word and scales them by 2^-53 (Vigna's
/// recipe), so every representable output is equally likely.
#[inline]
pub fn float64<R: RngCore + ?Sized>(rng: &mut R) -> f64 {
    (rng.next_u64() >> 11) as f64 * EPSILON53
}

/// A uniform float in the open interval `(0, 1)`.
///
/// Redraws on an exact zero (probability 2^-53 per draw), so the result is
/// always safe to take the logarithm of.
#[inline]
pub fn open01<R: RngCore + ?Sized>(rng: &mut R) -> f64 {
    loop {
        let x = float64(rng);
        if x != 0.0 {
            return x;
        }
    }
}
