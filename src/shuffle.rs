//! Fisher–Yates (Durstenfeld) shuffling.
//!
//! Index draws go through [`crate::range`], so every one of the `n!`
//! permutations is exactly equally likely given a uniform source.
//!
//! ## References
//!
//! - Knuth (1997): *TAOCP* Vol. 2, §3.4.2, Algorithm P.

use rand::RngCore;

use crate::range::{uint32n, uint64n};

/// Randomly permute `n` logical positions through a swap callback.
///
/// Walks `i` from `n - 1` down to `1`, draws `j` uniformly from `[0, i]` and
/// calls `swap(i, j)` unless `i == j`. `n == 0` and `n == 1` never call `swap`.
///
/// Draws for `i + 1 > u32::MAX` use the 64-bit range reduction; all others the
/// cheaper 32-bit one.
pub fn shuffle_with<R, F>(rng: &mut R, n: usize, mut swap: F)
where
    R: RngCore + ?Sized,
    F: FnMut(usize, usize),
{
    if n == 0 {
        return;
    }

    let narrow = u32::MAX as usize;

    let mut i = n - 1;
    while i >= narrow {
        let j = uint64n(rng, i as u64 + 1) as usize;
        if i != j {
            swap(i, j);
        }
        i -= 1;
    }

    for i in (1..=i).rev() {
        let j = uint32n(rng, i as u32 + 1) as usize;
        if i != j {
            swap(i, j);
        }
    }
}

/// Shuffle a slice in place.
///
/// # Complexity
/// Time: O(n), Space: O(1)
pub fn shuffle<T, R: RngCore + ?Sized>(slice: &mut [T], rng: &mut R) {
    shuffle_with(rng, slice.len(), |i, j| slice.swap(i, j));
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::collections::HashSet;

    #[test]
    fn swaps_stay_below_i() {
        const N: usize = 9999;

        let mut calls = 0usize;
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        shuffle_with(&mut rng, N, |i, j| {
            calls += 1;
            assert!(i < N);
            assert!(j < i);
        });
        assert!(calls < N);
        assert!(calls > 0);
    }

    #[test]
    fn empty_and_single_do_nothing() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        shuffle_with(&mut rng, 0, |_, _| panic!("swap on empty"));
        shuffle_with(&mut rng, 1, |_, _| panic!("swap on single"));

        let mut v: Vec<i32> = vec![];
        shuffle(&mut v, &mut rng);
        let mut one = [42];
        shuffle(&mut one, &mut rng);
        assert_eq!(one, [42]);
    }

    #[test]
    fn reaches_every_permutation_of_seven() {
        let mut a = [1u8, 2, 3, 4, 5, 6, 7];
        let mut perms = HashSet::new();
        let mut rng = ChaCha8Rng::seed_from_u64(126);

        let mut rounds = 0;
        while perms.len() < 5040 {
            shuffle(&mut a, &mut rng);
            perms.insert(a);
            rounds += 1;
            assert!(rounds < 1_000_000, "only {} permutations seen", perms.len());
        }
    }

    #[test]
    fn first_position_is_uniform() {
        let mut rng = ChaCha8Rng::seed_from_u64(77);
        let mut counts = [0usize; 5];
        let trials = 50_000;
        for _ in 0..trials {
            let mut v = [0usize, 1, 2, 3, 4];
            shuffle(&mut v, &mut rng);
            counts[v[0]] += 1;
        }
        let expected = trials as f64 / 5.0;
        for &c in &counts {
            assert!((c as f64 - expected).abs() / expected < 0.05, "{counts:?}");
        }
    }

    #[test]
    fn same_seed_same_permutation() {
        let mut a: Vec<u32> = (0..100).collect();
        let mut b = a.clone();
        shuffle(&mut a, &mut ChaCha8Rng::seed_from_u64(5));
        shuffle(&mut b, &mut ChaCha8Rng::seed_from_u64(5));
        assert_eq!(a, b);
    }
}
