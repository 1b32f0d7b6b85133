//! Weighted reservoir sampling (Varopt).
//!
//! Maintains a fixed-size sample over a stream of `(item, weight)` pairs of
//! unknown length, where each item's inclusion probability is proportional to
//! its weight (capped at certainty for items heavier than the threshold).
//!
//! The reservoir is split around a threshold `t`:
//!
//! - **large**: items heavier than `t`, kept with certainty, in a min-heap on
//!   weight so the lightest of them can be demoted cheaply;
//! - **small**: items at or below `t`, each standing in for weight `t`.
//!
//! Each admission past the target size moves into an at-risk pool every large
//! item that no longer clears the new threshold, recomputes `t` so that the
//! pool's expected survivor count is right, and evicts exactly one item with
//! probability `1 - w/t`.
//!
//! ## References
//!
//! - Cohen, Duffield, Kaplan, Lund, Thorup (2009): *Stream sampling for
//!   variance-optimal estimation of subset sums*. <https://arxiv.org/abs/0803.0473>
//! - Efraimidis & Spirakis (2006): weighted reservoir sampling (A-Res).
//!
//! Notes:
//! - Running sums are compensated ([`Neumaier`]); the threshold stays stable over
//!   millions of updates.
//! - The total weight shown must stay finite; an admission that would push it
//!   past `f64::MAX` is refused before any state changes.

use log::{debug, warn};
use rand::RngCore;

use crate::range::index;
use crate::source::open01;
use crate::sums::Neumaier;

/// Errors for weighted reservoir sampling.
#[derive(Debug, Clone, PartialEq)]
pub enum VaroptError {
    /// Weight is not finite (NaN/inf).
    NonFiniteWeight(f64),
    /// Weight is negative.
    NegativeWeight(f64),
    /// Adding the weight would overflow the total weight shown so far.
    TotalWeightOverflow(f64),
}

impl std::fmt::Display for VaroptError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NonFiniteWeight(w) => write!(f, "weight must be finite (got {w})"),
            Self::NegativeWeight(w) => write!(f, "weight must be >= 0 (got {w})"),
            Self::TotalWeightOverflow(w) => {
                write!(f, "total weight overflows f64 (adding {w})")
            }
        }
    }
}

impl std::error::Error for VaroptError {}

fn check_weight(weight: f64) -> Result<(), VaroptError> {
    if !weight.is_finite() {
        return Err(VaroptError::NonFiniteWeight(weight));
    }
    if weight < 0.0 {
        return Err(VaroptError::NegativeWeight(weight));
    }
    Ok(())
}

#[derive(Debug, Clone)]
struct Entry<T> {
    value: T,
    weight: f64,
}

/// A weighted reservoir sampler.
///
/// Items are included in the sample with probability proportional to their
/// weight. Once `size` items with nonzero weight have been shown, every further
/// admission evicts exactly one member and hands it back to the caller.
#[derive(Debug, Clone)]
pub struct Varopt<T> {
    // Min-heap on weight.
    large: Vec<Entry<T>>,
    small: Vec<Entry<T>>,
    // At-risk candidates of the admission in progress; empty between calls.
    scratch: Vec<Entry<T>>,
    size: usize,
    threshold: f64,
    // Sum of every admitted weight; bounds the pool sum of any admission.
    total: Neumaier,
}

impl<T> Varopt<T> {
    /// Create a sampler that keeps at most `size` items.
    ///
    /// All storage is allocated up front; `show` never reallocates.
    ///
    /// # Panics
    ///
    /// Panics if `size == usize::MAX`: each buffer holds `size + 1` entries.
    pub fn new(size: usize) -> Self {
        assert!(size < usize::MAX, "Varopt::new: size must be < usize::MAX");
        Self {
            large: Vec::with_capacity(size + 1),
            small: Vec::with_capacity(size + 1),
            scratch: Vec::with_capacity(size + 1),
            size,
            threshold: 0.0,
            total: Neumaier::new(0.0),
        }
    }

    /// Present `item` as a candidate for the sample, using the thread RNG.
    ///
    /// See [`Varopt::show_with_rng`].
    #[inline]
    pub fn show(&mut self, item: T, weight: f64) -> Option<T> {
        let mut rng = rand::rng();
        self.show_with_rng(item, weight, &mut rng)
    }

    /// Present `item` as a candidate for the sample, using a caller-supplied RNG.
    ///
    /// Returns the item that left the sample, if any:
    /// - an item with zero weight is rejected outright and returned as is;
    /// - while the sample is filling up, nothing is evicted and `None` is returned;
    /// - afterwards, exactly one item (possibly `item` itself) is evicted.
    ///
    /// The evicted value is moved out of the sampler and may be reused freely.
    ///
    /// # Panics
    ///
    /// Panics if `weight` is negative or not finite, or if it would push the
    /// total weight shown past `f64::MAX`.
    pub fn show_with_rng<R: RngCore + ?Sized>(
        &mut self,
        item: T,
        weight: f64,
        rng: &mut R,
    ) -> Option<T> {
        if let Err(e) = self.check(weight) {
            panic!("Varopt::show: {e}");
        }
        self.admit(item, weight, rng)
    }

    /// Like [`Varopt::show_with_rng`], but reports a bad weight as an error.
    ///
    /// On error the sampler is unchanged and `item` is dropped.
    pub fn try_show_with_rng<R: RngCore + ?Sized>(
        &mut self,
        item: T,
        weight: f64,
        rng: &mut R,
    ) -> Result<Option<T>, VaroptError> {
        self.check(weight)?;
        Ok(self.admit(item, weight, rng))
    }

    // The pool sum of an admission is bounded by the total weight shown, so a
    // finite total keeps the threshold finite.
    fn check(&self, weight: f64) -> Result<(), VaroptError> {
        check_weight(weight)?;
        if self.size > 0 {
            let mut total = self.total;
            total.add(weight);
            if !total.value().is_finite() {
                return Err(VaroptError::TotalWeightOverflow(weight));
            }
        }
        Ok(())
    }

    fn admit<R: RngCore + ?Sized>(&mut self, item: T, weight: f64, rng: &mut R) -> Option<T> {
        if weight == 0.0 || self.size == 0 {
            return Some(item);
        }
        self.total.add(weight);

        let entry = Entry {
            value: item,
            weight,
        };

        if self.len() < self.size {
            self.large.push(entry);
            if self.large.len() == self.size {
                heapify(&mut self.large);
                debug!(
                    "varopt: reservoir of {} full, lightest weight {}",
                    self.size, self.large[0].weight
                );
            }
            return None;
        }

        let mut wsum = Neumaier::new(self.threshold * self.small.len() as f64);
        let mut scratch = std::mem::take(&mut self.scratch);

        if weight > self.threshold {
            self.large.push(entry);
            let last = self.large.len() - 1;
            up(&mut self.large, last);
        } else {
            scratch.push(entry);
            wsum.add(weight);
        }

        // Demote large items that the new threshold no longer covers.
        while let Some(min) = self.large.first() {
            let pool = (self.small.len() + scratch.len()) as f64 - 1.0;
            if wsum.value() < pool * min.weight {
                break;
            }
            let min = remove_min(&mut self.large);
            wsum.add(min.weight);
            scratch.push(min);
        }

        let t = wsum.value() / ((self.small.len() + scratch.len()) as f64 - 1.0);

        // Walk the new candidates, subtracting each one's eviction probability
        // 1 - w/t, and evict where the running value drops below zero.
        let mut r = Neumaier::new(open01(rng));
        let mut j = 0;
        while j < scratch.len() && r.value() >= 0.0 {
            r.add(-1.0);
            r.add(scratch[j].weight / t);
            j += 1;
        }

        let evicted = if r.value() < 0.0 {
            Some(scratch.swap_remove(j - 1))
        } else if !self.small.is_empty() {
            // Every previous small item has the same eviction probability.
            let i = index(rng, self.small.len());
            Some(self.small.swap_remove(i))
        } else {
            // Only reachable through rounding on the first steady-state call.
            warn!(
                "varopt: eviction walk did not cross zero with no small items, \
                 evicting last candidate"
            );
            scratch.pop()
        };

        self.small.append(&mut scratch);
        self.scratch = scratch;
        self.threshold = t;

        evicted.map(|e| e.value)
    }

    /// The item at index `i` of the current sample.
    ///
    /// Items above the threshold come first, then the rest. The order is stable
    /// until the next `show`.
    ///
    /// # Panics
    ///
    /// Panics if `i >= self.len()`.
    pub fn item(&self, i: usize) -> &T {
        match self.get(i) {
            Some(x) => x,
            None => panic!(
                "Varopt::item: index {i} out of range for sample of length {}",
                self.len()
            ),
        }
    }

    /// The item at index `i`, or `None` if out of range.
    pub fn get(&self, i: usize) -> Option<&T> {
        if i < self.large.len() {
            Some(&self.large[i].value)
        } else {
            self.small.get(i - self.large.len()).map(|e| &e.value)
        }
    }

    /// Iterate over the current sample, in the order of [`Varopt::item`].
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.large.iter().chain(self.small.iter()).map(|e| &e.value)
    }

    /// Consume the sampler, returning the sampled items.
    pub fn into_items(self) -> Vec<T> {
        self.large
            .into_iter()
            .chain(self.small)
            .map(|e| e.value)
            .collect()
    }

    /// Number of items currently in the sample.
    ///
    /// This is the minimum of the target size and the number of items shown
    /// with positive weight.
    pub fn len(&self) -> usize {
        self.large.len() + self.small.len()
    }

    /// Whether the sample is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The target sample size.
    pub fn size(&self) -> usize {
        self.size
    }

    /// The current threshold; zero until the sample first fills up.
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Sum of the positive weights shown so far.
    pub fn total_weight(&self) -> f64 {
        self.total.value()
    }
}

// Binary min-heap on weight over a plain vector, with explicit fix primitives.

fn heapify<T>(h: &mut [Entry<T>]) {
    let n = h.len();
    for i in (0..n / 2).rev() {
        down(h, i, n);
    }
}

fn up<T>(h: &mut [Entry<T>], mut j: usize) {
    while j > 0 {
        let i = (j - 1) / 2;
        if h[j].weight >= h[i].weight {
            break;
        }
        h.swap(i, j);
        j = i;
    }
}

fn down<T>(h: &mut [Entry<T>], i0: usize, n: usize) -> bool {
    let mut i = i0;
    loop {
        let j1 = 2 * i + 1;
        if j1 >= n {
            break;
        }
        let mut j = j1;
        let j2 = j1 + 1;
        if j2 < n && h[j2].weight < h[j1].weight {
            j = j2;
        }
        if h[j].weight >= h[i].weight {
            break;
        }
        h.swap(i, j);
        i = j;
    }
    i > i0
}

/// Restore the heap after the weight at `i` changed.
fn fix<T>(h: &mut [Entry<T>], i: usize) {
    if !down(h, i, h.len()) {
        up(h, i);
    }
}

/// Remove the entry at `i` by swapping in the last one, then fix the heap.
fn remove_at<T>(h: &mut Vec<Entry<T>>, i: usize) -> Entry<T> {
    let x = h.swap_remove(i);
    if i < h.len() {
        fix(h, i);
    }
    x
}

fn remove_min<T>(h: &mut Vec<Entry<T>>) -> Entry<T> {
    remove_at(h, 0)
}
