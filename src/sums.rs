//! Compensated floating-point summation.
//!
//! Naive summation of many small increments into a large running total loses
//! the low-order bits of every addend. Both accumulators here carry the lost
//! part in a separate correction term, which bounds the total error by a few
//! ulps regardless of how many values were added.
//!
//! ## References
//!
//! - Kahan (1965): *Further remarks on reducing truncation errors*.
//! - Neumaier (1974): *Rundungsfehleranalyse einiger Verfahren zur Summation
//!   endlicher Summen*.
//!
//! Notes:
//! - [`Neumaier`] also handles addends larger in magnitude than the running sum,
//!   which is the case when a sum crosses zero. The weighted reservoir relies on
//!   that.

/// Classic Kahan summation.
///
/// The correction holds the low-order part lost by the last addition and is
/// folded into the next addend.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Kahan {
    sum: f64,
    c: f64,
}

impl Kahan {
    /// An accumulator holding `x`.
    pub fn new(x: f64) -> Self {
        Self { sum: x, c: 0.0 }
    }

    /// Add `x` to the running total.
    #[inline]
    pub fn add(&mut self, x: f64) {
        let y = x + self.c;
        let t = self.sum + y;
        self.c = y - (t - self.sum);
        self.sum = t;
    }

    /// Reset the total to `x` and clear the correction.
    #[inline]
    pub fn set(&mut self, x: f64) {
        self.sum = x;
        self.c = 0.0;
    }

    /// The compensated total.
    #[inline]
    pub fn value(&self) -> f64 {
        self.sum + self.c
    }
}

impl Extend<f64> for Kahan {
    fn extend<I: IntoIterator<Item = f64>>(&mut self, iter: I) {
        for x in iter {
            self.add(x);
        }
    }
}

/// Neumaier's improved Kahan–Babuška summation.
///
/// Unlike [`Kahan`], the rounding error of each step is taken from whichever of
/// the running sum and the addend has the greater magnitude, so a large addend
/// does not wipe out the accumulated correction.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Neumaier {
    sum: f64,
    c: f64,
}

impl Neumaier {
    /// An accumulator holding `x`.
    pub fn new(x: f64) -> Self {
        Self { sum: x, c: 0.0 }
    }

    /// Add `x` to the running total.
    #[inline]
    pub fn add(&mut self, x: f64) {
        let t = self.sum + x;
        if self.sum.abs() >= x.abs() {
            self.c += (self.sum - t) + x;
        } else {
            self.c += (x - t) + self.sum;
        }
        self.sum = t;
    }

    /// Reset the total to `x` and clear the correction.
    #[inline]
    pub fn set(&mut self, x: f64) {
        self.sum = x;
        self.c = 0.0;
    }

    /// The compensated total.
    #[inline]
    pub fn value(&self) -> f64 {
        self.sum + self.c
    }
}

impl Extend<f64> for Neumaier {
    fn extend<I: IntoIterator<Item = f64>>(&mut self, iter: I) {
        for x in iter {
            self.add(x);
        }
    }
}

impl FromIterator<f64> for Neumaier {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        let mut acc = Self::default();
        acc.extend(iter);
        acc
    }
}
