//! Strided reduction.

use std::hint::black_box;

use crate::config::StrideConfig;
use crate::error::Result;
use crate::rng::XorShift64;

/// Upper bound of the fill values, matching a C `rand()` with 31-bit range.
const FILL_MAX: u64 = i32::MAX as u64;

/// Backing array for the strided sum.
#[derive(Debug, Clone)]
pub struct StridedArray {
    values: Vec<f64>,
}

impl StridedArray {
    /// `len` pseudo-random non-negative integers in `0..=i32::MAX`, stored
    /// as `f64`.
    pub fn random(len: usize, seed: Option<u64>) -> Result<Self> {
        let mut rng = XorShift64::seeded_or_entropy(seed)?;
        let values = (0..len).map(|_| rng.below(FILL_MAX + 1) as f64).collect();
        Ok(Self { values })
    }

    #[must_use]
    pub fn from_values(values: Vec<f64>) -> Self {
        Self { values }
    }

    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Sum of the elements at `0, s, 2s, ...` below the length.
    #[must_use]
    pub fn sum(&self, config: StrideConfig) -> f64 {
        strided_sum(&self.values, config.stride())
    }

    /// Timed operation: strided sum with the result marked observed.
    pub fn measure(&self, config: StrideConfig) {
        black_box(self.sum(config));
    }
}

/// Sum every `stride`-th element starting at index 0. `stride` must be
/// positive.
#[must_use]
pub fn strided_sum(values: &[f64], stride: usize) -> f64 {
    let mut sum = 0.0;
    let mut ix = 0;
    while ix < values.len() {
        sum += values[ix];
        ix += stride;
    }
    sum
}
