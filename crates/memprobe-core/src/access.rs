//! Access-order probe.
//!
//! Traverses one backing array through forward, reverse and shuffled index
//! sequences. The three orders visit the same elements; only the order, and
//! therefore the cache and prefetcher behavior, differs.

use std::hint::black_box;

use crate::error::Result;
use crate::rng::XorShift64;

/// Index order used to traverse the backing array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccessOrder {
    Forward,
    Reverse,
    Shuffled,
}

impl AccessOrder {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Forward => "forward_linear",
            Self::Reverse => "reverse_linear",
            Self::Shuffled => "random",
        }
    }

    #[must_use]
    pub const fn all() -> [Self; 3] {
        [Self::Forward, Self::Reverse, Self::Shuffled]
    }
}

/// Backing array plus one index sequence over it.
#[derive(Debug, Clone)]
pub struct AccessProbe {
    values: Vec<i64>,
    indices: Vec<usize>,
    order: AccessOrder,
}

impl AccessProbe {
    /// Build a probe over `len` sequential values.
    ///
    /// `seed` fixes the shuffled permutation; `None` draws a fresh seed from
    /// the OS so the permutation differs run to run. The seed is ignored for
    /// the linear orders.
    pub fn new(len: usize, order: AccessOrder, seed: Option<u64>) -> Result<Self> {
        let values: Vec<i64> = (0..len as i64).collect();
        let mut indices: Vec<usize> = (0..len).collect();
        match order {
            AccessOrder::Forward => {}
            AccessOrder::Reverse => indices.reverse(),
            AccessOrder::Shuffled => XorShift64::seeded_or_entropy(seed)?.shuffle(&mut indices),
        }
        Ok(Self {
            values,
            indices,
            order,
        })
    }

    #[must_use]
    pub fn order(&self) -> AccessOrder {
        self.order
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[must_use]
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Timed operation: load every element once through the index
    /// sequence, each load marked observed.
    pub fn traverse(&self) {
        for &ix in &self.indices {
            black_box(self.values[ix]);
        }
    }

    /// Traverse and return the wrapping sum of the visited values.
    #[must_use]
    pub fn visited_sum(&self) -> i64 {
        self.indices
            .iter()
            .fold(0i64, |acc, &ix| acc.wrapping_add(black_box(self.values[ix])))
    }
}
