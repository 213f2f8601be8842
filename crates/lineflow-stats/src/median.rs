//! Quickselect median for continuously growing sample lists.
//!
//! A full sort per query would cost O(n log n) on a list that only ever
//! grows; quickselect with a randomized pivot answers each median query in
//! expected O(n) instead. The partition compares against the pivot value
//! with explicit three-way handling of ties, so heavily duplicated inputs
//! (common for delays measured in whole minutes) cannot degrade the split.

use crate::Fixed64;
use crate::rng::PivotRng;

/// Computes medians over `i64` samples via randomized quickselect.
#[derive(Debug, Clone)]
pub struct MedianSelector {
    rng: PivotRng,
}

impl MedianSelector {
    /// Create a selector with the given pivot seed. The seed only affects
    /// pivot order, never results.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: PivotRng::new(seed),
        }
    }

    /// The median of `values`, or `None` when empty.
    ///
    /// For an even-sized input this is the average of the two middle order
    /// statistics, which is why the result is fixed-point rather than `i64`.
    pub fn median(&mut self, values: &[i64]) -> Option<Fixed64> {
        let n = values.len();
        if n == 0 {
            return None;
        }
        if n % 2 == 1 {
            Some(Fixed64::from_num(self.select(values, n / 2)))
        } else {
            let lower = self.select(values, n / 2 - 1);
            let upper = self.select(values, n / 2);
            Some((Fixed64::from_num(lower) + Fixed64::from_num(upper)) / Fixed64::from_num(2))
        }
    }

    /// The `k`-th order statistic (0-based) of `values`.
    ///
    /// # Panics
    ///
    /// Panics if `k >= values.len()`.
    fn select(&mut self, values: &[i64], mut k: usize) -> i64 {
        assert!(k < values.len(), "order statistic out of range");
        let mut pool = values.to_vec();
        loop {
            if pool.len() == 1 {
                return pool[0];
            }
            let pivot = pool[self.rng.below(pool.len())];

            // Three-way partition around the pivot value.
            let mut below = Vec::new();
            let mut above = Vec::new();
            let mut ties = 0usize;
            for &v in &pool {
                if v < pivot {
                    below.push(v);
                } else if v > pivot {
                    above.push(v);
                } else {
                    ties += 1;
                }
            }

            if k < below.len() {
                pool = below;
            } else if k < below.len() + ties {
                return pivot;
            } else {
                k -= below.len() + ties;
                pool = above;
            }
        }
    }
}
