//! Probe-sequence generation for the three collision-resolution strategies

use std::fmt;

use crate::hashing::{primary_hash, secondary_hash};

/// Collision-resolution strategy, fixed for the lifetime of a table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ProbeStrategy {
    /// Next slot is `(index + 1) mod capacity`
    #[default]
    Linear,
    /// Next slot is `(index + step²) mod capacity`
    Quadratic,
    /// Next slot is `(index + secondary_hash(key)) mod capacity`
    ///
    /// On capacities 2, 3, 5 and 7 a step that is a multiple of the capacity is replaced by 1.
    DoubleHash,
}

impl fmt::Display for ProbeStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Linear => "linear",
            Self::Quadratic => "quadratic",
            Self::DoubleHash => "double-hash",
        };
        f.write_str(name)
    }
}

impl ProbeStrategy {
    /// All strategies, in declaration order
    pub const ALL: [Self; 3] = [Self::Linear, Self::Quadratic, Self::DoubleHash];

    /// Length of one full period of the sequence on a prime `capacity`.
    ///
    /// Linear and double-hash walks cycle after `capacity` probes. Cumulative
    /// square offsets `1² + 2² + … + s²` repeat modulo `p` with a period dividing `6p`.
    #[must_use]
    pub fn period(self, capacity: usize) -> usize {
        match self {
            Self::Linear | Self::DoubleHash => capacity,
            Self::Quadratic => capacity.saturating_mul(6),
        }
    }
}

/// `(a + b) mod m` for `a, b < m` without overflowing
#[allow(clippy::arithmetic_side_effects)]
fn add_mod(a: usize, b: usize, m: usize) -> usize {
    let gap = m - b;
    if a >= gap { a - gap } else { a + b }
}

/// Iterator over the slot indices visited for one key.
///
/// Yields the home slot first with step number 0, and advances the step
/// number by exactly one for every further index. Insertion and lookup both
/// walk this iterator, so the sequence that placed an entry is the sequence
/// that finds it again. The iterator ends after one full period of the
/// strategy so a walk over a table with no reachable free slot terminates.
#[derive(Debug, Clone)]
pub struct ProbeSeq {
    /// Strategy used to advance
    strategy: ProbeStrategy,
    /// Number of slots in the table
    capacity: usize,
    /// Index yielded most recently, or the home slot before the first call
    index: usize,
    /// Step number of `index`
    step: usize,
    /// Double-hash stride reduced modulo capacity
    stride: usize,
    /// Indices left before the period is exhausted
    remaining: usize,
    /// Whether the home slot has been yielded
    started: bool,
}

impl ProbeSeq {
    /// Starts the probe sequence for `key` in a table of `capacity` slots
    #[must_use]
    #[allow(clippy::arithmetic_side_effects)]
    pub fn new(key: &str, capacity: usize, strategy: ProbeStrategy) -> Self {
        let stride = match strategy {
            ProbeStrategy::DoubleHash if capacity > 0 => match secondary_hash(key) % capacity {
                // The step is a multiple of a small prime capacity; walk by one instead of stalling
                0 => 1 % capacity,
                stride => stride,
            },
            _ => 0,
        };

        Self {
            strategy,
            capacity,
            index: primary_hash(key, capacity),
            step: 0,
            stride,
            remaining: strategy.period(capacity),
            started: false,
        }
    }

    /// Step number of the index yielded most recently
    #[must_use]
    pub fn step(&self) -> usize {
        self.step
    }

    /// Number of indices yielded so far
    #[must_use]
    pub fn probes(&self) -> usize {
        if self.started { self.step.saturating_add(1) } else { 0 }
    }

    /// Index following `self.index` at step number `self.step`
    #[allow(clippy::arithmetic_side_effects, clippy::cast_possible_truncation)]
    fn advance(&self) -> usize {
        let offset = match self.strategy {
            ProbeStrategy::Linear => 1 % self.capacity,
            ProbeStrategy::Quadratic => {
                let step = (self.step % self.capacity) as u128;
                // step < capacity, so the reduced square fits back into usize
                ((step * step) % self.capacity as u128) as usize
            }
            ProbeStrategy::DoubleHash => self.stride,
        };
        add_mod(self.index, offset, self.capacity)
    }
}

impl Iterator for ProbeSeq {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining = self.remaining.saturating_sub(1);

        if self.started {
            self.step = self.step.saturating_add(1);
            self.index = self.advance();
        } else {
            self.started = true;
        }
        Some(self.index)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for ProbeSeq {}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;

    #[test]
    fn test_linear_wraps_around() {
        // "a" hashes to 6270 mod 7 = 5
        let seq: Vec<usize> = ProbeSeq::new("a", 7, ProbeStrategy::Linear).take(4).collect();
        assert_eq!(seq, vec![5, 6, 0, 1]);
    }

    #[test]
    fn test_quadratic_adds_square_of_step() {
        let seq: Vec<usize> = ProbeSeq::new("a", 5, ProbeStrategy::Quadratic).take(7).collect();
        // 0, +1, +4, +9, +16, +25, +36 (mod 5)
        assert_eq!(seq, vec![0, 1, 0, 4, 0, 0, 1]);
    }

    #[test]
    fn test_double_hash_uses_secondary_stride() {
        // home 0, secondary_hash("a") = 7
        let seq: Vec<usize> = ProbeSeq::new("a", 11, ProbeStrategy::DoubleHash).take(4).collect();
        assert_eq!(seq, vec![0, 7, 3, 10]);
    }

    #[test]
    fn test_double_hash_never_stalls_on_small_capacity() {
        // secondary_hash("c") = 5, a multiple of capacity 5
        let seq: Vec<usize> = ProbeSeq::new("c", 5, ProbeStrategy::DoubleHash).collect();
        let distinct: HashSet<usize> = seq.iter().copied().collect();
        assert_eq!(distinct.len(), 5);
    }

    #[test]
    fn test_step_advances_by_one_per_probe() {
        let mut seq = ProbeSeq::new("key", 13, ProbeStrategy::Quadratic);
        assert_eq!(seq.probes(), 0);
        for expected in 0..20 {
            assert!(seq.next().is_some());
            assert_eq!(seq.step(), expected);
            assert_eq!(seq.probes(), expected + 1);
        }
    }

    #[test]
    fn test_sequence_ends_after_one_period() {
        assert_eq!(ProbeSeq::new("x", 11, ProbeStrategy::Linear).count(), 11);
        assert_eq!(ProbeSeq::new("x", 11, ProbeStrategy::DoubleHash).count(), 11);
        assert_eq!(ProbeSeq::new("x", 11, ProbeStrategy::Quadratic).count(), 66);
        assert_eq!(ProbeSeq::new("x", 0, ProbeStrategy::Linear).count(), 0);
    }

    #[test]
    fn test_display() {
        assert_eq!(ProbeStrategy::Linear.to_string(), "linear");
        assert_eq!(ProbeStrategy::Quadratic.to_string(), "quadratic");
        assert_eq!(ProbeStrategy::DoubleHash.to_string(), "double-hash");
        assert_eq!(ProbeStrategy::default(), ProbeStrategy::Linear);
    }

    fn any_strategy() -> impl Strategy<Value = ProbeStrategy> {
        prop_oneof![
            Just(ProbeStrategy::Linear),
            Just(ProbeStrategy::Quadratic),
            Just(ProbeStrategy::DoubleHash),
        ]
    }

    proptest! {
        #[test]
        fn prop_sequence_is_deterministic(
            key in "[a-z]{1,12}",
            capacity in prop::sample::select(vec![2usize, 3, 5, 7, 11, 13, 101, 1009]),
            strategy in any_strategy(),
        ) {
            let first: Vec<usize> = ProbeSeq::new(&key, capacity, strategy).collect();
            let second: Vec<usize> = ProbeSeq::new(&key, capacity, strategy).collect();
            prop_assert_eq!(&first, &second);
            prop_assert!(first.iter().all(|&index| index < capacity));
        }

        #[test]
        fn prop_linear_and_double_hash_cover_prime_tables(
            key in "[a-z]{1,12}",
            capacity in prop::sample::select(vec![2usize, 3, 5, 7, 11, 13, 101, 1009]),
        ) {
            for strategy in [ProbeStrategy::Linear, ProbeStrategy::DoubleHash] {
                let visited: HashSet<usize> = ProbeSeq::new(&key, capacity, strategy).collect();
                prop_assert_eq!(visited.len(), capacity);
            }
        }
    }
}
