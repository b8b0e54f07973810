//! Configuration for `Hashtable` construction

use crate::{
    Hashtable,
    error::{Result, TableError},
    probe::ProbeStrategy,
};

/// Slot count requested when none is given
pub const DEFAULT_CAPACITY: usize = 11;
/// Highest load factor allowed after an insertion, unless configured otherwise
pub const DEFAULT_MAX_LOAD: f64 = 0.6;

/// A builder for [`Hashtable`], allowing you to specify capacity, probing strategy
/// and maximum load factor.
///
/// ```rust
/// use prime_probe::{Hashtable, HashtableBuilder, ProbeStrategy};
///
/// let table: Hashtable<u32> = HashtableBuilder::new()
///     .with_capacity(100)
///     .with_strategy(ProbeStrategy::DoubleHash)
///     .with_max_load(0.5)
///     .build()
///     .unwrap();
///
/// assert_eq!(table.capacity(), 101);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HashtableBuilder {
    /// Requested slot count, rounded up to a prime on build
    capacity: usize,
    /// Collision-resolution strategy
    strategy: ProbeStrategy,
    /// Highest load factor allowed after an insertion
    max_load: f64,
}

impl Default for HashtableBuilder {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            strategy: ProbeStrategy::default(),
            max_load: DEFAULT_MAX_LOAD,
        }
    }
}

impl HashtableBuilder {
    /// Create a new builder with default parameters
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the initial capacity (will be rounded up to the next prime)
    #[must_use]
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Sets the collision resolution strategy
    #[must_use]
    pub fn with_strategy(mut self, strategy: ProbeStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Sets the maximum load factor. It must lie in `(0, 1]`.
    #[must_use]
    pub fn with_max_load(mut self, max_load: f64) -> Self {
        self.max_load = max_load;
        self
    }

    /// Requested capacity
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Configured strategy
    #[must_use]
    pub fn strategy(&self) -> ProbeStrategy {
        self.strategy
    }

    /// Configured maximum load factor
    #[must_use]
    pub fn max_load(&self) -> f64 {
        self.max_load
    }

    /// Allocates the table
    ///
    /// # Errors
    ///
    /// - [`TableError::InvalidCapacity`] if the capacity is zero
    /// - [`TableError::InvalidLoadFactor`] if the maximum load is not in `(0, 1]`
    /// - [`TableError::CapacityOverflow`] if the prime slot count cannot be allocated
    pub fn build<V>(self) -> Result<Hashtable<V>> {
        if self.capacity == 0 {
            return Err(TableError::InvalidCapacity { requested: self.capacity });
        }
        if !(self.max_load > 0.0 && self.max_load <= 1.0) {
            return Err(TableError::InvalidLoadFactor { value: self.max_load });
        }
        Hashtable::with_config(self.capacity, self.strategy, self.max_load)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let builder = HashtableBuilder::new();
        assert_eq!(builder.capacity(), DEFAULT_CAPACITY);
        assert_eq!(builder.strategy(), ProbeStrategy::Linear);
        assert!((builder.max_load() - DEFAULT_MAX_LOAD).abs() < f64::EPSILON);
    }

    #[test]
    fn test_build_applies_settings() {
        let table: Hashtable<u8> = HashtableBuilder::new()
            .with_capacity(24)
            .with_strategy(ProbeStrategy::Quadratic)
            .with_max_load(1.0)
            .build()
            .unwrap();

        assert_eq!(table.capacity(), 29);
        assert_eq!(table.probe_strategy(), ProbeStrategy::Quadratic);
        assert!((table.max_load() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_build_rejects_invalid_settings() {
        let zero = HashtableBuilder::new().with_capacity(0).build::<u8>();
        assert_eq!(zero.unwrap_err(), TableError::InvalidCapacity { requested: 0 });

        let negative = HashtableBuilder::new().with_max_load(-1.0).build::<u8>();
        assert_eq!(negative.unwrap_err(), TableError::InvalidLoadFactor { value: -1.0 });

        let nan = HashtableBuilder::new().with_max_load(f64::NAN).build::<u8>();
        assert!(matches!(nan, Err(TableError::InvalidLoadFactor { .. })));
    }
}
