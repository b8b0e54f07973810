//! Error type shared by every fallible `Hashtable` operation

use thiserror::Error;

/// Errors reported by `Hashtable` construction and insertion.
///
/// A missing key is not an error: lookups return `Option`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TableError {
    /// The requested initial capacity was zero
    #[error("invalid capacity: requested {requested} slots, at least 1 is required")]
    InvalidCapacity {
        /// The capacity the caller asked for
        requested: usize,
    },

    /// The maximum load factor is not a finite value in `(0, 1]`
    #[error("invalid maximum load factor: {value}, expected a value in (0, 1]")]
    InvalidLoadFactor {
        /// The rejected load factor
        value: f64,
    },

    /// No prime slot count at or above `requested` can be represented or allocated
    #[error("capacity overflow: cannot allocate a prime number of slots >= {requested}")]
    CapacityOverflow {
        /// The slot count that could not be satisfied
        requested: usize,
    },

    /// The probe sequence for `key` completed a full period without reaching
    /// the key or a free slot
    #[error("probe sequence exhausted for key {key:?} after {probes} probes (capacity {capacity})")]
    ProbeExhausted {
        /// The key being inserted
        key: String,
        /// Number of slots inspected before giving up
        probes: usize,
        /// Table capacity at the time of the walk
        capacity: usize,
    },
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, TableError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_offending_values() {
        let err = TableError::InvalidCapacity { requested: 0 };
        assert!(err.to_string().contains("requested 0 slots"));

        let err = TableError::ProbeExhausted { key: "d".to_string(), probes: 30, capacity: 5 };
        let message = err.to_string();
        assert!(message.contains("\"d\""));
        assert!(message.contains("30 probes"));
        assert!(message.contains("capacity 5"));
    }
}
