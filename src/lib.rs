//! # Prime Probe
//!
//! An open-addressing hash table from string keys to values of any type.
//!
//! Entries live directly in a slot array whose length is always prime. On a
//! collision the table walks the key's probe sequence under one of three
//! strategies, chosen when the table is built:
//!
//! - `Linear`: step to the next slot
//! - `Quadratic`: step by the square of the step number
//! - `DoubleHash`: step by a second hash of the key, always in `1..=8`
//!
//! The table grows to the smallest prime at least twice its size whenever an
//! insertion would push the load factor past the maximum (0.6 by default).
//! There is no removal.
//!
//! ## Basic Usage
//!
//! ```rust
//! use prime_probe::{Hashtable, ProbeStrategy};
//!
//! // Capacity 5 is already prime
//! let mut table = Hashtable::with_strategy(5, ProbeStrategy::Linear).unwrap();
//!
//! // Insert values
//! table.put("apple", 1).unwrap();
//! table.put("banana", 2).unwrap();
//!
//! // Retrieve values
//! assert_eq!(table.get("apple"), Some(&1));
//! assert!(!table.has_key("cherry"));
//!
//! // Update values
//! assert_eq!(table.put("apple", 10).unwrap(), Some(1));
//! assert_eq!(table.get("apple"), Some(&10));
//!
//! // A third entry would leave 3/5 slots occupied, which the default 0.6 allows
//! table.put("cherry", 3).unwrap();
//! assert_eq!(table.capacity(), 5);
//!
//! // A fourth would not, so the table grows to the next prime >= 10
//! table.put("date", 4).unwrap();
//! assert_eq!(table.capacity(), 11);
//! ```
//!
//! ## Configuration
//!
//! ```rust
//! use prime_probe::{Hashtable, HashtableBuilder, ProbeStrategy, TableError};
//!
//! let table: Hashtable<String> = HashtableBuilder::new()
//!     .with_capacity(20)
//!     .with_strategy(ProbeStrategy::Quadratic)
//!     .with_max_load(0.5)
//!     .build()
//!     .unwrap();
//! assert_eq!(table.capacity(), 23);
//!
//! let err = Hashtable::<String>::new(0).unwrap_err();
//! assert_eq!(err, TableError::InvalidCapacity { requested: 0 });
//! ```

/// Module implementing the builder used to configure a table
mod builder;
/// Module defining the crate error type
mod error;
/// Module implementing the primary and secondary hash functions
mod hashing;
/// Module implementing the primality helpers used for sizing
mod prime;
/// Module implementing probe-sequence generation
mod probe;
/// Module implementing the hash table engine
mod table;
/// Utility functions for building tables
mod utils;

pub use builder::{DEFAULT_CAPACITY, DEFAULT_MAX_LOAD, HashtableBuilder};
pub use error::{Result, TableError};
pub use hashing::{DOUBLE_HASH_K, primary_hash, secondary_hash};
pub use prime::{is_prime, next_prime};
pub use probe::{ProbeSeq, ProbeStrategy};
pub use table::{Hashtable, Iter};
pub use utils::from_pairs;
