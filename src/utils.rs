//! Utility functions for building `Hashtable`s

use crate::{Hashtable, HashtableBuilder, ProbeStrategy, error::Result};

/// Creates a `Hashtable` from an iterator of key-value pairs.
///
/// The table starts at the default capacity and grows as the pairs arrive.
/// Later pairs overwrite earlier ones with the same key.
///
/// # Errors
///
/// Returns the first error reported by [`Hashtable::put`].
pub fn from_pairs<K, V, I>(pairs: I, strategy: ProbeStrategy) -> Result<Hashtable<V>>
where
    K: Into<String>,
    I: IntoIterator<Item = (K, V)>,
{
    let mut table = HashtableBuilder::new().with_strategy(strategy).build()?;
    table.try_extend(pairs)?;
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_pairs() {
        let data = vec![("a".to_string(), 1), ("b".to_string(), 2), ("c".to_string(), 3)];

        let table = from_pairs(data, ProbeStrategy::Quadratic).unwrap();

        assert_eq!(table.get("a"), Some(&1));
        assert_eq!(table.get("b"), Some(&2));
        assert_eq!(table.get("c"), Some(&3));
        assert_eq!(table.len(), 3);
        assert_eq!(table.probe_strategy(), ProbeStrategy::Quadratic);
    }

    #[test]
    fn test_from_pairs_last_value_wins() {
        let table = from_pairs([("a", 1), ("a", 2)], ProbeStrategy::Linear).unwrap();

        assert_eq!(table.len(), 1);
        assert_eq!(table.get("a"), Some(&2));
    }

    #[test]
    fn test_from_pairs_grows_past_default_capacity() {
        let pairs = (0..100).map(|i| (format!("key-{i}"), i));
        let table = from_pairs(pairs, ProbeStrategy::DoubleHash).unwrap();

        assert_eq!(table.len(), 100);
        assert!(table.capacity() > 100);
        assert!((0..100).all(|i| table.get(&format!("key-{i}")) == Some(&i)));
    }
}
