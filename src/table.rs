use std::{collections::HashSet, mem, slice};

use log::{debug, trace, warn};

use crate::{
    builder::HashtableBuilder,
    error::{Result, TableError},
    prime::next_prime,
    probe::{ProbeSeq, ProbeStrategy},
};

/// A key-value pair stored in an occupied slot
#[derive(Debug, Clone)]
struct Entry<V> {
    /// The key in the key-value pair
    key: String,
    /// The value associated with the key
    value: V,
}

/// One position of the slot array
#[derive(Debug, Clone)]
enum Slot<V> {
    /// Never written; terminates every probe walk that reaches it
    Empty,
    /// Holds an entry
    Occupied(Entry<V>),
}

impl<V> Slot<V> {
    /// The entry held by this slot, if any
    fn entry(&self) -> Option<&Entry<V>> {
        match self {
            Self::Occupied(entry) => Some(entry),
            Self::Empty => None,
        }
    }

    /// Moves the entry out of this slot, if any
    fn into_entry(self) -> Option<Entry<V>> {
        match self {
            Self::Occupied(entry) => Some(entry),
            Self::Empty => None,
        }
    }
}

/// Where a probe walk for a key stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Located {
    /// The key occupies `index`, reached after `probes` inspections
    Found {
        /// Slot holding the key
        index: usize,
        /// Number of slots inspected, the home slot included
        probes: usize,
    },
    /// The key is absent and `index` is the first empty slot of its sequence
    Vacant {
        /// First empty slot of the sequence
        index: usize,
    },
}

/// Walks `seq` until `stop` accepts an index.
///
/// Returns the accepted index with the number of probes spent, or the number
/// of probes in the whole period if no index was accepted.
fn walk(
    seq: ProbeSeq,
    mut stop: impl FnMut(usize) -> bool,
) -> std::result::Result<(usize, usize), usize> {
    let period = seq.len();
    for (probe, index) in seq.enumerate() {
        if stop(index) {
            return Ok((index, probe.saturating_add(1)));
        }
    }
    Err(period)
}

/// Allocates `capacity` empty slots
fn empty_slots<V>(capacity: usize) -> Result<Vec<Slot<V>>> {
    let mut slots = Vec::new();
    slots
        .try_reserve_exact(capacity)
        .map_err(|_| TableError::CapacityOverflow { requested: capacity })?;
    slots.resize_with(capacity, || Slot::Empty);
    Ok(slots)
}

/// Whether holding `len` entries in `capacity` slots exceeds `max_load`
#[allow(clippy::cast_precision_loss)]
fn exceeds_max_load(len: usize, capacity: usize, max_load: f64) -> bool {
    capacity == 0 || len as f64 / capacity as f64 > max_load
}

/// An open-addressing hash table from string keys to values of type `V`.
///
/// The slot count is always prime. Collisions are resolved by walking the
/// key's probe sequence under the table's [`ProbeStrategy`]. Entries can be
/// inserted and overwritten but never removed, so an empty slot always marks
/// the end of a key's chain.
///
/// Before every [`put`](Self::put) the table checks whether one more entry
/// would push the load factor past its maximum (0.6 by default) and, if so,
/// grows to the smallest prime at least twice the current capacity.
///
/// Note: This implementation is not thread-safe. Wrap it in a lock to share it.
#[derive(Debug, Clone)]
pub struct Hashtable<V> {
    /// The slot array; its length is the capacity and is always prime
    slots: Vec<Slot<V>>,
    /// Number of occupied slots
    len: usize,
    /// Collision-resolution strategy, fixed at construction
    strategy: ProbeStrategy,
    /// Highest load factor allowed after an insertion
    max_load: f64,
}

impl<V> Default for Hashtable<V> {
    fn default() -> Self {
        let builder = HashtableBuilder::default();
        let mut slots = Vec::with_capacity(builder.capacity());
        slots.resize_with(builder.capacity(), || Slot::Empty);
        Self { slots, len: 0, strategy: builder.strategy(), max_load: builder.max_load() }
    }
}

impl<V> Hashtable<V> {
    /// Creates a linear-probing table with at least `initial_capacity` slots
    ///
    /// # Errors
    ///
    /// Returns [`TableError::InvalidCapacity`] if `initial_capacity` is zero and
    /// [`TableError::CapacityOverflow`] if the rounded-up capacity cannot be allocated.
    pub fn new(initial_capacity: usize) -> Result<Self> {
        HashtableBuilder::new().with_capacity(initial_capacity).build()
    }

    /// Creates a table with at least `initial_capacity` slots probing with `strategy`
    ///
    /// # Errors
    ///
    /// Same as [`Hashtable::new`].
    pub fn with_strategy(initial_capacity: usize, strategy: ProbeStrategy) -> Result<Self> {
        HashtableBuilder::new().with_capacity(initial_capacity).with_strategy(strategy).build()
    }

    /// Allocates an empty table from already validated settings
    pub(crate) fn with_config(
        requested: usize,
        strategy: ProbeStrategy,
        max_load: f64,
    ) -> Result<Self> {
        let capacity =
            next_prime(requested).ok_or(TableError::CapacityOverflow { requested })?;
        let slots = empty_slots(capacity)?;
        trace!("created {strategy} table with {capacity} slots (requested {requested})");
        Ok(Self { slots, len: 0, strategy, max_load })
    }

    /// Walks the probe sequence of `key` until it reaches the key or an empty slot.
    ///
    /// `Err` carries the number of probes in the exhausted period.
    fn locate(&self, key: &str) -> std::result::Result<Located, usize> {
        let seq = ProbeSeq::new(key, self.slots.len(), self.strategy);
        let (index, probes) = walk(seq, |index| {
            self.slots.get(index).and_then(Slot::entry).is_none_or(|entry| entry.key == key)
        })?;

        match self.slots.get(index) {
            Some(Slot::Occupied(_)) => Ok(Located::Found { index, probes }),
            Some(Slot::Empty) | None => Ok(Located::Vacant { index }),
        }
    }

    /// Store `value` against `key`, overwriting any previous value.
    ///
    /// Grows the table first if one more entry would exceed the maximum load
    /// factor. The check runs even when `key` is already present. Returns the
    /// previous value for `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::ProbeExhausted`] if the key's probe sequence
    /// completes a full period without reaching the key or a free slot, and
    /// [`TableError::CapacityOverflow`] if the table cannot grow. The entry is
    /// not stored in either case.
    pub fn put(&mut self, key: impl Into<String>, value: V) -> Result<Option<V>> {
        self.reserve_one()?;

        let key = key.into();
        match self.locate(&key) {
            Ok(Located::Found { index, .. }) => match self.slots.get_mut(index) {
                Some(Slot::Occupied(entry)) => Ok(Some(mem::replace(&mut entry.value, value))),
                _ => Ok(None),
            },
            Ok(Located::Vacant { index }) => {
                if let Some(slot) = self.slots.get_mut(index) {
                    *slot = Slot::Occupied(Entry { key, value });
                    self.len = self.len.saturating_add(1);
                }
                Ok(None)
            }
            Err(probes) => {
                let capacity = self.capacity();
                warn!(
                    "probe sequence for {key:?} exhausted after {probes} probes (capacity {capacity})"
                );
                Err(TableError::ProbeExhausted { key, probes, capacity })
            }
        }
    }

    /// Retrieve the value stored for `key`
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&V> {
        match self.locate(key) {
            Ok(Located::Found { index, .. }) => {
                self.slots.get(index).and_then(Slot::entry).map(|entry| &entry.value)
            }
            Ok(Located::Vacant { .. }) => None,
            Err(probes) => {
                // The whole period was inspected without meeting the key
                debug!("lookup of {key:?} visited {probes} occupied slots");
                None
            }
        }
    }

    /// Get a mutable reference to the value stored for `key`
    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        match self.locate(key) {
            Ok(Located::Found { index, .. }) => match self.slots.get_mut(index) {
                Some(Slot::Occupied(entry)) => Some(&mut entry.value),
                _ => None,
            },
            _ => None,
        }
    }

    /// Returns true if the table holds a value for `key`
    #[must_use]
    pub fn has_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Number of slots inspected by a lookup of `key`, or `None` if it is absent
    #[must_use]
    pub fn probe_length(&self, key: &str) -> Option<usize> {
        match self.locate(key) {
            Ok(Located::Found { probes, .. }) => Some(probes),
            _ => None,
        }
    }

    /// Returns the number of entries in the table
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the table holds no entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of slots, which is always prime
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Returns the ratio of occupied slots to capacity
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn load_factor(&self) -> f64 {
        self.len as f64 / self.slots.len() as f64
    }

    /// Returns the highest load factor the table allows after an insertion
    #[must_use]
    pub fn max_load(&self) -> f64 {
        self.max_load
    }

    /// Returns the strategy used to resolve collisions
    #[must_use]
    pub fn probe_strategy(&self) -> ProbeStrategy {
        self.strategy
    }

    /// Returns an iterator over the entries in slot order
    #[must_use]
    pub fn iter(&self) -> Iter<'_, V> {
        Iter { slots: self.slots.iter() }
    }

    /// Returns an iterator over the keys in slot order.
    ///
    /// The order changes when the table grows.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.iter().map(|(key, _)| key)
    }

    /// Returns an iterator over the values in slot order
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.iter().map(|(_, value)| value)
    }

    /// Inserts every pair from `pairs`, stopping at the first failure
    ///
    /// # Errors
    ///
    /// Returns the first error reported by [`Hashtable::put`]. Pairs inserted
    /// before the failure stay in the table.
    pub fn try_extend<K, I>(&mut self, pairs: I) -> Result<()>
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        for (key, value) in pairs {
            self.put(key, value)?;
        }
        Ok(())
    }

    /// Grows the table until one more entry fits under the maximum load factor
    fn reserve_one(&mut self) -> Result<()> {
        let pending = self.len.saturating_add(1);
        let mut capacity = self.capacity();
        while exceeds_max_load(pending, capacity, self.max_load) {
            let doubled = capacity
                .checked_mul(2)
                .ok_or(TableError::CapacityOverflow { requested: usize::MAX })?;
            capacity =
                next_prime(doubled).ok_or(TableError::CapacityOverflow { requested: doubled })?;
        }

        if capacity == self.capacity() {
            return Ok(());
        }
        self.resize(capacity)
    }

    /// Moves every entry into a fresh array of `new_capacity` slots.
    ///
    /// Entries are re-placed in slot order along their probe sequences for the
    /// new capacity. The new array is allocated and every placement planned
    /// before anything moves, so a failure leaves the table untouched.
    fn resize(&mut self, new_capacity: usize) -> Result<()> {
        let new_slots = empty_slots(new_capacity)?;
        let mut taken = HashSet::with_capacity(self.len);
        let mut targets = Vec::with_capacity(self.len);

        for entry in self.slots.iter().filter_map(Slot::entry) {
            let seq = ProbeSeq::new(&entry.key, new_capacity, self.strategy);
            let (index, _) = walk(seq, |index| !taken.contains(&index)).map_err(|probes| {
                TableError::ProbeExhausted {
                    key: entry.key.clone(),
                    probes,
                    capacity: new_capacity,
                }
            })?;
            taken.insert(index);
            targets.push(index);
        }

        let old_slots = mem::replace(&mut self.slots, new_slots);
        debug!(
            "grew {} table from {} to {new_capacity} slots, moving {} entries",
            self.strategy,
            old_slots.len(),
            self.len
        );

        for (entry, index) in old_slots.into_iter().filter_map(Slot::into_entry).zip(targets) {
            if let Some(slot) = self.slots.get_mut(index) {
                *slot = Slot::Occupied(entry);
            }
        }
        Ok(())
    }
}

/// Iterator over the key-value pairs of the table
#[derive(Debug, Clone)]
pub struct Iter<'a, V> {
    /// Remaining slots to visit
    slots: slice::Iter<'a, Slot<V>>,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a str, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.slots.find_map(|slot| slot.entry().map(|entry| (entry.key.as_str(), &entry.value)))
    }
}

impl<'a, V> IntoIterator for &'a Hashtable<V> {
    type Item = (&'a str, &'a V);
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
