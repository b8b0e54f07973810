//! Primary and secondary hash functions over string keys

/// Modulus of the secondary hash; double-hash steps fall in `1..=DOUBLE_HASH_K`
pub const DOUBLE_HASH_K: usize = 8;

/// Polynomial multiplier of the primary hash
const PRIMARY_MULTIPLIER: i128 = 94;
/// Offset subtracted from each character code by the primary hash
const PRIMARY_OFFSET: i128 = 31;
/// Polynomial multiplier of the secondary hash
const SECONDARY_MULTIPLIER: i128 = 27;
/// Offset subtracted from each character code by the secondary hash
const SECONDARY_OFFSET: i128 = 96;

/// Character value relative to `offset`, as a signed quantity
fn char_value(c: char, offset: i128) -> i128 {
    i128::from(u32::from(c)) - offset
}

/// Home slot of `key` in a table of `capacity` slots, in `0..capacity`.
///
/// The polynomial is seeded with the first character's value and then folds
/// every character, the first one included, reducing modulo `capacity` at each
/// step. An empty key, or a zero capacity, hashes to 0.
#[must_use]
#[allow(clippy::arithmetic_side_effects, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn primary_hash(key: &str, capacity: usize) -> usize {
    let Some(first) = key.chars().next() else {
        return 0;
    };
    if capacity == 0 {
        return 0;
    }
    // usize never exceeds 128 bits, and `value < capacity` keeps every
    // intermediate product far from the i128 bounds
    let modulus = capacity as i128;

    let mut value = char_value(first, PRIMARY_OFFSET);
    for c in key.chars() {
        value = (value * PRIMARY_MULTIPLIER + char_value(c, PRIMARY_OFFSET)).rem_euclid(modulus);
    }
    // rem_euclid leaves `value` in `0..capacity`
    value as usize
}

/// Step size used by double hashing, always in `1..=DOUBLE_HASH_K`.
///
/// An empty key yields `DOUBLE_HASH_K`.
#[must_use]
#[allow(clippy::arithmetic_side_effects, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn secondary_hash(key: &str) -> usize {
    let modulus = DOUBLE_HASH_K as i128;
    let mut chars = key.chars();

    let residue = chars.next().map_or(0, |first| {
        chars.fold(char_value(first, SECONDARY_OFFSET).rem_euclid(modulus), |acc, c| {
            (acc * SECONDARY_MULTIPLIER + char_value(c, SECONDARY_OFFSET)).rem_euclid(modulus)
        })
    });
    // residue is in `0..K`, so the step is in `1..=K`
    DOUBLE_HASH_K - residue as usize
}
