//! Primality helpers used to size the slot array

/// Returns true if `n` is prime.
///
/// Trial division by every integer in `2..=floor(sqrt(n))`. `0` and `1` are
/// not prime; `2` and `3` have an empty divisor range and are prime.
#[must_use]
#[allow(clippy::arithmetic_side_effects)]
pub fn is_prime(n: usize) -> bool {
    if n < 2 {
        return false;
    }

    let mut divisor: usize = 2;
    // `divisor <= n / divisor` is `divisor * divisor <= n` without the overflow
    while divisor <= n / divisor {
        if n % divisor == 0 {
            return false;
        }
        divisor = divisor.saturating_add(1);
    }
    true
}

/// Returns the smallest prime greater than or equal to `n`.
///
/// Requests below 2 round up to 2. Returns `None` if no such prime fits in a `usize`.
#[must_use]
pub fn next_prime(n: usize) -> Option<usize> {
    (n.max(2)..=usize::MAX).find(|&candidate| is_prime(candidate))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_small_numbers() {
        assert!(!is_prime(0));
        assert!(!is_prime(1));
        assert!(is_prime(2));
        assert!(is_prime(3));
        assert!(!is_prime(4));
        assert!(is_prime(5));
        assert!(!is_prime(9));
        assert!(!is_prime(25));
        assert!(!is_prime(49));
        assert!(is_prime(97));
    }

    #[test]
    fn test_next_prime() {
        assert_eq!(next_prime(0), Some(2));
        assert_eq!(next_prime(1), Some(2));
        assert_eq!(next_prime(2), Some(2));
        assert_eq!(next_prime(5), Some(5));
        assert_eq!(next_prime(10), Some(11));
        assert_eq!(next_prime(22), Some(23));
        assert_eq!(next_prime(24), Some(29));
        assert_eq!(next_prime(1000), Some(1009));
    }

    #[test]
    fn test_large_prime() {
        // Largest prime below 2^32
        assert!(is_prime(4_294_967_291));
        assert!(!is_prime(4_294_967_293));
    }

    proptest! {
        #[test]
        fn prop_next_prime_is_smallest_prime_at_or_above(n in 0usize..20_000) {
            let prime = next_prime(n).unwrap();
            prop_assert!(prime >= n);
            prop_assert!(is_prime(prime));
            prop_assert!((n.max(2)..prime).all(|c| !is_prime(c)));
        }

        #[test]
        fn prop_is_prime_matches_naive_definition(n in 0usize..5_000) {
            let naive = n >= 2 && (2..n).all(|d| n % d != 0);
            prop_assert_eq!(is_prime(n), naive);
        }
    }
}
