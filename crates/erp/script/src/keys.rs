//! Canonical ordering of federation keys.

use bitcoin::secp256k1::PublicKey;

/// Length of a compressed public key encoding.
pub const COMPRESSED_PUBKEY_LEN: usize = 33;

/// Sorts keys by the unsigned lexicographic order of their compressed
/// encodings.
///
/// The sort is stable and does not deduplicate, so repeated keys keep their
/// relative input positions.
pub fn sort_public_keys(keys: &[PublicKey]) -> Vec<PublicKey> {
    let mut sorted = keys.to_vec();
    sorted.sort_by_key(|k| k.serialize());
    sorted
}

/// Display form used in exported fixtures, the lowercase hex of the
/// compressed encoding.
pub fn key_to_string(key: &PublicKey) -> String {
    hex::encode(key.serialize())
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::test_utils::{key_from_seed, test_keys};

    #[test]
    fn test_sorted_is_non_decreasing() {
        let keys = test_keys(10);
        let sorted = sort_public_keys(&keys);
        for pair in sorted.windows(2) {
            assert!(pair[0].serialize() <= pair[1].serialize());
        }
    }

    #[test]
    fn test_duplicates_preserved() {
        let a = key_from_seed(1);
        let b = key_from_seed(2);
        let keys = vec![b, a, b, a, a];

        let sorted = sort_public_keys(&keys);
        assert_eq!(sorted.len(), keys.len());
        let (lo, hi) = if a.serialize() < b.serialize() {
            (a, b)
        } else {
            (b, a)
        };
        let lo_count = if lo == a { 3 } else { 2 };
        assert!(sorted[..lo_count].iter().all(|k| *k == lo));
        assert!(sorted[lo_count..].iter().all(|k| *k == hi));
    }

    #[test]
    fn test_key_to_string() {
        let key = key_from_seed(7);
        let s = key_to_string(&key);
        assert_eq!(s.len(), COMPRESSED_PUBKEY_LEN * 2);
        assert_eq!(s, key.to_string());
    }

    proptest! {
        #[test]
        fn prop_sort_is_permutation_and_idempotent(
            seeds in prop::collection::vec(1u8..=32, 0..20)
        ) {
            let keys: Vec<_> = seeds.iter().map(|s| key_from_seed(*s)).collect();
            let sorted = sort_public_keys(&keys);

            let mut expected: Vec<_> = keys.iter().map(|k| k.serialize()).collect();
            expected.sort();
            let got: Vec<_> = sorted.iter().map(|k| k.serialize()).collect();
            prop_assert_eq!(&got, &expected);

            prop_assert_eq!(sort_public_keys(&sorted), sorted);
        }
    }
}
