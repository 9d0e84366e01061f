//! Deterministic key fixtures shared by the unit tests.

use bitcoin::secp256k1::{PublicKey, Secp256k1, SecretKey};

/// Derives a public key from a secret made of `seed` repeated 32 times.
///
/// # Panics
///
/// If `seed` is 0 or 255, neither of which yields a valid secret.
pub(crate) fn key_from_seed(seed: u8) -> PublicKey {
    let secp = Secp256k1::signing_only();
    let sk = SecretKey::from_slice(&[seed; 32]).expect("test: valid secret");
    PublicKey::from_secret_key(&secp, &sk)
}

/// Returns `n` distinct keys, `n` must be below 255.
pub(crate) fn test_keys(n: usize) -> Vec<PublicKey> {
    (1..=n).map(|i| key_from_seed(i as u8)).collect()
}

/// Returns `n` distinct keys starting at seed `start`, disjoint from
/// [`test_keys`] when `start > n` of that call.
pub(crate) fn test_keys_from(start: u8, n: usize) -> Vec<PublicKey> {
    (0..n).map(|i| key_from_seed(start + i as u8)).collect()
}
