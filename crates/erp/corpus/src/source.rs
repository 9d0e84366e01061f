//! Randomness consumed by fixture generation.

use std::ops::Range;

use bitcoin::secp256k1::{PublicKey, Secp256k1, SignOnly};
use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;

/// Yields fresh public keys for generated federations.
pub trait KeySource {
    /// Returns a new public key.
    fn fresh_key(&mut self) -> PublicKey;
}

/// Everything corpus generation draws from: integers through [`Rng`] and
/// keys through [`KeySource`].
///
/// Blanket-implemented for any type providing both.
pub trait FixtureRng: RngCore + KeySource {}

impl<T: RngCore + KeySource + ?Sized> FixtureRng for T {}

/// Draws a federation size from `sizes` and fills it with fresh keys.
pub fn random_federation<S: FixtureRng + ?Sized>(
    src: &mut S,
    sizes: Range<usize>,
) -> Vec<PublicKey> {
    let n = src.gen_range(sizes);
    (0..n).map(|_| src.fresh_key()).collect()
}

/// Seedable source of random integers and secp256k1 keys.
///
/// Every draw goes through a single [`ChaCha20Rng`], so two sources built
/// from the same seed produce identical batches. Not intended for key
/// material that protects funds.
#[derive(Debug)]
pub struct FixtureSource {
    rng: ChaCha20Rng,
    secp: Secp256k1<SignOnly>,
}

impl FixtureSource {
    /// Creates a source seeded with `seed`.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha20Rng::seed_from_u64(seed),
            secp: Secp256k1::signing_only(),
        }
    }
}

impl KeySource for FixtureSource {
    /// Generates a fresh key pair and returns its public half.
    fn fresh_key(&mut self) -> PublicKey {
        let (_sk, pk) = self.secp.generate_keypair(&mut self.rng);
        pk
    }
}

impl RngCore for FixtureSource {
    fn next_u32(&mut self) -> u32 {
        self.rng.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.rng.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.rng.fill_bytes(dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.rng.try_fill_bytes(dest)
    }
}
