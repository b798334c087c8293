//! The two services this crate's core treats as injected collaborators
//! rather than implementing itself (spec.md §6): message hashing and
//! uniform-random-in-range generation.

use num_bigint::{BigUint, RandBigInt};
use sha2::{Digest, Sha256};

/// Hashes a message to a fixed-width digest consumed by sign/verify.
pub trait Hasher {
    fn hash(&self, message: &[u8]) -> [u8; 32];
}

/// SHA-256, matching the reference design.
#[derive(Clone, Copy, Debug, Default)]
pub struct Sha256Hasher;

impl Hasher for Sha256Hasher {
    fn hash(&self, message: &[u8]) -> [u8; 32] {
        let mut hasher = Sha256::new();
        hasher.update(message);
        hasher.finalize().into()
    }
}

/// Draws a uniform integer in `[min, max)`. Used both for nonce generation
/// during signing and for default private-key secrets (spec.md §6, §4.5).
pub trait Rng {
    fn between(&self, min: &BigUint, max: &BigUint) -> BigUint;
}

/// `rand`'s thread-local CSPRNG.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemRng;

impl Rng for SystemRng {
    fn between(&self, min: &BigUint, max: &BigUint) -> BigUint {
        if max <= min {
            return min.clone();
        }
        let span = max - min;
        min + rand::thread_rng().gen_biguint_below(&span)
    }
}
