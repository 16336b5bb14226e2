use crate::RandSource;
use ::rand::{RngCore, rng};

/// A `RandSource` that uses the thread-local RNG (`rand::rng()`).
///
/// This RNG is fast, cryptographically secure (ChaCha-based), seeded from the
/// operating system and automatically reseeded periodically.
///
/// Each OS thread has its own RNG instance, so calls from multiple threads are
/// contention-free. This type does **not** store the RNG itself; it accesses
/// the thread-local generator on each call, which keeps it `Send + Sync` even
/// though the underlying `ThreadRng` is neither.
#[derive(Default, Clone, Copy, Debug)]
pub struct ThreadRandom;

impl RandSource for ThreadRandom {
    fn fill_bytes(&self, dest: &mut [u8]) {
        rng().fill_bytes(dest);
    }
}
