//! Injectable shuffle source: thread rng in production, seeded rng for replays and tests.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Anything that can randomly permute a slice.
pub trait RandomSource {
    fn shuffle<T>(&mut self, slice: &mut [T]);
}

/// Non-deterministic source backed by `rand::thread_rng`.
#[derive(Clone, Debug, Default)]
pub struct SystemRng;

impl RandomSource for SystemRng {
    fn shuffle<T>(&mut self, slice: &mut [T]) {
        slice.shuffle(&mut rand::thread_rng());
    }
}

/// Deterministic source: the same seed always yields the same pairings.
#[derive(Clone, Debug)]
pub struct SeededRng {
    inner: StdRng,
}

impl SeededRng {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            inner: StdRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for SeededRng {
    fn shuffle<T>(&mut self, slice: &mut [T]) {
        slice.shuffle(&mut self.inner);
    }
}
