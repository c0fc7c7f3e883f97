//! Randomness capability used by the drawer.
//!
//! The drawer only needs "give me an index below `len`", so that is all the
//! trait asks for. Production code plugs in `rand`; tests replay a script.

use rand::rngs::{StdRng, ThreadRng};
use rand::{Rng, RngCore, SeedableRng};

use crate::{LuckyError, Result};

pub trait IndexSource {
    /// Uniform index in `0..len`. `len` is never zero.
    fn next_index(&mut self, len: usize) -> usize;
}

impl<T: IndexSource + ?Sized> IndexSource for &mut T {
    fn next_index(&mut self, len: usize) -> usize {
        (**self).next_index(len)
    }
}

/// Adapter from any `rand` generator.
#[derive(Debug, Clone)]
pub struct RngSource<R> {
    rng: R,
}

impl<R: RngCore> RngSource<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    pub fn into_inner(self) -> R {
        self.rng
    }
}

impl RngSource<ThreadRng> {
    pub fn thread() -> Self {
        Self::new(rand::thread_rng())
    }
}

impl RngSource<StdRng> {
    /// Reproducible source; the same seed always yields the same draws.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: RngCore> IndexSource for RngSource<R> {
    fn next_index(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }
}

/// Replays a fixed list of indices, cycling when it runs out.
///
/// Each value is reduced modulo the requested length.
#[derive(Debug, Clone)]
pub struct SequenceSource {
    values: Vec<usize>,
    cursor: usize,
}

impl SequenceSource {
    pub fn new(values: Vec<usize>) -> Result<Self> {
        if values.is_empty() {
            return Err(LuckyError::config("Sequence source needs at least one value"));
        }
        Ok(Self { values, cursor: 0 })
    }

    /// Number of indices handed out so far.
    pub fn consumed(&self) -> usize {
        self.cursor
    }
}

impl IndexSource for SequenceSource {
    fn next_index(&mut self, len: usize) -> usize {
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value % len
    }
}
