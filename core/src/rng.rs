//! Uniform integer sources for maze construction.
//!
//! Generation only ever asks for a uniform integer in a closed range, so the
//! seam is the small [`RandomRange`] trait. Three sources implement it:
//!
//! - [`SimpleLcg`]: Park-Miller MINSTD (`a = 48271`, `m = 2^31 - 1`), fully
//!   deterministic from a `u32` seed and free of floating point.
//! - [`RandSource`]: any `rand` generator.
//! - [`ReplayRng`]: replays offsets captured by [`RecordingRng`], so a maze can
//!   be rebuilt from the exact draw sequence that produced it.
//!
//! Reference: https://en.wikipedia.org/wiki/Lehmer_random_number_generator

use rand::Rng;

/// Source of uniform integers in a closed range.
pub trait RandomRange {
    /// Uniform integer in `[min, max]` (inclusive). Requires `min <= max`.
    fn randint(&mut self, min: usize, max: usize) -> usize;

    /// Fisher-Yates shuffle, drawing `randint(0, i)` for `i` from the last
    /// index down to 1.
    fn shuffle<T>(&mut self, items: &mut [T])
    where
        Self: Sized,
    {
        for i in (1..items.len()).rev() {
            let j = self.randint(0, i);
            items.swap(i, j);
        }
    }
}

impl<R: RandomRange + ?Sized> RandomRange for &mut R {
    fn randint(&mut self, min: usize, max: usize) -> usize {
        (**self).randint(min, max)
    }
}

const MINSTD_MULTIPLIER: u64 = 48271;
const MINSTD_MODULUS: u64 = 2147483647; // 2^31 - 1

/// Park-Miller Linear Congruential Generator
///
/// Same seed always produces the same sequence.
#[derive(Debug, Clone)]
pub struct SimpleLcg {
    state: u32,
}

impl SimpleLcg {
    /// If seed is 0, it's replaced with 1 to avoid the degenerate sequence.
    pub fn new(seed: u32) -> Self {
        Self {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    fn advance(&mut self) {
        // u64 keeps the multiplication from overflowing
        self.state = ((self.state as u64 * MINSTD_MULTIPLIER) % MINSTD_MODULUS) as u32;
    }
}

impl RandomRange for SimpleLcg {
    /// Computes `min + state * (max - min + 1) / M` in integer arithmetic.
    fn randint(&mut self, min: usize, max: usize) -> usize {
        debug_assert!(min <= max, "empty range [{min}, {max}]");
        self.advance();

        let range = (max - min + 1) as u64;
        let scaled = (self.state as u64 * range) / MINSTD_MODULUS;
        min + scaled as usize
    }
}

/// Adapter that lets any `rand` generator drive maze construction.
#[derive(Debug, Clone)]
pub struct RandSource<R> {
    rng: R,
}

impl<R: Rng> RandSource<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> RandomRange for RandSource<R> {
    fn randint(&mut self, min: usize, max: usize) -> usize {
        debug_assert!(min <= max, "empty range [{min}, {max}]");
        self.rng.random_range(min..=max)
    }
}

/// Wraps another source and records every draw as an offset from `min`.
#[derive(Debug, Clone)]
pub struct RecordingRng<R> {
    inner: R,
    offsets: Vec<usize>,
}

impl<R: RandomRange> RecordingRng<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            offsets: Vec::new(),
        }
    }

    pub fn offsets(&self) -> &[usize] {
        &self.offsets
    }

    /// Finish recording and turn the captured draws into a replayable source.
    pub fn into_replay(self) -> ReplayRng {
        ReplayRng::new(self.offsets)
    }
}

impl<R: RandomRange> RandomRange for RecordingRng<R> {
    fn randint(&mut self, min: usize, max: usize) -> usize {
        let value = self.inner.randint(min, max);
        self.offsets.push(value - min);
        value
    }
}

/// Replays a fixed sequence of offsets.
///
/// Each draw returns `min + offset`, clamped to `max`. Once the script runs
/// out every further draw returns `min`.
#[derive(Debug, Clone)]
pub struct ReplayRng {
    offsets: Vec<usize>,
    cursor: usize,
}

impl ReplayRng {
    pub fn new(offsets: Vec<usize>) -> Self {
        Self { offsets, cursor: 0 }
    }

    /// Number of draws consumed so far.
    pub fn consumed(&self) -> usize {
        self.cursor
    }
}

impl RandomRange for ReplayRng {
    fn randint(&mut self, min: usize, max: usize) -> usize {
        let offset = self.offsets.get(self.cursor).copied().unwrap_or(0);
        self.cursor += 1;
        (min + offset).min(max)
    }
}
