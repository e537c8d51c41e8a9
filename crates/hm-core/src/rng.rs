//! Random sources for mining-phase durations.
//!
//! # Injection
//!
//! The only randomness in the model is the length of each mining phase.  It
//! is drawn through the [`DurationSource`] trait, which the simulation owns
//! as an explicit handle rather than reaching for process-wide state:
//!
//! - [`MiningDurations`]: uniform over an inclusive tick range, backed by a
//!   [`SimRng`].  Seeded runs are reproducible; entropy-seeded runs are not.
//! - [`FixedDurations`]: replays a fixed sequence.  Lets tests pin down
//!   exact state-machine timelines without depending on any RNG algorithm.

use std::ops::RangeInclusive;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::SimConfig;

// ── SimRng ────────────────────────────────────────────────────────────────────

/// Simulation-level RNG.
///
/// Single-threaded use only; the tick loop consumes it synchronously.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Seed from OS entropy.  Two runs will not match.
    pub fn from_entropy() -> Self {
        SimRng(SmallRng::from_entropy())
    }

    /// Generate a value uniformly in `range`.
    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }
}

// ── DurationSource ────────────────────────────────────────────────────────────

/// Supplies the length, in ticks, of each mining phase.
///
/// Called once per truck at construction and once each time a truck returns
/// to the mine.  Implementations must return at least 1; a zero-length phase
/// is rejected by the truck state machine.
pub trait DurationSource {
    fn next_mining_ticks(&mut self) -> u32;
}

/// Uniformly distributed mining durations over an inclusive tick range.
pub struct MiningDurations {
    rng:   SimRng,
    range: RangeInclusive<u32>,
}

impl MiningDurations {
    pub fn new(rng: SimRng, range: RangeInclusive<u32>) -> Self {
        Self { rng, range }
    }

    /// Build from a config: seeded when `config.seed` is set, entropy otherwise.
    pub fn from_config(config: &SimConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => SimRng::new(seed),
            None       => SimRng::from_entropy(),
        };
        Self::new(rng, config.mining_ticks_min..=config.mining_ticks_max)
    }
}

impl DurationSource for MiningDurations {
    fn next_mining_ticks(&mut self) -> u32 {
        self.rng.gen_range(self.range.clone())
    }
}

/// Replays a fixed sequence of durations, cycling when exhausted.
///
/// An empty sequence yields 1 forever.
#[derive(Clone, Debug, Default)]
pub struct FixedDurations {
    values: Vec<u32>,
    next:   usize,
}

impl FixedDurations {
    pub fn new(values: impl Into<Vec<u32>>) -> Self {
        Self { values: values.into(), next: 0 }
    }

    /// Every draw returns `ticks`.
    pub fn constant(ticks: u32) -> Self {
        Self::new(vec![ticks])
    }

    /// How many durations have been drawn so far.
    pub fn drawn(&self) -> usize {
        self.next
    }
}

impl DurationSource for FixedDurations {
    fn next_mining_ticks(&mut self) -> u32 {
        if self.values.is_empty() {
            self.next += 1;
            return 1;
        }
        let value = self.values[self.next % self.values.len()];
        self.next += 1;
        value
    }
}
