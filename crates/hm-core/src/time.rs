//! Simulation time model.
//!
//! # Design
//!
//! Time advances in fixed-length ticks.  One tick is `tick_minutes` real
//! minutes (5 by default), and every duration in the model (mining, travel,
//! queue waits, the horizon itself) is expressed in whole ticks.  Integer
//! ticks keep all accounting exact: a truck's four ledger counters must sum
//! to the horizon with no rounding slack.

use std::fmt;

use crate::{HmError, HmResult};

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation tick counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Tracks the current tick and converts it to elapsed real time.
#[derive(Clone, Debug)]
pub struct SimClock {
    /// Real minutes one tick represents.
    pub tick_minutes: u32,
    /// The current tick, advanced once per processed tick.
    pub current_tick: Tick,
}

impl SimClock {
    pub fn new(tick_minutes: u32) -> Self {
        Self {
            tick_minutes,
            current_tick: Tick::ZERO,
        }
    }

    #[inline]
    pub fn advance(&mut self) {
        self.current_tick = self.current_tick + 1;
    }

    /// Elapsed simulated minutes since tick 0.
    #[inline]
    pub fn elapsed_minutes(&self) -> u64 {
        self.minutes_at(self.current_tick)
    }

    /// Simulated minutes at the start of `tick`.
    #[inline]
    pub fn minutes_at(&self, tick: Tick) -> u64 {
        tick.0 * u64::from(self.tick_minutes)
    }

    /// Break elapsed time into (day, hour, minute) components.
    pub fn elapsed_dhm(&self) -> (u64, u32, u32) {
        let total = self.elapsed_minutes();
        let days = total / 1_440;
        let hours = ((total % 1_440) / 60) as u32;
        let minutes = (total % 60) as u32;
        (days, hours, minutes)
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (d, h, m) = self.elapsed_dhm();
        write!(f, "{} (day {} {:02}:{:02})", self.current_tick, d, h, m)
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level run configuration.
///
/// Defaults reproduce the reference operation: 5-minute ticks, 30-minute
/// travel legs, mining phases uniform over 1–5 hours, a 72-hour horizon.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    /// Number of trucks in the fleet.  Must be at least 1.
    pub fleet_size: u32,

    /// Number of unloading stations.  Must be at least 1.
    pub station_count: u32,

    /// Total ticks to simulate.  864 = 72 h at 5 min/tick.
    pub horizon_ticks: u64,

    /// Real minutes per tick.  Only used for reporting.
    pub tick_minutes: u32,

    /// One-way travel time between the mine and the stations, in ticks.
    pub travel_ticks: u32,

    /// Shortest mining phase, in ticks (inclusive).
    pub mining_ticks_min: u32,

    /// Longest mining phase, in ticks (inclusive).
    pub mining_ticks_max: u32,

    /// Seed for the mining-duration source.  `None` seeds from OS entropy,
    /// so repeated runs differ.
    pub seed: Option<u64>,

    /// Verify the shortest-wait and ledger invariants while running.
    pub consistency_checks: bool,

    /// Emit observer snapshots every N ticks.  0 disables snapshots.
    pub output_interval_ticks: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            fleet_size:            1,
            station_count:         1,
            horizon_ticks:         864,
            tick_minutes:          5,
            travel_ticks:          6,
            mining_ticks_min:      12,
            mining_ticks_max:      60,
            seed:                  None,
            consistency_checks:    false,
            output_interval_ticks: 0,
        }
    }
}

impl SimConfig {
    /// The tick at which the run ends (exclusive upper bound).
    #[inline]
    pub fn end_tick(&self) -> Tick {
        Tick(self.horizon_ticks)
    }

    pub fn make_clock(&self) -> SimClock {
        SimClock::new(self.tick_minutes)
    }

    /// Shortest possible mine → unload → mine cycle, in ticks.
    ///
    /// Mining, both travel legs, zero queueing, and the single unloading tick.
    pub fn min_cycle_ticks(&self) -> u64 {
        u64::from(self.mining_ticks_min) + 2 * u64::from(self.travel_ticks) + 1
    }

    /// Reject configurations the tick loop cannot run.
    pub fn validate(&self) -> HmResult<()> {
        if self.fleet_size == 0 {
            return Err(HmError::Config("fleet_size must be at least 1".into()));
        }
        if self.station_count == 0 {
            return Err(HmError::Config("station_count must be at least 1".into()));
        }
        if self.tick_minutes == 0 {
            return Err(HmError::Config("tick_minutes must be at least 1".into()));
        }
        if self.travel_ticks == 0 {
            return Err(HmError::Config("travel_ticks must be at least 1".into()));
        }
        if self.mining_ticks_min == 0 {
            return Err(HmError::Config("mining_ticks_min must be at least 1".into()));
        }
        if self.mining_ticks_min > self.mining_ticks_max {
            return Err(HmError::Config(format!(
                "mining_ticks_min ({}) exceeds mining_ticks_max ({})",
                self.mining_ticks_min, self.mining_ticks_max,
            )));
        }
        // Ledger counters are u32; a longer horizon could wrap one of them.
        if self.horizon_ticks > u64::from(u32::MAX) {
            return Err(HmError::OutOfRange {
                what:  "horizon_ticks",
                value: self.horizon_ticks,
                min:   0,
                max:   u64::from(u32::MAX),
            });
        }
        Ok(())
    }
}
