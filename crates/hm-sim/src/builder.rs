//! Fluent builder for constructing a [`Sim`].

use hm_core::{DurationSource, MiningDurations, SimConfig};
use hm_fleet::{Dispatcher, Station, Truck};

use crate::{Sim, SimError, SimResult};

/// Fluent builder for [`Sim<D>`].
///
/// # Required inputs
///
/// - [`SimConfig`]: fleet size, station count, horizon, timing, seed, …
/// - `D: DurationSource`: where mining-phase lengths come from
///   ([`SimBuilder::from_config`] picks [`MiningDurations`] for you)
///
/// # Optional inputs
///
/// | Method                 | Default                                        |
/// |------------------------|------------------------------------------------|
/// | `.initial_trucks(v)`   | `fleet_size` trucks mining for a drawn duration |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(config, FixedDurations::constant(12))
///     .initial_trucks(trucks)
///     .build()?;
/// sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder<D: DurationSource> {
    config:    SimConfig,
    durations: D,
    trucks:    Option<Vec<Truck>>,
}

impl SimBuilder<MiningDurations> {
    /// Uniform mining durations over the configured range, seeded from
    /// `config.seed` (or OS entropy when unset).
    pub fn from_config(config: SimConfig) -> Self {
        let durations = MiningDurations::from_config(&config);
        Self::new(config, durations)
    }
}

impl<D: DurationSource> SimBuilder<D> {
    pub fn new(config: SimConfig, durations: D) -> Self {
        Self {
            config,
            durations,
            trucks: None,
        }
    }

    /// Start the fleet in explicit states instead of fresh mining phases.
    ///
    /// Must be length `fleet_size`.  Ledgers are kept as given, so pass
    /// trucks built with [`Truck::with_state`] for an accounting-clean run.
    pub fn initial_trucks(mut self, trucks: Vec<Truck>) -> Self {
        self.trucks = Some(trucks);
        self
    }

    /// Validate the configuration, spawn the fleet and stations, and return a
    /// ready-to-run [`Sim`].
    pub fn build(mut self) -> SimResult<Sim<D>> {
        self.config.validate()?;
        let fleet_size = self.config.fleet_size as usize;

        let trucks = match self.trucks.take() {
            Some(t) => {
                if t.len() != fleet_size {
                    return Err(SimError::CountMismatch {
                        what:     "initial trucks",
                        expected: fleet_size,
                        got:      t.len(),
                    });
                }
                t
            }
            // Drawn in insertion order so a seeded source gives the same
            // fleet every time.
            None => (0..fleet_size).map(|_| Truck::spawn(&mut self.durations)).collect(),
        };

        let stations = vec![Station::new(); self.config.station_count as usize];

        Ok(Sim {
            clock:      self.config.make_clock(),
            config:     self.config,
            trucks,
            stations,
            dispatcher: Dispatcher::new(),
            durations:  self.durations,
        })
    }
}
