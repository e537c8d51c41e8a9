//! The `Sim` struct and its tick loop.

use hm_core::{DurationSource, SimClock, SimConfig, TruckId};
use hm_fleet::{Dispatcher, HaulContext, Station, Step, Truck};
use tracing::{error, info, trace};

use crate::{RunReport, SimError, SimObserver, SimResult, TickStats, checks};

/// The main simulation runner.
///
/// Owns every truck and station for the life of the run; nothing else holds
/// references into them between ticks.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<D: DurationSource> {
    /// Run configuration (fleet size, horizon, timing, checks, …).
    pub config: SimConfig,

    /// Tracks the current tick.
    pub clock: SimClock,

    /// The fleet, in advance order.
    pub trucks: Vec<Truck>,

    /// Unloading stations, indexed by `StationId`.
    pub stations: Vec<Station>,

    /// Round-robin cursor shared by every arriving truck.
    pub dispatcher: Dispatcher,

    /// Source of mining-phase lengths.
    pub durations: D,
}

impl<D: DurationSource> Sim<D> {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run from the current tick to `config.end_tick()` and return the
    /// per-truck and per-station results.
    ///
    /// With consistency checks enabled, also verifies the shortest-wait
    /// property after every truck transition and the ledger totals at the end.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<RunReport> {
        info!(
            fleet = self.config.fleet_size,
            stations = self.config.station_count,
            horizon = self.config.horizon_ticks,
            checks = self.config.consistency_checks,
            "starting run"
        );

        while self.clock.current_tick < self.config.end_tick() {
            self.process_tick(observer)?;
        }

        let elapsed = self.clock.current_tick.0;
        if self.config.consistency_checks {
            checks::check_ledgers(&self.trucks, elapsed)?;
        }
        observer.on_sim_end(self.clock.current_tick, &self.trucks, &self.stations);

        let report = self.report();
        info!(
            ticks = elapsed,
            clock = %self.clock,
            unloaded = report.total_unloaded(),
            "run complete"
        );
        Ok(report)
    }

    /// Run exactly `n` ticks from the current position (ignores the horizon
    /// and skips the end-of-run hooks).
    ///
    /// Useful for tests and incremental stepping.
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            self.process_tick(observer)?;
        }
        Ok(())
    }

    /// Snapshot of the results so far.
    pub fn report(&self) -> RunReport {
        RunReport::new(
            self.clock.current_tick.0,
            self.config.tick_minutes,
            &self.trucks,
            &self.stations,
        )
    }

    /// Ticks left before the horizon.
    pub fn remaining_ticks(&self) -> u64 {
        self.config.end_tick().0.saturating_sub(self.clock.current_tick.0)
    }

    // ── Core tick processing ──────────────────────────────────────────────

    fn process_tick<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<TickStats> {
        let now = self.clock.current_tick;
        observer.on_tick_start(now);

        let mut stats = TickStats::default();
        let checks_on = self.config.consistency_checks;

        // ── Phase 1: truck pass (insertion order) ─────────────────────────
        let mut ctx = HaulContext {
            stations:     &mut self.stations,
            dispatcher:   &mut self.dispatcher,
            durations:    &mut self.durations,
            travel_ticks: self.config.travel_ticks,
        };
        for (i, truck) in self.trucks.iter_mut().enumerate() {
            let id = TruckId(i as u32);
            let step = truck.advance(&mut ctx).map_err(|source| {
                error!(truck = %id, tick = %now, %source, "truck state machine failed");
                SimError::Truck { truck: id, tick: now, source }
            })?;

            match step {
                Step::Assigned(assignment) => {
                    stats.assignments += 1;
                    trace!(
                        tick = %now, truck = %id, station = %assignment.station,
                        wait = assignment.queue_ahead, "assigned"
                    );
                    observer.on_assignment(now, id, &assignment);
                }
                Step::Unloaded(_) => stats.unloads += 1,
                Step::Worked => {}
            }

            if checks_on {
                checks::check_shortest_wait(ctx.stations, ctx.dispatcher.cursor(), now, id)?;
            }
        }

        // ── Phase 2: uniform queue decrement ──────────────────────────────
        //
        // Must run after every truck has moved; the dispatcher's cursor
        // invariant is derived for exactly this order.
        self.dispatcher.decrement_all(&mut self.stations);
        stats.queued = self.stations.iter().map(|s| u64::from(s.queue())).sum();

        // ── Phase 3: observers ────────────────────────────────────────────
        observer.on_tick_end(now, &stats);
        let interval = self.config.output_interval_ticks;
        if interval > 0 && now.0 % interval == 0 {
            observer.on_snapshot(now, &self.trucks, &self.stations);
        }

        self.clock.advance();
        Ok(stats)
    }
}
