//! Simulation observer trait for progress reporting and data collection.

use hm_core::{Tick, TruckId};
use hm_fleet::{Assignment, Station, Truck};

/// Per-tick aggregates handed to [`SimObserver::on_tick_end`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TickStats {
    /// Trucks that arrived and were routed to a station this tick.
    pub assignments: u32,
    /// Trucks that finished unloading this tick.
    pub unloads:     u32,
    /// Sum of all station queues after the end-of-tick decrement.
    pub queued:      u64,
}

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at key points in the
/// tick loop.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
pub trait SimObserver {
    /// Called at the very start of each tick, before any truck moves.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called each time the dispatcher routes an arriving truck.
    fn on_assignment(&mut self, _tick: Tick, _truck: TruckId, _assignment: &Assignment) {}

    /// Called after the queue pass of each tick.
    fn on_tick_end(&mut self, _tick: Tick, _stats: &TickStats) {}

    /// Called every `config.output_interval_ticks` ticks with read-only
    /// access to the whole fleet.
    fn on_snapshot(&mut self, _tick: Tick, _trucks: &[Truck], _stations: &[Station]) {}

    /// Called once after the final tick (and the ledger check) completes.
    fn on_sim_end(&mut self, _final_tick: Tick, _trucks: &[Truck], _stations: &[Station]) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
