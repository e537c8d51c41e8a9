//! Plain data row types written by output backends.

use hm_core::{SimClock, StationId, Tick};
use hm_fleet::{Station, TimeLedger, Truck};
use hm_sim::TickStats;

/// A snapshot of one truck's phase at a given tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TruckSnapshotRow {
    pub truck_id: u32,
    pub tick:     u64,
    /// `TruckState::label()`.
    pub state:    &'static str,
    /// Ticks left in the phase; 0 while unloading.
    pub timer:    u32,
    /// Station queued or unloading at; `u32::MAX` when not at a station.
    pub station:  u32,
}

impl TruckSnapshotRow {
    pub fn from_truck(truck_id: u32, tick: Tick, truck: &Truck) -> Self {
        let state = truck.state();
        Self {
            truck_id,
            tick:    tick.0,
            state:   state.label(),
            timer:   state.timer(),
            station: state.station().unwrap_or(StationId::NONE).0,
        }
    }
}

/// Summary statistics for one simulation tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickSummaryRow {
    pub tick:            u64,
    /// Simulated minutes at the start of the tick.
    pub elapsed_minutes: u64,
    pub assignments:     u32,
    pub unloads:         u32,
    /// Trucks still queued across all stations after the decrement.
    pub queued:          u64,
}

impl TickSummaryRow {
    pub fn from_stats(tick: Tick, clock: &SimClock, stats: &TickStats) -> Self {
        Self {
            tick:            tick.0,
            elapsed_minutes: clock.minutes_at(tick),
            assignments:     stats.assignments,
            unloads:         stats.unloads,
            queued:          stats.queued,
        }
    }
}

/// One truck's end-of-run ledger, in ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TruckUtilizationRow {
    pub truck_id:  u32,
    pub waiting:   u32,
    pub unloading: u32,
    pub traveling: u32,
    pub mining:    u32,
}

impl TruckUtilizationRow {
    pub fn from_ledger(truck_id: u32, ledger: &TimeLedger) -> Self {
        Self {
            truck_id,
            waiting:   ledger.waiting,
            unloading: ledger.unloading,
            traveling: ledger.traveling,
            mining:    ledger.mining,
        }
    }
}

/// One station's lifetime unloaded count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StationTotalRow {
    pub station_id: u32,
    pub unloaded:   u64,
}

impl StationTotalRow {
    pub fn from_station(station_id: u32, station: &Station) -> Self {
        Self { station_id, unloaded: station.unloaded() }
    }
}
