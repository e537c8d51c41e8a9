//! End-of-run results handed to reporting front ends.

use hm_fleet::{Activity, Station, TimeLedger, Truck};

/// Per-truck ledgers and per-station unload totals for one run.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RunReport {
    /// Ticks simulated; the denominator of every percentage.
    pub ticks:        u64,
    /// Real minutes per tick.
    pub tick_minutes: u32,
    /// Indexed by `TruckId`.
    pub trucks:       Vec<TimeLedger>,
    /// Lifetime unloaded count, indexed by `StationId`.
    pub stations:     Vec<u64>,
}

impl RunReport {
    pub fn new(ticks: u64, tick_minutes: u32, trucks: &[Truck], stations: &[Station]) -> Self {
        Self {
            ticks,
            tick_minutes,
            trucks:   trucks.iter().map(|t| *t.ledger()).collect(),
            stations: stations.iter().map(Station::unloaded).collect(),
        }
    }

    pub fn total_unloaded(&self) -> u64 {
        self.stations.iter().sum()
    }

    /// Ticks the whole fleet spent in `activity`.
    pub fn fleet_ticks(&self, activity: Activity) -> u64 {
        self.trucks.iter().map(|l| u64::from(l.get(activity))).sum()
    }

    /// Fleet-wide share of truck-time spent in `activity`, as a percentage.
    pub fn fleet_percent(&self, activity: Activity) -> f64 {
        let truck_ticks = self.ticks * self.trucks.len() as u64;
        if truck_ticks == 0 {
            return 0.0;
        }
        self.fleet_ticks(activity) as f64 / truck_ticks as f64 * 100.0
    }

    /// Simulated minutes covered by the run.
    pub fn minutes(&self) -> u64 {
        self.ticks * u64::from(self.tick_minutes)
    }
}
