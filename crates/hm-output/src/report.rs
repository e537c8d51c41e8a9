//! Console utilization report.

use std::fmt;

use hm_fleet::Activity;
use hm_sim::RunReport;

/// Human-readable rendering of a [`RunReport`]: each truck's share of the
/// horizon per activity, each station's unloaded count, then fleet totals.
///
/// ```text
/// Truck 0
/// Waiting: 2.31%
/// Unloading: 1.85%
/// Traveling: 22.22%
/// Mining: 73.61%
///
/// Station 0
/// Number of trucks unloaded: 16
///
/// Fleet: 1 trucks, 1 stations, 864 ticks (72h 00m)
/// ...
/// ```
pub struct UtilizationReport<'a> {
    report: &'a RunReport,
}

impl<'a> UtilizationReport<'a> {
    pub fn new(report: &'a RunReport) -> Self {
        Self { report }
    }
}

impl fmt::Display for UtilizationReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = self.report;

        for (i, ledger) in r.trucks.iter().enumerate() {
            writeln!(f, "Truck {i}")?;
            for activity in Activity::ALL {
                writeln!(f, "{activity}: {:.2}%", ledger.percent_of(activity, r.ticks))?;
            }
            writeln!(f)?;
        }

        for (i, unloaded) in r.stations.iter().enumerate() {
            writeln!(f, "Station {i}")?;
            writeln!(f, "Number of trucks unloaded: {unloaded}")?;
            writeln!(f)?;
        }

        let minutes = r.minutes();
        writeln!(
            f,
            "Fleet: {} trucks, {} stations, {} ticks ({}h {:02}m)",
            r.trucks.len(),
            r.stations.len(),
            r.ticks,
            minutes / 60,
            minutes % 60,
        )?;
        for activity in Activity::ALL {
            writeln!(f, "{activity}: {:.2}%", r.fleet_percent(activity))?;
        }
        writeln!(f, "Total trucks unloaded: {}", r.total_unloaded())
    }
}
