//! `SimOutputObserver<W>` bridges `SimObserver` to an `OutputWriter`.

use hm_core::{SimClock, SimConfig, Tick};
use hm_fleet::{Station, Truck};
use hm_sim::{SimObserver, TickStats};

use crate::row::{StationTotalRow, TickSummaryRow, TruckSnapshotRow, TruckUtilizationRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that writes truck snapshots, tick summaries and the
/// end-of-run totals to any [`OutputWriter`] backend (CSV, SQLite, Parquet).
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  After `sim.run()` returns, check for errors with
/// [`take_error`][Self::take_error].
pub struct SimOutputObserver<W: OutputWriter> {
    writer:     W,
    clock:      SimClock,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    /// Create an observer backed by `writer`, using `config` for the
    /// tick-to-minutes conversion.
    pub fn new(writer: W, config: &SimConfig) -> Self {
        Self {
            writer,
            clock:      config.make_clock(),
            last_error: None,
        }
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the sim).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_tick_end(&mut self, tick: Tick, stats: &TickStats) {
        let row = TickSummaryRow::from_stats(tick, &self.clock, stats);
        let result = self.writer.write_tick_summary(&row);
        self.store_err(result);
    }

    fn on_snapshot(&mut self, tick: Tick, trucks: &[Truck], _stations: &[Station]) {
        let rows: Vec<TruckSnapshotRow> = trucks
            .iter()
            .enumerate()
            .map(|(i, t)| TruckSnapshotRow::from_truck(i as u32, tick, t))
            .collect();

        if !rows.is_empty() {
            let result = self.writer.write_snapshots(&rows);
            self.store_err(result);
        }
    }

    fn on_sim_end(&mut self, _final_tick: Tick, trucks: &[Truck], stations: &[Station]) {
        let utilization: Vec<TruckUtilizationRow> = trucks
            .iter()
            .enumerate()
            .map(|(i, t)| TruckUtilizationRow::from_ledger(i as u32, t.ledger()))
            .collect();
        let result = self.writer.write_utilization(&utilization);
        self.store_err(result);

        let totals: Vec<StationTotalRow> = stations
            .iter()
            .enumerate()
            .map(|(i, s)| StationTotalRow::from_station(i as u32, s))
            .collect();
        let result = self.writer.write_station_totals(&totals);
        self.store_err(result);

        let result = self.writer.finish();
        self.store_err(result);
    }
}
