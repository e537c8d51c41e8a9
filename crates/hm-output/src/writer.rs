//! The `OutputWriter` trait implemented by all backend writers.

use crate::{OutputResult, StationTotalRow, TickSummaryRow, TruckSnapshotRow, TruckUtilizationRow};

/// Trait implemented by CSV, SQLite, and Parquet writers.
///
/// All methods are infallible from the observer's perspective; errors are
/// stored internally and retrieved with [`SimOutputObserver::take_error`].
///
/// [`SimOutputObserver::take_error`]: crate::SimOutputObserver::take_error
pub trait OutputWriter {
    /// Write a batch of truck snapshots.
    fn write_snapshots(&mut self, rows: &[TruckSnapshotRow]) -> OutputResult<()>;

    /// Write one tick summary row.
    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()>;

    /// Write the end-of-run ledger of every truck.
    fn write_utilization(&mut self, rows: &[TruckUtilizationRow]) -> OutputResult<()>;

    /// Write the end-of-run unloaded count of every station.
    fn write_station_totals(&mut self, rows: &[StationTotalRow]) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent; safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
