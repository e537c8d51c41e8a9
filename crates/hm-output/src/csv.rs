//! CSV output backend.
//!
//! Creates four files in the configured output directory:
//! - `truck_snapshots.csv`
//! - `tick_summaries.csv`
//! - `truck_utilization.csv`
//! - `station_totals.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{OutputResult, StationTotalRow, TickSummaryRow, TruckSnapshotRow, TruckUtilizationRow};

/// Writes simulation output to four CSV files.
pub struct CsvWriter {
    snapshots:   Writer<File>,
    summaries:   Writer<File>,
    utilization: Writer<File>,
    stations:    Writer<File>,
    finished:    bool,
}

impl CsvWriter {
    /// Open (or create) the four CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut snapshots = Writer::from_path(dir.join("truck_snapshots.csv"))?;
        snapshots.write_record(["truck_id", "tick", "state", "timer", "station"])?;

        let mut summaries = Writer::from_path(dir.join("tick_summaries.csv"))?;
        summaries.write_record(["tick", "elapsed_minutes", "assignments", "unloads", "queued"])?;

        let mut utilization = Writer::from_path(dir.join("truck_utilization.csv"))?;
        utilization.write_record(["truck_id", "waiting", "unloading", "traveling", "mining"])?;

        let mut stations = Writer::from_path(dir.join("station_totals.csv"))?;
        stations.write_record(["station_id", "unloaded"])?;

        Ok(Self {
            snapshots,
            summaries,
            utilization,
            stations,
            finished: false,
        })
    }
}

impl OutputWriter for CsvWriter {
    fn write_snapshots(&mut self, rows: &[TruckSnapshotRow]) -> OutputResult<()> {
        for row in rows {
            self.snapshots.write_record(&[
                row.truck_id.to_string(),
                row.tick.to_string(),
                row.state.to_owned(),
                row.timer.to_string(),
                row.station.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.tick.to_string(),
            row.elapsed_minutes.to_string(),
            row.assignments.to_string(),
            row.unloads.to_string(),
            row.queued.to_string(),
        ])?;
        Ok(())
    }

    fn write_utilization(&mut self, rows: &[TruckUtilizationRow]) -> OutputResult<()> {
        for row in rows {
            self.utilization.write_record(&[
                row.truck_id.to_string(),
                row.waiting.to_string(),
                row.unloading.to_string(),
                row.traveling.to_string(),
                row.mining.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_station_totals(&mut self, rows: &[StationTotalRow]) -> OutputResult<()> {
        for row in rows {
            self.stations.write_record(&[row.station_id.to_string(), row.unloaded.to_string()])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.snapshots.flush()?;
        self.summaries.flush()?;
        self.utilization.flush()?;
        self.stations.flush()?;
        Ok(())
    }
}
