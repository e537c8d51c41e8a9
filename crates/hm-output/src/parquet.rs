//! Parquet output backend (feature `parquet`).
//!
//! Creates four files in the configured output directory:
//! - `truck_snapshots.parquet`
//! - `tick_summaries.parquet`
//! - `truck_utilization.parquet`
//! - `station_totals.parquet`

use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{ArrayRef, StringBuilder, UInt32Builder, UInt64Builder};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;

use crate::writer::OutputWriter;
use crate::{OutputResult, StationTotalRow, TickSummaryRow, TruckSnapshotRow, TruckUtilizationRow};

fn snapshot_schema() -> Arc<Schema> {
    Arc::new(Schema::new(vec![
        Field::new("truck_id", DataType::UInt32, false),
        Field::new("tick",     DataType::UInt64, false),
        Field::new("state",    DataType::Utf8,   false),
        Field::new("timer",    DataType::UInt32, false),
        Field::new("station",  DataType::UInt32, false),
    ]))
}

fn summary_schema() -> Arc<Schema> {
    Arc::new(Schema::new(vec![
        Field::new("tick",            DataType::UInt64, false),
        Field::new("elapsed_minutes", DataType::UInt64, false),
        Field::new("assignments",     DataType::UInt32, false),
        Field::new("unloads",         DataType::UInt32, false),
        Field::new("queued",          DataType::UInt64, false),
    ]))
}

fn utilization_schema() -> Arc<Schema> {
    Arc::new(Schema::new(vec![
        Field::new("truck_id",  DataType::UInt32, false),
        Field::new("waiting",   DataType::UInt32, false),
        Field::new("unloading", DataType::UInt32, false),
        Field::new("traveling", DataType::UInt32, false),
        Field::new("mining",    DataType::UInt32, false),
    ]))
}

fn station_schema() -> Arc<Schema> {
    Arc::new(Schema::new(vec![
        Field::new("station_id", DataType::UInt32, false),
        Field::new("unloaded",   DataType::UInt64, false),
    ]))
}

fn snappy_props() -> WriterProperties {
    WriterProperties::builder()
        .set_compression(Compression::SNAPPY)
        .build()
}

/// One open Parquet file plus the schema its batches are built against.
struct Table {
    writer: Option<ArrowWriter<File>>,
    schema: Arc<Schema>,
}

impl Table {
    fn create(path: &Path, schema: Arc<Schema>) -> OutputResult<Self> {
        let file = File::create(path)?;
        let writer = ArrowWriter::try_new(file, Arc::clone(&schema), Some(snappy_props()))?;
        Ok(Self { writer: Some(writer), schema })
    }

    fn write(&mut self, columns: Vec<ArrayRef>) -> OutputResult<()> {
        let Some(writer) = self.writer.as_mut() else {
            return Ok(());
        };
        let batch = RecordBatch::try_new(Arc::clone(&self.schema), columns)?;
        writer.write(&batch)?;
        Ok(())
    }

    fn close(&mut self) -> OutputResult<()> {
        if let Some(w) = self.writer.take() {
            w.close()?;
        }
        Ok(())
    }
}

/// Writes simulation output to four Parquet files.
///
/// `finish()` **must** be called to write the Parquet file footers; files
/// written without calling `finish()` cannot be opened by Parquet readers.
pub struct ParquetWriter {
    snapshots:   Table,
    summaries:   Table,
    utilization: Table,
    stations:    Table,
}

impl ParquetWriter {
    /// Create all four Parquet files in `dir`.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        Ok(Self {
            snapshots:   Table::create(&dir.join("truck_snapshots.parquet"), snapshot_schema())?,
            summaries:   Table::create(&dir.join("tick_summaries.parquet"), summary_schema())?,
            utilization: Table::create(&dir.join("truck_utilization.parquet"), utilization_schema())?,
            stations:    Table::create(&dir.join("station_totals.parquet"), station_schema())?,
        })
    }
}

impl OutputWriter for ParquetWriter {
    fn write_snapshots(&mut self, rows: &[TruckSnapshotRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }

        let mut truck_ids = UInt32Builder::new();
        let mut ticks     = UInt64Builder::new();
        let mut states    = StringBuilder::new();
        let mut timers    = UInt32Builder::new();
        let mut stations  = UInt32Builder::new();

        for row in rows {
            truck_ids.append_value(row.truck_id);
            ticks.append_value(row.tick);
            states.append_value(row.state);
            timers.append_value(row.timer);
            stations.append_value(row.station);
        }

        self.snapshots.write(vec![
            Arc::new(truck_ids.finish()),
            Arc::new(ticks.finish()),
            Arc::new(states.finish()),
            Arc::new(timers.finish()),
            Arc::new(stations.finish()),
        ])
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        let mut ticks       = UInt64Builder::new();
        let mut minutes     = UInt64Builder::new();
        let mut assignments = UInt32Builder::new();
        let mut unloads     = UInt32Builder::new();
        let mut queued      = UInt64Builder::new();

        ticks.append_value(row.tick);
        minutes.append_value(row.elapsed_minutes);
        assignments.append_value(row.assignments);
        unloads.append_value(row.unloads);
        queued.append_value(row.queued);

        self.summaries.write(vec![
            Arc::new(ticks.finish()),
            Arc::new(minutes.finish()),
            Arc::new(assignments.finish()),
            Arc::new(unloads.finish()),
            Arc::new(queued.finish()),
        ])
    }

    fn write_utilization(&mut self, rows: &[TruckUtilizationRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }

        let mut truck_ids = UInt32Builder::new();
        let mut waiting   = UInt32Builder::new();
        let mut unloading = UInt32Builder::new();
        let mut traveling = UInt32Builder::new();
        let mut mining    = UInt32Builder::new();

        for row in rows {
            truck_ids.append_value(row.truck_id);
            waiting.append_value(row.waiting);
            unloading.append_value(row.unloading);
            traveling.append_value(row.traveling);
            mining.append_value(row.mining);
        }

        self.utilization.write(vec![
            Arc::new(truck_ids.finish()),
            Arc::new(waiting.finish()),
            Arc::new(unloading.finish()),
            Arc::new(traveling.finish()),
            Arc::new(mining.finish()),
        ])
    }

    fn write_station_totals(&mut self, rows: &[StationTotalRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }

        let mut station_ids = UInt32Builder::new();
        let mut unloaded    = UInt64Builder::new();

        for row in rows {
            station_ids.append_value(row.station_id);
            unloaded.append_value(row.unloaded);
        }

        self.stations.write(vec![Arc::new(station_ids.finish()), Arc::new(unloaded.finish())])
    }

    fn finish(&mut self) -> OutputResult<()> {
        self.snapshots.close()?;
        self.summaries.close()?;
        self.utilization.close()?;
        self.stations.close()?;
        Ok(())
    }
}
