//! SQLite output backend (feature `sqlite`).
//!
//! Creates a single `output.db` file in the configured output directory with
//! four tables: `truck_snapshots`, `tick_summaries`, `truck_utilization` and
//! `station_totals`.

use std::path::Path;

use rusqlite::Connection;

use crate::writer::OutputWriter;
use crate::{OutputResult, StationTotalRow, TickSummaryRow, TruckSnapshotRow, TruckUtilizationRow};

/// Writes simulation output to an SQLite database.
pub struct SqliteWriter {
    conn:     Connection,
    finished: bool,
}

impl SqliteWriter {
    /// Open (or create) `output.db` in `dir` and initialise the schema.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let conn = Connection::open(dir.join("output.db"))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous  = NORMAL;
             CREATE TABLE IF NOT EXISTS truck_snapshots (
                 truck_id INTEGER NOT NULL,
                 tick     INTEGER NOT NULL,
                 state    TEXT    NOT NULL,
                 timer    INTEGER NOT NULL,
                 station  INTEGER NOT NULL
             );
             CREATE TABLE IF NOT EXISTS tick_summaries (
                 tick            INTEGER PRIMARY KEY,
                 elapsed_minutes INTEGER NOT NULL,
                 assignments     INTEGER NOT NULL,
                 unloads         INTEGER NOT NULL,
                 queued          INTEGER NOT NULL
             );
             CREATE TABLE IF NOT EXISTS truck_utilization (
                 truck_id  INTEGER PRIMARY KEY,
                 waiting   INTEGER NOT NULL,
                 unloading INTEGER NOT NULL,
                 traveling INTEGER NOT NULL,
                 mining    INTEGER NOT NULL
             );
             CREATE TABLE IF NOT EXISTS station_totals (
                 station_id INTEGER PRIMARY KEY,
                 unloaded   INTEGER NOT NULL
             );",
        )?;

        Ok(Self { conn, finished: false })
    }
}

impl OutputWriter for SqliteWriter {
    fn write_snapshots(&mut self, rows: &[TruckSnapshotRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO truck_snapshots (truck_id, tick, state, timer, station) \
                 VALUES (?1, ?2, ?3, ?4, ?5)",
            )?;
            for row in rows {
                stmt.execute(rusqlite::params![
                    row.truck_id,
                    row.tick,
                    row.state,
                    row.timer,
                    row.station,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.conn.execute(
            "INSERT INTO tick_summaries (tick, elapsed_minutes, assignments, unloads, queued) \
             VALUES (?1, ?2, ?3, ?4, ?5)",
            rusqlite::params![row.tick, row.elapsed_minutes, row.assignments, row.unloads, row.queued],
        )?;
        Ok(())
    }

    fn write_utilization(&mut self, rows: &[TruckUtilizationRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO truck_utilization (truck_id, waiting, unloading, traveling, mining) \
                 VALUES (?1, ?2, ?3, ?4, ?5)",
            )?;
            for row in rows {
                stmt.execute(rusqlite::params![
                    row.truck_id,
                    row.waiting,
                    row.unloading,
                    row.traveling,
                    row.mining,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn write_station_totals(&mut self, rows: &[StationTotalRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO station_totals (station_id, unloaded) VALUES (?1, ?2)",
            )?;
            for row in rows {
                stmt.execute(rusqlite::params![row.station_id, row.unloaded])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
        Ok(())
    }
}
