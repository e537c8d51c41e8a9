//! `hm-output`: simulation output writers and console reports for the
//! helium-3 haul simulator.
//!
//! Three backends are provided behind Cargo features:
//!
//! | Feature   | Backend | Files created                                                                   |
//! |-----------|---------|---------------------------------------------------------------------------------|
//! | *(none)*  | CSV     | `truck_snapshots.csv`, `tick_summaries.csv`, `truck_utilization.csv`, `station_totals.csv` |
//! | `sqlite`  | SQLite  | `output.db` (same four tables)                                                  |
//! | `parquet` | Parquet | the same four tables as `.parquet` files                                        |
//!
//! All backends implement [`OutputWriter`] and are driven by
//! [`SimOutputObserver`], which implements `hm_sim::SimObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use hm_output::{CsvWriter, SimOutputObserver, UtilizationReport};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = SimOutputObserver::new(writer, &config);
//! let report = sim.run(&mut obs)?;
//! if let Some(e) = obs.take_error() {
//!     eprintln!("output error: {e}");
//! }
//! print!("{}", UtilizationReport::new(&report));
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod report;
pub mod row;
pub mod writer;

#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(feature = "parquet")]
pub mod parquet;


pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::SimOutputObserver;
pub use report::UtilizationReport;
pub use row::{StationTotalRow, TickSummaryRow, TruckSnapshotRow, TruckUtilizationRow};
pub use writer::OutputWriter;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteWriter;

#[cfg(feature = "parquet")]
pub use parquet::ParquetWriter;
