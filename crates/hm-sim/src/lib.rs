//! `hm-sim`: tick loop orchestrator for the helium-3 haul simulator.
//!
//! # Tick loop
//!
//! ```text
//! for tick in 0..config.horizon_ticks:
//!   ① Truck pass:   every truck advances once, in insertion order.
//!                   Arrivals are routed by the dispatcher cursor; with
//!                   consistency checks on, the cursor is verified to sit on
//!                   a minimum-queue station after every truck.
//!   ② Queue pass:   every station queue drops by one (saturating).
//!   ③ Observers:    tick summary, periodic snapshot.
//! after the last tick:
//!   ④ Ledger check: every truck's ledger sums to the ticks simulated.
//! ```
//!
//! ① strictly precedes ② within a tick; the shortest-wait guarantee depends
//! on that ordering.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use hm_core::SimConfig;
//! use hm_sim::{NoopObserver, SimBuilder};
//!
//! let config = SimConfig { fleet_size: 12, station_count: 3, seed: Some(42), ..SimConfig::default() };
//! let mut sim = SimBuilder::from_config(config).build()?;
//! let report = sim.run(&mut NoopObserver)?;
//! ```

pub mod builder;
pub mod checks;
pub mod error;
pub mod observer;
pub mod report;
pub mod sim;


pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver, TickStats};
pub use report::RunReport;
pub use sim::Sim;
