//! `hm-core`: foundational types for the helium-3 haul simulator.
//!
//! This crate is a dependency of every other `hm-*` crate.  It has no `hm-*`
//! dependencies and minimal external ones (only `rand` and `thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                                  |
//! |-----------------|-----------------------------------------------------------|
//! | [`ids`]         | `TruckId`, `StationId`                                    |
//! | [`time`]        | `Tick`, `SimClock`, `SimConfig`                           |
//! | [`rng`]         | `SimRng`, `DurationSource`, `MiningDurations`, `FixedDurations` |
//! | [`error`]       | `HmError`, `HmResult`                                     |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to ids, ticks and config.   |

pub mod error;
pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{HmError, HmResult};
pub use ids::{StationId, TruckId};
pub use rng::{DurationSource, FixedDurations, MiningDurations, SimRng};
pub use time::{SimClock, SimConfig, Tick};
