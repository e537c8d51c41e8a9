//! `hm-fleet`: trucks, stations, and dispatching.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                  |
//! |-----------------|-----------------------------------------------------------|
//! | [`ledger`]      | `Activity`, `TimeLedger` (with packed `u64` encoding)     |
//! | [`station`]     | `Station` queue / unloaded counters                       |
//! | [`dispatcher`]  | `Dispatcher` round-robin shortest-wait assignment         |
//! | [`truck`]       | `Truck`, `TruckState`, `HaulContext`, `Step`              |
//!
//! Everything here is single-threaded and allocation-free per tick; the tick
//! loop itself lives in `hm-sim`.

pub mod dispatcher;
pub mod error;
pub mod ledger;
pub mod station;
pub mod truck;

#[cfg(test)]
mod tests;

pub use dispatcher::{Assignment, Dispatcher};
pub use error::{FleetError, FleetResult};
pub use ledger::{Activity, TimeLedger};
pub use station::Station;
pub use truck::{HaulContext, Step, Truck, TruckState};
