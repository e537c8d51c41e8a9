//! Runtime consistency checks, enabled by `SimConfig::consistency_checks`.
//!
//! Both checks are O(stations) / O(trucks) and exist to catch scheduler or
//! state-machine defects; a failure aborts the run.

use hm_core::{StationId, Tick, TruckId};
use hm_fleet::{Dispatcher, Station, Truck};
use tracing::error;

use crate::{SimError, SimResult};

/// The cursor must point at a station whose queue is the minimum.
pub fn check_shortest_wait(
    stations: &[Station],
    cursor:   StationId,
    tick:     Tick,
    truck:    TruckId,
) -> SimResult<()> {
    let Some(min_queue) = Dispatcher::min_queue(stations) else {
        return Ok(());
    };
    let selected_queue = stations.get(cursor.index()).map_or(u32::MAX, Station::queue);
    if selected_queue != min_queue {
        error!(
            %tick, %truck, %cursor, selected_queue, min_queue,
            "cursor is not on a shortest-wait station"
        );
        return Err(SimError::ShortestWaitViolated {
            tick,
            truck,
            selected: cursor,
            selected_queue,
            min_queue,
        });
    }
    Ok(())
}

/// Every truck's ledger must account for exactly `expected` ticks.
pub fn check_ledgers(trucks: &[Truck], expected: u64) -> SimResult<()> {
    for (i, truck) in trucks.iter().enumerate() {
        let recorded = truck.ledger().total();
        if recorded != expected {
            let truck = TruckId(i as u32);
            error!(%truck, recorded, expected, "ledger does not match ticks simulated");
            return Err(SimError::LedgerMismatch { truck, recorded, expected });
        }
    }
    Ok(())
}
