use hm_core::{HmError, StationId, Tick, TruckId};
use hm_fleet::FleetError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error(transparent)]
    Config(#[from] HmError),

    #[error("{what} length {got} does not match configured {expected}")]
    CountMismatch {
        what:     &'static str,
        expected: usize,
        got:      usize,
    },

    #[error("{truck} failed at {tick}: {source}")]
    Truck {
        truck:  TruckId,
        tick:   Tick,
        source: FleetError,
    },

    #[error(
        "shortest-wait violated at {tick} after {truck}: cursor {selected} has queue \
         {selected_queue}, minimum is {min_queue}"
    )]
    ShortestWaitViolated {
        tick:           Tick,
        truck:          TruckId,
        selected:       StationId,
        selected_queue: u32,
        min_queue:      u32,
    },

    #[error("{truck} ledger sums to {recorded} ticks, expected {expected}")]
    LedgerMismatch {
        truck:    TruckId,
        recorded: u64,
        expected: u64,
    },
}

pub type SimResult<T> = Result<T, SimError>;
