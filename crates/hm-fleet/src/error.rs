use hm_core::StationId;
use thiserror::Error;

use crate::Activity;

/// Invariant violations inside the fleet model.
///
/// None of these are reachable from a validated configuration; each one
/// means the state machine or the dispatcher has a defect.
#[derive(Debug, Error)]
pub enum FleetError {
    #[error("{state} countdown advanced past zero")]
    TimerExhausted { state: &'static str },

    #[error("{station} is outside the {count} configured stations")]
    UnknownStation { station: StationId, count: usize },

    #[error("no stations to dispatch to")]
    NoStations,

    #[error("duration source produced a zero-length mining phase")]
    ZeroMiningDuration,

    #[error("{activity} ledger value {value} does not fit a 16-bit packed field")]
    LedgerOverflow { activity: Activity, value: u32 },
}

pub type FleetResult<T> = Result<T, FleetError>;
