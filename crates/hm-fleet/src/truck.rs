//! The truck state machine.
//!
//! ```text
//!            ┌──────────── timer 0 ─────────────┐
//!            ▼                                  │
//!        Mining ──timer 0──▶ TravelToStation ──┐│
//!            ▲                                 ││ arrive: queue_ahead > 0
//!            │                     ┌───────────┘│        ▼
//!   TravelToMine ◀── 1 tick ── Unloading ◀── timer 0 ── Waiting
//!                                  ▲
//!                                  └──── arrive: queue_ahead == 0
//! ```
//!
//! Every call to [`Truck::advance`] charges exactly one tick to the ledger,
//! using the activity of the state the truck was in when the tick began.

use hm_core::{DurationSource, StationId};

use crate::{Activity, Assignment, Dispatcher, FleetError, FleetResult, Station, TimeLedger};

/// Current phase of a truck, with the countdown or station the phase needs.
///
/// `remaining` counts ticks left in the phase, including the one about to be
/// processed; it is always at least 1 for a well-formed truck.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TruckState {
    Mining          { remaining: u32 },
    TravelToStation { remaining: u32 },
    Waiting         { remaining: u32, station: StationId },
    Unloading       { station: StationId },
    TravelToMine    { remaining: u32 },
}

impl TruckState {
    pub const fn label(&self) -> &'static str {
        match self {
            TruckState::Mining { .. }          => "Mining",
            TruckState::TravelToStation { .. } => "TravelToStation",
            TruckState::Waiting { .. }         => "Waiting",
            TruckState::Unloading { .. }       => "Unloading",
            TruckState::TravelToMine { .. }    => "TravelToMine",
        }
    }

    /// The ledger field a tick spent in this state is charged to.
    pub const fn activity(&self) -> Activity {
        match self {
            TruckState::Mining { .. } => Activity::Mining,
            TruckState::TravelToStation { .. } | TruckState::TravelToMine { .. } => {
                Activity::Traveling
            }
            TruckState::Waiting { .. }   => Activity::Waiting,
            TruckState::Unloading { .. } => Activity::Unloading,
        }
    }

    /// Ticks left in the phase.  Unloading has no countdown and reports 0.
    pub const fn timer(&self) -> u32 {
        match *self {
            TruckState::Mining { remaining }
            | TruckState::TravelToStation { remaining }
            | TruckState::Waiting { remaining, .. }
            | TruckState::TravelToMine { remaining } => remaining,
            TruckState::Unloading { .. } => 0,
        }
    }

    /// The station a truck is queued or unloading at.
    pub const fn station(&self) -> Option<StationId> {
        match *self {
            TruckState::Waiting { station, .. } | TruckState::Unloading { station } => {
                Some(station)
            }
            _ => None,
        }
    }
}

/// What happened to the rest of the world during one truck's tick.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Step {
    /// The truck only spent time; no station was touched.
    Worked,
    /// The truck arrived and joined a station's queue.
    Assigned(Assignment),
    /// The truck finished unloading at a station.
    Unloaded(StationId),
}

/// Shared state a truck may touch while advancing.
///
/// Borrowed from the simulation for the duration of one truck's transition;
/// trucks advance one at a time, so station access is sequential.
pub struct HaulContext<'a, D: DurationSource> {
    pub stations:     &'a mut [Station],
    pub dispatcher:   &'a mut Dispatcher,
    pub durations:    &'a mut D,
    /// One-way travel leg, in ticks.
    pub travel_ticks: u32,
}

/// A haul truck.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Truck {
    state:  TruckState,
    ledger: TimeLedger,
}

impl Truck {
    /// A fresh truck at the start of a mining phase of `mining_ticks`.
    pub fn new(mining_ticks: u32) -> Self {
        Self::with_state(TruckState::Mining { remaining: mining_ticks })
    }

    /// A fresh truck whose first mining phase is drawn from `durations`.
    pub fn spawn<D: DurationSource>(durations: &mut D) -> Self {
        Self::new(durations.next_mining_ticks())
    }

    /// A truck dropped into an arbitrary phase with an empty ledger.
    pub fn with_state(state: TruckState) -> Self {
        Self { state, ledger: TimeLedger::new() }
    }

    #[inline]
    pub fn state(&self) -> TruckState {
        self.state
    }

    #[inline]
    pub fn ledger(&self) -> &TimeLedger {
        &self.ledger
    }

    /// Process one tick.
    ///
    /// Charges the tick to the current state's activity, then applies the
    /// transition.  Errors mean the truck was in a state the machine can
    /// never produce (an exhausted countdown, a station index out of range)
    /// and the run cannot continue.
    pub fn advance<D: DurationSource>(
        &mut self,
        ctx: &mut HaulContext<'_, D>,
    ) -> FleetResult<Step> {
        let activity = self.state.activity();

        let (next, step) = match self.state {
            TruckState::Mining { remaining } => {
                match self.countdown(remaining)? {
                    0    => (TruckState::TravelToStation { remaining: ctx.travel_ticks }, Step::Worked),
                    left => (TruckState::Mining { remaining: left }, Step::Worked),
                }
            }

            TruckState::TravelToStation { remaining } => {
                match self.countdown(remaining)? {
                    0 => {
                        let assignment = ctx.dispatcher.assign_next(ctx.stations)?;
                        // Nobody ahead: straight to the unloading tick, no
                        // Waiting tick is charged.
                        let next = match assignment.queue_ahead {
                            0 => TruckState::Unloading { station: assignment.station },
                            ahead => TruckState::Waiting {
                                remaining: ahead,
                                station:   assignment.station,
                            },
                        };
                        (next, Step::Assigned(assignment))
                    }
                    left => (TruckState::TravelToStation { remaining: left }, Step::Worked),
                }
            }

            TruckState::Waiting { remaining, station } => {
                match self.countdown(remaining)? {
                    0    => (TruckState::Unloading { station }, Step::Worked),
                    left => (TruckState::Waiting { remaining: left, station }, Step::Worked),
                }
            }

            TruckState::Unloading { station } => {
                let count = ctx.stations.len();
                ctx.stations
                    .get_mut(station.index())
                    .ok_or(FleetError::UnknownStation { station, count })?
                    .increment_unloaded();
                (TruckState::TravelToMine { remaining: ctx.travel_ticks }, Step::Unloaded(station))
            }

            TruckState::TravelToMine { remaining } => {
                match self.countdown(remaining)? {
                    0 => {
                        let mining = ctx.durations.next_mining_ticks();
                        if mining == 0 {
                            return Err(FleetError::ZeroMiningDuration);
                        }
                        (TruckState::Mining { remaining: mining }, Step::Worked)
                    }
                    left => (TruckState::TravelToMine { remaining: left }, Step::Worked),
                }
            }
        };

        self.ledger.record(activity);
        self.state = next;
        Ok(step)
    }

    fn countdown(&self, remaining: u32) -> FleetResult<u32> {
        remaining
            .checked_sub(1)
            .ok_or(FleetError::TimerExhausted { state: self.state.label() })
    }
}
