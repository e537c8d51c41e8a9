//! Shortest-wait station assignment.
//!
//! # Why no argmin
//!
//! Scanning every queue on each arrival costs O(stations).  Instead the
//! dispatcher hands out stations in strict round-robin order from a single
//! cursor, and every queue is decremented by one (saturating) after each
//! tick's truck pass.  Together these keep the cursor on a least-loaded
//! station:
//!
//! Read the queues in cyclic order starting at the cursor,
//! `q[c], q[c+1], …, q[c-1]`.  That sequence is non-decreasing and its last
//! element exceeds its first by at most one.
//!
//! - An assignment bumps `q[c]` to `q[c] + 1` and moves the cursor on, so the
//!   old head becomes the new tail.  The tail is still ≥ every other entry
//!   (they were ≤ `q[c] + 1`) and at most one above the new head (which was
//!   ≥ `q[c]`).
//! - A saturating decrement of every entry preserves both order and spread.
//!
//! All queues start at zero, so the invariant holds inductively and `q[c]` is
//! always the minimum.  This only works if assignments happen before the
//! tick's decrement pass; reordering the two needs the argument redone.

use hm_core::StationId;

use crate::{FleetError, FleetResult, Station};

/// Result of routing one arriving truck.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Assignment {
    pub station: StationId,
    /// Trucks ahead of this one at the moment of assignment, which is also
    /// its wait in ticks.
    pub queue_ahead: u32,
}

/// Round-robin cursor over the station list.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Dispatcher {
    cursor: usize,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// The station the next arrival will be sent to.
    #[inline]
    pub fn cursor(&self) -> StationId {
        StationId(self.cursor as u32)
    }

    /// Route one arrival: take the cursor's station, join its queue, advance
    /// the cursor modulo the station count.  O(1).
    pub fn assign_next(&mut self, stations: &mut [Station]) -> FleetResult<Assignment> {
        let count = stations.len();
        if count == 0 {
            return Err(FleetError::NoStations);
        }
        let station = stations.get_mut(self.cursor).ok_or(FleetError::UnknownStation {
            station: StationId(self.cursor as u32),
            count,
        })?;

        let assignment = Assignment {
            station:     StationId(self.cursor as u32),
            queue_ahead: station.queue(),
        };
        station.increment_queue();
        self.cursor = (self.cursor + 1) % count;
        Ok(assignment)
    }

    /// End-of-tick pass: every queue moves up by one truck.
    pub fn decrement_all(&self, stations: &mut [Station]) {
        stations.iter_mut().for_each(Station::decrement_queue);
    }

    /// Smallest queue length across `stations`, or `None` if empty.
    pub fn min_queue(stations: &[Station]) -> Option<u32> {
        stations.iter().map(Station::queue).min()
    }
}
