//! Per-truck activity time accounting.
//!
//! # Representation
//!
//! Four independent `u32` counters, one per [`Activity`].  Each tick a truck
//! charges exactly one of them, so after `H` ticks the counters sum to `H`.
//!
//! For compact storage or transport the ledger also has a packed form: a
//! single `u64` holding four 16-bit fields.
//!
//! ```text
//!  63        48 47        32 31        16 15         0
//! ┌────────────┬────────────┬────────────┬────────────┐
//! │   Mining   │ Traveling  │ Unloading  │  Waiting   │
//! └────────────┴────────────┴────────────┴────────────┘
//! ```
//!
//! Packing fails rather than truncating once any counter passes `u16::MAX`.

use std::fmt;

use crate::{FleetError, FleetResult};

/// Mask of one packed 16-bit field.
const FIELD_MASK: u64 = 0xFFFF;

/// What a truck spent a tick doing.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Activity {
    Waiting,
    Unloading,
    Traveling,
    Mining,
}

impl Activity {
    /// All activities in packed-field order.
    pub const ALL: [Activity; 4] = [
        Activity::Waiting,
        Activity::Unloading,
        Activity::Traveling,
        Activity::Mining,
    ];

    /// Bit offset of this activity's field in the packed encoding.
    #[inline]
    pub const fn bit_offset(self) -> u32 {
        match self {
            Activity::Waiting   => 0,
            Activity::Unloading => 16,
            Activity::Traveling => 32,
            Activity::Mining    => 48,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Activity::Waiting   => "Waiting",
            Activity::Unloading => "Unloading",
            Activity::Traveling => "Traveling",
            Activity::Mining    => "Mining",
        }
    }
}

impl fmt::Display for Activity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Ticks spent in each activity.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimeLedger {
    pub waiting:   u32,
    pub unloading: u32,
    pub traveling: u32,
    pub mining:    u32,
}

impl TimeLedger {
    pub const fn new() -> Self {
        Self { waiting: 0, unloading: 0, traveling: 0, mining: 0 }
    }

    /// Charge one tick to `activity`.
    #[inline]
    pub fn record(&mut self, activity: Activity) {
        *self.field_mut(activity) += 1;
    }

    #[inline]
    pub fn get(&self, activity: Activity) -> u32 {
        match activity {
            Activity::Waiting   => self.waiting,
            Activity::Unloading => self.unloading,
            Activity::Traveling => self.traveling,
            Activity::Mining    => self.mining,
        }
    }

    #[inline]
    fn field_mut(&mut self, activity: Activity) -> &mut u32 {
        match activity {
            Activity::Waiting   => &mut self.waiting,
            Activity::Unloading => &mut self.unloading,
            Activity::Traveling => &mut self.traveling,
            Activity::Mining    => &mut self.mining,
        }
    }

    /// Sum of all four counters.  Widened so it cannot overflow.
    #[inline]
    pub fn total(&self) -> u64 {
        Activity::ALL.iter().map(|&a| u64::from(self.get(a))).sum()
    }

    /// Share of `horizon` spent in `activity`, as a percentage.
    ///
    /// Returns 0.0 for a zero horizon.
    pub fn percent_of(&self, activity: Activity, horizon: u64) -> f64 {
        if horizon == 0 {
            return 0.0;
        }
        f64::from(self.get(activity)) / horizon as f64 * 100.0
    }

    /// Encode as four 16-bit fields in one `u64`.
    pub fn pack(&self) -> FleetResult<u64> {
        let mut word = 0u64;
        for activity in Activity::ALL {
            let value = self.get(activity);
            if u64::from(value) > FIELD_MASK {
                return Err(FleetError::LedgerOverflow { activity, value });
            }
            word |= u64::from(value) << activity.bit_offset();
        }
        Ok(word)
    }

    /// Decode the packed form produced by [`pack`](Self::pack).
    pub fn unpack(word: u64) -> Self {
        let field = |a: Activity| ((word >> a.bit_offset()) & FIELD_MASK) as u32;
        Self {
            waiting:   field(Activity::Waiting),
            unloading: field(Activity::Unloading),
            traveling: field(Activity::Traveling),
            mining:    field(Activity::Mining),
        }
    }
}
