//! Unloading station counters.

/// An unloading station.
///
/// `queue` counts trucks ahead of a new arrival: a truck that arrives when
/// `queue == n` waits `n` ticks before its unloading tick.  The dispatcher
/// decrements every queue once per tick, saturating at zero.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Station {
    queue:    u32,
    unloaded: u64,
}

impl Station {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn queue(&self) -> u32 {
        self.queue
    }

    /// Lifetime number of trucks unloaded here.
    #[inline]
    pub fn unloaded(&self) -> u64 {
        self.unloaded
    }

    #[inline]
    pub fn increment_queue(&mut self) {
        self.queue += 1;
    }

    /// No-op on an empty queue.
    #[inline]
    pub fn decrement_queue(&mut self) {
        self.queue = self.queue.saturating_sub(1);
    }

    #[inline]
    pub fn increment_unloaded(&mut self) {
        self.unloaded += 1;
    }
}
