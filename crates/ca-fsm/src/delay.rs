//! `DelayCounter`: per-agent throttle on transitions.
//!
//! Handlers set a delay after expensive or rate-limited work ("re-decide in
//! 40 ticks").  While the counter is above zero the machine only counts it
//! down, so thousands of agents can share one tick without each of them
//! querying the world every tick.

/// Ticks remaining before the owning machine may run a handler again.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct DelayCounter(u32);

impl DelayCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one tick down, clamped at zero.
    #[inline]
    pub fn tick(&mut self) {
        self.0 = self.0.saturating_sub(1);
    }

    /// `true` iff no ticks remain.
    #[inline]
    pub fn is_ready(&self) -> bool {
        self.0 == 0
    }

    /// Replace the remaining delay.  Last write wins; values never add up.
    #[inline]
    pub fn set(&mut self, ticks: u32) {
        self.0 = ticks;
    }

    #[inline]
    pub fn remaining(&self) -> u32 {
        self.0
    }
}
