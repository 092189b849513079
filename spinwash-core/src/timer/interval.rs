//! Interval timer
//!
//! Counts ticks within the active phase and pulses once when the phase's
//! threshold is reached.

use crate::state::Phase;

/// Per-phase tick counter
///
/// Never carries a count across a phase boundary: it returns to zero on
/// every pulse, and every phase change is caused by a pulse or by reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct IntervalTimer {
    counter: u32,
}

/// Result of evaluating the timer for one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimerOutput {
    /// One-tick completion pulse
    pub elapsed: bool,
    /// Timer state to commit at the tick boundary
    pub next: IntervalTimer,
}

impl IntervalTimer {
    /// Timer at zero
    pub const fn new() -> Self {
        Self { counter: 0 }
    }

    /// Timer holding a specific count
    pub const fn with_counter(counter: u32) -> Self {
        Self { counter }
    }

    /// Ticks counted in the current phase
    pub const fn counter(&self) -> u32 {
        self.counter
    }

    /// Evaluate one tick without mutating
    ///
    /// `threshold` is the counter value that ends `phase`. The pulse also
    /// fires if the counter is already past it (a rate switched mid-phase),
    /// so the phase can never stall.
    pub fn evaluate(&self, phase: Phase, threshold: u32, pause_requested: bool) -> TimerOutput {
        if !phase.is_timed() {
            return TimerOutput {
                elapsed: false,
                next: Self::new(),
            };
        }

        // Same as equality while the rate is held steady
        if self.counter >= threshold {
            return TimerOutput {
                elapsed: true,
                next: Self::new(),
            };
        }

        if pause_requested && phase.pausable() {
            return TimerOutput {
                elapsed: false,
                next: *self,
            };
        }

        TimerOutput {
            elapsed: false,
            next: Self::with_counter(self.counter + 1),
        }
    }
}
