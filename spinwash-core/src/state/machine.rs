//! Phase definition and transition logic
//!
//! Valve, motor and lamp behavior is a function of the current phase only.

use super::events::Requests;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Completed washes at which a double-wash request sends rinsing back to washing
pub const DOUBLE_WASH_REPEAT: u8 = 1;

/// Operating phases of a wash cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Phase {
    /// Waiting for a coin; machine available
    #[default]
    Idle,
    /// Inlet valve open, drum filling
    FillingWater,
    /// Drum agitating with detergent
    Washing,
    /// Drum agitating with clean water
    Rinsing,
    /// Drain open, drum spinning
    Spinning,
}

impl Phase {
    /// Number of phases
    pub const COUNT: usize = 5;

    /// All phases in cycle order
    pub const ALL: [Phase; Self::COUNT] = [
        Phase::Idle,
        Phase::FillingWater,
        Phase::Washing,
        Phase::Rinsing,
        Phase::Spinning,
    ];

    /// Diagnostic code for this phase
    pub const fn code(self) -> u8 {
        match self {
            Phase::Idle => 0,
            Phase::FillingWater => 1,
            Phase::Washing => 2,
            Phase::Rinsing => 3,
            Phase::Spinning => 4,
        }
    }

    /// Decode a diagnostic code
    ///
    /// Unknown codes resolve to `Idle` so a corrupted phase can never leave
    /// the machine in an undefined state.
    pub const fn from_code(code: u8) -> Self {
        match code {
            1 => Phase::FillingWater,
            2 => Phase::Washing,
            3 => Phase::Rinsing,
            4 => Phase::Spinning,
            _ => Phase::Idle,
        }
    }

    /// Row index into per-phase tables
    pub const fn index(self) -> usize {
        self.code() as usize
    }

    /// Machine is ready to accept a coin
    pub fn is_available(&self) -> bool {
        matches!(self, Phase::Idle)
    }

    /// Phase is gated by the interval timer
    pub fn is_timed(&self) -> bool {
        !matches!(self, Phase::Idle)
    }

    /// Phase honors a pause request
    pub fn pausable(&self) -> bool {
        matches!(self, Phase::Spinning)
    }

    /// Compute the next phase
    ///
    /// `elapsed` is the timer pulse computed from this same phase, and
    /// `wash_repeats` is the repeat count before this tick's update.
    pub fn transition(self, elapsed: bool, requests: Requests, wash_repeats: u8) -> Self {
        use Phase::*;

        match self {
            Idle if requests.coin_inserted => FillingWater,
            Idle => Idle,

            // Every timed phase holds until its timer pulses
            _ if !elapsed => self,

            FillingWater => Washing,
            Washing => Rinsing,
            Rinsing
                if requests.double_wash_requested && wash_repeats == DOUBLE_WASH_REPEAT =>
            {
                Washing
            }
            Rinsing => Spinning,
            Spinning => Idle,
        }
    }
}

/// Compute the wash repeat count for the next tick
///
/// Evaluated on the phase *before* the transition, so the pulse that ends
/// the first wash is what makes the following rinse loop back.
pub fn next_wash_repeats(phase: Phase, elapsed: bool, wash_repeats: u8) -> u8 {
    match phase {
        Phase::Idle => 0,
        Phase::Washing if elapsed => wash_repeats.saturating_add(1),
        _ => wash_repeats,
    }
}
