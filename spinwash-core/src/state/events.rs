//! Inputs sampled by the controller each tick

use crate::config::TickRate;

/// User request lines
///
/// All requests are level-sensitive and sampled once per tick. The core
/// never latches them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Requests {
    /// Coin acceptor reports a coin; acted on only while idle
    pub coin_inserted: bool,
    /// Double-wash option; sampled when rinsing completes
    pub double_wash_requested: bool,
    /// Pause option; honored only while spinning
    pub pause_requested: bool,
}

impl Requests {
    /// No request asserted
    pub const NONE: Self = Self {
        coin_inserted: false,
        double_wash_requested: false,
        pause_requested: false,
    };

    /// Only the coin line asserted
    pub const fn coin() -> Self {
        Self {
            coin_inserted: true,
            ..Self::NONE
        }
    }

    /// Set the coin line
    pub const fn with_coin(self, coin_inserted: bool) -> Self {
        Self {
            coin_inserted,
            ..self
        }
    }

    /// Set the double-wash line
    pub const fn with_double_wash(self, double_wash_requested: bool) -> Self {
        Self {
            double_wash_requested,
            ..self
        }
    }

    /// Set the pause line
    pub const fn with_pause(self, pause_requested: bool) -> Self {
        Self {
            pause_requested,
            ..self
        }
    }
}

/// Everything the controller reads on one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickInputs {
    /// Reset line; forces the initial state and wins over everything else
    pub reset: bool,
    /// Selected clock rate
    pub tick_rate: TickRate,
    /// User request lines
    pub requests: Requests,
}

impl TickInputs {
    /// Inputs for a normal tick at the given rate
    pub const fn new(tick_rate: TickRate, requests: Requests) -> Self {
        Self {
            reset: false,
            tick_rate,
            requests,
        }
    }

    /// Inputs for a reset tick
    pub const fn reset(tick_rate: TickRate) -> Self {
        Self {
            reset: true,
            tick_rate,
            requests: Requests::NONE,
        }
    }

    /// Build inputs from a raw rate selector
    ///
    /// Unknown selectors fall back to the default rate.
    pub fn from_raw(reset: bool, rate_selector: u8, requests: Requests) -> Self {
        Self {
            reset,
            tick_rate: TickRate::from_selector(rate_selector),
            requests,
        }
    }
}
