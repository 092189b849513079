//! Configuration type definitions
//!
//! These types represent the machine configuration. Configuration is stored
//! as postcard binary data or written by hand as TOML.

use crate::state::Phase;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Current configuration layout version
pub const CONFIG_VERSION: u8 = 1;

/// Configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Binary data could not be decoded
    Deserialize,
    /// Buffer too small for the encoded config
    Serialize,
    /// TOML text could not be parsed
    TomlParse,
    /// Stored layout version is not supported
    VersionMismatch,
    /// A phase was configured with zero duration
    ZeroDuration,
    /// Durations violate spin < fill < wash
    DurationOrder,
    /// A duration does not fit in the tick counter at the fastest rate
    DurationOverflow,
}

/// Supported clock rates
///
/// Selects which column of the duration table applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum TickRate {
    /// 1 tick per second
    #[default]
    Hz1,
    /// 10 ticks per second
    Hz10,
    /// 100 ticks per second
    Hz100,
    /// 1000 ticks per second
    Hz1k,
}

impl TickRate {
    /// Number of supported rates
    pub const COUNT: usize = 4;

    /// All rates, slowest first
    pub const ALL: [TickRate; Self::COUNT] =
        [TickRate::Hz1, TickRate::Hz10, TickRate::Hz100, TickRate::Hz1k];

    /// Ticks per second
    pub const fn hz(self) -> u32 {
        match self {
            TickRate::Hz1 => 1,
            TickRate::Hz10 => 10,
            TickRate::Hz100 => 100,
            TickRate::Hz1k => 1000,
        }
    }

    /// Selector value driven on the rate lines
    pub const fn selector(self) -> u8 {
        match self {
            TickRate::Hz1 => 0,
            TickRate::Hz10 => 1,
            TickRate::Hz100 => 2,
            TickRate::Hz1k => 3,
        }
    }

    /// Decode a selector value
    ///
    /// Unknown selectors fall back to the slowest rate, which always has a
    /// finite, reachable target.
    pub const fn from_selector(selector: u8) -> Self {
        match selector {
            1 => TickRate::Hz10,
            2 => TickRate::Hz100,
            3 => TickRate::Hz1k,
            _ => TickRate::Hz1,
        }
    }

    /// Column index into per-rate tables
    pub const fn index(self) -> usize {
        self.selector() as usize
    }

    /// Convert a wall-clock duration to ticks
    pub const fn ticks_for(self, seconds: u32) -> Option<u32> {
        seconds.checked_mul(self.hz())
    }
}

/// Wall-clock phase durations
///
/// Rinsing reuses the fill duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CycleDurations {
    /// Fill (and rinse) duration in seconds
    pub fill_s: u32,
    /// Wash duration in seconds
    pub wash_s: u32,
    /// Spin duration in seconds
    pub spin_s: u32,
}

impl Default for CycleDurations {
    fn default() -> Self {
        Self {
            fill_s: 120,
            wash_s: 300,
            spin_s: 60,
        }
    }
}

impl CycleDurations {
    /// Duration of a phase in seconds (0 for idle)
    pub const fn seconds(&self, phase: Phase) -> u32 {
        match phase {
            Phase::Idle => 0,
            Phase::FillingWater | Phase::Rinsing => self.fill_s,
            Phase::Washing => self.wash_s,
            Phase::Spinning => self.spin_s,
        }
    }

    /// Check durations are nonzero, ordered, and representable
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fill_s == 0 || self.wash_s == 0 || self.spin_s == 0 {
            return Err(ConfigError::ZeroDuration);
        }

        if self.wash_s <= self.fill_s || self.spin_s >= self.fill_s {
            return Err(ConfigError::DurationOrder);
        }

        // wash is the longest, so it overflows first
        if TickRate::Hz1k.ticks_for(self.wash_s).is_none() {
            return Err(ConfigError::DurationOverflow);
        }

        Ok(())
    }
}

/// Complete machine configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MachineConfig {
    /// Layout version
    pub version: u8,
    /// Rate the controller assumes until a tick selects one
    pub tick_rate: TickRate,
    /// Phase durations
    pub durations: CycleDurations,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            tick_rate: TickRate::default(),
            durations: CycleDurations::default(),
        }
    }
}

impl MachineConfig {
    /// Check version and durations
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.version != CONFIG_VERSION {
            return Err(ConfigError::VersionMismatch);
        }
        self.durations.validate()
    }
}
