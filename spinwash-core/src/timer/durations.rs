//! Rate-aware duration lookup
//!
//! The table is computed once from configuration. Each tick only indexes
//! it by (phase, rate).

use crate::config::{ConfigError, CycleDurations, MachineConfig, TickRate};
use crate::state::Phase;

/// Phase lengths in ticks, one column per supported rate
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DurationTable {
    ticks: [[u32; TickRate::COUNT]; Phase::COUNT],
}

impl DurationTable {
    /// Build the table from wall-clock durations
    ///
    /// Durations that overflow at a given rate saturate to `u32::MAX`;
    /// validated durations never do.
    pub fn new(durations: &CycleDurations) -> Self {
        let mut ticks = [[0u32; TickRate::COUNT]; Phase::COUNT];

        for phase in Phase::ALL {
            let seconds = durations.seconds(phase);
            for rate in TickRate::ALL {
                ticks[phase.index()][rate.index()] =
                    rate.ticks_for(seconds).unwrap_or(u32::MAX);
            }
        }

        Self { ticks }
    }

    /// Build the table from a validated config
    pub fn from_config(config: &MachineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::new(&config.durations))
    }

    /// Number of ticks the phase lasts at this rate (0 for idle)
    pub fn ticks(&self, phase: Phase, rate: TickRate) -> u32 {
        self.ticks[phase.index()][rate.index()]
    }

    /// Counter value at which the phase's elapsed pulse fires
    ///
    /// The pulse tick is the last tick of the phase, so a phase of `n`
    /// ticks pulses when the counter reaches `n - 1`.
    pub fn threshold(&self, phase: Phase, rate: TickRate) -> u32 {
        self.ticks(phase, rate).saturating_sub(1)
    }

    /// Ticks from leaving idle to returning to idle
    pub fn cycle_ticks(&self, rate: TickRate, double_wash: bool) -> u64 {
        let fill = self.ticks(Phase::FillingWater, rate) as u64;
        let wash = self.ticks(Phase::Washing, rate) as u64;
        let rinse = self.ticks(Phase::Rinsing, rate) as u64;
        let spin = self.ticks(Phase::Spinning, rate) as u64;

        let rounds = if double_wash { 2 } else { 1 };
        fill + rounds * (wash + rinse) + spin
    }
}

impl Default for DurationTable {
    fn default() -> Self {
        Self::new(&CycleDurations::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small() -> DurationTable {
        DurationTable::new(&CycleDurations {
            fill_s: 3,
            wash_s: 5,
            spin_s: 2,
        })
    }

    #[test]
    fn test_ticks_scale_with_rate() {
        let table = small();
        assert_eq!(table.ticks(Phase::Washing, TickRate::Hz1), 5);
        assert_eq!(table.ticks(Phase::Washing, TickRate::Hz10), 50);
        assert_eq!(table.ticks(Phase::Washing, TickRate::Hz100), 500);
        assert_eq!(table.ticks(Phase::Washing, TickRate::Hz1k), 5000);
    }

    #[test]
    fn test_idle_never_counts() {
        let table = small();
        for rate in TickRate::ALL {
            assert_eq!(table.ticks(Phase::Idle, rate), 0);
            assert_eq!(table.threshold(Phase::Idle, rate), 0);
        }
    }

    #[test]
    fn test_rinse_matches_fill_and_ordering() {
        let table = small();
        for rate in TickRate::ALL {
            let fill = table.ticks(Phase::FillingWater, rate);
            assert_eq!(table.ticks(Phase::Rinsing, rate), fill);
            assert!(table.ticks(Phase::Washing, rate) > fill);
            assert!(table.ticks(Phase::Spinning, rate) < fill);
        }
    }

    #[test]
    fn test_threshold_is_last_tick() {
        let table = small();
        assert_eq!(table.threshold(Phase::Spinning, TickRate::Hz1), 1);
        assert_eq!(table.threshold(Phase::FillingWater, TickRate::Hz10), 29);
    }

    #[test]
    fn test_cycle_ticks() {
        let table = small();
        assert_eq!(table.cycle_ticks(TickRate::Hz1, false), 3 + 5 + 3 + 2);
        assert_eq!(table.cycle_ticks(TickRate::Hz1, true), 3 + 2 * (5 + 3) + 2);
        assert_eq!(table.cycle_ticks(TickRate::Hz10, false), 130);
    }

    #[test]
    fn test_overflow_saturates() {
        let table = DurationTable::new(&CycleDurations {
            fill_s: 10,
            wash_s: u32::MAX,
            spin_s: 5,
        });
        assert_eq!(table.ticks(Phase::Washing, TickRate::Hz10), u32::MAX);
        assert_eq!(table.ticks(Phase::Washing, TickRate::Hz1), u32::MAX);
    }

    #[test]
    fn test_from_config_validates() {
        let mut config = MachineConfig::default();
        assert!(DurationTable::from_config(&config).is_ok());

        config.durations.fill_s = 0;
        assert_eq!(
            DurationTable::from_config(&config),
            Err(ConfigError::ZeroDuration)
        );
    }
}
