//! Request line and availability output traits

use crate::state::{Requests, TickInputs};

/// Source of the per-tick input lines
///
/// Implementations wrap the coin acceptor, option switches and rate
/// selector. Methods take `&mut self` because reading GPIO or a debouncer
/// typically requires mutable access.
pub trait RequestSource {
    /// Reset line state
    fn reset_asserted(&mut self) -> bool {
        false
    }

    /// Raw rate selector value
    ///
    /// Values outside the supported range are accepted and normalized by
    /// the controller.
    fn rate_selector(&mut self) -> u8;

    /// Coin acceptor line
    fn coin_inserted(&mut self) -> bool;

    /// Double-wash option switch
    fn double_wash_requested(&mut self) -> bool;

    /// Pause switch
    fn pause_requested(&mut self) -> bool;

    /// Sample every line once
    fn sample(&mut self) -> TickInputs {
        let requests = Requests {
            coin_inserted: self.coin_inserted(),
            double_wash_requested: self.double_wash_requested(),
            pause_requested: self.pause_requested(),
        };
        TickInputs::from_raw(self.reset_asserted(), self.rate_selector(), requests)
    }
}

/// Fixed inputs act as a source that always reads the same lines
impl RequestSource for TickInputs {
    fn reset_asserted(&mut self) -> bool {
        self.reset
    }

    fn rate_selector(&mut self) -> u8 {
        self.tick_rate.selector()
    }

    fn coin_inserted(&mut self) -> bool {
        self.requests.coin_inserted
    }

    fn double_wash_requested(&mut self) -> bool {
        self.requests.double_wash_requested
    }

    fn pause_requested(&mut self) -> bool {
        self.requests.pause_requested
    }
}

/// "Ready" indicator driven from the availability signal
pub trait AvailabilityOutput {
    /// Set the indicator
    fn set_available(&mut self, available: bool);

    /// Check the indicator
    fn is_available(&self) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TickRate;

    struct Lines {
        selector: u8,
        coin: bool,
    }

    impl RequestSource for Lines {
        fn rate_selector(&mut self) -> u8 {
            self.selector
        }

        fn coin_inserted(&mut self) -> bool {
            self.coin
        }

        fn double_wash_requested(&mut self) -> bool {
            false
        }

        fn pause_requested(&mut self) -> bool {
            true
        }
    }

    #[test]
    fn test_sample_builds_inputs() {
        let mut lines = Lines {
            selector: 3,
            coin: true,
        };
        let inputs = lines.sample();

        assert!(!inputs.reset);
        assert_eq!(inputs.tick_rate, TickRate::Hz1k);
        assert!(inputs.requests.coin_inserted);
        assert!(inputs.requests.pause_requested);
        assert!(!inputs.requests.double_wash_requested);
    }

    #[test]
    fn test_sample_normalizes_selector() {
        let mut lines = Lines {
            selector: 42,
            coin: false,
        };
        assert_eq!(lines.sample().tick_rate, TickRate::Hz1);
    }

    #[test]
    fn test_fixed_inputs_sample_themselves() {
        let mut fixed = TickInputs::new(TickRate::Hz100, Requests::coin());
        assert_eq!(fixed.sample(), fixed);

        let mut reset = TickInputs::reset(TickRate::Hz10);
        assert!(reset.sample().reset);
    }
}
