//! Tick controller coordinating the phase machine and interval timer
//!
//! Each tick computes every next value from one immutable [`Snapshot`] and
//! commits the result in a single assignment. Nothing read during a tick
//! has already been updated by that tick.

use heapless::Deque;

use crate::config::{ConfigError, MachineConfig, TickRate};
use crate::state::{next_wash_repeats, Phase, Requests, TickInputs};
use crate::timer::{DurationTable, IntervalTimer};
use crate::traits::{AvailabilityOutput, RequestSource};

/// Phase changes kept for diagnostics
pub const HISTORY_DEPTH: usize = 16;

/// Committed controller state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Snapshot {
    /// Active phase
    pub phase: Phase,
    /// Ticks counted in the active phase
    pub timer: IntervalTimer,
    /// Washes completed in this cycle
    pub wash_repeats: u8,
}

impl Snapshot {
    /// Power-on and reset state
    pub const INITIAL: Self = Self {
        phase: Phase::Idle,
        timer: IntervalTimer::new(),
        wash_repeats: 0,
    };

    /// Compute the snapshot for the next tick
    ///
    /// Returns the next snapshot and the elapsed pulse that produced it.
    /// The pulse is computed once from `self` and feeds both the phase
    /// decision and the repeat count.
    pub fn next(&self, table: &DurationTable, inputs: &TickInputs) -> (Self, bool) {
        if inputs.reset {
            return (Self::INITIAL, false);
        }

        let threshold = table.threshold(self.phase, inputs.tick_rate);
        let timer = self
            .timer
            .evaluate(self.phase, threshold, inputs.requests.pause_requested);

        let next = Self {
            phase: self
                .phase
                .transition(timer.elapsed, inputs.requests, self.wash_repeats),
            timer: timer.next,
            wash_repeats: next_wash_repeats(self.phase, timer.elapsed, self.wash_repeats),
        };

        (next, timer.elapsed)
    }
}

/// Signals produced by one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Outputs {
    /// Machine is idle and ready for a coin
    pub available: bool,
    /// Phase committed by this tick
    pub phase: Phase,
    /// The previous phase timed out on this tick
    pub elapsed: bool,
}

/// Record of a committed phase change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PhaseChange {
    /// Tick number on which the change was committed
    pub tick: u64,
    /// Phase before the change
    pub from: Phase,
    /// Phase after the change
    pub to: Phase,
}

/// Washer controller
///
/// Owns the committed snapshot and the precomputed duration table.
#[derive(Debug, Clone)]
pub struct Controller {
    table: DurationTable,
    rate: TickRate,
    snapshot: Snapshot,
    ticks: u64,
    history: Deque<PhaseChange, HISTORY_DEPTH>,
}

impl Controller {
    /// Create a controller in the initial state at the default rate
    pub fn new(table: DurationTable) -> Self {
        Self::with_rate(table, TickRate::default())
    }

    /// Create a controller that assumes `rate` until a tick selects another
    pub fn with_rate(table: DurationTable, rate: TickRate) -> Self {
        Self {
            table,
            rate,
            snapshot: Snapshot::INITIAL,
            ticks: 0,
            history: Deque::new(),
        }
    }

    /// Create a controller from a validated config
    pub fn from_config(config: &MachineConfig) -> Result<Self, ConfigError> {
        Ok(Self::with_rate(
            DurationTable::from_config(config)?,
            config.tick_rate,
        ))
    }

    /// Advance one tick
    ///
    /// The rate carried by `inputs` becomes the active rate.
    pub fn step(&mut self, inputs: TickInputs) -> Outputs {
        let previous = self.snapshot;
        let (next, elapsed) = previous.next(&self.table, &inputs);

        self.snapshot = next;
        self.rate = inputs.tick_rate;
        self.ticks = self.ticks.wrapping_add(1);

        #[cfg(feature = "defmt")]
        self.log_tick(&previous, &inputs, elapsed);

        if next.phase != previous.phase {
            self.record(previous.phase, next.phase);
        }

        Outputs {
            available: next.phase.is_available(),
            phase: next.phase,
            elapsed,
        }
    }

    /// Advance one tick at the active rate
    pub fn tick(&mut self, requests: Requests) -> Outputs {
        self.step(TickInputs::new(self.rate, requests))
    }

    /// Sample a request source and advance one tick
    pub fn poll<S: RequestSource>(&mut self, source: &mut S) -> Outputs {
        let inputs = source.sample();
        self.step(inputs)
    }

    /// Force the initial state outside the tick loop
    ///
    /// Tick count and history are kept.
    pub fn reset(&mut self) {
        let from = self.snapshot.phase;
        self.snapshot = Snapshot::INITIAL;

        #[cfg(feature = "defmt")]
        defmt::info!("Controller reset from {:?}", from);

        if from != Phase::Idle {
            self.record(from, Phase::Idle);
        }
    }

    /// Write the availability signal to an indicator
    pub fn drive_output<O: AvailabilityOutput>(&self, output: &mut O) {
        output.set_available(self.available());
    }

    /// Current phase
    pub fn phase(&self) -> Phase {
        self.snapshot.phase
    }

    /// Machine is idle and ready for a coin
    pub fn available(&self) -> bool {
        self.snapshot.phase.is_available()
    }

    /// Committed state
    pub fn snapshot(&self) -> Snapshot {
        self.snapshot
    }

    /// Ticks counted in the current phase
    pub fn elapsed_ticks(&self) -> u32 {
        self.snapshot.timer.counter()
    }

    /// Washes completed in the current cycle
    pub fn wash_repeats(&self) -> u8 {
        self.snapshot.wash_repeats
    }

    /// Ticks processed since construction
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Duration table in use
    pub fn table(&self) -> &DurationTable {
        &self.table
    }

    /// Active rate: the configured one until a tick selects another
    pub fn tick_rate(&self) -> TickRate {
        self.rate
    }

    /// Ticks left in the current phase at the active rate, counting the
    /// pulse tick
    ///
    /// Zero while idle.
    pub fn remaining_ticks(&self) -> u32 {
        self.table
            .ticks(self.snapshot.phase, self.rate)
            .saturating_sub(self.snapshot.timer.counter())
    }

    /// Recent phase changes, oldest first
    pub fn history(&self) -> impl Iterator<Item = &PhaseChange> {
        self.history.iter()
    }

    /// Most recent phase change
    pub fn last_change(&self) -> Option<&PhaseChange> {
        self.history.back()
    }

    fn record(&mut self, from: Phase, to: Phase) {
        if self.history.is_full() {
            self.history.pop_front();
        }
        // Cannot fail: a slot was freed above
        let _ = self.history.push_back(PhaseChange {
            tick: self.ticks,
            from,
            to,
        });
    }

    #[cfg(feature = "defmt")]
    fn log_tick(&self, previous: &Snapshot, inputs: &TickInputs, elapsed: bool) {
        let next = &self.snapshot;

        if inputs.reset {
            defmt::info!("Reset asserted in {:?}", previous.phase);
            return;
        }

        if elapsed {
            defmt::debug!(
                "{:?} elapsed after {} ticks",
                previous.phase,
                previous.timer.counter() + 1
            );
        } else if inputs.requests.pause_requested
            && previous.phase.pausable()
            && next.timer == previous.timer
        {
            defmt::debug!("Spin paused at {} ticks", previous.timer.counter());
        }

        if next.phase != previous.phase {
            defmt::info!(
                "Phase {:?} -> {:?} (washes {})",
                previous.phase,
                next.phase,
                next.wash_repeats
            );
        }
    }
}

impl Default for Controller {
    fn default() -> Self {
        Self::new(DurationTable::default())
    }
}
