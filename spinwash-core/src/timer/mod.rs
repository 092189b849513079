//! Phase timing
//!
//! Converts configured wall-clock durations into per-rate tick counts and
//! produces the one-tick elapsed pulse that ends each timed phase.

pub mod durations;
pub mod interval;

pub use durations::DurationTable;
pub use interval::{IntervalTimer, TimerOutput};
