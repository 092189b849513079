//! Phase state machine
//!
//! Defines the authoritative phase sequence of a wash cycle.
//! The state machine is explicit, finite, and deterministic.

pub mod events;
pub mod machine;

pub use events::{Requests, TickInputs};
pub use machine::{next_wash_repeats, Phase, DOUBLE_WASH_REPEAT};
