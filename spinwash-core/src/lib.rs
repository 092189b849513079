//! Board-agnostic core logic for the Spinwash washing machine controller
//!
//! This crate contains the whole controller, independent of the clock
//! source, coin acceptor and valve/motor hardware:
//!
//! - Phase state machine (fill, wash, rinse, spin) with double-wash repeat
//! - Interval timer gating each phase, with spin-only pause
//! - Rate-aware duration table computed once from configuration
//! - Tick controller committing all state as one snapshot per tick
//! - Signal traits for the request lines and the availability output
//! - Configuration types, postcard storage and TOML loading

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod controller;
pub mod state;
pub mod timer;
pub mod traits;

pub use controller::{Controller, Outputs, PhaseChange, Snapshot, HISTORY_DEPTH};
