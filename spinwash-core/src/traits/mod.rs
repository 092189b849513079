//! Signal abstraction traits
//!
//! These traits define the interface between the controller and the
//! hardware that drives its request lines and shows its output.

pub mod signals;

pub use signals::{AvailabilityOutput, RequestSource};
