//! Configuration types
//!
//! Board-agnostic configuration stored as postcard binary data or loaded
//! from TOML text.

#[cfg(feature = "serde")]
pub mod storage;
pub mod types;

#[cfg(feature = "serde")]
pub use storage::{decode, encode, MAX_CONFIG_SIZE};
#[cfg(feature = "toml")]
pub use storage::from_toml;
pub use types::*;
