//! lumenvault-core: Shared types, errors, configuration, and unit conversion
//!
//! This crate provides the foundational types used across the LumenVault
//! client workspace.

pub mod config;
pub mod errors;
pub mod types;
pub mod units;

pub use config::*;
pub use errors::*;
pub use types::*;
