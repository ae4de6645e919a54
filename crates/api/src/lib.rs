//! # MediaTracker API
//!
//! Application layer - command surface and main entry point.
//!
//! This crate contains:
//! - Commands (frontend → backend bridge)
//! - Application context (dependency injection)
//! - Main entry point and setup
//!
//! ## Architecture
//! - Depends on `common`, `core`, and `infra`
//! - Wires up the hexagonal architecture
//! - Exposes async command functions for an embedding shell

pub mod commands;
pub mod context;
pub mod utils;

// Re-export for convenience
pub use commands::*;
pub use context::*;
