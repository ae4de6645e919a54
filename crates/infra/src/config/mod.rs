//! Configuration loading
//!
//! Resolves application configuration from environment variables first,
//! falling back to probed config files.

pub mod loader;

pub use loader::{load, load_from_env, load_from_file, probe_config_paths};
