//! # MediaTracker Infrastructure
//!
//! Infrastructure implementations of core domain ports.
//!
//! This crate contains:
//! - The retrying HTTP client shared by every adapter
//! - The hosted-backend adapters (auth, row store, object storage,
//!   realtime channel)
//! - Keyring-backed session persistence
//! - The configuration loader
//!
//! ## Architecture
//! - Implements traits defined in `mediatracker-core`
//! - Contains all "impure" code (HTTP, WebSocket, keyring, env)

pub mod config;
pub mod errors;
pub mod http;
pub mod session;
pub mod supabase;

// Re-export commonly used items
pub use config::loader as config_loader;
pub use errors::InfraError;
pub use http::HttpClient;
pub use session::{KeyringSessionStore, MemorySessionStore, SessionStore};
pub use supabase::auth::GoTrueClient;
pub use supabase::realtime::RealtimeClient;
pub use supabase::rest::{PostgrestMessages, PostgrestProfiles};
pub use supabase::storage::StorageClient;
pub use supabase::SupabaseEndpoints;
