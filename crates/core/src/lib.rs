//! # MediaTracker Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - Port/adapter interfaces (traits) for the hosted backend
//! - The session/profile bootstrap service and its auth state machine
//! - The zone chat synchronizer and subscription handles
//!
//! ## Architecture Principles
//! - Only depends on `mediatracker-common` and `mediatracker-domain`
//! - No HTTP, WebSocket, or keyring code
//! - All external dependencies via traits
//! - Pure, testable business logic

pub mod auth;
pub mod chat;

// Re-export specific items to avoid ambiguity
pub use auth::ports::{AvatarStorage, IdentityProvider, ProfileRepository, SignUpDetails};
pub use auth::service::{AuthState, SessionService};
pub use chat::ports::{InsertFeed, MessageRepository, RealtimeEvents};
pub use chat::service::ChatService;
pub use chat::subscription::ZoneSubscription;
