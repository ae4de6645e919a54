//! Port interfaces for authentication and profile management
//!
//! These traits define the boundaries between core business logic
//! and infrastructure implementations for the identity provider, the
//! hosted profile store, and avatar object storage.

use async_trait::async_trait;
use mediatracker_domain::{ProfileUpdate, Result, Session, UserProfile, UserRole};

/// Attributes collected at registration time.
///
/// Forwarded to the identity provider as signup metadata so a server-side
/// trigger can create the profile row; also used for the client-side
/// insert fallback when the trigger has not run yet.
#[derive(Debug, Clone)]
pub struct SignUpDetails {
    pub full_name: String,
    pub role: UserRole,
    pub state: String,
}

/// Trait for the hosted identity provider (email/password auth).
///
/// Implementations own local session persistence: a successful sign-in or
/// sign-up stores the session, `current_session` restores (and refreshes)
/// it, and `sign_out` clears it.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Authenticate with email and password.
    async fn sign_in(&self, email: &str, password: &str) -> Result<Session>;

    /// Register a new identity, attaching profile metadata.
    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        details: &SignUpDetails,
    ) -> Result<Session>;

    /// Restore the persisted session, refreshing an expired access token.
    ///
    /// `Ok(None)` means no usable session exists; that is an expected
    /// outcome on first launch, not an error.
    async fn current_session(&self) -> Result<Option<Session>>;

    /// Revoke the session remotely and clear local persistence.
    async fn sign_out(&self) -> Result<()>;

    /// Dispatch a password-reset email.
    async fn send_password_reset(&self, email: &str) -> Result<()>;
}

/// Trait for the hosted profile store, keyed by identity user id.
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Get a profile row by user id.
    async fn get_by_id(&self, id: &str) -> Result<Option<UserProfile>>;

    /// Insert a profile row, ignoring a concurrent duplicate insert.
    async fn create(&self, profile: &UserProfile) -> Result<()>;

    /// Apply a partial update and return the stored row.
    async fn update(&self, id: &str, update: &ProfileUpdate) -> Result<UserProfile>;
}

/// Trait for avatar object storage.
#[async_trait]
pub trait AvatarStorage: Send + Sync {
    /// Upload image bytes under the avatar path convention and return the
    /// publicly resolvable URL.
    async fn upload_avatar(&self, user_id: &str, bytes: Vec<u8>) -> Result<String>;
}
