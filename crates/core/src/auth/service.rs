//! Session/profile bootstrap service - core business logic

use std::sync::Arc;

use mediatracker_common::validation::is_valid_email;
use mediatracker_domain::{
    AuthErrorKind, MediaTrackerError, ProfileUpdate, Result, Session, UserProfile,
};
use parking_lot::RwLock;
use tracing::{debug, info, warn};

use super::ports::{AvatarStorage, IdentityProvider, ProfileRepository, SignUpDetails};

/// Process-wide authentication state.
///
/// `Unknown` only exists before the first `check_session` on launch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthState {
    Unknown,
    Unauthenticated,
    Authenticated(UserProfile),
}

impl AuthState {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }

    pub fn user(&self) -> Option<&UserProfile> {
        match self {
            Self::Authenticated(profile) => Some(profile),
            _ => None,
        }
    }
}

/// Sequences authentication against the identity provider and resolves the
/// associated profile row into a single normalized user view-model.
///
/// All auth state mutations flow through the operations on this service;
/// readers get snapshots via [`SessionService::state`]. Concurrent in-flight
/// operations are not serialized against each other - the last one to
/// resolve wins, matching the event-loop semantics of the mobile client.
pub struct SessionService {
    identity: Arc<dyn IdentityProvider>,
    profiles: Arc<dyn ProfileRepository>,
    avatars: Arc<dyn AvatarStorage>,
    state: RwLock<AuthState>,
}

impl SessionService {
    pub fn new(
        identity: Arc<dyn IdentityProvider>,
        profiles: Arc<dyn ProfileRepository>,
        avatars: Arc<dyn AvatarStorage>,
    ) -> Self {
        Self { identity, profiles, avatars, state: RwLock::new(AuthState::Unknown) }
    }

    /// Snapshot of the current auth state.
    pub fn state(&self) -> AuthState {
        self.state.read().clone()
    }

    /// Currently signed-in user, if any.
    pub fn current_user(&self) -> Option<UserProfile> {
        self.state.read().user().cloned()
    }

    /// Authenticate with email and password and bootstrap the profile.
    ///
    /// A missing profile row is synthesized with default attributes and a
    /// best-effort insert; an insert failure is logged and the in-memory
    /// profile is used so a successful authentication never blocks on the
    /// profile store.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<UserProfile> {
        let session = self.identity.sign_in(email, password).await?;
        info!(user_id = %session.user_id, "sign-in succeeded");

        let profile = self.bootstrap_profile(&session).await;
        *self.state.write() = AuthState::Authenticated(profile.clone());
        Ok(profile)
    }

    /// Register a new identity and bootstrap its profile.
    ///
    /// Profile creation is expected to happen via a server-side trigger on
    /// the new identity; the read-after-write here covers the window where
    /// the trigger has not run, falling back to a client-side insert with
    /// the submitted attributes.
    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
        details: SignUpDetails,
    ) -> Result<UserProfile> {
        if !is_valid_email(email) {
            return Err(MediaTrackerError::Auth(AuthErrorKind::MalformedEmail));
        }

        let session = self.identity.sign_up(email, password, &details).await?;
        info!(user_id = %session.user_id, "sign-up succeeded");

        let profile = match self.profiles.get_by_id(&session.user_id).await {
            Ok(Some(existing)) => existing,
            Ok(None) => {
                let mut profile = UserProfile::default_for(&session.user_id, &session.email);
                profile.full_name = Some(details.full_name.clone());
                profile.role = details.role;
                profile.state = details.state.clone();
                self.persist_or_keep(profile).await
            }
            Err(err) => {
                warn!(error = %err, "profile read-after-write failed, using defaults");
                let mut profile = UserProfile::default_for(&session.user_id, &session.email);
                profile.full_name = Some(details.full_name);
                profile.role = details.role;
                profile.state = details.state;
                profile
            }
        };

        *self.state.write() = AuthState::Authenticated(profile.clone());
        Ok(profile)
    }

    /// Restore a persisted session on launch or revalidation.
    ///
    /// Resolves to `None` (and the `Unauthenticated` state) when no usable
    /// session exists; that outcome renders the sign-in flow, it is not an
    /// error. Transport failures propagate without transitioning the state.
    pub async fn check_session(&self) -> Result<Option<UserProfile>> {
        match self.identity.current_session().await? {
            Some(session) => {
                debug!(user_id = %session.user_id, "restored persisted session");
                let profile = self.bootstrap_profile(&session).await;
                *self.state.write() = AuthState::Authenticated(profile.clone());
                Ok(Some(profile))
            }
            None => {
                *self.state.write() = AuthState::Unauthenticated;
                Ok(None)
            }
        }
    }

    /// Sign out, local-first: the remote revocation is best-effort and the
    /// local state is always cleared.
    pub async fn sign_out(&self) -> Result<()> {
        if let Err(err) = self.identity.sign_out().await {
            warn!(error = %err, "remote sign-out failed, clearing local state anyway");
        }
        *self.state.write() = AuthState::Unauthenticated;
        Ok(())
    }

    /// Merge a partial profile update, persist it, and republish the result.
    pub async fn set_user(&self, update: ProfileUpdate) -> Result<UserProfile> {
        let current = self.current_user().ok_or(MediaTrackerError::NotLoggedIn)?;

        if update.is_empty() {
            return Ok(current);
        }

        let stored = self.profiles.update(&current.id, &update).await?;
        *self.state.write() = AuthState::Authenticated(stored.clone());
        Ok(stored)
    }

    /// Upload a profile picture and publish its URL on the profile.
    pub async fn upload_avatar(&self, bytes: Vec<u8>) -> Result<UserProfile> {
        let current = self.current_user().ok_or(MediaTrackerError::NotLoggedIn)?;

        let url = self.avatars.upload_avatar(&current.id, bytes).await?;
        self.set_user(ProfileUpdate { avatar_url: Some(url), ..ProfileUpdate::default() }).await
    }

    /// Dispatch a password-reset email. Malformed addresses are rejected
    /// before any round trip.
    pub async fn send_password_reset(&self, email: &str) -> Result<()> {
        if !is_valid_email(email) {
            return Err(MediaTrackerError::Auth(AuthErrorKind::MalformedEmail));
        }
        self.identity.send_password_reset(email).await
    }

    /// Resolve the profile for a session, creating a default row on a miss.
    async fn bootstrap_profile(&self, session: &Session) -> UserProfile {
        match self.profiles.get_by_id(&session.user_id).await {
            Ok(Some(profile)) => profile,
            Ok(None) => {
                debug!(user_id = %session.user_id, "no profile row, creating default");
                let profile = UserProfile::default_for(&session.user_id, &session.email);
                self.persist_or_keep(profile).await
            }
            Err(err) => {
                warn!(error = %err, "profile fetch failed, using in-memory defaults");
                UserProfile::default_for(&session.user_id, &session.email)
            }
        }
    }

    /// Best-effort insert of a synthesized profile. On failure (permission,
    /// race with another first login) the in-memory profile is returned so
    /// the signed-in user is not blocked; the row stays absent server-side.
    async fn persist_or_keep(&self, profile: UserProfile) -> UserProfile {
        if let Err(err) = self.profiles.create(&profile).await {
            warn!(user_id = %profile.id, error = %err, "profile insert fallback failed");
        }
        profile
    }
}
