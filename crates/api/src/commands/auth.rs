//! Authentication commands

use std::sync::Arc;
use std::time::Instant;

use mediatracker_core::{AuthState, SignUpDetails};
use mediatracker_domain::{Result, UserProfile, UserRole};

use super::finish;
use crate::context::AppContext;

/// Authenticate with email and password.
///
/// On success the session is persisted and the profile bootstrapped, so
/// the returned view-model is ready for display.
pub async fn sign_in(
    ctx: &Arc<AppContext>,
    email: &str,
    password: &str,
) -> Result<UserProfile> {
    let start = Instant::now();
    let result = ctx.sessions.sign_in(email, password).await;
    finish("auth::sign_in", start, &result);
    result
}

/// Register a new account with the attributes collected at signup.
pub async fn sign_up(
    ctx: &Arc<AppContext>,
    email: &str,
    password: &str,
    full_name: &str,
    role: UserRole,
    state: &str,
) -> Result<UserProfile> {
    let start = Instant::now();
    let details = SignUpDetails {
        full_name: full_name.to_string(),
        role,
        state: state.to_string(),
    };
    let result = ctx.sessions.sign_up(email, password, details).await;
    finish("auth::sign_up", start, &result);
    result
}

/// Restore a persisted session, if one exists.
///
/// `Ok(None)` is the normal signed-out launch path, not a failure.
pub async fn check_session(ctx: &Arc<AppContext>) -> Result<Option<UserProfile>> {
    let start = Instant::now();
    let result = ctx.sessions.check_session().await;
    finish("auth::check_session", start, &result);
    result
}

/// Sign out. Local state is always cleared, even when remote revocation
/// fails.
pub async fn sign_out(ctx: &Arc<AppContext>) -> Result<()> {
    let start = Instant::now();
    let result = ctx.sessions.sign_out().await;
    finish("auth::sign_out", start, &result);
    result
}

/// Dispatch a password-reset email.
pub async fn send_password_reset(ctx: &Arc<AppContext>, email: &str) -> Result<()> {
    let start = Instant::now();
    let result = ctx.sessions.send_password_reset(email).await;
    finish("auth::send_password_reset", start, &result);
    result
}

/// Snapshot of the current auth state, no I/O.
pub fn auth_state(ctx: &Arc<AppContext>) -> AuthState {
    ctx.sessions.state()
}
