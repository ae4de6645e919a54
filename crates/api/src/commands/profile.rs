//! Profile commands

use std::sync::Arc;
use std::time::Instant;

use mediatracker_domain::{ProfileUpdate, Result, UserProfile};

use super::finish;
use crate::context::AppContext;

/// Currently signed-in user, if any. No I/O.
pub fn current_user(ctx: &Arc<AppContext>) -> Option<UserProfile> {
    ctx.sessions.current_user()
}

/// Apply a partial profile update and return the stored row.
pub async fn update_profile(
    ctx: &Arc<AppContext>,
    update: ProfileUpdate,
) -> Result<UserProfile> {
    let start = Instant::now();
    let result = ctx.sessions.set_user(update).await;
    finish("profile::update_profile", start, &result);
    result
}

/// Upload a new avatar image and persist its public URL on the profile.
pub async fn upload_avatar(ctx: &Arc<AppContext>, bytes: Vec<u8>) -> Result<UserProfile> {
    let start = Instant::now();
    let result = ctx.sessions.upload_avatar(bytes).await;
    finish("profile::upload_avatar", start, &result);
    result
}
