//! MediaTracker - zone health media tracking client
//!
//! Main entry point: loads configuration, wires the application context,
//! and restores any persisted session before handing control to the shell.

use mediatracker_api::utils::logging::init_tracing;
use mediatracker_api::{check_session, AppContext};
use mediatracker_domain::Result;
use mediatracker_infra::config_loader;

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let config = config_loader::load()?;
    let ctx = AppContext::init(config)?;

    match check_session(&ctx).await? {
        Some(user) => {
            tracing::info!(user_id = %user.id, state = %user.state, "session restored");
        }
        None => {
            tracing::info!("no persisted session, starting signed out");
        }
    }

    Ok(())
}
