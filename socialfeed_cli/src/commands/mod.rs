//! CLI subcommand implementations.

pub mod auth;
pub mod comments;
pub mod feed;
pub mod notifications;
pub mod posts;
pub mod profile;
pub mod users;

use anyhow::{bail, Result};
use socialfeed_lib::{gate, Route, Session};

/// Fails unless the session may open `route`.
pub(crate) fn require_access(route: Route, session: &Session) -> Result<()> {
    if gate(route, session) == Route::Login {
        bail!("Not authenticated. Please log in (pass --token or set SOCIALFEED_TOKEN).");
    }
    Ok(())
}
