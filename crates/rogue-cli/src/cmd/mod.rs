pub mod choose;
pub mod config;
pub mod init;
pub mod question;
pub mod reset;
pub mod results;
pub mod scenarios;
pub mod start;
pub mod status;

use anyhow::Context;
use rogue_core::{config::Config, provider, session::Session, state::GameState};
use std::path::Path;

/// Load config and saved progress, and wire up the configured provider.
pub fn open_session(root: &Path) -> anyhow::Result<(Config, Session)> {
    let config = Config::load(root).context("failed to load config")?;
    let state = GameState::load_or_default(root);
    let provider = provider::from_config(&config.provider);
    let session = Session::new(state, provider, config.scoring.clone());
    Ok((config, session))
}

/// Persist progress. A failed save is logged and play continues.
pub fn save(root: &Path, session: &Session) {
    if let Err(e) = session.state().save(root) {
        tracing::warn!("failed to save game state: {e}");
    }
}
