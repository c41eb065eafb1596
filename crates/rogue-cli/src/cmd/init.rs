use anyhow::Context;
use rogue_core::{config::Config, io, paths, state::GameState};
use std::path::Path;

pub fn run(root: &Path) -> anyhow::Result<()> {
    println!("Initializing Rogue AI Protocol in: {}", root.display());

    let dir = paths::rogue_dir(root);
    io::ensure_dir(&dir).with_context(|| format!("failed to create {}", dir.display()))?;

    if paths::config_path(root).exists() {
        println!("  exists:  {}", paths::CONFIG_FILE);
    } else {
        Config::default()
            .save(root)
            .context("failed to write config.yaml")?;
        println!("  created: {}", paths::CONFIG_FILE);
    }

    if paths::state_path(root).exists() {
        println!("  exists:  {}", paths::STATE_FILE);
    } else {
        GameState::default()
            .save(root)
            .context("failed to write state.json")?;
        println!("  created: {}", paths::STATE_FILE);
    }

    println!("\nRun 'rogue start' to begin the mission.");
    Ok(())
}
