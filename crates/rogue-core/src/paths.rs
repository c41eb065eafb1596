use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Directory constants
// ---------------------------------------------------------------------------

pub const ROGUE_DIR: &str = ".rogue";

pub const CONFIG_FILE: &str = ".rogue/config.yaml";
pub const STATE_FILE: &str = ".rogue/state.json";

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn rogue_dir(root: &Path) -> PathBuf {
    root.join(ROGUE_DIR)
}

pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}

pub fn state_path(root: &Path) -> PathBuf {
    root.join(STATE_FILE)
}
