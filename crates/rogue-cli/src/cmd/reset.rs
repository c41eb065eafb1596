use crate::cmd::{open_session, save};
use crate::output::print_json;
use std::path::Path;

pub fn run(root: &Path, json: bool) -> anyhow::Result<()> {
    let (_, mut session) = open_session(root)?;
    session.reset_game();
    save(root, &session);

    if json {
        let state = session.state();
        return print_json(&serde_json::json!({
            "phase": state.current_phase,
            "progress": state.progress,
        }));
    }
    println!("Game reset. Run 'rogue start' to begin again.");
    Ok(())
}
