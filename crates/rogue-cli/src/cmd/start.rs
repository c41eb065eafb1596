use crate::cmd::{open_session, question::show_current, save};
use rogue_core::types::Phase;
use std::path::Path;

/// Leave the briefing if needed, then show where the player stands.
pub fn run(root: &Path, json: bool) -> anyhow::Result<()> {
    let (_, mut session) = open_session(root)?;
    if session.skip_intro() {
        tracing::debug!("mission started");
        save(root, &session);
        if !json {
            println!("Mission started. Infiltrate The Core.\n");
        }
    } else if session.state().current_phase.is_gameplay() && !json {
        println!("Resuming mission.\n");
    }
    show_current(root, &mut session, json)
}

pub fn skip_intro(root: &Path, json: bool) -> anyhow::Result<()> {
    let (_, mut session) = open_session(root)?;
    if session.skip_intro() {
        save(root, &session);
        if !json {
            println!("Briefing skipped.\n");
        }
    } else if !json {
        let phase = session.state().current_phase;
        if phase != Phase::Results {
            println!("Briefing already complete.\n");
        }
    }
    show_current(root, &mut session, json)
}
