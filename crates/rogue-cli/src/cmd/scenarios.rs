use crate::cmd::open_session;
use crate::output::{print_json, print_table};
use rogue_core::scenario::Scenario;
use rogue_core::types::Phase;
use std::path::Path;

pub fn run(root: &Path, phase: Option<&str>, json: bool) -> anyhow::Result<()> {
    let filter: Option<Phase> = phase.map(str::parse).transpose()?;
    let (_, session) = open_session(root)?;
    let state = session.state();

    let scenarios: Vec<&Scenario> = match filter {
        Some(p) => state.scenarios_in(p).collect(),
        None => state.scenarios.iter().collect(),
    };

    if json {
        return print_json(&scenarios);
    }

    let rows = scenarios
        .iter()
        .map(|s| {
            let marker = if s.completed {
                "done"
            } else if s.id == state.current_scenario_id && state.current_phase == s.phase {
                "current"
            } else {
                ""
            };
            vec![
                s.id.to_string(),
                s.name.clone(),
                s.phase.display_name().to_string(),
                marker.to_string(),
            ]
        })
        .collect();
    print_table(&["ID", "NAME", "PHASE", "STATUS"], rows);
    Ok(())
}
