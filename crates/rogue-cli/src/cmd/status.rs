use crate::cmd::open_session;
use crate::output::print_json;
use rogue_core::types::{Phase, TOTAL_SCENARIOS};
use serde::Serialize;
use std::path::Path;

#[derive(Serialize)]
struct StatusOutput<'a> {
    phase: Phase,
    phase_name: &'static str,
    scenario_id: Option<u32>,
    scenario_name: Option<&'a str>,
    question_index: usize,
    question_count: usize,
    progress: u8,
    completed: usize,
    total: u32,
    points: u32,
    time_bonus: u32,
    badges: &'a [String],
}

pub fn run(root: &Path, json: bool) -> anyhow::Result<()> {
    let (_, mut session) = open_session(root)?;
    let question_count = session.current_questions().len();
    let state = session.state();
    let phase = state.current_phase;
    let scenario = phase
        .is_gameplay()
        .then(|| state.current_scenario())
        .flatten();

    let out = StatusOutput {
        phase,
        phase_name: phase.display_name(),
        scenario_id: scenario.map(|s| s.id.get()),
        scenario_name: scenario.map(|s| s.name.as_str()),
        question_index: state.current_question_index,
        question_count,
        progress: state.progress,
        completed: state.completed_count(),
        total: TOTAL_SCENARIOS,
        points: state.score.points,
        time_bonus: state.score.time_bonus,
        badges: &state.score.badges,
    };

    if json {
        return print_json(&out);
    }

    println!("Phase:     {}", out.phase_name);
    if let (Some(id), Some(name)) = (out.scenario_id, out.scenario_name) {
        println!("Scenario:  {id}/{} {name}", out.total);
        println!(
            "Question:  {}/{}",
            (out.question_index + 1).min(out.question_count),
            out.question_count
        );
    }
    println!("Progress:  {}% ({}/{} scenarios)", out.progress, out.completed, out.total);
    println!("Score:     {} points ({} speed bonus)", out.points, out.time_bonus);
    if !out.badges.is_empty() {
        println!("Badges:    {}", out.badges.join(", "));
    }
    Ok(())
}
