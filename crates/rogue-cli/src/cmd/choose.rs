use crate::cmd::{open_session, save};
use crate::output::print_json;
use rogue_core::state::{ChoiceOutcome, CompletionOutcome};
use rogue_core::types::Phase;
use serde::Serialize;
use std::path::Path;
use std::time::Duration;

#[derive(Serialize)]
struct ChooseOutput {
    question_id: String,
    option_id: String,
    recorded: bool,
    points: u32,
    completed_scenarios: Vec<u32>,
    phase: Phase,
    progress: u8,
    total_points: u32,
}

pub fn run(
    root: &Path,
    option_id: &str,
    elapsed_ms: Option<u64>,
    pacing_ms: Option<u64>,
    json: bool,
) -> anyhow::Result<()> {
    let (config, mut session) = open_session(root)?;
    let scenario_before = session.state().current_scenario_id;
    let elapsed_ms = elapsed_ms.unwrap_or_else(|| session.answer_time_ms());
    tracing::debug!(elapsed_ms, "answer time");

    let Some(submission) = session.submit(option_id, elapsed_ms) else {
        anyhow::bail!("no question is pending; run 'rogue start'");
    };
    if submission.choice == ChoiceOutcome::UnknownOption {
        anyhow::bail!(
            "unknown option '{option_id}' for question {}",
            submission.question_id
        );
    }
    save(root, &session);

    let delay = pacing_ms.unwrap_or(config.pacing.analysis_delay_ms);
    if delay > 0 {
        if !json {
            println!("Analyzing decision...");
        }
        std::thread::sleep(Duration::from_millis(delay));
    }
    if session.mark_question_shown() {
        save(root, &session);
    }

    let points = match &submission.choice {
        ChoiceOutcome::Recorded { points, .. } => *points,
        _ => 0,
    };
    let mut completed = Vec::new();
    let mut scenario = scenario_before;
    for c in &submission.completions {
        match c {
            CompletionOutcome::Advanced { next } => {
                completed.push(scenario.get());
                scenario = *next;
            }
            CompletionOutcome::PhaseChanged { .. } => {
                completed.push(scenario.get());
                scenario = session.state().current_scenario_id;
            }
            CompletionOutcome::AlreadyCompleted | CompletionOutcome::UnknownScenario => {}
        }
    }

    let state = session.state();
    if json {
        return print_json(&ChooseOutput {
            question_id: submission.question_id.clone(),
            option_id: option_id.to_string(),
            recorded: submission.choice.is_recorded(),
            points,
            completed_scenarios: completed,
            phase: state.current_phase,
            progress: state.progress,
            total_points: state.score.points,
        });
    }

    match &submission.choice {
        ChoiceOutcome::Recorded { points, .. } => println!("Decision recorded: +{points} points"),
        ChoiceOutcome::AlreadyAnswered => println!(
            "Question {} was already answered; keeping the earlier choice.",
            submission.question_id
        ),
        _ => {}
    }
    for id in &completed {
        let name = state
            .scenario((*id).into())
            .map(|s| s.name.as_str())
            .unwrap_or("");
        println!("Scenario {id} complete: {name}");
    }
    if let Some((from, to)) = submission.phase_changed() {
        if let Some(badge) = from.badge() {
            println!("Phase complete: {} (badge earned: {badge})", from.display_name());
        }
        if to == Phase::Results {
            println!("\nAll scenarios complete. Run 'rogue results' for your analysis.");
            return Ok(());
        }
        println!("Entering phase: {}", to.display_name());
    }
    println!("Progress: {}%. Run 'rogue question' for the next decision.", state.progress);
    Ok(())
}
