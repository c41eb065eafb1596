use crate::cmd::{open_session, save};
use crate::output::print_json;
use rogue_core::{scenario::Question, session::Session, types::Phase};
use serde::Serialize;
use std::path::Path;

#[derive(Serialize)]
struct QuestionOutput<'a> {
    phase: Phase,
    scenario_id: u32,
    scenario_name: &'a str,
    scenario_description: &'a str,
    question_number: usize,
    question_count: usize,
    question: &'a Question,
}

pub fn run(root: &Path, json: bool) -> anyhow::Result<()> {
    let (_, mut session) = open_session(root)?;
    show_current(root, &mut session, json)
}

/// Print the pending question, or a hint when there is none. The first
/// display of a question starts its answer timer.
pub fn show_current(root: &Path, session: &mut Session, json: bool) -> anyhow::Result<()> {
    let phase = session.state().current_phase;
    if !phase.is_gameplay() {
        let hint = match phase {
            Phase::Results => "Assessment complete. Run 'rogue results' to see your analysis.",
            _ => "No active question. Run 'rogue start' to begin.",
        };
        if json {
            return print_json(&serde_json::json!({ "phase": phase, "question": null }));
        }
        println!("{hint}");
        return Ok(());
    }

    let index = session.state().current_question_index;
    let questions = session.current_questions().to_vec();
    let Some(question) = questions.get(index) else {
        anyhow::bail!("scenario {} has no pending question", session.state().current_scenario_id);
    };
    if session.mark_question_shown() {
        save(root, session);
    }

    let state = session.state();
    let (name, description) = state
        .current_scenario()
        .map(|s| (s.name.as_str(), s.description.as_str()))
        .unwrap_or(("", ""));

    let out = QuestionOutput {
        phase,
        scenario_id: state.current_scenario_id.get(),
        scenario_name: name,
        scenario_description: description,
        question_number: index + 1,
        question_count: questions.len(),
        question,
    };

    if json {
        return print_json(&out);
    }

    println!(
        "[{}] Scenario {}: {}",
        phase.display_name(),
        out.scenario_id,
        out.scenario_name
    );
    if !out.scenario_description.is_empty() {
        println!("{}", out.scenario_description);
    }
    println!();
    println!(
        "Question {}/{} ({}): {}",
        out.question_number, out.question_count, question.decision_type, question.prompt
    );
    if let Some(code) = &question.code_template {
        println!("\n{code}");
    }
    if let Some(expected) = &question.expected_output {
        println!("Expected output: {expected}");
    }
    println!();
    for option in &question.options {
        println!("  {}  {}", option.id, option.text);
    }
    println!("\nAnswer with: rogue choose <option>");
    Ok(())
}
