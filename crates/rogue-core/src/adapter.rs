//! Normalizes remote content payloads into the canonical schema.
//!
//! Remote services have served several historical shapes: options as an
//! array or as an object keyed by option id, traits as a map or as a list of
//! `{trait, value}` pairs, bare lists or lists wrapped in an envelope. Every
//! shape funnels through here so the rest of the crate sees one model.

use crate::error::{Result, RogueError};
use crate::metrics::TraitDelta;
use crate::scenario::{AnswerOption, Question, ScenarioMeta};
use crate::types::{DecisionType, Phase, ScenarioId};
use serde_json::{Map, Value};
use std::str::FromStr;

// ---------------------------------------------------------------------------
// Questions
// ---------------------------------------------------------------------------

/// Normalize a question payload. Accepts a bare list or `{"questions": [...]}`.
/// Anything else is rejected.
pub fn normalize_questions(payload: &Value) -> Result<Vec<Question>> {
    let items = unwrap_list(payload, "questions")?;
    Ok(items
        .iter()
        .enumerate()
        .filter_map(|(i, item)| normalize_question(item, i))
        .collect())
}

fn normalize_question(value: &Value, index: usize) -> Option<Question> {
    let Some(obj) = value.as_object() else {
        tracing::debug!(index, "skipping question that is not an object");
        return None;
    };

    let id = string_field(obj, &["id"]).unwrap_or_else(|| format!("q_{}", index + 1));
    let prompt = string_field(obj, &["questionText", "question", "prompt", "text"])
        .unwrap_or_default();
    let decision_type = obj
        .get("type")
        .and_then(Value::as_str)
        .map(decision_type_from_wire)
        .unwrap_or(DecisionType::Behavioral);

    let mut options = obj.get("options").map(normalize_options).unwrap_or_default();
    if options.is_empty() {
        tracing::warn!(question = %id, "malformed options, substituting placeholders");
        options = AnswerOption::placeholders();
    }

    let mut question = Question::new(id, decision_type, prompt, options);
    question.code_template = string_field(obj, &["codeTemplate", "code_template"]);
    question.expected_output = string_field(obj, &["expectedOutput", "expected_output"]);
    Some(question)
}

/// Map a wire type to a decision type. Legacy payloads tagged questions with
/// their phase; unknown values fall back to behavioral.
fn decision_type_from_wire(raw: &str) -> DecisionType {
    let lowered = raw.trim().to_ascii_lowercase();
    if let Ok(t) = DecisionType::from_str(&lowered) {
        return t;
    }
    match lowered.as_str() {
        "coding" | "infiltration" | "phase1" => DecisionType::Technical,
        "systems" | "phase2" => DecisionType::Analytical,
        "phase3" | "moral" => DecisionType::Ethical,
        _ => DecisionType::Behavioral,
    }
}

fn normalize_options(value: &Value) -> Vec<AnswerOption> {
    match value {
        Value::Array(items) => items
            .iter()
            .enumerate()
            .filter_map(|(i, item)| {
                let obj = item.as_object()?;
                let id = string_field(obj, &["id", "value"])
                    .unwrap_or_else(|| option_letter(i));
                Some(option_from_object(id, obj))
            })
            .collect(),
        Value::Object(map) => map
            .iter()
            .filter_map(|(key, item)| match item {
                Value::Object(obj) => Some(option_from_object(key.clone(), obj)),
                Value::String(text) => {
                    Some(AnswerOption::new(key.clone(), text.clone(), TraitDelta::new()))
                }
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    }
}

fn option_from_object(id: String, obj: &Map<String, Value>) -> AnswerOption {
    let text = string_field(obj, &["text", "label"]).unwrap_or_else(|| id.clone());
    let traits = obj
        .get("traits")
        .or_else(|| obj.get("weights"))
        .map(normalize_traits)
        .unwrap_or_default();
    AnswerOption::new(id, text, traits)
}

fn option_letter(index: usize) -> String {
    char::from_u32('a' as u32 + index as u32)
        .map(String::from)
        .unwrap_or_else(|| format!("opt_{index}"))
}

fn normalize_traits(value: &Value) -> TraitDelta {
    match value {
        Value::Object(map) => map
            .iter()
            .filter_map(|(name, v)| integer(v).map(|n| (name.clone(), n)))
            .collect(),
        Value::Array(items) => items
            .iter()
            .filter_map(|item| {
                let obj = item.as_object()?;
                let name = string_field(obj, &["trait", "name"])?;
                let delta = ["value", "weight"]
                    .iter()
                    .find_map(|k| obj.get(*k).and_then(integer))?;
                Some((name, delta))
            })
            .collect(),
        _ => TraitDelta::new(),
    }
}

// ---------------------------------------------------------------------------
// Scenarios
// ---------------------------------------------------------------------------

/// Normalize a scenario catalog payload. Accepts a bare list or
/// `{"scenarios": [...]}`. Entries whose id falls outside every phase are
/// dropped.
pub fn normalize_scenarios(payload: &Value) -> Result<Vec<ScenarioMeta>> {
    let items = unwrap_list(payload, "scenarios")?;
    Ok(items.iter().filter_map(normalize_scenario).collect())
}

fn normalize_scenario(value: &Value) -> Option<ScenarioMeta> {
    let obj = value.as_object()?;
    let raw_id = obj.get("id")?;
    let id = raw_id
        .as_u64()
        .or_else(|| raw_id.as_str().and_then(|s| s.trim().parse().ok()))
        .and_then(|n| u32::try_from(n).ok())
        .map(ScenarioId)?;

    let owner = Phase::for_scenario(id)?;
    let phase = obj
        .get("phase")
        .and_then(Value::as_str)
        .and_then(|s| Phase::from_str(s).ok())
        .filter(|p| *p == owner)
        .unwrap_or(owner);

    Some(ScenarioMeta {
        id,
        name: string_field(obj, &["name", "title"]).unwrap_or_else(|| format!("Scenario {id}")),
        phase,
        description: string_field(obj, &["description"]).unwrap_or_default(),
    })
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn unwrap_list<'a>(payload: &'a Value, envelope: &str) -> Result<&'a Vec<Value>> {
    match payload {
        Value::Array(items) => Ok(items),
        Value::Object(obj) => obj
            .get(envelope)
            .and_then(Value::as_array)
            .ok_or_else(|| RogueError::Provider(format!("expected a list of {envelope}"))),
        _ => Err(RogueError::Provider(format!("expected a list of {envelope}"))),
    }
}

/// First non-empty string (or number, stringified) among `keys`.
fn string_field(obj: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|k| match obj.get(*k)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

fn integer(value: &Value) -> Option<i64> {
    value
        .as_i64()
        .or_else(|| value.as_f64().map(|f| f.round() as i64))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
