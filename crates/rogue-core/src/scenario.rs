use crate::metrics::TraitDelta;
use crate::types::{DecisionType, Phase, ScenarioId};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// AnswerOption
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerOption {
    /// Unique within the owning question.
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub traits: TraitDelta,
}

impl AnswerOption {
    pub fn new(id: impl Into<String>, text: impl Into<String>, traits: TraitDelta) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            traits,
        }
    }

    /// Options substituted when content is malformed, so the flow never stalls.
    pub fn placeholders() -> Vec<AnswerOption> {
        vec![
            AnswerOption::new("continue", "Continue", TraitDelta::new()),
            AnswerOption::new("skip", "Skip", TraitDelta::new()),
        ]
    }
}

// ---------------------------------------------------------------------------
// Question
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    #[serde(rename = "type")]
    pub decision_type: DecisionType,
    #[serde(rename = "questionText")]
    pub prompt: String,
    pub options: Vec<AnswerOption>,
    #[serde(
        rename = "codeTemplate",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub code_template: Option<String>,
    #[serde(
        rename = "expectedOutput",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub expected_output: Option<String>,
}

impl Question {
    pub fn new(
        id: impl Into<String>,
        decision_type: DecisionType,
        prompt: impl Into<String>,
        options: Vec<AnswerOption>,
    ) -> Self {
        Self {
            id: id.into(),
            decision_type,
            prompt: prompt.into(),
            options,
            code_template: None,
            expected_output: None,
        }
    }

    pub fn with_code(
        mut self,
        template: impl Into<String>,
        expected_output: impl Into<String>,
    ) -> Self {
        self.code_template = Some(template.into());
        self.expected_output = Some(expected_output.into());
        self
    }

    pub fn option(&self, option_id: &str) -> Option<&AnswerOption> {
        self.options.iter().find(|o| o.id == option_id)
    }

    pub fn is_coding(&self) -> bool {
        self.code_template.is_some()
    }
}

// ---------------------------------------------------------------------------
// ScenarioMeta / Scenario
// ---------------------------------------------------------------------------

/// Catalog entry as served by a provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioMeta {
    pub id: ScenarioId,
    pub name: String,
    pub phase: Phase,
    #[serde(default)]
    pub description: String,
}

/// Catalog entry tracked by the game, with its completion flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    pub id: ScenarioId,
    pub name: String,
    pub phase: Phase,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub completed: bool,
}

impl From<ScenarioMeta> for Scenario {
    fn from(meta: ScenarioMeta) -> Self {
        Self {
            id: meta.id,
            name: meta.name,
            phase: meta.phase,
            description: meta.description,
            completed: false,
        }
    }
}

/// Build a catalog from provider metadata, sorted by id with duplicates dropped.
pub fn catalog_from_meta(meta: Vec<ScenarioMeta>) -> Vec<Scenario> {
    let mut scenarios: Vec<Scenario> = meta.into_iter().map(Scenario::from).collect();
    scenarios.sort_by_key(|s| s.id);
    scenarios.dedup_by_key(|s| s.id);
    scenarios
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_question() -> Question {
        Question::new(
            "inf_1_1",
            DecisionType::Technical,
            "How do you proceed?",
            vec![
                AnswerOption::new("a", "Brute force", TraitDelta::new().with("technicalSkill", 3)),
                AnswerOption::new("b", "Pattern analysis", TraitDelta::new()),
            ],
        )
    }

    #[test]
    fn option_lookup() {
        let q = sample_question();
        assert_eq!(q.option("a").map(|o| o.text.as_str()), Some("Brute force"));
        assert!(q.option("z").is_none());
    }

    #[test]
    fn question_wire_names() {
        let q = sample_question().with_code("def solve(): pass", "42");
        let json = serde_json::to_value(&q).unwrap();
        assert_eq!(json["type"], "technical");
        assert_eq!(json["questionText"], "How do you proceed?");
        assert_eq!(json["codeTemplate"], "def solve(): pass");
        assert_eq!(json["expectedOutput"], "42");
        assert_eq!(json["options"][0]["traits"]["technicalSkill"], 3);
    }

    #[test]
    fn optional_code_fields_are_omitted() {
        let json = serde_json::to_value(sample_question()).unwrap();
        assert!(json.get("codeTemplate").is_none());
        assert!(!sample_question().is_coding());
    }

    #[test]
    fn catalog_sorts_and_dedups() {
        let meta = |id: u32| ScenarioMeta {
            id: ScenarioId(id),
            name: format!("S{id}"),
            phase: Phase::Infiltration,
            description: String::new(),
        };
        let catalog = catalog_from_meta(vec![meta(3), meta(1), meta(3), meta(2)]);
        let ids: Vec<u32> = catalog.iter().map(|s| s.id.get()).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert!(catalog.iter().all(|s| !s.completed));
    }

    #[test]
    fn placeholders_have_no_weights() {
        let opts = AnswerOption::placeholders();
        assert_eq!(opts.len(), 2);
        assert_eq!(opts[0].text, "Continue");
        assert_eq!(opts[1].text, "Skip");
        assert!(opts.iter().all(|o| o.traits.is_empty()));
    }
}
