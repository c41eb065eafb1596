use crate::config::ScoringConfig;
use crate::content;
use crate::error::{Result, RogueError};
use crate::metrics::TraitSet;
use crate::paths;
use crate::scenario::{catalog_from_meta, Question, Scenario, ScenarioMeta};
use crate::score::GameScore;
use crate::types::{Phase, ScenarioId, TOTAL_SCENARIOS};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

// ---------------------------------------------------------------------------
// Transition outcomes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChoiceOutcome {
    Recorded {
        points: u32,
        /// Trait names on the option that the profile does not track.
        ignored_traits: Vec<String>,
    },
    /// The question already had a choice; nothing changed.
    AlreadyAnswered,
    UnknownQuestion,
    UnknownOption,
}

impl ChoiceOutcome {
    pub fn is_recorded(&self) -> bool {
        matches!(self, ChoiceOutcome::Recorded { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionOutcome {
    /// Next scenario within the same phase.
    Advanced { next: ScenarioId },
    PhaseChanged { from: Phase, to: Phase },
    /// The scenario was completed before; nothing changed.
    AlreadyCompleted,
    UnknownScenario,
}

// ---------------------------------------------------------------------------
// GameState
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    #[serde(default = "default_version")]
    pub version: u32,
    pub current_phase: Phase,
    pub current_scenario_id: ScenarioId,
    #[serde(default)]
    pub current_question_index: usize,
    /// Question id to selected option id.
    #[serde(default)]
    pub choices: BTreeMap<String, String>,
    #[serde(default)]
    pub metrics: TraitSet,
    #[serde(default)]
    pub progress: u8,
    #[serde(default)]
    pub score: GameScore,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,
    /// When the pending question was first displayed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question_shown_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub scenarios: Vec<Scenario>,
}

fn default_version() -> u32 {
    1
}

impl Default for GameState {
    fn default() -> Self {
        Self::with_catalog(catalog_from_meta(content::scenarios()))
    }
}

impl GameState {
    pub fn with_catalog(scenarios: Vec<Scenario>) -> Self {
        Self {
            version: default_version(),
            current_phase: Phase::Intro,
            current_scenario_id: ScenarioId::FIRST,
            current_question_index: 0,
            choices: BTreeMap::new(),
            metrics: TraitSet::new(),
            progress: 0,
            score: GameScore::default(),
            start_time: None,
            end_time: None,
            question_shown_at: None,
            scenarios,
        }
    }

    // ---------------------------------------------------------------------------
    // Persistence
    // ---------------------------------------------------------------------------

    pub fn load(root: &Path) -> Result<Self> {
        let path = paths::state_path(root);
        if !path.exists() {
            return Err(RogueError::NotInitialized);
        }
        let data = std::fs::read_to_string(&path)?;
        Self::from_json(&data)
    }

    /// Load saved progress, or start fresh. A save that cannot be read,
    /// parsed, or that breaks the phase/scenario invariant is discarded.
    pub fn load_or_default(root: &Path) -> Self {
        match Self::load(root) {
            Ok(state) => state,
            Err(RogueError::NotInitialized) => Self::default(),
            Err(e) => {
                tracing::warn!(
                    path = %paths::state_path(root).display(),
                    "discarding unreadable saved state: {e}"
                );
                Self::default()
            }
        }
    }

    pub fn save(&self, root: &Path) -> Result<()> {
        let path = paths::state_path(root);
        crate::io::atomic_write(&path, self.to_json()?.as_bytes())
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(data: &str) -> Result<Self> {
        let state: GameState = serde_json::from_str(data)?;
        if !state.is_consistent() {
            return Err(RogueError::CorruptState(format!(
                "saved state places scenario {} outside phase '{}'",
                state.current_scenario_id, state.current_phase
            )));
        }
        Ok(state)
    }

    fn is_consistent(&self) -> bool {
        if self.progress > 100 {
            return false;
        }
        !self.current_phase.is_gameplay() || self.current_phase.owns(self.current_scenario_id)
    }

    // ---------------------------------------------------------------------------
    // Queries
    // ---------------------------------------------------------------------------

    pub fn scenario(&self, id: ScenarioId) -> Option<&Scenario> {
        self.scenarios.iter().find(|s| s.id == id)
    }

    pub fn current_scenario(&self) -> Option<&Scenario> {
        self.scenario(self.current_scenario_id)
    }

    pub fn completed_count(&self) -> usize {
        self.scenarios.iter().filter(|s| s.completed).count()
    }

    pub fn scenarios_in(&self, phase: Phase) -> impl Iterator<Item = &Scenario> {
        self.scenarios.iter().filter(move |s| s.phase == phase)
    }

    pub fn choice_for(&self, question_id: &str) -> Option<&str> {
        self.choices.get(question_id).map(String::as_str)
    }

    pub fn is_finished(&self) -> bool {
        self.current_phase == Phase::Results
    }

    /// Milliseconds since the pending question was displayed, if it was.
    pub fn elapsed_since_shown(&self, now: DateTime<Utc>) -> Option<u64> {
        let shown = self.question_shown_at?;
        let ms = now.signed_duration_since(shown).num_milliseconds();
        Some(ms.max(0) as u64)
    }

    // ---------------------------------------------------------------------------
    // Transitions
    // ---------------------------------------------------------------------------

    /// Enter `phase`. Gameplay phases start at their first scenario.
    pub fn set_phase(&mut self, phase: Phase) {
        let now = Utc::now();
        if self.start_time.is_none() {
            self.start_time = Some(now);
        }
        tracing::debug!(from = %self.current_phase, to = %phase, "phase change");
        self.current_phase = phase;
        self.question_shown_at = None;
        if let Some(first) = phase.first_scenario() {
            self.current_scenario_id = first;
            self.current_question_index = 0;
        }
        if phase == Phase::Results && self.end_time.is_none() {
            self.end_time = Some(now);
        }
    }

    /// Apply the selected option of `question`. A question answered before is
    /// left untouched.
    pub fn record_choice(
        &mut self,
        question: &Question,
        option_id: &str,
        elapsed_ms: u64,
        scoring: &ScoringConfig,
    ) -> ChoiceOutcome {
        if self.choices.contains_key(&question.id) {
            return ChoiceOutcome::AlreadyAnswered;
        }
        let Some(option) = question.option(option_id) else {
            return ChoiceOutcome::UnknownOption;
        };

        let ignored_traits: Vec<String> = self
            .metrics
            .apply(&option.traits)
            .into_iter()
            .map(str::to_string)
            .collect();
        if !ignored_traits.is_empty() {
            tracing::debug!(
                question = %question.id,
                option = %option.id,
                "ignoring unrecognized traits: {}",
                ignored_traits.join(", ")
            );
        }

        self.choices.insert(question.id.clone(), option.id.clone());
        let points = self.score.award_answer(elapsed_ms, scoring);
        ChoiceOutcome::Recorded {
            points,
            ignored_traits,
        }
    }

    /// Mark `id` complete, recompute progress, and move on: to the next
    /// scenario, or to the next phase when `id` closes its phase.
    pub fn complete_scenario(&mut self, id: ScenarioId) -> CompletionOutcome {
        let Some(scenario) = self.scenarios.iter_mut().find(|s| s.id == id) else {
            return CompletionOutcome::UnknownScenario;
        };
        if scenario.completed {
            return CompletionOutcome::AlreadyCompleted;
        }
        scenario.completed = true;

        let fraction = self.completed_count() as f64 / TOTAL_SCENARIOS as f64;
        let computed = (fraction * 100.0).round().min(100.0) as u8;
        self.progress = self.progress.max(computed);

        let closing = Phase::for_scenario(id).filter(|p| p.last_scenario() == Some(id));
        match closing {
            Some(phase) => {
                if let Some(badge) = phase.badge() {
                    self.score.award_badge(badge);
                }
                let next = phase.next().unwrap_or(Phase::Results);
                self.set_phase(next);
                if next == Phase::Results {
                    self.progress = 100;
                }
                CompletionOutcome::PhaseChanged {
                    from: phase,
                    to: next,
                }
            }
            None => {
                let next = id.next();
                self.current_scenario_id = next;
                self.current_question_index = 0;
                self.question_shown_at = None;
                CompletionOutcome::Advanced { next }
            }
        }
    }

    /// Clamp `value` to 0..=100 and store it as progress.
    pub fn update_progress(&mut self, value: i64) -> u8 {
        self.progress = value.clamp(0, 100) as u8;
        self.progress
    }

    /// Stamp the pending question as displayed at `now`. A question already
    /// stamped keeps its first display time.
    pub fn mark_question_shown(&mut self, now: DateTime<Utc>) -> bool {
        if self.question_shown_at.is_some() {
            return false;
        }
        self.question_shown_at = Some(now);
        true
    }

    pub(crate) fn advance_question(&mut self) {
        self.current_question_index += 1;
        self.question_shown_at = None;
    }

    /// Start over. Scenario metadata survives; completion flags do not.
    pub fn reset_game(&mut self) {
        let mut scenarios = std::mem::take(&mut self.scenarios);
        for s in &mut scenarios {
            s.completed = false;
        }
        *self = Self::with_catalog(scenarios);
        self.start_time = Some(Utc::now());
    }

    /// Merge provider metadata into the catalog by id. Every built-in
    /// scenario stays; a provider entry can only rename or redescribe one.
    /// Completion flags are kept.
    pub fn refresh_catalog(&mut self, meta: Vec<ScenarioMeta>) {
        let mut merged = catalog_from_meta(content::scenarios());
        for s in &mut merged {
            if let Some(old) = self.scenario(s.id) {
                s.name.clone_from(&old.name);
                s.description.clone_from(&old.description);
                s.completed = old.completed;
            }
        }

        for entry in meta {
            let Some(s) = merged.iter_mut().find(|s| s.id == entry.id) else {
                tracing::debug!(
                    scenario = entry.id.get(),
                    "ignoring scenario outside the catalog"
                );
                continue;
            };
            if !entry.name.is_empty() {
                s.name = entry.name;
            }
            if !entry.description.is_empty() {
                s.description = entry.description;
            }
        }
        self.scenarios = merged;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
