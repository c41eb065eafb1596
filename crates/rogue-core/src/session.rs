use crate::config::ScoringConfig;
use crate::provider::{FallbackProvider, RequestSequencer, RequestTicket, ScenarioProvider};
use crate::results::ResultsReport;
use crate::scenario::Question;
use crate::state::{ChoiceOutcome, CompletionOutcome, GameState};
use crate::types::{Phase, ScenarioId};
use chrono::Utc;
use std::collections::BTreeMap;

/// Result of submitting an answer to the current question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub question_id: String,
    pub choice: ChoiceOutcome,
    /// Scenarios completed as a consequence, in order.
    pub completions: Vec<CompletionOutcome>,
}

impl Submission {
    pub fn phase_changed(&self) -> Option<(Phase, Phase)> {
        self.completions.iter().find_map(|c| match c {
            CompletionOutcome::PhaseChanged { from, to } => Some((*from, *to)),
            _ => None,
        })
    }
}

/// A play session: the game state plus everything needed to drive it.
pub struct Session<P = Box<dyn ScenarioProvider>> {
    state: GameState,
    provider: FallbackProvider<P>,
    scoring: ScoringConfig,
    questions: BTreeMap<ScenarioId, Vec<Question>>,
    sequencer: RequestSequencer,
}

impl<P: ScenarioProvider> Session<P> {
    pub fn new(mut state: GameState, provider: P, scoring: ScoringConfig) -> Self {
        let provider = FallbackProvider::new(provider);
        state.refresh_catalog(provider.scenarios());
        Self {
            state,
            provider,
            scoring,
            questions: BTreeMap::new(),
            sequencer: RequestSequencer::new(),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn into_state(self) -> GameState {
        self.state
    }

    pub fn provider(&self) -> &FallbackProvider<P> {
        &self.provider
    }

    // ---------------------------------------------------------------------------
    // Question loading
    // ---------------------------------------------------------------------------

    pub fn begin_fetch(&mut self) -> RequestTicket {
        self.sequencer.issue()
    }

    /// Store a fetched question list. Returns false, leaving the cache
    /// untouched, when a newer fetch has been issued since `ticket`.
    pub fn finish_fetch(
        &mut self,
        ticket: RequestTicket,
        id: ScenarioId,
        questions: Vec<Question>,
    ) -> bool {
        if !self.sequencer.is_current(ticket) {
            tracing::debug!(scenario = id.get(), "discarding stale question fetch");
            return false;
        }
        self.questions.insert(id, questions);
        true
    }

    pub fn questions_for(&mut self, id: ScenarioId) -> &[Question] {
        if !self.questions.contains_key(&id) {
            let ticket = self.begin_fetch();
            let fetched = self.provider.questions(id);
            self.finish_fetch(ticket, id, fetched);
        }
        self.questions.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn current_questions(&mut self) -> &[Question] {
        if !self.state.current_phase.is_gameplay() {
            return &[];
        }
        let id = self.state.current_scenario_id;
        self.questions_for(id)
    }

    pub fn current_question(&mut self) -> Option<&Question> {
        let index = self.state.current_question_index;
        self.current_questions().get(index)
    }

    /// Stamp the pending question as displayed now. Returns false when there
    /// is no pending question or it was stamped before.
    pub fn mark_question_shown(&mut self) -> bool {
        if self.current_question().is_none() {
            return false;
        }
        self.state.mark_question_shown(Utc::now())
    }

    /// Time spent on the pending question so far, or 0 if it was never shown.
    pub fn answer_time_ms(&self) -> u64 {
        self.state.elapsed_since_shown(Utc::now()).unwrap_or(0)
    }

    // ---------------------------------------------------------------------------
    // Transitions
    // ---------------------------------------------------------------------------

    pub fn set_phase(&mut self, phase: Phase) -> Vec<CompletionOutcome> {
        self.state.set_phase(phase);
        self.settle()
    }

    /// Leave the briefing for the first gameplay phase. Returns false when
    /// the briefing is already over.
    pub fn skip_intro(&mut self) -> bool {
        if self.state.current_phase != Phase::Intro {
            return false;
        }
        self.set_phase(Phase::Infiltration);
        true
    }

    /// Record a choice by question id. The question must belong to a
    /// scenario whose questions have been loaded.
    pub fn record_choice(
        &mut self,
        question_id: &str,
        option_id: &str,
        elapsed_ms: u64,
    ) -> ChoiceOutcome {
        self.current_questions();
        let question = self
            .questions
            .values()
            .flatten()
            .find(|q| q.id == question_id)
            .cloned();
        match question {
            Some(q) => self
                .state
                .record_choice(&q, option_id, elapsed_ms, &self.scoring),
            None => ChoiceOutcome::UnknownQuestion,
        }
    }

    /// Answer the current question and move on. Returns `None` outside
    /// gameplay or when no question is pending.
    pub fn submit(&mut self, option_id: &str, elapsed_ms: u64) -> Option<Submission> {
        let question = self.current_question()?.clone();
        let scenario = self.state.current_scenario_id;
        let choice = self
            .state
            .record_choice(&question, option_id, elapsed_ms, &self.scoring);

        let mut completions = Vec::new();
        if !matches!(choice, ChoiceOutcome::UnknownOption) {
            self.state.advance_question();
            if self.state.current_question_index >= self.questions_for(scenario).len() {
                completions.push(self.state.complete_scenario(scenario));
                completions.extend(self.settle());
            }
        }

        Some(Submission {
            question_id: question.id,
            choice,
            completions,
        })
    }

    pub fn complete_scenario(&mut self, id: ScenarioId) -> Vec<CompletionOutcome> {
        let mut completions = vec![self.state.complete_scenario(id)];
        completions.extend(self.settle());
        completions
    }

    pub fn update_progress(&mut self, value: i64) -> u8 {
        self.state.update_progress(value)
    }

    pub fn reset_game(&mut self) {
        self.state.reset_game();
    }

    pub fn results(&self, bar_max: f64) -> ResultsReport {
        ResultsReport::build(&self.state, bar_max)
    }

    /// Complete scenarios that have no questions left to answer.
    fn settle(&mut self) -> Vec<CompletionOutcome> {
        let mut completions = Vec::new();
        while self.state.current_phase.is_gameplay() {
            let id = self.state.current_scenario_id;
            if self.state.current_question_index < self.questions_for(id).len() {
                break;
            }
            let outcome = self.state.complete_scenario(id);
            let stalled = matches!(
                outcome,
                CompletionOutcome::AlreadyCompleted | CompletionOutcome::UnknownScenario
            );
            completions.push(outcome);
            if stalled {
                break;
            }
        }
        completions
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
