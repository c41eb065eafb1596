use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;

/// Number of scenarios in the canonical layout.
pub const TOTAL_SCENARIOS: u32 = 20;

/// Scenarios owned by each gameplay phase.
pub const SCENARIOS_PER_PHASE: u32 = 4;

// ---------------------------------------------------------------------------
// ScenarioId
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScenarioId(pub u32);

impl ScenarioId {
    pub const FIRST: ScenarioId = ScenarioId(1);
    pub const LAST: ScenarioId = ScenarioId(TOTAL_SCENARIOS);

    pub fn get(self) -> u32 {
        self.0
    }

    pub fn next(self) -> ScenarioId {
        ScenarioId(self.0 + 1)
    }

    /// The gameplay phase that owns this id, if it is in range.
    pub fn phase(self) -> Option<Phase> {
        Phase::for_scenario(self)
    }
}

impl fmt::Display for ScenarioId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for ScenarioId {
    fn from(value: u32) -> Self {
        ScenarioId(value)
    }
}

// ---------------------------------------------------------------------------
// Phase
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Intro,
    Infiltration,
    Systems,
    Ethical,
    Counter,
    Final,
    Results,
}

impl Phase {
    pub fn all() -> &'static [Phase] {
        &[
            Phase::Intro,
            Phase::Infiltration,
            Phase::Systems,
            Phase::Ethical,
            Phase::Counter,
            Phase::Final,
            Phase::Results,
        ]
    }

    pub fn gameplay() -> &'static [Phase] {
        &[
            Phase::Infiltration,
            Phase::Systems,
            Phase::Ethical,
            Phase::Counter,
            Phase::Final,
        ]
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn next(self) -> Option<Phase> {
        Phase::all().get(self.index() + 1).copied()
    }

    pub fn is_gameplay(self) -> bool {
        !matches!(self, Phase::Intro | Phase::Results)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Intro => "intro",
            Phase::Infiltration => "infiltration",
            Phase::Systems => "systems",
            Phase::Ethical => "ethical",
            Phase::Counter => "counter",
            Phase::Final => "final",
            Phase::Results => "results",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Phase::Intro => "Mission Briefing",
            Phase::Infiltration => "Infiltration",
            Phase::Systems => "Systems Recovery",
            Phase::Ethical => "Ethical Dilemmas",
            Phase::Counter => "Counteroffensive",
            Phase::Final => "Final Assault",
            Phase::Results => "Analysis Report",
        }
    }

    /// Badge awarded when the last scenario of this phase is completed.
    pub fn badge(self) -> Option<&'static str> {
        match self {
            Phase::Infiltration => Some("Infiltrator"),
            Phase::Systems => Some("Systems Engineer"),
            Phase::Ethical => Some("Ethics Guardian"),
            Phase::Counter => Some("Counter Strategist"),
            Phase::Final => Some("Core Breaker"),
            Phase::Intro | Phase::Results => None,
        }
    }

    /// Contiguous scenario ids owned by a gameplay phase. Bookends own none.
    pub fn scenario_range(self) -> Option<RangeInclusive<u32>> {
        let ordinal = Phase::gameplay().iter().position(|p| *p == self)? as u32;
        let first = ordinal * SCENARIOS_PER_PHASE + 1;
        Some(first..=first + SCENARIOS_PER_PHASE - 1)
    }

    pub fn first_scenario(self) -> Option<ScenarioId> {
        self.scenario_range().map(|r| ScenarioId(*r.start()))
    }

    pub fn last_scenario(self) -> Option<ScenarioId> {
        self.scenario_range().map(|r| ScenarioId(*r.end()))
    }

    pub fn owns(self, id: ScenarioId) -> bool {
        self.scenario_range()
            .map(|r| r.contains(&id.0))
            .unwrap_or(false)
    }

    pub fn for_scenario(id: ScenarioId) -> Option<Phase> {
        Phase::gameplay().iter().copied().find(|p| p.owns(id))
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Phase {
    type Err = crate::error::RogueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "intro" => Ok(Phase::Intro),
            "infiltration" | "phase1" => Ok(Phase::Infiltration),
            "systems" | "phase2" => Ok(Phase::Systems),
            "ethical" | "phase3" => Ok(Phase::Ethical),
            "counter" => Ok(Phase::Counter),
            "final" => Ok(Phase::Final),
            "results" => Ok(Phase::Results),
            _ => Err(crate::error::RogueError::InvalidPhase(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// DecisionType
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionType {
    Technical,
    Analytical,
    Ethical,
    Creative,
    Empathetic,
    Behavioral,
}

impl DecisionType {
    pub fn all() -> &'static [DecisionType] {
        &[
            DecisionType::Technical,
            DecisionType::Analytical,
            DecisionType::Ethical,
            DecisionType::Creative,
            DecisionType::Empathetic,
            DecisionType::Behavioral,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DecisionType::Technical => "technical",
            DecisionType::Analytical => "analytical",
            DecisionType::Ethical => "ethical",
            DecisionType::Creative => "creative",
            DecisionType::Empathetic => "empathetic",
            DecisionType::Behavioral => "behavioral",
        }
    }
}

impl fmt::Display for DecisionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for DecisionType {
    type Err = crate::error::RogueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "technical" => Ok(DecisionType::Technical),
            "analytical" => Ok(DecisionType::Analytical),
            "ethical" => Ok(DecisionType::Ethical),
            "creative" => Ok(DecisionType::Creative),
            "empathetic" => Ok(DecisionType::Empathetic),
            "behavioral" | "behavioural" => Ok(DecisionType::Behavioral),
            _ => Err(crate::error::RogueError::InvalidDecisionType(
                s.to_string(),
            )),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn phase_ordering() {
        assert!(Phase::Intro < Phase::Infiltration);
        assert!(Phase::Counter < Phase::Final);
        assert!(Phase::Results > Phase::Final);
    }

    #[test]
    fn phase_next() {
        assert_eq!(Phase::Intro.next(), Some(Phase::Infiltration));
        assert_eq!(Phase::Final.next(), Some(Phase::Results));
        assert_eq!(Phase::Results.next(), None);
    }

    #[test]
    fn phase_roundtrip() {
        for phase in Phase::all() {
            assert_eq!(Phase::from_str(phase.as_str()).unwrap(), *phase);
        }
    }

    #[test]
    fn legacy_phase_aliases() {
        assert_eq!(Phase::from_str("phase1").unwrap(), Phase::Infiltration);
        assert_eq!(Phase::from_str("phase2").unwrap(), Phase::Systems);
        assert_eq!(Phase::from_str("phase3").unwrap(), Phase::Ethical);
        assert!(Phase::from_str("phase4").is_err());
    }

    #[test]
    fn scenario_ranges_are_contiguous() {
        assert_eq!(Phase::Infiltration.scenario_range(), Some(1..=4));
        assert_eq!(Phase::Systems.scenario_range(), Some(5..=8));
        assert_eq!(Phase::Ethical.scenario_range(), Some(9..=12));
        assert_eq!(Phase::Counter.scenario_range(), Some(13..=16));
        assert_eq!(Phase::Final.scenario_range(), Some(17..=20));
        assert_eq!(Phase::Intro.scenario_range(), None);
        assert_eq!(Phase::Results.scenario_range(), None);
    }

    #[test]
    fn every_scenario_has_one_phase() {
        for id in 1..=TOTAL_SCENARIOS {
            let owners: Vec<_> = Phase::all()
                .iter()
                .filter(|p| p.owns(ScenarioId(id)))
                .collect();
            assert_eq!(owners.len(), 1, "scenario {id}");
        }
        assert_eq!(ScenarioId(0).phase(), None);
        assert_eq!(ScenarioId(21).phase(), None);
        assert_eq!(ScenarioId(13).phase(), Some(Phase::Counter));
    }

    #[test]
    fn decision_type_roundtrip() {
        for t in DecisionType::all() {
            assert_eq!(DecisionType::from_str(t.as_str()).unwrap(), *t);
        }
        assert!(DecisionType::from_str("bogus").is_err());
    }

    #[test]
    fn scenario_id_serializes_as_number() {
        assert_eq!(serde_json::to_string(&ScenarioId(7)).unwrap(), "7");
        let parsed: ScenarioId = serde_json::from_str("12").unwrap();
        assert_eq!(parsed, ScenarioId(12));
    }
}
