use crate::metrics::{Trait, TraitSet};
use crate::score::GameScore;
use crate::state::GameState;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// StrengthBand
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StrengthBand {
    Exceptional,
    Strong,
    Proficient,
    Developing,
    Novice,
}

impl StrengthBand {
    pub fn as_str(self) -> &'static str {
        match self {
            StrengthBand::Exceptional => "Exceptional",
            StrengthBand::Strong => "Strong",
            StrengthBand::Proficient => "Proficient",
            StrengthBand::Developing => "Developing",
            StrengthBand::Novice => "Novice",
        }
    }
}

impl fmt::Display for StrengthBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Bands are checked highest first; lower bounds are inclusive.
pub fn strength_label(value: f64) -> StrengthBand {
    if value >= 7.0 {
        StrengthBand::Exceptional
    } else if value >= 5.0 {
        StrengthBand::Strong
    } else if value >= 3.0 {
        StrengthBand::Proficient
    } else if value >= 1.0 {
        StrengthBand::Developing
    } else {
        StrengthBand::Novice
    }
}

/// Share of a full bar, in percent, clamped to 0..=100. A non-positive
/// `max` yields an empty bar.
pub fn bar_width_percent(value: f64, max: f64) -> f64 {
    if max.is_nan() || max <= 0.0 || !value.is_finite() {
        return 0.0;
    }
    (value / max * 100.0).clamp(0.0, 100.0)
}

// ---------------------------------------------------------------------------
// CognitiveStyle
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CognitiveStyle {
    Convergent,
    Divergent,
}

impl CognitiveStyle {
    pub fn as_str(self) -> &'static str {
        match self {
            CognitiveStyle::Convergent => "Convergent",
            CognitiveStyle::Divergent => "Divergent",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            CognitiveStyle::Convergent => {
                "You excel at analytical problem-solving and logical approaches."
            }
            CognitiveStyle::Divergent => {
                "You excel at creative solutions and exploring multiple possibilities."
            }
        }
    }
}

impl fmt::Display for CognitiveStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Convergent only when strictly ahead; ties go to Divergent.
pub fn dominant_cognitive_style(traits: &TraitSet) -> CognitiveStyle {
    if traits.get(Trait::ConvergentThinking) > traits.get(Trait::DivergentThinking) {
        CognitiveStyle::Convergent
    } else {
        CognitiveStyle::Divergent
    }
}

// ---------------------------------------------------------------------------
// Archetype
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Archetype {
    Analyst,
    Innovator,
    Guardian,
    Commander,
    Diplomat,
    BalancedExpert,
}

impl Archetype {
    pub fn as_str(self) -> &'static str {
        match self {
            Archetype::Analyst => "Analyst",
            Archetype::Innovator => "Innovator",
            Archetype::Guardian => "Guardian",
            Archetype::Commander => "Commander",
            Archetype::Diplomat => "Diplomat",
            Archetype::BalancedExpert => "Balanced Expert",
        }
    }

    pub fn title(self) -> String {
        format!("The {}", self.as_str())
    }

    pub fn description(self) -> &'static str {
        match self {
            Archetype::Analyst => "You excel at logical problem-solving and systematic approaches to complex challenges. Your methodical thinking and technical precision are your greatest strengths.",
            Archetype::Innovator => "You thrive on creative solutions and thinking outside conventional boundaries. Your ability to see new possibilities and approaches sets you apart.",
            Archetype::Guardian => "You prioritize ethical considerations and responsible AI development. Your commitment to safety and beneficial outcomes guides your technical work.",
            Archetype::Commander => "You make decisive choices even under pressure and are willing to take calculated risks. Your leadership qualities shine in crisis situations.",
            Archetype::Diplomat => "You excel at communication and team collaboration. Your ability to understand different perspectives and build consensus is remarkable.",
            Archetype::BalancedExpert => "You demonstrate a well-rounded skill set with no single dominant trait. This versatility allows you to adapt to various roles and challenges.",
        }
    }
}

impl fmt::Display for Archetype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Both traits must exceed this for a pair rule to match.
const ARCHETYPE_THRESHOLD: i64 = 5;

struct ArchetypeRule {
    archetype: Archetype,
    pair: (Trait, Trait),
}

/// Evaluated in order; the first match wins.
const ARCHETYPE_RULES: &[ArchetypeRule] = &[
    ArchetypeRule {
        archetype: Archetype::Analyst,
        pair: (Trait::TechnicalSkill, Trait::ConvergentThinking),
    },
    ArchetypeRule {
        archetype: Archetype::Innovator,
        pair: (Trait::Creativity, Trait::DivergentThinking),
    },
    ArchetypeRule {
        archetype: Archetype::Guardian,
        pair: (Trait::Ethics, Trait::Empathy),
    },
    ArchetypeRule {
        archetype: Archetype::Commander,
        pair: (Trait::Decisiveness, Trait::RiskTaking),
    },
    ArchetypeRule {
        archetype: Archetype::Diplomat,
        pair: (Trait::Resilience, Trait::Communication),
    },
];

pub fn archetype(traits: &TraitSet) -> Archetype {
    ARCHETYPE_RULES
        .iter()
        .find(|rule| {
            let (a, b) = rule.pair;
            traits.get(a) > ARCHETYPE_THRESHOLD && traits.get(b) > ARCHETYPE_THRESHOLD
        })
        .map(|rule| rule.archetype)
        .unwrap_or(Archetype::BalancedExpert)
}

// ---------------------------------------------------------------------------
// ResultsReport
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileEntry {
    #[serde(rename = "trait")]
    pub trait_name: Trait,
    pub value: i64,
    pub band: StrengthBand,
    pub bar_width: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultsReport {
    pub archetype: Archetype,
    pub archetype_title: String,
    pub archetype_description: String,
    pub cognitive_style: CognitiveStyle,
    pub cognitive_description: String,
    pub profile: Vec<ProfileEntry>,
    pub score: GameScore,
    pub choices_made: usize,
    pub completed_scenarios: usize,
    /// `Xm Ys`, or `N/A` when the game never started.
    pub total_time: String,
}

impl ResultsReport {
    pub fn build(state: &GameState, bar_max: f64) -> Self {
        Self::build_at(state, bar_max, Utc::now())
    }

    /// Build against a fixed clock. An unfinished game is timed up to `now`.
    pub fn build_at(state: &GameState, bar_max: f64, now: DateTime<Utc>) -> Self {
        let metrics = &state.metrics;
        let archetype = archetype(metrics);
        let style = dominant_cognitive_style(metrics);
        let profile = Trait::profile()
            .iter()
            .map(|t| {
                let value = metrics.get(*t);
                ProfileEntry {
                    trait_name: *t,
                    value,
                    band: strength_label(value as f64),
                    bar_width: bar_width_percent(value as f64, bar_max),
                }
            })
            .collect();

        Self {
            archetype,
            archetype_title: archetype.title(),
            archetype_description: archetype.description().to_string(),
            cognitive_style: style,
            cognitive_description: style.description().to_string(),
            profile,
            score: state.score.clone(),
            choices_made: state.choices.len(),
            completed_scenarios: state.completed_count(),
            total_time: format_duration(state.start_time, state.end_time.unwrap_or(now)),
        }
    }
}

pub fn format_duration(start: Option<DateTime<Utc>>, end: DateTime<Utc>) -> String {
    let Some(start) = start else {
        return "N/A".to_string();
    };
    let secs = (end - start).num_seconds().max(0);
    format!("{}m {}s", secs / 60, secs % 60)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn traits(values: &[(Trait, i64)]) -> TraitSet {
        let mut set = TraitSet::new();
        for (t, v) in values {
            set.add(*t, *v);
        }
        set
    }

    #[test]
    fn strength_bands() {
        assert_eq!(strength_label(7.0), StrengthBand::Exceptional);
        assert_eq!(strength_label(6.99), StrengthBand::Strong);
        assert_eq!(strength_label(5.0), StrengthBand::Strong);
        assert_eq!(strength_label(3.0), StrengthBand::Proficient);
        assert_eq!(strength_label(1.0), StrengthBand::Developing);
        assert_eq!(strength_label(0.0), StrengthBand::Novice);
        assert_eq!(strength_label(-4.0), StrengthBand::Novice);
    }

    #[test]
    fn bar_width_is_clamped() {
        assert_eq!(bar_width_percent(4.5, 9.0), 50.0);
        assert_eq!(bar_width_percent(12.0, 9.0), 100.0);
        assert_eq!(bar_width_percent(-3.0, 9.0), 0.0);
        assert_eq!(bar_width_percent(3.0, 0.0), 0.0);
        assert!((bar_width_percent(1.0, 9.0) - 11.111).abs() < 0.01);
    }

    #[test]
    fn cognitive_style_tie_is_divergent() {
        let tied = traits(&[(Trait::ConvergentThinking, 4), (Trait::DivergentThinking, 4)]);
        assert_eq!(dominant_cognitive_style(&tied), CognitiveStyle::Divergent);
        let ahead = traits(&[(Trait::ConvergentThinking, 5), (Trait::DivergentThinking, 4)]);
        assert_eq!(dominant_cognitive_style(&ahead), CognitiveStyle::Convergent);
        assert_eq!(dominant_cognitive_style(&TraitSet::new()), CognitiveStyle::Divergent);
    }

    #[test]
    fn archetype_first_match_wins() {
        let both = traits(&[
            (Trait::TechnicalSkill, 6),
            (Trait::ConvergentThinking, 6),
            (Trait::Ethics, 9),
            (Trait::Empathy, 9),
        ]);
        assert_eq!(archetype(&both), Archetype::Analyst);

        let guardian = traits(&[(Trait::Ethics, 6), (Trait::Empathy, 6)]);
        assert_eq!(archetype(&guardian), Archetype::Guardian);

        let diplomat = traits(&[(Trait::Resilience, 7), (Trait::Communication, 6)]);
        assert_eq!(archetype(&diplomat), Archetype::Diplomat);
    }

    #[test]
    fn archetype_threshold_is_strict() {
        let edge = traits(&[(Trait::Creativity, 5), (Trait::DivergentThinking, 9)]);
        assert_eq!(archetype(&edge), Archetype::BalancedExpert);
        let innovator = traits(&[(Trait::Creativity, 6), (Trait::DivergentThinking, 6)]);
        assert_eq!(archetype(&innovator), Archetype::Innovator);
        assert_eq!(archetype(&TraitSet::new()), Archetype::BalancedExpert);
    }

    #[test]
    fn archetype_titles() {
        assert_eq!(Archetype::Commander.title(), "The Commander");
        assert_eq!(Archetype::BalancedExpert.title(), "The Balanced Expert");
    }

    #[test]
    fn duration_formatting() {
        let start = Utc::now();
        assert_eq!(format_duration(None, start), "N/A");
        assert_eq!(
            format_duration(Some(start), start + Duration::seconds(125)),
            "2m 5s"
        );
        assert_eq!(format_duration(Some(start), start - Duration::seconds(5)), "0m 0s");
    }

    #[test]
    fn report_covers_profile_traits() {
        let mut state = GameState::default();
        state.metrics.add(Trait::TechnicalSkill, 7);
        state.metrics.add(Trait::ConvergentThinking, 6);
        let start = Utc::now();
        state.start_time = Some(start);

        let report = ResultsReport::build_at(&state, 9.0, start + Duration::seconds(61));
        assert_eq!(report.archetype, Archetype::Analyst);
        assert_eq!(report.cognitive_style, CognitiveStyle::Convergent);
        assert_eq!(report.profile.len(), 10);
        assert_eq!(report.profile[0].trait_name, Trait::TechnicalSkill);
        assert_eq!(report.profile[0].band, StrengthBand::Exceptional);
        assert_eq!(report.total_time, "1m 1s");
        assert_eq!(report.choices_made, 0);
    }

    #[test]
    fn finished_game_is_timed_to_end() {
        let mut state = GameState::default();
        let start = Utc::now();
        state.start_time = Some(start);
        state.end_time = Some(start + Duration::seconds(30));
        let report = ResultsReport::build_at(&state, 9.0, start + Duration::seconds(3600));
        assert_eq!(report.total_time, "0m 30s");
    }
}
