use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

// ---------------------------------------------------------------------------
// Trait
// ---------------------------------------------------------------------------

/// A recognized trait dimension. Wire names are camelCase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Trait {
    // Technical skills
    CodingProficiency,
    AlgorithmicThinking,
    Debugging,
    Optimization,
    AiMlKnowledge,
    DataProcessing,
    Security,

    // Aptitudes
    ProblemSolving,
    Analytical,
    Creative,
    Adaptability,
    Learning,
    AttentionToDetail,

    // Character
    Integrity,
    Empathy,
    Trustworthiness,
    Determination,
    Accountability,
    Resilience,
    Decisiveness,

    // Big Five
    Openness,
    Conscientiousness,
    Extraversion,
    Agreeableness,
    Neuroticism,

    // Results profile
    TechnicalSkill,
    ConvergentThinking,
    DivergentThinking,
    Creativity,
    Ethics,
    RiskTaking,
    Communication,
}

impl Trait {
    pub fn all() -> &'static [Trait] {
        &[
            Trait::CodingProficiency,
            Trait::AlgorithmicThinking,
            Trait::Debugging,
            Trait::Optimization,
            Trait::AiMlKnowledge,
            Trait::DataProcessing,
            Trait::Security,
            Trait::ProblemSolving,
            Trait::Analytical,
            Trait::Creative,
            Trait::Adaptability,
            Trait::Learning,
            Trait::AttentionToDetail,
            Trait::Integrity,
            Trait::Empathy,
            Trait::Trustworthiness,
            Trait::Determination,
            Trait::Accountability,
            Trait::Resilience,
            Trait::Decisiveness,
            Trait::Openness,
            Trait::Conscientiousness,
            Trait::Extraversion,
            Trait::Agreeableness,
            Trait::Neuroticism,
            Trait::TechnicalSkill,
            Trait::ConvergentThinking,
            Trait::DivergentThinking,
            Trait::Creativity,
            Trait::Ethics,
            Trait::RiskTaking,
            Trait::Communication,
        ]
    }

    /// The ten dimensions shown on the results report, in display order.
    pub fn profile() -> &'static [Trait] {
        &[
            Trait::TechnicalSkill,
            Trait::ConvergentThinking,
            Trait::Creativity,
            Trait::DivergentThinking,
            Trait::Decisiveness,
            Trait::Empathy,
            Trait::Resilience,
            Trait::Communication,
            Trait::RiskTaking,
            Trait::Ethics,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Trait::CodingProficiency => "codingProficiency",
            Trait::AlgorithmicThinking => "algorithmicThinking",
            Trait::Debugging => "debugging",
            Trait::Optimization => "optimization",
            Trait::AiMlKnowledge => "aiMlKnowledge",
            Trait::DataProcessing => "dataProcessing",
            Trait::Security => "security",
            Trait::ProblemSolving => "problemSolving",
            Trait::Analytical => "analytical",
            Trait::Creative => "creative",
            Trait::Adaptability => "adaptability",
            Trait::Learning => "learning",
            Trait::AttentionToDetail => "attentionToDetail",
            Trait::Integrity => "integrity",
            Trait::Empathy => "empathy",
            Trait::Trustworthiness => "trustworthiness",
            Trait::Determination => "determination",
            Trait::Accountability => "accountability",
            Trait::Resilience => "resilience",
            Trait::Decisiveness => "decisiveness",
            Trait::Openness => "openness",
            Trait::Conscientiousness => "conscientiousness",
            Trait::Extraversion => "extraversion",
            Trait::Agreeableness => "agreeableness",
            Trait::Neuroticism => "neuroticism",
            Trait::TechnicalSkill => "technicalSkill",
            Trait::ConvergentThinking => "convergentThinking",
            Trait::DivergentThinking => "divergentThinking",
            Trait::Creativity => "creativity",
            Trait::Ethics => "ethics",
            Trait::RiskTaking => "riskTaking",
            Trait::Communication => "communication",
        }
    }

    /// Look up a trait by wire name. Unknown names yield `None`.
    pub fn from_name(name: &str) -> Option<Trait> {
        Trait::all().iter().copied().find(|t| t.as_str() == name)
    }
}

impl fmt::Display for Trait {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Trait {
    type Err = crate::error::RogueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Trait::from_name(s).ok_or_else(|| crate::error::RogueError::UnknownTrait(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// TraitDelta
// ---------------------------------------------------------------------------

/// Sparse per-option trait weights. Names stay as strings so content may
/// reference traits that are not wired into [`TraitSet`] yet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TraitDelta(BTreeMap<String, i64>);

impl TraitDelta {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, delta: i64) -> Self {
        self.0.insert(name.into(), delta);
        self
    }

    pub fn get(&self, name: &str) -> Option<i64> {
        self.0.get(name).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, i64)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

impl<S: Into<String>> FromIterator<(S, i64)> for TraitDelta {
    fn from_iter<I: IntoIterator<Item = (S, i64)>>(iter: I) -> Self {
        let mut map = BTreeMap::new();
        for (name, delta) in iter {
            let slot = map.entry(name.into()).or_insert(0_i64);
            *slot = slot.saturating_add(delta);
        }
        TraitDelta(map)
    }
}

// ---------------------------------------------------------------------------
// TraitSet
// ---------------------------------------------------------------------------

/// Accumulated profile. Every [`Trait`] always has an entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, i64>", into = "BTreeMap<String, i64>")]
pub struct TraitSet(BTreeMap<Trait, i64>);

impl TraitSet {
    pub fn new() -> Self {
        Self(Trait::all().iter().map(|t| (*t, 0)).collect())
    }

    pub fn get(&self, t: Trait) -> i64 {
        self.0.get(&t).copied().unwrap_or(0)
    }

    pub fn add(&mut self, t: Trait, delta: i64) {
        let slot = self.0.entry(t).or_insert(0);
        *slot = slot.saturating_add(delta);
    }

    /// Add every recognized entry of `delta`. Returns the names that were
    /// skipped because no such trait exists.
    pub fn apply<'a>(&mut self, delta: &'a TraitDelta) -> Vec<&'a str> {
        let mut ignored = Vec::new();
        for (name, value) in delta.iter() {
            match Trait::from_name(name) {
                Some(t) => self.add(t, value),
                None => ignored.push(name),
            }
        }
        ignored
    }

    pub fn iter(&self) -> impl Iterator<Item = (Trait, i64)> + '_ {
        self.0.iter().map(|(t, v)| (*t, *v))
    }

    pub fn is_zero(&self) -> bool {
        self.0.values().all(|v| *v == 0)
    }
}

impl Default for TraitSet {
    fn default() -> Self {
        Self::new()
    }
}

impl From<BTreeMap<String, i64>> for TraitSet {
    fn from(raw: BTreeMap<String, i64>) -> Self {
        let mut set = TraitSet::new();
        for (name, value) in raw {
            if let Some(t) = Trait::from_name(&name) {
                set.0.insert(t, value);
            }
        }
        set
    }
}

impl From<TraitSet> for BTreeMap<String, i64> {
    fn from(set: TraitSet) -> Self {
        set.0
            .into_iter()
            .map(|(t, v)| (t.as_str().to_string(), v))
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_set_has_every_trait_at_zero() {
        let set = TraitSet::new();
        assert_eq!(set.iter().count(), Trait::all().len());
        assert!(set.is_zero());
    }

    #[test]
    fn wire_names_match_serde() {
        for t in Trait::all() {
            let json = serde_json::to_string(t).unwrap();
            assert_eq!(json, format!("\"{}\"", t.as_str()));
        }
    }

    #[test]
    fn apply_ignores_unknown_traits() {
        let mut set = TraitSet::new();
        let delta = TraitDelta::new()
            .with("codingProficiency", 3)
            .with("neuroticism", -1)
            .with("quantumIntuition", 9);
        let ignored = set.apply(&delta);
        assert_eq!(ignored, vec!["quantumIntuition"]);
        assert_eq!(set.get(Trait::CodingProficiency), 3);
        assert_eq!(set.get(Trait::Neuroticism), -1);
    }

    #[test]
    fn deserialize_fills_missing_and_drops_unknown() {
        let set: TraitSet =
            serde_json::from_str(r#"{"ethics": 4, "madeUp": 2}"#).unwrap();
        assert_eq!(set.get(Trait::Ethics), 4);
        assert_eq!(set.get(Trait::Empathy), 0);
        assert_eq!(set.iter().count(), Trait::all().len());
    }

    #[test]
    fn delta_from_iter_sums_duplicates() {
        let delta: TraitDelta = vec![("ethics", 2_i64), ("ethics", 1_i64)].into_iter().collect();
        assert_eq!(delta.get("ethics"), Some(3));
        assert_eq!(delta.len(), 1);
    }

    #[test]
    fn accumulation_saturates_at_the_bounds() {
        let mut set = TraitSet::new();
        set.add(Trait::Ethics, i64::MAX);
        set.add(Trait::Ethics, 1);
        assert_eq!(set.get(Trait::Ethics), i64::MAX);
        set.add(Trait::Empathy, i64::MIN);
        set.add(Trait::Empathy, -5);
        assert_eq!(set.get(Trait::Empathy), i64::MIN);

        let delta: TraitDelta = vec![("ethics", i64::MAX), ("ethics", 7)].into_iter().collect();
        assert_eq!(delta.get("ethics"), Some(i64::MAX));
    }

    #[test]
    fn profile_traits_are_known() {
        assert_eq!(Trait::profile().len(), 10);
        for t in Trait::profile() {
            assert_eq!(Trait::from_name(t.as_str()), Some(*t));
        }
    }
}
