use crate::config::ScoringConfig;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// GameScore
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameScore {
    /// Total points, speed bonuses included.
    pub points: u32,
    /// Portion of `points` earned through speed bonuses.
    #[serde(rename = "timeBonus", default)]
    pub time_bonus: u32,
    #[serde(default)]
    pub badges: Vec<String>,
}

impl GameScore {
    /// Award points for one recorded answer. Returns the points added.
    pub fn award_answer(&mut self, elapsed_ms: u64, cfg: &ScoringConfig) -> u32 {
        let bonus = if elapsed_ms < cfg.speed_threshold_ms {
            cfg.speed_bonus
        } else {
            0
        };
        let earned = cfg.base_points + bonus;
        self.points = self.points.saturating_add(earned);
        self.time_bonus = self.time_bonus.saturating_add(bonus);
        earned
    }

    /// Returns false if the badge was already held.
    pub fn award_badge(&mut self, badge: &str) -> bool {
        if self.badges.iter().any(|b| b == badge) {
            return false;
        }
        self.badges.push(badge.to_string());
        true
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fast_answer_earns_speed_bonus() {
        let mut score = GameScore::default();
        let earned = score.award_answer(29_999, &ScoringConfig::default());
        assert_eq!(earned, 70);
        assert_eq!(score.points, 70);
        assert_eq!(score.time_bonus, 20);
    }

    #[test]
    fn slow_answer_earns_base_only() {
        let mut score = GameScore::default();
        assert_eq!(score.award_answer(30_000, &ScoringConfig::default()), 50);
        assert_eq!(score.time_bonus, 0);
    }

    #[test]
    fn custom_scoring_config() {
        let cfg = ScoringConfig {
            base_points: 10,
            speed_bonus: 5,
            speed_threshold_ms: 1_000,
        };
        let mut score = GameScore::default();
        score.award_answer(500, &cfg);
        score.award_answer(1_500, &cfg);
        assert_eq!(score.points, 25);
        assert_eq!(score.time_bonus, 5);
    }

    #[test]
    fn badges_are_not_duplicated() {
        let mut score = GameScore::default();
        assert!(score.award_badge("Infiltrator"));
        assert!(!score.award_badge("Infiltrator"));
        assert_eq!(score.badges, vec!["Infiltrator".to_string()]);
    }

    #[test]
    fn score_json_uses_time_bonus_key() {
        let score = GameScore {
            points: 120,
            time_bonus: 20,
            badges: vec![],
        };
        let json = serde_json::to_value(&score).unwrap();
        assert_eq!(json["timeBonus"], 20);
        let parsed: GameScore = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, score);
    }
}
