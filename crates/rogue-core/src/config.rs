use crate::error::{Result, RogueError};
use crate::paths;
use serde::{Deserialize, Serialize};
use std::path::Path;

// ---------------------------------------------------------------------------
// ConfigWarning / WarnLevel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigWarning {
    pub level: WarnLevel,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarnLevel {
    Warning,
    Error,
}

// ---------------------------------------------------------------------------
// ProviderConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Base URL of the remote scenario service. Built-in content only when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote_url: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    5
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            remote_url: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

// ---------------------------------------------------------------------------
// ScoringConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    #[serde(default = "default_base_points")]
    pub base_points: u32,
    #[serde(default = "default_speed_bonus")]
    pub speed_bonus: u32,
    /// Answers strictly faster than this earn the speed bonus.
    #[serde(default = "default_speed_threshold_ms")]
    pub speed_threshold_ms: u64,
}

fn default_base_points() -> u32 {
    50
}

fn default_speed_bonus() -> u32 {
    20
}

fn default_speed_threshold_ms() -> u64 {
    30_000
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            base_points: default_base_points(),
            speed_bonus: default_speed_bonus(),
            speed_threshold_ms: default_speed_threshold_ms(),
        }
    }
}

// ---------------------------------------------------------------------------
// PacingConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PacingConfig {
    /// Pause between submitting a decision and revealing the outcome.
    #[serde(default = "default_analysis_delay_ms")]
    pub analysis_delay_ms: u64,
}

fn default_analysis_delay_ms() -> u64 {
    800
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            analysis_delay_ms: default_analysis_delay_ms(),
        }
    }
}

// ---------------------------------------------------------------------------
// ResultsConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultsConfig {
    /// Trait value that fills a profile bar.
    #[serde(default = "default_bar_max")]
    pub bar_max: f64,
}

fn default_bar_max() -> f64 {
    9.0
}

impl Default for ResultsConfig {
    fn default() -> Self {
        Self {
            bar_max: default_bar_max(),
        }
    }
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub provider: ProviderConfig,
    #[serde(default)]
    pub scoring: ScoringConfig,
    #[serde(default)]
    pub pacing: PacingConfig,
    #[serde(default)]
    pub results: ResultsConfig,
}

impl Config {
    pub fn load(root: &Path) -> Result<Self> {
        let path = paths::config_path(root);
        if !path.exists() {
            return Err(RogueError::NotInitialized);
        }
        let data = std::fs::read_to_string(&path)?;
        let cfg: Config = serde_yaml::from_str(&data)?;
        Ok(cfg)
    }

    /// Missing config means defaults. A config that exists but does not
    /// parse is still an error.
    pub fn load_or_default(root: &Path) -> Result<Self> {
        match Self::load(root) {
            Err(RogueError::NotInitialized) => Ok(Self::default()),
            other => other,
        }
    }

    pub fn save(&self, root: &Path) -> Result<()> {
        let path = paths::config_path(root);
        let data = serde_yaml::to_string(self)?;
        crate::io::atomic_write(&path, data.as_bytes())
    }

    pub fn validate(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();

        if let Some(url) = &self.provider.remote_url {
            if url.trim().is_empty() {
                warnings.push(ConfigWarning {
                    level: WarnLevel::Warning,
                    message: "provider.remote_url is empty; built-in content will be used"
                        .to_string(),
                });
            } else if !(url.starts_with("http://") || url.starts_with("https://")) {
                warnings.push(ConfigWarning {
                    level: WarnLevel::Error,
                    message: format!("provider.remote_url '{url}' must start with http:// or https://"),
                });
            }
        }

        if self.provider.timeout_secs == 0 {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: "provider.timeout_secs is 0; remote fetches will fail immediately"
                    .to_string(),
            });
        }

        if self.scoring.speed_threshold_ms == 0 && self.scoring.speed_bonus > 0 {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: "scoring.speed_threshold_ms is 0; the speed bonus can never be earned"
                    .to_string(),
            });
        }

        if !(self.results.bar_max.is_finite() && self.results.bar_max > 0.0) {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: format!(
                    "results.bar_max must be a positive number, got {}",
                    self.results.bar_max
                ),
            });
        }

        if self.pacing.analysis_delay_ms > 10_000 {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: format!(
                    "pacing.analysis_delay_ms is {}ms; players will wait a long time per answer",
                    self.pacing.analysis_delay_ms
                ),
            });
        }

        warnings
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
