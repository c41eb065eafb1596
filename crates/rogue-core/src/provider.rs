use crate::adapter;
use crate::config::ProviderConfig;
use crate::content;
use crate::error::{Result, RogueError};
use crate::scenario::{Question, ScenarioMeta};
use crate::types::{Phase, ScenarioId};
use std::time::Duration;

// ---------------------------------------------------------------------------
// ScenarioProvider
// ---------------------------------------------------------------------------

/// Source of the scenario catalog and per-scenario question lists.
pub trait ScenarioProvider {
    fn fetch_all_scenarios(&self) -> Result<Vec<ScenarioMeta>>;

    fn fetch_scenario_questions(&self, id: ScenarioId) -> Result<Vec<Question>>;

    fn fetch_scenarios_by_phase(&self, phase: Phase) -> Result<Vec<ScenarioMeta>> {
        Ok(self
            .fetch_all_scenarios()?
            .into_iter()
            .filter(|s| s.phase == phase)
            .collect())
    }
}

impl ScenarioProvider for Box<dyn ScenarioProvider> {
    fn fetch_all_scenarios(&self) -> Result<Vec<ScenarioMeta>> {
        (**self).fetch_all_scenarios()
    }

    fn fetch_scenario_questions(&self, id: ScenarioId) -> Result<Vec<Question>> {
        (**self).fetch_scenario_questions(id)
    }

    fn fetch_scenarios_by_phase(&self, phase: Phase) -> Result<Vec<ScenarioMeta>> {
        (**self).fetch_scenarios_by_phase(phase)
    }
}

/// Pick the provider described by `cfg`: remote when a usable URL is set,
/// built-in content otherwise.
pub fn from_config(cfg: &ProviderConfig) -> Box<dyn ScenarioProvider> {
    let Some(url) = cfg.remote_url.as_deref().filter(|u| !u.trim().is_empty()) else {
        return Box::new(StaticProvider);
    };
    match RemoteProvider::new(url, Duration::from_secs(cfg.timeout_secs)) {
        Ok(remote) => Box::new(remote),
        Err(e) => {
            tracing::warn!(url, "remote provider unavailable, using built-in content: {e}");
            Box::new(StaticProvider)
        }
    }
}

// ---------------------------------------------------------------------------
// StaticProvider
// ---------------------------------------------------------------------------

/// Built-in content for all twenty scenarios.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticProvider;

impl ScenarioProvider for StaticProvider {
    fn fetch_all_scenarios(&self) -> Result<Vec<ScenarioMeta>> {
        Ok(content::scenarios())
    }

    fn fetch_scenario_questions(&self, id: ScenarioId) -> Result<Vec<Question>> {
        Ok(content::questions_for(id))
    }
}

// ---------------------------------------------------------------------------
// RemoteProvider
// ---------------------------------------------------------------------------

/// HTTP JSON provider. Payloads pass through the shape adapter.
#[derive(Debug, Clone)]
pub struct RemoteProvider {
    base_url: String,
    client: reqwest::blocking::Client,
}

impl RemoteProvider {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("rogue/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn get_json(&self, path: &str) -> Result<serde_json::Value> {
        let url = format!("{}{path}", self.base_url);
        tracing::debug!(%url, "fetching");
        let response = self.client.get(&url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(RogueError::Provider(format!("GET {url} returned {status}")));
        }
        Ok(response.json()?)
    }
}

impl ScenarioProvider for RemoteProvider {
    fn fetch_all_scenarios(&self) -> Result<Vec<ScenarioMeta>> {
        adapter::normalize_scenarios(&self.get_json("/scenarios")?)
    }

    fn fetch_scenario_questions(&self, id: ScenarioId) -> Result<Vec<Question>> {
        adapter::normalize_questions(&self.get_json(&format!("/scenarios/{id}/questions"))?)
    }
}

// ---------------------------------------------------------------------------
// FallbackProvider
// ---------------------------------------------------------------------------

/// Wraps a provider so callers never see a failure: errors and empty
/// results are replaced with built-in content.
#[derive(Debug, Clone)]
pub struct FallbackProvider<P> {
    primary: P,
}

impl<P: ScenarioProvider> FallbackProvider<P> {
    pub fn new(primary: P) -> Self {
        Self { primary }
    }

    pub fn primary(&self) -> &P {
        &self.primary
    }

    pub fn scenarios(&self) -> Vec<ScenarioMeta> {
        match self.primary.fetch_all_scenarios() {
            Ok(list) if !list.is_empty() => list,
            Ok(_) => {
                tracing::warn!("provider returned no scenarios, using built-in catalog");
                content::scenarios()
            }
            Err(e) => {
                tracing::warn!("failed to fetch scenarios, using built-in catalog: {e}");
                content::scenarios()
            }
        }
    }

    pub fn scenarios_by_phase(&self, phase: Phase) -> Vec<ScenarioMeta> {
        self.scenarios()
            .into_iter()
            .filter(|s| s.phase == phase)
            .collect()
    }

    pub fn questions(&self, id: ScenarioId) -> Vec<Question> {
        match self.primary.fetch_scenario_questions(id) {
            Ok(list) if !list.is_empty() => list,
            Ok(_) => {
                tracing::warn!(scenario = id.get(), "provider returned no questions, using built-in content");
                content::questions_for(id)
            }
            Err(e) => {
                tracing::warn!(scenario = id.get(), "failed to fetch questions, using built-in content: {e}");
                content::questions_for(id)
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Request sequencing
// ---------------------------------------------------------------------------

/// Identifies one fetch. Only the most recently issued ticket is current.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RequestTicket(u64);

#[derive(Debug, Default)]
pub struct RequestSequencer {
    latest: u64,
}

impl RequestSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&mut self) -> RequestTicket {
        self.latest += 1;
        RequestTicket(self.latest)
    }

    pub fn is_current(&self, ticket: RequestTicket) -> bool {
        ticket.0 == self.latest
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
