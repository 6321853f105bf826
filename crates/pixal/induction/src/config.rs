//! Search parameters and induction configuration.

use std::path::Path;

use pixal_data::DEFAULT_BIN_COUNT;
use serde::{Deserialize, Serialize};

use crate::error::{InductionError, InductionResult};
use crate::score::ScoreKind;

/// Default number of predicates accepted per search call.
pub const DEFAULT_MAX_ACCEPTED: usize = 1;

/// Default maximum number of clauses in a predicate.
pub const DEFAULT_MAX_CLAUSES: usize = 3;

/// Limits and ordering for one call to `search`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchParams {
    /// Stop once this many predicates were accepted in the call.
    pub max_accepted: usize,
    /// Stop after this many frontier pops in the call. `None` = unlimited.
    pub max_steps: Option<usize>,
    /// Predicates with this many clauses are not conjoined further.
    pub max_clauses: usize,
    /// FIFO by clause count instead of best-score-first.
    pub breadth_first: bool,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            max_accepted: DEFAULT_MAX_ACCEPTED,
            max_steps: None,
            max_clauses: DEFAULT_MAX_CLAUSES,
            breadth_first: false,
        }
    }
}

impl SearchParams {
    pub fn validate(&self) -> InductionResult<()> {
        if self.max_accepted == 0 {
            return Err(InductionError::InvalidConfig("max_accepted must be >= 1".into()));
        }
        if self.max_clauses == 0 {
            return Err(InductionError::InvalidConfig("max_clauses must be >= 1".into()));
        }
        Ok(())
    }
}

/// Everything needed to run induction for one request.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InductionConfig {
    /// Equal-width bins per numeric column.
    pub bins: usize,
    /// Objective.
    pub score: ScoreKind,
    pub search: SearchParams,
}

impl Default for InductionConfig {
    fn default() -> Self {
        Self {
            bins: DEFAULT_BIN_COUNT,
            score: ScoreKind::default(),
            search: SearchParams::default(),
        }
    }
}

impl InductionConfig {
    /// Load configuration from a TOML file; a missing file yields defaults.
    pub fn load(path: impl AsRef<Path>) -> InductionResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path).map_err(|e| {
            InductionError::InvalidConfig(format!("cannot read {}: {}", path.display(), e))
        })?;
        let config = Self::from_toml(&contents)?;
        Ok(config)
    }

    pub fn from_toml(contents: &str) -> InductionResult<Self> {
        let config: InductionConfig =
            toml::from_str(contents).map_err(|e| InductionError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> InductionResult<()> {
        if self.bins == 0 {
            return Err(InductionError::InvalidConfig("bins must be >= 1".into()));
        }
        self.search.validate()
    }
}
