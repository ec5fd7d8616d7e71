use std::path::Path;
use std::time::Duration;

use tracing::warn;

use crate::error::ConfigError;
use crate::minmax::{DEFAULT_DEPTH, TerminalScores};

/// Deepest search the configuration accepts.
pub const MAX_DEPTH: usize = 12;

/// How the computer picks its column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Alpha-beta search to `depth` plies.
    #[default]
    Minimax,
    /// Best heuristic score after a single own move.
    Greedy,
}

/// Default column a search node starts from before scoring its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreakMode {
    #[default]
    FirstLegal,
    Random,
}

/// Engine configuration, loadable from TOML.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub depth: usize,
    pub strategy: Strategy,
    pub tie_break: TieBreakMode,
    /// Seed of the random tie-break; OS entropy when absent.
    pub seed: Option<u64>,
    pub terminal_scores: TerminalScores,
    /// Search root columns on the rayon pool.
    pub parallel: bool,
    /// Wall-clock budget for a sequential search, in milliseconds.
    pub time_budget_ms: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            depth: DEFAULT_DEPTH,
            strategy: Strategy::default(),
            tie_break: TieBreakMode::default(),
            seed: None,
            terminal_scores: TerminalScores::default(),
            parallel: false,
            time_budget_ms: None,
        }
    }
}

impl EngineConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: EngineConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            warn!(path = %path.display(), "config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.depth == 0 || self.depth > MAX_DEPTH {
            return Err(ConfigError::Validation(format!(
                "depth must be in 1..={MAX_DEPTH}"
            )));
        }
        if self.time_budget_ms == Some(0) {
            return Err(ConfigError::Validation(
                "time_budget_ms must be > 0".into(),
            ));
        }
        if self.parallel && self.time_budget_ms.is_some() {
            return Err(ConfigError::Validation(
                "time_budget_ms is only honoured by the sequential search".into(),
            ));
        }
        Ok(())
    }

    #[must_use]
    pub fn time_budget(&self) -> Option<Duration> {
        self.time_budget_ms.map(Duration::from_millis)
    }

    /// Generate a TOML string with all default values.
    pub fn default_toml() -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(&EngineConfig::default())
    }
}
