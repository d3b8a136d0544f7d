// Rust guideline compliant 2026-02-06

//! Configuration management for boardtrace.

use crate::classify::fold_column;
use crate::{Result, Stage};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Name of the configuration file inside the configuration directory.
pub const CONFIG_FILE: &str = "boardtrace.toml";

/// Raw board-column names accepted for each canonical stage.
///
/// Stages are declared, and fuzzy-matched, in the order Proposed, Accepted,
/// In-Progress, Blocked, Done.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ColumnMapping {
    /// Columns meaning Proposed.
    #[serde(default = "default_proposed")]
    pub proposed: Vec<String>,
    /// Columns meaning Accepted.
    #[serde(default = "default_accepted")]
    pub accepted: Vec<String>,
    /// Columns meaning In-Progress.
    #[serde(default = "default_in_progress")]
    pub in_progress: Vec<String>,
    /// Columns meaning Blocked.
    #[serde(default = "default_blocked")]
    pub blocked: Vec<String>,
    /// Columns meaning Done.
    #[serde(default = "default_done")]
    pub done: Vec<String>,
}

fn names(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| (*s).to_string()).collect()
}

fn default_proposed() -> Vec<String> {
    names(&["Proposed", "New", "Backlog", "Triage"])
}

fn default_accepted() -> Vec<String> {
    names(&["Accepted", "Ready for Work", "Approved"])
}

fn default_in_progress() -> Vec<String> {
    names(&["In Progress", "Active", "Doing"])
}

fn default_blocked() -> Vec<String> {
    names(&["Blocked", "On Hold"])
}

fn default_done() -> Vec<String> {
    names(&["Done", "Complete", "Completed"])
}

fn default_true() -> bool {
    true
}

impl Default for ColumnMapping {
    fn default() -> Self {
        Self {
            proposed: default_proposed(),
            accepted: default_accepted(),
            in_progress: default_in_progress(),
            blocked: default_blocked(),
            done: default_done(),
        }
    }
}

impl ColumnMapping {
    /// Returns every stage with its accepted column names, in declaration order.
    pub fn entries(&self) -> [(Stage, &[String]); 5] {
        [
            (Stage::Proposed, self.proposed.as_slice()),
            (Stage::Accepted, self.accepted.as_slice()),
            (Stage::InProgress, self.in_progress.as_slice()),
            (Stage::Blocked, self.blocked.as_slice()),
            (Stage::Done, self.done.as_slice()),
        ]
    }

    /// Checks that no name is blank and no name belongs to two stages.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first offending column.
    pub fn validate(&self) -> Result<()> {
        let mut owners: HashMap<String, Stage> = HashMap::new();
        for (stage, columns) in self.entries() {
            for column in columns {
                let key = fold_column(column);
                if key.is_empty() {
                    return Err(crate::Error::InvalidConfig(format!(
                        "blank column name configured for {}",
                        stage
                    )));
                }
                if let Some(owner) = owners.insert(key, stage) {
                    if owner != stage {
                        return Err(crate::Error::InvalidConfig(format!(
                            "column '{}' is mapped to both {} and {}",
                            column.trim(),
                            owner,
                            stage
                        )));
                    }
                }
            }
        }
        Ok(())
    }
}

/// Configuration for one boardtrace run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Whether to fall back to word-set matching when no exact name matches.
    #[serde(default = "default_true")]
    pub fuzzy_matching: bool,

    /// Whether to warn once for every column that resolves to no stage.
    #[serde(default = "default_true")]
    pub warn_unmapped: bool,

    /// Column names per canonical stage.
    #[serde(default)]
    pub columns: ColumnMapping,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fuzzy_matching: true,
            warn_unmapped: true,
            columns: ColumnMapping::default(),
        }
    }
}

impl Config {
    /// Loads configuration from file and environment variables.
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values
    /// 2. Configuration file at `<config_dir>/boardtrace.toml`
    /// 3. Environment variables with `BOARDTRACE_` prefix
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Configuration file exists but cannot be read
    /// - Configuration file contains invalid TOML
    /// - Configuration values fail validation
    pub fn load(config_dir: &Path) -> Result<Self> {
        let config_path = config_dir.join(CONFIG_FILE);
        let mut config = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            toml::from_str(&content)?
        } else {
            Self::default()
        };

        config.apply_env_overrides()?;
        config.validate()?;

        Ok(config)
    }

    /// Parses and validates configuration from a TOML document.
    ///
    /// Environment variables are not consulted.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is not valid TOML or fails validation.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Applies environment variable overrides to the configuration.
    ///
    /// Supported environment variables:
    /// - `BOARDTRACE_FUZZY_MATCHING` - Enable fuzzy column matching (true/false)
    /// - `BOARDTRACE_WARN_UNMAPPED` - Warn about unmapped columns (true/false)
    ///
    /// # Errors
    ///
    /// Returns an error if environment variable values are invalid.
    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(val) = std::env::var("BOARDTRACE_FUZZY_MATCHING") {
            self.fuzzy_matching = val.parse().map_err(|_| {
                crate::Error::InvalidConfig(
                    "BOARDTRACE_FUZZY_MATCHING must be true or false".to_string(),
                )
            })?;
        }

        if let Ok(val) = std::env::var("BOARDTRACE_WARN_UNMAPPED") {
            self.warn_unmapped = val.parse().map_err(|_| {
                crate::Error::InvalidConfig(
                    "BOARDTRACE_WARN_UNMAPPED must be true or false".to_string(),
                )
            })?;
        }

        Ok(())
    }

    /// Validates the configuration values.
    ///
    /// # Errors
    ///
    /// Returns an error if the column mapping is inconsistent.
    pub fn validate(&self) -> Result<()> {
        self.columns.validate()
    }

    /// Saves the configuration to `<config_dir>/boardtrace.toml`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be created or written
    /// - Serialization fails
    pub fn save(&self, config_dir: &Path) -> Result<()> {
        let config_path = config_dir.join(CONFIG_FILE);
        let content = toml::to_string_pretty(self).map_err(|e| {
            crate::Error::InvalidConfig(format!("Failed to serialize config: {}", e))
        })?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }
}
