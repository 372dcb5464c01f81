//! Configuration types for layout-lint.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::num::NonZeroUsize;
use std::path::PathBuf;

/// Property name of the generated-code switch in the `[layout]` table.
pub const INCLUDE_GENERATED: &str = "include_generated";

/// Property name of the maximum line length in the `[layout]` table.
pub const MAXIMUM_LINE_LENGTH: &str = "maximum_line_length";

/// Line length used when none is configured.
pub const DEFAULT_MAXIMUM_LINE_LENGTH: usize = 120;

/// Top-level configuration for layout-lint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Severity threshold for a failing run (default: "error").
    #[serde(default)]
    pub fail_on: Option<String>,

    /// Analyzer configuration.
    #[serde(default)]
    pub analyzer: AnalyzerConfig,

    /// Layout properties (`include_generated`, `maximum_line_length`).
    #[serde(default)]
    pub layout: HashMap<String, toml::Value>,

    /// Per-rule configurations, keyed by rule name or code.
    #[serde(default)]
    pub rules: HashMap<String, RuleConfig>,
}

impl Config {
    /// Creates a new default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }

    /// Sets a layout property, replacing any configured value.
    #[must_use]
    pub fn with_property(mut self, name: &str, value: impl Into<toml::Value>) -> Self {
        self.layout.insert(name.to_string(), value.into());
        self
    }

    /// Returns the configured value of a layout property, or its default.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownProperty`] if `name` is not a declared
    /// property, and [`ConfigError::InvalidProperty`] if the configured value
    /// has the wrong type.
    pub fn get_value<T: serde::de::DeserializeOwned>(&self, name: &str) -> Result<T, ConfigError> {
        let value = match self.layout.get(name) {
            Some(value) => value.clone(),
            None => default_value(name)?,
        };
        value
            .try_into()
            .map_err(|e: toml::de::Error| ConfigError::InvalidProperty {
                name: name.to_string(),
                message: e.to_string(),
            })
    }

    /// Resolves the layout settings consumed by checkers.
    ///
    /// # Errors
    ///
    /// Returns an error if `[layout]` holds an undeclared property, a property
    /// has the wrong type, or the maximum line length is not positive.
    pub fn layout_settings(&self) -> Result<LayoutSettings, ConfigError> {
        for name in self.layout.keys() {
            default_value(name)?;
        }
        let include_generated: bool = self.get_value(INCLUDE_GENERATED)?;
        let maximum_line_length: i64 = self.get_value(MAXIMUM_LINE_LENGTH)?;
        let maximum_line_length = usize::try_from(maximum_line_length)
            .ok()
            .and_then(NonZeroUsize::new)
            .ok_or(ConfigError::NonPositiveLineLength(maximum_line_length))?;
        Ok(LayoutSettings {
            include_generated,
            maximum_line_length,
        })
    }

    /// Checks if a rule is enabled.
    #[must_use]
    pub fn is_rule_enabled(&self, rule: crate::RuleId) -> bool {
        self.rule_config(rule)
            .map_or(true, |c| c.enabled.unwrap_or(true))
    }

    /// Gets the severity override for a rule.
    #[must_use]
    pub fn rule_severity(&self, rule: crate::RuleId) -> Option<crate::Severity> {
        self.rule_config(rule).and_then(|c| c.severity)
    }

    fn rule_config(&self, rule: crate::RuleId) -> Option<&RuleConfig> {
        self.rules
            .get(rule.name())
            .or_else(|| self.rules.get(rule.code()))
    }
}

/// Declared defaults of the layout properties.
fn default_value(name: &str) -> Result<toml::Value, ConfigError> {
    match name {
        INCLUDE_GENERATED => Ok(toml::Value::Boolean(false)),
        MAXIMUM_LINE_LENGTH => Ok(toml::Value::Integer(
            i64::try_from(DEFAULT_MAXIMUM_LINE_LENGTH).unwrap_or(i64::MAX),
        )),
        _ => Err(ConfigError::UnknownProperty(name.to_string())),
    }
}

/// Immutable settings passed to a checker for one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutSettings {
    /// Whether generated tokens and documents are checked.
    pub include_generated: bool,
    /// Longest allowed physical line, in characters.
    pub maximum_line_length: NonZeroUsize,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            include_generated: false,
            maximum_line_length: NonZeroUsize::new(DEFAULT_MAXIMUM_LINE_LENGTH)
                .unwrap_or(NonZeroUsize::MIN),
        }
    }
}

impl LayoutSettings {
    /// Creates settings from raw values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NonPositiveLineLength`] if `maximum_line_length`
    /// is zero.
    pub fn new(include_generated: bool, maximum_line_length: usize) -> Result<Self, ConfigError> {
        let maximum_line_length = NonZeroUsize::new(maximum_line_length)
            .ok_or(ConfigError::NonPositiveLineLength(0))?;
        Ok(Self {
            include_generated,
            maximum_line_length,
        })
    }

    /// Returns `true` if a token or document with the given marker is skipped.
    #[must_use]
    pub fn excludes(&self, generated: bool) -> bool {
        generated && !self.include_generated
    }
}

/// Analyzer-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Root directory to analyze (default: current directory).
    #[serde(default = "default_root")]
    pub root: PathBuf,

    /// Glob patterns to exclude from analysis.
    #[serde(default)]
    pub exclude: Vec<String>,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            exclude: vec!["**/target/**".to_string()],
        }
    }
}

fn default_root() -> PathBuf {
    PathBuf::from(".")
}

/// Per-rule configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuleConfig {
    /// Whether this rule is enabled.
    #[serde(default)]
    pub enabled: Option<bool>,

    /// Severity override for this rule.
    #[serde(default)]
    pub severity: Option<crate::Severity>,
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error reading config file.
    #[error("Failed to read config file {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Parse error in config file.
    #[error("Failed to parse config: {message}")]
    Parse {
        /// Parse error message.
        message: String,
    },

    /// Lookup of a property that has no declared default.
    #[error("Cannot retrieve descriptor for property '{0}'")]
    UnknownProperty(String),

    /// A property value of the wrong type.
    #[error("Invalid value for property '{name}': {message}")]
    InvalidProperty {
        /// Property name.
        name: String,
        /// Conversion error message.
        message: String,
    },

    /// Maximum line length of zero or less.
    #[error("maximum_line_length must be positive, got {0}")]
    NonPositiveLineLength(i64),
}
