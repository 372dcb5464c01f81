//! Core analyzer for orchestrating layout checks over token-tree documents.

use crate::config::{Config, LayoutSettings};
use crate::document::{Document, DocumentError};
use crate::rule::{CheckError, Rule, RuleBox};
use crate::types::{Diagnostic, LintResult};

use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

/// File suffix of serialized token-tree documents.
pub const DOCUMENT_SUFFIX: &str = ".tokens.json";

/// Errors that can occur during analysis.
#[derive(Debug, Error)]
pub enum AnalyzerError {
    /// IO error reading files.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A document could not be loaded.
    #[error("Failed to load {path}: {source}")]
    Load {
        /// Path to the document.
        path: PathBuf,
        /// Underlying load error.
        source: DocumentError,
    },

    /// Glob pattern error.
    #[error("Invalid glob pattern: {0}")]
    Glob(#[from] glob::PatternError),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// A checker failed on a document.
    #[error("Check failed in {path}: {source}")]
    Check {
        /// Path to the document.
        path: PathBuf,
        /// Underlying check error.
        source: CheckError,
    },
}

/// Builder for configuring an [`Analyzer`].
#[derive(Default)]
pub struct AnalyzerBuilder {
    root: Option<PathBuf>,
    rules: Vec<RuleBox>,
    exclude_patterns: Vec<String>,
    config: Option<Config>,
    fail_on_load_error: bool,
}

impl AnalyzerBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the root directory to analyze.
    #[must_use]
    pub fn root(mut self, path: impl Into<PathBuf>) -> Self {
        self.root = Some(path.into());
        self
    }

    /// Adds a rule to the analyzer.
    #[must_use]
    pub fn rule<R: Rule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Adds a boxed rule to the analyzer.
    #[must_use]
    pub fn rule_box(mut self, rule: RuleBox) -> Self {
        self.rules.push(rule);
        self
    }

    /// Adds an exclude glob pattern.
    #[must_use]
    pub fn exclude(mut self, pattern: impl Into<String>) -> Self {
        self.exclude_patterns.push(pattern.into());
        self
    }

    /// Sets the configuration.
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Sets whether to fail on documents that cannot be loaded (default: false).
    #[must_use]
    pub fn fail_on_load_error(mut self, fail: bool) -> Self {
        self.fail_on_load_error = fail;
        self
    }

    /// Builds the analyzer.
    ///
    /// # Errors
    ///
    /// Returns an error if the current directory cannot be determined or the
    /// layout settings in the configuration are invalid.
    pub fn build(self) -> Result<Analyzer, AnalyzerError> {
        let config = self.config.unwrap_or_default();
        let settings = config.layout_settings()?;

        let root = self.root.unwrap_or_else(|| config.analyzer.root.clone());
        let root = if root.is_absolute() {
            root
        } else {
            std::env::current_dir()?.join(&root)
        };

        let mut exclude_patterns = self.exclude_patterns;
        exclude_patterns.extend(config.analyzer.exclude.clone());

        Ok(Analyzer {
            root,
            rules: self.rules,
            exclude_patterns,
            config,
            settings,
            fail_on_load_error: self.fail_on_load_error,
        })
    }
}

/// The main analyzer that orchestrates layout checks.
///
/// Use [`Analyzer::builder()`] to construct an instance.
pub struct Analyzer {
    root: PathBuf,
    rules: Vec<RuleBox>,
    exclude_patterns: Vec<String>,
    config: Config,
    settings: LayoutSettings,
    fail_on_load_error: bool,
}

impl Analyzer {
    /// Creates a new builder for configuring an analyzer.
    #[must_use]
    pub fn builder() -> AnalyzerBuilder {
        AnalyzerBuilder::new()
    }

    /// Returns the root directory being analyzed.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the number of registered rules.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Returns the layout settings every rule is run with.
    #[must_use]
    pub fn settings(&self) -> &LayoutSettings {
        &self.settings
    }

    /// Analyzes all documents under the root and returns the results.
    ///
    /// # Errors
    ///
    /// Returns an error if discovery fails, a checker fails, or a document
    /// cannot be loaded while `fail_on_load_error` is set.
    pub fn analyze(&self) -> Result<LintResult, AnalyzerError> {
        info!("Starting analysis at {:?}", self.root);

        let mut result = LintResult::new();
        let files = self.discover_documents()?;

        info!("Found {} documents to analyze", files.len());

        for path in &files {
            let document = match Document::from_file(path) {
                Ok(document) => document,
                Err(source) => {
                    warn!("Failed to load {}: {}", path.display(), source);
                    if self.fail_on_load_error {
                        return Err(AnalyzerError::Load {
                            path: path.clone(),
                            source,
                        });
                    }
                    continue;
                }
            };

            let relative = path.strip_prefix(&self.root).unwrap_or(path);
            result
                .diagnostics
                .extend(self.analyze_document(relative, &document)?);
            result.documents_checked += 1;
        }

        // Sort diagnostics by file, then line
        result.diagnostics.sort_by(|a, b| {
            a.location
                .file
                .cmp(&b.location.file)
                .then(a.location.line.cmp(&b.location.line))
                .then(a.code.cmp(&b.code))
        });

        info!(
            "Analysis complete: {} diagnostics in {} documents",
            result.diagnostics.len(),
            result.documents_checked
        );

        Ok(result)
    }

    /// Runs every rule on one already-loaded document.
    ///
    /// Empty documents are skipped. Violations of disabled rules are dropped
    /// and severity overrides from the configuration are applied.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyzerError::Check`] if a rule fails on the document.
    pub fn analyze_document(
        &self,
        path: &Path,
        document: &Document,
    ) -> Result<Vec<Diagnostic>, AnalyzerError> {
        debug!("Analyzing: {}", path.display());

        if document.is_empty() {
            debug!("Skipping empty document: {}", path.display());
            return Ok(Vec::new());
        }

        let mut diagnostics = Vec::new();
        for rule in &self.rules {
            let violations = rule
                .check(document, &self.settings)
                .map_err(|source| AnalyzerError::Check {
                    path: path.to_path_buf(),
                    source,
                })?;

            for violation in violations {
                if !self.config.is_rule_enabled(violation.rule) {
                    continue;
                }
                let severity = self
                    .config
                    .rule_severity(violation.rule)
                    .unwrap_or_else(|| rule.default_severity());
                diagnostics.push(Diagnostic::from_violation(&violation, path, severity));
            }
        }

        Ok(diagnostics)
    }

    /// Discovers all token-tree documents to analyze.
    fn discover_documents(&self) -> Result<Vec<PathBuf>, AnalyzerError> {
        let pattern = format!("{}/**/*{DOCUMENT_SUFFIX}", self.root.display());
        let mut files = Vec::new();

        for entry in glob::glob(&pattern)? {
            let path = entry.map_err(|e| AnalyzerError::Io(e.into_error()))?;

            if self.should_exclude(&path) {
                debug!("Excluding: {}", path.display());
                continue;
            }

            files.push(path);
        }

        Ok(files)
    }

    /// Checks if a path should be excluded.
    ///
    /// Patterns are matched against the path relative to the root, so the
    /// directories above the root never cause an exclusion.
    fn should_exclude(&self, path: &Path) -> bool {
        let relative = path.strip_prefix(&self.root).unwrap_or(path);
        let path_str = relative.to_string_lossy();
        let anchored = format!("/{}", path_str.trim_start_matches('/'));

        for pattern in &self.exclude_patterns {
            if let Ok(glob_pattern) = glob::Pattern::new(pattern) {
                if glob_pattern.matches(&path_str) {
                    return true;
                }
            }

            // Also check as substring for patterns like "**/target/**"
            let normalized_pattern = pattern.replace("**", "");
            if !normalized_pattern.is_empty() && anchored.contains(&normalized_pattern) {
                return true;
            }
        }

        false
    }
}
