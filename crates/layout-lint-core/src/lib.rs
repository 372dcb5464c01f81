//! # layout-lint-core
//!
//! Core framework for source layout linting over tokenized documents.
//!
//! This crate provides the foundational types for building layout checkers.
//! It includes:
//!
//! - [`Token`], [`TokenList`] and [`Document`] for token trees produced by an
//!   upstream parser
//! - [`Leaves`], the iterative flattener yielding leaf tokens in document order
//! - [`Rule`] trait for document checkers
//! - [`Analyzer`] for orchestrating checks over serialized documents
//! - [`Violation`] and [`Diagnostic`] for representing findings
//!
//! ## Example
//!
//! ```ignore
//! use layout_lint_core::{Analyzer, Config};
//!
//! let analyzer = Analyzer::builder()
//!     .root("./tokens")
//!     .config(Config::from_file("layout-lint.toml".as_ref())?)
//!     .rule(MyRule::new())
//!     .build()?;
//!
//! let result = analyzer.analyze()?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod analyzer;
mod builder;
mod config;
mod document;
mod flatten;
mod rule;
mod token;
mod types;

pub use analyzer::{Analyzer, AnalyzerBuilder, AnalyzerError, DOCUMENT_SUFFIX};
pub use builder::{BuildError, DocumentBuilder};
pub use config::{
    AnalyzerConfig, Config, ConfigError, LayoutSettings, RuleConfig, DEFAULT_MAXIMUM_LINE_LENGTH,
    INCLUDE_GENERATED, MAXIMUM_LINE_LENGTH,
};
pub use document::{Document, DocumentError};
pub use flatten::{FlattenError, Leaves};
pub use rule::{CheckError, Rule, RuleBox};
pub use token::{physical_lines, Token, TokenKind, TokenList};
pub use types::{Diagnostic, LintResult, Location, RuleId, Severity, Violation};
