//! # layout-lint-rules
//!
//! Built-in layout rules for layout-lint.
//!
//! All five rules are evaluated in a single forward pass by [`LayoutRules`],
//! which registers under the name [`NAME`].
//!
//! ## Available Rules
//!
//! | Code | Name | Description |
//! |------|------|-------------|
//! | LL001 | `line-too-long` | Lines must not exceed the configured maximum length |
//! | LL002 | `trailing-whitespace` | Lines must not end with whitespace |
//! | LL003 | `trailing-blank-lines` | Files must not end with multiple empty lines |
//! | LL004 | `leading-whitespace` | Files must not start with whitespace |
//! | LL005 | `missing-trailing-newline` | Files must end with a newline |
//!
//! ## Usage
//!
//! ```ignore
//! use layout_lint_core::Analyzer;
//! use layout_lint_rules::LayoutRules;
//!
//! let analyzer = Analyzer::builder()
//!     .root("./tokens")
//!     .rule(LayoutRules::new())
//!     .build()?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod comment;
mod layout;

pub use layout::{LayoutRules, NAME};

use layout_lint_core::RuleBox;

/// Returns every built-in rule, boxed for registration with an analyzer.
#[must_use]
pub fn all_rules() -> Vec<RuleBox> {
    vec![Box::new(LayoutRules::new())]
}
