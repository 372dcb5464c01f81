//! Init command implementation.

use anyhow::{bail, Result};
use std::path::Path;

const DEFAULT_CONFIG: &str = r#"# layout-lint configuration

# Severity that fails a run: "error" (default), "warning", or "info"
# fail_on = "error"

[analyzer]
# Directory holding *.tokens.json documents (default: current directory)
# root = "./tokens"

# Glob patterns to exclude from analysis
exclude = [
    "**/target/**",
]

[layout]
# Also check tokens and documents marked as generated
include_generated = false

# Longest allowed line, in characters
maximum_line_length = 120

# Rule configurations, keyed by name or code
# Each rule can be enabled/disabled and have its severity overridden

[rules.line-too-long]
enabled = true
# severity = "warning"  # Override default severity

[rules.trailing-whitespace]
enabled = true

# [rules.LL003]
# enabled = false
"#;

/// Runs the init command.
pub fn run(force: bool) -> Result<()> {
    let config_path = Path::new("layout-lint.toml");

    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(config_path, DEFAULT_CONFIG)?;

    println!("Created layout-lint.toml");
    println!("\nNext steps:");
    println!("  1. Edit layout-lint.toml to configure rules");
    println!("  2. Run: layout-lint check");

    Ok(())
}
