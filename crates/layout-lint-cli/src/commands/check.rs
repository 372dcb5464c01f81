//! Check command implementation.

use anyhow::{bail, Context, Result};
use layout_lint_core::{Analyzer, Config, RuleId, Severity, INCLUDE_GENERATED, MAXIMUM_LINE_LENGTH};
use layout_lint_rules::all_rules;
use std::path::Path;

use crate::config_resolver::ConfigSource;
use crate::OutputFormat;

/// Layout properties given on the command line.
#[derive(Debug, Clone, Copy, Default)]
pub struct LayoutOverrides {
    /// Replaces `maximum_line_length`.
    pub max_line_length: Option<usize>,
    /// Forces `include_generated` on.
    pub include_generated: bool,
}

/// Runs the check command.
pub fn run(
    path: &Path,
    format: OutputFormat,
    rules_filter: Option<String>,
    exclude: Vec<String>,
    overrides: LayoutOverrides,
    source: &ConfigSource,
) -> Result<()> {
    let config = source.load()?;
    let mut config = apply_overrides(config, overrides)?;
    if let Some(filter) = rules_filter {
        let names: Vec<&str> = filter.split(',').map(str::trim).collect();
        restrict_rules(&mut config, &names)?;
    }
    let threshold = fail_threshold(&config)?;

    // Build analyzer
    let mut builder = Analyzer::builder().root(path).config(config);

    for pattern in exclude {
        builder = builder.exclude(pattern);
    }

    for rule in all_rules() {
        builder = builder.rule_box(rule);
    }

    let analyzer = builder.build().context("Failed to build analyzer")?;

    tracing::info!(
        "Analyzing {:?} with {} rules (maximum line length {})",
        path,
        analyzer.rule_count(),
        analyzer.settings().maximum_line_length
    );

    let result = analyzer.analyze().context("Analysis failed")?;

    super::output::print(&result, format)?;

    if result.has_violations_at(threshold) {
        std::process::exit(1);
    }

    Ok(())
}

fn apply_overrides(mut config: Config, overrides: LayoutOverrides) -> Result<Config> {
    if let Some(max) = overrides.max_line_length {
        let max = i64::try_from(max).context("--max-line-length is out of range")?;
        config = config.with_property(MAXIMUM_LINE_LENGTH, max);
    }
    if overrides.include_generated {
        config = config.with_property(INCLUDE_GENERATED, true);
    }
    Ok(config)
}

/// Disables every rule id not named in `names`.
fn restrict_rules(config: &mut Config, names: &[&str]) -> Result<()> {
    let mut selected = Vec::new();
    for name in names {
        match RuleId::parse(name) {
            Some(id) => selected.push(id),
            None => tracing::warn!("Unknown rule: {}", name),
        }
    }
    if selected.is_empty() {
        bail!("No known rule in --rules filter: {}", names.join(","));
    }

    for id in RuleId::ALL {
        if !selected.contains(&id) {
            config
                .rules
                .entry(id.name().to_string())
                .or_default()
                .enabled = Some(false);
        }
    }
    Ok(())
}

fn fail_threshold(config: &Config) -> Result<Severity> {
    match config.fail_on.as_deref() {
        None | Some("error") => Ok(Severity::Error),
        Some("warning") => Ok(Severity::Warning),
        Some("info") => Ok(Severity::Info),
        Some(other) => bail!("Invalid fail_on value '{other}': expected error, warning, or info"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_replace_layout_properties() {
        let config = Config::parse("[layout]\nmaximum_line_length = 80\n").unwrap();
        let overrides = LayoutOverrides {
            max_line_length: Some(100),
            include_generated: true,
        };

        let settings = apply_overrides(config, overrides)
            .unwrap()
            .layout_settings()
            .unwrap();
        assert_eq!(settings.maximum_line_length.get(), 100);
        assert!(settings.include_generated);
    }

    #[test]
    fn absent_overrides_keep_configured_values() {
        let config = Config::parse("[layout]\nmaximum_line_length = 80\n").unwrap();
        let settings = apply_overrides(config, LayoutOverrides::default())
            .unwrap()
            .layout_settings()
            .unwrap();
        assert_eq!(settings.maximum_line_length.get(), 80);
        assert!(!settings.include_generated);
    }

    #[test]
    fn rules_filter_disables_unselected_ids() {
        let mut config = Config::default();
        restrict_rules(&mut config, &["line-too-long", "LL002", "bogus"]).unwrap();

        assert!(config.is_rule_enabled(RuleId::LineTooLong));
        assert!(config.is_rule_enabled(RuleId::TrailingWhitespace));
        assert!(!config.is_rule_enabled(RuleId::TrailingBlankLines));
        assert!(!config.is_rule_enabled(RuleId::LeadingWhitespace));
        assert!(!config.is_rule_enabled(RuleId::MissingTrailingNewline));
    }

    #[test]
    fn rules_filter_keeps_severity_overrides() {
        let mut config = Config::parse("[rules.LL003]\nseverity = \"warning\"\n").unwrap();
        restrict_rules(&mut config, &["LL003"]).unwrap();

        assert!(config.is_rule_enabled(RuleId::TrailingBlankLines));
        assert_eq!(
            config.rule_severity(RuleId::TrailingBlankLines),
            Some(Severity::Warning)
        );
    }

    #[test]
    fn rules_filter_without_known_rules_fails() {
        let mut config = Config::default();
        assert!(restrict_rules(&mut config, &["nope"]).is_err());
    }

    #[test]
    fn fail_threshold_defaults_to_error() {
        assert_eq!(fail_threshold(&Config::default()).unwrap(), Severity::Error);

        let config = Config::parse("fail_on = \"warning\"\n").unwrap();
        assert_eq!(fail_threshold(&config).unwrap(), Severity::Warning);

        let config = Config::parse("fail_on = \"fatal\"\n").unwrap();
        assert!(fail_threshold(&config).is_err());
    }
}
