//! Shared output formatting for lint results.

use anyhow::Result;
use layout_lint_core::{LintResult, Severity};

use crate::OutputFormat;

/// Print lint results in the specified format.
pub fn print(result: &LintResult, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => print_text(result),
        OutputFormat::Json => return print_json(result),
        OutputFormat::Compact => print_compact(result),
    }
    Ok(())
}

fn print_text(result: &LintResult) {
    let (errors, warnings, infos) = result.count_by_severity();

    for diagnostic in &result.diagnostics {
        let severity_indicator = match diagnostic.severity {
            Severity::Error => "\x1b[31merror\x1b[0m",
            Severity::Warning => "\x1b[33mwarning\x1b[0m",
            Severity::Info => "\x1b[34minfo\x1b[0m",
        };

        println!(
            "{} {} at {}:{}",
            diagnostic.code,
            diagnostic.rule,
            diagnostic.location.file.display(),
            diagnostic.location.line,
        );
        println!("  {}: {}", severity_indicator, diagnostic.message);
        println!();
    }

    let summary_color = if errors > 0 {
        "\x1b[31m"
    } else if warnings > 0 {
        "\x1b[33m"
    } else {
        "\x1b[32m"
    };

    println!(
        "{}Found {} error(s), {} warning(s), {} info(s) in {} document(s)\x1b[0m",
        summary_color, errors, warnings, infos, result.documents_checked
    );
}

fn print_json(result: &LintResult) -> Result<()> {
    let json = serde_json::to_string_pretty(result)?;
    println!("{json}");
    Ok(())
}

fn print_compact(result: &LintResult) {
    for diagnostic in &result.diagnostics {
        println!("{diagnostic}");
    }
}
