//! List rules command implementation.

use layout_lint_core::RuleId;
use layout_lint_rules::all_rules;

/// Runs the list-rules command.
pub fn run() {
    println!("Available rules:\n");
    println!("{:<10} {:<28} Description", "Code", "Name");
    println!("{}", "-".repeat(80));

    for id in RuleId::ALL {
        println!("{:<10} {:<28} {}", id.code(), id.name(), id.description());
    }

    println!("\nCheckers:");
    for rule in all_rules() {
        let codes: Vec<&str> = rule.rule_ids().iter().map(|id| id.code()).collect();
        println!("  {:<10} {} ({})", rule.name(), rule.description(), codes.join(", "));
    }

    println!("\nUse --rules to filter specific rules, e.g.:");
    println!("  layout-lint check --rules line-too-long,trailing-whitespace");
    println!("  layout-lint check --rules LL001,LL002");
}
