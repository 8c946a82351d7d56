//! List rules command implementation.

use anyhow::Result;
use arch_fence_core::FenceConfig;
use std::fmt::Write;

use crate::config_resolver::{self, ConfigSource};

/// Runs the list-rules command.
pub fn run(source: &ConfigSource) -> Result<()> {
    let config = config_resolver::load(source)?;
    match source.path() {
        Some(p) => println!("Boundaries from {}:\n", p.display()),
        None => println!("Built-in boundaries:\n"),
    }
    print!("{}", render(&config));
    Ok(())
}

/// Rule table in declaration order, the order in which files are matched.
fn render(config: &FenceConfig) -> String {
    let shadowed = config.shadowed_rules();

    let mut out = format!("{:<4} {:<30} Forbidden\n", "#", "Prefix");
    let _ = writeln!(out, "{}", "-".repeat(80));

    for (i, rule) in config.boundaries.iter().enumerate() {
        let _ = write!(
            out,
            "{:<4} {:<30} {}",
            i,
            rule.prefix,
            rule.forbidden.join(", ")
        );
        if let Some(s) = shadowed.iter().find(|s| s.index == i) {
            let _ = write!(out, "  (unreachable: #{} matches first)", s.shadowed_by);
        }
        out.push('\n');
    }

    if config.boundaries.is_empty() {
        out.push_str("(no boundaries configured)\n");
    }

    out.push_str("\nA file is checked against the first boundary whose prefix starts its module name.\n");
    out
}
