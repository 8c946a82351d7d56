//! Output formatting for scan results.

use anyhow::Result;
use arch_fence_core::LintResult;
use std::fmt::Write;
use std::io::IsTerminal;

use crate::OutputFormat;

/// Print scan results in the specified format.
pub fn print(result: &LintResult, format: OutputFormat) -> Result<()> {
    let rendered = match format {
        OutputFormat::Text => render_text(result, std::io::stdout().is_terminal()),
        OutputFormat::Json => serde_json::to_string_pretty(result)? + "\n",
        OutputFormat::Compact => render_compact(result),
    };
    print!("{rendered}");
    Ok(())
}

fn paint(text: &str, color: &str, use_color: bool) -> String {
    if use_color {
        format!("{color}{text}\x1b[0m")
    } else {
        text.to_string()
    }
}

/// One confirmation line when clean; otherwise a header, one line per
/// violation in discovery order, and a summary.
pub fn render_text(result: &LintResult, use_color: bool) -> String {
    if result.is_clean() {
        return format!(
            "arch-fence: {} ({} files checked)\n",
            paint("OK", "\x1b[32m", use_color),
            result.files_checked
        );
    }

    let mut out = format!("arch-fence: {}\n", paint("VIOLATIONS", "\x1b[31m", use_color));
    for violation in &result.violations {
        let _ = writeln!(out, "- {violation}");
    }
    let _ = writeln!(
        out,
        "Found {} violation(s) across {} checked file(s)",
        result.violations.len(),
        result.files_checked
    );
    out
}

/// `<file>:<line>: <module> [<rule>]`, one per line. A clean scan prints the
/// uncolored confirmation line.
pub fn render_compact(result: &LintResult) -> String {
    if result.is_clean() {
        return format!("arch-fence: OK ({} files checked)\n", result.files_checked);
    }

    let mut out = String::new();
    for v in &result.violations {
        let _ = writeln!(
            out,
            "{}:{}: {} [{}]",
            v.location.file.display(),
            v.location.line,
            v.imported,
            v.rule
        );
    }
    out
}
