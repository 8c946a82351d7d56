//! Check command implementation.

use anyhow::{Context, Result};
use arch_fence_py::{ScanError, Scanner};
use std::path::Path;
use std::process::ExitCode;

use crate::config_resolver::{self, ConfigSource};
use crate::OutputFormat;

/// Exit status when violations are found or the root is unusable.
const EXIT_FAILURE: u8 = 2;

/// Runs the check command.
pub fn run(
    root: &Path,
    format: OutputFormat,
    exclude: Vec<String>,
    source: &ConfigSource,
) -> Result<ExitCode> {
    let mut config = config_resolver::load(source)?;
    config.analyzer.exclude.extend(exclude);

    let scanner = match Scanner::new(root, &config) {
        Ok(scanner) => scanner,
        Err(ScanError::RootNotFound { path }) => {
            eprintln!("arch-fence: root not found: {}", path.display());
            return Ok(ExitCode::from(EXIT_FAILURE));
        }
        Err(e) => return Err(e).context("Failed to prepare scan"),
    };

    tracing::debug!(
        "Checking {} against {} boundaries",
        scanner.root().display(),
        config.boundaries.len()
    );

    let result = scanner.scan().context("Scan failed")?;

    super::output::print(&result, format)?;

    if result.is_clean() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(EXIT_FAILURE))
    }
}
