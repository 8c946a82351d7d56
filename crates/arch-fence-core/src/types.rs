//! Core types for imports, violations, and scan results.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Source code location of a finding.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    /// Path of the offending file, as discovered by the scanner.
    pub file: PathBuf,
    /// Line number (1-indexed, `0` when unknown).
    pub line: usize,
}

impl Location {
    /// Creates a new location.
    #[must_use]
    pub fn new(file: impl Into<PathBuf>, line: usize) -> Self {
        Self {
            file: file.into(),
            line,
        }
    }
}

/// A single import reference extracted from a source file.
///
/// For `from x.y import z` the module is `x.y`, never `z`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImportRef {
    /// Line of the import statement (1-indexed, `0` when unknown).
    pub line: usize,
    /// Dotted name of the imported module.
    pub module: String,
}

impl ImportRef {
    /// Creates a new import reference.
    #[must_use]
    pub fn new(line: usize, module: impl Into<String>) -> Self {
        Self {
            line,
            module: module.into(),
        }
    }
}

/// A forbidden import found during analysis.
///
/// Violations are only built by [`crate::BoundaryEngine`] and are not
/// modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Where the import appears.
    pub location: Location,
    /// The imported module name, as written.
    pub imported: String,
    /// Description of the breached rule (`"<prefix> must not import <forbidden>"`).
    pub rule: String,
}

impl Violation {
    /// Creates a new violation.
    #[must_use]
    pub fn new(location: Location, imported: impl Into<String>, rule: impl Into<String>) -> Self {
        Self {
            location,
            imported: imported.into(),
            rule: rule.into(),
        }
    }
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{} imports {} ({})",
            self.location.file.display(),
            self.location.line,
            self.imported,
            self.rule
        )
    }
}

/// Result of one full scan.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LintResult {
    /// All violations, in discovery order.
    pub violations: Vec<Violation>,
    /// Number of files that were parsed and checked.
    pub files_checked: usize,
    /// Number of files left out because they could not be parsed.
    pub files_skipped: usize,
}

impl LintResult {
    /// Creates a new empty result.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if no violations were found.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }
}
