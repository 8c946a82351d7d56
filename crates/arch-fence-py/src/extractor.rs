//! Language-agnostic extraction types and trait.
//!
//! `LanguageExtractor` is the extension point for adding new languages.
//! Implement it to teach arch-fence how to pull import references out of
//! a source file.

use arch_fence_core::ImportRef;

/// Why a file was left out of the analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The source does not parse. `line` is the first line with a syntax error.
    Malformed {
        /// Line number (1-indexed).
        line: usize,
    },
    /// The parser could not be configured or gave up on the input.
    ParserUnavailable,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Malformed { line } => write!(f, "syntax error near line {line}"),
            Self::ParserUnavailable => write!(f, "parser unavailable"),
        }
    }
}

/// Outcome of extracting imports from one file.
///
/// A skipped file contributes no imports and no violations; the scan goes on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    /// The file parsed; these are all of its static imports.
    Parsed(Vec<ImportRef>),
    /// The file is out of scope.
    Skipped(SkipReason),
}

/// Trait for language-specific import extraction.
///
/// Implement this to add support for a new language.
pub trait LanguageExtractor: Send + Sync {
    /// Language identifier (e.g., `"python"`).
    fn language_id(&self) -> &'static str;

    /// File extensions this extractor handles (e.g., `&[".py"]`).
    fn extensions(&self) -> &'static [&'static str];

    /// Extract every static import from source code.
    fn extract(&self, source: &str) -> Extraction;
}
