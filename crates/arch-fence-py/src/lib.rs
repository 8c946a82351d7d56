//! # arch-fence-py
//!
//! Tree-sitter based Python front end for arch-fence.
//!
//! This crate feeds Python source trees into the language-agnostic
//! `arch-fence-core` engine. It adds:
//!
//! - [`LanguageExtractor`] trait for pluggable import extraction
//! - [`PythonExtractor`] for Python `import` / `from ... import` statements
//! - [`Scanner`] for walking a source root and collecting violations

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod extractor;
pub mod python;
pub mod scanner;

pub use extractor::{Extraction, LanguageExtractor, SkipReason};
pub use python::PythonExtractor;
pub use scanner::{ScanError, Scanner};
