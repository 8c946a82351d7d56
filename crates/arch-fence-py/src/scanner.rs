//! Source tree scanning.
//!
//! Walks a source root, extracts imports from every Python file, and runs
//! the boundary engine over each one. Files are processed one at a time in
//! file-name order, and violations are reported in that order.

use std::path::{Path, PathBuf};

use arch_fence_core::{module_identity, BoundaryEngine, FenceConfig, LintResult, Violation};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::extractor::{Extraction, LanguageExtractor};
use crate::python::PythonExtractor;

/// Errors that abort a scan.
#[derive(Debug, Error)]
pub enum ScanError {
    /// The root path is missing or is not a directory.
    #[error("root not found: {}", path.display())]
    RootNotFound {
        /// Root as given by the caller.
        path: PathBuf,
    },

    /// Failed to read a path.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// Path that failed.
        path: PathBuf,
        /// IO error.
        source: std::io::Error,
    },

    /// An exclude pattern is not a valid glob.
    #[error("invalid exclude pattern '{pattern}': {source}")]
    Pattern {
        /// The offending pattern.
        pattern: String,
        /// Glob error.
        source: glob::PatternError,
    },
}

/// Scans one source root against a boundary configuration.
pub struct Scanner<'c> {
    root: PathBuf,
    config: &'c FenceConfig,
    exclude: Vec<glob::Pattern>,
    extractors: Vec<Box<dyn LanguageExtractor>>,
}

impl<'c> Scanner<'c> {
    /// Prepare a scan of `root`.
    ///
    /// The root is resolved to an absolute path; its final component becomes
    /// the first segment of every module identity.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::RootNotFound`] if `root` is not an existing
    /// directory, or [`ScanError::Pattern`] for a bad exclude glob.
    pub fn new(root: &Path, config: &'c FenceConfig) -> Result<Self, ScanError> {
        if !root.is_dir() {
            return Err(ScanError::RootNotFound {
                path: root.to_path_buf(),
            });
        }

        let resolved = root.canonicalize().map_err(|e| ScanError::Io {
            path: root.to_path_buf(),
            source: e,
        })?;

        let exclude = config
            .analyzer
            .exclude
            .iter()
            .map(|p| {
                glob::Pattern::new(p).map_err(|e| ScanError::Pattern {
                    pattern: p.clone(),
                    source: e,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            root: resolved,
            config,
            exclude,
            extractors: vec![Box::new(PythonExtractor::new())],
        })
    }

    /// Returns the resolved root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Runs the scan to completion.
    ///
    /// Malformed files are counted in [`LintResult::files_skipped`] and
    /// otherwise ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if a discovered file cannot be read. Unreadable
    /// directories are logged and skipped.
    pub fn scan(&self) -> Result<LintResult, ScanError> {
        info!("Starting scan at {}", self.root.display());

        let engine = BoundaryEngine::new(&self.config.boundaries);
        let files = self.discover_files();

        info!("Found {} files to analyze", files.len());

        let mut result = LintResult::new();

        for file_path in &files {
            match self.analyze_file(&engine, file_path)? {
                Some(violations) => {
                    result.violations.extend(violations);
                    result.files_checked += 1;
                }
                None => result.files_skipped += 1,
            }
        }

        info!(
            "Scan complete: {} violations in {} files ({} skipped)",
            result.violations.len(),
            result.files_checked,
            result.files_skipped
        );

        Ok(result)
    }

    /// Violations for one file, or `None` when the file is out of scope.
    fn analyze_file(
        &self,
        engine: &BoundaryEngine<'_>,
        path: &Path,
    ) -> Result<Option<Vec<Violation>>, ScanError> {
        let ext = dotted_extension(path);
        let Some(extractor) = self
            .extractors
            .iter()
            .find(|e| e.extensions().contains(&ext.as_str()))
        else {
            return Ok(None);
        };

        let source = read_source(path)?;

        match extractor.extract(&source) {
            Extraction::Parsed(imports) => {
                let identity = module_identity(&self.root, path);
                debug!(
                    "Analyzing {} as {identity} ({}, {} imports)",
                    path.display(),
                    extractor.language_id(),
                    imports.len()
                );
                Ok(Some(engine.check(path, &identity, &imports)))
            }
            Extraction::Skipped(reason) => {
                warn!("Skipping {}: {reason}", path.display());
                Ok(None)
            }
        }
    }

    /// Collects every in-scope source file under the root, sorted by name
    /// at each directory level.
    fn discover_files(&self) -> Vec<PathBuf> {
        let skip_dirs = self.config.analyzer.skip_dirs.clone();
        let extensions: Vec<&str> = self
            .extractors
            .iter()
            .flat_map(|e| e.extensions().iter().copied())
            .collect();

        let mut builder = ignore::WalkBuilder::new(&self.root);
        builder
            .standard_filters(false)
            .sort_by_file_name(|a, b| a.cmp(b))
            .filter_entry(move |entry| {
                let is_dir = entry.file_type().is_some_and(|t| t.is_dir());
                entry.depth() == 0
                    || !is_dir
                    || !entry
                        .file_name()
                        .to_str()
                        .is_some_and(|name| skip_dirs.iter().any(|d| d == name))
            });
        if self.config.analyzer.respect_gitignore {
            builder.git_ignore(true).git_global(true).git_exclude(true);
        }

        let mut files = Vec::new();
        for entry in builder.build() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Skipping unreadable entry: {e}");
                    continue;
                }
            };
            let path = entry.path();

            if !path.is_file() {
                continue;
            }

            let ext = dotted_extension(path);
            if !extensions.contains(&ext.as_str()) {
                continue;
            }

            let relative = path.strip_prefix(&self.root).unwrap_or(path);
            if self.exclude.iter().any(|p| p.matches_path(relative)) {
                debug!("Excluding: {}", path.display());
                continue;
            }

            files.push(path.to_path_buf());
        }

        files
    }
}

/// `".py"` for `a/b.py`; empty when there is no extension.
fn dotted_extension(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{e}"))
        .unwrap_or_default()
}

/// Reads a file as text, replacing undecodable bytes.
fn read_source(path: &Path) -> Result<String, ScanError> {
    let bytes = std::fs::read(path).map_err(|e| ScanError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    Ok(match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => {
            debug!("{} is not valid UTF-8, decoding lossily", path.display());
            String::from_utf8_lossy(e.as_bytes()).into_owned()
        }
    })
}
