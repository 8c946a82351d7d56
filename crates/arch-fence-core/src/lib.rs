//! # arch-fence-core
//!
//! Language-agnostic core of the arch-fence import boundary linter.
//!
//! A boundary rule says that modules under one dotted prefix may not import
//! modules under another. This crate holds everything that does not depend
//! on the scanned language:
//!
//! - [`FenceConfig`] / [`BoundaryRule`] for the TOML rule table
//! - [`module_identity`] for mapping a file path to its dotted module name
//! - [`BoundaryEngine`] for matching imports against the rule table
//! - [`Violation`] and [`LintResult`] for reporting findings
//!
//! ## Example
//!
//! ```
//! use arch_fence_core::{BoundaryEngine, FenceConfig, ImportRef};
//! use std::path::Path;
//!
//! let config = FenceConfig::default();
//! let engine = BoundaryEngine::new(&config.boundaries);
//!
//! let imports = vec![ImportRef::new(3, "src.infra.db")];
//! let violations = engine.check(Path::new("src/features/x.py"), "src.features.x", &imports);
//!
//! assert_eq!(violations.len(), 1);
//! assert_eq!(violations[0].rule, "src.features must not import src.infra");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod engine;
mod module_path;
mod types;

pub use config::{AnalyzerConfig, BoundaryRule, ConfigError, FenceConfig, ShadowedRule};
pub use engine::BoundaryEngine;
pub use module_path::module_identity;
pub use types::{ImportRef, LintResult, Location, Violation};
