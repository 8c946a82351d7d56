//! Boundary rule engine.
//!
//! Matches a file's module identity against the rule table and checks its
//! imports against the forbidden prefixes of the selected rule.

use std::path::Path;

use tracing::{debug, trace};

use crate::config::BoundaryRule;
use crate::types::{ImportRef, Location, Violation};

impl BoundaryRule {
    /// Whether this rule governs the module `identity`.
    ///
    /// This is a plain string prefix test: `a.b` governs `a.bc` as well as
    /// `a.b.c`.
    #[must_use]
    pub fn applies_to(&self, identity: &str) -> bool {
        identity.starts_with(&self.prefix)
    }

    /// Whether `imported` is `forbidden` itself or one of its submodules.
    #[must_use]
    pub fn forbids(imported: &str, forbidden: &str) -> bool {
        imported == forbidden
            || imported
                .strip_prefix(forbidden)
                .is_some_and(|rest| rest.starts_with('.'))
    }

    /// Human-readable description of this rule for one forbidden prefix.
    #[must_use]
    pub fn describe(&self, forbidden: &str) -> String {
        format!("{} must not import {forbidden}", self.prefix)
    }
}

/// Evaluates boundary rules against the imports of one file.
pub struct BoundaryEngine<'r> {
    rules: &'r [BoundaryRule],
}

impl<'r> BoundaryEngine<'r> {
    /// Create an engine over a borrowed rule table.
    #[must_use]
    pub fn new(rules: &'r [BoundaryRule]) -> Self {
        Self { rules }
    }

    /// The first rule, in declaration order, that governs `identity`.
    #[must_use]
    pub fn matching_rule(&self, identity: &str) -> Option<&'r BoundaryRule> {
        self.rules.iter().find(|rule| rule.applies_to(identity))
    }

    /// Check the imports of one file.
    ///
    /// Only the first matching rule is evaluated. Every (import, forbidden
    /// prefix) hit yields its own violation, so one import can be reported
    /// more than once.
    #[must_use]
    pub fn check(&self, file: &Path, identity: &str, imports: &[ImportRef]) -> Vec<Violation> {
        let Some(rule) = self.matching_rule(identity) else {
            trace!("{identity} is not governed by any rule");
            return Vec::new();
        };
        debug!("{identity} governed by '{}'", rule.prefix);

        let mut violations = Vec::new();

        for imp in imports {
            for forbidden in &rule.forbidden {
                if BoundaryRule::forbids(&imp.module, forbidden) {
                    violations.push(Violation::new(
                        Location::new(file, imp.line),
                        imp.module.clone(),
                        rule.describe(forbidden),
                    ));
                }
            }
        }

        violations
    }
}
