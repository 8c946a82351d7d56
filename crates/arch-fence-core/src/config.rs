//! TOML configuration for boundary rules.
//!
//! The rule table is an ordered `[[boundaries]]` array. Order matters: a file
//! is checked against the first rule whose prefix matches its module identity.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Top-level arch-fence configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FenceConfig {
    /// Scanner settings.
    #[serde(default)]
    pub analyzer: AnalyzerConfig,

    /// Boundary rules, in declaration order.
    #[serde(default)]
    pub boundaries: Vec<BoundaryRule>,
}

/// Scanner-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Glob patterns (relative to the scanned root) to exclude.
    #[serde(default)]
    pub exclude: Vec<String>,

    /// Directory names pruned anywhere below the root.
    #[serde(default = "default_skip_dirs")]
    pub skip_dirs: Vec<String>,

    /// Whether to respect `.gitignore` files.
    #[serde(default)]
    pub respect_gitignore: bool,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            exclude: Vec::new(),
            skip_dirs: default_skip_dirs(),
            respect_gitignore: false,
        }
    }
}

/// One boundary: modules under `prefix` must not import anything under `forbidden`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundaryRule {
    /// Module namespace under restriction (e.g. `src.features`).
    pub prefix: String,
    /// Namespaces that `prefix` may not depend on, in order.
    pub forbidden: Vec<String>,
}

impl BoundaryRule {
    /// Creates a new rule.
    #[must_use]
    pub fn new<I, S>(prefix: impl Into<String>, forbidden: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            prefix: prefix.into(),
            forbidden: forbidden.into_iter().map(Into::into).collect(),
        }
    }
}

/// A rule that can never apply because an earlier rule always wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShadowedRule {
    /// Index of the unreachable rule.
    pub index: usize,
    /// Its prefix.
    pub prefix: String,
    /// Index of the earlier rule that wins instead.
    pub shadowed_by: usize,
}

fn default_skip_dirs() -> Vec<String> {
    ["venv", ".venv", "__pycache__"]
        .iter()
        .map(|s| (*s).to_string())
        .collect()
}

impl Default for FenceConfig {
    /// The built-in table: feature and API code must stay off the infrastructure layer.
    fn default() -> Self {
        Self {
            analyzer: AnalyzerConfig::default(),
            boundaries: vec![
                BoundaryRule::new("src.features", ["src.infra"]),
                BoundaryRule::new("src.api", ["src.infra"]),
            ],
        }
    }
}

/// Errors when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read config file.
    #[error("failed to read {path}: {source}")]
    Io {
        /// Path that failed.
        path: PathBuf,
        /// IO error.
        source: std::io::Error,
    },
    /// Failed to parse TOML.
    #[error("invalid config: {message}")]
    Parse {
        /// Parse error detail.
        message: String,
    },
    /// Config is structurally invalid.
    #[error("config validation: {0}")]
    Validation(String),
}

impl FenceConfig {
    /// Load from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Parse from a TOML string.
    ///
    /// A document without `[[boundaries]]` yields an empty rule table, not
    /// the built-in one.
    ///
    /// # Errors
    ///
    /// Returns error if TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }

    /// Validate config consistency.
    ///
    /// # Errors
    ///
    /// Returns error describing the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen: HashSet<&str> = HashSet::new();

        for (i, rule) in self.boundaries.iter().enumerate() {
            if rule.prefix.is_empty() {
                return Err(ConfigError::Validation(format!(
                    "boundaries[{i}]: empty prefix"
                )));
            }
            if !seen.insert(rule.prefix.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "boundaries[{i}]: prefix '{}' declared twice",
                    rule.prefix
                )));
            }
            if rule.forbidden.is_empty() {
                return Err(ConfigError::Validation(format!(
                    "boundaries[{i}]: '{}' has no forbidden prefixes",
                    rule.prefix
                )));
            }
            if rule.forbidden.iter().any(String::is_empty) {
                return Err(ConfigError::Validation(format!(
                    "boundaries[{i}]: '{}' has an empty forbidden prefix",
                    rule.prefix
                )));
            }
        }

        Ok(())
    }

    /// Rules that no file can ever reach.
    ///
    /// Rule prefixes match as plain string prefixes, so a later rule whose
    /// prefix starts with an earlier rule's prefix is always beaten by it.
    #[must_use]
    pub fn shadowed_rules(&self) -> Vec<ShadowedRule> {
        self.boundaries
            .iter()
            .enumerate()
            .filter_map(|(i, rule)| {
                self.boundaries[..i]
                    .iter()
                    .position(|earlier| rule.prefix.starts_with(&earlier.prefix))
                    .map(|j| ShadowedRule {
                        index: i,
                        prefix: rule.prefix.clone(),
                        shadowed_by: j,
                    })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_minimal_config() {
        let toml = r#"
[[boundaries]]
prefix = "src.domain"
forbidden = ["src.infra"]
"#;
        let config = FenceConfig::parse(toml).expect("parse failed");
        assert_eq!(config.boundaries.len(), 1);
        assert_eq!(config.boundaries[0].prefix, "src.domain");
        assert_eq!(config.analyzer, AnalyzerConfig::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn parse_full_config_keeps_declaration_order() {
        let toml = r#"
[analyzer]
exclude = ["**/migrations/**"]
skip_dirs = ["env"]
respect_gitignore = true

[[boundaries]]
prefix = "src.features"
forbidden = ["src.infra", "src.api"]

[[boundaries]]
prefix = "src.api"
forbidden = ["src.infra"]

[[boundaries]]
prefix = "src.core"
forbidden = ["src.features"]
"#;
        let config = FenceConfig::parse(toml).expect("parse failed");
        let prefixes: Vec<&str> = config
            .boundaries
            .iter()
            .map(|b| b.prefix.as_str())
            .collect();
        assert_eq!(prefixes, ["src.features", "src.api", "src.core"]);
        assert_eq!(config.boundaries[0].forbidden, ["src.infra", "src.api"]);
        assert_eq!(config.analyzer.skip_dirs, ["env"]);
        assert!(config.analyzer.respect_gitignore);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn empty_document_has_no_rules() {
        let config = FenceConfig::parse("").expect("parse failed");
        assert!(config.boundaries.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn default_table_restricts_features_and_api() {
        let config = FenceConfig::default();
        assert_eq!(
            config.boundaries,
            vec![
                BoundaryRule::new("src.features", ["src.infra"]),
                BoundaryRule::new("src.api", ["src.infra"]),
            ]
        );
        assert!(config.analyzer.skip_dirs.iter().any(|d| d == ".venv"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn malformed_toml_is_parse_error() {
        let err = FenceConfig::parse("[[boundaries]]\nprefix = ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn validate_catches_duplicate_prefix() {
        let toml = r#"
[[boundaries]]
prefix = "src.api"
forbidden = ["src.infra"]

[[boundaries]]
prefix = "src.api"
forbidden = ["src.db"]
"#;
        let config = FenceConfig::parse(toml).expect("parse failed");
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("declared twice"));
    }

    #[test]
    fn validate_catches_empty_prefix() {
        let mut config = FenceConfig::default();
        config.boundaries.push(BoundaryRule::new("", ["x"]));
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_catches_empty_forbidden_list() {
        let mut config = FenceConfig::default();
        config
            .boundaries
            .push(BoundaryRule::new("src.core", Vec::<String>::new()));
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("src.core"));
    }

    #[test]
    fn validate_catches_empty_forbidden_entry() {
        let mut config = FenceConfig::default();
        config
            .boundaries
            .push(BoundaryRule::new("src.core", ["src.infra", ""]));
        assert!(config.validate().is_err());
    }

    #[test]
    fn shadowed_rules_reports_unreachable_later_rule() {
        let config = FenceConfig {
            analyzer: AnalyzerConfig::default(),
            boundaries: vec![
                BoundaryRule::new("src.a", ["src.x"]),
                BoundaryRule::new("src.b", ["src.x"]),
                BoundaryRule::new("src.ab", ["src.y"]),
            ],
        };
        let shadowed = config.shadowed_rules();
        assert_eq!(
            shadowed,
            vec![ShadowedRule {
                index: 2,
                prefix: "src.ab".into(),
                shadowed_by: 0,
            }]
        );
    }

    #[test]
    fn broader_rule_after_narrower_is_not_shadowed() {
        let config = FenceConfig {
            analyzer: AnalyzerConfig::default(),
            boundaries: vec![
                BoundaryRule::new("src.a.b", ["src.x"]),
                BoundaryRule::new("src.a", ["src.y"]),
            ],
        };
        assert!(config.shadowed_rules().is_empty());
    }
}
