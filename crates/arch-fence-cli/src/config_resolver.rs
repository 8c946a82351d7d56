//! Locating and loading the boundary configuration.
//!
//! Resolution order:
//!
//! 1. `--config` flag (explicit path)
//! 2. `./arch-fence.toml` or `./.arch-fence.toml`
//! 3. `$ARCH_FENCE_CONFIG_DIR/config.toml`, else `~/.arch-fence/config.toml`
//! 4. Nothing found: the built-in rule table

use anyhow::{Context, Result};
use arch_fence_core::FenceConfig;
use std::path::{Path, PathBuf};

/// Where the configuration was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Explicitly specified via `--config` flag.
    Explicit(PathBuf),
    /// Found in the working directory.
    Project(PathBuf),
    /// Loaded from the global config directory.
    Global(PathBuf),
    /// No config found; the built-in table is used.
    Default,
}

impl ConfigSource {
    /// Returns the resolved path, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Explicit(p) | Self::Project(p) | Self::Global(p) => Some(p),
            Self::Default => None,
        }
    }
}

/// Project-level config file names, checked in order.
const PROJECT_CONFIG_NAMES: &[&str] = &["arch-fence.toml", ".arch-fence.toml"];

/// Config file name within the global config directory.
const GLOBAL_CONFIG_NAME: &str = "config.toml";

/// Resolves the configuration file path.
#[must_use]
pub fn resolve(project_dir: &Path, explicit: Option<&Path>) -> ConfigSource {
    resolve_inner(project_dir, explicit, global_config_dir())
}

fn resolve_inner(
    project_dir: &Path,
    explicit: Option<&Path>,
    global_dir: Option<PathBuf>,
) -> ConfigSource {
    if let Some(p) = explicit {
        return ConfigSource::Explicit(p.to_path_buf());
    }

    for name in PROJECT_CONFIG_NAMES {
        let candidate = project_dir.join(name);
        if candidate.exists() {
            tracing::debug!("Found project config: {}", candidate.display());
            return ConfigSource::Project(candidate);
        }
    }

    if let Some(dir) = global_dir {
        let candidate = dir.join(GLOBAL_CONFIG_NAME);
        if candidate.exists() {
            tracing::debug!("Found global config: {}", candidate.display());
            return ConfigSource::Global(candidate);
        }
    }

    ConfigSource::Default
}

/// Returns the global config directory path.
///
/// `$ARCH_FENCE_CONFIG_DIR` wins over `~/.arch-fence/`.
#[must_use]
pub fn global_config_dir() -> Option<PathBuf> {
    if let Ok(dir) = std::env::var("ARCH_FENCE_CONFIG_DIR") {
        return Some(PathBuf::from(dir));
    }
    home::home_dir().map(|h| h.join(".arch-fence"))
}

/// Loads and validates the configuration from `source`.
///
/// Shadowed rules are legal but logged, since they can never fire.
///
/// # Errors
///
/// Returns an error if the file cannot be read, parsed, or validated.
pub fn load(source: &ConfigSource) -> Result<FenceConfig> {
    let config = match source {
        ConfigSource::Default => {
            tracing::debug!("No config file found, using built-in boundaries");
            FenceConfig::default()
        }
        other => {
            let p = other.path().context("resolved config has no path")?;
            if matches!(other, ConfigSource::Global(_)) {
                tracing::info!("Using global config: {}", p.display());
            }
            FenceConfig::from_file(p)
                .with_context(|| format!("Failed to load config: {}", p.display()))?
        }
    };

    config.validate().context("Config validation failed")?;

    for shadowed in config.shadowed_rules() {
        tracing::warn!(
            "boundaries[{}] '{}' is unreachable: boundaries[{}] '{}' always matches first",
            shadowed.index,
            shadowed.prefix,
            shadowed.shadowed_by,
            config.boundaries[shadowed.shadowed_by].prefix
        );
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn explicit_wins_even_if_missing() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("arch-fence.toml"), "").unwrap();

        let result = resolve_inner(tmp.path(), Some(Path::new("/nonexistent.toml")), None);
        assert_eq!(
            result,
            ConfigSource::Explicit(PathBuf::from("/nonexistent.toml"))
        );
    }

    #[test]
    fn plain_name_preferred_over_dot_prefix() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("arch-fence.toml"), "").unwrap();
        fs::write(tmp.path().join(".arch-fence.toml"), "").unwrap();

        let result = resolve_inner(tmp.path(), None, None);
        assert_eq!(
            result,
            ConfigSource::Project(tmp.path().join("arch-fence.toml"))
        );
    }

    #[test]
    fn dot_prefixed_project_config_found() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(".arch-fence.toml"), "").unwrap();

        let result = resolve_inner(tmp.path(), None, None);
        assert_eq!(
            result,
            ConfigSource::Project(tmp.path().join(".arch-fence.toml"))
        );
    }

    #[test]
    fn global_used_only_without_project_config() {
        let project = TempDir::new().unwrap();
        let global = TempDir::new().unwrap();
        fs::write(global.path().join("config.toml"), "").unwrap();

        let result = resolve_inner(project.path(), None, Some(global.path().to_path_buf()));
        assert_eq!(
            result,
            ConfigSource::Global(global.path().join("config.toml"))
        );

        fs::write(project.path().join("arch-fence.toml"), "").unwrap();
        let result = resolve_inner(project.path(), None, Some(global.path().to_path_buf()));
        assert!(matches!(result, ConfigSource::Project(_)));
    }

    #[test]
    fn nothing_found_is_default() {
        let project = TempDir::new().unwrap();
        let global = TempDir::new().unwrap();

        let result = resolve_inner(project.path(), None, Some(global.path().to_path_buf()));
        assert_eq!(result, ConfigSource::Default);
        assert!(result.path().is_none());
    }

    #[test]
    fn load_default_gives_builtin_table() {
        let config = load(&ConfigSource::Default).unwrap();
        assert_eq!(config, FenceConfig::default());
    }

    #[test]
    fn load_reads_project_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("arch-fence.toml");
        fs::write(
            &path,
            "[[boundaries]]\nprefix = \"app.domain\"\nforbidden = [\"app.web\"]\n",
        )
        .unwrap();

        let config = load(&ConfigSource::Project(path)).unwrap();
        assert_eq!(config.boundaries.len(), 1);
        assert_eq!(config.boundaries[0].prefix, "app.domain");
    }

    #[test]
    fn load_rejects_invalid_rules() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("arch-fence.toml");
        fs::write(&path, "[[boundaries]]\nprefix = \"app\"\nforbidden = []\n").unwrap();

        let err = load(&ConfigSource::Explicit(path)).unwrap_err();
        assert!(format!("{err:#}").contains("no forbidden prefixes"));
    }

    #[test]
    fn load_reports_missing_explicit_file() {
        let err = load(&ConfigSource::Explicit(PathBuf::from("/nonexistent/arch-fence.toml")))
            .unwrap_err();
        assert!(err.to_string().contains("Failed to load config"));
    }
}
