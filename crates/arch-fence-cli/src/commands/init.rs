//! Init command implementation.

use anyhow::{bail, Result};
use std::path::Path;

const CONFIG_FILE: &str = "arch-fence.toml";

const DEFAULT_CONFIG: &str = r#"# arch-fence configuration
#
# Module names are the scanned root's directory name followed by the file's
# path inside it: `arch-fence check src` maps src/features/x.py to
# `src.features.x`.

[analyzer]
# Glob patterns (relative to the scanned root) to exclude
exclude = []

# Directory names never descended into
skip_dirs = ["venv", ".venv", "__pycache__"]

# Respect .gitignore files
respect_gitignore = false

# Boundaries are tried in order and the FIRST one whose prefix starts a
# file's module name is the only one applied to that file. The prefix test
# is a plain string test ("src.api" also covers "src.apis"); forbidden
# prefixes match whole segments ("src.infra" does not cover "src.infra_old").

[[boundaries]]
prefix = "src.features"
forbidden = ["src.infra"]

[[boundaries]]
prefix = "src.api"
forbidden = ["src.infra"]
"#;

/// Runs the init command.
pub fn run(force: bool) -> Result<()> {
    write_config(Path::new(CONFIG_FILE), force)?;

    println!("Created {CONFIG_FILE}");
    println!("\nNext steps:");
    println!("  1. Edit [[boundaries]] in {CONFIG_FILE} for your project");
    println!("  2. Run: arch-fence check src");

    Ok(())
}

fn write_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            path.display()
        );
    }

    std::fs::write(path, DEFAULT_CONFIG)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use arch_fence_core::FenceConfig;
    use tempfile::TempDir;

    #[test]
    fn template_matches_builtin_table() {
        let config = FenceConfig::parse(DEFAULT_CONFIG).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config, FenceConfig::default());
    }

    #[test]
    fn refuses_to_overwrite_without_force() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(CONFIG_FILE);
        std::fs::write(&path, "# mine\n").unwrap();

        assert!(write_config(&path, false).is_err());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# mine\n");

        write_config(&path, true).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), DEFAULT_CONFIG);
    }
}
