//! Mapping from file paths to dotted module identities.

use std::path::{Component, Path};

/// Computes the dotted module identity of `file` under `root`.
///
/// The root's own directory name leads, followed by the path segments
/// relative to the root with the final extension removed:
/// `/work/src` + `/work/src/features/x.py` gives `src.features.x`.
///
/// # Panics
///
/// Panics if `file` is not located under `root`. Callers only pass paths
/// obtained by walking `root`.
#[must_use]
pub fn module_identity(root: &Path, file: &Path) -> String {
    let Ok(relative) = file.strip_prefix(root) else {
        panic!(
            "{} is not relative to root {}",
            file.display(),
            root.display()
        );
    };

    let root_name = root
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let mut parts = vec![root_name];
    parts.extend(relative.with_extension("").components().filter_map(|c| {
        if let Component::Normal(s) = c {
            Some(s.to_string_lossy().into_owned())
        } else {
            None
        }
    }));

    parts.join(".")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prepends_root_name_and_strips_extension() {
        let id = module_identity(Path::new("/work/src"), Path::new("/work/src/features/x.py"));
        assert_eq!(id, "src.features.x");
    }

    #[test]
    fn top_level_file() {
        let id = module_identity(Path::new("/work/app"), Path::new("/work/app/main.py"));
        assert_eq!(id, "app.main");
    }

    #[test]
    fn package_init_is_kept_as_segment() {
        let id = module_identity(
            Path::new("/work/src"),
            Path::new("/work/src/features/__init__.py"),
        );
        assert_eq!(id, "src.features.__init__");
    }

    #[test]
    fn only_last_extension_is_removed() {
        let id = module_identity(Path::new("/work/src"), Path::new("/work/src/a.b.py"));
        assert_eq!(id, "src.a.b");
    }

    #[test]
    fn distinct_paths_give_distinct_identities() {
        let root = Path::new("/work/src");
        let a = module_identity(root, Path::new("/work/src/infra/db.py"));
        let b = module_identity(root, Path::new("/work/src/infra_db.py"));
        assert_ne!(a, b);
    }

    #[test]
    fn pure_function_of_inputs() {
        let root = Path::new("/work/src");
        let file = Path::new("/work/src/api/routes.py");
        assert_eq!(module_identity(root, file), module_identity(root, file));
    }

    #[test]
    #[should_panic(expected = "not relative to root")]
    fn file_outside_root_panics() {
        let _ = module_identity(Path::new("/work/src"), Path::new("/elsewhere/x.py"));
    }
}
