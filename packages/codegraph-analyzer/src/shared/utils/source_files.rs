//! Python source discovery
//!
//! Builds the `{path → source}` batch from a file or a directory tree.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::shared::models::Result;

/// Directory names never descended into
const EXCLUDED_DIRS: &[&str] = &["__pycache__", "node_modules", "venv", "target"];

/// Hidden and build directories, pruned before they are read
fn is_excluded(name: &str) -> bool {
    name.starts_with('.') || EXCLUDED_DIRS.contains(&name)
}

/// Collect Python sources below `root`.
///
/// A file root yields one entry keyed by its file name. A directory root is
/// walked for `*.py` files keyed by their `/`-separated path relative to the
/// root; hidden and excluded entries below the root are not descended into.
/// Unreadable entries and non-UTF-8 files are skipped with a warning.
pub fn collect_python_sources(root: &Path) -> Result<BTreeMap<String, String>> {
    let mut files = BTreeMap::new();

    if root.is_file() {
        let key = root
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| root.to_string_lossy().to_string());
        files.insert(key, fs::read_to_string(root)?);
        return Ok(files);
    }

    // Surface a missing root as an IO error instead of an empty batch
    fs::metadata(root)?;

    let walker = WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_excluded(&e.file_name().to_string_lossy()));

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Skipping {}", e);
                continue;
            }
        };

        let path = entry.path();
        if !entry.file_type().is_file() || path.extension().map_or(true, |ext| ext != "py") {
            continue;
        }

        let rel_path = match path.strip_prefix(root) {
            Ok(p) => p,
            Err(_) => continue,
        };

        let key = rel_path
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");

        match fs::read_to_string(path) {
            Ok(source) => {
                files.insert(key, source);
            }
            Err(e) => warn!("Skipping {}: {}", path.display(), e),
        }
    }

    debug!("Collected {} Python files under {}", files.len(), root.display());
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_collects_relative_keys() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("pkg/sub")).unwrap();
        fs::create_dir_all(dir.path().join("__pycache__")).unwrap();
        fs::create_dir_all(dir.path().join(".venv")).unwrap();
        fs::write(dir.path().join("main.py"), "import pkg\n").unwrap();
        fs::write(dir.path().join("pkg/sub/util.py"), "def f():\n    pass\n").unwrap();
        fs::write(dir.path().join("pkg/readme.md"), "# docs").unwrap();
        fs::write(dir.path().join("__pycache__/main.py"), "x").unwrap();
        fs::write(dir.path().join(".venv/lib.py"), "x").unwrap();

        let files = collect_python_sources(dir.path()).unwrap();
        let keys: Vec<_> = files.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["main.py", "pkg/sub/util.py"]);
        assert_eq!(files["main.py"], "import pkg\n");
    }

    #[test]
    fn test_hidden_root_still_walked() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join(".checkout");
        fs::create_dir_all(root.join("app/node_modules/dep")).unwrap();
        fs::write(root.join("app/run.py"), "run()\n").unwrap();
        fs::write(root.join("app/node_modules/dep/x.py"), "x").unwrap();
        fs::write(root.join("app/.hidden.py"), "x").unwrap();

        let files = collect_python_sources(&root).unwrap();
        let keys: Vec<_> = files.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["app/run.py"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_dangling_symlink_skipped() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("ok.py"), "x = 1\n").unwrap();
        std::os::unix::fs::symlink(dir.path().join("gone"), dir.path().join("link.py")).unwrap();

        let files = collect_python_sources(dir.path()).unwrap();
        let keys: Vec<_> = files.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["ok.py"]);
    }

    #[test]
    fn test_single_file_keyed_by_name() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("script.py");
        fs::write(&path, "print(1)\n").unwrap();

        let files = collect_python_sources(&path).unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files["script.py"], "print(1)\n");
    }

    #[test]
    fn test_non_utf8_file_skipped() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("ok.py"), "x = 1\n").unwrap();
        fs::write(dir.path().join("bad.py"), [0xff, 0xfe, 0x00]).unwrap();

        let files = collect_python_sources(dir.path()).unwrap();
        assert!(files.contains_key("ok.py"));
        assert!(!files.contains_key("bad.py"));
    }

    #[test]
    fn test_missing_root_is_error() {
        assert!(collect_python_sources(Path::new("/nonexistent/src")).is_err());
    }
}
