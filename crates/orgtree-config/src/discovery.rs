//! Configuration file discovery.
//!
//! Discovers `.orgtree.toml` files by walking up the directory tree from a starting point,
//! then appending the global `~/.orgtree.toml` if present.

use std::path::{Path, PathBuf};

use directories::BaseDirs;

use crate::parse::is_root_config;

/// The configuration filename.
pub const CONFIG_FILENAME: &str = ".orgtree.toml";

/// Discovers all configuration files relevant to the given directory.
///
/// Returns paths in precedence order: closest to `cwd` first, global (`~/.orgtree.toml`)
/// last. Walking stops at a file that sets `root = true`, in which case the global file is
/// not consulted either.
pub fn discover_config_files(cwd: &Path) -> Vec<PathBuf> {
    let mut configs = Vec::new();
    for dir in cwd.ancestors() {
        let candidate = dir.join(CONFIG_FILENAME);
        if !candidate.is_file() {
            continue;
        }
        let stop = is_root_config(&candidate);
        configs.push(candidate);
        if stop {
            return configs;
        }
    }

    if let Some(global) = global_config_path().filter(|p| p.is_file())
        && !configs.contains(&global)
    {
        configs.push(global);
    }
    configs
}

/// Returns the path to the global configuration file (`~/.orgtree.toml`).
///
/// Returns `None` if the home directory cannot be determined.
pub fn global_config_path() -> Option<PathBuf> {
    BaseDirs::new().map(|dirs| dirs.home_dir().join(CONFIG_FILENAME))
}

/// Checks if a path is the global configuration file.
pub fn is_global_config(path: &Path) -> bool {
    global_config_path().is_some_and(|global| path == global)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::test_support::TestDir;

    fn local(configs: &[PathBuf]) -> Vec<&PathBuf> {
        configs.iter().filter(|p| !is_global_config(p)).collect()
    }

    #[test]
    fn test_discover_no_configs() {
        let test_dir = TestDir::new();
        let working_dir = test_dir.create_dir("a/b");
        assert!(local(&discover_config_files(&working_dir)).is_empty());
    }

    #[test]
    fn test_discover_closest_first() {
        let test_dir = TestDir::new();
        let outer = test_dir.write_config("", "");
        let inner = test_dir.write_config("team", "");
        let working_dir = test_dir.create_dir("team/reports");

        let configs = discover_config_files(&working_dir);
        assert_eq!(local(&configs), vec![&inner, &outer]);
    }

    #[test]
    fn test_global_config_path_uses_filename() {
        let Some(path) = global_config_path() else {
            return;
        };
        assert!(path.ends_with(CONFIG_FILENAME));
        assert!(is_global_config(&path));
        assert!(!is_global_config(Path::new("/elsewhere/.orgtree.toml")));
    }

    #[test]
    fn test_discover_skips_non_file_config() {
        let test_dir = TestDir::new();
        fs::create_dir_all(test_dir.path().join(CONFIG_FILENAME)).unwrap();
        let working_dir = test_dir.create_dir("sub");

        assert!(local(&discover_config_files(&working_dir)).is_empty());
    }

    #[test]
    fn test_root_config_stops_discovery() {
        let test_dir = TestDir::new();
        test_dir.write_config("", "");
        let root_config = test_dir.write_config("project", "root = true\n");
        let working_dir = test_dir.create_dir("project/data");

        let configs = discover_config_files(&working_dir);
        assert_eq!(configs, vec![root_config]);
    }

    #[test]
    fn test_root_config_includes_child_configs() {
        let test_dir = TestDir::new();
        test_dir.write_config("", "");
        let root_config = test_dir.write_config("project", "root = true\n");
        let child_config = test_dir.write_config("project/sub", "");
        let working_dir = test_dir.create_dir("project/sub/deep");

        let configs = discover_config_files(&working_dir);
        assert_eq!(configs, vec![child_config, root_config]);
    }

    #[test]
    fn test_root_false_does_not_stop_discovery() {
        let test_dir = TestDir::new();
        let parent_config = test_dir.write_config("", "");
        let mid_config = test_dir.write_config("project", "root = false\n");
        let working_dir = test_dir.create_dir("project/src");

        let configs = discover_config_files(&working_dir);
        assert_eq!(local(&configs), vec![&mid_config, &parent_config]);
    }
}
