//! Path resolution for the dataset location.
//!
//! Resolves relative and tilde-prefixed dataset paths to absolute paths.

use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};

use directories::BaseDirs;

use crate::ConfigError;

/// Resolves a `[source] path` value to an absolute path.
///
/// A leading `~` expands to the home directory and a relative path is joined to
/// `config_dir`, the directory of the file that set it. Existing files are canonicalized.
/// A missing file resolves to the joined path so validation can report it.
pub fn resolve_source_path(path: &str, config_dir: &Path) -> Result<PathBuf, ConfigError> {
    let joined = config_dir.join(expand_tilde(path)?);
    match joined.canonicalize() {
        Ok(canonical) => Ok(canonical),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(joined),
        Err(source) => Err(ConfigError::PathResolution {
            path: joined,
            source,
        }),
    }
}

/// Replaces a leading `~` or `~/` with the home directory.
fn expand_tilde(path: &str) -> Result<PathBuf, ConfigError> {
    let rest = match path.strip_prefix('~') {
        Some("") => "",
        Some(rest) if rest.starts_with('/') => rest.trim_start_matches('/'),
        _ => return Ok(PathBuf::from(path)),
    };
    let home = BaseDirs::new()
        .map(|dirs| dirs.home_dir().to_path_buf())
        .ok_or(ConfigError::NoHomeDirectory)?;
    Ok(if rest.is_empty() { home } else { home.join(rest) })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::TestDir;

    #[test]
    fn test_resolve_relative_path() {
        let test_dir = TestDir::new();
        let data = test_dir.create_file("data/org.json");

        let resolved = resolve_source_path("./data/org.json", test_dir.path()).unwrap();
        assert_eq!(resolved, data.canonicalize().unwrap());
    }

    #[test]
    fn test_resolve_parent_relative_path() {
        let test_dir = TestDir::new();
        let data = test_dir.create_file("shared/org.json");
        let config_dir = test_dir.create_dir("project");

        let resolved = resolve_source_path("../shared/org.json", &config_dir).unwrap();
        assert_eq!(resolved, data.canonicalize().unwrap());
    }

    #[test]
    fn test_resolve_absolute_path() {
        let test_dir = TestDir::new();
        let data = test_dir.create_file("org.json");
        let absolute = data.to_str().unwrap();

        let resolved = resolve_source_path(absolute, Path::new("/")).unwrap();
        assert_eq!(resolved, data.canonicalize().unwrap());
    }

    #[test]
    fn test_resolve_missing_path_is_kept() {
        let test_dir = TestDir::new();
        let resolved = resolve_source_path("./absent.json", test_dir.path()).unwrap();
        assert_eq!(resolved, test_dir.path().join("./absent.json"));
    }

    #[test]
    fn test_expand_tilde() {
        let home = BaseDirs::new().unwrap().home_dir().to_path_buf();
        assert_eq!(expand_tilde("~").unwrap(), home);
        assert_eq!(
            expand_tilde("~/charts/org.json").unwrap(),
            home.join("charts/org.json")
        );
        assert_eq!(expand_tilde("~alice/org.json").unwrap(), PathBuf::from("~alice/org.json"));
        assert_eq!(expand_tilde("foo/~/bar").unwrap(), PathBuf::from("foo/~/bar"));
    }
}
