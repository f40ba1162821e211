//! File storage for unit-system definitions
//!
//! Each system is one file named `.unit_<name>.json` in the directory of its
//! scope. Writes go to a temporary file in the same directory which is synced
//! and renamed over the final name, so readers never see a partial file.

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::{debug, info, warn};
use crate::config::{Scope, StorageConfig};
use crate::error::UnitSystemError;

const FILE_PREFIX: &str = ".unit_";
const FILE_SUFFIX: &str = ".json";

/// Location-aware access to stored definitions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Storage {
    config: StorageConfig,
}

impl Storage {
    pub fn new(config: StorageConfig) -> Self {
        Storage { config }
    }

    /// Storage configured from the environment
    pub fn from_env() -> Self {
        Self::new(StorageConfig::from_env())
    }

    pub fn config(&self) -> &StorageConfig {
        &self.config
    }

    /// Path of the artifact for `(name, scope)`; the name is validated first
    pub fn path_for(&self, name: &str, scope: Scope) -> Result<PathBuf, UnitSystemError> {
        validate_name(name)?;
        Ok(self.config.dir(scope).join(file_name(name)))
    }

    pub fn exists(&self, name: &str, scope: Scope) -> Result<bool, UnitSystemError> {
        Ok(self.path_for(name, scope)?.is_file())
    }

    /// Read the artifact text, with `NotFound` for a missing file
    pub fn read(&self, name: &str, scope: Scope) -> Result<(PathBuf, String), UnitSystemError> {
        let path = self.path_for(name, scope)?;
        match fs::read_to_string(&path) {
            Ok(text) => {
                debug!(path = %path.display(), bytes = text.len(), "Read unit system");
                Ok((path, text))
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Err(UnitSystemError::NotFound {
                name: name.to_string(),
                scope,
                path,
            }),
            Err(source) => Err(UnitSystemError::Io { path, source }),
        }
    }

    /// Write the artifact atomically.
    ///
    /// Fails with `AlreadyExists` if the file is present and `overwrite` is
    /// false; nothing is written in that case. The global directory is
    /// created on first use.
    pub fn write(
        &self,
        name: &str,
        scope: Scope,
        contents: &str,
        overwrite: bool,
    ) -> Result<PathBuf, UnitSystemError> {
        let path = self.path_for(name, scope)?;
        if path.is_file() {
            if !overwrite {
                return Err(UnitSystemError::AlreadyExists {
                    name: name.to_string(),
                    scope,
                    path,
                });
            }
            warn!(name, %scope, path = %path.display(), "Overwriting existing unit system");
        }

        let dir = self.config.dir(scope);
        if scope == Scope::Global {
            fs::create_dir_all(dir).map_err(|source| UnitSystemError::Io {
                path: dir.to_path_buf(),
                source,
            })?;
        }

        // uniquely named per call; removed on drop unless persisted
        let mut tmp = tempfile::Builder::new()
            .prefix(&format!("{}{}.", FILE_PREFIX, name))
            .suffix(".tmp")
            .tempfile_in(dir)
            .map_err(|source| UnitSystemError::Io {
                path: dir.to_path_buf(),
                source,
            })?;
        tmp.write_all(contents.as_bytes())
            .and_then(|_| tmp.as_file().sync_all())
            .map_err(|source| UnitSystemError::Io {
                path: tmp.path().to_path_buf(),
                source,
            })?;
        tmp.persist(&path).map_err(|e| UnitSystemError::Io {
            path: path.clone(),
            source: e.error,
        })?;

        info!(name, %scope, path = %path.display(), "Saved unit system");
        Ok(path)
    }

    /// Names of all systems stored in a scope, sorted
    pub fn list(&self, scope: Scope) -> Result<Vec<String>, UnitSystemError> {
        let dir = self.config.dir(scope);
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(UnitSystemError::Io {
                    path: dir.to_path_buf(),
                    source,
                })
            }
        };

        let mut names: Vec<String> = entries
            .flatten()
            .filter_map(|entry| {
                let file = entry.file_name();
                let name = file.to_str()?.strip_prefix(FILE_PREFIX)?.strip_suffix(FILE_SUFFIX)?;
                validate_name(name).ok()?;
                Some(name.to_string())
            })
            .collect();
        names.sort();
        Ok(names)
    }
}

fn file_name(name: &str) -> String {
    format!("{}{}{}", FILE_PREFIX, name, FILE_SUFFIX)
}

/// Names are non-empty, have no path separators and do not start with a dot
pub fn validate_name(name: &str) -> Result<(), UnitSystemError> {
    let invalid = |reason: &str| UnitSystemError::InvalidName {
        name: name.to_string(),
        reason: reason.to_string(),
    };

    if name.trim().is_empty() {
        return Err(invalid("name is empty"));
    }
    if name.starts_with('.') {
        return Err(invalid("name starts with '.'"));
    }
    if let Some(c) = name
        .chars()
        .find(|c| !(c.is_alphanumeric() || matches!(c, '-' | '_' | '.')))
    {
        return Err(invalid(&format!("character {:?} is not allowed", c)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn storage(tmp: &TempDir) -> Storage {
        Storage::new(StorageConfig::new(
            tmp.path().join("work"),
            tmp.path().join("home").join(".unitconvert"),
        ))
    }

    #[test]
    fn test_validate_name() {
        assert!(validate_name("natural").is_ok());
        assert!(validate_name("test1_2C_0U").is_ok());
        assert!(validate_name("v1.2-astro").is_ok());
        assert!(validate_name("").is_err());
        assert!(validate_name("   ").is_err());
        assert!(validate_name(".hidden").is_err());
        assert!(validate_name("../escape").is_err());
        assert!(validate_name("a/b").is_err());
        assert!(validate_name("a\\b").is_err());
        assert!(validate_name("with space").is_err());
    }

    #[test]
    fn test_path_for() {
        let tmp = TempDir::new().unwrap();
        let storage = storage(&tmp);
        let path = storage.path_for("natural", Scope::Local).unwrap();
        assert_eq!(path, tmp.path().join("work").join(".unit_natural.json"));
        let path = storage.path_for("natural", Scope::Global).unwrap();
        assert!(path.ends_with(".unitconvert/.unit_natural.json"));
    }

    #[test]
    fn test_global_dir_created_on_write() {
        let tmp = TempDir::new().unwrap();
        let storage = storage(&tmp);
        assert!(!storage.exists("g", Scope::Global).unwrap());

        let path = storage.write("g", Scope::Global, "{}", false).unwrap();
        assert!(path.is_file());
        assert!(storage.exists("g", Scope::Global).unwrap());
        assert!(!storage.exists("g", Scope::Local).unwrap());
    }

    #[test]
    fn test_overwrite_guard() {
        let tmp = TempDir::new().unwrap();
        let storage = storage(&tmp);
        fs::create_dir_all(tmp.path().join("work")).unwrap();

        storage.write("s1", Scope::Local, "first", false).unwrap();
        let err = storage.write("s1", Scope::Local, "second", false).unwrap_err();
        assert!(matches!(err, UnitSystemError::AlreadyExists { .. }));
        assert_eq!(storage.read("s1", Scope::Local).unwrap().1, "first");

        storage.write("s1", Scope::Local, "third", true).unwrap();
        assert_eq!(storage.read("s1", Scope::Local).unwrap().1, "third");
    }

    #[test]
    fn test_no_temp_files_left() {
        let tmp = TempDir::new().unwrap();
        let storage = storage(&tmp);
        storage.write("a", Scope::Global, "{}", false).unwrap();
        let files: Vec<_> = fs::read_dir(storage.config().dir(Scope::Global))
            .unwrap()
            .flatten()
            .map(|e| e.file_name().to_string_lossy().to_string())
            .collect();
        assert_eq!(files, vec![".unit_a.json".to_string()]);
    }

    #[test]
    fn test_concurrent_writers_do_not_share_temp_files() {
        let tmp = TempDir::new().unwrap();
        let storage = storage(&tmp);
        std::thread::scope(|s| {
            for i in 0..8 {
                let storage = &storage;
                s.spawn(move || {
                    let contents = format!("{{\"writer\": {i}}}");
                    storage.write("shared", Scope::Global, &contents, true).unwrap();
                });
            }
        });

        let (_, text) = storage.read("shared", Scope::Global).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert!(value["writer"].as_u64().unwrap() < 8);
        assert_eq!(storage.list(Scope::Global).unwrap(), vec!["shared"]);
        let leftovers = fs::read_dir(storage.config().dir(Scope::Global))
            .unwrap()
            .flatten()
            .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
            .count();
        assert_eq!(leftovers, 0);
    }

    #[test]
    fn test_read_missing() {
        let tmp = TempDir::new().unwrap();
        let storage = storage(&tmp);
        let err = storage.read("nope", Scope::Global).unwrap_err();
        match err {
            UnitSystemError::NotFound { name, scope, path } => {
                assert_eq!(name, "nope");
                assert_eq!(scope, Scope::Global);
                assert!(path.ends_with(".unit_nope.json"));
            }
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_list() {
        let tmp = TempDir::new().unwrap();
        let storage = storage(&tmp);
        assert!(storage.list(Scope::Global).unwrap().is_empty());

        storage.write("zeta", Scope::Global, "{}", false).unwrap();
        storage.write("alpha", Scope::Global, "{}", false).unwrap();
        fs::write(storage.config().dir(Scope::Global).join("notes.txt"), "x").unwrap();
        assert_eq!(storage.list(Scope::Global).unwrap(), vec!["alpha", "zeta"]);
    }
}
