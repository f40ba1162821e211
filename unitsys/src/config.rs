//! Storage configuration: where unit-system definitions live

use std::env;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Overrides the local directory (default: current working directory)
pub const LOCAL_DIR_ENV: &str = "UNITSYS_LOCAL_DIR";
/// Overrides the global directory (default: `$HOME/.unitconvert`)
pub const HOME_ENV: &str = "UNITSYS_HOME";
/// Name of the per-user directory under the home directory
pub const GLOBAL_DIR_NAME: &str = ".unitconvert";

/// Which of the two storage locations a definition lives in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    /// The working (or configured local) directory
    #[default]
    Local,
    /// The per-user directory, created on first use
    Global,
}

impl Scope {
    pub fn as_str(self) -> &'static str {
        match self {
            Scope::Local => "local",
            Scope::Global => "global",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Scope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "local" => Ok(Scope::Local),
            "global" => Ok(Scope::Global),
            other => Err(format!("unknown scope '{}' (expected 'local' or 'global')", other)),
        }
    }
}

/// Directories backing the two scopes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    pub local_dir: PathBuf,
    pub global_dir: PathBuf,
}

impl StorageConfig {
    /// Explicit configuration
    pub fn new(local_dir: impl Into<PathBuf>, global_dir: impl Into<PathBuf>) -> Self {
        StorageConfig {
            local_dir: local_dir.into(),
            global_dir: global_dir.into(),
        }
    }

    /// Resolve both directories from the environment.
    ///
    /// `UNITSYS_LOCAL_DIR` overrides the working directory and `UNITSYS_HOME`
    /// overrides the global directory. Without an override the global
    /// directory is `.unitconvert` under `HOME` (or `USERPROFILE`).
    pub fn from_env() -> Self {
        let local_dir = env::var(LOCAL_DIR_ENV)
            .map(PathBuf::from)
            .ok()
            .or_else(|| env::current_dir().ok())
            .unwrap_or_else(|| PathBuf::from("."));

        let global_dir = match env::var(HOME_ENV) {
            Ok(dir) => PathBuf::from(dir),
            Err(_) => match env::var("HOME").or_else(|_| env::var("USERPROFILE")) {
                Ok(home) => Path::new(&home).join(GLOBAL_DIR_NAME),
                Err(_) => {
                    warn!("No home directory found, global unit systems stored under {}", local_dir.display());
                    local_dir.join(GLOBAL_DIR_NAME)
                }
            },
        };

        StorageConfig { local_dir, global_dir }
    }

    pub fn with_local_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.local_dir = dir.into();
        self
    }

    pub fn with_global_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.global_dir = dir.into();
        self
    }

    /// Directory backing a scope
    pub fn dir(&self, scope: Scope) -> &Path {
        match scope {
            Scope::Local => &self.local_dir,
            Scope::Global => &self.global_dir,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_parse() {
        assert_eq!("local".parse::<Scope>().unwrap(), Scope::Local);
        assert_eq!("GLOBAL".parse::<Scope>().unwrap(), Scope::Global);
        assert!("remote".parse::<Scope>().is_err());
        assert_eq!(Scope::default(), Scope::Local);
    }

    #[test]
    fn test_scope_serde() {
        assert_eq!(serde_json::to_string(&Scope::Global).unwrap(), "\"global\"");
        let scope: Scope = serde_json::from_str("\"local\"").unwrap();
        assert_eq!(scope, Scope::Local);
    }

    #[test]
    fn test_dir_per_scope() {
        let config = StorageConfig::new("/work", "/home/u/.unitconvert");
        assert_eq!(config.dir(Scope::Local), Path::new("/work"));
        assert_eq!(config.dir(Scope::Global), Path::new("/home/u/.unitconvert"));

        let config = config.with_global_dir("/shared");
        assert_eq!(config.dir(Scope::Global), Path::new("/shared"));
    }
}
