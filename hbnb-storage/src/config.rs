use std::path::PathBuf;

/// Backing file used when none is configured.
pub const DEFAULT_FILE: &str = "file.json";

/// What `reload` does with a persisted key whose type is not registered
/// (or that is not of the form `<TypeName>.<id>`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReloadPolicy {
    #[default]
    /// Log a warning and skip the record.
    SkipUnknown,
    /// Abort the reload; the live collection is left untouched.
    Strict,
}

/// Storage engine configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    pub path: PathBuf,
    pub reload_policy: ReloadPolicy,
    /// Indent the backing file.
    pub pretty: bool,
}

impl StorageConfig {
    /// Default settings with a specific backing file.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_FILE),
            reload_policy: ReloadPolicy::default(),
            pretty: false,
        }
    }
}
