//! Settings persistence.
//!
//! Settings live in a single TOML file at
//! `~/.config/tubelock/settings.toml`. Set TUBELOCK_ENV=dev to use
//! `~/.config/tubelock-dev/` instead.

use std::path::{Path, PathBuf};

use crate::error::SettingsError;
use crate::settings::Settings;

/// Abstraction over where settings live. The engine only ever consumes
/// a loaded snapshot; stores exist so the CLI, tests, and the watch
/// loop can share one read/write surface.
pub trait SettingsStore {
    /// Load the current snapshot.
    fn load(&self) -> Result<Settings, SettingsError>;

    /// Persist a snapshot.
    fn save(&mut self, settings: &Settings) -> Result<(), SettingsError>;

    /// Load, falling back to defaults on any failure.
    ///
    /// This is the startup path: a broken or unreadable store must not
    /// prevent the engine from running, and defaults never block.
    fn load_or_default(&self) -> Settings {
        match self.load() {
            Ok(s) => s,
            Err(e) => {
                log::warn!("settings load failed, using defaults: {e}");
                Settings::default()
            }
        }
    }
}

/// Returns the settings directory, creating it if needed.
///
/// # Errors
/// Returns an error if the home directory cannot be determined or the
/// directory cannot be created.
pub fn settings_dir() -> Result<PathBuf, SettingsError> {
    let base_dir = dirs::home_dir()
        .ok_or(SettingsError::NoConfigDir)?
        .join(".config");

    let env = std::env::var("TUBELOCK_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("tubelock-dev")
    } else {
        base_dir.join("tubelock")
    };

    std::fs::create_dir_all(&dir).map_err(|e| SettingsError::LoadFailed {
        path: dir.clone(),
        message: e.to_string(),
    })?;
    Ok(dir)
}

/// TOML-file-backed store.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Open the store at the default platform location.
    pub fn open() -> Result<Self, SettingsError> {
        Ok(Self {
            path: settings_dir()?.join("settings.toml"),
        })
    }

    /// Open a store at an explicit path.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SettingsStore for FileStore {
    fn load(&self) -> Result<Settings, SettingsError> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => {
                toml::from_str(&content).map_err(|e| SettingsError::ParseFailed(e.to_string()))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Settings::default()),
            Err(e) => Err(SettingsError::LoadFailed {
                path: self.path.clone(),
                message: e.to_string(),
            }),
        }
    }

    fn save(&mut self, settings: &Settings) -> Result<(), SettingsError> {
        let content = toml::to_string_pretty(settings)
            .map_err(|e| SettingsError::ParseFailed(e.to_string()))?;
        std::fs::write(&self.path, content).map_err(|e| SettingsError::SaveFailed {
            path: self.path.clone(),
            message: e.to_string(),
        })
    }
}

/// In-process store for tests and embedding.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    settings: Settings,
}

impl MemoryStore {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }
}

impl SettingsStore for MemoryStore {
    fn load(&self) -> Result<Settings, SettingsError> {
        Ok(self.settings.clone())
    }

    fn save(&mut self, settings: &Settings) -> Result<(), SettingsError> {
        self.settings = settings.clone();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::at(dir.path().join("settings.toml"));
        assert_eq!(store.load().unwrap(), Settings::default());
    }

    #[test]
    fn save_then_load_roundtrips() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::at(dir.path().join("settings.toml"));

        let mut s = Settings::default();
        s.schedule_block_enabled = true;
        s.schedule_block_start = "22:00".into();
        s.schedule_block_end = "06:00".into();
        store.save(&s).unwrap();

        assert_eq!(store.load().unwrap(), s);
    }

    #[test]
    fn corrupt_file_is_a_parse_error_but_defaults_fallback_works() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        std::fs::write(&path, "tempBlockUntil = \"not a number\"").unwrap();

        let store = FileStore::at(&path);
        assert!(matches!(store.load(), Err(SettingsError::ParseFailed(_))));
        assert_eq!(store.load_or_default(), Settings::default());
    }

    #[test]
    fn unknown_keys_in_file_are_ignored() {
        // Other parts of the system write their own keys into the same
        // store; the engine only reads its five.
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        std::fs::write(
            &path,
            "extensionEnabled = false\nhideShorts = true\nsummaryModel = \"small\"\n",
        )
        .unwrap();

        let loaded = FileStore::at(&path).load().unwrap();
        assert!(!loaded.extension_enabled);
        assert_eq!(loaded.temp_block_until, 0);
    }

    #[test]
    fn memory_store_roundtrips() {
        let mut store = MemoryStore::default();
        let mut s = Settings::default();
        s.temp_block_until = 42;
        store.save(&s).unwrap();
        assert_eq!(store.load().unwrap(), s);
    }
}
