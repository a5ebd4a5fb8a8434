//! Persisted settings and change propagation.
//!
//! The popup UI, the CLI, and the engine all share five keys. Key names
//! are fixed by the storage contract and serialized verbatim
//! (`extensionEnabled`, `tempBlockUntil`, `scheduleBlockEnabled`,
//! `scheduleBlockStart`, `scheduleBlockEnd`); writers may store other
//! keys in the same file, which this module ignores.
//!
//! Change propagation is pull-then-diff: a watcher reloads the file,
//! diffs against its previous snapshot with [`Settings::diff`], and
//! feeds the resulting [`SettingsDelta`] to the engine.

mod store;

pub use store::{settings_dir, FileStore, MemoryStore, SettingsStore};

use serde::{Deserialize, Serialize};

use crate::error::SettingsError;

/// The blocking policy's persisted inputs.
///
/// `temp_block_until` is an absolute epoch-milliseconds instant; `0` or
/// any past instant means no temporary block. Expired values are never
/// cleared by the engine -- expiry is a read-time comparison only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Master switch. When false, nothing ever blocks.
    #[serde(default = "default_true")]
    pub extension_enabled: bool,
    /// One-shot block expiry, epoch milliseconds. 0 = inactive.
    #[serde(default)]
    pub temp_block_until: u64,
    /// Whether the recurring daily window applies.
    #[serde(default)]
    pub schedule_block_enabled: bool,
    /// Daily window start, "HH:MM" 24-hour local time.
    #[serde(default = "default_schedule_start")]
    pub schedule_block_start: String,
    /// Daily window end, "HH:MM". If end <= start the window wraps
    /// past midnight.
    #[serde(default = "default_schedule_end")]
    pub schedule_block_end: String,
}

fn default_true() -> bool {
    true
}
fn default_schedule_start() -> String {
    "09:00".into()
}
fn default_schedule_end() -> String {
    "17:00".into()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            extension_enabled: true,
            temp_block_until: 0,
            schedule_block_enabled: false,
            schedule_block_start: default_schedule_start(),
            schedule_block_end: default_schedule_end(),
        }
    }
}

impl Settings {
    /// Diff against a newer snapshot. Keys this module does not know
    /// about never appear in the delta, which is how unrelated store
    /// writes get filtered out.
    pub fn diff(&self, newer: &Settings) -> SettingsDelta {
        SettingsDelta {
            extension_enabled: changed(&self.extension_enabled, &newer.extension_enabled),
            temp_block_until: changed(&self.temp_block_until, &newer.temp_block_until),
            schedule_block_enabled: changed(
                &self.schedule_block_enabled,
                &newer.schedule_block_enabled,
            ),
            schedule_block_start: changed(&self.schedule_block_start, &newer.schedule_block_start),
            schedule_block_end: changed(&self.schedule_block_end, &newer.schedule_block_end),
        }
    }

    /// Apply a delta in place.
    pub fn apply(&mut self, delta: &SettingsDelta) {
        if let Some(v) = delta.extension_enabled {
            self.extension_enabled = v;
        }
        if let Some(v) = delta.temp_block_until {
            self.temp_block_until = v;
        }
        if let Some(v) = delta.schedule_block_enabled {
            self.schedule_block_enabled = v;
        }
        if let Some(ref v) = delta.schedule_block_start {
            self.schedule_block_start = v.clone();
        }
        if let Some(ref v) = delta.schedule_block_end {
            self.schedule_block_end = v.clone();
        }
    }

    /// Get a settings value as a string by its storage key name.
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "extensionEnabled" => Some(self.extension_enabled.to_string()),
            "tempBlockUntil" => Some(self.temp_block_until.to_string()),
            "scheduleBlockEnabled" => Some(self.schedule_block_enabled.to_string()),
            "scheduleBlockStart" => Some(self.schedule_block_start.clone()),
            "scheduleBlockEnd" => Some(self.schedule_block_end.clone()),
            _ => None,
        }
    }

    /// Set a settings value from a string by its storage key name.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value does not
    /// parse as the key's type. Time-of-day strings are stored as-is;
    /// malformed ones simply leave the schedule window inactive.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), SettingsError> {
        match key {
            "extensionEnabled" => {
                self.extension_enabled = parse_value(key, value)?;
            }
            "tempBlockUntil" => {
                self.temp_block_until = parse_value(key, value)?;
            }
            "scheduleBlockEnabled" => {
                self.schedule_block_enabled = parse_value(key, value)?;
            }
            "scheduleBlockStart" => {
                self.schedule_block_start = value.to_string();
            }
            "scheduleBlockEnd" => {
                self.schedule_block_end = value.to_string();
            }
            _ => return Err(SettingsError::UnknownKey(key.to_string())),
        }
        Ok(())
    }

    /// The five storage key names, in contract order.
    pub fn keys() -> [&'static str; 5] {
        [
            "extensionEnabled",
            "tempBlockUntil",
            "scheduleBlockEnabled",
            "scheduleBlockStart",
            "scheduleBlockEnd",
        ]
    }
}

fn changed<T: PartialEq + Clone>(old: &T, new: &T) -> Option<T> {
    if old == new {
        None
    } else {
        Some(new.clone())
    }
}

fn parse_value<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, SettingsError>
where
    T::Err: std::fmt::Display,
{
    value.parse().map_err(|e: T::Err| SettingsError::InvalidValue {
        key: key.to_string(),
        message: e.to_string(),
    })
}

/// Per-key change record. `None` means the key did not change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsDelta {
    pub extension_enabled: Option<bool>,
    pub temp_block_until: Option<u64>,
    pub schedule_block_enabled: Option<bool>,
    pub schedule_block_start: Option<String>,
    pub schedule_block_end: Option<String>,
}

impl SettingsDelta {
    pub fn is_empty(&self) -> bool {
        self.extension_enabled.is_none()
            && self.temp_block_until.is_none()
            && self.schedule_block_enabled.is_none()
            && self.schedule_block_start.is_none()
            && self.schedule_block_end.is_none()
    }
}
