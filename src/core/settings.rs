//=========================================================================
// Settings
//=========================================================================
//
// User settings the session reads at startup.
//
// Loaded once, after input exists (bindings may be remapped) and before
// graphics (the resolution is needed for graphics init). Loading never
// fails: a missing or broken file yields defaults.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use log::{info, warn};
use serde::{Deserialize, Serialize};

//=== Internal Dependencies ===============================================

use crate::core::input::{GameKey, KeyCode};
use crate::core::subsystems::SettingsSource;

//=== Resolution ==========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
    pub fullscreen: bool,
}

impl Default for Resolution {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            fullscreen: false,
        }
    }
}

//=== Settings ============================================================

/// User-facing settings. Every field has a default.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub resolution: Resolution,

    /// Save slot loaded by "continue" and by skip-intro.
    pub last_save_slot: u32,

    /// Go straight to the last save instead of the intro.
    pub skip_intro: bool,

    /// Escape quits immediately instead of pausing.
    pub instant_quit: bool,

    /// Overrides of the default key bindings.
    pub bindings: BTreeMap<GameKey, KeyCode>,
}

//=== JsonSettings ========================================================

/// Settings stored as a JSON file.
pub struct JsonSettings {
    path: PathBuf,
}

impl JsonSettings {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes `settings` to the backing file.
    pub fn save(&self, settings: &Settings) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(settings)?;
        fs::write(&self.path, json)
    }
}

impl SettingsSource for JsonSettings {
    fn load(&mut self) -> Settings {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) => {
                info!(
                    target: "settings",
                    "No settings at {} ({}), using defaults",
                    self.path.display(),
                    e
                );
                return Settings::default();
            }
        };

        match serde_json::from_str(&text) {
            Ok(settings) => settings,
            Err(e) => {
                warn!(
                    target: "settings",
                    "Ignoring malformed settings {}: {}",
                    self.path.display(),
                    e
                );
                Settings::default()
            }
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let mut source = JsonSettings::new(dir.path().join("settings.json"));
        assert_eq!(source.load(), Settings::default());
    }

    #[test]
    fn malformed_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "{ not json").unwrap();

        assert_eq!(JsonSettings::new(path).load(), Settings::default());
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{ "skip_intro": true, "bindings": { "Jump": "Space" } }"#).unwrap();

        let settings = JsonSettings::new(path).load();
        assert!(settings.skip_intro);
        assert!(!settings.instant_quit);
        assert_eq!(settings.resolution, Resolution::default());
        assert_eq!(settings.bindings.get(&GameKey::Jump), Some(&KeyCode::Space));
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut source = JsonSettings::new(dir.path().join("settings.json"));

        let settings = Settings {
            last_save_slot: 2,
            instant_quit: true,
            ..Settings::default()
        };
        source.save(&settings).unwrap();

        assert_eq!(source.load(), settings);
    }
}
