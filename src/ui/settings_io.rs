use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::ui::settings::UiSettings;

fn settings_path() -> PathBuf {
    let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("narrative_nexus");
    path.push("ui_settings.json");
    path
}

pub fn load_settings() -> UiSettings {
    load_settings_from(&settings_path())
}

/// Missing or unparsable files give defaults; a stored scale outside the
/// slider's range is repaired.
fn load_settings_from(path: &Path) -> UiSettings {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) => {
            debug!(error = %e, path = %path.display(), "No saved UI settings");
            return UiSettings::default();
        }
    };

    match serde_json::from_str::<UiSettings>(&raw) {
        Ok(settings) => settings.sanitized(),
        Err(e) => {
            warn!(error = %e, path = %path.display(), "Ignoring unreadable UI settings");
            UiSettings::default()
        }
    }
}

pub fn save_settings(settings: &UiSettings) {
    let path = settings_path();
    if let Some(dir) = path.parent() {
        if let Err(e) = fs::create_dir_all(dir) {
            warn!(error = %e, "Could not create settings directory");
            return;
        }
    }
    match serde_json::to_string_pretty(settings) {
        Ok(json) => {
            if let Err(e) = fs::write(&path, json) {
                warn!(error = %e, path = %path.display(), "Could not save UI settings");
            }
        }
        Err(e) => warn!(error = %e, "Could not serialize UI settings"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::settings::Theme;

    #[test]
    fn zero_scale_on_disk_is_repaired() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ui_settings.json");
        fs::write(&path, r#"{"ui_scale":0.0,"theme":"dark"}"#).unwrap();

        let settings = load_settings_from(&path);
        assert_eq!(settings.ui_scale, 0.75);
        assert_eq!(settings.theme, Theme::Dark);
    }

    #[test]
    fn missing_or_garbled_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ui_settings.json");
        assert_eq!(load_settings_from(&path), UiSettings::default());

        fs::write(&path, "not json").unwrap();
        assert_eq!(load_settings_from(&path), UiSettings::default());
    }
}
