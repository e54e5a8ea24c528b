use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{LoadError, SaveError};
use crate::model::memory::Turn;
use crate::model::params::GenerationParameters;

pub const SAVE_VERSION: u32 = 1;
pub const SAVE_EXTENSION: &str = "dungeon";

/// Everything needed to resume a story, written as a `.dungeon` file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSave {
    pub version: u32,
    pub turns: Vec<Turn>,
    pub transcript: String,
    pub turn_offsets: Vec<usize>,
    pub template: String,
    #[serde(default = "default_maturity_name")]
    pub maturity: String,
    #[serde(default)]
    pub params: GenerationParameters,
}

fn default_maturity_name() -> String {
    crate::model::catalog::default_maturity().name.to_string()
}

pub fn write_save(path: &Path, save: &GameSave) -> Result<(), SaveError> {
    let json = serde_json::to_string_pretty(save)?;
    fs::write(path, json)?;
    Ok(())
}

/// Parses a save and rejects versions this build does not understand.
/// Semantic checks (names, offsets) happen when the save is applied.
pub fn read_save(path: &Path) -> Result<GameSave, LoadError> {
    let raw = fs::read_to_string(path)?;
    let save: GameSave = serde_json::from_str(&raw)?;

    if save.version > SAVE_VERSION {
        return Err(LoadError::UnsupportedVersion {
            found: save.version,
            supported: SAVE_VERSION,
        });
    }

    Ok(save)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> GameSave {
        GameSave {
            version: SAVE_VERSION,
            turns: vec![Turn {
                input: "look around".into(),
                output: "Trees everywhere.".into(),
            }],
            transcript: "Intro\n\n> Do: look around\nTrees everywhere.\n".into(),
            turn_offsets: vec![6],
            template: "Fantasy".into(),
            maturity: "Mature".into(),
            params: GenerationParameters {
                temperature: 1.2,
                top_p: 0.9,
                retrieval_k: 5,
            },
        }
    }

    #[test]
    fn write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("story.dungeon");

        write_save(&path, &sample()).unwrap();
        assert_eq!(read_save(&path).unwrap(), sample());
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_save(&dir.path().join("nope.dungeon")).unwrap_err();
        assert!(matches!(err, LoadError::Io(_)));
    }

    #[test]
    fn garbage_is_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.dungeon");
        fs::write(&path, b"\x80not json").unwrap();
        assert!(matches!(read_save(&path), Err(LoadError::Io(_)) | Err(LoadError::Malformed(_))));

        fs::write(&path, "{\"version\": 1}").unwrap();
        assert!(matches!(read_save(&path), Err(LoadError::Malformed(_))));
    }

    #[test]
    fn newer_version_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("future.dungeon");
        let mut save = sample();
        save.version = SAVE_VERSION + 1;
        write_save(&path, &save).unwrap();

        assert!(matches!(
            read_save(&path),
            Err(LoadError::UnsupportedVersion { found, .. }) if found == SAVE_VERSION + 1
        ));
    }

    #[test]
    fn optional_fields_fall_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("old.dungeon");
        fs::write(
            &path,
            r#"{"version":1,"turns":[],"transcript":"x","turn_offsets":[],"template":"Horror"}"#,
        )
        .unwrap();

        let save = read_save(&path).unwrap();
        assert_eq!(save.maturity, "Safe");
        assert_eq!(save.params, GenerationParameters::default());
    }
}
