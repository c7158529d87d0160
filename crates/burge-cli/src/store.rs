use std::fs;
use std::path::{Path, PathBuf};

use burge_mechanics::{Character, CharacterStore, MechError, MechResult};

/// One pretty-printed JSON file per user under a data directory.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Store characters under `dir`. The directory is created on first save.
    pub fn new(dir: &Path) -> Self {
        Self {
            dir: dir.to_path_buf(),
        }
    }

    fn path_for(&self, user: &str) -> MechResult<PathBuf> {
        let valid = !user.is_empty()
            && user
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
            && !user.starts_with('.');
        if !valid {
            return Err(MechError::InvalidRequest(format!(
                "invalid user id '{user}': use letters, digits, '-', '_' or '.'"
            )));
        }
        Ok(self.dir.join(format!("{user}.json")))
    }
}

impl CharacterStore for JsonFileStore {
    fn load(&self, user: &str) -> MechResult<Option<Character>> {
        let path = self.path_for(user)?;
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no character file");
            return Ok(None);
        }
        let text = fs::read_to_string(&path)
            .map_err(|e| MechError::Store(format!("cannot read {}: {e}", path.display())))?;
        let character = serde_json::from_str(&text)
            .map_err(|e| MechError::Store(format!("corrupt file {}: {e}", path.display())))?;
        tracing::debug!(path = %path.display(), "loaded character");
        Ok(Some(character))
    }

    fn save(&mut self, user: &str, character: &Character) -> MechResult<()> {
        let path = self.path_for(user)?;
        fs::create_dir_all(&self.dir).map_err(|e| {
            MechError::Store(format!("cannot create {}: {e}", self.dir.display()))
        })?;
        let text = serde_json::to_string_pretty(character)
            .map_err(|e| MechError::Store(e.to_string()))?;

        // Write a sibling file, then rename over the target.
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, text)
            .map_err(|e| MechError::Store(format!("cannot write {}: {e}", tmp.display())))?;
        fs::rename(&tmp, &path)
            .map_err(|e| MechError::Store(format!("cannot write {}: {e}", path.display())))?;
        tracing::debug!(path = %path.display(), version = character.version(), "saved character");
        Ok(())
    }

    fn delete(&mut self, user: &str) -> MechResult<bool> {
        let path = self.path_for(user)?;
        if !path.exists() {
            return Ok(false);
        }
        fs::remove_file(&path)
            .map_err(|e| MechError::Store(format!("cannot delete {}: {e}", path.display())))?;
        tracing::debug!(path = %path.display(), "deleted character");
        Ok(true)
    }
}
