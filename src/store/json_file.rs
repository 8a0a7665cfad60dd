use crate::core::group::Group;
use crate::store::{GroupStore, StoreError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// On-disk layout: the group list under a single `groups` key.
#[derive(Serialize, Deserialize)]
struct StoreFile {
    #[serde(default)]
    groups: Vec<Group>,
}

/// Store that keeps all groups in one pretty-printed JSON file.
///
/// A missing file reads as an empty group list; it is created on the
/// first save.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl GroupStore for JsonFileStore {
    fn load_groups(&self) -> Result<Vec<Group>, StoreError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::info!("store {} does not exist yet", self.path.display());
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        let file: StoreFile = serde_json::from_str(&content)?;
        Ok(file.groups)
    }

    fn save_groups(&mut self, groups: &[Group]) -> Result<(), StoreError> {
        let file = StoreFile {
            groups: groups.to_vec(),
        };
        let json = serde_json::to_string_pretty(&file)?;
        fs::write(&self.path, json).map_err(|e| {
            log::warn!("failed to write store {}: {}", self.path.display(), e);
            StoreError::Io(e)
        })?;
        log::debug!("saved {} groups to {}", groups.len(), self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("groups.json"));
        assert!(store.load_groups().unwrap().is_empty());
    }

    #[test]
    fn test_round_trip_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("groups.json");
        let mut store = JsonFileStore::new(&path);

        let mut group = Group::new("Ski trip", ["Ana", "Bo", "Cy"]).unwrap();
        group.record_expense("Ana", dec!(300), "Cabin").unwrap();
        store.insert_group(group.clone()).unwrap();

        let reopened = JsonFileStore::new(&path);
        let loaded = reopened.find_group(group.id()).unwrap();
        assert_eq!(loaded.name(), "Ski trip");
        assert_eq!(loaded.members(), group.members());
        assert_eq!(loaded.expenses(), group.expenses());
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("groups.json");
        fs::write(&path, "{ not json").unwrap();
        let store = JsonFileStore::new(&path);
        assert!(matches!(store.load_groups(), Err(StoreError::Json(_))));
    }
}
