//! Group persistence.
//!
//! The settlement engine never touches storage. Stores hold the whole
//! group list under a single key, the way a small key-value store would,
//! and callers load a group, hand its data to the calculator, and write
//! it back after edits.

pub mod json_file;
pub mod memory;

use crate::core::group::Group;
use thiserror::Error;
use uuid::Uuid;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

/// Errors arising from reading or writing a group store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("store contents are not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("no group with id {0}")]
    GroupNotFound(Uuid),
}

/// Get/set access to the full list of groups.
pub trait GroupStore {
    fn load_groups(&self) -> Result<Vec<Group>, StoreError>;

    fn save_groups(&mut self, groups: &[Group]) -> Result<(), StoreError>;

    fn find_group(&self, id: Uuid) -> Result<Group, StoreError> {
        self.load_groups()?
            .into_iter()
            .find(|g| g.id() == id)
            .ok_or(StoreError::GroupNotFound(id))
    }

    /// Append a new group to the list.
    fn insert_group(&mut self, group: Group) -> Result<(), StoreError> {
        let mut groups = self.load_groups()?;
        groups.push(group);
        self.save_groups(&groups)
    }

    /// Replace the group with the same id, appending it if none exists.
    fn upsert_group(&mut self, group: Group) -> Result<(), StoreError> {
        let mut groups = self.load_groups()?;
        match groups.iter_mut().find(|g| g.id() == group.id()) {
            Some(slot) => *slot = group,
            None => groups.push(group),
        }
        self.save_groups(&groups)
    }

    fn remove_group(&mut self, id: Uuid) -> Result<Group, StoreError> {
        let mut groups = self.load_groups()?;
        let pos = groups
            .iter()
            .position(|g| g.id() == id)
            .ok_or(StoreError::GroupNotFound(id))?;
        let removed = groups.remove(pos);
        self.save_groups(&groups)?;
        Ok(removed)
    }
}
