use crate::core::group::Group;
use crate::store::{GroupStore, StoreError};

/// Store that keeps groups in memory. Used in tests and demos.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    groups: Vec<Group>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl GroupStore for MemoryStore {
    fn load_groups(&self) -> Result<Vec<Group>, StoreError> {
        Ok(self.groups.clone())
    }

    fn save_groups(&mut self, groups: &[Group]) -> Result<(), StoreError> {
        self.groups = groups.to_vec();
        Ok(())
    }
}
