//! Accumulation of batched instance transforms.
use serde::{Deserialize, Serialize};

use crate::asset::catalog::BatchKey;
use crate::transform::Transform;

/// All instances of one batched placeable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct InstanceBatch {
    pub key: BatchKey,
    /// Name of the first element that fed the batch.
    pub name: String,
    pub snap_to_floor: bool,
    pub align_to_surface: bool,
    pub transforms: Vec<Transform>,
}

/// Batched instances grouped by key, in first-seen order.
///
/// Groups are kept in a `Vec` rather than a map so that walking the table
/// is deterministic for a given expansion.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct BatchInstanceTable {
    pub groups: Vec<InstanceBatch>,
}

impl BatchInstanceTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an instance under `key`, creating the group on first use.
    ///
    /// The group's name and flags are captured from the first instance;
    /// later instances only contribute their transform.
    pub fn add_instance(
        &mut self,
        key: &BatchKey,
        name: &str,
        snap_to_floor: bool,
        transform: Transform,
    ) {
        if let Some(group) = self.groups.iter_mut().find(|group| group.key == *key) {
            group.transforms.push(transform);
            return;
        }
        self.groups.push(InstanceBatch {
            key: key.clone(),
            name: name.to_string(),
            snap_to_floor,
            align_to_surface: false,
            transforms: vec![transform],
        });
    }

    pub fn get(&self, key: &BatchKey) -> Option<&InstanceBatch> {
        self.groups.iter().find(|group| group.key == *key)
    }

    /// Number of groups.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total number of instances across all groups.
    pub fn instance_count(&self) -> usize {
        self.groups.iter().map(|group| group.transforms.len()).sum()
    }
}
