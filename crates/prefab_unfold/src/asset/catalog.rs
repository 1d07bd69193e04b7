//! Resolution of asset references.
//!
//! Elements name their targets with plain string [`AssetRef`]s; an
//! [`AssetCatalog`] maps those names to what they stand for at expansion
//! time. [`InMemoryCatalog`] is the ready-made map-backed implementation.
use std::collections::HashMap;
use std::sync::Arc;

use crate::asset::CompositionAsset;

/// Identifier an element uses to name its target.
pub type AssetRef = String;
/// Identifier of a batched-instance group in the instance table.
pub type BatchKey = String;
/// Identifier of a concrete placeable asset.
pub type InstanceHandle = String;

/// What an [`AssetRef`] stands for.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub enum Resolved {
    /// A nested composition asset; expansion recurses into it.
    Composition(Arc<CompositionAsset>),
    /// A batched placeable; instances accumulate in the batch table instead
    /// of the recipe tree.
    Batch(BatchKey),
    /// A directly placeable asset; expansion emits a leaf recipe node.
    Instance(InstanceHandle),
    /// Nothing known under this reference.
    Unresolved,
}

/// Maps asset references to their resolved form.
///
/// Implementations must be idempotent within one expansion: resolving the
/// same reference twice returns the same outcome, and for compositions the
/// same `Arc` identity. Expansion keys its cycle detection on that identity.
pub trait AssetCatalog: Send + Sync {
    fn resolve(&self, reference: &AssetRef) -> Resolved;
}

/// A map-backed catalog for tests, tools, and self-contained setups.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    compositions: HashMap<AssetRef, Arc<CompositionAsset>>,
    batches: HashMap<AssetRef, BatchKey>,
    instances: HashMap<AssetRef, InstanceHandle>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a composition asset and return the shared handle under which
    /// it will resolve.
    pub fn register_composition(
        &mut self,
        reference: impl Into<AssetRef>,
        asset: CompositionAsset,
    ) -> Arc<CompositionAsset> {
        let asset = Arc::new(asset);
        self.compositions.insert(reference.into(), Arc::clone(&asset));
        asset
    }

    pub fn register_composition_arc(
        &mut self,
        reference: impl Into<AssetRef>,
        asset: Arc<CompositionAsset>,
    ) {
        self.compositions.insert(reference.into(), asset);
    }

    pub fn register_batch(&mut self, reference: impl Into<AssetRef>, key: impl Into<BatchKey>) {
        self.batches.insert(reference.into(), key.into());
    }

    pub fn register_instance(
        &mut self,
        reference: impl Into<AssetRef>,
        handle: impl Into<InstanceHandle>,
    ) {
        self.instances.insert(reference.into(), handle.into());
    }

    pub fn contains(&self, reference: &AssetRef) -> bool {
        self.compositions.contains_key(reference)
            || self.batches.contains_key(reference)
            || self.instances.contains_key(reference)
    }

    pub fn len(&self) -> usize {
        self.compositions.len() + self.batches.len() + self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&mut self) {
        self.compositions.clear();
        self.batches.clear();
        self.instances.clear();
    }
}

impl AssetCatalog for InMemoryCatalog {
    fn resolve(&self, reference: &AssetRef) -> Resolved {
        if reference.is_empty() {
            return Resolved::Unresolved;
        }
        if let Some(asset) = self.compositions.get(reference) {
            return Resolved::Composition(Arc::clone(asset));
        }
        if let Some(key) = self.batches.get(reference) {
            return Resolved::Batch(key.clone());
        }
        if let Some(handle) = self.instances.get(reference) {
            return Resolved::Instance(handle.clone());
        }
        Resolved::Unresolved
    }
}
