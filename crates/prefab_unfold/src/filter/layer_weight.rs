//! Surface layer weight thresholding.
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::filter::Filter;

/// Identifies one surface patch owned by a [`LayerWeightSource`].
pub type PatchId = u64;

/// Sampled layer weights for one surface patch.
#[derive(Debug, Clone, Default)]
pub struct LayerPatchData {
    pub width: usize,
    pub height: usize,
    pub weights: Vec<f32>,
}

/// Caches per-patch layer data across queries of one filter.
///
/// Sources typically have to decode a weight map per patch; the cache lets
/// them do that once and answer subsequent queries from memory.
#[derive(Debug, Default)]
pub struct LayerWeightCache {
    patches: HashMap<PatchId, LayerPatchData>,
}

impl LayerWeightCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached data for `patch`, filling it from `fetch` on first
    /// access.
    pub fn get_or_fetch(
        &mut self,
        patch: PatchId,
        fetch: impl FnOnce() -> LayerPatchData,
    ) -> &LayerPatchData {
        if !self.patches.contains_key(&patch) {
            self.patches.insert(patch, fetch());
        }
        self.patches
            .get(&patch)
            .expect("patch data present after insert")
    }

    pub fn len(&self) -> usize {
        self.patches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patches.is_empty()
    }

    pub fn clear(&mut self) {
        self.patches.clear();
    }
}

/// Supplies surface patches and per-layer weights beneath query points.
pub trait LayerWeightSource: Send + Sync {
    /// The patch directly beneath `point`, or `None` when there is no
    /// surface there.
    fn patch_beneath(&self, point: mint::Vector3<f32>) -> Option<PatchId>;

    /// The weight of `layer` at `point` on `patch`, in `[0, 1]`. The cache
    /// is shared across all queries of the owning filter.
    fn layer_weight(
        &self,
        patch: PatchId,
        layer: &str,
        point: mint::Vector3<f32>,
        cache: &mut LayerWeightCache,
    ) -> f32;
}

/// Vetoes points unless the surface layer weight beneath them exceeds a
/// threshold.
///
/// Points with no surface beneath them are vetoed outright.
pub struct LayerWeightFilter {
    source: Arc<dyn LayerWeightSource>,
    layer: String,
    threshold: f32,
    cache: Mutex<LayerWeightCache>,
}

impl LayerWeightFilter {
    pub fn new(source: Arc<dyn LayerWeightSource>, layer: impl Into<String>, threshold: f32) -> Self {
        Self {
            source,
            layer: layer.into(),
            threshold,
            cache: Mutex::new(LayerWeightCache::new()),
        }
    }

    pub fn clear_cache(&self) {
        self.cache
            .lock()
            .expect("layer weight cache lock poisoned")
            .clear();
    }
}

impl Filter for LayerWeightFilter {
    fn sample(&self, point_world: mint::Vector3<f32>) -> bool {
        let Some(patch) = self.source.patch_beneath(point_world) else {
            return false;
        };
        let mut cache = self.cache.lock().expect("layer weight cache lock poisoned");
        let weight = self
            .source
            .layer_weight(patch, &self.layer, point_world, &mut cache);
        weight > self.threshold
    }
}
