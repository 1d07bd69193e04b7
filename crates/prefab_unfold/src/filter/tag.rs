//! Veto on tagged scenery.
use std::sync::Arc;

use crate::filter::Filter;

/// Probes the scene vertically around a point for tagged occupants.
pub trait TagProbe: Send + Sync {
    /// Whether a vertical probe within `tolerance` of `point` hits anything
    /// carrying `tag`.
    fn hit_with_tag(&self, point: mint::Vector3<f32>, tolerance: f32, tag: &str) -> bool;
}

/// Vetoes points whose vertical surroundings contain something tagged.
///
/// A miss passes; only a confirmed tagged hit vetoes.
pub struct TagProbeFilter {
    probe: Arc<dyn TagProbe>,
    tag: String,
    tolerance: f32,
}

impl TagProbeFilter {
    pub fn new(probe: Arc<dyn TagProbe>, tag: impl Into<String>, tolerance: f32) -> Self {
        Self {
            probe,
            tag: tag.into(),
            tolerance,
        }
    }
}

impl Filter for TagProbeFilter {
    fn sample(&self, point_world: mint::Vector3<f32>) -> bool {
        !self.probe.hit_with_tag(point_world, self.tolerance, &self.tag)
    }
}
