//! Placement filters and the sampler that combines them.
//!
//! A [`Filter`] is a veto predicate over a world-space point: `true` lets a
//! placement through, `false` vetoes it. The [`FilterSampler`] owns a set of
//! filters plus a local-to-world transform; a point passes only when every
//! filter accepts it.
//!
//! Filters that need scene knowledge (surface layers, probes, curves,
//! volumes) take it through collaborator traits so hosts can plug in their
//! own world queries.
pub mod curve;
pub mod cylinder;
pub mod layer_weight;
pub mod tag;
pub mod volume;

use std::sync::Arc;

use glam::Vec3;

pub use curve::{CurveProximityFilter, CurveSource, PolylineCurve};
pub use cylinder::CylinderExclusionFilter;
pub use layer_weight::{
    LayerPatchData, LayerWeightCache, LayerWeightFilter, LayerWeightSource, PatchId,
};
pub use tag::{TagProbe, TagProbeFilter};
pub use volume::{AxisAlignedBox, ContainmentVolume, VolumeExclusionFilter};

use crate::transform::Transform;

/// A veto predicate over a world-space point.
///
/// Returns `true` to accept the point, `false` to veto it.
pub trait Filter: Send + Sync {
    fn sample(&self, point_world: mint::Vector3<f32>) -> bool;
}

/// Combines filters under a shared local-to-world transform.
///
/// Expansion hands the sampler points in the expansion's local frame; the
/// sampler transforms each point into world space once and then asks every
/// filter. Evaluation short-circuits on the first veto.
#[derive(Default)]
pub struct FilterSampler {
    to_world: Transform,
    filters: Vec<Box<dyn Filter>>,
}

impl FilterSampler {
    pub fn new(to_world: Transform) -> Self {
        Self {
            to_world,
            filters: Vec::new(),
        }
    }

    pub fn push(&mut self, filter: Box<dyn Filter>) {
        self.filters.push(filter);
    }

    pub fn push_filter<F: Filter + 'static>(&mut self, filter: F) {
        self.filters.push(Box::new(filter));
    }

    pub fn add_cylinder_exclusion(&mut self, center: Vec3, radius: f32) {
        self.push_filter(CylinderExclusionFilter { center, radius });
    }

    pub fn add_layer_weight(
        &mut self,
        source: Arc<dyn LayerWeightSource>,
        layer: impl Into<String>,
        threshold: f32,
    ) {
        self.push_filter(LayerWeightFilter::new(source, layer, threshold));
    }

    pub fn add_curve_proximity(&mut self, curve: Arc<dyn CurveSource>, radius: f32) {
        self.push_filter(CurveProximityFilter::new(curve, radius));
    }

    pub fn add_tag_probe(&mut self, probe: Arc<dyn TagProbe>, tag: impl Into<String>, tolerance: f32) {
        self.push_filter(TagProbeFilter::new(probe, tag, tolerance));
    }

    pub fn add_volume_exclusion(&mut self, volume: Arc<dyn ContainmentVolume>) {
        self.push_filter(VolumeExclusionFilter::new(volume));
    }

    /// Drop all filters, keeping the local-to-world transform.
    pub fn reset(&mut self) {
        self.filters.clear();
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Test a point given in the sampler's local frame against all filters.
    pub fn sample(&self, point_local: Vec3) -> bool {
        let world = self.to_world.transform_point(point_local);
        self.filters.iter().all(|filter| filter.sample(world.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Reject;

    impl Filter for Reject {
        fn sample(&self, _point_world: mint::Vector3<f32>) -> bool {
            false
        }
    }

    struct RecordingFilter {
        seen: std::sync::Mutex<Vec<Vec3>>,
        accept: bool,
    }

    impl Filter for RecordingFilter {
        fn sample(&self, point_world: mint::Vector3<f32>) -> bool {
            self.seen
                .lock()
                .expect("recording filter lock poisoned")
                .push(Vec3::from(point_world));
            self.accept
        }
    }

    #[test]
    fn empty_sampler_accepts_everything() {
        let sampler = FilterSampler::default();
        assert!(sampler.sample(Vec3::ZERO));
        assert!(sampler.sample(Vec3::new(1000.0, -50.0, 3.0)));
    }

    #[test]
    fn any_veto_rejects_the_point() {
        let mut sampler = FilterSampler::default();
        sampler.add_cylinder_exclusion(Vec3::new(100.0, 0.0, 100.0), 1.0);
        sampler.push_filter(Reject);
        assert!(!sampler.sample(Vec3::ZERO));
    }

    #[test]
    fn evaluation_short_circuits_after_a_veto() {
        let recorder = Arc::new(RecordingFilter {
            seen: std::sync::Mutex::new(Vec::new()),
            accept: true,
        });

        struct Shared(Arc<RecordingFilter>);
        impl Filter for Shared {
            fn sample(&self, point_world: mint::Vector3<f32>) -> bool {
                self.0.sample(point_world)
            }
        }

        let mut sampler = FilterSampler::default();
        sampler.push_filter(Reject);
        sampler.push_filter(Shared(Arc::clone(&recorder)));

        assert!(!sampler.sample(Vec3::ZERO));
        assert!(recorder.seen.lock().expect("recording filter lock poisoned").is_empty());
    }

    #[test]
    fn points_are_transformed_into_world_space_once() {
        let recorder = Arc::new(RecordingFilter {
            seen: std::sync::Mutex::new(Vec::new()),
            accept: true,
        });

        struct Shared(Arc<RecordingFilter>);
        impl Filter for Shared {
            fn sample(&self, point_world: mint::Vector3<f32>) -> bool {
                self.0.sample(point_world)
            }
        }

        let mut sampler = FilterSampler::new(Transform::from_translation(Vec3::new(10.0, 0.0, 0.0)));
        sampler.push_filter(Shared(Arc::clone(&recorder)));

        assert!(sampler.sample(Vec3::new(1.0, 2.0, 3.0)));
        let seen = recorder.seen.lock().expect("recording filter lock poisoned");
        assert_eq!(seen.as_slice(), &[Vec3::new(11.0, 2.0, 3.0)]);
    }

    #[test]
    fn reset_keeps_the_transform() {
        let mut sampler = FilterSampler::new(Transform::from_translation(Vec3::new(0.0, 0.0, 5.0)));
        sampler.push_filter(Reject);
        assert!(!sampler.sample(Vec3::ZERO));

        sampler.reset();
        assert!(sampler.is_empty());
        assert!(sampler.sample(Vec3::ZERO));
    }
}
