//! Keep-out cylinder of infinite height.
use glam::Vec3;

use crate::filter::Filter;
use crate::transform::horizontal_distance;

/// Vetoes points whose horizontal distance to `center` is within `radius`.
///
/// Height is ignored, making the exclusion an infinite vertical cylinder.
/// Points exactly on the boundary are vetoed.
#[derive(Debug, Clone, Copy)]
pub struct CylinderExclusionFilter {
    pub center: Vec3,
    pub radius: f32,
}

impl Filter for CylinderExclusionFilter {
    fn sample(&self, point_world: mint::Vector3<f32>) -> bool {
        horizontal_distance(Vec3::from(point_world), self.center) > self.radius
    }
}
