//! Keep-out volumes.
use std::sync::Arc;

use glam::Vec3;

use crate::filter::Filter;

/// A region of world space that can answer point containment.
pub trait ContainmentVolume: Send + Sync {
    fn contains(&self, point: mint::Vector3<f32>) -> bool;
}

/// An axis-aligned box, inclusive of its faces.
#[derive(Debug, Clone, Copy)]
pub struct AxisAlignedBox {
    pub min: Vec3,
    pub max: Vec3,
}

impl AxisAlignedBox {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    pub fn from_center_half_extents(center: Vec3, half_extents: Vec3) -> Self {
        Self {
            min: center - half_extents,
            max: center + half_extents,
        }
    }
}

impl ContainmentVolume for AxisAlignedBox {
    fn contains(&self, point: mint::Vector3<f32>) -> bool {
        let p = Vec3::from(point);
        p.cmpge(self.min).all() && p.cmple(self.max).all()
    }
}

/// Vetoes points inside the volume.
pub struct VolumeExclusionFilter {
    volume: Arc<dyn ContainmentVolume>,
}

impl VolumeExclusionFilter {
    pub fn new(volume: Arc<dyn ContainmentVolume>) -> Self {
        Self { volume }
    }
}

impl Filter for VolumeExclusionFilter {
    fn sample(&self, point_world: mint::Vector3<f32>) -> bool {
        !self.volume.contains(point_world)
    }
}
