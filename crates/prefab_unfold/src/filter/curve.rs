//! Keep-out corridor around a curve.
use std::sync::Arc;

use glam::Vec3;

use crate::filter::Filter;
use crate::transform::horizontal_distance;

/// Supplies the closest point on a curve to a world-space query point.
pub trait CurveSource: Send + Sync {
    fn closest_point(&self, point: mint::Vector3<f32>) -> mint::Vector3<f32>;
}

/// A curve given as straight segments between consecutive points.
#[derive(Debug, Clone, Default)]
pub struct PolylineCurve {
    pub points: Vec<Vec3>,
}

impl PolylineCurve {
    pub fn new(points: Vec<Vec3>) -> Self {
        Self { points }
    }
}

impl CurveSource for PolylineCurve {
    fn closest_point(&self, point: mint::Vector3<f32>) -> mint::Vector3<f32> {
        let query = Vec3::from(point);
        match self.points.as_slice() {
            // An empty polyline is infinitely far away from everything.
            [] => Vec3::splat(f32::INFINITY).into(),
            [only] => (*only).into(),
            points => {
                let mut best = points[0];
                let mut best_distance = f32::INFINITY;
                for segment in points.windows(2) {
                    let candidate = closest_on_segment(segment[0], segment[1], query);
                    let distance = candidate.distance_squared(query);
                    if distance < best_distance {
                        best = candidate;
                        best_distance = distance;
                    }
                }
                best.into()
            }
        }
    }
}

fn closest_on_segment(a: Vec3, b: Vec3, point: Vec3) -> Vec3 {
    let ab = b - a;
    let length_squared = ab.length_squared();
    if length_squared <= f32::EPSILON {
        return a;
    }
    let t = ((point - a).dot(ab) / length_squared).clamp(0.0, 1.0);
    a + ab * t
}

/// Vetoes points within `radius` of the curve, measured horizontally.
pub struct CurveProximityFilter {
    curve: Arc<dyn CurveSource>,
    radius: f32,
}

impl CurveProximityFilter {
    pub fn new(curve: Arc<dyn CurveSource>, radius: f32) -> Self {
        Self { curve, radius }
    }
}

impl Filter for CurveProximityFilter {
    fn sample(&self, point_world: mint::Vector3<f32>) -> bool {
        let closest = Vec3::from(self.curve.closest_point(point_world));
        horizontal_distance(Vec3::from(point_world), closest) > self.radius
    }
}
