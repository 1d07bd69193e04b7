//! Spatial transforms and seeded jitter.
//!
//! A [`Transform`] is a translation, rotation, and per-axis scale applied in
//! scale-rotate-translate order. The world is Y-up; "horizontal" distances
//! are measured on the XZ plane. [`jitter_transform`] applies the seeded
//! scale and spin variation used during expansion.
use glam::{Quat, Vec3, Vec3Swizzles};
use serde::{Deserialize, Serialize};

use crate::seed::{next_seed, sample01};

/// A translation, rotation, and scale in world or local space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Transform {
    pub const IDENTITY: Self = Self {
        translation: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            ..Self::IDENTITY
        }
    }

    pub fn from_translation_rotation(translation: Vec3, rotation: Quat) -> Self {
        Self {
            translation,
            rotation,
            scale: Vec3::ONE,
        }
    }

    pub fn from_translation_rotation_scale(translation: Vec3, rotation: Quat, scale: Vec3) -> Self {
        Self {
            translation,
            rotation,
            scale,
        }
    }

    /// Transform a point from this transform's local space into its parent
    /// space, applying scale, then rotation, then translation.
    pub fn transform_point(&self, point: Vec3) -> Vec3 {
        self.translation + self.rotation * (self.scale * point)
    }

    /// Compose `child` under `self`, yielding the transform that maps the
    /// child's local space directly into this transform's parent space.
    pub fn mul_transform(&self, child: &Transform) -> Transform {
        Transform {
            translation: self.transform_point(child.translation),
            rotation: self.rotation * child.rotation,
            scale: self.scale * child.scale,
        }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Distance between two points projected onto the XZ plane.
#[inline]
pub fn horizontal_distance(a: Vec3, b: Vec3) -> f32 {
    a.xz().distance(b.xz())
}

/// Apply seeded scale and spin variation to a transform.
///
/// The scale factor is drawn uniformly from `[min_scale, max_scale]` and
/// multiplied into all three axes; when the bounds coincide the factor is
/// applied as a constant without consuming a draw. When `spin` is set the
/// transform is additionally rotated about the world up axis by a uniform
/// angle. The two draws come from distinct chain positions so toggling spin
/// never changes the scale outcome. Translation is left untouched.
pub fn jitter_transform(
    transform: &Transform,
    seed: i32,
    min_scale: f32,
    max_scale: f32,
    spin: bool,
) -> Transform {
    let mut result = *transform;

    if (max_scale - min_scale).abs() <= f32::EPSILON {
        result.scale *= min_scale;
    } else {
        let unit = sample01(next_seed(seed));
        result.scale *= min_scale + unit * (max_scale - min_scale);
    }

    if spin {
        let angle = sample01(next_seed(next_seed(seed))) * std::f32::consts::TAU;
        result.rotation = Quat::from_rotation_y(angle) * result.rotation;
    }

    result
}
