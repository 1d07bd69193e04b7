//! A single weighted entry inside a composition asset.
use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::asset::catalog::AssetRef;
use crate::transform::Transform;

/// One weighted, transform-offset reference inside a [`CompositionAsset`].
///
/// The element carries everything expansion needs to decide whether it
/// manifests and how its transform varies: an inclusion weight, an optional
/// fixed seed, scale jitter bounds, and a spin flag.
///
/// [`CompositionAsset`]: crate::asset::CompositionAsset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct CompositionElement {
    pub name: String,
    pub asset: AssetRef,
    /// Placement relative to the parent asset's frame.
    pub local_transform: Transform,
    /// Inclusion probability in composition modes, selection weight in
    /// superposition mode.
    pub weight: f32,
    pub snap_to_floor: bool,
    /// When set, the element manifests from `captured_config` instead of
    /// resolving `asset`.
    pub use_captured_config: bool,
    pub captured_config: String,
    /// When set, expansion re-keys onto `seed` so this element's outcome is
    /// independent of the incoming seed.
    pub deterministic: bool,
    pub seed: i32,
    pub spin_about_up: bool,
    pub min_scale_jitter: f32,
    pub max_scale_jitter: f32,
}

impl CompositionElement {
    pub fn new(name: impl Into<String>, asset: impl Into<AssetRef>) -> Self {
        Self {
            name: name.into(),
            asset: asset.into(),
            local_transform: Transform::IDENTITY,
            weight: 1.0,
            snap_to_floor: true,
            use_captured_config: false,
            captured_config: String::new(),
            deterministic: false,
            seed: 0,
            spin_about_up: false,
            min_scale_jitter: 1.0,
            max_scale_jitter: 1.0,
        }
    }

    pub fn with_transform(mut self, local_transform: Transform) -> Self {
        self.local_transform = local_transform;
        self
    }

    pub fn with_translation(mut self, translation: Vec3) -> Self {
        self.local_transform = Transform::from_translation(translation);
        self
    }

    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.local_transform.rotation = rotation;
        self
    }

    pub fn with_weight(mut self, weight: f32) -> Self {
        debug_assert!(weight >= 0.0);
        self.weight = weight;
        self
    }

    pub fn with_snap_to_floor(mut self, snap_to_floor: bool) -> Self {
        self.snap_to_floor = snap_to_floor;
        self
    }

    /// Carry a captured configuration payload and prefer it over the asset
    /// reference when manifesting.
    pub fn with_captured_config(mut self, payload: impl Into<String>) -> Self {
        self.use_captured_config = true;
        self.captured_config = payload.into();
        self
    }

    /// Pin the element to a fixed seed, detaching its outcome from the
    /// incoming seed chain.
    pub fn with_fixed_seed(mut self, seed: i32) -> Self {
        self.deterministic = true;
        self.seed = seed;
        self
    }

    pub fn with_spin_about_up(mut self, spin: bool) -> Self {
        self.spin_about_up = spin;
        self
    }

    pub fn with_scale_jitter(mut self, min_scale: f32, max_scale: f32) -> Self {
        self.min_scale_jitter = min_scale;
        self.max_scale_jitter = max_scale;
        self
    }
}

impl Default for CompositionElement {
    fn default() -> Self {
        Self::new("", "")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_element_defaults() {
        let element = CompositionElement::new("tent", "tent_a");
        assert_eq!(element.weight, 1.0);
        assert!(element.snap_to_floor);
        assert!(!element.deterministic);
        assert!(!element.use_captured_config);
        assert_eq!(element.min_scale_jitter, 1.0);
        assert_eq!(element.max_scale_jitter, 1.0);
        assert_eq!(element.local_transform, Transform::IDENTITY);
    }

    #[test]
    fn with_captured_config_sets_flag_and_payload() {
        let element = CompositionElement::new("rock", "rock_a")
            .with_captured_config("{\"mesh\":\"rock_a\"}");
        assert!(element.use_captured_config);
        assert_eq!(element.captured_config, "{\"mesh\":\"rock_a\"}");
    }

    #[test]
    fn with_fixed_seed_marks_deterministic() {
        let element = CompositionElement::new("tree", "tree_a").with_fixed_seed(-77);
        assert!(element.deterministic);
        assert_eq!(element.seed, -77);
    }

    #[test]
    fn builders_compose() {
        let element = CompositionElement::new("bush", "bush_a")
            .with_translation(Vec3::new(1.0, 0.0, -2.0))
            .with_weight(0.25)
            .with_snap_to_floor(false)
            .with_spin_about_up(true)
            .with_scale_jitter(0.8, 1.2);
        assert_eq!(element.local_transform.translation, Vec3::new(1.0, 0.0, -2.0));
        assert_eq!(element.weight, 0.25);
        assert!(!element.snap_to_floor);
        assert!(element.spin_about_up);
        assert_eq!(element.min_scale_jitter, 0.8);
        assert_eq!(element.max_scale_jitter, 1.2);
    }
}
