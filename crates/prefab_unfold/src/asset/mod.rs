//! Composition assets: the authored input to expansion.
//!
//! A [`CompositionAsset`] is a named collection of weighted, transform-offset
//! [`CompositionElement`]s plus an [`EvaluationMode`] that decides whether
//! the elements manifest together, exclusively, or as a nested hierarchy.
//! Assets are plain data; resolving their references is the catalog's job.
pub mod catalog;
pub mod element;

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

pub use catalog::{AssetCatalog, AssetRef, BatchKey, InMemoryCatalog, InstanceHandle, Resolved};
pub use element::CompositionElement;

/// How an asset's elements are turned into recipe nodes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EvaluationMode {
    /// Every element is evaluated independently; survivors manifest side
    /// by side.
    #[default]
    Composition,
    /// A single element (or nothing) is chosen by weighted draw.
    Superposition,
    /// Like `Composition`, but elements after the first survivor nest under
    /// it as children.
    HierarchicalComposition,
}

/// A named, weighted collection of composition elements.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct CompositionAsset {
    pub name: String,
    pub mode: EvaluationMode,
    /// Weight of the empty outcome in `Superposition` mode. Ignored in the
    /// other modes.
    pub nothing_weight: f32,
    pub elements: Vec<CompositionElement>,
    /// Free-form author notes, not interpreted by expansion.
    pub notes: String,
    /// Where the asset was imported from, if it came from a file.
    pub source_path: Option<PathBuf>,
}

impl CompositionAsset {
    pub fn new(name: impl Into<String>, mode: EvaluationMode) -> Self {
        Self {
            name: name.into(),
            mode,
            nothing_weight: 0.0,
            elements: Vec::new(),
            notes: String::new(),
            source_path: None,
        }
    }

    pub fn with_nothing_weight(mut self, nothing_weight: f32) -> Self {
        debug_assert!(nothing_weight >= 0.0);
        self.nothing_weight = nothing_weight;
        self
    }

    pub fn with_element(mut self, element: CompositionElement) -> Self {
        self.elements.push(element);
        self
    }

    pub fn add_element(&mut self, element: CompositionElement) {
        self.elements.push(element);
    }

    pub fn clear_elements(&mut self) {
        self.elements.clear();
    }

    /// Retarget every element that references `from` to reference `to`,
    /// returning how many elements changed.
    pub fn replace_references(&mut self, from: &AssetRef, to: &AssetRef) -> usize {
        let mut replaced = 0;
        for element in &mut self.elements {
            if element.asset == *from {
                element.asset = to.clone();
                replaced += 1;
            }
        }
        replaced
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_asset_is_empty() {
        let asset = CompositionAsset::new("camp", EvaluationMode::Composition);
        assert_eq!(asset.name, "camp");
        assert!(asset.elements.is_empty());
        assert_eq!(asset.nothing_weight, 0.0);
        assert!(asset.source_path.is_none());
    }

    #[test]
    fn default_mode_is_composition() {
        assert_eq!(EvaluationMode::default(), EvaluationMode::Composition);
    }

    #[test]
    fn builders_accumulate_elements() {
        let asset = CompositionAsset::new("rocks", EvaluationMode::Superposition)
            .with_nothing_weight(2.0)
            .with_element(CompositionElement::new("small", "rock_small"))
            .with_element(CompositionElement::new("large", "rock_large"));
        assert_eq!(asset.elements.len(), 2);
        assert_eq!(asset.nothing_weight, 2.0);
    }

    #[test]
    fn clear_elements_empties_the_asset() {
        let mut asset = CompositionAsset::new("camp", EvaluationMode::Composition)
            .with_element(CompositionElement::new("tent", "tent_a"));
        asset.clear_elements();
        assert!(asset.elements.is_empty());
    }

    #[test]
    fn replace_references_retargets_matching_elements() {
        let mut asset = CompositionAsset::new("camp", EvaluationMode::Composition)
            .with_element(CompositionElement::new("tent_1", "tent_old"))
            .with_element(CompositionElement::new("fire", "campfire"))
            .with_element(CompositionElement::new("tent_2", "tent_old"));

        let replaced = asset.replace_references(&"tent_old".to_string(), &"tent_new".to_string());

        assert_eq!(replaced, 2);
        assert_eq!(asset.elements[0].asset, "tent_new");
        assert_eq!(asset.elements[1].asset, "campfire");
        assert_eq!(asset.elements[2].asset, "tent_new");
    }

    #[test]
    fn replace_references_with_no_match_is_noop() {
        let mut asset = CompositionAsset::new("camp", EvaluationMode::Composition)
            .with_element(CompositionElement::new("fire", "campfire"));
        let replaced = asset.replace_references(&"missing".to_string(), &"other".to_string());
        assert_eq!(replaced, 0);
        assert_eq!(asset.elements[0].asset, "campfire");
    }
}
