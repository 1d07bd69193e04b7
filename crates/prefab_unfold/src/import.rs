//! Import of externally generated composition documents.
//!
//! Documents are JSON with an optional `EvaluationMode` and an `Elements`
//! array; each element carries `Name`, `AssetReference`, `Translate`,
//! `Scale`, and `Orient` (a quaternion as `[x, y, z, w]`). Import is
//! lenient per element and strict per document: a malformed element is
//! logged and skipped, a malformed document is an error.
use std::fs;
use std::path::Path;

use glam::{Quat, Vec3};
use serde::Deserialize;
use tracing::warn;

use crate::asset::{CompositionAsset, CompositionElement, EvaluationMode};
use crate::error::{Error, Result};
use crate::transform::Transform;

#[derive(Debug, Deserialize)]
struct CompositionDoc {
    #[serde(rename = "EvaluationMode", default)]
    evaluation_mode: Option<serde_json::Value>,
    #[serde(rename = "Elements", default)]
    elements: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct ElementDoc {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "AssetReference")]
    asset_reference: String,
    #[serde(rename = "Translate")]
    translate: [f32; 3],
    #[serde(rename = "Scale")]
    scale: f32,
    #[serde(rename = "Orient")]
    orient: [f32; 4],
}

impl ElementDoc {
    fn into_element(self) -> CompositionElement {
        let rotation = Quat::from_xyzw(self.orient[0], self.orient[1], self.orient[2], self.orient[3]);
        let transform = Transform::from_translation_rotation_scale(
            Vec3::from(self.translate),
            rotation,
            Vec3::splat(self.scale),
        );
        CompositionElement::new(self.name, self.asset_reference).with_transform(transform)
    }
}

fn parse_mode(value: &str) -> Option<EvaluationMode> {
    match value {
        "Composition" => Some(EvaluationMode::Composition),
        "Superposition" => Some(EvaluationMode::Superposition),
        "HierarchicalComposition" => Some(EvaluationMode::HierarchicalComposition),
        _ => None,
    }
}

/// Parse a composition document from a JSON string.
pub fn import_composition_str(name: impl Into<String>, json: &str) -> Result<CompositionAsset> {
    let doc: CompositionDoc =
        serde_json::from_str(json).map_err(|e| Error::Import(format!("malformed document: {e}")))?;

    let name = name.into();
    let mode = match &doc.evaluation_mode {
        None => EvaluationMode::default(),
        Some(value) => match value.as_str().and_then(parse_mode) {
            Some(mode) => mode,
            None => {
                warn!(
                    "Unrecognized evaluation mode {} in '{}'; defaulting to Composition.",
                    value, name
                );
                EvaluationMode::default()
            }
        },
    };

    let mut asset = CompositionAsset::new(name, mode);
    for (index, value) in doc.elements.into_iter().enumerate() {
        match serde_json::from_value::<ElementDoc>(value) {
            Ok(element) => asset.add_element(element.into_element()),
            Err(e) => {
                warn!("Skipping element {} of '{}': {}.", index, asset.name, e);
            }
        }
    }
    Ok(asset)
}

/// Read and parse a composition document, naming the asset after the file
/// stem and recording the source path.
pub fn import_composition_file(path: impl AsRef<Path>) -> Result<CompositionAsset> {
    let path = path.as_ref();
    let json = fs::read_to_string(path)?;
    let name = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "imported".to_string());
    let mut asset = import_composition_str(name, &json)?;
    asset.source_path = Some(path.to_path_buf());
    Ok(asset)
}
