#![forbid(unsafe_code)]
//! prefab_unfold: Seeded expansion of composition assets into placement recipes.
//!
//! Modules:
//! - asset: composition assets, elements, and reference catalogs
//! - expand: the expansion runner, recipes, batches, selection, events
//! - filter: veto predicates and the filter sampler
//! - import: JSON composition documents
//! - seed: deterministic seed chains and unit draws
//! - transform: spatial transforms and seeded jitter
//!
//! For examples and docs, see README and docs.rs.
pub mod asset;
pub mod error;
pub mod expand;
pub mod filter;
pub mod import;
pub mod seed;
pub mod transform;

/// Convenient re-exports for common types. Import with `use prefab_unfold::prelude::*;`.
pub mod prelude {
    pub use crate::asset::catalog::{
        AssetCatalog, AssetRef, BatchKey, InMemoryCatalog, InstanceHandle, Resolved,
    };
    pub use crate::asset::element::CompositionElement;
    pub use crate::asset::{CompositionAsset, EvaluationMode};
    pub use crate::error::{Error, Result};
    pub use crate::expand::batch::{BatchInstanceTable, InstanceBatch};
    pub use crate::expand::events::{EventSink, ExpandEvent, FnSink, VecSink};
    pub use crate::expand::recipe::{NodeId, Recipe, RecipeNode, RecipeTarget};
    pub use crate::expand::runner::{
        run_expansion, run_expansion_with_events, ExpandConfig, Expansion, ExpansionRunner,
    };
    pub use crate::expand::selection::{bernoulli, select_random_element};
    pub use crate::expand::DEFAULT_MAX_DEPTH;
    pub use crate::filter::{
        AxisAlignedBox, ContainmentVolume, CurveProximityFilter, CurveSource,
        CylinderExclusionFilter, Filter, FilterSampler, LayerPatchData, LayerWeightCache,
        LayerWeightFilter, LayerWeightSource, PatchId, PolylineCurve, TagProbe, TagProbeFilter,
        VolumeExclusionFilter,
    };
    pub use crate::import::{import_composition_file, import_composition_str};
    pub use crate::seed::{next_seed, sample01, SeedSequence};
    pub use crate::transform::{horizontal_distance, jitter_transform, Transform};
}
