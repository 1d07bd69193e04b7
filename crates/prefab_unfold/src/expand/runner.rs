//! High-level runner for expanding composition assets.
use std::sync::Arc;

use tracing::{info, warn};

use crate::asset::catalog::{AssetCatalog, Resolved};
use crate::asset::{CompositionAsset, CompositionElement, EvaluationMode};
use crate::error::{Error, Result};
use crate::expand::batch::BatchInstanceTable;
use crate::expand::events::{EventSink, ExpandEvent};
use crate::expand::recipe::{Recipe, RecipeNode, RecipeTarget};
use crate::expand::selection::{bernoulli, select_random_element};
use crate::expand::DEFAULT_MAX_DEPTH;
use crate::filter::FilterSampler;
use crate::seed::next_seed;
use crate::transform::{jitter_transform, Transform};

/// Configuration for one expansion.
#[non_exhaustive]
#[derive(Debug, Clone)]
pub struct ExpandConfig {
    /// Collapse hierarchical assets into flat composition and resolve
    /// captured configurations back to their live references.
    pub flatten: bool,
    /// Recursion depth at which branches are truncated.
    pub max_depth: usize,
}

impl Default for ExpandConfig {
    fn default() -> Self {
        Self {
            flatten: false,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl ExpandConfig {
    /// Creates a new [`ExpandConfig`] with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets flatten mode.
    pub fn with_flatten(mut self, flatten: bool) -> Self {
        self.flatten = flatten;
        self
    }

    /// Sets the recursion depth ceiling.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Validates the configuration, returning an error if invalid.
    pub fn validate(&self) -> Result<()> {
        if self.max_depth == 0 {
            return Err(Error::InvalidConfig("max_depth must be > 0".into()));
        }
        Ok(())
    }
}

/// Everything one expansion produced.
#[non_exhaustive]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Expansion {
    /// The placement forest.
    pub recipe: Recipe,
    /// Batched instance transforms, grouped by key.
    pub batches: BatchInstanceTable,
    /// Total elements whose inclusion was evaluated.
    pub elements_evaluated: usize,
    /// Elements skipped by the filter sampler.
    pub elements_vetoed: usize,
    /// Branches abandoned due to cycles or the depth ceiling.
    pub branches_aborted: usize,
}

impl Expansion {
    /// Creates a new empty [`Expansion`].
    pub fn new() -> Self {
        Self::default()
    }
}

/// Expands assets against a fixed catalog and filter sampler.
pub struct ExpansionRunner<'a> {
    /// Configuration applied to every run.
    pub config: ExpandConfig,
    /// Catalog used to resolve element references.
    pub catalog: &'a dyn AssetCatalog,
    /// Filter sampler consulted for every candidate placement.
    pub filter: &'a FilterSampler,
}

impl<'a> ExpansionRunner<'a> {
    pub fn try_new(
        config: ExpandConfig,
        catalog: &'a dyn AssetCatalog,
        filter: &'a FilterSampler,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            catalog,
            filter,
        })
    }

    pub fn new(
        config: ExpandConfig,
        catalog: &'a dyn AssetCatalog,
        filter: &'a FilterSampler,
    ) -> Self {
        debug_assert!(config.max_depth > 0, "max_depth must be > 0");
        Self {
            config,
            catalog,
            filter,
        }
    }

    /// Expands `root` with the given seed, returning the result.
    pub fn run(&self, root: &Arc<CompositionAsset>, seed: i32) -> Expansion {
        run_expansion(root, seed, &self.config, self.catalog, self.filter, None)
    }

    pub fn run_with_events(
        &self,
        root: &Arc<CompositionAsset>,
        seed: i32,
        sink: &mut dyn EventSink,
    ) -> Expansion {
        run_expansion(root, seed, &self.config, self.catalog, self.filter, Some(sink))
    }
}

/// Expand `root` with the given seed.
///
/// The same root, seed, catalog contents, and configuration always produce
/// the same [`Expansion`].
pub fn run_expansion(
    root: &Arc<CompositionAsset>,
    seed: i32,
    config: &ExpandConfig,
    catalog: &dyn AssetCatalog,
    filter: &FilterSampler,
    sink: Option<&mut dyn EventSink>,
) -> Expansion {
    if let Some(s) = sink {
        run_expansion_internal(root, seed, config, catalog, filter, s)
    } else {
        run_expansion_internal(root, seed, config, catalog, filter, &mut ())
    }
}

pub fn run_expansion_with_events(
    root: &Arc<CompositionAsset>,
    seed: i32,
    config: &ExpandConfig,
    catalog: &dyn AssetCatalog,
    filter: &FilterSampler,
    sink: &mut dyn EventSink,
) -> Expansion {
    run_expansion_internal(root, seed, config, catalog, filter, sink)
}

struct ExpandContext<'a> {
    config: &'a ExpandConfig,
    catalog: &'a dyn AssetCatalog,
    filter: &'a FilterSampler,
    sink: &'a mut dyn EventSink,
    /// Assets on the current expansion path, used for cycle detection.
    history: Vec<Arc<CompositionAsset>>,
    batches: BatchInstanceTable,
    elements_evaluated: usize,
    elements_vetoed: usize,
    branches_aborted: usize,
}

fn run_expansion_internal(
    root: &Arc<CompositionAsset>,
    seed: i32,
    config: &ExpandConfig,
    catalog: &dyn AssetCatalog,
    filter: &FilterSampler,
    sink: &mut dyn EventSink,
) -> Expansion {
    info!("Expanding '{}' with seed {}.", root.name, seed);

    let mut ctx = ExpandContext {
        config,
        catalog,
        filter,
        sink,
        history: Vec::new(),
        batches: BatchInstanceTable::new(),
        elements_evaluated: 0,
        elements_vetoed: 0,
        branches_aborted: 0,
    };

    let mut roots = Vec::new();
    expand_composition_asset(&mut ctx, root, &root.name, Transform::IDENTITY, seed, &mut roots);

    let expansion = Expansion {
        recipe: Recipe::new(roots),
        batches: ctx.batches,
        elements_evaluated: ctx.elements_evaluated,
        elements_vetoed: ctx.elements_vetoed,
        branches_aborted: ctx.branches_aborted,
    };
    info!(
        "Expansion of '{}' produced {} recipe nodes and {} batched instances.",
        root.name,
        expansion.recipe.node_count(),
        expansion.batches.instance_count()
    );
    expansion
}

/// Expand one composition asset into `out`, returning the index of the
/// anchor node it contributed, if any.
fn expand_composition_asset(
    ctx: &mut ExpandContext<'_>,
    asset: &Arc<CompositionAsset>,
    reference: &str,
    current: Transform,
    seed: i32,
    out: &mut Vec<RecipeNode>,
) -> Option<usize> {
    if ctx.history.iter().any(|visited| Arc::ptr_eq(visited, asset)) {
        warn!(
            "Reference '{}' re-enters asset '{}'; aborting branch.",
            reference, asset.name
        );
        ctx.branches_aborted += 1;
        ctx.sink.send(ExpandEvent::CycleDetected {
            asset: asset.name.clone(),
            reference: reference.to_string(),
        });
        return None;
    }
    if ctx.history.len() >= ctx.config.max_depth {
        warn!(
            "Asset '{}' reached expansion depth {}; truncating branch.",
            asset.name, ctx.config.max_depth
        );
        ctx.branches_aborted += 1;
        ctx.sink.send(ExpandEvent::BranchTruncated {
            asset: asset.name.clone(),
            depth: ctx.history.len(),
        });
        return None;
    }
    if asset.elements.is_empty() {
        warn!("Asset '{}' has no elements; nothing to expand.", asset.name);
        ctx.sink.send(ExpandEvent::Warning {
            context: format!("asset:{}", asset.name),
            message: "Asset has no elements".into(),
        });
        return None;
    }

    ctx.history.push(Arc::clone(asset));
    let mode = if ctx.config.flatten && asset.mode == EvaluationMode::HierarchicalComposition {
        EvaluationMode::Composition
    } else {
        asset.mode
    };
    let anchor = match mode {
        EvaluationMode::Superposition => expand_superposition(ctx, asset, current, seed, out),
        EvaluationMode::Composition => expand_composite(ctx, asset, current, seed, false, out),
        EvaluationMode::HierarchicalComposition => {
            expand_composite(ctx, asset, current, seed, true, out)
        }
    };
    ctx.history.pop();
    anchor
}

/// Superposition: draw one element (or nothing) and expand it.
fn expand_superposition(
    ctx: &mut ExpandContext<'_>,
    asset: &CompositionAsset,
    current: Transform,
    seed: i32,
    out: &mut Vec<RecipeNode>,
) -> Option<usize> {
    let element = select_random_element(asset, seed)?;
    ctx.elements_evaluated += 1;

    let composed = current.mul_transform(&element.local_transform);
    if !ctx.filter.sample(composed.translation) {
        ctx.elements_vetoed += 1;
        ctx.sink.send(ExpandEvent::ElementVetoed {
            asset: asset.name.clone(),
            element: element.name.clone(),
        });
        return None;
    }

    let effective = if element.deterministic {
        element.seed
    } else {
        next_seed(seed)
    };
    let jittered = jitter_transform(
        &composed,
        effective,
        element.min_scale_jitter,
        element.max_scale_jitter,
        element.spin_about_up,
    );
    expand_element(ctx, element, jittered, effective, out)
}

/// Composition: evaluate every element; the first survivor anchors the
/// asset, and in hierarchical mode later survivors nest under it.
fn expand_composite(
    ctx: &mut ExpandContext<'_>,
    asset: &CompositionAsset,
    current: Transform,
    seed: i32,
    hierarchical: bool,
    out: &mut Vec<RecipeNode>,
) -> Option<usize> {
    let mut running = seed;
    let mut anchor: Option<usize> = None;

    for element in &asset.elements {
        running = next_seed(running);
        ctx.elements_evaluated += 1;

        let composed = current.mul_transform(&element.local_transform);
        if !ctx.filter.sample(composed.translation) {
            ctx.elements_vetoed += 1;
            ctx.sink.send(ExpandEvent::ElementVetoed {
                asset: asset.name.clone(),
                element: element.name.clone(),
            });
            continue;
        }

        // Pinned elements re-key the chain here so their outcome survives
        // even when the inclusion draw below fails.
        if element.deterministic {
            running = element.seed;
        }
        if !bernoulli(element.weight, running) {
            continue;
        }

        let jittered = jitter_transform(
            &composed,
            running,
            element.min_scale_jitter,
            element.max_scale_jitter,
            element.spin_about_up,
        );
        match anchor {
            Some(index) if hierarchical => {
                expand_element(ctx, element, jittered, running, &mut out[index].children);
            }
            _ => {
                let manifested = expand_element(ctx, element, jittered, running, out);
                if anchor.is_none() {
                    anchor = manifested;
                }
            }
        }
    }

    anchor
}

/// Resolve one surviving element and append what it manifests as.
fn expand_element(
    ctx: &mut ExpandContext<'_>,
    element: &CompositionElement,
    transform: Transform,
    seed: i32,
    out: &mut Vec<RecipeNode>,
) -> Option<usize> {
    match ctx.catalog.resolve(&element.asset) {
        Resolved::Composition(asset) => {
            expand_composition_asset(ctx, &asset, &element.asset, transform, seed, out)
        }
        Resolved::Batch(key) => {
            ctx.batches
                .add_instance(&key, &element.name, element.snap_to_floor, transform);
            ctx.sink.send(ExpandEvent::BatchInstanceAdded {
                key,
                name: element.name.clone(),
            });
            // Batched instances live in the table, so they never anchor a
            // hierarchy.
            None
        }
        Resolved::Instance(handle) => {
            let target = if element.use_captured_config && !ctx.config.flatten {
                RecipeTarget::Captured(element.captured_config.clone())
            } else {
                RecipeTarget::Asset(handle)
            };
            Some(push_leaf_node(ctx, element, target, transform, out))
        }
        Resolved::Unresolved => {
            if element.use_captured_config && !ctx.config.flatten {
                let target = RecipeTarget::Captured(element.captured_config.clone());
                return Some(push_leaf_node(ctx, element, target, transform, out));
            }
            warn!(
                "Skipping element '{}': reference '{}' did not resolve.",
                element.name, element.asset
            );
            ctx.sink.send(ExpandEvent::Warning {
                context: format!("element:{}", element.name),
                message: format!("Reference '{}' did not resolve", element.asset),
            });
            None
        }
    }
}

fn push_leaf_node(
    ctx: &mut ExpandContext<'_>,
    element: &CompositionElement,
    target: RecipeTarget,
    transform: Transform,
    out: &mut Vec<RecipeNode>,
) -> usize {
    ctx.sink.send(ExpandEvent::NodeEmitted {
        name: element.name.clone(),
        transform,
        depth: ctx.history.len(),
    });
    out.push(RecipeNode::new(
        element.name.clone(),
        target,
        transform,
        element.snap_to_floor,
    ));
    out.len() - 1
}
