//! The recipe tree produced by expansion.
use serde::{Deserialize, Serialize};

use crate::asset::catalog::InstanceHandle;
use crate::transform::Transform;

/// What a recipe node manifests as.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RecipeTarget {
    /// A resolved placeable asset.
    Asset(InstanceHandle),
    /// A captured configuration payload carried by the element itself.
    Captured(String),
}

/// One placement in the recipe tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct RecipeNode {
    pub name: String,
    pub target: RecipeTarget,
    /// Final world transform of the placement.
    pub transform: Transform,
    pub snap_to_floor: bool,
    pub children: Vec<RecipeNode>,
}

impl RecipeNode {
    pub fn new(
        name: impl Into<String>,
        target: RecipeTarget,
        transform: Transform,
        snap_to_floor: bool,
    ) -> Self {
        Self {
            name: name.into(),
            target,
            transform,
            snap_to_floor,
            children: Vec::new(),
        }
    }
}

/// Identifier assigned to nodes during a depth-first walk.
pub type NodeId = usize;

/// The forest of placements one expansion produced.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct Recipe {
    pub roots: Vec<RecipeNode>,
}

impl Recipe {
    pub fn new(roots: Vec<RecipeNode>) -> Self {
        Self { roots }
    }

    /// Number of root nodes.
    pub fn len(&self) -> usize {
        self.roots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Total number of nodes in the forest, children included.
    pub fn node_count(&self) -> usize {
        fn count(node: &RecipeNode) -> usize {
            1 + node.children.iter().map(count).sum::<usize>()
        }
        self.roots.iter().map(count).sum()
    }

    /// Walk the forest depth-first in pre-order, yielding each node with its
    /// id and its parent's id.
    pub fn iter_depth_first(&self) -> DepthFirstIter<'_> {
        let stack: Vec<(Option<NodeId>, &RecipeNode)> =
            self.roots.iter().rev().map(|node| (None, node)).collect();
        DepthFirstIter { stack, next_id: 0 }
    }
}

/// Pre-order iterator over a [`Recipe`], assigning ids as it goes.
pub struct DepthFirstIter<'a> {
    stack: Vec<(Option<NodeId>, &'a RecipeNode)>,
    next_id: NodeId,
}

impl<'a> Iterator for DepthFirstIter<'a> {
    type Item = (NodeId, Option<NodeId>, &'a RecipeNode);

    fn next(&mut self) -> Option<Self::Item> {
        let (parent, node) = self.stack.pop()?;
        let id = self.next_id;
        self.next_id += 1;
        for child in node.children.iter().rev() {
            self.stack.push((Some(id), child));
        }
        Some((id, parent, node))
    }
}
