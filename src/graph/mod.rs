//! The canonical graph model: block and edge definitions, the conversion
//! trait for custom UI formats, and an indexed read-only view used by the
//! validator, engine, and generator alike.

pub mod conversion;
pub mod definition;

pub use conversion::*;
pub use definition::*;

use ahash::AHashMap;
use itertools::Itertools;

/// An indexed view over a [`GraphDefinition`]: O(1) block lookup and
/// per-source outgoing edge lists, preserving edge-list order.
///
/// Built once per run or generation pass; the definition stays untouched.
pub struct GraphIndex<'a> {
    graph: &'a GraphDefinition,
    blocks: AHashMap<&'a str, &'a BlockDefinition>,
    outgoing: AHashMap<&'a str, Vec<&'a EdgeDefinition>>,
}

impl<'a> GraphIndex<'a> {
    pub fn new(graph: &'a GraphDefinition) -> Self {
        let blocks = graph
            .blocks
            .iter()
            .map(|block| (block.id.as_str(), block))
            .collect();
        let outgoing = graph
            .edges
            .iter()
            .map(|edge| (edge.source.as_str(), edge))
            .into_group_map()
            .into_iter()
            .collect();
        Self {
            graph,
            blocks,
            outgoing,
        }
    }

    pub fn block(&self, id: &str) -> Option<&'a BlockDefinition> {
        self.blocks.get(id).copied()
    }

    /// The unique start block, if the graph has one.
    pub fn start(&self) -> Option<&'a BlockDefinition> {
        self.graph
            .blocks
            .iter()
            .find(|block| block.kind == BlockKind::Start)
    }

    /// Outgoing edges of `id` in edge-list order.
    pub fn outgoing(&self, id: &str) -> &[&'a EdgeDefinition] {
        self.outgoing.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The edge out of `id` carrying `tag`, if any.
    pub fn branch(&self, id: &str, tag: BranchTag) -> Option<&'a EdgeDefinition> {
        self.outgoing(id)
            .iter()
            .copied()
            .find(|edge| edge.branch == Some(tag))
    }

    /// Untagged outgoing edges of `id` (linear flow), in edge-list order.
    pub fn untagged(&self, id: &str) -> Vec<&'a EdgeDefinition> {
        self.outgoing(id)
            .iter()
            .copied()
            .filter(|edge| edge.branch.is_none())
            .collect()
    }
}
