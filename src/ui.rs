//! Serde types for the canvas UI's wire format, plus their conversion into
//! the canonical graph model.
//!
//! The canvas emits blocks as `{ id, type, fields }` objects where every
//! field value is a JSON string or number, and edges whose `sourceHandle`
//! carries the branch tag of a branching block (`"yes"`, `"no"`, `"body"`,
//! `"exit"`). Handles that are not branch tags belong to the canvas alone
//! and are dropped during conversion.

use crate::error::GraphConversionError;
use crate::graph::{
    BlockDefinition, BlockKind, BranchTag, EdgeDefinition, FieldValue, GraphDefinition, IntoGraph,
};
use ahash::AHashMap;
use serde::{Deserialize, Serialize};

/// A complete flowchart document as the canvas serializes it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiGraph {
    pub blocks: Vec<UiBlock>,
    pub edges: Vec<UiEdge>,
}

/// A block as the canvas serializes it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiBlock {
    pub id: String,
    #[serde(rename = "type")]
    pub block_type: String,
    #[serde(default)]
    pub fields: serde_json::Map<String, serde_json::Value>,
}

/// An edge as the canvas serializes it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    #[serde(
        default,
        rename = "sourceHandle",
        skip_serializing_if = "Option::is_none"
    )]
    pub source_handle: Option<String>,
}

impl IntoGraph for UiGraph {
    fn into_graph(self) -> Result<GraphDefinition, GraphConversionError> {
        let mut blocks = Vec::with_capacity(self.blocks.len());
        for ui_block in self.blocks {
            let mut fields = AHashMap::with_capacity(ui_block.fields.len());
            for (name, value) in ui_block.fields {
                let field = match value {
                    serde_json::Value::String(text) => FieldValue::Text(text),
                    serde_json::Value::Number(number) => {
                        FieldValue::Number(number.as_f64().unwrap_or_default())
                    }
                    other => {
                        return Err(GraphConversionError::ValidationError(format!(
                            "block '{}' field '{}' has unsupported value {}",
                            ui_block.id, name, other
                        )));
                    }
                };
                fields.insert(name, field);
            }
            blocks.push(BlockDefinition {
                id: ui_block.id,
                kind: BlockKind::parse(&ui_block.block_type),
                fields,
            });
        }

        let edges = self
            .edges
            .into_iter()
            .map(|ui_edge| EdgeDefinition {
                id: ui_edge.id,
                source: ui_edge.source,
                target: ui_edge.target,
                branch: ui_edge.source_handle.as_deref().and_then(BranchTag::parse),
            })
            .collect();

        Ok(GraphDefinition { blocks, edges })
    }
}
