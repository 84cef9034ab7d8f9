use super::definition::GraphDefinition;
use crate::error::GraphConversionError;

/// A trait for custom data models that can be converted into a canonical
/// [`GraphDefinition`].
///
/// This is the primary extension point for making the engine format-agnostic.
/// The diagram canvas, palette, and storage layer keep whatever graph format
/// suits them; implementing this trait on their top-level struct provides the
/// translation layer the validator, engine, and generator consume.
///
/// # Example
///
/// ```rust,no_run
/// use karakuri::error::GraphConversionError;
/// use karakuri::graph::{BlockDefinition, BlockKind, GraphDefinition, IntoGraph};
///
/// // 1. Define your custom structs for parsing your format.
/// struct MyCanvasNode { id: String, palette_entry: String }
/// struct MyCanvasDocument { nodes: Vec<MyCanvasNode> }
///
/// // 2. Implement `IntoGraph` for your top-level struct.
/// impl IntoGraph for MyCanvasDocument {
///     fn into_graph(self) -> Result<GraphDefinition, GraphConversionError> {
///         let blocks = self
///             .nodes
///             .into_iter()
///             .map(|node| BlockDefinition::new(node.id, BlockKind::parse(&node.palette_entry)))
///             .collect();
///         Ok(GraphDefinition {
///             blocks,
///             edges: vec![], // Convert your connections here as well
///         })
///     }
/// }
/// ```
pub trait IntoGraph {
    /// Consumes the object and converts it into a canonical flowchart graph.
    fn into_graph(self) -> Result<GraphDefinition, GraphConversionError>;
}
