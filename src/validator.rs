//! Static pre-flight checks over a graph definition.
//!
//! Validation runs before any side effect of execution or generation. All
//! violations are collected and returned together rather than short-circuited,
//! so the user can fix a whole batch at once.

use crate::error::ValidationError;
use crate::graph::{BlockDefinition, BlockKind, GraphDefinition, GraphIndex};
use std::collections::HashSet;

/// Returns every structural and field problem found in `graph`, in check
/// order. An empty result means the graph is safe to run or generate.
pub fn validate(graph: &GraphDefinition) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let index = GraphIndex::new(graph);

    let start_count = graph
        .blocks
        .iter()
        .filter(|block| block.kind == BlockKind::Start)
        .count();
    match start_count {
        0 => errors.push(ValidationError::MissingStart),
        1 => {}
        n => errors.push(ValidationError::MultipleStarts(n)),
    }

    let has_end = graph
        .blocks
        .iter()
        .any(|block| block.kind == BlockKind::End);
    if !has_end {
        errors.push(ValidationError::MissingEnd);
    }

    for edge in &graph.edges {
        if index.block(&edge.source).is_none() {
            errors.push(ValidationError::DanglingEdge {
                edge_id: edge.id.clone(),
                role: "source",
                block_id: edge.source.clone(),
            });
        }
        if index.block(&edge.target).is_none() {
            errors.push(ValidationError::DanglingEdge {
                edge_id: edge.id.clone(),
                role: "target",
                block_id: edge.target.clone(),
            });
        }
    }

    if has_end
        && let Some(start) = index.start()
        && !end_reachable(&index, start)
    {
        errors.push(ValidationError::EndUnreachable);
    }

    for block in &graph.blocks {
        for &field in required_fields(block.kind) {
            if !block.has_field(field) {
                errors.push(ValidationError::MissingField {
                    block_id: block.id.clone(),
                    kind: block.kind,
                    field,
                });
            }
        }
    }

    errors
}

/// Convenience wrapper: the report as display strings, surfaced verbatim.
pub fn validate_messages(graph: &GraphDefinition) -> Vec<String> {
    validate(graph).iter().map(ToString::to_string).collect()
}

fn required_fields(kind: BlockKind) -> &'static [&'static str] {
    match kind {
        BlockKind::CreateVar => &["varName", "varValue"],
        BlockKind::UpdateVar => &["varName", "varValue", "operator"],
        BlockKind::If | BlockKind::While => &["leftOperand", "operator", "rightOperand"],
        BlockKind::Input => &["varName"],
        BlockKind::Output => &["text"],
        BlockKind::Move => &["direction", "distance"],
        BlockKind::Rotate => &["direction", "degrees"],
        BlockKind::Start
        | BlockKind::End
        | BlockKind::Join
        | BlockKind::Unknown => &[],
    }
}

/// Forward reachability search from the start block.
fn end_reachable(index: &GraphIndex<'_>, start: &BlockDefinition) -> bool {
    let mut visited = HashSet::new();
    let mut frontier = vec![start.id.as_str()];
    while let Some(id) = frontier.pop() {
        if !visited.insert(id) {
            continue;
        }
        let Some(block) = index.block(id) else {
            continue;
        };
        if block.kind == BlockKind::End {
            return true;
        }
        for edge in index.outgoing(id) {
            frontier.push(edge.target.as_str());
        }
    }
    false
}
