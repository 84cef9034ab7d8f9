//! Static translation of a flowchart into program text.
//!
//! The generator performs its own depth-first walk from the start block,
//! using the same branch-tag conventions as the engine but none of its
//! state: variables exist only as a symbolic name table. Branch and loop
//! semantics of the emitted text match what the engine executes.
//!
//! The cycle guard here is independent of the engine's visit ledger: a
//! visited-within-current-path set is cloned into each branch recursion, so
//! both sides of an `if` may legitimately re-emit a shared `join` target
//! while a straight-line path refuses to re-emit.

use crate::expr::quote_unless_known;
use crate::graph::{BlockDefinition, BlockKind, BranchTag, GraphDefinition, GraphIndex};
use std::collections::HashSet;

const INDENT: &str = "  ";

/// Translates the graph into an equivalent program, independent of the
/// engine. Pure and synchronous; malformed per-block data degrades to an
/// inline comment rather than aborting generation.
pub fn generate(graph: &GraphDefinition) -> String {
    let index = GraphIndex::new(graph);
    let Some(start) = index.start() else {
        return "// Error: flowchart has no start block\n".to_string();
    };

    let mut generator = Generator {
        index: &index,
        lines: Vec::new(),
        names: HashSet::new(),
    };
    generator.lines.push("function runFlowchart() {".to_string());
    let mut visited = HashSet::new();
    visited.insert(start.id.as_str());
    generator.emit_successors(start, 1, &visited);
    generator.lines.push("}".to_string());

    let mut text = generator.lines.join("\n");
    text.push('\n');
    text
}

struct Generator<'g, 'i> {
    index: &'i GraphIndex<'g>,
    lines: Vec<String>,
    /// Symbolic name table: variables introduced so far, no values.
    names: HashSet<String>,
}

impl<'g> Generator<'g, '_> {
    fn emit_block(
        &mut self,
        block: &'g BlockDefinition,
        depth: usize,
        visited: &HashSet<&'g str>,
    ) {
        if visited.contains(block.id.as_str()) {
            // Already emitted on this path: a cycle, not a convergence.
            return;
        }
        let mut visited = visited.clone();
        visited.insert(&block.id);

        match block.kind {
            BlockKind::Start | BlockKind::Join => {
                self.emit_successors(block, depth, &visited);
            }
            BlockKind::End => {
                self.push_line(depth, "return;".to_string());
            }
            BlockKind::CreateVar => {
                match self.assignment_parts(block) {
                    Some((name, value)) => {
                        self.push_line(depth, format!("let {} = {};", name, value));
                        self.names.insert(name);
                    }
                    None => self.push_missing_comment(block, depth),
                }
                self.emit_successors(block, depth, &visited);
            }
            BlockKind::UpdateVar => {
                match self.assignment_parts(block) {
                    Some((name, value)) => match block.field_text("operator") {
                        Some(op) if !op.trim().is_empty() => {
                            self.push_line(depth, format!("{} {}= {};", name, op.trim(), value));
                        }
                        _ => self.push_missing_comment(block, depth),
                    },
                    None => self.push_missing_comment(block, depth),
                }
                self.emit_successors(block, depth, &visited);
            }
            BlockKind::If => {
                let Some(condition) = self.condition(block) else {
                    self.push_missing_comment(block, depth);
                    return;
                };
                self.push_line(depth, format!("if ({}) {{", condition));
                if let Some(edge) = self.index.branch(&block.id, BranchTag::Yes) {
                    self.emit_edge_target(&edge.target, depth + 1, &visited);
                }
                self.push_line(depth, "} else {".to_string());
                if let Some(edge) = self.index.branch(&block.id, BranchTag::No) {
                    self.emit_edge_target(&edge.target, depth + 1, &visited);
                }
                self.push_line(depth, "}".to_string());
            }
            BlockKind::While => {
                let Some(condition) = self.condition(block) else {
                    self.push_missing_comment(block, depth);
                    return;
                };
                self.push_line(depth, format!("while ({}) {{", condition));
                if let Some(edge) = self.index.branch(&block.id, BranchTag::Body) {
                    // The loop-back into this block stops at the cycle guard.
                    self.emit_edge_target(&edge.target, depth + 1, &visited);
                }
                self.push_line(depth, "}".to_string());
                if let Some(edge) = self.index.branch(&block.id, BranchTag::Exit) {
                    self.emit_edge_target(&edge.target, depth, &visited);
                }
            }
            BlockKind::Output => {
                match block.field_text("text") {
                    Some(text) if !text.trim().is_empty() => {
                        let interpolated = text.replace('{', "${");
                        self.push_line(depth, format!("console.log(`{}`);", interpolated));
                    }
                    _ => self.push_missing_comment(block, depth),
                }
                self.emit_successors(block, depth, &visited);
            }
            BlockKind::Input => {
                match block.field_text("varName") {
                    Some(name) if !name.trim().is_empty() => {
                        let name = name.trim().to_string();
                        self.push_line(depth, format!("let {} = prompt();", name));
                        self.names.insert(name);
                    }
                    _ => self.push_missing_comment(block, depth),
                }
                self.emit_successors(block, depth, &visited);
            }
            BlockKind::Move => {
                self.emit_call(block, depth, "moveCharacter", "distance");
                self.emit_successors(block, depth, &visited);
            }
            BlockKind::Rotate => {
                self.emit_call(block, depth, "rotateCharacter", "degrees");
                self.emit_successors(block, depth, &visited);
            }
            BlockKind::Unknown => {
                self.push_line(depth, format!("// unknown block: {}", block.id));
                self.emit_successors(block, depth, &visited);
            }
        }
    }

    /// Emits every untagged successor in edge-list order, matching the
    /// engine's fan-out behavior for non-branching kinds.
    fn emit_successors(
        &mut self,
        block: &'g BlockDefinition,
        depth: usize,
        visited: &HashSet<&'g str>,
    ) {
        let edges = self.index.untagged(&block.id);
        for edge in edges {
            self.emit_edge_target(&edge.target, depth, visited);
        }
    }

    fn emit_edge_target(&mut self, target: &str, depth: usize, visited: &HashSet<&'g str>) {
        if let Some(block) = self.index.block(target) {
            self.emit_block(block, depth, visited);
        }
    }

    /// Variable name and rendered value for createVar/updateVar, or `None`
    /// when a required field is absent.
    fn assignment_parts(&self, block: &BlockDefinition) -> Option<(String, String)> {
        let name = block.field_text("varName")?.trim().to_string();
        let raw = block.field_text("varValue")?.trim().to_string();
        if name.is_empty() || raw.is_empty() {
            return None;
        }
        let value = if block.field_text("valueType").as_deref() == Some("string") {
            format!("\"{}\"", crate::expr::strip_quotes(&raw))
        } else {
            raw
        };
        Some((name, value))
    }

    fn condition(&self, block: &BlockDefinition) -> Option<String> {
        let left = block.field_text("leftOperand")?;
        let operator = block.field_text("operator")?;
        let right = block.field_text("rightOperand")?;
        if left.trim().is_empty() || operator.trim().is_empty() || right.trim().is_empty() {
            return None;
        }
        Some(format!(
            "{} {} {}",
            self.quote(&left),
            operator.trim(),
            self.quote(&right)
        ))
    }

    /// Auto-quoting against the symbolic name table, mirroring the
    /// evaluator's declared-type-aware rule.
    fn quote(&self, operand: &str) -> String {
        quote_unless_known(operand, |name| self.names.contains(name))
    }

    fn emit_call(
        &mut self,
        block: &BlockDefinition,
        depth: usize,
        function: &str,
        amount_field: &str,
    ) {
        let direction = block.field_text("direction").unwrap_or_default();
        let amount = block.field_text(amount_field).unwrap_or_default();
        if direction.trim().is_empty() || amount.trim().is_empty() {
            self.push_missing_comment(block, depth);
            return;
        }
        self.push_line(
            depth,
            format!("{}(\"{}\", {});", function, direction.trim(), amount.trim()),
        );
    }

    fn push_missing_comment(&mut self, block: &BlockDefinition, depth: usize) {
        self.push_line(
            depth,
            format!("// {} block \"{}\" is missing required fields", block.kind, block.id),
        );
    }

    fn push_line(&mut self, depth: usize, text: String) {
        self.lines.push(format!("{}{}", INDENT.repeat(depth), text));
    }
}
