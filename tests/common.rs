//! Common test utilities for building flowchart definitions.
use karakuri::prelude::*;

/// The smallest valid flowchart: start connected straight to end.
#[allow(dead_code)]
pub fn start_end_flow() -> GraphDefinition {
    GraphDefinition {
        blocks: vec![
            BlockDefinition::new("b-start", BlockKind::Start),
            BlockDefinition::new("b-end", BlockKind::End),
        ],
        edges: vec![EdgeDefinition::new("e1", "b-start", "b-end")],
    }
}

/// The two-variable sum-and-print program: `x = 5; y = 3; z = x + y; print z`.
#[allow(dead_code)]
pub fn sum_and_print_flow() -> GraphDefinition {
    GraphDefinition {
        blocks: vec![
            BlockDefinition::new("b-start", BlockKind::Start),
            BlockDefinition::new("b-x", BlockKind::CreateVar)
                .with_field("varName", "x")
                .with_field("varValue", "5"),
            BlockDefinition::new("b-y", BlockKind::CreateVar)
                .with_field("varName", "y")
                .with_field("varValue", "3"),
            BlockDefinition::new("b-z", BlockKind::CreateVar)
                .with_field("varName", "z")
                .with_field("varValue", "x + y"),
            BlockDefinition::new("b-print", BlockKind::Output).with_field("text", "{z}"),
            BlockDefinition::new("b-end", BlockKind::End),
        ],
        edges: vec![
            EdgeDefinition::new("e1", "b-start", "b-x"),
            EdgeDefinition::new("e2", "b-x", "b-y"),
            EdgeDefinition::new("e3", "b-y", "b-z"),
            EdgeDefinition::new("e4", "b-z", "b-print"),
            EdgeDefinition::new("e5", "b-print", "b-end"),
        ],
    }
}

/// A counting loop: `i = initial; while i < limit { print i; i += 1 }`.
#[allow(dead_code)]
pub fn counting_loop_flow(initial: f64, limit: f64) -> GraphDefinition {
    GraphDefinition {
        blocks: vec![
            BlockDefinition::new("b-start", BlockKind::Start),
            BlockDefinition::new("b-init", BlockKind::CreateVar)
                .with_field("varName", "i")
                .with_field("varValue", initial),
            BlockDefinition::new("b-loop", BlockKind::While)
                .with_field("leftOperand", "i")
                .with_field("operator", "<")
                .with_field("rightOperand", limit),
            BlockDefinition::new("b-print", BlockKind::Output).with_field("text", "{i}"),
            BlockDefinition::new("b-step", BlockKind::UpdateVar)
                .with_field("varName", "i")
                .with_field("varValue", "1")
                .with_field("operator", "+"),
            BlockDefinition::new("b-end", BlockKind::End),
        ],
        edges: vec![
            EdgeDefinition::new("e1", "b-start", "b-init"),
            EdgeDefinition::new("e2", "b-init", "b-loop"),
            EdgeDefinition::new("e3", "b-loop", "b-print").with_branch(BranchTag::Body),
            EdgeDefinition::new("e4", "b-print", "b-step"),
            EdgeDefinition::new("e5", "b-step", "b-loop"),
            EdgeDefinition::new("e6", "b-loop", "b-end").with_branch(BranchTag::Exit),
        ],
    }
}

/// A branch that remerges: `x = value; if x > 5 { print big } else { print small }`.
#[allow(dead_code)]
pub fn branch_flow(value: f64) -> GraphDefinition {
    GraphDefinition {
        blocks: vec![
            BlockDefinition::new("b-start", BlockKind::Start),
            BlockDefinition::new("b-x", BlockKind::CreateVar)
                .with_field("varName", "x")
                .with_field("varValue", value),
            BlockDefinition::new("b-if", BlockKind::If)
                .with_field("leftOperand", "x")
                .with_field("operator", ">")
                .with_field("rightOperand", "5"),
            BlockDefinition::new("b-big", BlockKind::Output).with_field("text", "big"),
            BlockDefinition::new("b-small", BlockKind::Output).with_field("text", "small"),
            BlockDefinition::new("b-join", BlockKind::Join),
            BlockDefinition::new("b-end", BlockKind::End),
        ],
        edges: vec![
            EdgeDefinition::new("e1", "b-start", "b-x"),
            EdgeDefinition::new("e2", "b-x", "b-if"),
            EdgeDefinition::new("e3", "b-if", "b-big").with_branch(BranchTag::Yes),
            EdgeDefinition::new("e4", "b-if", "b-small").with_branch(BranchTag::No),
            EdgeDefinition::new("e5", "b-big", "b-join"),
            EdgeDefinition::new("e6", "b-small", "b-join"),
            EdgeDefinition::new("e7", "b-join", "b-end"),
        ],
    }
}

/// A loop whose condition never becomes false.
#[allow(dead_code)]
pub fn infinite_loop_flow() -> GraphDefinition {
    GraphDefinition {
        blocks: vec![
            BlockDefinition::new("b-start", BlockKind::Start),
            BlockDefinition::new("b-loop", BlockKind::While)
                .with_field("leftOperand", "1")
                .with_field("operator", "==")
                .with_field("rightOperand", "1"),
            BlockDefinition::new("b-body", BlockKind::Join),
            BlockDefinition::new("b-end", BlockKind::End),
        ],
        edges: vec![
            EdgeDefinition::new("e1", "b-start", "b-loop"),
            EdgeDefinition::new("e2", "b-loop", "b-body").with_branch(BranchTag::Body),
            EdgeDefinition::new("e3", "b-body", "b-loop"),
            EdgeDefinition::new("e4", "b-loop", "b-end").with_branch(BranchTag::Exit),
        ],
    }
}

/// Asks for a value, then greets with it.
#[allow(dead_code)]
pub fn greeting_input_flow() -> GraphDefinition {
    GraphDefinition {
        blocks: vec![
            BlockDefinition::new("b-start", BlockKind::Start),
            BlockDefinition::new("b-ask", BlockKind::Input).with_field("varName", "name"),
            BlockDefinition::new("b-print", BlockKind::Output).with_field("text", "Hello {name}"),
            BlockDefinition::new("b-end", BlockKind::End),
        ],
        edges: vec![
            EdgeDefinition::new("e1", "b-start", "b-ask"),
            EdgeDefinition::new("e2", "b-ask", "b-print"),
            EdgeDefinition::new("e3", "b-print", "b-end"),
        ],
    }
}

/// Runs the graph headless and panics on any input request.
#[allow(dead_code)]
pub fn run_headless(graph: &GraphDefinition) -> RunOutcome {
    let mut engine = Engine::new(graph);
    engine.start().expect("graph has a start block");
    drive::run_unpaced(&mut engine, |request| {
        panic!("unexpected input request from '{}'", request.block_id)
    })
}
