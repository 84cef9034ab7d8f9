use crate::expr::Value;
use crate::graph::{BlockKind, BranchTag};
use thiserror::Error;

/// Problems found by pre-flight validation.
///
/// These are collected, never short-circuited, and their `Display` strings are
/// surfaced verbatim to the caller. Any non-empty report blocks both execution
/// and code generation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("flowchart has no start block")]
    MissingStart,

    #[error("flowchart has {0} start blocks, expected exactly one")]
    MultipleStarts(usize),

    #[error("flowchart has no end block")]
    MissingEnd,

    #[error("edge '{edge_id}' references unknown {role} block '{block_id}'")]
    DanglingEdge {
        edge_id: String,
        role: &'static str,
        block_id: String,
    },

    #[error("no end block is reachable from the start block")]
    EndUnreachable,

    #[error("{kind} block '{block_id}' is missing required field '{field}'")]
    MissingField {
        block_id: String,
        kind: BlockKind,
        field: &'static str,
    },
}

/// Errors that can occur while parsing or evaluating an expression.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvalError {
    #[error("malformed expression '{expr}': {message}")]
    Syntax { expr: String, message: String },

    #[error("variable '{0}' is not defined")]
    UndefinedVariable(String),

    #[error(
        "type mismatch during operation '{operation}': expected {expected}, but found value '{found}'"
    )]
    TypeMismatch {
        operation: String,
        expected: String,
        found: Value,
    },
}

/// Faults detected during execution. Each one aborts the current run,
/// flags the offending block, and lands in the run's log.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RuntimeError {
    #[error("flowchart has no start block")]
    NoStartBlock,

    #[error("block '{block_id}': {source}")]
    Expression {
        block_id: String,
        source: EvalError,
    },

    #[error("block '{block_id}' updates undefined variable '{name}'")]
    UndefinedVariable { block_id: String, name: String },

    #[error("block '{block_id}' is missing required field '{field}'")]
    MissingField {
        block_id: String,
        field: &'static str,
    },

    #[error("block '{block_id}' has a malformed '{field}' value: '{value}'")]
    MalformedField {
        block_id: String,
        field: &'static str,
        value: String,
    },

    #[error("block '{block_id}' has no outgoing '{tag}' edge")]
    MissingBranch { block_id: String, tag: BranchTag },

    #[error("edge '{edge_id}' leads to unknown block '{block_id}'")]
    DanglingEdge { edge_id: String, block_id: String },

    #[error("block '{block_id}' was entered more than {ceiling} times; aborting runaway loop")]
    VisitCeilingExceeded { block_id: String, ceiling: u32 },

    #[error("no input request is pending")]
    NoPendingInput,
}

impl RuntimeError {
    /// The block this fault should be flagged on, when there is one.
    pub fn block_id(&self) -> Option<&str> {
        match self {
            RuntimeError::Expression { block_id, .. }
            | RuntimeError::UndefinedVariable { block_id, .. }
            | RuntimeError::MissingField { block_id, .. }
            | RuntimeError::MalformedField { block_id, .. }
            | RuntimeError::MissingBranch { block_id, .. }
            | RuntimeError::DanglingEdge { block_id, .. }
            | RuntimeError::VisitCeilingExceeded { block_id, .. } => Some(block_id),
            RuntimeError::NoStartBlock | RuntimeError::NoPendingInput => None,
        }
    }
}

/// Errors that can occur when converting a custom user format into a `GraphDefinition`.
#[derive(Error, Debug, Clone)]
pub enum GraphConversionError {
    #[error("invalid graph data: {0}")]
    ValidationError(String),
}
