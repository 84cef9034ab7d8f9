//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types and functions from the
//! karakuri crate. Import this module to get access to the core functionality
//! without having to import each type individually.
//!
//! # Example
//!
//! ```rust,no_run
//! use karakuri::prelude::*;
//!
//! # fn run_example(graph: &GraphDefinition) {
//! let report = validate(graph);
//! if report.is_empty() {
//!     let mut engine = Engine::new(graph);
//!     engine.start().expect("validated graph has a start block");
//!     let outcome = drive::run_unpaced(&mut engine, |_| String::new());
//!     println!("{:?}", outcome.status);
//! }
//! # }
//! ```

// Execution engine
pub use crate::engine::{
    CharacterState, Direction, Engine, EngineBuilder, EngineConfig, EngineState, InputRequest,
    NullObserver, RunObserver, RunOutcome, RunStatus, SpinDirection, Step, drive,
};

// Code generation
pub use crate::codegen::generate;

// Graph model and conversion
pub use crate::graph::{
    BlockDefinition, BlockKind, BranchTag, EdgeDefinition, FieldValue, GraphDefinition, GraphIndex,
    IntoGraph,
};

// UI wire format
pub use crate::ui::{UiBlock, UiEdge, UiGraph};

// Expression evaluation
pub use crate::expr::{Value, VariableContext, auto_quote, evaluate, substitute_template};

// Validation
pub use crate::validator::{validate, validate_messages};

// Error types
pub use crate::error::{EvalError, GraphConversionError, RuntimeError, ValidationError};

// Map type used throughout this crate
pub use ahash::AHashMap;
