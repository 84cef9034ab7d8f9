//! # Karakuri - Flowchart Execution and Code Generation Engine
//!
//! **Karakuri** is the interpreter/compiler core of a block-based visual
//! programming tool. It consumes a directed graph of typed blocks (start,
//! end, conditional, loop, variable, I/O, movement) joined by optionally
//! branch-tagged edges, and does two independent things with it:
//!
//! 1. **Execute** the graph as an animated program against mutable run state
//!    (variables, a character pose, a console), with cooperative timed
//!    suspension for animation pacing, pausing, and external input.
//! 2. **Generate** an equivalent textual program from the same graph, with
//!    branch and loop semantics that agree with the interpreter.
//!
//! The diagram canvas, drag-and-drop palette, and persistence layer are
//! external collaborators: they supply the graph (via the [`graph::IntoGraph`]
//! conversion trait or the [`ui`] wire format) and consume the engine's
//! observations.
//!
//! ## Core Workflow
//!
//! 1. **Convert** your UI's graph format into a canonical
//!    [`graph::GraphDefinition`].
//! 2. **Validate** it with [`validator::validate`]; a non-empty report blocks
//!    everything downstream.
//! 3. **Run** it with an [`engine::Engine`], driving the resumable state
//!    machine from [`engine::Engine::step`], or hand the loop to a driver in
//!    [`engine::drive`].
//! 4. Or **translate** it with [`codegen::generate`] into program text for a
//!    preview pane.
//!
//! ## Quick Start
//!
//! ```rust
//! use karakuri::prelude::*;
//!
//! // A minimal flowchart: start -> output -> end.
//! let graph = GraphDefinition {
//!     blocks: vec![
//!         BlockDefinition::new("b1", BlockKind::Start),
//!         BlockDefinition::new("b2", BlockKind::Output).with_field("text", "hello"),
//!         BlockDefinition::new("b3", BlockKind::End),
//!     ],
//!     edges: vec![
//!         EdgeDefinition::new("e1", "b1", "b2"),
//!         EdgeDefinition::new("e2", "b2", "b3"),
//!     ],
//! };
//!
//! // Pre-flight checks collect every problem at once.
//! assert!(validate(&graph).is_empty());
//!
//! // Execute headless: timed waits are consumed instantly.
//! let mut engine = Engine::new(&graph);
//! engine.start().unwrap();
//! let outcome = drive::run_unpaced(&mut engine, |_| unreachable!("no input blocks"));
//! assert_eq!(outcome.log, vec!["hello".to_string()]);
//!
//! // Or translate the same graph into program text.
//! let code = generate(&graph);
//! assert!(code.starts_with("function runFlowchart() {"));
//! ```

pub mod codegen;
pub mod engine;
pub mod error;
pub mod expr;
pub mod graph;
pub mod prelude;
pub mod ui;
pub mod validator;
