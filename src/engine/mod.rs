//! The stateful flowchart interpreter.
//!
//! One engine instance drives one run at a time: a depth-first walk over the
//! graph with a single active block, expressed as an explicit resumable state
//! machine rather than native recursion. Each [`Engine::step`] call advances
//! to the next suspension point and tells the caller what to do: wait out a
//! timed pause, resolve a pending input request, or accept the finished
//! [`RunOutcome`]. The engine owns exclusive mutable access to the variable
//! store and character pose for the run's duration.

pub mod drive;

mod character;
mod observer;

pub use character::{CharacterState, Direction, SpinDirection};
pub use observer::{NullObserver, RunObserver};

use crate::error::{EvalError, RuntimeError};
use crate::expr::{self, Value, VariableContext, auto_quote, substitute_template};
use crate::graph::{BlockDefinition, BlockKind, BranchTag, EdgeDefinition, GraphDefinition, GraphIndex};
use ahash::AHashMap;
use std::time::Duration;

/// Fixed upper bound on per-block traversals within one run. The sole
/// safeguard against a cyclic graph whose condition never becomes false.
pub const VISIT_CEILING: u32 = 5_000;

/// Timing and safety knobs for one engine instance.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Pause after a block is highlighted, before its side effect runs.
    pub block_delay: Duration,
    /// Pause while an edge is highlighted, before entering its target.
    pub edge_delay: Duration,
    /// How long an output message stays on the character.
    pub message_hold: Duration,
    /// Slice handed out while the run is paused, so a held run never
    /// busy-waits.
    pub pause_poll: Duration,
    pub visit_ceiling: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            block_delay: Duration::from_millis(500),
            edge_delay: Duration::from_millis(300),
            message_hold: Duration::from_millis(1500),
            pause_poll: Duration::from_millis(50),
            visit_ceiling: VISIT_CEILING,
        }
    }
}

/// Observable lifecycle of one engine instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    Idle,
    Running,
    AwaitingInput,
    Completed,
    Aborted,
}

/// What the engine asks of its driver after each step.
#[derive(Debug)]
pub enum Step {
    /// Wait this long (already speed-scaled), then call `step` again.
    Wait(Duration),
    /// Resolve the pending request via [`Engine::provide_input`], then call
    /// `step` again.
    NeedInput(InputRequest),
    /// The run is over.
    Finished(RunOutcome),
}

/// The single-slot pending request emitted by an `input` block. At most one
/// is outstanding at any time.
#[derive(Debug, Clone, PartialEq)]
pub struct InputRequest {
    pub block_id: String,
    /// The variable the resolved value is stored into.
    pub variable: String,
    /// Declared type of the expected value: `"number"` coerces, anything
    /// else stays text.
    pub value_type: String,
}

/// Terminal status of one run.
#[derive(Debug, Clone, PartialEq)]
pub enum RunStatus {
    Completed,
    Aborted(RuntimeError),
}

/// The accumulated log plus terminal status of one run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunOutcome {
    pub log: Vec<String>,
    pub status: RunStatus,
}

/// One pending unit of the depth-first walk. Sibling branches of a fan-out
/// sit lower on the stack and run after the current subtree drains.
enum Frame<'g> {
    /// Highlight the block, count the visit, wait the block delay.
    Enter(&'g BlockDefinition),
    /// Run the block's side effect and queue its successors.
    Effect(&'g BlockDefinition),
    /// Highlight the edge, wait the edge delay.
    Cross(&'g EdgeDefinition),
    /// Un-highlight the edge and enter its target.
    Arrive(&'g EdgeDefinition),
    /// Take down an output block's message after its hold expires.
    ClearMessage,
}

/// Builds an [`Engine`] with a custom configuration or observer.
pub struct EngineBuilder<'g> {
    graph: &'g GraphDefinition,
    config: EngineConfig,
    observer: Box<dyn RunObserver>,
}

impl<'g> EngineBuilder<'g> {
    pub fn new(graph: &'g GraphDefinition) -> Self {
        Self {
            graph,
            config: EngineConfig::default(),
            observer: Box::new(NullObserver),
        }
    }

    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn observer(mut self, observer: Box<dyn RunObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn build(self) -> Engine<'g> {
        Engine {
            index: GraphIndex::new(self.graph),
            config: self.config,
            observer: self.observer,
            state: EngineState::Idle,
            stack: Vec::new(),
            vars: VariableContext::default(),
            character: CharacterState::default(),
            console: Vec::new(),
            ledger: AHashMap::new(),
            branch_results: AHashMap::new(),
            pending_input: None,
            pending_block: None,
            abort_error: None,
            paused: false,
            speed: 1.0,
        }
    }
}

/// The flowchart interpreter. One instance per graph; one run at a time.
pub struct Engine<'g> {
    index: GraphIndex<'g>,
    config: EngineConfig,
    observer: Box<dyn RunObserver>,
    state: EngineState,
    stack: Vec<Frame<'g>>,
    vars: VariableContext,
    character: CharacterState,
    console: Vec<String>,
    ledger: AHashMap<&'g str, u32>,
    branch_results: AHashMap<&'g str, bool>,
    pending_input: Option<InputRequest>,
    pending_block: Option<&'g BlockDefinition>,
    abort_error: Option<RuntimeError>,
    paused: bool,
    speed: f64,
}

impl<'g> Engine<'g> {
    pub fn new(graph: &'g GraphDefinition) -> Self {
        EngineBuilder::new(graph).build()
    }

    pub fn builder(graph: &'g GraphDefinition) -> EngineBuilder<'g> {
        EngineBuilder::new(graph)
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    /// The variable store of the current run.
    pub fn variables(&self) -> &VariableContext {
        &self.vars
    }

    pub fn character(&self) -> &CharacterState {
        &self.character
    }

    /// The console so far, newline-joined.
    pub fn console_text(&self) -> String {
        self.console.join("\n")
    }

    /// The condition outcome last remembered on a branching block.
    pub fn branch_taken(&self, block_id: &str) -> Option<bool> {
        self.branch_results.get(block_id).copied()
    }

    /// Sets the speed multiplier applied to all timed waits. Non-positive or
    /// non-finite values are ignored.
    pub fn set_speed(&mut self, speed: f64) {
        if speed.is_finite() && speed > 0.0 {
            self.speed = speed;
        }
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Holds or releases the run. While paused, `step` hands out short poll
    /// slices and makes no progress.
    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Clears all run state back to `Idle`. A new run simply starts from
    /// scratch; there is no cancellation primitive beyond this.
    pub fn reset(&mut self) {
        self.state = EngineState::Idle;
        self.stack.clear();
        self.vars.clear();
        self.character = CharacterState::default();
        self.console.clear();
        self.ledger.clear();
        self.branch_results.clear();
        self.pending_input = None;
        self.pending_block = None;
        self.abort_error = None;
        self.paused = false;
        self.speed = 1.0;
    }

    /// Resets and seeds a new run at the start block.
    pub fn start(&mut self) -> Result<(), RuntimeError> {
        self.reset();
        let start = self.index.start().ok_or(RuntimeError::NoStartBlock)?;
        self.state = EngineState::Running;
        self.stack.push(Frame::Enter(start));
        Ok(())
    }

    /// Advances to the next suspension point.
    pub fn step(&mut self) -> Step {
        match self.state {
            EngineState::Running => {}
            EngineState::AwaitingInput => {
                match &self.pending_input {
                    Some(request) => return Step::NeedInput(request.clone()),
                    // Unreachable in practice; recover rather than wedge.
                    None => self.state = EngineState::Running,
                }
            }
            EngineState::Idle | EngineState::Completed | EngineState::Aborted => {
                return Step::Finished(self.outcome());
            }
        }

        if self.paused {
            return Step::Wait(self.config.pause_poll);
        }

        loop {
            let Some(frame) = self.stack.pop() else {
                return Step::Finished(self.finish());
            };
            match self.run_frame(frame) {
                Ok(Some(step)) => return step,
                Ok(None) => {
                    if self.state == EngineState::Completed {
                        return Step::Finished(self.finish());
                    }
                }
                Err(error) => {
                    self.abort(error);
                    return Step::Finished(self.outcome());
                }
            }
        }
    }

    /// Resolves the single outstanding input request, coercing the value per
    /// the block's declared type and storing it into the named variable.
    pub fn provide_input(&mut self, raw: &str) -> Result<(), RuntimeError> {
        let request = self.pending_input.take().ok_or(RuntimeError::NoPendingInput)?;
        let value = if request.value_type == "number" {
            match raw.trim().parse::<f64>() {
                Ok(number) => Value::Number(number),
                // Unparseable input degrades to text rather than aborting.
                Err(_) => Value::Str(raw.to_string()),
            }
        } else {
            Value::Str(raw.to_string())
        };
        self.vars.insert(request.variable, value);
        if let Some(block) = self.pending_block.take() {
            self.push_fanout(block);
        }
        self.state = EngineState::Running;
        Ok(())
    }

    fn run_frame(&mut self, frame: Frame<'g>) -> Result<Option<Step>, RuntimeError> {
        match frame {
            Frame::Enter(block) => {
                self.observer.on_active_block(Some(&block.id));
                let count = self.ledger.entry(block.id.as_str()).or_insert(0);
                *count += 1;
                if *count > self.config.visit_ceiling {
                    return Err(RuntimeError::VisitCeilingExceeded {
                        block_id: block.id.clone(),
                        ceiling: self.config.visit_ceiling,
                    });
                }
                self.stack.push(Frame::Effect(block));
                Ok(Some(Step::Wait(self.scaled(self.config.block_delay))))
            }
            Frame::Effect(block) => self.run_effect(block),
            Frame::Cross(edge) => {
                self.observer.on_active_edge(Some(&edge.id));
                self.stack.push(Frame::Arrive(edge));
                Ok(Some(Step::Wait(self.scaled(self.config.edge_delay))))
            }
            Frame::Arrive(edge) => {
                self.observer.on_active_edge(None);
                let target = self.index.block(&edge.target).ok_or_else(|| {
                    RuntimeError::DanglingEdge {
                        edge_id: edge.id.clone(),
                        block_id: edge.target.clone(),
                    }
                })?;
                self.stack.push(Frame::Enter(target));
                Ok(None)
            }
            Frame::ClearMessage => {
                self.character.message = None;
                self.observer.on_character(&self.character);
                Ok(None)
            }
        }
    }

    fn run_effect(&mut self, block: &'g BlockDefinition) -> Result<Option<Step>, RuntimeError> {
        match block.kind {
            BlockKind::Start | BlockKind::Join => {
                self.push_fanout(block);
                Ok(None)
            }
            BlockKind::End => {
                // Terminates the whole run: pending sibling branches are
                // discarded along with the rest of the stack.
                self.stack.clear();
                self.state = EngineState::Completed;
                Ok(None)
            }
            BlockKind::CreateVar => {
                self.effect_assignment(block, false)?;
                self.push_fanout(block);
                Ok(None)
            }
            BlockKind::UpdateVar => {
                self.effect_assignment(block, true)?;
                self.push_fanout(block);
                Ok(None)
            }
            BlockKind::If => {
                let taken = self.eval_condition(block)?;
                self.branch_results.insert(block.id.as_str(), taken);
                let tag = if taken { BranchTag::Yes } else { BranchTag::No };
                self.push_branch(block, tag)?;
                Ok(None)
            }
            BlockKind::While => {
                // Re-evaluated on every entry; the body path leading back
                // into this block is what makes the loop loop.
                let taken = self.eval_condition(block)?;
                self.branch_results.insert(block.id.as_str(), taken);
                let tag = if taken { BranchTag::Body } else { BranchTag::Exit };
                self.push_branch(block, tag)?;
                Ok(None)
            }
            BlockKind::Move => {
                self.effect_move(block)?;
                self.push_fanout(block);
                Ok(None)
            }
            BlockKind::Rotate => {
                self.effect_rotate(block)?;
                self.push_fanout(block);
                Ok(None)
            }
            BlockKind::Output => {
                let raw = self.require_text(block, "text")?;
                let text = substitute_template(&raw, &self.vars);
                self.log_line(text.clone());
                self.character.message = Some(text);
                self.observer.on_character(&self.character);
                self.push_fanout(block);
                self.stack.push(Frame::ClearMessage);
                Ok(Some(Step::Wait(self.scaled(self.config.message_hold))))
            }
            BlockKind::Input => {
                let variable = self.require_text(block, "varName")?;
                let value_type = block
                    .field_text("valueType")
                    .unwrap_or_else(|| "string".to_string());
                let request = InputRequest {
                    block_id: block.id.clone(),
                    variable,
                    value_type,
                };
                self.pending_input = Some(request.clone());
                self.pending_block = Some(block);
                self.state = EngineState::AwaitingInput;
                Ok(Some(Step::NeedInput(request)))
            }
            BlockKind::Unknown => {
                let message = format!("error: unknown block kind at '{}'", block.id);
                log::warn!("{message}");
                self.log_line(message.clone());
                self.observer.on_block_error(&block.id, &message);
                self.push_untagged(block);
                Ok(None)
            }
        }
    }

    fn effect_assignment(
        &mut self,
        block: &BlockDefinition,
        update: bool,
    ) -> Result<(), RuntimeError> {
        let name = self.require_text(block, "varName")?;
        let raw = self.require_text(block, "varValue")?;
        let value_type = block.field_text("valueType").unwrap_or_default();
        let substituted = substitute_template(&raw, &self.vars);
        let value = if value_type == "string" {
            Value::Str(expr::strip_quotes(&substituted).to_string())
        } else {
            expr::evaluate(&substituted, &self.vars).map_err(|source| {
                RuntimeError::Expression {
                    block_id: block.id.clone(),
                    source,
                }
            })?
        };
        if update {
            let operator = self.require_text(block, "operator")?;
            let current =
                self.vars
                    .get(&name)
                    .cloned()
                    .ok_or_else(|| RuntimeError::UndefinedVariable {
                        block_id: block.id.clone(),
                        name: name.clone(),
                    })?;
            let updated = apply_operator(block, &operator, current, value)?;
            self.vars.insert(name, updated);
        } else {
            self.vars.insert(name, value);
        }
        Ok(())
    }

    fn eval_condition(&self, block: &BlockDefinition) -> Result<bool, RuntimeError> {
        let left = self.require_text(block, "leftOperand")?;
        let operator = self.require_text(block, "operator")?;
        let right = self.require_text(block, "rightOperand")?;
        let condition = format!(
            "{} {} {}",
            auto_quote(&substitute_template(&left, &self.vars), &self.vars),
            operator,
            auto_quote(&substitute_template(&right, &self.vars), &self.vars),
        );
        match expr::evaluate(&condition, &self.vars) {
            Ok(Value::Bool(result)) => Ok(result),
            Ok(other) => Err(RuntimeError::Expression {
                block_id: block.id.clone(),
                source: EvalError::TypeMismatch {
                    operation: operator,
                    expected: "Bool".to_string(),
                    found: other,
                },
            }),
            Err(source) => Err(RuntimeError::Expression {
                block_id: block.id.clone(),
                source,
            }),
        }
    }

    fn effect_move(&mut self, block: &BlockDefinition) -> Result<(), RuntimeError> {
        let direction_text = self.require_text(block, "direction")?;
        let direction = Direction::parse(&direction_text).ok_or_else(|| {
            RuntimeError::MalformedField {
                block_id: block.id.clone(),
                field: "direction",
                value: direction_text,
            }
        })?;
        let distance = self.require_number(block, "distance")?;
        let (dx, dy) = direction.deltas();
        self.character.x += dx * distance;
        self.character.y += dy * distance;
        self.observer.on_character(&self.character);
        Ok(())
    }

    fn effect_rotate(&mut self, block: &BlockDefinition) -> Result<(), RuntimeError> {
        let direction_text = self.require_text(block, "direction")?;
        let direction = SpinDirection::parse(&direction_text).ok_or_else(|| {
            RuntimeError::MalformedField {
                block_id: block.id.clone(),
                field: "direction",
                value: direction_text,
            }
        })?;
        let degrees = self.require_number(block, "degrees")?;
        self.character.rotation_degrees =
            (self.character.rotation_degrees + direction.signum() * degrees).rem_euclid(360.0);
        self.observer.on_character(&self.character);
        Ok(())
    }

    fn push_fanout(&mut self, block: &'g BlockDefinition) {
        // Non-branching kinds follow every outgoing edge in edge-list order;
        // reverse-pushed so the depth-first pop order matches.
        let edges = self.index.outgoing(&block.id).to_vec();
        if edges.is_empty() {
            let warning = format!("warning: block '{}' has no outgoing edge", block.id);
            log::warn!("{warning}");
            self.log_line(warning);
            return;
        }
        for edge in edges.into_iter().rev() {
            self.stack.push(Frame::Cross(edge));
        }
    }

    fn push_untagged(&mut self, block: &'g BlockDefinition) {
        let edges = self.index.untagged(&block.id);
        for edge in edges.into_iter().rev() {
            self.stack.push(Frame::Cross(edge));
        }
    }

    fn push_branch(&mut self, block: &'g BlockDefinition, tag: BranchTag) -> Result<(), RuntimeError> {
        let edge =
            self.index
                .branch(&block.id, tag)
                .ok_or_else(|| RuntimeError::MissingBranch {
                    block_id: block.id.clone(),
                    tag,
                })?;
        self.stack.push(Frame::Cross(edge));
        Ok(())
    }

    fn require_text(
        &self,
        block: &BlockDefinition,
        field: &'static str,
    ) -> Result<String, RuntimeError> {
        block
            .field_text(field)
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty())
            .ok_or_else(|| RuntimeError::MissingField {
                block_id: block.id.clone(),
                field,
            })
    }

    fn require_number(
        &self,
        block: &BlockDefinition,
        field: &'static str,
    ) -> Result<f64, RuntimeError> {
        let text = self.require_text(block, field)?;
        let substituted = substitute_template(&text, &self.vars);
        substituted
            .trim()
            .parse::<f64>()
            .map_err(|_| RuntimeError::MalformedField {
                block_id: block.id.clone(),
                field,
                value: substituted,
            })
    }

    fn log_line(&mut self, line: String) {
        self.console.push(line);
        let text = self.console.join("\n");
        self.observer.on_console(&text);
    }

    fn scaled(&self, base: Duration) -> Duration {
        base.div_f64(self.speed)
    }

    fn finish(&mut self) -> RunOutcome {
        self.state = EngineState::Completed;
        self.observer.on_active_block(None);
        self.observer.on_active_edge(None);
        self.outcome()
    }

    fn abort(&mut self, error: RuntimeError) {
        log::debug!("run aborted: {error}");
        if let Some(block_id) = error.block_id() {
            let id = block_id.to_string();
            let message = error.to_string();
            self.observer.on_block_error(&id, &message);
        }
        self.log_line(format!("error: {error}"));
        self.abort_error = Some(error);
        self.state = EngineState::Aborted;
        self.stack.clear();
        self.pending_input = None;
        self.pending_block = None;
        self.observer.on_active_block(None);
        self.observer.on_active_edge(None);
    }

    fn outcome(&self) -> RunOutcome {
        let status = match &self.abort_error {
            Some(error) => RunStatus::Aborted(error.clone()),
            None => RunStatus::Completed,
        };
        RunOutcome {
            log: self.console.clone(),
            status,
        }
    }
}

fn apply_operator(
    block: &BlockDefinition,
    operator: &str,
    current: Value,
    operand: Value,
) -> Result<Value, RuntimeError> {
    let mismatch = |expected: &str, found: &Value| RuntimeError::Expression {
        block_id: block.id.clone(),
        source: EvalError::TypeMismatch {
            operation: operator.to_string(),
            expected: expected.to_string(),
            found: found.clone(),
        },
    };
    match operator {
        "+" => match (current, operand) {
            (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a + b)),
            (Value::Str(a), Value::Str(b)) => Ok(Value::Str(format!("{a}{b}"))),
            (other, _) => Err(mismatch("Number or Str", &other)),
        },
        "-" | "*" | "/" => {
            let (Some(a), Some(b)) = (current.as_number(), operand.as_number()) else {
                return Err(mismatch("Number", &current));
            };
            let result = match operator {
                "-" => a - b,
                "*" => a * b,
                _ => a / b,
            };
            Ok(Value::Number(result))
        }
        _ => Err(RuntimeError::MalformedField {
            block_id: block.id.clone(),
            field: "operator",
            value: operator.to_string(),
        }),
    }
}
