use ahash::AHashMap;
use std::fmt;

/// The complete, canonical definition of a flowchart, ready for validation,
/// execution, or code generation. This is the target structure for any custom
/// data model conversion, and is read-only to the engine during one run.
#[derive(Debug, Clone, Default)]
pub struct GraphDefinition {
    pub blocks: Vec<BlockDefinition>,
    pub edges: Vec<EdgeDefinition>,
}

/// Defines a single typed block in the flowchart.
///
/// `fields` vary by kind: `leftOperand`/`operator`/`rightOperand` for
/// if/while, `varName`/`varValue`/`valueType` for variable blocks,
/// `direction`/`distance` for move, and so on.
#[derive(Debug, Clone)]
pub struct BlockDefinition {
    pub id: String,
    pub kind: BlockKind,
    pub fields: AHashMap<String, FieldValue>,
}

impl BlockDefinition {
    pub fn new(id: impl Into<String>, kind: BlockKind) -> Self {
        Self {
            id: id.into(),
            kind,
            fields: AHashMap::new(),
        }
    }

    pub fn with_field(mut self, name: &str, value: impl Into<FieldValue>) -> Self {
        self.fields.insert(name.to_string(), value.into());
        self
    }

    /// The field rendered as text, if present.
    pub fn field_text(&self, name: &str) -> Option<String> {
        self.fields.get(name).map(FieldValue::to_string)
    }

    /// Whether the field is present and non-empty after trimming.
    pub fn has_field(&self, name: &str) -> bool {
        self.field_text(name)
            .is_some_and(|text| !text.trim().is_empty())
    }
}

/// A block configuration value as supplied by the UI: either text or a number.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Number(f64),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) => write!(f, "{}", s),
            FieldValue::Number(n) => {
                if n.fract() == 0.0 {
                    write!(f, "{}", *n as i64)
                } else {
                    write!(f, "{}", n)
                }
            }
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

/// The closed set of block kinds understood by the engine and the generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    Start,
    End,
    If,
    While,
    Join,
    CreateVar,
    UpdateVar,
    Input,
    Output,
    Move,
    Rotate,
    /// Anything the UI sent that the engine does not recognize. Recoverable:
    /// logged and skipped rather than aborting the run.
    Unknown,
}

impl BlockKind {
    /// Maps a UI kind string onto the closed set. Unrecognized names become
    /// [`BlockKind::Unknown`].
    pub fn parse(name: &str) -> BlockKind {
        match name {
            "start" => BlockKind::Start,
            "end" => BlockKind::End,
            "if" => BlockKind::If,
            "while" => BlockKind::While,
            "join" => BlockKind::Join,
            "createVar" => BlockKind::CreateVar,
            "updateVar" => BlockKind::UpdateVar,
            "input" => BlockKind::Input,
            "output" => BlockKind::Output,
            "move" => BlockKind::Move,
            "rotate" => BlockKind::Rotate,
            _ => BlockKind::Unknown,
        }
    }

    /// Whether this kind selects its outgoing edge by branch tag.
    pub fn is_branching(self) -> bool {
        matches!(self, BlockKind::If | BlockKind::While)
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BlockKind::Start => "start",
            BlockKind::End => "end",
            BlockKind::If => "if",
            BlockKind::While => "while",
            BlockKind::Join => "join",
            BlockKind::CreateVar => "createVar",
            BlockKind::UpdateVar => "updateVar",
            BlockKind::Input => "input",
            BlockKind::Output => "output",
            BlockKind::Move => "move",
            BlockKind::Rotate => "rotate",
            BlockKind::Unknown => "unknown",
        };
        write!(f, "{}", name)
    }
}

/// The discriminator distinguishing a branching block's outgoing edges:
/// `yes`/`no` for if, `body`/`exit` for while. Linear flow leaves it unset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BranchTag {
    Yes,
    No,
    Body,
    Exit,
}

impl BranchTag {
    pub fn parse(tag: &str) -> Option<BranchTag> {
        match tag {
            "yes" => Some(BranchTag::Yes),
            "no" => Some(BranchTag::No),
            "body" => Some(BranchTag::Body),
            "exit" => Some(BranchTag::Exit),
            _ => None,
        }
    }
}

impl fmt::Display for BranchTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BranchTag::Yes => "yes",
            BranchTag::No => "no",
            BranchTag::Body => "body",
            BranchTag::Exit => "exit",
        };
        write!(f, "{}", name)
    }
}

/// A directed, optionally branch-tagged connection between two blocks.
#[derive(Debug, Clone)]
pub struct EdgeDefinition {
    pub id: String,
    pub source: String,
    pub target: String,
    pub branch: Option<BranchTag>,
}

impl EdgeDefinition {
    pub fn new(id: impl Into<String>, source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            target: target.into(),
            branch: None,
        }
    }

    pub fn with_branch(mut self, tag: BranchTag) -> Self {
        self.branch = Some(tag);
        self
    }
}
