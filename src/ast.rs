//! Syntax tree produced by the [`Parser`](crate::parser::Parser).
//!
//! The tree keeps every punctuation position so that the column a block
//! construct is anchored at can be recovered with `column()`. It is consumed by
//! the evaluator in [`crate::eval`].
//!
//! ```text
//! Node
//! ├── Flow(FlowValue)
//! │   ├── Scalar
//! │   └── Composite
//! │       ├── Sequence   [a, b]
//! │       └── Mapping    {k: v}
//! └── Block
//!     ├── Sequence       - a
//!     ├── Mapping        k: v
//!     └── String         | line
//! ```

use crate::lexer::{Integer, LineKind, Position};

#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    Flow(FlowValue),
    Block(Block),
}

impl Node {
    /// The column of the node's first token.
    #[must_use]
    pub fn column(&self) -> usize {
        match self {
            Node::Flow(value) => value.column(),
            Node::Block(block) => block.column(),
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_block(&self) -> bool {
        matches!(self, Node::Block(_))
    }
}

/// A value written in flow syntax.
#[derive(Clone, Debug, PartialEq)]
pub enum FlowValue {
    Scalar(Scalar),
    Composite(Composite),
}

impl FlowValue {
    #[must_use]
    pub fn column(&self) -> usize {
        match self {
            FlowValue::Scalar(scalar) => scalar.position.column,
            FlowValue::Composite(Composite::Sequence(seq)) => seq.lbracket.column,
            FlowValue::Composite(Composite::Mapping(map)) => map.lcurly.column,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Scalar {
    pub kind: ScalarKind,
    pub position: Position,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ScalarKind {
    Null,
    Boolean(bool),
    Integer(Integer),
    Float(f64),
    String(String),
}

#[derive(Clone, Debug, PartialEq)]
pub enum Composite {
    Sequence(Sequence),
    Mapping(Mapping),
}

/// `[value, value, ...]`
#[derive(Clone, Debug, PartialEq)]
pub struct Sequence {
    pub lbracket: Position,
    pub elements: Vec<SequenceElement>,
    pub rbracket: Position,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SequenceElement {
    pub value: FlowValue,
    /// A missing comma ends the element list.
    pub comma: Option<Position>,
}

/// `{key: value, ...}`
#[derive(Clone, Debug, PartialEq)]
pub struct Mapping {
    pub lcurly: Position,
    pub elements: Vec<MappingElement>,
    pub rcurly: Position,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MappingElement {
    pub key: FlowValue,
    pub colon: Position,
    pub value: FlowValue,
    pub comma: Option<Position>,
}

/// A construct whose extent is decided by the column of its elements.
#[derive(Clone, Debug, PartialEq)]
pub enum Block {
    Sequence(BlockSequence),
    Mapping(BlockMapping),
    String(BlockString),
}

impl Block {
    /// The anchoring column shared by every element of the run.
    #[must_use]
    pub fn column(&self) -> usize {
        match self {
            Block::Sequence(seq) => seq.column(),
            Block::Mapping(map) => map.column(),
            Block::String(string) => string.column(),
        }
    }
}

/// A non-empty run of `- node` elements.
#[derive(Clone, Debug, PartialEq)]
pub struct BlockSequence {
    pub elements: Vec<BlockSequenceElement>,
}

impl BlockSequence {
    #[must_use]
    pub fn column(&self) -> usize {
        self.elements.first().map_or(0, |e| e.dash.column)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct BlockSequenceElement {
    pub dash: Position,
    pub value: Box<Node>,
}

/// A non-empty run of `key: node` elements.
#[derive(Clone, Debug, PartialEq)]
pub struct BlockMapping {
    pub elements: Vec<BlockMappingElement>,
}

impl BlockMapping {
    #[must_use]
    pub fn column(&self) -> usize {
        self.elements.first().map_or(0, |e| e.key.position.column)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct BlockMappingElement {
    pub key: BlockKey,
    pub colon: Position,
    pub value: Box<Node>,
}

/// A bare name or a quoted string used as a block-mapping key.
#[derive(Clone, Debug, PartialEq)]
pub struct BlockKey {
    pub position: Position,
    pub text: String,
    pub quoted: bool,
}

/// A homogeneous run of line tokens.
#[derive(Clone, Debug, PartialEq)]
pub struct BlockString {
    pub kind: LineKind,
    pub lines: Vec<Line>,
}

impl BlockString {
    #[must_use]
    pub fn column(&self) -> usize {
        self.lines.first().map_or(0, |l| l.position.column)
    }
}

/// One line token with its escapes already decoded.
#[derive(Clone, Debug, PartialEq)]
pub struct Line {
    pub position: Position,
    pub text: String,
}
