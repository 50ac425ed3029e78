//! Lowers a syntax tree into the value model.
//!
//! Keys of flow mappings are evaluated in key mode, which produces [`Key`]s
//! directly: sequences become tuples and mappings become [`FrozenMap`]s, all
//! the way down. Block-mapping keys are always strings.

use crate::ast::{Block, BlockString, Composite, FlowValue, Line, Node, ScalarKind};
use crate::lexer::Integer;
use crate::{FrozenMap, Key, Mapping, Value};

/// Evaluates a parsed document.
///
/// # Examples
///
/// ```rust
/// use scdil::{evaluate, parse, Value};
///
/// let node = parse(">123\n>\n>\n>       jeb\n>\n").unwrap();
/// assert_eq!(evaluate(node), Value::from("123\n\njeb\n"));
/// ```
#[must_use]
pub fn evaluate(node: Node) -> Value {
    match node {
        Node::Flow(value) => eval_flow(value),
        Node::Block(block) => eval_block(block),
    }
}

fn eval_block(block: Block) -> Value {
    match block {
        Block::Sequence(seq) => Value::Sequence(
            seq.elements
                .into_iter()
                .map(|element| evaluate(*element.value))
                .collect(),
        ),
        Block::Mapping(map) => Value::Mapping(
            map.elements
                .into_iter()
                .map(|element| (Key::String(element.key.text), evaluate(*element.value)))
                .collect(),
        ),
        Block::String(string) => Value::String(eval_block_string(string)),
    }
}

fn eval_flow(value: FlowValue) -> Value {
    match value {
        FlowValue::Scalar(scalar) => eval_scalar(scalar.kind),
        FlowValue::Composite(Composite::Sequence(seq)) => Value::Sequence(
            seq.elements
                .into_iter()
                .map(|element| eval_flow(element.value))
                .collect(),
        ),
        FlowValue::Composite(Composite::Mapping(map)) => {
            let mut mapping = Mapping::with_capacity(map.elements.len());
            for element in map.elements {
                mapping.insert(eval_key(element.key), eval_flow(element.value));
            }
            Value::Mapping(mapping)
        }
    }
}

fn eval_key(value: FlowValue) -> Key {
    match value {
        FlowValue::Scalar(scalar) => eval_scalar(scalar.kind).into_key(),
        FlowValue::Composite(Composite::Sequence(seq)) => Key::Tuple(
            seq.elements
                .into_iter()
                .map(|element| eval_key(element.value))
                .collect(),
        ),
        FlowValue::Composite(Composite::Mapping(map)) => Key::Map(
            map.elements
                .into_iter()
                .map(|element| (eval_key(element.key), eval_key(element.value)))
                .collect::<FrozenMap>(),
        ),
    }
}

fn eval_scalar(kind: ScalarKind) -> Value {
    match kind {
        ScalarKind::Null => Value::Null,
        ScalarKind::Boolean(b) => Value::Bool(b),
        ScalarKind::Integer(Integer::Small(i)) => Value::Int(i),
        ScalarKind::Integer(Integer::Big(i)) => Value::from(i),
        ScalarKind::Float(f) => Value::Float(f),
        ScalarKind::String(s) => Value::String(s),
    }
}

fn eval_block_string(string: BlockString) -> String {
    if string.kind.is_folded() {
        fold_lines(&string.lines)
    } else {
        let lines: Vec<&str> = string.lines.iter().map(|line| line.text.as_str()).collect();
        lines.join("\n")
    }
}

/// Joins folded lines.
///
/// Each line is trimmed of leading and trailing spaces. A blank line becomes a
/// newline; a non-blank line is appended, preceded by a single space when the
/// previous line was non-blank too.
fn fold_lines(lines: &[Line]) -> String {
    let mut out = String::new();
    let mut previous_blank = true;
    for line in lines {
        let text = line.text.trim_matches(' ');
        if text.is_empty() {
            out.push('\n');
            previous_blank = true;
        } else {
            if !previous_blank {
                out.push(' ');
            }
            out.push_str(text);
            previous_blank = false;
        }
    }
    out
}
