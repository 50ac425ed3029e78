//! Renders values as SCDIL text.
//!
//! Two output modes are supported (see [`Mode`]):
//!
//! - **Machine**: flow syntax only, on one line, with no added spaces.
//! - **Human**: block syntax for non-empty composites and multi-line strings,
//!   one element per line, ending with a newline.
//!
//! The renderer is generic over [`DumpNode`], so the same code dumps owned
//! [`Value`]s, immutable [`Key`]s and nodes of a [`Graph`](crate::Graph). Every
//! composite is pushed on an in-progress stack while its children are rendered;
//! meeting a composite that is already on the stack is reported as
//! [`Error::Cycle`].
//!
//! ## Examples
//!
//! ```rust
//! use scdil::{dumps, dumps_with_options, scdil, DumpOptions};
//!
//! let value = scdil!({"a": 1, "b": {"c": 1}});
//! assert_eq!(dumps(&value).unwrap(), "a: 1\nb:\n  c: 1\n");
//! assert_eq!(
//!     dumps_with_options(&value, DumpOptions::machine()).unwrap(),
//!     "{\"a\":1,\"b\":{\"c\":1}}"
//! );
//! ```

use crate::lexer::{is_control, is_letter, RESERVED_WORDS};
use crate::{DumpOptions, Error, Key, Mode, Result, Value};
use num_bigint::BigInt;

/// The structure of a node as seen by the renderer.
pub(crate) enum Shape<'a, N> {
    Null,
    Bool(bool),
    Int(i64),
    BigInt(&'a BigInt),
    Float(f64),
    String(&'a str),
    Sequence(Vec<N>),
    Mapping(Vec<(&'a Key, N)>),
}

/// Something the renderer can walk.
pub(crate) trait DumpNode<'a>: Copy {
    fn shape(self) -> Result<Shape<'a, Self>>;

    /// Identity used for cycle detection. `None` for nodes that cannot be
    /// part of a cycle.
    fn identity(self) -> Option<usize>;
}

impl<'a> Shape<'a, &'a Value> {
    fn of_value(value: &'a Value) -> Self {
        match value {
            Value::Null => Shape::Null,
            Value::Bool(b) => Shape::Bool(*b),
            Value::Int(i) => Shape::Int(*i),
            Value::BigInt(i) => Shape::BigInt(i),
            Value::Float(f) => Shape::Float(*f),
            Value::String(s) => Shape::String(s),
            Value::Sequence(seq) => Shape::Sequence(seq.iter().collect()),
            Value::Mapping(map) => Shape::Mapping(map.iter().collect()),
        }
    }
}

impl<'a, N> Shape<'a, N> {
    /// The shape of a non-composite value, with any node type.
    pub(crate) fn of_scalar(value: &'a Value) -> Option<Self> {
        Some(match value {
            Value::Null => Shape::Null,
            Value::Bool(b) => Shape::Bool(*b),
            Value::Int(i) => Shape::Int(*i),
            Value::BigInt(i) => Shape::BigInt(i),
            Value::Float(f) => Shape::Float(*f),
            Value::String(s) => Shape::String(s),
            Value::Sequence(_) | Value::Mapping(_) => return None,
        })
    }
}

impl<'a> DumpNode<'a> for &'a Value {
    fn shape(self) -> Result<Shape<'a, Self>> {
        Ok(Shape::of_value(self))
    }

    fn identity(self) -> Option<usize> {
        // owned trees cannot contain themselves
        None
    }
}

impl<'a> DumpNode<'a> for &'a Key {
    fn shape(self) -> Result<Shape<'a, Self>> {
        Ok(match self {
            Key::Null => Shape::Null,
            Key::Bool(b) => Shape::Bool(*b),
            Key::Int(i) => Shape::Int(*i),
            Key::BigInt(i) => Shape::BigInt(i),
            Key::Float(f) => Shape::Float(*f),
            Key::String(s) => Shape::String(s),
            Key::Tuple(items) => Shape::Sequence(items.iter().collect()),
            Key::Map(map) => Shape::Mapping(map.iter().collect()),
        })
    }

    fn identity(self) -> Option<usize> {
        None
    }
}

/// Renders a node to a string.
pub(crate) fn to_string<'a, N: DumpNode<'a>>(node: N, options: &DumpOptions) -> Result<String> {
    let mut dumper = Dumper::new(options);
    match options.mode {
        Mode::Machine => dumper.machine(node)?,
        Mode::Human => {
            dumper.human(node)?;
            dumper.out.push('\n');
        }
    }
    Ok(dumper.out)
}

/// Returns `true` if `text` can be written as a block-mapping key without
/// quotes.
///
/// # Examples
///
/// ```rust
/// use scdil::dump::is_bare_key;
///
/// assert!(is_bare_key("name_2", false));
/// assert!(is_bare_key("ключ", false));
/// assert!(!is_bare_key("ключ", true));
/// assert!(!is_bare_key("2name", false));
/// assert!(!is_bare_key("null", false));
/// assert!(!is_bare_key("a b", false));
/// ```
#[must_use]
pub fn is_bare_key(text: &str, escape_unicode: bool) -> bool {
    let mut chars = text.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    is_letter(first)
        && chars.all(|c| is_letter(c) || c.is_ascii_digit())
        && !RESERVED_WORDS.contains(&text)
        && (!escape_unicode || text.is_ascii())
}

/// Formats a float so that it reads back as the same float.
fn format_float(value: f64) -> String {
    if value.is_nan() {
        "nan".to_string()
    } else if value == f64::INFINITY {
        "inf".to_string()
    } else if value == f64::NEG_INFINITY {
        "-inf".to_string()
    } else {
        // Debug always keeps a '.' or an exponent
        format!("{:?}", value)
    }
}

fn needs_escape(ch: char, escape_unicode: bool) -> bool {
    is_control(ch) || (escape_unicode && !ch.is_ascii())
}

fn escape_into(out: &mut String, text: &str, escape_unicode: bool) {
    for ch in text.chars() {
        match ch {
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            c if needs_escape(c, escape_unicode) => {
                let code = c as u32;
                if code <= 0xFF {
                    out.push_str(&format!("\\x{:02x}", code));
                } else if code <= 0xFFFF {
                    out.push_str(&format!("\\u{:04x}", code));
                } else {
                    out.push_str(&format!("\\U{:08x}", code));
                }
            }
            c => out.push(c),
        }
    }
}

/// A string that renders as a run of line tokens in human mode.
fn is_multiline(text: &str) -> bool {
    text.contains('\n') && text != "\n"
}

struct Dumper<'o> {
    out: String,
    options: &'o DumpOptions,
    stack: Vec<usize>,
    depth: usize,
}

impl<'o> Dumper<'o> {
    fn new(options: &'o DumpOptions) -> Self {
        Dumper {
            out: String::new(),
            options,
            stack: Vec::new(),
            depth: 0,
        }
    }

    fn enter<'a, N: DumpNode<'a>>(&mut self, node: N) -> Result<()> {
        if let Some(id) = node.identity() {
            if self.stack.contains(&id) {
                return Err(Error::Cycle);
            }
            self.stack.push(id);
        }
        self.depth += 1;
        if self.depth > self.options.max_depth {
            return Err(Error::DepthLimit(self.options.max_depth));
        }
        Ok(())
    }

    fn leave<'a, N: DumpNode<'a>>(&mut self, node: N) {
        if node.identity().is_some() {
            self.stack.pop();
        }
        self.depth -= 1;
    }

    fn newline(&mut self, level: usize) {
        self.out.push('\n');
        let width = self.options.indent.max(1) * level;
        self.out.extend(std::iter::repeat(' ').take(width));
    }

    fn quoted(&mut self, text: &str) {
        self.out.push('"');
        escape_into(&mut self.out, text, self.options.escape_unicode);
        self.out.push('"');
    }

    /// Writes a non-composite shape in flow form.
    fn scalar<N>(&mut self, shape: &Shape<'_, N>) {
        match shape {
            Shape::Null => self.out.push_str("null"),
            Shape::Bool(true) => self.out.push_str("true"),
            Shape::Bool(false) => self.out.push_str("false"),
            Shape::Int(i) => self.out.push_str(&i.to_string()),
            Shape::BigInt(i) => self.out.push_str(&i.to_string()),
            Shape::Float(f) => self.out.push_str(&format_float(*f)),
            Shape::String(s) => self.quoted(s),
            Shape::Sequence(_) | Shape::Mapping(_) => {}
        }
    }

    fn machine<'a, N: DumpNode<'a>>(&mut self, node: N) -> Result<()> {
        match node.shape()? {
            Shape::Sequence(items) => {
                self.enter(node)?;
                self.out.push('[');
                for (i, item) in items.into_iter().enumerate() {
                    if i > 0 {
                        self.out.push(',');
                    }
                    self.machine(item)?;
                }
                self.out.push(']');
                self.leave(node);
            }
            Shape::Mapping(entries) => {
                self.enter(node)?;
                self.out.push('{');
                for (i, (key, value)) in entries.into_iter().enumerate() {
                    if i > 0 {
                        self.out.push(',');
                    }
                    self.machine(key)?;
                    self.out.push(':');
                    self.machine(value)?;
                }
                self.out.push('}');
                self.leave(node);
            }
            scalar => self.scalar(&scalar),
        }
        Ok(())
    }

    /// Writes a top-level value in human form, without the final newline.
    fn human<'a, N: DumpNode<'a>>(&mut self, node: N) -> Result<()> {
        match node.shape()? {
            Shape::String(s) if is_multiline(s) => self.block_string(s, 0),
            Shape::Sequence(items) if items.is_empty() => self.out.push_str("[]"),
            Shape::Sequence(items) => self.block_sequence(node, items, 0)?,
            Shape::Mapping(entries) if entries.is_empty() => self.out.push_str("{}"),
            Shape::Mapping(entries) => self.mapping(node, entries, 0)?,
            scalar => self.scalar(&scalar),
        }
        Ok(())
    }

    /// Writes the value following a `-` or `key:` at `level`.
    fn nested<'a, N: DumpNode<'a>>(&mut self, node: N, level: usize) -> Result<()> {
        match node.shape()? {
            Shape::String(s) if is_multiline(s) => {
                self.newline(level + 1);
                self.block_string(s, level + 1);
            }
            Shape::Sequence(items) if items.is_empty() => self.out.push_str(" []"),
            Shape::Sequence(items) => {
                self.newline(level + 1);
                self.block_sequence(node, items, level + 1)?;
            }
            Shape::Mapping(entries) if entries.is_empty() => self.out.push_str(" {}"),
            Shape::Mapping(entries) => {
                if entries.iter().all(|(key, _)| key.is_string()) {
                    self.newline(level + 1);
                } else {
                    self.out.push(' ');
                }
                self.mapping(node, entries, level + 1)?;
            }
            scalar => {
                self.out.push(' ');
                self.scalar(&scalar);
            }
        }
        Ok(())
    }

    fn block_string(&mut self, text: &str, level: usize) {
        let escape_unicode = self.options.escape_unicode;
        let escaped = text.chars().any(|c| c != '\n' && needs_escape(c, escape_unicode));
        for (i, line) in text.split('\n').enumerate() {
            if i > 0 {
                self.newline(level);
            }
            if escaped {
                self.out.push_str("\\|");
                escape_into(&mut self.out, line, escape_unicode);
            } else {
                self.out.push('|');
                self.out.push_str(line);
            }
        }
    }

    fn block_sequence<'a, N: DumpNode<'a>>(
        &mut self,
        node: N,
        items: Vec<N>,
        level: usize,
    ) -> Result<()> {
        self.enter(node)?;
        for (i, item) in items.into_iter().enumerate() {
            if i > 0 {
                self.newline(level);
            }
            self.out.push('-');
            self.nested(item, level)?;
        }
        self.leave(node);
        Ok(())
    }

    /// Writes a block mapping when every key is a string, and the bracketed
    /// literal form otherwise.
    fn mapping<'a, N: DumpNode<'a>>(
        &mut self,
        node: N,
        entries: Vec<(&'a Key, N)>,
        level: usize,
    ) -> Result<()> {
        let string_keyed: Option<Vec<(&'a str, N)>> = entries
            .iter()
            .map(|(key, value)| key.as_str().map(|s| (s, *value)))
            .collect();
        let Some(string_keyed) = string_keyed else {
            return self.literal_mapping(node, entries, level);
        };
        self.enter(node)?;
        for (i, (key, value)) in string_keyed.into_iter().enumerate() {
            if i > 0 {
                self.newline(level);
            }
            if is_bare_key(key, self.options.escape_unicode) {
                self.out.push_str(key);
            } else {
                self.quoted(key);
            }
            self.out.push(':');
            self.nested(value, level)?;
        }
        self.leave(node);
        Ok(())
    }

    /// Writes flow syntax spread over several lines, one element per line.
    fn literal<'a, N: DumpNode<'a>>(&mut self, node: N, level: usize) -> Result<()> {
        match node.shape()? {
            Shape::Sequence(items) if items.is_empty() => self.out.push_str("[]"),
            Shape::Sequence(items) => {
                self.enter(node)?;
                self.out.push('[');
                for item in items {
                    self.newline(level + 1);
                    self.literal(item, level + 1)?;
                    self.out.push(',');
                }
                self.newline(level);
                self.out.push(']');
                self.leave(node);
            }
            Shape::Mapping(entries) => self.literal_mapping(node, entries, level)?,
            scalar => self.scalar(&scalar),
        }
        Ok(())
    }

    fn literal_mapping<'a, N: DumpNode<'a>>(
        &mut self,
        node: N,
        entries: Vec<(&'a Key, N)>,
        level: usize,
    ) -> Result<()> {
        if entries.is_empty() {
            self.out.push_str("{}");
            return Ok(());
        }
        self.enter(node)?;
        self.out.push('{');
        for (key, value) in entries {
            self.newline(level + 1);
            self.literal(key, level + 1)?;
            self.out.push_str(": ");
            self.literal(value, level + 1)?;
            self.out.push(',');
        }
        self.newline(level);
        self.out.push('}');
        self.leave(node);
        Ok(())
    }
}
