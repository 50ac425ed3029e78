//! # scdil
//!
//! A reader and writer for SCDIL, a data-interchange language with two
//! syntaxes that can be mixed freely in one document:
//!
//! - a **flow** syntax with explicit brackets and commas, close to JSON
//! - a **block** syntax where nesting is given by the column at which sibling
//!   elements start, close to YAML
//!
//! Documents load into a [`Value`], and any [`Value`] dumps back to text in
//! either [`Mode`]. Composite mapping keys are supported: sequences and
//! mappings on the key side become immutable [`Key::Tuple`] and
//! [`Key::Map`] values.
//!
//! ## Quick Start
//!
//! ```rust
//! use scdil::{dumps, load, scdil};
//!
//! let value = load("a: 1\nb:\n  c: 1\n").unwrap();
//! assert_eq!(value, scdil!({"a": 1, "b": {"c": 1}}));
//! assert_eq!(dumps(&value).unwrap(), "a: 1\nb:\n  c: 1\n");
//! ```
//!
//! ### Serde
//!
//! Any `Serialize`/`Deserialize` type can go through the value model:
//!
//! ```rust
//! use scdil::{from_str, to_string};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct User {
//!     id: u32,
//!     name: String,
//!     tags: Vec<String>,
//! }
//!
//! let user = User { id: 7, name: "Ada".to_string(), tags: vec!["admin".to_string()] };
//! let text = to_string(&user).unwrap();
//! assert_eq!(text, "id: 7\nname: \"Ada\"\ntags:\n  - \"admin\"\n");
//! let back: User = from_str(&text).unwrap();
//! assert_eq!(user, back);
//! ```
//!
//! ### Shared structures
//!
//! Owned values are trees. Structures with sharing or cycles are built in a
//! [`Graph`], which rejects cycles on dump with [`Error::Cycle`].
//!
//! ## Pipeline
//!
//! text → [`lexer`] → [`parser`] → [`eval`] → [`Value`] → [`dump`] → text
//!
//! See [`syntax`] for a description of the text format.
//!
//! ## Logging
//!
//! Entry points log at `debug` level and the lexer logs each token at `trace`
//! level through the [`log`] facade. No logger is installed by this crate.

pub mod ast;
pub mod de;
pub mod dump;
pub mod error;
pub mod eval;
pub mod frozen;
pub mod graph;
pub mod lexer;
pub mod macros;
pub mod map;
pub mod options;
pub mod parser;
pub mod ser;
pub mod syntax;
pub mod value;

pub use de::from_value;
pub use error::{Category, Error, Result};
pub use eval::evaluate;
pub use frozen::FrozenMap;
pub use graph::{Graph, Handle};
pub use lexer::Position;
pub use map::Mapping;
pub use options::{DumpOptions, LoadOptions, Mode};
pub use ser::{to_value, ValueSerializer};
pub use value::{Key, Value};

use log::debug;
use parser::Parser;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io;

/// Parses text into a syntax tree without evaluating it.
///
/// # Examples
///
/// ```rust
/// use scdil::ast::{Block, Node};
/// use scdil::parse;
///
/// let node = parse("- 1\n- 2\n").unwrap();
/// assert!(matches!(node, Node::Block(Block::Sequence(_))));
/// ```
///
/// # Errors
///
/// Returns [`Error::Lex`] or [`Error::Parse`] with the offending position.
pub fn parse(input: &str) -> Result<ast::Node> {
    debug!("parsing {} bytes", input.len());
    Parser::new(input)?.parse()
}

/// Loads a document into a [`Value`].
///
/// # Examples
///
/// ```rust
/// use scdil::{load, Key, Value};
///
/// let value = load("{{}: null, [1, 2, 3]: null}").unwrap();
/// let map = value.as_mapping().unwrap();
/// assert_eq!(map.len(), 2);
/// assert_eq!(
///     map.get(&Key::Tuple(vec![Key::Int(1), Key::Int(2), Key::Int(3)])),
///     Some(&Value::Null)
/// );
/// ```
///
/// # Errors
///
/// Returns [`Error::Lex`] or [`Error::Parse`] for malformed input.
pub fn load(input: &str) -> Result<Value> {
    load_with_options(input, LoadOptions::default())
}

/// Loads a document with custom options.
///
/// # Errors
///
/// Returns [`Error::Lex`] or [`Error::Parse`] for malformed input, including
/// nesting deeper than `options.max_depth`.
pub fn load_with_options(input: &str, options: LoadOptions) -> Result<Value> {
    debug!(
        "loading {} bytes (max depth {})",
        input.len(),
        options.max_depth
    );
    let node = Parser::with_max_depth(input, options.max_depth)?.parse()?;
    Ok(evaluate(node))
}

/// Loads a document from UTF-8 bytes.
///
/// # Errors
///
/// Returns [`Error::Io`] if the bytes are not UTF-8, otherwise as [`load`].
pub fn load_slice(input: &[u8]) -> Result<Value> {
    let text = std::str::from_utf8(input).map_err(|e| Error::io(&e.to_string()))?;
    load(text)
}

/// Loads a document from a reader.
///
/// # Examples
///
/// ```rust
/// use scdil::{load_reader, Value};
/// use std::io::Cursor;
///
/// let value = load_reader(Cursor::new(b"[1, 2]")).unwrap();
/// assert_eq!(value, Value::Sequence(vec![1.into(), 2.into()]));
/// ```
///
/// # Errors
///
/// Returns [`Error::Io`] if reading fails, otherwise as [`load`].
pub fn load_reader<R: io::Read>(mut reader: R) -> Result<Value> {
    let mut text = String::new();
    reader
        .read_to_string(&mut text)
        .map_err(|e| Error::io(&e.to_string()))?;
    load(&text)
}

/// Dumps a value in human mode.
///
/// # Errors
///
/// Returns [`Error::DepthLimit`] if the value nests deeper than the default
/// limit.
pub fn dumps(value: &Value) -> Result<String> {
    dumps_with_options(value, DumpOptions::default())
}

/// Dumps a value with custom options.
///
/// # Examples
///
/// ```rust
/// use scdil::{dumps_with_options, DumpOptions, Value};
///
/// assert_eq!(dumps_with_options(&Value::Float(f64::NAN), DumpOptions::machine()).unwrap(), "nan");
/// assert_eq!(dumps_with_options(&Value::Float(f64::INFINITY), DumpOptions::machine()).unwrap(), "inf");
/// ```
///
/// # Errors
///
/// Returns [`Error::DepthLimit`] if the value nests deeper than
/// `options.max_depth`.
pub fn dumps_with_options(value: &Value, options: DumpOptions) -> Result<String> {
    debug!("dumping value in {:?} mode", options.mode);
    dump::to_string(value, &options)
}

/// Dumps a value to a writer.
///
/// # Errors
///
/// Returns [`Error::Io`] if writing fails, otherwise as
/// [`dumps_with_options`].
pub fn dump<W: io::Write>(mut writer: W, value: &Value, options: DumpOptions) -> Result<()> {
    let text = dumps_with_options(value, options)?;
    writer
        .write_all(text.as_bytes())
        .map_err(|e| Error::io(&e.to_string()))
}

/// Serializes any `T: Serialize` as human-mode text.
///
/// # Errors
///
/// Returns [`Error::UnsupportedType`] for byte arrays.
pub fn to_string<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    to_string_with_options(value, DumpOptions::default())
}

/// Serializes any `T: Serialize` with custom options.
///
/// # Examples
///
/// ```rust
/// use scdil::{to_string_with_options, DumpOptions};
/// use std::collections::BTreeMap;
///
/// let mut scores = BTreeMap::new();
/// scores.insert("b", 2);
/// scores.insert("a", 1);
/// let text = to_string_with_options(&scores, DumpOptions::machine()).unwrap();
/// assert_eq!(text, "{\"a\":1,\"b\":2}");
/// ```
///
/// # Errors
///
/// Returns [`Error::UnsupportedType`] for byte arrays.
pub fn to_string_with_options<T>(value: &T, options: DumpOptions) -> Result<String>
where
    T: ?Sized + Serialize,
{
    dumps_with_options(&to_value(value)?, options)
}

/// Serializes any `T: Serialize` to a writer in human mode.
///
/// # Errors
///
/// Returns an error if serialization or writing fails.
pub fn to_writer<W, T>(writer: W, value: &T) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    dump(writer, &to_value(value)?, DumpOptions::default())
}

/// Deserializes an instance of type `T` from SCDIL text.
///
/// # Errors
///
/// Returns a syntax error for malformed text and [`Error::Custom`] if the
/// document does not match `T`.
pub fn from_str<T: DeserializeOwned>(input: &str) -> Result<T> {
    from_value(load(input)?)
}

/// Deserializes an instance of type `T` from UTF-8 bytes.
///
/// # Errors
///
/// As [`from_str`], plus [`Error::Io`] for invalid UTF-8.
pub fn from_slice<T: DeserializeOwned>(input: &[u8]) -> Result<T> {
    from_value(load_slice(input)?)
}

/// Deserializes an instance of type `T` from a reader.
///
/// # Errors
///
/// As [`from_str`], plus [`Error::Io`] if reading fails.
pub fn from_reader<R, T>(reader: R) -> Result<T>
where
    R: io::Read,
    T: DeserializeOwned,
{
    from_value(load_reader(reader)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Point {
        x: i32,
        y: i32,
    }

    #[test]
    fn test_serde_round_trip_both_modes() {
        let points = vec![Point { x: 1, y: 2 }, Point { x: -3, y: 4 }];
        for options in [DumpOptions::machine(), DumpOptions::human()] {
            let text = to_string_with_options(&points, options).unwrap();
            let back: Vec<Point> = from_str(&text).unwrap();
            assert_eq!(points, back);
        }
    }

    #[test]
    fn test_writer_and_reader() {
        let mut buffer = Vec::new();
        to_writer(&mut buffer, &Point { x: 5, y: 6 }).unwrap();
        assert_eq!(buffer, b"x: 5\ny: 6\n");
        let point: Point = from_reader(buffer.as_slice()).unwrap();
        assert_eq!(point, Point { x: 5, y: 6 });
        let point: Point = from_slice(b"{\"x\": 5, \"y\": 6}").unwrap();
        assert_eq!(point, Point { x: 5, y: 6 });
    }

    #[test]
    fn test_invalid_utf8() {
        let err = load_slice(&[0xff, 0xfe]).unwrap_err();
        assert_eq!(err.category(), Category::Io);
    }

    #[test]
    fn test_load_depth_option() {
        let options = LoadOptions::new().with_max_depth(1);
        assert!(load_with_options("[1]", options.clone()).is_ok());
        assert!(load_with_options("[[1]]", options).is_err());
    }

    #[test]
    fn test_dump_to_writer() {
        let mut out = Vec::new();
        dump(&mut out, &crate::scdil!([1, 2]), DumpOptions::machine()).unwrap();
        assert_eq!(out, b"[1,2]");
    }
}
