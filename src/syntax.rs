//! SCDIL text format
//!
//! This module only holds documentation. It describes the syntax accepted by
//! [`load`](crate::load) and produced by [`dumps`](crate::dumps).
//!
//! # Overview
//!
//! A document is a single node. Nodes come in two styles which can be nested
//! inside each other, and the style is chosen by lookahead rather than by any
//! switch:
//!
//! - **Flow** values use brackets, braces and commas, much like JSON.
//! - **Block** values have no delimiters. Sibling elements must all start at
//!   the same column, and the first element of a run fixes that column.
//!
//! Positions in error messages are 0-based `line:column` pairs, with the
//! column counted in characters.
//!
//! # Scalars
//!
//! | Text | Value |
//! |------|-------|
//! | `null` | [`Value::Null`](crate::Value::Null) |
//! | `true`, `false` | [`Value::Bool`](crate::Value::Bool) |
//! | `42`, `-7`, `0x1F`, `0o17`, `0b101` | [`Value::Int`](crate::Value::Int), or [`Value::BigInt`](crate::Value::BigInt) outside `i64` |
//! | `1.5`, `-2e10`, `inf`, `-inf`, `nan` | [`Value::Float`](crate::Value::Float) |
//! | `"text"` | [`Value::String`](crate::Value::String) |
//!
//! A decimal literal is a float when it has a fractional part or an exponent.
//! Every base prefix must be followed by at least one digit.
//!
//! Quoted strings accept printable characters verbatim. Raw tabs and newlines
//! are not allowed; use escapes instead:
//!
//! ```text
//! \\  \"  \/  \b  \f  \n  \r  \t  \xHH  \uHHHH  \UHHHHHHHH
//! ```
//!
//! # Flow composites
//!
//! ```text
//! [1, 2, 3]
//! {"name": "scdil", 1: null,}
//! {[1, 2]: "tuple key", {"a": 1}: "map key"}
//! ```
//!
//! A trailing comma is optional. Any value may be a mapping key; sequences
//! and mappings used as keys become tuples and frozen maps.
//!
//! # Block composites
//!
//! ```text
//! - 1
//! - nested:
//!     - true
//! - [1, "inside", true]
//! ```
//!
//! A block sequence is a run of `-` at one column. A block mapping is a run
//! of `key:` at one column, where the key is a bare name (a letter followed by
//! letters and digits, not a reserved word) or a quoted string. A colon
//! directly followed by a letter or digit stays inside the name, so `ns:id: 1`
//! has the single key `"ns:id"`:
//!
//! ```text
//! name: "scdil"
//! "not a name": 1
//! nested:
//!   inner: [1, 2]
//! ```
//!
//! Block mapping keys are always strings.
//!
//! # Multi-line strings
//!
//! Lines starting with `|` are literal: their text is kept as is and joined
//! with newlines. Lines starting with `>` are folded: each line is trimmed of
//! spaces, consecutive non-blank lines are joined with one space, and a blank
//! line becomes a newline.
//!
//! ```text
//! |first line
//! |  second line
//! >folded into
//! >one line
//! ```
//!
//! `\|` and `\>` are the same, but process the escapes of quoted strings.
//! A run only continues while the line kind stays the same.
//!
//! # Comments
//!
//! `#` starts a comment that runs to the end of the line.
//!
//! # Output modes
//!
//! [`Mode::Machine`](crate::Mode::Machine) writes flow syntax on one line
//! with no added spaces. [`Mode::Human`](crate::Mode::Human) writes block
//! syntax for non-empty composites and multi-line strings, and ends with a
//! newline. Mappings with a non-string key are written in flow syntax spread
//! over several lines, since block mappings only have string keys.
//!
//! ```rust
//! use scdil::{dumps, scdil};
//!
//! let value = scdil!([1, null, 3e8, false, "x"]);
//! assert_eq!(dumps(&value).unwrap(), "- 1\n- null\n- 300000000.0\n- false\n- \"x\"\n");
//! ```
