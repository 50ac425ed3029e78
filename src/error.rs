//! Error types for loading and dumping SCDIL.
//!
//! Every failure aborts the whole load or dump call; there is no partial
//! result. Errors fall into a small number of categories so that callers can
//! tell malformed input apart from values the format cannot represent:
//!
//! - **Lex errors**: invalid characters, unterminated strings or lines,
//!   invalid escapes, malformed numeric literals
//! - **Parse errors**: unexpected tokens, missing delimiters, missing values,
//!   trailing tokens, input nested too deeply
//! - **Dump errors**: unsupported value kinds, cyclic structures, values
//!   nested too deeply
//! - **I/O errors**: reader or writer failures
//! - **Data errors**: serde conversion failures and graph misuse
//!
//! Positions are zero-based `(line, column)` pairs, the column counted in
//! characters since the last newline.
//!
//! ## Examples
//!
//! ```rust
//! use scdil::{load, Category};
//!
//! let err = load("[1, 2").unwrap_err();
//! assert_eq!(err.category(), Category::Parse);
//! assert_eq!(err.position().map(|p| p.line), Some(0));
//! ```

use crate::lexer::Position;
use std::fmt;
use thiserror::Error;

/// All errors produced by this crate.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Invalid input at the character level.
    #[error("lex error at line {line}, column {column}: {msg}")]
    Lex {
        line: usize,
        column: usize,
        msg: String,
    },

    /// Input that tokenizes but does not form a document.
    #[error("parse error at line {line}, column {column}: {msg}")]
    Parse {
        line: usize,
        column: usize,
        msg: String,
    },

    /// A value kind that has no representation in the format.
    #[error("unsupported type: {0}")]
    UnsupportedType(String),

    /// A composite that contains itself.
    #[error("cannot dump recursive value")]
    Cycle,

    /// Nesting deeper than the configured limit while dumping.
    #[error("value nested deeper than {0} levels")]
    DepthLimit(usize),

    /// A graph handle used with the wrong kind of node or the wrong graph.
    #[error("invalid handle: {0}")]
    InvalidHandle(String),

    /// Reading or writing failed.
    #[error("IO error: {0}")]
    Io(String),

    /// Raised through serde.
    #[error("{0}")]
    Custom(String),
}

/// Coarse classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Lex,
    Parse,
    Dump,
    Io,
    Data,
}

impl Error {
    /// Creates a lex error at the start of the offending lexeme.
    pub fn lex(position: Position, msg: impl Into<String>) -> Self {
        Error::Lex {
            line: position.line,
            column: position.column,
            msg: msg.into(),
        }
    }

    /// Creates a parse error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use scdil::{Error, Position};
    ///
    /// let err = Error::parse(Position::new(3, 4), "expected ':'");
    /// assert!(err.to_string().contains("line 3, column 4"));
    /// ```
    pub fn parse(position: Position, msg: impl Into<String>) -> Self {
        Error::Parse {
            line: position.line,
            column: position.column,
            msg: msg.into(),
        }
    }

    pub fn unsupported_type(msg: &str) -> Self {
        Error::UnsupportedType(msg.to_string())
    }

    pub fn invalid_handle(msg: impl Into<String>) -> Self {
        Error::InvalidHandle(msg.into())
    }

    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }

    /// Creates a custom error with a display message.
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Returns the category of this error.
    #[must_use]
    pub fn category(&self) -> Category {
        match self {
            Error::Lex { .. } => Category::Lex,
            Error::Parse { .. } => Category::Parse,
            Error::UnsupportedType(_) | Error::Cycle | Error::DepthLimit(_) => Category::Dump,
            Error::Io(_) => Category::Io,
            Error::InvalidHandle(_) | Error::Custom(_) => Category::Data,
        }
    }

    /// Returns `true` for errors caused by malformed input text.
    #[must_use]
    pub fn is_syntax(&self) -> bool {
        matches!(self.category(), Category::Lex | Category::Parse)
    }

    /// Returns the source position for lex and parse errors.
    #[must_use]
    pub fn position(&self) -> Option<Position> {
        match self {
            Error::Lex { line, column, .. } | Error::Parse { line, column, .. } => {
                Some(Position::new(*line, *column))
            }
            _ => None,
        }
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
