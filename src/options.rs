//! Configuration options for loading and dumping.
//!
//! - [`Mode`]: machine (compact flow) or human (indented block) output
//! - [`DumpOptions`]: output mode, indentation, unicode escaping, depth limit
//! - [`LoadOptions`]: depth limit for parsing
//!
//! ## Examples
//!
//! ```rust
//! use scdil::{dumps_with_options, DumpOptions, Value};
//!
//! let value = Value::from(vec![Value::from(1), Value::from(2)]);
//!
//! let machine = dumps_with_options(&value, DumpOptions::machine()).unwrap();
//! assert_eq!(machine, "[1,2]");
//!
//! let human = dumps_with_options(&value, DumpOptions::human()).unwrap();
//! assert_eq!(human, "- 1\n- 2\n");
//! ```

/// Default maximum number of nested composite levels.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Output style of the dumper.
///
/// # Examples
///
/// ```rust
/// use scdil::Mode;
///
/// assert_eq!(Mode::default(), Mode::Human);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Mode {
    /// Compact flow syntax on a single line, no trailing newline.
    Machine,
    /// Indented block syntax ending with a newline.
    #[default]
    Human,
}

/// Configuration options for dumping values.
///
/// # Examples
///
/// ```rust
/// use scdil::{DumpOptions, Mode};
///
/// let options = DumpOptions::human()
///     .with_indent(4)
///     .with_escape_unicode(true);
/// assert_eq!(options.mode, Mode::Human);
/// assert_eq!(options.indent, 4);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct DumpOptions {
    pub mode: Mode,
    pub indent: usize,
    pub escape_unicode: bool,
    pub max_depth: usize,
}

impl Default for DumpOptions {
    fn default() -> Self {
        DumpOptions {
            mode: Mode::default(),
            indent: 2,
            escape_unicode: false,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl DumpOptions {
    /// Creates default options (human mode, 2-space indent).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options for compact flow output.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use scdil::{DumpOptions, Mode};
    ///
    /// assert_eq!(DumpOptions::machine().mode, Mode::Machine);
    /// ```
    #[must_use]
    pub fn machine() -> Self {
        DumpOptions {
            mode: Mode::Machine,
            ..Default::default()
        }
    }

    /// Creates options for indented block output.
    #[must_use]
    pub fn human() -> Self {
        DumpOptions {
            mode: Mode::Human,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets the number of spaces per nesting level in human mode.
    ///
    /// Values below 1 are treated as 1, since nested blocks must start at a
    /// column different from their parent.
    #[must_use]
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    /// Escapes every non-ASCII character in quoted strings and escaped lines.
    #[must_use]
    pub fn with_escape_unicode(mut self, escape_unicode: bool) -> Self {
        self.escape_unicode = escape_unicode;
        self
    }

    /// Sets the maximum number of nested composite levels.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

/// Configuration options for loading documents.
///
/// # Examples
///
/// ```rust
/// use scdil::{load_with_options, LoadOptions};
///
/// let options = LoadOptions::new().with_max_depth(2);
/// assert!(load_with_options("[[1]]", options.clone()).is_ok());
/// assert!(load_with_options("[[[1]]]", options).is_err());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct LoadOptions {
    pub max_depth: usize,
}

impl Default for LoadOptions {
    fn default() -> Self {
        LoadOptions {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl LoadOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum number of nested composite levels.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = DumpOptions::new();
        assert_eq!(options.mode, Mode::Human);
        assert_eq!(options.indent, 2);
        assert!(!options.escape_unicode);
        assert_eq!(options.max_depth, DEFAULT_MAX_DEPTH);
        assert_eq!(LoadOptions::new().max_depth, DEFAULT_MAX_DEPTH);
    }

    #[test]
    fn test_builders() {
        let options = DumpOptions::machine()
            .with_indent(3)
            .with_escape_unicode(true)
            .with_max_depth(8);
        assert_eq!(options.mode, Mode::Machine);
        assert_eq!(options.indent, 3);
        assert!(options.escape_unicode);
        assert_eq!(options.max_depth, 8);
        assert_eq!(options.with_mode(Mode::Human).mode, Mode::Human);
    }
}
