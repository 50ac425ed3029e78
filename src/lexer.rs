//! Tokenizer for SCDIL text.
//!
//! The [`Lexer`] turns a string into a stream of [`Token`]s, each tagged with
//! the [`Position`] of its first character. Runs of spaces and newlines are
//! skipped, and `#` starts a comment that extends to the end of the line.
//!
//! Punctuation-like characters are disambiguated by one character of
//! lookahead:
//!
//! - `-` followed by a letter starts `-inf`, followed by a digit starts a
//!   number, and followed by whitespace, `#`, punctuation or end of input is a
//!   block-sequence [`TokenKind::Dash`]
//! - `+` followed by a letter starts `+inf`, anything else a number
//! - `\` is only valid before `|` or `>`, where it starts an escaped line
//!
//! ## Examples
//!
//! ```rust
//! use scdil::lexer::{Lexer, TokenKind};
//!
//! let kinds: Vec<TokenKind> = Lexer::new("- 0x1F # comment")
//!     .map(|token| token.map(|t| t.kind))
//!     .collect::<Result<_, _>>()
//!     .unwrap();
//! assert_eq!(kinds.len(), 2);
//! assert_eq!(kinds[0], TokenKind::Dash);
//! ```

use crate::{Error, Result};
use num_bigint::BigInt;
use std::fmt;

/// A zero-based source position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct Position {
    pub line: usize,
    /// Characters since the last newline.
    pub column: usize,
}

impl Position {
    #[must_use]
    pub const fn new(line: usize, column: usize) -> Self {
        Position { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// An integer literal, kept in `i64` whenever it fits.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Integer {
    Small(i64),
    Big(BigInt),
}

impl Integer {
    /// Parses an optionally signed run of digits in the given radix.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use scdil::lexer::Integer;
    ///
    /// assert_eq!(Integer::parse("-ff", 16), Some(Integer::Small(-255)));
    /// assert!(matches!(
    ///     Integer::parse("99999999999999999999", 10),
    ///     Some(Integer::Big(_))
    /// ));
    /// ```
    #[must_use]
    pub fn parse(text: &str, radix: u32) -> Option<Integer> {
        if let Ok(small) = i64::from_str_radix(text, radix) {
            return Some(Integer::Small(small));
        }
        let unsigned = text.strip_prefix('+').unwrap_or(text);
        BigInt::parse_bytes(unsigned.as_bytes(), radix).map(Integer::Big)
    }
}

/// Which of the four line-string forms a line token belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LineKind {
    /// `|`
    Literal,
    /// `>`
    Folded,
    /// `\|`
    EscapedLiteral,
    /// `\>`
    EscapedFolded,
}

impl LineKind {
    /// The prefix that introduces a line of this kind.
    #[must_use]
    pub const fn prefix(self) -> &'static str {
        match self {
            LineKind::Literal => "|",
            LineKind::Folded => ">",
            LineKind::EscapedLiteral => "\\|",
            LineKind::EscapedFolded => "\\>",
        }
    }

    #[must_use]
    pub const fn is_folded(self) -> bool {
        matches!(self, LineKind::Folded | LineKind::EscapedFolded)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum TokenKind {
    Null,
    Boolean(bool),
    Integer(Integer),
    Float(f64),
    String(String),
    Name(String),
    LiteralLine(String),
    FoldedLine(String),
    EscapedLiteralLine(String),
    EscapedFoldedLine(String),
    LBracket,
    RBracket,
    LCurly,
    RCurly,
    Comma,
    Colon,
    Dash,
}

impl TokenKind {
    /// Returns the line kind and text for the four line tokens.
    #[must_use]
    pub fn as_line(&self) -> Option<(LineKind, &str)> {
        match self {
            TokenKind::LiteralLine(s) => Some((LineKind::Literal, s)),
            TokenKind::FoldedLine(s) => Some((LineKind::Folded, s)),
            TokenKind::EscapedLiteralLine(s) => Some((LineKind::EscapedLiteral, s)),
            TokenKind::EscapedFoldedLine(s) => Some((LineKind::EscapedFolded, s)),
            _ => None,
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Null => write!(f, "null"),
            TokenKind::Boolean(b) => write!(f, "{}", b),
            TokenKind::Integer(Integer::Small(i)) => write!(f, "integer {}", i),
            TokenKind::Integer(Integer::Big(i)) => write!(f, "integer {}", i),
            TokenKind::Float(v) => write!(f, "float {:?}", v),
            TokenKind::String(s) => write!(f, "string {:?}", s),
            TokenKind::Name(s) => write!(f, "name {:?}", s),
            TokenKind::LiteralLine(s) => write!(f, "literal line {:?}", s),
            TokenKind::FoldedLine(s) => write!(f, "folded line {:?}", s),
            TokenKind::EscapedLiteralLine(s) => write!(f, "escaped literal line {:?}", s),
            TokenKind::EscapedFoldedLine(s) => write!(f, "escaped folded line {:?}", s),
            TokenKind::LBracket => write!(f, "'['"),
            TokenKind::RBracket => write!(f, "']'"),
            TokenKind::LCurly => write!(f, "'{{'"),
            TokenKind::RCurly => write!(f, "'}}'"),
            TokenKind::Comma => write!(f, "','"),
            TokenKind::Colon => write!(f, "':'"),
            TokenKind::Dash => write!(f, "'-'"),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub position: Position,
}

impl Token {
    /// The column the token starts at.
    #[inline]
    #[must_use]
    pub fn column(&self) -> usize {
        self.position.column
    }
}

/// Letters start names: ASCII letters, `_`, and everything from U+00A0 up.
#[inline]
pub fn is_letter(ch: char) -> bool {
    ch == '_' || ch.is_ascii_alphabetic() || ch >= '\u{A0}'
}

#[inline]
fn is_name_char(ch: char) -> bool {
    is_letter(ch) || ch.is_ascii_digit()
}

/// Characters allowed verbatim inside strings and lines.
#[inline]
pub fn is_printable(ch: char) -> bool {
    ('\u{20}'..'\u{7F}').contains(&ch) || ch >= '\u{A0}'
}

/// C0 and C1 control codes, including DEL.
#[inline]
pub fn is_control(ch: char) -> bool {
    ch < '\u{20}' || ('\u{7F}'..'\u{A0}').contains(&ch)
}

/// Words that lex as scalars rather than names.
pub const RESERVED_WORDS: [&str; 5] = ["null", "true", "false", "inf", "nan"];

/// The SCDIL tokenizer.
///
/// Yields `Result<Token>` items; the first error ends the stream.
pub struct Lexer<'a> {
    input: &'a str,
    offset: usize,
    line: usize,
    column: usize,
    start: Position,
    failed: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Lexer {
            input,
            offset: 0,
            line: 0,
            column: 0,
            start: Position::default(),
            failed: false,
        }
    }

    /// The position of the next unread character.
    #[must_use]
    pub fn current_position(&self) -> Position {
        Position::new(self.line, self.column)
    }

    fn peek_char(&self) -> Option<char> {
        self.input[self.offset..].chars().next()
    }

    fn peek_second(&self) -> Option<char> {
        self.input[self.offset..].chars().nth(1)
    }

    fn next_char(&mut self) -> Option<char> {
        let ch = self.peek_char()?;
        self.offset += ch.len_utf8();
        if ch == '\n' {
            self.line += 1;
            self.column = 0;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    fn error(&self, msg: impl Into<String>) -> Error {
        Error::lex(self.start, msg)
    }

    fn token(&self, kind: TokenKind) -> Token {
        log::trace!("token {} at {}", kind, self.start);
        Token {
            kind,
            position: self.start,
        }
    }

    fn skip_trivia(&mut self) {
        loop {
            match self.peek_char() {
                Some(' ') | Some('\n') => {
                    self.next_char();
                }
                Some('#') => {
                    while !matches!(self.peek_char(), Some('\n') | None) {
                        self.next_char();
                    }
                }
                _ => break,
            }
        }
    }

    /// Reads the next token, or `None` at end of input.
    pub fn next_token(&mut self) -> Result<Option<Token>> {
        self.skip_trivia();
        self.start = self.current_position();

        let Some(ch) = self.peek_char() else {
            return Ok(None);
        };

        let token = match ch {
            c if is_letter(c) => self.lex_name(),
            '-' => match self.peek_second() {
                Some(next) if is_letter(next) => self.lex_named_number(),
                None | Some(' ' | '\n' | '#' | '[' | ']' | '{' | '}' | ',' | ':') => {
                    self.punctuation(TokenKind::Dash)
                }
                Some(_) => self.lex_decimal(),
            },
            '+' => match self.peek_second() {
                Some(next) if is_letter(next) => self.lex_named_number(),
                _ => self.lex_decimal(),
            },
            '0' => match self.peek_second() {
                Some('x' | 'X') => self.lex_radix(16, "hexadecimal"),
                Some('o' | 'O') => self.lex_radix(8, "octal"),
                Some('b' | 'B') => self.lex_radix(2, "binary"),
                _ => self.lex_decimal(),
            },
            c if c.is_ascii_digit() => self.lex_decimal(),
            '"' => self.lex_string(),
            '|' => self.lex_line(LineKind::Literal),
            '>' => self.lex_line(LineKind::Folded),
            '\\' => match self.peek_second() {
                Some('|') => self.lex_line(LineKind::EscapedLiteral),
                Some('>') => self.lex_line(LineKind::EscapedFolded),
                _ => Err(self.error("unexpected character '\\'")),
            },
            '[' => self.punctuation(TokenKind::LBracket),
            ']' => self.punctuation(TokenKind::RBracket),
            '{' => self.punctuation(TokenKind::LCurly),
            '}' => self.punctuation(TokenKind::RCurly),
            ',' => self.punctuation(TokenKind::Comma),
            ':' => self.punctuation(TokenKind::Colon),
            c if is_control(c) => Err(self.error(format!(
                "control codes are not valid source characters, got {:?}",
                c
            ))),
            c => Err(self.error(format!("unexpected character {:?}", c))),
        }?;
        Ok(Some(token))
    }

    fn punctuation(&mut self, kind: TokenKind) -> Result<Token> {
        self.next_char();
        Ok(self.token(kind))
    }

    fn lex_name(&mut self) -> Result<Token> {
        let begin = self.offset;
        while let Some(ch) = self.peek_char() {
            if is_name_char(ch) {
                self.next_char();
            } else if ch == ':'
                && self.peek_second().is_some_and(is_name_char)
                && !RESERVED_WORDS.contains(&&self.input[begin..self.offset])
            {
                // `a:b` is one name; `null:1` stays a reserved word and a colon.
                self.next_char();
            } else {
                break;
            }
        }
        let kind = match &self.input[begin..self.offset] {
            "null" => TokenKind::Null,
            "true" => TokenKind::Boolean(true),
            "false" => TokenKind::Boolean(false),
            "inf" => TokenKind::Float(f64::INFINITY),
            "nan" => TokenKind::Float(f64::NAN),
            name => TokenKind::Name(name.to_string()),
        };
        Ok(self.token(kind))
    }

    fn lex_named_number(&mut self) -> Result<Token> {
        let begin = self.offset;
        self.next_char();
        while self.peek_char().is_some_and(is_letter) {
            self.next_char();
        }
        match &self.input[begin..self.offset] {
            "+inf" => Ok(self.token(TokenKind::Float(f64::INFINITY))),
            "-inf" => Ok(self.token(TokenKind::Float(f64::NEG_INFINITY))),
            other => Err(self.error(format!("{:?} is not a valid named number", other))),
        }
    }

    fn lex_radix(&mut self, radix: u32, name: &str) -> Result<Token> {
        // skip the "0x" style prefix
        self.next_char();
        self.next_char();
        let begin = self.offset;
        while self.peek_char().is_some_and(|c| c.is_digit(radix)) {
            self.next_char();
        }
        let digits = &self.input[begin..self.offset];
        if digits.is_empty() {
            return Err(self.error(format!(
                "at least one digit required in {} literal",
                name
            )));
        }
        let value = Integer::parse(digits, radix)
            .ok_or_else(|| self.error(format!("invalid {} literal", name)))?;
        Ok(self.token(TokenKind::Integer(value)))
    }

    fn consume_digits(&mut self) -> usize {
        let mut count = 0;
        while self.peek_char().is_some_and(|c| c.is_ascii_digit()) {
            self.next_char();
            count += 1;
        }
        count
    }

    fn lex_decimal(&mut self) -> Result<Token> {
        let begin = self.offset;
        let mut is_float = false;

        if matches!(self.peek_char(), Some('+' | '-')) {
            self.next_char();
        }
        if self.consume_digits() == 0 {
            return Err(self.error("at least one digit required in integral part of decimal literal"));
        }
        if self.peek_char() == Some('.') {
            is_float = true;
            self.next_char();
            self.consume_digits();
        }
        if matches!(self.peek_char(), Some('e' | 'E')) {
            is_float = true;
            self.next_char();
            if matches!(self.peek_char(), Some('+' | '-')) {
                self.next_char();
            }
            if self.consume_digits() == 0 {
                return Err(self.error("at least one digit required in exponent part of decimal literal"));
            }
        }

        let text = &self.input[begin..self.offset];
        let kind = if is_float {
            let value = text
                .parse::<f64>()
                .map_err(|_| self.error(format!("invalid float literal {:?}", text)))?;
            TokenKind::Float(value)
        } else {
            let value = Integer::parse(text, 10)
                .ok_or_else(|| self.error(format!("invalid integer literal {:?}", text)))?;
            TokenKind::Integer(value)
        };
        Ok(self.token(kind))
    }

    fn lex_string(&mut self) -> Result<Token> {
        self.next_char();
        let mut value = String::new();
        loop {
            match self.peek_char() {
                Some('"') => {
                    self.next_char();
                    break;
                }
                Some('\\') => self.consume_escape(&mut value)?,
                Some(ch) if is_printable(ch) => {
                    self.next_char();
                    value.push(ch);
                }
                Some('\n') | None => return Err(self.error("unterminated string literal")),
                Some(ch) => {
                    return Err(self.error(format!(
                        "control codes are not valid string characters, got {:?}",
                        ch
                    )))
                }
            }
        }
        Ok(self.token(TokenKind::String(value)))
    }

    fn lex_line(&mut self, kind: LineKind) -> Result<Token> {
        let escaped = matches!(kind, LineKind::EscapedLiteral | LineKind::EscapedFolded);
        // consume the prefix
        for _ in 0..kind.prefix().len() {
            self.next_char();
        }
        let mut value = String::new();
        loop {
            match self.peek_char() {
                Some('\n') | None => break,
                Some('\\') if escaped => self.consume_escape(&mut value)?,
                Some(ch) if is_printable(ch) => {
                    self.next_char();
                    value.push(ch);
                }
                Some(ch) => {
                    return Err(self.error(format!(
                        "control codes are not valid line characters, got {:?}",
                        ch
                    )))
                }
            }
        }
        let kind = match kind {
            LineKind::Literal => TokenKind::LiteralLine(value),
            LineKind::Folded => TokenKind::FoldedLine(value),
            LineKind::EscapedLiteral => TokenKind::EscapedLiteralLine(value),
            LineKind::EscapedFolded => TokenKind::EscapedFoldedLine(value),
        };
        Ok(self.token(kind))
    }

    fn consume_escape(&mut self, out: &mut String) -> Result<()> {
        self.next_char();
        let ch = match self.next_char() {
            Some('\\') => '\\',
            Some('"') => '"',
            Some('/') => '/',
            Some('b') => '\u{08}',
            Some('f') => '\u{0C}',
            Some('n') => '\n',
            Some('r') => '\r',
            Some('t') => '\t',
            Some('x') => self.consume_hex(2)?,
            Some('u') => self.consume_hex(4)?,
            Some('U') => self.consume_hex(8)?,
            Some(other) => return Err(self.error(format!("invalid escape code '\\{}'", other))),
            None => return Err(self.error("unterminated escape sequence")),
        };
        out.push(ch);
        Ok(())
    }

    fn consume_hex(&mut self, width: usize) -> Result<char> {
        let mut code = 0u32;
        for _ in 0..width {
            let digit = self
                .peek_char()
                .and_then(|c| c.to_digit(16))
                .ok_or_else(|| self.error("expecting hex character as part of escape sequence"))?;
            self.next_char();
            code = code * 16 + digit;
        }
        char::from_u32(code)
            .ok_or_else(|| self.error(format!("invalid code point U+{:X} in escape", code)))
    }
}

impl Iterator for Lexer<'_> {
    type Item = Result<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        match self.next_token() {
            Ok(token) => token.map(Ok),
            Err(err) => {
                self.failed = true;
                Some(Err(err))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokenize(source: &str) -> Result<Vec<Token>> {
        Lexer::new(source).collect()
    }

    fn single(source: &str) -> TokenKind {
        let tokens = tokenize(source).unwrap();
        assert_eq!(tokens.len(), 1, "expected one token from {:?}", source);
        tokens.into_iter().next().unwrap().kind
    }

    fn kinds(source: &str) -> Vec<TokenKind> {
        tokenize(source).unwrap().into_iter().map(|t| t.kind).collect()
    }

    fn fails(source: &str) -> bool {
        tokenize(source).is_err()
    }

    #[test]
    fn test_names_and_reserved_words() {
        assert_eq!(single("null"), TokenKind::Null);
        assert_eq!(single("true"), TokenKind::Boolean(true));
        assert_eq!(single("false"), TokenKind::Boolean(false));
        assert_eq!(single("inf"), TokenKind::Float(f64::INFINITY));
        assert!(matches!(single("nan"), TokenKind::Float(f) if f.is_nan()));
        assert_eq!(
            single("_GeorgeCostanza94"),
            TokenKind::Name("_GeorgeCostanza94".to_string())
        );
        assert_eq!(single("nullable"), TokenKind::Name("nullable".to_string()));
        assert_eq!(single("ℑ⠧♴ⱳ"), TokenKind::Name("ℑ⠧♴ⱳ".to_string()));
    }

    #[test]
    fn test_named_numbers() {
        assert_eq!(single("+inf"), TokenKind::Float(f64::INFINITY));
        assert_eq!(single("-inf"), TokenKind::Float(f64::NEG_INFINITY));
        assert!(fails("-one"));
        assert!(fails("+nan"));
    }

    #[test]
    fn test_integers() {
        assert_eq!(single("0"), TokenKind::Integer(Integer::Small(0)));
        assert_eq!(single("-1"), TokenKind::Integer(Integer::Small(-1)));
        assert_eq!(single("+01"), TokenKind::Integer(Integer::Small(1)));
        assert_eq!(single("0123"), TokenKind::Integer(Integer::Small(123)));
        assert_eq!(single("0x123"), TokenKind::Integer(Integer::Small(0x123)));
        assert_eq!(single("0o00142"), TokenKind::Integer(Integer::Small(0o142)));
        assert_eq!(single("0B110101"), TokenKind::Integer(Integer::Small(0b110101)));
        assert!(fails("+-"));
        assert!(fails("0XJ6"));
        assert!(fails("0oDEAD"));
        assert!(fails("0b2"));
    }

    #[test]
    fn test_big_integers() {
        let big: BigInt = "123456789012345678901234567890".parse().unwrap();
        assert_eq!(
            single("123456789012345678901234567890"),
            TokenKind::Integer(Integer::Big(big.clone()))
        );
        assert_eq!(
            single("+123456789012345678901234567890"),
            TokenKind::Integer(Integer::Big(big.clone()))
        );
        assert_eq!(
            single("-123456789012345678901234567890"),
            TokenKind::Integer(Integer::Big(-big))
        );
        assert_eq!(
            single("0xFFFFFFFFFFFFFFFFFF"),
            TokenKind::Integer(Integer::Big(BigInt::from(0xFFFF_FFFF_FFFF_FFFF_FFu128)))
        );
    }

    #[test]
    fn test_floats() {
        assert_eq!(single("0."), TokenKind::Float(0.0));
        assert_eq!(single("0.789123"), TokenKind::Float(0.789123));
        assert_eq!(single("+0e0"), TokenKind::Float(0.0));
        assert_eq!(single("0e-1"), TokenKind::Float(0.0));
        assert_eq!(single("0.e0"), TokenKind::Float(0.0));
        assert_eq!(single("-0123.123e+123"), TokenKind::Float(-0123.123e123));
        assert!(fails("0eb"));
    }

    #[test]
    fn test_strings() {
        assert_eq!(single("\"abc\""), TokenKind::String("abc".to_string()));
        assert_eq!(
            single(r#""\\\"\/\b\f\n\r\t""#),
            TokenKind::String("\\\"/\u{08}\u{0C}\n\r\t".to_string())
        );
        assert_eq!(
            single(r#""\x7F\u0Fa9\U0001F6a6""#),
            TokenKind::String("\u{7F}\u{0FA9}\u{1F6A6}".to_string())
        );
        assert!(fails("\"whoops"));
        assert!(fails("\"whoops\n\""));
        assert!(fails("\"whoops\t\""));
        assert!(fails(r#""\j""#));
        assert!(fails(r#""\xM0"#));
        assert!(fails(r#""\uD800""#));
    }

    #[test]
    fn test_lines() {
        assert_eq!(
            single("|wow \\x76\n"),
            TokenKind::LiteralLine("wow \\x76".to_string())
        );
        assert_eq!(
            single(">   wow \\x76    \n"),
            TokenKind::FoldedLine("   wow \\x76    ".to_string())
        );
        assert_eq!(single(">   \n"), TokenKind::FoldedLine("   ".to_string()));
        assert_eq!(
            single("\\|wow \\x76"),
            TokenKind::EscapedLiteralLine("wow v".to_string())
        );
        assert_eq!(
            single("\\>   wow \\x76    \n"),
            TokenKind::EscapedFoldedLine("   wow v    ".to_string())
        );
        assert_eq!(single("|# not a comment"), TokenKind::LiteralLine("# not a comment".to_string()));
        assert!(fails("|\t\n"));
        assert!(fails(">\t\n"));
        assert!(fails("\\|\t\n"));
        assert!(fails("\\>\t\n"));
        assert!(fails("\\x"));
    }

    #[test]
    fn test_punctuation() {
        assert_eq!(single("["), TokenKind::LBracket);
        assert_eq!(single("]"), TokenKind::RBracket);
        assert_eq!(single("{"), TokenKind::LCurly);
        assert_eq!(single("}"), TokenKind::RCurly);
        assert_eq!(single(":"), TokenKind::Colon);
        assert_eq!(single(","), TokenKind::Comma);
        assert_eq!(single("- "), TokenKind::Dash);
        assert_eq!(single("-"), TokenKind::Dash);
        assert_eq!(single("-\n"), TokenKind::Dash);
    }

    #[test]
    fn test_comments_and_whitespace() {
        assert_eq!(
            single(" \n   # skip this\n123 #value is 123"),
            TokenKind::Integer(Integer::Small(123))
        );
        assert!(fails("\tinvalid"));
        assert!(fails("$invalid"));
        assert!(fails("\r\n"));
    }

    #[test]
    fn test_positions() {
        let tokens = tokenize("a:\n  - 1\n  -  \"x\"").unwrap();
        let positions: Vec<Position> = tokens.iter().map(|t| t.position).collect();
        assert_eq!(
            positions,
            vec![
                Position::new(0, 0),
                Position::new(0, 1),
                Position::new(1, 2),
                Position::new(1, 4),
                Position::new(2, 2),
                Position::new(2, 5),
            ]
        );
    }

    #[test]
    fn test_columns_count_characters() {
        let tokens = tokenize("ΩΩ: 1").unwrap();
        assert_eq!(tokens[1].position, Position::new(0, 2));
    }

    #[test]
    fn test_error_reports_lexeme_start() {
        let err = tokenize("[1,\n  \"abc\\q\"]").unwrap_err();
        assert_eq!(err.position(), Some(Position::new(1, 2)));
        let err = tokenize("  0x").unwrap_err();
        assert_eq!(err.position(), Some(Position::new(0, 2)));
    }

    #[test]
    fn test_current_position_tracks_reads() {
        let mut lexer = Lexer::new("ab\n  1");
        assert_eq!(lexer.current_position(), Position::new(0, 0));
        lexer.next_token().unwrap();
        assert_eq!(lexer.current_position(), Position::new(0, 2));
        lexer.next_token().unwrap();
        assert_eq!(lexer.current_position(), Position::new(1, 3));
    }

    #[test]
    fn test_colon_inside_names() {
        assert_eq!(single("a:b"), TokenKind::Name("a:b".to_string()));
        assert_eq!(single("ns:key:2"), TokenKind::Name("ns:key:2".to_string()));

        assert_eq!(
            kinds("a:b: 1"),
            vec![
                TokenKind::Name("a:b".to_string()),
                TokenKind::Colon,
                TokenKind::Integer(Integer::Small(1)),
            ]
        );

        assert_eq!(kinds("a: b")[1], TokenKind::Colon);

        assert_eq!(
            kinds("{null:true}"),
            vec![
                TokenKind::LCurly,
                TokenKind::Null,
                TokenKind::Colon,
                TokenKind::Boolean(true),
                TokenKind::RCurly,
            ]
        );
    }

    #[test]
    fn test_iterator_stops_after_error() {
        let mut lexer = Lexer::new("1 $ 2");
        assert!(lexer.next().unwrap().is_ok());
        assert!(lexer.next().unwrap().is_err());
        assert!(lexer.next().is_none());
    }
}
