//! Recursive-descent parser for both the flow and the block syntax.
//!
//! Every block production takes an optional required column. `None` accepts
//! whatever column the first candidate token sits at and fixes it for the rest
//! of the run; every later sibling must start at exactly that column, and the
//! first token that does not (or that has a different kind) ends the run
//! without being consumed. Nested nodes after `-` and `key:` are parsed with
//! `None` again, which is what lets a nested construct pick its own column.
//!
//! ```rust
//! use scdil::ast::{Block, Node};
//! use scdil::parse;
//!
//! let node = parse("a: 1\nb:\n  - \"x\"\n").unwrap();
//! match node {
//!     Node::Block(Block::Mapping(map)) => assert_eq!(map.elements.len(), 2),
//!     other => panic!("unexpected node {:?}", other),
//! }
//! ```

use crate::ast::{
    Block, BlockKey, BlockMapping, BlockMappingElement, BlockSequence, BlockSequenceElement,
    BlockString, Composite, FlowValue, Line, Mapping, MappingElement, Node, Scalar, ScalarKind,
    Sequence, SequenceElement,
};
use crate::lexer::{Lexer, Position, Token, TokenKind};
use crate::options::DEFAULT_MAX_DEPTH;
use crate::{Error, Result};
use std::mem;

pub struct Parser<'a> {
    lexer: Lexer<'a>,
    curr: Option<Token>,
    peeked: Option<Option<Token>>,
    end: Position,
    depth: usize,
    max_depth: usize,
}

impl<'a> Parser<'a> {
    /// Creates a parser and reads the first token.
    pub fn new(input: &'a str) -> Result<Self> {
        Self::with_max_depth(input, DEFAULT_MAX_DEPTH)
    }

    pub fn with_max_depth(input: &'a str, max_depth: usize) -> Result<Self> {
        let mut parser = Parser {
            lexer: Lexer::new(input),
            curr: None,
            peeked: None,
            end: Position::default(),
            depth: 0,
            max_depth,
        };
        parser.curr = parser.pull()?;
        Ok(parser)
    }

    /// Parses a complete document.
    ///
    /// Fails when no node can be read or when tokens remain after it.
    pub fn parse(&mut self) -> Result<Node> {
        let node = match self.parse_node(None)? {
            Some(node) => node,
            None => return Err(self.unexpected("a value")),
        };
        if self.curr.is_some() {
            return Err(self.unexpected("end of input"));
        }
        Ok(node)
    }

    fn pull(&mut self) -> Result<Option<Token>> {
        let token = self.lexer.next_token()?;
        if token.is_none() {
            self.end = self.lexer.current_position();
        }
        Ok(token)
    }

    fn advance(&mut self) -> Result<Option<Token>> {
        let next = match self.peeked.take() {
            Some(token) => token,
            None => self.pull()?,
        };
        Ok(mem::replace(&mut self.curr, next))
    }

    /// Consumes the current token and returns its position.
    fn bump(&mut self) -> Result<Position> {
        let position = self.position();
        self.advance()?;
        Ok(position)
    }

    fn peek_is(&mut self, kind: &TokenKind) -> Result<bool> {
        if self.peeked.is_none() {
            let token = self.pull()?;
            self.peeked = Some(token);
        }
        Ok(matches!(
            &self.peeked,
            Some(Some(token)) if mem::discriminant(&token.kind) == mem::discriminant(kind)
        ))
    }

    /// Position of the current token, or of the end of input.
    fn position(&self) -> Position {
        self.curr.as_ref().map_or(self.end, |token| token.position)
    }

    fn at(&self, kind: &TokenKind, column: Option<usize>) -> bool {
        match &self.curr {
            Some(token) => {
                mem::discriminant(&token.kind) == mem::discriminant(kind)
                    && column.map_or(true, |n| token.column() == n)
            }
            None => false,
        }
    }

    fn eat(&mut self, kind: &TokenKind) -> Result<Option<Position>> {
        if self.at(kind, None) {
            Ok(Some(self.bump()?))
        } else {
            Ok(None)
        }
    }

    fn expect(&mut self, kind: &TokenKind, expected: &str) -> Result<Position> {
        match self.eat(kind)? {
            Some(position) => Ok(position),
            None => Err(self.unexpected(expected)),
        }
    }

    fn unexpected(&self, expected: &str) -> Error {
        let found = match &self.curr {
            Some(token) => token.kind.to_string(),
            None => "end of input".to_string(),
        };
        Error::parse(self.position(), format!("expected {}, got {}", expected, found))
    }

    fn enter(&mut self, position: Position) -> Result<()> {
        if self.depth >= self.max_depth {
            return Err(Error::parse(
                position,
                format!("nesting deeper than {} levels", self.max_depth),
            ));
        }
        self.depth += 1;
        Ok(())
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    fn parse_node(&mut self, column: Option<usize>) -> Result<Option<Node>> {
        // a quoted string followed by ':' always starts a block mapping
        let quoted_key = self.at(&TokenKind::String(String::new()), column)
            && self.peek_is(&TokenKind::Colon)?;
        if !quoted_key {
            if let Some(value) = self.parse_value(column)? {
                return Ok(Some(Node::Flow(value)));
            }
        }
        Ok(self.parse_block(column)?.map(Node::Block))
    }

    fn parse_value(&mut self, column: Option<usize>) -> Result<Option<FlowValue>> {
        if let Some(scalar) = self.parse_scalar(column)? {
            return Ok(Some(FlowValue::Scalar(scalar)));
        }
        if let Some(sequence) = self.parse_sequence(column)? {
            return Ok(Some(FlowValue::Composite(Composite::Sequence(sequence))));
        }
        if let Some(mapping) = self.parse_mapping(column)? {
            return Ok(Some(FlowValue::Composite(Composite::Mapping(mapping))));
        }
        Ok(None)
    }

    fn parse_scalar(&mut self, column: Option<usize>) -> Result<Option<Scalar>> {
        let is_scalar = match &self.curr {
            Some(token) => {
                matches!(
                    token.kind,
                    TokenKind::Null
                        | TokenKind::Boolean(_)
                        | TokenKind::Integer(_)
                        | TokenKind::Float(_)
                        | TokenKind::String(_)
                ) && column.map_or(true, |n| token.column() == n)
            }
            None => false,
        };
        if !is_scalar {
            return Ok(None);
        }
        let Some(token) = self.advance()? else {
            return Ok(None);
        };
        let kind = match token.kind {
            TokenKind::Null => ScalarKind::Null,
            TokenKind::Boolean(b) => ScalarKind::Boolean(b),
            TokenKind::Integer(i) => ScalarKind::Integer(i),
            TokenKind::Float(f) => ScalarKind::Float(f),
            TokenKind::String(s) => ScalarKind::String(s),
            _ => return Ok(None),
        };
        Ok(Some(Scalar {
            kind,
            position: token.position,
        }))
    }

    fn parse_sequence(&mut self, column: Option<usize>) -> Result<Option<Sequence>> {
        if !self.at(&TokenKind::LBracket, column) {
            return Ok(None);
        }
        let lbracket = self.bump()?;
        self.enter(lbracket)?;
        let mut elements = Vec::new();
        while let Some(value) = self.parse_value(None)? {
            let comma = self.eat(&TokenKind::Comma)?;
            let last = comma.is_none();
            elements.push(SequenceElement { value, comma });
            if last {
                break;
            }
        }
        let rbracket = self.expect(&TokenKind::RBracket, "']' after last element in sequence")?;
        self.leave();
        Ok(Some(Sequence {
            lbracket,
            elements,
            rbracket,
        }))
    }

    fn parse_mapping(&mut self, column: Option<usize>) -> Result<Option<Mapping>> {
        if !self.at(&TokenKind::LCurly, column) {
            return Ok(None);
        }
        let lcurly = self.bump()?;
        self.enter(lcurly)?;
        let mut elements = Vec::new();
        while let Some(element) = self.parse_mapping_element()? {
            let last = element.comma.is_none();
            elements.push(element);
            if last {
                break;
            }
        }
        let rcurly = self.expect(&TokenKind::RCurly, "'}' after last element in mapping")?;
        self.leave();
        Ok(Some(Mapping {
            lcurly,
            elements,
            rcurly,
        }))
    }

    fn parse_mapping_element(&mut self) -> Result<Option<MappingElement>> {
        let Some(key) = self.parse_value(None)? else {
            return Ok(None);
        };
        let colon = self.expect(&TokenKind::Colon, "':' after key in mapping element")?;
        let value = match self.parse_value(None)? {
            Some(value) => value,
            None => return Err(self.unexpected("a value after ':' in mapping element")),
        };
        let comma = self.eat(&TokenKind::Comma)?;
        Ok(Some(MappingElement {
            key,
            colon,
            value,
            comma,
        }))
    }

    fn parse_block(&mut self, column: Option<usize>) -> Result<Option<Block>> {
        if let Some(sequence) = self.parse_block_sequence(column)? {
            return Ok(Some(Block::Sequence(sequence)));
        }
        if let Some(mapping) = self.parse_block_mapping(column)? {
            return Ok(Some(Block::Mapping(mapping)));
        }
        Ok(self.parse_block_string(column)?.map(Block::String))
    }

    fn parse_block_sequence(&mut self, column: Option<usize>) -> Result<Option<BlockSequence>> {
        let Some(first) = self.parse_block_sequence_element(column)? else {
            return Ok(None);
        };
        let column = Some(first.dash.column);
        let mut elements = vec![first];
        while let Some(element) = self.parse_block_sequence_element(column)? {
            elements.push(element);
        }
        Ok(Some(BlockSequence { elements }))
    }

    fn parse_block_sequence_element(
        &mut self,
        column: Option<usize>,
    ) -> Result<Option<BlockSequenceElement>> {
        if !self.at(&TokenKind::Dash, column) {
            return Ok(None);
        }
        let dash = self.bump()?;
        self.enter(dash)?;
        let value = match self.parse_node(None)? {
            Some(node) => node,
            None => return Err(self.unexpected("a value after '-' in block sequence element")),
        };
        self.leave();
        Ok(Some(BlockSequenceElement {
            dash,
            value: Box::new(value),
        }))
    }

    fn parse_block_mapping(&mut self, column: Option<usize>) -> Result<Option<BlockMapping>> {
        let Some(first) = self.parse_block_mapping_element(column)? else {
            return Ok(None);
        };
        let column = Some(first.key.position.column);
        let mut elements = vec![first];
        while let Some(element) = self.parse_block_mapping_element(column)? {
            elements.push(element);
        }
        Ok(Some(BlockMapping { elements }))
    }

    fn parse_block_mapping_element(
        &mut self,
        column: Option<usize>,
    ) -> Result<Option<BlockMappingElement>> {
        let quoted = if self.at(&TokenKind::Name(String::new()), column) {
            false
        } else if self.at(&TokenKind::String(String::new()), column)
            && self.peek_is(&TokenKind::Colon)?
        {
            true
        } else {
            return Ok(None);
        };
        let Some(Token {
            kind: TokenKind::Name(text) | TokenKind::String(text),
            position,
        }) = self.advance()?
        else {
            return Ok(None);
        };
        let colon = self.expect(&TokenKind::Colon, "':' after key in block mapping element")?;
        self.enter(position)?;
        let value = match self.parse_node(None)? {
            Some(node) => node,
            None => return Err(self.unexpected("a value after ':' in block mapping element")),
        };
        self.leave();
        Ok(Some(BlockMappingElement {
            key: BlockKey {
                position,
                text,
                quoted,
            },
            colon,
            value: Box::new(value),
        }))
    }

    fn parse_block_string(&mut self, column: Option<usize>) -> Result<Option<BlockString>> {
        let (kind, anchor) = match &self.curr {
            Some(token) => match token.kind.as_line() {
                Some((kind, _)) if column.map_or(true, |n| token.column() == n) => {
                    (kind, token.column())
                }
                _ => return Ok(None),
            },
            None => return Ok(None),
        };
        let mut lines = Vec::new();
        loop {
            let continues = match &self.curr {
                Some(token) => {
                    token.column() == anchor
                        && token.kind.as_line().map(|(k, _)| k) == Some(kind)
                }
                None => false,
            };
            if !continues {
                break;
            }
            let Some(token) = self.advance()? else {
                break;
            };
            let text = match token.kind {
                TokenKind::LiteralLine(text)
                | TokenKind::FoldedLine(text)
                | TokenKind::EscapedLiteralLine(text)
                | TokenKind::EscapedFoldedLine(text) => text,
                _ => break,
            };
            lines.push(Line {
                position: token.position,
                text,
            });
        }
        Ok(Some(BlockString { kind, lines }))
    }
}
