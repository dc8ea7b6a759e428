//! Restricted literal grammar for tuple-style parameter text.
//!
//! Tuples serialize to a different textual form (`((1,2),(3,4))`) than a
//! JSON-decoded list (`[[1, 2], [3, 4]]`), so both must be accepted on read.
//! The JSON side is handled by `serde_json`; this module covers the tuple
//! side with a small hand-rolled parser over literal syntax only: numbers,
//! quoted strings, booleans, `None`/`null`, and nested tuples/lists.
//! Nothing here evaluates expressions.

use railyard_types::FrozenValue;
use thiserror::Error;

/// Error raised when input does not match the literal grammar.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid literal at byte {position}: {message}")]
pub struct LiteralParseError {
    /// Byte offset of the failure.
    pub position: usize,
    /// What the parser expected.
    pub message: String,
}

/// Parses a single literal, requiring the whole input to be consumed.
pub fn parse_literal(input: &str) -> Result<FrozenValue, LiteralParseError> {
    let mut parser = Parser {
        bytes: input.as_bytes(),
        position: 0,
    };
    parser.skip_whitespace();
    let value = parser.parse_value()?;
    parser.skip_whitespace();
    if parser.position != parser.bytes.len() {
        return Err(parser.error("trailing characters after literal"));
    }
    Ok(value)
}

struct Parser<'a> {
    bytes: &'a [u8],
    position: usize,
}

impl Parser<'_> {
    fn error(&self, message: &str) -> LiteralParseError {
        LiteralParseError {
            position: self.position,
            message: message.to_string(),
        }
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.position).copied()
    }

    fn bump(&mut self) -> Option<u8> {
        let byte = self.peek()?;
        self.position += 1;
        Some(byte)
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(b' ' | b'\t' | b'\n' | b'\r')) {
            self.position += 1;
        }
    }

    fn parse_value(&mut self) -> Result<FrozenValue, LiteralParseError> {
        match self.peek() {
            Some(b'(') => self.parse_group(b'(', b')'),
            Some(b'[') => self.parse_group(b'[', b']'),
            Some(b'\'') | Some(b'"') => self.parse_string(),
            Some(b'-' | b'+' | b'0'..=b'9') => self.parse_number(),
            Some(_) => self.parse_word(),
            None => Err(self.error("unexpected end of input")),
        }
    }

    fn parse_group(&mut self, open: u8, close: u8) -> Result<FrozenValue, LiteralParseError> {
        debug_assert_eq!(self.peek(), Some(open));
        self.bump();
        let mut items = Vec::new();
        loop {
            self.skip_whitespace();
            if self.peek() == Some(close) {
                self.bump();
                return Ok(FrozenValue::Sequence(items));
            }
            items.push(self.parse_value()?);
            self.skip_whitespace();
            match self.peek() {
                Some(b',') => {
                    self.bump();
                    // A trailing comma before the closer is valid tuple syntax.
                }
                Some(byte) if byte == close => {}
                _ => return Err(self.error("expected ',' or a closing bracket")),
            }
        }
    }

    fn parse_string(&mut self) -> Result<FrozenValue, LiteralParseError> {
        let quote = self.bump().expect("caller checked for a quote");
        let mut raw = Vec::new();
        loop {
            match self.bump() {
                Some(byte) if byte == quote => {
                    return String::from_utf8(raw)
                        .map(FrozenValue::Text)
                        .map_err(|_| self.error("string literal is not valid UTF-8"));
                }
                Some(b'\\') => match self.bump() {
                    Some(b'\\') => raw.push(b'\\'),
                    Some(b'\'') => raw.push(b'\''),
                    Some(b'"') => raw.push(b'"'),
                    Some(b'n') => raw.push(b'\n'),
                    Some(b't') => raw.push(b'\t'),
                    _ => return Err(self.error("unsupported escape sequence")),
                },
                Some(byte) => raw.push(byte),
                None => return Err(self.error("unterminated string literal")),
            }
        }
    }

    fn parse_number(&mut self) -> Result<FrozenValue, LiteralParseError> {
        let start = self.position;
        if matches!(self.peek(), Some(b'-' | b'+')) {
            self.bump();
        }
        let mut is_float = false;
        while let Some(byte) = self.peek() {
            match byte {
                b'0'..=b'9' => {
                    self.bump();
                }
                b'.' | b'e' | b'E' => {
                    is_float = true;
                    self.bump();
                    if matches!(self.peek(), Some(b'-' | b'+')) {
                        self.bump();
                    }
                }
                _ => break,
            }
        }
        let text = std::str::from_utf8(&self.bytes[start..self.position]).map_err(|_| self.error("non-ASCII number"))?;
        if is_float {
            text.parse::<f64>()
                .map(FrozenValue::Float)
                .map_err(|_| self.error("malformed float literal"))
        } else {
            text.parse::<i64>()
                .map(FrozenValue::Int)
                .map_err(|_| self.error("malformed integer literal"))
        }
    }

    fn parse_word(&mut self) -> Result<FrozenValue, LiteralParseError> {
        let start = self.position;
        while matches!(self.peek(), Some(byte) if byte.is_ascii_alphabetic()) {
            self.bump();
        }
        let word = &self.bytes[start..self.position];
        match word {
            b"True" | b"true" => Ok(FrozenValue::Bool(true)),
            b"False" | b"false" => Ok(FrozenValue::Bool(false)),
            b"None" | b"none" | b"null" => Ok(FrozenValue::Null),
            _ => {
                self.position = start;
                Err(self.error("expected a literal value"))
            }
        }
    }
}
