//! Decoder for the tuple literals that make up balance-statement lines.
//!
//! A line looks like
//!
//! ```text
//! ('deposit','tx1','2023-01-01',100.0,100.0,None,None,'PHP',0,...)
//! ```
//!
//! The accepted grammar is a flat sequence of scalars inside `(...)` or
//! `[...]`, with an optional trailing comma:
//!
//! - strings in single or double quotes, optionally prefixed `u`, `b` or `r`,
//!   with the escapes `\\ \' \" \n \r \t \0 \xNN \uNNNN \UNNNNNNNN`
//! - numbers: integer, decimal or exponent form
//! - `Decimal('...')`
//! - `None` / `null`, `True` / `true`, `False` / `false`
//!
//! Nothing is ever evaluated; anything outside the grammar is an error.

use std::fmt;
use std::iter::Peekable;
use std::str::{CharIndices, FromStr};

use rust_decimal::Decimal;
use serde::{Serialize, Serializer};
use thiserror::Error;

/// Largest decimal exponent representable by [`Decimal`].
const MAX_EXPONENT: u32 = 28;

/// One scalar of a statement line.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StatementValue {
    /// `None` or `null`.
    Null,
    /// `True`/`true` or `False`/`false`.
    Bool(bool),
    /// Numbers compare by value: `100` equals `100.0`.
    Number(Decimal),
    /// A string, with escapes resolved.
    Text(String),
}

impl StatementValue {
    /// Whether the value is `None`/`null`.
    pub fn is_null(&self) -> bool {
        matches!(self, StatementValue::Null)
    }

    /// The string, if this is text.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            StatementValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// The number, if this is numeric.
    pub fn as_decimal(&self) -> Option<Decimal> {
        match self {
            StatementValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// The boolean, if this is one.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            StatementValue::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl fmt::Display for StatementValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatementValue::Null => write!(f, "null"),
            StatementValue::Bool(b) => write!(f, "{b}"),
            StatementValue::Number(n) => write!(f, "{n}"),
            StatementValue::Text(s) => write!(f, "{s}"),
        }
    }
}

impl Serialize for StatementValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            StatementValue::Null => serializer.serialize_none(),
            StatementValue::Bool(b) => serializer.serialize_bool(*b),
            StatementValue::Number(n) => Serialize::serialize(n, serializer),
            StatementValue::Text(s) => serializer.serialize_str(s),
        }
    }
}

impl From<&str> for StatementValue {
    fn from(value: &str) -> Self {
        StatementValue::Text(value.to_string())
    }
}

impl From<String> for StatementValue {
    fn from(value: String) -> Self {
        StatementValue::Text(value)
    }
}

impl From<Decimal> for StatementValue {
    fn from(value: Decimal) -> Self {
        StatementValue::Number(value)
    }
}

impl From<i64> for StatementValue {
    fn from(value: i64) -> Self {
        StatementValue::Number(Decimal::from(value))
    }
}

impl From<bool> for StatementValue {
    fn from(value: bool) -> Self {
        StatementValue::Bool(value)
    }
}

impl<T: Into<StatementValue>> From<Option<T>> for StatementValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(StatementValue::Null, Into::into)
    }
}

/// A line that is not a valid tuple literal.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message} at column {column}")]
pub struct LiteralError {
    /// Byte offset into the line.
    pub column: usize,
    pub message: String,
}

/// Decode a tuple literal into its values.
pub fn parse_tuple(input: &str) -> Result<Vec<StatementValue>, LiteralError> {
    Parser::new(input).tuple()
}

struct Parser<'a> {
    input: &'a str,
    chars: Peekable<CharIndices<'a>>,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input,
            chars: input.char_indices().peekable(),
        }
    }

    fn column(&mut self) -> usize {
        self.chars.peek().map_or(self.input.len(), |(i, _)| *i)
    }

    fn error<T>(&mut self, message: impl Into<String>) -> Result<T, LiteralError> {
        Err(LiteralError {
            column: self.column(),
            message: message.into(),
        })
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().map(|(_, c)| *c)
    }

    fn bump(&mut self) -> Option<char> {
        self.chars.next().map(|(_, c)| c)
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.bump();
        }
    }

    fn expect(&mut self, expected: char) -> Result<(), LiteralError> {
        self.skip_whitespace();
        match self.peek() {
            Some(c) if c == expected => {
                self.bump();
                Ok(())
            }
            Some(c) => self.error(format!("expected '{expected}', found '{c}'")),
            None => self.error(format!("expected '{expected}', found end of line")),
        }
    }

    fn tuple(mut self) -> Result<Vec<StatementValue>, LiteralError> {
        self.skip_whitespace();
        let close = match self.peek() {
            Some('(') => ')',
            Some('[') => ']',
            _ => return self.error("expected '(' or '['"),
        };
        self.bump();

        let mut values = Vec::new();
        loop {
            self.skip_whitespace();
            if self.peek() == Some(close) {
                self.bump();
                break;
            }
            values.push(self.value()?);
            self.skip_whitespace();
            match self.peek() {
                Some(',') => {
                    self.bump();
                }
                Some(c) if c == close => {
                    self.bump();
                    break;
                }
                Some(c) => return self.error(format!("unexpected '{c}'")),
                None => return self.error("unterminated tuple"),
            }
        }

        self.skip_whitespace();
        if self.peek().is_some() {
            return self.error("trailing characters after tuple");
        }
        Ok(values)
    }

    fn value(&mut self) -> Result<StatementValue, LiteralError> {
        match self.peek() {
            Some(quote @ ('\'' | '"')) => {
                self.bump();
                self.string(quote, false).map(StatementValue::Text)
            }
            Some(c) if c.is_ascii_digit() || matches!(c, '-' | '+' | '.') => {
                self.number().map(StatementValue::Number)
            }
            Some(c) if c.is_alphabetic() || c == '_' => self.word(),
            Some(c) => self.error(format!("unexpected '{c}'")),
            None => self.error("expected a value, found end of line"),
        }
    }

    /// Keywords, string prefixes and `Decimal('...')`.
    fn word(&mut self) -> Result<StatementValue, LiteralError> {
        let start = self.column();
        while self.peek().is_some_and(|c| c.is_alphanumeric() || c == '_') {
            self.bump();
        }
        let end = self.column();
        let input = self.input;
        let word = &input[start..end];

        if let Some(quote @ ('\'' | '"')) = self.peek() {
            let prefix = word.to_ascii_lowercase();
            if matches!(prefix.as_str(), "u" | "b" | "r" | "ur" | "br" | "rb") {
                self.bump();
                let raw = prefix.contains('r');
                return self.string(quote, raw).map(StatementValue::Text);
            }
        }

        match word {
            "None" | "null" => Ok(StatementValue::Null),
            "True" | "true" => Ok(StatementValue::Bool(true)),
            "False" | "false" => Ok(StatementValue::Bool(false)),
            "Decimal" => {
                self.expect('(')?;
                self.skip_whitespace();
                let text = match self.peek() {
                    Some(quote @ ('\'' | '"')) => {
                        self.bump();
                        self.string(quote, false)?
                    }
                    _ => return self.error("expected a quoted number inside Decimal(...)"),
                };
                let value = match parse_number(text.trim()) {
                    Some(value) => value,
                    None => return self.error(format!("invalid number {text:?}")),
                };
                self.expect(')')?;
                Ok(StatementValue::Number(value))
            }
            other => Err(LiteralError {
                column: start,
                message: format!("unknown identifier `{other}`"),
            }),
        }
    }

    fn number(&mut self) -> Result<Decimal, LiteralError> {
        let start = self.column();
        while self
            .peek()
            .is_some_and(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-'))
        {
            self.bump();
        }
        let end = self.column();
        let input = self.input;
        let text = &input[start..end];
        parse_number(text).ok_or_else(|| LiteralError {
            column: start,
            message: format!("invalid number `{text}`"),
        })
    }

    fn string(&mut self, quote: char, raw: bool) -> Result<String, LiteralError> {
        let mut out = String::new();
        loop {
            match self.bump() {
                None => return self.error("unterminated string"),
                Some(c) if c == quote => return Ok(out),
                Some('\\') if raw => {
                    out.push('\\');
                    if let Some(next) = self.bump() {
                        out.push(next);
                    }
                }
                Some('\\') => self.escape(&mut out)?,
                Some(c) => out.push(c),
            }
        }
    }

    fn escape(&mut self, out: &mut String) -> Result<(), LiteralError> {
        match self.bump() {
            Some('\\') => out.push('\\'),
            Some('\'') => out.push('\''),
            Some('"') => out.push('"'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some('0') => out.push('\0'),
            Some('x') => out.push(self.hex_char(2)?),
            Some('u') => out.push(self.hex_char(4)?),
            Some('U') => out.push(self.hex_char(8)?),
            // Unknown escapes are kept verbatim.
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => return self.error("unterminated string"),
        }
        Ok(())
    }

    fn hex_char(&mut self, digits: usize) -> Result<char, LiteralError> {
        let mut code = 0u32;
        for _ in 0..digits {
            match self.peek().and_then(|c| c.to_digit(16)) {
                Some(d) => {
                    self.bump();
                    code = code * 16 + d;
                }
                None => return self.error("invalid hex escape"),
            }
        }
        match char::from_u32(code) {
            Some(c) => Ok(c),
            None => self.error(format!("invalid code point {code:#x}")),
        }
    }
}

/// Parse `123`, `-1.50`, `2.5e-3`, `1E+05` into an exact decimal.
fn parse_number(text: &str) -> Option<Decimal> {
    let (mantissa, exponent) = match text.find(['e', 'E']) {
        Some(i) => (&text[..i], text[i + 1..].parse::<i32>().ok()?),
        None => (text, 0),
    };
    let mantissa = mantissa.strip_prefix('+').unwrap_or(mantissa);
    let mut value = Decimal::from_str(mantissa).ok()?;

    if exponent.unsigned_abs() > MAX_EXPONENT {
        return None;
    }
    for _ in 0..exponent.unsigned_abs() {
        value = if exponent > 0 {
            value.checked_mul(Decimal::TEN)?
        } else {
            value.checked_div(Decimal::TEN)?
        };
    }
    Some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mixed_scalars() {
        let values = parse_tuple("('deposit', \"tx1\", 100.0, -2, None, null, True, false)").unwrap();
        assert_eq!(
            values,
            vec![
                StatementValue::from("deposit"),
                StatementValue::from("tx1"),
                StatementValue::Number(Decimal::from(100)),
                StatementValue::from(-2i64),
                StatementValue::Null,
                StatementValue::Null,
                StatementValue::Bool(true),
                StatementValue::Bool(false),
            ]
        );
    }

    #[test]
    fn test_numbers_compare_by_value() {
        let values = parse_tuple("(100, 100.0, 1e2, 2.5E-3)").unwrap();
        assert_eq!(values[0], values[1]);
        assert_eq!(values[1], values[2]);
        assert_eq!(values[3].as_decimal(), Some(Decimal::new(25, 4)));
    }

    #[test]
    fn test_string_escapes_and_prefixes() {
        let values = parse_tuple(r#"('it\'s', u'caf\xe9', "a\"b", r'c:\n', 'tab\there', '\u20b1')"#)
            .unwrap();
        assert_eq!(values[0].as_str(), Some("it's"));
        assert_eq!(values[1].as_str(), Some("café"));
        assert_eq!(values[2].as_str(), Some("a\"b"));
        assert_eq!(values[3].as_str(), Some("c:\\n"));
        assert_eq!(values[4].as_str(), Some("tab\there"));
        assert_eq!(values[5].as_str(), Some("₱"));
    }

    #[test]
    fn test_commas_inside_strings_do_not_split() {
        let values = parse_tuple("('a, b', 'c)')").unwrap();
        assert_eq!(values.len(), 2);
        assert_eq!(values[0].as_str(), Some("a, b"));
        assert_eq!(values[1].as_str(), Some("c)"));
    }

    #[test]
    fn test_decimal_constructor_and_brackets() {
        let values = parse_tuple("[Decimal('0.00012'), 'x',]").unwrap();
        assert_eq!(values[0].as_decimal(), Some(Decimal::new(12, 5)));
        assert_eq!(values.len(), 2);
    }

    #[test]
    fn test_empty_tuple() {
        assert!(parse_tuple("()").unwrap().is_empty());
    }

    #[test]
    fn test_rejects_code() {
        let err = parse_tuple("(__import__('os').system('true'),)").unwrap_err();
        assert!(err.message.contains("unknown identifier"));
        assert_eq!(err.column, 1);
    }

    #[test]
    fn test_rejects_malformed_input() {
        assert!(parse_tuple("'a', 'b'").is_err());
        assert!(parse_tuple("('a' 'b')").is_err());
        assert!(parse_tuple("('unterminated)").is_err());
        assert!(parse_tuple("('a',) extra").is_err());
        assert!(parse_tuple("(1.2.3,)").is_err());
        assert!(parse_tuple("(1e999,)").is_err());
        assert!(parse_tuple("(").is_err());
    }

    #[test]
    fn test_value_serializes_to_json() {
        let json = serde_json::to_value(vec![
            StatementValue::Null,
            StatementValue::from("PHP"),
            StatementValue::Bool(true),
            StatementValue::Number(Decimal::new(-2525, 2)),
        ])
        .unwrap();
        assert_eq!(json, serde_json::json!([null, "PHP", true, "-25.25"]));
    }
}
