//! Parser Types and Constants
//!
//! Shared error type, options, character classes and limits used across the
//! parser modules.

use lazy_static::lazy_static;
use regex_lite::Regex;
use serde::Deserialize;
use std::fmt;
use thiserror::Error;

use crate::ast::types::Position;

/// Vim rejects calls and lambdas with more arguments than this
pub const MAX_FUNC_ARGS: usize = 20;

// =============================================================================
// ERRORS
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Unrecognized character, unterminated string, malformed blob
    Lexical,
    /// Missing token, bad argument, unknown command, trailing characters
    Syntax,
    /// Closer without opener, jump outside a loop, return outside a function
    Context,
    /// Block still open at end of input or at `:endfunction`
    Unterminated,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub struct ParseError {
    pub kind: ErrorKind,
    pub message: String,
    pub pos: Position,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "vimlparser: {}: line {} col {}",
            self.message, self.pos.line, self.pos.column
        )
    }
}

impl ParseError {
    pub fn new(kind: ErrorKind, message: impl Into<String>, pos: Position) -> Self {
        Self {
            kind,
            message: message.into(),
            pos,
        }
    }

    pub fn lexical(message: impl Into<String>, pos: Position) -> Self {
        Self::new(ErrorKind::Lexical, message, pos)
    }

    pub fn syntax(message: impl Into<String>, pos: Position) -> Self {
        Self::new(ErrorKind::Syntax, message, pos)
    }

    pub fn context(message: impl Into<String>, pos: Position) -> Self {
        Self::new(ErrorKind::Context, message, pos)
    }

    pub fn unterminated(message: impl Into<String>, pos: Position) -> Self {
        Self::new(ErrorKind::Unterminated, message, pos)
    }
}

pub type ParseResult<T> = Result<T, ParseError>;

// =============================================================================
// OPTIONS
// =============================================================================

/// Parser configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ParserOptions {
    /// Resolve commands against the Neovim command set
    pub neovim: bool,
}

impl ParserOptions {
    /// Options from a JSON object; missing fields keep their defaults
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}

// =============================================================================
// CHARACTER CLASSES
// =============================================================================

lazy_static! {
    static ref ARGNAME_RE: Regex = Regex::new(r"^[A-Za-z_][0-9A-Za-z_]*$").unwrap();
    static ref VARNAME_RE: Regex =
        Regex::new(r"^[vgslabwt]:$|^([vgslabwt]:)?[A-Za-z_][0-9A-Za-z_#]*$").unwrap();
}

pub fn is_alpha(c: char) -> bool {
    c.is_ascii_alphabetic()
}

pub fn is_alnum(c: char) -> bool {
    c.is_ascii_alphanumeric()
}

pub fn is_digit(c: char) -> bool {
    c.is_ascii_digit()
}

pub fn is_odigit(c: char) -> bool {
    matches!(c, '0'..='7')
}

pub fn is_xdigit(c: char) -> bool {
    c.is_ascii_hexdigit()
}

pub fn is_bdigit(c: char) -> bool {
    c == '0' || c == '1'
}

pub fn is_wordc(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

pub fn is_white(c: char) -> bool {
    c == ' ' || c == '\t'
}

/// Characters that may continue a variable or function name
pub fn is_namec(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == ':' || c == '#'
}

/// Characters that may start a name
pub fn is_namec1(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

pub fn is_idc(c: char) -> bool {
    is_wordc(c)
}

/// Option-style predicates for reader lookahead, where `None` is EOF
pub fn opt_is(c: Option<char>, pred: fn(char) -> bool) -> bool {
    c.map_or(false, pred)
}

/// Character as shown in diagnostics
pub fn describe_char(c: Option<char>) -> String {
    match c {
        None => "<EOF>".to_string(),
        Some('\n') => "<EOL>".to_string(),
        Some(c) => c.to_string(),
    }
}

pub fn is_argname(s: &str) -> bool {
    ARGNAME_RE.is_match(s)
}

pub fn is_varname(s: &str) -> bool {
    VARNAME_RE.is_match(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_format() {
        let err = ParseError::syntax("E492: Not an editor command: foo", Position::new(0, 3, 5, 12));
        assert_eq!(
            err.to_string(),
            "vimlparser: E492: Not an editor command: foo: line 3 col 5"
        );
        assert_eq!(err.kind, ErrorKind::Syntax);
    }

    #[test]
    fn test_varname() {
        assert!(is_varname("g:"));
        assert!(is_varname("s:foo"));
        assert!(is_varname("foo#bar"));
        assert!(!is_varname("x:foo"));
        assert!(!is_varname("1abc"));
    }

    #[test]
    fn test_argname() {
        assert!(is_argname("a_1"));
        assert!(!is_argname("a:b"));
        assert!(!is_argname("9"));
    }

    #[test]
    fn test_options_from_json() {
        assert_eq!(ParserOptions::from_json("{}").unwrap(), ParserOptions::default());
        assert!(ParserOptions::from_json(r#"{"neovim": true}"#).unwrap().neovim);
        assert!(ParserOptions::from_json(r#"{"neovim": 1}"#).is_err());
    }
}
