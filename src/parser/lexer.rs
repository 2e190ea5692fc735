//! Expression Tokenizer for VimL
//!
//! Produces one token at a time from a [`StringReader`]. The tokenizer owns
//! only a memo of already scanned tokens keyed by the starting cursor; the
//! reader is borrowed per call so the statement parser can interleave its
//! own reads with expression parsing.
//!
//! Matching is longest-first: `==?` before `==` before `=`, `...` before
//! `..` before `.`, and so on.

use std::collections::HashMap;

use crate::ast::types::{Node, NodeKind, Position};
use crate::parser::reader::{StringReader, EOL};
use crate::parser::types::{
    describe_char, is_alnum, is_bdigit, is_digit, is_idc, is_namec1, is_white, is_xdigit, opt_is,
    ParseError, ParseResult,
};

/// Token types for VimL expressions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenType {
    Eof = 1,
    Eol,
    Space,
    OrOr,
    AndAnd,
    EqEq,
    EqEqCi,
    EqEqCs,
    NEq,
    NEqCi,
    NEqCs,
    Gt,
    GtCi,
    GtCs,
    GtEq,
    GtEqCi,
    GtEqCs,
    Lt,
    LtCi,
    LtCs,
    LtEq,
    LtEqCi,
    LtEqCs,
    Match,
    MatchCi,
    MatchCs,
    NoMatch,
    NoMatchCi,
    NoMatchCs,
    Is,
    IsCi,
    IsCs,
    IsNot,
    IsNotCi,
    IsNotCs,
    Plus,
    Minus,
    Dot,
    Star,
    Slash,
    Percent,
    Not,
    Question,
    Colon,
    POpen,
    PClose,
    SqOpen,
    SqClose,
    COpen,
    CClose,
    Comma,
    Number,
    SQuote,
    DQuote,
    Option,
    Identifier,
    Env,
    Reg,
    Eq,
    Or,
    Semicolon,
    Backtick,
    DotDotDot,
    Sharp,
    Arrow,
    Blob,
    LitCOpen,
    DotDot,
}

impl TokenType {
    /// Numeric code used in diagnostics
    pub fn code(self) -> u8 {
        self as u8
    }
}

/// A token produced by the tokenizer
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub token_type: TokenType,
    pub value: String,
    pub pos: Position,
}

impl Token {
    pub fn new(token_type: TokenType, value: impl Into<String>, pos: Position) -> Self {
        Self {
            token_type,
            value: value.into(),
            pos,
        }
    }

    pub fn is(&self, token_type: TokenType) -> bool {
        self.token_type == token_type
    }
}

/// Comparison operators: base text and the plain, `?` and `#` variants.
/// Two-character bases come first so `>=` wins over `>`.
const COMPARISON_OPS: &[(&str, [TokenType; 3])] = &[
    ("==", [TokenType::EqEq, TokenType::EqEqCi, TokenType::EqEqCs]),
    ("!=", [TokenType::NEq, TokenType::NEqCi, TokenType::NEqCs]),
    (">=", [TokenType::GtEq, TokenType::GtEqCi, TokenType::GtEqCs]),
    ("<=", [TokenType::LtEq, TokenType::LtEqCi, TokenType::LtEqCs]),
    ("=~", [TokenType::Match, TokenType::MatchCi, TokenType::MatchCs]),
    ("!~", [TokenType::NoMatch, TokenType::NoMatchCi, TokenType::NoMatchCs]),
    (">", [TokenType::Gt, TokenType::GtCi, TokenType::GtCs]),
    ("<", [TokenType::Lt, TokenType::LtCi, TokenType::LtCs]),
];

const IDENTITY_OPS: &[(&str, [TokenType; 3])] = &[
    ("isnot", [TokenType::IsNot, TokenType::IsNotCi, TokenType::IsNotCs]),
    ("is", [TokenType::Is, TokenType::IsCi, TokenType::IsCs]),
];

/// Logical operators, matched before the comparison table
const LOGICAL_OPS: &[(&str, TokenType)] = &[("||", TokenType::OrOr), ("&&", TokenType::AndAnd)];

/// Multi-character punctuation, longest first
const MULTI_CHAR_OPS: &[(&str, TokenType)] = &[
    ("...", TokenType::DotDotDot),
    ("->", TokenType::Arrow),
    ("..", TokenType::DotDot),
    ("#{", TokenType::LitCOpen),
];

fn single_char_op(c: char) -> Option<TokenType> {
    let t = match c {
        '+' => TokenType::Plus,
        '-' => TokenType::Minus,
        '.' => TokenType::Dot,
        '*' => TokenType::Star,
        '/' => TokenType::Slash,
        '%' => TokenType::Percent,
        '!' => TokenType::Not,
        '?' => TokenType::Question,
        ':' => TokenType::Colon,
        '#' => TokenType::Sharp,
        '(' => TokenType::POpen,
        ')' => TokenType::PClose,
        '[' => TokenType::SqOpen,
        ']' => TokenType::SqClose,
        '{' => TokenType::COpen,
        '}' => TokenType::CClose,
        ',' => TokenType::Comma,
        '\'' => TokenType::SQuote,
        '"' => TokenType::DQuote,
        '=' => TokenType::Eq,
        '|' => TokenType::Or,
        ';' => TokenType::Semicolon,
        '`' => TokenType::Backtick,
        _ => return None,
    };
    Some(t)
}

/// True when the reader continues with `text`
fn lookahead_is(r: &StringReader, text: &str) -> bool {
    text.chars().enumerate().all(|(i, c)| r.p(i) == Some(c))
}

fn unexpected_character(c: Option<char>, pos: Position) -> ParseError {
    ParseError::lexical(format!("unexpected character: {}", describe_char(c)), pos)
}

#[derive(Debug, Default)]
pub struct ExprTokenizer {
    cache: HashMap<usize, (usize, Token)>,
}

impl ExprTokenizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn peek(&mut self, r: &mut StringReader) -> ParseResult<Token> {
        let saved = r.tell();
        let token = self.get(r);
        r.seek_set(saved);
        token
    }

    pub fn get(&mut self, r: &mut StringReader) -> ParseResult<Token> {
        let start = r.tell();
        if let Some((end, token)) = self.cache.get(&start) {
            r.seek_set(*end);
            return Ok(token.clone());
        }
        r.skip_white();
        let token = Self::scan(r)?;
        self.cache.insert(start, (r.tell(), token.clone()));
        Ok(token)
    }

    fn scan(r: &mut StringReader) -> ParseResult<Token> {
        let pos = r.getpos();
        let c = match r.peek() {
            None => return Ok(Token::new(TokenType::Eof, "<EOF>", pos)),
            Some(EOL) => {
                r.seek_cur(1);
                return Ok(Token::new(TokenType::Eol, "<EOL>", pos));
            }
            Some(c) => c,
        };

        if is_white(c) {
            let s = r.read_white();
            return Ok(Token::new(TokenType::Space, s, pos));
        }

        if c == '0' && matches!(r.p(1), Some('x' | 'X')) && opt_is(r.p(2), is_xdigit) {
            let mut s = r.getn(3);
            s.push_str(&r.read_xdigit());
            return Ok(Token::new(TokenType::Number, s, pos));
        }
        if c == '0' && matches!(r.p(1), Some('b' | 'B')) && opt_is(r.p(2), is_bdigit) {
            let mut s = r.getn(3);
            s.push_str(&r.read_bdigit());
            return Ok(Token::new(TokenType::Number, s, pos));
        }
        if c == '0' && matches!(r.p(1), Some('z' | 'Z')) && r.p(2) != Some('.') {
            let mut s = r.getn(2);
            s.push_str(&r.read_blob()?);
            return Ok(Token::new(TokenType::Blob, s, pos));
        }
        if is_digit(c) {
            return Ok(Token::new(TokenType::Number, Self::scan_decimal(r), pos));
        }

        for (word, [plain, ci, cs]) in IDENTITY_OPS {
            let n = word.len();
            if lookahead_is(r, word) && !opt_is(r.p(n), is_idc) {
                let (kind, len) = match r.p(n) {
                    Some('?') => (*ci, n + 1),
                    Some('#') => (*cs, n + 1),
                    _ => (*plain, n),
                };
                let s = r.getn(len);
                return Ok(Token::new(kind, s, pos));
            }
        }

        if is_namec1(c) {
            let s = r.read_name();
            return Ok(Token::new(TokenType::Identifier, s, pos));
        }

        if let Some(token) = Self::scan_operator(r, pos) {
            return Ok(token);
        }

        match c {
            '$' => {
                let mut s = r.getn(1);
                s.push_str(&r.read_word());
                Ok(Token::new(TokenType::Env, s, pos))
            }
            // `@` at end of line is the unnamed register
            '@' => Ok(Token::new(TokenType::Reg, r.getn(2), pos)),
            '&' => {
                let scoped = matches!(r.p(1), Some('g' | 'l')) && r.p(2) == Some(':');
                let mut s = r.getn(if scoped { 3 } else { 1 });
                s.push_str(&r.read_word());
                Ok(Token::new(TokenType::Option, s, pos))
            }
            _ => match single_char_op(c) {
                Some(kind) => {
                    r.seek_cur(1);
                    Ok(Token::new(kind, c.to_string(), pos))
                }
                None => Err(unexpected_character(Some(c), r.getpos())),
            },
        }
    }

    /// Decimal integer or float. The exponent is only taken after a fraction.
    fn scan_decimal(r: &mut StringReader) -> String {
        let mut s = r.read_digit();
        if r.p(0) == Some('.') && opt_is(r.p(1), is_digit) {
            s.push_str(&r.getn(1));
            s.push_str(&r.read_digit());
            let exponent = matches!(r.p(0), Some('e' | 'E'))
                && (opt_is(r.p(1), is_digit)
                    || (matches!(r.p(1), Some('-' | '+')) && opt_is(r.p(2), is_digit)));
            if exponent {
                s.push_str(&r.getn(2));
                s.push_str(&r.read_digit());
            }
        }
        s
    }

    fn scan_operator(r: &mut StringReader, pos: Position) -> Option<Token> {
        for (text, kind) in LOGICAL_OPS {
            if lookahead_is(r, text) {
                r.seek_cur(text.len());
                return Some(Token::new(*kind, *text, pos));
            }
        }
        for (base, [plain, ci, cs]) in COMPARISON_OPS {
            if lookahead_is(r, base) {
                let n = base.len();
                let (kind, len) = match r.p(n) {
                    Some('?') => (*ci, n + 1),
                    Some('#') => (*cs, n + 1),
                    _ => (*plain, n),
                };
                let s = r.getn(len);
                return Some(Token::new(kind, s, pos));
            }
        }
        for (text, kind) in MULTI_CHAR_OPS {
            if lookahead_is(r, text) {
                r.seek_cur(text.len());
                return Some(Token::new(*kind, *text, pos));
            }
        }
        None
    }

    /// Body of a single-quoted string; `''` is kept as written
    pub fn get_sstring(&mut self, r: &mut StringReader) -> ParseResult<String> {
        r.skip_white();
        let c = r.p(0);
        if c != Some('\'') {
            return Err(unexpected_character(c, r.getpos()));
        }
        r.seek_cur(1);
        let mut s = String::new();
        loop {
            match r.p(0) {
                None | Some(EOL) => {
                    return Err(ParseError::lexical("unexpected EOL", r.getpos()));
                }
                Some('\'') => {
                    r.seek_cur(1);
                    if r.p(0) == Some('\'') {
                        r.seek_cur(1);
                        s.push_str("''");
                    } else {
                        break;
                    }
                }
                Some(c) => {
                    r.seek_cur(1);
                    s.push(c);
                }
            }
        }
        Ok(s)
    }

    /// Body of a double-quoted string; escapes are kept as written
    pub fn get_dstring(&mut self, r: &mut StringReader) -> ParseResult<String> {
        r.skip_white();
        let c = r.p(0);
        if c != Some('"') {
            return Err(unexpected_character(c, r.getpos()));
        }
        r.seek_cur(1);
        let mut s = String::new();
        loop {
            match r.p(0) {
                None | Some(EOL) => {
                    return Err(ParseError::lexical("unexpectd EOL", r.getpos()));
                }
                Some('"') => {
                    r.seek_cur(1);
                    break;
                }
                Some('\\') => {
                    r.seek_cur(1);
                    s.push('\\');
                    match r.p(0) {
                        None | Some(EOL) => {
                            return Err(ParseError::lexical(
                                "ExprTokenizer: unexpected EOL",
                                r.getpos(),
                            ));
                        }
                        Some(c) => {
                            r.seek_cur(1);
                            s.push(c);
                        }
                    }
                }
                Some(c) => {
                    r.seek_cur(1);
                    s.push(c);
                }
            }
        }
        Ok(s)
    }

    /// Key of a `#{...}` literal dict, returned as a quoted STRING node
    pub fn parse_dict_literal_key(&mut self, r: &mut StringReader) -> ParseResult<Node> {
        let is_keyc = |c: char| is_alnum(c) || c == '_' || c == '-';
        r.skip_white();
        let first = match r.peek() {
            Some(c) if is_keyc(c) => c,
            other => return Err(unexpected_character(other, r.getpos())),
        };
        let mut s = first.to_string();
        r.seek_cur(1);
        let pos = r.getpos();
        loop {
            match r.p(0) {
                None | Some(EOL) => {
                    return Err(ParseError::lexical("unexpectd EOL", r.getpos()));
                }
                Some(c) if is_keyc(c) => {
                    r.seek_cur(1);
                    s.push(c);
                }
                Some(_) => break,
            }
        }
        Ok(Node::new(
            NodeKind::String {
                value: format!("'{}'", s),
            },
            pos,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(src: &str) -> Vec<Token> {
        let mut reader = StringReader::new(&[src]);
        let mut tokenizer = ExprTokenizer::new();
        let mut out = Vec::new();
        loop {
            let token = tokenizer.get(&mut reader).unwrap();
            if token.is(TokenType::Eol) || token.is(TokenType::Eof) {
                break;
            }
            out.push(token);
        }
        out
    }

    fn kinds(src: &str) -> Vec<TokenType> {
        tokens(src).into_iter().map(|t| t.token_type).collect()
    }

    #[test]
    fn test_comparison_longest_match() {
        assert_eq!(
            kinds("a ==# b ==? c == d = e"),
            vec![
                TokenType::Identifier,
                TokenType::EqEqCs,
                TokenType::Identifier,
                TokenType::EqEqCi,
                TokenType::Identifier,
                TokenType::EqEq,
                TokenType::Identifier,
                TokenType::Eq,
                TokenType::Identifier,
            ]
        );
        assert_eq!(kinds(">=? <# !~"), vec![TokenType::GtEqCi, TokenType::LtCs, TokenType::NoMatch]);
    }

    #[test]
    fn test_logical_operators() {
        assert_eq!(
            kinds("a||b && !c | d"),
            vec![
                TokenType::Identifier,
                TokenType::OrOr,
                TokenType::Identifier,
                TokenType::AndAnd,
                TokenType::Not,
                TokenType::Identifier,
                TokenType::Or,
                TokenType::Identifier,
            ]
        );
    }

    #[test]
    fn test_dots() {
        assert_eq!(
            kinds(". .. ..."),
            vec![TokenType::Dot, TokenType::DotDot, TokenType::DotDotDot]
        );
    }

    #[test]
    fn test_numbers() {
        let t = tokens("0x1F 0b101 1.5e-3 1.e3 42");
        let values: Vec<&str> = t.iter().map(|t| t.value.as_str()).collect();
        assert_eq!(values, vec!["0x1F", "0b101", "1.5e-3", "1", ".", "e3", "42"]);
    }

    #[test]
    fn test_blob() {
        let t = tokens("0zFF00.11");
        assert_eq!(t[0].token_type, TokenType::Blob);
        assert_eq!(t[0].value, "0zFF00.11");
    }

    #[test]
    fn test_is_operators_need_boundary() {
        assert_eq!(kinds("a is# b"), vec![TokenType::Identifier, TokenType::IsCs, TokenType::Identifier]);
        assert_eq!(kinds("isnot?"), vec![TokenType::IsNotCi]);
        assert_eq!(kinds("island"), vec![TokenType::Identifier]);
    }

    #[test]
    fn test_sigils() {
        let t = tokens("$HOME @a &l:tw &ts");
        assert_eq!(t[0].value, "$HOME");
        assert_eq!(t[1].token_type, TokenType::Reg);
        assert_eq!(t[1].value, "@a");
        assert_eq!(t[2].value, "&l:tw");
        assert_eq!(t[3].value, "&ts");
    }

    #[test]
    fn test_identifier_with_scope() {
        let t = tokens("s:foo#bar");
        assert_eq!(t.len(), 1);
        assert_eq!(t[0].value, "s:foo#bar");
    }

    #[test]
    fn test_unexpected_character() {
        let mut reader = StringReader::new(&["\\"]);
        let err = ExprTokenizer::new().get(&mut reader).unwrap_err();
        assert_eq!(err.message, "unexpected character: \\");
    }

    #[test]
    fn test_cache_returns_same_token() {
        let mut reader = StringReader::new(&["  foo bar"]);
        let mut tokenizer = ExprTokenizer::new();
        let a = tokenizer.peek(&mut reader).unwrap();
        let b = tokenizer.get(&mut reader).unwrap();
        assert_eq!(a, b);
        assert_eq!(b.pos.column, 3);
        assert_eq!(reader.tell(), 5);
    }

    #[test]
    fn test_strings() {
        let mut reader = StringReader::new(&["'it''s' \"a\\\"b\""]);
        let mut tokenizer = ExprTokenizer::new();
        assert_eq!(tokenizer.get_sstring(&mut reader).unwrap(), "it''s");
        assert_eq!(tokenizer.get_dstring(&mut reader).unwrap(), "a\\\"b");

        let mut reader = StringReader::new(&["\"abc"]);
        let err = tokenizer.get_dstring(&mut reader).unwrap_err();
        assert_eq!(err.message, "unexpectd EOL");
    }

    #[test]
    fn test_dict_literal_key() {
        let mut reader = StringReader::new(&["foo-bar: 1"]);
        let node = ExprTokenizer::new().parse_dict_literal_key(&mut reader).unwrap();
        assert_eq!(node.value_str(), Some("'foo-bar'"));
        assert_eq!(reader.peek(), Some(':'));
    }
}
