//! Source Reader
//!
//! Character buffer over the logical lines of a script. Continuation lines
//! (`^\s*\\`) are spliced onto the previous line while every character keeps
//! its original line, column and offset. Each logical line ends with an EOL
//! marker, stored as `'\n'`; reading past the buffer yields `None`.
//!
//! The whole state is a single cursor, so callers snapshot with [`tell`] or
//! [`getpos`] and rewind with [`seek_set`] or [`setpos`].
//!
//! [`tell`]: StringReader::tell
//! [`getpos`]: StringReader::getpos
//! [`seek_set`]: StringReader::seek_set
//! [`setpos`]: StringReader::setpos

use lazy_static::lazy_static;
use regex_lite::Regex;

use crate::ast::types::Position;
use crate::parser::types::{
    is_alnum, is_alpha, is_digit, is_namec, is_odigit, is_white, is_wordc, is_xdigit, ParseError,
    ParseResult,
};

/// End-of-line marker inside the buffer
pub const EOL: char = '\n';

lazy_static! {
    static ref CONTINUATION_RE: Regex = Regex::new(r"^\s*\\").unwrap();
}

#[derive(Debug, Clone)]
pub struct StringReader {
    buf: Vec<char>,
    /// (line, column, offset) per buffer slot, plus one trailing EOF slot
    pos: Vec<(usize, usize, usize)>,
    i: usize,
}

impl StringReader {
    pub fn new<S: AsRef<str>>(lines: &[S]) -> Self {
        let mut buf = Vec::new();
        let mut pos = Vec::new();
        let mut lnum = 0;
        let mut offset = 0;

        while lnum < lines.len() {
            let mut col = 0;
            for c in lines[lnum].as_ref().chars() {
                buf.push(c);
                pos.push((lnum + 1, col + 1, offset));
                col += c.len_utf8();
                offset += c.len_utf8();
            }
            while lnum + 1 < lines.len() && CONTINUATION_RE.is_match(lines[lnum + 1].as_ref()) {
                let mut skip = true;
                col = 0;
                for c in lines[lnum + 1].as_ref().chars() {
                    if skip {
                        if c == '\\' {
                            skip = false;
                        }
                    } else {
                        buf.push(c);
                        pos.push((lnum + 2, col + 1, offset));
                    }
                    col += c.len_utf8();
                    offset += c.len_utf8();
                }
                lnum += 1;
                offset += 1;
            }
            buf.push(EOL);
            pos.push((lnum + 1, col + 1, offset));
            lnum += 1;
            offset += 1;
        }
        pos.push((lnum + 1, 0, offset));

        Self { buf, pos, i: 0 }
    }

    /// Build a reader from raw text: strips a UTF-8 BOM and normalizes
    /// CRLF and lone CR line endings.
    pub fn from_source(source: &str) -> Self {
        let source = source.strip_prefix('\u{feff}').unwrap_or(source);
        let normalized = source.replace("\r\n", "\n").replace('\r', "\n");
        let lines: Vec<&str> = normalized.split('\n').collect();
        Self::new(&lines)
    }

    pub fn eof(&self) -> bool {
        self.i >= self.buf.len()
    }

    pub fn tell(&self) -> usize {
        self.i
    }

    pub fn seek_set(&mut self, i: usize) {
        self.i = i;
    }

    pub fn seek_cur(&mut self, n: usize) {
        self.i += n;
    }

    pub fn seek_end(&mut self) {
        self.i = self.buf.len();
    }

    /// Character `n` slots ahead of the cursor
    pub fn p(&self, n: usize) -> Option<char> {
        self.buf.get(self.i + n).copied()
    }

    pub fn peek(&self) -> Option<char> {
        self.p(0)
    }

    pub fn get(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.i += 1;
        Some(c)
    }

    /// Next character on the current line; `None` at EOL or EOF
    pub fn peek1(&self) -> Option<char> {
        self.peek().filter(|&c| c != EOL)
    }

    pub fn peekn(&mut self, n: usize) -> String {
        let saved = self.i;
        let r = self.getn(n);
        self.i = saved;
        r
    }

    /// Up to `n` characters, stopping at EOL
    pub fn getn(&mut self, n: usize) -> String {
        self.take_line(Some(n))
    }

    /// Rest of the current line, without consuming the EOL
    pub fn getline(&mut self) -> String {
        self.take_line(None)
    }

    pub fn peekline(&mut self) -> String {
        let saved = self.i;
        let r = self.getline();
        self.i = saved;
        r
    }

    /// Rest of the current line, consuming the EOL
    pub fn readline(&mut self) -> String {
        let r = self.getline();
        self.get();
        r
    }

    fn take_line(&mut self, limit: Option<usize>) -> String {
        let mut r = String::new();
        let mut taken = 0;
        while let Some(&c) = self.buf.get(self.i) {
            if c == EOL || limit.map_or(false, |n| taken >= n) {
                break;
            }
            r.push(c);
            self.i += 1;
            taken += 1;
        }
        r
    }

    /// Text between two positions; EOL markers come back as newlines
    pub fn getstr(&self, begin: Position, end: Position) -> String {
        let end = end.cursor.min(self.buf.len());
        if begin.cursor >= end {
            return String::new();
        }
        self.buf[begin.cursor..end].iter().collect()
    }

    pub fn getpos(&self) -> Position {
        let slot = self.i.min(self.pos.len() - 1);
        let (line, column, offset) = self.pos[slot];
        Position::new(self.i, line, column, offset)
    }

    pub fn setpos(&mut self, pos: Position) {
        self.i = pos.cursor;
    }

    fn read_while(&mut self, pred: impl Fn(char) -> bool) -> String {
        let mut r = String::new();
        while let Some(c) = self.peek1().filter(|&c| pred(c)) {
            r.push(c);
            self.i += 1;
        }
        r
    }

    pub fn read_alpha(&mut self) -> String {
        self.read_while(is_alpha)
    }

    pub fn read_alnum(&mut self) -> String {
        self.read_while(is_alnum)
    }

    pub fn read_digit(&mut self) -> String {
        self.read_while(is_digit)
    }

    pub fn read_odigit(&mut self) -> String {
        self.read_while(is_odigit)
    }

    pub fn read_xdigit(&mut self) -> String {
        self.read_while(is_xdigit)
    }

    pub fn read_bdigit(&mut self) -> String {
        self.read_while(|c| c == '0' || c == '1')
    }

    /// Hex byte pairs, optionally separated by single dots
    pub fn read_blob(&mut self) -> ParseResult<String> {
        let mut r = String::new();
        loop {
            let s: Vec<char> = self.peekn(2).chars().collect();
            match s.as_slice() {
                [a, b] if is_xdigit(*a) && is_xdigit(*b) => r.push_str(&self.getn(2)),
                ['.', b] if is_xdigit(*b) => r.push_str(&self.getn(1)),
                [a, b] if is_xdigit(*a) => {
                    return Err(ParseError::lexical(
                        format!(
                            "E973: Blob literal should have an even number of hex characters:{}{}",
                            a, b
                        ),
                        self.getpos(),
                    ));
                }
                _ => break,
            }
        }
        Ok(r)
    }

    /// Optional sign followed by digits
    pub fn read_integer(&mut self) -> String {
        let mut r = String::new();
        if let Some(c @ ('-' | '+')) = self.peek1() {
            r.push(c);
            self.i += 1;
        }
        r.push_str(&self.read_digit());
        r
    }

    pub fn read_word(&mut self) -> String {
        self.read_while(is_wordc)
    }

    pub fn read_white(&mut self) -> String {
        self.read_while(is_white)
    }

    pub fn read_nonwhite(&mut self) -> String {
        self.read_while(|c| !is_white(c))
    }

    pub fn read_name(&mut self) -> String {
        self.read_while(is_namec)
    }

    pub fn skip_white(&mut self) {
        while self.peek1().map_or(false, is_white) {
            self.i += 1;
        }
    }

    pub fn skip_white_and_colon(&mut self) {
        while self.peek1().map_or(false, |c| is_white(c) || c == ':') {
            self.i += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_reading() {
        let mut r = StringReader::new(&["ab", "c"]);
        assert_eq!(r.get(), Some('a'));
        assert_eq!(r.peek(), Some('b'));
        assert_eq!(r.getn(5), "b");
        assert_eq!(r.get(), Some(EOL));
        assert_eq!(r.readline(), "c");
        assert!(r.eof());
        assert_eq!(r.get(), None);
        assert_eq!(r.getpos().column, 0);
    }

    #[test]
    fn test_continuation_keeps_positions() {
        let mut r = StringReader::new(&["let x = [1,", "      \\ 2]"]);
        assert_eq!(r.peekline(), "let x = [1, 2]");
        r.seek_set(11);
        let pos = r.getpos();
        assert_eq!(r.peek(), Some(' '));
        assert_eq!((pos.line, pos.column), (2, 8));
        assert_eq!(pos.offset, 18);
    }

    #[test]
    fn test_eol_position() {
        let mut r = StringReader::new(&["abc"]);
        r.seek_set(3);
        let pos = r.getpos();
        assert_eq!(r.peek(), Some(EOL));
        assert_eq!((pos.line, pos.column, pos.offset), (1, 4, 3));
    }

    #[test]
    fn test_getstr_maps_eol() {
        let mut r = StringReader::new(&["ab", "cd"]);
        let begin = r.getpos();
        r.seek_set(4);
        let end = r.getpos();
        assert_eq!(r.getstr(begin, end), "ab\nc");
    }

    #[test]
    fn test_read_runs() {
        let mut r = StringReader::new(&["foo_1:bar#baz 12"]);
        assert_eq!(r.peekn(3), "foo");
        assert_eq!(r.read_name(), "foo_1:bar#baz");
        r.skip_white();
        assert_eq!(r.read_integer(), "12");
        assert_eq!(r.read_nonwhite(), "");
    }

    #[test]
    fn test_read_blob() {
        let mut r = StringReader::new(&["0123.4567 x"]);
        assert_eq!(r.read_blob().unwrap(), "0123.4567");

        let mut r = StringReader::new(&["012x"]);
        let err = r.read_blob().unwrap_err();
        assert_eq!(
            err.message,
            "E973: Blob literal should have an even number of hex characters:2x"
        );
    }

    #[test]
    fn test_from_source_normalizes() {
        let mut r = StringReader::from_source("\u{feff}a\r\nb\rc");
        assert_eq!(r.readline(), "a");
        assert_eq!(r.readline(), "b");
        assert_eq!(r.readline(), "c");
    }

    #[test]
    fn test_skip_white_and_colon() {
        let mut r = StringReader::new(&[" :: :echo"]);
        r.skip_white_and_colon();
        assert_eq!(r.peekline(), "echo");
    }
}
