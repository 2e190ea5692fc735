//! Parser module for VimL scripts
//!
//! This module contains the source reader, the expression tokenizer and
//! parsers, the Ex command table and the statement parser.

pub mod types;
pub mod reader;
pub mod lexer;
pub mod command_table;
pub mod expression_parser;
pub mod lvalue_parser;
pub mod compound_parser;
pub mod command_parser;
pub mod parser;

// Re-exports
pub use types::{ErrorKind, ParseError, ParseResult, ParserOptions};
pub use reader::StringReader;
pub use lexer::{ExprTokenizer, Token, TokenType};
pub use expression_parser::ExprParser;
pub use lvalue_parser::LvalueParser;
pub use command_table::{Command, CommandFlags};
pub use parser::Parser;

use crate::ast::types::Node;

/// Parse a script given as lines, without line terminators
pub fn parse_lines<S: AsRef<str>>(lines: &[S], options: &ParserOptions) -> ParseResult<Node> {
    let mut parser = Parser::new(options.clone());
    parser.parse(StringReader::new(lines))
}

/// Parse a whole source text. A BOM is dropped and CRLF endings are accepted.
pub fn parse_str(source: &str, options: &ParserOptions) -> ParseResult<Node> {
    let mut parser = Parser::new(options.clone());
    parser.parse(StringReader::from_source(source))
}

/// Parse a single expression; text after it is ignored
pub fn parse_expr(source: &str) -> ParseResult<Node> {
    let mut reader = StringReader::new(&[source]);
    ExprParser::new(&mut reader).parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::types::NodeType;
    use crate::serializer::{compile, compile_expr};

    #[test]
    fn test_parse_str_matches_parse_lines() {
        let opts = ParserOptions::default();
        let a = parse_str("\u{feff}let x = 1\r\necho x\r\n", &opts).unwrap();
        let b = parse_lines(&["let x = 1", "echo x", ""], &opts).unwrap();
        assert_eq!(compile(&a), compile(&b));
    }

    #[test]
    fn test_parse_is_deterministic() {
        let src = "function! s:F(a, ...) abort\n  return a:a + len(a:000)\nendfunction\n";
        let opts = ParserOptions::default();
        let first = compile(&parse_str(src, &opts).unwrap());
        let second = compile(&parse_str(src, &opts).unwrap());
        assert_eq!(first, second);
    }

    #[test]
    fn test_end_to_end_if_let() {
        let top = parse_lines(&["if 1", "  let x = 1", "endif"], &ParserOptions::default()).unwrap();
        let body = top.body().unwrap();
        assert!(body[0].is(NodeType::If));
        assert!(body[0].body().unwrap()[0].is(NodeType::Let));
        assert_eq!(compile(&top), ["(if 1", "  (let = x 1))"]);
    }

    #[test]
    fn test_parse_expr_ignores_trailing_text() {
        let node = parse_expr("a.b | echo").unwrap();
        assert_eq!(compile_expr(&node), "(dot a b)");
        assert!(parse_expr("(1").is_err());
    }

    #[test]
    fn test_neovim_option_changes_command_set() {
        let vim = ParserOptions::default();
        let nvim = ParserOptions { neovim: true };
        assert!(parse_lines(&["rshada"], &vim).is_err());
        assert!(parse_lines(&["rshada"], &nvim).is_ok());
        assert!(parse_lines(&["fixdel"], &nvim).is_err());
    }
}
