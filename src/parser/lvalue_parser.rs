//! Lvalue Parser
//!
//! Assignment targets reuse the expression machinery but accept a narrower
//! grammar: only subscript, slice and dot postfixes, and only names,
//! options, environment variables and registers as primaries.

use crate::ast::types::{Node, NodeKind};
use crate::parser::expression_parser::{unexpected_token, ExprParser};
use crate::parser::lexer::TokenType;
use crate::parser::reader::StringReader;
use crate::parser::types::{is_white, opt_is, ParseResult};

pub struct LvalueParser<'a> {
    expr: ExprParser<'a>,
}

impl<'a> LvalueParser<'a> {
    pub fn new(reader: &'a mut StringReader) -> Self {
        Self {
            expr: ExprParser::new(reader),
        }
    }

    pub fn parse(&mut self) -> ParseResult<Node> {
        self.parse_lv8()
    }

    /// lv8: lv8[expr1], lv8[expr1 : expr1], lv8.name
    fn parse_lv8(&mut self) -> ParseResult<Node> {
        let mut left = self.parse_lv9()?;
        loop {
            let saved = self.expr.tell();
            let adjacent = !opt_is(self.expr.peek_char(), is_white);
            let token = self.expr.next_token()?;
            left = match token.token_type {
                TokenType::SqOpen if adjacent => self.expr.parse_index(left, token.pos)?,
                TokenType::Dot if adjacent => match self.expr.parse_dot(&token, left) {
                    Ok(node) => node,
                    Err(left) => {
                        self.expr.rewind(saved);
                        return Ok(left);
                    }
                },
                _ => {
                    self.expr.rewind(saved);
                    return Ok(left);
                }
            };
        }
    }

    /// lv9: &option, variable, var{ria}ble, <SID>name, $VAR, @r
    fn parse_lv9(&mut self) -> ParseResult<Node> {
        let saved = self.expr.tell();
        let token = self.expr.next_token()?;
        match token.token_type {
            TokenType::COpen | TokenType::Identifier => {
                self.expr.rewind(saved);
                self.expr.parse_identifier()
            }
            TokenType::Lt if self.expr.after_lt_is_sid() => {
                self.expr.rewind(saved);
                self.expr.parse_identifier()
            }
            TokenType::Option => Ok(Node::new(
                NodeKind::VimOption { value: token.value },
                token.pos,
            )),
            TokenType::Env => Ok(Node::new(NodeKind::Env { value: token.value }, token.pos)),
            TokenType::Reg => Ok(Node::new(NodeKind::Reg { value: token.value }, token.pos)),
            _ => Err(unexpected_token(&token)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::types::NodeType;
    use crate::serializer::compile_expr;

    fn parse(src: &str) -> ParseResult<Node> {
        let mut reader = StringReader::new(&[src]);
        LvalueParser::new(&mut reader).parse()
    }

    #[test]
    fn test_parse_lvalue_targets() {
        assert_eq!(compile_expr(&parse("x").unwrap()), "x");
        assert_eq!(compile_expr(&parse("d.key").unwrap()), "(dot d key)");
        assert_eq!(compile_expr(&parse("l[0]").unwrap()), "(subscript l 0)");
        assert_eq!(compile_expr(&parse("l[1:]").unwrap()), "(slice l 1 nil)");
        assert_eq!(parse("&l:tw").unwrap().node_type(), NodeType::Option);
        assert_eq!(parse("$FOO").unwrap().node_type(), NodeType::Env);
        assert_eq!(parse("@a").unwrap().node_type(), NodeType::Reg);
        assert_eq!(parse("{n}_var").unwrap().node_type(), NodeType::CurlyName);
    }

    #[test]
    fn test_parse_lvalue_stops_before_call() {
        let mut reader = StringReader::new(&["f(1)"]);
        let node = LvalueParser::new(&mut reader).parse().unwrap();
        assert_eq!(node.node_type(), NodeType::Identifier);
        assert_eq!(reader.peekline(), "(1)");
    }

    #[test]
    fn test_parse_lvalue_rejects_literals() {
        assert_eq!(parse("1").unwrap_err().message, "unexpected token: 1");
        assert!(parse("[a, b]").is_err());
    }
}
