//! Expression Parser
//!
//! Recursive descent over the nine VimL precedence levels:
//!
//! ```text
//! expr1  ternary        a ? b : c          (right associative)
//! expr2  logical or     a || b
//! expr3  logical and    a && b
//! expr4  comparison     a == b, a is# b    (not chained)
//! expr5  additive       a + b, a - b, a . b, a .. b
//! expr6  multiplicative a * b, a / b, a % b
//! expr7  unary          !a, -a, +a
//! expr8  postfix        a[i], a[i:j], a.name, a(args), a->f(args)
//! expr9  primary        literals, names, (expr), lambdas
//! ```
//!
//! Every level that looks ahead for an operator snapshots the reader cursor
//! first and restores it exactly when the operator does not match.

use crate::ast::types::{BinaryOp, Node, NodeKind, NodeType, Position, UnaryOp, AST};
use crate::parser::lexer::{ExprTokenizer, Token, TokenType};
use crate::parser::reader::StringReader;
use crate::parser::types::{
    describe_char, is_argname, is_namec, is_white, is_wordc, opt_is, ParseError, ParseResult,
    MAX_FUNC_ARGS,
};

pub(crate) fn unexpected_token(token: &Token) -> ParseError {
    ParseError::syntax(format!("unexpected token: {}", token.value), token.pos)
}

fn comparison_op(t: TokenType) -> Option<BinaryOp> {
    let op = match t {
        TokenType::EqEq => BinaryOp::Equal,
        TokenType::EqEqCi => BinaryOp::EqualCi,
        TokenType::EqEqCs => BinaryOp::EqualCs,
        TokenType::NEq => BinaryOp::NEqual,
        TokenType::NEqCi => BinaryOp::NEqualCi,
        TokenType::NEqCs => BinaryOp::NEqualCs,
        TokenType::Gt => BinaryOp::Greater,
        TokenType::GtCi => BinaryOp::GreaterCi,
        TokenType::GtCs => BinaryOp::GreaterCs,
        TokenType::GtEq => BinaryOp::GEqual,
        TokenType::GtEqCi => BinaryOp::GEqualCi,
        TokenType::GtEqCs => BinaryOp::GEqualCs,
        TokenType::Lt => BinaryOp::Smaller,
        TokenType::LtCi => BinaryOp::SmallerCi,
        TokenType::LtCs => BinaryOp::SmallerCs,
        TokenType::LtEq => BinaryOp::SEqual,
        TokenType::LtEqCi => BinaryOp::SEqualCi,
        TokenType::LtEqCs => BinaryOp::SEqualCs,
        TokenType::Match => BinaryOp::Match,
        TokenType::MatchCi => BinaryOp::MatchCi,
        TokenType::MatchCs => BinaryOp::MatchCs,
        TokenType::NoMatch => BinaryOp::NoMatch,
        TokenType::NoMatchCi => BinaryOp::NoMatchCi,
        TokenType::NoMatchCs => BinaryOp::NoMatchCs,
        TokenType::Is => BinaryOp::Is,
        TokenType::IsCi => BinaryOp::IsCi,
        TokenType::IsCs => BinaryOp::IsCs,
        TokenType::IsNot => BinaryOp::IsNot,
        TokenType::IsNotCi => BinaryOp::IsNotCi,
        TokenType::IsNotCs => BinaryOp::IsNotCs,
        _ => return None,
    };
    Some(op)
}

fn additive_op(t: TokenType) -> Option<BinaryOp> {
    match t {
        TokenType::Plus => Some(BinaryOp::Add),
        TokenType::Minus => Some(BinaryOp::Subtract),
        TokenType::Dot | TokenType::DotDot => Some(BinaryOp::Concat),
        _ => None,
    }
}

fn multiplicative_op(t: TokenType) -> Option<BinaryOp> {
    match t {
        TokenType::Star => Some(BinaryOp::Multiply),
        TokenType::Slash => Some(BinaryOp::Divide),
        TokenType::Percent => Some(BinaryOp::Remainder),
        _ => None,
    }
}

fn unary_op(t: TokenType) -> Option<UnaryOp> {
    match t {
        TokenType::Not => Some(UnaryOp::Not),
        TokenType::Minus => Some(UnaryOp::Minus),
        TokenType::Plus => Some(UnaryOp::Plus),
        _ => None,
    }
}

pub struct ExprParser<'a> {
    reader: &'a mut StringReader,
    tokenizer: ExprTokenizer,
}

impl<'a> ExprParser<'a> {
    pub fn new(reader: &'a mut StringReader) -> Self {
        Self {
            reader,
            tokenizer: ExprTokenizer::new(),
        }
    }

    pub fn parse(&mut self) -> ParseResult<Node> {
        self.parse_expr1()
    }

    // =========================================================================
    // READER ACCESS
    // =========================================================================

    pub(crate) fn tell(&self) -> usize {
        self.reader.tell()
    }

    pub(crate) fn rewind(&mut self, cursor: usize) {
        self.reader.seek_set(cursor);
    }

    pub(crate) fn peek_char(&self) -> Option<char> {
        self.reader.peek()
    }

    pub(crate) fn next_token(&mut self) -> ParseResult<Token> {
        self.tokenizer.get(self.reader)
    }

    pub(crate) fn peek_token(&mut self) -> ParseResult<Token> {
        self.tokenizer.peek(self.reader)
    }

    /// True when the reader continues with `<SID>` in any case, with the
    /// leading `<` already consumed
    pub(crate) fn after_lt_is_sid(&mut self) -> bool {
        self.reader.peekn(4).eq_ignore_ascii_case("SID>")
    }

    // =========================================================================
    // BINARY LEVELS
    // =========================================================================

    /// expr1: expr2 ? expr1 : expr1
    fn parse_expr1(&mut self) -> ParseResult<Node> {
        let left = self.parse_expr2()?;
        let saved = self.tell();
        let token = self.next_token()?;
        if !token.is(TokenType::Question) {
            self.rewind(saved);
            return Ok(left);
        }
        let then = self.parse_expr1()?;
        let colon = self.next_token()?;
        if !colon.is(TokenType::Colon) {
            return Err(unexpected_token(&colon));
        }
        let otherwise = self.parse_expr1()?;
        Ok(Node::new(
            NodeKind::Ternary {
                cond: Box::new(left),
                left: Box::new(then),
                right: Box::new(otherwise),
            },
            token.pos,
        ))
    }

    /// Left-associative loop over one precedence level
    fn parse_binary_level(
        &mut self,
        operand: fn(&mut Self) -> ParseResult<Node>,
        operator: fn(TokenType) -> Option<BinaryOp>,
    ) -> ParseResult<Node> {
        let mut left = operand(self)?;
        loop {
            let saved = self.tell();
            let token = self.next_token()?;
            match operator(token.token_type) {
                Some(op) => {
                    let right = operand(self)?;
                    left = AST::binary(op, left, right, token.pos);
                }
                None => {
                    self.rewind(saved);
                    return Ok(left);
                }
            }
        }
    }

    /// expr2: expr3 || expr3 ..
    fn parse_expr2(&mut self) -> ParseResult<Node> {
        self.parse_binary_level(Self::parse_expr3, |t| {
            (t == TokenType::OrOr).then_some(BinaryOp::Or)
        })
    }

    /// expr3: expr4 && expr4 ..
    fn parse_expr3(&mut self) -> ParseResult<Node> {
        self.parse_binary_level(Self::parse_expr4, |t| {
            (t == TokenType::AndAnd).then_some(BinaryOp::And)
        })
    }

    /// expr4: expr5 OP expr5, a single comparison
    fn parse_expr4(&mut self) -> ParseResult<Node> {
        let left = self.parse_expr5()?;
        let saved = self.tell();
        let token = self.next_token()?;
        match comparison_op(token.token_type) {
            Some(op) => {
                let right = self.parse_expr5()?;
                Ok(AST::binary(op, left, right, token.pos))
            }
            None => {
                self.rewind(saved);
                Ok(left)
            }
        }
    }

    /// expr5: expr6 + expr6 .., also `-`, `.` and `..`
    fn parse_expr5(&mut self) -> ParseResult<Node> {
        self.parse_binary_level(Self::parse_expr6, additive_op)
    }

    /// expr6: expr7 * expr7 .., also `/` and `%`
    fn parse_expr6(&mut self) -> ParseResult<Node> {
        self.parse_binary_level(Self::parse_expr7, multiplicative_op)
    }

    /// expr7: ! expr7, - expr7, + expr7
    fn parse_expr7(&mut self) -> ParseResult<Node> {
        let saved = self.tell();
        let token = self.next_token()?;
        match unary_op(token.token_type) {
            Some(op) => {
                let operand = self.parse_expr7()?;
                Ok(AST::unary(op, operand, token.pos))
            }
            None => {
                self.rewind(saved);
                self.parse_expr8()
            }
        }
    }

    // =========================================================================
    // POSTFIX
    // =========================================================================

    fn parse_expr8(&mut self) -> ParseResult<Node> {
        let mut left = self.parse_expr9()?;
        loop {
            let saved = self.tell();
            let c = self.peek_char();
            let token = self.next_token()?;
            let adjacent = !opt_is(c, is_white);
            left = match token.token_type {
                TokenType::SqOpen if adjacent => self.parse_index(left, token.pos)?,
                TokenType::Arrow => {
                    let callee = self.parse_expr9()?;
                    let popen = self.next_token()?;
                    if !popen.is(TokenType::POpen) {
                        return Err(ParseError::syntax(
                            "E107: Missing parentheses: lambda",
                            popen.pos,
                        ));
                    }
                    let rlist = self.parse_rlist()?;
                    let call = AST::call(callee, rlist, popen.pos);
                    Node::new(
                        NodeKind::Method {
                            left: Box::new(left),
                            right: Box::new(call),
                        },
                        popen.pos,
                    )
                }
                TokenType::POpen => {
                    let rlist = self.parse_rlist()?;
                    AST::call(left, rlist, token.pos)
                }
                TokenType::Dot if adjacent => match self.parse_dot(&token, left) {
                    Ok(node) => node,
                    Err(left) => {
                        self.rewind(saved);
                        return Ok(left);
                    }
                },
                _ => {
                    self.rewind(saved);
                    return Ok(left);
                }
            };
        }
    }

    /// Rest of `[i]`, `[i:j]`, `[:j]`, `[i:]` or `[:]` after the bracket
    pub(crate) fn parse_index(&mut self, left: Node, npos: Position) -> ParseResult<Node> {
        let lower = if self.peek_token()?.is(TokenType::Colon) {
            None
        } else {
            Some(self.parse_expr1()?)
        };
        let lower = match lower {
            Some(right) if !self.peek_token()?.is(TokenType::Colon) => {
                let token = self.next_token()?;
                if !token.is(TokenType::SqClose) {
                    return Err(unexpected_token(&token));
                }
                return Ok(Node::new(
                    NodeKind::Subscript {
                        left: Box::new(left),
                        right: Box::new(right),
                    },
                    npos,
                ));
            }
            lower => lower,
        };

        self.next_token()?;
        let upper = if self.peek_token()?.is(TokenType::SqClose) {
            None
        } else {
            Some(Box::new(self.parse_expr1()?))
        };
        let token = self.next_token()?;
        if !token.is(TokenType::SqClose) {
            return Err(unexpected_token(&token));
        }
        Ok(Node::new(
            NodeKind::Slice {
                left: Box::new(left),
                rlist: [lower.map(Box::new), upper],
            },
            npos,
        ))
    }

    /// Call arguments after `(`; a trailing comma is accepted
    fn parse_rlist(&mut self) -> ParseResult<Vec<Node>> {
        let mut rlist = Vec::new();
        let mut token = self.peek_token()?;
        if token.is(TokenType::PClose) {
            self.next_token()?;
        } else {
            loop {
                rlist.push(self.parse_expr1()?);
                token = self.next_token()?;
                match token.token_type {
                    TokenType::Comma => {
                        if self.peek_token()?.is(TokenType::PClose) {
                            self.next_token()?;
                            break;
                        }
                    }
                    TokenType::PClose => break,
                    _ => return Err(unexpected_token(&token)),
                }
            }
        }
        if rlist.len() > MAX_FUNC_ARGS {
            return Err(ParseError::syntax(
                "E740: Too many arguments for function",
                token.pos,
            ));
        }
        Ok(rlist)
    }

    /// `name.key` dictionary access. Hands `left` back when the dot has to
    /// be read as concatenation instead.
    pub(crate) fn parse_dot(&mut self, token: &Token, left: Node) -> Result<Node, Node> {
        let dottable = matches!(
            left.node_type(),
            NodeType::Identifier
                | NodeType::CurlyName
                | NodeType::Dict
                | NodeType::Subscript
                | NodeType::Call
                | NodeType::Dot
        );
        if !dottable || !opt_is(self.reader.p(0), is_wordc) {
            return Err(left);
        }
        let pos = self.reader.getpos();
        let name = self.reader.read_word();
        // foo.s:bar or foo.bar#baz
        if opt_is(self.reader.p(0), is_namec) {
            return Err(left);
        }
        Ok(Node::new(
            NodeKind::Dot {
                left: Box::new(left),
                right: Box::new(AST::identifier(name, pos)),
            },
            token.pos,
        ))
    }

    // =========================================================================
    // PRIMARY
    // =========================================================================

    fn parse_expr9(&mut self) -> ParseResult<Node> {
        let saved = self.tell();
        let token = self.next_token()?;
        match token.token_type {
            TokenType::Number => Ok(Node::new(NodeKind::Number { value: token.value }, token.pos)),
            TokenType::Blob => Ok(Node::new(NodeKind::Blob { value: token.value }, token.pos)),
            TokenType::DQuote => {
                self.rewind(saved);
                let body = self.tokenizer.get_dstring(self.reader)?;
                Ok(Node::new(
                    NodeKind::String { value: format!("\"{}\"", body) },
                    token.pos,
                ))
            }
            TokenType::SQuote => {
                self.rewind(saved);
                let body = self.tokenizer.get_sstring(self.reader)?;
                Ok(Node::new(
                    NodeKind::String { value: format!("'{}'", body) },
                    token.pos,
                ))
            }
            TokenType::SqOpen => self.parse_list(token.pos),
            TokenType::COpen | TokenType::LitCOpen => self.parse_brace(saved, token),
            TokenType::POpen => {
                let node = self.parse_expr1()?;
                let close = self.next_token()?;
                if !close.is(TokenType::PClose) {
                    return Err(unexpected_token(&close));
                }
                Ok(node)
            }
            TokenType::Option => Ok(Node::new(NodeKind::VimOption { value: token.value }, token.pos)),
            TokenType::Identifier => {
                self.rewind(saved);
                self.parse_identifier()
            }
            TokenType::Lt if self.after_lt_is_sid() => {
                self.rewind(saved);
                self.parse_identifier()
            }
            TokenType::Is | TokenType::IsCs | TokenType::IsNot | TokenType::IsNotCs => {
                self.rewind(saved);
                self.parse_identifier()
            }
            TokenType::Env => Ok(Node::new(NodeKind::Env { value: token.value }, token.pos)),
            TokenType::Reg => Ok(Node::new(NodeKind::Reg { value: token.value }, token.pos)),
            _ => Err(unexpected_token(&token)),
        }
    }

    fn parse_list(&mut self, pos: Position) -> ParseResult<Node> {
        let mut value = Vec::new();
        if self.peek_token()?.is(TokenType::SqClose) {
            self.next_token()?;
        } else {
            loop {
                value.push(self.parse_expr1()?);
                let token = self.peek_token()?;
                match token.token_type {
                    TokenType::Comma => {
                        self.next_token()?;
                        if self.peek_token()?.is(TokenType::SqClose) {
                            self.next_token()?;
                            break;
                        }
                    }
                    TokenType::SqClose => {
                        self.next_token()?;
                        break;
                    }
                    _ => return Err(unexpected_token(&token)),
                }
            }
        }
        Ok(Node::new(NodeKind::List { value }, pos))
    }

    /// `{` opens a lambda, a dict or a curly-brace name; `#{` a literal dict
    fn parse_brace(&mut self, before_brace: usize, open: Token) -> ParseResult<Node> {
        let is_litdict = open.is(TokenType::LitCOpen);
        let after_brace = self.tell();
        let nodepos = open.pos;

        let token = self.next_token()?;
        let mut is_lambda = token.is(TokenType::Arrow);
        // a string cannot start a lambda parameter list
        if !is_lambda && !token.is(TokenType::SQuote) && !token.is(TokenType::DQuote) {
            let next = self.peek_token()?;
            is_lambda = next.is(TokenType::Arrow) || next.is(TokenType::Comma);
        }
        if is_lambda {
            if let Some(node) = self.parse_lambda(token, nodepos)? {
                return Ok(node);
            }
        }

        self.rewind(after_brace);
        let mut value: Vec<(Node, Node)> = Vec::new();
        if self.peek_token()?.is(TokenType::CClose) {
            self.next_token()?;
            return Ok(Node::new(NodeKind::Dict { value }, nodepos));
        }
        loop {
            let key = if is_litdict {
                self.tokenizer.parse_dict_literal_key(self.reader)?
            } else {
                self.parse_expr1()?
            };
            let token = self.next_token()?;
            if token.is(TokenType::CClose) {
                if !value.is_empty() {
                    return Err(unexpected_token(&token));
                }
                // `{name}` alone is a curly-brace variable name
                self.rewind(before_brace);
                return self.parse_identifier();
            }
            if !token.is(TokenType::Colon) {
                return Err(unexpected_token(&token));
            }
            let val = self.parse_expr1()?;
            value.push((key, val));
            let token = self.next_token()?;
            match token.token_type {
                TokenType::Comma => {
                    if self.peek_token()?.is(TokenType::CClose) {
                        self.next_token()?;
                        break;
                    }
                }
                TokenType::CClose => break,
                _ => return Err(unexpected_token(&token)),
            }
        }
        Ok(Node::new(NodeKind::Dict { value }, nodepos))
    }

    /// `{args -> expr}`. Returns `None` when the parameter list turns out not
    /// to be one, so the caller retries as a dict.
    fn parse_lambda(&mut self, first: Token, nodepos: Position) -> ParseResult<Option<Node>> {
        let mut rlist: Vec<Node> = Vec::new();
        let mut token = first;
        loop {
            match token.token_type {
                TokenType::Arrow => break,
                TokenType::Identifier => {
                    if !is_argname(&token.value) {
                        return Err(ParseError::syntax(
                            format!("E125: Illegal argument: {}", token.value),
                            token.pos,
                        ));
                    }
                    if rlist.iter().any(|n| n.value_str() == Some(token.value.as_str())) {
                        return Err(ParseError::syntax(
                            format!("E853: Duplicate argument name: {}", token.value),
                            token.pos,
                        ));
                    }
                    if opt_is(self.reader.p(0), is_white)
                        && self.peek_token()?.is(TokenType::Comma)
                    {
                        return Err(ParseError::syntax(
                            "E475: Invalid argument: White space is not allowed before comma",
                            self.reader.getpos(),
                        ));
                    }
                    rlist.push(AST::identifier(token.value.clone(), token.pos));
                    let next = self.next_token()?;
                    match next.token_type {
                        TokenType::Comma => {
                            // `{a, b, -> ...}` is accepted
                            if self.peek_token()?.is(TokenType::Arrow) {
                                self.next_token()?;
                                break;
                            }
                        }
                        TokenType::Arrow => break,
                        _ => {
                            return Err(ParseError::syntax(
                                format!(
                                    "unexpected token: {}, type: {}",
                                    next.value,
                                    next.token_type.code()
                                ),
                                next.pos,
                            ));
                        }
                    }
                }
                TokenType::DotDotDot => {
                    rlist.push(AST::identifier(token.value.clone(), token.pos));
                    let next = self.peek_token()?;
                    if next.is(TokenType::Arrow) {
                        self.next_token()?;
                        break;
                    }
                    return Err(unexpected_token(&next));
                }
                _ => return Ok(None),
            }
            token = self.next_token()?;
        }

        let body = self.parse_expr1()?;
        let close = self.next_token()?;
        if !close.is(TokenType::CClose) {
            return Err(unexpected_token(&close));
        }
        Ok(Some(Node::new(
            NodeKind::Lambda {
                rlist,
                left: Box::new(body),
            },
            nodepos,
        )))
    }

    // =========================================================================
    // NAMES
    // =========================================================================

    /// Plain name, `<SID>name` or `name{expr}name` curly-brace name
    pub(crate) fn parse_identifier(&mut self) -> ParseResult<Node> {
        self.reader.skip_white();
        let npos = self.reader.getpos();
        let mut parts = self.parse_curly_parts()?;
        if let [Node {
            kind: NodeKind::CurlyNamePart { value },
            ..
        }] = parts.as_mut_slice()
        {
            return Ok(AST::identifier(std::mem::take(value), npos));
        }
        Ok(Node::new(NodeKind::CurlyName { value: parts }, npos))
    }

    fn parse_curly_parts(&mut self) -> ParseResult<Vec<Node>> {
        let mut parts = Vec::new();
        if self.reader.peek() == Some('<') && self.reader.peekn(5).eq_ignore_ascii_case("<SID>") {
            let pos = self.reader.getpos();
            let name = self.reader.getn(5);
            parts.push(Node::new(NodeKind::CurlyNamePart { value: name }, pos));
        }
        loop {
            match self.reader.peek() {
                Some(c) if is_namec(c) => {
                    let pos = self.reader.getpos();
                    let name = self.reader.read_name();
                    parts.push(Node::new(NodeKind::CurlyNamePart { value: name }, pos));
                }
                Some('{') => {
                    self.reader.get();
                    let pos = self.reader.getpos();
                    let inner = self.parse_expr1()?;
                    parts.push(Node::new(
                        NodeKind::CurlyNameExpr { value: Box::new(inner) },
                        pos,
                    ));
                    self.reader.skip_white();
                    let c = self.reader.p(0);
                    if c != Some('}') {
                        return Err(ParseError::syntax(
                            format!("unexpected token: {}", describe_char(c)),
                            self.reader.getpos(),
                        ));
                    }
                    self.reader.seek_cur(1);
                }
                _ => break,
            }
        }
        Ok(parts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::serializer::compile_expr;

    fn parse(src: &str) -> ParseResult<Node> {
        let mut reader = StringReader::new(&[src]);
        ExprParser::new(&mut reader).parse()
    }

    fn sexp(src: &str) -> String {
        compile_expr(&parse(src).unwrap())
    }

    #[test]
    fn test_parse_precedence() {
        assert_eq!(sexp("1 + 2 * 3"), "(+ 1 (* 2 3))");
        assert_eq!(sexp("(1 + 2) * 3"), "(* (+ 1 2) 3)");
        assert_eq!(sexp("1 - 2 - 3"), "(- (- 1 2) 3)");
        assert_eq!(sexp("!a && b || c"), "(|| (&& (! a) b) c)");
    }

    #[test]
    fn test_parse_ternary() {
        assert_eq!(sexp("1 == 2 ? 3 : 4"), "(?: (== 1 2) 3 4)");
        assert_eq!(sexp("a ? b : c ? d : e"), "(?: a b (?: c d e))");
        let err = parse("a ? b c").unwrap_err();
        assert_eq!(err.message, "unexpected token: c");
    }

    #[test]
    fn test_parse_case_variants() {
        let plain = parse("a == b").unwrap();
        let cs = parse("a ==# b").unwrap();
        let ci = parse("a ==? b").unwrap();
        assert_eq!(plain.node_type(), NodeType::Equal);
        assert_eq!(cs.node_type(), NodeType::EqualCs);
        assert_eq!(ci.node_type(), NodeType::EqualCi);
        assert_eq!(sexp("a isnot# b"), "(isnot# a b)");
    }

    #[test]
    fn test_parse_comparison_does_not_chain() {
        let mut reader = StringReader::new(&["1 < 2 < 3"]);
        let node = ExprParser::new(&mut reader).parse().unwrap();
        assert_eq!(compile_expr(&node), "(< 1 2)");
        assert_eq!(reader.peekline(), " < 3");
    }

    #[test]
    fn test_parse_dot_vs_concat() {
        assert_eq!(sexp("foo.bar"), "(dot foo bar)");
        assert_eq!(sexp("\"foo\".bar"), "(concat \"foo\" bar)");
        assert_eq!(sexp("foo . bar"), "(concat foo bar)");
        assert_eq!(sexp("foo.bar#baz"), "(concat foo bar#baz)");
        assert_eq!(sexp("a .. b"), "(concat a b)");
    }

    #[test]
    fn test_parse_curly_vs_dict() {
        let curly = parse("{1}{2}").unwrap();
        assert_eq!(curly.node_type(), NodeType::CurlyName);
        assert_eq!(compile_expr(&curly), "{1}{2}");
        assert_eq!(parse("{1:2}").unwrap().node_type(), NodeType::Dict);
        assert_eq!(sexp("{}"), "(dict)");
        assert_eq!(sexp("{'a': 1, 'b': 2,}"), "(dict ('a' 1) ('b' 2))");
        assert_eq!(sexp("#{a-b: 1}"), "(dict ('a-b' 1))");
        assert_eq!(sexp("foo{bar}baz"), "foo{bar}baz");
    }

    #[test]
    fn test_parse_lambda() {
        assert_eq!(sexp("{x, y -> x + y}"), "(lambda (x y) (+ x y))");
        assert_eq!(sexp("{-> 1}"), "(lambda () 1)");
        assert_eq!(sexp("{a, ... -> a}"), "(lambda (a ...) a)");
        assert_eq!(sexp("{a, -> a}"), "(lambda (a) a)");
        assert!(parse("{a, a -> 1}")
            .unwrap_err()
            .message
            .starts_with("E853: Duplicate argument name"));
        assert!(parse("{a:b -> 1}").is_err());
        assert_eq!(
            parse("{a , b -> 1}").unwrap_err().message,
            "E475: Invalid argument: White space is not allowed before comma"
        );
    }

    #[test]
    fn test_parse_subscript_and_slice() {
        assert_eq!(sexp("a[1]"), "(subscript a 1)");
        assert_eq!(sexp("a[1:2]"), "(slice a 1 2)");
        assert_eq!(sexp("a[:2]"), "(slice a nil 2)");
        assert_eq!(sexp("a[1:]"), "(slice a 1 nil)");
        assert_eq!(sexp("a[:]"), "(slice a nil nil)");
        // `[` after whitespace is not a subscript
        let mut reader = StringReader::new(&["a [1]"]);
        let node = ExprParser::new(&mut reader).parse().unwrap();
        assert_eq!(node.node_type(), NodeType::Identifier);
    }

    #[test]
    fn test_parse_calls_and_methods() {
        assert_eq!(sexp("f()"), "(f)");
        assert_eq!(sexp("f(1, 2,)"), "(f 1 2)");
        assert_eq!(sexp("x->f(1)"), "(method x (f 1))");
        assert_eq!(
            parse("x->f").unwrap_err().message,
            "E107: Missing parentheses: lambda"
        );
        let args = vec!["1"; 21].join(", ");
        assert_eq!(
            parse(&format!("f({})", args)).unwrap_err().message,
            "E740: Too many arguments for function"
        );
        let args = vec!["1"; 20].join(", ");
        assert!(parse(&format!("f({})", args)).is_ok());
    }

    #[test]
    fn test_parse_primaries() {
        assert_eq!(sexp("[1, 2,]"), "(list 1 2)");
        assert_eq!(sexp("[]"), "(list)");
        assert_eq!(sexp("&l:tw"), "&l:tw");
        assert_eq!(sexp("$HOME"), "$HOME");
        assert_eq!(sexp("@a"), "@a");
        assert_eq!(sexp("<SID>foo"), "<SID>foo");
        assert_eq!(sexp("0z00FF"), "0z00FF");
        assert_eq!(sexp("'it''s'"), "'it''s'");
        assert_eq!(parse(")").unwrap_err().message, "unexpected token: )");
    }

    #[test]
    fn test_parse_unary_nesting() {
        assert_eq!(sexp("!-+x"), "(! (- (+ x)))");
    }
}
