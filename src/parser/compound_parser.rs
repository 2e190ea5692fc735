//! Compound Command Parser
//!
//! Block commands: if, while, for, try, function and their closers, plus the
//! loop jumps. Openers push a node onto the context stack; closers check the
//! innermost context, attach their END node and pop it into the parent.

use crate::ast::types::{
    ExArg, ForNode, FunctionAttr, FunctionNode, IfNode, Node, NodeKind, NodeType, TryNode, AST,
};
use crate::parser::expression_parser::unexpected_token;
use crate::parser::lexer::{ExprTokenizer, TokenType};
use crate::parser::parser::{ends_excmds, Parser};
use crate::parser::types::{is_argname, is_white, opt_is, ParseError, ParseResult};

impl Parser {
    // =========================================================================
    // IF
    // =========================================================================

    pub(crate) fn parse_cmd_if(&mut self) -> ParseResult<()> {
        let cond = self.parse_expr()?;
        let pos = self.ea.cmdpos;
        let node = IfNode {
            ea: *self.take_ea(),
            cond,
            body: Vec::new(),
            elseif: Vec::new(),
            else_: None,
            endif: None,
        };
        self.push_context(Node::new(NodeKind::If(Box::new(node)), pos));
        Ok(())
    }

    pub(crate) fn parse_cmd_elseif(&mut self) -> ParseResult<()> {
        let top = self.top_type();
        if top != NodeType::If && top != NodeType::ElseIf {
            return Err(ParseError::context("E582: :elseif without :if", self.ea.cmdpos));
        }
        if top != NodeType::If {
            self.close_branch();
        }
        let cond = self.parse_expr()?;
        let pos = self.ea.cmdpos;
        let node = NodeKind::ElseIf {
            ea: self.take_ea(),
            cond: Box::new(cond),
            body: Vec::new(),
        };
        self.push_context(Node::new(node, pos));
        Ok(())
    }

    pub(crate) fn parse_cmd_else(&mut self) -> ParseResult<()> {
        let top = self.top_type();
        if top != NodeType::If && top != NodeType::ElseIf {
            return Err(ParseError::context("E581: :else without :if", self.ea.cmdpos));
        }
        if top != NodeType::If {
            self.close_branch();
        }
        let pos = self.ea.cmdpos;
        let node = NodeKind::Else { ea: self.take_ea(), body: Vec::new() };
        self.push_context(Node::new(node, pos));
        Ok(())
    }

    pub(crate) fn parse_cmd_endif(&mut self) -> ParseResult<()> {
        let top = self.top_type();
        if !matches!(top, NodeType::If | NodeType::ElseIf | NodeType::Else) {
            return Err(ParseError::context("E580: :endif without :if", self.ea.cmdpos));
        }
        if top != NodeType::If {
            self.close_branch();
        }
        let endif = self.end_node(|ea| NodeKind::EndIf { ea });
        if let Some(NodeKind::If(n)) = self.context.last_mut().map(|n| &mut n.kind) {
            n.endif = Some(Box::new(endif));
        }
        self.close_block();
        Ok(())
    }

    // =========================================================================
    // WHILE / FOR
    // =========================================================================

    pub(crate) fn parse_cmd_while(&mut self) -> ParseResult<()> {
        let cond = self.parse_expr()?;
        let pos = self.ea.cmdpos;
        let node = NodeKind::While {
            ea: self.take_ea(),
            cond: Box::new(cond),
            body: Vec::new(),
            endwhile: None,
        };
        self.push_context(Node::new(node, pos));
        Ok(())
    }

    pub(crate) fn parse_cmd_endwhile(&mut self) -> ParseResult<()> {
        if self.top_type() != NodeType::While {
            return Err(ParseError::context(
                "E588: :endwhile without :while",
                self.ea.cmdpos,
            ));
        }
        let end = self.end_node(|ea| NodeKind::EndWhile { ea });
        if let Some(NodeKind::While { endwhile, .. }) = self.context.last_mut().map(|n| &mut n.kind)
        {
            *endwhile = Some(Box::new(end));
        }
        self.close_block();
        Ok(())
    }

    pub(crate) fn parse_cmd_for(&mut self) -> ParseResult<()> {
        let lhs = self.parse_letlhs()?;
        self.reader.skip_white();
        let epos = self.reader.getpos();
        if self.reader.read_alpha() != "in" {
            return Err(ParseError::syntax("Missing \"in\" after :for", epos));
        }
        let right = self.parse_expr()?;
        let pos = self.ea.cmdpos;
        let node = ForNode {
            ea: *self.take_ea(),
            left: lhs.left,
            list: lhs.list,
            rest: lhs.rest,
            right: Box::new(right),
            body: Vec::new(),
            endfor: None,
        };
        self.push_context(Node::new(NodeKind::For(Box::new(node)), pos));
        Ok(())
    }

    pub(crate) fn parse_cmd_endfor(&mut self) -> ParseResult<()> {
        if self.top_type() != NodeType::For {
            return Err(ParseError::context("E588: :endfor without :for", self.ea.cmdpos));
        }
        let end = self.end_node(|ea| NodeKind::EndFor { ea });
        if let Some(NodeKind::For(n)) = self.context.last_mut().map(|n| &mut n.kind) {
            n.endfor = Some(Box::new(end));
        }
        self.close_block();
        Ok(())
    }

    pub(crate) fn parse_cmd_continue(&mut self) -> ParseResult<()> {
        if !self.find_context(NodeType::While) && !self.find_context(NodeType::For) {
            return Err(ParseError::context(
                "E586: :continue without :while or :for",
                self.ea.cmdpos,
            ));
        }
        let node = self.end_node(|ea| NodeKind::Continue { ea });
        self.add_node(node);
        Ok(())
    }

    pub(crate) fn parse_cmd_break(&mut self) -> ParseResult<()> {
        if !self.find_context(NodeType::While) && !self.find_context(NodeType::For) {
            return Err(ParseError::context(
                "E587: :break without :while or :for",
                self.ea.cmdpos,
            ));
        }
        let node = self.end_node(|ea| NodeKind::Break { ea });
        self.add_node(node);
        Ok(())
    }

    // =========================================================================
    // TRY
    // =========================================================================

    pub(crate) fn parse_cmd_try(&mut self) -> ParseResult<()> {
        let pos = self.ea.cmdpos;
        let node = TryNode {
            ea: *self.take_ea(),
            body: Vec::new(),
            catch: Vec::new(),
            finally: None,
            endtry: None,
        };
        self.push_context(Node::new(NodeKind::Try(Box::new(node)), pos));
        Ok(())
    }

    pub(crate) fn parse_cmd_catch(&mut self) -> ParseResult<()> {
        let top = self.top_type();
        if top == NodeType::Finally {
            return Err(ParseError::context("E604: :catch after :finally", self.ea.cmdpos));
        }
        if top != NodeType::Try && top != NodeType::Catch {
            return Err(ParseError::context("E603: :catch without :try", self.ea.cmdpos));
        }
        if top != NodeType::Try {
            self.close_branch();
        }
        self.reader.skip_white();
        let mut pattern = None;
        if !ends_excmds(self.reader.peek()) {
            if let Some(delimiter) = self.reader.get() {
                pattern = Some(self.parse_pattern(delimiter)?.0);
            }
        }
        let pos = self.ea.cmdpos;
        let node = NodeKind::Catch { ea: self.take_ea(), pattern, body: Vec::new() };
        self.push_context(Node::new(node, pos));
        Ok(())
    }

    pub(crate) fn parse_cmd_finally(&mut self) -> ParseResult<()> {
        let top = self.top_type();
        if top != NodeType::Try && top != NodeType::Catch {
            return Err(ParseError::context("E606: :finally without :try", self.ea.cmdpos));
        }
        if top != NodeType::Try {
            self.close_branch();
        }
        let pos = self.ea.cmdpos;
        let node = NodeKind::Finally { ea: self.take_ea(), body: Vec::new() };
        self.push_context(Node::new(node, pos));
        Ok(())
    }

    pub(crate) fn parse_cmd_endtry(&mut self) -> ParseResult<()> {
        let top = self.top_type();
        if !matches!(top, NodeType::Try | NodeType::Catch | NodeType::Finally) {
            return Err(ParseError::context("E602: :endtry without :try", self.ea.cmdpos));
        }
        if top != NodeType::Try {
            self.close_branch();
        }
        let end = self.end_node(|ea| NodeKind::EndTry { ea });
        if let Some(NodeKind::Try(n)) = self.context.last_mut().map(|n| &mut n.kind) {
            n.endtry = Some(Box::new(end));
        }
        self.close_block();
        Ok(())
    }

    // =========================================================================
    // FUNCTION
    // =========================================================================

    pub(crate) fn parse_cmd_function(&mut self) -> ParseResult<()> {
        let pos = self.reader.tell();
        self.reader.skip_white();

        // :function, :function /pattern
        if ends_excmds(self.reader.peek()) || self.reader.peek() == Some('/') {
            self.reader.seek_set(pos);
            return self.parse_cmd_common();
        }

        let left = self.parse_lvalue_func()?;
        self.reader.skip_white();

        if let NodeKind::Identifier { value } = &left.kind {
            let first = value.chars().next();
            let scoped = value.contains(':') || value.contains('#');
            if !scoped && !matches!(first, Some('<' | '_' | 'A'..='Z')) {
                return Err(ParseError::syntax(
                    format!(
                        "E128: Function name must start with a capital or contain a colon: {}",
                        value
                    ),
                    left.pos,
                ));
            }
        }

        // :function {name}
        if self.reader.peek1() != Some('(') {
            self.reader.seek_set(pos);
            return self.parse_cmd_common();
        }
        self.reader.getn(1);

        let (rlist, default_args) = self.parse_function_params()?;

        let mut attr = FunctionAttr::default();
        loop {
            self.reader.skip_white();
            let epos = self.reader.getpos();
            let key = self.reader.read_alpha();
            match key.as_str() {
                "" => break,
                "range" => attr.range = true,
                "abort" => attr.abort = true,
                "dict" => attr.dict = true,
                "closure" => attr.closure = true,
                _ => {
                    return Err(ParseError::syntax(format!("unexpected token: {}", key), epos));
                }
            }
        }

        let cmdpos = self.ea.cmdpos;
        let node = FunctionNode {
            ea: *self.take_ea(),
            left,
            rlist,
            default_args,
            attr,
            body: Vec::new(),
            endfunction: None,
        };
        self.push_context(Node::new(NodeKind::Function(Box::new(node)), cmdpos));
        Ok(())
    }

    /// Parameter list after `(`: names, `name = default`, and a final `...`
    fn parse_function_params(&mut self) -> ParseResult<(Vec<Node>, Vec<Node>)> {
        let mut rlist: Vec<Node> = Vec::new();
        let mut default_args = Vec::new();
        let mut tokenizer = ExprTokenizer::new();

        if tokenizer.peek(&mut self.reader)?.is(TokenType::PClose) {
            tokenizer.get(&mut self.reader)?;
            return Ok((rlist, default_args));
        }

        loop {
            let token = tokenizer.get(&mut self.reader)?;
            match token.token_type {
                TokenType::Identifier => {
                    let name = token.value.as_str();
                    if !is_argname(name) || name == "firstline" || name == "lastline" {
                        return Err(ParseError::syntax(
                            format!("E125: Illegal argument: {}", name),
                            token.pos,
                        ));
                    }
                    if rlist.iter().any(|n| n.value_str() == Some(name)) {
                        return Err(ParseError::syntax(
                            format!("E853: Duplicate argument name: {}", name),
                            token.pos,
                        ));
                    }
                    rlist.push(AST::identifier(name, token.pos));

                    if tokenizer.peek(&mut self.reader)?.is(TokenType::Eq) {
                        tokenizer.get(&mut self.reader)?;
                        default_args.push(self.parse_expr()?);
                    } else if !default_args.is_empty() {
                        return Err(ParseError::syntax(
                            "E989: Non-default argument follows default argument",
                            token.pos,
                        ));
                    }

                    // Vim rejects `F(a ,b)`
                    if opt_is(self.reader.p(0), is_white)
                        && tokenizer.peek(&mut self.reader)?.is(TokenType::Comma)
                    {
                        return Err(ParseError::syntax(
                            "E475: Invalid argument: White space is not allowed before comma",
                            self.reader.getpos(),
                        ));
                    }

                    let next = tokenizer.get(&mut self.reader)?;
                    match next.token_type {
                        TokenType::Comma => {
                            if tokenizer.peek(&mut self.reader)?.is(TokenType::PClose) {
                                tokenizer.get(&mut self.reader)?;
                                break;
                            }
                        }
                        TokenType::PClose => break,
                        _ => return Err(unexpected_token(&next)),
                    }
                }
                TokenType::DotDotDot => {
                    rlist.push(AST::identifier(token.value.as_str(), token.pos));
                    let next = tokenizer.get(&mut self.reader)?;
                    if next.is(TokenType::PClose) {
                        break;
                    }
                    return Err(unexpected_token(&next));
                }
                _ => return Err(unexpected_token(&token)),
            }
        }
        Ok((rlist, default_args))
    }

    pub(crate) fn parse_cmd_endfunction(&mut self) -> ParseResult<()> {
        self.check_missing_end("ENDFUNCTION", self.ea.cmdpos, false)?;
        if self.top_type() != NodeType::Function {
            return Err(ParseError::context(
                "E193: :endfunction not inside a function",
                self.ea.cmdpos,
            ));
        }
        self.reader.getline();
        let end = self.end_node(|ea| NodeKind::EndFunction { ea });
        if let Some(NodeKind::Function(f)) = self.context.last_mut().map(|n| &mut n.kind) {
            f.endfunction = Some(Box::new(end));
        }
        self.close_block();
        Ok(())
    }

    /// Closer and jump nodes carry nothing but their ExArg
    pub(crate) fn end_node(&mut self, kind: impl FnOnce(Box<ExArg>) -> NodeKind) -> Node {
        let pos = self.ea.cmdpos;
        Node::new(kind(self.take_ea()), pos)
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::types::{Node, NodeKind, NodeType};
    use crate::parser::parser::Parser;
    use crate::parser::reader::StringReader;
    use crate::parser::types::{ErrorKind, ParseError, ParseResult, ParserOptions};

    fn parse(lines: &[&str]) -> ParseResult<Node> {
        Parser::new(ParserOptions::default()).parse(StringReader::new(lines))
    }

    fn err(lines: &[&str]) -> ParseError {
        parse(lines).unwrap_err()
    }

    fn types(nodes: &[Node]) -> Vec<NodeType> {
        nodes.iter().map(Node::node_type).collect()
    }

    #[test]
    fn test_if_chain_structure() {
        let top = parse(&[
            "if a",
            "  echo 1",
            "elseif b",
            "  echo 2",
            "elseif c",
            "else",
            "  echo 3",
            "  echo 4",
            "endif",
        ])
        .unwrap();
        let body = top.body().unwrap();
        assert_eq!(types(body), [NodeType::If]);
        let NodeKind::If(n) = &body[0].kind else {
            panic!("expected IF");
        };
        assert_eq!(n.body.len(), 1);
        assert_eq!(n.elseif.len(), 2);
        assert_eq!(n.elseif[0].body().unwrap().len(), 1);
        assert_eq!(n.elseif[1].body().unwrap().len(), 0);
        assert_eq!(n.else_.as_ref().unwrap().body().unwrap().len(), 2);
        assert_eq!(n.endif.as_ref().unwrap().pos.line, 9);
    }

    #[test]
    fn test_if_errors() {
        assert_eq!(err(&["elseif 1"]).message, "E582: :elseif without :if");
        assert_eq!(err(&["else"]).message, "E581: :else without :if");
        assert_eq!(err(&["endif"]).message, "E580: :endif without :if");
        assert_eq!(err(&["if 1", "else", "elseif 2"]).message, "E582: :elseif without :if");
        assert_eq!(err(&["endif"]).kind, ErrorKind::Context);
    }

    #[test]
    fn test_missing_endif_names_toplevel() {
        let e = err(&["if 1"]);
        assert_eq!(e.message, "E171: Missing :endif:    TOPLEVEL");
        assert_eq!(e.kind, ErrorKind::Unterminated);
        assert_eq!(err(&["while 1"]).message, "E170: Missing :endwhile:    TOPLEVEL");
        assert_eq!(err(&["for x in y"]).message, "E170: Missing :endfor:    TOPLEVEL");
        assert_eq!(err(&["try"]).message, "E600: Missing :endtry:    TOPLEVEL");
        assert_eq!(
            err(&["function F()"]).message,
            "E126: Missing :endfunction:    TOPLEVEL"
        );
    }

    #[test]
    fn test_while_and_jumps() {
        let top = parse(&["while 1", "  if x", "    break", "  endif", "  continue", "endwhile"])
            .unwrap();
        let NodeKind::While { body, endwhile, .. } = &top.body().unwrap()[0].kind else {
            panic!("expected WHILE");
        };
        assert_eq!(types(body), [NodeType::If, NodeType::Continue]);
        assert!(endwhile.is_some());
        assert_eq!(
            err(&["break"]).message,
            "E587: :break without :while or :for"
        );
        assert_eq!(
            err(&["if 1", "continue", "endif"]).message,
            "E586: :continue without :while or :for"
        );
        assert_eq!(err(&["endwhile"]).message, "E588: :endwhile without :while");
    }

    #[test]
    fn test_for_targets() {
        let top = parse(&["for [a, b; rest] in items", "endfor"]).unwrap();
        let NodeKind::For(n) = &top.body().unwrap()[0].kind else {
            panic!("expected FOR");
        };
        assert!(n.left.is_none());
        assert_eq!(n.list.len(), 2);
        assert!(n.rest.is_some());
        assert!(n.endfor.is_some());

        assert_eq!(err(&["for x of y"]).message, "Missing \"in\" after :for");
        assert_eq!(err(&["endfor"]).message, "E588: :endfor without :for");
    }

    #[test]
    fn test_try_structure() {
        let top = parse(&[
            "try",
            "  call F()",
            "catch /E\\d\\+/",
            "catch",
            "finally",
            "  echo 1",
            "endtry",
        ])
        .unwrap();
        let NodeKind::Try(n) = &top.body().unwrap()[0].kind else {
            panic!("expected TRY");
        };
        assert_eq!(n.body.len(), 1);
        assert_eq!(n.catch.len(), 2);
        let NodeKind::Catch { pattern, .. } = &n.catch[0].kind else {
            panic!("expected CATCH");
        };
        assert_eq!(pattern.as_deref(), Some("E\\d\\+"));
        assert!(matches!(&n.catch[1].kind, NodeKind::Catch { pattern: None, .. }));
        assert_eq!(n.finally.as_ref().unwrap().body().unwrap().len(), 1);
        assert!(n.endtry.is_some());
    }

    #[test]
    fn test_try_errors() {
        assert_eq!(err(&["try", "finally", "catch"]).message, "E604: :catch after :finally");
        assert_eq!(err(&["catch"]).message, "E603: :catch without :try");
        assert_eq!(err(&["finally"]).message, "E606: :finally without :try");
        assert_eq!(err(&["endtry"]).message, "E602: :endtry without :try");
    }

    #[test]
    fn test_function_definition() {
        let top = parse(&[
            "function! s:Foo(a, b = 1, ...) range abort dict closure",
            "  return a:a",
            "endfunction",
        ])
        .unwrap();
        let NodeKind::Function(f) = &top.body().unwrap()[0].kind else {
            panic!("expected FUNCTION");
        };
        assert_eq!(f.left.value_str(), Some("s:Foo"));
        let params: Vec<_> = f.rlist.iter().filter_map(Node::value_str).collect();
        assert_eq!(params, ["a", "b", "..."]);
        assert_eq!(f.default_args.len(), 1);
        assert!(f.attr.range && f.attr.abort && f.attr.dict && f.attr.closure);
        assert!(f.ea.forceit);
        assert_eq!(types(&f.body), [NodeType::Return]);
        assert!(f.endfunction.is_some());
    }

    #[test]
    fn test_function_trailing_comma_and_listing() {
        assert!(parse(&["function F(a, b, )", "endfunction"]).is_ok());
        // listing forms fall back to a plain command
        let top = parse(&["function", "function /^Foo", "function Foo"]).unwrap();
        assert_eq!(types(top.body().unwrap()), [NodeType::ExCmd; 3]);
    }

    #[test]
    fn test_function_errors() {
        assert_eq!(
            err(&["function foo()", "endfunction"]).message,
            "E128: Function name must start with a capital or contain a colon: foo"
        );
        assert_eq!(
            err(&["function F(firstline)", "endfunction"]).message,
            "E125: Illegal argument: firstline"
        );
        assert_eq!(
            err(&["function F(a, a)", "endfunction"]).message,
            "E853: Duplicate argument name: a"
        );
        assert_eq!(
            err(&["function F(a = 1, b)", "endfunction"]).message,
            "E989: Non-default argument follows default argument"
        );
        assert_eq!(
            err(&["function F(a , b)", "endfunction"]).message,
            "E475: Invalid argument: White space is not allowed before comma"
        );
        assert_eq!(
            err(&["function F(..., a)", "endfunction"]).message,
            "unexpected token: ,"
        );
        assert_eq!(
            err(&["function F() bogus", "endfunction"]).message,
            "unexpected token: bogus"
        );
    }

    #[test]
    fn test_endfunction_checks() {
        assert_eq!(
            err(&["function F()", "if 1", "endfunction"]).message,
            "E171: Missing :endif:    ENDFUNCTION"
        );
        assert_eq!(
            err(&["endfunction"]).message,
            "E193: :endfunction not inside a function"
        );
        assert!(parse(&["function F()", "endfunction F"]).is_ok());
    }

    #[test]
    fn test_nested_blocks_link_into_parents() {
        let top = parse(&[
            "function F()",
            "  for x in y",
            "    try",
            "    endtry",
            "  endfor",
            "endfunction",
            "echo 1",
        ])
        .unwrap();
        let body = top.body().unwrap();
        assert_eq!(types(body), [NodeType::Function, NodeType::Echo]);
        let for_node = &body[0].body().unwrap()[0];
        assert!(for_node.is(NodeType::For));
        assert_eq!(types(for_node.body().unwrap()), [NodeType::Try]);
    }
}
