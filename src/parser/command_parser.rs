//! Simple Command Parser
//!
//! Body parsers for every non-block command: raw Ex commands, assignments,
//! expression-bearing commands, and the commands that swallow following
//! lines (`:append`, `:python << EOF`, ...).

use crate::ast::types::{Assignment, EchoCommand, Node, NodeKind, NodeType, Position, AST};
use crate::parser::command_table::CommandFlags;
use crate::parser::lexer::{ExprTokenizer, TokenType};
use crate::parser::lvalue_parser::LvalueParser;
use crate::parser::parser::{ends_excmds, Parser};
use crate::parser::reader::EOL;
use crate::parser::types::{
    describe_char, is_digit, is_idc, is_varname, is_white, opt_is, ParseError, ParseResult,
};

/// Assignment target: a single lvalue, or `[a, b; rest]`
#[derive(Debug, Default)]
pub(crate) struct LetLhs {
    pub left: Option<Box<Node>>,
    pub list: Vec<Node>,
    pub rest: Option<Box<Node>>,
}

const COMPOUND_ASSIGN_OPS: &[&str] = &["+=", "-=", ".=", "..=", "*=", "/=", "%="];

impl Parser {
    fn cmd_name(&self) -> &str {
        self.ea.cmd.as_ref().map_or("", |c| c.name.as_str())
    }

    fn cmd_has(&self, flags: CommandFlags) -> bool {
        self.ea.cmd.as_ref().map_or(false, |c| c.has(flags))
    }

    fn add_excmd(&mut self, text: String) {
        let ea = std::mem::take(&mut self.ea);
        self.add_node(AST::excmd(ea, text));
    }

    // =========================================================================
    // RAW COMMANDS
    // =========================================================================

    pub(crate) fn parse_cmd_common(&mut self) -> ParseResult<()> {
        let end = if self.cmd_has(CommandFlags::TRLBAR) && !self.ea.usefilter {
            self.separate_nextcmd()?
        } else {
            let mut end;
            loop {
                end = self.reader.getpos();
                if self.reader.peek1().is_none() {
                    break;
                }
                self.reader.get();
            }
            end
        };

        if self.cmd_has(CommandFlags::NEEDARG)
            && self.reader.getstr(self.ea.argpos, end).trim().is_empty()
        {
            return Err(ParseError::syntax("E471: Argument required", self.ea.argpos));
        }

        let text = self.reader.getstr(self.ea.linepos, end);
        self.add_excmd(text);
        Ok(())
    }

    /// Find where a TRLBAR command's argument ends: at `|`, a newline or a
    /// trailing comment. Returns the end position, trailing blanks excluded
    /// unless the command keeps comments.
    fn separate_nextcmd(&mut self) -> ParseResult<Position> {
        if matches!(
            self.cmd_name(),
            "vimgrep" | "vimgrepadd" | "lvimgrep" | "lvimgrepadd"
        ) {
            self.skip_vimgrep_pat()?;
        }
        let name = self.cmd_name().to_string();
        let notrlcom = self.cmd_has(CommandFlags::NOTRLCOM);
        let file_arg =
            self.cmd_has(CommandFlags::XFILE | CommandFlags::FILES | CommandFlags::FILE1);

        let mut pc: Option<char> = None;
        let mut end = self.reader.getpos();
        let mut nospend = end;
        loop {
            end = self.reader.getpos();
            if !opt_is(pc, is_white) {
                nospend = end;
            }
            let c = self.reader.peek();
            match c {
                None | Some(EOL) => break,
                // <C-V> escapes the next character
                Some('\x16') => {
                    self.reader.get();
                    end = self.reader.getpos();
                    nospend = end;
                    let escaped = self.reader.peek();
                    if matches!(escaped, None | Some(EOL)) {
                        break;
                    }
                    self.reader.get();
                    pc = escaped;
                    continue;
                }
                Some('`') if file_arg && self.reader.peekn(2) == "`=" => {
                    self.reader.getn(2);
                    self.parse_expr()?;
                    let close = self.reader.peek1();
                    if close != Some('`') {
                        return Err(ParseError::lexical(
                            format!("unexpected character: {}", describe_char(close)),
                            self.reader.getpos(),
                        ));
                    }
                    self.reader.getn(1);
                    pc = close;
                    continue;
                }
                Some('|') => {
                    if pc != Some('\\') {
                        break;
                    }
                    self.reader.get();
                }
                Some('"') if !notrlcom && self.comment_starts_here(&name, pc) => {
                    if pc != Some('\\') {
                        break;
                    }
                    self.reader.get();
                }
                Some(_) => {
                    self.reader.get();
                }
            }
            pc = c;
        }
        if !notrlcom {
            end = nospend;
        }
        Ok(end)
    }

    /// `"` is a register name right after `:@`, `:*` and `:redir @`
    fn comment_starts_here(&self, name: &str, pc: Option<char>) -> bool {
        let at = self.reader.tell();
        let argpos = self.ea.argpos.cursor;
        let register_exec = (name == "@" || name == "*") && at == argpos;
        let redir_register = name == "redir" && at == argpos + 1 && pc == Some('@');
        !register_exec && !redir_register
    }

    fn skip_vimgrep_pat(&mut self) -> ParseResult<()> {
        match self.reader.peek1() {
            None => {}
            // :vimgrep pattern fname
            Some(c) if is_idc(c) => {
                self.reader.read_nonwhite();
            }
            // :vimgrep /pattern/[g][j] fname
            Some(c) => {
                self.reader.getn(1);
                let (_, endc) = self.parse_pattern(c)?;
                if endc == Some(c) {
                    while matches!(self.reader.p(0), Some('g' | 'j')) {
                        self.reader.getn(1);
                    }
                }
            }
        }
        Ok(())
    }

    pub(crate) fn parse_cmd_finish(&mut self) -> ParseResult<()> {
        self.parse_cmd_common()?;
        if self.top_type() == NodeType::TopLevel {
            self.reader.seek_end();
        }
        Ok(())
    }

    pub(crate) fn parse_wincmd(&mut self) -> ParseResult<()> {
        let c = self.reader.peek1();
        if c.is_none() {
            return Err(ParseError::syntax("E471: Argument required", self.reader.getpos()));
        }
        self.reader.get();
        // `wincmd g<C-]>` style two-character arguments, <C-G> included
        if matches!(c, Some('g' | '\x07')) {
            let c2 = self.reader.peek1();
            self.reader.getn(1);
            if c2.map_or(true, is_white) {
                return Err(ParseError::syntax("E474: Invalid Argument", self.reader.getpos()));
            }
        }
        let end = self.reader.getpos();
        self.reader.skip_white();
        if !ends_excmds(self.reader.peek()) {
            return Err(ParseError::syntax("E474: Invalid Argument", self.reader.getpos()));
        }
        let text = self.reader.getstr(self.ea.linepos, end);
        self.add_excmd(text);
        Ok(())
    }

    pub(crate) fn parse_cmd_syntax(&mut self) -> ParseResult<()> {
        let mut end;
        loop {
            end = self.reader.getpos();
            let c = self.reader.peek();
            match c {
                Some(delim @ ('/' | '\'' | '"')) => {
                    self.reader.getn(1);
                    self.parse_pattern(delim)?;
                }
                Some('=') => {
                    self.reader.getn(1);
                    self.parse_pattern(' ')?;
                }
                c if ends_excmds(c) => break,
                _ => {}
            }
            self.reader.getn(1);
        }
        let text = self.reader.getstr(self.ea.linepos, end);
        self.add_excmd(text);
        Ok(())
    }

    // =========================================================================
    // MULTI-LINE CAPTURE
    // =========================================================================

    /// `:append` and `:insert` take the following lines up to a lone `.`
    pub(crate) fn parse_cmd_append(&mut self) -> ParseResult<()> {
        self.reader.setpos(self.ea.linepos);
        let mut lines = vec![self.reader.readline()];
        while self.reader.peek().is_some() {
            let line = self.reader.getline();
            let done = line == ".";
            lines.push(line);
            if done {
                break;
            }
            self.reader.get();
        }
        self.add_excmd(lines.join("\n"));
        Ok(())
    }

    /// `:loadkeymap` takes the rest of the file
    pub(crate) fn parse_cmd_loadkeymap(&mut self) -> ParseResult<()> {
        self.reader.setpos(self.ea.linepos);
        let mut lines = vec![self.reader.readline()];
        while self.reader.peek().is_some() {
            lines.push(self.reader.readline());
        }
        self.add_excmd(lines.join("\n"));
        Ok(())
    }

    /// `:lua`, `:python` and the other language interfaces: either a single
    /// line or `<< marker` followed by lines up to the marker (default `.`)
    pub(crate) fn parse_cmd_script(&mut self) -> ParseResult<()> {
        self.reader.skip_white();
        let lines = if self.reader.peekn(2) == "<<" {
            self.reader.getn(2);
            self.reader.skip_white();
            let mut marker = self.reader.readline();
            if marker.is_empty() {
                marker = ".".to_string();
            }
            self.reader.setpos(self.ea.linepos);
            let mut lines = vec![self.reader.getline()];
            self.reader.get();
            while self.reader.peek().is_some() {
                let line = self.reader.getline();
                let done = line == marker;
                lines.push(line);
                if done {
                    break;
                }
                self.reader.get();
            }
            lines
        } else {
            self.reader.setpos(self.ea.linepos);
            vec![self.reader.getline()]
        };
        self.add_excmd(lines.join("\n"));
        Ok(())
    }

    // =========================================================================
    // ASSIGNMENT
    // =========================================================================

    pub(crate) fn parse_cmd_let(&mut self) -> ParseResult<()> {
        let pos = self.reader.tell();
        self.reader.skip_white();
        // :let
        if ends_excmds(self.reader.peek()) {
            self.reader.seek_set(pos);
            return self.parse_cmd_common();
        }

        let lhs = self.parse_letlhs()?;
        self.reader.skip_white();
        let s1 = self.reader.peekn(1);
        let mut s2 = self.reader.peekn(2);
        if s2 == ".." || s2 == "=<" {
            s2 = self.reader.peekn(3);
        }

        let compound = COMPOUND_ASSIGN_OPS.contains(&s2.as_str());
        let heredoc = s2 == "=<<";
        // :let {var-name} ..
        if ends_excmds(self.reader.peek1()) || (!compound && !heredoc && s1 != "=") {
            self.reader.seek_set(pos);
            return self.parse_cmd_common();
        }

        let op = if compound || heredoc { s2 } else { s1 };
        self.reader.getn(op.chars().count());
        let right = if heredoc {
            self.reader.skip_white();
            self.parse_heredoc()?
        } else {
            self.parse_expr()?
        };

        let cmdpos = self.ea.cmdpos;
        let node = self.assignment(op, lhs, right);
        self.add_node(Node::new(NodeKind::Let(node), cmdpos));
        Ok(())
    }

    pub(crate) fn parse_cmd_const(&mut self) -> ParseResult<()> {
        let pos = self.reader.tell();
        self.reader.skip_white();
        // :const
        if ends_excmds(self.reader.peek()) {
            self.reader.seek_set(pos);
            return self.parse_cmd_common();
        }

        let lhs = self.parse_constlhs()?;
        self.reader.skip_white();
        // :const {var-name}
        if self.reader.peek1() != Some('=') {
            self.reader.seek_set(pos);
            return self.parse_cmd_common();
        }
        self.reader.getn(1);
        let right = self.parse_expr()?;

        let cmdpos = self.ea.cmdpos;
        let node = self.assignment("=".to_string(), lhs, right);
        self.add_node(Node::new(NodeKind::Const(node), cmdpos));
        Ok(())
    }

    fn assignment(&mut self, op: String, lhs: LetLhs, right: Node) -> Box<Assignment> {
        Box::new(Assignment {
            ea: *self.take_ea(),
            op,
            left: lhs.left,
            list: lhs.list,
            rest: lhs.rest,
            right: Box::new(right),
        })
    }

    /// `let x =<< [trim] [eval] END` followed by lines up to `END`
    fn parse_heredoc(&mut self) -> ParseResult<Node> {
        let pos = self.ea.cmdpos;
        let mut rlist = Vec::new();
        let mut op = String::new();
        loop {
            self.reader.skip_white();
            let key = self.reader.read_word();
            if key.is_empty() {
                break;
            }
            if key.starts_with(|c: char| c.is_ascii_lowercase()) {
                rlist.push(key);
            } else {
                op = key;
                break;
            }
        }
        if op.is_empty() {
            return Err(ParseError::syntax("E172: Missing marker", self.reader.getpos()));
        }
        self.parse_trail()?;

        let mut body = Vec::new();
        while self.reader.peek().is_some() {
            let line = self.reader.getline();
            if line == op {
                return Ok(Node::new(NodeKind::Heredoc { rlist, op, body }, pos));
            }
            body.push(line);
            self.reader.get();
        }
        Err(ParseError::unterminated(
            format!("E990: Missing end marker '{}'", op),
            self.reader.getpos(),
        ))
    }

    pub(crate) fn parse_letlhs(&mut self) -> ParseResult<LetLhs> {
        self.parse_assign_target(Self::parse_lvalue)
    }

    fn parse_constlhs(&mut self) -> ParseResult<LetLhs> {
        self.parse_assign_target(Self::parse_constlvalue)
    }

    /// `single` parses the plain `name` form; list items always go through
    /// [`Parser::parse_lvalue`]
    fn parse_assign_target(
        &mut self,
        single: fn(&mut Self) -> ParseResult<Node>,
    ) -> ParseResult<LetLhs> {
        let mut lhs = LetLhs::default();
        let mut tokenizer = ExprTokenizer::new();
        if !tokenizer.peek(&mut self.reader)?.is(TokenType::SqOpen) {
            lhs.left = Some(Box::new(single(self)?));
            return Ok(lhs);
        }
        tokenizer.get(&mut self.reader)?;
        loop {
            lhs.list.push(self.parse_lvalue()?);
            let token = tokenizer.get(&mut self.reader)?;
            match token.token_type {
                TokenType::SqClose => break,
                TokenType::Comma => continue,
                TokenType::Semicolon => {
                    lhs.rest = Some(Box::new(self.parse_lvalue()?));
                    let token = tokenizer.get(&mut self.reader)?;
                    if token.is(TokenType::SqClose) {
                        break;
                    }
                    return Err(invalid_argument(&token.value, token.pos));
                }
                _ => return Err(invalid_argument(&token.value, token.pos)),
            }
        }
        Ok(lhs)
    }

    // =========================================================================
    // LVALUES
    // =========================================================================

    fn parse_lvalue_raw(&mut self) -> ParseResult<Node> {
        LvalueParser::new(&mut self.reader).parse()
    }

    /// Function name for `:function` and `:delfunction`
    pub(crate) fn parse_lvalue_func(&mut self) -> ParseResult<Node> {
        let node = self.parse_lvalue_raw()?;
        match node.node_type() {
            NodeType::Identifier
            | NodeType::CurlyName
            | NodeType::Subscript
            | NodeType::Dot
            | NodeType::Option
            | NodeType::Env
            | NodeType::Reg => Ok(node),
            _ => Err(ParseError::syntax("Invalid Expression", node.pos)),
        }
    }

    fn parse_lvalue(&mut self) -> ParseResult<Node> {
        let node = self.parse_lvalue_raw()?;
        check_varname(&node)?;
        match node.node_type() {
            NodeType::Identifier
            | NodeType::CurlyName
            | NodeType::Subscript
            | NodeType::Slice
            | NodeType::Dot
            | NodeType::Option
            | NodeType::Env
            | NodeType::Reg => Ok(node),
            _ => Err(ParseError::syntax("Invalid Expression", node.pos)),
        }
    }

    fn parse_constlvalue(&mut self) -> ParseResult<Node> {
        let node = self.parse_lvalue_raw()?;
        check_varname(&node)?;
        let what = match node.node_type() {
            NodeType::Identifier | NodeType::CurlyName => return Ok(node),
            NodeType::Subscript | NodeType::Slice | NodeType::Dot => "a list or dict",
            NodeType::Option => "an option",
            NodeType::Env => "an environment variable",
            NodeType::Reg => "a register",
            _ => return Err(ParseError::syntax("Invalid Expression", node.pos)),
        };
        Err(ParseError::syntax(format!("E996: Cannot lock {}", what), node.pos))
    }

    /// Targets of `:unlet` and `:lockvar`; the first is read as a full
    /// expression
    fn parse_lvaluelist(&mut self) -> ParseResult<Vec<Node>> {
        let mut list = vec![self.parse_expr()?];
        loop {
            self.reader.skip_white();
            if ends_excmds(self.reader.peek()) {
                break;
            }
            list.push(self.parse_lvalue()?);
        }
        Ok(list)
    }

    pub(crate) fn parse_cmd_unlet(&mut self) -> ParseResult<()> {
        let list = self.parse_lvaluelist()?;
        let pos = self.ea.cmdpos;
        let node = NodeKind::Unlet { ea: self.take_ea(), list };
        self.add_node(Node::new(node, pos));
        Ok(())
    }

    /// `:lockvar` and `:unlockvar` with an optional depth
    pub(crate) fn parse_cmd_lockvar(&mut self, unlock: bool) -> ParseResult<()> {
        self.reader.skip_white();
        let depth = if opt_is(self.reader.peek1(), is_digit) {
            self.reader.read_digit().parse().ok()
        } else {
            None
        };
        let list = self.parse_lvaluelist()?;
        let pos = self.ea.cmdpos;
        let ea = self.take_ea();
        let node = if unlock {
            NodeKind::UnlockVar { ea, depth, list }
        } else {
            NodeKind::LockVar { ea, depth, list }
        };
        self.add_node(Node::new(node, pos));
        Ok(())
    }

    // =========================================================================
    // EXPRESSION COMMANDS
    // =========================================================================

    pub(crate) fn parse_cmd_delfunction(&mut self) -> ParseResult<()> {
        let left = self.parse_lvalue_func()?;
        let pos = self.ea.cmdpos;
        let node = NodeKind::DelFunction { ea: self.take_ea(), left: Box::new(left) };
        self.add_node(Node::new(node, pos));
        Ok(())
    }

    pub(crate) fn parse_cmd_return(&mut self) -> ParseResult<()> {
        if !self.find_context(NodeType::Function) {
            return Err(ParseError::context(
                "E133: :return not inside a function",
                self.ea.cmdpos,
            ));
        }
        self.reader.skip_white();
        let c = self.reader.peek();
        let left = if c == Some('"') || !ends_excmds(c) {
            Some(Box::new(self.parse_expr()?))
        } else {
            None
        };
        let pos = self.ea.cmdpos;
        let node = NodeKind::Return { ea: self.take_ea(), left };
        self.add_node(Node::new(node, pos));
        Ok(())
    }

    pub(crate) fn parse_cmd_call(&mut self) -> ParseResult<()> {
        self.reader.skip_white();
        if ends_excmds(self.reader.peek()) {
            return Err(ParseError::syntax("E471: Argument required", self.reader.getpos()));
        }
        let left = self.parse_expr()?;
        if !left.is(NodeType::Call) {
            return Err(ParseError::syntax("Not an function call", left.pos));
        }
        let pos = self.ea.cmdpos;
        let node = NodeKind::ExCall { ea: self.take_ea(), left: Box::new(left) };
        self.add_node(Node::new(node, pos));
        Ok(())
    }

    pub(crate) fn parse_cmd_throw(&mut self) -> ParseResult<()> {
        let left = self.parse_expr()?;
        let pos = self.ea.cmdpos;
        let node = NodeKind::Throw { ea: self.take_ea(), left: Box::new(left) };
        self.add_node(Node::new(node, pos));
        Ok(())
    }

    pub(crate) fn parse_cmd_eval(&mut self) -> ParseResult<()> {
        let left = self.parse_expr()?;
        let pos = self.ea.cmdpos;
        let node = NodeKind::Eval { ea: self.take_ea(), left: Box::new(left) };
        self.add_node(Node::new(node, pos));
        Ok(())
    }

    pub(crate) fn parse_cmd_echo(&mut self, command: EchoCommand) -> ParseResult<()> {
        let list = self.parse_exprlist()?;
        let pos = self.ea.cmdpos;
        let node = NodeKind::Echo { ea: self.take_ea(), command, list };
        self.add_node(Node::new(node, pos));
        Ok(())
    }

    pub(crate) fn parse_cmd_echohl(&mut self) -> ParseResult<()> {
        let mut text = String::new();
        while !ends_excmds(self.reader.peek()) {
            if let Some(c) = self.reader.get() {
                text.push(c);
            }
        }
        let pos = self.ea.cmdpos;
        let node = NodeKind::EchoHl { ea: self.take_ea(), text };
        self.add_node(Node::new(node, pos));
        Ok(())
    }

    /// Whitespace separated expressions; `"` starts a string here
    fn parse_exprlist(&mut self) -> ParseResult<Vec<Node>> {
        let mut list = Vec::new();
        loop {
            self.reader.skip_white();
            let c = self.reader.peek();
            if c != Some('"') && ends_excmds(c) {
                break;
            }
            list.push(self.parse_expr()?);
        }
        Ok(list)
    }
}

fn invalid_argument(value: &str, pos: Position) -> ParseError {
    ParseError::syntax(format!("E475 Invalid argument: {}", value), pos)
}

fn check_varname(node: &Node) -> ParseResult<()> {
    match &node.kind {
        NodeKind::Identifier { value } if !is_varname(value) => Err(ParseError::syntax(
            format!("E461: Illegal variable name: {}", value),
            node.pos,
        )),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::types::{Node, NodeKind, NodeType};
    use crate::parser::parser::Parser;
    use crate::parser::reader::StringReader;
    use crate::parser::types::{ErrorKind, ParseResult, ParserOptions};
    use crate::serializer::compile_expr;

    fn parse(lines: &[&str]) -> ParseResult<Node> {
        Parser::new(ParserOptions::default()).parse(StringReader::new(lines))
    }

    fn body(lines: &[&str]) -> Vec<Node> {
        parse(lines).unwrap().body().unwrap().to_vec()
    }

    fn excmd_text(node: &Node) -> &str {
        match &node.kind {
            NodeKind::ExCmd { text, .. } => text,
            other => panic!("expected EXCMD, got {:?}", other),
        }
    }

    fn message(lines: &[&str]) -> String {
        parse(lines).unwrap_err().message
    }

    #[test]
    fn test_common_stops_at_bar_and_comment() {
        let nodes = body(&["normal! x | set ts=4   \" tabs"]);
        // :normal sees `|` and `"` as keys
        assert_eq!(nodes.len(), 1);
        assert_eq!(excmd_text(&nodes[0]), "normal! x | set ts=4   \" tabs");

        let nodes = body(&["set ts=4   \" tabs", "set sw=2 | set et"]);
        let texts: Vec<_> = nodes
            .iter()
            .filter(|n| n.is(NodeType::ExCmd))
            .map(excmd_text)
            .collect();
        assert_eq!(texts, ["set ts=4", "set sw=2", "set et"]);
        assert!(nodes[1].is(NodeType::Comment));
    }

    #[test]
    fn test_common_escaped_bar() {
        let nodes = body(&["set statusline=a\\|b"]);
        assert_eq!(nodes.len(), 1);
        assert_eq!(excmd_text(&nodes[0]), "set statusline=a\\|b");
    }

    #[test]
    fn test_register_commands_keep_quote() {
        let nodes = body(&["redir @\"", "@\""]);
        assert_eq!(excmd_text(&nodes[0]), "redir @\"");
        assert_eq!(excmd_text(&nodes[1]), "@\"");
    }

    #[test]
    fn test_backtick_expression_in_file_argument() {
        let nodes = body(&["edit `=tempname()` | echo 1"]);
        assert_eq!(excmd_text(&nodes[0]), "edit `=tempname()`");
        assert!(nodes[1].is(NodeType::Echo));
        assert!(message(&["edit `=foo"]).starts_with("unexpected character"));
    }

    #[test]
    fn test_vimgrep_pattern_may_contain_bar() {
        let nodes = body(&["vimgrep /a|b/gj *.vim | copen"]);
        // trailing blanks are kept when `"` is not a comment
        assert_eq!(excmd_text(&nodes[0]), "vimgrep /a|b/gj *.vim ");
        assert_eq!(excmd_text(&nodes[1]), "copen");
    }

    #[test]
    fn test_argument_required() {
        assert_eq!(message(&["vimgrep"]), "E471: Argument required");
        assert_eq!(message(&["normal"]), "E471: Argument required");
        assert_eq!(message(&["call"]), "E471: Argument required");
        assert_eq!(message(&["wincmd"]), "E471: Argument required");
        assert!(parse(&["normal! gg"]).is_ok());
    }

    #[test]
    fn test_wincmd() {
        assert_eq!(excmd_text(&body(&["wincmd w"])[0]), "wincmd w");
        assert_eq!(excmd_text(&body(&["wincmd gt"])[0]), "wincmd gt");
        assert_eq!(message(&["wincmd g"]), "E474: Invalid Argument");
        assert_eq!(message(&["wincmd ww"]), "E474: Invalid Argument");
    }

    #[test]
    fn test_syntax_skips_patterns() {
        let nodes = body(&["syntax match Foo /a|b\"c/ contained"]);
        assert_eq!(nodes.len(), 1);
        assert_eq!(excmd_text(&nodes[0]), "syntax match Foo /a|b\"c/ contained");
    }

    #[test]
    fn test_finish_stops_at_toplevel() {
        let nodes = body(&["finish", "this is not parsed"]);
        assert_eq!(nodes.len(), 1);
        let nodes = body(&["if 0", "finish", "endif", "echo 1"]);
        assert_eq!(nodes.len(), 2);
    }

    #[test]
    fn test_append_and_insert_capture_lines() {
        let nodes = body(&["append", "  foo", "  bar", ".", "echo 1"]);
        assert_eq!(excmd_text(&nodes[0]), "append\n  foo\n  bar\n.");
        assert!(nodes[1].is(NodeType::Echo));
    }

    #[test]
    fn test_loadkeymap_takes_rest_of_file() {
        let nodes = body(&["loadkeymap", "a A", "b B"]);
        assert_eq!(nodes.len(), 1);
        assert_eq!(excmd_text(&nodes[0]), "loadkeymap\na A\nb B");
    }

    #[test]
    fn test_language_interfaces() {
        let nodes = body(&["python3 << EOF", "print(1)", "EOF", "lua print(2)", "ruby <<", "x", "."]);
        let texts: Vec<_> = nodes.iter().map(excmd_text).collect();
        assert_eq!(texts, ["python3 << EOF\nprint(1)\nEOF", "lua print(2)", "ruby <<\nx\n."]);
    }

    #[test]
    fn test_let_forms() {
        let nodes = body(&["let x = 1", "let [a, b; c] = l", "let s ..= 'x'", "let g:n += 2"]);
        let ops: Vec<_> = nodes
            .iter()
            .map(|n| match &n.kind {
                NodeKind::Let(a) => a.op.as_str(),
                _ => panic!("expected LET"),
            })
            .collect();
        assert_eq!(ops, ["=", "=", "..=", "+="]);
        let NodeKind::Let(a) = &nodes[1].kind else { unreachable!() };
        assert!(a.left.is_none());
        assert_eq!(a.list.len(), 2);
        assert_eq!(compile_expr(a.rest.as_deref().unwrap()), "c");
    }

    #[test]
    fn test_let_listing_falls_back_to_common() {
        let nodes = body(&["let", "let g:"]);
        assert_eq!(excmd_text(&nodes[0]), "let");
        assert_eq!(excmd_text(&nodes[1]), "let g:");
    }

    #[test]
    fn test_let_heredoc() {
        let nodes = body(&["let x =<< trim END", "  one", "  two", "END", "echo x"]);
        let NodeKind::Let(a) = &nodes[0].kind else { panic!("expected LET") };
        assert_eq!(a.op, "=<<");
        assert_eq!(
            a.right.kind,
            NodeKind::Heredoc {
                rlist: vec!["trim".to_string()],
                op: "END".to_string(),
                body: vec!["  one".to_string(), "  two".to_string()],
            }
        );
        assert!(nodes[1].is(NodeType::Echo));

        assert_eq!(message(&["let x =<< trim"]), "E172: Missing marker");
        let err = parse(&["let x =<< END", "a"]).unwrap_err();
        assert_eq!(err.message, "E990: Missing end marker 'END'");
        assert_eq!(err.kind, ErrorKind::Unterminated);
    }

    #[test]
    fn test_let_lhs_errors() {
        assert_eq!(message(&["let [a, b = l"]), "E475 Invalid argument: =");
        assert_eq!(message(&["let x:y = 1"]), "E461: Illegal variable name: x:y");
    }

    #[test]
    fn test_const() {
        let nodes = body(&["const X = 1", "const [a, b] = [1, 2]"]);
        assert!(nodes.iter().all(|n| n.is(NodeType::Const)));
        assert_eq!(message(&["const &ts = 1"]), "E996: Cannot lock an option");
        assert_eq!(message(&["const $X = 1"]), "E996: Cannot lock an environment variable");
        assert_eq!(message(&["const @a = 1"]), "E996: Cannot lock a register");
        assert_eq!(message(&["const d.k = 1"]), "E996: Cannot lock a list or dict");
        // listing form
        assert!(body(&["const X"])[0].is(NodeType::ExCmd));
    }

    #[test]
    fn test_unlet_and_lockvar() {
        let nodes = body(&["unlet! a b[1]", "lockvar 2 d", "unlockvar d"]);
        match &nodes[0].kind {
            NodeKind::Unlet { ea, list } => {
                assert!(ea.forceit);
                assert_eq!(list.len(), 2);
            }
            other => panic!("expected UNLET, got {:?}", other),
        }
        assert!(matches!(&nodes[1].kind, NodeKind::LockVar { depth: Some(2), .. }));
        assert!(matches!(&nodes[2].kind, NodeKind::UnlockVar { depth: None, .. }));
    }

    #[test]
    fn test_call_and_return() {
        let nodes = body(&["call F(1)", "function G()", "  return", "  return 1", "endfunction"]);
        assert!(nodes[0].is(NodeType::ExCall));
        let returns: Vec<_> = nodes[1]
            .body()
            .unwrap()
            .iter()
            .map(|n| matches!(&n.kind, NodeKind::Return { left: Some(_), .. }))
            .collect();
        assert_eq!(returns, [false, true]);
        assert_eq!(message(&["call x"]), "Not an function call");
        assert_eq!(message(&["return 1"]), "E133: :return not inside a function");
    }

    #[test]
    fn test_echo_family() {
        let nodes = body(&[
            "echo 'a' \"b\"",
            "echon 1",
            "echomsg 1",
            "echoerr 1",
            "execute 'x' . y",
            "echohl WarningMsg",
        ]);
        let types: Vec<_> = nodes.iter().map(Node::node_type).collect();
        assert_eq!(
            types,
            [
                NodeType::Echo,
                NodeType::Echon,
                NodeType::EchoMsg,
                NodeType::EchoErr,
                NodeType::Execute,
                NodeType::EchoHl
            ]
        );
        let NodeKind::Echo { list, .. } = &nodes[0].kind else { unreachable!() };
        assert_eq!(list.len(), 2);
        assert!(matches!(&nodes[5].kind, NodeKind::EchoHl { text, .. } if text == "WarningMsg"));
        assert!(body(&["echo"])[0].is(NodeType::Echo));
    }

    #[test]
    fn test_delfunction_eval_throw() {
        let nodes = body(&["delfunction s:F", "eval x->F()", "try", "throw 'oops'", "endtry"]);
        assert!(nodes[0].is(NodeType::DelFunction));
        assert!(nodes[1].is(NodeType::Eval));
        let NodeKind::Try(t) = &nodes[2].kind else { unreachable!() };
        assert!(t.body[0].is(NodeType::Throw));
        assert_eq!(message(&["delfunction 1"]), "unexpected token: 1");
    }
}
