//! Statement Parser for VimL Scripts
//!
//! Reads one Ex command per iteration and builds the AST. Block commands
//! (`:if`, `:while`, `:for`, `:try`, `:function`) push their node onto a
//! context stack; the matching closer pops it and links it into the parent.
//!
//! Grammar of a single command line:
//!   line      ::= [#!...] | [:]* ( comment | modifiers range command trail )
//!   modifiers ::= ([count] modifier [!])*
//!   range     ::= address ((,|;) address)*
//!   trail     ::= EOL | EOF | '|' | '"' comment
//!
//! The per-command body parsers live in `compound_parser.rs` (block
//! commands) and `command_parser.rs` (everything else).

use lazy_static::lazy_static;
use regex_lite::Regex;
use std::collections::HashMap;
use tracing::{debug, trace};

use crate::ast::types::{
    BinaryMode, EchoCommand, ExArg, Modifier, Node, NodeKind, NodeType, Position, AST,
};
use crate::parser::command_table::{
    Command, CommandFlags, CommandParser, BUILTIN_COMMANDS, NEOVIM_ADDITIONAL_COMMANDS,
    NEOVIM_REMOVED_COMMANDS,
};
use crate::parser::expression_parser::ExprParser;
use crate::parser::reader::{StringReader, EOL};
use crate::parser::types::{
    describe_char, is_digit, is_white, opt_is, ParseError, ParseResult, ParserOptions,
};

lazy_static! {
    static ref SUBSTITUTE_RE: Regex = Regex::new(r"^s(c[^sr][^i][^p]|g|i[^mlg]|I|r[^e])").unwrap();
    static ref DELETE_FLAG_RE: Regex = Regex::new(r"^d(elete|elet|ele|el|e)?[lp]$").unwrap();
    static ref ARGOPT_BIN_RE: Regex = Regex::new(r"^\+\+bin\b").unwrap();
    static ref ARGOPT_NOBIN_RE: Regex = Regex::new(r"^\+\+nobin\b").unwrap();
    static ref ARGOPT_EDIT_RE: Regex = Regex::new(r"^\+\+edit\b").unwrap();
    static ref ARGOPT_FF_RE: Regex = Regex::new(r"^\+\+ff=(dos|unix|mac)\b").unwrap();
    static ref ARGOPT_FILEFORMAT_RE: Regex =
        Regex::new(r"^\+\+fileformat=(dos|unix|mac)\b").unwrap();
    static ref ARGOPT_ENC_RE: Regex = Regex::new(r"^\+\+enc=\S").unwrap();
    static ref ARGOPT_ENCODING_RE: Regex = Regex::new(r"^\+\+encoding=\S").unwrap();
    static ref ARGOPT_BAD_RE: Regex = Regex::new(r"^\+\+bad=(keep|drop|.)\b").unwrap();
}

/// Command modifiers with their minimum abbreviation length, in match order
const MODIFIERS: &[(&str, usize)] = &[
    ("aboveleft", 3),
    ("belowright", 3),
    ("browse", 3),
    ("botright", 2),
    ("confirm", 4),
    ("keepmarks", 3),
    ("keepalt", 5),
    ("keepjumps", 5),
    ("keeppatterns", 5),
    ("hide", 3),
    ("lockmarks", 3),
    ("leftabove", 5),
    ("noautocmd", 3),
    ("noswapfile", 3),
    ("rightbelow", 6),
    ("sandbox", 3),
    ("silent", 3),
    ("tab", 3),
    ("topleft", 2),
    ("unsilent", 3),
    ("vertical", 4),
    ("verbose", 4),
];

/// True where an Ex command argument stops: EOL, EOF, `|` or `"`
pub fn ends_excmds(c: Option<char>) -> bool {
    matches!(c, None | Some('|' | '"' | EOL))
}

/// Main parser struct
pub struct Parser {
    pub(crate) reader: StringReader,
    /// Open blocks; the innermost is last, TOPLEVEL is always first
    pub(crate) context: Vec<Node>,
    /// Metadata of the command being parsed
    pub(crate) ea: ExArg,
    options: ParserOptions,
    find_command_cache: HashMap<String, Option<Command>>,
}

impl Parser {
    pub fn new(options: ParserOptions) -> Self {
        Self {
            reader: StringReader::new::<&str>(&[]),
            context: Vec::new(),
            ea: ExArg::default(),
            options,
            find_command_cache: HashMap::new(),
        }
    }

    /// Parse a whole script into a TOPLEVEL node
    pub fn parse(&mut self, reader: StringReader) -> ParseResult<Node> {
        self.reader = reader;
        self.context.clear();
        let pos = self.reader.getpos();
        debug!(neovim = self.options.neovim, "parse start");

        self.push_context(Node::new(NodeKind::TopLevel { body: Vec::new() }, pos));
        while self.reader.peek().is_some() {
            self.parse_one_cmd()?;
        }
        self.check_missing_end("TOPLEVEL", self.reader.getpos(), true)?;

        let mut toplevel = self
            .pop_context()
            .ok_or_else(|| ParseError::context("context stack underflow", pos))?;
        toplevel.pos = Position::new(0, 1, 1, 0);
        debug!(
            lines = self.reader.getpos().line.saturating_sub(1),
            statements = toplevel.body().map_or(0, <[Node]>::len),
            "parse end"
        );
        Ok(toplevel)
    }

    // =========================================================================
    // CONTEXT STACK
    // =========================================================================

    pub(crate) fn push_context(&mut self, node: Node) {
        trace!(node = %node.node_type(), depth = self.context.len(), "push context");
        self.context.push(node);
    }

    pub(crate) fn pop_context(&mut self) -> Option<Node> {
        let node = self.context.pop();
        if let Some(node) = &node {
            trace!(node = %node.node_type(), depth = self.context.len(), "pop context");
        }
        node
    }

    pub(crate) fn top_type(&self) -> NodeType {
        self.context
            .last()
            .map_or(NodeType::TopLevel, Node::node_type)
    }

    pub(crate) fn find_context(&self, node_type: NodeType) -> bool {
        self.context.iter().any(|n| n.is(node_type))
    }

    /// Append a statement to the innermost open block
    pub(crate) fn add_node(&mut self, node: Node) {
        if let Some(body) = self.context.last_mut().and_then(Node::body_mut) {
            body.push(node);
        }
    }

    /// Pop a finished block and append it to its parent's body
    pub(crate) fn close_block(&mut self) {
        if let Some(node) = self.pop_context() {
            self.add_node(node);
        }
    }

    /// Pop an `:elseif`, `:else`, `:catch` or `:finally` branch and link it
    /// into the enclosing IF or TRY
    pub(crate) fn close_branch(&mut self) {
        let Some(branch) = self.pop_context() else {
            return;
        };
        let Some(parent) = self.context.last_mut() else {
            return;
        };
        match &mut parent.kind {
            NodeKind::If(n) => {
                if branch.is(NodeType::Else) {
                    n.else_ = Some(Box::new(branch));
                } else {
                    n.elseif.push(branch);
                }
            }
            NodeKind::Try(n) => {
                if branch.is(NodeType::Finally) {
                    n.finally = Some(Box::new(branch));
                } else {
                    n.catch.push(branch);
                }
            }
            _ => {}
        }
    }

    /// Fail when the innermost block is still open. `ends` names what
    /// ended it: `TOPLEVEL` or `ENDFUNCTION`.
    pub(crate) fn check_missing_end(
        &self,
        ends: &str,
        pos: Position,
        include_function: bool,
    ) -> ParseResult<()> {
        let missing = match self.top_type() {
            NodeType::Function if include_function => Some(("E126", "endfunction")),
            NodeType::If | NodeType::ElseIf | NodeType::Else => Some(("E171", "endif")),
            NodeType::Try | NodeType::Catch | NodeType::Finally => Some(("E600", "endtry")),
            NodeType::While => Some(("E170", "endwhile")),
            NodeType::For => Some(("E170", "endfor")),
            _ => None,
        };
        match missing {
            Some((code, closer)) => Err(ParseError::unterminated(
                format!("{}: Missing :{}:    {}", code, closer, ends),
                pos,
            )),
            None => Ok(()),
        }
    }

    /// Hand the current command's metadata to the node being built
    pub(crate) fn take_ea(&mut self) -> Box<ExArg> {
        Box::new(std::mem::take(&mut self.ea))
    }

    pub(crate) fn parse_expr(&mut self) -> ParseResult<Node> {
        ExprParser::new(&mut self.reader).parse()
    }

    // =========================================================================
    // COMMAND LINE
    // =========================================================================

    fn parse_one_cmd(&mut self) -> ParseResult<()> {
        self.ea = ExArg::default();

        if self.reader.peekn(2) == "#!" {
            self.reader.getline();
            self.reader.get();
            return Ok(());
        }
        self.reader.skip_white_and_colon();
        if self.reader.peek1().is_none() {
            self.reader.get();
            return Ok(());
        }
        if self.reader.peek() == Some('"') {
            self.parse_comment()?;
            self.reader.get();
            return Ok(());
        }
        self.ea.linepos = self.reader.getpos();
        self.parse_command_modifiers();
        self.parse_range()?;
        self.parse_command()?;
        self.parse_trail()
    }

    fn parse_command_modifiers(&mut self) {
        let mut modifiers = Vec::new();
        loop {
            let pos = self.reader.tell();
            let mut d = String::new();
            if opt_is(self.reader.peek1(), is_digit) {
                d = self.reader.read_digit();
                self.reader.skip_white();
            }
            let k = self.reader.read_alpha();
            let c = self.reader.peek1();
            self.reader.skip_white();

            let name = MODIFIERS
                .iter()
                .find(|(name, minlen)| name.starts_with(k.as_str()) && k.len() >= *minlen)
                .map(|(name, _)| *name);
            let mut modifier = match name {
                // `:hide` on its own is the command
                Some("hide") if ends_excmds(c) => {
                    self.reader.seek_set(pos);
                    break;
                }
                Some(name) => Modifier::new(name),
                None => {
                    self.reader.seek_set(pos);
                    break;
                }
            };
            match modifier.name {
                "silent" if c == Some('!') => {
                    self.reader.get();
                    modifier.bang = true;
                }
                "tab" => modifier.count = d.parse().ok(),
                "verbose" => modifier.count = Some(d.parse().unwrap_or(1)),
                _ => {}
            }
            modifiers.push(modifier);
        }
        self.ea.modifiers = modifiers;
    }

    fn parse_range(&mut self) -> ParseResult<()> {
        let mut tokens = Vec::new();
        loop {
            loop {
                self.reader.skip_white();
                let Some(c) = self.reader.peek1() else {
                    break;
                };
                match c {
                    '.' | '$' => tokens.push(self.reader.getn(1)),
                    '\'' => {
                        self.reader.getn(1);
                        let m = self.reader.getn(1);
                        if m.is_empty() {
                            break;
                        }
                        tokens.push(format!("'{}", m));
                    }
                    '/' | '?' => {
                        self.reader.getn(1);
                        let (pattern, _) = self.parse_pattern(c)?;
                        tokens.push(pattern);
                    }
                    '\\' => match self.reader.p(1) {
                        Some(m @ ('&' | '?' | '/')) => {
                            self.reader.seek_cur(2);
                            tokens.push(format!("\\{}", m));
                        }
                        _ => {
                            return Err(ParseError::syntax(
                                r"E10: \\ should be followed by /, ? or &",
                                self.reader.getpos(),
                            ));
                        }
                    },
                    c if is_digit(c) => tokens.push(self.reader.read_digit()),
                    _ => {}
                }
                loop {
                    self.reader.skip_white();
                    if self.reader.peek1().is_none() {
                        break;
                    }
                    let n = self.reader.read_integer();
                    if n.is_empty() {
                        break;
                    }
                    tokens.push(n);
                }
                if !matches!(self.reader.p(0), Some('/' | '?')) {
                    break;
                }
            }
            if let Some('%' | '*') = self.reader.peek1() {
                tokens.push(self.reader.getn(1));
            }
            if let Some(';' | ',') = self.reader.peek1() {
                tokens.push(self.reader.getn(1));
                continue;
            }
            break;
        }
        self.ea.range = tokens;
        Ok(())
    }

    /// Read a pattern up to an unbracketed `delimiter`, which is consumed.
    /// Returns the pattern and the delimiter found, `None` at end of line.
    pub(crate) fn parse_pattern(&mut self, delimiter: char) -> ParseResult<(String, Option<char>)> {
        let mut pattern = String::new();
        let mut inbracket = 0i32;
        loop {
            let Some(c) = self.reader.peek1() else {
                return Ok((pattern, None));
            };
            self.reader.get();
            if c == delimiter && inbracket == 0 {
                return Ok((pattern, Some(c)));
            }
            pattern.push(c);
            match c {
                '\\' => {
                    let Some(escaped) = self.reader.peek1() else {
                        return Err(ParseError::syntax(
                            "E682: Invalid search pattern or delimiter",
                            self.reader.getpos(),
                        ));
                    };
                    self.reader.get();
                    pattern.push(escaped);
                }
                '[' => inbracket += 1,
                ']' => inbracket -= 1,
                _ => {}
            }
        }
    }

    fn parse_command(&mut self) -> ParseResult<()> {
        self.reader.skip_white_and_colon();
        self.ea.cmdpos = self.reader.getpos();

        if matches!(self.reader.peek1(), None | Some('"')) {
            if !self.ea.modifiers.is_empty() || !self.ea.range.is_empty() {
                self.parse_cmd_modifier_range();
            }
            return Ok(());
        }

        let Some(cmd) = self.find_command() else {
            self.reader.setpos(self.ea.cmdpos);
            return Err(ParseError::syntax(
                format!("E492: Not an editor command: {}", self.reader.peekline()),
                self.ea.cmdpos,
            ));
        };

        if self.reader.peek1() == Some('!')
            && !matches!(cmd.name.as_str(), "substitute" | "smagic" | "snomagic")
        {
            self.reader.getn(1);
            self.ea.forceit = true;
        }
        if self.ea.forceit && !cmd.has(CommandFlags::BANG | CommandFlags::USERCMD) {
            return Err(ParseError::syntax("E477: No ! allowed", self.ea.cmdpos));
        }

        if cmd.name != "!" {
            self.reader.skip_white();
        }
        self.ea.argpos = self.reader.getpos();

        if cmd.has(CommandFlags::ARGOPT) {
            self.parse_argopt()?;
        }

        match cmd.name.as_str() {
            "write" | "update" => {
                if self.reader.p(0) == Some('>') {
                    if self.reader.p(1) != Some('>') {
                        return Err(ParseError::syntax("E494: Use w or w>>", self.ea.cmdpos));
                    }
                    self.reader.seek_cur(2);
                    self.reader.skip_white();
                    self.ea.append = true;
                } else if self.reader.peek1() == Some('!') && cmd.name == "write" {
                    self.reader.getn(1);
                    self.ea.usefilter = true;
                }
            }
            "read" => {
                if self.ea.forceit {
                    self.ea.usefilter = true;
                    self.ea.forceit = false;
                } else if self.reader.peek1() == Some('!') {
                    self.reader.getn(1);
                    self.ea.usefilter = true;
                }
            }
            name @ ("<" | ">") => {
                let shift = name.chars().next();
                self.ea.amount = 1;
                while self.reader.peek1() == shift {
                    self.reader.getn(1);
                    self.ea.amount += 1;
                }
                self.reader.skip_white();
            }
            _ => {}
        }

        if cmd.has(CommandFlags::EDITCMD) && !self.ea.usefilter {
            self.parse_argcmd();
        }

        let parser = cmd.parser;
        trace!(command = %cmd.name, line = self.ea.cmdpos.line, "dispatch");
        self.ea.cmd = Some(cmd);
        self.dispatch(parser)
    }

    fn dispatch(&mut self, parser: CommandParser) -> ParseResult<()> {
        use CommandParser::*;
        match parser {
            Append | Insert => self.parse_cmd_append(),
            Break => self.parse_cmd_break(),
            Call => self.parse_cmd_call(),
            Catch => self.parse_cmd_catch(),
            Common | Usercmd => self.parse_cmd_common(),
            Const => self.parse_cmd_const(),
            Continue => self.parse_cmd_continue(),
            Delfunction => self.parse_cmd_delfunction(),
            Echo => self.parse_cmd_echo(EchoCommand::Echo),
            Echoerr => self.parse_cmd_echo(EchoCommand::EchoErr),
            Echomsg => self.parse_cmd_echo(EchoCommand::EchoMsg),
            Echon => self.parse_cmd_echo(EchoCommand::Echon),
            Execute => self.parse_cmd_echo(EchoCommand::Execute),
            Echohl => self.parse_cmd_echohl(),
            Else => self.parse_cmd_else(),
            Elseif => self.parse_cmd_elseif(),
            Endfor => self.parse_cmd_endfor(),
            Endfunction => self.parse_cmd_endfunction(),
            Endif => self.parse_cmd_endif(),
            Endtry => self.parse_cmd_endtry(),
            Endwhile => self.parse_cmd_endwhile(),
            Eval => self.parse_cmd_eval(),
            Finally => self.parse_cmd_finally(),
            Finish => self.parse_cmd_finish(),
            For => self.parse_cmd_for(),
            Function => self.parse_cmd_function(),
            If => self.parse_cmd_if(),
            Let => self.parse_cmd_let(),
            Loadkeymap => self.parse_cmd_loadkeymap(),
            Lockvar => self.parse_cmd_lockvar(false),
            Unlockvar => self.parse_cmd_lockvar(true),
            Lua | Mzscheme | Perl | Python | Python3 | Ruby | Tcl => self.parse_cmd_script(),
            Return => self.parse_cmd_return(),
            Syntax => self.parse_cmd_syntax(),
            Throw => self.parse_cmd_throw(),
            Try => self.parse_cmd_try(),
            Unlet => self.parse_cmd_unlet(),
            While => self.parse_cmd_while(),
            Wincmd => self.parse_wincmd(),
        }
    }

    /// Resolve the command name under the cursor, consuming it
    fn find_command(&mut self) -> Option<Command> {
        let c = self.reader.peek1()?;
        let mut name = if c == 'k' {
            self.reader.getn(1);
            "k".to_string()
        } else if c == 's' && SUBSTITUTE_RE.is_match(&self.reader.peekn(5)) {
            self.reader.getn(1);
            "substitute".to_string()
        } else if "@*!=><&~#".contains(c) {
            self.reader.getn(1)
        } else if self.reader.peekn(2) == "py" {
            self.reader.read_alnum()
        } else {
            let pos = self.reader.tell();
            let name = self.reader.read_alpha();
            // `:dl` is `:delete l`, `:dp` is `:delete p`
            if name != "del" && DELETE_FLAG_RE.is_match(&name) {
                self.reader.seek_set(pos);
                self.reader.getn(name.len() - 1)
            } else {
                name
            }
        };
        if name.is_empty() {
            return None;
        }
        if let Some(cached) = self.find_command_cache.get(&name) {
            return cached.clone();
        }

        let mut cmd = BUILTIN_COMMANDS.iter().find(|d| d.matches(&name));
        if self.options.neovim {
            if let Some(d) = NEOVIM_ADDITIONAL_COMMANDS.iter().find(|d| d.matches(&name)) {
                cmd = Some(d);
            }
            if NEOVIM_REMOVED_COMMANDS.iter().any(|d| d.matches(&name)) {
                cmd = None;
            }
        }
        let mut cmd = cmd.map(Command::from);

        let user_defined = cmd.as_ref().map_or(true, |c| c.name == "Print");
        if user_defined && name.starts_with(|c: char| c.is_ascii_uppercase()) {
            name.push_str(&self.reader.read_alnum());
            cmd = Some(Command::user(name.clone()));
        }
        self.find_command_cache.insert(name, cmd.clone());
        cmd
    }

    /// `++opt=val` arguments of file commands
    fn parse_argopt(&mut self) -> ParseResult<()> {
        while self.reader.p(0) == Some('+') && self.reader.p(1) == Some('+') {
            let s = self.reader.peekn(20);
            if ARGOPT_BIN_RE.is_match(&s) {
                self.reader.getn(5);
                self.ea.force_bin = Some(BinaryMode::Bin);
            } else if ARGOPT_NOBIN_RE.is_match(&s) {
                self.reader.getn(7);
                self.ea.force_bin = Some(BinaryMode::NoBin);
            } else if ARGOPT_EDIT_RE.is_match(&s) {
                self.reader.getn(6);
                self.ea.read_edit = true;
            } else if ARGOPT_FF_RE.is_match(&s) {
                self.reader.getn(5);
                self.ea.force_ff = Some(self.reader.read_alpha());
            } else if ARGOPT_FILEFORMAT_RE.is_match(&s) {
                self.reader.getn(13);
                self.ea.force_ff = Some(self.reader.read_alpha());
            } else if ARGOPT_ENC_RE.is_match(&s) {
                self.reader.getn(6);
                self.ea.force_enc = Some(self.reader.read_nonwhite());
            } else if ARGOPT_ENCODING_RE.is_match(&s) {
                self.reader.getn(11);
                self.ea.force_enc = Some(self.reader.read_nonwhite());
            } else if ARGOPT_BAD_RE.is_match(&s) {
                self.reader.getn(6);
                let n = if s[6..].starts_with("keep") || s[6..].starts_with("drop") {
                    4
                } else {
                    1
                };
                self.ea.bad_char = Some(self.reader.getn(n));
            } else {
                return Err(ParseError::syntax("E474: Invalid Argument", self.reader.getpos()));
            }
            self.reader.skip_white();
        }
        Ok(())
    }

    /// `+cmd` argument of edit-like commands
    fn parse_argcmd(&mut self) {
        if self.reader.peek1() == Some('+') {
            self.reader.getn(1);
            if self.reader.peek1() == Some(' ') {
                self.ea.do_ecmd_cmd = Some("$".to_string());
            } else {
                self.ea.do_ecmd_cmd = Some(self.read_cmdarg());
            }
        }
    }

    fn read_cmdarg(&mut self) -> String {
        let mut r = String::new();
        while let Some(c) = self.reader.peek1().filter(|&c| !is_white(c)) {
            self.reader.get();
            if c == '\\' {
                if let Some(escaped) = self.reader.peek1() {
                    self.reader.get();
                    r.push(escaped);
                }
            } else {
                r.push(c);
            }
        }
        r
    }

    fn parse_comment(&mut self) -> ParseResult<()> {
        let npos = self.reader.getpos();
        let c = self.reader.get();
        if c != Some('"') {
            return Err(ParseError::lexical(
                format!("unexpected character: {}", describe_char(c)),
                npos,
            ));
        }
        let text = self.reader.getline();
        self.add_node(Node::new(NodeKind::Comment { text }, npos));
        Ok(())
    }

    pub(crate) fn parse_trail(&mut self) -> ParseResult<()> {
        self.reader.skip_white();
        match self.reader.peek() {
            None => Ok(()),
            Some(EOL | '|') => {
                self.reader.get();
                Ok(())
            }
            Some('"') => {
                self.parse_comment()?;
                self.reader.get();
                Ok(())
            }
            Some(c) => Err(ParseError::syntax(
                format!("E488: Trailing characters: {}", c),
                self.reader.getpos(),
            )),
        }
    }

    /// A line holding only modifiers and a range, such as `:3` or `:silent`
    fn parse_cmd_modifier_range(&mut self) {
        let text = self.reader.getstr(self.ea.linepos, self.reader.getpos());
        let ea = std::mem::take(&mut self.ea);
        self.add_node(AST::excmd(ea, text));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::types::ErrorKind;

    fn parse_with(lines: &[&str], neovim: bool) -> ParseResult<Node> {
        Parser::new(ParserOptions { neovim }).parse(StringReader::new(lines))
    }

    fn parse(lines: &[&str]) -> ParseResult<Node> {
        parse_with(lines, false)
    }

    fn first(lines: &[&str]) -> Node {
        let top = parse(lines).unwrap();
        top.body().unwrap()[0].clone()
    }

    fn command_name(line: &str, neovim: bool) -> Option<String> {
        let mut parser = Parser::new(ParserOptions { neovim });
        parser.reader = StringReader::new(&[line]);
        parser.find_command().map(|c| c.name)
    }

    #[test]
    fn test_ends_excmds() {
        assert!(ends_excmds(None));
        assert!(ends_excmds(Some('|')));
        assert!(ends_excmds(Some('"')));
        assert!(ends_excmds(Some(EOL)));
        assert!(!ends_excmds(Some('a')));
    }

    #[test]
    fn test_empty_script() {
        let top = parse(&[]).unwrap();
        assert!(top.is(NodeType::TopLevel));
        assert!(top.body().unwrap().is_empty());
        assert_eq!((top.pos.line, top.pos.column, top.pos.offset), (1, 1, 0));
    }

    #[test]
    fn test_skips_hashbang_blank_and_colons() {
        let top = parse(&["#!/usr/bin/vim -S", "", "  ::  ", "\" note"]).unwrap();
        let body = top.body().unwrap();
        assert_eq!(body.len(), 1);
        assert_eq!(body[0].kind, NodeKind::Comment { text: " note".to_string() });
        assert_eq!(body[0].pos.line, 4);
    }

    #[test]
    fn test_abbreviations_resolve() {
        assert_eq!(command_name("q", false).as_deref(), Some("quit"));
        assert_eq!(command_name("fu", false).as_deref(), Some("function"));
        assert_eq!(command_name("endfo", false).as_deref(), Some("endfor"));
        assert_eq!(command_name("k", false).as_deref(), Some("k"));
        assert_eq!(command_name("sg", false).as_deref(), Some("substitute"));
        assert_eq!(command_name("py3", false).as_deref(), Some("py3"));
        assert_eq!(command_name("python3", false).as_deref(), Some("python3"));
        assert_eq!(command_name("&&", false).as_deref(), Some("&"));
        assert_eq!(command_name("dl", false).as_deref(), Some("delete"));
        assert_eq!(command_name("del", false).as_deref(), Some("delete"));
        assert_eq!(command_name("foobar", false), None);
    }

    #[test]
    fn test_minimum_prefix_sweep() {
        // prefixes that legitimately resolve elsewhere
        let shadowed = [
            ("dlist", "delete"),
            ("keepalt", "k"),
            ("keepmarks", "k"),
            ("keepjumps", "k"),
            ("keeppatterns", "k"),
            ("Print", "P"),
            ("tcd", "tcl"),
            ("vim9script", "vimgrep"),
        ];
        for d in BUILTIN_COMMANDS {
            if !d.name.starts_with(|c: char| c.is_ascii_alphabetic()) {
                continue;
            }
            let typed = &d.name[..d.minlen];
            let expected = shadowed
                .iter()
                .find(|(name, _)| *name == d.name)
                .map_or(d.name, |(_, to)| *to);
            assert_eq!(
                command_name(typed, false).as_deref(),
                Some(expected),
                "typed {}",
                typed
            );

            if d.minlen > 1 {
                let short = &d.name[..d.minlen - 1];
                assert_ne!(
                    command_name(short, false).as_deref(),
                    Some(d.name),
                    "{} resolved below its minimum length",
                    short
                );
            }
        }
    }

    #[test]
    fn test_recent_vim_commands_resolve() {
        let names = [
            "cbottom", "cdo", "cfdo", "chistory", "clearjumps", "filter", "helpclose", "lbottom",
            "ldo", "lfdo", "lhistory", "llist", "noswapfile", "packadd", "packloadall", "smile",
            "pyx", "pyxdo", "pythonx", "pyxfile", "terminal", "tmap", "tmapclear", "tnoremap",
            "tunmap", "cabove", "cafter", "cbefore", "cbelow", "labove", "lafter", "lbefore",
            "lbelow", "redrawtabline", "scriptversion", "tcd", "tchdir", "tlmenu", "tlnoremenu",
            "tlunmenu", "xrestore", "def", "disassemble", "enddef", "export", "import", "spellrare",
        ];
        for name in names {
            assert_eq!(command_name(name, false).as_deref(), Some(name), "typed {}", name);
        }
        assert_eq!(command_name("lis", false).as_deref(), Some("list"));
        assert_eq!(command_name("lli", false).as_deref(), Some("llist"));
    }

    #[test]
    fn test_recent_vim_commands_parse() {
        for (line, text) in [
            ("packadd matchit", "packadd matchit"),
            ("tnoremap <Esc> x", "tnoremap <Esc> x"),
            ("filter /x/ ls", "filter /x/ ls"),
            ("terminal", "terminal"),
            ("chistory", "chistory"),
            ("scriptversion 3", "scriptversion 3"),
            ("llist", "llist"),
        ] {
            let node = first(&[line]);
            assert!(node.is(NodeType::ExCmd), "{}", line);
            assert!(matches!(&node.kind, NodeKind::ExCmd { text: t, .. } if t == text), "{}", line);
        }
    }

    #[test]
    fn test_neovim_command_sets() {
        assert_eq!(command_name("rsh", true).as_deref(), Some("rshada"));
        assert_eq!(command_name("rsh", false), None);
        assert_eq!(command_name("fixdel", false).as_deref(), Some("fixdel"));
        assert_eq!(command_name("fixdel", true), None);
        assert_eq!(command_name("Print", true).as_deref(), Some("Print"));
    }

    #[test]
    fn test_user_command() {
        let node = first(&["MyCmd! arg | echo 1"]);
        let ea = node.ea().unwrap();
        let cmd = ea.cmd.as_ref().unwrap();
        assert_eq!(cmd.name, "MyCmd");
        assert_eq!(cmd.parser, CommandParser::Usercmd);
        assert!(ea.forceit);
        assert_eq!(node.kind, NodeKind::ExCmd { ea: Box::new(ea.clone()), text: "MyCmd! arg | echo 1".to_string() });
    }

    #[test]
    fn test_unknown_command() {
        let err = parse(&["  foobar baz"]).unwrap_err();
        assert_eq!(err.message, "E492: Not an editor command: foobar baz");
        assert_eq!(err.kind, ErrorKind::Syntax);
        assert_eq!((err.pos.line, err.pos.column), (1, 3));
    }

    #[test]
    fn test_bang_not_allowed() {
        let err = parse(&["echo! 1"]).unwrap_err();
        assert_eq!(err.message, "E477: No ! allowed");
    }

    #[test]
    fn test_modifiers() {
        let node = first(&["3tab verbose keepalt silent! edit foo"]);
        let ea = node.ea().unwrap();
        let names: Vec<_> = ea.modifiers.iter().map(|m| m.name).collect();
        assert_eq!(names, ["tab", "verbose", "keepalt", "silent"]);
        assert_eq!(ea.modifiers[0].count, Some(3));
        assert_eq!(ea.modifiers[1].count, Some(1));
        assert!(ea.modifiers[3].bang);
        assert_eq!(ea.cmd.as_ref().unwrap().name, "edit");
    }

    #[test]
    fn test_hide_alone_is_command() {
        let node = first(&["hide"]);
        let ea = node.ea().unwrap();
        assert!(ea.modifiers.is_empty());
        assert_eq!(ea.cmd.as_ref().unwrap().name, "hide");
    }

    #[test]
    fn test_range() {
        let node = first(&["'a,/foo/+1d"]);
        let ea = node.ea().unwrap();
        assert_eq!(ea.range, ["'a", ",", "foo", "+1"]);
        assert_eq!(ea.cmd.as_ref().unwrap().name, "delete");

        let node = first(&["%s/a/b/g"]);
        assert_eq!(node.ea().unwrap().range, ["%"]);

        let node = first(&["\\/,$-2y"]);
        assert_eq!(node.ea().unwrap().range, ["\\/", ",", "$", "-2"]);

        let err = parse(&["\\x"]).unwrap_err();
        assert_eq!(err.message, r"E10: \\ should be followed by /, ? or &");
    }

    #[test]
    fn test_range_only_line() {
        let node = first(&["  :3"]);
        assert_eq!(node.kind, NodeKind::ExCmd { ea: Box::new(node.ea().unwrap().clone()), text: "3".to_string() });
        assert!(node.ea().unwrap().cmd.is_none());
    }

    #[test]
    fn test_pattern_brackets_and_escapes() {
        let node = first(&["/a[/]b\\/c/p"]);
        assert_eq!(node.ea().unwrap().range, ["a[/]b\\/c"]);
        let err = parse(&["/abc\\"]).unwrap_err();
        assert_eq!(err.message, "E682: Invalid search pattern or delimiter");
    }

    #[test]
    fn test_argopt_and_argcmd() {
        let node = first(&["edit ++enc=utf-8 ++ff=unix ++bad=drop +42 foo.txt"]);
        let ea = node.ea().unwrap();
        assert_eq!(ea.force_enc.as_deref(), Some("utf-8"));
        assert_eq!(ea.force_ff.as_deref(), Some("unix"));
        assert_eq!(ea.bad_char.as_deref(), Some("drop"));
        assert_eq!(ea.do_ecmd_cmd.as_deref(), Some("42"));

        let node = first(&["edit ++bin foo"]);
        assert_eq!(node.ea().unwrap().force_bin, Some(BinaryMode::Bin));

        let err = parse(&["edit ++bogus foo"]).unwrap_err();
        assert_eq!(err.message, "E474: Invalid Argument");
    }

    #[test]
    fn test_write_and_read_flags() {
        assert!(first(&["w >> log"]).ea().unwrap().append);
        assert!(first(&["w !sort"]).ea().unwrap().usefilter);
        let read = first(&["r! ls"]);
        assert!(read.ea().unwrap().usefilter);
        assert!(!read.ea().unwrap().forceit);
        assert_eq!(parse(&["w > log"]).unwrap_err().message, "E494: Use w or w>>");
    }

    #[test]
    fn test_shift_amount() {
        assert_eq!(first(&[">>>"]).ea().unwrap().amount, 3);
        assert_eq!(first(&["<"]).ea().unwrap().amount, 1);
    }

    #[test]
    fn test_trailing_characters() {
        let err = parse(&["if 1 | endif x"]).unwrap_err();
        assert_eq!(err.message, "E488: Trailing characters: x");
        let err = parse(&["let x = 1 2"]).unwrap_err();
        assert_eq!(err.message, "E488: Trailing characters: 2");
        assert_eq!(err.pos.column, 11);
    }

    #[test]
    fn test_trailing_comment_and_bar() {
        let top = parse(&["let x = 1 \" set x", "echo 1 | echo 2"]).unwrap();
        let types: Vec<_> = top.body().unwrap().iter().map(Node::node_type).collect();
        assert_eq!(
            types,
            [NodeType::Let, NodeType::Comment, NodeType::Echo, NodeType::Echo]
        );
    }

    #[test]
    fn test_find_command_cache_is_consistent() {
        let top = parse(&["MyCmd", "MyCmd", "q"]).unwrap();
        let names: Vec<_> = top
            .body()
            .unwrap()
            .iter()
            .map(|n| n.ea().unwrap().cmd.as_ref().unwrap().name.clone())
            .collect();
        assert_eq!(names, ["MyCmd", "MyCmd", "quit"]);
    }

    #[test]
    fn test_excmd_builder_uses_cmdpos() {
        let mut ea = ExArg::default();
        ea.cmdpos = Position::new(4, 1, 5, 4);
        let node = AST::excmd(ea, "quit".to_string());
        assert_eq!(node.pos.column, 5);
    }
}
