//! Ex command descriptor table
//!
//! One entry per builtin command: full name, minimum abbreviation length,
//! capability flags and the body parser that handles its arguments. Lookup
//! walks the table in order, so entries sharing a prefix are ordered the way
//! Vim resolves them.

use serde::Serialize;

mod flag {
    pub const RANGE: u32 = 1 << 0;
    pub const BANG: u32 = 1 << 1;
    pub const EXTRA: u32 = 1 << 2;
    pub const XFILE: u32 = 1 << 3;
    pub const NOSPC: u32 = 1 << 4;
    pub const DFLALL: u32 = 1 << 5;
    pub const WHOLEFOLD: u32 = 1 << 6;
    pub const NEEDARG: u32 = 1 << 7;
    pub const TRLBAR: u32 = 1 << 8;
    pub const REGSTR: u32 = 1 << 9;
    pub const COUNT: u32 = 1 << 10;
    pub const NOTRLCOM: u32 = 1 << 11;
    pub const ZEROR: u32 = 1 << 12;
    pub const USECTRLV: u32 = 1 << 13;
    pub const NOTADR: u32 = 1 << 14;
    pub const EDITCMD: u32 = 1 << 15;
    pub const BUFNAME: u32 = 1 << 16;
    pub const BUFUNL: u32 = 1 << 17;
    pub const ARGOPT: u32 = 1 << 18;
    pub const SBOXOK: u32 = 1 << 19;
    pub const CMDWIN: u32 = 1 << 20;
    pub const MODIFY: u32 = 1 << 21;
    pub const EXFLAGS: u32 = 1 << 22;
    pub const FILES: u32 = 1 << 23;
    pub const FILE1: u32 = 1 << 24;
    pub const WORD1: u32 = 1 << 25;
    pub const USERCMD: u32 = 1 << 26;
}

bitflags::bitflags! {
    /// Capability flags of an Ex command
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
    pub struct CommandFlags: u32 {
        const RANGE = flag::RANGE;
        const BANG = flag::BANG;
        const EXTRA = flag::EXTRA;
        const XFILE = flag::XFILE;
        const NOSPC = flag::NOSPC;
        const DFLALL = flag::DFLALL;
        const WHOLEFOLD = flag::WHOLEFOLD;
        const NEEDARG = flag::NEEDARG;
        const TRLBAR = flag::TRLBAR;
        const REGSTR = flag::REGSTR;
        const COUNT = flag::COUNT;
        const NOTRLCOM = flag::NOTRLCOM;
        const ZEROR = flag::ZEROR;
        const USECTRLV = flag::USECTRLV;
        const NOTADR = flag::NOTADR;
        const EDITCMD = flag::EDITCMD;
        const BUFNAME = flag::BUFNAME;
        const BUFUNL = flag::BUFUNL;
        const ARGOPT = flag::ARGOPT;
        const SBOXOK = flag::SBOXOK;
        const CMDWIN = flag::CMDWIN;
        const MODIFY = flag::MODIFY;
        const EXFLAGS = flag::EXFLAGS;
        const FILES = flag::FILES;
        const FILE1 = flag::FILE1;
        const WORD1 = flag::WORD1;
        const USERCMD = flag::USERCMD;
    }
}

/// Body parser selected for a resolved command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CommandParser {
    Append,
    Break,
    Call,
    Catch,
    Common,
    Const,
    Continue,
    Delfunction,
    Echo,
    Echoerr,
    Echohl,
    Echomsg,
    Echon,
    Else,
    Elseif,
    Endfor,
    Endfunction,
    Endif,
    Endtry,
    Endwhile,
    Eval,
    Execute,
    Finally,
    Finish,
    For,
    Function,
    If,
    Insert,
    Let,
    Loadkeymap,
    Lockvar,
    Lua,
    Mzscheme,
    Perl,
    Python,
    Python3,
    Return,
    Ruby,
    Syntax,
    Tcl,
    Throw,
    Try,
    Unlet,
    Unlockvar,
    Usercmd,
    While,
    Wincmd,
}

/// Static table entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandDescriptor {
    pub name: &'static str,
    pub minlen: usize,
    pub flags: CommandFlags,
    pub parser: CommandParser,
}

impl CommandDescriptor {
    /// True when `typed` is an accepted abbreviation of this command
    pub fn matches(&self, typed: &str) -> bool {
        self.name.starts_with(typed) && typed.len() >= self.minlen
    }
}

/// A resolved command, as recorded on the node's `ExArg`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Command {
    pub name: String,
    pub minlen: usize,
    pub flags: CommandFlags,
    pub parser: CommandParser,
}

impl Command {
    /// Commands starting with an uppercase letter that are not builtins
    pub fn user(name: String) -> Self {
        Self {
            name,
            minlen: 0,
            flags: CommandFlags::USERCMD,
            parser: CommandParser::Usercmd,
        }
    }

    pub fn has(&self, flags: CommandFlags) -> bool {
        self.flags.intersects(flags)
    }
}

impl From<&CommandDescriptor> for Command {
    fn from(d: &CommandDescriptor) -> Self {
        Self {
            name: d.name.to_string(),
            minlen: d.minlen,
            flags: d.flags,
            parser: d.parser,
        }
    }
}

const fn cmd(
    name: &'static str,
    minlen: usize,
    flags: u32,
    parser: CommandParser,
) -> CommandDescriptor {
    CommandDescriptor {
        name,
        minlen,
        flags: CommandFlags::from_bits_retain(flags),
        parser,
    }
}

use flag::*;
use CommandParser::*;

pub static BUILTIN_COMMANDS: &[CommandDescriptor] = &[
    cmd("append", 1, BANG | RANGE | ZEROR | TRLBAR | CMDWIN | MODIFY, Append),
    cmd("abbreviate", 2, EXTRA | TRLBAR | NOTRLCOM | USECTRLV | CMDWIN, Common),
    cmd("abclear", 3, EXTRA | TRLBAR | CMDWIN, Common),
    cmd("aboveleft", 3, NEEDARG | EXTRA | NOTRLCOM, Common),
    cmd("all", 2, BANG | RANGE | NOTADR | COUNT | TRLBAR, Common),
    cmd("amenu", 2, RANGE | NOTADR | ZEROR | EXTRA | TRLBAR | NOTRLCOM | USECTRLV | CMDWIN, Common),
    cmd("anoremenu", 2, RANGE | NOTADR | ZEROR | EXTRA | TRLBAR | NOTRLCOM | USECTRLV | CMDWIN, Common),
    cmd("args", 2, BANG | FILES | EDITCMD | ARGOPT | TRLBAR, Common),
    cmd("argadd", 4, BANG | NEEDARG | RANGE | NOTADR | ZEROR | FILES | TRLBAR, Common),
    cmd("argdelete", 4, BANG | RANGE | NOTADR | FILES | TRLBAR, Common),
    cmd("argedit", 4, BANG | NEEDARG | RANGE | NOTADR | FILE1 | EDITCMD | ARGOPT | TRLBAR, Common),
    cmd("argdo", 5, BANG | NEEDARG | EXTRA | NOTRLCOM, Common),
    cmd("argglobal", 4, BANG | FILES | EDITCMD | ARGOPT | TRLBAR, Common),
    cmd("arglocal", 4, BANG | FILES | EDITCMD | ARGOPT | TRLBAR, Common),
    cmd("argument", 4, BANG | RANGE | NOTADR | COUNT | EXTRA | EDITCMD | ARGOPT | TRLBAR, Common),
    cmd("ascii", 2, TRLBAR | SBOXOK | CMDWIN, Common),
    cmd("autocmd", 2, BANG | EXTRA | NOTRLCOM | USECTRLV | CMDWIN, Common),
    cmd("augroup", 3, BANG | WORD1 | TRLBAR | CMDWIN, Common),
    cmd("aunmenu", 3, EXTRA | TRLBAR | NOTRLCOM | USECTRLV | CMDWIN, Common),
    cmd("buffer", 1, BANG | RANGE | NOTADR | BUFNAME | BUFUNL | COUNT | EXTRA | TRLBAR, Common),
    cmd("bNext", 2, BANG | RANGE | NOTADR | COUNT | TRLBAR, Common),
    cmd("ball", 2, RANGE | NOTADR | COUNT | TRLBAR, Common),
    cmd("badd", 3, NEEDARG | FILE1 | EDITCMD | TRLBAR | CMDWIN, Common),
    cmd("bdelete", 2, BANG | RANGE | NOTADR | BUFNAME | COUNT | EXTRA | TRLBAR, Common),
    cmd("behave", 2, NEEDARG | WORD1 | TRLBAR | CMDWIN, Common),
    cmd("belowright", 3, NEEDARG | EXTRA | NOTRLCOM, Common),
    cmd("bfirst", 2, BANG | RANGE | NOTADR | TRLBAR, Common),
    cmd("blast", 2, BANG | RANGE | NOTADR | TRLBAR, Common),
    cmd("bmodified", 2, BANG | RANGE | NOTADR | COUNT | TRLBAR, Common),
    cmd("bnext", 2, BANG | RANGE | NOTADR | COUNT | TRLBAR, Common),
    cmd("botright", 2, NEEDARG | EXTRA | NOTRLCOM, Common),
    cmd("bprevious", 2, BANG | RANGE | NOTADR | COUNT | TRLBAR, Common),
    cmd("brewind", 2, BANG | RANGE | NOTADR | TRLBAR, Common),
    cmd("break", 4, TRLBAR | SBOXOK | CMDWIN, Break),
    cmd("breakadd", 6, EXTRA | TRLBAR | CMDWIN, Common),
    cmd("breakdel", 6, EXTRA | TRLBAR | CMDWIN, Common),
    cmd("breaklist", 6, EXTRA | TRLBAR | CMDWIN, Common),
    cmd("browse", 3, NEEDARG | EXTRA | NOTRLCOM | CMDWIN, Common),
    cmd("bufdo", 5, BANG | NEEDARG | EXTRA | NOTRLCOM, Common),
    cmd("buffers", 7, BANG | TRLBAR | CMDWIN, Common),
    cmd("bunload", 3, BANG | RANGE | NOTADR | BUFNAME | COUNT | EXTRA | TRLBAR, Common),
    cmd("bwipeout", 2, BANG | RANGE | NOTADR | BUFNAME | BUFUNL | COUNT | EXTRA | TRLBAR, Common),
    cmd("change", 1, BANG | WHOLEFOLD | RANGE | COUNT | TRLBAR | CMDWIN | MODIFY, Common),
    cmd("cNext", 2, RANGE | NOTADR | COUNT | TRLBAR | BANG, Common),
    cmd("cNfile", 3, RANGE | NOTADR | COUNT | TRLBAR | BANG, Common),
    cmd("cabbrev", 2, EXTRA | TRLBAR | NOTRLCOM | USECTRLV | CMDWIN, Common),
    cmd("cabclear", 4, EXTRA | TRLBAR | CMDWIN, Common),
    cmd("caddbuffer", 3, RANGE | NOTADR | WORD1 | TRLBAR, Common),
    cmd("caddexpr", 5, NEEDARG | WORD1 | NOTRLCOM | TRLBAR, Common),
    cmd("caddfile", 5, TRLBAR | FILE1, Common),
    cmd("call", 3, RANGE | NEEDARG | EXTRA | NOTRLCOM | SBOXOK | CMDWIN, Call),
    cmd("catch", 3, EXTRA | SBOXOK | CMDWIN, Catch),
    cmd("cbuffer", 2, BANG | RANGE | NOTADR | WORD1 | TRLBAR, Common),
    cmd("cc", 2, RANGE | NOTADR | COUNT | TRLBAR | BANG, Common),
    cmd("cclose", 3, RANGE | NOTADR | COUNT | TRLBAR, Common),
    cmd("cd", 2, BANG | FILE1 | TRLBAR | CMDWIN, Common),
    cmd("center", 2, TRLBAR | RANGE | WHOLEFOLD | EXTRA | CMDWIN | MODIFY, Common),
    cmd("cexpr", 3, NEEDARG | WORD1 | NOTRLCOM | TRLBAR | BANG, Common),
    cmd("cfile", 2, TRLBAR | FILE1 | BANG, Common),
    cmd("cfirst", 4, RANGE | NOTADR | COUNT | TRLBAR | BANG, Common),
    cmd("cgetbuffer", 5, RANGE | NOTADR | WORD1 | TRLBAR, Common),
    cmd("cgetexpr", 5, NEEDARG | WORD1 | NOTRLCOM | TRLBAR, Common),
    cmd("cgetfile", 2, TRLBAR | FILE1, Common),
    cmd("changes", 7, TRLBAR | CMDWIN, Common),
    cmd("chdir", 3, BANG | FILE1 | TRLBAR | CMDWIN, Common),
    cmd("checkpath", 3, TRLBAR | BANG | CMDWIN, Common),
    cmd("checktime", 6, RANGE | NOTADR | BUFNAME | COUNT | EXTRA | TRLBAR, Common),
    cmd("clist", 2, BANG | EXTRA | TRLBAR | CMDWIN, Common),
    cmd("clast", 3, RANGE | NOTADR | COUNT | TRLBAR | BANG, Common),
    cmd("close", 3, BANG | TRLBAR | CMDWIN, Common),
    cmd("cmap", 2, EXTRA | TRLBAR | NOTRLCOM | USECTRLV | CMDWIN, Common),
    cmd("cmapclear", 5, EXTRA | TRLBAR | CMDWIN, Common),
    cmd("cmenu", 3, RANGE | NOTADR | ZEROR | EXTRA | TRLBAR | NOTRLCOM | USECTRLV | CMDWIN, Common),
    cmd("cnext", 2, RANGE | NOTADR | COUNT | TRLBAR | BANG, Common),
    cmd("cnewer", 4, RANGE | NOTADR | COUNT | TRLBAR, Common),
    cmd("cnfile", 3, RANGE | NOTADR | COUNT | TRLBAR | BANG, Common),
    cmd("cnoremap", 3, EXTRA | TRLBAR | NOTRLCOM | USECTRLV | CMDWIN, Common),
    cmd("cnoreabbrev", 6, EXTRA | TRLBAR | NOTRLCOM | USECTRLV | CMDWIN, Common),
    cmd("cnoremenu", 7, RANGE | NOTADR | ZEROR | EXTRA | TRLBAR | NOTRLCOM | USECTRLV | CMDWIN, Common),
    cmd("copy", 2, RANGE | WHOLEFOLD | EXTRA | TRLBAR | CMDWIN | MODIFY, Common),
    cmd("colder", 3, RANGE | NOTADR | COUNT | TRLBAR, Common),
    cmd("colorscheme", 4, WORD1 | TRLBAR | CMDWIN, Common),
    cmd("command", 3, EXTRA | BANG | NOTRLCOM | USECTRLV | CMDWIN, Common),
    cmd("comclear", 4, TRLBAR | CMDWIN, Common),
    cmd("compiler", 4, BANG | TRLBAR | WORD1 | CMDWIN, Common),
    cmd("continue", 3, TRLBAR | SBOXOK | CMDWIN, Continue),
    cmd("confirm", 4, NEEDARG | EXTRA | NOTRLCOM | CMDWIN, Common),
    cmd("copen", 4, RANGE | NOTADR | COUNT | TRLBAR, Common),
    cmd("cprevious", 2, RANGE | NOTADR | COUNT | TRLBAR | BANG, Common),
    cmd("cpfile", 3, RANGE | NOTADR | COUNT | TRLBAR | BANG, Common),
    cmd("cquit", 2, TRLBAR | BANG, Common),
    cmd("crewind", 2, RANGE | NOTADR | COUNT | TRLBAR | BANG, Common),
    cmd("cscope", 2, EXTRA | NOTRLCOM | XFILE, Common),
    cmd("cstag", 3, BANG | TRLBAR | WORD1, Common),
    cmd("cunmap", 2, EXTRA | TRLBAR | NOTRLCOM | USECTRLV | CMDWIN, Common),
    cmd("cunabbrev", 4, EXTRA | TRLBAR | NOTRLCOM | USECTRLV | CMDWIN, Common),
    cmd("cunmenu", 5, EXTRA | TRLBAR | NOTRLCOM | USECTRLV | CMDWIN, Common),
    cmd("cwindow", 2, RANGE | NOTADR | COUNT | TRLBAR, Common),
    cmd("delete", 1, RANGE | WHOLEFOLD | REGSTR | COUNT | TRLBAR | CMDWIN | MODIFY, Common),
    cmd("delmarks", 4, BANG | EXTRA | TRLBAR | CMDWIN, Common),
    cmd("debug", 3, NEEDARG | EXTRA | NOTRLCOM | SBOXOK | CMDWIN, Common),
    cmd("debuggreedy", 6, RANGE | NOTADR | ZEROR | TRLBAR | CMDWIN, Common),
    cmd("delcommand", 4, NEEDARG | WORD1 | TRLBAR | CMDWIN, Common),
    cmd("delfunction", 4, BANG | NEEDARG | WORD1 | CMDWIN, Delfunction),
    cmd("diffupdate", 3, BANG | TRLBAR, Common),
    cmd("diffget", 5, RANGE | EXTRA | TRLBAR | MODIFY, Common),
    cmd("diffoff", 5, BANG | TRLBAR, Common),
    cmd("diffpatch", 5, EXTRA | FILE1 | TRLBAR | MODIFY, Common),
    cmd("diffput", 6, RANGE | EXTRA | TRLBAR, Common),
    cmd("diffsplit", 5, EXTRA | FILE1 | TRLBAR, Common),
    cmd("diffthis", 5, TRLBAR, Common),
    cmd("digraphs", 3, EXTRA | TRLBAR | CMDWIN, Common),
    cmd("display", 2, EXTRA | NOTRLCOM | TRLBAR | SBOXOK | CMDWIN, Common),
    cmd("djump", 2, BANG | RANGE | DFLALL | WHOLEFOLD | EXTRA, Common),
    cmd("dlist", 2, BANG | RANGE | DFLALL | WHOLEFOLD | EXTRA | CMDWIN, Common),
    cmd("doautocmd", 2, EXTRA | TRLBAR | CMDWIN, Common),
    cmd("doautoall", 7, EXTRA | TRLBAR | CMDWIN, Common),
    cmd("drop", 2, FILES | EDITCMD | NEEDARG | ARGOPT | TRLBAR, Common),
    cmd("dsearch", 2, BANG | RANGE | DFLALL | WHOLEFOLD | EXTRA | CMDWIN, Common),
    cmd("dsplit", 3, BANG | RANGE | DFLALL | WHOLEFOLD | EXTRA, Common),
    cmd("edit", 1, BANG | FILE1 | EDITCMD | ARGOPT | TRLBAR, Common),
    cmd("earlier", 2, TRLBAR | EXTRA | NOSPC | CMDWIN, Common),
    cmd("echo", 2, EXTRA | NOTRLCOM | SBOXOK | CMDWIN, Echo),
    cmd("echoerr", 5, EXTRA | NOTRLCOM | SBOXOK | CMDWIN, Echoerr),
    cmd("echohl", 5, EXTRA | TRLBAR | SBOXOK | CMDWIN, Echohl),
    cmd("echomsg", 5, EXTRA | NOTRLCOM | SBOXOK | CMDWIN, Echomsg),
    cmd("echon", 5, EXTRA | NOTRLCOM | SBOXOK | CMDWIN, Echon),
    cmd("else", 2, TRLBAR | SBOXOK | CMDWIN, Else),
    cmd("elseif", 5, EXTRA | NOTRLCOM | SBOXOK | CMDWIN, Elseif),
    cmd("emenu", 2, NEEDARG | EXTRA | TRLBAR | NOTRLCOM | RANGE | NOTADR | CMDWIN, Common),
    cmd("endif", 2, TRLBAR | SBOXOK | CMDWIN, Endif),
    cmd("endfor", 5, TRLBAR | SBOXOK | CMDWIN, Endfor),
    cmd("endfunction", 4, TRLBAR | CMDWIN, Endfunction),
    cmd("endtry", 4, TRLBAR | SBOXOK | CMDWIN, Endtry),
    cmd("endwhile", 4, TRLBAR | SBOXOK | CMDWIN, Endwhile),
    cmd("enew", 3, BANG | TRLBAR, Common),
    cmd("eval", 2, EXTRA | NOTRLCOM | SBOXOK | CMDWIN, Eval),
    cmd("ex", 2, BANG | FILE1 | EDITCMD | ARGOPT | TRLBAR, Common),
    cmd("execute", 3, EXTRA | NOTRLCOM | SBOXOK | CMDWIN, Execute),
    cmd("exit", 3, RANGE | WHOLEFOLD | BANG | FILE1 | ARGOPT | DFLALL | TRLBAR | CMDWIN, Common),
    cmd("exusage", 3, TRLBAR, Common),
    cmd("file", 1, RANGE | NOTADR | ZEROR | BANG | FILE1 | TRLBAR, Common),
    cmd("files", 5, BANG | TRLBAR | CMDWIN, Common),
    cmd("filetype", 5, EXTRA | TRLBAR | CMDWIN, Common),
    cmd("find", 3, RANGE | NOTADR | BANG | FILE1 | EDITCMD | ARGOPT | TRLBAR, Common),
    cmd("finally", 4, TRLBAR | SBOXOK | CMDWIN, Finally),
    cmd("finish", 4, TRLBAR | SBOXOK | CMDWIN, Finish),
    cmd("first", 3, EXTRA | BANG | EDITCMD | ARGOPT | TRLBAR, Common),
    cmd("fixdel", 3, TRLBAR | CMDWIN, Common),
    cmd("fold", 2, RANGE | WHOLEFOLD | TRLBAR | SBOXOK | CMDWIN, Common),
    cmd("foldclose", 5, RANGE | BANG | WHOLEFOLD | TRLBAR | SBOXOK | CMDWIN, Common),
    cmd("folddoopen", 5, RANGE | DFLALL | NEEDARG | EXTRA | NOTRLCOM, Common),
    cmd("folddoclosed", 7, RANGE | DFLALL | NEEDARG | EXTRA | NOTRLCOM, Common),
    cmd("foldopen", 5, RANGE | BANG | WHOLEFOLD | TRLBAR | SBOXOK | CMDWIN, Common),
    cmd("for", 3, EXTRA | NOTRLCOM | SBOXOK | CMDWIN, For),
    cmd("function", 2, EXTRA | BANG | CMDWIN, Function),
    cmd("global", 1, RANGE | WHOLEFOLD | BANG | EXTRA | DFLALL | SBOXOK | CMDWIN, Common),
    cmd("goto", 2, RANGE | NOTADR | COUNT | TRLBAR | SBOXOK | CMDWIN, Common),
    cmd("grep", 2, RANGE | NOTADR | BANG | NEEDARG | EXTRA | NOTRLCOM | TRLBAR | XFILE, Common),
    cmd("grepadd", 5, RANGE | NOTADR | BANG | NEEDARG | EXTRA | NOTRLCOM | TRLBAR | XFILE, Common),
    cmd("gui", 2, BANG | FILES | EDITCMD | ARGOPT | TRLBAR | CMDWIN, Common),
    cmd("gvim", 2, BANG | FILES | EDITCMD | ARGOPT | TRLBAR | CMDWIN, Common),
    cmd("hardcopy", 2, RANGE | COUNT | EXTRA | TRLBAR | DFLALL | BANG, Common),
    cmd("help", 1, BANG | EXTRA | NOTRLCOM, Common),
    cmd("helpfind", 5, EXTRA | NOTRLCOM, Common),
    cmd("helpgrep", 5, EXTRA | NOTRLCOM | NEEDARG, Common),
    cmd("helptags", 5, NEEDARG | FILES | TRLBAR | CMDWIN, Common),
    cmd("highlight", 2, BANG | EXTRA | TRLBAR | SBOXOK | CMDWIN, Common),
    cmd("hide", 3, BANG | EXTRA | NOTRLCOM, Common),
    cmd("history", 3, EXTRA | TRLBAR | CMDWIN, Common),
    cmd("insert", 1, BANG | RANGE | TRLBAR | CMDWIN | MODIFY, Insert),
    cmd("iabbrev", 2, EXTRA | TRLBAR | NOTRLCOM | USECTRLV | CMDWIN, Common),
    cmd("iabclear", 4, EXTRA | TRLBAR | CMDWIN, Common),
    cmd("if", 2, EXTRA | NOTRLCOM | SBOXOK | CMDWIN, If),
    cmd("ijump", 2, BANG | RANGE | DFLALL | WHOLEFOLD | EXTRA, Common),
    cmd("ilist", 2, BANG | RANGE | DFLALL | WHOLEFOLD | EXTRA | CMDWIN, Common),
    cmd("imap", 2, EXTRA | TRLBAR | NOTRLCOM | USECTRLV | CMDWIN, Common),
    cmd("imapclear", 5, EXTRA | TRLBAR | CMDWIN, Common),
    cmd("imenu", 3, RANGE | NOTADR | ZEROR | EXTRA | TRLBAR | NOTRLCOM | USECTRLV | CMDWIN, Common),
    cmd("inoremap", 3, EXTRA | TRLBAR | NOTRLCOM | USECTRLV | CMDWIN, Common),
    cmd("inoreabbrev", 6, EXTRA | TRLBAR | NOTRLCOM | USECTRLV | CMDWIN, Common),
    cmd("inoremenu", 7, RANGE | NOTADR | ZEROR | EXTRA | TRLBAR | NOTRLCOM | USECTRLV | CMDWIN, Common),
    cmd("intro", 3, TRLBAR | CMDWIN, Common),
    cmd("isearch", 2, BANG | RANGE | DFLALL | WHOLEFOLD | EXTRA | CMDWIN, Common),
    cmd("isplit", 3, BANG | RANGE | DFLALL | WHOLEFOLD | EXTRA, Common),
    cmd("iunmap", 2, EXTRA | TRLBAR | NOTRLCOM | USECTRLV | CMDWIN, Common),
    cmd("iunabbrev", 4, EXTRA | TRLBAR | NOTRLCOM | USECTRLV | CMDWIN, Common),
    cmd("iunmenu", 5, EXTRA | TRLBAR | NOTRLCOM | USECTRLV | CMDWIN, Common),
    cmd("join", 1, BANG | RANGE | WHOLEFOLD | COUNT | EXFLAGS | TRLBAR | CMDWIN | MODIFY, Common),
    cmd("jumps", 2, TRLBAR | CMDWIN, Common),
    cmd("k", 1, RANGE | WORD1 | TRLBAR | SBOXOK | CMDWIN, Common),
    cmd("keepalt", 5, NEEDARG | EXTRA | NOTRLCOM, Common),
    cmd("keepmarks", 3, NEEDARG | EXTRA | NOTRLCOM, Common),
    cmd("keepjumps", 5, NEEDARG | EXTRA | NOTRLCOM, Common),
    cmd("keeppatterns", 5, NEEDARG | EXTRA | NOTRLCOM, Common),
    cmd("lNext", 2, RANGE | NOTADR | COUNT | TRLBAR | BANG, Common),
    cmd("lNfile", 3, RANGE | NOTADR | COUNT | TRLBAR | BANG, Common),
    cmd("list", 1, RANGE | WHOLEFOLD | COUNT | EXFLAGS | TRLBAR | CMDWIN, Common),
    cmd("laddexpr", 3, NEEDARG | WORD1 | NOTRLCOM | TRLBAR, Common),
    cmd("laddbuffer", 5, RANGE | NOTADR | WORD1 | TRLBAR, Common),
    cmd("laddfile", 5, TRLBAR | FILE1, Common),
    cmd("last", 2, EXTRA | BANG | EDITCMD | ARGOPT | TRLBAR, Common),
    cmd("language", 3, EXTRA | TRLBAR | CMDWIN, Common),
    cmd("later", 3, TRLBAR | EXTRA | NOSPC | CMDWIN, Common),
    cmd("lbuffer", 2, BANG | RANGE | NOTADR | WORD1 | TRLBAR, Common),
    cmd("lcd", 2, BANG | FILE1 | TRLBAR | CMDWIN, Common),
    cmd("lchdir", 3, BANG | FILE1 | TRLBAR | CMDWIN, Common),
    cmd("lclose", 3, RANGE | NOTADR | COUNT | TRLBAR, Common),
    cmd("lcscope", 3, EXTRA | NOTRLCOM | XFILE, Common),
    cmd("left", 2, TRLBAR | RANGE | WHOLEFOLD | EXTRA | CMDWIN | MODIFY, Common),
    cmd("leftabove", 5, NEEDARG | EXTRA | NOTRLCOM, Common),
    cmd("let", 3, EXTRA | NOTRLCOM | SBOXOK | CMDWIN, Let),
    cmd("const", 4, EXTRA | NOTRLCOM | SBOXOK | CMDWIN, Const),
    cmd("lexpr", 3, NEEDARG | WORD1 | NOTRLCOM | TRLBAR | BANG, Common),
    cmd("lfile", 2, TRLBAR | FILE1 | BANG, Common),
    cmd("lfirst", 4, RANGE | NOTADR | COUNT | TRLBAR | BANG, Common),
    cmd("lgetbuffer", 5, RANGE | NOTADR | WORD1 | TRLBAR, Common),
    cmd("lgetexpr", 5, NEEDARG | WORD1 | NOTRLCOM | TRLBAR, Common),
    cmd("lgetfile", 2, TRLBAR | FILE1, Common),
    cmd("lgrep", 3, RANGE | NOTADR | BANG | NEEDARG | EXTRA | NOTRLCOM | TRLBAR | XFILE, Common),
    cmd("lgrepadd", 6, RANGE | NOTADR | BANG | NEEDARG | EXTRA | NOTRLCOM | TRLBAR | XFILE, Common),
    cmd("lhelpgrep", 2, EXTRA | NOTRLCOM | NEEDARG, Common),
    cmd("ll", 2, RANGE | NOTADR | COUNT | TRLBAR | BANG, Common),
    cmd("llast", 3, RANGE | NOTADR | COUNT | TRLBAR | BANG, Common),
    cmd("llist", 3, BANG | EXTRA | TRLBAR | CMDWIN, Common),
    cmd("lmake", 4, BANG | EXTRA | NOTRLCOM | TRLBAR | XFILE, Common),
    cmd("lmap", 2, EXTRA | TRLBAR | NOTRLCOM | USECTRLV | CMDWIN, Common),
    cmd("lmapclear", 5, EXTRA | TRLBAR | CMDWIN, Common),
    cmd("lnext", 3, RANGE | NOTADR | COUNT | TRLBAR | BANG, Common),
    cmd("lnewer", 4, RANGE | NOTADR | COUNT | TRLBAR, Common),
    cmd("lnfile", 3, RANGE | NOTADR | COUNT | TRLBAR | BANG, Common),
    cmd("lnoremap", 2, EXTRA | TRLBAR | NOTRLCOM | USECTRLV | CMDWIN, Common),
    cmd("loadkeymap", 5, CMDWIN, Loadkeymap),
    cmd("loadview", 2, FILE1 | TRLBAR, Common),
    cmd("lockmarks", 3, NEEDARG | EXTRA | NOTRLCOM, Common),
    cmd("lockvar", 5, BANG | EXTRA | NEEDARG | SBOXOK | CMDWIN, Lockvar),
    cmd("lolder", 3, RANGE | NOTADR | COUNT | TRLBAR, Common),
    cmd("lopen", 3, RANGE | NOTADR | COUNT | TRLBAR, Common),
    cmd("lprevious", 2, RANGE | NOTADR | COUNT | TRLBAR | BANG, Common),
    cmd("lpfile", 3, RANGE | NOTADR | COUNT | TRLBAR | BANG, Common),
    cmd("lrewind", 2, RANGE | NOTADR | COUNT | TRLBAR | BANG, Common),
    cmd("ls", 2, BANG | TRLBAR | CMDWIN, Common),
    cmd("ltag", 2, NOTADR | TRLBAR | BANG | WORD1, Common),
    cmd("lunmap", 2, EXTRA | TRLBAR | NOTRLCOM | USECTRLV | CMDWIN, Common),
    cmd("lua", 3, RANGE | EXTRA | NEEDARG | CMDWIN, Lua),
    cmd("luado", 4, RANGE | DFLALL | EXTRA | NEEDARG | CMDWIN, Common),
    cmd("luafile", 4, RANGE | FILE1 | NEEDARG | CMDWIN, Common),
    cmd("lvimgrep", 2, RANGE | NOTADR | BANG | NEEDARG | EXTRA | NOTRLCOM | TRLBAR | XFILE, Common),
    cmd("lvimgrepadd", 9, RANGE | NOTADR | BANG | NEEDARG | EXTRA | NOTRLCOM | TRLBAR | XFILE, Common),
    cmd("lwindow", 2, RANGE | NOTADR | COUNT | TRLBAR, Common),
    cmd("move", 1, RANGE | WHOLEFOLD | EXTRA | TRLBAR | CMDWIN | MODIFY, Common),
    cmd("mark", 2, RANGE | WORD1 | TRLBAR | SBOXOK | CMDWIN, Common),
    cmd("make", 3, BANG | EXTRA | NOTRLCOM | TRLBAR | XFILE, Common),
    cmd("map", 3, BANG | EXTRA | TRLBAR | NOTRLCOM | USECTRLV | CMDWIN, Common),
    cmd("mapclear", 4, EXTRA | BANG | TRLBAR | CMDWIN, Common),
    cmd("marks", 5, EXTRA | TRLBAR | CMDWIN, Common),
    cmd("match", 3, RANGE | NOTADR | EXTRA | CMDWIN, Common),
    cmd("menu", 2, RANGE | NOTADR | ZEROR | BANG | EXTRA | TRLBAR | NOTRLCOM | USECTRLV | CMDWIN, Common),
    cmd("menutranslate", 5, EXTRA | TRLBAR | NOTRLCOM | USECTRLV | CMDWIN, Common),
    cmd("messages", 3, TRLBAR | CMDWIN, Common),
    cmd("mkexrc", 2, BANG | FILE1 | TRLBAR | CMDWIN, Common),
    cmd("mksession", 3, BANG | FILE1 | TRLBAR, Common),
    cmd("mkspell", 4, BANG | NEEDARG | EXTRA | NOTRLCOM | TRLBAR | XFILE, Common),
    cmd("mkvimrc", 3, BANG | FILE1 | TRLBAR | CMDWIN, Common),
    cmd("mkview", 5, BANG | FILE1 | TRLBAR, Common),
    cmd("mode", 3, WORD1 | TRLBAR | CMDWIN, Common),
    cmd("mzscheme", 2, RANGE | EXTRA | DFLALL | NEEDARG | CMDWIN | SBOXOK, Mzscheme),
    cmd("mzfile", 3, RANGE | FILE1 | NEEDARG | CMDWIN, Common),
    cmd("nbclose", 3, TRLBAR | CMDWIN, Common),
    cmd("nbkey", 2, EXTRA | NOTADR | NEEDARG, Common),
    cmd("nbstart", 3, WORD1 | TRLBAR | CMDWIN, Common),
    cmd("next", 1, RANGE | NOTADR | BANG | FILES | EDITCMD | ARGOPT | TRLBAR, Common),
    cmd("new", 3, BANG | FILE1 | RANGE | NOTADR | EDITCMD | ARGOPT | TRLBAR, Common),
    cmd("nmap", 2, EXTRA | TRLBAR | NOTRLCOM | USECTRLV | CMDWIN, Common),
    cmd("nmapclear", 5, EXTRA | TRLBAR | CMDWIN, Common),
    cmd("nmenu", 3, RANGE | NOTADR | ZEROR | EXTRA | TRLBAR | NOTRLCOM | USECTRLV | CMDWIN, Common),
    cmd("nnoremap", 2, EXTRA | TRLBAR | NOTRLCOM | USECTRLV | CMDWIN, Common),
    cmd("nnoremenu", 7, RANGE | NOTADR | ZEROR | EXTRA | TRLBAR | NOTRLCOM | USECTRLV | CMDWIN, Common),
    cmd("noautocmd", 3, NEEDARG | EXTRA | NOTRLCOM, Common),
    cmd("noremap", 2, BANG | EXTRA | TRLBAR | NOTRLCOM | USECTRLV | CMDWIN, Common),
    cmd("nohlsearch", 3, TRLBAR | SBOXOK | CMDWIN, Common),
    cmd("noreabbrev", 5, EXTRA | TRLBAR | NOTRLCOM | USECTRLV | CMDWIN, Common),
    cmd("noremenu", 6, RANGE | NOTADR | ZEROR | BANG | EXTRA | TRLBAR | NOTRLCOM | USECTRLV | CMDWIN, Common),
    cmd("normal", 4, RANGE | BANG | EXTRA | NEEDARG | NOTRLCOM | USECTRLV | SBOXOK | CMDWIN, Common),
    cmd("number", 2, RANGE | WHOLEFOLD | COUNT | EXFLAGS | TRLBAR | CMDWIN, Common),
    cmd("nunmap", 3, EXTRA | TRLBAR | NOTRLCOM | USECTRLV | CMDWIN, Common),
    cmd("nunmenu", 5, EXTRA | TRLBAR | NOTRLCOM | USECTRLV | CMDWIN, Common),
    cmd("oldfiles", 2, BANG | TRLBAR | SBOXOK | CMDWIN, Common),
    cmd("open", 1, RANGE | BANG | EXTRA, Common),
    cmd("omap", 2, EXTRA | TRLBAR | NOTRLCOM | USECTRLV | CMDWIN, Common),
    cmd("omapclear", 5, EXTRA | TRLBAR | CMDWIN, Common),
    cmd("omenu", 3, RANGE | NOTADR | ZEROR | EXTRA | TRLBAR | NOTRLCOM | USECTRLV | CMDWIN, Common),
    cmd("only", 2, BANG | TRLBAR, Common),
    cmd("onoremap", 3, EXTRA | TRLBAR | NOTRLCOM | USECTRLV | CMDWIN, Common),
    cmd("onoremenu", 7, RANGE | NOTADR | ZEROR | EXTRA | TRLBAR | NOTRLCOM | USECTRLV | CMDWIN, Common),
    cmd("options", 3, TRLBAR, Common),
    cmd("ounmap", 2, EXTRA | TRLBAR | NOTRLCOM | USECTRLV | CMDWIN, Common),
    cmd("ounmenu", 5, EXTRA | TRLBAR | NOTRLCOM | USECTRLV | CMDWIN, Common),
    cmd("ownsyntax", 2, EXTRA | NOTRLCOM | SBOXOK | CMDWIN, Common),
    cmd("pclose", 2, BANG | TRLBAR, Common),
    cmd("pedit", 3, BANG | FILE1 | EDITCMD | ARGOPT | TRLBAR, Common),
    cmd("perl", 2, RANGE | EXTRA | DFLALL | NEEDARG | SBOXOK | CMDWIN, Perl),
    cmd("print", 1, RANGE | WHOLEFOLD | COUNT | EXFLAGS | TRLBAR | CMDWIN | SBOXOK, Common),
    cmd("profdel", 5, EXTRA | TRLBAR | CMDWIN, Common),
    cmd("profile", 4, BANG | EXTRA | TRLBAR | CMDWIN, Common),
    cmd("promptfind", 3, EXTRA | NOTRLCOM | CMDWIN, Common),
    cmd("promptrepl", 7, EXTRA | NOTRLCOM | CMDWIN, Common),
    cmd("perldo", 5, RANGE | EXTRA | DFLALL | NEEDARG | CMDWIN, Common),
    cmd("pop", 2, RANGE | NOTADR | BANG | COUNT | TRLBAR | ZEROR, Common),
    cmd("popup", 4, NEEDARG | EXTRA | BANG | TRLBAR | NOTRLCOM | CMDWIN, Common),
    cmd("ppop", 2, RANGE | NOTADR | BANG | COUNT | TRLBAR | ZEROR, Common),
    cmd("preserve", 3, TRLBAR, Common),
    cmd("previous", 4, EXTRA | RANGE | NOTADR | COUNT | BANG | EDITCMD | ARGOPT | TRLBAR, Common),
    cmd("psearch", 2, BANG | RANGE | WHOLEFOLD | DFLALL | EXTRA, Common),
    cmd("ptag", 2, RANGE | NOTADR | BANG | WORD1 | TRLBAR | ZEROR, Common),
    cmd("ptNext", 3, RANGE | NOTADR | BANG | TRLBAR | ZEROR, Common),
    cmd("ptfirst", 3, RANGE | NOTADR | BANG | TRLBAR | ZEROR, Common),
    cmd("ptjump", 3, BANG | TRLBAR | WORD1, Common),
    cmd("ptlast", 3, BANG | TRLBAR, Common),
    cmd("ptnext", 3, RANGE | NOTADR | BANG | TRLBAR | ZEROR, Common),
    cmd("ptprevious", 3, RANGE | NOTADR | BANG | TRLBAR | ZEROR, Common),
    cmd("ptrewind", 3, RANGE | NOTADR | BANG | TRLBAR | ZEROR, Common),
    cmd("ptselect", 3, BANG | TRLBAR | WORD1, Common),
    cmd("put", 2, RANGE | WHOLEFOLD | BANG | REGSTR | TRLBAR | ZEROR | CMDWIN | MODIFY, Common),
    cmd("pwd", 2, TRLBAR | CMDWIN, Common),
    cmd("py3", 3, RANGE | EXTRA | NEEDARG | CMDWIN, Python3),
    cmd("python3", 7, RANGE | EXTRA | NEEDARG | CMDWIN, Python3),
    cmd("py3file", 4, RANGE | FILE1 | NEEDARG | CMDWIN, Common),
    cmd("python", 2, RANGE | EXTRA | NEEDARG | CMDWIN, Python),
    cmd("pyfile", 3, RANGE | FILE1 | NEEDARG | CMDWIN, Common),
    cmd("pydo", 3, RANGE | DFLALL | EXTRA | NEEDARG | CMDWIN, Common),
    cmd("py3do", 4, RANGE | DFLALL | EXTRA | NEEDARG | CMDWIN, Common),
    cmd("quit", 1, BANG | TRLBAR | CMDWIN, Common),
    cmd("quitall", 5, BANG | TRLBAR, Common),
    cmd("qall", 2, BANG | TRLBAR | CMDWIN, Common),
    cmd("read", 1, BANG | RANGE | WHOLEFOLD | FILE1 | ARGOPT | TRLBAR | ZEROR | CMDWIN | MODIFY, Common),
    cmd("recover", 3, BANG | FILE1 | TRLBAR, Common),
    cmd("redo", 3, TRLBAR | CMDWIN, Common),
    cmd("redir", 4, BANG | FILES | TRLBAR | CMDWIN, Common),
    cmd("redraw", 4, BANG | TRLBAR | CMDWIN, Common),
    cmd("redrawstatus", 7, BANG | TRLBAR | CMDWIN, Common),
    cmd("registers", 3, EXTRA | NOTRLCOM | TRLBAR | CMDWIN, Common),
    cmd("resize", 3, RANGE | NOTADR | TRLBAR | WORD1, Common),
    cmd("retab", 3, TRLBAR | RANGE | WHOLEFOLD | DFLALL | BANG | WORD1 | CMDWIN | MODIFY, Common),
    cmd("return", 4, EXTRA | NOTRLCOM | SBOXOK | CMDWIN, Return),
    cmd("rewind", 3, EXTRA | BANG | EDITCMD | ARGOPT | TRLBAR, Common),
    cmd("right", 2, TRLBAR | RANGE | WHOLEFOLD | EXTRA | CMDWIN | MODIFY, Common),
    cmd("rightbelow", 6, NEEDARG | EXTRA | NOTRLCOM, Common),
    cmd("ruby", 3, RANGE | EXTRA | NEEDARG | CMDWIN, Ruby),
    cmd("rubydo", 5, RANGE | DFLALL | EXTRA | NEEDARG | CMDWIN, Common),
    cmd("rubyfile", 5, RANGE | FILE1 | NEEDARG | CMDWIN, Common),
    cmd("rundo", 4, NEEDARG | FILE1, Common),
    cmd("runtime", 2, BANG | NEEDARG | FILES | TRLBAR | SBOXOK | CMDWIN, Common),
    cmd("rviminfo", 2, BANG | FILE1 | TRLBAR | CMDWIN, Common),
    cmd("substitute", 1, RANGE | WHOLEFOLD | EXTRA | CMDWIN, Common),
    cmd("sNext", 2, EXTRA | RANGE | NOTADR | COUNT | BANG | EDITCMD | ARGOPT | TRLBAR, Common),
    cmd("sandbox", 3, NEEDARG | EXTRA | NOTRLCOM, Common),
    cmd("sargument", 2, BANG | RANGE | NOTADR | COUNT | EXTRA | EDITCMD | ARGOPT | TRLBAR, Common),
    cmd("sall", 3, BANG | RANGE | NOTADR | COUNT | TRLBAR, Common),
    cmd("saveas", 3, BANG | DFLALL | FILE1 | ARGOPT | CMDWIN | TRLBAR, Common),
    cmd("sbuffer", 2, BANG | RANGE | NOTADR | BUFNAME | BUFUNL | COUNT | EXTRA | TRLBAR, Common),
    cmd("sbNext", 3, RANGE | NOTADR | COUNT | TRLBAR, Common),
    cmd("sball", 3, RANGE | NOTADR | COUNT | TRLBAR, Common),
    cmd("sbfirst", 3, TRLBAR, Common),
    cmd("sblast", 3, TRLBAR, Common),
    cmd("sbmodified", 3, RANGE | NOTADR | COUNT | TRLBAR, Common),
    cmd("sbnext", 3, RANGE | NOTADR | COUNT | TRLBAR, Common),
    cmd("sbprevious", 3, RANGE | NOTADR | COUNT | TRLBAR, Common),
    cmd("sbrewind", 3, TRLBAR, Common),
    cmd("scriptnames", 3, TRLBAR | CMDWIN, Common),
    cmd("scriptencoding", 7, WORD1 | TRLBAR | CMDWIN, Common),
    cmd("scscope", 3, EXTRA | NOTRLCOM, Common),
    cmd("set", 2, TRLBAR | EXTRA | CMDWIN | SBOXOK, Common),
    cmd("setfiletype", 4, TRLBAR | EXTRA | NEEDARG | CMDWIN, Common),
    cmd("setglobal", 4, TRLBAR | EXTRA | CMDWIN | SBOXOK, Common),
    cmd("setlocal", 4, TRLBAR | EXTRA | CMDWIN | SBOXOK, Common),
    cmd("sfind", 2, BANG | FILE1 | RANGE | NOTADR | EDITCMD | ARGOPT | TRLBAR, Common),
    cmd("sfirst", 4, EXTRA | BANG | EDITCMD | ARGOPT | TRLBAR, Common),
    cmd("shell", 2, TRLBAR | CMDWIN, Common),
    cmd("simalt", 3, NEEDARG | WORD1 | TRLBAR | CMDWIN, Common),
    cmd("sign", 3, NEEDARG | RANGE | NOTADR | EXTRA | CMDWIN, Common),
    cmd("silent", 3, NEEDARG | EXTRA | BANG | NOTRLCOM | SBOXOK | CMDWIN, Common),
    cmd("sleep", 2, RANGE | NOTADR | COUNT | EXTRA | TRLBAR | CMDWIN, Common),
    cmd("slast", 3, EXTRA | BANG | EDITCMD | ARGOPT | TRLBAR, Common),
    cmd("smagic", 2, RANGE | WHOLEFOLD | EXTRA | CMDWIN, Common),
    cmd("smap", 4, EXTRA | TRLBAR | NOTRLCOM | USECTRLV | CMDWIN, Common),
    cmd("smapclear", 5, EXTRA | TRLBAR | CMDWIN, Common),
    cmd("smenu", 3, RANGE | NOTADR | ZEROR | EXTRA | TRLBAR | NOTRLCOM | USECTRLV | CMDWIN, Common),
    cmd("snext", 2, RANGE | NOTADR | BANG | FILES | EDITCMD | ARGOPT | TRLBAR, Common),
    cmd("sniff", 3, EXTRA | TRLBAR, Common),
    cmd("snomagic", 3, RANGE | WHOLEFOLD | EXTRA | CMDWIN, Common),
    cmd("snoremap", 4, EXTRA | TRLBAR | NOTRLCOM | USECTRLV | CMDWIN, Common),
    cmd("snoremenu", 7, RANGE | NOTADR | ZEROR | EXTRA | TRLBAR | NOTRLCOM | USECTRLV | CMDWIN, Common),
    cmd("sort", 3, RANGE | DFLALL | WHOLEFOLD | BANG | EXTRA | NOTRLCOM | MODIFY, Common),
    cmd("source", 2, BANG | FILE1 | TRLBAR | SBOXOK | CMDWIN, Common),
    cmd("spelldump", 6, BANG | TRLBAR, Common),
    cmd("spellgood", 3, BANG | RANGE | NOTADR | NEEDARG | EXTRA | TRLBAR, Common),
    cmd("spellinfo", 6, TRLBAR, Common),
    cmd("spellrepall", 6, TRLBAR, Common),
    cmd("spellundo", 6, BANG | RANGE | NOTADR | NEEDARG | EXTRA | TRLBAR, Common),
    cmd("spellwrong", 6, BANG | RANGE | NOTADR | NEEDARG | EXTRA | TRLBAR, Common),
    cmd("split", 2, BANG | FILE1 | RANGE | NOTADR | EDITCMD | ARGOPT | TRLBAR, Common),
    cmd("sprevious", 3, EXTRA | RANGE | NOTADR | COUNT | BANG | EDITCMD | ARGOPT | TRLBAR, Common),
    cmd("srewind", 3, EXTRA | BANG | EDITCMD | ARGOPT | TRLBAR, Common),
    cmd("stop", 2, TRLBAR | BANG | CMDWIN, Common),
    cmd("stag", 3, RANGE | NOTADR | BANG | WORD1 | TRLBAR | ZEROR, Common),
    cmd("startinsert", 4, BANG | TRLBAR | CMDWIN, Common),
    cmd("startgreplace", 6, BANG | TRLBAR | CMDWIN, Common),
    cmd("startreplace", 6, BANG | TRLBAR | CMDWIN, Common),
    cmd("stopinsert", 5, BANG | TRLBAR | CMDWIN, Common),
    cmd("stjump", 3, BANG | TRLBAR | WORD1, Common),
    cmd("stselect", 3, BANG | TRLBAR | WORD1, Common),
    cmd("sunhide", 3, RANGE | NOTADR | COUNT | TRLBAR, Common),
    cmd("sunmap", 4, EXTRA | TRLBAR | NOTRLCOM | USECTRLV | CMDWIN, Common),
    cmd("sunmenu", 5, EXTRA | TRLBAR | NOTRLCOM | USECTRLV | CMDWIN, Common),
    cmd("suspend", 3, TRLBAR | BANG | CMDWIN, Common),
    cmd("sview", 2, BANG | FILE1 | RANGE | NOTADR | EDITCMD | ARGOPT | TRLBAR, Common),
    cmd("swapname", 2, TRLBAR | CMDWIN, Common),
    cmd("syntax", 2, EXTRA | NOTRLCOM | CMDWIN, Syntax),
    cmd("syntime", 5, NEEDARG | WORD1 | TRLBAR | CMDWIN, Common),
    cmd("syncbind", 4, TRLBAR, Common),
    cmd("t", 1, RANGE | WHOLEFOLD | EXTRA | TRLBAR | CMDWIN | MODIFY, Common),
    cmd("tNext", 2, RANGE | NOTADR | BANG | TRLBAR | ZEROR, Common),
    cmd("tabNext", 4, RANGE | NOTADR | COUNT | TRLBAR, Common),
    cmd("tabclose", 4, RANGE | NOTADR | COUNT | BANG | TRLBAR | CMDWIN, Common),
    cmd("tabdo", 4, NEEDARG | EXTRA | NOTRLCOM, Common),
    cmd("tabedit", 4, BANG | FILE1 | RANGE | NOTADR | ZEROR | EDITCMD | ARGOPT | TRLBAR, Common),
    cmd("tabfind", 4, BANG | FILE1 | RANGE | NOTADR | ZEROR | EDITCMD | ARGOPT | NEEDARG | TRLBAR, Common),
    cmd("tabfirst", 6, TRLBAR, Common),
    cmd("tablast", 4, TRLBAR, Common),
    cmd("tabmove", 4, RANGE | NOTADR | ZEROR | EXTRA | NOSPC | TRLBAR, Common),
    cmd("tabnew", 6, BANG | FILE1 | RANGE | NOTADR | ZEROR | EDITCMD | ARGOPT | TRLBAR, Common),
    cmd("tabnext", 4, RANGE | NOTADR | COUNT | TRLBAR, Common),
    cmd("tabonly", 4, BANG | TRLBAR | CMDWIN, Common),
    cmd("tabprevious", 4, RANGE | NOTADR | COUNT | TRLBAR, Common),
    cmd("tabrewind", 4, TRLBAR, Common),
    cmd("tabs", 4, TRLBAR | CMDWIN, Common),
    cmd("tab", 3, NEEDARG | EXTRA | NOTRLCOM, Common),
    cmd("tag", 2, RANGE | NOTADR | BANG | WORD1 | TRLBAR | ZEROR, Common),
    cmd("tags", 4, TRLBAR | CMDWIN, Common),
    cmd("tcl", 2, RANGE | EXTRA | NEEDARG | CMDWIN, Tcl),
    cmd("tcldo", 4, RANGE | DFLALL | EXTRA | NEEDARG | CMDWIN, Common),
    cmd("tclfile", 4, RANGE | FILE1 | NEEDARG | CMDWIN, Common),
    cmd("tearoff", 2, NEEDARG | EXTRA | TRLBAR | NOTRLCOM | CMDWIN, Common),
    cmd("tfirst", 2, RANGE | NOTADR | BANG | TRLBAR | ZEROR, Common),
    cmd("throw", 2, EXTRA | NEEDARG | SBOXOK | CMDWIN, Throw),
    cmd("tjump", 2, BANG | TRLBAR | WORD1, Common),
    cmd("tlast", 2, BANG | TRLBAR, Common),
    cmd("tmenu", 2, RANGE | NOTADR | ZEROR | EXTRA | TRLBAR | NOTRLCOM | USECTRLV | CMDWIN, Common),
    cmd("tnext", 2, RANGE | NOTADR | BANG | TRLBAR | ZEROR, Common),
    cmd("topleft", 2, NEEDARG | EXTRA | NOTRLCOM, Common),
    cmd("tprevious", 2, RANGE | NOTADR | BANG | TRLBAR | ZEROR, Common),
    cmd("trewind", 2, RANGE | NOTADR | BANG | TRLBAR | ZEROR, Common),
    cmd("try", 3, TRLBAR | SBOXOK | CMDWIN, Try),
    cmd("tselect", 2, BANG | TRLBAR | WORD1, Common),
    cmd("tunmenu", 2, EXTRA | TRLBAR | NOTRLCOM | USECTRLV | CMDWIN, Common),
    cmd("undo", 1, RANGE | NOTADR | COUNT | ZEROR | TRLBAR | CMDWIN, Common),
    cmd("undojoin", 5, TRLBAR | CMDWIN, Common),
    cmd("undolist", 5, TRLBAR | CMDWIN, Common),
    cmd("unabbreviate", 3, EXTRA | TRLBAR | NOTRLCOM | USECTRLV | CMDWIN, Common),
    cmd("unhide", 3, RANGE | NOTADR | COUNT | TRLBAR, Common),
    cmd("unlet", 3, BANG | EXTRA | NEEDARG | SBOXOK | CMDWIN, Unlet),
    cmd("unlockvar", 4, BANG | EXTRA | NEEDARG | SBOXOK | CMDWIN, Unlockvar),
    cmd("unmap", 3, BANG | EXTRA | TRLBAR | NOTRLCOM | USECTRLV | CMDWIN, Common),
    cmd("unmenu", 4, BANG | EXTRA | TRLBAR | NOTRLCOM | USECTRLV | CMDWIN, Common),
    cmd("unsilent", 3, NEEDARG | EXTRA | NOTRLCOM | SBOXOK | CMDWIN, Common),
    cmd("update", 2, RANGE | WHOLEFOLD | BANG | FILE1 | ARGOPT | DFLALL | TRLBAR, Common),
    cmd("vglobal", 1, RANGE | WHOLEFOLD | EXTRA | DFLALL | CMDWIN, Common),
    cmd("version", 2, EXTRA | TRLBAR | CMDWIN, Common),
    cmd("verbose", 4, NEEDARG | RANGE | NOTADR | EXTRA | NOTRLCOM | SBOXOK | CMDWIN, Common),
    cmd("vertical", 4, NEEDARG | EXTRA | NOTRLCOM, Common),
    cmd("vimgrep", 3, RANGE | NOTADR | BANG | NEEDARG | EXTRA | NOTRLCOM | TRLBAR | XFILE, Common),
    cmd("vimgrepadd", 8, RANGE | NOTADR | BANG | NEEDARG | EXTRA | NOTRLCOM | TRLBAR | XFILE, Common),
    cmd("visual", 2, BANG | FILE1 | EDITCMD | ARGOPT | TRLBAR, Common),
    cmd("viusage", 3, TRLBAR, Common),
    cmd("view", 3, BANG | FILE1 | EDITCMD | ARGOPT | TRLBAR, Common),
    cmd("vmap", 2, EXTRA | TRLBAR | NOTRLCOM | USECTRLV | CMDWIN, Common),
    cmd("vmapclear", 5, EXTRA | TRLBAR | CMDWIN, Common),
    cmd("vmenu", 3, RANGE | NOTADR | ZEROR | EXTRA | TRLBAR | NOTRLCOM | USECTRLV | CMDWIN, Common),
    cmd("vnew", 3, BANG | FILE1 | RANGE | NOTADR | EDITCMD | ARGOPT | TRLBAR, Common),
    cmd("vnoremap", 2, EXTRA | TRLBAR | NOTRLCOM | USECTRLV | CMDWIN, Common),
    cmd("vnoremenu", 7, RANGE | NOTADR | ZEROR | EXTRA | TRLBAR | NOTRLCOM | USECTRLV | CMDWIN, Common),
    cmd("vsplit", 2, BANG | FILE1 | RANGE | NOTADR | EDITCMD | ARGOPT | TRLBAR, Common),
    cmd("vunmap", 2, EXTRA | TRLBAR | NOTRLCOM | USECTRLV | CMDWIN, Common),
    cmd("vunmenu", 5, EXTRA | TRLBAR | NOTRLCOM | USECTRLV | CMDWIN, Common),
    cmd("windo", 5, BANG | NEEDARG | EXTRA | NOTRLCOM, Common),
    cmd("write", 1, RANGE | WHOLEFOLD | BANG | FILE1 | ARGOPT | DFLALL | TRLBAR | CMDWIN, Common),
    cmd("wNext", 2, RANGE | WHOLEFOLD | NOTADR | BANG | FILE1 | ARGOPT | TRLBAR, Common),
    cmd("wall", 2, BANG | TRLBAR | CMDWIN, Common),
    cmd("while", 2, EXTRA | NOTRLCOM | SBOXOK | CMDWIN, While),
    cmd("winsize", 2, EXTRA | NEEDARG | TRLBAR, Common),
    cmd("wincmd", 4, NEEDARG | WORD1 | RANGE | NOTADR, Wincmd),
    cmd("winpos", 4, EXTRA | TRLBAR | CMDWIN, Common),
    cmd("wnext", 2, RANGE | NOTADR | BANG | FILE1 | ARGOPT | TRLBAR, Common),
    cmd("wprevious", 2, RANGE | NOTADR | BANG | FILE1 | ARGOPT | TRLBAR, Common),
    cmd("wq", 2, RANGE | WHOLEFOLD | BANG | FILE1 | ARGOPT | DFLALL | TRLBAR, Common),
    cmd("wqall", 3, BANG | FILE1 | ARGOPT | DFLALL | TRLBAR, Common),
    cmd("wsverb", 2, EXTRA | NOTADR | NEEDARG, Common),
    cmd("wundo", 2, BANG | NEEDARG | FILE1, Common),
    cmd("wviminfo", 2, BANG | FILE1 | TRLBAR | CMDWIN, Common),
    cmd("xit", 1, RANGE | WHOLEFOLD | BANG | FILE1 | ARGOPT | DFLALL | TRLBAR | CMDWIN, Common),
    cmd("xall", 2, BANG | TRLBAR, Common),
    cmd("xmapclear", 5, EXTRA | TRLBAR | CMDWIN, Common),
    cmd("xmap", 2, EXTRA | TRLBAR | NOTRLCOM | USECTRLV | CMDWIN, Common),
    cmd("xmenu", 3, RANGE | NOTADR | ZEROR | EXTRA | TRLBAR | NOTRLCOM | USECTRLV | CMDWIN, Common),
    cmd("xnoremap", 2, EXTRA | TRLBAR | NOTRLCOM | USECTRLV | CMDWIN, Common),
    cmd("xnoremenu", 7, RANGE | NOTADR | ZEROR | EXTRA | TRLBAR | NOTRLCOM | USECTRLV | CMDWIN, Common),
    cmd("xunmap", 2, EXTRA | TRLBAR | NOTRLCOM | USECTRLV | CMDWIN, Common),
    cmd("xunmenu", 5, EXTRA | TRLBAR | NOTRLCOM | USECTRLV | CMDWIN, Common),
    cmd("yank", 1, RANGE | WHOLEFOLD | REGSTR | COUNT | TRLBAR | CMDWIN, Common),
    cmd("z", 1, RANGE | WHOLEFOLD | EXTRA | EXFLAGS | TRLBAR | CMDWIN, Common),
    cmd("!", 1, RANGE | WHOLEFOLD | BANG | FILES | CMDWIN, Common),
    cmd("#", 1, RANGE | WHOLEFOLD | COUNT | EXFLAGS | TRLBAR | CMDWIN, Common),
    cmd("&", 1, RANGE | WHOLEFOLD | EXTRA | CMDWIN | MODIFY, Common),
    cmd("*", 1, RANGE | WHOLEFOLD | EXTRA | TRLBAR | CMDWIN, Common),
    cmd("<", 1, RANGE | WHOLEFOLD | COUNT | EXFLAGS | TRLBAR | CMDWIN | MODIFY, Common),
    cmd("=", 1, RANGE | TRLBAR | DFLALL | EXFLAGS | CMDWIN, Common),
    cmd(">", 1, RANGE | WHOLEFOLD | COUNT | EXFLAGS | TRLBAR | CMDWIN | MODIFY, Common),
    cmd("@", 1, RANGE | WHOLEFOLD | EXTRA | TRLBAR | CMDWIN, Common),
    cmd("Next", 1, EXTRA | RANGE | NOTADR | COUNT | BANG | EDITCMD | ARGOPT | TRLBAR, Common),
    cmd("Print", 1, RANGE | WHOLEFOLD | COUNT | EXFLAGS | TRLBAR | CMDWIN, Common),
    cmd("X", 1, TRLBAR, Common),
    cmd("~", 1, RANGE | WHOLEFOLD | EXTRA | CMDWIN | MODIFY, Common),
    cmd("cbottom", 3, TRLBAR, Common),
    cmd("cdo", 3, BANG | NEEDARG | EXTRA | NOTRLCOM | RANGE | NOTADR | DFLALL, Common),
    cmd("cfdo", 3, BANG | NEEDARG | EXTRA | NOTRLCOM | RANGE | NOTADR | DFLALL, Common),
    cmd("chistory", 3, TRLBAR, Common),
    cmd("clearjumps", 3, TRLBAR | CMDWIN, Common),
    cmd("filter", 4, BANG | NEEDARG | EXTRA | NOTRLCOM, Common),
    cmd("helpclose", 5, RANGE | NOTADR | COUNT | TRLBAR, Common),
    cmd("lbottom", 3, TRLBAR, Common),
    cmd("ldo", 2, BANG | NEEDARG | EXTRA | NOTRLCOM | RANGE | NOTADR | DFLALL, Common),
    cmd("lfdo", 3, BANG | NEEDARG | EXTRA | NOTRLCOM | RANGE | NOTADR | DFLALL, Common),
    cmd("lhistory", 3, TRLBAR, Common),
    cmd("noswapfile", 3, NEEDARG | EXTRA | NOTRLCOM, Common),
    cmd("packadd", 2, BANG | FILE1 | NEEDARG | TRLBAR | SBOXOK | CMDWIN, Common),
    cmd("packloadall", 5, BANG | TRLBAR | SBOXOK | CMDWIN, Common),
    cmd("smile", 3, TRLBAR | CMDWIN | SBOXOK, Common),
    cmd("pyx", 3, RANGE | EXTRA | NEEDARG | CMDWIN, Common),
    cmd("pyxdo", 4, RANGE | DFLALL | EXTRA | NEEDARG | CMDWIN, Common),
    cmd("pythonx", 7, RANGE | EXTRA | NEEDARG | CMDWIN, Common),
    cmd("pyxfile", 4, RANGE | FILE1 | NEEDARG | CMDWIN, Common),
    cmd("terminal", 3, RANGE | BANG | FILES | CMDWIN, Common),
    cmd("tmap", 3, EXTRA | TRLBAR | NOTRLCOM | USECTRLV | CMDWIN, Common),
    cmd("tmapclear", 5, EXTRA | TRLBAR | CMDWIN, Common),
    cmd("tnoremap", 3, EXTRA | TRLBAR | NOTRLCOM | USECTRLV | CMDWIN, Common),
    cmd("tunmap", 5, EXTRA | TRLBAR | NOTRLCOM | USECTRLV | CMDWIN, Common),
    cmd("cabove", 4, RANGE | COUNT | TRLBAR, Common),
    cmd("cafter", 3, RANGE | COUNT | TRLBAR, Common),
    cmd("cbefore", 3, RANGE | COUNT | TRLBAR, Common),
    cmd("cbelow", 4, RANGE | COUNT | TRLBAR, Common),
    cmd("labove", 3, RANGE | COUNT | TRLBAR, Common),
    cmd("lafter", 3, RANGE | COUNT | TRLBAR, Common),
    cmd("lbefore", 3, RANGE | COUNT | TRLBAR, Common),
    cmd("lbelow", 4, RANGE | COUNT | TRLBAR, Common),
    cmd("redrawtabline", 7, TRLBAR | CMDWIN, Common),
    cmd("scriptversion", 7, WORD1 | TRLBAR | CMDWIN, Common),
    cmd("tcd", 2, BANG | FILE1 | TRLBAR | CMDWIN, Common),
    cmd("tchdir", 3, BANG | FILE1 | TRLBAR | CMDWIN, Common),
    cmd("tlmenu", 3, RANGE | ZEROR | EXTRA | TRLBAR | NOTRLCOM | CMDWIN, Common),
    cmd("tlnoremenu", 3, RANGE | ZEROR | EXTRA | TRLBAR | NOTRLCOM | CMDWIN, Common),
    cmd("tlunmenu", 3, RANGE | ZEROR | EXTRA | TRLBAR | NOTRLCOM | CMDWIN, Common),
    cmd("xrestore", 2, EXTRA | TRLBAR | CMDWIN, Common),
    cmd("def", 3, EXTRA | BANG | SBOXOK | CMDWIN, Common),
    cmd("disassemble", 4, EXTRA | NEEDARG | TRLBAR | CMDWIN, Common),
    cmd("enddef", 4, TRLBAR | CMDWIN, Common),
    cmd("export", 3, EXTRA | NOTRLCOM, Common),
    cmd("import", 3, EXTRA | NOTRLCOM, Common),
    cmd("spellrare", 7, BANG | RANGE | NEEDARG | EXTRA | TRLBAR, Common),
    cmd("vim9script", 4, 0, Common),
];

/// Commands Neovim adds on top of the builtin table
pub static NEOVIM_ADDITIONAL_COMMANDS: &[CommandDescriptor] = &[
    cmd("rshada", 3, BANG | FILE1 | TRLBAR | CMDWIN, Common),
    cmd("wshada", 3, BANG | FILE1 | TRLBAR | CMDWIN, Common),
];

/// Commands Neovim removed; they resolve to nothing in Neovim mode
pub static NEOVIM_REMOVED_COMMANDS: &[CommandDescriptor] = &[
    cmd("Print", 1, RANGE | WHOLEFOLD | COUNT | EXFLAGS | TRLBAR | CMDWIN, Common),
    cmd("fixdel", 3, TRLBAR | CMDWIN, Common),
    cmd("helpfind", 5, EXTRA | NOTRLCOM, Common),
    cmd("open", 1, RANGE | BANG | EXTRA, Common),
    cmd("shell", 2, TRLBAR | CMDWIN, Common),
    cmd("tearoff", 2, NEEDARG | EXTRA | TRLBAR | NOTRLCOM | CMDWIN, Common),
    cmd("gvim", 2, BANG | FILES | EDITCMD | ARGOPT | TRLBAR | CMDWIN, Common),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_matches_prefix() {
        let function = BUILTIN_COMMANDS
            .iter()
            .find(|c| c.name == "function")
            .unwrap();
        assert!(function.matches("fu"));
        assert!(function.matches("function"));
        assert!(!function.matches("f"));
        assert!(!function.matches("functions"));
    }

    #[test]
    fn test_minlen_within_name() {
        for c in BUILTIN_COMMANDS
            .iter()
            .chain(NEOVIM_ADDITIONAL_COMMANDS)
            .chain(NEOVIM_REMOVED_COMMANDS)
        {
            assert!(c.minlen >= 1 && c.minlen <= c.name.len(), "{}", c.name);
        }
    }

    #[test]
    fn test_flags_round_trip_through_const_table() {
        let let_cmd = BUILTIN_COMMANDS.iter().find(|c| c.name == "let").unwrap();
        assert_eq!(let_cmd.parser, CommandParser::Let);
        assert!(let_cmd.flags.contains(CommandFlags::EXTRA | CommandFlags::NOTRLCOM));
        assert!(!let_cmd.flags.contains(CommandFlags::BANG));
    }

    #[test]
    fn test_user_command() {
        let cmd = Command::user("MyCmd".to_string());
        assert!(cmd.has(CommandFlags::USERCMD));
        assert_eq!(cmd.parser, CommandParser::Usercmd);
    }
}
