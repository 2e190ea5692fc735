//! Abstract Syntax Tree (AST) Types for VimL
//!
//! Every node is a [`Node`]: a source position plus a [`NodeKind`] payload.
//! The payload enum is closed, so the serializer and the traversal table can
//! match it exhaustively. A missing child is always `None`, never an absent
//! field.

use serde::Serialize;
use std::fmt;

use crate::parser::command_table::Command;

// =============================================================================
// BASE TYPES
// =============================================================================

/// Position information for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Position {
    /// Reader cursor; restoring it with `StringReader::setpos` rewinds the parse
    pub cursor: usize,
    pub line: usize,
    pub column: usize,
    pub offset: usize,
}

impl Position {
    pub fn new(cursor: usize, line: usize, column: usize, offset: usize) -> Self {
        Self { cursor, line, column, offset }
    }
}

/// A command modifier such as `silent!` or `3tab`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Modifier {
    pub name: &'static str,
    pub bang: bool,
    pub count: Option<usize>,
}

impl Modifier {
    pub fn new(name: &'static str) -> Self {
        Self { name, bang: false, count: None }
    }
}

/// `++bin` / `++nobin`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BinaryMode {
    Bin,
    NoBin,
}

/// Ex command metadata attached to every statement-level node
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ExArg {
    /// `!` after the command name
    pub forceit: bool,
    /// `:write >>`
    pub append: bool,
    /// `:write !cmd`, `:read !cmd`
    pub usefilter: bool,
    /// Shift count for `:<` and `:>`
    pub amount: usize,
    pub force_bin: Option<BinaryMode>,
    pub read_edit: bool,
    pub force_ff: Option<String>,
    pub force_enc: Option<String>,
    pub bad_char: Option<String>,
    /// `+cmd` argument of edit-like commands
    pub do_ecmd_cmd: Option<String>,
    pub linepos: Position,
    pub cmdpos: Position,
    pub argpos: Position,
    pub cmd: Option<Command>,
    pub modifiers: Vec<Modifier>,
    pub range: Vec<String>,
}

// =============================================================================
// NODE TAGS
// =============================================================================

macro_rules! node_types {
    ($($variant:ident = $num:literal => $name:literal,)*) => {
        /// Node type tag. Discriminants follow the numbering used by the
        /// reference VimL parser so dumps stay comparable.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
        #[repr(u8)]
        pub enum NodeType {
            $($variant = $num,)*
        }

        impl NodeType {
            pub const ALL: &'static [NodeType] = &[$(NodeType::$variant,)*];

            pub fn name(self) -> &'static str {
                match self {
                    $(NodeType::$variant => $name,)*
                }
            }
        }
    };
}

node_types! {
    TopLevel = 1 => "TOPLEVEL",
    Comment = 2 => "COMMENT",
    ExCmd = 3 => "EXCMD",
    Function = 4 => "FUNCTION",
    EndFunction = 5 => "ENDFUNCTION",
    DelFunction = 6 => "DELFUNCTION",
    Return = 7 => "RETURN",
    ExCall = 8 => "EXCALL",
    Let = 9 => "LET",
    Unlet = 10 => "UNLET",
    LockVar = 11 => "LOCKVAR",
    UnlockVar = 12 => "UNLOCKVAR",
    If = 13 => "IF",
    ElseIf = 14 => "ELSEIF",
    Else = 15 => "ELSE",
    EndIf = 16 => "ENDIF",
    While = 17 => "WHILE",
    EndWhile = 18 => "ENDWHILE",
    For = 19 => "FOR",
    EndFor = 20 => "ENDFOR",
    Continue = 21 => "CONTINUE",
    Break = 22 => "BREAK",
    Try = 23 => "TRY",
    Catch = 24 => "CATCH",
    Finally = 25 => "FINALLY",
    EndTry = 26 => "ENDTRY",
    Throw = 27 => "THROW",
    Echo = 28 => "ECHO",
    Echon = 29 => "ECHON",
    EchoHl = 30 => "ECHOHL",
    EchoMsg = 31 => "ECHOMSG",
    EchoErr = 32 => "ECHOERR",
    Execute = 33 => "EXECUTE",
    Ternary = 34 => "TERNARY",
    Or = 35 => "OR",
    And = 36 => "AND",
    Equal = 37 => "EQUAL",
    EqualCi = 38 => "EQUALCI",
    EqualCs = 39 => "EQUALCS",
    NEqual = 40 => "NEQUAL",
    NEqualCi = 41 => "NEQUALCI",
    NEqualCs = 42 => "NEQUALCS",
    Greater = 43 => "GREATER",
    GreaterCi = 44 => "GREATERCI",
    GreaterCs = 45 => "GREATERCS",
    GEqual = 46 => "GEQUAL",
    GEqualCi = 47 => "GEQUALCI",
    GEqualCs = 48 => "GEQUALCS",
    Smaller = 49 => "SMALLER",
    SmallerCi = 50 => "SMALLERCI",
    SmallerCs = 51 => "SMALLERCS",
    SEqual = 52 => "SEQUAL",
    SEqualCi = 53 => "SEQUALCI",
    SEqualCs = 54 => "SEQUALCS",
    Match = 55 => "MATCH",
    MatchCi = 56 => "MATCHCI",
    MatchCs = 57 => "MATCHCS",
    NoMatch = 58 => "NOMATCH",
    NoMatchCi = 59 => "NOMATCHCI",
    NoMatchCs = 60 => "NOMATCHCS",
    Is = 61 => "IS",
    IsCi = 62 => "ISCI",
    IsCs = 63 => "ISCS",
    IsNot = 64 => "ISNOT",
    IsNotCi = 65 => "ISNOTCI",
    IsNotCs = 66 => "ISNOTCS",
    Add = 67 => "ADD",
    Subtract = 68 => "SUBTRACT",
    Concat = 69 => "CONCAT",
    Multiply = 70 => "MULTIPLY",
    Divide = 71 => "DIVIDE",
    Remainder = 72 => "REMAINDER",
    Not = 73 => "NOT",
    Minus = 74 => "MINUS",
    Plus = 75 => "PLUS",
    Subscript = 76 => "SUBSCRIPT",
    Slice = 77 => "SLICE",
    Call = 78 => "CALL",
    Dot = 79 => "DOT",
    Number = 80 => "NUMBER",
    String = 81 => "STRING",
    List = 82 => "LIST",
    Dict = 83 => "DICT",
    Option = 85 => "OPTION",
    Identifier = 86 => "IDENTIFIER",
    CurlyName = 87 => "CURLYNAME",
    Env = 88 => "ENV",
    Reg = 89 => "REG",
    CurlyNamePart = 90 => "CURLYNAMEPART",
    CurlyNameExpr = 91 => "CURLYNAMEEXPR",
    Lambda = 92 => "LAMBDA",
    Blob = 93 => "BLOB",
    Const = 94 => "CONST",
    Eval = 95 => "EVAL",
    Heredoc = 96 => "HEREDOC",
    Method = 97 => "METHOD",
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// OPERATORS
// =============================================================================

/// Binary operators. Each operator is its own node type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BinaryOp {
    Or,
    And,
    Equal,
    EqualCi,
    EqualCs,
    NEqual,
    NEqualCi,
    NEqualCs,
    Greater,
    GreaterCi,
    GreaterCs,
    GEqual,
    GEqualCi,
    GEqualCs,
    Smaller,
    SmallerCi,
    SmallerCs,
    SEqual,
    SEqualCi,
    SEqualCs,
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
    Add,
    Subtract,
    Concat,
    Multiply,
    Divide,
    Remainder,
}

impl BinaryOp {
    pub fn node_type(self) -> NodeType {
        match self {
            BinaryOp::Or => NodeType::Or,
            BinaryOp::And => NodeType::And,
            BinaryOp::Equal => NodeType::Equal,
            BinaryOp::EqualCi => NodeType::EqualCi,
            BinaryOp::EqualCs => NodeType::EqualCs,
            BinaryOp::NEqual => NodeType::NEqual,
            BinaryOp::NEqualCi => NodeType::NEqualCi,
            BinaryOp::NEqualCs => NodeType::NEqualCs,
            BinaryOp::Greater => NodeType::Greater,
            BinaryOp::GreaterCi => NodeType::GreaterCi,
            BinaryOp::GreaterCs => NodeType::GreaterCs,
            BinaryOp::GEqual => NodeType::GEqual,
            BinaryOp::GEqualCi => NodeType::GEqualCi,
            BinaryOp::GEqualCs => NodeType::GEqualCs,
            BinaryOp::Smaller => NodeType::Smaller,
            BinaryOp::SmallerCi => NodeType::SmallerCi,
            BinaryOp::SmallerCs => NodeType::SmallerCs,
            BinaryOp::SEqual => NodeType::SEqual,
            BinaryOp::SEqualCi => NodeType::SEqualCi,
            BinaryOp::SEqualCs => NodeType::SEqualCs,
            BinaryOp::Match => NodeType::Match,
            BinaryOp::MatchCi => NodeType::MatchCi,
            BinaryOp::MatchCs => NodeType::MatchCs,
            BinaryOp::NoMatch => NodeType::NoMatch,
            BinaryOp::NoMatchCi => NodeType::NoMatchCi,
            BinaryOp::NoMatchCs => NodeType::NoMatchCs,
            BinaryOp::Is => NodeType::Is,
            BinaryOp::IsCi => NodeType::IsCi,
            BinaryOp::IsCs => NodeType::IsCs,
            BinaryOp::IsNot => NodeType::IsNot,
            BinaryOp::IsNotCi => NodeType::IsNotCi,
            BinaryOp::IsNotCs => NodeType::IsNotCs,
            BinaryOp::Add => NodeType::Add,
            BinaryOp::Subtract => NodeType::Subtract,
            BinaryOp::Concat => NodeType::Concat,
            BinaryOp::Multiply => NodeType::Multiply,
            BinaryOp::Divide => NodeType::Divide,
            BinaryOp::Remainder => NodeType::Remainder,
        }
    }

    /// Operator as written in the canonical serialization
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Or => "||",
            BinaryOp::And => "&&",
            BinaryOp::Equal => "==",
            BinaryOp::EqualCi => "==?",
            BinaryOp::EqualCs => "==#",
            BinaryOp::NEqual => "!=",
            BinaryOp::NEqualCi => "!=?",
            BinaryOp::NEqualCs => "!=#",
            BinaryOp::Greater => ">",
            BinaryOp::GreaterCi => ">?",
            BinaryOp::GreaterCs => ">#",
            BinaryOp::GEqual => ">=",
            BinaryOp::GEqualCi => ">=?",
            BinaryOp::GEqualCs => ">=#",
            BinaryOp::Smaller => "<",
            BinaryOp::SmallerCi => "<?",
            BinaryOp::SmallerCs => "<#",
            BinaryOp::SEqual => "<=",
            BinaryOp::SEqualCi => "<=?",
            BinaryOp::SEqualCs => "<=#",
            BinaryOp::Match => "=~",
            BinaryOp::MatchCi => "=~?",
            BinaryOp::MatchCs => "=~#",
            BinaryOp::NoMatch => "!~",
            BinaryOp::NoMatchCi => "!~?",
            BinaryOp::NoMatchCs => "!~#",
            BinaryOp::Is => "is",
            BinaryOp::IsCi => "is?",
            BinaryOp::IsCs => "is#",
            BinaryOp::IsNot => "isnot",
            BinaryOp::IsNotCi => "isnot?",
            BinaryOp::IsNotCs => "isnot#",
            BinaryOp::Add => "+",
            BinaryOp::Subtract => "-",
            BinaryOp::Concat => "concat",
            BinaryOp::Multiply => "*",
            BinaryOp::Divide => "/",
            BinaryOp::Remainder => "%",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum UnaryOp {
    Not,
    Minus,
    Plus,
}

impl UnaryOp {
    pub fn node_type(self) -> NodeType {
        match self {
            UnaryOp::Not => NodeType::Not,
            UnaryOp::Minus => NodeType::Minus,
            UnaryOp::Plus => NodeType::Plus,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            UnaryOp::Not => "!",
            UnaryOp::Minus => "-",
            UnaryOp::Plus => "+",
        }
    }
}

/// Commands that take a whitespace separated expression list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EchoCommand {
    Echo,
    Echon,
    EchoMsg,
    EchoErr,
    Execute,
}

impl EchoCommand {
    pub fn node_type(self) -> NodeType {
        match self {
            EchoCommand::Echo => NodeType::Echo,
            EchoCommand::Echon => NodeType::Echon,
            EchoCommand::EchoMsg => NodeType::EchoMsg,
            EchoCommand::EchoErr => NodeType::EchoErr,
            EchoCommand::Execute => NodeType::Execute,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            EchoCommand::Echo => "echo",
            EchoCommand::Echon => "echon",
            EchoCommand::EchoMsg => "echomsg",
            EchoCommand::EchoErr => "echoerr",
            EchoCommand::Execute => "execute",
        }
    }
}

// =============================================================================
// BLOCK PAYLOADS
// =============================================================================

/// `:function` attributes after the argument list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct FunctionAttr {
    pub range: bool,
    pub abort: bool,
    pub dict: bool,
    pub closure: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunctionNode {
    pub ea: ExArg,
    pub left: Node,
    /// Parameters; a trailing `...` is an IDENTIFIER with that value
    pub rlist: Vec<Node>,
    /// Defaults for the last `default_args.len()` parameters
    pub default_args: Vec<Node>,
    pub attr: FunctionAttr,
    pub body: Vec<Node>,
    pub endfunction: Option<Box<Node>>,
}

/// Shared shape of `:let` and `:const`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assignment {
    pub ea: ExArg,
    pub op: String,
    /// Single target; `None` when the `[a, b; rest]` form is used
    pub left: Option<Box<Node>>,
    pub list: Vec<Node>,
    pub rest: Option<Box<Node>>,
    pub right: Box<Node>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IfNode {
    pub ea: ExArg,
    pub cond: Node,
    pub body: Vec<Node>,
    pub elseif: Vec<Node>,
    pub else_: Option<Box<Node>>,
    pub endif: Option<Box<Node>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForNode {
    pub ea: ExArg,
    pub left: Option<Box<Node>>,
    pub list: Vec<Node>,
    pub rest: Option<Box<Node>>,
    pub right: Box<Node>,
    pub body: Vec<Node>,
    pub endfor: Option<Box<Node>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TryNode {
    pub ea: ExArg,
    pub body: Vec<Node>,
    pub catch: Vec<Node>,
    pub finally: Option<Box<Node>>,
    pub endtry: Option<Box<Node>>,
}

// =============================================================================
// NODES
// =============================================================================

/// A node in the AST
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Node {
    pub pos: Position,
    #[serde(flatten)]
    pub kind: NodeKind,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum NodeKind {
    TopLevel { body: Vec<Node> },
    Comment { text: String },
    ExCmd { ea: Box<ExArg>, text: String },
    Function(Box<FunctionNode>),
    EndFunction { ea: Box<ExArg> },
    DelFunction { ea: Box<ExArg>, left: Box<Node> },
    Return { ea: Box<ExArg>, left: Option<Box<Node>> },
    ExCall { ea: Box<ExArg>, left: Box<Node> },
    Eval { ea: Box<ExArg>, left: Box<Node> },
    Let(Box<Assignment>),
    Const(Box<Assignment>),
    Unlet { ea: Box<ExArg>, list: Vec<Node> },
    LockVar { ea: Box<ExArg>, depth: Option<usize>, list: Vec<Node> },
    UnlockVar { ea: Box<ExArg>, depth: Option<usize>, list: Vec<Node> },
    If(Box<IfNode>),
    ElseIf { ea: Box<ExArg>, cond: Box<Node>, body: Vec<Node> },
    Else { ea: Box<ExArg>, body: Vec<Node> },
    EndIf { ea: Box<ExArg> },
    While { ea: Box<ExArg>, cond: Box<Node>, body: Vec<Node>, endwhile: Option<Box<Node>> },
    EndWhile { ea: Box<ExArg> },
    For(Box<ForNode>),
    EndFor { ea: Box<ExArg> },
    Continue { ea: Box<ExArg> },
    Break { ea: Box<ExArg> },
    Try(Box<TryNode>),
    Catch { ea: Box<ExArg>, pattern: Option<String>, body: Vec<Node> },
    Finally { ea: Box<ExArg>, body: Vec<Node> },
    EndTry { ea: Box<ExArg> },
    Throw { ea: Box<ExArg>, left: Box<Node> },
    Echo { ea: Box<ExArg>, command: EchoCommand, list: Vec<Node> },
    EchoHl { ea: Box<ExArg>, text: String },
    Ternary { cond: Box<Node>, left: Box<Node>, right: Box<Node> },
    Binary { op: BinaryOp, left: Box<Node>, right: Box<Node> },
    Unary { op: UnaryOp, left: Box<Node> },
    Subscript { left: Box<Node>, right: Box<Node> },
    /// `rlist` holds the two bounds; either may be omitted
    Slice { left: Box<Node>, rlist: [Option<Box<Node>>; 2] },
    Method { left: Box<Node>, right: Box<Node> },
    Call { left: Box<Node>, rlist: Vec<Node> },
    Dot { left: Box<Node>, right: Box<Node> },
    Number { value: String },
    Blob { value: String },
    /// Raw literal including its quotes
    String { value: String },
    List { value: Vec<Node> },
    Dict { value: Vec<(Node, Node)> },
    VimOption { value: String },
    Identifier { value: String },
    CurlyName { value: Vec<Node> },
    Env { value: String },
    Reg { value: String },
    CurlyNamePart { value: String },
    CurlyNameExpr { value: Box<Node> },
    Lambda { rlist: Vec<Node>, left: Box<Node> },
    Heredoc { rlist: Vec<String>, op: String, body: Vec<String> },
}

impl Node {
    pub fn new(kind: NodeKind, pos: Position) -> Self {
        Self { pos, kind }
    }

    pub fn node_type(&self) -> NodeType {
        match &self.kind {
            NodeKind::TopLevel { .. } => NodeType::TopLevel,
            NodeKind::Comment { .. } => NodeType::Comment,
            NodeKind::ExCmd { .. } => NodeType::ExCmd,
            NodeKind::Function(_) => NodeType::Function,
            NodeKind::EndFunction { .. } => NodeType::EndFunction,
            NodeKind::DelFunction { .. } => NodeType::DelFunction,
            NodeKind::Return { .. } => NodeType::Return,
            NodeKind::ExCall { .. } => NodeType::ExCall,
            NodeKind::Eval { .. } => NodeType::Eval,
            NodeKind::Let(_) => NodeType::Let,
            NodeKind::Const(_) => NodeType::Const,
            NodeKind::Unlet { .. } => NodeType::Unlet,
            NodeKind::LockVar { .. } => NodeType::LockVar,
            NodeKind::UnlockVar { .. } => NodeType::UnlockVar,
            NodeKind::If(_) => NodeType::If,
            NodeKind::ElseIf { .. } => NodeType::ElseIf,
            NodeKind::Else { .. } => NodeType::Else,
            NodeKind::EndIf { .. } => NodeType::EndIf,
            NodeKind::While { .. } => NodeType::While,
            NodeKind::EndWhile { .. } => NodeType::EndWhile,
            NodeKind::For(_) => NodeType::For,
            NodeKind::EndFor { .. } => NodeType::EndFor,
            NodeKind::Continue { .. } => NodeType::Continue,
            NodeKind::Break { .. } => NodeType::Break,
            NodeKind::Try(_) => NodeType::Try,
            NodeKind::Catch { .. } => NodeType::Catch,
            NodeKind::Finally { .. } => NodeType::Finally,
            NodeKind::EndTry { .. } => NodeType::EndTry,
            NodeKind::Throw { .. } => NodeType::Throw,
            NodeKind::Echo { command, .. } => command.node_type(),
            NodeKind::EchoHl { .. } => NodeType::EchoHl,
            NodeKind::Ternary { .. } => NodeType::Ternary,
            NodeKind::Binary { op, .. } => op.node_type(),
            NodeKind::Unary { op, .. } => op.node_type(),
            NodeKind::Subscript { .. } => NodeType::Subscript,
            NodeKind::Slice { .. } => NodeType::Slice,
            NodeKind::Method { .. } => NodeType::Method,
            NodeKind::Call { .. } => NodeType::Call,
            NodeKind::Dot { .. } => NodeType::Dot,
            NodeKind::Number { .. } => NodeType::Number,
            NodeKind::Blob { .. } => NodeType::Blob,
            NodeKind::String { .. } => NodeType::String,
            NodeKind::List { .. } => NodeType::List,
            NodeKind::Dict { .. } => NodeType::Dict,
            NodeKind::VimOption { .. } => NodeType::Option,
            NodeKind::Identifier { .. } => NodeType::Identifier,
            NodeKind::CurlyName { .. } => NodeType::CurlyName,
            NodeKind::Env { .. } => NodeType::Env,
            NodeKind::Reg { .. } => NodeType::Reg,
            NodeKind::CurlyNamePart { .. } => NodeType::CurlyNamePart,
            NodeKind::CurlyNameExpr { .. } => NodeType::CurlyNameExpr,
            NodeKind::Lambda { .. } => NodeType::Lambda,
            NodeKind::Heredoc { .. } => NodeType::Heredoc,
        }
    }

    pub fn is(&self, node_type: NodeType) -> bool {
        self.node_type() == node_type
    }

    /// Ex command metadata, for statement-level nodes
    pub fn ea(&self) -> Option<&ExArg> {
        match &self.kind {
            NodeKind::ExCmd { ea, .. }
            | NodeKind::EndFunction { ea }
            | NodeKind::DelFunction { ea, .. }
            | NodeKind::Return { ea, .. }
            | NodeKind::ExCall { ea, .. }
            | NodeKind::Eval { ea, .. }
            | NodeKind::Unlet { ea, .. }
            | NodeKind::LockVar { ea, .. }
            | NodeKind::UnlockVar { ea, .. }
            | NodeKind::ElseIf { ea, .. }
            | NodeKind::Else { ea, .. }
            | NodeKind::EndIf { ea }
            | NodeKind::While { ea, .. }
            | NodeKind::EndWhile { ea }
            | NodeKind::EndFor { ea }
            | NodeKind::Continue { ea }
            | NodeKind::Break { ea }
            | NodeKind::Catch { ea, .. }
            | NodeKind::Finally { ea, .. }
            | NodeKind::EndTry { ea }
            | NodeKind::Throw { ea, .. }
            | NodeKind::Echo { ea, .. }
            | NodeKind::EchoHl { ea, .. } => Some(ea),
            NodeKind::Function(f) => Some(&f.ea),
            NodeKind::Let(a) | NodeKind::Const(a) => Some(&a.ea),
            NodeKind::If(n) => Some(&n.ea),
            NodeKind::For(n) => Some(&n.ea),
            NodeKind::Try(n) => Some(&n.ea),
            _ => None,
        }
    }

    /// Statement list of a block node
    pub fn body(&self) -> Option<&[Node]> {
        match &self.kind {
            NodeKind::TopLevel { body }
            | NodeKind::ElseIf { body, .. }
            | NodeKind::Else { body, .. }
            | NodeKind::While { body, .. }
            | NodeKind::Catch { body, .. }
            | NodeKind::Finally { body, .. } => Some(body),
            NodeKind::Function(f) => Some(&f.body),
            NodeKind::If(n) => Some(&n.body),
            NodeKind::For(n) => Some(&n.body),
            NodeKind::Try(n) => Some(&n.body),
            _ => None,
        }
    }

    pub fn body_mut(&mut self) -> Option<&mut Vec<Node>> {
        match &mut self.kind {
            NodeKind::TopLevel { body }
            | NodeKind::ElseIf { body, .. }
            | NodeKind::Else { body, .. }
            | NodeKind::While { body, .. }
            | NodeKind::Catch { body, .. }
            | NodeKind::Finally { body, .. } => Some(body),
            NodeKind::Function(f) => Some(&mut f.body),
            NodeKind::If(n) => Some(&mut n.body),
            NodeKind::For(n) => Some(&mut n.body),
            NodeKind::Try(n) => Some(&mut n.body),
            _ => None,
        }
    }

    /// Payload of IDENTIFIER and the other single-string leaves
    pub fn value_str(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Number { value }
            | NodeKind::Blob { value }
            | NodeKind::String { value }
            | NodeKind::VimOption { value }
            | NodeKind::Identifier { value }
            | NodeKind::Env { value }
            | NodeKind::Reg { value }
            | NodeKind::CurlyNamePart { value } => Some(value),
            _ => None,
        }
    }
}

// =============================================================================
// AST BUILDERS
// =============================================================================

pub struct AST;

impl AST {
    pub fn identifier(value: impl Into<String>, pos: Position) -> Node {
        Node::new(NodeKind::Identifier { value: value.into() }, pos)
    }

    pub fn binary(op: BinaryOp, left: Node, right: Node, pos: Position) -> Node {
        Node::new(
            NodeKind::Binary { op, left: Box::new(left), right: Box::new(right) },
            pos,
        )
    }

    pub fn unary(op: UnaryOp, left: Node, pos: Position) -> Node {
        Node::new(NodeKind::Unary { op, left: Box::new(left) }, pos)
    }

    pub fn call(left: Node, rlist: Vec<Node>, pos: Position) -> Node {
        Node::new(NodeKind::Call { left: Box::new(left), rlist }, pos)
    }

    pub fn excmd(ea: ExArg, text: String) -> Node {
        let pos = ea.cmdpos;
        Node::new(NodeKind::ExCmd { ea: Box::new(ea), text }, pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_type_numbering() {
        assert_eq!(NodeType::TopLevel as u8, 1);
        assert_eq!(NodeType::Dict as u8, 83);
        assert_eq!(NodeType::Option as u8, 85);
        assert_eq!(NodeType::Method as u8, 97);
        assert_eq!(NodeType::ALL.len(), 96);
    }

    #[test]
    fn test_case_variants_are_distinct_types() {
        let p = Position::default();
        let a = AST::binary(BinaryOp::Equal, AST::identifier("a", p), AST::identifier("b", p), p);
        let ci = AST::binary(BinaryOp::EqualCi, AST::identifier("a", p), AST::identifier("b", p), p);
        let cs = AST::binary(BinaryOp::EqualCs, AST::identifier("a", p), AST::identifier("b", p), p);
        assert_eq!(a.node_type(), NodeType::Equal);
        assert_eq!(ci.node_type(), NodeType::EqualCi);
        assert_eq!(cs.node_type(), NodeType::EqualCs);
        assert_eq!(cs.node_type().to_string(), "EQUALCS");
    }

    #[test]
    fn test_body_accessors() {
        let mut top = Node::new(NodeKind::TopLevel { body: vec![] }, Position::default());
        top.body_mut().unwrap().push(AST::identifier("x", Position::default()));
        assert_eq!(top.body().unwrap().len(), 1);
        assert!(AST::identifier("x", Position::default()).body().is_none());
    }
}
