//! vimlparse - A VimL parser
//!
//! This library parses Vim script into an AST, serializes that AST into a
//! canonical prefix notation and exposes a traversal API for tools that
//! analyse the tree.

pub mod ast;
pub mod parser;
pub mod serializer;

pub use ast::traverse::{traverse, traverse_with, NodeDispatcher, TraverseError, VisitAction};
pub use ast::types::*;
pub use parser::{parse_expr, parse_lines, parse_str, ParseError, Parser, ParserOptions};
pub use serializer::{compile, compile_expr, diff_fingerprint};
