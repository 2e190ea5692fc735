//! Abstract Syntax Tree (AST) for VimL
//!
//! `types` defines the node model produced by the parser; `traverse` walks it.
//!
//! Architecture:
//!   Source → StringReader → Parser → AST → Serializer → canonical text

pub mod traverse;
pub mod types;
