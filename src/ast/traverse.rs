//! AST Traversal
//!
//! Depth-first walk over a parsed script. The children of every node type
//! are listed in [`child_fields`], in visiting order, so tools that inspect
//! the tree (lint rules, indexers) see the same shape regardless of how
//! [`NodeKind`] stores it.

use lazy_static::lazy_static;
use std::collections::HashMap;
use thiserror::Error;

use crate::ast::types::{Node, NodeKind, NodeType};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TraverseError {
    #[error("Unknown node type: `{0}`")]
    UnknownNodeType(NodeType),
}

/// How a child slot holds its nodes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildShape {
    /// A single node, possibly absent
    Node,
    List,
    /// Pairs, as in dict entries
    NestedList,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChildField {
    pub name: &'static str,
    pub shape: ChildShape,
}

/// Returned by an enter callback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisitAction {
    Continue,
    SkipChildren,
}

const fn node(name: &'static str) -> ChildField {
    ChildField { name, shape: ChildShape::Node }
}

const fn list(name: &'static str) -> ChildField {
    ChildField { name, shape: ChildShape::List }
}

const NONE: &[ChildField] = &[];
const LEFT: &[ChildField] = &[node("left")];
const LEFT_RIGHT: &[ChildField] = &[node("left"), node("right")];
const LEFT_RLIST: &[ChildField] = &[node("left"), list("rlist")];
const LIST: &[ChildField] = &[list("list")];
const BODY: &[ChildField] = &[list("body")];
const VALUE_LIST: &[ChildField] = &[list("value")];
const ASSIGNMENT: &[ChildField] = &[node("left"), list("list"), node("rest"), node("right")];
const VALUE: &[ChildField] = &[node("value")];
const COND_BODY: &[ChildField] = &[node("cond"), list("body")];
const TERNARY: &[ChildField] = &[node("cond"), node("left"), node("right")];
const LAMBDA: &[ChildField] = &[list("rlist"), node("left")];
const DICT: &[ChildField] = &[ChildField { name: "value", shape: ChildShape::NestedList }];
const FUNCTION: &[ChildField] = &[
    node("left"),
    list("rlist"),
    list("default_args"),
    list("body"),
    node("endfunction"),
];
const IF: &[ChildField] = &[node("cond"), list("body"), list("elseif"), node("else"), node("endif")];
const WHILE: &[ChildField] = &[node("cond"), list("body"), node("endwhile")];
// the body is visited before the loop targets
const FOR: &[ChildField] = &[
    list("body"),
    node("left"),
    list("list"),
    node("rest"),
    node("right"),
    node("endfor"),
];
const TRY: &[ChildField] = &[list("body"), list("catch"), node("finally"), node("endtry")];

lazy_static! {
    static ref CHILD_FIELDS: HashMap<NodeType, &'static [ChildField]> = {
        use NodeType::*;
        let mut m: HashMap<NodeType, &'static [ChildField]> = HashMap::new();

        m.insert(TopLevel, BODY);
        for t in [Comment, ExCmd, EndFunction, EndIf, EndWhile, EndFor, EndTry] {
            m.insert(t, NONE);
        }
        for t in [Continue, Break, EchoHl, Heredoc] {
            m.insert(t, NONE);
        }
        m.insert(Function, FUNCTION);
        for t in [DelFunction, Return, ExCall, Eval, Throw] {
            m.insert(t, LEFT);
        }
        m.insert(Let, ASSIGNMENT);
        m.insert(Const, ASSIGNMENT);
        for t in [Unlet, LockVar, UnlockVar, Echo, Echon, EchoMsg, EchoErr, Execute] {
            m.insert(t, LIST);
        }
        m.insert(If, IF);
        m.insert(ElseIf, COND_BODY);
        m.insert(Else, BODY);
        m.insert(While, WHILE);
        m.insert(For, FOR);
        m.insert(Try, TRY);
        m.insert(Catch, BODY);
        m.insert(Finally, BODY);

        m.insert(Ternary, TERNARY);
        let binary = Or as u8..=Remainder as u8;
        for t in NodeType::ALL.iter().copied().filter(|t| binary.contains(&(*t as u8))) {
            m.insert(t, LEFT_RIGHT);
        }
        for t in [Not, Minus, Plus] {
            m.insert(t, LEFT);
        }
        for t in [Subscript, Dot, Method] {
            m.insert(t, LEFT_RIGHT);
        }
        m.insert(Slice, LEFT_RLIST);
        m.insert(Call, LEFT_RLIST);
        for t in [Number, Blob, String, Option, Identifier, Env, Reg, CurlyNamePart] {
            m.insert(t, NONE);
        }
        m.insert(List, VALUE_LIST);
        m.insert(Dict, DICT);
        m.insert(CurlyName, VALUE_LIST);
        m.insert(CurlyNameExpr, VALUE);
        m.insert(Lambda, LAMBDA);
        m
    };
}

/// Child slots of a node type, in visiting order
pub fn child_fields(node_type: NodeType) -> Option<&'static [ChildField]> {
    CHILD_FIELDS.get(&node_type).copied()
}

fn one(n: &Node) -> Vec<&Node> {
    vec![n]
}

fn opt(n: &Option<Box<Node>>) -> Vec<&Node> {
    n.as_deref().into_iter().collect()
}

fn many(nodes: &[Node]) -> Vec<&Node> {
    nodes.iter().collect()
}

/// Nodes held in the named slot; empty when the slot is unset
fn field<'a>(n: &'a Node, name: &str) -> Vec<&'a Node> {
    match (&n.kind, name) {
        (NodeKind::Function(f), "left") => one(&f.left),
        (NodeKind::Function(f), "rlist") => many(&f.rlist),
        (NodeKind::Function(f), "default_args") => many(&f.default_args),
        (NodeKind::Function(f), "endfunction") => opt(&f.endfunction),
        (NodeKind::Let(a) | NodeKind::Const(a), "left") => opt(&a.left),
        (NodeKind::Let(a) | NodeKind::Const(a), "list") => many(&a.list),
        (NodeKind::Let(a) | NodeKind::Const(a), "rest") => opt(&a.rest),
        (NodeKind::Let(a) | NodeKind::Const(a), "right") => one(&a.right),
        (NodeKind::If(i), "cond") => one(&i.cond),
        (NodeKind::If(i), "elseif") => many(&i.elseif),
        (NodeKind::If(i), "else") => opt(&i.else_),
        (NodeKind::If(i), "endif") => opt(&i.endif),
        (NodeKind::For(f), "left") => opt(&f.left),
        (NodeKind::For(f), "list") => many(&f.list),
        (NodeKind::For(f), "rest") => opt(&f.rest),
        (NodeKind::For(f), "right") => one(&f.right),
        (NodeKind::For(f), "endfor") => opt(&f.endfor),
        (NodeKind::Try(t), "catch") => many(&t.catch),
        (NodeKind::Try(t), "finally") => opt(&t.finally),
        (NodeKind::Try(t), "endtry") => opt(&t.endtry),
        (NodeKind::While { endwhile, .. }, "endwhile") => opt(endwhile),
        (_, "body") => n.body().map(|b| b.iter().collect()).unwrap_or_default(),

        (
            NodeKind::ElseIf { cond, .. }
            | NodeKind::While { cond, .. }
            | NodeKind::Ternary { cond, .. },
            "cond",
        ) => one(cond),
        (
            NodeKind::DelFunction { left, .. }
            | NodeKind::ExCall { left, .. }
            | NodeKind::Eval { left, .. }
            | NodeKind::Throw { left, .. }
            | NodeKind::Ternary { left, .. }
            | NodeKind::Binary { left, .. }
            | NodeKind::Unary { left, .. }
            | NodeKind::Subscript { left, .. }
            | NodeKind::Slice { left, .. }
            | NodeKind::Method { left, .. }
            | NodeKind::Call { left, .. }
            | NodeKind::Dot { left, .. }
            | NodeKind::Lambda { left, .. },
            "left",
        ) => one(left),
        (NodeKind::Return { left, .. }, "left") => opt(left),
        (
            NodeKind::Ternary { right, .. }
            | NodeKind::Binary { right, .. }
            | NodeKind::Subscript { right, .. }
            | NodeKind::Method { right, .. }
            | NodeKind::Dot { right, .. },
            "right",
        ) => one(right),
        (
            NodeKind::Unlet { list, .. }
            | NodeKind::LockVar { list, .. }
            | NodeKind::UnlockVar { list, .. }
            | NodeKind::Echo { list, .. },
            "list",
        ) => many(list),
        (NodeKind::Slice { rlist, .. }, "rlist") => rlist.iter().flat_map(opt).collect(),
        (NodeKind::Call { rlist, .. } | NodeKind::Lambda { rlist, .. }, "rlist") => many(rlist),
        (NodeKind::List { value } | NodeKind::CurlyName { value }, "value") => many(value),
        (NodeKind::Dict { value }, "value") => value.iter().flat_map(|(k, v)| [k, v]).collect(),
        (NodeKind::CurlyNameExpr { value }, "value") => one(value),
        _ => Vec::new(),
    }
}

/// Walk `node` depth first: `on_enter` before the children, `on_leave`
/// after them. Returning [`VisitAction::SkipChildren`] from `on_enter`
/// skips the subtree; `on_leave` is still called for the node itself.
pub fn traverse<E, L>(node: &Node, on_enter: &mut E, on_leave: &mut L) -> Result<(), TraverseError>
where
    E: FnMut(&Node) -> VisitAction,
    L: FnMut(&Node),
{
    traverse_with(node, &child_fields, on_enter, on_leave)
}

/// Like [`traverse`], with the child slots looked up through `fields`.
/// A node type for which `fields` has no entry stops the walk with
/// [`TraverseError::UnknownNodeType`].
pub fn traverse_with<F, E, L>(
    node: &Node,
    fields: &F,
    on_enter: &mut E,
    on_leave: &mut L,
) -> Result<(), TraverseError>
where
    F: Fn(NodeType) -> Option<&'static [ChildField]>,
    E: FnMut(&Node) -> VisitAction,
    L: FnMut(&Node),
{
    let node_type = node.node_type();
    let slots = fields(node_type).ok_or(TraverseError::UnknownNodeType(node_type))?;

    if on_enter(node) == VisitAction::Continue {
        for f in slots {
            for child in field(node, f.name) {
                traverse_with(child, fields, on_enter, on_leave)?;
            }
        }
    }

    on_leave(node);
    Ok(())
}

type Callback<'a> = Box<dyn FnMut(&Node) + 'a>;

/// Per-type callbacks over one traversal. Several callbacks may be
/// registered for the same type; they run in registration order.
#[derive(Default)]
pub struct NodeDispatcher<'a> {
    enter: HashMap<NodeType, Vec<Callback<'a>>>,
    leave: HashMap<NodeType, Vec<Callback<'a>>>,
}

impl<'a> NodeDispatcher<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_enter(&mut self, node_type: NodeType, f: impl FnMut(&Node) + 'a) -> &mut Self {
        self.enter.entry(node_type).or_default().push(Box::new(f));
        self
    }

    pub fn on_leave(&mut self, node_type: NodeType, f: impl FnMut(&Node) + 'a) -> &mut Self {
        self.leave.entry(node_type).or_default().push(Box::new(f));
        self
    }

    pub fn run(&mut self, ast: &Node) -> Result<(), TraverseError> {
        let enter = &mut self.enter;
        let leave = &mut self.leave;
        traverse(
            ast,
            &mut |n: &Node| {
                if let Some(callbacks) = enter.get_mut(&n.node_type()) {
                    for f in callbacks.iter_mut() {
                        f(n);
                    }
                }
                VisitAction::Continue
            },
            &mut |n: &Node| {
                if let Some(callbacks) = leave.get_mut(&n.node_type()) {
                    for f in callbacks.iter_mut() {
                        f(n);
                    }
                }
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{parse_lines, ParserOptions};

    fn parse(lines: &[&str]) -> Node {
        parse_lines(lines, &ParserOptions::default()).unwrap()
    }

    fn events(ast: &Node) -> Vec<String> {
        let log = std::cell::RefCell::new(Vec::new());
        traverse(
            ast,
            &mut |n: &Node| {
                log.borrow_mut().push(format!("enter {}", n.node_type()));
                VisitAction::Continue
            },
            &mut |n: &Node| log.borrow_mut().push(format!("leave {}", n.node_type())),
        )
        .unwrap();
        log.into_inner()
    }

    #[test]
    fn test_every_node_type_has_fields() {
        for t in NodeType::ALL {
            assert!(child_fields(*t).is_some(), "{} has no entry", t);
        }
    }

    #[test]
    fn test_traverse_order() {
        let ast = parse(&[
            "let var1 = 1",
            "while var1 < 10",
            "  echo 'x' var1",
            "  let a{'b'}c = 1",
            "endwhile",
        ]);
        let expected = [
            "enter TOPLEVEL",
            "enter LET",
            "enter IDENTIFIER",
            "leave IDENTIFIER",
            "enter NUMBER",
            "leave NUMBER",
            "leave LET",
            "enter WHILE",
            "enter SMALLER",
            "enter IDENTIFIER",
            "leave IDENTIFIER",
            "enter NUMBER",
            "leave NUMBER",
            "leave SMALLER",
            "enter ECHO",
            "enter STRING",
            "leave STRING",
            "enter IDENTIFIER",
            "leave IDENTIFIER",
            "leave ECHO",
            "enter LET",
            "enter CURLYNAME",
            "enter CURLYNAMEPART",
            "leave CURLYNAMEPART",
            "enter CURLYNAMEEXPR",
            "enter STRING",
            "leave STRING",
            "leave CURLYNAMEEXPR",
            "enter CURLYNAMEPART",
            "leave CURLYNAMEPART",
            "leave CURLYNAME",
            "enter NUMBER",
            "leave NUMBER",
            "leave LET",
            "enter ENDWHILE",
            "leave ENDWHILE",
            "leave WHILE",
            "leave TOPLEVEL",
        ];
        assert_eq!(events(&ast), expected);
    }

    #[test]
    fn test_skip_children() {
        let ast = parse(&["function F()", "  echo 1", "endfunction", "echo 2"]);
        let mut seen = Vec::new();
        traverse(
            &ast,
            &mut |n: &Node| {
                seen.push(n.node_type());
                if n.is(NodeType::Function) {
                    VisitAction::SkipChildren
                } else {
                    VisitAction::Continue
                }
            },
            &mut |_: &Node| {},
        )
        .unwrap();
        assert_eq!(
            seen,
            [NodeType::TopLevel, NodeType::Function, NodeType::Echo, NodeType::Number]
        );
    }

    #[test]
    fn test_lambda_children_are_visited() {
        assert_eq!(
            child_fields(NodeType::Lambda).unwrap().iter().map(|f| f.name).collect::<Vec<_>>(),
            ["rlist", "left"]
        );
        let ast = parse(&["let F = {x -> x * 2}"]);
        let trace = events(&ast);
        assert!(trace.contains(&"enter MULTIPLY".to_string()));
    }

    #[test]
    fn test_branches_and_optional_slots() {
        let ast = parse(&["if a", "elseif b", "else", "endif"]);
        let trace = events(&ast);
        let enters: Vec<_> = trace.iter().filter(|e| e.starts_with("enter")).cloned().collect();
        assert_eq!(
            enters,
            [
                "enter TOPLEVEL",
                "enter IF",
                "enter IDENTIFIER",
                "enter ELSEIF",
                "enter IDENTIFIER",
                "enter ELSE",
                "enter ENDIF"
            ]
        );
        let dict = parse(&["echo {'k': v}[1:]"]);
        let trace = events(&dict);
        assert!(trace.contains(&"enter SLICE".to_string()));
        assert_eq!(trace.iter().filter(|e| *e == "enter STRING").count(), 1);
        assert_eq!(trace.iter().filter(|e| *e == "enter NUMBER").count(), 1);
    }

    #[test]
    fn test_dispatcher_callbacks() {
        let ast = parse(&["let a = b + c", "echo d"]);
        let mut names = Vec::new();
        let mut leaves = 0;
        {
            let mut dispatcher = NodeDispatcher::new();
            dispatcher
                .on_enter(NodeType::Identifier, |n| {
                    names.push(n.value_str().unwrap_or_default().to_string())
                })
                .on_leave(NodeType::Let, |_| leaves += 1);
            dispatcher.run(&ast).unwrap();
        }
        assert_eq!(names, ["a", "b", "c", "d"]);
        assert_eq!(leaves, 1);
    }

    #[test]
    fn test_unknown_node_type_stops_walk() {
        let ast = parse(&["let x = 1", "echo x"]);
        let without_numbers = |t: NodeType| match t {
            NodeType::Number => None,
            _ => child_fields(t),
        };
        let mut entered = Vec::new();
        let err = traverse_with(
            &ast,
            &without_numbers,
            &mut |n: &Node| {
                entered.push(n.node_type());
                VisitAction::Continue
            },
            &mut |_: &Node| {},
        )
        .unwrap_err();
        assert_eq!(err, TraverseError::UnknownNodeType(NodeType::Number));
        assert_eq!(err.to_string(), "Unknown node type: `NUMBER`");
        assert_eq!(entered, [NodeType::TopLevel, NodeType::Let, NodeType::Identifier]);
    }
}
