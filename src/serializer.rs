//! Canonical Serializer
//!
//! Renders an AST as parenthesized prefix notation, one statement per line
//! with nested bodies indented by two spaces:
//!
//! ```text
//! (if (== a 1)
//!   (let = x (list 1 2))
//!  else
//!   (echo "no"))
//! ```
//!
//! The output is a stable fingerprint of the parse, so tests and the CLI
//! compare it textually; [`diff_fingerprint`] shows what changed.

use similar::{ChangeTag, TextDiff};

use crate::ast::types::{Assignment, Node, NodeKind};

/// Serialize a TOPLEVEL (or any statement) into canonical lines
pub fn compile(node: &Node) -> Vec<String> {
    let mut compiler = Compiler::new();
    compiler.compile(node);
    compiler.lines
}

/// Serialize an expression node into its single-line form
pub fn compile_expr(node: &Node) -> String {
    match &node.kind {
        NodeKind::Ternary { cond, left, right } => format!(
            "(?: {} {} {})",
            compile_expr(cond),
            compile_expr(left),
            compile_expr(right)
        ),
        NodeKind::Binary { op, left, right } => {
            format!("({} {} {})", op.symbol(), compile_expr(left), compile_expr(right))
        }
        NodeKind::Unary { op, left } => format!("({} {})", op.symbol(), compile_expr(left)),
        NodeKind::Subscript { left, right } => {
            format!("(subscript {} {})", compile_expr(left), compile_expr(right))
        }
        NodeKind::Slice { left, rlist } => {
            let bound = |b: &Option<Box<Node>>| b.as_deref().map_or("nil".to_string(), compile_expr);
            format!("(slice {} {} {})", compile_expr(left), bound(&rlist[0]), bound(&rlist[1]))
        }
        NodeKind::Dot { left, right } => {
            format!("(dot {} {})", compile_expr(left), compile_expr(right))
        }
        NodeKind::Method { left, right } => {
            format!("(method {} {})", compile_expr(left), compile_expr(right))
        }
        NodeKind::Call { left, rlist } => {
            if rlist.is_empty() {
                format!("({})", compile_expr(left))
            } else {
                format!("({} {})", compile_expr(left), join(rlist))
            }
        }
        NodeKind::List { value } => {
            if value.is_empty() {
                "(list)".to_string()
            } else {
                format!("(list {})", join(value))
            }
        }
        NodeKind::Dict { value } => {
            if value.is_empty() {
                "(dict)".to_string()
            } else {
                let entries: Vec<String> = value
                    .iter()
                    .map(|(k, v)| format!("({} {})", compile_expr(k), compile_expr(v)))
                    .collect();
                format!("(dict {})", entries.join(" "))
            }
        }
        NodeKind::Number { value }
        | NodeKind::Blob { value }
        | NodeKind::String { value }
        | NodeKind::VimOption { value }
        | NodeKind::Identifier { value }
        | NodeKind::Env { value }
        | NodeKind::Reg { value }
        | NodeKind::CurlyNamePart { value } => value.clone(),
        NodeKind::CurlyName { value } => value.iter().map(compile_expr).collect(),
        NodeKind::CurlyNameExpr { value } => format!("{{{}}}", compile_expr(value)),
        NodeKind::Lambda { rlist, left } => {
            format!("(lambda ({}) {})", join(rlist), compile_expr(left))
        }
        NodeKind::Heredoc { rlist, op, body } => format!(
            "(heredoc {} {} {})",
            string_list(rlist),
            escape_string(op),
            string_list(body)
        ),
        // statements have no single-line form
        _ => compile(node).join("\n"),
    }
}

fn join(nodes: &[Node]) -> String {
    nodes.iter().map(compile_expr).collect::<Vec<_>>().join(" ")
}

fn string_list(items: &[String]) -> String {
    if items.is_empty() {
        "(list)".to_string()
    } else {
        let quoted: Vec<String> = items.iter().map(|s| escape_string(s)).collect();
        format!("(list {})", quoted.join(" "))
    }
}

/// Double-quoted with newline, tab and CR escaped
fn escape_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Backslash-escape `\` and `"` for raw command text
fn escape_raw(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if c == '\\' || c == '"' {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

// =============================================================================
// STATEMENTS
// =============================================================================

struct Compiler {
    indent: Vec<String>,
    lines: Vec<String>,
}

impl Compiler {
    fn new() -> Self {
        Self {
            indent: vec![String::new()],
            lines: Vec::new(),
        }
    }

    fn out(&mut self, line: impl AsRef<str>) {
        let indent = self.indent.last().map_or("", String::as_str);
        self.lines.push(format!("{}{}", indent, line.as_ref()));
    }

    /// Close the innermost form on the last emitted line
    fn close(&mut self) {
        match self.lines.last_mut() {
            Some(last) => last.push(')'),
            None => self.lines.push(")".to_string()),
        }
    }

    fn incindent(&mut self) {
        let next = format!("{}  ", self.indent.last().map_or("", String::as_str));
        self.indent.push(next);
    }

    fn decindent(&mut self) {
        if self.indent.len() > 1 {
            self.indent.pop();
        }
    }

    fn body(&mut self, body: &[Node]) {
        for node in body {
            self.compile(node);
        }
    }

    /// Indented body followed by the closing paren
    fn block(&mut self, body: &[Node]) {
        self.incindent();
        self.body(body);
        self.close();
        self.decindent();
    }

    fn compile(&mut self, node: &Node) {
        match &node.kind {
            NodeKind::TopLevel { body } => self.body(body),
            NodeKind::Comment { text } => self.out(format!(";{}", text)),
            NodeKind::ExCmd { text, .. } => self.out(format!("(excmd \"{}\")", escape_raw(text))),
            NodeKind::Function(f) => {
                let mut header = compile_expr(&f.left);
                let mut params: Vec<String> = f.rlist.iter().map(compile_expr).collect();
                let varargs = params.last().map_or(false, |p| p == "...");
                if varargs {
                    params.pop();
                }
                let plain = params.len().saturating_sub(f.default_args.len());
                for (i, param) in params.iter().enumerate() {
                    match i.checked_sub(plain).and_then(|d| f.default_args.get(d)) {
                        Some(default) => {
                            header.push_str(&format!(" ({} {})", param, compile_expr(default)))
                        }
                        None => header.push_str(&format!(" {}", param)),
                    }
                }
                if varargs {
                    header.push_str(" . ...");
                }
                self.out(format!("(function ({})", header));
                self.block(&f.body);
            }
            NodeKind::DelFunction { left, .. } => {
                self.out(format!("(delfunction {})", compile_expr(left)))
            }
            NodeKind::Return { left: None, .. } => self.out("(return)"),
            NodeKind::Return { left: Some(left), .. } => {
                self.out(format!("(return {})", compile_expr(left)))
            }
            NodeKind::ExCall { left, .. } => self.out(format!("(call {})", compile_expr(left))),
            NodeKind::Eval { left, .. } => self.out(format!("(eval {})", compile_expr(left))),
            NodeKind::Let(a) => self.assignment("let", a),
            NodeKind::Const(a) => self.assignment("const", a),
            NodeKind::Unlet { list, .. } => self.out(format!("(unlet {})", join(list))),
            NodeKind::LockVar { depth, list, .. } => self.lockvar("lockvar", *depth, list),
            NodeKind::UnlockVar { depth, list, .. } => self.lockvar("unlockvar", *depth, list),
            NodeKind::If(n) => {
                self.out(format!("(if {}", compile_expr(&n.cond)));
                self.incindent();
                self.body(&n.body);
                self.decindent();
                for branch in &n.elseif {
                    if let NodeKind::ElseIf { cond, body, .. } = &branch.kind {
                        self.out(format!(" elseif {}", compile_expr(cond)));
                        self.incindent();
                        self.body(body);
                        self.decindent();
                    }
                }
                if let Some(NodeKind::Else { body, .. }) = n.else_.as_deref().map(|e| &e.kind) {
                    self.out(" else");
                    self.incindent();
                    self.body(body);
                    self.decindent();
                }
                self.close();
            }
            NodeKind::While { cond, body, .. } => {
                self.out(format!("(while {}", compile_expr(cond)));
                self.block(body);
            }
            NodeKind::For(n) => {
                let left = targets(n.left.as_deref(), &n.list, n.rest.as_deref());
                self.out(format!("(for {} {}", left, compile_expr(&n.right)));
                self.block(&n.body);
            }
            NodeKind::Continue { .. } => self.out("(continue)"),
            NodeKind::Break { .. } => self.out("(break)"),
            NodeKind::Try(n) => {
                self.out("(try");
                self.incindent();
                self.body(&n.body);
                for branch in &n.catch {
                    if let NodeKind::Catch { pattern, body, .. } = &branch.kind {
                        self.decindent();
                        match pattern {
                            Some(p) => self.out(format!(" catch /{}/", p)),
                            None => self.out(" catch"),
                        }
                        self.incindent();
                        self.body(body);
                    }
                }
                if let Some(NodeKind::Finally { body, .. }) = n.finally.as_deref().map(|f| &f.kind)
                {
                    self.decindent();
                    self.out(" finally");
                    self.incindent();
                    self.body(body);
                }
                self.close();
                self.decindent();
            }
            NodeKind::Throw { left, .. } => self.out(format!("(throw {})", compile_expr(left))),
            NodeKind::Echo { command, list, .. } => {
                self.out(format!("({} {})", command.name(), join(list)))
            }
            NodeKind::EchoHl { text, .. } => {
                self.out(format!("(echohl \"{}\")", escape_raw(text)))
            }
            // closers and branches are rendered by their owning block
            NodeKind::EndFunction { .. }
            | NodeKind::EndIf { .. }
            | NodeKind::EndWhile { .. }
            | NodeKind::EndFor { .. }
            | NodeKind::EndTry { .. }
            | NodeKind::ElseIf { .. }
            | NodeKind::Else { .. }
            | NodeKind::Catch { .. }
            | NodeKind::Finally { .. } => {}
            _ => {
                let expr = compile_expr(node);
                self.out(expr);
            }
        }
    }

    fn assignment(&mut self, name: &str, a: &Assignment) {
        let left = targets(a.left.as_deref(), &a.list, a.rest.as_deref());
        self.out(format!("({} {} {} {})", name, a.op, left, compile_expr(&a.right)));
    }

    fn lockvar(&mut self, name: &str, depth: Option<usize>, list: &[Node]) {
        match depth {
            Some(depth) => self.out(format!("({} {} {})", name, depth, join(list))),
            None => self.out(format!("({} {})", name, join(list))),
        }
    }
}

/// `x` or `(a b . rest)`
fn targets(left: Option<&Node>, list: &[Node], rest: Option<&Node>) -> String {
    if let Some(left) = left {
        return compile_expr(left);
    }
    let mut s = join(list);
    if let Some(rest) = rest {
        s.push_str(" . ");
        s.push_str(&compile_expr(rest));
    }
    format!("({})", s)
}

// =============================================================================
// FINGERPRINT DIFF
// =============================================================================

/// Unified diff between a stored fingerprint and a fresh one, or `None`
/// when they match
pub fn diff_fingerprint(expected: &str, actual: &str) -> Option<String> {
    if expected == actual {
        return None;
    }
    Some(format_unified_diff("expected", "actual", expected, actual))
}

fn format_unified_diff(old_name: &str, new_name: &str, old: &str, new: &str) -> String {
    let diff = TextDiff::from_lines(old, new);
    let mut output = String::new();

    output.push_str(&format!("--- {}\n", old_name));
    output.push_str(&format!("+++ {}\n", new_name));

    for hunk in diff.unified_diff().context_radius(3).iter_hunks() {
        output.push_str(&format!("{}\n", hunk.header()));
        for change in hunk.iter_changes() {
            let sign = match change.tag() {
                ChangeTag::Delete => "-",
                ChangeTag::Insert => "+",
                ChangeTag::Equal => " ",
            };
            output.push_str(sign);
            output.push_str(change.value());
            if !change.value().ends_with('\n') {
                output.push('\n');
                output.push_str("\\ No newline at end of file\n");
            }
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{parse_expr, parse_lines, ParserOptions};

    fn sexp(lines: &[&str]) -> Vec<String> {
        compile(&parse_lines(lines, &ParserOptions::default()).unwrap())
    }

    fn expr(src: &str) -> String {
        compile_expr(&parse_expr(src).unwrap())
    }

    #[test]
    fn test_expression_forms() {
        assert_eq!(expr("1 + 2 * 3"), "(+ 1 (* 2 3))");
        assert_eq!(expr("1 == 2 ? 3 : 4"), "(?: (== 1 2) 3 4)");
        assert_eq!(expr("a ==# b"), "(==# a b)");
        assert_eq!(expr("a isnot? b"), "(isnot? a b)");
        assert_eq!(expr("!-x"), "(! (- x))");
        assert_eq!(expr("a % b"), "(% a b)");
        assert_eq!(expr("foo.bar"), "(dot foo bar)");
        assert_eq!(expr("\"foo\".bar"), "(concat \"foo\" bar)");
        assert_eq!(expr("l[1:]"), "(slice l 1 nil)");
        assert_eq!(expr("l[:2]"), "(slice l nil 2)");
        assert_eq!(expr("f()"), "(f)");
        assert_eq!(expr("f(1, 'a')"), "(f 1 'a')");
        assert_eq!(expr("x->f(1)"), "(method x (f 1))");
        assert_eq!(expr("[]"), "(list)");
        assert_eq!(expr("{}"), "(dict)");
        assert_eq!(expr("{'a': 1, 'b': [2]}"), "(dict ('a' 1) ('b' (list 2)))");
        assert_eq!(expr("{a, b -> a + b}"), "(lambda (a b) (+ a b))");
        assert_eq!(expr("s:{n}_x"), "s:{n}_x");
        assert_eq!(expr("&l:tw + $HOME + @a"), "(+ (+ &l:tw $HOME) @a)");
        assert_eq!(expr("0zFF00"), "0zFF00");
    }

    #[test]
    fn test_statement_forms() {
        assert_eq!(
            sexp(&[
                "\" header",
                "set nocompatible",
                "echohl Warn\\x",
                "call F()",
                "unlet a b",
                "lockvar 1 x",
                "throw 'e'",
                "echo",
            ]),
            [
                "; header",
                "(excmd \"set nocompatible\")",
                "(echohl \"Warn\\\\x\")",
                "(call (F))",
                "(unlet a b)",
                "(lockvar 1 x)",
                "(throw 'e')",
                "(echo )",
            ]
        );
    }

    #[test]
    fn test_let_forms() {
        assert_eq!(
            sexp(&["let x = 1", "let [a, b; c] = l", "let s ..= 'x'", "const [a] = [1]"]),
            [
                "(let = x 1)",
                "(let = (a b . c) l)",
                "(let ..= s 'x')",
                "(const = (a) (list 1))",
            ]
        );
        assert_eq!(
            sexp(&["let t =<< trim END", "\tone", "END"]),
            ["(let =<< t (heredoc (list \"trim\") \"END\" (list \"\\tone\")))"]
        );
    }

    #[test]
    fn test_if_chain() {
        assert_eq!(
            sexp(&["if a", "  echo 1", "elseif b", "  echo 2", "else", "  echo 3", "endif"]),
            ["(if a", "  (echo 1)", " elseif b", "  (echo 2)", " else", "  (echo 3))"]
        );
        assert_eq!(sexp(&["if 1", "endif"]), ["(if 1)"]);
    }

    #[test]
    fn test_loops_and_try() {
        assert_eq!(
            sexp(&["for [k, v] in items(d)", "  continue", "endfor", "while 1", "  break", "endwhile"]),
            ["(for (k v) (items d)", "  (continue))", "(while 1", "  (break))"]
        );
        assert_eq!(
            sexp(&["try", "  echo 1", "catch /E1/", "  echo 2", "catch", "finally", "  echo 3", "endtry"]),
            ["(try", "  (echo 1)", " catch /E1/", "  (echo 2)", " catch", " finally", "  (echo 3))"]
        );
    }

    #[test]
    fn test_function_header() {
        assert_eq!(
            sexp(&["function! s:F(a, b = 2, ...) abort", "  return a:a", "endfunction"]),
            ["(function (s:F a (b 2) . ...)", "  (return a:a))"]
        );
        assert_eq!(sexp(&["function F()", "endfunction"]), ["(function (F))"]);
    }

    #[test]
    fn test_nested_indent() {
        assert_eq!(
            sexp(&["function F()", "  if 1", "    return", "  endif", "endfunction"]),
            ["(function (F)", "  (if 1", "    (return)))"]
        );
    }

    #[test]
    fn test_excmd_escaping() {
        assert_eq!(sexp(&["normal! \"a\\p"]), ["(excmd \"normal! \\\"a\\\\p\")"]);
    }

    #[test]
    fn test_diff_fingerprint() {
        assert_eq!(diff_fingerprint("(echo 1)\n", "(echo 1)\n"), None);
        let diff = diff_fingerprint("(echo 1)\n(echo 2)\n", "(echo 1)\n(echo 3)\n").unwrap();
        assert!(diff.starts_with("--- expected\n+++ actual\n@@"));
        assert!(diff.contains("-(echo 2)\n"));
        assert!(diff.contains("+(echo 3)\n"));
        assert!(diff.contains(" (echo 1)\n"));
    }

    #[test]
    fn test_diff_missing_newline() {
        let diff = diff_fingerprint("a\n", "b").unwrap();
        assert!(diff.contains("+b\n\\ No newline at end of file\n"));
    }
}
