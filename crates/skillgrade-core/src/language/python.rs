//! Python syntax validation and import extraction via tree-sitter

use std::collections::BTreeSet;

use tree_sitter::{Node, Parser, Tree};

/// First syntax problem found in a Python source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxDiagnostic {
    pub message: String,
    /// 1-based line, when the parser located the problem
    pub line: Option<usize>,
    /// 1-based column, when the parser located the problem
    pub column: Option<usize>,
}

impl SyntaxDiagnostic {
    fn unlocated(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            line: None,
            column: None,
        }
    }

    fn at(node: Node<'_>) -> Self {
        let message = if node.is_missing() {
            format!("missing `{}`", node.kind())
        } else {
            "invalid syntax".to_string()
        };
        Self::located(node, message)
    }

    fn located(node: Node<'_>, message: impl Into<String>) -> Self {
        let position = node.start_position();
        Self {
            message: message.into(),
            line: Some(position.row + 1),
            column: Some(position.column + 1),
        }
    }
}

/// A syntactically valid Python source with its syntax tree
pub struct PythonSource<'a> {
    source: &'a str,
    tree: Tree,
}

impl<'a> PythonSource<'a> {
    /// Parse `source`, failing on the first ERROR or MISSING node, then on
    /// the first Python 2 construct the grammar still accepts.
    ///
    /// A fresh parser is created per call so evaluators can be shared
    /// between threads.
    pub fn parse(source: &'a str) -> Result<Self, SyntaxDiagnostic> {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_python::LANGUAGE.into())
            .map_err(|e| SyntaxDiagnostic::unlocated(format!("failed to load Python grammar: {e}")))?;

        let tree = parser
            .parse(source, None)
            .ok_or_else(|| SyntaxDiagnostic::unlocated("parser produced no syntax tree"))?;

        let root = tree.root_node();
        if root.has_error() {
            return Err(first_error(root)
                .map(SyntaxDiagnostic::at)
                .unwrap_or_else(|| SyntaxDiagnostic::unlocated("invalid syntax")));
        }
        if let Some((node, reason)) = python2_construct(root, source) {
            return Err(SyntaxDiagnostic::located(node, reason));
        }

        Ok(Self { source, tree })
    }

    /// All imports in the module, including nested ones, as
    /// `from <module> import <name>` and `import <name>` strings.
    ///
    /// Aliases report the imported name. Relative imports lose their leading
    /// dots; imports from a bare package (`from . import x`) are skipped.
    pub fn imports(&self) -> BTreeSet<String> {
        let mut imports = BTreeSet::new();
        let mut stack = vec![self.tree.root_node()];

        while let Some(node) = stack.pop() {
            match node.kind() {
                "import_statement" => {
                    for name in self.imported_names(node) {
                        imports.insert(format!("import {name}"));
                    }
                }
                "import_from_statement" | "future_import_statement" => {
                    if let Some(module) = self.from_module(node) {
                        for name in self.imported_names(node) {
                            imports.insert(format!("from {module} import {name}"));
                        }
                    }
                }
                _ => {}
            }

            let mut cursor = node.walk();
            stack.extend(node.named_children(&mut cursor));
        }

        imports
    }

    fn from_module(&self, node: Node<'_>) -> Option<String> {
        if node.kind() == "future_import_statement" {
            return Some("__future__".to_string());
        }
        let module = self.text(node.child_by_field_name("module_name")?)?;
        let module = module.trim_start_matches('.');
        (!module.is_empty()).then(|| module.to_string())
    }

    fn imported_names(&self, node: Node<'_>) -> Vec<String> {
        let mut names = Vec::new();
        let mut cursor = node.walk();
        for child in node.children_by_field_name("name", &mut cursor) {
            let target = if child.kind() == "aliased_import" {
                child.child_by_field_name("name")
            } else {
                Some(child)
            };
            if let Some(name) = target.and_then(|n| self.text(n)) {
                names.push(name);
            }
        }

        let mut cursor = node.walk();
        if node
            .named_children(&mut cursor)
            .any(|child| child.kind() == "wildcard_import")
        {
            names.push("*".to_string());
        }

        names
    }

    /// Node text with interior whitespace removed (`a . b` → `a.b`)
    fn text(&self, node: Node<'_>) -> Option<String> {
        node.utf8_text(self.source.as_bytes())
            .ok()
            .map(|text| text.split_whitespace().collect())
    }
}

fn first_error<'t>(root: Node<'t>) -> Option<Node<'t>> {
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        if node.is_error() || node.is_missing() {
            return Some(node);
        }
        if node.has_error() {
            let mut cursor = node.walk();
            let children: Vec<Node<'t>> = node.children(&mut cursor).collect();
            stack.extend(children.into_iter().rev());
        }
    }
    None
}

/// First node (in source order) that only Python 2 accepts.
///
/// tree-sitter-python keeps grammar rules for `print`/`exec` statements,
/// `except X, e`, `<>` and old-style integer literals.
fn python2_construct<'t>(root: Node<'t>, source: &str) -> Option<(Node<'t>, &'static str)> {
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        let reason = match node.kind() {
            "print_statement" => Some("print statement; use print(...)"),
            "exec_statement" => Some("exec statement; use exec(...)"),
            "except_clause" if has_token(node, ",") => {
                Some("`except X, e` clause; use `except X as e`")
            }
            "comparison_operator" if has_token(node, "<>") => Some("`<>` operator; use `!=`"),
            "integer" => node
                .utf8_text(source.as_bytes())
                .ok()
                .and_then(python2_integer),
            _ => None,
        };
        if let Some(reason) = reason {
            return Some((node, reason));
        }

        let mut cursor = node.walk();
        let children: Vec<Node<'t>> = node.named_children(&mut cursor).collect();
        stack.extend(children.into_iter().rev());
    }
    None
}

fn has_token(node: Node<'_>, token: &str) -> bool {
    let mut cursor = node.walk();
    let found = node
        .children(&mut cursor)
        .any(|child| !child.is_named() && child.kind() == token);
    found
}

fn python2_integer(text: &str) -> Option<&'static str> {
    if text.ends_with(&['l', 'L'][..]) {
        return Some("long integer suffix");
    }
    let decimal = text.bytes().all(|b| b.is_ascii_digit() || b == b'_');
    let nonzero = text.bytes().any(|b| matches!(b, b'1'..=b'9'));
    (decimal && nonzero && text.starts_with('0'))
        .then_some("leading zero in integer literal; use the 0o prefix")
}
