//! Relationship Processor (second pass)
//!
//! Re-walks one file, adds `imports` edges directly and records call sites
//! for the resolver. Call sites are never turned into edges here: a call may
//! target a definition in a file that has not been collected yet.
//!
//! Context tracking is deliberately shallow: a stack of enclosing class names
//! and a single current-function slot. Entering a function overwrites the slot
//! and leaving it clears the slot, so after a nested function ends the rest
//! of the outer function is attributed to the enclosing class or file.

use tracing::debug;

use crate::features::graph_builder::domain::{identity, CallSite, CodeGraph, EdgeKind, GraphNode, NodeKind};
use crate::features::parsing::domain::{ParsedTree, SyntaxKind, SyntaxNode};

pub struct RelationshipProcessor<'a> {
    tree: &'a ParsedTree,
    graph: &'a mut CodeGraph,

    class_stack: Vec<&'a str>,
    current_function: Option<&'a str>,
    calls: Vec<CallSite>,
    imports: usize,
}

impl<'a> RelationshipProcessor<'a> {
    pub fn new(tree: &'a ParsedTree, graph: &'a mut CodeGraph) -> Self {
        Self {
            tree,
            graph,
            class_stack: Vec::new(),
            current_function: None,
            calls: Vec::new(),
            imports: 0,
        }
    }

    /// Walk the file, returning the recorded call sites in traversal order
    pub fn process(mut self) -> Vec<CallSite> {
        let tree = self.tree;
        self.visit(&tree.root);

        debug!(
            "{}: {} imports, {} call sites",
            tree.file_path,
            self.imports,
            self.calls.len()
        );
        self.calls
    }

    fn visit(&mut self, node: &'a SyntaxNode) {
        match node.kind {
            SyntaxKind::ClassDef => match node.name() {
                Some(name) => {
                    self.class_stack.push(name);
                    self.visit_children(node);
                    self.class_stack.pop();
                }
                None => self.visit_children(node),
            },
            SyntaxKind::FunctionDef => {
                self.current_function = node.name();
                self.visit_children(node);
                self.current_function = None;
            }
            SyntaxKind::ImportDecl => self.record_imports(node),
            SyntaxKind::CallExpr => {
                self.record_call(node);
                self.visit_children(node);
            }
            _ => self.visit_children(node),
        }
    }

    fn visit_children(&mut self, node: &'a SyntaxNode) {
        for child in &node.children {
            self.visit(child);
        }
    }

    /// Identity of the current context frame
    fn current_context(&self) -> String {
        identity::context_id(
            &self.tree.file_path,
            self.class_stack.last().copied(),
            self.current_function,
        )
    }

    // ─────────────────────────────────────────────────────────────────────
    // Imports
    // ─────────────────────────────────────────────────────────────────────

    fn record_imports(&mut self, node: &SyntaxNode) {
        let tree = self.tree;
        for name in import_names(node, tree) {
            let import_id = identity::import_id(&name);
            self.graph
                .upsert_node(GraphNode::new(import_id.as_str(), NodeKind::Import, name.as_str()).with_span(node.span));
            self.graph
                .add_edge(&tree.file_path, &import_id, EdgeKind::Imports);
            self.imports += 1;
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Calls
    // ─────────────────────────────────────────────────────────────────────

    fn record_call(&mut self, call: &SyntaxNode) {
        let Some(callee) = callee_name(call) else {
            return;
        };
        self.calls.push(CallSite {
            caller: self.current_context(),
            callee,
            span: call.span,
        });
    }
}

/// Callee text of a call expression.
///
/// `name(...)` → `name`, `object.name(...)` → `object.name`; any other
/// call target (chained, subscripted, computed) yields `None`.
pub fn callee_name(call: &SyntaxNode) -> Option<String> {
    let function = call.child_by_field("function")?;
    match function.kind {
        SyntaxKind::NameExpr => Some(function.text().to_string()).filter(|n| !n.is_empty()),
        SyntaxKind::AttributeExpr => {
            let object = function.child_by_field("object")?;
            let attribute = function.child_by_field("attribute")?;
            if object.kind != SyntaxKind::NameExpr {
                return None;
            }
            Some(format!("{}.{}", object.text(), attribute.text()))
        }
        _ => None,
    }
}

/// Dotted names imported by one import statement
pub fn import_names(node: &SyntaxNode, tree: &ParsedTree) -> Vec<String> {
    let imported = |n: &SyntaxNode| -> Option<String> {
        let target = if n.raw_kind() == "aliased_import" {
            n.child_by_field("name")?
        } else {
            n
        };
        Some(tree.text_of(target).to_string()).filter(|t| !t.is_empty())
    };

    match node.raw_kind() {
        "import_statement" => node.children_by_field("name").filter_map(imported).collect(),
        "import_from_statement" => {
            let module = node
                .child_by_field("module_name")
                .map(|m| module_text(m, tree))
                .unwrap_or_default();

            let mut names: Vec<String> = node
                .children_by_field("name")
                .filter_map(imported)
                .map(|name| format!("{module}.{name}"))
                .collect();
            if node.children.iter().any(|c| c.raw_kind() == "wildcard_import") {
                names.push(format!("{module}.*"));
            }
            names
        }
        "future_import_statement" => node
            .children_by_field("name")
            .filter_map(imported)
            .map(|name| format!("__future__.{name}"))
            .collect(),
        _ => Vec::new(),
    }
}

/// Module part of a `from` import; relative dots are dropped
fn module_text(module: &SyntaxNode, tree: &ParsedTree) -> String {
    if module.raw_kind() == "relative_import" {
        return module
            .children
            .iter()
            .find(|c| c.raw_kind() == "dotted_name")
            .map(|d| tree.text_of(d).to_string())
            .unwrap_or_default();
    }
    tree.text_of(module).to_string()
}
