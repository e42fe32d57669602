//! Definition Collector (first pass)
//!
//! Registers class, method and module-level function nodes for one file and
//! records every method/function identity in the `DefinitionIndex`.
//!
//! Registration rules:
//! - every class definition, at any depth → `path:Class`
//! - functions directly in a class body → `path:Class:method`
//! - functions whose nearest enclosing definition is the module → `path:function`
//! - functions nested in other functions are not registered

use tracing::debug;

use super::node_enricher::NodeEnricher;
use crate::features::graph_builder::domain::{
    identity, CodeGraph, DefinitionIndex, EdgeKind, GraphNode, NodeKind,
};
use crate::features::parsing::domain::{ParsedTree, SyntaxKind, SyntaxNode};

pub struct DefinitionCollector<'a> {
    tree: &'a ParsedTree,
    graph: &'a mut CodeGraph,
    index: &'a mut DefinitionIndex,
    enricher: Option<&'a NodeEnricher>,

    /// Classes currently being collected
    class_stack: Vec<&'a str>,
    function_depth: usize,
    registered: usize,
}

impl<'a> DefinitionCollector<'a> {
    pub fn new(tree: &'a ParsedTree, graph: &'a mut CodeGraph, index: &'a mut DefinitionIndex) -> Self {
        Self {
            tree,
            graph,
            index,
            enricher: None,
            class_stack: Vec::new(),
            function_depth: 0,
            registered: 0,
        }
    }

    pub fn with_enricher(mut self, enricher: Option<&'a NodeEnricher>) -> Self {
        self.enricher = enricher;
        self
    }

    /// Walk the file and register its definitions.
    ///
    /// Returns the number of definition nodes registered.
    pub fn collect(mut self) -> usize {
        let tree = self.tree;
        self.visit(&tree.root);

        debug!(
            "{}: collected {} definitions",
            self.tree.file_path, self.registered
        );
        self.registered
    }

    fn visit(&mut self, node: &'a SyntaxNode) {
        for child in &node.children {
            let def = child.unwrap_decorated();
            match def.kind {
                SyntaxKind::ClassDef => self.visit_class(def),
                SyntaxKind::FunctionDef => self.visit_function(def),
                _ => self.visit(child),
            }
        }
    }

    fn visit_class(&mut self, class: &'a SyntaxNode) {
        let Some(class_name) = class.name() else {
            self.visit(class);
            return;
        };

        let tree = self.tree;
        let path = tree.file_path.as_str();
        let class_id = identity::class_id(path, class_name);
        self.register(&class_id, NodeKind::Class, class_name, class, path);

        for item in class.body() {
            let method = item.unwrap_decorated();
            if method.kind != SyntaxKind::FunctionDef {
                continue;
            }
            if let Some(method_name) = method.name() {
                let method_id = identity::method_id(path, class_name, method_name);
                self.register(&method_id, NodeKind::Method, method_name, method, &class_id);
            }
        }

        self.class_stack.push(class_name);
        self.visit(class);
        self.class_stack.pop();
    }

    fn visit_function(&mut self, function: &'a SyntaxNode) {
        if self.class_stack.is_empty() && self.function_depth == 0 {
            if let Some(name) = function.name() {
                let tree = self.tree;
                let path = tree.file_path.as_str();
                let function_id = identity::function_id(path, name);
                self.register(&function_id, NodeKind::Function, name, function, path);
            }
        }

        self.function_depth += 1;
        self.visit(function);
        self.function_depth -= 1;
    }

    fn register(&mut self, id: &str, kind: NodeKind, name: &str, def: &SyntaxNode, parent: &str) {
        let mut node = GraphNode::new(id, kind, name).with_span(def.span);
        if let Some(enricher) = self.enricher {
            enricher.describe_definition(&mut node, def, self.tree);
        }

        self.graph.upsert_node(node);
        self.graph.add_edge(parent, id, EdgeKind::Defines);
        self.index.insert(id, kind);
        self.registered += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::parsing::{Parser, TreeSitterParser};

    fn collect(path: &str, source: &str) -> (CodeGraph, DefinitionIndex) {
        let tree = TreeSitterParser::python().parse(source, path).unwrap();
        let mut graph = CodeGraph::new();
        let mut index = DefinitionIndex::new();
        DefinitionCollector::new(&tree, &mut graph, &mut index).collect();
        (graph, index)
    }

    #[test]
    fn test_class_method_and_function() {
        let source = "class Foo:\n    def bar(self):\n        pass\n\ndef baz():\n    pass\n";
        let (graph, index) = collect("m.py", source);

        assert_eq!(graph.node("m.py:Foo").unwrap().kind, NodeKind::Class);
        assert_eq!(graph.node("m.py:Foo:bar").unwrap().kind, NodeKind::Method);
        assert_eq!(graph.node("m.py:baz").unwrap().kind, NodeKind::Function);

        assert_eq!(graph.count_edges("m.py", "m.py:Foo", EdgeKind::Defines), 1);
        assert_eq!(graph.count_edges("m.py:Foo", "m.py:Foo:bar", EdgeKind::Defines), 1);
        assert_eq!(graph.count_edges("m.py", "m.py:baz", EdgeKind::Defines), 1);

        let indexed: Vec<_> = index.iter().collect();
        assert_eq!(indexed, vec!["m.py:Foo:bar", "m.py:baz"]);
    }

    #[test]
    fn test_nested_functions_not_registered() {
        let source = "def outer():\n    def inner():\n        pass\n    return inner\n";
        let (graph, index) = collect("n.py", source);

        assert!(graph.contains("n.py:outer"));
        assert!(!graph.contains("n.py:inner"));
        assert!(!graph.contains("n.py:outer:inner"));
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn test_methods_not_registered_as_functions() {
        let source = "class A:\n    def m(self):\n        def helper():\n            pass\n";
        let (graph, _) = collect("a.py", source);

        assert!(graph.contains("a.py:A:m"));
        assert!(!graph.contains("a.py:m"));
        assert!(!graph.contains("a.py:helper"));
        assert!(!graph.contains("a.py:A:helper"));
    }

    #[test]
    fn test_decorated_and_async_definitions() {
        let source = "\
@dataclass
class Point:
    @property
    def norm(self):
        return 0

    async def fetch(self):
        pass

async def main():
    pass
";
        let (graph, _) = collect("p.py", source);

        assert!(graph.contains("p.py:Point"));
        assert!(graph.contains("p.py:Point:norm"));
        assert!(graph.contains("p.py:Point:fetch"));
        assert!(graph.contains("p.py:main"));
    }

    #[test]
    fn test_class_inside_function() {
        let source = "def factory():\n    class Local:\n        def go(self):\n            pass\n    return Local\n";
        let (graph, _) = collect("f.py", source);

        assert!(graph.contains("f.py:factory"));
        assert!(graph.contains("f.py:Local"));
        assert!(graph.contains("f.py:Local:go"));
        assert_eq!(graph.count_edges("f.py", "f.py:Local", EdgeKind::Defines), 1);
    }

    #[test]
    fn test_enricher_adds_documentation() {
        let source = "def documented():\n    \"\"\"Explains itself.\"\"\"\n    return 1\n";
        let tree = TreeSitterParser::python().parse(source, "d.py").unwrap();
        let mut graph = CodeGraph::new();
        let mut index = DefinitionIndex::new();
        let enricher = NodeEnricher::new(20);
        DefinitionCollector::new(&tree, &mut graph, &mut index)
            .with_enricher(Some(&enricher))
            .collect();

        let node = graph.node("d.py:documented").unwrap();
        assert_eq!(node.documentation.as_deref(), Some("Explains itself."));
        assert_eq!(node.complexity, Some(1));
        assert!(node.code_snippet.as_deref().unwrap().starts_with("def documented():"));
    }
}
