//! Code Analyzer UseCase
//!
//! Entry point of the crate: `{path → source}` in, graph plus metrics out.
//!
//! Pipeline per `analyze` call:
//! 1. parse every file once
//! 2. definition pass (file, class, method and function nodes; error nodes
//!    for files that failed to parse)
//! 3. relationship pass (imports, call sites) over the clean files
//! 4. call resolution against the complete definition index
//! 5. metrics over the same parsed trees, copied onto file and class nodes
//!
//! All mutable state lives in an `AnalysisSession` created per call.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::{info, warn};

use crate::config::AnalyzerConfig;
use crate::features::graph_builder::domain::{
    identity, CallSite, CodeGraph, DefinitionIndex, EdgeKind, GraphNode, NodeKind,
};
use crate::features::graph_builder::infrastructure::{
    CallResolver, DefinitionCollector, GraphExport, NodeEnricher, RelationshipProcessor,
    ResolutionStats,
};
use crate::features::metrics::{summarize_parsed, MetricsSummary};
use crate::features::parsing::{ParseFileUseCase, ParsedTree, Parser, TreeSitterParser};
use crate::shared::models::{CodegraphError, Result, Span};
use crate::shared::utils::text::file_display_name;

/// Graph and metrics of one batch
#[derive(Debug, Clone)]
pub struct AnalysisResult {
    pub graph: CodeGraph,
    pub metrics: MetricsSummary,
}

#[derive(Serialize)]
struct AnalysisExport<'a> {
    graph_data: GraphExport,
    metrics: &'a MetricsSummary,
}

impl AnalysisResult {
    pub fn to_d3(&self) -> GraphExport {
        self.graph.to_d3()
    }

    /// `{"graph_data": {...}, "metrics": {...}}`
    pub fn to_json(&self, pretty: bool) -> Result<String> {
        let export = AnalysisExport {
            graph_data: self.to_d3(),
            metrics: &self.metrics,
        };
        let json = if pretty {
            serde_json::to_string_pretty(&export)?
        } else {
            serde_json::to_string(&export)?
        };
        Ok(json)
    }
}

/// Static analyzer over a batch of source files
pub struct CodeAnalyzer<P: Parser = TreeSitterParser> {
    parse: ParseFileUseCase<P>,
    config: AnalyzerConfig,
}

impl CodeAnalyzer<TreeSitterParser> {
    /// Python analyzer with the default configuration
    pub fn new() -> Self {
        Self::with_config(AnalyzerConfig::default())
    }

    pub fn with_config(config: AnalyzerConfig) -> Self {
        Self::with_parser(TreeSitterParser::python(), config)
    }
}

impl Default for CodeAnalyzer<TreeSitterParser> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Parser> CodeAnalyzer<P> {
    pub fn with_parser(parser: P, config: AnalyzerConfig) -> Self {
        Self {
            parse: ParseFileUseCase::new(parser),
            config,
        }
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Analyze one batch.
    ///
    /// Fails only for an empty batch; per-file problems end up as `error`
    /// nodes and zeroed metrics.
    pub fn analyze(&self, files: &BTreeMap<String, String>) -> Result<AnalysisResult> {
        if files.is_empty() {
            return Err(CodegraphError::EmptyBatch);
        }

        let parsed = self.parse.execute_batch(files);
        let enricher = NodeEnricher::from_config(&self.config);
        let mut session = AnalysisSession::new(enricher.as_ref());

        for (path, result) in &parsed {
            session.collect_definitions(path, result);
        }
        for (_, result) in &parsed {
            if let Ok(tree) = result {
                session.process_relationships(tree);
            }
        }
        let stats = session.resolve_calls();

        let metrics = summarize_parsed(
            files
                .iter()
                .zip(&parsed)
                .map(|((path, source), (_, tree))| (path.as_str(), source.as_str(), tree.as_ref().ok())),
        );
        session.apply_metrics(&metrics);

        info!(
            "Analyzed {} files ({} with parse errors): {} nodes, {} edges, {} call sites resolved, {} unresolved",
            files.len(),
            session.parse_failures,
            session.graph.node_count(),
            session.graph.edge_count(),
            stats.resolved_calls,
            stats.unresolved_calls
        );

        Ok(AnalysisResult {
            graph: session.graph,
            metrics,
        })
    }
}

/// Mutable state of one `analyze` call
struct AnalysisSession<'e> {
    graph: CodeGraph,
    index: DefinitionIndex,
    calls: Vec<CallSite>,
    enricher: Option<&'e NodeEnricher>,
    parse_failures: usize,
}

impl<'e> AnalysisSession<'e> {
    fn new(enricher: Option<&'e NodeEnricher>) -> Self {
        Self {
            graph: CodeGraph::new(),
            index: DefinitionIndex::new(),
            calls: Vec::new(),
            enricher,
            parse_failures: 0,
        }
    }

    fn collect_definitions(&mut self, path: &str, parsed: &Result<ParsedTree>) {
        let mut file = GraphNode::new(identity::file_id(path), NodeKind::File, file_display_name(path));

        let tree = match parsed {
            Ok(tree) => match tree.first_error() {
                Some(err) => {
                    self.graph.upsert_node(file);
                    self.record_parse_failure(path, &err.message, Some(err.span));
                    return;
                }
                None => tree,
            },
            Err(e) => {
                self.graph.upsert_node(file);
                self.record_parse_failure(path, &e.to_string(), None);
                return;
            }
        };

        if let Some(enricher) = self.enricher {
            enricher.describe_module(&mut file, tree);
        }
        self.graph.upsert_node(file);

        DefinitionCollector::new(tree, &mut self.graph, &mut self.index)
            .with_enricher(self.enricher)
            .collect();
    }

    fn record_parse_failure(&mut self, path: &str, message: &str, span: Option<Span>) {
        warn!("{}: {}", path, message);

        let error_id = identity::error_id(path);
        let mut node = GraphNode::new(error_id.as_str(), NodeKind::Error, message);
        node.span = span;
        self.graph.upsert_node(node);
        self.graph.add_edge(path, &error_id, EdgeKind::ContainsError);
        self.parse_failures += 1;
    }

    fn process_relationships(&mut self, tree: &ParsedTree) {
        if tree.has_errors {
            return;
        }
        let calls = RelationshipProcessor::new(tree, &mut self.graph).process();
        self.calls.extend(calls);
    }

    fn resolve_calls(&mut self) -> ResolutionStats {
        CallResolver::new(&self.index).resolve(&self.calls, &mut self.graph)
    }

    fn apply_metrics(&mut self, metrics: &MetricsSummary) {
        let Some(enricher) = self.enricher else {
            return;
        };
        for (path, file_metrics) in &metrics.files {
            if self.graph.node(path).is_some_and(|n| n.kind == NodeKind::File) {
                enricher.apply_file_metrics(&mut self.graph, path, file_metrics);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Preset;

    fn batch(files: &[(&str, &str)]) -> BTreeMap<String, String> {
        files
            .iter()
            .map(|(p, s)| (p.to_string(), s.to_string()))
            .collect()
    }

    #[test]
    fn test_empty_batch_rejected() {
        let err = CodeAnalyzer::new().analyze(&BTreeMap::new()).unwrap_err();
        assert!(matches!(err, CodegraphError::EmptyBatch));
    }

    #[test]
    fn test_parse_failure_isolated() {
        let files = batch(&[
            ("bad.py", "def broken(:\n    pass\n"),
            ("good.py", "def ok():\n    pass\n"),
        ]);
        let result = CodeAnalyzer::new().analyze(&files).unwrap();
        let graph = &result.graph;

        let error = graph.node("bad.py_error").unwrap();
        assert_eq!(error.kind, NodeKind::Error);
        assert!(error.name.starts_with("invalid syntax") || error.name.starts_with("missing"));
        assert_eq!(graph.count_edges("bad.py", "bad.py_error", EdgeKind::ContainsError), 1);
        assert!(graph.targets("bad.py", EdgeKind::Defines).is_empty());
        assert!(graph.contains("good.py:ok"));
    }

    #[test]
    fn test_file_nodes_enriched_with_metrics() {
        let files = batch(&[("pkg/mod.py", "\"\"\"Module doc.\"\"\"\ndef f(x):\n    return x or 1\n")]);
        let result = CodeAnalyzer::new().analyze(&files).unwrap();

        let file = result.graph.node("pkg/mod.py").unwrap();
        assert_eq!(file.name, "mod.py");
        assert_eq!(file.documentation.as_deref(), Some("Module doc."));
        assert_eq!(file.complexity, Some(2));
        assert!(file.maintainability.is_some());
    }

    #[test]
    fn test_minimal_preset_skips_enrichment() {
        let config = AnalyzerConfig::preset(Preset::Minimal).build().unwrap();
        let files = batch(&[("m.py", "def f():\n    \"\"\"Doc.\"\"\"\n")]);
        let result = CodeAnalyzer::with_config(config).analyze(&files).unwrap();

        let node = result.graph.node("m.py:f").unwrap();
        assert!(node.documentation.is_none());
        assert!(node.complexity.is_none());
        assert_eq!(result.metrics.files["m.py"].complexity, 1);
    }

    #[test]
    fn test_to_json_shape() {
        let files = batch(&[("a.py", "import os\n")]);
        let result = CodeAnalyzer::new().analyze(&files).unwrap();
        let value: serde_json::Value = serde_json::from_str(&result.to_json(false).unwrap()).unwrap();

        assert!(value["graph_data"]["nodes"].is_array());
        assert_eq!(value["graph_data"]["links"][0]["type"], "imports");
        assert_eq!(value["metrics"]["overall"]["total_files"], 1);
        assert_eq!(value["metrics"]["files"]["a.py"]["lines"], 2);
    }

    #[test]
    fn test_repeated_calls_do_not_leak_state() {
        let analyzer = CodeAnalyzer::new();
        let first = analyzer.analyze(&batch(&[("a.py", "def a():\n    b()\n")])).unwrap();
        let second = analyzer.analyze(&batch(&[("z.py", "x = 1\n")])).unwrap();

        assert!(first.graph.contains("ref:b"));
        assert!(!second.graph.contains("a.py"));
        assert!(!second.graph.contains("ref:b"));
        assert_eq!(second.graph.node_count(), 1);
    }
}
