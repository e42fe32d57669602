//! Parse file use case

use std::collections::BTreeMap;

use tracing::debug;

use crate::features::parsing::domain::ParsedTree;
use crate::features::parsing::ports::Parser;
use crate::shared::models::Result;

/// Parse file use case
pub struct ParseFileUseCase<P: Parser> {
    parser: P,
}

impl<P: Parser> ParseFileUseCase<P> {
    pub fn new(parser: P) -> Self {
        Self { parser }
    }

    /// Execute the parse operation
    pub fn execute(&self, source: &str, file_path: &str) -> Result<ParsedTree> {
        let tree = self.parser.parse(source, file_path)?;
        if tree.has_errors {
            debug!(
                "{}: {} syntax error(s) reported by {} parser",
                file_path,
                tree.errors.len(),
                self.parser.language_name()
            );
        }
        Ok(tree)
    }

    /// Execute for every file of a batch, preserving the batch order
    pub fn execute_batch(
        &self,
        files: &BTreeMap<String, String>,
    ) -> Vec<(String, Result<ParsedTree>)> {
        files
            .iter()
            .map(|(path, source)| (path.clone(), self.execute(source, path)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::parsing::domain::{SyntaxKind, SyntaxNode};
    use crate::shared::models::{CodegraphError, Span};

    // Mock parser for testing
    struct MockParser;

    impl Parser for MockParser {
        fn parse(&self, source: &str, file_path: &str) -> Result<ParsedTree> {
            if file_path.ends_with(".bin") {
                return Err(CodegraphError::parse("unsupported"));
            }
            let root = SyntaxNode::new(SyntaxKind::Module, Span::zero());
            Ok(ParsedTree::new(
                root,
                source.to_string(),
                file_path.to_string(),
                "python".to_string(),
            ))
        }

        fn supports_extension(&self, ext: &str) -> bool {
            ext == "py"
        }

        fn language_name(&self) -> &'static str {
            "python"
        }
    }

    #[test]
    fn test_parse_file_use_case() {
        let use_case = ParseFileUseCase::new(MockParser);
        let result = use_case.execute("def foo(): pass", "test.py");
        assert!(result.is_ok());
    }

    #[test]
    fn test_execute_batch_keeps_order_and_failures() {
        let use_case = ParseFileUseCase::new(MockParser);
        let mut files = BTreeMap::new();
        files.insert("b.py".to_string(), "x = 1".to_string());
        files.insert("a.bin".to_string(), "\0".to_string());

        let results = use_case.execute_batch(&files);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].0, "a.bin");
        assert!(results[0].1.is_err());
        assert!(results[1].1.is_ok());
    }
}
