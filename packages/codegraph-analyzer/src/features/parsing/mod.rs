//! Parsing Feature
//!
//! Responsible for AST parsing and syntax tree traversal.
//!
//! ## Structure
//! - `domain/` - ParsedTree, SyntaxNode models
//! - `ports/` - Parser trait
//! - `application/` - ParseFileUseCase
//! - `infrastructure/` - TreeSitterParser

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod ports;

// Re-exports
pub use application::ParseFileUseCase;
pub use domain::{ParseError, ParsedTree, SyntaxKind, SyntaxNode};
pub use infrastructure::TreeSitterParser;
pub use ports::Parser;
