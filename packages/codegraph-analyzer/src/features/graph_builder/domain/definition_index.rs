//! Defined-function lookup
//!
//! Short name → fully-qualified definitions, queried only after every file's
//! definitions are known.

use std::collections::{BTreeMap, BTreeSet};

use super::NodeKind;
use crate::shared::utils::text::last_segment;

#[derive(Debug, Clone, Default)]
pub struct DefinitionIndex {
    /// Every registered method/function identity
    qualified: BTreeSet<String>,

    /// Last identity segment → identities ending with `:<segment>`
    by_short_name: BTreeMap<String, BTreeSet<String>>,
}

impl DefinitionIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a definition. Only callable kinds are accepted.
    pub fn insert(&mut self, id: &str, kind: NodeKind) -> bool {
        if !kind.is_callable() || !self.qualified.insert(id.to_string()) {
            return false;
        }
        self.by_short_name
            .entry(last_segment(id).to_string())
            .or_default()
            .insert(id.to_string());
        true
    }

    /// Every identity whose string ends with `:<callee>`.
    ///
    /// Callee names never contain `:`, so the suffix match is exactly a match
    /// on the last identity segment.
    pub fn resolve(&self, callee: &str) -> Option<&BTreeSet<String>> {
        self.by_short_name.get(callee).filter(|ids| !ids.is_empty())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.qualified.contains(id)
    }

    pub fn len(&self) -> usize {
        self.qualified.len()
    }

    pub fn is_empty(&self) -> bool {
        self.qualified.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.qualified.iter().map(String::as_str)
    }
}
