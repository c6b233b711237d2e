//! Model configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Knobs for reading and scanning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InternalConfig {
    /// Produce `Declaration` axioms.
    pub read_declarations: bool,
    /// Scan statements of imported sub-graphs too (not only the base graph).
    pub include_imports: bool,
    /// Longest `rdf:List` a decode may follow.
    pub max_list_length: usize,
    /// Deepest nesting of anonymous expressions and nested annotations.
    pub max_expression_depth: usize,
    /// Load kind caches on rayon worker threads.
    pub parallel_scan: bool,
    /// Keep skipped statements as diagnostics.
    pub collect_diagnostics: bool,
}

impl Default for InternalConfig {
    fn default() -> Self {
        Self {
            read_declarations: true,
            include_imports: false,
            max_list_length: 65_536,
            max_expression_depth: 256,
            parallel_scan: false,
            collect_diagnostics: true,
        }
    }
}

impl InternalConfig {
    pub fn from_json_str(json: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    pub fn with_imports(mut self, include: bool) -> Self {
        self.include_imports = include;
        self
    }

    pub fn with_parallel_scan(mut self, parallel: bool) -> Self {
        self.parallel_scan = parallel;
        self
    }
}
