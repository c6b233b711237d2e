//! Error taxonomy.
//!
//! - `ListError` / `TranslationError` are per-statement: a scan skips the
//!   statement, records a diagnostic and keeps going.
//! - `IllegalMutation` is fatal to the requested operation and is always
//!   returned to the caller.

use ontmap_graph::{Node, Triple};
use thiserror::Error;

use crate::model::AxiomKind;

/// Failure to decode an `rdf:first`/`rdf:rest` chain.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ListError {
    #[error("list revisits cell {node}")]
    Cycle { node: Node },

    #[error("list exceeds {max} members")]
    TooLong { max: usize },

    #[error("list cell {node} is missing rdf:first or rdf:rest")]
    Truncated { node: Node },

    #[error("list cell {node} has more than one rdf:first or rdf:rest link")]
    Ambiguous { node: Node },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TranslationError {
    #[error("malformed list: {0}")]
    MalformedList(#[from] ListError),

    #[error("cannot resolve {node} as {expected}")]
    UnresolvedOperand { node: Node, expected: &'static str },

    #[error("statement {triple} is not a {kind:?} encoding")]
    UnsupportedEncoding { kind: AxiomKind, triple: Triple },
}

impl TranslationError {
    pub fn unresolved(node: &Node, expected: &'static str) -> Self {
        TranslationError::UnresolvedOperand {
            node: node.clone(),
            expected,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IllegalMutation {
    #[error("{kind:?} axiom is only backed by imported triples")]
    NotLocal { kind: AxiomKind },

    #[error("{kind:?} axiom is only backed by triples other axioms rely on")]
    Shared { kind: AxiomKind },

    #[error("cannot merge objects with different content ({left} vs {right})")]
    ContentMismatch { left: String, right: String },

    #[error("cannot write {kind:?} axiom: {reason}")]
    Unwritable { kind: AxiomKind, reason: String },
}

/// Umbrella error for callers of the model.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OntError {
    #[error(transparent)]
    Translation(#[from] TranslationError),

    #[error(transparent)]
    Mutation(#[from] IllegalMutation),

    #[error(transparent)]
    List(#[from] ListError),
}

pub type OntResult<T> = Result<T, OntError>;
