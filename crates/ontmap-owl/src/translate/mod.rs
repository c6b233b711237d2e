//! Per-kind axiom translators.
//!
//! Every axiom kind has one `AxiomTranslator`. A translator enumerates the
//! candidate statements of its kind, filters them with a cheap shape test,
//! reads each survivor into an `ONTObject<Axiom>` and can write an axiom
//! of its kind back as triples.
//!
//! Three strategies cover the 39 kinds:
//!
//! - [`SimpleKind`]: one main triple (or one root node) per axiom;
//! - [`PairwiseEncodedKind`]: n-ary kinds stored as binary triples and
//!   grouping nodes;
//! - [`ListEncodedKind`]: a subject linked to an ordered list of members.

mod kinds;
mod list_encoded;
mod pairwise;
mod simple;

use std::collections::BTreeSet;
use std::fmt;
use std::sync::OnceLock;

use ontmap_graph::{Node, Triple};

use crate::annotation::{self, Reification};
use crate::error::{IllegalMutation, TranslationError};
use crate::factory::ReadContext;
use crate::model::{Annotation, Axiom, AxiomKind};
use crate::object::ONTObject;
use crate::writer::GraphWriter;

pub use kinds::translator_for;
pub use list_encoded::ListEncodedKind;
pub use pairwise::PairwiseEncodedKind;
pub use simple::SimpleKind;

// ============================================================================
// Statements and diagnostics
// ============================================================================

/// A candidate main triple with lazily resolved reifications.
#[derive(Debug)]
pub struct Statement {
    pub triple: Triple,
    pub local: bool,
    reifications: OnceLock<Vec<Reification>>,
}

impl Statement {
    pub fn new(triple: Triple, local: bool) -> Self {
        Self {
            triple,
            local,
            reifications: OnceLock::new(),
        }
    }

    /// Reification nodes of the main triple, resolved on first use.
    pub fn reifications(&self, ctx: &ReadContext<'_>) -> &[Reification] {
        self.reifications
            .get_or_init(|| annotation::reifications(ctx, &self.triple))
    }
}

/// A statement that looked like an axiom of `kind` but could not be read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: AxiomKind,
    pub triple: Triple,
    /// False when the statement comes from an imported graph.
    pub local: bool,
    pub error: TranslationError,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let origin = if self.local { "" } else { ", imported" };
        write!(f, "{}: {} ({}{origin})", self.kind.name(), self.error, self.triple)
    }
}

/// Result of one kind scan.
#[derive(Debug, Default)]
pub struct Translated {
    pub objects: Vec<ONTObject<Axiom>>,
    pub diagnostics: Vec<Diagnostic>,
}

impl Translated {
    fn record(&mut self, kind: AxiomKind, statement: &Statement, result: Result<ONTObject<Axiom>, TranslationError>) {
        let triple = &statement.triple;
        match result {
            Ok(object) => {
                tracing::trace!(kind = kind.name(), %triple, id = %object.content_id(), "translated");
                self.objects.push(object);
            }
            Err(error) => {
                tracing::warn!(kind = kind.name(), %triple, local = statement.local, %error, "statement skipped");
                self.diagnostics.push(Diagnostic {
                    kind,
                    triple: triple.clone(),
                    local: statement.local,
                    error,
                });
            }
        }
    }
}

// ============================================================================
// Translator contract
// ============================================================================

pub trait AxiomTranslator: Send + Sync {
    fn kind(&self) -> AxiomKind;

    /// Candidate statements in graph order. Imported statements are left
    /// out unless the configuration includes imports.
    fn candidates(&self, ctx: &ReadContext<'_>) -> Vec<Statement>;

    /// Cheap shape test; never fails.
    fn recognize(&self, ctx: &ReadContext<'_>, statement: &Statement) -> bool;

    /// Read one recognized statement.
    fn read(&self, ctx: &ReadContext<'_>, statement: &Statement) -> Result<ONTObject<Axiom>, TranslationError>;

    /// Emit `axiom` through `writer`.
    fn write(&self, axiom: &Axiom, writer: &mut GraphWriter<'_>) -> Result<(), IllegalMutation>;

    /// Every axiom of this kind, in candidate order. Objects with equal
    /// content are not merged here.
    fn read_all(&self, ctx: &ReadContext<'_>) -> Translated {
        let kind = self.kind();
        let mut out = Translated::default();
        for statement in self.candidates(ctx) {
            if self.recognize(ctx, &statement) {
                out.record(kind, &statement, self.read(ctx, &statement));
            }
        }
        out
    }
}

// ============================================================================
// Shared helpers
// ============================================================================

/// How candidate main triples are found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pattern {
    /// `?s predicate ?o`.
    Predicate(&'static str),
    /// `?s rdf:type type`.
    Type(&'static str),
    /// Every triple.
    Any,
}

impl Pattern {
    pub fn statements(self, ctx: &ReadContext<'_>) -> Vec<Statement> {
        let graph = ctx.graph();
        let found = match self {
            Pattern::Predicate(p) => graph.find(None, Some(&Node::iri(p)), None),
            Pattern::Type(ty) => graph.find(
                None,
                Some(&Node::iri(ontmap_graph::vocab::rdf::TYPE)),
                Some(&Node::iri(ty)),
            ),
            Pattern::Any => graph.find(None, None, None),
        };
        let include_imports = ctx.config().include_imports;
        found
            .into_iter()
            .filter_map(|t| {
                let local = graph.is_local(&t);
                (local || include_imports).then(|| Statement::new(t, local))
            })
            .collect()
    }
}

/// Where a kind keeps its annotations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnnotationMode {
    /// Reification nodes pointing at the main triple.
    Reified,
    /// Directly on the subject of the main triple (a blank root).
    Root,
}

impl AnnotationMode {
    pub(crate) fn read(
        self,
        ctx: &ReadContext<'_>,
        statement: &Statement,
    ) -> (BTreeSet<Annotation>, BTreeSet<Triple>) {
        match self {
            AnnotationMode::Reified => annotation::union(statement.reifications(ctx)),
            AnnotationMode::Root => {
                let direct = annotation::direct(ctx, &statement.triple.subject);
                (direct.annotations, direct.triples)
            }
        }
    }

    pub(crate) fn write(self, writer: &mut GraphWriter<'_>, main: &Triple, axiom: &Axiom) {
        match self {
            AnnotationMode::Reified => writer.annotate(main, &axiom.annotations),
            AnnotationMode::Root => writer.annotate_root(&main.subject, &axiom.annotations),
        }
    }
}

pub(crate) fn unwritable(kind: AxiomKind, reason: impl Into<String>) -> IllegalMutation {
    IllegalMutation::Unwritable {
        kind,
        reason: reason.into(),
    }
}
