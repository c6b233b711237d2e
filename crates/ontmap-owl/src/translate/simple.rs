//! Kinds with one main triple per axiom.

use std::collections::BTreeSet;

use ontmap_graph::Triple;

use super::{unwritable, AnnotationMode, AxiomTranslator, Pattern, Statement};
use crate::error::{IllegalMutation, TranslationError};
use crate::factory::ReadContext;
use crate::model::{Axiom, AxiomBody, AxiomKind};
use crate::object::ONTObject;
use crate::writer::GraphWriter;

/// A decoded body plus the operand triples behind it (the main triple and
/// annotations are added by the translator).
#[derive(Debug, Clone)]
pub struct Decoded {
    pub body: AxiomBody,
    pub triples: BTreeSet<Triple>,
}

impl Decoded {
    pub fn new(body: AxiomBody) -> Self {
        Self {
            body,
            triples: BTreeSet::new(),
        }
    }

    pub fn backed_by<T>(mut self, object: &ONTObject<T>) -> Self {
        self.triples.extend(object.triples().iter().cloned());
        self
    }

    pub fn with_triples(mut self, triples: impl IntoIterator<Item = Triple>) -> Self {
        self.triples.extend(triples);
        self
    }
}

pub type RecognizeFn = fn(&ReadContext<'_>, &Triple) -> bool;
pub type ReadFn = fn(&ReadContext<'_>, &Triple, AxiomKind) -> Result<Decoded, TranslationError>;
/// Emits the body and returns its main triple, or a reason it cannot.
pub type WriteFn = fn(&AxiomBody, &mut GraphWriter<'_>) -> Result<Triple, String>;

pub struct SimpleKind {
    kind: AxiomKind,
    pattern: Pattern,
    annotations: AnnotationMode,
    recognize: RecognizeFn,
    read: ReadFn,
    write: WriteFn,
}

impl SimpleKind {
    pub fn new(
        kind: AxiomKind,
        pattern: Pattern,
        recognize: RecognizeFn,
        read: ReadFn,
        write: WriteFn,
    ) -> Self {
        Self {
            kind,
            pattern,
            annotations: AnnotationMode::Reified,
            recognize,
            read,
            write,
        }
    }

    /// Annotations sit directly on the subject node of the main triple.
    pub fn rooted(mut self) -> Self {
        self.annotations = AnnotationMode::Root;
        self
    }
}

impl AxiomTranslator for SimpleKind {
    fn kind(&self) -> AxiomKind {
        self.kind
    }

    fn candidates(&self, ctx: &ReadContext<'_>) -> Vec<Statement> {
        self.pattern.statements(ctx)
    }

    fn recognize(&self, ctx: &ReadContext<'_>, statement: &Statement) -> bool {
        (self.recognize)(ctx, &statement.triple)
    }

    fn read(&self, ctx: &ReadContext<'_>, statement: &Statement) -> Result<ONTObject<Axiom>, TranslationError> {
        let decoded = (self.read)(ctx, &statement.triple, self.kind)?;
        if decoded.body.kind() != self.kind {
            return Err(TranslationError::UnsupportedEncoding {
                kind: self.kind,
                triple: statement.triple.clone(),
            });
        }
        let (annotations, annotation_triples) = self.annotations.read(ctx, statement);
        let mut triples = decoded.triples;
        triples.insert(statement.triple.clone());
        triples.extend(annotation_triples);
        Ok(ONTObject::wrap(
            Axiom {
                body: decoded.body,
                annotations,
            },
            triples,
        ))
    }

    fn write(&self, axiom: &Axiom, writer: &mut GraphWriter<'_>) -> Result<(), IllegalMutation> {
        if axiom.kind() != self.kind {
            return Err(unwritable(self.kind, format!("got a {} axiom", axiom.kind().name())));
        }
        let main = (self.write)(&axiom.body, writer).map_err(|reason| unwritable(self.kind, reason))?;
        self.annotations.write(writer, &main, axiom);
        Ok(())
    }
}
