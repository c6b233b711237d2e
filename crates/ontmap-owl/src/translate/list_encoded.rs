//! Kinds stored as `subject predicate ( members... )`: property chains,
//! keys and disjoint unions. Empty member lists are rejected both ways
//! unless the kind allows them (`owl:hasKey ()` is a legal key).

use std::collections::BTreeSet;

use ontmap_graph::{Node, Triple};

use super::{unwritable, AnnotationMode, AxiomTranslator, Pattern, Statement};
use crate::error::{IllegalMutation, TranslationError};
use crate::factory::ReadContext;
use crate::model::{Axiom, AxiomBody, AxiomKind, Operand};
use crate::object::ONTObject;
use crate::writer::GraphWriter;

pub type RecognizeFn = fn(&ReadContext<'_>, &Triple) -> bool;
pub type OperandFn = fn(&ReadContext<'_>, &Node) -> Result<ONTObject<Operand>, TranslationError>;
pub type AssembleFn = fn(Operand, Vec<Operand>) -> Option<AxiomBody>;
pub type DisassembleFn = fn(&AxiomBody) -> Option<(Operand, Vec<Operand>)>;

pub struct ListEncodedKind {
    kind: AxiomKind,
    predicate: &'static str,
    recognize: RecognizeFn,
    subject: OperandFn,
    member: OperandFn,
    assemble: AssembleFn,
    disassemble: DisassembleFn,
    allow_empty: bool,
}

impl ListEncodedKind {
    pub fn new(
        kind: AxiomKind,
        predicate: &'static str,
        recognize: RecognizeFn,
        subject: OperandFn,
        member: OperandFn,
        assemble: AssembleFn,
        disassemble: DisassembleFn,
    ) -> Self {
        Self {
            kind,
            predicate,
            recognize,
            subject,
            member,
            assemble,
            disassemble,
            allow_empty: false,
        }
    }

    /// Accept `subject predicate rdf:nil` in both directions.
    pub fn allowing_empty(mut self) -> Self {
        self.allow_empty = true;
        self
    }
}

impl AxiomTranslator for ListEncodedKind {
    fn kind(&self) -> AxiomKind {
        self.kind
    }

    fn candidates(&self, ctx: &ReadContext<'_>) -> Vec<Statement> {
        Pattern::Predicate(self.predicate).statements(ctx)
    }

    fn recognize(&self, ctx: &ReadContext<'_>, statement: &Statement) -> bool {
        (self.recognize)(ctx, &statement.triple)
    }

    fn read(&self, ctx: &ReadContext<'_>, statement: &Statement) -> Result<ONTObject<Axiom>, TranslationError> {
        let triple = &statement.triple;
        let subject = (self.subject)(ctx, &triple.subject)?;
        let list = ctx.list(&triple.object)?;
        if list.is_empty() && !self.allow_empty {
            return Err(TranslationError::unresolved(&triple.object, "non-empty member list"));
        }

        let mut triples: BTreeSet<Triple> = subject.triples().clone();
        triples.extend(list.triples.iter().cloned());
        let mut members = Vec::with_capacity(list.len());
        for m in &list.members {
            let member = (self.member)(ctx, m)?;
            triples.extend(member.triples().iter().cloned());
            members.push(member.value().clone());
        }
        let body = (self.assemble)(subject.value().clone(), members).ok_or_else(|| {
            TranslationError::UnsupportedEncoding {
                kind: self.kind,
                triple: triple.clone(),
            }
        })?;

        let (annotations, annotation_triples) = AnnotationMode::Reified.read(ctx, statement);
        triples.extend(annotation_triples);
        triples.insert(triple.clone());
        Ok(ONTObject::wrap(Axiom { body, annotations }, triples))
    }

    fn write(&self, axiom: &Axiom, writer: &mut GraphWriter<'_>) -> Result<(), IllegalMutation> {
        if axiom.kind() != self.kind {
            return Err(unwritable(self.kind, format!("got a {} axiom", axiom.kind().name())));
        }
        let (subject, members) = (self.disassemble)(&axiom.body)
            .ok_or_else(|| unwritable(self.kind, "body has no member list"))?;
        if members.is_empty() && !self.allow_empty {
            return Err(unwritable(self.kind, "empty member list"));
        }
        let subject = writer
            .operand(&subject)
            .ok_or_else(|| unwritable(self.kind, "subject has no node encoding"))?;
        let nodes = members
            .iter()
            .map(|m| writer.operand(m).ok_or_else(|| unwritable(self.kind, "member has no node encoding")))
            .collect::<Result<Vec<_>, _>>()?;
        let head = writer.list(&nodes, None);
        let main = writer.triple(subject, self.predicate, head);
        writer.annotate(&main, &axiom.annotations);
        Ok(())
    }
}
