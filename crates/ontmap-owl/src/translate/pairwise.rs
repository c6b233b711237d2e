//! N-ary kinds stored pairwise.
//!
//! Equivalence kinds (`EquivalentClasses`, `EquivalentObjectProperties`,
//! `EquivalentDataProperties`, `SameIndividual`) are written as all
//! `C(k,2)` member pairs and read back as connected components of the
//! binary triples, one component set per distinct annotation set.
//!
//! Disjointness kinds read every binary triple as a binary axiom (pairwise
//! disjointness of a subset does not imply an n-ary axiom) and grouping
//! nodes (`owl:AllDisjointClasses`, `owl:AllDisjointProperties`,
//! `owl:AllDifferent`) as one n-ary axiom. They are written as one triple
//! for two members and as a grouping node for more.

use std::collections::BTreeSet;

use ahash::AHashMap;
use ontmap_graph::vocab::rdf;
use ontmap_graph::{Node, Triple};

use super::{unwritable, AnnotationMode, AxiomTranslator, Pattern, Statement, Translated};
use crate::error::{IllegalMutation, TranslationError};
use crate::factory::ReadContext;
use crate::model::{Annotation, Axiom, AxiomBody, AxiomKind, Operand};
use crate::object::ONTObject;
use crate::writer::GraphWriter;

pub type AcceptsFn = fn(&ReadContext<'_>, &Node) -> bool;
pub type MemberFn = fn(&ReadContext<'_>, &Node) -> Result<ONTObject<Operand>, TranslationError>;
pub type BuildFn = fn(Vec<Operand>) -> Option<AxiomBody>;
/// Members of a body in writing order (named first).
pub type MembersFn = fn(&AxiomBody) -> Option<Vec<Operand>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Closure {
    Equivalence,
    Disjointness,
}

/// `root rdf:type ty ; <predicate> ( members )`. The first predicate is the
/// one written.
#[derive(Debug, Clone, Copy)]
pub struct Grouping {
    pub ty: &'static str,
    pub predicates: &'static [&'static str],
}

pub struct PairwiseEncodedKind {
    kind: AxiomKind,
    predicate: &'static str,
    closure: Closure,
    grouping: Option<Grouping>,
    accepts: AcceptsFn,
    member: MemberFn,
    build: BuildFn,
    members: MembersFn,
}

impl PairwiseEncodedKind {
    pub fn equivalence(
        kind: AxiomKind,
        predicate: &'static str,
        accepts: AcceptsFn,
        member: MemberFn,
        build: BuildFn,
        members: MembersFn,
    ) -> Self {
        Self {
            kind,
            predicate,
            closure: Closure::Equivalence,
            grouping: None,
            accepts,
            member,
            build,
            members,
        }
    }

    pub fn disjointness(
        kind: AxiomKind,
        predicate: &'static str,
        grouping: Grouping,
        accepts: AcceptsFn,
        member: MemberFn,
        build: BuildFn,
        members: MembersFn,
    ) -> Self {
        Self {
            kind,
            predicate,
            closure: Closure::Disjointness,
            grouping: Some(grouping),
            accepts,
            member,
            build,
            members,
        }
    }

    fn is_binary(&self, statement: &Statement) -> bool {
        statement.triple.predicate_is(self.predicate)
    }

    fn build(&self, members: Vec<Operand>, triple: &Triple) -> Result<AxiomBody, TranslationError> {
        (self.build)(members).ok_or_else(|| TranslationError::UnsupportedEncoding {
            kind: self.kind,
            triple: triple.clone(),
        })
    }

    /// The `members` link of a grouping root.
    fn member_link(&self, ctx: &ReadContext<'_>, root: &Node) -> Result<Triple, TranslationError> {
        let predicates = self.grouping.map(|g| g.predicates).unwrap_or_default();
        let mut links = predicates
            .iter()
            .flat_map(|p| ctx.triples_with(root, p))
            .collect::<Vec<_>>();
        if links.len() != 1 {
            return Err(TranslationError::unresolved(root, "grouping node with one member list"));
        }
        links
            .pop()
            .ok_or_else(|| TranslationError::unresolved(root, "grouping node with one member list"))
    }

    fn read_edge(&self, ctx: &ReadContext<'_>, statement: &Statement) -> Result<Edge, TranslationError> {
        let a = (self.member)(ctx, &statement.triple.subject)?;
        let b = (self.member)(ctx, &statement.triple.object)?;
        let (annotations, annotation_triples) = AnnotationMode::Reified.read(ctx, statement);
        let mut triples = annotation_triples;
        triples.insert(statement.triple.clone());
        triples.extend(a.triples().iter().cloned());
        triples.extend(b.triples().iter().cloned());
        Ok(Edge {
            a: a.value().clone(),
            b: b.value().clone(),
            annotations,
            triples,
        })
    }

    fn read_grouping(&self, ctx: &ReadContext<'_>, statement: &Statement) -> Result<ONTObject<Axiom>, TranslationError> {
        let root = &statement.triple.subject;
        let link = self.member_link(ctx, root)?;
        let list = ctx.list(&link.object)?;
        let mut triples: BTreeSet<Triple> = list.triples.iter().cloned().collect();
        let mut members = Vec::with_capacity(list.len());
        for m in &list.members {
            let member = (self.member)(ctx, m)?;
            triples.extend(member.triples().iter().cloned());
            members.push(member.value().clone());
        }
        let body = self.build(members, &statement.triple)?;
        let (annotations, annotation_triples) = AnnotationMode::Root.read(ctx, statement);
        triples.extend(annotation_triples);
        triples.insert(statement.triple.clone());
        triples.insert(link);
        Ok(ONTObject::wrap(Axiom { body, annotations }, triples))
    }
}

struct Edge {
    a: Operand,
    b: Operand,
    annotations: BTreeSet<Annotation>,
    triples: BTreeSet<Triple>,
}

/// Union-find over operands, in order of first appearance.
#[derive(Default)]
struct Components {
    index: AHashMap<Operand, usize>,
    members: Vec<Operand>,
    parent: Vec<usize>,
    triples: Vec<BTreeSet<Triple>>,
}

impl Components {
    fn slot(&mut self, operand: Operand) -> usize {
        if let Some(&i) = self.index.get(&operand) {
            return i;
        }
        let i = self.members.len();
        self.index.insert(operand.clone(), i);
        self.members.push(operand);
        self.parent.push(i);
        self.triples.push(BTreeSet::new());
        i
    }

    fn find(&mut self, mut i: usize) -> usize {
        while self.parent[i] != i {
            self.parent[i] = self.parent[self.parent[i]];
            i = self.parent[i];
        }
        i
    }

    fn add(&mut self, edge: Edge) {
        let a = self.slot(edge.a);
        let b = self.slot(edge.b);
        let (ra, rb) = (self.find(a), self.find(b));
        let (keep, drop) = if ra <= rb { (ra, rb) } else { (rb, ra) };
        if keep != drop {
            self.parent[drop] = keep;
            let moved = std::mem::take(&mut self.triples[drop]);
            self.triples[keep].extend(moved);
        }
        self.triples[keep].extend(edge.triples);
    }

    /// `(members, triples)` per component, ordered by first member.
    fn into_sets(mut self) -> Vec<(Vec<Operand>, BTreeSet<Triple>)> {
        let mut by_root: Vec<Option<usize>> = vec![None; self.members.len()];
        let mut out: Vec<(Vec<Operand>, BTreeSet<Triple>)> = Vec::new();
        for i in 0..self.members.len() {
            let root = self.find(i);
            let slot = match by_root[root] {
                Some(slot) => slot,
                None => {
                    let triples = std::mem::take(&mut self.triples[root]);
                    out.push((Vec::new(), triples));
                    by_root[root] = Some(out.len() - 1);
                    out.len() - 1
                }
            };
            out[slot].0.push(self.members[i].clone());
        }
        out
    }
}

impl AxiomTranslator for PairwiseEncodedKind {
    fn kind(&self) -> AxiomKind {
        self.kind
    }

    fn candidates(&self, ctx: &ReadContext<'_>) -> Vec<Statement> {
        let mut out = Pattern::Predicate(self.predicate).statements(ctx);
        if let Some(g) = self.grouping {
            out.extend(Pattern::Type(g.ty).statements(ctx));
        }
        out
    }

    fn recognize(&self, ctx: &ReadContext<'_>, statement: &Statement) -> bool {
        if self.is_binary(statement) {
            return (self.accepts)(ctx, &statement.triple.subject) && (self.accepts)(ctx, &statement.triple.object);
        }
        let Some(g) = self.grouping else {
            return false;
        };
        if !statement.triple.predicate_is(rdf::TYPE) || !statement.triple.object.is(g.ty) {
            return false;
        }
        // A broken member list is reported by every kind sharing the type.
        let Ok(link) = self.member_link(ctx, &statement.triple.subject) else {
            return true;
        };
        match ctx.list(&link.object) {
            Ok(list) => list.members.first().is_some_and(|m| (self.accepts)(ctx, m)),
            Err(_) => true,
        }
    }

    fn read(&self, ctx: &ReadContext<'_>, statement: &Statement) -> Result<ONTObject<Axiom>, TranslationError> {
        if !self.is_binary(statement) {
            return self.read_grouping(ctx, statement);
        }
        let edge = self.read_edge(ctx, statement)?;
        let body = self.build(vec![edge.a, edge.b], &statement.triple)?;
        Ok(ONTObject::wrap(
            Axiom {
                body,
                annotations: edge.annotations,
            },
            edge.triples,
        ))
    }

    fn read_all(&self, ctx: &ReadContext<'_>) -> Translated {
        let mut out = Translated::default();
        let mut groups: Vec<(BTreeSet<Annotation>, Components)> = Vec::new();
        let mut group_of: AHashMap<BTreeSet<Annotation>, usize> = AHashMap::new();

        for statement in self.candidates(ctx) {
            if !self.recognize(ctx, &statement) {
                continue;
            }
            if self.closure == Closure::Disjointness || !self.is_binary(&statement) {
                out.record(self.kind, &statement, self.read(ctx, &statement));
                continue;
            }
            match self.read_edge(ctx, &statement) {
                Ok(edge) => {
                    let slot = match group_of.get(&edge.annotations) {
                        Some(&slot) => slot,
                        None => {
                            groups.push((edge.annotations.clone(), Components::default()));
                            group_of.insert(edge.annotations.clone(), groups.len() - 1);
                            groups.len() - 1
                        }
                    };
                    groups[slot].1.add(edge);
                }
                Err(error) => out.record(self.kind, &statement, Err(error)),
            }
        }

        for (annotations, components) in groups {
            for (members, triples) in components.into_sets() {
                match (self.build)(members) {
                    Some(body) => out.objects.push(ONTObject::wrap(
                        Axiom {
                            body,
                            annotations: annotations.clone(),
                        },
                        triples,
                    )),
                    None => tracing::warn!(kind = self.kind.name(), "component has mixed member types"),
                }
            }
        }
        out
    }

    fn write(&self, axiom: &Axiom, writer: &mut GraphWriter<'_>) -> Result<(), IllegalMutation> {
        if axiom.kind() != self.kind {
            return Err(unwritable(self.kind, format!("got a {} axiom", axiom.kind().name())));
        }
        let members = (self.members)(&axiom.body)
            .ok_or_else(|| unwritable(self.kind, "body has no member set"))?;
        if members.len() < 2 {
            tracing::warn!(kind = self.kind.name(), members = members.len(), "n-ary axiom with fewer than two members, nothing written");
            return Ok(());
        }
        let nodes = members
            .iter()
            .map(|m| writer.operand(m).ok_or_else(|| unwritable(self.kind, "member has no node encoding")))
            .collect::<Result<Vec<_>, _>>()?;

        match self.grouping {
            Some(g) if self.closure == Closure::Disjointness && nodes.len() > 2 => {
                let root = writer.blank();
                writer.triple(root.clone(), rdf::TYPE, Node::iri(g.ty));
                let head = writer.list(&nodes, None);
                let predicate = g.predicates.first().copied().unwrap_or(self.predicate);
                writer.triple(root.clone(), predicate, head);
                writer.annotate_root(&root, &axiom.annotations);
            }
            _ => {
                for i in 0..nodes.len() {
                    for j in (i + 1)..nodes.len() {
                        let t = writer.triple(nodes[i].clone(), self.predicate, nodes[j].clone());
                        writer.annotate(&t, &axiom.annotations);
                    }
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ClassExpr;

    fn class(s: &str) -> Operand {
        Operand::Class(ClassExpr::class(format!("urn:{s}")))
    }

    fn edge(a: &str, b: &str) -> Edge {
        Edge {
            a: class(a),
            b: class(b),
            annotations: BTreeSet::new(),
            triples: BTreeSet::from([Triple::with_predicate(
                Node::iri(format!("urn:{a}")),
                "urn:eq",
                Node::iri(format!("urn:{b}")),
            )]),
        }
    }

    #[test]
    fn components_follow_connectivity() {
        let mut c = Components::default();
        c.add(edge("a", "b"));
        c.add(edge("x", "y"));
        c.add(edge("c", "b"));
        let sets = c.into_sets();
        assert_eq!(sets.len(), 2);
        assert_eq!(sets[0].0, vec![class("a"), class("b"), class("c")]);
        assert_eq!(sets[0].1.len(), 2);
        assert_eq!(sets[1].0, vec![class("x"), class("y")]);
    }

    #[test]
    fn joining_components_moves_their_triples() {
        let mut c = Components::default();
        c.add(edge("a", "b"));
        c.add(edge("c", "d"));
        c.add(edge("d", "a"));
        let sets = c.into_sets();
        assert_eq!(sets.len(), 1);
        assert_eq!(sets[0].0.len(), 4);
        assert_eq!(sets[0].1.len(), 3);
    }
}
