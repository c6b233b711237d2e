//! Annotation resolution.
//!
//! Two layouts carry annotations:
//!
//! - reification: a blank node typed `owl:Axiom` (or `owl:Annotation` for
//!   annotations on annotations) with `owl:annotatedSource`,
//!   `owl:annotatedProperty`, `owl:annotatedTarget` pointing at the annotated
//!   triple, plus one `property value` triple per annotation;
//! - direct: `root property value` on a blank root node (grouping nodes,
//!   negative property assertions, rules).
//!
//! Each reification node is reported on its own. A triple may have several
//! (each with part of the annotation set); callers take the union.

use std::collections::BTreeSet;

use ontmap_graph::vocab::{owl, rdf};
use ontmap_graph::{Node, Triple};

use crate::factory::ReadContext;
use crate::model::{Annotation, AnnotationValue, Iri};

/// One annotation carrier and what it contributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reification {
    /// The reification node, or the root itself for direct annotations.
    pub node: Node,
    pub annotations: BTreeSet<Annotation>,
    /// Header triples, annotation triples and nested reifications.
    pub triples: BTreeSet<Triple>,
}

impl Reification {
    pub fn is_empty(&self) -> bool {
        self.annotations.is_empty()
    }
}

const HEADER: [&str; 4] = [
    rdf::TYPE,
    owl::ANNOTATED_SOURCE,
    owl::ANNOTATED_PROPERTY,
    owl::ANNOTATED_TARGET,
];

/// Every reification node of `triple`, in graph order.
pub fn reifications(ctx: &ReadContext<'_>, triple: &Triple) -> Vec<Reification> {
    reifications_at(ctx, triple, 1)
}

fn reifications_at(ctx: &ReadContext<'_>, triple: &Triple, depth: usize) -> Vec<Reification> {
    let graph = ctx.graph();
    let mut out = Vec::new();
    for source in graph.find(None, Some(&Node::iri(owl::ANNOTATED_SOURCE)), Some(&triple.subject)) {
        let node = source.subject.clone();
        if !node.is_blank() {
            continue;
        }
        let property = Triple::with_predicate(node.clone(), owl::ANNOTATED_PROPERTY, triple.predicate.clone());
        let target = Triple::with_predicate(node.clone(), owl::ANNOTATED_TARGET, triple.object.clone());
        if !graph.contains(&property) || !graph.contains(&target) {
            continue;
        }
        let Some(typed) = ctx
            .type_triple(&node, owl::AXIOM)
            .or_else(|| ctx.type_triple(&node, owl::ANNOTATION))
        else {
            continue;
        };

        let mut triples = BTreeSet::from([source, property, target, typed]);
        let annotations = annotations_of(ctx, &node, depth, &mut triples);
        out.push(Reification {
            node,
            annotations,
            triples,
        });
    }
    out
}

/// Annotations written directly on a (blank) root node.
pub fn direct(ctx: &ReadContext<'_>, root: &Node) -> Reification {
    let mut triples = BTreeSet::new();
    let annotations = annotations_of(ctx, root, 1, &mut triples);
    Reification {
        node: root.clone(),
        annotations,
        triples,
    }
}

/// Union of several carriers.
pub fn union(carriers: &[Reification]) -> (BTreeSet<Annotation>, BTreeSet<Triple>) {
    let mut annotations = BTreeSet::new();
    let mut triples = BTreeSet::new();
    for c in carriers {
        annotations.extend(c.annotations.iter().cloned());
        triples.extend(c.triples.iter().cloned());
    }
    (annotations, triples)
}

fn annotations_of(
    ctx: &ReadContext<'_>,
    node: &Node,
    depth: usize,
    triples: &mut BTreeSet<Triple>,
) -> BTreeSet<Annotation> {
    let mut annotations = BTreeSet::new();
    for t in ctx.graph().find(Some(node), None, None) {
        if HEADER.iter().any(|p| t.predicate_is(p)) || !ctx.is_annotation_property(&t.predicate) {
            continue;
        }
        let Some(property) = t.predicate.as_iri().map(Iri::new) else {
            continue;
        };

        let mut nested = BTreeSet::new();
        if depth < ctx.config().max_expression_depth {
            for r in reifications_at(ctx, &t, depth + 1) {
                nested.extend(r.annotations);
                triples.extend(r.triples);
            }
        } else {
            tracing::warn!(%node, depth, "nested annotation cutoff reached");
        }

        annotations.insert(Annotation {
            property,
            value: AnnotationValue::from_node(&t.object),
            annotations: nested,
        });
        triples.insert(t);
    }
    annotations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::InternalConfig;
    use crate::factory::NodeCache;
    use ontmap_graph::vocab::rdfs;
    use ontmap_graph::{Literal, MemGraph, TripleGraph};

    fn iri(s: &str) -> Node {
        Node::iri(format!("urn:{s}"))
    }

    fn reify(g: &mut MemGraph, node: &str, ty: &str, base: &Triple) -> Node {
        let r = Node::blank(node);
        g.add(Triple::with_predicate(r.clone(), rdf::TYPE, Node::iri(ty)));
        g.add(Triple::with_predicate(r.clone(), owl::ANNOTATED_SOURCE, base.subject.clone()));
        g.add(Triple::with_predicate(r.clone(), owl::ANNOTATED_PROPERTY, base.predicate.clone()));
        g.add(Triple::with_predicate(r.clone(), owl::ANNOTATED_TARGET, base.object.clone()));
        r
    }

    #[test]
    fn split_reifications_are_reported_separately() {
        let mut g = MemGraph::new();
        let base = Triple::with_predicate(iri("A"), rdfs::SUB_CLASS_OF, iri("B"));
        g.add(base.clone());
        let r1 = reify(&mut g, "r1", owl::AXIOM, &base);
        g.add(Triple::with_predicate(r1, rdfs::COMMENT, Node::Literal(Literal::plain("one"))));
        let r2 = reify(&mut g, "r2", owl::AXIOM, &base);
        g.add(Triple::with_predicate(r2, rdfs::LABEL, Node::Literal(Literal::plain("two"))));

        let cfg = InternalConfig::default();
        let cache = NodeCache::new();
        let ctx = ReadContext::new(&g, &cfg, &cache);
        let found = reifications(&ctx, &base);
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].annotations.len(), 1);
        assert_eq!(found[0].triples.len(), 5);

        let (all, triples) = union(&found);
        assert_eq!(all.len(), 2);
        assert_eq!(triples.len(), 10);
    }

    #[test]
    fn nested_annotations_are_resolved() {
        let mut g = MemGraph::new();
        let base = Triple::with_predicate(iri("A"), rdfs::SUB_CLASS_OF, iri("B"));
        g.add(base.clone());
        let r = reify(&mut g, "r", owl::AXIOM, &base);
        let ann = Triple::with_predicate(r, rdfs::COMMENT, Node::Literal(Literal::plain("outer")));
        g.add(ann.clone());
        let n = reify(&mut g, "n", owl::ANNOTATION, &ann);
        g.add(Triple::with_predicate(n, rdfs::LABEL, Node::Literal(Literal::plain("inner"))));

        let cfg = InternalConfig::default();
        let cache = NodeCache::new();
        let ctx = ReadContext::new(&g, &cfg, &cache);
        let found = reifications(&ctx, &base);
        assert_eq!(found.len(), 1);
        let outer = found[0].annotations.iter().next().expect("one annotation");
        assert_eq!(outer.value, AnnotationValue::Literal(Literal::plain("outer")));
        assert_eq!(outer.annotations.len(), 1);
        assert_eq!(found[0].triples.len(), 10);
    }

    #[test]
    fn direct_annotations_skip_structural_predicates() {
        let mut g = MemGraph::new();
        let root = Node::blank("root");
        g.add(Triple::with_predicate(root.clone(), rdf::TYPE, Node::iri(owl::ALL_DISJOINT_CLASSES)));
        g.add(Triple::with_predicate(root.clone(), owl::MEMBERS, Node::iri(rdf::NIL)));
        g.add(Triple::with_predicate(root.clone(), rdfs::COMMENT, Node::Literal(Literal::plain("c"))));

        let cfg = InternalConfig::default();
        let cache = NodeCache::new();
        let ctx = ReadContext::new(&g, &cfg, &cache);
        let carrier = direct(&ctx, &root);
        assert_eq!(carrier.annotations.len(), 1);
        assert_eq!(carrier.triples.len(), 1);
    }
}
