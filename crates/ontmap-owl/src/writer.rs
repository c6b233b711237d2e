//! Emitting typed values as triples.
//!
//! `GraphWriter` is the inverse of the node resolver: it declares every
//! non-built-in entity it mentions, builds anonymous expressions on fresh
//! blank nodes, and records every triple it emits. Within one writer an
//! anonymous expression that occurs twice is built once.

use std::collections::BTreeSet;

use ahash::{AHashMap, AHashSet};
use ontmap_graph::vocab::{self, owl, rdf, rdfs, swrl};
use ontmap_graph::{Literal, Node, Triple, TripleGraph};

use crate::list;
use crate::model::{
    Annotation, Atom, ClassExpr, DArg, DataRange, Entity, EntityKind, IArg, Individual, Iri,
    ObjectPropertyExpr, Operand,
};

pub struct GraphWriter<'g> {
    graph: &'g mut dyn TripleGraph,
    written: Vec<Triple>,
    /// Emitted triples that were not in the graph before.
    fresh: usize,
    added: Vec<Triple>,
    declared: AHashSet<Entity>,
    classes: AHashMap<ClassExpr, Node>,
    ranges: AHashMap<DataRange, Node>,
    inverses: AHashMap<Iri, Node>,
    variables: AHashSet<Iri>,
}

impl<'g> GraphWriter<'g> {
    pub fn new(graph: &'g mut dyn TripleGraph) -> Self {
        Self {
            graph,
            written: Vec::new(),
            fresh: 0,
            added: Vec::new(),
            declared: AHashSet::new(),
            classes: AHashMap::new(),
            ranges: AHashMap::new(),
            inverses: AHashMap::new(),
            variables: AHashSet::new(),
        }
    }

    /// Every triple emitted so far, in emission order.
    pub fn written(&self) -> &[Triple] {
        &self.written
    }

    pub fn into_written(self) -> Vec<Triple> {
        self.written
    }

    /// Number of emitted triples that were new to the graph.
    pub fn fresh(&self) -> usize {
        self.fresh
    }

    /// Remove every triple this writer added.
    pub fn rollback(mut self) {
        for t in self.added.iter().rev() {
            self.graph.remove(t);
        }
    }

    pub fn blank(&mut self) -> Node {
        self.graph.create_blank()
    }

    pub fn triple(&mut self, subject: Node, predicate: &str, object: Node) -> Triple {
        let t = Triple::with_predicate(subject, predicate, object);
        if self.graph.add(t.clone()) {
            self.fresh += 1;
            self.added.push(t.clone());
        }
        self.written.push(t.clone());
        t
    }

    pub fn list(&mut self, members: &[Node], cell_type: Option<&str>) -> Node {
        let start = self.written.len();
        let head = list::encode(&mut *self.graph, members, cell_type, &mut self.written);
        // list cells are fresh blank nodes
        let cells = &self.written[start..];
        self.fresh += cells.len();
        self.added.extend(cells.iter().cloned());
        head
    }

    // ------------------------------------------------------------------------
    // Entities
    // ------------------------------------------------------------------------

    /// Declare `iri` as `kind` unless it is built-in or already declared here.
    pub fn declare(&mut self, kind: EntityKind, iri: &Iri) -> Node {
        let node = iri.to_node();
        let builtin = match kind {
            EntityKind::Class => vocab::is_builtin_class(iri.as_str()),
            EntityKind::Datatype => vocab::is_builtin_datatype(iri.as_str()),
            EntityKind::ObjectProperty => vocab::is_builtin_object_property(iri.as_str()),
            EntityKind::DataProperty => vocab::is_builtin_data_property(iri.as_str()),
            EntityKind::AnnotationProperty => vocab::is_builtin_annotation_property(iri.as_str()),
            EntityKind::NamedIndividual => false,
        };
        if !builtin && self.declared.insert(Entity::new(kind, iri.clone())) {
            self.triple(node.clone(), rdf::TYPE, Node::iri(kind.type_iri()));
        }
        node
    }

    pub fn data_property(&mut self, iri: &Iri) -> Node {
        self.declare(EntityKind::DataProperty, iri)
    }

    pub fn annotation_property(&mut self, iri: &Iri) -> Node {
        self.declare(EntityKind::AnnotationProperty, iri)
    }

    pub fn object_property(&mut self, property: &ObjectPropertyExpr) -> Node {
        match property {
            ObjectPropertyExpr::Named(iri) => self.declare(EntityKind::ObjectProperty, iri),
            ObjectPropertyExpr::Inverse(iri) => {
                if let Some(node) = self.inverses.get(iri) {
                    return node.clone();
                }
                let named = self.declare(EntityKind::ObjectProperty, iri);
                let node = self.blank();
                self.triple(node.clone(), owl::INVERSE_OF, named);
                self.inverses.insert(iri.clone(), node.clone());
                node
            }
        }
    }

    pub fn individual(&mut self, individual: &Individual) -> Node {
        match individual {
            Individual::Named(iri) => self.declare(EntityKind::NamedIndividual, iri),
            Individual::Anonymous(label) => Node::blank(label.clone()),
        }
    }

    pub fn literal(&self, literal: &Literal) -> Node {
        Node::Literal(literal.clone())
    }

    // ------------------------------------------------------------------------
    // Class expressions
    // ------------------------------------------------------------------------

    pub fn class(&mut self, expr: &ClassExpr) -> Node {
        if let ClassExpr::Class(iri) = expr {
            return self.declare(EntityKind::Class, iri);
        }
        if let Some(node) = self.classes.get(expr) {
            return node.clone();
        }
        let node = self.blank();
        self.build_class(&node, expr);
        self.classes.insert(expr.clone(), node.clone());
        node
    }

    fn build_class(&mut self, node: &Node, expr: &ClassExpr) {
        let is_restriction = !matches!(
            expr,
            ClassExpr::Class(_)
                | ClassExpr::IntersectionOf(_)
                | ClassExpr::UnionOf(_)
                | ClassExpr::ComplementOf(_)
                | ClassExpr::OneOf(_)
        );
        let ty = if is_restriction { owl::RESTRICTION } else { owl::CLASS };
        self.triple(node.clone(), rdf::TYPE, Node::iri(ty));

        match expr {
            ClassExpr::Class(_) => {}
            ClassExpr::IntersectionOf(members) | ClassExpr::UnionOf(members) => {
                let predicate = if matches!(expr, ClassExpr::IntersectionOf(_)) {
                    owl::INTERSECTION_OF
                } else {
                    owl::UNION_OF
                };
                let nodes: Vec<Node> = members.iter().map(|m| self.class(m)).collect();
                let head = self.list(&nodes, None);
                self.triple(node.clone(), predicate, head);
            }
            ClassExpr::ComplementOf(operand) => {
                let o = self.class(operand);
                self.triple(node.clone(), owl::COMPLEMENT_OF, o);
            }
            ClassExpr::OneOf(members) => {
                let nodes: Vec<Node> = members.iter().map(|m| self.individual(m)).collect();
                let head = self.list(&nodes, None);
                self.triple(node.clone(), owl::ONE_OF, head);
            }
            ClassExpr::ObjectSomeValuesFrom { property, filler }
            | ClassExpr::ObjectAllValuesFrom { property, filler } => {
                let predicate = if matches!(expr, ClassExpr::ObjectSomeValuesFrom { .. }) {
                    owl::SOME_VALUES_FROM
                } else {
                    owl::ALL_VALUES_FROM
                };
                self.on_object_property(node, property);
                let f = self.class(filler);
                self.triple(node.clone(), predicate, f);
            }
            ClassExpr::ObjectHasValue { property, value } => {
                self.on_object_property(node, property);
                let v = self.individual(value);
                self.triple(node.clone(), owl::HAS_VALUE, v);
            }
            ClassExpr::ObjectHasSelf(property) => {
                self.on_object_property(node, property);
                self.triple(node.clone(), owl::HAS_SELF, Node::Literal(Literal::boolean(true)));
            }
            ClassExpr::ObjectMinCardinality {
                cardinality,
                property,
                filler,
            }
            | ClassExpr::ObjectMaxCardinality {
                cardinality,
                property,
                filler,
            }
            | ClassExpr::ObjectExactCardinality {
                cardinality,
                property,
                filler,
            } => {
                self.on_object_property(node, property);
                let predicate = cardinality_predicate(expr, filler.is_some());
                self.triple(
                    node.clone(),
                    predicate,
                    Node::Literal(Literal::non_negative_integer(*cardinality)),
                );
                if let Some(filler) = filler {
                    let f = self.class(filler);
                    self.triple(node.clone(), owl::ON_CLASS, f);
                }
            }
            ClassExpr::DataSomeValuesFrom { property, range }
            | ClassExpr::DataAllValuesFrom { property, range } => {
                let predicate = if matches!(expr, ClassExpr::DataSomeValuesFrom { .. }) {
                    owl::SOME_VALUES_FROM
                } else {
                    owl::ALL_VALUES_FROM
                };
                let p = self.data_property(property);
                self.triple(node.clone(), owl::ON_PROPERTY, p);
                let r = self.data_range(range);
                self.triple(node.clone(), predicate, r);
            }
            ClassExpr::DataHasValue { property, value } => {
                let p = self.data_property(property);
                self.triple(node.clone(), owl::ON_PROPERTY, p);
                self.triple(node.clone(), owl::HAS_VALUE, Node::Literal(value.clone()));
            }
            ClassExpr::DataMinCardinality {
                cardinality,
                property,
                range,
            }
            | ClassExpr::DataMaxCardinality {
                cardinality,
                property,
                range,
            }
            | ClassExpr::DataExactCardinality {
                cardinality,
                property,
                range,
            } => {
                let p = self.data_property(property);
                self.triple(node.clone(), owl::ON_PROPERTY, p);
                let predicate = cardinality_predicate(expr, range.is_some());
                self.triple(
                    node.clone(),
                    predicate,
                    Node::Literal(Literal::non_negative_integer(*cardinality)),
                );
                if let Some(range) = range {
                    let r = self.data_range(range);
                    self.triple(node.clone(), owl::ON_DATA_RANGE, r);
                }
            }
        }
    }

    fn on_object_property(&mut self, node: &Node, property: &ObjectPropertyExpr) {
        let p = self.object_property(property);
        self.triple(node.clone(), owl::ON_PROPERTY, p);
    }

    // ------------------------------------------------------------------------
    // Data ranges
    // ------------------------------------------------------------------------

    pub fn data_range(&mut self, range: &DataRange) -> Node {
        if let DataRange::Datatype(iri) = range {
            return self.declare(EntityKind::Datatype, iri);
        }
        if let Some(node) = self.ranges.get(range) {
            return node.clone();
        }
        let node = self.blank();
        self.triple(node.clone(), rdf::TYPE, Node::iri(rdfs::DATATYPE));
        match range {
            DataRange::Datatype(_) => {}
            DataRange::IntersectionOf(members) | DataRange::UnionOf(members) => {
                let predicate = if matches!(range, DataRange::IntersectionOf(_)) {
                    owl::INTERSECTION_OF
                } else {
                    owl::UNION_OF
                };
                let nodes: Vec<Node> = members.iter().map(|m| self.data_range(m)).collect();
                let head = self.list(&nodes, None);
                self.triple(node.clone(), predicate, head);
            }
            DataRange::ComplementOf(operand) => {
                let o = self.data_range(operand);
                self.triple(node.clone(), owl::DATATYPE_COMPLEMENT_OF, o);
            }
            DataRange::OneOf(literals) => {
                let nodes: Vec<Node> = literals.iter().map(|l| Node::Literal(l.clone())).collect();
                let head = self.list(&nodes, None);
                self.triple(node.clone(), owl::ONE_OF, head);
            }
            DataRange::Restriction { datatype, facets } => {
                let dt = self.declare(EntityKind::Datatype, datatype);
                self.triple(node.clone(), owl::ON_DATATYPE, dt);
                let mut facet_nodes = Vec::with_capacity(facets.len());
                for f in facets {
                    let facet_node = self.blank();
                    self.triple(facet_node.clone(), f.facet.as_str(), Node::Literal(f.value.clone()));
                    facet_nodes.push(facet_node);
                }
                let head = self.list(&facet_nodes, None);
                self.triple(node.clone(), owl::WITH_RESTRICTIONS, head);
            }
        }
        self.ranges.insert(range.clone(), node.clone());
        node
    }

    // ------------------------------------------------------------------------
    // Operands
    // ------------------------------------------------------------------------

    /// Node for a single operand; `None` for composite operands (sets, lists,
    /// atoms) that have no standalone encoding.
    pub fn operand(&mut self, operand: &Operand) -> Option<Node> {
        let node = match operand {
            Operand::Entity(e) => self.declare(e.kind, &e.iri),
            Operand::Class(c) => self.class(c),
            Operand::ObjectProperty(p) => self.object_property(p),
            Operand::DataProperty(p) => self.data_property(p),
            Operand::AnnotationProperty(p) => self.annotation_property(p),
            Operand::DataRange(r) => self.data_range(r),
            Operand::Individual(i) => self.individual(i),
            Operand::Literal(l) => self.literal(l),
            Operand::Iri(iri) => iri.to_node(),
            Operand::AnnotationSubject(s) => s.to_node(),
            Operand::AnnotationValue(v) => v.to_node(),
            Operand::Atom(_) | Operand::Set(_) | Operand::List(_) => return None,
        };
        Some(node)
    }

    // ------------------------------------------------------------------------
    // Annotations
    // ------------------------------------------------------------------------

    /// Reify `triple` once carrying all `annotations` (nothing when empty).
    pub fn annotate(&mut self, triple: &Triple, annotations: &BTreeSet<Annotation>) {
        if !annotations.is_empty() {
            self.reify(triple, owl::AXIOM, annotations);
        }
    }

    /// Annotations directly on a root node.
    pub fn annotate_root(&mut self, root: &Node, annotations: &BTreeSet<Annotation>) {
        for a in annotations {
            self.annotation_triple(root, a);
        }
    }

    fn reify(&mut self, triple: &Triple, ty: &str, annotations: &BTreeSet<Annotation>) {
        let r = self.blank();
        self.triple(r.clone(), rdf::TYPE, Node::iri(ty));
        self.triple(r.clone(), owl::ANNOTATED_SOURCE, triple.subject.clone());
        self.triple(r.clone(), owl::ANNOTATED_PROPERTY, triple.predicate.clone());
        self.triple(r.clone(), owl::ANNOTATED_TARGET, triple.object.clone());
        for a in annotations {
            self.annotation_triple(&r, a);
        }
    }

    fn annotation_triple(&mut self, subject: &Node, annotation: &Annotation) {
        self.annotation_property(&annotation.property);
        let t = self.triple(
            subject.clone(),
            annotation.property.as_str(),
            annotation.value.to_node(),
        );
        if !annotation.annotations.is_empty() {
            self.reify(&t, owl::ANNOTATION, &annotation.annotations);
        }
    }

    // ------------------------------------------------------------------------
    // SWRL
    // ------------------------------------------------------------------------

    fn variable(&mut self, iri: &Iri) -> Node {
        let node = iri.to_node();
        if self.variables.insert(iri.clone()) {
            self.triple(node.clone(), rdf::TYPE, Node::iri(swrl::VARIABLE));
        }
        node
    }

    pub fn iarg(&mut self, arg: &IArg) -> Node {
        match arg {
            IArg::Variable(v) => self.variable(v),
            IArg::Individual(i) => self.individual(i),
        }
    }

    pub fn darg(&mut self, arg: &DArg) -> Node {
        match arg {
            DArg::Variable(v) => self.variable(v),
            DArg::Literal(l) => self.literal(l),
        }
    }

    pub fn atom(&mut self, atom: &Atom) -> Node {
        let node = self.blank();
        let ty = match atom {
            Atom::Class { .. } => swrl::CLASS_ATOM,
            Atom::DataRange { .. } => swrl::DATA_RANGE_ATOM,
            Atom::ObjectProperty { .. } => swrl::INDIVIDUAL_PROPERTY_ATOM,
            Atom::DataProperty { .. } => swrl::DATAVALUED_PROPERTY_ATOM,
            Atom::SameIndividual(..) => swrl::SAME_INDIVIDUAL_ATOM,
            Atom::DifferentIndividuals(..) => swrl::DIFFERENT_INDIVIDUALS_ATOM,
            Atom::BuiltIn { .. } => swrl::BUILTIN_ATOM,
        };
        self.triple(node.clone(), rdf::TYPE, Node::iri(ty));

        match atom {
            Atom::Class { class, arg } => {
                let c = self.class(class);
                self.triple(node.clone(), swrl::CLASS_PREDICATE, c);
                let a = self.iarg(arg);
                self.triple(node.clone(), swrl::ARGUMENT1, a);
            }
            Atom::DataRange { range, arg } => {
                let r = self.data_range(range);
                self.triple(node.clone(), swrl::DATA_RANGE, r);
                let a = self.darg(arg);
                self.triple(node.clone(), swrl::ARGUMENT1, a);
            }
            Atom::ObjectProperty {
                property,
                first,
                second,
            } => {
                let p = self.object_property(property);
                self.triple(node.clone(), swrl::PROPERTY_PREDICATE, p);
                let a = self.iarg(first);
                self.triple(node.clone(), swrl::ARGUMENT1, a);
                let b = self.iarg(second);
                self.triple(node.clone(), swrl::ARGUMENT2, b);
            }
            Atom::DataProperty {
                property,
                first,
                second,
            } => {
                let p = self.data_property(property);
                self.triple(node.clone(), swrl::PROPERTY_PREDICATE, p);
                let a = self.iarg(first);
                self.triple(node.clone(), swrl::ARGUMENT1, a);
                let b = self.darg(second);
                self.triple(node.clone(), swrl::ARGUMENT2, b);
            }
            Atom::SameIndividual(first, second) | Atom::DifferentIndividuals(first, second) => {
                let a = self.iarg(first);
                self.triple(node.clone(), swrl::ARGUMENT1, a);
                let b = self.iarg(second);
                self.triple(node.clone(), swrl::ARGUMENT2, b);
            }
            Atom::BuiltIn { builtin, args } => {
                self.triple(node.clone(), swrl::BUILTIN, builtin.to_node());
                let nodes: Vec<Node> = args.iter().map(|a| self.darg(a)).collect();
                let head = self.list(&nodes, None);
                self.triple(node.clone(), swrl::ARGUMENTS, head);
            }
        }
        node
    }
}

fn cardinality_predicate(expr: &ClassExpr, qualified: bool) -> &'static str {
    use ClassExpr as C;
    match (expr, qualified) {
        (C::ObjectMinCardinality { .. } | C::DataMinCardinality { .. }, false) => owl::MIN_CARDINALITY,
        (C::ObjectMinCardinality { .. } | C::DataMinCardinality { .. }, true) => {
            owl::MIN_QUALIFIED_CARDINALITY
        }
        (C::ObjectMaxCardinality { .. } | C::DataMaxCardinality { .. }, false) => owl::MAX_CARDINALITY,
        (C::ObjectMaxCardinality { .. } | C::DataMaxCardinality { .. }, true) => {
            owl::MAX_QUALIFIED_CARDINALITY
        }
        (_, false) => owl::CARDINALITY,
        (_, true) => owl::QUALIFIED_CARDINALITY,
    }
}
