//! Node resolution: graph nodes → typed operands wrapped in `ONTObject`s.
//!
//! Resolution is declaration based. An IRI is a class / property / datatype
//! if it is declared as one (`x rdf:type owl:Class`, ...) or is a built-in
//! vocabulary term. When an IRI is declared as several property kinds, the
//! object property reading wins, then data, then annotation.
//!
//! Anonymous expressions are resolved recursively with a depth cutoff and
//! memoized per node in a `DashMap`, so parallel kind scans share the work.

use std::collections::BTreeSet;

use dashmap::DashMap;
use ontmap_graph::vocab::{self, owl, rdf, rdfs, swrl};
use ontmap_graph::{Literal, Node, Triple, TripleGraph};

use crate::config::InternalConfig;
use crate::error::TranslationError;
use crate::list::{self, OrderedList};
use crate::model::{
    Atom, ClassExpr, DArg, DataRange, Entity, EntityKind, FacetRestriction, IArg, Individual, Iri,
    ObjectPropertyExpr, PropertyExpr,
};
use crate::object::{HasContent, ONTObject};

type Resolved<T> = Result<ONTObject<T>, TranslationError>;

// ============================================================================
// Node cache
// ============================================================================

/// Resolved anonymous (and named) expressions keyed by node.
#[derive(Default)]
pub struct NodeCache {
    classes: DashMap<Node, ONTObject<ClassExpr>>,
    ranges: DashMap<Node, ONTObject<DataRange>>,
}

impl NodeCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&self) {
        self.classes.clear();
        self.ranges.clear();
    }

    pub fn len(&self) -> usize {
        self.classes.len() + self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ============================================================================
// Read context
// ============================================================================

#[derive(Debug, Clone, Copy)]
enum Cardinality {
    Min,
    Max,
    Exact,
}

/// Everything a translator needs to read one graph snapshot.
pub struct ReadContext<'a> {
    graph: &'a dyn TripleGraph,
    config: &'a InternalConfig,
    cache: &'a NodeCache,
}

impl<'a> ReadContext<'a> {
    pub fn new(graph: &'a dyn TripleGraph, config: &'a InternalConfig, cache: &'a NodeCache) -> Self {
        Self {
            graph,
            config,
            cache,
        }
    }

    pub fn graph(&self) -> &'a dyn TripleGraph {
        self.graph
    }

    pub fn config(&self) -> &'a InternalConfig {
        self.config
    }

    // ------------------------------------------------------------------------
    // Graph helpers
    // ------------------------------------------------------------------------

    pub fn triples_with(&self, subject: &Node, predicate: &str) -> Vec<Triple> {
        self.graph
            .find(Some(subject), Some(&Node::iri(predicate)), None)
    }

    /// The only `subject predicate ?o` triple, if any.
    pub fn single(
        &self,
        subject: &Node,
        predicate: &str,
        expected: &'static str,
    ) -> Result<Option<Triple>, TranslationError> {
        let mut found = self.triples_with(subject, predicate);
        match found.len() {
            0 => Ok(None),
            1 => Ok(found.pop()),
            _ => Err(TranslationError::unresolved(subject, expected)),
        }
    }

    /// Like [`ReadContext::single`], but the triple must exist.
    pub fn required(
        &self,
        subject: &Node,
        predicate: &str,
        expected: &'static str,
    ) -> Result<Triple, TranslationError> {
        self.single(subject, predicate, expected)?
            .ok_or_else(|| TranslationError::unresolved(subject, expected))
    }

    pub fn type_triple(&self, node: &Node, type_iri: &str) -> Option<Triple> {
        let t = Triple::with_predicate(node.clone(), rdf::TYPE, Node::iri(type_iri));
        self.graph.contains(&t).then_some(t)
    }

    pub fn has_type(&self, node: &Node, type_iri: &str) -> bool {
        self.type_triple(node, type_iri).is_some()
    }

    /// Decode a list with the configured length cutoff.
    pub fn list(&self, head: &Node) -> Result<OrderedList<Node>, TranslationError> {
        Ok(list::decode(self.graph, head, self.config.max_list_length)?)
    }

    fn too_deep(&self, node: &Node, depth: usize, expected: &'static str) -> Result<(), TranslationError> {
        if depth > self.config.max_expression_depth {
            tracing::warn!(%node, depth, "expression nesting cutoff reached");
            return Err(TranslationError::unresolved(node, expected));
        }
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Entities and punning
    // ------------------------------------------------------------------------

    fn is_builtin(iri: &str, kind: EntityKind) -> bool {
        match kind {
            EntityKind::Class => vocab::is_builtin_class(iri),
            EntityKind::Datatype => vocab::is_builtin_datatype(iri),
            EntityKind::ObjectProperty => vocab::is_builtin_object_property(iri),
            EntityKind::DataProperty => vocab::is_builtin_data_property(iri),
            EntityKind::AnnotationProperty => vocab::is_builtin_annotation_property(iri),
            EntityKind::NamedIndividual => false,
        }
    }

    pub fn is_declared(&self, node: &Node, kind: EntityKind) -> bool {
        let Some(iri) = node.as_iri() else {
            return false;
        };
        Self::is_builtin(iri, kind) || self.has_type(node, kind.type_iri())
    }

    /// The declared entity; the declaration triple (if any) backs it.
    pub fn entity(&self, node: &Node, kind: EntityKind) -> Resolved<Entity> {
        let Some(iri) = node.as_iri() else {
            return Err(TranslationError::unresolved(node, entity_label(kind)));
        };
        if Self::is_builtin(iri, kind) {
            return Ok(ONTObject::wrap(Entity::new(kind, iri), []));
        }
        match self.type_triple(node, kind.type_iri()) {
            Some(decl) => Ok(ONTObject::wrap(Entity::new(kind, iri), [decl])),
            None => Err(TranslationError::unresolved(node, entity_label(kind))),
        }
    }

    /// Property reading of a node, by preference: object, data, annotation.
    pub fn property_kind(&self, node: &Node) -> Option<EntityKind> {
        if node.is_blank() {
            return self.inverse_target(node).map(|_| EntityKind::ObjectProperty);
        }
        [
            EntityKind::ObjectProperty,
            EntityKind::DataProperty,
            EntityKind::AnnotationProperty,
        ]
        .into_iter()
        .find(|k| self.is_declared(node, *k))
    }

    pub fn is_object_property(&self, node: &Node) -> bool {
        self.property_kind(node) == Some(EntityKind::ObjectProperty)
    }

    pub fn is_data_property(&self, node: &Node) -> bool {
        self.property_kind(node) == Some(EntityKind::DataProperty)
    }

    pub fn is_annotation_property(&self, node: &Node) -> bool {
        self.property_kind(node) == Some(EntityKind::AnnotationProperty)
    }

    fn inverse_target(&self, node: &Node) -> Option<Triple> {
        let mut found = self.triples_with(node, owl::INVERSE_OF);
        if found.len() != 1 {
            return None;
        }
        found
            .pop()
            .filter(|t| self.is_declared(&t.object, EntityKind::ObjectProperty))
    }

    pub fn object_property(&self, node: &Node) -> Resolved<ObjectPropertyExpr> {
        if node.is_blank() {
            let Some(inv) = self.inverse_target(node) else {
                return Err(TranslationError::unresolved(node, "inverse object property"));
            };
            let named = self.entity(&inv.object, EntityKind::ObjectProperty)?;
            let expr = ObjectPropertyExpr::Inverse(named.value().iri.clone());
            return Ok(ONTObject::wrap(
                expr,
                named.triples().iter().cloned().chain([inv]),
            ));
        }
        if !self.is_object_property(node) {
            return Err(TranslationError::unresolved(node, "object property"));
        }
        Ok(self
            .entity(node, EntityKind::ObjectProperty)?
            .map(|e| ObjectPropertyExpr::Named(e.iri.clone())))
    }

    pub fn data_property(&self, node: &Node) -> Resolved<Entity> {
        if !self.is_data_property(node) {
            return Err(TranslationError::unresolved(node, "data property"));
        }
        self.entity(node, EntityKind::DataProperty)
    }

    pub fn annotation_property(&self, node: &Node) -> Resolved<Entity> {
        if !self.is_annotation_property(node) {
            return Err(TranslationError::unresolved(node, "annotation property"));
        }
        self.entity(node, EntityKind::AnnotationProperty)
    }

    /// Object or data property (key properties).
    pub fn property(&self, node: &Node) -> Result<(PropertyExpr, BTreeSet<Triple>), TranslationError> {
        match self.property_kind(node) {
            Some(EntityKind::ObjectProperty) => {
                let p = self.object_property(node)?;
                Ok((PropertyExpr::Object(p.value().clone()), p.triples().clone()))
            }
            Some(EntityKind::DataProperty) => {
                let p = self.data_property(node)?;
                Ok((PropertyExpr::Data(p.value().iri.clone()), p.triples().clone()))
            }
            _ => Err(TranslationError::unresolved(node, "object or data property")),
        }
    }

    // ------------------------------------------------------------------------
    // Individuals and literals
    // ------------------------------------------------------------------------

    /// A blank node that is not structural (no reserved `rdf:type`, not a
    /// list cell, not an inverse expression, not a reification).
    pub fn is_anonymous_individual(&self, node: &Node) -> bool {
        if !node.is_blank() {
            return false;
        }
        let structural_link = [rdf::FIRST, owl::INVERSE_OF, owl::ANNOTATED_SOURCE]
            .into_iter()
            .any(|p| !self.triples_with(node, p).is_empty());
        if structural_link {
            return false;
        }
        self.triples_with(node, rdf::TYPE)
            .iter()
            .all(|t| !t.object.as_iri().is_some_and(vocab::is_reserved))
    }

    pub fn individual(&self, node: &Node) -> Resolved<Individual> {
        match node {
            Node::Iri(iri) => {
                let decl = self.type_triple(node, owl::NAMED_INDIVIDUAL);
                Ok(ONTObject::wrap(Individual::named(iri.as_str()), decl))
            }
            Node::Blank(label) if self.is_anonymous_individual(node) => {
                Ok(ONTObject::wrap(Individual::anonymous(label.as_str()), []))
            }
            _ => Err(TranslationError::unresolved(node, "individual")),
        }
    }

    pub fn literal(&self, node: &Node) -> Result<Literal, TranslationError> {
        node.as_literal()
            .cloned()
            .ok_or_else(|| TranslationError::unresolved(node, "literal"))
    }

    fn cardinality_value(&self, triple: &Triple) -> Result<u32, TranslationError> {
        triple
            .object
            .as_literal()
            .and_then(Literal::as_cardinality)
            .ok_or_else(|| TranslationError::unresolved(&triple.object, "non-negative cardinality"))
    }

    // ------------------------------------------------------------------------
    // Class expressions
    // ------------------------------------------------------------------------

    pub fn class(&self, node: &Node) -> Resolved<ClassExpr> {
        self.class_at(node, 0)
    }

    pub fn is_class(&self, node: &Node) -> bool {
        self.class(node).is_ok()
    }

    fn class_at(&self, node: &Node, depth: usize) -> Resolved<ClassExpr> {
        if let Some(hit) = self.cache.classes.get(node) {
            return Ok(hit.value().clone());
        }
        self.too_deep(node, depth, "class expression")?;
        let resolved = match node {
            Node::Iri(iri) => {
                if !self.is_declared(node, EntityKind::Class) {
                    return Err(TranslationError::unresolved(node, "class"));
                }
                self.entity(node, EntityKind::Class)?
                    .map(|_| ClassExpr::class(iri.as_str()))
            }
            Node::Blank(_) => self.anonymous_class(node, depth)?,
            Node::Literal(_) => return Err(TranslationError::unresolved(node, "class expression")),
        };
        self.cache.classes.insert(node.clone(), resolved.clone());
        Ok(resolved)
    }

    /// Resolve every list member with `resolve`, collecting all backing triples.
    fn members<T: HasContent + Clone>(
        &self,
        head: &Node,
        triples: &mut BTreeSet<Triple>,
        resolve: impl Fn(&Node) -> Resolved<T>,
    ) -> Result<Vec<T>, TranslationError> {
        let list = self.list(head)?;
        triples.extend(list.triples);
        list.members
            .iter()
            .map(|m| {
                let obj = resolve(m)?;
                triples.extend(obj.triples().iter().cloned());
                Ok(obj.value().clone())
            })
            .collect()
    }

    fn anonymous_class(&self, node: &Node, depth: usize) -> Resolved<ClassExpr> {
        let mut triples = BTreeSet::new();
        if let Some(restriction) = self.type_triple(node, owl::RESTRICTION) {
            triples.insert(restriction);
            return self.restriction(node, depth, triples);
        }
        let Some(class_type) = self.type_triple(node, owl::CLASS) else {
            return Err(TranslationError::unresolved(node, "class expression"));
        };
        triples.insert(class_type);
        let next = depth + 1;

        let expr = if let Some(t) = self.single(node, owl::INTERSECTION_OF, "single owl:intersectionOf")? {
            let members = self.members(&t.object, &mut triples, |m| self.class_at(m, next))?;
            triples.insert(t);
            ClassExpr::intersection_of(members)
        } else if let Some(t) = self.single(node, owl::UNION_OF, "single owl:unionOf")? {
            let members = self.members(&t.object, &mut triples, |m| self.class_at(m, next))?;
            triples.insert(t);
            ClassExpr::union_of(members)
        } else if let Some(t) = self.single(node, owl::COMPLEMENT_OF, "single owl:complementOf")? {
            let operand = self.class_at(&t.object, next)?;
            triples.extend(operand.triples().iter().cloned());
            triples.insert(t);
            ClassExpr::complement_of(operand.value().clone())
        } else if let Some(t) = self.single(node, owl::ONE_OF, "single owl:oneOf")? {
            let members = self.members(&t.object, &mut triples, |m| self.individual(m))?;
            triples.insert(t);
            ClassExpr::one_of(members)
        } else {
            return Err(TranslationError::unresolved(node, "class expression"));
        };
        Ok(ONTObject::wrap(expr, triples))
    }

    fn cardinality(&self, node: &Node) -> Result<Option<(Triple, Cardinality, bool)>, TranslationError> {
        let candidates = [
            (owl::MIN_QUALIFIED_CARDINALITY, Cardinality::Min, true),
            (owl::MAX_QUALIFIED_CARDINALITY, Cardinality::Max, true),
            (owl::QUALIFIED_CARDINALITY, Cardinality::Exact, true),
            (owl::MIN_CARDINALITY, Cardinality::Min, false),
            (owl::MAX_CARDINALITY, Cardinality::Max, false),
            (owl::CARDINALITY, Cardinality::Exact, false),
        ];
        for (predicate, kind, qualified) in candidates {
            if let Some(t) = self.single(node, predicate, "single cardinality")? {
                return Ok(Some((t, kind, qualified)));
            }
        }
        Ok(None)
    }

    fn restriction(&self, node: &Node, depth: usize, mut triples: BTreeSet<Triple>) -> Resolved<ClassExpr> {
        let on_property = self.required(node, owl::ON_PROPERTY, "restriction with owl:onProperty")?;
        let property_node = on_property.object.clone();
        triples.insert(on_property);
        match self.property_kind(&property_node) {
            Some(EntityKind::ObjectProperty) => {
                self.object_restriction(node, &property_node, depth, triples)
            }
            Some(EntityKind::DataProperty) => self.data_restriction(node, &property_node, depth, triples),
            _ => Err(TranslationError::unresolved(
                &property_node,
                "object or data property",
            )),
        }
    }

    fn object_restriction(
        &self,
        node: &Node,
        property_node: &Node,
        depth: usize,
        mut triples: BTreeSet<Triple>,
    ) -> Resolved<ClassExpr> {
        let property = self.object_property(property_node)?;
        triples.extend(property.triples().iter().cloned());
        let property = property.value().clone();
        let next = depth + 1;

        let expr = if let Some(t) = self.single(node, owl::SOME_VALUES_FROM, "single owl:someValuesFrom")? {
            let filler = self.class_at(&t.object, next)?;
            triples.extend(filler.triples().iter().cloned());
            triples.insert(t);
            ClassExpr::some(property, filler.value().clone())
        } else if let Some(t) = self.single(node, owl::ALL_VALUES_FROM, "single owl:allValuesFrom")? {
            let filler = self.class_at(&t.object, next)?;
            triples.extend(filler.triples().iter().cloned());
            triples.insert(t);
            ClassExpr::all(property, filler.value().clone())
        } else if let Some(t) = self.single(node, owl::HAS_VALUE, "single owl:hasValue")? {
            let value = self.individual(&t.object)?;
            triples.extend(value.triples().iter().cloned());
            triples.insert(t);
            ClassExpr::ObjectHasValue {
                property,
                value: value.value().clone(),
            }
        } else if let Some(t) = self.single(node, owl::HAS_SELF, "single owl:hasSelf")? {
            let is_true = t
                .object
                .as_literal()
                .is_some_and(|l| matches!(l.lexical.trim(), "true" | "1"));
            if !is_true {
                return Err(TranslationError::unresolved(&t.object, "owl:hasSelf true"));
            }
            triples.insert(t);
            ClassExpr::ObjectHasSelf(property)
        } else if let Some((t, kind, qualified)) = self.cardinality(node)? {
            let cardinality = self.cardinality_value(&t)?;
            triples.insert(t);
            let filler = if qualified {
                let on_class = self.required(node, owl::ON_CLASS, "qualified restriction with owl:onClass")?;
                let filler = self.class_at(&on_class.object, next)?;
                triples.extend(filler.triples().iter().cloned());
                triples.insert(on_class);
                Some(Box::new(filler.value().clone()))
            } else {
                None
            };
            match kind {
                Cardinality::Min => ClassExpr::ObjectMinCardinality {
                    cardinality,
                    property,
                    filler,
                },
                Cardinality::Max => ClassExpr::ObjectMaxCardinality {
                    cardinality,
                    property,
                    filler,
                },
                Cardinality::Exact => ClassExpr::ObjectExactCardinality {
                    cardinality,
                    property,
                    filler,
                },
            }
        } else {
            return Err(TranslationError::unresolved(node, "object restriction"));
        };
        Ok(ONTObject::wrap(expr, triples))
    }

    fn data_restriction(
        &self,
        node: &Node,
        property_node: &Node,
        depth: usize,
        mut triples: BTreeSet<Triple>,
    ) -> Resolved<ClassExpr> {
        let property = self.data_property(property_node)?;
        triples.extend(property.triples().iter().cloned());
        let property = property.value().iri.clone();
        let next = depth + 1;

        let expr = if let Some(t) = self.single(node, owl::SOME_VALUES_FROM, "single owl:someValuesFrom")? {
            let range = self.data_range_at(&t.object, next)?;
            triples.extend(range.triples().iter().cloned());
            triples.insert(t);
            ClassExpr::DataSomeValuesFrom {
                property,
                range: Box::new(range.value().clone()),
            }
        } else if let Some(t) = self.single(node, owl::ALL_VALUES_FROM, "single owl:allValuesFrom")? {
            let range = self.data_range_at(&t.object, next)?;
            triples.extend(range.triples().iter().cloned());
            triples.insert(t);
            ClassExpr::DataAllValuesFrom {
                property,
                range: Box::new(range.value().clone()),
            }
        } else if let Some(t) = self.single(node, owl::HAS_VALUE, "single owl:hasValue")? {
            let value = self.literal(&t.object)?;
            triples.insert(t);
            ClassExpr::DataHasValue { property, value }
        } else if let Some((t, kind, qualified)) = self.cardinality(node)? {
            let cardinality = self.cardinality_value(&t)?;
            triples.insert(t);
            let range = if qualified {
                let on_range =
                    self.required(node, owl::ON_DATA_RANGE, "qualified restriction with owl:onDataRange")?;
                let range = self.data_range_at(&on_range.object, next)?;
                triples.extend(range.triples().iter().cloned());
                triples.insert(on_range);
                Some(Box::new(range.value().clone()))
            } else {
                None
            };
            match kind {
                Cardinality::Min => ClassExpr::DataMinCardinality {
                    cardinality,
                    property,
                    range,
                },
                Cardinality::Max => ClassExpr::DataMaxCardinality {
                    cardinality,
                    property,
                    range,
                },
                Cardinality::Exact => ClassExpr::DataExactCardinality {
                    cardinality,
                    property,
                    range,
                },
            }
        } else {
            return Err(TranslationError::unresolved(node, "data restriction"));
        };
        Ok(ONTObject::wrap(expr, triples))
    }

    // ------------------------------------------------------------------------
    // Data ranges
    // ------------------------------------------------------------------------

    pub fn data_range(&self, node: &Node) -> Resolved<DataRange> {
        self.data_range_at(node, 0)
    }

    pub fn is_data_range(&self, node: &Node) -> bool {
        self.data_range(node).is_ok()
    }

    fn data_range_at(&self, node: &Node, depth: usize) -> Resolved<DataRange> {
        if let Some(hit) = self.cache.ranges.get(node) {
            return Ok(hit.value().clone());
        }
        self.too_deep(node, depth, "data range")?;
        let resolved = match node {
            Node::Iri(iri) => self
                .entity(node, EntityKind::Datatype)?
                .map(|_| DataRange::datatype(iri.as_str())),
            Node::Blank(_) => self.anonymous_range(node, depth)?,
            Node::Literal(_) => return Err(TranslationError::unresolved(node, "data range")),
        };
        self.cache.ranges.insert(node.clone(), resolved.clone());
        Ok(resolved)
    }

    fn anonymous_range(&self, node: &Node, depth: usize) -> Resolved<DataRange> {
        let Some(dt_type) = self.type_triple(node, rdfs::DATATYPE) else {
            return Err(TranslationError::unresolved(node, "data range"));
        };
        let mut triples = BTreeSet::from([dt_type]);
        let next = depth + 1;

        let range = if let Some(t) = self.single(node, owl::INTERSECTION_OF, "single owl:intersectionOf")? {
            let members = self.members(&t.object, &mut triples, |m| self.data_range_at(m, next))?;
            triples.insert(t);
            DataRange::IntersectionOf(members.into_iter().collect())
        } else if let Some(t) = self.single(node, owl::UNION_OF, "single owl:unionOf")? {
            let members = self.members(&t.object, &mut triples, |m| self.data_range_at(m, next))?;
            triples.insert(t);
            DataRange::UnionOf(members.into_iter().collect())
        } else if let Some(t) =
            self.single(node, owl::DATATYPE_COMPLEMENT_OF, "single owl:datatypeComplementOf")?
        {
            let operand = self.data_range_at(&t.object, next)?;
            triples.extend(operand.triples().iter().cloned());
            triples.insert(t);
            DataRange::ComplementOf(Box::new(operand.value().clone()))
        } else if let Some(t) = self.single(node, owl::ONE_OF, "single owl:oneOf")? {
            let list = self.list(&t.object)?;
            triples.extend(list.triples);
            let literals = list
                .members
                .iter()
                .map(|m| self.literal(m))
                .collect::<Result<BTreeSet<_>, _>>()?;
            triples.insert(t);
            DataRange::OneOf(literals)
        } else if let Some(t) = self.single(node, owl::ON_DATATYPE, "single owl:onDatatype")? {
            let datatype = self.entity(&t.object, EntityKind::Datatype)?;
            triples.extend(datatype.triples().iter().cloned());
            triples.insert(t);
            let with = self.required(node, owl::WITH_RESTRICTIONS, "datatype restriction facets")?;
            let list = self.list(&with.object)?;
            triples.extend(list.triples);
            triples.insert(with);
            let mut facets = BTreeSet::new();
            for facet_node in &list.members {
                let facet = self.facet(facet_node)?;
                facets.insert(FacetRestriction {
                    facet: Iri::new(facet.predicate.as_iri().unwrap_or_default()),
                    value: self.literal(&facet.object)?,
                });
                triples.insert(facet);
            }
            DataRange::Restriction {
                datatype: datatype.value().iri.clone(),
                facets,
            }
        } else {
            return Err(TranslationError::unresolved(node, "data range"));
        };
        Ok(ONTObject::wrap(range, triples))
    }

    /// The single `facet value` triple of a facet node.
    fn facet(&self, node: &Node) -> Result<Triple, TranslationError> {
        let mut found = self.graph.find(Some(node), None, None);
        if found.len() != 1 || !found[0].object.is_literal() {
            return Err(TranslationError::unresolved(node, "facet restriction"));
        }
        found
            .pop()
            .ok_or_else(|| TranslationError::unresolved(node, "facet restriction"))
    }

    // ------------------------------------------------------------------------
    // SWRL
    // ------------------------------------------------------------------------

    fn is_variable(&self, node: &Node) -> Option<Triple> {
        node.is_iri()
            .then(|| self.type_triple(node, swrl::VARIABLE))
            .flatten()
    }

    pub fn iarg(&self, node: &Node) -> Result<(IArg, BTreeSet<Triple>), TranslationError> {
        if let Some(decl) = self.is_variable(node) {
            let iri = Iri::new(node.as_iri().unwrap_or_default());
            return Ok((IArg::Variable(iri), BTreeSet::from([decl])));
        }
        let individual = self.individual(node)?;
        Ok((
            IArg::Individual(individual.value().clone()),
            individual.triples().clone(),
        ))
    }

    pub fn darg(&self, node: &Node) -> Result<(DArg, BTreeSet<Triple>), TranslationError> {
        if let Some(decl) = self.is_variable(node) {
            let iri = Iri::new(node.as_iri().unwrap_or_default());
            return Ok((DArg::Variable(iri), BTreeSet::from([decl])));
        }
        Ok((DArg::Literal(self.literal(node)?), BTreeSet::new()))
    }

    pub fn atom(&self, node: &Node) -> Resolved<Atom> {
        let mut triples = BTreeSet::new();
        let arg = |predicate: &'static str, triples: &mut BTreeSet<Triple>| {
            let t = self.required(node, predicate, "atom argument")?;
            let object = t.object.clone();
            triples.insert(t);
            Ok::<Node, TranslationError>(object)
        };

        let atom = if let Some(ty) = self.type_triple(node, swrl::CLASS_ATOM) {
            triples.insert(ty);
            let pred = self.required(node, swrl::CLASS_PREDICATE, "class atom predicate")?;
            let class = self.class(&pred.object)?;
            triples.extend(class.triples().iter().cloned());
            triples.insert(pred);
            let (a, at) = self.iarg(&arg(swrl::ARGUMENT1, &mut triples)?)?;
            triples.extend(at);
            Atom::Class {
                class: class.value().clone(),
                arg: a,
            }
        } else if let Some(ty) = self.type_triple(node, swrl::DATA_RANGE_ATOM) {
            triples.insert(ty);
            let pred = self.required(node, swrl::DATA_RANGE, "data range atom predicate")?;
            let range = self.data_range(&pred.object)?;
            triples.extend(range.triples().iter().cloned());
            triples.insert(pred);
            let (a, at) = self.darg(&arg(swrl::ARGUMENT1, &mut triples)?)?;
            triples.extend(at);
            Atom::DataRange {
                range: range.value().clone(),
                arg: a,
            }
        } else if let Some(ty) = self.type_triple(node, swrl::INDIVIDUAL_PROPERTY_ATOM) {
            triples.insert(ty);
            let pred = self.required(node, swrl::PROPERTY_PREDICATE, "property atom predicate")?;
            let property = self.object_property(&pred.object)?;
            triples.extend(property.triples().iter().cloned());
            triples.insert(pred);
            let (first, ft) = self.iarg(&arg(swrl::ARGUMENT1, &mut triples)?)?;
            let (second, st) = self.iarg(&arg(swrl::ARGUMENT2, &mut triples)?)?;
            triples.extend(ft.into_iter().chain(st));
            Atom::ObjectProperty {
                property: property.value().clone(),
                first,
                second,
            }
        } else if let Some(ty) = self.type_triple(node, swrl::DATAVALUED_PROPERTY_ATOM) {
            triples.insert(ty);
            let pred = self.required(node, swrl::PROPERTY_PREDICATE, "property atom predicate")?;
            let property = self.data_property(&pred.object)?;
            triples.extend(property.triples().iter().cloned());
            triples.insert(pred);
            let (first, ft) = self.iarg(&arg(swrl::ARGUMENT1, &mut triples)?)?;
            let (second, st) = self.darg(&arg(swrl::ARGUMENT2, &mut triples)?)?;
            triples.extend(ft.into_iter().chain(st));
            Atom::DataProperty {
                property: property.value().iri.clone(),
                first,
                second,
            }
        } else if let Some(ty) = self
            .type_triple(node, swrl::SAME_INDIVIDUAL_ATOM)
            .or_else(|| self.type_triple(node, swrl::DIFFERENT_INDIVIDUALS_ATOM))
        {
            let same = ty.object.is(swrl::SAME_INDIVIDUAL_ATOM);
            triples.insert(ty);
            let (first, ft) = self.iarg(&arg(swrl::ARGUMENT1, &mut triples)?)?;
            let (second, st) = self.iarg(&arg(swrl::ARGUMENT2, &mut triples)?)?;
            triples.extend(ft.into_iter().chain(st));
            if same {
                Atom::SameIndividual(first, second)
            } else {
                Atom::DifferentIndividuals(first, second)
            }
        } else if let Some(ty) = self.type_triple(node, swrl::BUILTIN_ATOM) {
            triples.insert(ty);
            let builtin = self.required(node, swrl::BUILTIN, "built-in atom predicate")?;
            let Some(builtin_iri) = builtin.object.as_iri().map(Iri::new) else {
                return Err(TranslationError::unresolved(&builtin.object, "built-in IRI"));
            };
            triples.insert(builtin);
            let arguments = self.required(node, swrl::ARGUMENTS, "built-in arguments")?;
            let list = self.list(&arguments.object)?;
            triples.extend(list.triples);
            triples.insert(arguments);
            let mut args = Vec::with_capacity(list.members.len());
            for m in &list.members {
                let (a, at) = self.darg(m)?;
                triples.extend(at);
                args.push(a);
            }
            Atom::BuiltIn {
                builtin: builtin_iri,
                args,
            }
        } else {
            return Err(TranslationError::unresolved(node, "SWRL atom"));
        };
        Ok(ONTObject::wrap(atom, triples))
    }
}

fn entity_label(kind: EntityKind) -> &'static str {
    match kind {
        EntityKind::Class => "class",
        EntityKind::Datatype => "datatype",
        EntityKind::ObjectProperty => "object property",
        EntityKind::DataProperty => "data property",
        EntityKind::AnnotationProperty => "annotation property",
        EntityKind::NamedIndividual => "named individual",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ontmap_graph::vocab::xsd;
    use ontmap_graph::MemGraph;

    fn iri(s: &str) -> Node {
        Node::iri(format!("urn:{s}"))
    }

    fn add(g: &mut MemGraph, s: Node, p: &str, o: Node) {
        g.add(Triple::with_predicate(s, p, o));
    }

    fn declare(g: &mut MemGraph, s: &str, ty: &str) {
        add(g, iri(s), rdf::TYPE, Node::iri(ty));
    }

    #[test]
    fn builtins_resolve_without_declaration() {
        let g = MemGraph::new();
        let cfg = InternalConfig::default();
        let cache = NodeCache::new();
        let ctx = ReadContext::new(&g, &cfg, &cache);

        let thing = ctx.class(&Node::iri(owl::THING)).expect("owl:Thing");
        assert!(thing.triples().is_empty());
        assert!(ctx.data_range(&Node::iri(xsd::STRING)).is_ok());
        assert!(ctx.is_annotation_property(&Node::iri(rdfs::LABEL)));
        assert!(ctx.class(&iri("Undeclared")).is_err());
    }

    #[test]
    fn punned_property_prefers_object_reading() {
        let mut g = MemGraph::new();
        declare(&mut g, "p", owl::OBJECT_PROPERTY);
        declare(&mut g, "p", owl::DATATYPE_PROPERTY);
        let cfg = InternalConfig::default();
        let cache = NodeCache::new();
        let ctx = ReadContext::new(&g, &cfg, &cache);

        assert_eq!(ctx.property_kind(&iri("p")), Some(EntityKind::ObjectProperty));
        assert!(ctx.object_property(&iri("p")).is_ok());
        assert!(matches!(
            ctx.data_property(&iri("p")),
            Err(TranslationError::UnresolvedOperand { .. })
        ));
    }

    #[test]
    fn restriction_resolves_with_backing_triples() {
        let mut g = MemGraph::new();
        declare(&mut g, "hasPart", owl::OBJECT_PROPERTY);
        declare(&mut g, "Wheel", owl::CLASS);
        let r = Node::blank("r");
        add(&mut g, r.clone(), rdf::TYPE, Node::iri(owl::RESTRICTION));
        add(&mut g, r.clone(), owl::ON_PROPERTY, iri("hasPart"));
        add(&mut g, r.clone(), owl::MIN_QUALIFIED_CARDINALITY, Node::Literal(Literal::non_negative_integer(2)));
        add(&mut g, r.clone(), owl::ON_CLASS, iri("Wheel"));

        let cfg = InternalConfig::default();
        let cache = NodeCache::new();
        let ctx = ReadContext::new(&g, &cfg, &cache);
        let expr = ctx.class(&r).expect("restriction");
        assert_eq!(
            expr.value(),
            &ClassExpr::ObjectMinCardinality {
                cardinality: 2,
                property: ObjectPropertyExpr::named("urn:hasPart"),
                filler: Some(Box::new(ClassExpr::class("urn:Wheel"))),
            }
        );
        // 4 restriction triples + 2 declarations.
        assert_eq!(expr.triples().len(), 6);
        // The restriction node and the filler class.
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn cyclic_expressions_hit_the_depth_cutoff() {
        let mut g = MemGraph::new();
        let x = Node::blank("x");
        add(&mut g, x.clone(), rdf::TYPE, Node::iri(owl::CLASS));
        add(&mut g, x.clone(), owl::COMPLEMENT_OF, x.clone());
        let cfg = InternalConfig {
            max_expression_depth: 8,
            ..InternalConfig::default()
        };
        let cache = NodeCache::new();
        let ctx = ReadContext::new(&g, &cfg, &cache);
        assert!(matches!(
            ctx.class(&x),
            Err(TranslationError::UnresolvedOperand { .. })
        ));
    }

    #[test]
    fn structural_blank_nodes_are_not_individuals() {
        let mut g = MemGraph::new();
        add(&mut g, Node::blank("ax"), rdf::TYPE, Node::iri(owl::AXIOM));
        add(&mut g, Node::blank("i"), rdf::TYPE, iri("Person"));
        let cfg = InternalConfig::default();
        let cache = NodeCache::new();
        let ctx = ReadContext::new(&g, &cfg, &cache);
        assert!(!ctx.is_anonymous_individual(&Node::blank("ax")));
        assert!(ctx.is_anonymous_individual(&Node::blank("i")));
        assert!(ctx.is_anonymous_individual(&Node::blank("unused")));
    }
}
