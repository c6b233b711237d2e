//! Axioms: kind tags, typed bodies and operand tuples.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::{
    AnnotationSubject, AnnotationValue, Annotation, Atom, ClassExpr, DataRange, Entity, Individual,
    Iri, Literal, ObjectPropertyExpr, PropertyExpr, Rule,
};

// ============================================================================
// Kinds
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AxiomKind {
    Declaration,
    SubClassOf,
    EquivalentClasses,
    DisjointClasses,
    DisjointUnion,
    SubObjectPropertyOf,
    SubPropertyChainOf,
    EquivalentObjectProperties,
    DisjointObjectProperties,
    ObjectPropertyDomain,
    ObjectPropertyRange,
    InverseObjectProperties,
    FunctionalObjectProperty,
    InverseFunctionalObjectProperty,
    ReflexiveObjectProperty,
    IrreflexiveObjectProperty,
    SymmetricObjectProperty,
    AsymmetricObjectProperty,
    TransitiveObjectProperty,
    SubDataPropertyOf,
    EquivalentDataProperties,
    DisjointDataProperties,
    DataPropertyDomain,
    DataPropertyRange,
    FunctionalDataProperty,
    DatatypeDefinition,
    HasKey,
    ClassAssertion,
    SameIndividual,
    DifferentIndividuals,
    ObjectPropertyAssertion,
    NegativeObjectPropertyAssertion,
    DataPropertyAssertion,
    NegativeDataPropertyAssertion,
    AnnotationAssertion,
    SubAnnotationPropertyOf,
    AnnotationPropertyDomain,
    AnnotationPropertyRange,
    SwrlRule,
}

impl AxiomKind {
    pub const COUNT: usize = 39;

    /// Every kind, in scan order.
    pub const ALL: [AxiomKind; AxiomKind::COUNT] = [
        AxiomKind::Declaration,
        AxiomKind::SubClassOf,
        AxiomKind::EquivalentClasses,
        AxiomKind::DisjointClasses,
        AxiomKind::DisjointUnion,
        AxiomKind::SubObjectPropertyOf,
        AxiomKind::SubPropertyChainOf,
        AxiomKind::EquivalentObjectProperties,
        AxiomKind::DisjointObjectProperties,
        AxiomKind::ObjectPropertyDomain,
        AxiomKind::ObjectPropertyRange,
        AxiomKind::InverseObjectProperties,
        AxiomKind::FunctionalObjectProperty,
        AxiomKind::InverseFunctionalObjectProperty,
        AxiomKind::ReflexiveObjectProperty,
        AxiomKind::IrreflexiveObjectProperty,
        AxiomKind::SymmetricObjectProperty,
        AxiomKind::AsymmetricObjectProperty,
        AxiomKind::TransitiveObjectProperty,
        AxiomKind::SubDataPropertyOf,
        AxiomKind::EquivalentDataProperties,
        AxiomKind::DisjointDataProperties,
        AxiomKind::DataPropertyDomain,
        AxiomKind::DataPropertyRange,
        AxiomKind::FunctionalDataProperty,
        AxiomKind::DatatypeDefinition,
        AxiomKind::HasKey,
        AxiomKind::ClassAssertion,
        AxiomKind::SameIndividual,
        AxiomKind::DifferentIndividuals,
        AxiomKind::ObjectPropertyAssertion,
        AxiomKind::NegativeObjectPropertyAssertion,
        AxiomKind::DataPropertyAssertion,
        AxiomKind::NegativeDataPropertyAssertion,
        AxiomKind::AnnotationAssertion,
        AxiomKind::SubAnnotationPropertyOf,
        AxiomKind::AnnotationPropertyDomain,
        AxiomKind::AnnotationPropertyRange,
        AxiomKind::SwrlRule,
    ];

    /// Position in [`AxiomKind::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    /// Kinds whose operands form an unordered set of two or more members.
    pub fn is_nary(self) -> bool {
        matches!(
            self,
            AxiomKind::EquivalentClasses
                | AxiomKind::DisjointClasses
                | AxiomKind::EquivalentObjectProperties
                | AxiomKind::DisjointObjectProperties
                | AxiomKind::EquivalentDataProperties
                | AxiomKind::DisjointDataProperties
                | AxiomKind::SameIndividual
                | AxiomKind::DifferentIndividuals
        )
    }

    pub fn name(self) -> &'static str {
        match self {
            AxiomKind::Declaration => "Declaration",
            AxiomKind::SubClassOf => "SubClassOf",
            AxiomKind::EquivalentClasses => "EquivalentClasses",
            AxiomKind::DisjointClasses => "DisjointClasses",
            AxiomKind::DisjointUnion => "DisjointUnion",
            AxiomKind::SubObjectPropertyOf => "SubObjectPropertyOf",
            AxiomKind::SubPropertyChainOf => "SubPropertyChainOf",
            AxiomKind::EquivalentObjectProperties => "EquivalentObjectProperties",
            AxiomKind::DisjointObjectProperties => "DisjointObjectProperties",
            AxiomKind::ObjectPropertyDomain => "ObjectPropertyDomain",
            AxiomKind::ObjectPropertyRange => "ObjectPropertyRange",
            AxiomKind::InverseObjectProperties => "InverseObjectProperties",
            AxiomKind::FunctionalObjectProperty => "FunctionalObjectProperty",
            AxiomKind::InverseFunctionalObjectProperty => "InverseFunctionalObjectProperty",
            AxiomKind::ReflexiveObjectProperty => "ReflexiveObjectProperty",
            AxiomKind::IrreflexiveObjectProperty => "IrreflexiveObjectProperty",
            AxiomKind::SymmetricObjectProperty => "SymmetricObjectProperty",
            AxiomKind::AsymmetricObjectProperty => "AsymmetricObjectProperty",
            AxiomKind::TransitiveObjectProperty => "TransitiveObjectProperty",
            AxiomKind::SubDataPropertyOf => "SubDataPropertyOf",
            AxiomKind::EquivalentDataProperties => "EquivalentDataProperties",
            AxiomKind::DisjointDataProperties => "DisjointDataProperties",
            AxiomKind::DataPropertyDomain => "DataPropertyDomain",
            AxiomKind::DataPropertyRange => "DataPropertyRange",
            AxiomKind::FunctionalDataProperty => "FunctionalDataProperty",
            AxiomKind::DatatypeDefinition => "DatatypeDefinition",
            AxiomKind::HasKey => "HasKey",
            AxiomKind::ClassAssertion => "ClassAssertion",
            AxiomKind::SameIndividual => "SameIndividual",
            AxiomKind::DifferentIndividuals => "DifferentIndividuals",
            AxiomKind::ObjectPropertyAssertion => "ObjectPropertyAssertion",
            AxiomKind::NegativeObjectPropertyAssertion => "NegativeObjectPropertyAssertion",
            AxiomKind::DataPropertyAssertion => "DataPropertyAssertion",
            AxiomKind::NegativeDataPropertyAssertion => "NegativeDataPropertyAssertion",
            AxiomKind::AnnotationAssertion => "AnnotationAssertion",
            AxiomKind::SubAnnotationPropertyOf => "SubAnnotationPropertyOf",
            AxiomKind::AnnotationPropertyDomain => "AnnotationPropertyDomain",
            AxiomKind::AnnotationPropertyRange => "AnnotationPropertyRange",
            AxiomKind::SwrlRule => "SWRLRule",
        }
    }
}

// ============================================================================
// Operands
// ============================================================================

/// One position of an axiom's operand tuple.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Operand {
    Entity(Entity),
    Class(ClassExpr),
    ObjectProperty(ObjectPropertyExpr),
    DataProperty(Iri),
    AnnotationProperty(Iri),
    DataRange(DataRange),
    Individual(Individual),
    Literal(Literal),
    Iri(Iri),
    AnnotationSubject(AnnotationSubject),
    AnnotationValue(AnnotationValue),
    Atom(Atom),
    /// Unordered members, already canonical (sorted, no repeats).
    Set(Vec<Operand>),
    /// Ordered members.
    List(Vec<Operand>),
}

impl From<PropertyExpr> for Operand {
    fn from(value: PropertyExpr) -> Self {
        match value {
            PropertyExpr::Object(p) => Operand::ObjectProperty(p),
            PropertyExpr::Data(p) => Operand::DataProperty(p),
        }
    }
}

// ============================================================================
// Bodies
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AxiomBody {
    Declaration(Entity),
    SubClassOf {
        sub: ClassExpr,
        sup: ClassExpr,
    },
    EquivalentClasses(BTreeSet<ClassExpr>),
    DisjointClasses(BTreeSet<ClassExpr>),
    DisjointUnion {
        class: Iri,
        members: BTreeSet<ClassExpr>,
    },
    SubObjectPropertyOf {
        sub: ObjectPropertyExpr,
        sup: ObjectPropertyExpr,
    },
    SubPropertyChainOf {
        chain: Vec<ObjectPropertyExpr>,
        sup: ObjectPropertyExpr,
    },
    EquivalentObjectProperties(BTreeSet<ObjectPropertyExpr>),
    DisjointObjectProperties(BTreeSet<ObjectPropertyExpr>),
    ObjectPropertyDomain {
        property: ObjectPropertyExpr,
        domain: ClassExpr,
    },
    ObjectPropertyRange {
        property: ObjectPropertyExpr,
        range: ClassExpr,
    },
    /// Kept as an ordered pair; see [`AxiomBody::inverse_object_properties`].
    InverseObjectProperties(ObjectPropertyExpr, ObjectPropertyExpr),
    FunctionalObjectProperty(ObjectPropertyExpr),
    InverseFunctionalObjectProperty(ObjectPropertyExpr),
    ReflexiveObjectProperty(ObjectPropertyExpr),
    IrreflexiveObjectProperty(ObjectPropertyExpr),
    SymmetricObjectProperty(ObjectPropertyExpr),
    AsymmetricObjectProperty(ObjectPropertyExpr),
    TransitiveObjectProperty(ObjectPropertyExpr),
    SubDataPropertyOf {
        sub: Iri,
        sup: Iri,
    },
    EquivalentDataProperties(BTreeSet<Iri>),
    DisjointDataProperties(BTreeSet<Iri>),
    DataPropertyDomain {
        property: Iri,
        domain: ClassExpr,
    },
    DataPropertyRange {
        property: Iri,
        range: DataRange,
    },
    FunctionalDataProperty(Iri),
    DatatypeDefinition {
        datatype: Iri,
        range: DataRange,
    },
    HasKey {
        class: ClassExpr,
        properties: BTreeSet<PropertyExpr>,
    },
    ClassAssertion {
        class: ClassExpr,
        individual: Individual,
    },
    SameIndividual(BTreeSet<Individual>),
    DifferentIndividuals(BTreeSet<Individual>),
    ObjectPropertyAssertion {
        property: ObjectPropertyExpr,
        subject: Individual,
        object: Individual,
    },
    NegativeObjectPropertyAssertion {
        property: ObjectPropertyExpr,
        subject: Individual,
        object: Individual,
    },
    DataPropertyAssertion {
        property: Iri,
        subject: Individual,
        value: Literal,
    },
    NegativeDataPropertyAssertion {
        property: Iri,
        subject: Individual,
        value: Literal,
    },
    AnnotationAssertion {
        property: Iri,
        subject: AnnotationSubject,
        value: AnnotationValue,
    },
    SubAnnotationPropertyOf {
        sub: Iri,
        sup: Iri,
    },
    AnnotationPropertyDomain {
        property: Iri,
        domain: Iri,
    },
    AnnotationPropertyRange {
        property: Iri,
        range: Iri,
    },
    SwrlRule(Rule),
}

impl AxiomBody {
    /// `InverseObjectProperties` is symmetric: the pair is stored sorted.
    pub fn inverse_object_properties(a: ObjectPropertyExpr, b: ObjectPropertyExpr) -> Self {
        if b < a {
            AxiomBody::InverseObjectProperties(b, a)
        } else {
            AxiomBody::InverseObjectProperties(a, b)
        }
    }

    /// `ObjectPropertyAssertion(ObjectInverseOf(p) a b)` is stored as
    /// `ObjectPropertyAssertion(p b a)`; both have the same single-triple encoding.
    pub fn object_property_assertion(
        property: ObjectPropertyExpr,
        subject: Individual,
        object: Individual,
    ) -> Self {
        match property {
            ObjectPropertyExpr::Inverse(p) => AxiomBody::ObjectPropertyAssertion {
                property: ObjectPropertyExpr::Named(p),
                subject: object,
                object: subject,
            },
            named => AxiomBody::ObjectPropertyAssertion {
                property: named,
                subject,
                object,
            },
        }
    }

    pub fn equivalent_classes(members: impl IntoIterator<Item = ClassExpr>) -> Self {
        AxiomBody::EquivalentClasses(members.into_iter().collect())
    }

    pub fn disjoint_classes(members: impl IntoIterator<Item = ClassExpr>) -> Self {
        AxiomBody::DisjointClasses(members.into_iter().collect())
    }

    pub fn same_individual(members: impl IntoIterator<Item = Individual>) -> Self {
        AxiomBody::SameIndividual(members.into_iter().collect())
    }

    pub fn different_individuals(members: impl IntoIterator<Item = Individual>) -> Self {
        AxiomBody::DifferentIndividuals(members.into_iter().collect())
    }

    pub fn kind(&self) -> AxiomKind {
        match self {
            AxiomBody::Declaration(_) => AxiomKind::Declaration,
            AxiomBody::SubClassOf { .. } => AxiomKind::SubClassOf,
            AxiomBody::EquivalentClasses(_) => AxiomKind::EquivalentClasses,
            AxiomBody::DisjointClasses(_) => AxiomKind::DisjointClasses,
            AxiomBody::DisjointUnion { .. } => AxiomKind::DisjointUnion,
            AxiomBody::SubObjectPropertyOf { .. } => AxiomKind::SubObjectPropertyOf,
            AxiomBody::SubPropertyChainOf { .. } => AxiomKind::SubPropertyChainOf,
            AxiomBody::EquivalentObjectProperties(_) => AxiomKind::EquivalentObjectProperties,
            AxiomBody::DisjointObjectProperties(_) => AxiomKind::DisjointObjectProperties,
            AxiomBody::ObjectPropertyDomain { .. } => AxiomKind::ObjectPropertyDomain,
            AxiomBody::ObjectPropertyRange { .. } => AxiomKind::ObjectPropertyRange,
            AxiomBody::InverseObjectProperties(..) => AxiomKind::InverseObjectProperties,
            AxiomBody::FunctionalObjectProperty(_) => AxiomKind::FunctionalObjectProperty,
            AxiomBody::InverseFunctionalObjectProperty(_) => {
                AxiomKind::InverseFunctionalObjectProperty
            }
            AxiomBody::ReflexiveObjectProperty(_) => AxiomKind::ReflexiveObjectProperty,
            AxiomBody::IrreflexiveObjectProperty(_) => AxiomKind::IrreflexiveObjectProperty,
            AxiomBody::SymmetricObjectProperty(_) => AxiomKind::SymmetricObjectProperty,
            AxiomBody::AsymmetricObjectProperty(_) => AxiomKind::AsymmetricObjectProperty,
            AxiomBody::TransitiveObjectProperty(_) => AxiomKind::TransitiveObjectProperty,
            AxiomBody::SubDataPropertyOf { .. } => AxiomKind::SubDataPropertyOf,
            AxiomBody::EquivalentDataProperties(_) => AxiomKind::EquivalentDataProperties,
            AxiomBody::DisjointDataProperties(_) => AxiomKind::DisjointDataProperties,
            AxiomBody::DataPropertyDomain { .. } => AxiomKind::DataPropertyDomain,
            AxiomBody::DataPropertyRange { .. } => AxiomKind::DataPropertyRange,
            AxiomBody::FunctionalDataProperty(_) => AxiomKind::FunctionalDataProperty,
            AxiomBody::DatatypeDefinition { .. } => AxiomKind::DatatypeDefinition,
            AxiomBody::HasKey { .. } => AxiomKind::HasKey,
            AxiomBody::ClassAssertion { .. } => AxiomKind::ClassAssertion,
            AxiomBody::SameIndividual(_) => AxiomKind::SameIndividual,
            AxiomBody::DifferentIndividuals(_) => AxiomKind::DifferentIndividuals,
            AxiomBody::ObjectPropertyAssertion { .. } => AxiomKind::ObjectPropertyAssertion,
            AxiomBody::NegativeObjectPropertyAssertion { .. } => {
                AxiomKind::NegativeObjectPropertyAssertion
            }
            AxiomBody::DataPropertyAssertion { .. } => AxiomKind::DataPropertyAssertion,
            AxiomBody::NegativeDataPropertyAssertion { .. } => {
                AxiomKind::NegativeDataPropertyAssertion
            }
            AxiomBody::AnnotationAssertion { .. } => AxiomKind::AnnotationAssertion,
            AxiomBody::SubAnnotationPropertyOf { .. } => AxiomKind::SubAnnotationPropertyOf,
            AxiomBody::AnnotationPropertyDomain { .. } => AxiomKind::AnnotationPropertyDomain,
            AxiomBody::AnnotationPropertyRange { .. } => AxiomKind::AnnotationPropertyRange,
            AxiomBody::SwrlRule(_) => AxiomKind::SwrlRule,
        }
    }

    /// The ordered operand tuple. Set-valued parts come out in their
    /// canonical order; n-ary kinds list their members flat.
    pub fn operands(&self) -> Vec<Operand> {
        use Operand as O;

        fn classes(set: &BTreeSet<ClassExpr>) -> Vec<Operand> {
            set.iter().cloned().map(Operand::Class).collect()
        }
        fn ope(p: &ObjectPropertyExpr) -> Operand {
            Operand::ObjectProperty(p.clone())
        }

        match self {
            AxiomBody::Declaration(e) => vec![O::Entity(e.clone())],
            AxiomBody::SubClassOf { sub, sup } => vec![O::Class(sub.clone()), O::Class(sup.clone())],
            AxiomBody::EquivalentClasses(set) | AxiomBody::DisjointClasses(set) => classes(set),
            AxiomBody::DisjointUnion { class, members } => {
                vec![O::Class(ClassExpr::Class(class.clone())), O::Set(classes(members))]
            }
            AxiomBody::SubObjectPropertyOf { sub, sup } => vec![ope(sub), ope(sup)],
            AxiomBody::SubPropertyChainOf { chain, sup } => {
                vec![O::List(chain.iter().map(ope).collect()), ope(sup)]
            }
            AxiomBody::EquivalentObjectProperties(set)
            | AxiomBody::DisjointObjectProperties(set) => set.iter().map(ope).collect(),
            AxiomBody::ObjectPropertyDomain { property, domain } => {
                vec![ope(property), O::Class(domain.clone())]
            }
            AxiomBody::ObjectPropertyRange { property, range } => {
                vec![ope(property), O::Class(range.clone())]
            }
            AxiomBody::InverseObjectProperties(a, b) => {
                let (a, b) = if b < a { (b, a) } else { (a, b) };
                vec![ope(a), ope(b)]
            }
            AxiomBody::FunctionalObjectProperty(p)
            | AxiomBody::InverseFunctionalObjectProperty(p)
            | AxiomBody::ReflexiveObjectProperty(p)
            | AxiomBody::IrreflexiveObjectProperty(p)
            | AxiomBody::SymmetricObjectProperty(p)
            | AxiomBody::AsymmetricObjectProperty(p)
            | AxiomBody::TransitiveObjectProperty(p) => vec![ope(p)],
            AxiomBody::SubDataPropertyOf { sub, sup } => {
                vec![O::DataProperty(sub.clone()), O::DataProperty(sup.clone())]
            }
            AxiomBody::EquivalentDataProperties(set) | AxiomBody::DisjointDataProperties(set) => {
                set.iter().cloned().map(O::DataProperty).collect()
            }
            AxiomBody::DataPropertyDomain { property, domain } => {
                vec![O::DataProperty(property.clone()), O::Class(domain.clone())]
            }
            AxiomBody::DataPropertyRange { property, range } => {
                vec![O::DataProperty(property.clone()), O::DataRange(range.clone())]
            }
            AxiomBody::FunctionalDataProperty(p) => vec![O::DataProperty(p.clone())],
            AxiomBody::DatatypeDefinition { datatype, range } => vec![
                O::DataRange(DataRange::Datatype(datatype.clone())),
                O::DataRange(range.clone()),
            ],
            AxiomBody::HasKey { class, properties } => vec![
                O::Class(class.clone()),
                O::Set(properties.iter().cloned().map(Operand::from).collect()),
            ],
            AxiomBody::ClassAssertion { class, individual } => {
                vec![O::Class(class.clone()), O::Individual(individual.clone())]
            }
            AxiomBody::SameIndividual(set) | AxiomBody::DifferentIndividuals(set) => {
                set.iter().cloned().map(O::Individual).collect()
            }
            AxiomBody::ObjectPropertyAssertion {
                property,
                subject,
                object,
            }
            | AxiomBody::NegativeObjectPropertyAssertion {
                property,
                subject,
                object,
            } => vec![
                ope(property),
                O::Individual(subject.clone()),
                O::Individual(object.clone()),
            ],
            AxiomBody::DataPropertyAssertion {
                property,
                subject,
                value,
            }
            | AxiomBody::NegativeDataPropertyAssertion {
                property,
                subject,
                value,
            } => vec![
                O::DataProperty(property.clone()),
                O::Individual(subject.clone()),
                O::Literal(value.clone()),
            ],
            AxiomBody::AnnotationAssertion {
                property,
                subject,
                value,
            } => vec![
                O::AnnotationProperty(property.clone()),
                O::AnnotationSubject(subject.clone()),
                O::AnnotationValue(value.clone()),
            ],
            AxiomBody::SubAnnotationPropertyOf { sub, sup } => vec![
                O::AnnotationProperty(sub.clone()),
                O::AnnotationProperty(sup.clone()),
            ],
            AxiomBody::AnnotationPropertyDomain { property, domain } => {
                vec![O::AnnotationProperty(property.clone()), O::Iri(domain.clone())]
            }
            AxiomBody::AnnotationPropertyRange { property, range } => {
                vec![O::AnnotationProperty(property.clone()), O::Iri(range.clone())]
            }
            AxiomBody::SwrlRule(rule) => vec![
                O::Set(rule.body.iter().cloned().map(O::Atom).collect()),
                O::Set(rule.head.iter().cloned().map(O::Atom).collect()),
            ],
        }
    }

    /// Number of members of an n-ary body; `None` for other kinds.
    pub fn nary_len(&self) -> Option<usize> {
        match self {
            AxiomBody::EquivalentClasses(s) | AxiomBody::DisjointClasses(s) => Some(s.len()),
            AxiomBody::EquivalentObjectProperties(s) | AxiomBody::DisjointObjectProperties(s) => {
                Some(s.len())
            }
            AxiomBody::EquivalentDataProperties(s) | AxiomBody::DisjointDataProperties(s) => {
                Some(s.len())
            }
            AxiomBody::SameIndividual(s) | AxiomBody::DifferentIndividuals(s) => Some(s.len()),
            _ => None,
        }
    }

    /// The `C(k,2)` binary bodies of an n-ary body. Members are ordered named
    /// first, then by their total order; pairs come out as `(i, j)` with `i < j`.
    /// Non-n-ary bodies yield themselves.
    pub fn as_pairwise(&self) -> Vec<AxiomBody> {
        match self {
            AxiomBody::EquivalentClasses(s) => {
                pairs(s, ClassExpr::is_anonymous, AxiomBody::EquivalentClasses)
            }
            AxiomBody::DisjointClasses(s) => pairs(s, ClassExpr::is_anonymous, AxiomBody::DisjointClasses),
            AxiomBody::EquivalentObjectProperties(s) => pairs(
                s,
                ObjectPropertyExpr::is_anonymous,
                AxiomBody::EquivalentObjectProperties,
            ),
            AxiomBody::DisjointObjectProperties(s) => pairs(
                s,
                ObjectPropertyExpr::is_anonymous,
                AxiomBody::DisjointObjectProperties,
            ),
            AxiomBody::EquivalentDataProperties(s) => {
                pairs(s, |_| false, AxiomBody::EquivalentDataProperties)
            }
            AxiomBody::DisjointDataProperties(s) => {
                pairs(s, |_| false, AxiomBody::DisjointDataProperties)
            }
            AxiomBody::SameIndividual(s) => pairs(s, Individual::is_anonymous, AxiomBody::SameIndividual),
            AxiomBody::DifferentIndividuals(s) => {
                pairs(s, Individual::is_anonymous, AxiomBody::DifferentIndividuals)
            }
            other => vec![other.clone()],
        }
    }
}

/// Members of `set` ordered named-first, then by `Ord`.
pub(crate) fn named_first<T: Ord>(set: &BTreeSet<T>, anonymous: impl Fn(&T) -> bool) -> Vec<&T> {
    let mut members: Vec<&T> = set.iter().collect();
    members.sort_by(|a, b| (anonymous(*a), *a).cmp(&(anonymous(*b), *b)));
    members
}

fn pairs<T: Ord + Clone>(
    set: &BTreeSet<T>,
    anonymous: impl Fn(&T) -> bool,
    build: impl Fn(BTreeSet<T>) -> AxiomBody,
) -> Vec<AxiomBody> {
    let members = named_first(set, anonymous);
    let mut out = Vec::new();
    for i in 0..members.len() {
        for j in (i + 1)..members.len() {
            out.push(build(BTreeSet::from([members[i].clone(), members[j].clone()])));
        }
    }
    out
}

// ============================================================================
// Axioms
// ============================================================================

/// A typed body plus its (unordered) annotations.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Axiom {
    pub body: AxiomBody,
    pub annotations: BTreeSet<Annotation>,
}

impl Axiom {
    pub fn new(body: AxiomBody) -> Self {
        Self {
            body,
            annotations: BTreeSet::new(),
        }
    }

    pub fn annotated(mut self, annotations: impl IntoIterator<Item = Annotation>) -> Self {
        self.annotations.extend(annotations);
        self
    }

    pub fn kind(&self) -> AxiomKind {
        self.body.kind()
    }

    pub fn operands(&self) -> Vec<Operand> {
        self.body.operands()
    }

    /// Same body, no annotations.
    pub fn without_annotations(&self) -> Axiom {
        Axiom::new(self.body.clone())
    }

    /// Binary decomposition without annotations.
    pub fn as_pairwise(&self) -> Vec<Axiom> {
        self.body.as_pairwise().into_iter().map(Axiom::new).collect()
    }

    /// Binary decomposition, each pair carrying this axiom's annotations.
    pub fn split_to_annotated_pairs(&self) -> Vec<Axiom> {
        self.body
            .as_pairwise()
            .into_iter()
            .map(|body| Axiom {
                body,
                annotations: self.annotations.clone(),
            })
            .collect()
    }
}

impl From<AxiomBody> for Axiom {
    fn from(value: AxiomBody) -> Self {
        Axiom::new(value)
    }
}
