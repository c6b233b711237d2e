//! Typed OWL2 model: entities, expressions, SWRL rules and axioms.
//!
//! Everything here is a plain value with a total order. Set-valued parts are
//! `BTreeSet`s, so two values built from the same members in a different
//! order (or with repeats) are equal; ordered parts (property chains,
//! built-in arguments) stay `Vec`s.

pub mod axiom;
pub mod expr;
pub mod swrl;

use std::collections::BTreeSet;
use std::fmt;

use ontmap_graph::vocab::{owl, rdfs};
use ontmap_graph::Node;
use serde::{Deserialize, Serialize};

pub use ontmap_graph::Literal;

pub use axiom::{Axiom, AxiomBody, AxiomKind, Operand};
pub use expr::{ClassExpr, DataRange, FacetRestriction};
pub use swrl::{Atom, DArg, IArg, Rule};

// ============================================================================
// Entities
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Iri(String);

impl Iri {
    pub fn new(iri: impl Into<String>) -> Self {
        Self(iri.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn to_node(&self) -> Node {
        Node::iri(self.0.clone())
    }
}

impl fmt::Display for Iri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}>", self.0)
    }
}

impl From<&str> for Iri {
    fn from(value: &str) -> Self {
        Iri::new(value)
    }
}

impl From<String> for Iri {
    fn from(value: String) -> Self {
        Iri(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EntityKind {
    Class,
    Datatype,
    ObjectProperty,
    DataProperty,
    AnnotationProperty,
    NamedIndividual,
}

impl EntityKind {
    pub const ALL: [EntityKind; 6] = [
        EntityKind::Class,
        EntityKind::Datatype,
        EntityKind::ObjectProperty,
        EntityKind::DataProperty,
        EntityKind::AnnotationProperty,
        EntityKind::NamedIndividual,
    ];

    /// The `rdf:type` object that declares an entity of this kind.
    pub fn type_iri(self) -> &'static str {
        match self {
            EntityKind::Class => owl::CLASS,
            EntityKind::Datatype => rdfs::DATATYPE,
            EntityKind::ObjectProperty => owl::OBJECT_PROPERTY,
            EntityKind::DataProperty => owl::DATATYPE_PROPERTY,
            EntityKind::AnnotationProperty => owl::ANNOTATION_PROPERTY,
            EntityKind::NamedIndividual => owl::NAMED_INDIVIDUAL,
        }
    }

    pub fn from_type_iri(iri: &str) -> Option<Self> {
        EntityKind::ALL.into_iter().find(|k| k.type_iri() == iri)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Entity {
    pub kind: EntityKind,
    pub iri: Iri,
}

impl Entity {
    pub fn new(kind: EntityKind, iri: impl Into<Iri>) -> Self {
        Self {
            kind,
            iri: iri.into(),
        }
    }

    pub fn class(iri: impl Into<Iri>) -> Self {
        Self::new(EntityKind::Class, iri)
    }

    pub fn object_property(iri: impl Into<Iri>) -> Self {
        Self::new(EntityKind::ObjectProperty, iri)
    }

    pub fn data_property(iri: impl Into<Iri>) -> Self {
        Self::new(EntityKind::DataProperty, iri)
    }

    pub fn annotation_property(iri: impl Into<Iri>) -> Self {
        Self::new(EntityKind::AnnotationProperty, iri)
    }

    pub fn datatype(iri: impl Into<Iri>) -> Self {
        Self::new(EntityKind::Datatype, iri)
    }

    pub fn named_individual(iri: impl Into<Iri>) -> Self {
        Self::new(EntityKind::NamedIndividual, iri)
    }
}

// ============================================================================
// Individuals and properties
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Individual {
    Named(Iri),
    /// Blank node label.
    Anonymous(String),
}

impl Individual {
    pub fn named(iri: impl Into<Iri>) -> Self {
        Individual::Named(iri.into())
    }

    pub fn anonymous(label: impl Into<String>) -> Self {
        Individual::Anonymous(label.into())
    }

    pub fn is_anonymous(&self) -> bool {
        matches!(self, Individual::Anonymous(_))
    }

    pub fn to_node(&self) -> Node {
        match self {
            Individual::Named(iri) => iri.to_node(),
            Individual::Anonymous(label) => Node::blank(label.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ObjectPropertyExpr {
    Named(Iri),
    /// `ObjectInverseOf(p)`.
    Inverse(Iri),
}

impl ObjectPropertyExpr {
    pub fn named(iri: impl Into<Iri>) -> Self {
        ObjectPropertyExpr::Named(iri.into())
    }

    pub fn inverse(iri: impl Into<Iri>) -> Self {
        ObjectPropertyExpr::Inverse(iri.into())
    }

    pub fn is_anonymous(&self) -> bool {
        matches!(self, ObjectPropertyExpr::Inverse(_))
    }

    /// The underlying named property.
    pub fn iri(&self) -> &Iri {
        match self {
            ObjectPropertyExpr::Named(iri) | ObjectPropertyExpr::Inverse(iri) => iri,
        }
    }
}

/// Key properties may be object or data properties.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PropertyExpr {
    Object(ObjectPropertyExpr),
    Data(Iri),
}

// ============================================================================
// Annotations
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AnnotationSubject {
    Iri(Iri),
    Anonymous(String),
}

impl AnnotationSubject {
    pub fn to_node(&self) -> Node {
        match self {
            AnnotationSubject::Iri(iri) => iri.to_node(),
            AnnotationSubject::Anonymous(label) => Node::blank(label.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AnnotationValue {
    Iri(Iri),
    Literal(Literal),
    Anonymous(String),
}

impl AnnotationValue {
    pub fn to_node(&self) -> Node {
        match self {
            AnnotationValue::Iri(iri) => iri.to_node(),
            AnnotationValue::Literal(lit) => Node::Literal(lit.clone()),
            AnnotationValue::Anonymous(label) => Node::blank(label.clone()),
        }
    }

    pub fn from_node(node: &Node) -> Self {
        match node {
            Node::Iri(iri) => AnnotationValue::Iri(Iri::new(iri.clone())),
            Node::Blank(label) => AnnotationValue::Anonymous(label.clone()),
            Node::Literal(lit) => AnnotationValue::Literal(lit.clone()),
        }
    }
}

impl From<Literal> for AnnotationValue {
    fn from(value: Literal) -> Self {
        AnnotationValue::Literal(value)
    }
}

/// `property value`, optionally annotated itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Annotation {
    pub property: Iri,
    pub value: AnnotationValue,
    pub annotations: BTreeSet<Annotation>,
}

impl Annotation {
    pub fn new(property: impl Into<Iri>, value: impl Into<AnnotationValue>) -> Self {
        Self {
            property: property.into(),
            value: value.into(),
            annotations: BTreeSet::new(),
        }
    }

    pub fn with_annotations(mut self, annotations: impl IntoIterator<Item = Annotation>) -> Self {
        self.annotations.extend(annotations);
        self
    }

    /// Rooted-tree walk: this annotation plus every nested one, depth first.
    pub fn flatten(&self) -> Vec<&Annotation> {
        let mut out = vec![self];
        for nested in &self.annotations {
            out.extend(nested.flatten());
        }
        out
    }
}
