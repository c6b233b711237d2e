//! Class expressions and data ranges.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::{Individual, Iri, Literal, ObjectPropertyExpr};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ClassExpr {
    Class(Iri),
    IntersectionOf(BTreeSet<ClassExpr>),
    UnionOf(BTreeSet<ClassExpr>),
    ComplementOf(Box<ClassExpr>),
    OneOf(BTreeSet<Individual>),
    ObjectSomeValuesFrom {
        property: ObjectPropertyExpr,
        filler: Box<ClassExpr>,
    },
    ObjectAllValuesFrom {
        property: ObjectPropertyExpr,
        filler: Box<ClassExpr>,
    },
    ObjectHasValue {
        property: ObjectPropertyExpr,
        value: Individual,
    },
    ObjectHasSelf(ObjectPropertyExpr),
    ObjectMinCardinality {
        cardinality: u32,
        property: ObjectPropertyExpr,
        filler: Option<Box<ClassExpr>>,
    },
    ObjectMaxCardinality {
        cardinality: u32,
        property: ObjectPropertyExpr,
        filler: Option<Box<ClassExpr>>,
    },
    ObjectExactCardinality {
        cardinality: u32,
        property: ObjectPropertyExpr,
        filler: Option<Box<ClassExpr>>,
    },
    DataSomeValuesFrom {
        property: Iri,
        range: Box<DataRange>,
    },
    DataAllValuesFrom {
        property: Iri,
        range: Box<DataRange>,
    },
    DataHasValue {
        property: Iri,
        value: Literal,
    },
    DataMinCardinality {
        cardinality: u32,
        property: Iri,
        range: Option<Box<DataRange>>,
    },
    DataMaxCardinality {
        cardinality: u32,
        property: Iri,
        range: Option<Box<DataRange>>,
    },
    DataExactCardinality {
        cardinality: u32,
        property: Iri,
        range: Option<Box<DataRange>>,
    },
}

impl ClassExpr {
    pub fn class(iri: impl Into<Iri>) -> Self {
        ClassExpr::Class(iri.into())
    }

    pub fn intersection_of(members: impl IntoIterator<Item = ClassExpr>) -> Self {
        ClassExpr::IntersectionOf(members.into_iter().collect())
    }

    pub fn union_of(members: impl IntoIterator<Item = ClassExpr>) -> Self {
        ClassExpr::UnionOf(members.into_iter().collect())
    }

    pub fn complement_of(operand: ClassExpr) -> Self {
        ClassExpr::ComplementOf(Box::new(operand))
    }

    pub fn one_of(members: impl IntoIterator<Item = Individual>) -> Self {
        ClassExpr::OneOf(members.into_iter().collect())
    }

    pub fn some(property: ObjectPropertyExpr, filler: ClassExpr) -> Self {
        ClassExpr::ObjectSomeValuesFrom {
            property,
            filler: Box::new(filler),
        }
    }

    pub fn all(property: ObjectPropertyExpr, filler: ClassExpr) -> Self {
        ClassExpr::ObjectAllValuesFrom {
            property,
            filler: Box::new(filler),
        }
    }

    pub fn as_named(&self) -> Option<&Iri> {
        match self {
            ClassExpr::Class(iri) => Some(iri),
            _ => None,
        }
    }

    pub fn is_anonymous(&self) -> bool {
        self.as_named().is_none()
    }
}

/// `facet value` pair of a datatype restriction (e.g. `xsd:minInclusive 5`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FacetRestriction {
    pub facet: Iri,
    pub value: Literal,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DataRange {
    Datatype(Iri),
    IntersectionOf(BTreeSet<DataRange>),
    UnionOf(BTreeSet<DataRange>),
    ComplementOf(Box<DataRange>),
    OneOf(BTreeSet<Literal>),
    Restriction {
        datatype: Iri,
        facets: BTreeSet<FacetRestriction>,
    },
}

impl DataRange {
    pub fn datatype(iri: impl Into<Iri>) -> Self {
        DataRange::Datatype(iri.into())
    }

    pub fn as_named(&self) -> Option<&Iri> {
        match self {
            DataRange::Datatype(iri) => Some(iri),
            _ => None,
        }
    }

    pub fn is_anonymous(&self) -> bool {
        self.as_named().is_none()
    }
}
