//! SWRL rules.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::{ClassExpr, DataRange, Individual, Iri, Literal, ObjectPropertyExpr};

/// Individual-valued atom argument.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum IArg {
    Variable(Iri),
    Individual(Individual),
}

/// Data-valued atom argument.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DArg {
    Variable(Iri),
    Literal(Literal),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Atom {
    Class {
        class: ClassExpr,
        arg: IArg,
    },
    DataRange {
        range: DataRange,
        arg: DArg,
    },
    ObjectProperty {
        property: ObjectPropertyExpr,
        first: IArg,
        second: IArg,
    },
    DataProperty {
        property: Iri,
        first: IArg,
        second: DArg,
    },
    SameIndividual(IArg, IArg),
    DifferentIndividuals(IArg, IArg),
    /// Argument order is significant.
    BuiltIn {
        builtin: Iri,
        args: Vec<DArg>,
    },
}

impl Atom {
    /// Variables mentioned by this atom, in argument order.
    pub fn variables(&self) -> Vec<&Iri> {
        fn i(arg: &IArg) -> Option<&Iri> {
            match arg {
                IArg::Variable(v) => Some(v),
                IArg::Individual(_) => None,
            }
        }
        fn d(arg: &DArg) -> Option<&Iri> {
            match arg {
                DArg::Variable(v) => Some(v),
                DArg::Literal(_) => None,
            }
        }
        match self {
            Atom::Class { arg, .. } => i(arg).into_iter().collect(),
            Atom::DataRange { arg, .. } => d(arg).into_iter().collect(),
            Atom::ObjectProperty { first, second, .. }
            | Atom::SameIndividual(first, second)
            | Atom::DifferentIndividuals(first, second) => {
                i(first).into_iter().chain(i(second)).collect()
            }
            Atom::DataProperty { first, second, .. } => i(first).into_iter().chain(d(second)).collect(),
            Atom::BuiltIn { args, .. } => args.iter().filter_map(d).collect(),
        }
    }
}

/// `body -> head`; both sides are conjunctions, hence sets.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Rule {
    pub body: BTreeSet<Atom>,
    pub head: BTreeSet<Atom>,
}

impl Rule {
    pub fn new(body: impl IntoIterator<Item = Atom>, head: impl IntoIterator<Item = Atom>) -> Self {
        Self {
            body: body.into_iter().collect(),
            head: head.into_iter().collect(),
        }
    }

    pub fn variables(&self) -> BTreeSet<&Iri> {
        self.body
            .iter()
            .chain(self.head.iter())
            .flat_map(|a| a.variables())
            .collect()
    }
}
