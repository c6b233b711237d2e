use std::collections::BTreeSet;

use ontmap_graph::vocab::{owl, rdfs, xsd};
use ontmap_graph::{Literal, MemGraph, TripleGraph};
use ontmap_owl::model::{
    Atom, ClassExpr, DArg, DataRange, FacetRestriction, IArg, Individual, ObjectPropertyExpr,
    PropertyExpr, Rule,
};
use ontmap_owl::{
    Annotation, AnnotationSubject, AnnotationValue, Axiom, AxiomBody, AxiomKind, Entity, InternalModel,
    Iri,
};

fn u(local: &str) -> Iri {
    Iri::new(format!("urn:t:{local}"))
}

fn class(local: &str) -> ClassExpr {
    ClassExpr::Class(u(local))
}

fn op(local: &str) -> ObjectPropertyExpr {
    ObjectPropertyExpr::Named(u(local))
}

fn ind(local: &str) -> Individual {
    Individual::Named(u(local))
}

fn int(value: &str) -> Literal {
    Literal::typed(value, xsd::INTEGER)
}

fn set<T: Ord>(items: impl IntoIterator<Item = T>) -> BTreeSet<T> {
    items.into_iter().collect()
}

/// One axiom of every kind over a shared vocabulary.
fn samples() -> Vec<Axiom> {
    use AxiomBody as B;

    let restriction = DataRange::Restriction {
        datatype: Iri::new(xsd::INTEGER),
        facets: set([FacetRestriction {
            facet: Iri::new(xsd::MIN_INCLUSIVE),
            value: int("1"),
        }]),
    };
    let rule = Rule::new(
        [Atom::Class {
            class: class("A"),
            arg: IArg::Variable(u("x")),
        }],
        [Atom::DataProperty {
            property: u("d"),
            first: IArg::Variable(u("x")),
            second: DArg::Literal(int("7")),
        }],
    );

    let bodies = vec![
        B::Declaration(Entity::class(u("A"))),
        B::SubClassOf {
            sub: class("A"),
            sup: ClassExpr::some(op("p"), class("B")),
        },
        B::equivalent_classes([class("A"), class("B"), class("C")]),
        B::disjoint_classes([class("A"), class("C")]),
        B::DisjointUnion {
            class: u("A"),
            members: set([class("B"), class("C")]),
        },
        B::SubObjectPropertyOf {
            sub: op("p"),
            sup: op("q"),
        },
        B::SubPropertyChainOf {
            chain: vec![op("p"), op("q")],
            sup: op("r"),
        },
        B::EquivalentObjectProperties(set([op("p"), op("q")])),
        B::DisjointObjectProperties(set([op("p"), op("q"), op("r")])),
        B::ObjectPropertyDomain {
            property: op("p"),
            domain: class("A"),
        },
        B::ObjectPropertyRange {
            property: op("p"),
            range: ClassExpr::union_of([class("B"), class("C")]),
        },
        B::inverse_object_properties(op("p"), op("r")),
        B::FunctionalObjectProperty(op("p")),
        B::InverseFunctionalObjectProperty(op("p")),
        B::ReflexiveObjectProperty(op("p")),
        B::IrreflexiveObjectProperty(op("q")),
        B::SymmetricObjectProperty(op("q")),
        B::AsymmetricObjectProperty(op("r")),
        B::TransitiveObjectProperty(op("r")),
        B::SubDataPropertyOf {
            sub: u("d"),
            sup: u("e"),
        },
        B::EquivalentDataProperties(set([u("d"), u("e")])),
        B::DisjointDataProperties(set([u("d"), u("e")])),
        B::DataPropertyDomain {
            property: u("d"),
            domain: class("A"),
        },
        B::DataPropertyRange {
            property: u("d"),
            range: DataRange::datatype(xsd::INTEGER),
        },
        B::FunctionalDataProperty(u("d")),
        B::DatatypeDefinition {
            datatype: u("DT"),
            range: restriction,
        },
        B::HasKey {
            class: class("A"),
            properties: set([PropertyExpr::Object(op("p")), PropertyExpr::Data(u("d"))]),
        },
        B::ClassAssertion {
            class: class("A"),
            individual: ind("i"),
        },
        B::same_individual([ind("i"), ind("j")]),
        B::different_individuals([ind("i"), ind("j"), ind("k")]),
        B::object_property_assertion(op("p"), ind("i"), ind("j")),
        B::NegativeObjectPropertyAssertion {
            property: op("q"),
            subject: ind("i"),
            object: ind("j"),
        },
        B::DataPropertyAssertion {
            property: u("d"),
            subject: ind("i"),
            value: int("5"),
        },
        B::NegativeDataPropertyAssertion {
            property: u("d"),
            subject: ind("j"),
            value: int("6"),
        },
        B::AnnotationAssertion {
            property: Iri::new(rdfs::LABEL),
            subject: AnnotationSubject::Iri(u("A")),
            value: AnnotationValue::Literal(Literal::plain("thing A")),
        },
        B::SubAnnotationPropertyOf {
            sub: u("ap1"),
            sup: u("ap2"),
        },
        B::AnnotationPropertyDomain {
            property: u("ap1"),
            domain: u("A"),
        },
        B::AnnotationPropertyRange {
            property: u("ap1"),
            range: Iri::new(xsd::STRING),
        },
        B::SwrlRule(rule),
    ];
    bodies.into_iter().map(Axiom::new).collect()
}

fn comment(text: &str) -> Annotation {
    Annotation::new(rdfs::COMMENT, Literal::plain(text))
}

#[test]
fn samples_cover_every_kind() {
    let kinds: BTreeSet<AxiomKind> = samples().iter().map(Axiom::kind).collect();
    assert_eq!(kinds.len(), AxiomKind::COUNT);
}

#[test]
fn every_kind_reads_back_what_it_wrote() {
    for axiom in samples() {
        let kind = axiom.kind();
        let mut model = InternalModel::new(MemGraph::new());
        model
            .add_axiom(&axiom)
            .unwrap_or_else(|err| panic!("{kind:?} not written: {err}"));
        let read: Vec<Axiom> = model.axioms_of_kind(kind).collect();
        assert_eq!(read, vec![axiom.clone()], "{kind:?}");

        let object = model.find_object(&axiom).expect("object");
        for t in object.triples() {
            assert!(model.graph().contains(t), "{kind:?}: dangling backing triple {t}");
        }
    }
}

#[test]
fn every_kind_keeps_its_annotations() {
    for axiom in samples() {
        let kind = axiom.kind();
        let annotated = axiom.annotated([comment("why"), comment("how").with_annotations([comment("nested")])]);
        let mut model = InternalModel::new(MemGraph::new());
        model.add_axiom(&annotated).expect("write");
        assert!(model.contains_axiom(&annotated), "{kind:?}");
        assert!(!model.contains_axiom(&annotated.without_annotations()), "{kind:?}");
    }
}

#[test]
fn all_kinds_coexist_in_one_graph() {
    let mut model = InternalModel::new(MemGraph::new());
    for axiom in samples() {
        model.add_axiom(&axiom).expect("write");
    }
    for axiom in samples() {
        assert!(model.contains_axiom(&axiom), "{:?} missing", axiom.kind());
    }
    model.load_all();
    assert!(model.diagnostics().is_empty(), "{:?}", model.diagnostics());
}

#[test]
fn every_kind_can_be_removed_again() {
    for axiom in samples() {
        let kind = axiom.kind();
        let mut model = InternalModel::new(MemGraph::new());
        model.add_axiom(&axiom).expect("write");
        assert!(model.remove_axiom(&axiom).expect("remove"), "{kind:?}");
        assert!(!model.contains_axiom(&axiom), "{kind:?}");
    }
}

#[test]
fn equivalence_is_written_as_every_pair() {
    let axiom = Axiom::new(AxiomBody::equivalent_classes([class("A"), class("B"), class("C"), class("D")]));
    let mut model = InternalModel::new(MemGraph::new());
    let written = model.add_axiom(&axiom).expect("write");
    let pairs = written.iter().filter(|t| t.predicate_is(owl::EQUIVALENT_CLASS)).count();
    assert_eq!(pairs, 6);
    assert_eq!(model.axioms_of_kind(AxiomKind::EquivalentClasses).count(), 1);
}

#[test]
fn two_member_disjointness_uses_the_binary_form() {
    let mut model = InternalModel::new(MemGraph::new());
    let written = model
        .add_axiom(&Axiom::new(AxiomBody::disjoint_classes([class("A"), class("B")])))
        .expect("write");
    assert!(written.iter().any(|t| t.predicate_is(owl::DISJOINT_WITH)));
    assert!(!written.iter().any(|t| t.predicate_is(owl::MEMBERS)));

    let written = model
        .add_axiom(&Axiom::new(AxiomBody::disjoint_classes([class("A"), class("B"), class("C")])))
        .expect("write");
    assert!(written.iter().any(|t| t.predicate_is(owl::MEMBERS)));
    assert_eq!(model.axioms_of_kind(AxiomKind::DisjointClasses).count(), 2);
}

#[test]
fn writing_twice_adds_nothing_new_for_named_axioms() {
    let axiom = Axiom::new(AxiomBody::SubClassOf {
        sub: class("A"),
        sup: class("B"),
    });
    let mut model = InternalModel::new(MemGraph::new());
    model.add_axiom(&axiom).expect("first");
    let len = model.graph().len();
    model.add_axiom(&axiom).expect("second");
    assert_eq!(model.graph().len(), len);
    assert_eq!(model.axioms_of_kind(AxiomKind::SubClassOf).count(), 1);
}
