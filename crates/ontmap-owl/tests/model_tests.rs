use std::sync::Arc;

use ontmap_graph::vocab::{owl, rdf, rdfs};
use ontmap_graph::{load_rdf, Literal, MemGraph, Node, RdfFormat, Triple, TripleGraph};
use ontmap_owl::model::{ClassExpr, ObjectPropertyExpr};
use ontmap_owl::{
    Annotation, Axiom, AxiomBody, AxiomKind, Entity, IllegalMutation, InternalConfig, InternalModel, Iri,
    ListError, TranslationError,
};

const PREFIXES: &str = r#"
@prefix : <http://example.org/zoo#> .
@prefix owl: <http://www.w3.org/2002/07/owl#> .
@prefix rdf: <http://www.w3.org/1999/02/22-rdf-syntax-ns#> .
@prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .
"#;

fn zoo(local: &str) -> Iri {
    Iri::new(format!("http://example.org/zoo#{local}"))
}

fn class(local: &str) -> ClassExpr {
    ClassExpr::Class(zoo(local))
}

fn turtle(body: &str) -> MemGraph {
    load_rdf(format!("{PREFIXES}{body}").as_bytes(), RdfFormat::Turtle).expect("turtle")
}

fn model(body: &str) -> InternalModel<MemGraph> {
    InternalModel::new(turtle(body))
}

fn iri(s: &str) -> Node {
    Node::iri(s)
}

fn t(s: Node, p: &str, o: Node) -> Triple {
    Triple::with_predicate(s, p, o)
}

#[test]
fn disjoint_with_pairs_stay_binary() {
    let m = model(
        r#"
:Cat a owl:Class . :Dog a owl:Class . :Fish a owl:Class .
:Cat owl:disjointWith :Dog .
:Dog owl:disjointWith :Fish .
"#,
    );
    let found: Vec<Axiom> = m.axioms_of_kind(AxiomKind::DisjointClasses).collect();
    assert_eq!(
        found,
        vec![
            Axiom::new(AxiomBody::disjoint_classes([class("Cat"), class("Dog")])),
            Axiom::new(AxiomBody::disjoint_classes([class("Dog"), class("Fish")])),
        ]
    );
}

#[test]
fn equivalence_follows_connected_pairs() {
    let m = model(
        r#"
:Cat a owl:Class . :Feline a owl:Class . :Felis a owl:Class . :Dog a owl:Class .
:Cat owl:equivalentClass :Feline .
:Felis owl:equivalentClass :Feline .
"#,
    );
    let found: Vec<Axiom> = m.axioms_of_kind(AxiomKind::EquivalentClasses).collect();
    assert_eq!(
        found,
        vec![Axiom::new(AxiomBody::equivalent_classes([
            class("Cat"),
            class("Feline"),
            class("Felis"),
        ]))]
    );
    let object = m.find_object(&found[0]).expect("object");
    let pairs = object
        .triples()
        .iter()
        .filter(|t| t.predicate_is(owl::EQUIVALENT_CLASS))
        .count();
    assert_eq!(pairs, 2);
}

#[test]
fn equivalence_with_different_annotations_stays_apart() {
    let m = model(
        r#"
:A a owl:Class . :B a owl:Class . :C a owl:Class .
:A owl:equivalentClass :B .
:B owl:equivalentClass :C .
[] a owl:Axiom ; owl:annotatedSource :B ; owl:annotatedProperty owl:equivalentClass ;
   owl:annotatedTarget :C ; rdfs:comment "from a thesaurus" .
"#,
    );
    let found: Vec<Axiom> = m.axioms_of_kind(AxiomKind::EquivalentClasses).collect();
    assert_eq!(found.len(), 2);
    assert!(found.contains(&Axiom::new(AxiomBody::equivalent_classes([class("A"), class("B")]))));
    assert!(found.contains(
        &Axiom::new(AxiomBody::equivalent_classes([class("B"), class("C")]))
            .annotated([Annotation::new(rdfs::COMMENT, Literal::plain("from a thesaurus"))])
    ));
}

#[test]
fn all_disjoint_classes_is_one_nary_axiom() {
    let m = model(
        r#"
:Cat a owl:Class . :Dog a owl:Class . :Fish a owl:Class .
[] a owl:AllDisjointClasses ; owl:members ( :Cat :Dog :Fish ) .
"#,
    );
    let found: Vec<Axiom> = m.axioms_of_kind(AxiomKind::DisjointClasses).collect();
    assert_eq!(
        found,
        vec![Axiom::new(AxiomBody::disjoint_classes([class("Cat"), class("Dog"), class("Fish")]))]
    );
    assert!(m.diagnostics().is_empty());
}

#[test]
fn two_encodings_of_one_axiom_merge() {
    let m = model(
        r#"
:Cat a owl:Class . :Dog a owl:Class .
:Cat owl:disjointWith :Dog .
[] a owl:AllDisjointClasses ; owl:members ( :Dog :Cat ) .
"#,
    );
    let objects = m.objects_of_kind(AxiomKind::DisjointClasses);
    assert_eq!(objects.len(), 1);
    let triples = objects[0].triples();
    assert!(triples.iter().any(|t| t.predicate_is(owl::DISJOINT_WITH)));
    assert!(triples.iter().any(|t| t.predicate_is(owl::MEMBERS)));
}

#[test]
fn cyclic_member_list_becomes_a_diagnostic() {
    let group = Node::blank("g");
    let (l1, l2) = (Node::blank("l1"), Node::blank("l2"));
    let graph = MemGraph::from_triples([
        t(iri("urn:A"), rdf::TYPE, iri(owl::CLASS)),
        t(iri("urn:B"), rdf::TYPE, iri(owl::CLASS)),
        t(group.clone(), rdf::TYPE, iri(owl::ALL_DISJOINT_CLASSES)),
        t(group, owl::MEMBERS, l1.clone()),
        t(l1.clone(), rdf::FIRST, iri("urn:A")),
        t(l1.clone(), rdf::REST, l2.clone()),
        t(l2.clone(), rdf::FIRST, iri("urn:B")),
        t(l2, rdf::REST, l1),
    ]);
    let m = InternalModel::new(graph);
    assert_eq!(m.axioms_of_kind(AxiomKind::DisjointClasses).count(), 0);

    let diagnostics = m.diagnostics();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].kind, AxiomKind::DisjointClasses);
    assert!(diagnostics[0].local);
    assert!(matches!(
        diagnostics[0].error,
        TranslationError::MalformedList(ListError::Cycle { .. })
    ));
}

#[test]
fn diagnostics_tell_imported_statements_apart() {
    let (group, l1, l2) = (Node::blank("g"), Node::blank("l1"), Node::blank("l2"));
    let import = MemGraph::from_triples([
        t(iri("urn:A"), rdf::TYPE, iri(owl::CLASS)),
        t(iri("urn:B"), rdf::TYPE, iri(owl::CLASS)),
        t(group.clone(), rdf::TYPE, iri(owl::ALL_DISJOINT_CLASSES)),
        t(group, owl::MEMBERS, l1.clone()),
        t(l1.clone(), rdf::FIRST, iri("urn:A")),
        t(l1.clone(), rdf::REST, l2.clone()),
        t(l2.clone(), rdf::FIRST, iri("urn:B")),
        t(l2, rdf::REST, l1),
    ]);
    let m = InternalModel::with_config(
        MemGraph::new().with_import(Arc::new(import)),
        InternalConfig::default().with_imports(true),
    );
    assert_eq!(m.axioms_of_kind(AxiomKind::DisjointClasses).count(), 0);
    let diagnostics = m.diagnostics();
    assert_eq!(diagnostics.len(), 1);
    assert!(!diagnostics[0].local);
    assert!(diagnostics[0].to_string().ends_with(", imported)"));
}

#[test]
fn diagnostics_can_be_switched_off() {
    let graph = MemGraph::from_triples([
        t(iri("urn:A"), rdf::TYPE, iri(owl::CLASS)),
        t(Node::blank("g"), rdf::TYPE, iri(owl::ALL_DISJOINT_CLASSES)),
        t(Node::blank("g"), owl::MEMBERS, Node::blank("dangling")),
    ]);
    let config = InternalConfig {
        collect_diagnostics: false,
        ..InternalConfig::default()
    };
    let m = InternalModel::with_config(graph, config);
    m.load_all();
    assert!(m.diagnostics().is_empty());
}

#[test]
fn removing_one_reification_keeps_the_rest() {
    let (a, b) = (iri("urn:A"), iri("urn:B"));
    let (r1, r2) = (Node::blank("r1"), Node::blank("r2"));
    let mut triples = vec![
        t(a.clone(), rdf::TYPE, iri(owl::CLASS)),
        t(b.clone(), rdf::TYPE, iri(owl::CLASS)),
        t(a.clone(), rdfs::SUB_CLASS_OF, b.clone()),
    ];
    for (r, p, text) in [(&r1, rdfs::COMMENT, "one"), (&r2, rdfs::LABEL, "two")] {
        triples.extend([
            t(r.clone(), rdf::TYPE, iri(owl::AXIOM)),
            t(r.clone(), owl::ANNOTATED_SOURCE, a.clone()),
            t(r.clone(), owl::ANNOTATED_PROPERTY, iri(rdfs::SUB_CLASS_OF)),
            t(r.clone(), owl::ANNOTATED_TARGET, b.clone()),
            t(r.clone(), p, Node::Literal(Literal::plain(text))),
        ]);
    }
    let mut m = InternalModel::new(MemGraph::from_triples(triples));

    let body = AxiomBody::SubClassOf {
        sub: ClassExpr::class("urn:A"),
        sup: ClassExpr::class("urn:B"),
    };
    let one = Annotation::new(rdfs::COMMENT, Literal::plain("one"));
    let two = Annotation::new(rdfs::LABEL, Literal::plain("two"));
    let both = Axiom::new(body.clone()).annotated([one, two.clone()]);
    assert!(m.contains_axiom(&both));

    let r1_triples = m.graph().find(Some(&r1), None, None);
    assert_eq!(r1_triples.len(), 5);
    for triple in &r1_triples {
        assert!(m.remove_triple(triple));
    }

    assert!(!m.contains_axiom(&both));
    assert!(m.contains_axiom(&Axiom::new(body).annotated([two])));
}

#[test]
fn imported_axioms_cannot_be_removed() {
    let import = turtle(
        r#"
:Cat a owl:Class . :Animal a owl:Class .
:Cat rdfs:subClassOf :Animal .
"#,
    );
    let axiom = Axiom::new(AxiomBody::SubClassOf {
        sub: class("Cat"),
        sup: class("Animal"),
    });

    let local_only = InternalModel::new(MemGraph::new().with_import(Arc::new(import.clone())));
    assert!(!local_only.contains_axiom(&axiom));

    let mut m = InternalModel::with_config(
        MemGraph::new().with_import(Arc::new(import)),
        InternalConfig::default().with_imports(true),
    );
    assert!(m.contains_axiom(&axiom));
    assert_eq!(
        m.remove_axiom(&axiom),
        Err(IllegalMutation::NotLocal {
            kind: AxiomKind::SubClassOf
        })
    );
    assert!(m.contains_axiom(&axiom));
}

#[test]
fn removing_an_absent_axiom_is_a_no_op() {
    let mut m = model(":Cat a owl:Class .");
    let before = m.graph().len();
    let absent = Axiom::new(AxiomBody::SubClassOf {
        sub: class("Cat"),
        sup: class("Dog"),
    });
    assert_eq!(m.remove_axiom(&absent), Ok(false));
    assert_eq!(m.graph().len(), before);
}

#[test]
fn declarations_other_axioms_use_cannot_be_removed() {
    let mut m = model(
        r#"
:Cat a owl:Class . :Animal a owl:Class .
:Cat rdfs:subClassOf :Animal .
"#,
    );
    let declaration = Axiom::new(AxiomBody::Declaration(Entity::class(zoo("Cat"))));
    assert_eq!(
        m.remove_axiom(&declaration),
        Err(IllegalMutation::Shared {
            kind: AxiomKind::Declaration
        })
    );
    assert!(m.contains_axiom(&declaration));
    assert_eq!(m.graph().len(), 3);

    let sub = Axiom::new(AxiomBody::SubClassOf {
        sub: class("Cat"),
        sup: class("Animal"),
    });
    assert_eq!(m.remove_axiom(&sub), Ok(true));
    assert_eq!(m.remove_axiom(&declaration), Ok(true));
    assert!(!m.contains_axiom(&declaration));
    assert_eq!(m.graph().len(), 1);
}

#[test]
fn removal_keeps_typing_triples_when_declarations_are_not_read() {
    let mut m = InternalModel::with_config(
        turtle(
            r#"
:Cat a owl:Class . :Animal a owl:Class .
:Cat rdfs:subClassOf :Animal .
"#,
        ),
        InternalConfig {
            read_declarations: false,
            ..InternalConfig::default()
        },
    );
    let sub = Axiom::new(AxiomBody::SubClassOf {
        sub: class("Cat"),
        sup: class("Animal"),
    });
    assert_eq!(m.remove_axiom(&sub), Ok(true));
    let cat = iri("http://example.org/zoo#Cat");
    let animal = iri("http://example.org/zoo#Animal");
    assert!(m.graph().contains(&t(cat, rdf::TYPE, iri(owl::CLASS))));
    assert!(m.graph().contains(&t(animal, rdf::TYPE, iri(owl::CLASS))));
    assert_eq!(m.graph().len(), 2);
}

#[test]
fn add_then_remove_leaves_only_declarations() {
    let mut m = InternalModel::new(MemGraph::new());
    let axiom = Axiom::new(AxiomBody::SubClassOf {
        sub: class("Cat"),
        sup: ClassExpr::some(ObjectPropertyExpr::named(zoo("eats")), class("Fish")),
    })
    .annotated([Annotation::new(rdfs::COMMENT, Literal::plain("mostly"))]);
    m.add_axiom(&axiom).expect("write");
    assert!(m.contains_axiom(&axiom));

    assert_eq!(m.remove_axiom(&axiom), Ok(true));
    assert!(!m.contains_axiom(&axiom));
    // Cat, Fish, eats
    assert_eq!(m.graph().len(), 3);
    assert_eq!(m.axioms_of_kind(AxiomKind::Declaration).count(), 3);
}

#[test]
fn removing_a_merged_axiom_drops_every_encoding() {
    let mut m = model(
        r#"
:Cat a owl:Class . :Dog a owl:Class .
:Cat owl:disjointWith :Dog .
[] a owl:AllDisjointClasses ; owl:members ( :Cat :Dog ) .
"#,
    );
    let axiom = Axiom::new(AxiomBody::disjoint_classes([class("Cat"), class("Dog")]));
    assert_eq!(m.remove_axiom(&axiom), Ok(true));
    assert_eq!(m.axioms_of_kind(AxiomKind::DisjointClasses).count(), 0);
    assert_eq!(m.graph().len(), 2);
}

#[test]
fn stream_matches_per_kind_reads() {
    let m = model(
        r#"
:Animal a owl:Class . :Cat a owl:Class .
:eats a owl:ObjectProperty ; rdfs:domain :Animal .
:Cat rdfs:subClassOf :Animal ; rdfs:label "cat" .
:tom a :Cat , owl:NamedIndividual .
"#,
    );
    let streamed: Vec<Axiom> = m.all_axioms().collect();
    let by_kind: Vec<Axiom> = AxiomKind::ALL
        .iter()
        .flat_map(|kind| m.axioms_of_kind(*kind))
        .collect();
    assert_eq!(streamed, by_kind);
    assert_eq!(m.axiom_count(), streamed.len());
    for kind in [
        AxiomKind::ObjectPropertyDomain,
        AxiomKind::SubClassOf,
        AxiomKind::AnnotationAssertion,
        AxiomKind::ClassAssertion,
    ] {
        assert_eq!(m.axioms_of_kind(kind).count(), 1, "{kind:?}");
    }
}

#[test]
fn graph_edits_are_seen_by_the_next_read() {
    let mut m = model(":Cat a owl:Class . :Animal a owl:Class .");
    assert_eq!(m.axioms_of_kind(AxiomKind::SubClassOf).count(), 0);
    assert!(m.add_triple(t(
        iri("http://example.org/zoo#Cat"),
        rdfs::SUB_CLASS_OF,
        iri("http://example.org/zoo#Animal"),
    )));
    assert_eq!(m.axioms_of_kind(AxiomKind::SubClassOf).count(), 1);
}

#[test]
fn empty_keys_are_legal() {
    let m = model(":Cat a owl:Class ; owl:hasKey () .");
    let empty = Axiom::new(AxiomBody::HasKey {
        class: class("Cat"),
        properties: Default::default(),
    });
    assert_eq!(m.axioms_of_kind(AxiomKind::HasKey).collect::<Vec<_>>(), vec![empty.clone()]);
    assert!(m.diagnostics().is_empty());

    let mut written = InternalModel::new(MemGraph::new());
    written.add_axiom(&empty).expect("write");
    assert!(written.graph().has(
        &iri("http://example.org/zoo#Cat"),
        owl::HAS_KEY,
        &iri(rdf::NIL)
    ));
    assert!(written.contains_axiom(&empty));

    let chain = Axiom::new(AxiomBody::SubPropertyChainOf {
        chain: Vec::new(),
        sup: ObjectPropertyExpr::named(zoo("eats")),
    });
    assert!(matches!(
        written.add_axiom(&chain),
        Err(IllegalMutation::Unwritable { .. })
    ));
}
