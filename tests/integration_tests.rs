//! Integration tests for the complete ontmap pipeline
//!
//! These tests verify end-to-end functionality across crates:
//! - RDF document → MemGraph → InternalModel → axioms
//! - Axiom writes → graph → fresh model reads
//! - Config files → scan behaviour
//!
//! Run with: cargo test --test integration_tests

use std::collections::BTreeSet;
use std::io::Write;

use ontmap_graph::vocab::rdfs;
use ontmap_graph::{load_rdf, load_rdf_file, Literal, MemGraph, RdfFormat, TripleGraph};
use ontmap_owl::model::{ClassExpr, Individual, ObjectPropertyExpr};
use ontmap_owl::{
    Annotation, Axiom, AxiomBody, AxiomKind, Entity, InternalConfig, InternalModel, Iri,
};
use tempfile::tempdir;

const PIZZA_TTL: &str = r#"
@prefix : <http://example.org/pizza#> .
@prefix owl: <http://www.w3.org/2002/07/owl#> .
@prefix rdf: <http://www.w3.org/1999/02/22-rdf-syntax-ns#> .
@prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .
@prefix xsd: <http://www.w3.org/2001/XMLSchema#> .

:Pizza a owl:Class ; rdfs:label "Pizza"@en .
:Topping a owl:Class .
:CheeseTopping a owl:Class ; rdfs:subClassOf :Topping .
:MeatTopping a owl:Class ; rdfs:subClassOf :Topping .
:VegTopping a owl:Class ; rdfs:subClassOf :Topping .
:Margherita a owl:Class ;
    rdfs:subClassOf :Pizza ,
        [ a owl:Restriction ; owl:onProperty :hasTopping ; owl:someValuesFrom :CheeseTopping ] .
:Pizza owl:disjointWith :Topping .
[] a owl:AllDisjointClasses ; owl:members ( :CheeseTopping :MeatTopping :VegTopping ) .

:hasTopping a owl:ObjectProperty , owl:TransitiveProperty ;
    rdfs:domain :Pizza ;
    rdfs:range :Topping .
:isToppingOf a owl:ObjectProperty ; owl:inverseOf :hasTopping .
:hasCalories a owl:DatatypeProperty , owl:FunctionalProperty ;
    rdfs:range xsd:integer .

:mozzarella a owl:NamedIndividual , :CheeseTopping .
:myPizza a owl:NamedIndividual , :Margherita ;
    :hasTopping :mozzarella ;
    :hasCalories 850 .
"#;

fn pizza(local: &str) -> Iri {
    Iri::new(format!("http://example.org/pizza#{local}"))
}

fn class(local: &str) -> ClassExpr {
    ClassExpr::Class(pizza(local))
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn pizza_model() -> InternalModel<MemGraph> {
    let graph = load_rdf(PIZZA_TTL.as_bytes(), RdfFormat::Turtle).expect("turtle");
    InternalModel::new(graph)
}

// ============================================================================
// Document → axioms
// ============================================================================

#[test]
fn test_pizza_document_translates() {
    init_tracing();
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("pizza.ttl");
    std::fs::File::create(&path)
        .and_then(|mut f| f.write_all(PIZZA_TTL.as_bytes()))
        .expect("write fixture");

    let model = InternalModel::new(load_rdf_file(&path).expect("load"));

    let expected = [
        Axiom::new(AxiomBody::Declaration(Entity::class(pizza("Pizza")))),
        Axiom::new(AxiomBody::SubClassOf {
            sub: class("Margherita"),
            sup: ClassExpr::some(ObjectPropertyExpr::named(pizza("hasTopping")), class("CheeseTopping")),
        }),
        Axiom::new(AxiomBody::disjoint_classes([class("Pizza"), class("Topping")])),
        Axiom::new(AxiomBody::disjoint_classes([
            class("CheeseTopping"),
            class("MeatTopping"),
            class("VegTopping"),
        ])),
        Axiom::new(AxiomBody::TransitiveObjectProperty(ObjectPropertyExpr::named(pizza("hasTopping")))),
        Axiom::new(AxiomBody::inverse_object_properties(
            ObjectPropertyExpr::named(pizza("isToppingOf")),
            ObjectPropertyExpr::named(pizza("hasTopping")),
        )),
        Axiom::new(AxiomBody::FunctionalDataProperty(pizza("hasCalories"))),
        Axiom::new(AxiomBody::ClassAssertion {
            class: class("Margherita"),
            individual: Individual::Named(pizza("myPizza")),
        }),
        Axiom::new(AxiomBody::object_property_assertion(
            ObjectPropertyExpr::named(pizza("hasTopping")),
            Individual::Named(pizza("myPizza")),
            Individual::Named(pizza("mozzarella")),
        )),
        Axiom::new(AxiomBody::DataPropertyAssertion {
            property: pizza("hasCalories"),
            subject: Individual::Named(pizza("myPizza")),
            value: Literal::typed("850", ontmap_graph::vocab::xsd::INTEGER),
        }),
        Axiom::new(AxiomBody::AnnotationAssertion {
            property: Iri::new(rdfs::LABEL),
            subject: ontmap_owl::AnnotationSubject::Iri(pizza("Pizza")),
            value: ontmap_owl::AnnotationValue::Literal(Literal::lang("Pizza", "en")),
        }),
    ];
    for axiom in &expected {
        assert!(model.contains_axiom(axiom), "missing {axiom:?}");
    }
    assert_eq!(model.axioms_of_kind(AxiomKind::SubClassOf).count(), 5);
    assert!(model.diagnostics().is_empty(), "{:?}", model.diagnostics());
}

#[test]
fn test_content_ids_are_stable_across_loads() {
    let ids = |model: &InternalModel<MemGraph>| -> BTreeSet<String> {
        AxiomKind::ALL
            .iter()
            .flat_map(|kind| model.objects_of_kind(*kind))
            .map(|object| object.content_id())
            .collect()
    };
    let first = ids(&pizza_model());
    let second = ids(&pizza_model());
    assert!(!first.is_empty());
    assert_eq!(first, second);
    assert!(first.iter().all(|id| id.starts_with("ontfnv1a64:")));
}

#[test]
fn test_parallel_scan_agrees_with_sequential() {
    let graph = load_rdf(PIZZA_TTL.as_bytes(), RdfFormat::Turtle).expect("turtle");
    let sequential = InternalModel::new(graph.clone());
    let parallel = InternalModel::with_config(graph, InternalConfig::default().with_parallel_scan(true));
    parallel.load_all();
    let a: Vec<Axiom> = sequential.all_axioms().collect();
    let b: Vec<Axiom> = parallel.all_axioms().collect();
    assert_eq!(a, b);
}

// ============================================================================
// Writes survive a fresh model
// ============================================================================

#[test]
fn test_written_axioms_are_read_by_a_new_model() {
    let mut model = pizza_model();
    let veggie = Axiom::new(AxiomBody::SubClassOf {
        sub: class("VeggiePizza"),
        sup: ClassExpr::all(ObjectPropertyExpr::named(pizza("hasTopping")), class("VegTopping")),
    })
    .annotated([Annotation::new(rdfs::COMMENT, Literal::plain("no meat, no fish"))]);
    let chain = Axiom::new(AxiomBody::SubPropertyChainOf {
        chain: vec![
            ObjectPropertyExpr::named(pizza("hasTopping")),
            ObjectPropertyExpr::named(pizza("hasIngredient")),
        ],
        sup: ObjectPropertyExpr::named(pizza("hasIngredient")),
    });
    model.add_axiom(&veggie).expect("veggie");
    model.add_axiom(&chain).expect("chain");

    let removed = Axiom::new(AxiomBody::disjoint_classes([class("Pizza"), class("Topping")]));
    assert_eq!(model.remove_axiom(&removed), Ok(true));

    let reread = InternalModel::new(model.into_graph());
    assert!(reread.contains_axiom(&veggie));
    assert!(reread.contains_axiom(&chain));
    assert!(!reread.contains_axiom(&removed));
    assert!(reread.contains_axiom(&Axiom::new(AxiomBody::Declaration(Entity::class(pizza("VeggiePizza"))))));
}

#[test]
fn test_stream_is_serializable() {
    let model = pizza_model();
    let axioms: Vec<Axiom> = model.all_axioms().collect();
    let json = serde_json::to_string(&axioms).expect("serialize");
    let back: Vec<Axiom> = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(axioms, back);
}

// ============================================================================
// Configuration
// ============================================================================

#[test]
fn test_config_file_controls_scans() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("ontmap.json");
    std::fs::write(&path, r#"{ "read_declarations": false, "parallel_scan": true }"#).expect("write config");
    let config = InternalConfig::from_json_file(&path).expect("config");
    assert!(config.parallel_scan);

    let graph = load_rdf(PIZZA_TTL.as_bytes(), RdfFormat::Turtle).expect("turtle");
    let model = InternalModel::with_config(graph, config);
    assert_eq!(model.axioms_of_kind(AxiomKind::Declaration).count(), 0);
    assert!(model.axiom_count() > 0);
    assert!(model.all_axioms().all(|a| a.kind() != AxiomKind::Declaration));
}

#[test]
fn test_graph_len_tracks_mutations() {
    let mut model = InternalModel::new(MemGraph::new());
    let axiom = Axiom::new(AxiomBody::SubClassOf {
        sub: class("A"),
        sup: class("B"),
    });
    model.add_axiom(&axiom).expect("write");
    assert_eq!(model.graph().len(), 3);
    model.remove_axiom(&axiom).expect("remove");
    assert_eq!(model.graph().len(), 2);
}
