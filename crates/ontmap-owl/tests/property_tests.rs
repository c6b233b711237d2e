use std::collections::BTreeSet;

use ontmap_graph::vocab::{owl, rdf};
use ontmap_graph::{Literal, MemGraph, Node, Triple, TripleGraph};
use ontmap_owl::list;
use ontmap_owl::model::{ClassExpr, Individual, ObjectPropertyExpr};
use ontmap_owl::{Axiom, AxiomBody, AxiomKind, InternalModel, ONTObject};
use proptest::prelude::*;

fn name(i: usize) -> String {
    format!("urn:p:C{i}")
}

fn class(i: usize) -> ClassExpr {
    ClassExpr::class(name(i))
}

fn declared_classes(n: usize) -> Vec<Triple> {
    (0..n)
        .map(|i| Triple::with_predicate(Node::iri(name(i)), rdf::TYPE, Node::iri(owl::CLASS)))
        .collect()
}

/// Connected components (size >= 2) of `edges` over `0..n`.
fn components(n: usize, edges: &[(usize, usize)]) -> BTreeSet<BTreeSet<usize>> {
    let mut parent: Vec<usize> = (0..n).collect();
    fn find(parent: &mut [usize], x: usize) -> usize {
        let mut root = x;
        while parent[root] != root {
            root = parent[root];
        }
        parent[x] = root;
        root
    }
    for &(a, b) in edges {
        let (ra, rb) = (find(&mut parent, a), find(&mut parent, b));
        parent[ra] = rb;
    }
    let mut groups: std::collections::BTreeMap<usize, BTreeSet<usize>> = Default::default();
    for &(a, b) in edges {
        let root = find(&mut parent, a);
        groups.entry(root).or_default().extend([a, b]);
    }
    groups.into_values().filter(|g| g.len() >= 2).collect()
}

fn member_strategy() -> impl Strategy<Value = Node> {
    prop_oneof![
        (0usize..6).prop_map(|i| Node::iri(name(i))),
        "[a-z]{0,4}".prop_map(|s| Node::literal(Literal::plain(s))),
    ]
}

fn triple_strategy() -> impl Strategy<Value = Triple> {
    (0usize..6, 0usize..6).prop_map(|(a, b)| {
        Triple::with_predicate(Node::iri(name(a)), "urn:p:link", Node::iri(name(b)))
    })
}

fn edges_strategy() -> impl Strategy<Value = (usize, Vec<(usize, usize)>)> {
    (2usize..8).prop_flat_map(|n| {
        let edge = (0..n, 0..n).prop_filter("no self loops", |(a, b)| a != b);
        (Just(n), prop::collection::vec(edge, 1..10))
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn equivalence_reads_connected_components((n, edges) in edges_strategy()) {
        let mut triples = declared_classes(n);
        triples.extend(edges.iter().map(|&(a, b)| {
            Triple::with_predicate(Node::iri(name(a)), owl::EQUIVALENT_CLASS, Node::iri(name(b)))
        }));
        let model = InternalModel::new(MemGraph::from_triples(triples));

        let read: BTreeSet<BTreeSet<ClassExpr>> = model
            .axioms_of_kind(AxiomKind::EquivalentClasses)
            .map(|axiom| match axiom.body {
                AxiomBody::EquivalentClasses(members) => members,
                other => panic!("unexpected body {other:?}"),
            })
            .collect();
        let expected: BTreeSet<BTreeSet<ClassExpr>> = components(n, &edges)
            .into_iter()
            .map(|group| group.into_iter().map(class).collect())
            .collect();
        prop_assert_eq!(read, expected);
    }

    #[test]
    fn nary_sets_survive_a_write(members in prop::collection::btree_set(0usize..10, 2..6)) {
        let classes: Vec<ClassExpr> = members.iter().copied().map(class).collect();
        let individuals: Vec<Individual> = members
            .iter()
            .map(|i| Individual::named(format!("urn:p:i{i}")))
            .collect();
        let properties: BTreeSet<ObjectPropertyExpr> = members
            .iter()
            .map(|i| ObjectPropertyExpr::named(format!("urn:p:op{i}")))
            .collect();
        let axioms = [
            Axiom::new(AxiomBody::equivalent_classes(classes.clone())),
            Axiom::new(AxiomBody::disjoint_classes(classes)),
            Axiom::new(AxiomBody::different_individuals(individuals.clone())),
            Axiom::new(AxiomBody::same_individual(individuals)),
            Axiom::new(AxiomBody::DisjointObjectProperties(properties)),
        ];
        for axiom in axioms {
            let mut model = InternalModel::new(MemGraph::new());
            model.add_axiom(&axiom).expect("write");
            let read: Vec<Axiom> = model.axioms_of_kind(axiom.kind()).collect();
            prop_assert_eq!(read, vec![axiom]);
        }
    }

    #[test]
    fn repeated_writes_merge_into_one_object(times in 1usize..5) {
        let axiom = Axiom::new(AxiomBody::SubClassOf {
            sub: class(0),
            sup: ClassExpr::some(ObjectPropertyExpr::named("urn:p:eats"), class(1)),
        });
        let mut model = InternalModel::new(MemGraph::new());
        for _ in 0..times {
            model.add_axiom(&axiom).expect("write");
        }
        let objects = model.objects_of_kind(AxiomKind::SubClassOf);
        prop_assert_eq!(objects.len(), 1);
        let restrictions = objects[0]
            .triples()
            .iter()
            .filter(|t| t.predicate_is(owl::ON_PROPERTY))
            .count();
        prop_assert_eq!(restrictions, times);

        prop_assert_eq!(model.remove_axiom(&axiom), Ok(true));
        prop_assert_eq!(model.axioms_of_kind(AxiomKind::SubClassOf).count(), 0);
    }

    #[test]
    fn lists_decode_to_what_was_encoded(
        members in prop::collection::vec(member_strategy(), 0..10),
        typed in any::<bool>(),
    ) {
        let mut graph = MemGraph::new();
        let mut written = Vec::new();
        let cell_type = typed.then_some(rdf::LIST);
        let head = list::encode(&mut graph, &members, cell_type, &mut written);
        prop_assert_eq!(head.is(rdf::NIL), members.is_empty());

        let decoded = list::decode(&graph, &head, 64).expect("decode");
        prop_assert_eq!(&decoded.members, &members);
        let per_cell = if typed { 3 } else { 2 };
        prop_assert_eq!(decoded.triples.len(), per_cell * members.len());
        let backing: BTreeSet<Triple> = decoded.triples.into_iter().collect();
        prop_assert_eq!(backing, written.into_iter().collect::<BTreeSet<Triple>>());
    }

    #[test]
    fn merge_unions_disjoint_encodings(
        left in prop::collection::btree_set(triple_strategy(), 0..6),
        right in prop::collection::btree_set(triple_strategy(), 0..6),
    ) {
        let right: BTreeSet<Triple> = right.difference(&left).cloned().collect();
        let axiom = Axiom::new(AxiomBody::SubClassOf {
            sub: class(0),
            sup: class(1),
        });
        let a = ONTObject::wrap(axiom.clone(), left.clone());
        let b = ONTObject::wrap(axiom, right.clone());
        let merged = a.merge(&b).expect("equal content");

        prop_assert_eq!(merged.content(), a.content());
        prop_assert_eq!(merged.content_id(), b.content_id());
        let union: BTreeSet<Triple> = left.union(&right).cloned().collect();
        prop_assert_eq!(merged.triples(), &union);
        prop_assert_eq!(merged.value(), a.value());
    }

    #[test]
    fn cutting_any_list_link_breaks_the_decode(len in 1usize..8, cut in 0usize..8) {
        let members: Vec<Node> = (0..len).map(|i| Node::iri(name(i))).collect();
        let mut graph = MemGraph::new();
        let mut written = Vec::new();
        let head = list::encode(&mut graph, &members, None, &mut written);
        let decoded = list::decode(&graph, &head, 64).expect("decode");
        prop_assert_eq!(&decoded.members, &members);

        let rests: Vec<&Triple> = written.iter().filter(|t| t.predicate_is(rdf::REST)).collect();
        let victim = rests[cut % rests.len()].clone();
        graph.remove(&victim);
        prop_assert!(list::decode(&graph, &head, 64).is_err());
    }
}
