//! Ordered list codec (`rdf:first` / `rdf:rest` chains).
//!
//! Decoding is bounded: it stops with a `ListError` on a revisited cell, on a
//! chain longer than the configured maximum, and on cells that do not carry
//! exactly one `rdf:first` and one `rdf:rest`. Typed cells (`rdf:List`,
//! `swrl:AtomList`) are accepted and their type triples count as backing
//! triples of the list.

use ahash::AHashSet;
use ontmap_graph::vocab::{rdf, swrl};
use ontmap_graph::{Node, Triple, TripleGraph};

use crate::error::ListError;

/// Decoded members plus every triple of the chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderedList<T> {
    pub head: Node,
    pub members: Vec<T>,
    pub triples: Vec<Triple>,
}

impl<T> OrderedList<T> {
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Map members, keeping the backing triples.
    pub fn try_map<U, E>(self, f: impl FnMut(T) -> Result<U, E>) -> Result<OrderedList<U>, E> {
        Ok(OrderedList {
            head: self.head,
            members: self.members.into_iter().map(f).collect::<Result<_, _>>()?,
            triples: self.triples,
        })
    }
}

fn is_list_type(node: &Node) -> bool {
    node.is(rdf::LIST) || node.is(swrl::ATOM_LIST)
}

/// Follow the chain starting at `head`.
pub fn decode(
    graph: &dyn TripleGraph,
    head: &Node,
    max_len: usize,
) -> Result<OrderedList<Node>, ListError> {
    let first_p = Node::iri(rdf::FIRST);
    let rest_p = Node::iri(rdf::REST);
    let type_p = Node::iri(rdf::TYPE);

    let mut members = Vec::new();
    let mut triples = Vec::new();
    let mut visited: AHashSet<Node> = AHashSet::new();
    let mut cell = head.clone();

    while !cell.is(rdf::NIL) {
        if !cell.is_resource() {
            return Err(ListError::Truncated { node: cell });
        }
        if !visited.insert(cell.clone()) {
            return Err(ListError::Cycle { node: cell });
        }
        if members.len() >= max_len {
            return Err(ListError::TooLong { max: max_len });
        }

        let mut firsts = graph.find(Some(&cell), Some(&first_p), None);
        let mut rests = graph.find(Some(&cell), Some(&rest_p), None);
        match (firsts.len(), rests.len()) {
            (1, 1) => {}
            (0, _) | (_, 0) => return Err(ListError::Truncated { node: cell }),
            _ => return Err(ListError::Ambiguous { node: cell }),
        }
        let (Some(first), Some(rest)) = (firsts.pop(), rests.pop()) else {
            return Err(ListError::Truncated { node: cell });
        };

        triples.extend(
            graph
                .find(Some(&cell), Some(&type_p), None)
                .into_iter()
                .filter(|t| is_list_type(&t.object)),
        );
        members.push(first.object.clone());
        cell = rest.object.clone();
        triples.push(first);
        triples.push(rest);
    }

    Ok(OrderedList {
        head: head.clone(),
        members,
        triples,
    })
}

/// Materialize `members` as a fresh chain and return its head (`rdf:nil` when
/// empty). Every emitted triple is appended to `written`.
pub fn encode(
    graph: &mut dyn TripleGraph,
    members: &[Node],
    cell_type: Option<&str>,
    written: &mut Vec<Triple>,
) -> Node {
    let Some((last_index, _)) = members.iter().enumerate().last() else {
        return Node::iri(rdf::NIL);
    };

    let cells: Vec<Node> = members.iter().map(|_| graph.create_blank()).collect();
    for (i, (cell, member)) in cells.iter().zip(members).enumerate() {
        let rest = if i == last_index {
            Node::iri(rdf::NIL)
        } else {
            cells[i + 1].clone()
        };
        let mut cell_triples = Vec::with_capacity(3);
        if let Some(ty) = cell_type {
            cell_triples.push(Triple::with_predicate(cell.clone(), rdf::TYPE, Node::iri(ty)));
        }
        cell_triples.push(Triple::with_predicate(cell.clone(), rdf::FIRST, member.clone()));
        cell_triples.push(Triple::with_predicate(cell.clone(), rdf::REST, rest));
        for t in cell_triples {
            graph.add(t.clone());
            written.push(t);
        }
    }
    cells[0].clone()
}

/// `container predicate ( members... )`; returns the head.
pub fn attach(
    graph: &mut dyn TripleGraph,
    container: &Node,
    predicate: &str,
    members: &[Node],
    cell_type: Option<&str>,
    written: &mut Vec<Triple>,
) -> Node {
    let head = encode(graph, members, cell_type, written);
    let link = Triple::with_predicate(container.clone(), predicate, head.clone());
    graph.add(link.clone());
    written.push(link);
    head
}
