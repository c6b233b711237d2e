//! The triple graph: pattern lookup, locality and mutation.
//!
//! `TripleGraph` is the only contract the translation core consumes. It is
//! object-safe so translators can take `&dyn TripleGraph`.
//!
//! `MemGraph` is the in-memory implementation: a slot vector of triples with
//! per-position indexes (subject / predicate / object → ordered slot ids).
//! Removal tombstones the slot, so the natural enumeration order of the
//! remaining triples (insertion order) never changes; once tombstones make up
//! more than half of the slots the vector is compacted in order. Imported
//! graphs are attached read-only; their triples are visible through `find`
//! but are not local.

use std::collections::BTreeSet;
use std::sync::Arc;

use ahash::{AHashMap, AHashSet};

use crate::term::{Node, Triple};

/// Indexed statement lookup plus single-writer mutation.
pub trait TripleGraph: Send + Sync {
    /// All triples matching the pattern (`None` is a wildcard), in natural
    /// enumeration order: base graph first, then imported graphs.
    fn find(
        &self,
        subject: Option<&Node>,
        predicate: Option<&Node>,
        object: Option<&Node>,
    ) -> Vec<Triple>;

    fn contains(&self, triple: &Triple) -> bool;

    /// True if the triple belongs to the directly-editable base graph.
    fn is_local(&self, triple: &Triple) -> bool;

    /// Add to the base graph. Returns `false` if it was already there.
    fn add(&mut self, triple: Triple) -> bool;

    /// Remove from the base graph. Returns `false` if it was not there.
    fn remove(&mut self, triple: &Triple) -> bool;

    /// A fresh blank node whose label does not occur anywhere in the graph.
    fn create_blank(&mut self) -> Node;

    /// Number of distinct visible triples.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Objects of `subject predicate ?o`.
    fn objects(&self, subject: &Node, predicate: &str) -> Vec<Node> {
        self.find(Some(subject), Some(&Node::iri(predicate)), None)
            .into_iter()
            .map(|t| t.object)
            .collect()
    }

    /// Subjects of `?s predicate object`.
    fn subjects(&self, predicate: &str, object: &Node) -> Vec<Node> {
        self.find(None, Some(&Node::iri(predicate)), Some(object))
            .into_iter()
            .map(|t| t.subject)
            .collect()
    }

    fn has(&self, subject: &Node, predicate: &str, object: &Node) -> bool {
        self.contains(&Triple::new(
            subject.clone(),
            Node::iri(predicate),
            object.clone(),
        ))
    }
}

// ============================================================================
// In-memory graph
// ============================================================================

/// Indexed in-memory triple graph with optional read-only imports.
#[derive(Debug, Default, Clone)]
pub struct MemGraph {
    /// Slot storage; `None` marks a removed triple.
    slots: Vec<Option<Triple>>,
    /// Triple → slot id.
    ids: AHashMap<Triple, usize>,
    by_subject: AHashMap<Node, BTreeSet<usize>>,
    by_predicate: AHashMap<Node, BTreeSet<usize>>,
    by_object: AHashMap<Node, BTreeSet<usize>>,
    tombstones: usize,
    /// Read-only imported graphs.
    imports: Vec<Arc<MemGraph>>,
    next_blank: u64,
}

impl MemGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a base graph from triples (duplicates are ignored).
    pub fn from_triples(triples: impl IntoIterator<Item = Triple>) -> Self {
        let mut graph = Self::new();
        for t in triples {
            graph.insert(t);
        }
        graph
    }

    /// Attach a read-only imported graph.
    pub fn with_import(mut self, import: Arc<MemGraph>) -> Self {
        self.imports.push(import);
        self
    }

    pub fn add_import(&mut self, import: Arc<MemGraph>) {
        self.imports.push(import);
    }

    pub fn imports(&self) -> &[Arc<MemGraph>] {
        &self.imports
    }

    /// Triples of the base graph only, in insertion order.
    pub fn local_triples(&self) -> impl Iterator<Item = &Triple> {
        self.slots.iter().flatten()
    }

    /// Number of triples in the base graph only.
    pub fn local_len(&self) -> usize {
        self.ids.len()
    }

    fn insert(&mut self, triple: Triple) -> bool {
        if self.ids.contains_key(&triple) {
            return false;
        }
        let id = self.slots.len();
        self.by_subject
            .entry(triple.subject.clone())
            .or_default()
            .insert(id);
        self.by_predicate
            .entry(triple.predicate.clone())
            .or_default()
            .insert(id);
        self.by_object
            .entry(triple.object.clone())
            .or_default()
            .insert(id);
        self.ids.insert(triple.clone(), id);
        self.slots.push(Some(triple));
        true
    }

    fn delete(&mut self, triple: &Triple) -> bool {
        let Some(id) = self.ids.remove(triple) else {
            return false;
        };
        self.slots[id] = None;
        self.tombstones += 1;
        unindex(&mut self.by_subject, &triple.subject, id);
        unindex(&mut self.by_predicate, &triple.predicate, id);
        unindex(&mut self.by_object, &triple.object, id);
        if self.tombstones * 2 > self.slots.len() {
            self.compact();
        }
        true
    }

    /// Drop tombstones, renumbering the live slots in order.
    fn compact(&mut self) {
        let live: Vec<Triple> = std::mem::take(&mut self.slots).into_iter().flatten().collect();
        self.ids.clear();
        self.by_subject.clear();
        self.by_predicate.clear();
        self.by_object.clear();
        self.tombstones = 0;
        for t in live {
            self.insert(t);
        }
    }

    /// Matching slot ids of the base graph, ascending.
    fn find_local_ids(
        &self,
        subject: Option<&Node>,
        predicate: Option<&Node>,
        object: Option<&Node>,
    ) -> Vec<usize> {
        // Drive the scan from the most selective bound position.
        let mut candidates: Option<&BTreeSet<usize>> = None;
        for (node, index) in [
            (subject, &self.by_subject),
            (object, &self.by_object),
            (predicate, &self.by_predicate),
        ] {
            let Some(node) = node else {
                continue;
            };
            let Some(ids) = index.get(node) else {
                return Vec::new();
            };
            if candidates.map_or(true, |c| ids.len() < c.len()) {
                candidates = Some(ids);
            }
        }

        let matches = |id: &usize| -> bool {
            let Some(Some(t)) = self.slots.get(*id) else {
                return false;
            };
            subject.map_or(true, |s| &t.subject == s)
                && predicate.map_or(true, |p| &t.predicate == p)
                && object.map_or(true, |o| &t.object == o)
        };

        match candidates {
            Some(ids) => ids.iter().copied().filter(|id| matches(id)).collect(),
            None => (0..self.slots.len()).filter(|id| matches(id)).collect(),
        }
    }

    fn label_in_use(&self, node: &Node) -> bool {
        self.by_subject.contains_key(node)
            || self.by_object.contains_key(node)
            || self.imports.iter().any(|g| g.label_in_use(node))
    }
}

fn unindex(index: &mut AHashMap<Node, BTreeSet<usize>>, key: &Node, id: usize) {
    if let Some(ids) = index.get_mut(key) {
        ids.remove(&id);
        if ids.is_empty() {
            index.remove(key);
        }
    }
}

impl TripleGraph for MemGraph {
    fn find(
        &self,
        subject: Option<&Node>,
        predicate: Option<&Node>,
        object: Option<&Node>,
    ) -> Vec<Triple> {
        let mut out: Vec<Triple> = self
            .find_local_ids(subject, predicate, object)
            .into_iter()
            .filter_map(|id| self.slots[id].clone())
            .collect();
        if self.imports.is_empty() {
            return out;
        }

        let mut seen: AHashSet<Triple> = out.iter().cloned().collect();
        for import in &self.imports {
            for t in import.find(subject, predicate, object) {
                if seen.insert(t.clone()) {
                    out.push(t);
                }
            }
        }
        out
    }

    fn contains(&self, triple: &Triple) -> bool {
        self.ids.contains_key(triple) || self.imports.iter().any(|g| g.contains(triple))
    }

    fn is_local(&self, triple: &Triple) -> bool {
        self.ids.contains_key(triple)
    }

    fn add(&mut self, triple: Triple) -> bool {
        self.insert(triple)
    }

    fn remove(&mut self, triple: &Triple) -> bool {
        self.delete(triple)
    }

    fn create_blank(&mut self) -> Node {
        loop {
            let node = Node::blank(format!("genid{}", self.next_blank));
            self.next_blank += 1;
            if !self.label_in_use(&node) {
                return node;
            }
        }
    }

    fn len(&self) -> usize {
        if self.imports.is_empty() {
            return self.ids.len();
        }
        self.find(None, None, None).len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocab::{owl, rdf, rdfs};

    fn t(s: &str, p: &str, o: &str) -> Triple {
        Triple::new(Node::iri(s), Node::iri(p), Node::iri(o))
    }

    #[test]
    fn find_respects_pattern_and_insertion_order() {
        let mut g = MemGraph::new();
        g.add(t("urn:a", rdfs::SUB_CLASS_OF, "urn:b"));
        g.add(t("urn:c", rdfs::SUB_CLASS_OF, "urn:b"));
        g.add(t("urn:a", rdf::TYPE, owl::CLASS));

        let sub = g.find(None, Some(&Node::iri(rdfs::SUB_CLASS_OF)), None);
        assert_eq!(sub.len(), 2);
        assert_eq!(sub[0].subject, Node::iri("urn:a"));
        assert_eq!(sub[1].subject, Node::iri("urn:c"));

        let of_a = g.find(Some(&Node::iri("urn:a")), None, None);
        assert_eq!(of_a.len(), 2);
        assert!(g
            .find(Some(&Node::iri("urn:zzz")), None, None)
            .is_empty());
    }

    #[test]
    fn duplicates_and_removal() {
        let mut g = MemGraph::new();
        assert!(g.add(t("urn:a", rdfs::SUB_CLASS_OF, "urn:b")));
        assert!(!g.add(t("urn:a", rdfs::SUB_CLASS_OF, "urn:b")));
        g.add(t("urn:c", rdfs::SUB_CLASS_OF, "urn:d"));
        assert_eq!(g.len(), 2);

        assert!(g.remove(&t("urn:a", rdfs::SUB_CLASS_OF, "urn:b")));
        assert!(!g.remove(&t("urn:a", rdfs::SUB_CLASS_OF, "urn:b")));
        assert_eq!(g.len(), 1);
        assert_eq!(
            g.find(None, Some(&Node::iri(rdfs::SUB_CLASS_OF)), None),
            vec![t("urn:c", rdfs::SUB_CLASS_OF, "urn:d")]
        );
    }

    #[test]
    fn compaction_keeps_order_and_indexes() {
        let mut g = MemGraph::new();
        let all: Vec<Triple> = (0..10)
            .map(|i| t(&format!("urn:s{i}"), rdfs::SUB_CLASS_OF, "urn:top"))
            .collect();
        for x in &all {
            g.add(x.clone());
        }
        for x in all.iter().take(6) {
            assert!(g.remove(x));
        }
        assert!(g.slots.len() < all.len());
        assert_eq!(g.tombstones, 0);
        assert_eq!(g.find(None, None, None), all[6..].to_vec());
        assert_eq!(
            g.find(None, None, Some(&Node::iri("urn:top"))),
            all[6..].to_vec()
        );
        assert!(g.add(all[0].clone()));
        assert_eq!(g.find(None, None, None).last(), Some(&all[0]));
        assert_eq!(g.len(), 5);
    }

    #[test]
    fn imports_are_visible_but_not_local() {
        let import = Arc::new(MemGraph::from_triples([t(
            "urn:x",
            rdf::TYPE,
            owl::CLASS,
        )]));
        let mut g = MemGraph::new().with_import(import);
        g.add(t("urn:y", rdf::TYPE, owl::CLASS));

        let all = g.find(None, Some(&Node::iri(rdf::TYPE)), None);
        assert_eq!(all.len(), 2);
        assert!(g.is_local(&all[0]));
        assert!(!g.is_local(&all[1]));
        assert!(g.contains(&all[1]));

        // Removing an imported triple is a no-op on the base graph.
        assert!(!g.remove(&all[1]));
        assert_eq!(g.len(), 2);
    }

    #[test]
    fn fresh_blank_nodes_avoid_existing_labels() {
        let mut g = MemGraph::new();
        g.add(Triple::new(
            Node::blank("genid0"),
            Node::iri(rdf::TYPE),
            Node::iri(owl::CLASS),
        ));
        let b = g.create_blank();
        assert_ne!(b, Node::blank("genid0"));
        assert_ne!(g.create_blank(), b);
    }
}
