//! The axiom model over a triple graph.
//!
//! `InternalModel` owns the graph and keeps one lazily built cache per
//! axiom kind. A cache is the de-duplicated result of one translator scan:
//! objects with equal content are merged, the first encoding found in
//! graph order stays primary and later ones contribute their triples.
//!
//! Reads take `&self` and may run concurrently (kind scans use rayon when
//! `parallel_scan` is set). Mutations take `&mut self` and invalidate the
//! caches they can affect.

use std::collections::BTreeSet;
use std::sync::Arc;

use ahash::{AHashMap, AHashSet};
use ontmap_graph::vocab::rdf;
use ontmap_graph::{Triple, TripleGraph};
use parking_lot::RwLock;
use rayon::prelude::*;
use tracing::debug;

use crate::config::InternalConfig;
use crate::error::IllegalMutation;
use crate::factory::{NodeCache, ReadContext};
use crate::model::{Axiom, AxiomKind};
use crate::object::{ContentTuple, HasContent, ONTObject};
use crate::registry::TranslatorRegistry;
use crate::translate::{Diagnostic, Translated};
use crate::writer::GraphWriter;

// ============================================================================
// Kind caches
// ============================================================================

/// De-duplicated objects of one kind, in discovery order.
#[derive(Debug, Default)]
pub struct KindCache {
    objects: Vec<ONTObject<Axiom>>,
    index: AHashMap<Arc<ContentTuple>, usize>,
    triples: AHashSet<Triple>,
    diagnostics: Vec<Diagnostic>,
}

impl KindCache {
    fn build(translated: Translated, keep_diagnostics: bool) -> Self {
        let mut cache = KindCache::default();
        for object in translated.objects {
            cache.triples.extend(object.triples().iter().cloned());
            match cache.index.get(object.content()) {
                Some(&i) => {
                    if let Ok(merged) = cache.objects[i].merge(&object) {
                        cache.objects[i] = merged;
                    }
                }
                None => {
                    cache.index.insert(Arc::clone(object.content()), cache.objects.len());
                    cache.objects.push(object);
                }
            }
        }
        if keep_diagnostics {
            cache.diagnostics = translated.diagnostics;
        }
        cache
    }

    pub fn objects(&self) -> &[ONTObject<Axiom>] {
        &self.objects
    }

    pub fn get(&self, axiom: &Axiom) -> Option<&ONTObject<Axiom>> {
        let content = axiom.content();
        self.index.get(&content).map(|&i| &self.objects[i])
    }

    /// Whether any cached object is backed by `triple`.
    pub fn backs(&self, triple: &Triple) -> bool {
        self.triples.contains(triple)
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

// ============================================================================
// Model
// ============================================================================

pub struct InternalModel<G: TripleGraph> {
    graph: G,
    config: InternalConfig,
    registry: TranslatorRegistry,
    caches: RwLock<AHashMap<AxiomKind, Arc<KindCache>>>,
    nodes: NodeCache,
}

impl<G: TripleGraph> InternalModel<G> {
    pub fn new(graph: G) -> Self {
        Self::with_config(graph, InternalConfig::default())
    }

    pub fn with_config(graph: G, config: InternalConfig) -> Self {
        Self {
            graph,
            config,
            registry: TranslatorRegistry::new(),
            caches: RwLock::new(AHashMap::new()),
            nodes: NodeCache::new(),
        }
    }

    pub fn graph(&self) -> &G {
        &self.graph
    }

    pub fn into_graph(self) -> G {
        self.graph
    }

    pub fn config(&self) -> &InternalConfig {
        &self.config
    }

    pub fn registry(&self) -> &TranslatorRegistry {
        &self.registry
    }

    /// A read context over the current graph state.
    pub fn context(&self) -> ReadContext<'_> {
        ReadContext::new(&self.graph, &self.config, &self.nodes)
    }

    // ------------------------------------------------------------------------
    // Reads
    // ------------------------------------------------------------------------

    /// The cache of `kind`, scanning the graph on first use.
    pub fn cache(&self, kind: AxiomKind) -> Arc<KindCache> {
        if let Some(cache) = self.caches.read().get(&kind) {
            return Arc::clone(cache);
        }
        let built = Arc::new(self.scan(kind));
        let mut caches = self.caches.write();
        Arc::clone(caches.entry(kind).or_insert(built))
    }

    pub fn is_loaded(&self, kind: AxiomKind) -> bool {
        self.caches.read().contains_key(&kind)
    }

    fn scan(&self, kind: AxiomKind) -> KindCache {
        if kind == AxiomKind::Declaration && !self.config.read_declarations {
            return KindCache::default();
        }
        debug!(kind = kind.name(), "scanning kind");
        let ctx = self.context();
        let translated = self.registry.get(kind).read_all(&ctx);
        let found = translated.objects.len();
        let cache = KindCache::build(translated, self.config.collect_diagnostics);
        debug!(
            kind = kind.name(),
            found,
            distinct = cache.len(),
            skipped = cache.diagnostics.len(),
            "kind scanned"
        );
        cache
    }

    /// Build every cache that is not loaded yet.
    pub fn load_all(&self) {
        let missing: Vec<AxiomKind> = {
            let caches = self.caches.read();
            AxiomKind::ALL
                .iter()
                .copied()
                .filter(|kind| !caches.contains_key(kind))
                .collect()
        };
        if missing.is_empty() {
            return;
        }
        let built: Vec<(AxiomKind, KindCache)> = if self.config.parallel_scan {
            missing.par_iter().map(|&kind| (kind, self.scan(kind))).collect()
        } else {
            missing.iter().map(|&kind| (kind, self.scan(kind))).collect()
        };
        let mut caches = self.caches.write();
        for (kind, cache) in built {
            caches.entry(kind).or_insert_with(|| Arc::new(cache));
        }
    }

    /// Every axiom, kind by kind in `AxiomKind::ALL` order.
    pub fn all_axioms(&self) -> AxiomStream<'_, G> {
        AxiomStream::new(self)
    }

    /// Distinct axioms of one kind in discovery order.
    pub fn axioms_of_kind(&self, kind: AxiomKind) -> impl Iterator<Item = Axiom> {
        let cache = self.cache(kind);
        (0..cache.len()).map(move |i| cache.objects[i].value().clone())
    }

    pub fn objects_of_kind(&self, kind: AxiomKind) -> Vec<ONTObject<Axiom>> {
        self.cache(kind).objects.clone()
    }

    /// The object for `axiom`, with every triple that backs it.
    pub fn find_object(&self, axiom: &Axiom) -> Option<ONTObject<Axiom>> {
        self.cache(axiom.kind()).get(axiom).cloned()
    }

    pub fn contains_axiom(&self, axiom: &Axiom) -> bool {
        self.cache(axiom.kind()).get(axiom).is_some()
    }

    pub fn axiom_count(&self) -> usize {
        self.load_all();
        self.caches.read().values().map(|c| c.len()).sum()
    }

    /// Skipped statements of the loaded kinds, in kind order.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        let caches = self.caches.read();
        AxiomKind::ALL
            .iter()
            .filter_map(|kind| caches.get(kind))
            .flat_map(|cache| cache.diagnostics.iter().cloned())
            .collect()
    }

    pub fn clear_cache(&self) {
        self.caches.write().clear();
        self.nodes.clear();
    }

    // ------------------------------------------------------------------------
    // Mutations
    // ------------------------------------------------------------------------

    /// Write `axiom` into the graph. Returns the emitted triples (including
    /// ones that were already present). Nothing is left behind on failure.
    pub fn add_axiom(&mut self, axiom: &Axiom) -> Result<Vec<Triple>, IllegalMutation> {
        let kind = axiom.kind();
        let translator = self.registry.get(kind);
        let mut writer = GraphWriter::new(&mut self.graph);
        if let Err(err) = translator.write(axiom, &mut writer) {
            writer.rollback();
            debug!(kind = kind.name(), %err, "axiom not written");
            return Err(err);
        }
        let fresh = writer.fresh();
        let written = writer.into_written();
        debug!(kind = kind.name(), triples = written.len(), fresh, "axiom written");
        if fresh > 0 {
            self.clear_cache();
        }
        Ok(written)
    }

    /// Remove `axiom` from the graph.
    ///
    /// Deletes the local triples backing the axiom that no other axiom
    /// relies on. Returns `Ok(false)` when the axiom is not present,
    /// `NotLocal` when it is backed by imported triples only and `Shared`
    /// when it would still be read back afterwards. A failed removal leaves
    /// the graph as it was.
    pub fn remove_axiom(&mut self, axiom: &Axiom) -> Result<bool, IllegalMutation> {
        self.load_all();
        let kind = axiom.kind();
        let Some(target) = self.find_object(axiom) else {
            return Ok(false);
        };
        if !target.triples().iter().any(|t| self.graph.is_local(t)) {
            return Err(IllegalMutation::NotLocal { kind });
        }

        let doomed: Vec<Triple> = {
            let backing = self.backing_caches();
            let shared: AHashSet<&Triple> = backing
                .iter()
                .flat_map(|cache| cache.objects.iter())
                .filter(|object| object.content() != target.content())
                .flat_map(|object| object.triples().iter())
                .collect();
            target
                .triples()
                .iter()
                .filter(|t| self.graph.is_local(t) && !shared.contains(t))
                .cloned()
                .collect()
        };
        if doomed.is_empty() {
            debug!(kind = kind.name(), "axiom not removed, every triple is shared");
            return Err(IllegalMutation::Shared { kind });
        }

        for t in &doomed {
            self.graph.remove(t);
        }
        self.invalidate_for(&doomed);
        if self.contains_axiom(axiom) {
            for t in &doomed {
                self.graph.add(t.clone());
            }
            self.clear_cache();
            debug!(kind = kind.name(), "axiom not removed, it still resolves");
            return Err(IllegalMutation::Shared { kind });
        }
        debug!(
            kind = kind.name(),
            removed = doomed.len(),
            kept = target.triples().len() - doomed.len(),
            "axiom removed"
        );
        Ok(true)
    }

    /// Every loaded cache, plus a declaration scan when declarations are
    /// not read: typing triples are shared whether or not they are exposed.
    fn backing_caches(&self) -> Vec<Arc<KindCache>> {
        let mut caches: Vec<Arc<KindCache>> = self.caches.read().values().cloned().collect();
        if !self.config.read_declarations {
            let ctx = self.context();
            let declarations = self.registry.get(AxiomKind::Declaration).read_all(&ctx);
            caches.push(Arc::new(KindCache::build(declarations, false)));
        }
        caches
    }

    pub fn add_triple(&mut self, triple: Triple) -> bool {
        let added = self.graph.add(triple);
        if added {
            self.clear_cache();
        }
        added
    }

    pub fn remove_triple(&mut self, triple: &Triple) -> bool {
        let removed = self.graph.remove(triple);
        if removed {
            self.invalidate_for(std::slice::from_ref(triple));
        }
        removed
    }

    /// Drop the caches that removing `removed` can change. Type triples and
    /// triples no cached object uses can change recognition anywhere.
    fn invalidate_for(&self, removed: &[Triple]) {
        if removed.is_empty() {
            return;
        }
        self.nodes.clear();
        let mut caches = self.caches.write();
        let structural = removed.iter().any(|t| t.predicate_is(rdf::TYPE));
        let affected: BTreeSet<AxiomKind> = caches
            .iter()
            .filter(|(_, cache)| removed.iter().any(|t| cache.backs(t)))
            .map(|(kind, _)| *kind)
            .collect();
        let unused = removed
            .iter()
            .any(|t| !caches.values().any(|cache| cache.backs(t)));
        if structural || unused {
            caches.clear();
        } else {
            for kind in &affected {
                caches.remove(kind);
            }
        }
        debug!(dropped = affected.len(), full = structural || unused, "caches invalidated");
    }
}

impl<G: TripleGraph + Default> Default for InternalModel<G> {
    fn default() -> Self {
        Self::new(G::default())
    }
}

// ============================================================================
// Streaming
// ============================================================================

/// Where an `AxiomStream` is in its walk over the kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanPhase {
    Idle,
    /// Looking up the cache of a kind.
    Scanning(AxiomKind),
    /// Translating the statements of a kind that had no cache.
    Translating(AxiomKind),
    Emitting(AxiomKind),
    Done,
}

/// Lazy iterator over every axiom of a model; a kind is only scanned
/// when the stream reaches it.
pub struct AxiomStream<'m, G: TripleGraph> {
    model: &'m InternalModel<G>,
    phase: ScanPhase,
    next_kind: usize,
    current: Option<Arc<KindCache>>,
    position: usize,
}

impl<'m, G: TripleGraph> AxiomStream<'m, G> {
    fn new(model: &'m InternalModel<G>) -> Self {
        Self {
            model,
            phase: ScanPhase::Idle,
            next_kind: 0,
            current: None,
            position: 0,
        }
    }

    pub fn phase(&self) -> ScanPhase {
        self.phase
    }

    fn advance(&mut self) {
        self.current = None;
        self.position = 0;
        self.phase = match AxiomKind::ALL.get(self.next_kind) {
            Some(&kind) => {
                self.next_kind += 1;
                ScanPhase::Scanning(kind)
            }
            None => ScanPhase::Done,
        };
    }
}

impl<G: TripleGraph> Iterator for AxiomStream<'_, G> {
    type Item = Axiom;

    fn next(&mut self) -> Option<Axiom> {
        loop {
            match self.phase {
                ScanPhase::Done => return None,
                ScanPhase::Idle => self.advance(),
                ScanPhase::Scanning(kind) => {
                    if self.model.is_loaded(kind) {
                        self.current = Some(self.model.cache(kind));
                        self.phase = ScanPhase::Emitting(kind);
                    } else {
                        self.phase = ScanPhase::Translating(kind);
                    }
                }
                ScanPhase::Translating(kind) => {
                    self.current = Some(self.model.cache(kind));
                    self.phase = ScanPhase::Emitting(kind);
                }
                ScanPhase::Emitting(_) => {
                    let next = self
                        .current
                        .as_ref()
                        .and_then(|cache| cache.objects.get(self.position))
                        .map(|object| object.value().clone());
                    match next {
                        Some(axiom) => {
                            self.position += 1;
                            return Some(axiom);
                        }
                        None => self.advance(),
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AxiomBody, ClassExpr, Iri};
    use ontmap_graph::vocab::{owl, rdfs};
    use ontmap_graph::{MemGraph, Node};

    fn t(s: &str, p: &str, o: &str) -> Triple {
        Triple::with_predicate(Node::iri(s), p, Node::iri(o))
    }

    fn classes() -> MemGraph {
        MemGraph::from_triples([
            t("urn:A", rdf::TYPE, owl::CLASS),
            t("urn:B", rdf::TYPE, owl::CLASS),
            t("urn:A", rdfs::SUB_CLASS_OF, "urn:B"),
        ])
    }

    fn sub(a: &str, b: &str) -> Axiom {
        Axiom::new(AxiomBody::SubClassOf {
            sub: ClassExpr::Class(Iri::new(a)),
            sup: ClassExpr::Class(Iri::new(b)),
        })
    }

    #[test]
    fn stream_walks_kinds_lazily() {
        let model = InternalModel::new(classes());
        let mut stream = model.all_axioms();
        assert_eq!(stream.phase(), ScanPhase::Idle);
        let first = stream.next().expect("first axiom");
        assert_eq!(first.kind(), AxiomKind::Declaration);
        assert!(matches!(stream.phase(), ScanPhase::Emitting(AxiomKind::Declaration)));
        assert!(!model.is_loaded(AxiomKind::SubClassOf));
        let rest: Vec<Axiom> = stream.by_ref().collect();
        assert_eq!(rest.len(), 2);
        assert_eq!(stream.phase(), ScanPhase::Done);
        assert!(model.is_loaded(AxiomKind::SubClassOf));
    }

    #[test]
    fn declarations_can_be_switched_off() {
        let config = InternalConfig {
            read_declarations: false,
            ..InternalConfig::default()
        };
        let model = InternalModel::with_config(classes(), config);
        assert_eq!(model.axioms_of_kind(AxiomKind::Declaration).count(), 0);
        assert_eq!(model.all_axioms().count(), 1);
    }

    #[test]
    fn parallel_load_matches_sequential() {
        let sequential = InternalModel::new(classes());
        let parallel =
            InternalModel::with_config(classes(), InternalConfig::default().with_parallel_scan(true));
        parallel.load_all();
        let a: Vec<Axiom> = sequential.all_axioms().collect();
        let b: Vec<Axiom> = parallel.all_axioms().collect();
        assert_eq!(a, b);
    }

    #[test]
    fn remove_keeps_shared_declarations() {
        let mut model = InternalModel::new(classes());
        assert!(model.remove_axiom(&sub("urn:A", "urn:B")).expect("remove"));
        assert!(!model.contains_axiom(&sub("urn:A", "urn:B")));
        assert!(model.graph().contains(&t("urn:A", rdf::TYPE, owl::CLASS)));
        assert_eq!(model.graph().len(), 2);
        assert!(!model.remove_axiom(&sub("urn:A", "urn:B")).expect("absent"));
    }

    #[test]
    fn removing_a_declaration_in_use_is_refused() {
        let mut model = InternalModel::new(classes());
        let declaration = Axiom::new(AxiomBody::Declaration(crate::model::Entity::class(Iri::new("urn:A"))));
        assert_eq!(
            model.remove_axiom(&declaration),
            Err(IllegalMutation::Shared {
                kind: AxiomKind::Declaration
            })
        );
        assert!(model.contains_axiom(&declaration));
        assert_eq!(model.graph().len(), 3);
    }

    #[test]
    fn hidden_declarations_are_still_shared() {
        let config = InternalConfig {
            read_declarations: false,
            ..InternalConfig::default()
        };
        let mut model = InternalModel::with_config(classes(), config);
        assert_eq!(model.remove_axiom(&sub("urn:A", "urn:B")), Ok(true));
        assert!(model.graph().contains(&t("urn:A", rdf::TYPE, owl::CLASS)));
        assert!(model.graph().contains(&t("urn:B", rdf::TYPE, owl::CLASS)));
        assert_eq!(model.graph().len(), 2);
    }

    #[test]
    fn add_then_read_back() {
        let mut model = InternalModel::new(MemGraph::new());
        let axiom = sub("urn:X", "urn:Y");
        let written = model.add_axiom(&axiom).expect("write");
        assert_eq!(written.len(), 3);
        assert!(model.contains_axiom(&axiom));
        assert_eq!(model.find_object(&axiom).expect("object").triples().len(), 3);
    }

    #[test]
    fn failed_write_leaves_graph_untouched() {
        let mut model = InternalModel::new(classes());
        let before = model.graph().len();
        let empty_chain = Axiom::new(AxiomBody::SubPropertyChainOf {
            chain: Vec::new(),
            sup: crate::model::ObjectPropertyExpr::Named(Iri::new("urn:p")),
        });
        assert!(matches!(
            model.add_axiom(&empty_chain),
            Err(IllegalMutation::Unwritable { .. })
        ));
        assert_eq!(model.graph().len(), before);
    }

    #[test]
    fn removing_a_triple_drops_only_affected_kinds() {
        let mut model = InternalModel::new(classes());
        model.load_all();
        assert!(model.remove_triple(&t("urn:A", rdfs::SUB_CLASS_OF, "urn:B")));
        assert!(!model.is_loaded(AxiomKind::SubClassOf));
        assert!(model.is_loaded(AxiomKind::Declaration));
        assert_eq!(model.axioms_of_kind(AxiomKind::SubClassOf).count(), 0);

        assert!(model.remove_triple(&t("urn:A", rdf::TYPE, owl::CLASS)));
        assert!(!model.is_loaded(AxiomKind::Declaration));
    }
}
