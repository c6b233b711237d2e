//! Content-addressed object identity.
//!
//! An `ONTObject<T>` owns a decoded value together with the triples that
//! justify it. Equality and hashing go through the *content tuple* (kind tag,
//! operand tuple, annotation set), never through the triples: the same axiom
//! found through two different encodings is one object, and `merge` folds the
//! second encoding's triples into the first.
//!
//! The content tuple is computed on first use and memoized in a `OnceLock`,
//! so concurrent readers see it either absent or complete.

use std::collections::BTreeSet;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, OnceLock};

use ontmap_graph::digest::{content_id, fnv1a64};
use ontmap_graph::Triple;
use serde::Serialize;

use crate::error::IllegalMutation;
use crate::model::{
    Annotation, Atom, Axiom, ClassExpr, DataRange, Entity, Individual, ObjectPropertyExpr, Operand,
};

// ============================================================================
// Content tuples
// ============================================================================

/// Canonical structural representation used for equality and hashing.
#[derive(Debug, Clone, Serialize)]
pub struct ContentTuple {
    tag: &'static str,
    operands: Vec<Operand>,
    annotations: Vec<Annotation>,
    #[serde(skip)]
    digest: u64,
}

impl ContentTuple {
    /// `annotations` is sorted and de-duplicated here.
    pub fn new(tag: &'static str, operands: Vec<Operand>, annotations: Vec<Annotation>) -> Self {
        let mut annotations = annotations;
        annotations.sort();
        annotations.dedup();
        let digest = content_digest(tag, &operands, &annotations);
        Self {
            tag,
            operands,
            annotations,
            digest,
        }
    }

    pub fn tag(&self) -> &'static str {
        self.tag
    }

    pub fn operands(&self) -> &[Operand] {
        &self.operands
    }

    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    pub fn digest(&self) -> u64 {
        self.digest
    }

    /// `"ontfnv1a64:<hex>"`.
    pub fn content_id(&self) -> String {
        content_id(self.digest)
    }
}

/// FNV-1a over the compact JSON rendering of the tuple, so ids do not
/// depend on the platform or on `std::hash` internals.
fn content_digest(tag: &str, operands: &[Operand], annotations: &[Annotation]) -> u64 {
    match serde_json::to_vec(&(tag, operands, annotations)) {
        Ok(bytes) => fnv1a64(&bytes),
        // The model has no maps with non-string keys, so this is not reached.
        Err(_) => fnv1a64(format!("{tag}{operands:?}{annotations:?}").as_bytes()),
    }
}

impl PartialEq for ContentTuple {
    fn eq(&self, other: &Self) -> bool {
        self.digest == other.digest
            && self.tag == other.tag
            && self.operands == other.operands
            && self.annotations == other.annotations
    }
}

impl Eq for ContentTuple {}

impl Hash for ContentTuple {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.digest);
    }
}

/// Values that can be wrapped in an `ONTObject`.
pub trait HasContent {
    fn content(&self) -> ContentTuple;
}

impl HasContent for Axiom {
    fn content(&self) -> ContentTuple {
        ContentTuple::new(
            self.kind().name(),
            self.operands(),
            self.annotations.iter().cloned().collect(),
        )
    }
}

impl HasContent for Operand {
    fn content(&self) -> ContentTuple {
        ContentTuple::new("Operand", vec![self.clone()], Vec::new())
    }
}

impl HasContent for ClassExpr {
    fn content(&self) -> ContentTuple {
        ContentTuple::new("ClassExpression", vec![Operand::Class(self.clone())], Vec::new())
    }
}

impl HasContent for DataRange {
    fn content(&self) -> ContentTuple {
        ContentTuple::new("DataRange", vec![Operand::DataRange(self.clone())], Vec::new())
    }
}

impl HasContent for ObjectPropertyExpr {
    fn content(&self) -> ContentTuple {
        ContentTuple::new(
            "ObjectPropertyExpression",
            vec![Operand::ObjectProperty(self.clone())],
            Vec::new(),
        )
    }
}

impl HasContent for Individual {
    fn content(&self) -> ContentTuple {
        ContentTuple::new("Individual", vec![Operand::Individual(self.clone())], Vec::new())
    }
}

impl HasContent for Entity {
    fn content(&self) -> ContentTuple {
        ContentTuple::new("Entity", vec![Operand::Entity(self.clone())], Vec::new())
    }
}

impl HasContent for Atom {
    fn content(&self) -> ContentTuple {
        ContentTuple::new("SWRLAtom", vec![Operand::Atom(self.clone())], Vec::new())
    }
}

impl HasContent for Annotation {
    fn content(&self) -> ContentTuple {
        ContentTuple::new(
            "Annotation",
            vec![
                Operand::AnnotationProperty(self.property.clone()),
                Operand::AnnotationValue(self.value.clone()),
            ],
            self.annotations.iter().cloned().collect(),
        )
    }
}

// ============================================================================
// ONTObject
// ============================================================================

struct Inner<T> {
    value: T,
    triples: BTreeSet<Triple>,
    content: OnceLock<Arc<ContentTuple>>,
}

/// A decoded value plus its backing triples; cheap to clone.
pub struct ONTObject<T> {
    inner: Arc<Inner<T>>,
}

impl<T> Clone for ONTObject<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> ONTObject<T> {
    pub fn value(&self) -> &T {
        &self.inner.value
    }

    /// Triples that justify this object (provenance, not identity).
    pub fn triples(&self) -> &BTreeSet<Triple> {
        &self.inner.triples
    }

    pub fn contains_triple(&self, triple: &Triple) -> bool {
        self.inner.triples.contains(triple)
    }
}

impl<T: HasContent> ONTObject<T> {
    pub fn wrap(value: T, triples: impl IntoIterator<Item = Triple>) -> Self {
        Self {
            inner: Arc::new(Inner {
                value,
                triples: triples.into_iter().collect(),
                content: OnceLock::new(),
            }),
        }
    }

    /// Memoized content tuple.
    pub fn content(&self) -> &Arc<ContentTuple> {
        self.inner
            .content
            .get_or_init(|| Arc::new(self.inner.value.content()))
    }

    pub fn content_id(&self) -> String {
        self.content().content_id()
    }

    /// Wrap another value over the same triples.
    pub fn map<U: HasContent>(&self, f: impl FnOnce(&T) -> U) -> ONTObject<U> {
        ONTObject::wrap(f(&self.inner.value), self.inner.triples.iter().cloned())
    }
}

impl<T: HasContent + Clone> ONTObject<T> {
    /// Same value and content, with `extra` added to the backing triples.
    pub fn with_triples(&self, extra: impl IntoIterator<Item = Triple>) -> Self {
        let mut triples = self.inner.triples.clone();
        triples.extend(extra);
        Self {
            inner: Arc::new(Inner {
                value: self.inner.value.clone(),
                triples,
                content: OnceLock::from(Arc::clone(self.content())),
            }),
        }
    }

    /// Fold `other`'s triples into this object. `self` stays primary: its
    /// value is kept. Fails when the two contents differ.
    pub fn merge(&self, other: &ONTObject<T>) -> Result<ONTObject<T>, IllegalMutation> {
        if self.content() != other.content() {
            return Err(IllegalMutation::ContentMismatch {
                left: self.content_id(),
                right: other.content_id(),
            });
        }
        if Arc::ptr_eq(&self.inner, &other.inner) || other.triples().is_subset(self.triples()) {
            return Ok(self.clone());
        }
        Ok(self.with_triples(other.triples().iter().cloned()))
    }
}

impl<T: HasContent> PartialEq for ONTObject<T> {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner) || self.content() == other.content()
    }
}

impl<T: HasContent> Eq for ONTObject<T> {}

impl<T: HasContent> Hash for ONTObject<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.content().hash(state);
    }
}

impl<T: fmt::Debug> fmt::Debug for ONTObject<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ONTObject")
            .field("value", &self.inner.value)
            .field("triples", &self.inner.triples.len())
            .finish()
    }
}
