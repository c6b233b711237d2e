//! OWL2 axiom translation over triple graphs.
//!
//! - `model`: typed entities, class expressions, data ranges, SWRL atoms and
//!   the 39 axiom kinds
//! - `object`: `ONTObject<T>`, content-addressed identity plus backing triples
//! - `factory`: declaration-based resolution of graph nodes into model values
//! - `translate` / `registry`: one reader/writer per axiom kind
//! - `internal`: `InternalModel`, cached axiom views and graph mutation
//!
//! ```no_run
//! use ontmap_graph::{load_rdf, RdfFormat};
//! use ontmap_owl::InternalModel;
//!
//! # fn main() -> anyhow::Result<()> {
//! let document = br#"
//! <urn:A> <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <http://www.w3.org/2002/07/owl#Class> .
//! <urn:B> <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <http://www.w3.org/2002/07/owl#Class> .
//! <urn:A> <http://www.w3.org/2000/01/rdf-schema#subClassOf> <urn:B> .
//! "#;
//! let graph = load_rdf(document, RdfFormat::NTriples)?;
//! let model = InternalModel::new(graph);
//! // Declaration(Class A), Declaration(Class B), SubClassOf(A, B)
//! for axiom in model.all_axioms() {
//!     println!("{axiom:?}");
//! }
//! # Ok(())
//! # }
//! ```

pub mod annotation;
pub mod config;
pub mod error;
pub mod factory;
pub mod internal;
pub mod list;
pub mod model;
pub mod object;
pub mod registry;
pub mod translate;
pub mod writer;

pub use config::InternalConfig;
pub use error::{IllegalMutation, ListError, OntError, OntResult, TranslationError};
pub use internal::{AxiomStream, InternalModel, KindCache, ScanPhase};
pub use model::{
    Annotation, AnnotationSubject, AnnotationValue, Axiom, AxiomBody, AxiomKind, Entity, EntityKind, Iri,
    Operand,
};
pub use object::{ContentTuple, HasContent, ONTObject};
pub use registry::TranslatorRegistry;
pub use translate::{AxiomTranslator, Diagnostic};
