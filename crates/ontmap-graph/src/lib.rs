//! Triple graph collaborator for ontmap.
//!
//! This crate holds everything the OWL2 translation layer needs from RDF and
//! nothing more:
//!
//! - `term`: nodes, literals, triples (structural identity, serde-ready)
//! - `vocab`: RDF / RDFS / OWL / XSD / SWRL IRIs plus the builtin vocabulary
//! - `graph`: the `TripleGraph` contract and the indexed `MemGraph`
//! - `digest`: deterministic FNV-1a content digests
//! - `ingest`: Sophia-backed loading of N-Triples, Turtle and RDF/XML

pub mod digest;
pub mod graph;
pub mod ingest;
pub mod term;
pub mod vocab;

pub use graph::{MemGraph, TripleGraph};
pub use ingest::{load_rdf, load_rdf_file, load_rdf_into, RdfFormat};
pub use term::{Literal, Node, Triple};
