//! RDF document ingestion (boundary adapter).
//!
//! Parses common RDF serializations with **Sophia** into a `MemGraph`:
//! - N-Triples (`.nt`)
//! - Turtle (`.ttl`)
//! - RDF/XML (`.rdf`, `.owl`, `.xml`)
//!
//! Document formats are not part of the translation core; this adapter only
//! exists so graphs can be built from files and fixtures.

use std::path::Path;

use anyhow::{anyhow, Result};
use sophia::api::prelude::*;

use crate::graph::{MemGraph, TripleGraph};
use crate::term::{self, Node};
use crate::vocab::{rdf, xsd};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RdfFormat {
    NTriples,
    Turtle,
    RdfXml,
}

impl RdfFormat {
    /// Guess the format from a file extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "nt" | "ntriples" => Some(RdfFormat::NTriples),
            "ttl" | "turtle" => Some(RdfFormat::Turtle),
            "rdf" | "owl" | "xml" => Some(RdfFormat::RdfXml),
            _ => None,
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("{message}")]
struct IngestSinkError {
    message: String,
}

impl From<anyhow::Error> for IngestSinkError {
    fn from(value: anyhow::Error) -> Self {
        Self {
            message: value.to_string(),
        }
    }
}

/// Parse RDF text into a fresh base graph.
pub fn load_rdf(bytes: &[u8], format: RdfFormat) -> Result<MemGraph> {
    let mut graph = MemGraph::new();
    load_rdf_into(&mut graph, bytes, format)?;
    Ok(graph)
}

/// Parse an RDF file, dispatching on its extension.
pub fn load_rdf_file(path: &Path) -> Result<MemGraph> {
    let bytes = std::fs::read(path)?;
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("")
        .to_lowercase();
    let format =
        RdfFormat::from_extension(&ext).ok_or_else(|| anyhow!("unsupported RDF format: .{ext}"))?;
    load_rdf(&bytes, format)
}

/// Parse RDF text and add every triple to `graph`. Returns the number of new triples.
pub fn load_rdf_into(graph: &mut MemGraph, bytes: &[u8], format: RdfFormat) -> Result<usize> {
    let cursor = std::io::Cursor::new(bytes);
    let reader = std::io::BufReader::new(cursor);
    let before = graph.local_len();

    // Each sophia parser yields its own triple type, so the sink is stamped
    // out per format rather than abstracted over a generic source.
    macro_rules! sink_into_graph {
        ($parser:expr, $what:literal) => {{
            let mut parser = $parser;
            parser
                .try_for_each_triple(|t| -> std::result::Result<(), IngestSinkError> {
                    let subject = Node::parse_display(&t.s().to_string())?;
                    let predicate = Node::parse_display(&t.p().to_string())?;
                    if !predicate.is_iri() {
                        return Ok(());
                    }
                    let object = normalize(Node::parse_display(&t.o().to_string())?);
                    graph.add(term::Triple::new(subject, predicate, object));
                    Ok(())
                })
                .map_err(|e| anyhow!(concat!("failed to parse ", $what, ": {}"), e))?;
        }};
    }

    match format {
        RdfFormat::NTriples => {
            sink_into_graph!(sophia::turtle::parser::nt::parse_bufread(reader), "N-Triples")
        }
        RdfFormat::Turtle => {
            sink_into_graph!(sophia::turtle::parser::turtle::parse_bufread(reader), "Turtle")
        }
        RdfFormat::RdfXml => {
            sink_into_graph!(sophia::xml::parser::parse_bufread(reader), "RDF/XML")
        }
    }

    let added = graph.local_len() - before;
    tracing::debug!(?format, added, "loaded RDF document");
    Ok(added)
}

/// RDF 1.1 simple literals are `xsd:string`, language-tagged ones are
/// `rdf:langString`; both are stored without an explicit datatype.
fn normalize(node: Node) -> Node {
    match node {
        Node::Literal(mut lit) => {
            let implicit = match lit.datatype.as_deref() {
                Some(xsd::STRING) => lit.language.is_none(),
                Some(rdf::LANG_STRING) => lit.language.is_some(),
                _ => false,
            };
            if implicit {
                lit.datatype = None;
            }
            Node::Literal(lit)
        }
        other => other,
    }
}
