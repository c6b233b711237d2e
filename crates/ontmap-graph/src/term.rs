//! RDF term model: nodes, literals and triples.
//!
//! Nodes are plain values (no interning): identity is structural, so two
//! triples with the same subject/predicate/object are the same triple no
//! matter where they were created.

use std::fmt;

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

use crate::vocab::xsd;

/// A literal: lexical form plus optional datatype IRI or language tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Literal {
    pub lexical: String,
    pub datatype: Option<String>,
    pub language: Option<String>,
}

impl Literal {
    /// A plain (untyped, untagged) literal.
    pub fn plain(lexical: impl Into<String>) -> Self {
        Self {
            lexical: lexical.into(),
            datatype: None,
            language: None,
        }
    }

    pub fn typed(lexical: impl Into<String>, datatype: impl Into<String>) -> Self {
        Self {
            lexical: lexical.into(),
            datatype: Some(datatype.into()),
            language: None,
        }
    }

    pub fn lang(lexical: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            lexical: lexical.into(),
            datatype: None,
            language: Some(language.into()),
        }
    }

    pub fn non_negative_integer(value: u32) -> Self {
        Self::typed(value.to_string(), xsd::NON_NEGATIVE_INTEGER)
    }

    pub fn boolean(value: bool) -> Self {
        Self::typed(value.to_string(), xsd::BOOLEAN)
    }

    /// Parse the lexical form as a cardinality (non-negative integer).
    pub fn as_cardinality(&self) -> Option<u32> {
        self.lexical.trim().parse().ok()
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\"", escape_rdf_string(&self.lexical))?;
        if let Some(lang) = &self.language {
            write!(f, "@{lang}")?;
        } else if let Some(dt) = &self.datatype {
            write!(f, "^^<{dt}>")?;
        }
        Ok(())
    }
}

/// An RDF node in any triple position.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Node {
    Iri(String),
    Blank(String),
    Literal(Literal),
}

impl Node {
    pub fn iri(iri: impl Into<String>) -> Self {
        Node::Iri(iri.into())
    }

    pub fn blank(label: impl Into<String>) -> Self {
        Node::Blank(label.into())
    }

    pub fn literal(literal: Literal) -> Self {
        Node::Literal(literal)
    }

    pub fn is_iri(&self) -> bool {
        matches!(self, Node::Iri(_))
    }

    pub fn is_blank(&self) -> bool {
        matches!(self, Node::Blank(_))
    }

    pub fn is_literal(&self) -> bool {
        matches!(self, Node::Literal(_))
    }

    /// Subject-capable: an IRI or a blank node.
    pub fn is_resource(&self) -> bool {
        !self.is_literal()
    }

    pub fn as_iri(&self) -> Option<&str> {
        match self {
            Node::Iri(iri) => Some(iri),
            _ => None,
        }
    }

    pub fn as_blank(&self) -> Option<&str> {
        match self {
            Node::Blank(label) => Some(label),
            _ => None,
        }
    }

    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            Node::Literal(lit) => Some(lit),
            _ => None,
        }
    }

    /// True if this node is the IRI `iri`.
    pub fn is(&self, iri: &str) -> bool {
        self.as_iri() == Some(iri)
    }

    /// Parse the N-Triples-ish display form of a term (`<iri>`, `_:b`, `"lex"@en`, `"lex"^^<dt>`).
    pub fn parse_display(term: &str) -> Result<Node> {
        let s = term.trim();

        if let Some(rest) = s.strip_prefix('<').and_then(|t| t.strip_suffix('>')) {
            return Ok(Node::Iri(rest.to_string()));
        }

        if let Some(rest) = s.strip_prefix("_:") {
            return Ok(Node::Blank(rest.to_string()));
        }

        if s.starts_with('"') {
            let mut end_quote = None;
            let mut escaped = false;
            for (i, ch) in s.char_indices().skip(1) {
                if escaped {
                    escaped = false;
                    continue;
                }
                if ch == '\\' {
                    escaped = true;
                    continue;
                }
                if ch == '"' {
                    end_quote = Some(i);
                    break;
                }
            }
            let Some(end) = end_quote else {
                return Err(anyhow!("invalid literal term (missing closing quote): {s}"));
            };

            let lexical = unescape_rdf_string(&s[1..end]);
            let rest = s[end + 1..].trim();

            let mut literal = Literal::plain(lexical);
            if let Some(lang) = rest.strip_prefix('@') {
                literal.language = Some(lang.to_string());
            } else if let Some(dt) = rest.strip_prefix("^^") {
                let dt = dt.trim();
                if let Some(dt_iri) = dt.strip_prefix('<').and_then(|t| t.strip_suffix('>')) {
                    literal.datatype = Some(dt_iri.to_string());
                } else if !dt.is_empty() {
                    literal.datatype = Some(dt.to_string());
                }
            }
            return Ok(Node::Literal(literal));
        }

        Err(anyhow!("unsupported RDF term form: {s}"))
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Iri(iri) => write!(f, "<{iri}>"),
            Node::Blank(label) => write!(f, "_:{label}"),
            Node::Literal(lit) => write!(f, "{lit}"),
        }
    }
}

impl From<Literal> for Node {
    fn from(value: Literal) -> Self {
        Node::Literal(value)
    }
}

/// A (subject, predicate, object) statement.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Triple {
    pub subject: Node,
    pub predicate: Node,
    pub object: Node,
}

impl Triple {
    pub fn new(subject: Node, predicate: Node, object: Node) -> Self {
        Self {
            subject,
            predicate,
            object,
        }
    }

    /// Convenience constructor for the common `subject <predicate-iri> object` case.
    pub fn with_predicate(subject: Node, predicate: &str, object: Node) -> Self {
        Self::new(subject, Node::iri(predicate), object)
    }

    pub fn predicate_is(&self, iri: &str) -> bool {
        self.predicate.is(iri)
    }
}

impl fmt::Display for Triple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} .", self.subject, self.predicate, self.object)
    }
}

fn escape_rdf_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            other => out.push(other),
        }
    }
    out
}

fn unescape_rdf_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some('"') => out.push('"'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}
