//! Concept graph data model

use crate::error::{ConvertError, ConvertResult};
use crate::namespace::NamespaceResolver;
use std::collections::HashMap;

/// Kinds of weighted relationship between concepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelationKind {
    ExactMatch,
    Related,
    Broader,
    Narrower,
}

impl RelationKind {
    /// Map a SKOS element local name to a relationship kind
    pub fn from_local_name(name: &str) -> Option<Self> {
        match name {
            "exactMatch" => Some(RelationKind::ExactMatch),
            "related" => Some(RelationKind::Related),
            "broader" => Some(RelationKind::Broader),
            "narrower" => Some(RelationKind::Narrower),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RelationKind::ExactMatch => "exactMatch",
            RelationKind::Related => "related",
            RelationKind::Broader => "broader",
            RelationKind::Narrower => "narrower",
        }
    }
}

impl std::fmt::Display for RelationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "skos:{}", self.as_str())
    }
}

/// An outgoing relationship of a concept
#[derive(Debug, Clone, PartialEq)]
pub struct Relationship {
    pub kind: RelationKind,
    pub weight: f64,
    /// Raw target URI; `None` when the element had no resource attribute
    pub target: Option<String>,
    /// Source line of the relationship element
    pub line: u32,
}

impl Relationship {
    /// The target URI, or an error naming the offending element
    pub fn require_target(&self) -> ConvertResult<&str> {
        self.target
            .as_deref()
            .ok_or_else(|| ConvertError::MissingAttribute {
                element: self.kind.to_string(),
                attribute: "rdf:resource",
                line: self.line,
            })
    }
}

/// A single `rdf:Description` entry
#[derive(Debug, Clone, PartialEq)]
pub struct Concept {
    /// Raw `rdf:about` URI; `None` when the attribute was absent
    pub identifier: Option<String>,
    /// Labels in document order
    pub labels: Vec<String>,
    /// Relationships that survived the same-namespace filter, in document order
    pub relationships: Vec<Relationship>,
    /// Source line of the description element
    pub line: u32,
}

impl Concept {
    pub fn new(identifier: Option<String>, line: u32) -> Self {
        Self {
            identifier,
            labels: Vec::new(),
            relationships: Vec::new(),
            line,
        }
    }

    /// The `rdf:about` URI, or an error naming the offending element
    pub fn require_identifier(&self) -> ConvertResult<&str> {
        self.identifier
            .as_deref()
            .ok_or_else(|| ConvertError::MissingAttribute {
                element: "rdf:Description".to_string(),
                attribute: "rdf:about",
                line: self.line,
            })
    }

    /// Shortened identifier used as the row source
    pub fn short_id<'a>(&'a self, resolver: &NamespaceResolver) -> ConvertResult<&'a str> {
        Ok(resolver.strip(self.require_identifier()?))
    }
}

/// A `skos:member` link from a collection to one of its members
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Membership {
    pub container_short_id: String,
    pub member_short_id: String,
}

/// Representative label of a concept
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexEntry {
    pub short_id: String,
    pub label: String,
}

/// Short identifier to representative label.
///
/// A concept with several labels is represented by the last one recorded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LabelIndex {
    entries: HashMap<String, IndexEntry>,
}

impl LabelIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `label` for `short_id`, replacing any earlier entry
    pub fn record(&mut self, short_id: &str, label: &str) {
        self.entries.insert(
            short_id.to_string(),
            IndexEntry {
                short_id: short_id.to_string(),
                label: label.to_string(),
            },
        );
    }

    pub fn get(&self, short_id: &str) -> Option<&IndexEntry> {
        self.entries.get(short_id)
    }

    pub fn contains(&self, short_id: &str) -> bool {
        self.entries.contains_key(short_id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Complete, immutable result of walking one document
#[derive(Debug, Clone, Default)]
pub struct ConceptGraph {
    /// Resolver for the document's base namespace
    pub resolver: NamespaceResolver,
    /// Concepts in document order
    pub concepts: Vec<Concept>,
    /// Memberships in document order
    pub memberships: Vec<Membership>,
    pub label_index: LabelIndex,
    /// Top-level elements that were not concept descriptions
    pub skipped: usize,
}
