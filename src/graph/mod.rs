//! Concept graph: data model and builder

mod builder;
mod concept;

pub use builder::{GraphBuilder, RDF_NS, SKOS_NS};
pub use concept::{
    Concept, ConceptGraph, IndexEntry, LabelIndex, Membership, RelationKind, Relationship,
};
