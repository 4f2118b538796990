//! skos2csv: SKOS thesaurus to weighted edge list
//!
//! Reads an RDF/XML document describing SKOS concepts and flattens its
//! relationships into delimited rows of `source;label;weight;target`.
//!
//! # Core Concepts
//!
//! - **Concepts**: `rdf:Description` entries with labels and outgoing relationships
//! - **Relationships**: `exactMatch`, `related`, `broader` and `narrower`, each with a configured weight
//! - **Memberships**: `skos:member` links, resolved through the label index after the whole document is read
//!
//! # Example
//!
//! ```
//! use skos2csv::Converter;
//!
//! let xml = r#"<rdf:RDF xmlns="http://ex.org/"
//!     xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#"
//!     xmlns:skos="http://www.w3.org/2004/02/skos/core#">
//!   <rdf:Description rdf:about="http://ex.org/A">
//!     <skos:prefLabel>Alpha</skos:prefLabel>
//!     <skos:broader rdf:resource="http://ex.org/B"/>
//!   </rdf:Description>
//! </rdf:RDF>"#;
//!
//! let conversion = Converter::default().convert_str(xml).unwrap();
//! assert_eq!(conversion.rows[0].join(";"), "A;Alpha;2.0;B");
//! ```

pub mod config;
pub mod convert;
pub mod emit;
pub mod encoding;
mod error;
pub mod graph;
pub mod namespace;

pub use config::{ConvertConfig, EncodingConfig, LineEnding, OutputFormat, Weights};
pub use convert::{Conversion, Converter};
pub use emit::{EdgeEmitter, EdgeRow};
pub use error::{ConvertError, ConvertResult};
pub use graph::{Concept, ConceptGraph, GraphBuilder, LabelIndex, Membership, RelationKind};
pub use namespace::NamespaceResolver;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
