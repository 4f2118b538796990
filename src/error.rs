//! Error types for SKOS conversion

use thiserror::Error;

/// Errors that can occur while converting a thesaurus
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("XML parse error: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error("Unknown encoding: {0}")]
    UnknownEncoding(String),

    #[error("Input is not valid {0}")]
    Decode(&'static str),

    #[error("Output contains characters not representable in {0}")]
    Encode(&'static str),

    #[error("Missing {attribute} attribute on <{element}> at line {line}")]
    MissingAttribute {
        element: String,
        attribute: &'static str,
        line: u32,
    },

    #[error("Unresolved member reference: no label recorded for '{0}'")]
    UnresolvedMember(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] serde_yaml::Error),

    #[error("Cannot read {path}: {source}")]
    ReadSource {
        path: String,
        source: std::io::Error,
    },

    #[error("Cannot write {path}: {source}")]
    WriteTarget {
        path: String,
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for conversion operations
pub type ConvertResult<T> = Result<T, ConvertError>;
