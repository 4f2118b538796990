//! Conversion pipeline
//!
//! Runs in two phases: the builder produces a complete [`ConceptGraph`]
//! snapshot, then the emitter turns that snapshot into rows. Nothing reaches
//! the sink unless both phases succeed.

use crate::config::ConvertConfig;
use crate::emit::{render_rows, EdgeEmitter, EdgeRow};
use crate::encoding;
use crate::error::ConvertResult;
use crate::graph::{ConceptGraph, GraphBuilder};
use std::io::Write;

/// Rows produced from one document
#[derive(Debug, Clone, PartialEq)]
pub struct Conversion {
    pub rows: Vec<EdgeRow>,
    /// Top-level elements that were not concept descriptions
    pub skipped: usize,
}

/// Converts SKOS/RDF documents into edge rows
#[derive(Debug, Clone, Default)]
pub struct Converter {
    config: ConvertConfig,
}

impl Converter {
    /// Create a converter, rejecting invalid settings
    pub fn new(config: ConvertConfig) -> ConvertResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ConvertConfig {
        &self.config
    }

    /// Build the concept graph of a decoded document
    pub fn build_graph(&self, xml: &str) -> ConvertResult<ConceptGraph> {
        GraphBuilder::new(&self.config).build(xml)
    }

    /// Convert a decoded document
    pub fn convert_str(&self, xml: &str) -> ConvertResult<Conversion> {
        let graph = self.build_graph(xml)?;
        let rows = EdgeEmitter::new(&self.config.weights).rows(&graph)?;
        Ok(Conversion {
            rows,
            skipped: graph.skipped,
        })
    }

    /// Decode raw input with the configured encoding, then convert it
    pub fn convert_bytes(&self, bytes: &[u8]) -> ConvertResult<Conversion> {
        let xml = encoding::decode_input(bytes, self.config.encoding.input.as_deref())?;
        self.convert_str(&xml)
    }

    /// Render rows with the configured format and output encoding
    pub fn encode(&self, conversion: &Conversion) -> ConvertResult<Vec<u8>> {
        let text = render_rows(&conversion.rows, &self.config.format);
        encoding::encode_output(&text, &self.config.encoding.output)
    }

    /// Convert raw input and write the encoded rows to `sink`
    pub fn convert<W: Write>(&self, bytes: &[u8], mut sink: W) -> ConvertResult<Conversion> {
        let conversion = self.convert_bytes(bytes)?;
        let encoded = self.encode(&conversion)?;
        sink.write_all(&encoded)?;
        sink.flush()?;
        Ok(conversion)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConvertError;

    const XML: &str = r#"<rdf:RDF xmlns="http://ex.org/" xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#" xmlns:skos="http://www.w3.org/2004/02/skos/core#">
  <rdf:Description rdf:about="http://ex.org/A">
    <skos:prefLabel>Alpha</skos:prefLabel>
    <skos:broader rdf:resource="http://ex.org/B"/>
  </rdf:Description>
</rdf:RDF>"#;

    #[test]
    fn invalid_config_is_rejected() {
        let mut config = ConvertConfig::default();
        config.weights.related = f64::NAN;
        assert!(matches!(Converter::new(config), Err(ConvertError::Config(_))));
    }

    #[test]
    fn convert_writes_encoded_rows() {
        let converter = Converter::default();
        let mut sink = Vec::new();
        let conversion = converter.convert(XML.as_bytes(), &mut sink).unwrap();
        assert_eq!(conversion.skipped, 0);
        assert_eq!(String::from_utf8(sink).unwrap(), "A;Alpha;2.0;B\n");
    }

    #[test]
    fn failure_leaves_sink_untouched() {
        let converter = Converter::default();
        let mut sink = Vec::new();
        assert!(converter.convert(b"<broken", &mut sink).is_err());
        assert!(sink.is_empty());
    }

    #[test]
    fn encode_uses_format_and_output_encoding() {
        let mut config = ConvertConfig::default();
        config.format.delimiter = ",".into();
        config.encoding.output = "latin1".into();
        let converter = Converter::new(config).unwrap();
        let conversion = converter.convert_str(&XML.replace("Alpha", "Caf\u{e9}")).unwrap();
        let encoded = converter.encode(&conversion).unwrap();
        assert_eq!(encoded, b"A,Caf\xe9,2.0,B\n".to_vec());
    }
}
