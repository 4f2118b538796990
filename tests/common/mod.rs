//! Shared fixtures for conversion tests
//!
//! Documents are assembled from a root element header and a body of
//! top-level elements, mirroring how SKOS exports are laid out.

#![allow(dead_code)]

pub const RDF_NS: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
pub const SKOS_NS: &str = "http://www.w3.org/2004/02/skos/core#";

/// Wrap `body` in an `rdf:RDF` root, optionally declaring a default namespace
pub fn rdf_document(base: Option<&str>, body: &str) -> String {
    let default_ns = base
        .map(|ns| format!(" xmlns=\"{}\"", ns))
        .unwrap_or_default();
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<rdf:RDF{} xmlns:rdf=\"{}\" xmlns:skos=\"{}\">\n{}\n</rdf:RDF>\n",
        default_ns, RDF_NS, SKOS_NS, body
    )
}

/// A concept description with labels and child elements
pub fn description(about: &str, labels: &[&str], relations: &[(&str, &str)]) -> String {
    let mut out = format!("  <rdf:Description rdf:about=\"{}\">\n", about);
    for label in labels {
        out.push_str(&format!("    <skos:prefLabel>{}</skos:prefLabel>\n", label));
    }
    for (element, target) in relations {
        out.push_str(&format!(
            "    <skos:{} rdf:resource=\"{}\"/>\n",
            element, target
        ));
    }
    out.push_str("  </rdf:Description>\n");
    out
}

/// Small thesaurus under `http://ex.org` with a collection
pub fn sample_thesaurus() -> String {
    let body = [
        "  <skos:ConceptScheme rdf:about=\"http://ex.org/scheme\"/>\n".to_string(),
        description(
            "http://ex.org/A",
            &["Alpha"],
            &[("broader", "http://ex.org/B"), ("related", "http://ex.org/C")],
        ),
        description("http://ex.org/B", &["Beta"], &[("narrower", "http://ex.org/A")]),
        description("http://ex.org/C", &["Gamma"], &[("exactMatch", "http://ex.org/A")]),
        description(
            "http://ex.org/G",
            &["Group"],
            &[("member", "http://ex.org/A"), ("member", "http://ex.org/B")],
        ),
    ]
    .concat();
    rdf_document(Some("http://ex.org/"), &body)
}
