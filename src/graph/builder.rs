//! Concept graph builder
//!
//! Walks the direct children of the document root, turning every
//! `rdf:Description` into a [`Concept`]. Labels and relationships are
//! collected in document order, memberships are recorded at document level,
//! and the label index is filled in as each concept is finished.

use super::concept::{
    Concept, ConceptGraph, LabelIndex, Membership, RelationKind, Relationship,
};
use crate::config::{ConvertConfig, Weights};
use crate::error::{ConvertError, ConvertResult};
use crate::namespace::{same_scope, NamespaceResolver};
use roxmltree::{Document, Node, ParsingOptions};

/// RDF syntax namespace
pub const RDF_NS: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";

/// SKOS core namespace
pub const SKOS_NS: &str = "http://www.w3.org/2004/02/skos/core#";

/// Role of an element nested in a concept description
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConceptChild {
    Label,
    Relation(RelationKind),
    Member,
    Other,
}

impl ConceptChild {
    fn classify(node: Node<'_, '_>) -> Self {
        let tag = node.tag_name();
        if tag.namespace() != Some(SKOS_NS) {
            return ConceptChild::Other;
        }
        match tag.name() {
            "prefLabel" | "altLabel" | "hiddenLabel" => ConceptChild::Label,
            "member" => ConceptChild::Member,
            name => RelationKind::from_local_name(name)
                .map(ConceptChild::Relation)
                .unwrap_or(ConceptChild::Other),
        }
    }
}

/// Builds a [`ConceptGraph`] from an RDF/XML document
pub struct GraphBuilder<'a> {
    weights: &'a Weights,
    output_full_about_ns: bool,
}

impl<'a> GraphBuilder<'a> {
    pub fn new(config: &'a ConvertConfig) -> Self {
        Self {
            weights: &config.weights,
            output_full_about_ns: config.format.output_full_about_ns,
        }
    }

    /// Parse `xml` and build its concept graph
    pub fn build(&self, xml: &str) -> ConvertResult<ConceptGraph> {
        let options = ParsingOptions {
            allow_dtd: true,
            ..ParsingOptions::default()
        };
        let doc = Document::parse_with_options(xml, options)?;
        self.build_document(&doc)
    }

    /// Build the concept graph of an already parsed document
    pub fn build_document(&self, doc: &Document<'_>) -> ConvertResult<ConceptGraph> {
        let root = doc.root_element();
        let mut graph = ConceptGraph {
            resolver: NamespaceResolver::from_root(root, self.output_full_about_ns),
            ..ConceptGraph::default()
        };

        for node in root.children().filter(Node::is_element) {
            if !is_description(node) {
                tracing::warn!(element = node.tag_name().name(), "skipping top-level element");
                graph.skipped += 1;
                continue;
            }
            let concept = self.read_concept(doc, node, &mut graph)?;
            index_labels(&concept, &graph.resolver, &mut graph.label_index)?;
            graph.concepts.push(concept);
        }

        tracing::debug!(
            base = graph.resolver.base().unwrap_or("<none>"),
            concepts = graph.concepts.len(),
            memberships = graph.memberships.len(),
            skipped = graph.skipped,
            "built concept graph"
        );
        Ok(graph)
    }

    fn read_concept(
        &self,
        doc: &Document<'_>,
        node: Node<'_, '_>,
        graph: &mut ConceptGraph,
    ) -> ConvertResult<Concept> {
        let identifier = layered_attribute(node, "rdf", "about").map(str::to_string);
        let mut concept = Concept::new(identifier, line_of(doc, node));
        let mut relationships = Vec::new();

        for child in node.children().filter(Node::is_element) {
            match ConceptChild::classify(child) {
                ConceptChild::Label => concept.labels.push(text_content(child)),
                ConceptChild::Relation(kind) => relationships.push(Relationship {
                    kind,
                    weight: self.weights.weight(kind),
                    target: layered_attribute(child, "rdf", "resource").map(str::to_string),
                    line: line_of(doc, child),
                }),
                ConceptChild::Member => {
                    let container = concept.short_id(&graph.resolver)?.to_string();
                    let target = layered_attribute(child, "rdf", "resource").ok_or_else(|| {
                        ConvertError::MissingAttribute {
                            element: "skos:member".to_string(),
                            attribute: "rdf:resource",
                            line: line_of(doc, child),
                        }
                    })?;
                    let member = graph.resolver.strip(target).to_string();
                    graph.memberships.push(Membership {
                        container_short_id: container,
                        member_short_id: member,
                    });
                }
                ConceptChild::Other => {}
            }
        }

        concept.relationships = retain_in_scope(&graph.resolver, &concept, relationships)?;
        Ok(concept)
    }
}

/// Drop relationships that leave the source's path scope.
///
/// Only applies when the document has no base namespace.
fn retain_in_scope(
    resolver: &NamespaceResolver,
    concept: &Concept,
    relationships: Vec<Relationship>,
) -> ConvertResult<Vec<Relationship>> {
    if resolver.has_base() {
        return Ok(relationships);
    }
    let mut kept = Vec::with_capacity(relationships.len());
    for relationship in relationships {
        let about = concept.require_identifier()?;
        if same_scope(about, relationship.require_target()?) {
            kept.push(relationship);
        } else {
            tracing::debug!(
                source = about,
                target = relationship.target.as_deref().unwrap_or_default(),
                "dropping relationship outside source scope"
            );
        }
    }
    Ok(kept)
}

fn index_labels(
    concept: &Concept,
    resolver: &NamespaceResolver,
    index: &mut LabelIndex,
) -> ConvertResult<()> {
    for label in &concept.labels {
        index.record(concept.short_id(resolver)?, label);
    }
    Ok(())
}

fn is_description(node: Node<'_, '_>) -> bool {
    let tag = node.tag_name();
    tag.namespace() == Some(RDF_NS) && tag.name() == "Description"
}

/// Look up `prefix:local`, first through the namespace the document binds to
/// `prefix`, then as an unqualified attribute, then in the RDF namespace.
fn layered_attribute<'a>(node: Node<'a, '_>, prefix: &str, local: &str) -> Option<&'a str> {
    node.lookup_namespace_uri(Some(prefix))
        .and_then(|ns| node.attribute((ns, local)))
        .or_else(|| node.attribute(local))
        .or_else(|| node.attribute((RDF_NS, local)))
}

/// Concatenated text of all descendant text nodes
fn text_content(node: Node<'_, '_>) -> String {
    node.descendants()
        .filter(Node::is_text)
        .filter_map(|n| n.text())
        .collect()
}

fn line_of(doc: &Document<'_>, node: Node<'_, '_>) -> u32 {
    doc.text_pos_at(node.range().start).row
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER_NO_BASE: &str = r#"<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#" xmlns:skos="http://www.w3.org/2004/02/skos/core#">"#;
    const HEADER_BASE: &str = r#"<rdf:RDF xmlns="http://ex.org/" xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#" xmlns:skos="http://www.w3.org/2004/02/skos/core#">"#;

    fn doc(header: &str, body: &str) -> String {
        format!("<?xml version=\"1.0\"?>\n{}\n{}\n</rdf:RDF>", header, body)
    }

    fn build(xml: &str) -> ConceptGraph {
        let config = ConvertConfig::default();
        GraphBuilder::new(&config).build(xml).unwrap()
    }

    #[test]
    fn collects_labels_in_document_order() {
        let xml = doc(
            HEADER_BASE,
            r#"<rdf:Description rdf:about="http://ex.org/A">
                 <skos:prefLabel>Alpha</skos:prefLabel>
                 <skos:altLabel>Alef</skos:altLabel>
                 <skos:hiddenLabel>alfa</skos:hiddenLabel>
                 <skos:note>ignored</skos:note>
               </rdf:Description>"#,
        );
        let graph = build(&xml);
        assert_eq!(graph.concepts.len(), 1);
        assert_eq!(graph.concepts[0].labels, vec!["Alpha", "Alef", "alfa"]);
        assert_eq!(graph.concepts[0].identifier.as_deref(), Some("http://ex.org/A"));
    }

    #[test]
    fn label_text_spans_nested_and_cdata_nodes() {
        let xml = doc(
            HEADER_BASE,
            r#"<rdf:Description rdf:about="http://ex.org/A">
                 <skos:prefLabel>Al<![CDATA[ph]]>a</skos:prefLabel>
               </rdf:Description>"#,
        );
        let graph = build(&xml);
        assert_eq!(graph.concepts[0].labels, vec!["Alpha"]);
    }

    #[test]
    fn relationships_carry_configured_weights() {
        let xml = doc(
            HEADER_BASE,
            r#"<rdf:Description rdf:about="http://ex.org/A">
                 <skos:exactMatch rdf:resource="http://ex.org/B"/>
                 <skos:related rdf:resource="http://ex.org/C"/>
                 <skos:broader rdf:resource="http://ex.org/D"/>
                 <skos:narrower rdf:resource="http://ex.org/E"/>
               </rdf:Description>"#,
        );
        let mut config = ConvertConfig::default();
        config.weights.narrower = 7.0;
        let graph = GraphBuilder::new(&config).build(&xml).unwrap();
        let rels = &graph.concepts[0].relationships;
        let kinds: Vec<_> = rels.iter().map(|r| r.kind).collect();
        assert_eq!(
            kinds,
            vec![
                RelationKind::ExactMatch,
                RelationKind::Related,
                RelationKind::Broader,
                RelationKind::Narrower
            ]
        );
        let weights: Vec<_> = rels.iter().map(|r| r.weight).collect();
        assert_eq!(weights, vec![1.0, 0.5, 2.0, 7.0]);
        assert_eq!(rels[2].target.as_deref(), Some("http://ex.org/D"));
    }

    #[test]
    fn counts_skipped_top_level_elements() {
        let xml = doc(
            HEADER_BASE,
            r#"<skos:ConceptScheme rdf:about="http://ex.org/S"/>
               <rdf:Description rdf:about="http://ex.org/A"/>
               <skos:Concept rdf:about="http://ex.org/X"/>
               <rdf:Description rdf:about="http://ex.org/B"/>
               <rdf:Description rdf:about="http://ex.org/C"/>"#,
        );
        let graph = build(&xml);
        assert_eq!(graph.concepts.len(), 3);
        assert_eq!(graph.skipped, 2);
    }

    #[test]
    fn memberships_are_stripped_immediately() {
        let xml = doc(
            HEADER_BASE,
            r#"<rdf:Description rdf:about="http://ex.org/G">
                 <skos:prefLabel>Group</skos:prefLabel>
                 <skos:member rdf:resource="http://ex.org/A"/>
                 <skos:member rdf:resource="http://ex.org/B"/>
               </rdf:Description>"#,
        );
        let graph = build(&xml);
        assert!(graph.concepts[0].relationships.is_empty());
        assert_eq!(
            graph.memberships,
            vec![
                Membership {
                    container_short_id: "G".into(),
                    member_short_id: "A".into()
                },
                Membership {
                    container_short_id: "G".into(),
                    member_short_id: "B".into()
                },
            ]
        );
    }

    #[test]
    fn label_index_holds_last_label_per_concept() {
        let xml = doc(
            HEADER_BASE,
            r#"<rdf:Description rdf:about="http://ex.org/A">
                 <skos:prefLabel>Alpha</skos:prefLabel>
                 <skos:altLabel>Alef</skos:altLabel>
               </rdf:Description>
               <rdf:Description rdf:about="http://ex.org/B"/>"#,
        );
        let graph = build(&xml);
        assert_eq!(graph.label_index.len(), 1);
        assert_eq!(graph.label_index.get("A").unwrap().label, "Alef");
        assert!(!graph.label_index.contains("B"));
    }

    #[test]
    fn without_base_keeps_only_same_scope_relationships() {
        let xml = doc(
            HEADER_NO_BASE,
            r#"<rdf:Description rdf:about="http://ex.org/v/A">
                 <skos:prefLabel>Alpha</skos:prefLabel>
                 <skos:broader rdf:resource="http://ex.org/v/B"/>
                 <skos:related rdf:resource="http://other.org/v/C"/>
                 <skos:narrower rdf:resource="http://ex.org/v/sub/D"/>
               </rdf:Description>"#,
        );
        let graph = build(&xml);
        assert!(graph.resolver.base().is_none());
        let targets: Vec<_> = graph.concepts[0]
            .relationships
            .iter()
            .map(|r| r.target.as_deref().unwrap())
            .collect();
        assert_eq!(targets, vec!["http://ex.org/v/B"]);
    }

    #[test]
    fn with_base_keeps_every_relationship() {
        let xml = doc(
            HEADER_BASE,
            r#"<rdf:Description rdf:about="http://ex.org/A">
                 <skos:broader rdf:resource="http://ex.org/B"/>
                 <skos:exactMatch rdf:resource="http://other.org/x/C"/>
               </rdf:Description>"#,
        );
        let graph = build(&xml);
        assert_eq!(graph.resolver.base(), Some("http://ex.org"));
        assert_eq!(graph.concepts[0].relationships.len(), 2);
    }

    #[test]
    fn unqualified_attributes_are_accepted() {
        let xml = doc(
            HEADER_BASE,
            r#"<rdf:Description about="http://ex.org/A">
                 <skos:broader resource="http://ex.org/B"/>
               </rdf:Description>"#,
        );
        let graph = build(&xml);
        assert_eq!(graph.concepts[0].identifier.as_deref(), Some("http://ex.org/A"));
        assert_eq!(
            graph.concepts[0].relationships[0].target.as_deref(),
            Some("http://ex.org/B")
        );
    }

    #[test]
    fn rdf_namespace_under_another_prefix_is_recognized() {
        let xml = r#"<r:RDF xmlns:r="http://www.w3.org/1999/02/22-rdf-syntax-ns#" xmlns:s="http://www.w3.org/2004/02/skos/core#">
              <r:Description r:about="http://ex.org/v/A">
                <s:prefLabel>Alpha</s:prefLabel>
                <s:broader r:resource="http://ex.org/v/B"/>
              </r:Description>
            </r:RDF>"#;
        let graph = build(xml);
        assert_eq!(graph.skipped, 0);
        assert_eq!(graph.concepts[0].identifier.as_deref(), Some("http://ex.org/v/A"));
        assert_eq!(graph.concepts[0].relationships.len(), 1);
    }

    #[test]
    fn missing_about_without_use_is_tolerated() {
        let xml = doc(HEADER_BASE, r#"<rdf:Description/>"#);
        let graph = build(&xml);
        assert_eq!(graph.concepts[0].identifier, None);
    }

    #[test]
    fn missing_about_with_labels_is_fatal() {
        let xml = doc(
            HEADER_BASE,
            r#"<rdf:Description><skos:prefLabel>Alpha</skos:prefLabel></rdf:Description>"#,
        );
        let config = ConvertConfig::default();
        let err = GraphBuilder::new(&config).build(&xml).unwrap_err();
        match err {
            ConvertError::MissingAttribute { attribute, line, .. } => {
                assert_eq!(attribute, "rdf:about");
                assert_eq!(line, 3);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn member_without_resource_is_fatal() {
        let xml = doc(
            HEADER_BASE,
            r#"<rdf:Description rdf:about="http://ex.org/G"><skos:member/></rdf:Description>"#,
        );
        let config = ConvertConfig::default();
        let err = GraphBuilder::new(&config).build(&xml).unwrap_err();
        assert!(matches!(
            err,
            ConvertError::MissingAttribute { attribute: "rdf:resource", .. }
        ));
    }

    #[test]
    fn malformed_xml_is_fatal() {
        let config = ConvertConfig::default();
        let err = GraphBuilder::new(&config)
            .build("<rdf:RDF><unclosed></rdf:RDF>")
            .unwrap_err();
        assert!(matches!(err, ConvertError::Xml(_)));
    }
}
