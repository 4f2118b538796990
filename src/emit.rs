//! Edge emitter
//!
//! Expands a finished [`ConceptGraph`] into weighted edge rows. Relationship
//! rows come first, in document order; membership rows follow in the order
//! they were recorded. Rows are computed in full before anything is written,
//! so a failed lookup never leaves partial output behind.

use crate::config::{OutputFormat, Weights};
use crate::error::{ConvertError, ConvertResult};
use crate::graph::ConceptGraph;

/// One emitted edge: source, source label, weight, target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeRow {
    pub source: String,
    pub label: String,
    pub weight: String,
    pub target: String,
}

impl EdgeRow {
    pub fn new(
        source: impl Into<String>,
        label: impl Into<String>,
        weight: f64,
        target: impl Into<String>,
    ) -> Self {
        Self {
            source: source.into(),
            label: label.into(),
            weight: format_weight(weight),
            target: target.into(),
        }
    }

    /// The four fields joined by the delimiter, without a terminator.
    ///
    /// Fields are not quoted; a delimiter inside a label ends up in the row
    /// as-is.
    pub fn join(&self, delimiter: &str) -> String {
        [
            self.source.as_str(),
            self.label.as_str(),
            self.weight.as_str(),
            self.target.as_str(),
        ]
        .join(delimiter)
    }
}

/// Decimal text of a weight; whole numbers keep a trailing `.0`
pub fn format_weight(weight: f64) -> String {
    format!("{:?}", weight)
}

/// Turns concept graphs into edge rows
pub struct EdgeEmitter<'a> {
    weights: &'a Weights,
}

impl<'a> EdgeEmitter<'a> {
    pub fn new(weights: &'a Weights) -> Self {
        Self { weights }
    }

    /// All rows for `graph`: relationship rows, then membership rows
    pub fn rows(&self, graph: &ConceptGraph) -> ConvertResult<Vec<EdgeRow>> {
        let mut rows = self.relationship_rows(graph)?;
        let relationship_count = rows.len();
        rows.extend(self.membership_rows(graph)?);
        tracing::debug!(
            relationship_rows = relationship_count,
            membership_rows = rows.len() - relationship_count,
            "emitted edge rows"
        );
        Ok(rows)
    }

    /// One row per (relationship, label) pair of every concept
    pub fn relationship_rows(&self, graph: &ConceptGraph) -> ConvertResult<Vec<EdgeRow>> {
        let resolver = &graph.resolver;
        let mut rows = Vec::new();
        for concept in &graph.concepts {
            for relationship in &concept.relationships {
                // every surviving target must resolve, labelled or not
                let target = resolver.strip(relationship.require_target()?);
                for label in &concept.labels {
                    let source = concept.short_id(resolver)?;
                    rows.push(EdgeRow::new(source, label.as_str(), relationship.weight, target));
                }
            }
        }
        Ok(rows)
    }

    /// One row per membership, labelled with the container's representative label.
    ///
    /// Both the container and the member must have a label-index entry; a
    /// missing one aborts the whole conversion.
    pub fn membership_rows(&self, graph: &ConceptGraph) -> ConvertResult<Vec<EdgeRow>> {
        let index = &graph.label_index;
        graph
            .memberships
            .iter()
            .map(|membership| {
                if !index.contains(&membership.member_short_id) {
                    return Err(ConvertError::UnresolvedMember(
                        membership.member_short_id.clone(),
                    ));
                }
                let container = index.get(&membership.container_short_id).ok_or_else(|| {
                    ConvertError::UnresolvedMember(membership.container_short_id.clone())
                })?;
                Ok(EdgeRow::new(
                    container.short_id.as_str(),
                    container.label.as_str(),
                    self.weights.member,
                    membership.member_short_id.as_str(),
                ))
            })
            .collect()
    }
}

/// Render rows as delimited text
pub fn render_rows(rows: &[EdgeRow], format: &OutputFormat) -> String {
    let terminator = format.line_ending.as_str();
    let mut out = String::new();
    for row in rows {
        out.push_str(&row.join(&format.delimiter));
        out.push_str(terminator);
    }
    out
}
