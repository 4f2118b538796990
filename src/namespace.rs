//! Namespace resolution for resource identifiers
//!
//! Shortens resource URIs into the labels used in emitted rows. A document
//! either declares a default namespace on its root element, in which case
//! identifiers under it are shortened relative to it, or it does not, in
//! which case every identifier is reduced to its final path segment.

/// Shortens resource URIs relative to a document's base namespace
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NamespaceResolver {
    base: Option<String>,
    keep_full: bool,
}

impl NamespaceResolver {
    /// Create a resolver from a declared default namespace.
    ///
    /// An empty declaration counts as none. One trailing `/` is removed.
    pub fn new(base: Option<&str>, keep_full: bool) -> Self {
        let base = base
            .filter(|ns| !ns.is_empty())
            .map(|ns| ns.strip_suffix('/').unwrap_or(ns).to_string());
        Self { base, keep_full }
    }

    /// Create a resolver from the default namespace declared on `root`
    pub fn from_root(root: roxmltree::Node<'_, '_>, keep_full: bool) -> Self {
        let declared = root
            .namespaces()
            .find(|ns| ns.name().is_none())
            .map(|ns| ns.uri());
        Self::new(declared, keep_full)
    }

    /// The base namespace, without its trailing `/`
    pub fn base(&self) -> Option<&str> {
        self.base.as_deref()
    }

    pub fn has_base(&self) -> bool {
        self.base.is_some()
    }

    /// Shorten `uri` into a short identifier.
    ///
    /// Without a base namespace this is the final `/`-separated segment.
    /// With one, a URI under the base loses the base and the separator that
    /// follows it, unless full identifiers were requested. Anything else is
    /// returned unchanged.
    pub fn strip<'a>(&self, uri: &'a str) -> &'a str {
        match &self.base {
            None => last_segment(uri),
            Some(base) if !self.keep_full => match uri.strip_prefix(base.as_str()) {
                Some(rest) => skip_separator(rest),
                None => uri,
            },
            Some(_) => uri,
        }
    }
}

/// Everything after the last `/`, or the whole string if there is none
pub fn last_segment(uri: &str) -> &str {
    match uri.rfind('/') {
        Some(pos) => &uri[pos + 1..],
        None => uri,
    }
}

/// Everything before the last `/`; empty if there is none
pub fn path_scope(uri: &str) -> &str {
    match uri.rfind('/') {
        Some(pos) => &uri[..pos],
        None => "",
    }
}

/// True when both URIs share every path segment except the last
pub fn same_scope(a: &str, b: &str) -> bool {
    path_scope(a) == path_scope(b)
}

fn skip_separator(rest: &str) -> &str {
    let mut chars = rest.chars();
    chars.next();
    chars.as_str()
}
