//! Input decoding and output encoding

use crate::error::{ConvertError, ConvertResult};
use encoding_rs::{Encoding, UTF_8};

/// How far into the input to look for an XML declaration
const DECLARATION_SCAN_LIMIT: usize = 1024;

/// Resolve a WHATWG encoding label such as `utf-8`, `latin1` or `cp1252`
pub fn lookup(label: &str) -> ConvertResult<&'static Encoding> {
    Encoding::for_label(label.trim().as_bytes())
        .ok_or_else(|| ConvertError::UnknownEncoding(label.to_string()))
}

/// Pick the input encoding.
///
/// An explicit label wins; otherwise a byte-order mark, then the XML
/// declaration, then UTF-8.
pub fn detect(bytes: &[u8], label: Option<&str>) -> ConvertResult<&'static Encoding> {
    if let Some(label) = label {
        return lookup(label);
    }
    if let Some((encoding, _)) = Encoding::for_bom(bytes) {
        return Ok(encoding);
    }
    Ok(declared_encoding(bytes).unwrap_or(UTF_8))
}

/// Decode raw input into text
pub fn decode_input(bytes: &[u8], label: Option<&str>) -> ConvertResult<String> {
    let encoding = detect(bytes, label)?;
    let (text, had_errors) = encoding.decode_with_bom_removal(bytes);
    if had_errors {
        return Err(ConvertError::Decode(encoding.name()));
    }
    tracing::debug!(encoding = encoding.name(), bytes = bytes.len(), "decoded input");
    Ok(text.into_owned())
}

/// Encode rendered output with the given label.
///
/// Labels of encodings that cannot be written (UTF-16 and friends) fall back
/// to UTF-8, following the WHATWG output-encoding rules.
pub fn encode_output(text: &str, label: &str) -> ConvertResult<Vec<u8>> {
    let encoding = lookup(label)?;
    let (bytes, used, had_errors) = encoding.encode(text);
    if had_errors {
        return Err(ConvertError::Encode(used.name()));
    }
    Ok(bytes.into_owned())
}

/// The `encoding` pseudo-attribute of a leading `<?xml ...?>` declaration
fn declared_encoding(bytes: &[u8]) -> Option<&'static Encoding> {
    let head = &bytes[..bytes.len().min(DECLARATION_SCAN_LIMIT)];
    let rest = head.strip_prefix(b"<?xml")?;
    let end = find(rest, b"?>")?;
    let decl = &rest[..end];
    let at = find(decl, b"encoding")?;
    let value = trim_ascii_start(&decl[at + b"encoding".len()..]);
    let value = trim_ascii_start(value.strip_prefix(b"=")?);
    let (&quote, value) = value.split_first()?;
    if quote != b'"' && quote != b'\'' {
        return None;
    }
    let close = value.iter().position(|&b| b == quote)?;
    Encoding::for_label(&value[..close])
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

fn trim_ascii_start(bytes: &[u8]) -> &[u8] {
    let start = bytes
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(bytes.len());
    &bytes[start..]
}
