//! Metadata extraction for both source dialects.
//!
//! - Block header: a leading `---` ... `---` block of `key: value` lines.
//!   Any identifier-like key is kept.
//! - Embedded object: `export const metadata = { ... }` at the top of an
//!   extended-dialect file. Only `title`, `description`, `slug` and `tags` are
//!   read from it; other fields are ignored.
//!
//! Both parsers are best-effort. Malformed input yields partial or empty
//! metadata, never an error.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::contract::{Dialect, MetaValue, Metadata};

// The header body is optional and lazy so an empty header closes on the
// first `---` line instead of a later horizontal rule.
static BLOCK_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)\A---[ \t]*\r?\n(?:(.*?)\r?\n)??---[ \t]*(?:\r?\n|\z)").unwrap()
});

static HEADER_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*([A-Za-z_][A-Za-z0-9_-]*)\s*:(.*)$").unwrap());

// Non-greedy up to the first closing brace; nested objects are not balanced.
static EMBEDDED_OBJECT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)\A\s*export\s+const\s+metadata\s*=\s*\{(.*?)\}[ \t]*;?").unwrap()
});

static OBJECT_TITLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\btitle\s*:\s*(?:'([^']*)'|"([^"]*)")"#).unwrap());
static OBJECT_DESCRIPTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\bdescription\s*:\s*(?:'([^']*)'|"([^"]*)")"#).unwrap());
static OBJECT_SLUG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\bslug\s*:\s*(?:'([^']*)'|"([^"]*)")"#).unwrap());
static OBJECT_TAGS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\btags\s*:\s*\[([^\]]*)\]").unwrap());

/// Parse a leading block header.
///
/// Returns `(metadata, body)`. Without a header the metadata is empty and the
/// body is the input unchanged.
pub fn parse_block_header(text: &str) -> (Metadata, String) {
    split_block_header(text).unwrap_or_else(|| (Metadata::new(), text.to_string()))
}

fn split_block_header(text: &str) -> Option<(Metadata, String)> {
    let text = strip_bom(text);
    let caps = BLOCK_HEADER.captures(text)?;

    let mut metadata = Metadata::new();
    let block = caps.get(1).map(|m| m.as_str()).unwrap_or("");
    for line in block.lines() {
        if line.trim().is_empty() {
            continue;
        }
        let Some(kv) = HEADER_LINE.captures(line) else {
            debug!(line, "Ignoring unrecognised block header line");
            continue;
        };
        metadata.insert(kv[1].to_string(), parse_header_value(&kv[2]));
    }

    let end = caps.get(0)?.end();
    Some((metadata, text[end..].to_string()))
}

/// Parse a leading `export const metadata = { ... }` declaration.
///
/// Returns `None` when the file does not start with such a declaration.
/// On a match the declaration is removed from the returned body.
pub fn parse_embedded_object(text: &str) -> Option<(Metadata, String)> {
    let caps = EMBEDDED_OBJECT.captures(text)?;
    let object = caps.get(1).map(|m| m.as_str()).unwrap_or("");

    let mut metadata = Metadata::new();
    for (key, re) in [
        ("title", &*OBJECT_TITLE),
        ("description", &*OBJECT_DESCRIPTION),
        ("slug", &*OBJECT_SLUG),
    ] {
        if let Some(value) = quoted_field(re, object) {
            metadata.insert(key.to_string(), MetaValue::Text(value));
        }
    }
    if let Some(tags) = OBJECT_TAGS.captures(object) {
        metadata.insert("tags".to_string(), MetaValue::List(split_list(&tags[1])));
    }

    let whole = caps.get(0)?;
    let mut body = String::with_capacity(text.len());
    body.push_str(&text[..whole.start()]);
    body.push_str(&text[whole.end()..]);
    Some((metadata, body))
}

/// Run the metadata parsers appropriate for `dialect`.
///
/// The block header wins. The embedded object is only tried for the extended
/// dialect when no block header is present.
pub fn extract_metadata(dialect: Dialect, raw: &str) -> (Metadata, String) {
    let raw = strip_bom(raw);
    if let Some(found) = split_block_header(raw) {
        return found;
    }
    let embedded = match dialect {
        Dialect::Extended => parse_embedded_object(raw),
        Dialect::Plain => None,
    };
    embedded.unwrap_or_else(|| (Metadata::new(), raw.to_string()))
}

/// Render metadata back into a block header, including the delimiters.
///
/// Parsing the result with [`parse_block_header`] yields the same mapping.
pub fn to_block_header(metadata: &Metadata) -> String {
    let mut out = String::from("---\n");
    for (key, value) in metadata {
        out.push_str(key);
        out.push_str(": ");
        match value {
            MetaValue::Text(s) => {
                out.push('"');
                out.push_str(s);
                out.push('"');
            }
            MetaValue::List(items) => {
                let quoted: Vec<String> = items.iter().map(|item| format!("\"{item}\"")).collect();
                out.push('[');
                out.push_str(&quoted.join(", "));
                out.push(']');
            }
        }
        out.push('\n');
    }
    out.push_str("---\n");
    out
}

fn parse_header_value(raw: &str) -> MetaValue {
    let value = strip_quotes(raw.trim());
    if value.len() >= 2 && value.starts_with('[') && value.ends_with(']') {
        MetaValue::List(split_list(&value[1..value.len() - 1]))
    } else {
        MetaValue::Text(value.to_string())
    }
}

fn quoted_field(re: &Regex, object: &str) -> Option<String> {
    let caps = re.captures(object)?;
    caps.get(1)
        .or_else(|| caps.get(2))
        .map(|m| m.as_str().to_string())
}

fn split_list(inner: &str) -> Vec<String> {
    inner
        .split(',')
        .map(|item| strip_quotes(item.trim()).trim().to_string())
        .filter(|item| !item.is_empty())
        .collect()
}

fn strip_bom(text: &str) -> &str {
    text.strip_prefix('\u{feff}').unwrap_or(text)
}

/// Strip one layer of matching `'` or `"` quotes.
fn strip_quotes(s: &str) -> &str {
    let bytes = s.as_bytes();
    if bytes.len() >= 2 {
        let first = bytes[0];
        if (first == b'"' || first == b'\'') && bytes[bytes.len() - 1] == first {
            return &s[1..s.len() - 1];
        }
    }
    s
}
