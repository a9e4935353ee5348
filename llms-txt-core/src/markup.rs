//! Removal of embedded component markup and import statements from
//! extended-dialect bodies.

use std::sync::LazyLock;

use regex::Regex;

// Opening tag of a capitalized component, e.g. `<Callout type="info">`.
static COMPONENT_OPEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<([A-Z][A-Za-z0-9_.]*)(?:\s[^>]*)?>").unwrap());

static COMPONENT_SELF_CLOSING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[A-Z][A-Za-z0-9_.]*(?:\s[^>]*)?/>").unwrap());

static IMPORT_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?m)^import\s+.*?\s+from\s+['"][^'"\n]+['"];?[ \t]*(?:\r?\n)?"#).unwrap()
});

/// Strip component markup and imports, in this order:
///
/// 1. paired capitalized tags together with their contents,
/// 2. self-closing capitalized tags,
/// 3. `import ... from '...'` lines.
pub fn strip_markup(body: &str) -> String {
    let without_pairs = strip_paired_components(body);
    let without_tags = COMPONENT_SELF_CLOSING.replace_all(&without_pairs, "");
    IMPORT_LINE.replace_all(&without_tags, "").into_owned()
}

/// Remove `<Name ...>...</Name>` spans. Each span ends at the first
/// `</Name>` after its opening tag; same-name nesting is not balanced.
fn strip_paired_components(body: &str) -> String {
    let mut out = String::with_capacity(body.len());
    let mut cursor = 0;
    let mut search_from = 0;

    while let Some(caps) = COMPONENT_OPEN.captures_at(body, search_from) {
        let Some(open) = caps.get(0) else { break };
        if open.as_str().ends_with("/>") {
            search_from = open.end();
            continue;
        }
        let close_tag = format!("</{}>", &caps[1]);
        match body[open.end()..].find(&close_tag) {
            Some(offset) => {
                out.push_str(&body[cursor..open.start()]);
                cursor = open.end() + offset + close_tag.len();
                search_from = cursor;
            }
            None => search_from = open.end(),
        }
    }

    out.push_str(&body[cursor..]);
    out
}
