//! Display title and description resolution.
//!
//! Title: metadata > first H1 > filename. Description: metadata > first
//! paragraph-like line of reasonable length > none.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::contract::Metadata;

static TOP_HEADING: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^# (.+)$").unwrap());

const DESCRIPTION_MIN_CHARS: usize = 50;
const DESCRIPTION_MAX_CHARS: usize = 200;

/// Resolve the display title for a document. Never returns an empty string.
pub fn resolve_title(path: &Path, metadata: &Metadata, body: &str) -> String {
    non_empty_text(metadata, "title")
        .or_else(|| first_heading(body))
        .unwrap_or_else(|| title_from_filename(path))
}

/// Resolve the description for a document, if one can be found.
pub fn resolve_description(metadata: &Metadata, body: &str) -> Option<String> {
    non_empty_text(metadata, "description").or_else(|| description_from_body(body))
}

fn non_empty_text(metadata: &Metadata, key: &str) -> Option<String> {
    metadata
        .get(key)
        .and_then(|v| v.as_text())
        .filter(|s| !s.trim().is_empty())
        .map(String::from)
}

fn first_heading(body: &str) -> Option<String> {
    TOP_HEADING
        .captures_iter(body)
        .map(|cap| cap[1].trim().to_string())
        .find(|title| !title.is_empty())
}

fn description_from_body(body: &str) -> Option<String> {
    body.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .find(|line| {
            let len = line.chars().count();
            (DESCRIPTION_MIN_CHARS..=DESCRIPTION_MAX_CHARS).contains(&len)
        })
        .map(|line| {
            line.replace(['\r', '\n'], " ")
                .chars()
                .take(DESCRIPTION_MAX_CHARS)
                .collect()
        })
}

/// Turn `my-first_post.mdx` into `My First Post`.
pub fn title_from_filename(path: &Path) -> String {
    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("");
    let spaced = stem.replace(['-', '_'], " ");
    if spaced.trim().is_empty() {
        return "Untitled".to_string();
    }
    // Each separator becomes one space, so `a--b` keeps two.
    spaced.split(' ').map(capitalize).collect::<Vec<_>>().join(" ")
}

pub(crate) fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::MetaValue;

    fn meta(pairs: &[(&str, &str)]) -> Metadata {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), MetaValue::Text(v.to_string())))
            .collect()
    }

    const LONG_LINE: &str =
        "This paragraph is long enough to be picked up as the page description text.";

    #[test]
    fn title_prefers_metadata() {
        let title = resolve_title(
            Path::new("posts/a.md"),
            &meta(&[("title", "From Meta")]),
            "# From Heading",
        );
        assert_eq!(title, "From Meta");
    }

    #[test]
    fn title_falls_back_to_first_top_level_heading() {
        let body = "Intro\n## Second level\n#  Spaced Heading  \n# Later";
        let title = resolve_title(Path::new("a.md"), &meta(&[("title", "  ")]), body);
        assert_eq!(title, "Spaced Heading");
    }

    #[test]
    fn title_ignores_list_valued_metadata() {
        let mut m = Metadata::new();
        m.insert("title".into(), MetaValue::List(vec!["x".into()]));
        assert_eq!(resolve_title(Path::new("x.md"), &m, "# Heading"), "Heading");
    }

    #[test]
    fn title_falls_back_to_filename() {
        let title = resolve_title(Path::new("docs/getting-started_guide.mdx"), &Metadata::new(), "");
        assert_eq!(title, "Getting Started Guide");
    }

    #[test]
    fn title_is_never_empty() {
        for path in ["a.md", "-.md", "__.mdx", "x/.md", "ü-ber.md"] {
            let title = resolve_title(Path::new(path), &Metadata::new(), "#\n# \n");
            assert!(!title.is_empty(), "empty title for {path}");
        }
        assert_eq!(title_from_filename(Path::new("ü-ber.md")), "Ü Ber");
    }

    #[test]
    fn filename_title_keeps_one_space_per_separator() {
        assert_eq!(title_from_filename(Path::new("a--b.md")), "A  B");
    }

    #[test]
    fn description_prefers_metadata() {
        let d = resolve_description(&meta(&[("description", "Short")]), LONG_LINE);
        assert_eq!(d.as_deref(), Some("Short"));
    }

    #[test]
    fn description_from_first_suitable_line() {
        let body = format!("# Title\n\nToo short.\n## {LONG_LINE}\n   {LONG_LINE}   \nsecond");
        assert_eq!(resolve_description(&Metadata::new(), &body).as_deref(), Some(LONG_LINE));
    }

    #[test]
    fn description_skips_overlong_lines() {
        let long = "x".repeat(201);
        assert_eq!(resolve_description(&Metadata::new(), &long), None);
        let exact = "y".repeat(200);
        assert_eq!(resolve_description(&Metadata::new(), &exact), Some(exact.clone()));
    }

    #[test]
    fn description_absent_when_nothing_matches() {
        assert_eq!(resolve_description(&Metadata::new(), "# Only heading\n\nshort"), None);
    }
}
