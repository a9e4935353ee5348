//! Rendering of the `llms.txt` index from the manifest.

use std::cmp::Ordering;
use std::fmt::Write as _;

use crate::config::GeneratorConfig;
use crate::contract::ManifestEntry;
use crate::resolve::capitalize;

const PREAMBLE: &str = "This file lists every page of the site in a form meant for large language models and other automated readers. Each link points to a plain Markdown copy of the page with layout components and metadata removed.";

const CONTENT_STRUCTURE: [&str; 3] = [
    "Pages are grouped by the top-level section of the site they belong to.",
    "Every link targets a Markdown file under `/md/` that mirrors the page's location on the site.",
    "Descriptions come from page metadata or, when missing, from the opening paragraph.",
];

/// Group entries by category, keeping categories in first-seen order and
/// entries in manifest order.
pub fn group_by_category(manifest: &[ManifestEntry]) -> Vec<(&str, Vec<&ManifestEntry>)> {
    let mut groups: Vec<(&str, Vec<&ManifestEntry>)> = Vec::new();
    for entry in manifest {
        match groups.iter_mut().find(|(name, _)| *name == entry.category) {
            Some((_, members)) => members.push(entry),
            None => groups.push((entry.category.as_str(), vec![entry])),
        }
    }
    groups
}

/// Case-insensitive title ordering, falling back to a plain comparison so
/// the order is total.
pub fn compare_titles(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Render the full `llms.txt` document.
pub fn render_index(config: &GeneratorConfig, manifest: &[ManifestEntry]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# {}\n", config.project_name);
    let _ = writeln!(out, "> {}\n", config.project_description);
    let _ = writeln!(out, "{PREAMBLE}\n");
    out.push_str("## Content Structure\n\n");
    for line in CONTENT_STRUCTURE {
        let _ = writeln!(out, "- {line}");
    }
    out.push('\n');

    for (category, mut entries) in group_by_category(manifest) {
        entries.sort_by(|a, b| compare_titles(&a.title, &b.title));
        let _ = writeln!(out, "## {}\n", capitalize(category));
        for entry in entries {
            let _ = write!(out, "- [{}]({}{})", entry.title, config.base_url, entry.url);
            if let Some(description) = &entry.description {
                let _ = write!(out, ": {description}");
            }
            out.push('\n');
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn entry(category: &str, title: &str, description: Option<&str>) -> ManifestEntry {
        ManifestEntry {
            relative_path: PathBuf::from(format!("{category}/{title}.md")),
            url: format!("/md/{category}/{title}.md"),
            title: title.to_string(),
            description: description.map(String::from),
            category: category.to_string(),
        }
    }

    #[test]
    fn grouping_keeps_first_seen_order_and_every_entry() {
        let manifest = vec![
            entry("posts", "b", None),
            entry("other", "a", None),
            entry("posts", "c", None),
            entry("docs", "d", None),
        ];
        let groups = group_by_category(&manifest);
        let names: Vec<&str> = groups.iter().map(|(n, _)| *n).collect();
        assert_eq!(names, vec!["posts", "other", "docs"]);
        let total: usize = groups.iter().map(|(_, m)| m.len()).sum();
        assert_eq!(total, manifest.len());
        assert_eq!(groups[0].1[1].title, "c");
    }

    #[test]
    fn titles_sort_case_insensitively() {
        let manifest = vec![entry("posts", "banana", None), entry("posts", "Apple", None)];
        let config = GeneratorConfig::new("c", "o");
        let text = render_index(&config, &manifest);
        let apple = text.find("[Apple]").unwrap();
        let banana = text.find("[banana]").unwrap();
        assert!(apple < banana);
    }

    #[test]
    fn renders_header_categories_and_links() {
        let mut config = GeneratorConfig::new("c", "o");
        config.base_url = "https://example.com".to_string();
        config.project_name = "Docs".to_string();
        config.project_description = "All the docs.".to_string();
        let manifest = vec![
            entry("guides", "Setup", Some("How to set things up.")),
            entry("other", "About", None),
        ];

        let text = render_index(&config, &manifest);

        assert!(text.starts_with("# Docs\n\n> All the docs.\n\n"));
        assert_eq!(text.matches("\n- ").count(), 5);
        assert!(text.contains(
            "## Guides\n\n- [Setup](https://example.com/md/guides/Setup.md): How to set things up.\n\n"
        ));
        assert!(text.ends_with("## Other\n\n- [About](https://example.com/md/other/About.md)\n\n"));
        assert!(text.find("## Guides").unwrap() < text.find("## Other").unwrap());
    }

    #[test]
    fn empty_manifest_renders_header_only() {
        let config = GeneratorConfig::new("c", "o");
        let text = render_index(&config, &[]);
        assert!(text.starts_with("# Personal Website & Blog\n"));
        assert!(text.contains("## Content Structure"));
        assert_eq!(text.matches("## ").count(), 1);
    }
}
