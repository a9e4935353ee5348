//! Output path and category computation for source files.

use std::path::{Component, Path};
use std::sync::LazyLock;

use regex::Regex;

static LOCALE_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:\.(?:en|ru))+(\.[^.]+)$").unwrap());

/// Category used for files at the content root.
pub const DEFAULT_CATEGORY: &str = "other";

/// URL prefix under which the plain Markdown copies are served.
pub const MARKDOWN_URL_PREFIX: &str = "/md/";

fn segments(relative: &Path) -> Vec<String> {
    relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect()
}

/// The top-level directory of `relative`, or `"other"` for root-level files.
pub fn category(relative: &Path) -> String {
    let segs = segments(relative);
    match segs.first() {
        Some(first) if segs.len() > 1 => first.clone(),
        _ => DEFAULT_CATEGORY.to_string(),
    }
}

/// Normalized output path for `relative`, always using `/` separators.
///
/// - `guide.en.mdx` -> `guide.md` (locale suffix removed, extension forced to `.md`)
/// - `posts/my-post/index.mdx` -> `posts/my-post/my-post.md`
pub fn url_path(relative: &Path) -> String {
    let mut segs = segments(relative);
    let Some(file_name) = segs.pop() else {
        return String::new();
    };

    let file_name = LOCALE_SUFFIX.replace(&file_name, "$1").into_owned();
    let stem = match file_name.rfind('.') {
        Some(dot) if dot > 0 => &file_name[..dot],
        _ => &file_name[..],
    };

    let file_name = match segs.last() {
        Some(parent) if stem == "index" || stem == "_index" => format!("{parent}.md"),
        _ => format!("{stem}.md"),
    };

    segs.push(file_name);
    segs.join("/")
}

/// Site URL for a normalized output path.
pub fn site_url(url_path: &str) -> String {
    format!("{MARKDOWN_URL_PREFIX}{url_path}")
}
