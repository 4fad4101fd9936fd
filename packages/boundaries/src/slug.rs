//! Kebab-case slugs used as the join key between the boundary and
//! centroid datasets.

use std::sync::LazyLock;

use regex::Regex;

/// Characters that never survive into a slug.
static DISALLOWED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9\s-]").expect("valid regex"));

static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

static HYPHENS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"-+").expect("valid regex"));

/// Converts a string to kebab-case.
///
/// The pipeline:
/// 1. Lowercase
/// 2. Strip everything except `a-z`, `0-9`, whitespace, and `-`
/// 3. Replace whitespace runs with `-`
/// 4. Collapse repeated `-`
/// 5. Trim leading and trailing `-`
#[must_use]
pub fn kebab_case(input: &str) -> String {
    let lower = input.to_lowercase();
    let stripped = DISALLOWED_RE.replace_all(&lower, "");
    let hyphenated = WHITESPACE_RE.replace_all(&stripped, "-");
    let collapsed = HYPHENS_RE.replace_all(&hyphenated, "-");
    collapsed.trim_matches('-').to_string()
}

/// The slug a boundary feature must carry: `kebab_case("{name}-{borough}")`.
#[must_use]
pub fn boundary_slug(name: &str, borough: &str) -> String {
    kebab_case(&format!("{name}-{borough}"))
}
