//! Text rules for catalog paths.
//!
//! Catalog paths are forward-slash strings such as `MyLib/Props/Chairs`.
//! Everything that reaches the catalog file passes through
//! [`normalize_path_fragment`]; segments derived from item names or folder
//! names pass through [`safe_segment`] first.

use once_cell::sync::Lazy;
use regex::Regex;

/// Fallback segment used whenever sanitizing leaves nothing behind
pub const UNCATEGORIZED: &str = "Uncategorized";

static REPEATED_SLASHES: Lazy<Regex> = Lazy::new(|| Regex::new(r"/{2,}").expect("valid regex"));
static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));
static UNSAFE_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^A-Za-z0-9._-]").expect("valid regex"));
static UNDERSCORE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"_+").expect("valid regex"));

/// Normalize a catalog path fragment.
///
/// Backslashes become forward slashes, repeated slashes collapse to one and
/// leading/trailing slashes and whitespace are removed. Applying it twice
/// gives the same result as applying it once.
pub fn normalize_path_fragment(value: &str) -> String {
    let cleaned = value.replace('\\', "/");
    let cleaned = REPEATED_SLASHES.replace_all(&cleaned, "/");
    cleaned
        .trim_matches(|c: char| c == '/' || c.is_whitespace())
        .to_string()
}

/// Turn arbitrary text into a catalog-safe token.
pub fn safe_segment(value: &str) -> String {
    let token = WHITESPACE_RUN.replace_all(value.trim(), "_");
    let token = UNSAFE_CHARS.replace_all(&token, "_");
    let token = UNDERSCORE_RUN.replace_all(&token, "_");
    let token = token.trim_matches('_');
    if token.is_empty() {
        UNCATEGORIZED.to_string()
    } else {
        token.to_string()
    }
}

/// Human-readable display name for the last segment of a catalog path.
///
/// `Props/wooden_chair-set` becomes `Wooden Chair Set`.
pub fn pretty_catalog_leaf(path: &str) -> String {
    let leaf = path.rsplit('/').next().unwrap_or_default();
    let leaf = leaf.replace(['_', '-'], " ");
    let leaf = WHITESPACE_RUN.replace_all(&leaf, " ");
    let leaf = leaf.trim();
    if leaf.is_empty() {
        return UNCATEGORIZED.to_string();
    }
    title_case(leaf)
}

/// Join a configured root prefix and a computed tail.
///
/// The result is already normalized, so it matches the path the catalog
/// store keys its entry under.
pub fn compose_catalog_path(root_prefix: &str, tail: &str) -> String {
    let joined = format!("{root_prefix}/{tail}");
    let path = normalize_path_fragment(&joined);
    if path.is_empty() {
        UNCATEGORIZED.to_string()
    } else {
        path
    }
}

// Uppercase the first letter of every alphabetic run, lowercase the rest.
fn title_case(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut prev_is_alpha = false;
    for c in value.chars() {
        if c.is_alphabetic() {
            if prev_is_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_is_alpha = true;
        } else {
            out.push(c);
            prev_is_alpha = false;
        }
    }
    out
}
