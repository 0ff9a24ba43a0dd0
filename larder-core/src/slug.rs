//! Recipe URL slugs.
//!
//! A slug is the lower-cased title with every run of non-`[a-z0-9]` characters
//! collapsed to one hyphen, followed by `-` and the last eight characters of the
//! recipe id. Hyphens produced at the edges of the title are kept, so a title
//! ending in punctuation yields a double hyphen before the id suffix.
//!
//! Parsing only recovers the id suffix. Turning that back into a recipe needs a
//! suffix lookup against the store, see [`crate::resolve`].

use regex::Regex;
use std::sync::LazyLock;

/// Number of trailing id characters embedded in a slug.
pub const ID_SUFFIX_LEN: usize = 8;

static NON_ALNUM_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9]+").expect("valid regex"));

/// Result of parsing a slug.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedSlug {
    /// Trailing id characters (up to [`ID_SUFFIX_LEN`]); not validated.
    pub id_suffix: String,
}

/// Build the slug for a recipe.
pub fn recipe_slug(title: &str, id: &str) -> String {
    let lowered = title.to_lowercase();
    let base = NON_ALNUM_RUN.replace_all(&lowered, "-");
    format!("{}-{}", base, id_suffix(id))
}

/// Last [`ID_SUFFIX_LEN`] characters of `id`, or all of it when shorter.
pub fn id_suffix(id: &str) -> &str {
    let start = id
        .char_indices()
        .rev()
        .nth(ID_SUFFIX_LEN - 1)
        .map(|(i, _)| i)
        .unwrap_or(0);
    &id[start..]
}

/// Recover the id suffix from a slug.
///
/// Returns `None` for an empty slug or one ending in a hyphen. The last segment
/// is returned as-is, whatever it looks like.
pub fn parse_recipe_slug(slug: &str) -> Option<ParsedSlug> {
    let last = slug.rsplit('-').next()?;
    if last.is_empty() {
        return None;
    }
    Some(ParsedSlug {
        id_suffix: last.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapses_punctuation_runs() {
        assert_eq!(
            recipe_slug("Mom's Best! Chili", "abcd12345678"),
            "mom-s-best-chili-12345678"
        );
    }

    #[test]
    fn test_trailing_punctuation_keeps_boundary_hyphen() {
        assert_eq!(
            recipe_slug("Grandma's Apple Pie!!", "r-00000000001234ab"),
            "grandma-s-apple-pie--001234ab"
        );
    }

    #[test]
    fn test_leading_punctuation_keeps_boundary_hyphen() {
        assert_eq!(recipe_slug("...Soup", "12345678"), "-soup-12345678");
    }

    #[test]
    fn test_uuid_suffix() {
        let id = "0b7e4c2a-5f1d-4e8a-9c3b-7d2e1f0a9b8c";
        assert_eq!(recipe_slug("Pad Thai", id), "pad-thai-1f0a9b8c");
    }

    #[test]
    fn test_short_id_is_used_whole() {
        assert_eq!(recipe_slug("Toast", "abc"), "toast-abc");
        assert_eq!(id_suffix("abc"), "abc");
        assert_eq!(id_suffix(""), "");
    }

    #[test]
    fn test_exactly_eight_characters() {
        assert_eq!(id_suffix("12345678"), "12345678");
        assert_eq!(id_suffix("012345678"), "12345678");
    }

    #[test]
    fn test_non_ascii_titles() {
        assert_eq!(recipe_slug("Crème Brûlée", "deadbeef"), "cr-me-br-l-e-deadbeef");
    }

    #[test]
    fn test_is_deterministic() {
        let a = recipe_slug("Same Title", "id-0000000042");
        let b = recipe_slug("Same Title", "id-0000000042");
        assert_eq!(a, b);
    }

    #[test]
    fn test_parse_returns_suffix() {
        let parsed = parse_recipe_slug("mom-s-best-chili-12345678").unwrap();
        assert_eq!(parsed.id_suffix, "12345678");
    }

    #[test]
    fn test_parse_empty_fails() {
        assert_eq!(parse_recipe_slug(""), None);
    }

    #[test]
    fn test_parse_trailing_hyphen_fails() {
        assert_eq!(parse_recipe_slug("chili-"), None);
    }

    #[test]
    fn test_parse_passes_through_any_last_segment() {
        let parsed = parse_recipe_slug("no-hyphen-here").unwrap();
        assert_eq!(parsed.id_suffix, "here");

        let parsed = parse_recipe_slug("nohyphen").unwrap();
        assert_eq!(parsed.id_suffix, "nohyphen");
    }

    #[test]
    fn test_parse_recovers_suffix_of_encoded_slug() {
        let cases = [
            ("Grandma's Apple Pie!!", "r-00000000001234ab", "001234ab"),
            ("", "0b7e4c2a-5f1d-4e8a-9c3b-7d2e1f0a9b8c", "1f0a9b8c"),
            ("Tacos", "xyz", "xyz"),
            ("!!!", "abcdefgh", "abcdefgh"),
        ];
        for (title, id, expected) in cases {
            let parsed = parse_recipe_slug(&recipe_slug(title, id)).unwrap();
            assert_eq!(parsed.id_suffix, expected, "title={:?} id={:?}", title, id);
        }
    }
}
