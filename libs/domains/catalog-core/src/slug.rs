use regex::Regex;
use std::sync::LazyLock;

static NON_ALPHANUMERIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9]+").expect("static regex compiles"));

/// Derive a URL slug from a display name.
///
/// Lower-cases the name, collapses each run of characters outside
/// `[a-z0-9]` into one hyphen and trims hyphens from both ends. The result
/// is empty when the name has no ASCII letters or digits.
///
/// ```
/// use domain_catalog_core::slugify;
///
/// assert_eq!(slugify("  Hello, World!  "), "hello-world");
/// ```
pub fn slugify(name: &str) -> String {
    let lowered = name.to_lowercase();
    NON_ALPHANUMERIC
        .replace_all(&lowered, "-")
        .trim_matches('-')
        .to_string()
}

/// The slug to store: the explicit one when given, otherwise derived.
pub fn resolve_slug(explicit: Option<&str>, name: &str) -> String {
    match explicit {
        Some(slug) => slug.to_string(),
        None => slugify(name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_basic() {
        assert_eq!(slugify("Electronics"), "electronics");
        assert_eq!(slugify("Home & Garden"), "home-garden");
        assert_eq!(slugify("St. Mary's High School"), "st-mary-s-high-school");
    }

    #[test]
    fn test_slugify_collapses_and_trims() {
        assert_eq!(slugify("--Big   Sale!!--"), "big-sale");
        assert_eq!(slugify("a__b..c"), "a-b-c");
    }

    #[test]
    fn test_slugify_keeps_digits() {
        assert_eq!(slugify("USB-C Cable 2m"), "usb-c-cable-2m");
    }

    #[test]
    fn test_slugify_drops_non_ascii() {
        assert_eq!(slugify("Café Crème"), "caf-cr-me");
        assert_eq!(slugify("日本"), "");
    }

    #[test]
    fn test_resolve_slug_prefers_explicit() {
        assert_eq!(resolve_slug(Some("custom"), "Electronics"), "custom");
        assert_eq!(resolve_slug(None, "Electronics"), "electronics");
    }

    #[test]
    fn test_derived_slugs_have_canonical_shape() {
        for name in ["  x  ", "A-B", "Tom & Jerry's", "100% Cotton", "--a--b--"] {
            let slug = slugify(name);
            assert!(!slug.starts_with('-') && !slug.ends_with('-'), "{slug}");
            assert!(!slug.contains("--"), "{slug}");
            assert_eq!(slug, slug.to_lowercase());
        }
    }
}
