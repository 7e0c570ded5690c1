// macprobe-core/src/adobe/slug.rs
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref SLUG_YEAR_RE: Regex = Regex::new(r"^(?P<slug>[a-zA-Z-]+)-(?P<year>[0-9]{4})$")
        .expect("slug-year regex must compile");
    static ref HYPHEN_RUN_RE: Regex = Regex::new(r"-{2,}").expect("hyphen-run regex must compile");
}

/// Normalizes a product name into its slug form: the "CC" branding token is
/// dropped, spaces and underscores become hyphens, and everything is
/// lowercased. Normalization is idempotent.
///
/// `"After Effects"` -> `"after-effects"`, `"Photoshop CC"` -> `"photoshop"`.
pub fn normalize_slug(name: &str) -> String {
    let stripped = name.replace("CC", "");
    let hyphenated = stripped
        .to_lowercase()
        .replace([' ', '_'], "-");
    HYPHEN_RUN_RE
        .replace_all(&hyphenated, "-")
        .trim_matches('-')
        .to_string()
}

/// Splits a trailing 4-digit year off a slug, so `"photoshop-2019"`
/// behaves exactly like slug `"photoshop"` with year `"2019"`.
/// Slugs without an embedded year are returned unchanged.
pub fn split_slug_year(slug: &str) -> (String, Option<String>) {
    if let Some(caps) = SLUG_YEAR_RE.captures(slug) {
        (caps["slug"].trim_end_matches('-').to_string(), Some(caps["year"].to_string()))
    } else {
        (slug.to_string(), None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_spaces_and_case() {
        assert_eq!(normalize_slug("After Effects"), "after-effects");
        assert_eq!(normalize_slug("Premiere_Pro"), "premiere-pro");
        assert_eq!(normalize_slug("InDesign"), "indesign");
    }

    #[test]
    fn strips_cc_branding() {
        assert_eq!(normalize_slug("Photoshop CC"), "photoshop");
        assert_eq!(normalize_slug("Dimension CC"), "dimension");
    }

    #[test]
    fn normalization_is_idempotent() {
        for name in ["After Effects", "Photoshop CC", "XD", "premiere-pro", "Animate_2021"] {
            let once = normalize_slug(name);
            assert_eq!(normalize_slug(&once), once, "not idempotent for {name:?}");
        }
    }

    #[test]
    fn splits_embedded_year() {
        assert_eq!(
            split_slug_year("photoshop-2019"),
            ("photoshop".to_string(), Some("2019".to_string()))
        );
        assert_eq!(
            split_slug_year("after-effects-2020"),
            ("after-effects".to_string(), Some("2020".to_string()))
        );
    }

    #[test]
    fn leaves_plain_slugs_alone() {
        assert_eq!(split_slug_year("photoshop"), ("photoshop".to_string(), None));
        // Only a trailing 4-digit group counts as a year
        assert_eq!(split_slug_year("xd-12"), ("xd-12".to_string(), None));
    }
}
