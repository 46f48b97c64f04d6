//! Subject slugs for archive filenames.

/// Sentinel used when a subject is absent or reduces to nothing.
pub const NO_SUBJECT: &str = "None";

/// Reduce a subject line to a filename-safe slug.
///
/// Keeps alphanumerics and underscores, drops everything else (spaces
/// included), and lowercases the result. A missing or fully-stripped
/// subject becomes [`NO_SUBJECT`] so the filename always has a slug
/// segment.
pub fn slugify_subject(raw: Option<&str>) -> String {
    let slug: String = raw
        .unwrap_or("")
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_')
        .collect();
    if slug.is_empty() {
        return NO_SUBJECT.to_string();
    }
    slug.to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reply_prefix_loses_punctuation() {
        assert_eq!(slugify_subject(Some("Re:")), "re");
    }

    #[test]
    fn test_spaces_dropped() {
        assert_eq!(
            slugify_subject(Some("beautiful and stunning")),
            "beautifulandstunning"
        );
    }

    #[test]
    fn test_mixed_case_and_symbols() {
        assert_eq!(slugify_subject(Some("Fwd: Q3 report (v2)!")), "fwdq3reportv2");
    }

    #[test]
    fn test_underscore_kept() {
        assert_eq!(slugify_subject(Some("snake_case subject")), "snake_casesubject");
    }

    #[test]
    fn test_empty_is_none_sentinel() {
        assert_eq!(slugify_subject(None), NO_SUBJECT);
        assert_eq!(slugify_subject(Some("")), NO_SUBJECT);
        assert_eq!(slugify_subject(Some("!!! ...")), NO_SUBJECT);
    }

    #[test]
    fn test_unicode_alphanumerics_survive() {
        assert_eq!(slugify_subject(Some("Café menü")), "cafémenü");
    }
}
