// crates/mastdup-core/src/text.rs

/// Convert a target identifier into a folded key for duplicate detection.
///
/// This performs:
/// 1\) Trim surrounding whitespace
/// 2\) Transliterate Unicode → ASCII (e.g. `α Cen` -> `a Cen`)
/// 3\) Collapse internal runs of whitespace to one space
/// 4\) Normalize to lowercase
///
/// # Examples
///
/// ```rust
/// use mastdup_core::text::fold_key;
///
/// assert_eq!(fold_key("  NGC   1275 "), "ngc 1275");
/// assert_eq!(fold_key("M31"), fold_key("m31"));
/// ```
pub fn fold_key(s: &str) -> String {
    deunicode::deunicode(s.trim())
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Header normalization used by the target loader: trim + lower-case.
///
/// Unlike [`fold_key`] this does not transliterate, so a header spelled
/// `Déc` does not silently match `dec`.
#[inline]
pub fn normalize_header(s: &str) -> String {
    s.trim().to_lowercase()
}

/// Shorten `s` to at most `max` characters, ending in `...` when cut.
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    if max <= 3 {
        return s.chars().take(max).collect();
    }
    let mut out: String = s.chars().take(max - 3).collect();
    out.push_str("...");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fold_key_merges_case_and_spacing() {
        assert_eq!(fold_key("NGC 1275"), fold_key(" ngc  1275"));
        assert_ne!(fold_key("NGC 1275"), fold_key("NGC1275"));
    }

    #[test]
    fn fold_key_transliterates() {
        assert_eq!(fold_key("Ériká"), "erika");
    }

    #[test]
    fn normalize_header_keeps_accents() {
        assert_eq!(normalize_header("  RA "), "ra");
        assert_eq!(normalize_header("Déc"), "déc");
    }

    #[test]
    fn truncate_is_char_aware() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a longer proposal title", 10), "a longe...");
        assert_eq!(truncate("ééééé", 4), "é...");
        assert_eq!(truncate("abcdef", 2), "ab");
    }
}
