//! String canonicalization.
//!
//! Two flavours exist on purpose: [`normalize`] folds diacritics and is used
//! for category labels, while [`normalize_simple`] only trims and lowercases
//! and is used for name lookup keys and search queries.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// NFD-decompose, drop combining marks, trim, uppercase.
///
/// `None` maps to the empty string.
pub fn normalize(s: Option<&str>) -> String {
    let stripped: String = s
        .unwrap_or("")
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect();

    // Uppercasing can produce characters that decompose again (e.g. U+0345),
    // so strip once more to keep the function idempotent.
    stripped
        .trim()
        .to_uppercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .trim()
        .to_string()
}

/// Trim + lowercase, no diacritic folding.
pub fn normalize_simple(s: &str) -> String {
    s.to_lowercase().trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn strips_accents_and_uppercases() {
        assert_eq!(normalize(Some("  Económicas ")), "ECONOMICAS");
        assert_eq!(normalize(Some("Fundación Río")), "FUNDACION RIO");
    }

    #[test]
    fn absent_is_empty() {
        assert_eq!(normalize(None), "");
        assert_eq!(normalize(Some("   ")), "");
    }

    #[test]
    fn simple_keeps_diacritics() {
        assert_eq!(normalize_simple("  Fundación Río "), "fundación río");
        assert_ne!(normalize_simple("Fundación Río"), normalize_simple("fundacion rio"));
    }

    proptest! {
        #[test]
        fn normalize_is_idempotent(s in "[ \\ta-zA-Z0-9áéíóúàèçñÁÉÍÓÚÑüÜßα-ωΑ-Ω\u{0300}-\u{036f}]{0,32}") {
            let once = normalize(Some(&s));
            prop_assert_eq!(normalize(Some(&once)), once);
        }
    }
}
