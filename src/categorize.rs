use crate::normalize::normalize;
use crate::types::Category;

/// Marker substrings checked in priority order against the normalized label.
const MARKERS: [(&str, Category); 3] = [
    ("SOCIAL", Category::Social),
    ("AMBIENT", Category::Environmental),
    ("ECONOM", Category::Economic),
];

/// Unrecognized and absent labels fall back to this bucket.
pub const DEFAULT_CATEGORY: Category = Category::Social;

/// Resolve a free-text category label to one of the fixed categories.
pub fn categorize(raw_label: Option<&str>) -> Category {
    let label = normalize(raw_label);
    MARKERS
        .iter()
        .find(|(marker, _)| label.contains(marker))
        .map(|(_, category)| *category)
        .unwrap_or(DEFAULT_CATEGORY)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn matches_markers_after_normalization() {
        assert_eq!(categorize(Some("Impacto Social")), Category::Social);
        assert_eq!(categorize(Some("ambiental")), Category::Environmental);
        assert_eq!(categorize(Some("Económicas")), Category::Economic);
        assert_eq!(categorize(Some("  economía circular ")), Category::Economic);
    }

    #[test]
    fn earlier_marker_wins() {
        assert_eq!(categorize(Some("socioambiental social")), Category::Social);
        assert_eq!(categorize(Some("ambiental y económica")), Category::Environmental);
    }

    #[test]
    fn unknown_and_absent_default_to_social() {
        assert_eq!(categorize(Some("OTRO")), Category::Social);
        assert_eq!(categorize(Some("")), Category::Social);
        assert_eq!(categorize(None), Category::Social);
    }

    proptest! {
        #[test]
        fn always_one_of_the_fixed_categories(label in ".{0,40}") {
            prop_assert!(Category::ALL.contains(&categorize(Some(&label))));
        }
    }
}
