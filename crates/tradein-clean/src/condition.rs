use tradein_core::Condition;

/// Buckets a condition description by substring, checked in this order.
const BUCKETS: [(&str, Condition); 3] = [
    ("Flawless", Condition::Flawless),
    ("Average", Condition::Average),
    ("Broken", Condition::Broken),
];

/// Classifies free-text condition descriptions such as
/// `"Flawless condition, like new"`.
///
/// Matching is case-sensitive, mirroring how the site capitalises bucket
/// names. Text matching no bucket is returned as [`Condition::Unclassified`].
#[must_use]
pub fn classify_condition(text: &str) -> Condition {
    BUCKETS
        .iter()
        .find(|(needle, _)| text.contains(needle))
        .map_or_else(
            || Condition::Unclassified(text.to_string()),
            |(_, condition)| condition.clone(),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flawless_description() {
        assert_eq!(
            classify_condition("Flawless condition, like new"),
            Condition::Flawless
        );
    }

    #[test]
    fn average_description() {
        assert_eq!(
            classify_condition("Average - light scratches on the body"),
            Condition::Average
        );
    }

    #[test]
    fn broken_description() {
        assert_eq!(
            classify_condition("Broken screen or back glass"),
            Condition::Broken
        );
    }

    #[test]
    fn flawless_takes_priority() {
        assert_eq!(
            classify_condition("Flawless, never Broken"),
            Condition::Flawless
        );
    }

    #[test]
    fn average_beats_broken() {
        assert_eq!(
            classify_condition("Broken corner, Average otherwise"),
            Condition::Average
        );
    }

    #[test]
    fn unmatched_is_unclassified() {
        assert_eq!(
            classify_condition("Water damaged"),
            Condition::Unclassified("Water damaged".to_string())
        );
    }

    #[test]
    fn matching_is_case_sensitive() {
        assert_eq!(
            classify_condition("flawless"),
            Condition::Unclassified("flawless".to_string())
        );
    }
}
