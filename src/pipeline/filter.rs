//! Key filter for a tracked entity's pose stream.
//!
//! Matching is by unanchored substring containment: a key matches when it
//! contains the prefix anywhere and contains at least one suffix anywhere.
//! `x.gams.frames.p1_base_footprint.origin` therefore matches the prefix
//! `gams.frames.p1_base_footprint` even though it does not start with it.

/// Returns true iff `key` contains `prefix` and at least one of `suffixes`
pub fn matches<S: AsRef<str>>(key: &str, prefix: &str, suffixes: &[S]) -> bool {
    key.contains(prefix) && suffixes.iter().any(|s| key.contains(s.as_ref()))
}

/// A prefix and suffix set bound together
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyFilter {
    prefix: String,
    suffixes: Vec<String>,
}

impl KeyFilter {
    pub fn new<I, S>(prefix: impl Into<String>, suffixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            prefix: prefix.into(),
            suffixes: suffixes.into_iter().map(Into::into).collect(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn suffixes(&self) -> &[String] {
        &self.suffixes
    }

    /// Check whether a key belongs to the tracked pose stream
    pub fn matches(&self, key: &str) -> bool {
        matches(key, &self.prefix, &self.suffixes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const PREFIX: &str = "gams.frames.p1_base_footprint";
    const SUFFIXES: [&str; 2] = [".origin", ".parent"];

    #[test]
    fn test_matches_unanchored_prefix() {
        assert!(matches(
            "x.gams.frames.p1_base_footprint.origin",
            PREFIX,
            &SUFFIXES
        ));
    }

    #[test]
    fn test_rejects_other_entity() {
        assert!(!matches("x.gams.frames.p2_map.origin", PREFIX, &SUFFIXES));
    }

    #[test]
    fn test_requires_a_suffix() {
        assert!(!matches(
            ".gams.frames.p1_base_footprint.toi",
            PREFIX,
            &SUFFIXES
        ));
        assert!(matches(
            ".gams.frames.p1_base_footprint.parent",
            PREFIX,
            &SUFFIXES
        ));
    }

    #[test]
    fn test_empty_suffix_set_matches_nothing() {
        let none: [&str; 0] = [];
        assert!(!matches(".gams.frames.p1_base_footprint.origin", PREFIX, &none));
    }

    #[test]
    fn test_suffix_is_substring_not_anchored() {
        // ".origin" in the middle of the key still counts
        assert!(matches(
            ".gams.frames.p1_base_footprint.origin.stamp",
            PREFIX,
            &SUFFIXES
        ));
    }

    #[test]
    fn test_key_filter_delegates() {
        let filter = KeyFilter::new(PREFIX, SUFFIXES);
        assert_eq!(filter.suffixes().len(), 2);
        assert!(filter.matches(".gams.frames.p1_base_footprint.origin"));
        assert!(!filter.matches(".gams.frames.p1_map.origin"));
    }

    proptest! {
        #[test]
        fn test_surrounding_text_never_breaks_a_match(
            head in "[a-z._]{0,12}",
            mid in "[a-z._]{0,12}",
            tail in "[a-z._]{0,12}",
        ) {
            let key = format!("{}{}{}.origin{}", head, PREFIX, mid, tail);
            prop_assert!(matches(&key, PREFIX, &SUFFIXES));
        }

        #[test]
        fn test_no_prefix_no_match(key in "[a-z0-9._]{0,40}") {
            prop_assume!(!key.contains(PREFIX));
            prop_assert!(!matches(&key, PREFIX, &SUFFIXES));
        }
    }
}
