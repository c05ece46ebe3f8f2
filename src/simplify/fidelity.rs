// src/simplify/fidelity.rs
// Best-effort fidelity diagnostics. Capitalised word runs stand in for
// proper nouns, so sentence-initial words are false positives; the report
// only feeds warning logs and never changes or rejects a rewrite.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeSet;
use tracing::warn;

static NAME_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b[A-Z][a-z]+(?:\s+[A-Z][a-z]+)*\b").expect("valid name pattern")
});

/// Share of original names that may go missing before a warning.
const MISSING_NAMES_RATIO: f64 = 0.3;
/// Rewrites shorter than this share of the original are flagged.
const MIN_LENGTH_RATIO: f64 = 0.5;

pub fn extract_names(text: &str) -> BTreeSet<String> {
    NAME_PATTERN
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct FidelityReport {
    pub original_names: usize,
    pub missing_names: BTreeSet<String>,
    pub original_words: usize,
    pub simplified_words: usize,
}

impl FidelityReport {
    pub fn compare(original: &str, simplified: &str) -> Self {
        let original_caps = extract_names(original);
        let simplified_caps = extract_names(simplified);
        let missing_names = original_caps
            .difference(&simplified_caps)
            .cloned()
            .collect();

        Self {
            original_names: original_caps.len(),
            missing_names,
            original_words: original.split_whitespace().count(),
            simplified_words: simplified.split_whitespace().count(),
        }
    }

    /// More than 30% of a non-empty original name set is absent.
    pub fn names_missing(&self) -> bool {
        self.original_names > 0
            && self.missing_names.len() as f64 > self.original_names as f64 * MISSING_NAMES_RATIO
    }

    /// Rewrite has under half the original word count.
    pub fn possibly_truncated(&self) -> bool {
        (self.simplified_words as f64) < self.original_words as f64 * MIN_LENGTH_RATIO
    }

    pub fn log_warnings(&self) {
        if self.names_missing() {
            warn!(
                missing = ?self.missing_names,
                original_names = self.original_names,
                "Quality check: simplification may be missing names"
            );
        }
        if self.possibly_truncated() {
            warn!(
                simplified_words = self.simplified_words,
                original_words = self.original_words,
                missing = ?self.missing_names,
                "Output may be incomplete"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEATS: &str =
        "We lament deaths that shorten great careers, as with Mary Wollstonecraft or John Keats.";

    #[test]
    fn test_extract_names_groups_runs() {
        let names = extract_names(KEATS);
        assert!(names.contains("Mary Wollstonecraft"));
        assert!(names.contains("John Keats"));
        assert!(names.contains("We"));
        assert_eq!(names.len(), 3);
    }

    #[test]
    fn test_faithful_rewrite_passes() {
        let simplified = "We are sad when great people die young. Mary Wollstonecraft died young. \
                          John Keats died young.";
        let report = FidelityReport::compare(KEATS, simplified);
        assert!(report.missing_names.is_empty());
        assert!(!report.names_missing());
        assert!(!report.possibly_truncated());
    }

    #[test]
    fn test_dropped_names_flagged() {
        let report = FidelityReport::compare(KEATS, "We lament deaths that shorten great careers.");
        assert_eq!(report.missing_names.len(), 2);
        assert!(report.names_missing());
    }

    #[test]
    fn test_truncation_flagged() {
        let report = FidelityReport::compare(KEATS, "We are sad.");
        assert!(report.possibly_truncated());
    }

    #[test]
    fn test_no_names_never_flags_names() {
        let report = FidelityReport::compare("all lower case words here", "nothing");
        assert_eq!(report.original_names, 0);
        assert!(!report.names_missing());
    }
}
