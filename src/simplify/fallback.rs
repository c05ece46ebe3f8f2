// src/simplify/fallback.rs
// Rule-based fallback: caps each sentence at a grade-dependent word count.
// Lower quality than inference: words past the cap are dropped.

const SENTENCE_TERMINATOR: char = '.';

#[derive(Debug, Clone, Copy, Default)]
pub struct FallbackSimplifier;

impl FallbackSimplifier {
    pub fn new() -> Self {
        Self
    }

    /// Longest sentence (in words) kept for `grade`.
    pub fn max_words(grade: u8) -> usize {
        5 + 2 * grade as usize
    }

    /// Deterministic, offline, never fails.
    ///
    /// Sentences are split on `.` only, truncated to
    /// [`max_words`](Self::max_words) words and rejoined with `". "` plus a
    /// trailing period.
    pub fn simplify(&self, text: &str, grade: u8) -> String {
        let max_words = Self::max_words(grade);

        let sentences: Vec<String> = text
            .split(SENTENCE_TERMINATOR)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|sentence| {
                let words: Vec<&str> = sentence.split_whitespace().collect();
                if words.len() > max_words {
                    words[..max_words].join(" ")
                } else {
                    sentence.to_string()
                }
            })
            .collect();

        format!("{}.", sentences.join(". "))
    }
}
