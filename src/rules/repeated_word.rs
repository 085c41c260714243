//! Repeated word detector ("the the")

use super::Checker;
use crate::models::{Category, Profile, Severity, Span, Suggestion, SuggestionSource};
use crate::text::word_spans;

/// Doubles that are legitimate English ("I had had enough", "that that")
const ALLOWED_DOUBLES: &[&str] = &["had", "that", "is", "do", "very", "bye", "ha", "no"];

pub struct RepeatedWordChecker;

impl Checker for RepeatedWordChecker {
    fn id(&self) -> &'static str {
        "repeated-word"
    }

    fn description(&self) -> &'static str {
        "Finds the same word typed twice in a row"
    }

    fn category(&self) -> Category {
        Category::Spelling
    }

    fn check(&self, text: &str, _profile: &Profile) -> Vec<Suggestion> {
        let mut out = Vec::new();
        let mut prev: Option<(Span, &str)> = None;

        for (span, word) in word_spans(text) {
            if let Some((prev_span, prev_word)) = prev {
                let between = &text[prev_span.end..span.start];
                let only_space = between.chars().all(|c| c == ' ' || c == '\t');
                let lower = word.to_lowercase();
                if only_space
                    && lower == prev_word.to_lowercase()
                    && !ALLOWED_DOUBLES.contains(&lower.as_str())
                {
                    out.push(Suggestion::new(
                        text,
                        Span::new(prev_span.start, span.end),
                        self.id(),
                        SuggestionSource::Rule,
                        Category::Spelling,
                        Severity::Medium,
                        Some(prev_word.to_string()),
                        "Repeated word",
                        format!("\"{}\" appears twice in a row.", prev_word),
                        0.95,
                    ));
                    // "the the the" reports once
                    prev = None;
                    continue;
                }
            }
            prev = Some((span, word));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finds_repeated_word() {
        let text = "I went to the the shop.";
        let found = RepeatedWordChecker.check(text, &Profile::default());
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].original, "the the");
        assert_eq!(found[0].replacement.as_deref(), Some("the"));
    }

    #[test]
    fn test_case_insensitive_keeps_first() {
        let found = RepeatedWordChecker.check("The the end", &Profile::default());
        assert_eq!(found[0].replacement.as_deref(), Some("The"));
    }

    #[test]
    fn test_ignores_punctuated_and_allowed() {
        let p = Profile::default();
        assert!(RepeatedWordChecker.check("I know. Know what?", &p).is_empty());
        assert!(RepeatedWordChecker.check("He said that that was fine.", &p).is_empty());
        assert!(RepeatedWordChecker.check("It ended,\nended badly", &p).is_empty());
    }

    #[test]
    fn test_triple_reports_once() {
        let found = RepeatedWordChecker.check("go go go", &Profile::default());
        assert_eq!(found.len(), 1);
    }
}
