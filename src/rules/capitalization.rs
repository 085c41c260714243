//! Capitalization: the pronoun "I" and sentence starts

use super::Checker;
use crate::models::{Category, Profile, Severity, Span, Suggestion, SuggestionSource};
use crate::text::{sentences, word_spans};

pub struct CapitalizationChecker;

impl CapitalizationChecker {
    /// "i", "i'm", "i've", "i'll", "i'd" written in lowercase
    fn is_lower_pronoun(word: &str) -> bool {
        if !word.starts_with('i') {
            return false;
        }
        let rest = &word[1..];
        rest.is_empty()
            || (rest.starts_with(['\'', '’'])
                && matches!(rest.trim_start_matches(['\'', '’']), "m" | "ve" | "ll" | "d"))
    }

    fn capitalize(word: &str) -> String {
        let mut chars = word.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }

    fn pronoun_suggestions(&self, text: &str, out: &mut Vec<Suggestion>) {
        for (span, word) in word_spans(text) {
            if !Self::is_lower_pronoun(word) {
                continue;
            }
            // "i.e." is not the pronoun
            if text[span.end..].starts_with('.') && word == "i" {
                continue;
            }
            out.push(Suggestion::new(
                text,
                span,
                self.id(),
                SuggestionSource::Rule,
                Category::Punctuation,
                Severity::Medium,
                Some(Self::capitalize(word)),
                "Capitalize \"I\"",
                "The pronoun \"I\" is always written with a capital letter.",
                0.95,
            ));
        }
    }

    fn sentence_start_suggestions(&self, text: &str, out: &mut Vec<Suggestion>) {
        for sentence in sentences(text) {
            let Some((span, word)) = word_spans(sentence.slice(text)).next() else {
                continue;
            };
            // The first word must open the sentence, not follow a quote or bracket
            if span.start != 0 {
                continue;
            }
            let starts_lower = word.chars().next().is_some_and(|c| c.is_lowercase());
            // Mixed-case brand names ("iPhone", "eBay") are left alone
            let mixed_case = word.chars().skip(1).any(|c| c.is_uppercase());
            if !starts_lower || mixed_case || Self::is_lower_pronoun(word) {
                continue;
            }
            let absolute = Span::new(sentence.start + span.start, sentence.start + span.end);
            out.push(Suggestion::new(
                text,
                absolute,
                self.id(),
                SuggestionSource::Rule,
                Category::Punctuation,
                Severity::Low,
                Some(Self::capitalize(word)),
                "Capitalize the first word of a sentence",
                "Every sentence starts with a capital letter.",
                0.85,
            ));
        }
    }
}

impl Checker for CapitalizationChecker {
    fn id(&self) -> &'static str {
        "capitalization"
    }

    fn description(&self) -> &'static str {
        "Finds lowercase \"i\" and sentences that start in lowercase"
    }

    fn category(&self) -> Category {
        Category::Punctuation
    }

    fn check(&self, text: &str, _profile: &Profile) -> Vec<Suggestion> {
        let mut out = Vec::new();
        self.pronoun_suggestions(text, &mut out);
        self.sentence_start_suggestions(text, &mut out);
        out.sort_by_key(|s| s.span.start);
        out
    }
}
