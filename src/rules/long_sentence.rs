//! Long sentence detector (advisory, no replacement)

use super::Checker;
use crate::models::{Category, ProficiencyLevel, Profile, Severity, Suggestion, SuggestionSource};
use crate::text::{sentences, word_count};

pub struct LongSentenceChecker;

impl LongSentenceChecker {
    /// Word count above which a sentence is flagged, by level
    pub fn threshold(level: ProficiencyLevel) -> usize {
        match level {
            ProficiencyLevel::Beginner => 25,
            ProficiencyLevel::Intermediate => 32,
            ProficiencyLevel::Advanced => 40,
        }
    }
}

impl Checker for LongSentenceChecker {
    fn id(&self) -> &'static str {
        "long-sentence"
    }

    fn description(&self) -> &'static str {
        "Flags sentences that are hard to follow because of their length"
    }

    fn category(&self) -> Category {
        Category::Clarity
    }

    fn check(&self, text: &str, profile: &Profile) -> Vec<Suggestion> {
        let limit = Self::threshold(profile.level);
        sentences(text)
            .into_iter()
            .filter_map(|span| {
                let words = word_count(span.slice(text));
                (words > limit).then(|| {
                    Suggestion::new(
                        text,
                        span,
                        self.id(),
                        SuggestionSource::Rule,
                        Category::Clarity,
                        Severity::Low,
                        None,
                        format!("Long sentence ({} words)", words),
                        format!(
                            "Sentences over {} words are hard to follow. Try splitting this one into two.",
                            limit
                        ),
                        0.7,
                    )
                })
            })
            .collect()
    }
}
