//! Third-person singular agreement ("he go" -> "he goes")
//!
//! A regex cannot say "not preceded by does/can/let", which is what keeps
//! "does he go" and "let it go" quiet, so this works on word tokens.

use super::Checker;
use crate::models::{Category, Profile, Severity, Span, Suggestion, SuggestionSource};
use crate::text::word_spans;

const SUBJECTS: &[&str] = &["he", "she", "it"];

/// Base forms common enough in learner writing to be worth checking
const BASE_VERBS: &[&str] = &[
    "go", "do", "have", "want", "like", "need", "make", "say", "think", "know", "live", "work",
    "play", "study", "watch", "come", "eat", "speak", "write", "love", "try", "teach", "finish",
    "take", "get", "see", "look", "feel", "seem", "mean",
];

/// Words after which a bare verb is correct ("does he go", "let it go")
const LICENSING: &[&str] = &[
    "do", "does", "did", "don't", "doesn't", "didn't", "can", "could", "will", "would", "shall",
    "should", "may", "might", "must", "to", "let", "make", "makes", "made", "help", "helps",
    "helped", "see", "saw", "watch", "watched", "hear", "heard", "have", "had", "if", "why",
    "won't", "can't", "couldn't", "wouldn't", "shouldn't",
];

pub struct SubjectVerbAgreementChecker;

/// "go" -> "goes", "study" -> "studies", "have" -> "has"
pub(crate) fn third_person(verb: &str) -> String {
    match verb {
        "have" => return "has".to_string(),
        "do" => return "does".to_string(),
        "go" => return "goes".to_string(),
        _ => {}
    }
    let bytes = verb.as_bytes();
    if let [.., before, b'y'] = bytes {
        if !b"aeiou".contains(before) {
            return format!("{}ies", &verb[..verb.len() - 1]);
        }
    }
    if ["s", "sh", "ch", "x", "z", "o"].iter().any(|end| verb.ends_with(end)) {
        return format!("{}es", verb);
    }
    format!("{}s", verb)
}

impl Checker for SubjectVerbAgreementChecker {
    fn id(&self) -> &'static str {
        "subject-verb-agreement"
    }

    fn description(&self) -> &'static str {
        "Finds he/she/it followed by a verb without -s"
    }

    fn category(&self) -> Category {
        Category::Grammar
    }

    fn check(&self, text: &str, _profile: &Profile) -> Vec<Suggestion> {
        let tokens: Vec<(Span, &str)> = word_spans(text).collect();
        let mut out = Vec::new();

        for i in 0..tokens.len().saturating_sub(1) {
            let (subject_span, subject) = tokens[i];
            let (verb_span, verb) = tokens[i + 1];

            let subject_lower = subject.to_lowercase();
            let verb_lower = verb.to_lowercase();
            if !SUBJECTS.contains(&subject_lower.as_str()) || !BASE_VERBS.contains(&verb_lower.as_str()) {
                continue;
            }
            if !text[subject_span.end..verb_span.start].chars().all(char::is_whitespace) {
                continue;
            }
            if i > 0 {
                let (prev_span, prev) = tokens[i - 1];
                let joined = text[prev_span.end..subject_span.start].chars().all(char::is_whitespace);
                let prev_lower = prev.to_lowercase().replace('’', "'");
                if joined && LICENSING.contains(&prev_lower.as_str()) {
                    continue;
                }
            }

            let span = Span::new(subject_span.start, verb_span.end);
            let replacement = format!("{} {}", subject, third_person(&verb_lower));
            out.push(Suggestion::new(
                text,
                span,
                self.id(),
                SuggestionSource::Rule,
                Category::Grammar,
                Severity::High,
                Some(replacement),
                "Add -s for he/she/it",
                "In the present simple, verbs after he, she or it end in -s: \"she works\", \"he goes\".",
                0.8,
            ));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn replacements(text: &str) -> Vec<String> {
        SubjectVerbAgreementChecker
            .check(text, &Profile::default())
            .into_iter()
            .filter_map(|s| s.replacement)
            .collect()
    }

    #[test]
    fn test_third_person_forms() {
        assert_eq!(third_person("go"), "goes");
        assert_eq!(third_person("study"), "studies");
        assert_eq!(third_person("play"), "plays");
        assert_eq!(third_person("watch"), "watches");
        assert_eq!(third_person("finish"), "finishes");
        assert_eq!(third_person("have"), "has");
        assert_eq!(third_person("work"), "works");
    }

    #[test]
    fn test_flags_missing_s() {
        assert_eq!(replacements("Every day she go to school."), vec!["she goes"]);
        assert_eq!(replacements("He study English."), vec!["He studies"]);
    }

    #[test]
    fn test_licensed_bare_verbs_are_quiet() {
        assert!(replacements("Does he go there?").is_empty());
        assert!(replacements("Let it go.").is_empty());
        assert!(replacements("I saw her go and made it work.").is_empty());
        assert!(replacements("She can't make it.").is_empty());
        assert!(replacements("He goes home.").is_empty());
    }

    #[test]
    fn test_punctuation_between_blocks() {
        assert!(replacements("I saw it, go away.").is_empty());
    }
}
