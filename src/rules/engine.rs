//! Rule engine: runs checkers and resolves overlaps

use super::{
    CapitalizationChecker, Checker, LongSentenceChecker, PatternRule, RepeatedWordChecker,
    SubjectVerbAgreementChecker, BUILTIN_RULES,
};
use crate::models::{Profile, Suggestion};
use rayon::prelude::*;
use std::cmp::Reverse;
use std::collections::HashSet;
use std::sync::{Arc, OnceLock};
use tracing::debug;

static BUILTIN_CHECKERS: OnceLock<Vec<Arc<dyn Checker>>> = OnceLock::new();

/// Every built-in checker, compiled once per process.
fn builtin_checkers() -> &'static [Arc<dyn Checker>] {
    BUILTIN_CHECKERS.get_or_init(|| {
        let mut checkers: Vec<Arc<dyn Checker>> = BUILTIN_RULES
            .iter()
            .map(|spec| {
                let rule = PatternRule::compile(*spec).expect("builtin rule pattern is valid");
                Arc::new(rule) as Arc<dyn Checker>
            })
            .collect();
        checkers.push(Arc::new(SubjectVerbAgreementChecker));
        checkers.push(Arc::new(RepeatedWordChecker));
        checkers.push(Arc::new(CapitalizationChecker));
        checkers.push(Arc::new(LongSentenceChecker));
        checkers
    })
}

/// Builder for [`RuleEngine`]
#[derive(Default)]
pub struct RuleEngineBuilder {
    checkers: Vec<Arc<dyn Checker>>,
    disabled: HashSet<String>,
}

impl RuleEngineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register all built-in checkers
    pub fn builtin(mut self) -> Self {
        self.checkers.extend(builtin_checkers().iter().cloned());
        self
    }

    /// Register a checker. Registration order breaks ties on overlap.
    pub fn checker(mut self, checker: Arc<dyn Checker>) -> Self {
        debug!("Registering checker: {}", checker.id());
        self.checkers.push(checker);
        self
    }

    pub fn disable(mut self, id: impl Into<String>) -> Self {
        self.disabled.insert(id.into());
        self
    }

    pub fn disable_all<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.disabled.extend(ids.into_iter().map(Into::into));
        self
    }

    pub fn build(self) -> RuleEngine {
        RuleEngine {
            checkers: self.checkers,
            disabled: self.disabled,
        }
    }
}

/// Runs registered checkers over a text
pub struct RuleEngine {
    checkers: Vec<Arc<dyn Checker>>,
    disabled: HashSet<String>,
}

impl RuleEngine {
    /// Engine with every built-in checker enabled
    pub fn builtin() -> Self {
        RuleEngineBuilder::new().builtin().build()
    }

    pub fn builder() -> RuleEngineBuilder {
        RuleEngineBuilder::new()
    }

    /// Registered checkers, including disabled ones
    pub fn checkers(&self) -> impl Iterator<Item = &dyn Checker> {
        self.checkers.iter().map(|c| c.as_ref())
    }

    pub fn is_enabled(&self, id: &str) -> bool {
        !self.disabled.contains(id)
    }

    /// Run all applicable checkers and return non-overlapping suggestions
    /// ordered by position.
    ///
    /// Ordering before suppression is by start offset, then longer span
    /// first, then registration order. The first suggestion covering a
    /// byte wins.
    pub fn run(&self, text: &str, profile: &Profile) -> Vec<Suggestion> {
        let active: Vec<(usize, &Arc<dyn Checker>)> = self
            .checkers
            .iter()
            .enumerate()
            .filter(|(_, c)| self.is_enabled(c.id()) && c.applies_to(profile))
            .collect();

        debug!(
            "Running {} of {} checkers ({} chars)",
            active.len(),
            self.checkers.len(),
            text.len()
        );

        let mut found: Vec<(usize, Suggestion)> = active
            .par_iter()
            .flat_map_iter(|(order, checker)| {
                checker
                    .check(text, profile)
                    .into_iter()
                    .map(move |s| (*order, s))
            })
            .collect();

        found.sort_by_key(|(order, s)| (s.span.start, Reverse(s.span.len()), *order));

        let mut accepted: Vec<Suggestion> = Vec::with_capacity(found.len());
        for (_, suggestion) in found {
            if let Some(winner) = accepted.iter().find(|a| a.span.overlaps(&suggestion.span)) {
                debug!(
                    "Suppressed {} at {}..{} (overlaps {})",
                    suggestion.rule, suggestion.span.start, suggestion.span.end, winner.rule
                );
                continue;
            }
            accepted.push(suggestion);
        }
        accepted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, ProficiencyLevel, Severity, Span, SuggestionSource};

    struct FixedChecker {
        id: &'static str,
        span: Span,
    }

    impl Checker for FixedChecker {
        fn id(&self) -> &'static str {
            self.id
        }
        fn description(&self) -> &'static str {
            "test"
        }
        fn category(&self) -> Category {
            Category::Style
        }
        fn check(&self, text: &str, _profile: &Profile) -> Vec<Suggestion> {
            vec![Suggestion::new(
                text,
                self.span,
                self.id,
                SuggestionSource::Rule,
                Category::Style,
                Severity::Low,
                Some("x".into()),
                "",
                "",
                1.0,
            )]
        }
    }

    #[test]
    fn test_builtin_engine_finds_mistakes() {
        let engine = RuleEngine::builtin();
        let text = "Yesterday i buy a apple. He go to school every days.";
        let found = engine.run(text, &Profile::default());
        let rules: Vec<&str> = found.iter().map(|s| s.rule.as_str()).collect();
        assert!(rules.contains(&"capitalization"));
        assert!(rules.contains(&"article-an-before-vowel"));
        assert!(rules.contains(&"subject-verb-agreement"));
        assert!(rules.contains(&"every-plural"));
        // ordered by position
        assert!(found.windows(2).all(|w| w[0].span.start <= w[1].span.start));
    }

    #[test]
    fn test_first_match_wins_on_overlap() {
        let engine = RuleEngine::builder()
            .checker(Arc::new(FixedChecker { id: "first", span: Span::new(0, 4) }))
            .checker(Arc::new(FixedChecker { id: "second", span: Span::new(2, 6) }))
            .checker(Arc::new(FixedChecker { id: "same-start", span: Span::new(0, 4) }))
            .checker(Arc::new(FixedChecker { id: "apart", span: Span::new(7, 9) }))
            .build();
        let found = engine.run("abcdefghij", &Profile::default());
        let ids: Vec<&str> = found.iter().map(|s| s.rule.as_str()).collect();
        assert_eq!(ids, vec!["first", "apart"]);
    }

    #[test]
    fn test_longer_span_wins_at_same_start() {
        let engine = RuleEngine::builder()
            .checker(Arc::new(FixedChecker { id: "short", span: Span::new(0, 2) }))
            .checker(Arc::new(FixedChecker { id: "long", span: Span::new(0, 5) }))
            .build();
        let found = engine.run("abcdefghij", &Profile::default());
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].rule, "long");
    }

    #[test]
    fn test_overlapping_builtin_rules_keep_one() {
        // "i am agree" is hit by both capitalization and be-agree-first-person
        let engine = RuleEngine::builtin();
        let found = engine.run("Yes, i am agree.", &Profile::default());
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].rule, "be-agree-first-person");
    }

    #[test]
    fn test_disabled_rules_do_not_run() {
        let engine = RuleEngine::builder().builtin().disable("alot").build();
        assert!(!engine.is_enabled("alot"));
        let found = engine.run("I like it alot.", &Profile::default());
        assert!(found.iter().all(|s| s.rule != "alot"));
    }

    #[test]
    fn test_level_gates_vocabulary_polish() {
        let engine = RuleEngine::builtin();
        let text = "The film was very good.";
        let beginner = engine.run(text, &Profile::new(ProficiencyLevel::Beginner));
        assert!(beginner.iter().all(|s| s.rule != "weak-intensifier"));
        let advanced = engine.run(text, &Profile::new(ProficiencyLevel::Advanced));
        assert!(advanced.iter().any(|s| s.rule == "weak-intensifier"));
    }

    #[test]
    fn test_clean_text_has_no_suggestions() {
        let engine = RuleEngine::builtin();
        let text = "My sister lives in Madrid. She works at a university and \
                    takes the train every day. On the other hand, I prefer to walk.";
        let found = engine.run(text, &Profile::default());
        assert!(found.is_empty(), "{:?}", found);
    }
}
