//! Regex-backed rules

use super::Checker;
use crate::models::{Category, ProficiencyLevel, Profile, Severity, Span, Suggestion, SuggestionSource};
use regex::{Captures, Regex};

/// How a rule builds its replacement
#[derive(Clone, Copy)]
pub enum Fix {
    /// Capture-group template, expanded with [`Captures::expand`]
    Template(&'static str),
    /// Computed replacement; `None` vetoes the match
    Compute(fn(&Captures<'_>) -> Option<String>),
}

impl std::fmt::Debug for Fix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Fix::Template(t) => write!(f, "Template({:?})", t),
            Fix::Compute(_) => write!(f, "Compute(..)"),
        }
    }
}

/// Static description of a pattern rule
#[derive(Debug, Clone, Copy)]
pub struct RuleSpec {
    pub id: &'static str,
    pub category: Category,
    pub severity: Severity,
    pub pattern: &'static str,
    pub fix: Fix,
    pub message: &'static str,
    pub explanation: &'static str,
    pub confidence: f64,
    pub min_level: ProficiencyLevel,
}

impl RuleSpec {
    pub const fn new(
        id: &'static str,
        category: Category,
        severity: Severity,
        pattern: &'static str,
        fix: Fix,
        message: &'static str,
        explanation: &'static str,
    ) -> Self {
        Self {
            id,
            category,
            severity,
            pattern,
            fix,
            message,
            explanation,
            confidence: 0.9,
            min_level: ProficiencyLevel::Beginner,
        }
    }

    pub const fn confidence(mut self, confidence: f64) -> Self {
        self.confidence = confidence;
        self
    }

    pub const fn min_level(mut self, level: ProficiencyLevel) -> Self {
        self.min_level = level;
        self
    }
}

/// A compiled [`RuleSpec`]
#[derive(Debug, Clone)]
pub struct PatternRule {
    spec: RuleSpec,
    regex: Regex,
}

impl PatternRule {
    pub fn compile(spec: RuleSpec) -> Result<Self, regex::Error> {
        Ok(Self {
            regex: Regex::new(spec.pattern)?,
            spec,
        })
    }

    pub fn spec(&self) -> &RuleSpec {
        &self.spec
    }

    fn replacement(&self, caps: &Captures<'_>) -> Option<String> {
        match self.spec.fix {
            Fix::Template(template) => {
                let mut out = String::new();
                caps.expand(template, &mut out);
                Some(out)
            }
            Fix::Compute(f) => f(caps),
        }
    }
}

impl Checker for PatternRule {
    fn id(&self) -> &'static str {
        self.spec.id
    }

    fn description(&self) -> &'static str {
        self.spec.message
    }

    fn category(&self) -> Category {
        self.spec.category
    }

    fn min_level(&self) -> ProficiencyLevel {
        self.spec.min_level
    }

    fn check(&self, text: &str, _profile: &Profile) -> Vec<Suggestion> {
        let mut out = Vec::new();
        for caps in self.regex.captures_iter(text) {
            let Some(m) = caps.get(0) else { continue };
            let Some(replacement) = self.replacement(&caps) else {
                continue;
            };
            let replacement = match_case(m.as_str(), &replacement);
            if replacement == m.as_str() {
                continue;
            }
            out.push(Suggestion::new(
                text,
                Span::new(m.start(), m.end()),
                self.spec.id,
                SuggestionSource::Rule,
                self.spec.category,
                self.spec.severity,
                Some(replacement),
                self.spec.message,
                self.spec.explanation,
                self.spec.confidence,
            ));
        }
        out
    }
}

/// Carry the leading capital of `original` over to `replacement`.
pub fn match_case(original: &str, replacement: &str) -> String {
    let starts_upper = original.chars().next().is_some_and(|c| c.is_uppercase());
    let mut chars = replacement.chars();
    match chars.next() {
        Some(first) if starts_upper && first.is_lowercase() => {
            first.to_uppercase().chain(chars).collect()
        }
        _ => replacement.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_case() {
        assert_eq!(match_case("A apple", "an apple"), "An apple");
        assert_eq!(match_case("a apple", "an apple"), "an apple");
        assert_eq!(match_case("Their is", "there is"), "There is");
        assert_eq!(match_case("x", ""), "");
    }

    #[test]
    fn test_template_rule() {
        let rule = PatternRule::compile(RuleSpec::new(
            "test-of",
            Category::Grammar,
            Severity::High,
            r"(?i)\b(could)\s+of\b",
            Fix::Template("$1 have"),
            "Use \"have\"",
            "",
        ))
        .unwrap();
        let text = "I could of won. Could of been worse.";
        let found = rule.check(text, &Profile::default());
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].replacement.as_deref(), Some("could have"));
        assert_eq!(found[1].replacement.as_deref(), Some("Could have"));
        assert_eq!(found[1].original, "Could of");
    }

    #[test]
    fn test_compute_rule_can_veto() {
        fn only_cats(caps: &Captures<'_>) -> Option<String> {
            (&caps[1] == "cats").then(|| "dogs".to_string())
        }
        let rule = PatternRule::compile(RuleSpec::new(
            "test-veto",
            Category::Vocabulary,
            Severity::Low,
            r"\b(cats|cows)\b",
            Fix::Compute(only_cats),
            "",
            "",
        ))
        .unwrap();
        let found = rule.check("cats and cows", &Profile::default());
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].original, "cats");
    }

    #[test]
    fn test_invalid_pattern_is_error() {
        let spec = RuleSpec::new("bad", Category::Style, Severity::Low, "(", Fix::Template(""), "", "");
        assert!(PatternRule::compile(spec).is_err());
    }
}
