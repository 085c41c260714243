//! End-to-end tests for the analysis pipeline
//!
//! Runs the full rules → model → merge → score pipeline through the public
//! API, with scripted language models standing in for a real backend.

use esl_coach::ai::{AiError, AiResult, LanguageModel, Message};
use esl_coach::analyzer::{AnalyzeError, Analyzer, AnalyzerOptions};
use esl_coach::document::Document;
use esl_coach::models::{
    AnalysisSource, Category, ProficiencyLevel, Profile, Severity, SuggestionSource,
};
use esl_coach::rules::RuleEngine;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

const ESSAY: &str = "Yesterday I goed to the market with my sister. \
                     I have 25 years old and she is more older than me. \
                     We bought a apple and some informations about the town.";

/// Replies with a fixed string and counts calls
struct ScriptedModel {
    reply: Result<String, String>,
    calls: Arc<AtomicUsize>,
}

impl ScriptedModel {
    fn replying(reply: &str) -> (Self, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        (
            Self {
                reply: Ok(reply.to_string()),
                calls: Arc::clone(&calls),
            },
            calls,
        )
    }

    fn failing(message: &str) -> (Self, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        (
            Self {
                reply: Err(message.to_string()),
                calls: Arc::clone(&calls),
            },
            calls,
        )
    }
}

impl LanguageModel for ScriptedModel {
    fn name(&self) -> String {
        "scripted/test".to_string()
    }

    fn generate(&self, messages: Vec<Message>, _system: Option<&str>) -> AiResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        assert_eq!(messages.len(), 1);
        match &self.reply {
            Ok(reply) => Ok(reply.clone()),
            Err(message) => Err(AiError::RequestFailed(message.clone())),
        }
    }
}

const MODEL_REPLY: &str = r#"Here is the review.
```json
{
  "score": 58,
  "summary": "A clear story with some verb form mistakes.",
  "suggestions": [
    {"original": "goed", "replacement": "went", "category": "grammar", "severity": "high",
     "explanation": "\"Go\" is irregular: go, went, gone.", "confidence": 0.95},
    {"original": "a apple", "replacement": "an apple", "category": "grammar", "severity": "medium",
     "explanation": "Use \"an\" before a vowel sound.", "confidence": 0.9},
    {"original": "the supermarket", "replacement": "the shop", "category": "vocabulary"}
  ]
}
```"#;

#[test]
fn test_model_and_rules_are_merged() {
    let (model, calls) = ScriptedModel::replying(MODEL_REPLY);
    let analyzer = Analyzer::default().with_model(Box::new(model));
    let profile = Profile::new(ProficiencyLevel::Intermediate).with_native_language("Japanese");

    let report = analyzer.analyze(ESSAY, &profile).unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(report.source, AnalysisSource::Model);
    assert_eq!(report.breakdown.model_score, Some(58.0));

    // The model's "goed" was located; "the supermarket" was not in the text
    let goed = report
        .suggestions
        .iter()
        .find(|s| s.original == "goed")
        .expect("model suggestion for goed");
    assert_eq!(goed.source, SuggestionSource::Model);
    assert_eq!(goed.replacement.as_deref(), Some("went"));
    assert!(!report.suggestions.iter().any(|s| s.original == "the supermarket"));

    // "a apple" reported by both: the model's copy wins, no duplicate
    let apples: Vec<_> = report
        .suggestions
        .iter()
        .filter(|s| s.original.eq_ignore_ascii_case("a apple"))
        .collect();
    assert_eq!(apples.len(), 1);
    assert_eq!(apples[0].source, SuggestionSource::Model);

    // Rules still contribute what the model missed
    assert!(report
        .suggestions
        .iter()
        .any(|s| s.source == SuggestionSource::Rule && s.original.contains("informations")));
    assert!(report
        .suggestions
        .iter()
        .any(|s| s.source == SuggestionSource::Rule && s.original.contains("25 years old")));

    // No two suggestions overlap
    for (i, a) in report.suggestions.iter().enumerate() {
        for b in &report.suggestions[i + 1..] {
            assert!(!a.span.overlaps(&b.span), "{:?} overlaps {:?}", a.original, b.original);
        }
    }

    assert_eq!(
        report.feedback.model_summary.as_deref(),
        Some("A clear story with some verb form mistakes.")
    );
    assert!(report
        .feedback
        .improvements
        .iter()
        .any(|tip| tip.starts_with("Japanese has no articles")));
}

#[test]
fn test_suggestions_are_ranked() {
    let (model, _) = ScriptedModel::replying(MODEL_REPLY);
    let analyzer = Analyzer::default().with_model(Box::new(model));
    let report = analyzer.analyze(ESSAY, &Profile::default()).unwrap();

    for pair in report.suggestions.windows(2) {
        assert!(pair[0].severity >= pair[1].severity, "not ranked by severity");
    }
    assert_eq!(report.suggestions[0].severity, Severity::High);
}

#[test]
fn test_model_failure_falls_back_to_rules() {
    let (model, calls) = ScriptedModel::failing("connection refused");
    let analyzer = Analyzer::default().with_model(Box::new(model));

    let report = analyzer.analyze(ESSAY, &Profile::default()).unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(report.source, AnalysisSource::Fallback);
    assert_eq!(report.breakdown.model_score, None);
    assert!(report.feedback.model_summary.is_none());
    assert!(!report.suggestions.is_empty());
    assert!(report
        .suggestions
        .iter()
        .all(|s| s.source == SuggestionSource::Rule));

    // Same suggestions and score as a rules-only run
    let local = Analyzer::default().analyze(ESSAY, &Profile::default()).unwrap();
    assert_eq!(local.source, AnalysisSource::RulesOnly);
    assert_eq!(local.score, report.score);
    assert_eq!(local.suggestions.len(), report.suggestions.len());
}

#[test]
fn test_unparseable_reply_falls_back() {
    let (model, _) = ScriptedModel::replying("Sorry, I can't help with that.");
    let analyzer = Analyzer::default().with_model(Box::new(model));
    let report = analyzer.analyze(ESSAY, &Profile::default()).unwrap();
    assert_eq!(report.source, AnalysisSource::Fallback);
}

#[test]
fn test_last_request_is_cached() {
    let (model, calls) = ScriptedModel::replying(MODEL_REPLY);
    let analyzer = Analyzer::default().with_model(Box::new(model));
    let profile = Profile::default();

    let first = analyzer.analyze(ESSAY, &profile).unwrap();
    let second = analyzer.analyze(ESSAY, &profile).unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(first.score, second.score);

    // A different text is a new request; going back is a new request too
    analyzer.analyze("I like it alot.", &profile).unwrap();
    analyzer.analyze(ESSAY, &profile).unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 3);
}

#[test]
fn test_rejected_inputs_do_not_call_model() {
    let (model, calls) = ScriptedModel::replying(MODEL_REPLY);
    let analyzer = Analyzer::default()
        .with_model(Box::new(model))
        .with_options(AnalyzerOptions {
            max_input_chars: 100,
            ..Default::default()
        });

    assert_eq!(
        analyzer.analyze("", &Profile::default()).unwrap_err(),
        AnalyzeError::EmptyInput
    );
    assert!(matches!(
        analyzer.analyze(ESSAY, &Profile::default()),
        Err(AnalyzeError::InputTooLong { .. })
    ));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn test_focus_ranks_category_first_within_severity() {
    let text = "I like it alot. She is married with a doctor.";
    let focus = Profile::default().with_focus(vec![Category::Vocabulary]);
    let report = Analyzer::default().analyze(text, &focus).unwrap();

    let first_medium = report
        .suggestions
        .iter()
        .find(|s| s.severity == Severity::Medium)
        .unwrap();
    assert_eq!(first_medium.category, Category::Vocabulary);
}

#[test]
fn test_disabled_rules_do_not_fire() {
    let engine = RuleEngine::builder().builtin().disable("alot").build();
    let report = Analyzer::new(engine)
        .analyze("I like it alot.", &Profile::default())
        .unwrap();
    assert!(report.suggestions.iter().all(|s| s.rule != "alot"));
}

#[test]
fn test_clean_text_scores_high() {
    let text = "My sister and I went to the market yesterday. We bought fresh bread, \
                two apples and some cheese. Afterwards we walked home through the park.";
    let report = Analyzer::default().analyze(text, &Profile::default()).unwrap();
    assert!(report.suggestions.is_empty(), "{:?}", report.suggestions);
    assert_eq!(report.score, 100);
    assert_eq!(report.grade, "A");
}

#[test]
fn test_document_accepts_report_suggestions() {
    let mut doc = Document::new("Market", ESSAY);
    let report = Analyzer::default().analyze(&doc.content, &Profile::default()).unwrap();
    let applied = doc.apply(&report.suggestions);
    assert!(applied >= 3);
    assert!(doc.content.contains("an apple"));
    assert!(doc.content.contains("information about"));

    let again = Analyzer::default().analyze(&doc.content, &Profile::default()).unwrap();
    assert!(again.score > report.score);
}
