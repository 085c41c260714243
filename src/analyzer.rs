//! The analysis pipeline
//!
//! ```text
//! text + profile
//!   ├─ (a) RuleEngine::run          local pattern checks
//!   ├─ (b) ModelReviewer::review    one model call, optional
//!   └─ (c) merge → filter → rank → score → feedback
//! ```
//!
//! A failed model call never fails the analysis: the report falls back to
//! the rule suggestions and the deterministic local score.

use crate::ai::{LanguageModel, ModelOutcome, ModelReviewer};
use crate::feedback::build_feedback;
use crate::merge::{merge, rank};
use crate::models::{AnalysisReport, AnalysisSource, Profile, Severity, SuggestionsSummary};
use crate::rules::RuleEngine;
use crate::scoring::Scorer;
use crate::text::TextStats;
use std::sync::Mutex;
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that reject an analysis request
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalyzeError {
    #[error("Nothing to analyze: the text is empty")]
    EmptyInput,

    #[error("Text is too long: {len} characters (limit {max})")]
    InputTooLong { len: usize, max: usize },
}

/// Knobs for [`Analyzer`]
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyzerOptions {
    /// Most suggestions kept in a report
    pub max_suggestions: usize,
    /// Suggestions below this severity are dropped
    pub min_severity: Severity,
    pub max_input_chars: usize,
    /// Share of the final score taken from the model
    pub model_weight: f64,
}

impl Default for AnalyzerOptions {
    fn default() -> Self {
        Self {
            max_suggestions: 50,
            min_severity: Severity::Info,
            max_input_chars: 20_000,
            model_weight: 0.6,
        }
    }
}

struct LastAnalysis {
    text: String,
    profile: Profile,
    report: AnalysisReport,
}

/// Runs the rule engine, the optional model and the merge/scoring pass
pub struct Analyzer {
    engine: RuleEngine,
    reviewer: Option<ModelReviewer>,
    options: AnalyzerOptions,
    scorer: Scorer,
    last: Mutex<Option<LastAnalysis>>,
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new(RuleEngine::builtin())
    }
}

impl Analyzer {
    pub fn new(engine: RuleEngine) -> Self {
        let options = AnalyzerOptions::default();
        Self {
            engine,
            reviewer: None,
            scorer: Scorer::default().with_model_weight(options.model_weight),
            options,
            last: Mutex::new(None),
        }
    }

    pub fn with_model(mut self, model: Box<dyn LanguageModel>) -> Self {
        self.reviewer = Some(ModelReviewer::new(model));
        self
    }

    pub fn with_reviewer(mut self, reviewer: ModelReviewer) -> Self {
        self.reviewer = Some(reviewer);
        self
    }

    pub fn with_options(mut self, options: AnalyzerOptions) -> Self {
        self.scorer = Scorer::default().with_model_weight(options.model_weight);
        self.options = options;
        self
    }

    pub fn options(&self) -> &AnalyzerOptions {
        &self.options
    }

    pub fn has_model(&self) -> bool {
        self.reviewer.is_some()
    }

    pub fn engine(&self) -> &RuleEngine {
        &self.engine
    }

    /// The most recent report, if any
    pub fn last_report(&self) -> Option<AnalysisReport> {
        let guard = self.last.lock().unwrap_or_else(|e| e.into_inner());
        guard.as_ref().map(|l| l.report.clone())
    }

    pub fn clear_cache(&self) {
        *self.last.lock().unwrap_or_else(|e| e.into_inner()) = None;
    }

    fn validate(&self, text: &str) -> Result<(), AnalyzeError> {
        if text.trim().is_empty() {
            return Err(AnalyzeError::EmptyInput);
        }
        let len = text.chars().count();
        if len > self.options.max_input_chars {
            return Err(AnalyzeError::InputTooLong {
                len,
                max: self.options.max_input_chars,
            });
        }
        Ok(())
    }

    fn cached(&self, text: &str, profile: &Profile) -> Option<AnalysisReport> {
        let guard = self.last.lock().unwrap_or_else(|e| e.into_inner());
        guard
            .as_ref()
            .filter(|l| l.text == text && &l.profile == profile)
            .map(|l| l.report.clone())
    }

    fn consult_model(&self, text: &str, profile: &Profile) -> (AnalysisSource, ModelOutcome) {
        let Some(reviewer) = &self.reviewer else {
            return (AnalysisSource::RulesOnly, ModelOutcome::default());
        };
        match reviewer.review(text, profile) {
            Ok(outcome) => (AnalysisSource::Model, outcome),
            Err(e) => {
                warn!("Model review via {} failed, using local rules: {}", reviewer.name(), e);
                (AnalysisSource::Fallback, ModelOutcome::default())
            }
        }
    }

    /// Analyze `text` for a writer with `profile`.
    ///
    /// Repeating the previous request returns the cached report without
    /// running the rules or calling the model again.
    pub fn analyze(&self, text: &str, profile: &Profile) -> Result<AnalysisReport, AnalyzeError> {
        self.validate(text)?;

        if let Some(report) = self.cached(text, profile) {
            debug!("Returning cached analysis");
            return Ok(report);
        }

        let started = Instant::now();
        let rule_suggestions = self.engine.run(text, profile);
        debug!("Rules produced {} suggestion(s)", rule_suggestions.len());

        let (source, outcome) = self.consult_model(text, profile);

        let mut merged = merge(outcome.suggestions, rule_suggestions);
        rank(&mut merged, profile);

        // Score, summary and feedback describe the whole text; display
        // options only trim the list shown to the writer.
        let stats = TextStats::compute(text);
        let model_score = match source {
            AnalysisSource::Model => outcome.score,
            _ => None,
        };
        let breakdown = self.scorer.calculate(&merged, &stats, model_score);
        let summary = SuggestionsSummary::from_suggestions(&merged);
        let feedback = build_feedback(
            breakdown.final_score,
            &merged,
            &summary,
            &stats,
            profile,
            outcome.summary,
        );

        let suggestions: Vec<_> = merged
            .into_iter()
            .filter(|s| s.severity >= self.options.min_severity)
            .take(self.options.max_suggestions)
            .collect();

        let report = AnalysisReport {
            score: breakdown.final_score,
            grade: AnalysisReport::grade_from_score(breakdown.final_score as f64),
            breakdown,
            source,
            profile: profile.clone(),
            suggestions,
            summary,
            feedback,
            stats,
            analyzed_at: chrono::Utc::now(),
        };

        info!(
            "Analyzed {} words in {:?}: score {} ({}), {} suggestion(s), source {}",
            report.stats.words,
            started.elapsed(),
            report.score,
            report.grade,
            report.suggestions.len(),
            report.source
        );

        *self.last.lock().unwrap_or_else(|e| e.into_inner()) = Some(LastAnalysis {
            text: text.to_string(),
            profile: profile.clone(),
            report: report.clone(),
        });

        Ok(report)
    }
}
