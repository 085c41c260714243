//! Suggestion-based writing scorer
//!
//! Penalises suggestions by severity and confidence relative to text
//! length, rewards lexical variety, and blends in the model's own score.

use crate::models::{AnalysisReport, Severity, Suggestion};
use crate::text::TextStats;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Word count below which a text is scored as if it had this many words
const MIN_SCORED_WORDS: usize = 20;

/// Tunable weights for [`Scorer`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringWeights {
    pub high: f64,
    pub medium: f64,
    pub low: f64,
    pub info: f64,
    /// Multiplier applied to the per-100-words penalty
    pub density_scale: f64,
    /// Lexical diversity at which the variety bonus starts
    pub diversity_threshold: f64,
    pub max_diversity_bonus: f64,
    /// Share of the final score taken from the model (0.0-1.0)
    pub model_weight: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            high: 6.0,
            medium: 3.0,
            low: 1.5,
            info: 0.5,
            density_scale: 2.0,
            diversity_threshold: 0.5,
            max_diversity_bonus: 5.0,
            model_weight: 0.6,
        }
    }
}

impl ScoringWeights {
    pub fn severity_weight(&self, severity: Severity) -> f64 {
        match severity {
            Severity::High => self.high,
            Severity::Medium => self.medium,
            Severity::Low => self.low,
            Severity::Info => self.info,
        }
    }
}

/// Complete score breakdown for transparency
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    /// Deterministic score from suggestions and stats (0-100)
    pub local_score: f64,
    /// Model's own score, when the model answered with one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_score: Option<f64>,
    /// Points removed for suggestions
    pub penalty: f64,
    /// Points added for lexical variety, after the cap
    pub bonus: f64,
    /// Weight the model score carried in `final_score`
    pub model_weight: f64,
    pub final_score: u8,
}

/// Scores a text from its suggestions
#[derive(Debug, Clone, Default)]
pub struct Scorer {
    weights: ScoringWeights,
}

impl Scorer {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    pub fn with_model_weight(mut self, weight: f64) -> Self {
        self.weights.model_weight = weight.clamp(0.0, 1.0);
        self
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    /// Unnormalised penalty for one suggestion
    pub fn suggestion_penalty(&self, suggestion: &Suggestion) -> f64 {
        self.weights.severity_weight(suggestion.severity) * suggestion.confidence
    }

    fn diversity_bonus(&self, stats: &TextStats) -> f64 {
        let w = &self.weights;
        if stats.words == 0 || stats.lexical_diversity < w.diversity_threshold {
            return 0.0;
        }
        let span = (1.0 - w.diversity_threshold).max(f64::EPSILON);
        let ratio = ((stats.lexical_diversity - w.diversity_threshold) / span).min(1.0);
        w.max_diversity_bonus * ratio
    }

    /// Calculate the score with breakdown
    pub fn calculate(
        &self,
        suggestions: &[Suggestion],
        stats: &TextStats,
        model_score: Option<f64>,
    ) -> ScoreBreakdown {
        let raw: f64 = suggestions.iter().map(|s| self.suggestion_penalty(s)).sum();
        let denominator = stats.words.max(MIN_SCORED_WORDS) as f64;
        let penalty = raw * 100.0 / denominator * self.weights.density_scale;

        // Bonus capped at 50% of penalty
        let bonus = self.diversity_bonus(stats).min(penalty * 0.5);
        let local_score = (100.0 - penalty + bonus).clamp(0.0, 100.0);

        let model_score = model_score.map(|s| s.clamp(0.0, 100.0));
        let (blended, model_weight) = match model_score {
            Some(m) => {
                let w = self.weights.model_weight;
                (w * m + (1.0 - w) * local_score, w)
            }
            None => (local_score, 0.0),
        };
        let final_score = blended.round().clamp(0.0, 100.0) as u8;

        debug!(
            "Score: penalty={:.1} bonus={:.1} local={:.1} model={:?} final={}",
            penalty, bonus, local_score, model_score, final_score
        );

        ScoreBreakdown {
            local_score,
            model_score,
            penalty,
            bonus,
            model_weight,
            final_score,
        }
    }

    /// Generate human-readable explanation of the score
    pub fn explain(&self, breakdown: &ScoreBreakdown) -> String {
        let mut lines = Vec::new();
        lines.push(format!(
            "Score: {} ({})",
            breakdown.final_score,
            AnalysisReport::grade_from_score(breakdown.final_score as f64)
        ));
        lines.push(format!(
            "  Local: 100 - {:.1} penalty + {:.1} variety bonus = {:.1}",
            breakdown.penalty, breakdown.bonus, breakdown.local_score
        ));
        match breakdown.model_score {
            Some(model) => lines.push(format!(
                "  Model: {:.1} (weight {:.0}%)",
                model,
                breakdown.model_weight * 100.0
            )),
            None => lines.push("  Model: not used".to_string()),
        }
        lines.join("\n")
    }
}
