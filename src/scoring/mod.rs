//! Writing Quality Scoring
//!
//! Turns a ranked suggestion list into one 0-100 score. The local score is
//! deterministic so it can stand in for the model when the model is
//! unavailable; when the model did give a score the two are blended.
//!
//! # Scoring Formula
//!
//! ```text
//! Local  = clamp(100 - penalty + capped_bonus, 0, 100)
//! Final  = model_weight × Model + (1 - model_weight) × Local   (model score present)
//!        = Local                                               (otherwise)
//!
//! Where:
//!   penalty = Σ severity_weight × confidence × 100 / max(words, 20) × 2.0
//!   bonus   = up to 5 points for lexical diversity ≥ 0.5
//!   Bonus capped at 50% of penalty (variety can't mask errors)
//! ```
//!
//! # Severity Weights
//!
//! - High: 6.0
//! - Medium: 3.0
//! - Low: 1.5
//! - Info: 0.5
//!
//! # Example
//!
//! A 50-word text with one High (confidence 0.9) and one Low (1.0) suggestion:
//! - penalty = (5.4 + 1.5) × 100 / 50 × 2.0 = 27.6
//! - diversity 0.8 → bonus 3.0 (cap is 13.8)
//!
//! Local = 100 - 27.6 + 3.0 = 75.4

mod writing_scorer;

pub use writing_scorer::{ScoreBreakdown, Scorer, ScoringWeights};
