//! esl-coach - writing feedback for English learners
//!
//! Given a text and a writer profile, produces ranked suggestions (span,
//! category, severity, replacement, rationale) and a 0-100 score. Local
//! pattern rules always run; an LLM review is merged in when one is
//! configured, and the rules stand alone when it is not or when it fails.
//!
//! ```rust,ignore
//! use esl_coach::analyzer::Analyzer;
//! use esl_coach::models::{ProficiencyLevel, Profile};
//!
//! let analyzer = Analyzer::default();
//! let report = analyzer.analyze("I have 25 years old.", &Profile::new(ProficiencyLevel::Beginner))?;
//! println!("{} ({})", report.score, report.grade);
//! ```

pub mod ai;
pub mod analyzer;
pub mod config;
pub mod document;
pub mod feedback;
pub mod merge;
pub mod models;
pub mod reporters;
pub mod rules;
pub mod samples;
pub mod scoring;
pub mod text;
