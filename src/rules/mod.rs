//! Local rule engine
//!
//! Scans text for common learner mistakes without any network access. This
//! is the first pass of the analysis pipeline and the whole of it when no
//! language model is available.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       RuleEngine                            │
//! │  - Registers checkers                                       │
//! │  - Skips disabled ones and ones above the writer's level    │
//! │  - Runs checkers in parallel (rayon)                        │
//! │  - Orders results, first match wins on overlap              │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      Checker Trait                          │
//! │  - id(): Unique identifier                                  │
//! │  - check(text, profile): Return suggestions                 │
//! └─────────────────────────────────────────────────────────────┘
//!              ┌───────────────┴───────────────┐
//!              ▼                               ▼
//! ┌──────────────────────────┐   ┌──────────────────────────────┐
//! │ PatternRule              │   │ Token checkers               │
//! │ (builtin regex table)    │   │ (repeated words, agreement,  │
//! │                          │   │  capitalization, length)     │
//! └──────────────────────────┘   └──────────────────────────────┘
//! ```
//!
//! The `regex` crate has no backreferences or lookaround, so checks that
//! need "same word twice" or "not preceded by" work on word tokens instead.

mod agreement;
mod builtin;
mod capitalization;
mod engine;
mod long_sentence;
mod pattern;
mod repeated_word;

pub use agreement::SubjectVerbAgreementChecker;
pub use builtin::BUILTIN_RULES;
pub use capitalization::CapitalizationChecker;
pub use engine::{RuleEngine, RuleEngineBuilder};
pub use long_sentence::LongSentenceChecker;
pub use pattern::{match_case, Fix, PatternRule, RuleSpec};
pub use repeated_word::RepeatedWordChecker;

use crate::models::{Category, ProficiencyLevel, Profile, Suggestion};

/// Trait for all local checkers
///
/// # Example Implementation
///
/// ```ignore
/// pub struct MyChecker;
///
/// impl Checker for MyChecker {
///     fn id(&self) -> &'static str { "my-checker" }
///     fn description(&self) -> &'static str { "Finds my specific mistake" }
///     fn category(&self) -> Category { Category::Grammar }
///     fn check(&self, text: &str, profile: &Profile) -> Vec<Suggestion> { vec![] }
/// }
/// ```
pub trait Checker: Send + Sync {
    /// Unique identifier, used in config to disable the checker
    fn id(&self) -> &'static str;

    /// Human-readable description of what this checker finds
    fn description(&self) -> &'static str;

    fn category(&self) -> Category;

    /// Lowest proficiency level this checker is shown to.
    ///
    /// Vocabulary polish is noise for a beginner still fixing articles.
    fn min_level(&self) -> ProficiencyLevel {
        ProficiencyLevel::Beginner
    }

    /// Whether this checker should run for `profile`
    fn applies_to(&self, profile: &Profile) -> bool {
        profile.level >= self.min_level()
    }

    fn check(&self, text: &str, profile: &Profile) -> Vec<Suggestion>;
}
