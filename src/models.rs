//! Core data models for esl-coach
//!
//! These models are shared by the rule engine, the model client and the
//! merge/scoring pass, and are what the reporters serialize.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use xxhash_rust::xxh3::xxh3_64;

use crate::scoring::ScoreBreakdown;
use crate::text::TextStats;

/// Generate a deterministic suggestion ID based on content hash.
///
/// Stable across runs so a suggestion can be referenced (or dismissed)
/// after re-analysis of the same text. The ID is a 16-character hex string
/// derived from the rule id, the start offset and the flagged text.
pub fn deterministic_suggestion_id(rule: &str, start: usize, original: &str) -> String {
    let input = format!("{rule}\n{start}\n{original}");
    format!("{:016x}", xxh3_64(input.as_bytes()))
}

/// Severity levels for suggestions
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Info,
    Low,
    Medium,
    High,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Low => write!(f, "low"),
            Severity::Medium => write!(f, "medium"),
            Severity::High => write!(f, "high"),
        }
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "info" | "hint" => Ok(Severity::Info),
            "low" | "minor" => Ok(Severity::Low),
            "medium" | "moderate" => Ok(Severity::Medium),
            "high" | "major" | "critical" => Ok(Severity::High),
            other => Err(format!(
                "unknown severity '{}' (expected info, low, medium, high)",
                other
            )),
        }
    }
}

/// What kind of writing problem a suggestion addresses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Grammar,
    Spelling,
    Punctuation,
    Vocabulary,
    Style,
    Clarity,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Grammar,
        Category::Spelling,
        Category::Punctuation,
        Category::Vocabulary,
        Category::Style,
        Category::Clarity,
    ];

    /// Lenient mapping for free-form category names coming back from a model.
    /// Anything unrecognised is treated as a style remark.
    pub fn from_loose(s: &str) -> Category {
        s.parse().unwrap_or(Category::Style)
    }

    /// Short heading used when a suggestion has no message of its own
    pub fn title(&self) -> &'static str {
        match self {
            Category::Grammar => "Grammar",
            Category::Spelling => "Spelling",
            Category::Punctuation => "Punctuation",
            Category::Vocabulary => "Word choice",
            Category::Style => "Style",
            Category::Clarity => "Clarity",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Grammar => "grammar",
            Category::Spelling => "spelling",
            Category::Punctuation => "punctuation",
            Category::Vocabulary => "vocabulary",
            Category::Style => "style",
            Category::Clarity => "clarity",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        match lower.as_str() {
            "grammar" | "grammatical" | "syntax" | "agreement" | "tense" | "article"
            | "articles" => Ok(Category::Grammar),
            "spelling" | "typo" | "orthography" => Ok(Category::Spelling),
            "punctuation" | "capitalization" | "capitalisation" | "mechanics" => {
                Ok(Category::Punctuation)
            }
            "vocabulary" | "word choice" | "word_choice" | "lexical" | "collocation" => {
                Ok(Category::Vocabulary)
            }
            "style" | "tone" | "register" | "formality" => Ok(Category::Style),
            "clarity" | "readability" | "fluency" | "coherence" => Ok(Category::Clarity),
            _ => Err(format!("unknown category '{}'", s)),
        }
    }
}

/// Byte range into the analyzed text. Always on char boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "span start after end");
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Whether two spans share at least one byte. An empty span overlaps a
    /// span that strictly contains its position.
    pub fn overlaps(&self, other: &Span) -> bool {
        if self.is_empty() || other.is_empty() {
            let (point, range) = if self.is_empty() { (self, other) } else { (other, self) };
            return range.start < point.start && point.start < range.end;
        }
        self.start < other.end && other.start < self.end
    }

    /// Bytes between two non-overlapping spans (0 when they touch or overlap).
    pub fn gap_to(&self, other: &Span) -> usize {
        if self.end <= other.start {
            other.start - self.end
        } else if other.end <= self.start {
            self.start - other.end
        } else {
            0
        }
    }

    pub fn slice<'a>(&self, text: &'a str) -> &'a str {
        text.get(self.start..self.end).unwrap_or("")
    }
}

/// Where a suggestion came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionSource {
    Rule,
    Model,
}

/// A flagged text span with a proposed replacement and rationale
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Suggestion {
    pub id: String,
    /// Rule id for local findings, `"model"` for model findings
    pub rule: String,
    pub source: SuggestionSource,
    pub category: Category,
    pub severity: Severity,
    pub span: Span,
    pub line: u32,
    pub column: u32,
    pub original: String,
    /// `None` for advisory suggestions (e.g. "split this sentence")
    #[serde(default)]
    pub replacement: Option<String>,
    pub message: String,
    pub explanation: String,
    /// Confidence score from 0.0 to 1.0
    pub confidence: f64,
}

impl Suggestion {
    /// Build a suggestion for `span` of `text`, filling in id and position.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        text: &str,
        span: Span,
        rule: &str,
        source: SuggestionSource,
        category: Category,
        severity: Severity,
        replacement: Option<String>,
        message: impl Into<String>,
        explanation: impl Into<String>,
        confidence: f64,
    ) -> Self {
        let original = span.slice(text).to_string();
        let (line, column) = crate::text::line_col(text, span.start);
        Self {
            id: deterministic_suggestion_id(rule, span.start, &original),
            rule: rule.to_string(),
            source,
            category,
            severity,
            span,
            line,
            column,
            original,
            replacement,
            message: message.into(),
            explanation: explanation.into(),
            confidence: confidence.clamp(0.0, 1.0),
        }
    }
}

/// Summary of suggestions by severity and category
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SuggestionsSummary {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
    pub info: usize,
    pub total: usize,
    pub by_category: Vec<(Category, usize)>,
}

impl SuggestionsSummary {
    pub fn from_suggestions(suggestions: &[Suggestion]) -> Self {
        let mut summary = Self::default();
        for s in suggestions {
            match s.severity {
                Severity::High => summary.high += 1,
                Severity::Medium => summary.medium += 1,
                Severity::Low => summary.low += 1,
                Severity::Info => summary.info += 1,
            }
            summary.total += 1;
        }
        summary.by_category = Category::ALL
            .iter()
            .map(|c| (*c, suggestions.iter().filter(|s| s.category == *c).count()))
            .filter(|(_, n)| *n > 0)
            .collect();
        // Most frequent first; ties keep Category::ALL order
        summary.by_category.sort_by(|a, b| b.1.cmp(&a.1));
        summary
    }

    pub fn count(&self, category: Category) -> usize {
        self.by_category
            .iter()
            .find(|(c, _)| *c == category)
            .map(|(_, n)| *n)
            .unwrap_or(0)
    }
}

/// Writer proficiency, used to tune rules, prompts and feedback
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum ProficiencyLevel {
    Beginner,
    #[default]
    Intermediate,
    Advanced,
}

impl ProficiencyLevel {
    pub fn cefr(&self) -> &'static str {
        match self {
            ProficiencyLevel::Beginner => "A1-A2",
            ProficiencyLevel::Intermediate => "B1-B2",
            ProficiencyLevel::Advanced => "C1-C2",
        }
    }
}

impl std::fmt::Display for ProficiencyLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProficiencyLevel::Beginner => write!(f, "beginner"),
            ProficiencyLevel::Intermediate => write!(f, "intermediate"),
            ProficiencyLevel::Advanced => write!(f, "advanced"),
        }
    }
}

impl FromStr for ProficiencyLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "beginner" | "basic" | "a1" | "a2" => Ok(ProficiencyLevel::Beginner),
            "intermediate" | "b1" | "b2" => Ok(ProficiencyLevel::Intermediate),
            "advanced" | "proficient" | "c1" | "c2" => Ok(ProficiencyLevel::Advanced),
            other => Err(format!(
                "unknown level '{}' (expected beginner, intermediate, advanced or a CEFR band)",
                other
            )),
        }
    }
}

/// The writer the feedback is for
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default)]
    pub level: ProficiencyLevel,
    #[serde(default)]
    pub native_language: Option<String>,
    /// Categories the writer wants to work on; ranked first
    #[serde(default)]
    pub focus: Vec<Category>,
}

impl Profile {
    pub fn new(level: ProficiencyLevel) -> Self {
        Self {
            level,
            ..Default::default()
        }
    }

    pub fn with_native_language(mut self, language: impl Into<String>) -> Self {
        self.native_language = Some(language.into());
        self
    }

    pub fn with_focus(mut self, focus: Vec<Category>) -> Self {
        self.focus = focus;
        self
    }

    pub fn focuses_on(&self, category: Category) -> bool {
        self.focus.contains(&category)
    }
}

/// How the suggestions in a report were produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisSource {
    /// Model reply merged with local rules
    Model,
    /// Model configured but the call or its reply failed
    Fallback,
    /// No model configured
    RulesOnly,
}

impl std::fmt::Display for AnalysisSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnalysisSource::Model => write!(f, "model + rules"),
            AnalysisSource::Fallback => write!(f, "rules (model unavailable)"),
            AnalysisSource::RulesOnly => write!(f, "rules"),
        }
    }
}

/// User-facing feedback derived from the analysis
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Feedback {
    pub headline: String,
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_summary: Option<String>,
}

/// Full result of analyzing one text
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub score: u8,
    pub grade: String,
    pub breakdown: ScoreBreakdown,
    pub source: AnalysisSource,
    pub profile: Profile,
    pub suggestions: Vec<Suggestion>,
    pub summary: SuggestionsSummary,
    pub feedback: Feedback,
    pub stats: TextStats,
    pub analyzed_at: chrono::DateTime<chrono::Utc>,
}

impl AnalysisReport {
    /// Calculate grade from score
    pub fn grade_from_score(score: f64) -> String {
        match score {
            s if s >= 90.0 => "A".to_string(),
            s if s >= 80.0 => "B".to_string(),
            s if s >= 70.0 => "C".to_string(),
            s if s >= 60.0 => "D".to_string(),
            _ => "F".to_string(),
        }
    }
}
