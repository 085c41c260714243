//! Output reporters for esl-coach analysis results
//!
//! Supports multiple output formats:
//! - `text` - Terminal output with colors
//! - `json` - Machine-readable JSON

mod json;
mod text;

use crate::models::AnalysisReport;
use anyhow::{anyhow, Result};
use std::str::FromStr;

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" | "terminal" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(anyhow!("Unknown format '{}'. Valid formats: text, json", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Render an analysis report using an OutputFormat enum
pub fn report_with_format(report: &AnalysisReport, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => text::render(report),
        OutputFormat::Json => json::render(report),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Create a minimal AnalysisReport for testing
    pub(crate) fn test_report() -> AnalysisReport {
        use crate::models::{
            AnalysisSource, Category, Feedback, Profile, Severity, Span, Suggestion,
            SuggestionSource, SuggestionsSummary,
        };
        use crate::scoring::ScoreBreakdown;
        use crate::text::TextStats;

        let text = "I ate a apple.";
        let suggestions = vec![Suggestion::new(
            text,
            Span::new(6, 13),
            "article-an-before-vowel",
            SuggestionSource::Rule,
            Category::Grammar,
            Severity::Medium,
            Some("an apple".into()),
            "Use \"an\" before a vowel sound",
            "\"A\" becomes \"an\" before a vowel sound.",
            0.85,
        )];

        AnalysisReport {
            score: 74,
            grade: "C".into(),
            breakdown: ScoreBreakdown {
                local_score: 74.5,
                penalty: 25.5,
                final_score: 74,
                ..Default::default()
            },
            source: AnalysisSource::RulesOnly,
            profile: Profile::default(),
            summary: SuggestionsSummary::from_suggestions(&suggestions),
            suggestions,
            feedback: Feedback {
                headline: "Good work.".into(),
                strengths: vec![],
                improvements: vec!["Grammar: review article use.".into()],
                model_summary: None,
            },
            stats: TextStats::compute(text),
            analyzed_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_format_parsing() {
        assert_eq!(OutputFormat::from_str("text").unwrap(), OutputFormat::Text);
        assert_eq!(OutputFormat::from_str("JSON").unwrap(), OutputFormat::Json);
        assert!(OutputFormat::from_str("sarif").is_err());
    }

    #[test]
    fn test_report_parsed_format() {
        let format = OutputFormat::from_str("json").unwrap();
        let out = report_with_format(&test_report(), format).unwrap();
        assert!(out.trim_start().starts_with('{'));
    }
}
