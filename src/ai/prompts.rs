//! Prompt templates for model review
//!
//! Contains the system prompts (one per proficiency level) and the builder
//! for the review request.

use crate::models::{Category, ProficiencyLevel, Profile};

/// Upper bound on suggestions requested from the model
pub const DEFAULT_MAX_MODEL_SUGGESTIONS: usize = 15;

/// System prompts for different proficiency levels
pub struct PromptTemplate;

impl PromptTemplate {
    /// Get the system prompt for a level
    pub fn system_prompt(level: ProficiencyLevel) -> &'static str {
        match level {
            ProficiencyLevel::Beginner => {
                "You are a patient English teacher reviewing writing by a beginner (CEFR A1-A2). \
                 Focus on errors that block understanding: verb forms, articles, word order, \
                 basic vocabulary. Use short, simple explanations with everyday words. \
                 Do not rewrite sentences that are already correct."
            }
            ProficiencyLevel::Intermediate => {
                "You are an experienced ESL writing tutor reviewing writing by an intermediate \
                 learner (CEFR B1-B2). Point out grammar and collocation errors first, then \
                 unnatural word choice. Keep explanations clear and brief. \
                 Do not rewrite sentences that are already correct."
            }
            ProficiencyLevel::Advanced => {
                "You are an editor helping an advanced English learner (CEFR C1-C2) write like a \
                 native speaker. Point out remaining errors, unidiomatic phrasing, register \
                 problems and wordiness. Explanations can use grammatical terms. \
                 Do not rewrite sentences that are already correct."
            }
        }
    }

    /// The JSON shape the model must reply with
    pub fn reply_schema() -> &'static str {
        r#"{
  "score": <integer 0-100, overall quality for this learner's level>,
  "summary": "<one or two encouraging sentences>",
  "suggestions": [
    {
      "original": "<exact text copied from the input>",
      "replacement": "<corrected text>",
      "category": "grammar | spelling | punctuation | vocabulary | style | clarity",
      "severity": "high | medium | low | info",
      "explanation": "<why, in one sentence>",
      "confidence": <0.0-1.0>
    }
  ]
}"#
    }
}

/// Builder for review prompts
pub struct ReviewPromptBuilder<'a> {
    text: &'a str,
    profile: &'a Profile,
    max_suggestions: usize,
}

impl<'a> ReviewPromptBuilder<'a> {
    pub fn new(text: &'a str, profile: &'a Profile) -> Self {
        Self {
            text,
            profile,
            max_suggestions: DEFAULT_MAX_MODEL_SUGGESTIONS,
        }
    }

    pub fn max_suggestions(mut self, max: usize) -> Self {
        self.max_suggestions = max.max(1);
        self
    }

    fn profile_section(&self) -> String {
        let mut lines = vec![format!(
            "- Level: {} ({})",
            self.profile.level,
            self.profile.level.cefr()
        )];
        if let Some(lang) = &self.profile.native_language {
            lines.push(format!(
                "- Native language: {} (watch for transfer errors typical of {} speakers)",
                lang, lang
            ));
        }
        if !self.profile.focus.is_empty() {
            let focus: Vec<&str> = self.profile.focus.iter().map(Category::as_str).collect();
            lines.push(format!("- Wants to improve: {}", focus.join(", ")));
        }
        lines.join("\n")
    }

    pub fn build(self) -> String {
        format!(
            r#"Review the following text written by an English learner.

## Writer
{profile}

## Text
<<<
{text}
>>>

## Instructions
1. Find at most {max} problems, most important first.
2. "original" must be copied exactly from the text (same spelling and case) and be as short as possible, usually 1-5 words.
3. Do not report the same problem twice.
4. Skip anything that is correct, even if you would phrase it differently.

Reply with JSON only, in this exact shape:
```json
{schema}
```"#,
            profile = self.profile_section(),
            text = self.text,
            max = self.max_suggestions,
            schema = PromptTemplate::reply_schema(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_prompt_by_level() {
        assert!(PromptTemplate::system_prompt(ProficiencyLevel::Beginner).contains("A1-A2"));
        assert!(PromptTemplate::system_prompt(ProficiencyLevel::Advanced).contains("C1-C2"));
    }

    #[test]
    fn test_prompt_includes_profile_and_text() {
        let profile = Profile::new(ProficiencyLevel::Beginner)
            .with_native_language("Japanese")
            .with_focus(vec![Category::Grammar, Category::Vocabulary]);
        let prompt = ReviewPromptBuilder::new("I has a dog.", &profile)
            .max_suggestions(5)
            .build();
        assert!(prompt.contains("I has a dog."));
        assert!(prompt.contains("Level: beginner (A1-A2)"));
        assert!(prompt.contains("Native language: Japanese"));
        assert!(prompt.contains("Wants to improve: grammar, vocabulary"));
        assert!(prompt.contains("at most 5 problems"));
        assert!(prompt.contains("\"suggestions\""));
    }

    #[test]
    fn test_prompt_without_optional_profile_fields() {
        let profile = Profile::default();
        let prompt = ReviewPromptBuilder::new("Hello.", &profile).max_suggestions(0).build();
        assert!(!prompt.contains("Native language"));
        assert!(!prompt.contains("Wants to improve"));
        assert!(prompt.contains("at most 1 problems"));
    }
}
